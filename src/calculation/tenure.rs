//! Length-of-service calculation.

use chrono::{Datelike, NaiveDate};

/// Returns the number of whole years between `hire_date` and `evaluation_date`.
///
/// A year is only counted once its anniversary has been reached, so an
/// employee hired on 2021-01-31 has 5 years of service on 2026-01-31 but 4 on
/// 2026-01-30. A hire date after the evaluation date yields 0.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::tenure_years;
/// use chrono::NaiveDate;
///
/// let hired = NaiveDate::from_ymd_opt(2019, 6, 15).unwrap();
/// let period_end = NaiveDate::from_ymd_opt(2026, 1, 31).unwrap();
/// assert_eq!(tenure_years(hired, period_end), 6);
/// ```
pub fn tenure_years(hire_date: NaiveDate, evaluation_date: NaiveDate) -> u32 {
    if hire_date >= evaluation_date {
        return 0;
    }

    let mut years = evaluation_date.year() - hire_date.year();
    if (evaluation_date.month(), evaluation_date.day()) < (hire_date.month(), hire_date.day()) {
        years -= 1;
    }

    u32::try_from(years).unwrap_or(0)
}
