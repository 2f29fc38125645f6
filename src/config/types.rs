//! Configuration types for payroll rules.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files. Every rule section falls
//! back to its compiled-in default when omitted from the file.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{EngineError, EngineResult};
use crate::models::MAX_MONETARY_AMOUNT;

/// Default monthly ordinary-hours threshold for hourly employees.
pub const DEFAULT_MONTHLY_NORMAL_HOURS: Decimal = Decimal::from_parts(160, 0, 0, false, 0);

/// Default overtime multiplier (150% of the hourly rate).
pub const DEFAULT_OVERTIME_MULTIPLIER: Decimal = Decimal::from_parts(15, 0, 0, false, 1);

/// Default seniority bonus, as a percentage of base salary.
pub const DEFAULT_SENIORITY_BONUS_PERCENTAGE: Decimal = Decimal::from_parts(10, 0, 0, false, 0);

/// Default sales bonus, as a percentage of sales.
pub const DEFAULT_SALES_BONUS_PERCENTAGE: Decimal = Decimal::from_parts(3, 0, 0, false, 0);

/// Default sales amount that must be exceeded for the sales bonus.
pub const DEFAULT_SALES_THRESHOLD: Decimal = Decimal::from_parts(20_000_000, 0, 0, false, 0);

/// Default monthly meal allowance.
pub const DEFAULT_MEAL_ALLOWANCE: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// Default social security and pension percentage.
pub const DEFAULT_SOCIAL_SECURITY_PERCENTAGE: Decimal = Decimal::from_parts(4, 0, 0, false, 0);

/// Default occupational risk (ARL) percentage.
pub const DEFAULT_OCCUPATIONAL_RISK_PERCENTAGE: Decimal = Decimal::from_parts(522, 0, 0, false, 3);

/// Default savings-fund contribution percentage.
pub const DEFAULT_SAVINGS_FUND_PERCENTAGE: Decimal = Decimal::from_parts(2, 0, 0, false, 0);

/// Largest percentage or multiplier a rule set may carry.
pub const MAX_RULE_RATE: Decimal = Decimal::from_parts(1000, 0, 0, false, 0);

/// Metadata about the jurisdiction a rule set applies to.
#[derive(Debug, Clone, Deserialize)]
pub struct JurisdictionMetadata {
    /// Short code (e.g., "CO").
    pub code: String,
    /// Human-readable name.
    pub name: String,
    /// ISO 4217 currency code.
    pub currency: String,
    /// The year the rule set is effective for.
    pub effective_year: i32,
    /// Where the figures come from.
    #[serde(default)]
    pub source: Option<String>,
}

/// Hourly pay parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct HourlyRules {
    /// Hours per month paid at the ordinary rate.
    pub monthly_normal_hours: Decimal,
    /// Multiplier applied to the hourly rate for overtime.
    pub overtime_multiplier: Decimal,
}

impl Default for HourlyRules {
    fn default() -> Self {
        Self {
            monthly_normal_hours: DEFAULT_MONTHLY_NORMAL_HOURS,
            overtime_multiplier: DEFAULT_OVERTIME_MULTIPLIER,
        }
    }
}

/// Seniority bonus for salaried employees.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SeniorityBonusRules {
    /// Percentage of base salary.
    pub percentage: Decimal,
    /// Whole years of service required (inclusive).
    pub min_tenure_years: u32,
}

impl Default for SeniorityBonusRules {
    fn default() -> Self {
        Self {
            percentage: DEFAULT_SENIORITY_BONUS_PERCENTAGE,
            min_tenure_years: 5,
        }
    }
}

/// Sales bonus for commission employees.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SalesBonusRules {
    /// Percentage of the sales amount.
    pub percentage: Decimal,
    /// Sales must be strictly greater than this.
    pub sales_threshold: Decimal,
}

impl Default for SalesBonusRules {
    fn default() -> Self {
        Self {
            percentage: DEFAULT_SALES_BONUS_PERCENTAGE,
            sales_threshold: DEFAULT_SALES_THRESHOLD,
        }
    }
}

/// Fixed meal allowance for salaried and commission employees.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MealAllowanceRules {
    /// Monthly amount.
    pub amount: Decimal,
}

impl Default for MealAllowanceRules {
    fn default() -> Self {
        Self {
            amount: DEFAULT_MEAL_ALLOWANCE,
        }
    }
}

/// Statutory deductions applied to every employee.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StatutoryDeductionRules {
    /// Social security and pension, as a percentage of gross.
    pub social_security_pension_percentage: Decimal,
    /// Occupational risk insurance, as a percentage of gross.
    pub occupational_risk_percentage: Decimal,
}

impl Default for StatutoryDeductionRules {
    fn default() -> Self {
        Self {
            social_security_pension_percentage: DEFAULT_SOCIAL_SECURITY_PERCENTAGE,
            occupational_risk_percentage: DEFAULT_OCCUPATIONAL_RISK_PERCENTAGE,
        }
    }
}

/// Savings-fund contribution for hourly employees who opt in.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SavingsFundRules {
    /// Contribution as a percentage of gross.
    pub percentage: Decimal,
    /// Whole years of service required (inclusive).
    pub min_tenure_years: u32,
}

impl Default for SavingsFundRules {
    fn default() -> Self {
        Self {
            percentage: DEFAULT_SAVINGS_FUND_PERCENTAGE,
            min_tenure_years: 1,
        }
    }
}

/// Every rate and threshold the engine reads.
///
/// # Example
///
/// ```
/// use payroll_engine::config::PayrollRules;
/// use rust_decimal::Decimal;
///
/// let rules: PayrollRules = serde_yaml::from_str("amount_scale: 0").unwrap();
/// assert_eq!(rules.amount_scale, 0);
/// assert_eq!(rules.sales_bonus.sales_threshold, Decimal::new(20_000_000, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PayrollRules {
    /// Decimal places line-item amounts and gross pay are rounded to.
    pub amount_scale: u32,
    /// Hourly pay parameters.
    pub hourly: HourlyRules,
    /// Seniority bonus parameters.
    pub seniority_bonus: SeniorityBonusRules,
    /// Sales bonus parameters.
    pub sales_bonus: SalesBonusRules,
    /// Meal allowance parameters.
    pub meal_allowance: MealAllowanceRules,
    /// Statutory deduction rates.
    pub deductions: StatutoryDeductionRules,
    /// Savings-fund parameters.
    pub savings_fund: SavingsFundRules,
}

impl Default for PayrollRules {
    fn default() -> Self {
        Self {
            amount_scale: 2,
            hourly: HourlyRules::default(),
            seniority_bonus: SeniorityBonusRules::default(),
            sales_bonus: SalesBonusRules::default(),
            meal_allowance: MealAllowanceRules::default(),
            deductions: StatutoryDeductionRules::default(),
            savings_fund: SavingsFundRules::default(),
        }
    }
}

impl PayrollRules {
    /// Rejects negative or oversized rates and amounts and unreasonable scales.
    ///
    /// Rates are capped at [`MAX_RULE_RATE`] and amounts at
    /// [`MAX_MONETARY_AMOUNT`]. Percentages above 100 are accepted here; a rule
    /// table that drives net pay below zero is caught per calculation instead.
    pub fn validate(&self) -> EngineResult<()> {
        if self.amount_scale > 10 {
            return Err(EngineError::InvalidConfig {
                field: "amount_scale".to_string(),
                message: format!("must be at most 10, got {}", self.amount_scale),
            });
        }

        let rates = [
            ("hourly.overtime_multiplier", self.hourly.overtime_multiplier),
            ("seniority_bonus.percentage", self.seniority_bonus.percentage),
            ("sales_bonus.percentage", self.sales_bonus.percentage),
            (
                "deductions.social_security_pension_percentage",
                self.deductions.social_security_pension_percentage,
            ),
            (
                "deductions.occupational_risk_percentage",
                self.deductions.occupational_risk_percentage,
            ),
            ("savings_fund.percentage", self.savings_fund.percentage),
        ];
        let amounts = [
            ("hourly.monthly_normal_hours", self.hourly.monthly_normal_hours),
            ("sales_bonus.sales_threshold", self.sales_bonus.sales_threshold),
            ("meal_allowance.amount", self.meal_allowance.amount),
        ];

        let limited = rates
            .into_iter()
            .map(|(field, value)| (field, value, MAX_RULE_RATE))
            .chain(
                amounts
                    .into_iter()
                    .map(|(field, value)| (field, value, MAX_MONETARY_AMOUNT)),
            );

        for (field, value, max) in limited {
            if value < Decimal::ZERO {
                return Err(EngineError::InvalidConfig {
                    field: field.to_string(),
                    message: format!("cannot be negative, got {}", value),
                });
            }
            if value > max {
                return Err(EngineError::InvalidConfig {
                    field: field.to_string(),
                    message: format!("must be at most {}, got {}", max, value),
                });
            }
        }

        Ok(())
    }
}

/// The complete payroll configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct PayrollConfig {
    /// Jurisdiction metadata.
    metadata: JurisdictionMetadata,
    /// Rates and thresholds.
    rules: PayrollRules,
}

impl PayrollConfig {
    /// Creates a new PayrollConfig from its component parts.
    pub fn new(metadata: JurisdictionMetadata, rules: PayrollRules) -> Self {
        Self { metadata, rules }
    }

    /// Returns the jurisdiction metadata.
    pub fn jurisdiction(&self) -> &JurisdictionMetadata {
        &self.metadata
    }

    /// Returns the payroll rules.
    pub fn rules(&self) -> &PayrollRules {
        &self.rules
    }
}
