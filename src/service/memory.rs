//! In-memory implementations of the service ports.
//!
//! Each adapter guards its map with a [`RwLock`]. A poisoned lock is
//! recovered rather than propagated: every write leaves the map consistent
//! before it can panic.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use serde::Deserialize;
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    AuditAction, AuditSnapshot, EmployeeSnapshot, PayrollAuditEvent, PayrollKey, PayrollPeriod,
    PayrollRecord,
};

use super::ports::{EmployeeDirectory, PayrollStore, PeriodDirectory};

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

/// Employees and periods loaded at startup.
///
/// # Example
///
/// ```
/// use payroll_engine::service::SeedData;
///
/// let yaml = r#"
/// employees:
///   - id: emp_004
///     compensation: { type: TEMPORARY, base_salary: "2500000" }
///     hire_date: 2025-08-01
///     status: ACTIVE
/// periods: []
/// "#;
/// let seed = SeedData::from_yaml_str(yaml, "inline").unwrap();
/// assert_eq!(seed.employees.len(), 1);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedData {
    /// Employee records.
    #[serde(default)]
    pub employees: Vec<EmployeeSnapshot>,
    /// Payroll periods.
    #[serde(default)]
    pub periods: Vec<PayrollPeriod>,
}

impl SeedData {
    /// Reads and validates seed data from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path.display().to_string(),
        })?;
        Self::from_yaml_str(&content, &path.display().to_string())
    }

    /// Parses and validates seed data; `source` names the origin in errors.
    pub fn from_yaml_str(content: &str, source: &str) -> EngineResult<Self> {
        let seed: SeedData =
            serde_yaml::from_str(content).map_err(|e| EngineError::ConfigParseError {
                path: source.to_string(),
                message: e.to_string(),
            })?;

        for employee in &seed.employees {
            employee.validate().map_err(|e| EngineError::InvalidConfig {
                field: format!("employees.{}", employee.id),
                message: e.to_string(),
            })?;
        }
        for period in &seed.periods {
            period.validate().map_err(|e| EngineError::InvalidConfig {
                field: format!("periods.{}", period.id),
                message: e.to_string(),
            })?;
        }

        debug!(
            source,
            employees = seed.employees.len(),
            periods = seed.periods.len(),
            "Loaded seed data"
        );
        Ok(seed)
    }

    /// Splits the seed into populated directories.
    pub fn into_directories(self) -> (InMemoryEmployeeDirectory, InMemoryPeriodDirectory) {
        (
            InMemoryEmployeeDirectory::with_employees(self.employees),
            InMemoryPeriodDirectory::with_periods(self.periods),
        )
    }
}

/// Employee directory backed by a map.
#[derive(Debug, Default)]
pub struct InMemoryEmployeeDirectory {
    employees: RwLock<BTreeMap<String, EmployeeSnapshot>>,
}

impl InMemoryEmployeeDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a directory holding the given employees.
    pub fn with_employees(employees: impl IntoIterator<Item = EmployeeSnapshot>) -> Self {
        let map = employees.into_iter().map(|e| (e.id.clone(), e)).collect();
        Self {
            employees: RwLock::new(map),
        }
    }

    /// Adds or replaces an employee.
    pub fn upsert(&self, employee: EmployeeSnapshot) {
        write(&self.employees).insert(employee.id.clone(), employee);
    }
}

impl EmployeeDirectory for InMemoryEmployeeDirectory {
    fn find_employee(&self, employee_id: &str) -> Option<EmployeeSnapshot> {
        read(&self.employees).get(employee_id).cloned()
    }

    fn active_employees(&self) -> Vec<EmployeeSnapshot> {
        read(&self.employees)
            .values()
            .filter(|e| e.is_active())
            .cloned()
            .collect()
    }
}

/// Period directory backed by a map.
#[derive(Debug, Default)]
pub struct InMemoryPeriodDirectory {
    periods: RwLock<BTreeMap<String, PayrollPeriod>>,
}

impl InMemoryPeriodDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a directory holding the given periods.
    pub fn with_periods(periods: impl IntoIterator<Item = PayrollPeriod>) -> Self {
        let map = periods.into_iter().map(|p| (p.id.clone(), p)).collect();
        Self {
            periods: RwLock::new(map),
        }
    }

    /// Adds or replaces a period (e.g. to move it to another state).
    pub fn upsert(&self, period: PayrollPeriod) {
        write(&self.periods).insert(period.id.clone(), period);
    }
}

impl PeriodDirectory for InMemoryPeriodDirectory {
    fn find_period(&self, period_id: &str) -> Option<PayrollPeriod> {
        read(&self.periods).get(period_id).cloned()
    }
}

#[derive(Debug, Default)]
struct StoreState {
    records: BTreeMap<PayrollKey, PayrollRecord>,
    events: Vec<PayrollAuditEvent>,
}

/// Payroll store backed by a map plus an append-only audit log.
#[derive(Debug, Default)]
pub struct InMemoryPayrollStore {
    state: RwLock<StoreState>,
}

impl InMemoryPayrollStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        read(&self.state).records.len()
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn audit_event(
    key: PayrollKey,
    action: AuditAction,
    performed_by: &str,
    before: Option<&PayrollRecord>,
    after: Option<&PayrollRecord>,
) -> PayrollAuditEvent {
    PayrollAuditEvent {
        key,
        action,
        performed_by: performed_by.to_string(),
        before: before.map(AuditSnapshot::from),
        after: after.map(AuditSnapshot::from),
        recorded_at: Utc::now(),
    }
}

impl PayrollStore for InMemoryPayrollStore {
    fn find(&self, key: &PayrollKey) -> Option<PayrollRecord> {
        read(&self.state).records.get(key).cloned()
    }

    fn insert(&self, record: PayrollRecord) -> EngineResult<PayrollRecord> {
        let key = record.key();
        let mut state = write(&self.state);

        if state.records.contains_key(&key) {
            return Err(EngineError::DuplicateCalculation {
                employee_id: key.employee_id,
                period_id: key.period_id,
            });
        }

        let event = audit_event(
            key.clone(),
            AuditAction::Create,
            &record.calculated_by,
            None,
            Some(&record),
        );
        state.events.push(event);
        state.records.insert(key, record.clone());
        Ok(record)
    }

    fn replace(&self, record: PayrollRecord) -> EngineResult<PayrollRecord> {
        let key = record.key();
        let mut state = write(&self.state);

        let Some(previous) = state.records.get(&key).cloned() else {
            return Err(EngineError::PayrollNotFound {
                employee_id: key.employee_id,
                period_id: key.period_id,
            });
        };
        state.records.insert(key.clone(), record.clone());

        let event = audit_event(
            key,
            AuditAction::Recalculate,
            &record.calculated_by,
            Some(&previous),
            Some(&record),
        );
        state.events.push(event);
        Ok(record)
    }

    fn remove(&self, key: &PayrollKey, performed_by: &str) -> EngineResult<PayrollRecord> {
        let mut state = write(&self.state);

        let removed = state
            .records
            .remove(key)
            .ok_or_else(|| EngineError::PayrollNotFound {
                employee_id: key.employee_id.clone(),
                period_id: key.period_id.clone(),
            })?;

        let event = audit_event(
            key.clone(),
            AuditAction::Delete,
            performed_by,
            Some(&removed),
            None,
        );
        state.events.push(event);
        Ok(removed)
    }

    fn list_by_period(&self, period_id: &str) -> Vec<PayrollRecord> {
        read(&self.state)
            .records
            .values()
            .filter(|r| r.result.period_id == period_id)
            .cloned()
            .collect()
    }

    fn list_by_employee(&self, employee_id: &str) -> Vec<PayrollRecord> {
        read(&self.state)
            .records
            .iter()
            .filter(|(key, _)| key.employee_id == employee_id)
            .map(|(_, record)| record.clone())
            .collect()
    }

    fn audit_trail(&self, key: &PayrollKey) -> Vec<PayrollAuditEvent> {
        read(&self.state)
            .events
            .iter()
            .filter(|e| &e.key == key)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        AuditTrace, Compensation, EmployeeStatus, EmployeeType, PayrollResult, PayrollTotals,
        PeriodInputs, PeriodState,
    };
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::sync::Arc;
    use std::thread;

    fn create_test_employee(id: &str, status: EmployeeStatus) -> EmployeeSnapshot {
        EmployeeSnapshot {
            id: id.to_string(),
            full_name: None,
            compensation: Compensation::Temporary {
                base_salary: Decimal::from(2_500_000),
            },
            hire_date: NaiveDate::from_ymd_opt(2025, 8, 1).unwrap(),
            status,
        }
    }

    fn create_record(employee_id: &str, period_id: &str, gross: i64) -> PayrollRecord {
        let result = PayrollResult {
            employee_id: employee_id.to_string(),
            period_id: period_id.to_string(),
            employee_type: EmployeeType::Temporary,
            normal_hours: Decimal::ZERO,
            overtime_hours: Decimal::ZERO,
            line_items: vec![],
            totals: PayrollTotals::from_line_items(Decimal::from(gross), &[]),
            audit_trace: AuditTrace::default(),
        };
        PayrollRecord::new(result, PeriodInputs::default(), "tester")
    }

    #[test]
    fn test_active_employees_filters_and_orders() {
        let directory = InMemoryEmployeeDirectory::with_employees(vec![
            create_test_employee("emp_003", EmployeeStatus::Active),
            create_test_employee("emp_001", EmployeeStatus::Active),
            create_test_employee("emp_002", EmployeeStatus::Suspended),
        ]);

        let ids: Vec<String> = directory
            .active_employees()
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec!["emp_001", "emp_003"]);
        assert!(directory.find_employee("emp_002").is_some());
        assert!(directory.find_employee("emp_404").is_none());
    }

    #[test]
    fn test_insert_rejects_duplicate_key() {
        let store = InMemoryPayrollStore::new();
        store.insert(create_record("emp_001", "2026-01", 100)).unwrap();

        match store.insert(create_record("emp_001", "2026-01", 200)) {
            Err(EngineError::DuplicateCalculation { employee_id, .. }) => {
                assert_eq!(employee_id, "emp_001")
            }
            other => panic!("Expected DuplicateCalculation, got {:?}", other),
        }
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_replace_requires_existing_record() {
        let store = InMemoryPayrollStore::new();

        let result = store.replace(create_record("emp_001", "2026-01", 100));

        assert!(matches!(result, Err(EngineError::PayrollNotFound { .. })));
        assert!(store.is_empty());
        assert!(store.audit_trail(&PayrollKey::new("emp_001", "2026-01")).is_empty());
    }

    #[test]
    fn test_replace_keeps_single_record_and_audits_before_after() {
        let store = InMemoryPayrollStore::new();
        let key = PayrollKey::new("emp_001", "2026-01");
        store.insert(create_record("emp_001", "2026-01", 100)).unwrap();
        store.replace(create_record("emp_001", "2026-01", 250)).unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(
            store.find(&key).unwrap().result.totals.gross_pay,
            Decimal::from(250)
        );

        let trail = store.audit_trail(&key);
        assert_eq!(trail.len(), 2);
        assert_eq!(trail[0].action, AuditAction::Create);
        assert!(trail[0].before.is_none());
        assert_eq!(trail[1].action, AuditAction::Recalculate);
        assert_eq!(
            trail[1].before.as_ref().unwrap().totals.gross_pay,
            Decimal::from(100)
        );
        assert_eq!(
            trail[1].after.as_ref().unwrap().totals.gross_pay,
            Decimal::from(250)
        );
    }

    #[test]
    fn test_remove_audits_deletion() {
        let store = InMemoryPayrollStore::new();
        let key = PayrollKey::new("emp_001", "2026-01");
        store.insert(create_record("emp_001", "2026-01", 100)).unwrap();

        let removed = store.remove(&key, "auditor").unwrap();

        assert_eq!(removed.result.employee_id, "emp_001");
        assert!(store.find(&key).is_none());
        let trail = store.audit_trail(&key);
        assert_eq!(trail.last().unwrap().action, AuditAction::Delete);
        assert_eq!(trail.last().unwrap().performed_by, "auditor");
        assert!(trail.last().unwrap().after.is_none());

        assert!(matches!(
            store.remove(&key, "auditor"),
            Err(EngineError::PayrollNotFound { .. })
        ));
    }

    #[test]
    fn test_list_by_period() {
        let store = InMemoryPayrollStore::new();
        store.insert(create_record("emp_002", "2026-01", 1)).unwrap();
        store.insert(create_record("emp_001", "2026-01", 1)).unwrap();
        store.insert(create_record("emp_001", "2026-02", 1)).unwrap();

        let ids: Vec<String> = store
            .list_by_period("2026-01")
            .into_iter()
            .map(|r| r.result.employee_id)
            .collect();
        assert_eq!(ids, vec!["emp_001", "emp_002"]);
        assert!(store.list_by_period("2025-12").is_empty());
    }

    #[test]
    fn test_list_by_employee_orders_by_period() {
        let store = InMemoryPayrollStore::new();
        store.insert(create_record("emp_001", "2026-02", 1)).unwrap();
        store.insert(create_record("emp_002", "2026-01", 1)).unwrap();
        store.insert(create_record("emp_001", "2025-12", 1)).unwrap();

        let periods: Vec<String> = store
            .list_by_employee("emp_001")
            .into_iter()
            .map(|r| r.result.period_id)
            .collect();
        assert_eq!(periods, vec!["2025-12", "2026-02"]);
        assert!(store.list_by_employee("emp_404").is_empty());
    }

    #[test]
    fn test_concurrent_inserts_store_exactly_one() {
        let store = Arc::new(InMemoryPayrollStore::new());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                thread::spawn(move || store.insert(create_record("emp_001", "2026-01", i)).is_ok())
            })
            .collect();

        let successes = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();

        assert_eq!(successes, 1);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_seed_data_parses_and_splits() {
        let yaml = r#"
employees:
  - id: emp_001
    full_name: Carlos Rodríguez
    compensation:
      type: SALARIED
      base_salary: "5000000"
    hire_date: 2019-06-15
    status: ACTIVE
periods:
  - id: "2026-01"
    year: 2026
    month: 1
    start_date: 2026-01-01
    end_date: 2026-01-31
    payment_date: 2026-02-05
    state: OPEN
"#;
        let seed = SeedData::from_yaml_str(yaml, "inline").unwrap();
        let (employees, periods) = seed.into_directories();

        assert_eq!(
            employees.find_employee("emp_001").unwrap().full_name.as_deref(),
            Some("Carlos Rodríguez")
        );
        assert_eq!(
            periods.find_period("2026-01").unwrap().state,
            PeriodState::Open
        );
    }

    #[test]
    fn test_seed_data_rejects_invalid_employee() {
        let yaml = r#"
employees:
  - id: emp_bad
    compensation: { type: SALARIED, base_salary: "-1" }
    hire_date: 2019-06-15
    status: ACTIVE
"#;
        match SeedData::from_yaml_str(yaml, "inline") {
            Err(EngineError::InvalidConfig { field, .. }) => assert_eq!(field, "employees.emp_bad"),
            other => panic!("Expected InvalidConfig, got {:?}", other),
        }
    }

    #[test]
    fn test_shipped_seed_file_loads() {
        let seed = SeedData::load("./config/seed/demo.yaml").unwrap();
        assert_eq!(seed.employees.len(), 5);
        assert_eq!(seed.periods.len(), 3);
    }

    #[test]
    fn test_period_upsert_changes_state() {
        let directory = InMemoryPeriodDirectory::new();
        let mut period = PayrollPeriod {
            id: "2026-01".to_string(),
            year: 2026,
            month: 1,
            start_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 1, 31).unwrap(),
            payment_date: NaiveDate::from_ymd_opt(2026, 2, 5).unwrap(),
            state: PeriodState::Open,
        };
        directory.upsert(period.clone());
        period.state = PeriodState::Closed;
        directory.upsert(period);

        assert!(directory.find_period("2026-01").unwrap().is_closed());
    }
}
