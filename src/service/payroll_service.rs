//! The payroll service: validation, guarding, assembly and persistence.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{info, warn};

use crate::calculation::{GuardOperation, assemble_payroll, authorize};
use crate::config::PayrollRules;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    BatchFailure, BatchOutcome, EmployeeSnapshot, PayrollAuditEvent, PayrollKey, PayrollPeriod,
    PayrollRecord, PeriodInputs, PeriodSummary,
};

use super::ports::{EmployeeDirectory, PayrollStore, PeriodDirectory};

/// Coordinates the calculation engine with its collaborators.
///
/// Every write follows the same order: validate inputs, load the employee,
/// load the period, consult the period guard, assemble, persist.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use payroll_engine::config::PayrollRules;
/// use payroll_engine::models::PeriodInputs;
/// use payroll_engine::service::{InMemoryPayrollStore, PayrollService, SeedData};
///
/// let seed = SeedData::load("./config/seed/demo.yaml").unwrap();
/// let (employees, periods) = seed.into_directories();
/// let service = PayrollService::new(
///     PayrollRules::default(),
///     Arc::new(employees),
///     Arc::new(periods),
///     Arc::new(InMemoryPayrollStore::new()),
/// );
///
/// let record = service
///     .calculate("emp_004", "2026-01", PeriodInputs::default(), "payroll_admin")
///     .unwrap();
/// assert_eq!(record.result.totals.net_pay.to_string(), "2386950.00");
/// ```
#[derive(Clone)]
pub struct PayrollService {
    rules: Arc<PayrollRules>,
    employees: Arc<dyn EmployeeDirectory>,
    periods: Arc<dyn PeriodDirectory>,
    store: Arc<dyn PayrollStore>,
}

impl PayrollService {
    /// Creates a service over a rule set and its collaborators.
    pub fn new(
        rules: PayrollRules,
        employees: Arc<dyn EmployeeDirectory>,
        periods: Arc<dyn PeriodDirectory>,
        store: Arc<dyn PayrollStore>,
    ) -> Self {
        Self {
            rules: Arc::new(rules),
            employees,
            periods,
            store,
        }
    }

    /// Returns the rules calculations use.
    pub fn rules(&self) -> &PayrollRules {
        &self.rules
    }

    /// Calculates and stores the first payroll for an (employee, period) key.
    pub fn calculate(
        &self,
        employee_id: &str,
        period_id: &str,
        inputs: PeriodInputs,
        performed_by: &str,
    ) -> EngineResult<PayrollRecord> {
        inputs.validate()?;
        let employee = self.load_employee(employee_id)?;
        let period = self.load_period(period_id)?;

        let key = PayrollKey::new(employee_id, period_id);
        let existing = self.store.find(&key);
        self.guard(&period, &key, existing.as_ref(), GuardOperation::Create)?;

        let result = assemble_payroll(&employee, &period, &inputs, &self.rules)?;
        let record = self
            .store
            .insert(PayrollRecord::new(result, inputs, performed_by))?;

        info!(
            employee_id,
            period_id,
            payroll_id = %record.payroll_id,
            net_pay = %record.result.totals.net_pay,
            "Payroll calculated"
        );
        Ok(record)
    }

    /// Recomputes an existing payroll with new inputs, replacing it in place.
    ///
    /// The record keeps its payroll identifier; the store audits the change
    /// with before and after totals.
    pub fn recalculate(
        &self,
        employee_id: &str,
        period_id: &str,
        inputs: PeriodInputs,
        performed_by: &str,
    ) -> EngineResult<PayrollRecord> {
        inputs.validate()?;
        let employee = self.load_employee(employee_id)?;
        let period = self.load_period(period_id)?;

        let key = PayrollKey::new(employee_id, period_id);
        let existing = self.store.find(&key);
        self.guard(&period, &key, existing.as_ref(), GuardOperation::Update)?;

        let result = assemble_payroll(&employee, &period, &inputs, &self.rules)?;
        let mut record = PayrollRecord::new(result, inputs, performed_by);
        if let Some(previous) = existing {
            record.payroll_id = previous.payroll_id;
        }
        let record = self.store.replace(record)?;

        info!(
            employee_id,
            period_id,
            payroll_id = %record.payroll_id,
            net_pay = %record.result.totals.net_pay,
            "Payroll recalculated"
        );
        Ok(record)
    }

    /// Removes a stored payroll while its period is still open.
    pub fn remove(
        &self,
        employee_id: &str,
        period_id: &str,
        performed_by: &str,
    ) -> EngineResult<PayrollRecord> {
        let period = self.load_period(period_id)?;

        let key = PayrollKey::new(employee_id, period_id);
        let existing = self.store.find(&key);
        self.guard(&period, &key, existing.as_ref(), GuardOperation::Delete)?;

        let removed = self.store.remove(&key, performed_by)?;
        info!(employee_id, period_id, performed_by, "Payroll removed");
        Ok(removed)
    }

    /// Returns the stored payroll for a key.
    pub fn find(&self, employee_id: &str, period_id: &str) -> EngineResult<PayrollRecord> {
        self.store
            .find(&PayrollKey::new(employee_id, period_id))
            .ok_or_else(|| EngineError::PayrollNotFound {
                employee_id: employee_id.to_string(),
                period_id: period_id.to_string(),
            })
    }

    /// Returns every stored payroll for a period.
    pub fn list_period(&self, period_id: &str) -> EngineResult<Vec<PayrollRecord>> {
        self.load_period(period_id)?;
        Ok(self.store.list_by_period(period_id))
    }

    /// Returns an employee's payroll history, oldest period first.
    ///
    /// Fails with `EmployeeNotFound` for an unknown employee; a known
    /// employee with nothing calculated yields an empty list.
    pub fn list_employee(&self, employee_id: &str) -> EngineResult<Vec<PayrollRecord>> {
        if self.employees.find_employee(employee_id).is_none() {
            return Err(EngineError::EmployeeNotFound {
                employee_id: employee_id.to_string(),
            });
        }
        Ok(self.store.list_by_employee(employee_id))
    }

    /// Aggregates the stored payrolls of a period.
    pub fn summarize(&self, period_id: &str) -> EngineResult<PeriodSummary> {
        let records = self.list_period(period_id)?;
        Ok(PeriodSummary::from_results(
            period_id,
            records.iter().map(|r| &r.result),
        ))
    }

    /// Returns the audit events recorded for a key, oldest first.
    pub fn audit_trail(&self, employee_id: &str, period_id: &str) -> Vec<PayrollAuditEvent> {
        self.store
            .audit_trail(&PayrollKey::new(employee_id, period_id))
    }

    /// Calculates payroll for every active employee in a period.
    ///
    /// Employees missing from `inputs` are calculated with zero inputs. A
    /// failure for one employee (already calculated, invalid inputs, negative
    /// net pay) is recorded in the outcome and never aborts the batch. A
    /// closed or unknown period fails the whole call.
    pub fn calculate_period(
        &self,
        period_id: &str,
        inputs: &HashMap<String, PeriodInputs>,
        performed_by: &str,
    ) -> EngineResult<BatchOutcome> {
        let period = self.load_period(period_id)?;
        if period.is_closed() {
            warn!(period_id, state = %period.state, "Batch calculation denied: period closed");
            return Err(EngineError::PeriodClosed {
                period_id: period_id.to_string(),
                state: period.state,
            });
        }

        let employees = self.employees.active_employees();
        for employee_id in inputs.keys() {
            if !employees.iter().any(|e| &e.id == employee_id) {
                warn!(
                    period_id,
                    employee_id = %employee_id,
                    "Batch inputs given for an employee who is not active; ignored"
                );
            }
        }

        let mut outcome = BatchOutcome {
            period_id: period_id.to_string(),
            total_employees: employees.len(),
            succeeded: Vec::new(),
            failed: Vec::new(),
        };

        for employee in &employees {
            let employee_inputs = inputs.get(&employee.id).cloned().unwrap_or_default();
            match self.calculate(&employee.id, period_id, employee_inputs, performed_by) {
                Ok(record) => outcome.succeeded.push(record.result),
                Err(error) => outcome.failed.push(BatchFailure {
                    employee_id: employee.id.clone(),
                    code: error.code().to_string(),
                    message: error.to_string(),
                }),
            }
        }

        info!(
            period_id,
            total = outcome.total_employees,
            succeeded = outcome.succeeded.len(),
            failed = outcome.failed.len(),
            "Batch calculation completed"
        );
        Ok(outcome)
    }

    fn load_employee(&self, employee_id: &str) -> EngineResult<EmployeeSnapshot> {
        let employee = self.employees.find_employee(employee_id).ok_or_else(|| {
            EngineError::EmployeeNotFound {
                employee_id: employee_id.to_string(),
            }
        })?;
        employee.validate()?;
        Ok(employee)
    }

    fn load_period(&self, period_id: &str) -> EngineResult<PayrollPeriod> {
        self.periods
            .find_period(period_id)
            .ok_or_else(|| EngineError::PeriodNotFound {
                period_id: period_id.to_string(),
            })
    }

    fn guard(
        &self,
        period: &PayrollPeriod,
        key: &PayrollKey,
        existing: Option<&PayrollRecord>,
        operation: GuardOperation,
    ) -> EngineResult<()> {
        let decision = authorize(period.state, existing.map(|r| &r.result), operation);
        if !decision.is_allowed() {
            warn!(key = %key, operation = %operation, decision = ?decision, "Payroll write denied");
        }
        decision.into_result(&key.employee_id, &key.period_id)
    }
}
