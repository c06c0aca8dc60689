//! Salary record service.

use std::sync::Arc;

use tracing::{info, warn};

use crate::calculation::{aggregate, breakdown};
use crate::error::{EngineError, EngineResult};
use crate::models::{PayrollBreakdown, PayrollReport, SalaryComponents, SalaryKey, SalaryRecord};
use crate::store::SalaryStore;

/// Saves, loads and reports on salary records.
///
/// Every record is validated before it reaches the store. Derived totals
/// are computed on read and never written back.
#[derive(Clone)]
pub struct PayrollService {
    store: Arc<dyn SalaryStore>,
}

impl PayrollService {
    /// Creates a service over `store`.
    pub fn new(store: Arc<dyn SalaryStore>) -> Self {
        Self { store }
    }

    /// Validates and upserts the record for `(employee_id, year)`.
    ///
    /// An existing record for the key is replaced in full. Store failures
    /// are returned unchanged.
    ///
    /// # Example
    ///
    /// ```
    /// use std::sync::Arc;
    /// use hr_engine::models::SalaryComponents;
    /// use hr_engine::services::PayrollService;
    /// use hr_engine::store::InMemorySalaryStore;
    /// use rust_decimal::Decimal;
    ///
    /// let service = PayrollService::new(Arc::new(InMemorySalaryStore::new()));
    /// let components = SalaryComponents {
    ///     basic_salary: Decimal::new(10000, 0),
    ///     ..Default::default()
    /// };
    /// service.save("E1", 2025, components)?;
    /// assert_eq!(service.report(Some(2025))?.headcount, 1);
    /// # Ok::<(), hr_engine::error::EngineError>(())
    /// ```
    pub fn save(
        &self,
        employee_id: &str,
        year: i32,
        components: SalaryComponents,
    ) -> EngineResult<SalaryRecord> {
        if employee_id.trim().is_empty() {
            return Err(EngineError::InvalidSalary {
                field: "employee_id".to_string(),
                message: "cannot be empty".to_string(),
            });
        }
        if let Err(err) = components.validate() {
            warn!(employee_id, year, error = %err, "Rejected salary record");
            return Err(err);
        }

        let record = SalaryRecord {
            employee_id: employee_id.to_string(),
            year,
            components,
        };
        self.store.upsert(record.clone())?;

        info!(employee_id, year, "Salary record saved");
        Ok(record)
    }

    /// Loads the record for `key`.
    pub fn get(&self, key: &SalaryKey) -> EngineResult<SalaryRecord> {
        self.store
            .get(key)?
            .ok_or_else(|| EngineError::SalaryRecordNotFound {
                employee_id: key.employee_id.clone(),
                year: key.year,
            })
    }

    /// Loads the record for `key` with its derived totals.
    pub fn breakdown(&self, key: &SalaryKey) -> EngineResult<(SalaryRecord, PayrollBreakdown)> {
        let record = self.get(key)?;
        let totals = breakdown(&record.components);
        Ok((record, totals))
    }

    /// Deletes the record for `key`.
    pub fn delete(&self, key: &SalaryKey) -> EngineResult<()> {
        if !self.store.delete(key)? {
            return Err(EngineError::SalaryRecordNotFound {
                employee_id: key.employee_id.clone(),
                year: key.year,
            });
        }
        info!(employee_id = %key.employee_id, year = key.year, "Salary record deleted");
        Ok(())
    }

    /// Aggregates stored records, optionally for one year only.
    pub fn report(&self, year: Option<i32>) -> EngineResult<PayrollReport> {
        let records = self.store.list(year)?;
        Ok(aggregate(&records))
    }
}
