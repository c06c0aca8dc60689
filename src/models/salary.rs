//! Salary component records keyed by employee and year.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The stored salary fields for one employee-year.
///
/// Missing fields deserialize as zero. Derived totals are never part of
/// this record; see [`crate::calculation::gross`] and friends.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SalaryComponents {
    /// Basic salary.
    pub basic_salary: Decimal,
    /// Transport allowance.
    pub transport_allowance: Decimal,
    /// Incentives.
    pub incentives: Decimal,
    /// Living allowance, paid separately each month.
    pub living_allowance: Decimal,
    /// Station allowance.
    pub station_allowance: Decimal,
    /// Mobile allowance.
    pub mobile_allowance: Decimal,
    /// The employee's own insurance contribution.
    pub employee_insurance: Decimal,
    /// The employer's social insurance contribution. Reporting only.
    pub employer_social_insurance: Decimal,
    /// Health insurance. Reporting only.
    pub health_insurance: Decimal,
    /// Income tax. Reporting only.
    pub income_tax: Decimal,
}

impl SalaryComponents {
    /// Returns every field paired with its name, in declaration order.
    pub fn fields(&self) -> [(&'static str, Decimal); 10] {
        [
            ("basic_salary", self.basic_salary),
            ("transport_allowance", self.transport_allowance),
            ("incentives", self.incentives),
            ("living_allowance", self.living_allowance),
            ("station_allowance", self.station_allowance),
            ("mobile_allowance", self.mobile_allowance),
            ("employee_insurance", self.employee_insurance),
            ("employer_social_insurance", self.employer_social_insurance),
            ("health_insurance", self.health_insurance),
            ("income_tax", self.income_tax),
        ]
    }

    /// Rejects negative amounts. Reports the first offending field.
    ///
    /// # Examples
    ///
    /// ```
    /// use hr_engine::models::SalaryComponents;
    /// use rust_decimal::Decimal;
    ///
    /// let mut components = SalaryComponents::default();
    /// assert!(components.validate().is_ok());
    ///
    /// components.income_tax = Decimal::new(-1, 0);
    /// assert!(components.validate().is_err());
    /// ```
    pub fn validate(&self) -> EngineResult<()> {
        for (field, amount) in self.fields() {
            if amount < Decimal::ZERO {
                return Err(EngineError::InvalidSalary {
                    field: field.to_string(),
                    message: format!("cannot be negative (got {})", amount),
                });
            }
        }
        Ok(())
    }
}

/// The unique key of a salary record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SalaryKey {
    /// The employee identifier.
    pub employee_id: String,
    /// The payroll year.
    pub year: i32,
}

impl SalaryKey {
    /// Creates a key for the given employee and year.
    pub fn new(employee_id: impl Into<String>, year: i32) -> Self {
        Self {
            employee_id: employee_id.into(),
            year,
        }
    }
}

/// A stored salary record: key plus components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryRecord {
    /// The employee identifier.
    pub employee_id: String,
    /// The payroll year.
    pub year: i32,
    /// The stored salary fields.
    #[serde(flatten)]
    pub components: SalaryComponents,
}

impl SalaryRecord {
    /// Returns this record's key.
    pub fn key(&self) -> SalaryKey {
        SalaryKey::new(self.employee_id.clone(), self.year)
    }
}
