//! Result models produced by the calculation functions.
//!
//! This module contains the derived views the engine hands back to callers:
//! benefit valuations with their audit steps, and payroll breakdowns and
//! reports. None of these are ever persisted.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::BenefitKind;

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// The derived state of one benefit item at a reference date.
///
/// # Example
///
/// ```
/// use hr_engine::models::{BenefitKind, BenefitValuation};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let valuation = BenefitValuation {
///     item_id: "uni_001".to_string(),
///     owner_id: "emp_001".to_string(),
///     kind: BenefitKind::Uniform,
///     issued_on: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
///     as_of: NaiveDate::from_ymd_opt(2024, 4, 15).unwrap(),
///     months_elapsed: 3,
///     original_value: Decimal::new(1000, 0),
///     tier_percent: 75,
///     current_value: Decimal::new(750, 0),
///     is_expired: false,
/// };
/// assert!(valuation.current_value <= valuation.original_value);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenefitValuation {
    /// The valued item's ID.
    pub item_id: String,
    /// The employee the item belongs to.
    pub owner_id: String,
    /// The kind of benefit.
    pub kind: BenefitKind,
    /// The date the item was issued.
    pub issued_on: NaiveDate,
    /// The reference date the valuation was computed for.
    pub as_of: NaiveDate,
    /// Whole calendar months between `issued_on` and `as_of`. Negative when
    /// the item is issued in the future.
    pub months_elapsed: i32,
    /// The value fixed at issuance.
    pub original_value: Decimal,
    /// Percentage of the original value retained.
    pub tier_percent: u32,
    /// `original_value * tier_percent / 100`.
    pub current_value: Decimal,
    /// True once the tier reaches zero.
    pub is_expired: bool,
}

/// A valuation together with the audit step that explains it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValuationLine {
    /// The derived valuation.
    #[serde(flatten)]
    pub valuation: BenefitValuation,
    /// The audit step recording how it was derived.
    pub audit_step: AuditStep,
}

/// The result of valuing a batch of benefit items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValuationReport {
    /// The reference date used for every line.
    pub as_of: NaiveDate,
    /// One line per input item, in input order, expired items included.
    pub lines: Vec<ValuationLine>,
    /// Sum of `current_value` over items that have not expired.
    pub active_total: Decimal,
    /// Number of items that are still active.
    pub active_count: usize,
    /// Number of items that have expired.
    pub expired_count: usize,
}

/// Derived earnings totals for one salary record.
///
/// The reporting-only fields are echoed so a caller can render a full pay
/// record without touching the raw components again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollBreakdown {
    /// Earnings excluding the living allowance.
    pub gross: Decimal,
    /// Earnings including the living allowance.
    pub full_gross: Decimal,
    /// Full gross less the employee's own insurance.
    pub net: Decimal,
    /// The employee's insurance contribution.
    pub employee_insurance: Decimal,
    /// The employer's social insurance contribution.
    pub employer_social_insurance: Decimal,
    /// Health insurance.
    pub health_insurance: Decimal,
    /// Income tax.
    pub income_tax: Decimal,
}

/// Totals across a set of salary records, for reporting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollReport {
    /// Number of records aggregated.
    pub headcount: usize,
    /// Sum of `gross`.
    pub total_gross: Decimal,
    /// Sum of `full_gross`.
    pub total_full_gross: Decimal,
    /// Sum of `net`.
    pub total_net: Decimal,
    /// Sum of employee insurance.
    pub total_employee_insurance: Decimal,
    /// Sum of employer social insurance.
    pub total_employer_social_insurance: Decimal,
    /// Sum of health insurance.
    pub total_health_insurance: Decimal,
    /// Sum of income tax.
    pub total_income_tax: Decimal,
}
