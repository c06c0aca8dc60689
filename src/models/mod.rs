//! Core data models for the HR engine.
//!
//! This module contains the stored record types and the derived result
//! types used throughout the engine.

mod benefit;
mod salary;
mod valuation;

pub use benefit::{BenefitItem, BenefitKind};
pub use salary::{SalaryComponents, SalaryKey, SalaryRecord};
pub use valuation::{
    AuditStep, BenefitValuation, PayrollBreakdown, PayrollReport, ValuationLine, ValuationReport,
};
