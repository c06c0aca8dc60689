//! Calculation logic for the HR engine.
//!
//! This module contains the pure calculation functions: whole-month date
//! math, depreciation schedules for uniforms and training debts, benefit
//! valuation with audit steps, and payroll derivation and aggregation.
//! Nothing here reads a clock or touches a record store.

mod benefit_valuation;
mod date_math;
mod depreciation;
mod payroll;

pub use benefit_valuation::{active_valuations, total_outstanding, value_benefit, value_benefits};
pub use date_math::months_elapsed;
pub use depreciation::{
    BenefitSchedules, DepreciationSchedule, Tier, current_value, is_expired, tier_percent,
};
pub use payroll::{aggregate, breakdown, full_gross, gross, net};
