//! Repository/service objects over the record stores.
//!
//! Services own the boundary: they validate typed records, talk to a
//! [`crate::store`] implementation, and hand stored data to the pure
//! [`crate::calculation`] functions. The calculation functions never see a
//! store or a clock.

mod benefits;
mod payroll;

pub use benefits::BenefitService;
pub use payroll::PayrollService;
