//! Payroll derivation from stored salary components.
//!
//! Three earnings aggregates are kept deliberately distinct:
//!
//! - `gross` leaves out the living allowance, which is paid separately each
//!   month and must not be counted twice in this aggregate.
//! - `full_gross` adds the living allowance back for record-level display.
//! - `net` subtracts only the employee's own insurance. Employer social
//!   insurance, health insurance and income tax are reporting fields and
//!   never reduce net pay.

use rust_decimal::Decimal;

use crate::models::{PayrollBreakdown, PayrollReport, SalaryComponents, SalaryRecord};

/// Basic salary plus transport, incentives, station and mobile allowances.
///
/// # Examples
///
/// ```
/// use hr_engine::calculation::gross;
/// use hr_engine::models::SalaryComponents;
/// use rust_decimal::Decimal;
///
/// let components = SalaryComponents {
///     basic_salary: Decimal::new(10000, 0),
///     living_allowance: Decimal::new(200, 0),
///     ..Default::default()
/// };
/// assert_eq!(gross(&components), Decimal::new(10000, 0));
/// ```
pub fn gross(components: &SalaryComponents) -> Decimal {
    components.basic_salary
        + components.transport_allowance
        + components.incentives
        + components.station_allowance
        + components.mobile_allowance
}

/// [`gross`] plus the living allowance.
pub fn full_gross(components: &SalaryComponents) -> Decimal {
    gross(components) + components.living_allowance
}

/// [`full_gross`] less the employee's insurance contribution.
pub fn net(components: &SalaryComponents) -> Decimal {
    full_gross(components) - components.employee_insurance
}

/// Computes all derived totals for one record.
pub fn breakdown(components: &SalaryComponents) -> PayrollBreakdown {
    PayrollBreakdown {
        gross: gross(components),
        full_gross: full_gross(components),
        net: net(components),
        employee_insurance: components.employee_insurance,
        employer_social_insurance: components.employer_social_insurance,
        health_insurance: components.health_insurance,
        income_tax: components.income_tax,
    }
}

/// Sums the derived totals and the reporting fields across records.
///
/// An empty slice yields a report of zeros.
pub fn aggregate<'a>(records: impl IntoIterator<Item = &'a SalaryRecord>) -> PayrollReport {
    records
        .into_iter()
        .fold(PayrollReport::default(), |mut report, record| {
            let c = &record.components;
            report.headcount += 1;
            report.total_gross += gross(c);
            report.total_full_gross += full_gross(c);
            report.total_net += net(c);
            report.total_employee_insurance += c.employee_insurance;
            report.total_employer_social_insurance += c.employer_social_insurance;
            report.total_health_insurance += c.health_insurance;
            report.total_income_tax += c.income_tax;
            report
        })
}
