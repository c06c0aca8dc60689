//! Benefit valuation with audit steps.
//!
//! This module applies the depreciation schedules to stored benefit items
//! and produces the active-benefit views: per-item valuations, the active
//! filter, and the outstanding total.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::{
    AuditStep, BenefitItem, BenefitValuation, ValuationLine, ValuationReport,
};

use super::date_math::months_elapsed;
use super::depreciation::{BenefitSchedules, DepreciationSchedule, retained_value};

/// Values a single benefit item at `as_of`.
///
/// # Arguments
///
/// * `item` - The stored benefit item
/// * `as_of` - The reference date
/// * `schedule` - The schedule for the item's kind
/// * `step_number` - The step number for audit trail sequencing
///
/// # Examples
///
/// ```
/// use hr_engine::calculation::{DepreciationSchedule, value_benefit};
/// use hr_engine::models::{BenefitItem, BenefitKind};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let item = BenefitItem {
///     id: "uni_001".to_string(),
///     owner_id: "emp_001".to_string(),
///     kind: BenefitKind::Uniform,
///     description: "Safety boots".to_string(),
///     quantity: Some(1),
///     issued_on: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
///     original_value: Decimal::new(1000, 0),
/// };
///
/// let line = value_benefit(
///     &item,
///     NaiveDate::from_ymd_opt(2024, 4, 15).unwrap(),
///     &DepreciationSchedule::uniform(),
///     1,
/// );
/// assert_eq!(line.valuation.tier_percent, 75);
/// assert_eq!(line.valuation.current_value, Decimal::new(750, 0));
/// ```
pub fn value_benefit(
    item: &BenefitItem,
    as_of: NaiveDate,
    schedule: &DepreciationSchedule,
    step_number: u32,
) -> ValuationLine {
    let months = months_elapsed(item.issued_on, as_of);
    let tier_percent = schedule.percent_for_months(months);
    let current_value = retained_value(item.original_value, tier_percent);
    let is_expired = tier_percent == 0;

    let reasoning = if is_expired {
        format!(
            "{} months since {} reaches the {}-month {} horizon, expired with {} retained",
            months,
            item.issued_on,
            schedule.horizon_months(),
            schedule.name,
            current_value.normalize()
        )
    } else {
        format!(
            "{} months since {} -> {}% of {} = {}",
            months,
            item.issued_on,
            tier_percent,
            item.original_value.normalize(),
            current_value.normalize()
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: format!("{}_depreciation", item.kind),
        rule_name: format!("{} Depreciation", schedule_title(schedule)),
        input: serde_json::json!({
            "item_id": item.id,
            "issued_on": item.issued_on.to_string(),
            "as_of": as_of.to_string(),
            "original_value": item.original_value.normalize().to_string(),
            "schedule": schedule.name
        }),
        output: serde_json::json!({
            "months_elapsed": months,
            "tier_percent": tier_percent,
            "current_value": current_value.normalize().to_string(),
            "is_expired": is_expired
        }),
        reasoning,
    };

    ValuationLine {
        valuation: BenefitValuation {
            item_id: item.id.clone(),
            owner_id: item.owner_id.clone(),
            kind: item.kind,
            issued_on: item.issued_on,
            as_of,
            months_elapsed: months,
            original_value: item.original_value,
            tier_percent,
            current_value,
            is_expired,
        },
        audit_step,
    }
}

fn schedule_title(schedule: &DepreciationSchedule) -> String {
    schedule
        .name
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Values every item at `as_of`, picking the schedule by kind.
///
/// Lines keep input order and include expired items. The active total is
/// the plain sum of each active line's `current_value`.
pub fn value_benefits(
    items: &[BenefitItem],
    as_of: NaiveDate,
    schedules: &BenefitSchedules,
) -> ValuationReport {
    let lines: Vec<ValuationLine> = items
        .iter()
        .enumerate()
        .map(|(i, item)| value_benefit(item, as_of, schedules.for_kind(item.kind), i as u32 + 1))
        .collect();

    let valuations: Vec<&BenefitValuation> = lines.iter().map(|l| &l.valuation).collect();
    let active_total = total_outstanding(valuations.iter().copied());
    let active_count = active_valuations(valuations.iter().copied()).count();

    ValuationReport {
        as_of,
        expired_count: lines.len() - active_count,
        active_count,
        active_total,
        lines,
    }
}

/// Filters out expired valuations.
pub fn active_valuations<'a>(
    valuations: impl IntoIterator<Item = &'a BenefitValuation>,
) -> impl Iterator<Item = &'a BenefitValuation> {
    valuations.into_iter().filter(|v| !v.is_expired)
}

/// Sums `current_value` over the active valuations.
///
/// # Examples
///
/// ```
/// use hr_engine::calculation::{BenefitSchedules, total_outstanding, value_benefits};
/// use hr_engine::models::{BenefitItem, BenefitKind};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let debt = |id: &str, issued: NaiveDate| BenefitItem {
///     id: id.to_string(),
///     owner_id: "emp_001".to_string(),
///     kind: BenefitKind::TrainingDebt,
///     description: String::new(),
///     quantity: None,
///     issued_on: issued,
///     original_value: Decimal::new(5000, 0),
/// };
///
/// let items = vec![
///     debt("trn_old", NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()),
///     debt("trn_new", NaiveDate::from_ymd_opt(2023, 1, 1).unwrap()),
/// ];
/// let as_of = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
/// let report = value_benefits(&items, as_of, &BenefitSchedules::default());
///
/// let total = total_outstanding(report.lines.iter().map(|l| &l.valuation));
/// assert_eq!(total, Decimal::new(5000, 0));
/// ```
pub fn total_outstanding<'a>(
    valuations: impl IntoIterator<Item = &'a BenefitValuation>,
) -> Decimal {
    active_valuations(valuations).map(|v| v.current_value).sum()
}
