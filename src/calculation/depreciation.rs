//! Depreciation schedules and tier lookup.
//!
//! A schedule is a step function from elapsed whole months to the share of
//! the original value still retained. Uniforms lose a quarter of their value
//! every three months and are gone after a year. Training debts are owed in
//! full for three years and then lapse.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::BenefitKind;

use super::date_math::months_elapsed;

/// One step of a schedule: from `min_months` onward, `percent` is retained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tier {
    /// Elapsed whole months at which this tier starts.
    pub min_months: u32,
    /// Percentage of the original value retained in this tier.
    pub percent: u32,
}

fn default_fallback_percent() -> u32 {
    100
}

/// An ordered depreciation schedule.
///
/// Tiers are held in strictly descending `min_months` order. The first tier
/// is the horizon at which the value reaches zero. Elapsed times below every
/// threshold, including negative ones, use `fallback_percent`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepreciationSchedule {
    /// Name used in audit steps and error messages.
    pub name: String,
    /// The tiers, largest threshold first.
    pub tiers: Vec<Tier>,
    /// Percentage retained before the first threshold is reached.
    #[serde(default = "default_fallback_percent")]
    pub fallback_percent: u32,
}

impl DepreciationSchedule {
    /// Creates a validated schedule.
    pub fn new(name: impl Into<String>, tiers: Vec<Tier>) -> EngineResult<Self> {
        let schedule = Self {
            name: name.into(),
            tiers,
            fallback_percent: default_fallback_percent(),
        };
        schedule.validate()?;
        Ok(schedule)
    }

    /// The uniform schedule: 0% from 12 months, 25% from 9, 50% from 6,
    /// 75% from 3, otherwise 100%.
    pub fn uniform() -> Self {
        Self {
            name: "uniform".to_string(),
            tiers: vec![
                Tier { min_months: 12, percent: 0 },
                Tier { min_months: 9, percent: 25 },
                Tier { min_months: 6, percent: 50 },
                Tier { min_months: 3, percent: 75 },
            ],
            fallback_percent: 100,
        }
    }

    /// The training-debt schedule: owed in full until 36 months, then 0%.
    pub fn training_debt() -> Self {
        Self {
            name: "training_debt".to_string(),
            tiers: vec![Tier { min_months: 36, percent: 0 }],
            fallback_percent: 100,
        }
    }

    /// Checks the schedule's structural invariants.
    ///
    /// A valid schedule has at least one tier, strictly descending
    /// thresholds, percentages within 0..=100 that never increase as the
    /// threshold grows, a 0% first tier and a 100% fallback.
    pub fn validate(&self) -> EngineResult<()> {
        let invalid = |message: String| EngineError::InvalidSchedule {
            name: self.name.clone(),
            message,
        };

        let first = self
            .tiers
            .first()
            .ok_or_else(|| invalid("schedule must have at least one tier".to_string()))?;

        if first.percent != 0 {
            return Err(invalid(format!(
                "the tier at the {}-month horizon must retain 0%, got {}%",
                first.min_months, first.percent
            )));
        }

        if self.fallback_percent != 100 {
            return Err(invalid(format!(
                "fallback_percent must be 100, got {}",
                self.fallback_percent
            )));
        }

        for pair in self.tiers.windows(2) {
            let (later, earlier) = (pair[0], pair[1]);
            if later.min_months <= earlier.min_months {
                return Err(invalid(format!(
                    "thresholds must be strictly descending ({} then {})",
                    later.min_months, earlier.min_months
                )));
            }
            if later.percent > earlier.percent {
                return Err(invalid(format!(
                    "value cannot increase over time ({}% at {} months after {}% at {} months)",
                    later.percent, later.min_months, earlier.percent, earlier.min_months
                )));
            }
        }

        if let Some(tier) = self.tiers.iter().find(|t| t.percent > 100) {
            return Err(invalid(format!(
                "percent must be within 0..=100, got {}% at {} months",
                tier.percent, tier.min_months
            )));
        }

        Ok(())
    }

    /// The number of months after which the value is zero.
    pub fn horizon_months(&self) -> u32 {
        self.tiers.first().map_or(0, |t| t.min_months)
    }

    /// Returns the retained percentage for a given elapsed month count.
    ///
    /// The first tier whose threshold is reached wins, so an elapsed count
    /// exactly at a threshold falls into that threshold's tier.
    pub fn percent_for_months(&self, months: i32) -> u32 {
        self.tiers
            .iter()
            .find(|tier| i64::from(months) >= i64::from(tier.min_months))
            .map_or(self.fallback_percent, |tier| tier.percent)
    }
}

/// The pair of schedules the engine applies, one per [`BenefitKind`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenefitSchedules {
    /// Schedule for uniform items.
    pub uniform: DepreciationSchedule,
    /// Schedule for training debts.
    pub training_debt: DepreciationSchedule,
}

impl BenefitSchedules {
    /// Returns the schedule that applies to `kind`.
    pub fn for_kind(&self, kind: BenefitKind) -> &DepreciationSchedule {
        match kind {
            BenefitKind::Uniform => &self.uniform,
            BenefitKind::TrainingDebt => &self.training_debt,
        }
    }

    /// Validates both schedules.
    pub fn validate(&self) -> EngineResult<()> {
        self.uniform.validate()?;
        self.training_debt.validate()
    }
}

impl Default for BenefitSchedules {
    fn default() -> Self {
        Self {
            uniform: DepreciationSchedule::uniform(),
            training_debt: DepreciationSchedule::training_debt(),
        }
    }
}

/// Returns the percentage of the original value retained at `now`.
///
/// # Examples
///
/// ```
/// use hr_engine::calculation::{DepreciationSchedule, tier_percent};
/// use chrono::NaiveDate;
///
/// let issued = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
/// let now = NaiveDate::from_ymd_opt(2024, 4, 15).unwrap();
///
/// assert_eq!(tier_percent(issued, now, &DepreciationSchedule::uniform()), 75);
/// ```
pub fn tier_percent(issued_on: NaiveDate, now: NaiveDate, schedule: &DepreciationSchedule) -> u32 {
    schedule.percent_for_months(months_elapsed(issued_on, now))
}

/// Returns `original_value * tier_percent / 100` with no currency rounding.
///
/// # Examples
///
/// ```
/// use hr_engine::calculation::{DepreciationSchedule, current_value};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let issued = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
/// let now = NaiveDate::from_ymd_opt(2024, 7, 20).unwrap();
///
/// let value = current_value(
///     Decimal::from_str("333.33").unwrap(),
///     issued,
///     now,
///     &DepreciationSchedule::uniform(),
/// );
/// assert_eq!(value, Decimal::from_str("166.665").unwrap());
/// ```
pub fn current_value(
    original_value: Decimal,
    issued_on: NaiveDate,
    now: NaiveDate,
    schedule: &DepreciationSchedule,
) -> Decimal {
    retained_value(original_value, tier_percent(issued_on, now, schedule))
}

/// Applies a retained percentage to an original value.
///
/// The factor is taken first so the product never exceeds `original_value`.
pub(crate) fn retained_value(original_value: Decimal, percent: u32) -> Decimal {
    original_value * (Decimal::from(percent) / Decimal::ONE_HUNDRED)
}

/// Returns true once the schedule has reduced the value to 0%.
pub fn is_expired(issued_on: NaiveDate, now: NaiveDate, schedule: &DepreciationSchedule) -> bool {
    tier_percent(issued_on, now, schedule) == 0
}
