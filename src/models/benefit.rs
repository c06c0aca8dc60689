//! Benefit item model and related types.
//!
//! A benefit item is either a uniform issued to an employee or a training
//! cost the employee owes back if they leave within the retention horizon.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The kind of benefit, which selects the depreciation schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BenefitKind {
    /// A uniform item that loses value over twelve months.
    Uniform,
    /// A training cost liability that is owed in full until it expires.
    TrainingDebt,
}

impl std::fmt::Display for BenefitKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BenefitKind::Uniform => write!(f, "uniform"),
            BenefitKind::TrainingDebt => write!(f, "training_debt"),
        }
    }
}

/// A uniform or training-debt instance attributed to an employee.
///
/// Only the issuance facts are stored. Tier, current value and expiry are
/// recomputed against a reference date on every query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenefitItem {
    /// Unique identifier for the item.
    pub id: String,
    /// The employee the item belongs to.
    pub owner_id: String,
    /// Whether this is a uniform or a training debt.
    pub kind: BenefitKind,
    /// Item name or course title.
    #[serde(default)]
    pub description: String,
    /// Number of physical units issued. Descriptive only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    /// The date the benefit or liability was incurred.
    pub issued_on: NaiveDate,
    /// The monetary value fixed at issuance.
    pub original_value: Decimal,
}

impl BenefitItem {
    /// Checks the item before it enters the engine.
    ///
    /// # Examples
    ///
    /// ```
    /// use hr_engine::models::{BenefitItem, BenefitKind};
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let item = BenefitItem {
    ///     id: "uni_001".to_string(),
    ///     owner_id: "emp_001".to_string(),
    ///     kind: BenefitKind::Uniform,
    ///     description: "Winter jacket".to_string(),
    ///     quantity: Some(1),
    ///     issued_on: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
    ///     original_value: Decimal::new(-100, 0),
    /// };
    /// assert!(item.validate().is_err());
    /// ```
    pub fn validate(&self) -> EngineResult<()> {
        if self.id.trim().is_empty() {
            return Err(EngineError::InvalidBenefit {
                item_id: self.id.clone(),
                message: "id cannot be empty".to_string(),
            });
        }
        if self.owner_id.trim().is_empty() {
            return Err(EngineError::InvalidBenefit {
                item_id: self.id.clone(),
                message: "owner_id cannot be empty".to_string(),
            });
        }
        if self.original_value.is_sign_negative() && !self.original_value.is_zero() {
            return Err(EngineError::InvalidBenefit {
                item_id: self.id.clone(),
                message: format!(
                    "original_value cannot be negative (got {})",
                    self.original_value
                ),
            });
        }
        Ok(())
    }
}
