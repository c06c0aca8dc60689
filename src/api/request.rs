//! Request types for the HR engine API.
//!
//! This module defines the JSON request structures for the benefit and
//! salary endpoints. Salary bodies deserialize straight into
//! [`crate::models::SalaryComponents`].

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{BenefitItem, BenefitKind};

/// Request body for `POST /benefits/valuate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValuationRequest {
    /// Reference date. Defaults to the server clock's today.
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
    /// The items to value.
    pub items: Vec<BenefitItemRequest>,
}

/// A benefit item in a valuation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenefitItemRequest {
    /// Item ID. Generated when omitted.
    #[serde(default)]
    pub id: Option<String>,
    /// The employee the item belongs to.
    pub owner_id: String,
    /// Whether this is a uniform or a training debt.
    pub kind: BenefitKind,
    /// Item name or course title.
    #[serde(default)]
    pub description: String,
    /// Number of physical units issued.
    #[serde(default)]
    pub quantity: Option<u32>,
    /// The date the benefit or liability was incurred.
    pub issued_on: NaiveDate,
    /// The monetary value fixed at issuance.
    pub original_value: Decimal,
}

/// Request body for `POST /employees/:owner_id/benefits`.
///
/// The owner comes from the path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueBenefitRequest {
    /// Item ID. Generated when omitted.
    #[serde(default)]
    pub id: Option<String>,
    /// Whether this is a uniform or a training debt.
    pub kind: BenefitKind,
    /// Item name or course title.
    #[serde(default)]
    pub description: String,
    /// Number of physical units issued.
    #[serde(default)]
    pub quantity: Option<u32>,
    /// The date the benefit or liability was incurred.
    pub issued_on: NaiveDate,
    /// The monetary value fixed at issuance.
    pub original_value: Decimal,
}

/// Query string for `GET /salaries`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SalaryReportQuery {
    /// Restrict the report to one payroll year.
    #[serde(default)]
    pub year: Option<i32>,
}

fn generate_id(kind: BenefitKind) -> String {
    format!("{}_{}", kind, Uuid::new_v4())
}

impl From<BenefitItemRequest> for BenefitItem {
    fn from(req: BenefitItemRequest) -> Self {
        BenefitItem {
            id: req.id.unwrap_or_else(|| generate_id(req.kind)),
            owner_id: req.owner_id,
            kind: req.kind,
            description: req.description,
            quantity: req.quantity,
            issued_on: req.issued_on,
            original_value: req.original_value,
        }
    }
}

impl IssueBenefitRequest {
    /// Builds the stored item for `owner_id`.
    pub fn into_item(self, owner_id: String) -> BenefitItem {
        BenefitItem {
            id: self.id.unwrap_or_else(|| generate_id(self.kind)),
            owner_id,
            kind: self.kind,
            description: self.description,
            quantity: self.quantity,
            issued_on: self.issued_on,
            original_value: self.original_value,
        }
    }
}
