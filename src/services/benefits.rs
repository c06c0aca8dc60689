//! Benefit item service.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::calculation::{BenefitSchedules, total_outstanding, value_benefits};
use crate::clock::Clock;
use crate::error::{EngineError, EngineResult};
use crate::models::{BenefitItem, ValuationReport};
use crate::store::BenefitStore;

/// Issues, corrects and values benefit items.
///
/// "Today" always comes from the injected [`Clock`]. Expired items stay in
/// the store; they are only filtered out of the active views.
#[derive(Clone)]
pub struct BenefitService {
    store: Arc<dyn BenefitStore>,
    clock: Arc<dyn Clock>,
    schedules: BenefitSchedules,
}

impl BenefitService {
    /// Creates a service over `store`, reading dates from `clock`.
    pub fn new(
        store: Arc<dyn BenefitStore>,
        clock: Arc<dyn Clock>,
        schedules: BenefitSchedules,
    ) -> Self {
        Self {
            store,
            clock,
            schedules,
        }
    }

    /// The clock's current date.
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Validates and stores a newly issued item.
    pub fn issue(&self, item: BenefitItem) -> EngineResult<BenefitItem> {
        if let Err(err) = item.validate() {
            warn!(item_id = %item.id, error = %err, "Rejected benefit item");
            return Err(err);
        }
        self.store.insert(item.clone())?;
        info!(
            item_id = %item.id,
            owner_id = %item.owner_id,
            kind = %item.kind,
            original_value = %item.original_value,
            "Benefit issued"
        );
        Ok(item)
    }

    /// Replaces a stored item with a corrected version.
    pub fn correct(&self, item: BenefitItem) -> EngineResult<BenefitItem> {
        if let Err(err) = item.validate() {
            warn!(item_id = %item.id, error = %err, "Rejected benefit correction");
            return Err(err);
        }
        self.store.update(item.clone())?;
        info!(item_id = %item.id, "Benefit corrected");
        Ok(item)
    }

    /// Deletes a stored item.
    pub fn remove(&self, id: &str) -> EngineResult<()> {
        if !self.store.delete(id)? {
            return Err(EngineError::BenefitNotFound { id: id.to_string() });
        }
        info!(item_id = id, "Benefit removed");
        Ok(())
    }

    /// Values caller-supplied items at `as_of`, or at today if `None`.
    pub fn valuate(&self, items: &[BenefitItem], as_of: Option<NaiveDate>) -> ValuationReport {
        let as_of = as_of.unwrap_or_else(|| self.today());
        let report = value_benefits(items, as_of, &self.schedules);
        debug!(
            as_of = %as_of,
            items = items.len(),
            active_total = %report.active_total,
            "Valued benefit batch"
        );
        report
    }

    /// One employee's active items as of today.
    ///
    /// Expired lines are dropped from `lines`; `expired_count` still reports
    /// how many were hidden.
    pub fn active_for_owner(&self, owner_id: &str) -> EngineResult<ValuationReport> {
        let items = self.store.list_for_owner(owner_id)?;
        Ok(self.active_report(&items))
    }

    /// Every stored item that is still active today, across all employees.
    pub fn active_all(&self) -> EngineResult<ValuationReport> {
        let items = self.store.list_all()?;
        Ok(self.active_report(&items))
    }

    fn active_report(&self, items: &[BenefitItem]) -> ValuationReport {
        let mut report = value_benefits(items, self.today(), &self.schedules);
        report.lines.retain(|line| !line.valuation.is_expired);
        report
    }

    /// Total still owed on or held by one employee's active items today.
    pub fn outstanding_for_owner(&self, owner_id: &str) -> EngineResult<Decimal> {
        let report = self.active_for_owner(owner_id)?;
        Ok(total_outstanding(report.lines.iter().map(|l| &l.valuation)))
    }
}
