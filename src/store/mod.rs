//! Record store seams.
//!
//! The engine treats persistence as an external collaborator offering
//! read/insert/update/delete by key. These traits are that collaborator's
//! shape; [`InMemorySalaryStore`] and [`InMemoryBenefitStore`] back tests
//! and the standalone server.

mod memory;

pub use memory::{InMemoryBenefitStore, InMemorySalaryStore};

use crate::error::EngineResult;
use crate::models::{BenefitItem, SalaryKey, SalaryRecord};

/// Salary records keyed by `(employee_id, year)`.
pub trait SalaryStore: Send + Sync {
    /// Inserts the record, or replaces every field of the existing record
    /// with the same key. Last write wins.
    fn upsert(&self, record: SalaryRecord) -> EngineResult<()>;

    /// Returns the record for `key`, if any.
    fn get(&self, key: &SalaryKey) -> EngineResult<Option<SalaryRecord>>;

    /// Deletes the record for `key`. Returns whether a record existed.
    fn delete(&self, key: &SalaryKey) -> EngineResult<bool>;

    /// Lists records, optionally restricted to one year, ordered by key.
    fn list(&self, year: Option<i32>) -> EngineResult<Vec<SalaryRecord>>;
}

/// Benefit items keyed by item ID.
pub trait BenefitStore: Send + Sync {
    /// Stores a new item.
    fn insert(&self, item: BenefitItem) -> EngineResult<()>;

    /// Replaces an existing item. Fails with `BenefitNotFound` if absent.
    fn update(&self, item: BenefitItem) -> EngineResult<()>;

    /// Returns the item with `id`, if any.
    fn get(&self, id: &str) -> EngineResult<Option<BenefitItem>>;

    /// Deletes the item with `id`. Returns whether it existed.
    fn delete(&self, id: &str) -> EngineResult<bool>;

    /// Lists one employee's items ordered by issue date.
    fn list_for_owner(&self, owner_id: &str) -> EngineResult<Vec<BenefitItem>>;

    /// Lists all items ordered by issue date.
    fn list_all(&self) -> EngineResult<Vec<BenefitItem>>;
}
