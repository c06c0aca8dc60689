//! In-memory record stores.

use std::collections::{BTreeMap, HashMap};
use std::sync::{PoisonError, RwLock};

use crate::error::{EngineError, EngineResult};
use crate::models::{BenefitItem, SalaryKey, SalaryRecord};

use super::{BenefitStore, SalaryStore};

fn poisoned<T>(_: PoisonError<T>) -> EngineError {
    EngineError::StoreError {
        message: "record store lock poisoned".to_string(),
    }
}

/// Salary records held in a key-ordered map.
#[derive(Debug, Default)]
pub struct InMemorySalaryStore {
    records: RwLock<BTreeMap<SalaryKey, SalaryRecord>>,
}

impl InMemorySalaryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SalaryStore for InMemorySalaryStore {
    fn upsert(&self, record: SalaryRecord) -> EngineResult<()> {
        let mut records = self.records.write().map_err(poisoned)?;
        records.insert(record.key(), record);
        Ok(())
    }

    fn get(&self, key: &SalaryKey) -> EngineResult<Option<SalaryRecord>> {
        let records = self.records.read().map_err(poisoned)?;
        Ok(records.get(key).cloned())
    }

    fn delete(&self, key: &SalaryKey) -> EngineResult<bool> {
        let mut records = self.records.write().map_err(poisoned)?;
        Ok(records.remove(key).is_some())
    }

    fn list(&self, year: Option<i32>) -> EngineResult<Vec<SalaryRecord>> {
        let records = self.records.read().map_err(poisoned)?;
        Ok(records
            .values()
            .filter(|r| year.is_none_or(|y| r.year == y))
            .cloned()
            .collect())
    }
}

/// Benefit items held by ID.
#[derive(Debug, Default)]
pub struct InMemoryBenefitStore {
    items: RwLock<HashMap<String, BenefitItem>>,
}

impl InMemoryBenefitStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn sorted(mut items: Vec<BenefitItem>) -> Vec<BenefitItem> {
        items.sort_by(|a, b| a.issued_on.cmp(&b.issued_on).then_with(|| a.id.cmp(&b.id)));
        items
    }
}

impl BenefitStore for InMemoryBenefitStore {
    fn insert(&self, item: BenefitItem) -> EngineResult<()> {
        let mut items = self.items.write().map_err(poisoned)?;
        if items.contains_key(&item.id) {
            return Err(EngineError::StoreError {
                message: format!("benefit '{}' already exists", item.id),
            });
        }
        items.insert(item.id.clone(), item);
        Ok(())
    }

    fn update(&self, item: BenefitItem) -> EngineResult<()> {
        let mut items = self.items.write().map_err(poisoned)?;
        match items.get_mut(&item.id) {
            Some(existing) => {
                *existing = item;
                Ok(())
            }
            None => Err(EngineError::BenefitNotFound { id: item.id }),
        }
    }

    fn get(&self, id: &str) -> EngineResult<Option<BenefitItem>> {
        let items = self.items.read().map_err(poisoned)?;
        Ok(items.get(id).cloned())
    }

    fn delete(&self, id: &str) -> EngineResult<bool> {
        let mut items = self.items.write().map_err(poisoned)?;
        Ok(items.remove(id).is_some())
    }

    fn list_for_owner(&self, owner_id: &str) -> EngineResult<Vec<BenefitItem>> {
        let items = self.items.read().map_err(poisoned)?;
        Ok(Self::sorted(
            items
                .values()
                .filter(|i| i.owner_id == owner_id)
                .cloned()
                .collect(),
        ))
    }

    fn list_all(&self) -> EngineResult<Vec<BenefitItem>> {
        let items = self.items.read().map_err(poisoned)?;
        Ok(Self::sorted(items.values().cloned().collect()))
    }
}
