//! Application state for the HR engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::clock::{Clock, SystemClock};
use crate::config::ConfigLoader;
use crate::services::{BenefitService, PayrollService};
use crate::store::{BenefitStore, InMemoryBenefitStore, InMemorySalaryStore, SalaryStore};

/// Shared application state.
///
/// Holds the loaded configuration and the two services. Cloning is cheap;
/// every clone shares the same stores.
#[derive(Clone)]
pub struct AppState {
    /// The loaded engine configuration.
    config: Arc<ConfigLoader>,
    payroll: PayrollService,
    benefits: BenefitService,
}

impl AppState {
    /// Creates state backed by in-memory stores and the system clock.
    pub fn new(config: ConfigLoader) -> Self {
        Self::with_parts(
            config,
            Arc::new(InMemorySalaryStore::new()),
            Arc::new(InMemoryBenefitStore::new()),
            Arc::new(SystemClock),
        )
    }

    /// Creates state over explicit stores and clock.
    pub fn with_parts(
        config: ConfigLoader,
        salaries: Arc<dyn SalaryStore>,
        benefits: Arc<dyn BenefitStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let schedules = config.schedules().clone();
        Self {
            config: Arc::new(config),
            payroll: PayrollService::new(salaries),
            benefits: BenefitService::new(benefits, clock, schedules),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the salary record service.
    pub fn payroll(&self) -> &PayrollService {
        &self.payroll
    }

    /// Returns the benefit item service.
    pub fn benefits(&self) -> &BenefitService {
        &self.benefits
    }
}
