//! Configuration types for the HR engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use serde::Deserialize;

use crate::calculation::BenefitSchedules;

/// Metadata about the engine deployment.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EngineMetadata {
    /// Human-readable name of the deployment.
    pub name: String,
    /// The version or effective date of the configuration.
    pub version: String,
    /// ISO currency code monetary amounts are expressed in.
    pub currency: String,
}

impl Default for EngineMetadata {
    fn default() -> Self {
        Self {
            name: "HR Engine".to_string(),
            version: "builtin".to_string(),
            currency: "EGP".to_string(),
        }
    }
}

/// The complete engine configuration loaded from YAML files.
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    /// Engine metadata.
    metadata: EngineMetadata,
    /// Depreciation schedules per benefit kind.
    schedules: BenefitSchedules,
}

impl EngineConfig {
    /// Creates a new EngineConfig from its component parts.
    pub fn new(metadata: EngineMetadata, schedules: BenefitSchedules) -> Self {
        Self {
            metadata,
            schedules,
        }
    }

    /// Returns the engine metadata.
    pub fn metadata(&self) -> &EngineMetadata {
        &self.metadata
    }

    /// Returns the depreciation schedules.
    pub fn schedules(&self) -> &BenefitSchedules {
        &self.schedules
    }
}
