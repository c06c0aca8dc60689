//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::calculation::{BenefitSchedules, DepreciationSchedule};
use crate::error::{EngineError, EngineResult};
use crate::models::BenefitKind;

use super::types::{EngineConfig, EngineMetadata};

/// Loads and provides access to engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── engine.yaml      # Deployment metadata
/// └── schedules.yaml   # Uniform and training-debt depreciation schedules
/// ```
///
/// # Example
///
/// ```no_run
/// use hr_engine::config::ConfigLoader;
/// use hr_engine::models::BenefitKind;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// let schedule = loader.schedule_for(BenefitKind::Uniform);
/// println!("Uniform horizon: {} months", schedule.horizon_months());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if either file is missing, contains invalid YAML,
    /// or describes a schedule that fails validation.
    ///
    /// ```no_run
    /// use hr_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/default")?;
    /// # Ok::<(), hr_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<EngineMetadata>(&path.join("engine.yaml"))?;
        let schedules = Self::load_yaml::<BenefitSchedules>(&path.join("schedules.yaml"))?;
        schedules.validate()?;

        debug!(
            path = %path.display(),
            name = %metadata.name,
            version = %metadata.version,
            "Loaded engine configuration"
        );

        Ok(Self {
            config: EngineConfig::new(metadata, schedules),
        })
    }

    /// The built-in configuration, without touching disk.
    pub fn builtin() -> Self {
        Self {
            config: EngineConfig::default(),
        }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the engine metadata.
    pub fn metadata(&self) -> &EngineMetadata {
        self.config.metadata()
    }

    /// Returns both depreciation schedules.
    pub fn schedules(&self) -> &BenefitSchedules {
        self.config.schedules()
    }

    /// Returns the schedule for a benefit kind.
    pub fn schedule_for(&self, kind: BenefitKind) -> &DepreciationSchedule {
        self.config.schedules().for_kind(kind)
    }
}
