//! Error types for the HR engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every condition the engine's boundary can report. The calculation
//! functions themselves are total and never return these.

use thiserror::Error;

/// The main error type for the HR engine.
///
/// Configuration loading, boundary validation and record store access all
/// return this error type.
///
/// # Example
///
/// ```
/// use hr_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/schedules.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/schedules.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A depreciation schedule is malformed.
    #[error("Invalid schedule '{name}': {message}")]
    InvalidSchedule {
        /// The name of the schedule.
        name: String,
        /// What makes the schedule invalid.
        message: String,
    },

    /// A benefit item failed boundary validation.
    #[error("Invalid benefit '{item_id}': {message}")]
    InvalidBenefit {
        /// The ID of the benefit item.
        item_id: String,
        /// A description of what made the item invalid.
        message: String,
    },

    /// A salary record failed boundary validation.
    #[error("Invalid salary field '{field}': {message}")]
    InvalidSalary {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// No salary record exists for the employee-year key.
    #[error("Salary record not found for employee '{employee_id}' in {year}")]
    SalaryRecordNotFound {
        /// The employee identifier.
        employee_id: String,
        /// The payroll year.
        year: i32,
    },

    /// No benefit item exists with the given ID.
    #[error("Benefit not found: {id}")]
    BenefitNotFound {
        /// The benefit item ID.
        id: String,
    },

    /// The record store rejected a read or write.
    #[error("Record store error: {message}")]
    StoreError {
        /// A description of the store failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
