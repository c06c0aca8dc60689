//! Benefit lifecycle and payroll derivation engine for HR records
//!
//! This crate values time-depreciating employee benefits (uniform issues and
//! training-cost debts) and derives gross, full gross and net totals from
//! annual salary components.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod clock;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod store;
