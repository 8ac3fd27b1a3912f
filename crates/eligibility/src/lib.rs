//! Stateless eligibility-screening engine for municipal benefit programs.
//!
//! The pipeline is linear and has no shared mutable state: an optional
//! legacy-format shim, schema validation, aggregate derivation, then a
//! registry of independent rule predicates evaluated in order.

pub mod aggregate;
pub mod config;
pub mod driver;
pub mod enums;
pub mod error;
pub mod model;
pub mod rules;
pub mod shim;
pub mod telemetry;
pub mod validator;

pub use config::AppConfig;
pub use driver::{screen, ScreeningFailure, ScreeningOutcome};
pub use error::AppError;
