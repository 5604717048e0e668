//! AML risk evaluation and compliance-alerting engine.
//!
//! The engine is pure: stateless evaluators compute over immutable record
//! snapshots plus an explicit evaluation time, so identical inputs always
//! produce identical outputs. `store` is the SQLite record store and
//! `service` wires fetch → evaluate → persist around the engine.

pub mod anomaly;
pub mod customer_risk;
pub mod engine;
pub mod error;
pub mod factors;
pub mod license_compliance;
pub mod regulatory_alerts;
pub mod risk_aggregator;
pub mod rules;
pub mod service;
pub mod snapshot;
pub mod store;
pub mod transaction_pattern;
pub mod types;
pub mod validation;

pub use engine::AmlEngine;
pub use error::{EngineError, EngineResult};
