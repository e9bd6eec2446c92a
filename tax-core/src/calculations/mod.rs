//! Tax and relief calculations for Singapore resident individuals.
//!
//! This module provides the progressive tax function, the relief cap
//! formulas, the relief aggregator and the scenario composer that ties them
//! together.

pub mod aggregator;
pub mod common;
pub mod progressive_tax;
pub mod reliefs;
pub mod scenario;

pub use aggregator::{GLOBAL_RELIEF_CAP, aggregate_reliefs};
pub use progressive_tax::{BracketTax, ProgressiveTax, compute_tax};
pub use scenario::{ScenarioComposer, compose_scenario, evaluate_profile};
