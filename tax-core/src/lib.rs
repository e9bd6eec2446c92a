pub mod calculations;
pub mod models;

pub use calculations::{
    GLOBAL_RELIEF_CAP, ProgressiveTax, ScenarioComposer, aggregate_reliefs, compose_scenario,
    compute_tax, evaluate_profile,
};
pub use models::*;
