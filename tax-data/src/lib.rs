pub mod loader;
pub mod report;
pub mod scenario_file;

pub use loader::{BracketRecord, BracketTableLoader, BracketTableLoaderError};
pub use report::Report;
pub use scenario_file::{Evaluation, ScenarioFile, ScenarioFileError};
