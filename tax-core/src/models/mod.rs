mod gender;
mod relief;
mod relief_bundle;
mod tax_bracket;
mod tax_outcome;
mod taxpayer_profile;

pub use gender::Gender;
pub use relief::{NsmanRelief, ReliefClaim, ReliefError, ReliefKind, ReliefRequest};
pub use relief_bundle::ReliefBundle;
pub use tax_bracket::{BracketTable, BracketTableError, TaxBracket};
pub use tax_outcome::{ReliefSummary, ScenarioOutcome, TaxOutcome};
pub use taxpayer_profile::{DONATION_MULTIPLIER, TaxpayerProfile};
