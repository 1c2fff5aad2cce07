//! Domain layer: observations, quorum certificates, guardian sets and per-observation state.

pub mod chain;
pub mod guardian_set;
pub mod observation;
pub mod retry;
pub mod state;
pub mod vaa;

pub use chain::ChainId;
pub use guardian_set::{calculate_quorum, GuardianSet};
pub use observation::Observation;
pub use retry::{RetryDecision, RetryPolicy};
pub use state::ObservationState;
pub use vaa::{GuardianSignature, Vaa};
