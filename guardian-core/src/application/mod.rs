//! Application layer: signature and quorum-certificate broadcasting, the retry sweep and engine wiring.

pub mod broadcast;
pub mod engine;
pub mod retry_sweep;

pub use broadcast::Broadcaster;
pub use engine::{start, GuardianEngine};
pub use retry_sweep::{run_retry_loop, RetrySweeper, SweepReport};
