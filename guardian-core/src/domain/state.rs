use crate::domain::{GuardianSet, Observation};
use std::sync::Arc;

/// Local signing state for one observation digest.
///
/// Records are shared behind a per-record lock (see `ObservationStore`); every field below is
/// only read or written while holding it.
#[derive(Debug, Default)]
pub struct ObservationState {
    /// When the record was created.
    pub first_observed_nanos: u64,
    /// Earliest time at which our signature may be resubmitted.
    pub next_retry_nanos: u64,
    /// Number of resubmissions performed so far; the backoff attempt index.
    pub retry_ctr: u32,
    /// `"loopback"` until a concrete observation is attached, then the emitter chain name.
    pub source: String,
    /// The observation this node most recently signed for this digest.
    pub our_observation: Option<Arc<dyn Observation>>,
    /// Serialized gossip envelope carrying our signature, resent verbatim on retry.
    pub our_msg: Option<Vec<u8>>,
    pub tx_hash: Vec<u8>,
    /// Guardian set captured together with `our_observation`.
    ///
    /// The pairing is best-effort: a rotation between signing and recording is not detected here.
    pub gs: Option<Arc<GuardianSet>>,
}

impl ObservationState {
    pub fn new(first_observed_nanos: u64) -> Self {
        Self { first_observed_nanos, ..Self::default() }
    }

    /// True once this node has signed and broadcast its own observation for the digest.
    pub fn is_ours(&self) -> bool {
        self.our_observation.is_some()
    }

    pub fn guardian_set_index(&self) -> Option<u32> {
        self.gs.as_ref().map(|gs| gs.index)
    }
}
