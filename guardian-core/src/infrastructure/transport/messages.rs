use crate::foundation::{now_nanos, GuardianAddress, MessageId, SigningDigest};
use serde::{Deserialize, Serialize};

/// Top-level gossip envelope. Exactly one variant is carried per message.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub enum GossipMessage {
    /// One guardian's signature over one observation digest.
    SignedObservation(SignedObservation),
    /// A finished quorum certificate.
    SignedVaaWithQuorum(SignedVaaWithQuorum),
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct SignedObservation {
    /// Address of the signing guardian.
    pub addr: GuardianAddress,
    /// Signing digest of the observation.
    pub hash: SigningDigest,
    pub signature: Vec<u8>,
    /// Originating transaction hash; empty when the watcher did not provide one.
    pub tx_hash: Vec<u8>,
    pub message_id: MessageId,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct SignedVaaWithQuorum {
    /// Marshaled quorum certificate.
    pub vaa: Vec<u8>,
}

/// A message paired with the moment it entered a local queue.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsgWithTimestamp<T> {
    pub msg: T,
    pub timestamp_nanos: u64,
}

impl<T> MsgWithTimestamp<T> {
    pub fn new(msg: T) -> Self {
        Self { msg, timestamp_nanos: now_nanos() }
    }
}
