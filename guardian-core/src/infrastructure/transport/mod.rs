//! Gossip wire messages and the channel endpoints this engine writes to.

pub mod encoding;
pub mod messages;

pub use encoding::{decode_gossip_message, encode_gossip_message};
pub use messages::{GossipMessage, MsgWithTimestamp, SignedObservation, SignedVaaWithQuorum};

use tokio::sync::mpsc;

/// Outbound gossip: fully serialized envelopes, consumed by the transport.
pub type GossipSender = mpsc::Sender<Vec<u8>>;
pub type GossipReceiver = mpsc::Receiver<Vec<u8>>;

/// Inbound side of the local aggregation pipeline.
pub type ObservationSender = mpsc::Sender<MsgWithTimestamp<SignedObservation>>;
pub type ObservationReceiver = mpsc::Receiver<MsgWithTimestamp<SignedObservation>>;

pub fn gossip_channel(capacity: usize) -> (GossipSender, GossipReceiver) {
    mpsc::channel(capacity.max(1))
}

pub fn observation_channel(capacity: usize) -> (ObservationSender, ObservationReceiver) {
    mpsc::channel(capacity.max(1))
}
