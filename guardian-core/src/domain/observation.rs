use crate::domain::ChainId;
use crate::foundation::{MessageId, SigningDigest};
use std::fmt::Debug;

/// A claim that `emitter_chain` emitted a particular event.
///
/// Implementations are immutable once constructed. The signing digest is the aggregation key:
/// every guardian signing the same claim produces a signature over the same digest.
pub trait Observation: Debug + Send + Sync {
    fn signing_digest(&self) -> SigningDigest;

    fn message_id(&self) -> MessageId;

    fn emitter_chain(&self) -> ChainId;
}
