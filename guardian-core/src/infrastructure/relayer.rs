use crate::domain::{Observation, Vaa};
use crate::infrastructure::metrics::Metrics;
use log::{debug, warn};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Downstream collaborator that submits finished quorum certificates on-chain.
///
/// Submission is fire-and-forget: implementations must not block the caller and own their retries.
pub trait VaaRelayer: Send + Sync {
    fn submit_vaa(&self, vaa: &Vaa);
}

/// Hands certificates to a relayer worker over a bounded queue.
///
/// When the queue is full the certificate is dropped; other guardians relay the same certificate,
/// so a drop here delays submission rather than losing it.
pub struct QueuedRelayer {
    queue: mpsc::Sender<Vaa>,
    metrics: Arc<Metrics>,
}

impl QueuedRelayer {
    pub fn new(capacity: usize, metrics: Arc<Metrics>) -> (Self, mpsc::Receiver<Vaa>) {
        let (queue, rx) = mpsc::channel(capacity.max(1));
        (Self { queue, metrics }, rx)
    }
}

impl VaaRelayer for QueuedRelayer {
    fn submit_vaa(&self, vaa: &Vaa) {
        match self.queue.try_send(vaa.clone()) {
            Ok(()) => {}
            Err(mpsc::error::TrySendError::Full(dropped)) => {
                warn!("relayer queue full; dropping quorum certificate message_id={}", dropped.message_id());
                self.metrics.inc_relayer_dropped();
            }
            Err(mpsc::error::TrySendError::Closed(dropped)) => {
                debug!("relayer queue closed; skipping quorum certificate message_id={}", dropped.message_id());
            }
        }
    }
}
