use crate::domain::{Observation, RetryPolicy, Vaa};
use crate::foundation::{hx, now_nanos, GuardianAddress, GuardianError, LOOPBACK_SOURCE};
use crate::infrastructure::guardian_set::GuardianSetProvider;
use crate::infrastructure::metrics::Metrics;
use crate::infrastructure::relayer::VaaRelayer;
use crate::infrastructure::storage::ObservationStore;
use crate::infrastructure::transport::{
    encode_gossip_message, GossipMessage, GossipSender, MsgWithTimestamp, ObservationSender, SignedObservation, SignedVaaWithQuorum,
};
use log::{debug, error, trace};
use secp256k1::PublicKey;
use std::sync::Arc;

/// Publishes this guardian's signatures and finished quorum certificates to the gossip network.
///
/// Cheap to share behind an `Arc`; every method takes `&self` and may be called concurrently.
pub struct Broadcaster {
    our_addr: GuardianAddress,
    gossip_send: GossipSender,
    obsv_inbox: ObservationSender,
    store: Arc<ObservationStore>,
    guardian_sets: Arc<dyn GuardianSetProvider>,
    retry_policy: RetryPolicy,
    relayer: Option<Arc<dyn VaaRelayer>>,
    metrics: Arc<Metrics>,
}

impl Broadcaster {
    pub fn new(
        public_key: &PublicKey,
        gossip_send: GossipSender,
        obsv_inbox: ObservationSender,
        guardian_sets: Arc<dyn GuardianSetProvider>,
        metrics: Arc<Metrics>,
    ) -> Self {
        Self {
            our_addr: GuardianAddress::from_public_key(public_key),
            gossip_send,
            obsv_inbox,
            store: Arc::new(ObservationStore::new()),
            guardian_sets,
            retry_policy: RetryPolicy::default(),
            relayer: None,
            metrics,
        }
    }

    /// Share an existing store (e.g. the one the aggregation side reads from).
    pub fn with_store(mut self, store: Arc<ObservationStore>) -> Self {
        self.store = store;
        self
    }

    pub fn with_retry_policy(mut self, retry_policy: RetryPolicy) -> Self {
        self.retry_policy = retry_policy;
        self
    }

    pub fn with_relayer(mut self, relayer: Arc<dyn VaaRelayer>) -> Self {
        self.relayer = Some(relayer);
        self
    }

    pub fn our_addr(&self) -> &GuardianAddress {
        &self.our_addr
    }

    pub fn store(&self) -> &Arc<ObservationStore> {
        &self.store
    }

    pub fn metrics(&self) -> &Arc<Metrics> {
        &self.metrics
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry_policy
    }

    pub(crate) fn gossip_send(&self) -> &GossipSender {
        &self.gossip_send
    }

    pub(crate) fn guardian_sets(&self) -> &Arc<dyn GuardianSetProvider> {
        &self.guardian_sets
    }

    /// Gossips our signature over `observation` and records it as ours for later resubmission.
    ///
    /// The signature is not checked here. The envelope is enqueued on the gossip channel before the
    /// local record is updated, and a copy is handed to our own aggregation inbox on a separate task
    /// so a saturated inbox never holds up gossip (and vice versa).
    ///
    /// Only fails when the gossip channel is closed. The self-delivery is already under way by then,
    /// so the local inbox still sees the observation while no record is written for it.
    pub async fn broadcast_signature(
        &self,
        observation: Arc<dyn Observation>,
        signature: Vec<u8>,
        tx_hash: Vec<u8>,
    ) -> Result<(), GuardianError> {
        let digest = observation.signing_digest();
        let message_id = observation.message_id();
        let signed = SignedObservation {
            addr: self.our_addr,
            hash: digest,
            signature,
            tx_hash: tx_hash.clone(),
            message_id: message_id.clone(),
        };

        let envelope = GossipMessage::SignedObservation(signed.clone());
        let msg = match encode_gossip_message(&envelope) {
            Ok(bytes) => bytes,
            Err(err) => {
                error!("failed to encode signed observation message_id={} digest={} error={}", message_id, digest, err);
                panic!("failed to encode signed observation message_id={message_id}: {err}");
            }
        };

        let inbox = self.obsv_inbox.clone();
        tokio::spawn(async move {
            if inbox.send(MsgWithTimestamp::new(signed)).await.is_err() {
                debug!("observation inbox closed; dropping self-delivery");
            }
        });

        self.gossip_send
            .send(msg.clone())
            .await
            .map_err(|_| GuardianError::transport("gossip_send", format!("gossip channel closed message_id={message_id}")))?;

        let key = digest.state_key();
        trace!("signature broadcast message_id={} digest={} tx_hash={}", message_id, key, hx(&tx_hash));
        let (handle, created) = self.store.get_or_create(&key);
        {
            let mut state = handle.lock();
            if created {
                state.source = LOOPBACK_SOURCE.to_string();
                state.next_retry_nanos = self.retry_policy.next_retry_nanos(now_nanos(), 0);
            }
            state.source = observation.emitter_chain().to_string();
            state.our_observation = Some(observation);
            state.our_msg = Some(msg);
            state.tx_hash = tx_hash;
            state.gs = self.guardian_sets.current();
        }

        if created {
            trace!("observation state created by local signing digest={}", key);
        }
        self.metrics.inc_observation_broadcast();
        Ok(())
    }

    /// Gossips a finished quorum certificate and hands it to the relayer when one is configured.
    ///
    /// Only fails when the gossip channel is closed.
    pub async fn broadcast_signed_vaa(&self, vaa: &Vaa) -> Result<(), GuardianError> {
        let message_id = vaa.message_id();
        let vaa_bytes = match vaa.marshal() {
            Ok(bytes) => bytes,
            Err(err) => {
                error!("failed to marshal quorum certificate message_id={} error={}", message_id, err);
                panic!("failed to marshal quorum certificate message_id={message_id}: {err}");
            }
        };

        let envelope = GossipMessage::SignedVaaWithQuorum(SignedVaaWithQuorum { vaa: vaa_bytes });
        let msg = match encode_gossip_message(&envelope) {
            Ok(bytes) => bytes,
            Err(err) => {
                error!("failed to encode quorum certificate envelope message_id={} error={}", message_id, err);
                panic!("failed to encode quorum certificate envelope message_id={message_id}: {err}");
            }
        };

        trace!(
            "quorum certificate broadcast message_id={} guardian_set_index={} signatures={}",
            message_id,
            vaa.guardian_set_index,
            vaa.signatures.len()
        );
        self.gossip_send
            .send(msg)
            .await
            .map_err(|_| GuardianError::transport("gossip_send", format!("gossip channel closed message_id={message_id}")))?;

        if let Some(relayer) = &self.relayer {
            relayer.submit_vaa(vaa);
        }

        self.metrics.inc_signed_vaa_broadcast();
        Ok(())
    }
}
