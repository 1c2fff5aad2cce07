use crate::application::{run_retry_loop, Broadcaster, RetrySweeper};
use crate::domain::Vaa;
use crate::foundation::GuardianError;
use crate::infrastructure::config::GuardianConfig;
use crate::infrastructure::guardian_set::GuardianSetProvider;
use crate::infrastructure::logging::init_logger;
use crate::infrastructure::metrics::Metrics;
use crate::infrastructure::relayer::QueuedRelayer;
use crate::infrastructure::transport::{gossip_channel, observation_channel, GossipReceiver, ObservationReceiver};
use log::info;
use secp256k1::PublicKey;
use std::sync::Arc;
use tokio::sync::mpsc;

struct AbortOnDrop(tokio::task::JoinHandle<()>);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// A running broadcast engine: the broadcaster plus the far ends of its channels.
///
/// The transport drains `gossip_rx`, the aggregation side drains `inbox_rx` and the relayer worker
/// drains `relayer_rx`. Dropping the engine stops the retry loop.
pub struct GuardianEngine {
    pub broadcaster: Arc<Broadcaster>,
    pub gossip_rx: GossipReceiver,
    pub inbox_rx: ObservationReceiver,
    /// Present when `broadcast.enable_relayer` is set.
    pub relayer_rx: Option<mpsc::Receiver<Vaa>>,
    pub metrics: Arc<Metrics>,
    _retry_loop: AbortOnDrop,
}

/// Builds the engine from `config` and starts its retry loop.
///
/// Must be called from within a tokio runtime.
pub fn start(
    config: &GuardianConfig,
    public_key: &PublicKey,
    guardian_sets: Arc<dyn GuardianSetProvider>,
) -> Result<GuardianEngine, GuardianError> {
    config.validate().map_err(|errors| GuardianError::ConfigError(format!("validation failed: {:?}", errors)))?;
    let runtime = tokio::runtime::Handle::try_current()
        .map_err(|err| GuardianError::Message(format!("guardian engine needs a tokio runtime: {err}")))?;

    init_logger(config.logging.log_dir.as_deref(), &config.logging.filters)?;

    let metrics = Arc::new(Metrics::new()?);
    let (gossip_send, gossip_rx) = gossip_channel(config.broadcast.gossip_send_capacity);
    let (obsv_inbox, inbox_rx) = observation_channel(config.broadcast.observation_inbox_capacity);

    let mut broadcaster = Broadcaster::new(public_key, gossip_send, obsv_inbox, guardian_sets, metrics.clone())
        .with_retry_policy(config.retry.policy());
    let relayer_rx = if config.broadcast.enable_relayer {
        let (relayer, relayer_rx) = QueuedRelayer::new(config.broadcast.relayer_queue_capacity, metrics.clone());
        broadcaster = broadcaster.with_relayer(Arc::new(relayer));
        Some(relayer_rx)
    } else {
        None
    };
    let broadcaster = Arc::new(broadcaster);

    let sweeper = Arc::new(RetrySweeper::for_broadcaster(&broadcaster));
    let retry_loop = AbortOnDrop(runtime.spawn(run_retry_loop(sweeper, config.retry.sweep_interval())));

    info!(
        "guardian engine started guardian={} gossip_send_capacity={} observation_inbox_capacity={} relayer_enabled={} sweep_interval_secs={}",
        broadcaster.our_addr(),
        config.broadcast.gossip_send_capacity,
        config.broadcast.observation_inbox_capacity,
        config.broadcast.enable_relayer,
        config.retry.sweep_interval_secs
    );

    Ok(GuardianEngine { broadcaster, gossip_rx, inbox_rx, relayer_rx, metrics, _retry_loop: retry_loop })
}
