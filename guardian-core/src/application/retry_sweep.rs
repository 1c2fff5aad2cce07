use crate::application::Broadcaster;
use crate::domain::{RetryDecision, RetryPolicy};
use crate::foundation::{now_nanos, GuardianError};
use crate::infrastructure::guardian_set::GuardianSetProvider;
use crate::infrastructure::metrics::Metrics;
use crate::infrastructure::storage::ObservationStore;
use crate::infrastructure::transport::GossipSender;
use log::{debug, info, warn};
use std::sync::Arc;
use std::time::Duration;

/// Outcome of one pass over the observation store.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub resubmitted: usize,
    pub abandoned: usize,
    /// Keys whose stored signature was produced under an older guardian set.
    pub resign: Vec<String>,
}

impl SweepReport {
    pub fn is_empty(&self) -> bool {
        self.resubmitted == 0 && self.abandoned == 0 && self.resign.is_empty()
    }
}

/// Resends our own signatures that have not reached quorum yet and drops stale records.
pub struct RetrySweeper {
    store: Arc<ObservationStore>,
    gossip_send: GossipSender,
    guardian_sets: Arc<dyn GuardianSetProvider>,
    policy: RetryPolicy,
    metrics: Arc<Metrics>,
}

impl RetrySweeper {
    pub fn new(
        store: Arc<ObservationStore>,
        gossip_send: GossipSender,
        guardian_sets: Arc<dyn GuardianSetProvider>,
        policy: RetryPolicy,
        metrics: Arc<Metrics>,
    ) -> Self {
        Self { store, gossip_send, guardian_sets, policy, metrics }
    }

    /// Sweeper sharing the broadcaster's store, gossip channel and policy.
    pub fn for_broadcaster(broadcaster: &Broadcaster) -> Self {
        Self::new(
            broadcaster.store().clone(),
            broadcaster.gossip_send().clone(),
            broadcaster.guardian_sets().clone(),
            *broadcaster.retry_policy(),
            broadcaster.metrics().clone(),
        )
    }

    /// One pass at `now_nanos`. Fails only when the gossip channel is closed.
    pub async fn sweep(&self, now_nanos: u64) -> Result<SweepReport, GuardianError> {
        let current_gs_index = self.guardian_sets.current().map(|gs| gs.index);
        let mut report = SweepReport::default();

        for (key, handle) in self.store.snapshot() {
            let resend = {
                let mut state = handle.lock();
                match self.policy.evaluate(&state, now_nanos, current_gs_index) {
                    RetryDecision::NotDue => None,
                    RetryDecision::Abandon => {
                        debug!("abandoning observation state digest={} source={} ours={}", key, state.source, state.is_ours());
                        drop(state);
                        if self.store.remove_if_same(&key, &handle) {
                            report.abandoned += 1;
                        }
                        None
                    }
                    RetryDecision::Resign => {
                        debug!(
                            "observation signed under old guardian set digest={} signed_with={:?} current={:?}",
                            key,
                            state.guardian_set_index(),
                            current_gs_index
                        );
                        report.resign.push(key.clone());
                        None
                    }
                    RetryDecision::Resubmit => {
                        state.retry_ctr = state.retry_ctr.saturating_add(1);
                        state.next_retry_nanos = self.policy.next_retry_nanos(now_nanos, state.retry_ctr);
                        state.our_msg.clone()
                    }
                }
            };

            let Some(msg) = resend else { continue };
            self.gossip_send
                .send(msg)
                .await
                .map_err(|_| GuardianError::transport("gossip_send", format!("gossip channel closed during retry digest={key}")))?;
            self.metrics.inc_observation_retry();
            report.resubmitted += 1;
        }

        if report.abandoned > 0 {
            self.metrics.inc_observations_abandoned(report.abandoned as u64);
        }
        Ok(report)
    }
}

/// Runs `sweep` every `interval` until the gossip channel closes.
pub async fn run_retry_loop(sweeper: Arc<RetrySweeper>, interval: Duration) {
    let mut ticker = tokio::time::interval(interval.max(Duration::from_millis(1)));
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    info!("retry loop started interval_ms={}", interval.as_millis());

    loop {
        ticker.tick().await;
        match sweeper.sweep(now_nanos()).await {
            Ok(report) => {
                if !report.is_empty() {
                    info!(
                        "retry sweep finished resubmitted={} abandoned={} resign={} tracked={}",
                        report.resubmitted,
                        report.abandoned,
                        report.resign.len(),
                        sweeper.store.len()
                    );
                }
            }
            Err(err) => {
                warn!("retry loop stopping error={}", err);
                break;
            }
        }
    }
}
