use crate::foundation::GuardianError;
use log::debug;
use prometheus::{Encoder, IntCounter, Registry, TextEncoder};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy)]
pub struct MetricsSnapshot {
    pub uptime: Duration,
    pub observations_broadcast: u64,
    pub signed_vaa_broadcast: u64,
    pub observation_retries: u64,
    pub observations_abandoned: u64,
    pub relayer_dropped: u64,
}

/// Broadcast-engine counters.
///
/// Owns its own registry so that several engines (or tests) can coexist in one process.
pub struct Metrics {
    registry: Registry,
    observations_broadcast_total: IntCounter,
    signed_vaa_broadcast_total: IntCounter,
    observation_retries_total: IntCounter,
    observations_abandoned_total: IntCounter,
    relayer_dropped_total: IntCounter,
    started_at: Instant,
    observations_broadcast: AtomicU64,
    signed_vaa_broadcast: AtomicU64,
    observation_retries: AtomicU64,
    observations_abandoned: AtomicU64,
    relayer_dropped: AtomicU64,
}

impl Metrics {
    pub fn new() -> Result<Self, GuardianError> {
        debug!("initializing prometheus metrics");
        let registry = Registry::new();
        let observations_broadcast_total =
            IntCounter::new("guardian_observations_broadcast_total", "Total number of signed observations queued for broadcast")?;
        let signed_vaa_broadcast_total =
            IntCounter::new("guardian_signed_vaa_broadcast_total", "Total number of quorum certificates queued for broadcast")?;
        let observation_retries_total =
            IntCounter::new("guardian_observation_retries_total", "Signed observations resubmitted by the retry sweep")?;
        let observations_abandoned_total =
            IntCounter::new("guardian_observations_abandoned_total", "Observation states dropped after their retry limit")?;
        let relayer_dropped_total =
            IntCounter::new("guardian_relayer_dropped_total", "Quorum certificates dropped because the relayer queue was full")?;

        for counter in [
            &observations_broadcast_total,
            &signed_vaa_broadcast_total,
            &observation_retries_total,
            &observations_abandoned_total,
            &relayer_dropped_total,
        ] {
            registry.register(Box::new(counter.clone()))?;
        }

        debug!("prometheus metrics registered metric_count=5");
        Ok(Self {
            registry,
            observations_broadcast_total,
            signed_vaa_broadcast_total,
            observation_retries_total,
            observations_abandoned_total,
            relayer_dropped_total,
            started_at: Instant::now(),
            observations_broadcast: AtomicU64::new(0),
            signed_vaa_broadcast: AtomicU64::new(0),
            observation_retries: AtomicU64::new(0),
            observations_abandoned: AtomicU64::new(0),
            relayer_dropped: AtomicU64::new(0),
        })
    }

    pub fn inc_observation_broadcast(&self) {
        self.observations_broadcast_total.inc();
        self.observations_broadcast.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_signed_vaa_broadcast(&self) {
        self.signed_vaa_broadcast_total.inc();
        self.signed_vaa_broadcast.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_observation_retry(&self) {
        self.observation_retries_total.inc();
        self.observation_retries.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_observations_abandoned(&self, count: u64) {
        self.observations_abandoned_total.inc_by(count);
        self.observations_abandoned.fetch_add(count, Ordering::Relaxed);
    }

    pub fn inc_relayer_dropped(&self) {
        self.relayer_dropped_total.inc();
        self.relayer_dropped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            uptime: self.started_at.elapsed(),
            observations_broadcast: self.observations_broadcast.load(Ordering::Relaxed),
            signed_vaa_broadcast: self.signed_vaa_broadcast.load(Ordering::Relaxed),
            observation_retries: self.observation_retries.load(Ordering::Relaxed),
            observations_abandoned: self.observations_abandoned.load(Ordering::Relaxed),
            relayer_dropped: self.relayer_dropped.load(Ordering::Relaxed),
        }
    }

    pub fn encode(&self) -> Result<String, GuardianError> {
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&metric_families, &mut buffer).map_err(|err| GuardianError::metrics("encode", err.to_string()))?;
        String::from_utf8(buffer).map_err(|err| GuardianError::metrics("encode", err.to_string()))
    }
}
