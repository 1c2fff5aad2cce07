use crate::domain::ObservationState;
use crate::foundation::util::time::add_duration_nanos;
use crate::foundation::{FIRST_RETRY_MIN_WAIT_SECS, MAX_RETRY_WAIT_SECS, RETRY_LIMIT_NOT_OURS_SECS, RETRY_LIMIT_OURS_SECS};
use std::time::Duration;

const MAX_BACKOFF_EXPONENT_SHIFT: u32 = 30;

/// What the retry sweep should do with a record at a given instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RetryDecision {
    /// Nothing to do yet (or nothing of ours to resend).
    NotDue,
    /// Resend the stored signed-observation envelope verbatim.
    Resubmit,
    /// Due, but the guardian set rotated since we signed; the observation must be re-signed.
    Resign,
    /// The record outlived its retry limit and should be dropped.
    Abandon,
}

/// Capped exponential backoff plus the age limits after which records are abandoned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    pub first_retry_min_wait: Duration,
    pub max_retry_wait: Duration,
    pub retry_limit_ours: Duration,
    pub retry_limit_not_ours: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            first_retry_min_wait: Duration::from_secs(FIRST_RETRY_MIN_WAIT_SECS),
            max_retry_wait: Duration::from_secs(MAX_RETRY_WAIT_SECS),
            retry_limit_ours: Duration::from_secs(RETRY_LIMIT_OURS_SECS),
            retry_limit_not_ours: Duration::from_secs(RETRY_LIMIT_NOT_OURS_SECS),
        }
    }
}

impl RetryPolicy {
    /// `min(first_retry_min_wait * 2^attempt, max_retry_wait)`; deterministic and non-decreasing in `attempt`.
    pub fn backoff(&self, attempt: u32) -> Duration {
        let max = self.max_retry_wait.max(self.first_retry_min_wait);
        let shift = attempt.min(MAX_BACKOFF_EXPONENT_SHIFT);
        let factor = 1u32 << shift;
        match self.first_retry_min_wait.checked_mul(factor) {
            Some(wait) if wait <= max => wait,
            _ => max,
        }
    }

    pub fn next_retry_nanos(&self, now_nanos: u64, attempt: u32) -> u64 {
        add_duration_nanos(now_nanos, self.backoff(attempt))
    }

    /// Classifies a record for the retry sweep.
    ///
    /// `current_guardian_set_index` is the index of the set installed right now, if any. Nothing is
    /// resubmitted before the record is `first_retry_min_wait` old, whoever created it.
    pub fn evaluate(&self, state: &ObservationState, now_nanos: u64, current_guardian_set_index: Option<u32>) -> RetryDecision {
        let age_nanos = now_nanos.saturating_sub(state.first_observed_nanos);
        let limit = if state.is_ours() { self.retry_limit_ours } else { self.retry_limit_not_ours };
        if u128::from(age_nanos) > limit.as_nanos() {
            return RetryDecision::Abandon;
        }

        if !state.is_ours() || state.our_msg.is_none() || now_nanos < state.next_retry_nanos {
            return RetryDecision::NotDue;
        }
        if u128::from(age_nanos) < self.first_retry_min_wait.as_nanos() {
            return RetryDecision::NotDue;
        }

        match (state.guardian_set_index(), current_guardian_set_index) {
            (Some(signed_with), Some(current)) if signed_with != current => RetryDecision::Resign,
            _ => RetryDecision::Resubmit,
        }
    }
}
