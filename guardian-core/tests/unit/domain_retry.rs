use crate::fixtures::{next_u64, TestObservation};
use guardian_core::domain::{ChainId, GuardianSet, ObservationState, RetryDecision, RetryPolicy};
use guardian_core::foundation::NANOS_PER_SECOND;
use std::sync::Arc;
use std::time::Duration;

fn random_policy(state: &mut u64) -> RetryPolicy {
    RetryPolicy {
        first_retry_min_wait: Duration::from_millis(next_u64(state) % 10_000_000),
        max_retry_wait: Duration::from_millis(next_u64(state) % 100_000_000),
        ..RetryPolicy::default()
    }
}

#[test]
fn test_backoff_when_random_policies_then_non_decreasing_and_capped() {
    let mut seed = 0x5EED_u64;
    for _ in 0..64 {
        let policy = random_policy(&mut seed);
        let cap = policy.max_retry_wait.max(policy.first_retry_min_wait);
        let mut previous = Duration::ZERO;
        for attempt in 0..80u32 {
            let wait = policy.backoff(attempt);
            assert!(wait >= previous, "attempt={attempt} policy={policy:?}");
            assert!(wait <= cap, "attempt={attempt} policy={policy:?}");
            previous = wait;
        }
        assert_eq!(policy.backoff(0), policy.first_retry_min_wait.min(cap));
    }
}

#[test]
fn test_backoff_when_default_policy_then_reaches_four_hour_cap() {
    let policy = RetryPolicy::default();
    let waits: Vec<u64> = (0..8).map(|attempt| policy.backoff(attempt).as_secs()).collect();
    assert_eq!(waits, vec![300, 600, 1200, 2400, 4800, 9600, 14400, 14400]);
}

#[test]
fn test_next_retry_when_near_u64_max_then_saturates() {
    let policy = RetryPolicy::default();
    assert_eq!(policy.next_retry_nanos(u64::MAX - 1, 3), u64::MAX);
    assert_eq!(policy.next_retry_nanos(0, 0), 300 * NANOS_PER_SECOND);
}

#[test]
fn test_evaluate_when_random_ages_then_abandon_exactly_past_limit() {
    let policy = RetryPolicy::default();
    let limit_ours = policy.retry_limit_ours.as_nanos() as u64;
    let limit_not_ours = policy.retry_limit_not_ours.as_nanos() as u64;
    let min_wait = policy.first_retry_min_wait.as_nanos() as u64;
    let mut seed = 42u64;

    for _ in 0..256 {
        let first = next_u64(&mut seed) % (1 << 50);
        let age = next_u64(&mut seed) % (2 * limit_ours);
        let now = first + age;

        let not_ours = ObservationState::new(first);
        let expected = if age > limit_not_ours { RetryDecision::Abandon } else { RetryDecision::NotDue };
        assert_eq!(policy.evaluate(&not_ours, now, Some(0)), expected, "age={age}");

        let mut ours = ObservationState::new(first);
        ours.our_observation = Some(Arc::new(TestObservation::new(1, ChainId::SOLANA)));
        ours.our_msg = Some(vec![1]);
        ours.next_retry_nanos = first;
        ours.gs = Some(Arc::new(GuardianSet::new(Vec::new(), 0)));
        let expected = if age > limit_ours {
            RetryDecision::Abandon
        } else if age < min_wait {
            RetryDecision::NotDue
        } else {
            RetryDecision::Resubmit
        };
        assert_eq!(policy.evaluate(&ours, now, Some(0)), expected, "age={age}");
    }
}

#[test]
fn test_evaluate_when_ours_without_envelope_then_not_due() {
    let policy = RetryPolicy::default();
    let mut state = ObservationState::new(0);
    state.our_observation = Some(Arc::new(TestObservation::new(2, ChainId::ETHEREUM)));
    assert_eq!(policy.evaluate(&state, NANOS_PER_SECOND, None), RetryDecision::NotDue);
}
