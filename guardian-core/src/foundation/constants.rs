//! System-wide constants for the guardian broadcast engine.

/// Nanoseconds per second (10^9).
pub const NANOS_PER_SECOND: u64 = 1_000_000_000;

/// Source tag of a record created by local signing before a concrete observation is attached.
pub const LOOPBACK_SOURCE: &str = "loopback";

/// Minimum wait before the first resubmission of our own signature (5 minutes).
pub const FIRST_RETRY_MIN_WAIT_SECS: u64 = 5 * 60;

/// Upper bound for a single backoff interval (4 hours).
pub const MAX_RETRY_WAIT_SECS: u64 = 4 * 60 * 60;

/// How long we keep resubmitting an observation we signed ourselves (24 hours).
pub const RETRY_LIMIT_OURS_SECS: u64 = 24 * 60 * 60;

/// How long we keep a record we never signed ourselves (1 hour).
pub const RETRY_LIMIT_NOT_OURS_SECS: u64 = 60 * 60;

/// Default interval between retry sweeps.
pub const RETRY_SWEEP_INTERVAL_SECS: u64 = 60;

/// Default capacity of the outbound gossip channel.
pub const GOSSIP_SEND_CHANNEL_CAPACITY: usize = 5_000;

/// Default capacity of the self-observation inbox.
pub const OBSERVATION_INBOX_CAPACITY: usize = 5_000;

/// Default capacity of the relayer handoff queue.
pub const RELAYER_QUEUE_CAPACITY: usize = 1_000;

/// Environment variable used by tests to pin `now_nanos()`.
pub const TEST_NOW_NANOS_ENV_VAR: &str = "GUARDIAN_TEST_NOW_NANOS";
