pub mod config;
pub mod guardian_set;
pub mod logging;
pub mod metrics;
pub mod relayer;
pub mod storage;
pub mod transport;
