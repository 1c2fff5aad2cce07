use crate::domain::GuardianSet;
use log::info;
use parking_lot::RwLock;
use std::sync::Arc;

/// Read side of the guardian-set collaborator.
pub trait GuardianSetProvider: Send + Sync {
    /// Most recently installed guardian set, or `None` before the first one arrives.
    fn current(&self) -> Option<Arc<GuardianSet>>;
}

/// Last-writer-wins snapshot of the active guardian set.
///
/// Readers clone an `Arc` under a short read lock, so they never observe a partially installed set.
#[derive(Default)]
pub struct GuardianSetState {
    current: RwLock<Option<Arc<GuardianSet>>>,
}

impl GuardianSetState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_initial(gs: GuardianSet) -> Self {
        Self { current: RwLock::new(Some(Arc::new(gs))) }
    }

    /// Installs `gs` as the active set, returning the one it replaced.
    pub fn set(&self, gs: GuardianSet) -> Option<Arc<GuardianSet>> {
        let next = Arc::new(gs);
        info!("installing guardian set index={} size={} quorum={}", next.index, next.len(), next.quorum());
        self.current.write().replace(next)
    }
}

impl GuardianSetProvider for GuardianSetState {
    fn current(&self) -> Option<Arc<GuardianSet>> {
        self.current.read().clone()
    }
}
