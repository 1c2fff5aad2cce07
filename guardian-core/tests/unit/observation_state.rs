use guardian_core::domain::ObservationState;
use guardian_core::infrastructure::storage::ObservationStore;
use std::sync::Arc;

#[test]
fn test_store_when_many_keys_created_concurrently_then_each_created_once() {
    const THREADS: usize = 8;
    const KEYS: usize = 64;
    let store = Arc::new(ObservationStore::new());

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let store = store.clone();
            std::thread::spawn(move || (0..KEYS).filter(|key| store.get_or_create(&format!("{key:064x}")).1).count())
        })
        .collect();

    let created: usize = handles.into_iter().map(|h| h.join().expect("join")).sum();
    assert_eq!(created, KEYS);
    assert_eq!(store.len(), KEYS);
}

#[test]
fn test_state_when_new_then_not_ours_and_no_guardian_set() {
    let state = ObservationState::new(5);
    assert_eq!(state.first_observed_nanos, 5);
    assert!(!state.is_ours());
    assert_eq!(state.guardian_set_index(), None);
    assert!(state.our_msg.is_none());
    assert!(state.tx_hash.is_empty());
}
