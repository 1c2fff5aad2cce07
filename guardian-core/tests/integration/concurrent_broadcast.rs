use crate::fixtures::{BroadcastHarness, TestObservation};
use guardian_core::domain::{ChainId, Observation};
use guardian_core::infrastructure::transport::{decode_gossip_message, GossipMessage};
use std::sync::Arc;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_broadcast_signature_when_concurrent_same_digest_then_one_consistent_record() {
    const CALLERS: u8 = 32;
    let mut harness = BroadcastHarness::builder().gossip_capacity(usize::from(CALLERS)).inbox_capacity(usize::from(CALLERS)).build();
    let observation = Arc::new(TestObservation::new(0x99, ChainId::ETHEREUM));

    let tasks: Vec<_> = (0..CALLERS)
        .map(|caller| {
            let broadcaster = harness.broadcaster.clone();
            let observation = observation.clone();
            tokio::spawn(async move { broadcaster.broadcast_signature(observation, vec![caller; 65], vec![caller]).await })
        })
        .collect();
    for task in tasks {
        task.await.expect("join").expect("broadcast");
    }

    let sent = harness.drain_gossip();
    assert_eq!(sent.len(), usize::from(CALLERS));
    assert_eq!(harness.broadcaster.store().len(), 1);
    assert_eq!(harness.metrics.snapshot().observations_broadcast, u64::from(CALLERS));

    let handle = harness.broadcaster.store().get(&observation.signing_digest().state_key()).expect("record");
    let state = handle.lock();
    let our_msg = state.our_msg.as_deref().expect("our msg");
    assert!(sent.iter().any(|bytes| bytes.as_slice() == our_msg));
    // `our_msg` and `tx_hash` are written in one critical section, so they always describe the same call.
    match decode_gossip_message(our_msg).expect("decode") {
        GossipMessage::SignedObservation(signed) => {
            assert_eq!(signed.tx_hash, state.tx_hash);
            assert_eq!(signed.signature, vec![state.tx_hash[0]; 65]);
        }
        other => panic!("expected SignedObservation, got {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_broadcast_signature_when_concurrent_distinct_digests_then_one_record_each() {
    const CALLERS: u8 = 24;
    let mut harness = BroadcastHarness::builder().gossip_capacity(usize::from(CALLERS)).inbox_capacity(usize::from(CALLERS)).build();

    let tasks: Vec<_> = (0..CALLERS)
        .map(|caller| {
            let broadcaster = harness.broadcaster.clone();
            tokio::spawn(async move {
                let observation = Arc::new(TestObservation::new(caller, ChainId::SOLANA));
                broadcaster.broadcast_signature(observation, vec![caller; 65], Vec::new()).await
            })
        })
        .collect();
    for task in tasks {
        task.await.expect("join").expect("broadcast");
    }

    assert_eq!(harness.drain_gossip().len(), usize::from(CALLERS));
    assert_eq!(harness.broadcaster.store().len(), usize::from(CALLERS));
    for (_, handle) in harness.broadcaster.store().snapshot() {
        let state = handle.lock();
        assert!(state.is_ours());
        assert_eq!(state.source, "solana");
    }
}
