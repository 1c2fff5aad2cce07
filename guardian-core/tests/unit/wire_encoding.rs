use crate::fixtures::{gen_bytes, next_u64};
use guardian_core::foundation::{GuardianAddress, GuardianError, MessageId, SigningDigest};
use guardian_core::infrastructure::transport::{
    decode_gossip_message, encode_gossip_message, GossipMessage, SignedObservation, SignedVaaWithQuorum,
};

fn signed_observation(seed: &mut u64) -> SignedObservation {
    let mut digest = [0u8; 32];
    digest.copy_from_slice(&gen_bytes(seed, 32));
    let signature = gen_bytes(seed, 65);
    let tx_hash_len = (next_u64(seed) % 2) as usize * 32;
    SignedObservation {
        addr: GuardianAddress::new([0x11; 20]),
        hash: SigningDigest::new(digest),
        signature,
        tx_hash: gen_bytes(seed, tx_hash_len),
        message_id: MessageId::new(format!("2/{}/{}", "00".repeat(32), next_u64(seed))),
    }
}

#[test]
fn test_gossip_message_when_decoded_then_variant_is_preserved() {
    let mut seed = 99u64;
    let observation = GossipMessage::SignedObservation(signed_observation(&mut seed));
    let vaa = GossipMessage::SignedVaaWithQuorum(SignedVaaWithQuorum { vaa: gen_bytes(&mut seed, 150) });

    for message in [observation, vaa] {
        let bytes = encode_gossip_message(&message).expect("encode");
        assert_eq!(decode_gossip_message(&bytes).expect("decode"), message);
    }
}

#[test]
fn test_gossip_message_when_prefix_broken_then_network_error() {
    let mut seed = 3u64;
    let bytes = encode_gossip_message(&GossipMessage::SignedObservation(signed_observation(&mut seed))).expect("encode");

    let err = decode_gossip_message(&bytes[..1]).expect_err("short");
    assert!(matches!(err, GuardianError::NetworkError(_)));

    let mut wrong_version = bytes.clone();
    wrong_version[0] = wrong_version[0].wrapping_add(1);
    let err = decode_gossip_message(&wrong_version).expect_err("version");
    assert!(matches!(err, GuardianError::NetworkError(_)));
}
