use crate::fixtures::{gen_bytes, next_u64, VaaBuilder, TEST_EMITTER};
use guardian_core::domain::{ChainId, Observation, Vaa};
use guardian_core::foundation::{keccak256, GuardianError};

#[test]
fn test_vaa_when_marshaled_then_header_and_body_are_big_endian() {
    let vaa = VaaBuilder::new().guardian_set_index(0x0102_0304).sequence(0x0A0B).signatures(1).payload(&[0xCC]).build();
    let bytes = vaa.marshal().expect("marshal");

    assert_eq!(&bytes[..6], &[1, 0x01, 0x02, 0x03, 0x04, 1]);
    assert_eq!(bytes[6], 0);
    let body = &bytes[6 + 66..];
    assert_eq!(&body[..4], &1_700_000_000u32.to_be_bytes());
    assert_eq!(&body[8..10], &[0x00, 0x02]);
    assert_eq!(&body[10..42], &TEST_EMITTER);
    assert_eq!(&body[42..50], &0x0A0Bu64.to_be_bytes());
    assert_eq!(body[50], 1);
    assert_eq!(&body[51..], &[0xCC]);
}

#[test]
fn test_vaa_when_random_payloads_then_unmarshal_restores_and_digest_tracks_body() {
    let mut seed = 7u64;
    for _ in 0..32 {
        let len = (next_u64(&mut seed) % 200) as usize;
        let vaa = VaaBuilder::new()
            .chain(ChainId((next_u64(&mut seed) % 40) as u16))
            .sequence(next_u64(&mut seed))
            .signatures((next_u64(&mut seed) % 19) as u8)
            .payload(&gen_bytes(&mut seed, len))
            .build();

        let decoded = Vaa::unmarshal(&vaa.marshal().expect("marshal")).expect("unmarshal");
        assert_eq!(decoded, vaa);
        assert_eq!(decoded.signing_digest().as_bytes(), &keccak256(keccak256(vaa.body_bytes())));
    }
}

#[test]
fn test_vaa_when_bytes_truncated_then_rejected() {
    let bytes = VaaBuilder::new().signatures(2).build().marshal().expect("marshal");
    // Anything shorter than header + signatures + fixed body is rejected; the payload may be empty.
    let fixed_len = 6 + 2 * 66 + 51;
    for len in 0..fixed_len {
        let err = Vaa::unmarshal(&bytes[..len]).expect_err("truncated");
        assert!(matches!(err, GuardianError::InvalidQuorumCertificate(_)), "len={len}");
    }
    assert!(Vaa::unmarshal(&bytes[..fixed_len]).expect("empty payload").payload.is_empty());
}

#[test]
fn test_vaa_when_observed_then_message_id_and_chain_name() {
    let vaa = VaaBuilder::new().chain(ChainId::SOLANA).sequence(9).build();
    assert_eq!(vaa.message_id().as_str(), format!("1/{}/9", "ab".repeat(32)));
    assert_eq!(vaa.emitter_chain().to_string(), "solana");
    assert_eq!(ChainId(65_000).to_string(), "unknown chain ID: 65000");
}
