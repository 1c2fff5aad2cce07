use super::messages::GossipMessage;
use crate::foundation::GuardianError;
use bincode::Options;

const WIRE_PROTOCOL_VERSION_V1: u16 = 1;

pub fn encode_gossip_message(message: &GossipMessage) -> Result<Vec<u8>, GuardianError> {
    let mut out = Vec::new();
    out.extend_from_slice(&WIRE_PROTOCOL_VERSION_V1.to_le_bytes());
    let bytes =
        bincode::DefaultOptions::new().with_fixint_encoding().serialize(message).map_err(|err| crate::serde_err!("bincode", err))?;
    out.extend_from_slice(&bytes);
    Ok(out)
}

pub fn decode_gossip_message(bytes: &[u8]) -> Result<GossipMessage, GuardianError> {
    if bytes.len() < 2 {
        return Err(GuardianError::NetworkError("gossip message too short".to_string()));
    }
    let version = u16::from_le_bytes([bytes[0], bytes[1]]);
    if version != WIRE_PROTOCOL_VERSION_V1 {
        return Err(GuardianError::NetworkError(format!(
            "wire protocol version mismatch: expected {WIRE_PROTOCOL_VERSION_V1}, got {version}"
        )));
    }
    bincode::DefaultOptions::new().with_fixint_encoding().deserialize(&bytes[2..]).map_err(|err| crate::serde_err!("bincode", err))
}
