use crate::domain::{ChainId, Observation};
use crate::foundation::{keccak256, EmitterAddress, GuardianError, MessageId, SigningDigest};

pub const SUPPORTED_VAA_VERSION: u8 = 1;
pub const SIGNATURE_LENGTH: usize = 65;

const HEADER_FIXED_LEN: usize = 1 + 4 + 1;
const SIGNATURE_ENTRY_LEN: usize = 1 + SIGNATURE_LENGTH;
const BODY_FIXED_LEN: usize = 4 + 4 + 2 + 32 + 8 + 1;

/// One guardian's recoverable secp256k1 signature over the certificate digest.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GuardianSignature {
    /// Position of the signer inside the guardian set.
    pub index: u8,
    pub signature: [u8; SIGNATURE_LENGTH],
}

/// Quorum certificate: an observed message plus the guardian signatures attesting to it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Vaa {
    pub version: u8,
    pub guardian_set_index: u32,
    pub signatures: Vec<GuardianSignature>,
    pub timestamp: u32,
    pub nonce: u32,
    pub emitter_chain: ChainId,
    pub emitter_address: EmitterAddress,
    pub sequence: u64,
    pub consistency_level: u8,
    pub payload: Vec<u8>,
}

impl Vaa {
    /// Serializes the signed body (everything after the signature section).
    pub fn body_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(BODY_FIXED_LEN + self.payload.len());
        out.extend_from_slice(&self.timestamp.to_be_bytes());
        out.extend_from_slice(&self.nonce.to_be_bytes());
        out.extend_from_slice(&self.emitter_chain.as_u16().to_be_bytes());
        out.extend_from_slice(self.emitter_address.as_ref());
        out.extend_from_slice(&self.sequence.to_be_bytes());
        out.push(self.consistency_level);
        out.extend_from_slice(&self.payload);
        out
    }

    pub fn marshal(&self) -> Result<Vec<u8>, GuardianError> {
        let sig_count = u8::try_from(self.signatures.len()).map_err(|_| {
            GuardianError::InvalidQuorumCertificate(format!("too many signatures: {} (max {})", self.signatures.len(), u8::MAX))
        })?;

        let body = self.body_bytes();
        let mut out = Vec::with_capacity(HEADER_FIXED_LEN + self.signatures.len() * SIGNATURE_ENTRY_LEN + body.len());
        out.push(self.version);
        out.extend_from_slice(&self.guardian_set_index.to_be_bytes());
        out.push(sig_count);
        for sig in &self.signatures {
            out.push(sig.index);
            out.extend_from_slice(&sig.signature);
        }
        out.extend_from_slice(&body);
        Ok(out)
    }

    pub fn unmarshal(bytes: &[u8]) -> Result<Self, GuardianError> {
        let mut reader = ByteReader::new(bytes);

        let version = reader.u8("version")?;
        if version != SUPPORTED_VAA_VERSION {
            return Err(GuardianError::InvalidQuorumCertificate(format!("unsupported version: {version}")));
        }
        let guardian_set_index = u32::from_be_bytes(reader.array("guardian_set_index")?);
        let sig_count = reader.u8("signature_count")?;

        let mut signatures = Vec::with_capacity(usize::from(sig_count));
        for _ in 0..sig_count {
            let index = reader.u8("signature_index")?;
            let signature = reader.array::<SIGNATURE_LENGTH>("signature")?;
            signatures.push(GuardianSignature { index, signature });
        }

        let timestamp = u32::from_be_bytes(reader.array("timestamp")?);
        let nonce = u32::from_be_bytes(reader.array("nonce")?);
        let emitter_chain = ChainId(u16::from_be_bytes(reader.array("emitter_chain")?));
        let emitter_address = EmitterAddress::new(reader.array("emitter_address")?);
        let sequence = u64::from_be_bytes(reader.array("sequence")?);
        let consistency_level = reader.u8("consistency_level")?;
        let payload = reader.rest().to_vec();

        Ok(Self {
            version,
            guardian_set_index,
            signatures,
            timestamp,
            nonce,
            emitter_chain,
            emitter_address,
            sequence,
            consistency_level,
            payload,
        })
    }
}

impl Observation for Vaa {
    /// Double keccak256 over the body, which is what guardians sign.
    fn signing_digest(&self) -> SigningDigest {
        SigningDigest::new(keccak256(keccak256(self.body_bytes())))
    }

    fn message_id(&self) -> MessageId {
        MessageId::new(format!("{}/{}/{}", self.emitter_chain.as_u16(), self.emitter_address, self.sequence))
    }

    fn emitter_chain(&self) -> ChainId {
        self.emitter_chain
    }
}

struct ByteReader<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> ByteReader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }

    fn take(&mut self, len: usize, field: &str) -> Result<&'a [u8], GuardianError> {
        let end = self.offset.checked_add(len).filter(|end| *end <= self.bytes.len()).ok_or_else(|| {
            GuardianError::InvalidQuorumCertificate(format!(
                "truncated at {field}: need {len} bytes at offset {}, have {}",
                self.offset,
                self.bytes.len()
            ))
        })?;
        let slice = &self.bytes[self.offset..end];
        self.offset = end;
        Ok(slice)
    }

    fn u8(&mut self, field: &str) -> Result<u8, GuardianError> {
        Ok(self.take(1, field)?[0])
    }

    fn array<const N: usize>(&mut self, field: &str) -> Result<[u8; N], GuardianError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N, field)?);
        Ok(out)
    }

    fn rest(&mut self) -> &'a [u8] {
        let slice = &self.bytes[self.offset..];
        self.offset = self.bytes.len();
        slice
    }
}
