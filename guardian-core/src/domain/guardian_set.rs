use crate::foundation::GuardianAddress;

/// Number of signatures required for a quorum among `num_guardians` (more than two thirds).
pub const fn calculate_quorum(num_guardians: usize) -> usize {
    num_guardians * 2 / 3 + 1
}

/// Ordered, versioned set of guardian addresses.
///
/// The position of an address is the signer index used inside quorum certificates.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GuardianSet {
    pub keys: Vec<GuardianAddress>,
    pub index: u32,
}

impl GuardianSet {
    pub fn new(keys: Vec<GuardianAddress>, index: u32) -> Self {
        Self { keys, index }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn quorum(&self) -> usize {
        calculate_quorum(self.keys.len())
    }

    pub fn key_index(&self, addr: &GuardianAddress) -> Option<usize> {
        self.keys.iter().position(|key| key == addr)
    }

    pub fn contains(&self, addr: &GuardianAddress) -> bool {
        self.key_index(addr).is_some()
    }
}
