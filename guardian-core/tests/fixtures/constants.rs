#![allow(dead_code)]

/// Secret key `0x00..01`; its guardian address is the well-known `0x7e5f...5bdf`.
pub const TEST_SECRET_KEY: [u8; 32] = {
    let mut key = [0u8; 32];
    key[31] = 1;
    key
};
pub const TEST_GUARDIAN_ADDRESS_HEX: &str = "7e5f4552091a69125d5dfcb7b8c2659029395bdf";
pub const TEST_EMITTER: [u8; 32] = [0xAB; 32];
pub const TEST_TX_HASH: [u8; 32] = [0x77; 32];
pub const TEST_SIGNATURE: [u8; 65] = [0x5A; 65];

pub fn next_u64(state: &mut u64) -> u64 {
    // LCG parameters from Numerical Recipes; fine for deterministic test coverage.
    *state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
    *state
}

pub fn gen_bytes(state: &mut u64, len: usize) -> Vec<u8> {
    (0..len).map(|_| (next_u64(state) >> 24) as u8).collect()
}
