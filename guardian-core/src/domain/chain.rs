use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric identifier of a source chain as carried in quorum certificates.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ChainId(pub u16);

impl ChainId {
    pub const UNSET: ChainId = ChainId(0);
    pub const SOLANA: ChainId = ChainId(1);
    pub const ETHEREUM: ChainId = ChainId(2);
    pub const TERRA: ChainId = ChainId(3);
    pub const BSC: ChainId = ChainId(4);
    pub const POLYGON: ChainId = ChainId(5);
    pub const AVALANCHE: ChainId = ChainId(6);
    pub const OASIS: ChainId = ChainId(7);
    pub const ALGORAND: ChainId = ChainId(8);
    pub const AURORA: ChainId = ChainId(9);
    pub const FANTOM: ChainId = ChainId(10);
    pub const KARURA: ChainId = ChainId(11);
    pub const ACALA: ChainId = ChainId(12);
    pub const KLAYTN: ChainId = ChainId(13);
    pub const CELO: ChainId = ChainId(14);
    pub const NEAR: ChainId = ChainId(15);
    pub const MOONBEAM: ChainId = ChainId(16);
    pub const TERRA2: ChainId = ChainId(18);
    pub const INJECTIVE: ChainId = ChainId(19);
    pub const SUI: ChainId = ChainId(21);
    pub const APTOS: ChainId = ChainId(22);
    pub const ARBITRUM: ChainId = ChainId(23);
    pub const OPTIMISM: ChainId = ChainId(24);
    pub const BASE: ChainId = ChainId(30);
    pub const WORMCHAIN: ChainId = ChainId(3104);

    pub const fn as_u16(&self) -> u16 {
        self.0
    }

    /// Canonical lowercase name, or `None` for identifiers this node does not know about.
    pub const fn name(&self) -> Option<&'static str> {
        let name = match self.0 {
            0 => "unset",
            1 => "solana",
            2 => "ethereum",
            3 => "terra",
            4 => "bsc",
            5 => "polygon",
            6 => "avalanche",
            7 => "oasis",
            8 => "algorand",
            9 => "aurora",
            10 => "fantom",
            11 => "karura",
            12 => "acala",
            13 => "klaytn",
            14 => "celo",
            15 => "near",
            16 => "moonbeam",
            18 => "terra2",
            19 => "injective",
            21 => "sui",
            22 => "aptos",
            23 => "arbitrum",
            24 => "optimism",
            30 => "base",
            3104 => "wormchain",
            _ => return None,
        };
        Some(name)
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "unknown chain ID: {}", self.0),
        }
    }
}

impl From<u16> for ChainId {
    fn from(value: u16) -> Self {
        Self(value)
    }
}
