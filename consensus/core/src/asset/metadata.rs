use super::name::AssetName;
use crate::constants::MAX_ASSET_UNITS;
use crate::errors::params::{ParameterError, ParameterResult};
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

/// Raw size of a CIDv0 content address: a two-byte multihash header plus a
/// 32-byte digest.
pub const IPFS_HASH_SIZE: usize = 34;

/// The multihash header every CIDv0 starts with; "Qm" once Base58 encoded.
const IPFS_HASH_PREFIX: [u8; 2] = [0x12, 0x20];

/// A content address attached to an asset at issuance or reissuance time.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct IpfsHash([u8; IPFS_HASH_SIZE]);

impl IpfsHash {
    pub fn from_raw(bytes: [u8; IPFS_HASH_SIZE]) -> ParameterResult<Self> {
        if bytes[..2] != IPFS_HASH_PREFIX {
            return Err(ParameterError::IpfsHashFormat);
        }
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; IPFS_HASH_SIZE] {
        &self.0
    }
}

impl Display for IpfsHash {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&bs58::encode(self.0).into_string())
    }
}

impl Debug for IpfsHash {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl FromStr for IpfsHash {
    type Err = ParameterError;

    fn from_str(hash: &str) -> Result<Self, Self::Err> {
        if !hash.starts_with("Qm") {
            return Err(ParameterError::IpfsHashFormat);
        }
        let raw = bs58::decode(hash).into_vec().map_err(|_| ParameterError::IpfsHashFormat)?;
        let bytes: [u8; IPFS_HASH_SIZE] = raw.try_into().map_err(|_| ParameterError::IpfsHashLength)?;
        Self::from_raw(bytes)
    }
}

impl Serialize for IpfsHash {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for IpfsHash {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Confirmed state of a single asset as the registry tracks it. Created by
/// a validated issuance, mutated only through the apply-on-accept path,
/// never deleted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetMetadata {
    pub name: AssetName,
    /// Total minted quantity in the fixed-point base (8 decimal places).
    pub total_supply: u64,
    /// Decimal precision amounts of this asset must respect, 0 to 8.
    pub units: u8,
    pub reissuable: bool,
    pub ipfs_hash: Option<IpfsHash>,
}

impl AssetMetadata {
    pub fn new(name: AssetName, total_supply: u64, units: u8, reissuable: bool, ipfs_hash: Option<IpfsHash>) -> Self {
        Self { name, total_supply, units, reissuable, ipfs_hash }
    }

    pub fn has_ipfs(&self) -> bool {
        self.ipfs_hash.is_some()
    }
}

/// Smallest representable amount at a given precision, in the fixed-point
/// base.
pub fn units_divisor(units: u8) -> u64 {
    10u64.pow(MAX_ASSET_UNITS.saturating_sub(units) as u32)
}

/// Whether `amount` is an integer multiple of the smallest unit the given
/// precision allows.
pub fn amount_matches_units(amount: u64, units: u8) -> bool {
    units <= MAX_ASSET_UNITS && amount % units_divisor(units) == 0
}
