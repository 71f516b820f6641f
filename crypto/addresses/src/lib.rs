use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

/// Size of the hash payload carried by every address.
pub const PAYLOAD_SIZE: usize = 20;

#[derive(Error, PartialEq, Eq, Debug, Clone)]
pub enum AddressError {
    #[error("Invalid prefix byte {0}")]
    InvalidPrefix(u8),

    #[error("Invalid payload length {0}")]
    InvalidLength(usize),

    #[error("Invalid character {0}")]
    DecodingError(char),

    #[error("Checksum is invalid")]
    BadChecksum,
}

impl From<bs58::decode::Error> for AddressError {
    fn from(err: bs58::decode::Error) -> Self {
        match err {
            bs58::decode::Error::InvalidCharacter { character, .. } => AddressError::DecodingError(character),
            _ => AddressError::BadChecksum,
        }
    }
}

/// Network prefix, carried as the leading version byte of the Base58Check
/// encoding.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Prefix {
    #[serde(rename = "corvid")]
    Mainnet = 0x1c,
    #[serde(rename = "corvidtest")]
    Testnet = 0x6f,
}

impl Prefix {
    pub fn version_byte(&self) -> u8 {
        *self as u8
    }
}

impl TryFrom<u8> for Prefix {
    type Error = AddressError;

    fn try_from(version: u8) -> Result<Self, Self::Error> {
        match version {
            0x1c => Ok(Prefix::Mainnet),
            0x6f => Ok(Prefix::Testnet),
            _ => Err(AddressError::InvalidPrefix(version)),
        }
    }
}

/// A Corvid address: a network prefix plus the 20-byte hash the matching
/// pay-to-pubkey-hash script commits to.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug, Hash)]
pub struct Address {
    pub prefix: Prefix,
    pub payload: [u8; PAYLOAD_SIZE],
}

impl Address {
    pub fn new(prefix: Prefix, payload: [u8; PAYLOAD_SIZE]) -> Self {
        Self { prefix, payload }
    }

    pub fn payload(&self) -> &[u8; PAYLOAD_SIZE] {
        &self.payload
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut body = [0u8; PAYLOAD_SIZE + 1];
        body[0] = self.prefix.version_byte();
        body[1..].copy_from_slice(&self.payload);
        f.write_str(&bs58::encode(body).with_check().into_string())
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(address: &str) -> Result<Self, Self::Err> {
        let raw = bs58::decode(address).with_check(None).into_vec()?;
        if raw.len() != PAYLOAD_SIZE + 1 {
            return Err(AddressError::InvalidLength(raw.len()));
        }
        let prefix = Prefix::try_from(raw[0])?;
        let mut payload = [0u8; PAYLOAD_SIZE];
        payload.copy_from_slice(&raw[1..]);
        Ok(Self { prefix, payload })
    }
}

impl TryFrom<&str> for Address {
    type Error = AddressError;

    fn try_from(address: &str) -> Result<Self, Self::Error> {
        address.parse()
    }
}

impl Serialize for Address {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
