use thiserror::Error;

#[derive(Error, PartialEq, Eq, Debug, Clone)]
pub enum TxScriptError {
    #[error("invalid opcode length: {0:02x?}")]
    MalformedPushSize(Vec<u8>),
    #[error("opcode requires {0} bytes, but script only has {1} remaining")]
    MalformedPush(usize, usize),
    #[error("asset payload requires {0} bytes, but only {1} remain")]
    MalformedPayload(usize, usize),
    #[error("asset payload carries {0} trailing bytes")]
    TrailingPayloadBytes(usize),
    #[error("asset marker opcode is not followed by a data push")]
    MissingAssetPayload,
    #[error("asset script is not terminated by a single drop opcode")]
    MissingAssetTerminator,
    #[error("asset type tag present without the asset marker opcode")]
    MissingAssetMarker,
    #[error("unknown asset type tag: {0:02x?}")]
    UnknownAssetTag(Vec<u8>),
    #[error("asset payload carries an invalid name: {0}")]
    InvalidAssetName(String),
    #[error("invalid boolean flag byte {0:#04x} in asset payload")]
    InvalidBooleanFlag(u8),
    #[error("asset amount {0} is out of range")]
    AmountOutOfRange(u64),
    #[error("asset units {0} exceed the maximum precision")]
    InvalidUnits(u8),
    #[error("asset payload carries an invalid content hash")]
    InvalidContentHash,
    #[error("unsupported public key type")]
    PubKeyFormat,
}
