use thiserror::Error;

/// Construction-time parameter rejections. These are correctable by the
/// caller and never final for an asset; the Display strings double as the
/// detail text embedded verbatim into issue/reissue rule errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParameterError {
    #[error("Invalid parameter: asset_name '{0}' is malformed")]
    InvalidAssetName(String),

    #[error("Invalid parameter: asset_name '{0}' has already been used")]
    AssetNameAlreadyUsed(String),

    #[error("Invalid parameter: asset_name '{0}' doesn't exist in the registry")]
    AssetNotFound(String),

    #[error("Invalid parameter: amount is out of range")]
    AmountOutOfRange(u64),

    #[error("Invalid parameter: amount must be {0}")]
    AmountMustBe(u64),

    #[error("Invalid parameter: amount must be divisible by the smaller unit assigned to the asset")]
    AmountNotDivisible,

    #[error("Invalid parameter: units must be between 0 and 8")]
    UnitsOutOfRange(u8),

    #[error("Invalid parameter: units must be {0}")]
    UnitsMustBe(u8),

    #[error("Invalid parameter: units may not reduce precision")]
    UnitsRegression,

    #[error("Invalid parameter: reissuable must be 0")]
    ReissuableMustBeZero,

    #[error("Invalid parameter: reissuable is set to false")]
    NotReissuable,

    #[error("Invalid parameter: amount plus current supply exceeds the maximum supply")]
    SupplyOverflow,

    #[error("Invalid parameter: ipfs_hash must start with 'Qm'.")]
    IpfsHashFormat,

    #[error("Invalid parameter: ipfs_hash is not the right length")]
    IpfsHashLength,
}

pub type ParameterResult<T> = std::result::Result<T, ParameterError>;
