mod metadata;
mod name;
mod payload;
mod precheck;
mod registry;

pub use metadata::{amount_matches_units, units_divisor, AssetMetadata, IpfsHash, IPFS_HASH_SIZE};
pub use name::{AssetName, AssetType, OWNER_SUFFIX, UNIQUE_SEPARATOR};
pub use payload::{AssetPayload, IssueAsset, OwnerAsset, ReissueAsset, TransferAsset};
pub use registry::{AssetRegistrySnapshot, AssetRegistryView};
