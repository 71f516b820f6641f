use super::metadata::IpfsHash;
use super::name::AssetName;
use serde::{Deserialize, Serialize};

/// A brand-new root or unique asset created by an issuance output.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueAsset {
    pub name: AssetName,
    /// Minted quantity in the fixed-point base.
    pub amount: u64,
    pub units: u8,
    pub reissuable: bool,
    pub ipfs_hash: Option<IpfsHash>,
}

/// The ownership token minted alongside a root issuance. Carries the
/// owner-suffixed name; its quantity is fixed at one indivisible unit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerAsset {
    pub name: AssetName,
}

/// Movement of an existing asset (or owner token) to a new outpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferAsset {
    pub name: AssetName,
    pub amount: u64,
}

/// An authorized supply increase with optional metadata updates. Optional
/// fields are absent when the reissuance leaves them untouched.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReissueAsset {
    pub name: AssetName,
    /// Newly minted quantity; zero for a metadata-only reissuance.
    pub amount: u64,
    pub new_units: Option<u8>,
    pub new_reissuable: Option<bool>,
    pub new_ipfs_hash: Option<IpfsHash>,
}

/// The decoded content of an asset-tagged output script.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssetPayload {
    Issue(IssueAsset),
    Owner(OwnerAsset),
    Transfer(TransferAsset),
    Reissue(ReissueAsset),
}
