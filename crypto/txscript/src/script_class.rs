use crate::asset::decode_asset_script;
use crate::standard::is_pay_to_pubkey_hash;
use crate::MAX_SCRIPT_PUBLIC_KEY_VERSION;
use corvid_consensus_core::asset::AssetPayload;
use corvid_consensus_core::tx::ScriptPublicKey;
use std::fmt::{Display, Formatter};

/// Standard classification of an output script. Total and deterministic:
/// every script falls in exactly one class, with malformed asset framing
/// landing in `NonStandard` (the validator reports those through its own
/// error path).
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum ScriptClass {
    /// None of the recognized forms.
    NonStandard,
    /// Plain pay-to-pubkey-hash value transfer.
    PubKeyHash,
    /// Creates a new root or unique asset.
    AssetIssue,
    /// Mints the ownership token of a root asset.
    AssetOwner,
    /// Moves an existing asset or owner token.
    AssetTransfer,
    /// Increases the supply of an existing asset.
    AssetReissue,
}

impl ScriptClass {
    pub fn from_script(script_public_key: &ScriptPublicKey) -> Self {
        if script_public_key.version() > MAX_SCRIPT_PUBLIC_KEY_VERSION {
            return ScriptClass::NonStandard;
        }
        match decode_asset_script(script_public_key.script()) {
            Ok(Some(AssetPayload::Issue(_))) => ScriptClass::AssetIssue,
            Ok(Some(AssetPayload::Owner(_))) => ScriptClass::AssetOwner,
            Ok(Some(AssetPayload::Transfer(_))) => ScriptClass::AssetTransfer,
            Ok(Some(AssetPayload::Reissue(_))) => ScriptClass::AssetReissue,
            Ok(None) if is_pay_to_pubkey_hash(script_public_key.script()) => ScriptClass::PubKeyHash,
            Ok(None) | Err(_) => ScriptClass::NonStandard,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScriptClass::NonStandard => "nonstandard",
            ScriptClass::PubKeyHash => "pubkeyhash",
            ScriptClass::AssetIssue => "assetissue",
            ScriptClass::AssetOwner => "assetowner",
            ScriptClass::AssetTransfer => "assettransfer",
            ScriptClass::AssetReissue => "assetreissue",
        }
    }
}

impl Display for ScriptClass {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::encode_asset_script;
    use crate::standard::pay_to_address_script;
    use corvid_addresses::Address;
    use corvid_consensus_core::asset::{OwnerAsset, TransferAsset};
    use corvid_consensus_core::constants::COIN;

    #[test]
    fn test_classification_is_total() {
        let address: Address = "n1issueAssetXXXXXXXXXXXXXXXXWdnemQ".parse().unwrap();
        let plain = pay_to_address_script(&address);
        assert_eq!(ScriptClass::from_script(&plain), ScriptClass::PubKeyHash);

        let owner = encode_asset_script(
            &address,
            &AssetPayload::Owner(OwnerAsset { name: "TEST_ASSET!".parse().unwrap() }),
        )
        .unwrap();
        assert_eq!(ScriptClass::from_script(&owner), ScriptClass::AssetOwner);

        let transfer = encode_asset_script(
            &address,
            &AssetPayload::Transfer(TransferAsset { name: "TEST_ASSET".parse().unwrap(), amount: COIN }),
        )
        .unwrap();
        assert_eq!(ScriptClass::from_script(&transfer), ScriptClass::AssetTransfer);
        assert_eq!(ScriptClass::from_script(&transfer).to_string(), "assettransfer");

        let garbage = ScriptPublicKey::from_vec(0, vec![0xff, 0xfe]);
        assert_eq!(ScriptClass::from_script(&garbage), ScriptClass::NonStandard);
    }
}
