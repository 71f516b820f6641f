use crate::opcodes::codes::{OpCheckSig, OpData20, OpDup, OpEqualVerify, OpHash160};
use crate::MAX_SCRIPT_PUBLIC_KEY_VERSION;
use corvid_addresses::{Address, Prefix, PAYLOAD_SIZE};
use corvid_consensus_core::tx::{ScriptPublicKey, ScriptVec};
use corvid_txscript_errors::TxScriptError;
use smallvec::SmallVec;

/// Length of the canonical pay-to-pubkey-hash sequence every standard
/// script starts with.
pub const P2PKH_SCRIPT_LEN: usize = 25;

/// Creates a new script to pay a transaction output to a 20-byte pubkey
/// hash.
pub fn pay_to_pubkey_hash(payload: &[u8; PAYLOAD_SIZE]) -> ScriptVec {
    SmallVec::from_iter(
        [OpDup, OpHash160, OpData20]
            .into_iter()
            .chain(payload.iter().copied())
            .chain([OpEqualVerify, OpCheckSig]),
    )
}

/// Creates a new script to pay a transaction output to the specified
/// address.
pub fn pay_to_address_script(address: &Address) -> ScriptPublicKey {
    ScriptPublicKey::new(0, pay_to_pubkey_hash(address.payload()))
}

/// Whether `script` begins with the canonical pay-to-pubkey-hash sequence.
/// Asset-tagged scripts carry it as their destination prefix.
pub fn has_pubkey_hash_prefix(script: &[u8]) -> bool {
    script.len() >= P2PKH_SCRIPT_LEN
        && script[0] == OpDup
        && script[1] == OpHash160
        && script[2] == OpData20
        && script[23] == OpEqualVerify
        && script[24] == OpCheckSig
}

/// Whether `script` is exactly a plain pay-to-pubkey-hash script.
pub fn is_pay_to_pubkey_hash(script: &[u8]) -> bool {
    script.len() == P2PKH_SCRIPT_LEN && has_pubkey_hash_prefix(script)
}

/// Returns the address encoded in a script public key.
///
/// Works for plain payment scripts and for asset-tagged scripts, whose
/// leading bytes carry the destination; anything else is reported as a
/// non-standard key format.
pub fn extract_script_pub_key_address(
    script_public_key: &ScriptPublicKey,
    prefix: Prefix,
) -> Result<Address, TxScriptError> {
    if script_public_key.version() > MAX_SCRIPT_PUBLIC_KEY_VERSION {
        return Err(TxScriptError::PubKeyFormat);
    }
    let script = script_public_key.script();
    if !has_pubkey_hash_prefix(script) {
        return Err(TxScriptError::PubKeyFormat);
    }
    let mut payload = [0u8; PAYLOAD_SIZE];
    payload.copy_from_slice(&script[3..23]);
    Ok(Address::new(prefix, payload))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_address_and_encode_script() {
        let address: Address = "n1issueAssetXXXXXXXXXXXXXXXXWdnemQ".parse().unwrap();
        let script_public_key = pay_to_address_script(&address);
        assert!(is_pay_to_pubkey_hash(script_public_key.script()));
        assert_eq!(extract_script_pub_key_address(&script_public_key, Prefix::Testnet), Ok(address));

        // Unknown version is not interpreted.
        let unknown_version = ScriptPublicKey::new(MAX_SCRIPT_PUBLIC_KEY_VERSION + 1, ScriptVec::from_slice(script_public_key.script()));
        assert_eq!(extract_script_pub_key_address(&unknown_version, Prefix::Testnet), Err(TxScriptError::PubKeyFormat));

        // Non-standard script form.
        let nonstandard = ScriptPublicKey::from_vec(0, vec![OpDup, OpHash160]);
        assert_eq!(extract_script_pub_key_address(&nonstandard, Prefix::Testnet), Err(TxScriptError::PubKeyFormat));
    }
}
