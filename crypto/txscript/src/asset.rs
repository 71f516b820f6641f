//! Binary codec for asset-tagged output scripts.
//!
//! An asset-tagged script is the 25-byte pay-to-pubkey-hash prefix of the
//! destination, the asset marker opcode, one canonical data push holding a
//! 4-byte type tag plus the serialized payload, and a single terminating
//! drop opcode. Decoding fails closed: byte sequences that never engage the
//! framing are plain value transfers, while engaged-but-broken framing is a
//! malformed asset script and must be reported as such.

use crate::opcodes::codes::{
    OpCheckSig, OpCorvidAsset, OpDrop, OpDup, OpEqualVerify, OpHash160, OpPushData1, OpPushData2,
};
use crate::script_builder::{ScriptBuilder, ScriptBuilderResult};
use crate::standard::{has_pubkey_hash_prefix, P2PKH_SCRIPT_LEN};
use corvid_addresses::Address;
use corvid_consensus_core::asset::{
    AssetName, AssetPayload, AssetType, IpfsHash, IssueAsset, OwnerAsset, ReissueAsset,
    TransferAsset, IPFS_HASH_SIZE,
};
use corvid_consensus_core::constants::{MAX_ASSET_UNITS, MAX_MONEY};
use corvid_consensus_core::tx::ScriptPublicKey;
use corvid_txscript_errors::TxScriptError;
use std::str;

/// The four mutually exclusive type tags that follow the asset marker
/// opcode.
pub const ISSUE_TAG: [u8; 4] = *b"cvdq";
pub const OWNER_TAG: [u8; 4] = *b"cvdo";
pub const TRANSFER_TAG: [u8; 4] = *b"cvdt";
pub const REISSUE_TAG: [u8; 4] = *b"cvdr";

const TAG_SIZE: usize = 4;

/// Bounds-checked reader over a payload slice. Every structural problem
/// surfaces as an error; offsets never leave the buffer.
struct PayloadReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> PayloadReader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    fn read_slice(&mut self, len: usize) -> Result<&'a [u8], TxScriptError> {
        if self.remaining() < len {
            return Err(TxScriptError::MalformedPayload(len, self.remaining()));
        }
        let slice = &self.bytes[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    fn read_u8(&mut self) -> Result<u8, TxScriptError> {
        Ok(self.read_slice(1)?[0])
    }

    fn read_bool(&mut self) -> Result<bool, TxScriptError> {
        match self.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            flag => Err(TxScriptError::InvalidBooleanFlag(flag)),
        }
    }

    fn read_amount(&mut self) -> Result<u64, TxScriptError> {
        let bytes = self.read_slice(8)?;
        let amount = u64::from_le_bytes(bytes.try_into().expect("slice length checked"));
        if amount > MAX_MONEY {
            return Err(TxScriptError::AmountOutOfRange(amount));
        }
        Ok(amount)
    }

    fn read_units(&mut self) -> Result<u8, TxScriptError> {
        let units = self.read_u8()?;
        if units > MAX_ASSET_UNITS {
            return Err(TxScriptError::InvalidUnits(units));
        }
        Ok(units)
    }

    fn read_name(&mut self) -> Result<AssetName, TxScriptError> {
        let len = self.read_u8()? as usize;
        let bytes = self.read_slice(len)?;
        let text = str::from_utf8(bytes)
            .map_err(|_| TxScriptError::InvalidAssetName(String::from_utf8_lossy(bytes).into_owned()))?;
        text.parse().map_err(|_| TxScriptError::InvalidAssetName(text.to_string()))
    }

    fn read_ipfs_hash(&mut self) -> Result<IpfsHash, TxScriptError> {
        let bytes: [u8; IPFS_HASH_SIZE] =
            self.read_slice(IPFS_HASH_SIZE)?.try_into().expect("slice length checked");
        IpfsHash::from_raw(bytes).map_err(|_| TxScriptError::InvalidContentHash)
    }

    fn expect_done(&self) -> Result<(), TxScriptError> {
        match self.remaining() {
            0 => Ok(()),
            trailing => Err(TxScriptError::TrailingPayloadBytes(trailing)),
        }
    }
}

fn decode_issue(payload: &[u8]) -> Result<IssueAsset, TxScriptError> {
    let mut reader = PayloadReader::new(payload);
    let name = reader.read_name()?;
    if name.is_owner() {
        // Owner tokens are minted through their own script shape.
        return Err(TxScriptError::InvalidAssetName(name.to_string()));
    }
    let amount = reader.read_amount()?;
    let units = reader.read_units()?;
    let reissuable = reader.read_bool()?;
    let ipfs_hash = if reader.read_bool()? { Some(reader.read_ipfs_hash()?) } else { None };
    reader.expect_done()?;
    Ok(IssueAsset { name, amount, units, reissuable, ipfs_hash })
}

fn decode_owner(payload: &[u8]) -> Result<OwnerAsset, TxScriptError> {
    let mut reader = PayloadReader::new(payload);
    let name = reader.read_name()?;
    if !name.is_owner() {
        return Err(TxScriptError::InvalidAssetName(name.to_string()));
    }
    reader.expect_done()?;
    Ok(OwnerAsset { name })
}

fn decode_transfer(payload: &[u8]) -> Result<TransferAsset, TxScriptError> {
    let mut reader = PayloadReader::new(payload);
    let name = reader.read_name()?;
    let amount = reader.read_amount()?;
    reader.expect_done()?;
    Ok(TransferAsset { name, amount })
}

fn decode_reissue(payload: &[u8]) -> Result<ReissueAsset, TxScriptError> {
    let mut reader = PayloadReader::new(payload);
    let name = reader.read_name()?;
    if name.asset_type() != AssetType::Root {
        // Owner tokens and unique sub-assets can never be reissued.
        return Err(TxScriptError::InvalidAssetName(name.to_string()));
    }
    let amount = reader.read_amount()?;
    let new_units = if reader.read_bool()? { Some(reader.read_units()?) } else { None };
    let new_reissuable = if reader.read_bool()? { Some(reader.read_bool()?) } else { None };
    let new_ipfs_hash = if reader.read_bool()? { Some(reader.read_ipfs_hash()?) } else { None };
    reader.expect_done()?;
    Ok(ReissueAsset { name, amount, new_units, new_reissuable, new_ipfs_hash })
}

fn write_name(bytes: &mut Vec<u8>, name: &AssetName) {
    bytes.push(name.as_str().len() as u8);
    bytes.extend_from_slice(name.as_str().as_bytes());
}

fn write_optional_hash(bytes: &mut Vec<u8>, hash: &Option<IpfsHash>) {
    match hash {
        Some(hash) => {
            bytes.push(1);
            bytes.extend_from_slice(hash.as_bytes());
        }
        None => bytes.push(0),
    }
}

fn serialized_payload(payload: &AssetPayload) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(64);
    match payload {
        AssetPayload::Issue(issue) => {
            bytes.extend_from_slice(&ISSUE_TAG);
            write_name(&mut bytes, &issue.name);
            bytes.extend_from_slice(&issue.amount.to_le_bytes());
            bytes.push(issue.units);
            bytes.push(issue.reissuable as u8);
            write_optional_hash(&mut bytes, &issue.ipfs_hash);
        }
        AssetPayload::Owner(owner) => {
            bytes.extend_from_slice(&OWNER_TAG);
            write_name(&mut bytes, &owner.name);
        }
        AssetPayload::Transfer(transfer) => {
            bytes.extend_from_slice(&TRANSFER_TAG);
            write_name(&mut bytes, &transfer.name);
            bytes.extend_from_slice(&transfer.amount.to_le_bytes());
        }
        AssetPayload::Reissue(reissue) => {
            bytes.extend_from_slice(&REISSUE_TAG);
            write_name(&mut bytes, &reissue.name);
            bytes.extend_from_slice(&reissue.amount.to_le_bytes());
            match reissue.new_units {
                Some(units) => {
                    bytes.push(1);
                    bytes.push(units);
                }
                None => bytes.push(0),
            }
            match reissue.new_reissuable {
                Some(reissuable) => {
                    bytes.push(1);
                    bytes.push(reissuable as u8);
                }
                None => bytes.push(0),
            }
            write_optional_hash(&mut bytes, &reissue.new_ipfs_hash);
        }
    }
    bytes
}

/// Encodes `payload` into the output script paying `address`. Inverse of
/// [`decode_asset_script`]: decoding the returned script yields an equal
/// payload.
pub fn encode_asset_script(address: &Address, payload: &AssetPayload) -> ScriptBuilderResult<ScriptPublicKey> {
    let mut builder = ScriptBuilder::new();
    builder
        .add_ops(&[OpDup, OpHash160])?
        .add_data(address.payload())?
        .add_ops(&[OpEqualVerify, OpCheckSig])?
        .add_op(OpCorvidAsset)?
        .add_data(&serialized_payload(payload))?
        .add_op(OpDrop)?;
    Ok(ScriptPublicKey::from_vec(0, builder.drain()))
}

/// Reads one data push from the front of `body`, returning the pushed bytes
/// and whatever follows.
fn read_push(body: &[u8]) -> Result<(&[u8], &[u8]), TxScriptError> {
    let (&opcode, rest) = body.split_first().ok_or(TxScriptError::MissingAssetPayload)?;
    let (data_len, rest) = match opcode {
        1..=75 => (opcode as usize, rest),
        _ if opcode == OpPushData1 => {
            let (&len, rest) = rest.split_first().ok_or(TxScriptError::MalformedPushSize(vec![opcode]))?;
            (len as usize, rest)
        }
        _ if opcode == OpPushData2 => {
            if rest.len() < 2 {
                return Err(TxScriptError::MalformedPushSize(vec![opcode]));
            }
            (u16::from_le_bytes([rest[0], rest[1]]) as usize, &rest[2..])
        }
        _ => return Err(TxScriptError::MalformedPushSize(vec![opcode])),
    };
    if rest.len() < data_len {
        return Err(TxScriptError::MalformedPush(data_len, rest.len()));
    }
    Ok(rest.split_at(data_len))
}

/// Whether the push at the framing position opens with a recognized type
/// tag. Only the bytes after the marker slot are inspected, so a plain
/// payment whose destination hash happens to contain tag bytes stays
/// plain; a recognized tag here without the marker opcode is a tampered
/// script.
fn tag_at_framing_position(script: &[u8]) -> bool {
    if !has_pubkey_hash_prefix(script) || script.len() <= P2PKH_SCRIPT_LEN {
        return false;
    }
    let Ok((push, _)) = read_push(&script[P2PKH_SCRIPT_LEN + 1..]) else {
        return false;
    };
    push.len() >= TAG_SIZE
        && [ISSUE_TAG, OWNER_TAG, TRANSFER_TAG, REISSUE_TAG].iter().any(|tag| push[..TAG_SIZE] == *tag)
}

/// Decodes the asset payload of an output script.
///
/// `Ok(None)` means the script carries no asset and is a plain value
/// transfer. Scripts that engage the asset framing but are structurally
/// broken decode to an error, as do scripts carrying a recognized type tag
/// without the marker opcode; the validator reports both as malformed
/// asset scripts rather than silently treating them as plain.
pub fn decode_asset_script(script: &[u8]) -> Result<Option<AssetPayload>, TxScriptError> {
    let marked = has_pubkey_hash_prefix(script)
        && script.len() > P2PKH_SCRIPT_LEN
        && script[P2PKH_SCRIPT_LEN] == OpCorvidAsset;
    if !marked {
        return if tag_at_framing_position(script) { Err(TxScriptError::MissingAssetMarker) } else { Ok(None) };
    }

    let body = &script[P2PKH_SCRIPT_LEN + 1..];
    let (push, rest) = read_push(body)?;
    if rest.len() != 1 || rest[0] != OpDrop {
        return Err(TxScriptError::MissingAssetTerminator);
    }
    if push.len() < TAG_SIZE {
        return Err(TxScriptError::UnknownAssetTag(push.to_vec()));
    }
    let tag: [u8; TAG_SIZE] = push[..TAG_SIZE].try_into().expect("length checked");
    let payload = &push[TAG_SIZE..];
    let decoded = match tag {
        ISSUE_TAG => AssetPayload::Issue(decode_issue(payload)?),
        OWNER_TAG => AssetPayload::Owner(decode_owner(payload)?),
        TRANSFER_TAG => AssetPayload::Transfer(decode_transfer(payload)?),
        REISSUE_TAG => AssetPayload::Reissue(decode_reissue(payload)?),
        _ => return Err(TxScriptError::UnknownAssetTag(tag.to_vec())),
    };
    Ok(Some(decoded))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::standard::pay_to_address_script;
    use corvid_addresses::Prefix;
    use corvid_consensus_core::constants::{COIN, UNIQUE_ASSET_AMOUNT};

    fn address() -> Address {
        "n1issueAssetXXXXXXXXXXXXXXXXWdnemQ".parse().unwrap()
    }

    fn name(s: &str) -> AssetName {
        s.parse().unwrap()
    }

    fn ipfs_hash() -> IpfsHash {
        "QmWWQSuPMS6aXCbZKpEjPHPUZN2NjB3YrhJTHsV4X3vb2t".parse().unwrap()
    }

    #[test]
    fn test_payload_roundtrip() {
        let payloads = vec![
            AssetPayload::Issue(IssueAsset {
                name: name("TEST_ASSET"),
                amount: 1000 * COIN,
                units: 0,
                reissuable: true,
                ipfs_hash: None,
            }),
            AssetPayload::Issue(IssueAsset {
                name: name("RINGU#myprecious1"),
                amount: UNIQUE_ASSET_AMOUNT,
                units: 0,
                reissuable: false,
                ipfs_hash: Some(ipfs_hash()),
            }),
            AssetPayload::Owner(OwnerAsset { name: name("TEST_ASSET!") }),
            AssetPayload::Transfer(TransferAsset { name: name("TEST_ASSET"), amount: 400 * COIN }),
            AssetPayload::Transfer(TransferAsset { name: name("JAINA!"), amount: COIN }),
            AssetPayload::Reissue(ReissueAsset {
                name: name("TEST_ASSET"),
                amount: 1000 * COIN,
                new_units: None,
                new_reissuable: None,
                new_ipfs_hash: None,
            }),
            AssetPayload::Reissue(ReissueAsset {
                name: name("TEST_ASSET"),
                amount: 0,
                new_units: Some(4),
                new_reissuable: Some(false),
                new_ipfs_hash: Some(ipfs_hash()),
            }),
        ];

        for payload in payloads {
            let script = encode_asset_script(&address(), &payload).expect("payloads are bounded");
            let decoded = decode_asset_script(script.script()).expect("the encoding is canonical");
            assert_eq!(decoded, Some(payload));
        }
    }

    #[test]
    fn test_plain_scripts_decode_to_none() {
        let plain = pay_to_address_script(&address());
        assert_eq!(decode_asset_script(plain.script()), Ok(None));
        assert_eq!(decode_asset_script(&[]), Ok(None));
        // An op-return style data script without asset framing stays plain.
        assert_eq!(decode_asset_script(&[crate::opcodes::codes::OpReturn, 0x01, 0xaa]), Ok(None));

        // A destination hash that happens to contain tag bytes is still a
        // plain payment.
        let mut payload = [0u8; 20];
        payload[5..9].copy_from_slice(&TRANSFER_TAG);
        let coincidence = pay_to_address_script(&Address::new(Prefix::Testnet, payload));
        assert_eq!(decode_asset_script(coincidence.script()), Ok(None));
    }

    #[test]
    fn test_malformed_scripts_are_distinguished() {
        let transfer = AssetPayload::Transfer(TransferAsset { name: name("TEST_ASSET"), amount: 400 * COIN });
        let script = encode_asset_script(&address(), &transfer).unwrap();
        let bytes = script.script();

        // Rewriting the type tag to an unrecognized marker is malformed, not plain.
        let mut tampered = bytes.to_vec();
        let tag_at = P2PKH_SCRIPT_LEN + 2;
        tampered[tag_at..tag_at + TAG_SIZE].copy_from_slice(b"CVDT");
        assert_eq!(
            decode_asset_script(&tampered),
            Err(TxScriptError::UnknownAssetTag(b"CVDT".to_vec()))
        );

        // Truncating the payload push is malformed.
        assert!(matches!(decode_asset_script(&bytes[..bytes.len() - 8]), Err(TxScriptError::MalformedPush(..))));

        // Dropping the terminator is malformed.
        assert_eq!(decode_asset_script(&bytes[..bytes.len() - 1]), Err(TxScriptError::MissingAssetTerminator));

        // A recognized tag without the marker opcode is malformed, not plain.
        let mut unmarked = bytes.to_vec();
        unmarked[P2PKH_SCRIPT_LEN] = OpDrop;
        assert_eq!(decode_asset_script(&unmarked), Err(TxScriptError::MissingAssetMarker));

        // Trailing bytes after a complete payload are malformed.
        let mut padded = serialized_payload(&transfer);
        padded.push(0xff);
        let mut builder = ScriptBuilder::new();
        builder
            .add_ops(pay_to_address_script(&address()).script())
            .unwrap()
            .add_op(OpCorvidAsset)
            .unwrap()
            .add_data(&padded)
            .unwrap()
            .add_op(OpDrop)
            .unwrap();
        assert_eq!(decode_asset_script(&builder.drain()), Err(TxScriptError::TrailingPayloadBytes(1)));
    }

    #[test]
    fn test_payload_field_validation() {
        // A non-owner name inside an owner payload is malformed.
        let mut bytes = OWNER_TAG.to_vec();
        bytes.push(10);
        bytes.extend_from_slice(b"TEST_ASSET");
        let mut builder = ScriptBuilder::new();
        builder
            .add_ops(pay_to_address_script(&address()).script())
            .unwrap()
            .add_op(OpCorvidAsset)
            .unwrap()
            .add_data(&bytes)
            .unwrap()
            .add_op(OpDrop)
            .unwrap();
        assert_eq!(
            decode_asset_script(&builder.drain()),
            Err(TxScriptError::InvalidAssetName("TEST_ASSET".to_string()))
        );

        // Out-of-range units in an issue payload are malformed.
        let issue = IssueAsset { name: name("TEST_ASSET"), amount: COIN, units: 0, reissuable: false, ipfs_hash: None };
        let mut payload = serialized_payload(&AssetPayload::Issue(issue));
        let units_at = TAG_SIZE + 1 + "TEST_ASSET".len() + 8;
        payload[units_at] = 9;
        let mut builder = ScriptBuilder::new();
        builder
            .add_ops(pay_to_address_script(&address()).script())
            .unwrap()
            .add_op(OpCorvidAsset)
            .unwrap()
            .add_data(&payload)
            .unwrap()
            .add_op(OpDrop)
            .unwrap();
        assert_eq!(decode_asset_script(&builder.drain()), Err(TxScriptError::InvalidUnits(9)));
    }
}
