use corvid_consensus_core::asset::{AssetName, AssetPayload, IssueAsset, OwnerAsset, ReissueAsset, TransferAsset};
use corvid_consensus_core::constants::OWNER_TOKEN_AMOUNT;
use corvid_consensus_core::errors::tx::{TxResult, TxRuleError};
use corvid_consensus_core::tx::Transaction;
use corvid_consensus_core::utxo::UtxoView;
use corvid_txscript::decode_asset_script;

/// The asset a resolved input is spending, re-derived from the script the
/// outpoint originally carried. Whatever the script declares is the
/// outpoint's entire asset balance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpentAsset {
    pub name: AssetName,
    pub amount: u64,
}

/// A transaction's outputs bucketed by decoded asset operation, with the
/// output index kept so checks can point at the offending position.
#[derive(Clone, Debug, Default)]
pub struct ClassifiedOutputs {
    pub issues: Vec<(usize, IssueAsset)>,
    pub owners: Vec<(usize, OwnerAsset)>,
    pub transfers: Vec<(usize, TransferAsset)>,
    pub reissues: Vec<(usize, ReissueAsset)>,
}

impl ClassifiedOutputs {
    pub fn has_asset_operations(&self) -> bool {
        !(self.issues.is_empty() && self.owners.is_empty() && self.transfers.is_empty() && self.reissues.is_empty())
    }
}

/// Decodes and buckets every output. Total and deterministic: each output
/// is either plain or exactly one asset operation, and malformed framing
/// fails the whole transaction.
pub fn classify_outputs(tx: &Transaction) -> TxResult<ClassifiedOutputs> {
    let mut outputs = ClassifiedOutputs::default();
    for (index, output) in tx.outputs.iter().enumerate() {
        match decode_asset_script(output.script_public_key.script())
            .map_err(|err| TxRuleError::BadAssetScript(index, err))?
        {
            Some(AssetPayload::Issue(issue)) => outputs.issues.push((index, issue)),
            Some(AssetPayload::Owner(owner)) => outputs.owners.push((index, owner)),
            Some(AssetPayload::Transfer(transfer)) => outputs.transfers.push((index, transfer)),
            Some(AssetPayload::Reissue(reissue)) => outputs.reissues.push((index, reissue)),
            None => {}
        }
    }
    Ok(outputs)
}

/// Resolves every input through the UTXO view and re-runs the codec on the
/// script it spends. `None` entries are plain value inputs.
pub fn classify_inputs(tx: &Transaction, utxo_view: &impl UtxoView) -> TxResult<Vec<Option<SpentAsset>>> {
    tx.inputs
        .iter()
        .enumerate()
        .map(|(index, input)| {
            let entry = utxo_view
                .get(&input.previous_outpoint)
                .ok_or(TxRuleError::MissingTxOutpoints(index, input.previous_outpoint))?;
            let payload = decode_asset_script(entry.script_public_key.script())
                .map_err(|err| TxRuleError::BadAssetScript(index, err))?;
            Ok(payload.map(|payload| match payload {
                AssetPayload::Issue(issue) => SpentAsset { name: issue.name, amount: issue.amount },
                AssetPayload::Owner(owner) => SpentAsset { name: owner.name, amount: OWNER_TOKEN_AMOUNT },
                AssetPayload::Transfer(transfer) => SpentAsset { name: transfer.name, amount: transfer.amount },
                AssetPayload::Reissue(reissue) => SpentAsset { name: reissue.name, amount: reissue.amount },
            }))
        })
        .collect()
}
