use corvid_consensus_core::asset::{AssetMetadata, AssetPayload, AssetRegistrySnapshot, AssetRegistryView};
use corvid_consensus_core::errors::params::ParameterError;
use corvid_consensus_core::errors::tx::{TxResult, TxRuleError};
use corvid_consensus_core::tx::Transaction;
use corvid_txscript::decode_asset_script;
use log::debug;

/// Folds an accepted transaction's asset operations into the registry
/// snapshot.
///
/// This is the single mutation path of the registry. The block-acceptance
/// loop calls it in confirmation order, and only for transactions that
/// [`super::AssetValidator::validate_tx_in_asset_context`] accepted against
/// a snapshot reflecting every transaction ordered before this one.
pub fn apply_accepted_transaction(registry: &mut AssetRegistrySnapshot, tx: &Transaction) -> TxResult<()> {
    for (index, output) in tx.outputs.iter().enumerate() {
        match decode_asset_script(output.script_public_key.script())
            .map_err(|err| TxRuleError::BadAssetScript(index, err))?
        {
            Some(AssetPayload::Issue(issue)) => {
                debug!("registering issued asset {} with supply {}", issue.name, issue.amount);
                registry.insert_asset(AssetMetadata::new(
                    issue.name.clone(),
                    issue.amount,
                    issue.units,
                    issue.reissuable,
                    issue.ipfs_hash,
                ));
            }
            Some(AssetPayload::Owner(owner)) => {
                registry.insert_owner_token(owner.name.root());
            }
            Some(AssetPayload::Reissue(reissue)) => {
                let mut metadata = registry.lookup(&reissue.name).ok_or_else(|| {
                    TxRuleError::ReissueRejected(ParameterError::AssetNotFound(reissue.name.to_string()))
                })?;
                metadata.total_supply = metadata
                    .total_supply
                    .checked_add(reissue.amount)
                    .ok_or_else(|| TxRuleError::AmountOverflow(reissue.name.clone()))?;
                if let Some(units) = reissue.new_units {
                    metadata.units = units;
                }
                if let Some(reissuable) = reissue.new_reissuable {
                    metadata.reissuable = reissuable;
                }
                if let Some(hash) = reissue.new_ipfs_hash {
                    metadata.ipfs_hash = Some(hash);
                }
                debug!("reissued asset {} to supply {}", metadata.name, metadata.total_supply);
                registry.insert_asset(metadata);
            }
            Some(AssetPayload::Transfer(_)) | None => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use corvid_addresses::{Address, Prefix};
    use corvid_consensus_core::asset::{AssetName, IpfsHash, IssueAsset, OwnerAsset, ReissueAsset};
    use corvid_consensus_core::constants::{COIN, OWNER_TOKEN_AMOUNT, TX_VERSION};
    use corvid_consensus_core::tx::{Transaction, TransactionOutput};
    use corvid_txscript::asset::encode_asset_script;

    fn name(s: &str) -> AssetName {
        s.parse().unwrap()
    }

    fn output(payload: &AssetPayload) -> TransactionOutput {
        let address = Address::new(Prefix::Testnet, [7; 20]);
        TransactionOutput::new(0, encode_asset_script(&address, payload).unwrap())
    }

    fn tx(outputs: Vec<TransactionOutput>) -> Transaction {
        Transaction::new(TX_VERSION, vec![], outputs, 0)
    }

    #[test]
    fn test_apply_issue_then_reissue() {
        let mut registry = AssetRegistrySnapshot::new();
        let issue = tx(vec![
            output(&AssetPayload::Issue(IssueAsset {
                name: name("TEST_ASSET"),
                amount: 1000 * COIN,
                units: 0,
                reissuable: true,
                ipfs_hash: None,
            })),
            output(&AssetPayload::Owner(OwnerAsset { name: name("TEST_ASSET!") })),
        ]);
        apply_accepted_transaction(&mut registry, &issue).unwrap();
        assert_eq!(registry.total_supply(&name("TEST_ASSET")), Some(1000 * COIN));
        assert_eq!(registry.total_supply(&name("TEST_ASSET!")), Some(OWNER_TOKEN_AMOUNT));

        let hash: IpfsHash = "QmWWQSuPMS6aXCbZKpEjPHPUZN2NjB3YrhJTHsV4X3vb2t".parse().unwrap();
        let reissue = tx(vec![output(&AssetPayload::Reissue(ReissueAsset {
            name: name("TEST_ASSET"),
            amount: 1000 * COIN,
            new_units: Some(2),
            new_reissuable: Some(false),
            new_ipfs_hash: Some(hash),
        }))]);
        apply_accepted_transaction(&mut registry, &reissue).unwrap();

        let metadata = registry.lookup(&name("TEST_ASSET")).unwrap();
        assert_eq!(metadata.total_supply, 2000 * COIN);
        assert_eq!(metadata.units, 2);
        assert!(!metadata.reissuable);
        assert_eq!(metadata.ipfs_hash, Some(hash));
    }

    #[test]
    fn test_apply_reissue_of_unknown_asset_fails() {
        let mut registry = AssetRegistrySnapshot::new();
        let reissue = tx(vec![output(&AssetPayload::Reissue(ReissueAsset {
            name: name("MISSING"),
            amount: COIN,
            new_units: None,
            new_reissuable: None,
            new_ipfs_hash: None,
        }))]);
        assert!(matches!(
            apply_accepted_transaction(&mut registry, &reissue),
            Err(TxRuleError::ReissueRejected(ParameterError::AssetNotFound(_)))
        ));
    }
}
