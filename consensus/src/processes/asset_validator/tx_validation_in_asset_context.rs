use super::classify::{classify_inputs, classify_outputs, ClassifiedOutputs, SpentAsset};
use super::AssetValidator;
use crate::params::AssetIssuanceKind;
use corvid_consensus_core::asset::{amount_matches_units, AssetName, AssetRegistryView};
use corvid_consensus_core::constants::{UNIQUE_ASSET_AMOUNT, UNIQUE_ASSET_UNITS};
use corvid_consensus_core::errors::params::ParameterError;
use corvid_consensus_core::errors::tx::{TxResult, TxRuleError};
use corvid_consensus_core::tx::Transaction;
use corvid_consensus_core::utxo::UtxoView;
use log::{debug, trace};
use std::collections::BTreeMap;

impl AssetValidator {
    /// Validates the asset semantics of `tx` against immutable snapshots of
    /// the UTXO set and the asset registry.
    ///
    /// Pure and synchronous; the caller sequences transactions and folds
    /// accepted ones into the registry. Checks run in a fixed order so a
    /// given malformed transaction always surfaces the same rejection, and
    /// every transaction terminates in exactly one accept or reject.
    pub fn validate_tx_in_asset_context(
        &self,
        tx: &Transaction,
        utxo_view: &impl UtxoView,
        registry: &impl AssetRegistryView,
    ) -> TxResult<()> {
        self.validate_asset_rules(tx, utxo_view, registry)
            .inspect_err(|err| debug!("rejecting transaction: {err}"))
    }

    fn validate_asset_rules(
        &self,
        tx: &Transaction,
        utxo_view: &impl UtxoView,
        registry: &impl AssetRegistryView,
    ) -> TxResult<()> {
        let outputs = classify_outputs(tx)?;
        let inputs = classify_inputs(tx, utxo_view)?;
        if outputs.has_asset_operations() || inputs.iter().any(Option::is_some) {
            trace!(
                "validating transaction with {} asset inputs and {} tagged outputs",
                inputs.iter().flatten().count(),
                outputs.issues.len() + outputs.owners.len() + outputs.transfers.len() + outputs.reissues.len()
            );
        }
        self.check_issuance_shape(&outputs)?;
        self.check_issuance_parameters(&outputs, registry)?;
        self.check_issuance_burn(tx, &outputs)?;
        self.check_unique_issuance(tx, &outputs, &inputs)?;
        self.check_reissuance(tx, &outputs, registry)?;
        self.check_transfer_assets_exist(&outputs, registry)?;
        self.check_amounts_match_units(&outputs, registry)?;
        self.check_asset_conservation(&outputs, &inputs)?;
        self.check_inputs_have_outputs(&outputs, &inputs)
    }

    // Exactly one issue and exactly one owner mint pair up for a new root
    // asset. Unique issues ride on the root's existing owner token and mint
    // no owner of their own.
    fn check_issuance_shape(&self, outputs: &ClassifiedOutputs) -> TxResult<()> {
        let root_issues: Vec<_> = outputs.issues.iter().filter(|(_, issue)| !issue.name.is_unique()).collect();
        match (root_issues.as_slice(), outputs.owners.as_slice()) {
            ([], []) => Ok(()),
            ([], [_, ..]) => Err(TxRuleError::BadAssetTransaction),
            ([_], []) => Err(TxRuleError::BadAssetTransaction),
            ([(_, issue)], [(_, owner)]) => {
                if owner.name != issue.name.owner_name() {
                    return Err(TxRuleError::IssueOwnerNameMismatch);
                }
                Ok(())
            }
            _ => Err(TxRuleError::FailedIssueFormattingCheck),
        }
    }

    // Re-derives the construction-time parameter rules from the signed
    // scripts: unique-asset shape and name uniqueness against the registry.
    // The registry's own explanation is embedded in the rejection verbatim.
    fn check_issuance_parameters(&self, outputs: &ClassifiedOutputs, registry: &impl AssetRegistryView) -> TxResult<()> {
        for (_, issue) in &outputs.issues {
            if issue.name.is_unique() {
                if issue.amount != UNIQUE_ASSET_AMOUNT {
                    return Err(TxRuleError::IssueRejected(ParameterError::AmountMustBe(UNIQUE_ASSET_AMOUNT)));
                }
                if issue.units != UNIQUE_ASSET_UNITS {
                    return Err(TxRuleError::IssueRejected(ParameterError::UnitsMustBe(UNIQUE_ASSET_UNITS)));
                }
                if issue.reissuable {
                    return Err(TxRuleError::IssueRejected(ParameterError::ReissuableMustBeZero));
                }
            }
            if registry.asset_exists(&issue.name) {
                return Err(TxRuleError::IssueRejected(ParameterError::AssetNameAlreadyUsed(
                    issue.name.to_string(),
                )));
            }
        }
        Ok(())
    }

    fn check_issuance_burn(&self, tx: &Transaction, outputs: &ClassifiedOutputs) -> TxResult<()> {
        if outputs.issues.iter().any(|(_, issue)| !issue.name.is_unique())
            && !self.has_burn_payment(tx, AssetIssuanceKind::Issue, 1)
        {
            return Err(TxRuleError::IssueBurnNotFound);
        }
        Ok(())
    }

    fn check_unique_issuance(
        &self,
        tx: &Transaction,
        outputs: &ClassifiedOutputs,
        inputs: &[Option<SpentAsset>],
    ) -> TxResult<()> {
        let unique_count = outputs.issues.iter().filter(|(_, issue)| issue.name.is_unique()).count() as u64;
        if unique_count == 0 {
            return Ok(());
        }
        // Minting a sub-asset requires presenting the root's owner token.
        for (_, issue) in outputs.issues.iter().filter(|(_, issue)| issue.name.is_unique()) {
            let owner = issue.name.owner_name();
            if !inputs.iter().flatten().any(|spent| spent.name == owner) {
                return Err(TxRuleError::UniqueIssueMissingOwnerToken);
            }
        }
        if !self.has_burn_payment(tx, AssetIssuanceKind::IssueUnique, unique_count) {
            return Err(TxRuleError::UniqueIssueBurnNotFound);
        }
        Ok(())
    }

    // A reissue needs the asset to be live and reissuable in the registry,
    // and the owner token it consumed must come back as a transfer output.
    // An owner token that never entered the transaction is caught by the
    // conservation pass instead.
    fn check_reissuance(
        &self,
        tx: &Transaction,
        outputs: &ClassifiedOutputs,
        registry: &impl AssetRegistryView,
    ) -> TxResult<()> {
        if outputs.reissues.is_empty() {
            return Ok(());
        }
        for (_, reissue) in &outputs.reissues {
            reissue.check_parameters(registry).map_err(TxRuleError::ReissueRejected)?;
            let owner = reissue.name.owner_name();
            if !outputs.transfers.iter().any(|(_, transfer)| transfer.name == owner) {
                return Err(TxRuleError::ReissueOwnerNotFound);
            }
        }
        if !self.has_burn_payment(tx, AssetIssuanceKind::Reissue, 1) {
            return Err(TxRuleError::ReissueBurnNotFound);
        }
        Ok(())
    }

    fn check_transfer_assets_exist(&self, outputs: &ClassifiedOutputs, registry: &impl AssetRegistryView) -> TxResult<()> {
        for (_, transfer) in &outputs.transfers {
            if !registry.asset_exists(&transfer.name) {
                return Err(TxRuleError::TransferAssetNotFound(transfer.name.clone()));
            }
        }
        Ok(())
    }

    // Every moved or minted amount must be an integer multiple of the
    // smallest unit its asset's precision allows. Owner tokens have zero
    // decimal places by construction.
    fn check_amounts_match_units(&self, outputs: &ClassifiedOutputs, registry: &impl AssetRegistryView) -> TxResult<()> {
        for (_, issue) in &outputs.issues {
            if !amount_matches_units(issue.amount, issue.units) {
                return Err(TxRuleError::AmountNotMatchUnits(issue.name.clone()));
            }
        }
        for (_, transfer) in &outputs.transfers {
            let units = match registry.lookup(&transfer.name) {
                _ if transfer.name.is_owner() => 0,
                Some(metadata) => metadata.units,
                None => continue, // nonexistence is reported by the preceding check
            };
            if !amount_matches_units(transfer.amount, units) {
                return Err(TxRuleError::AmountNotMatchUnits(transfer.name.clone()));
            }
        }
        for (_, reissue) in &outputs.reissues {
            let units = match (reissue.new_units, registry.lookup(&reissue.name)) {
                (Some(units), _) => units,
                (None, Some(metadata)) => metadata.units,
                (None, None) => continue,
            };
            if !amount_matches_units(reissue.amount, units) {
                return Err(TxRuleError::AmountNotMatchUnits(reissue.name.clone()));
            }
        }
        Ok(())
    }

    // Issue and reissue outputs mint their amounts for free; every
    // transferred amount must balance per asset name, in both directions.
    fn check_asset_conservation(&self, outputs: &ClassifiedOutputs, inputs: &[Option<SpentAsset>]) -> TxResult<()> {
        let mut input_totals: BTreeMap<&AssetName, u64> = BTreeMap::new();
        for spent in inputs.iter().flatten() {
            let total = input_totals.entry(&spent.name).or_default();
            *total = total.checked_add(spent.amount).ok_or_else(|| TxRuleError::AmountOverflow(spent.name.clone()))?;
        }
        let mut output_totals: BTreeMap<&AssetName, u64> = BTreeMap::new();
        for (_, transfer) in &outputs.transfers {
            let total = output_totals.entry(&transfer.name).or_default();
            *total =
                total.checked_add(transfer.amount).ok_or_else(|| TxRuleError::AmountOverflow(transfer.name.clone()))?;
        }
        for (name, out_total) in &output_totals {
            match input_totals.get(name) {
                None => return Err(TxRuleError::UnownedAssetOutput((*name).clone())),
                Some(in_total) if in_total != out_total => {
                    return Err(TxRuleError::AssetsWouldBeBurnt((*name).clone()))
                }
                Some(_) => {}
            }
        }
        Ok(())
    }

    // An asset consumed by the inputs must survive into at least one
    // matching output; silently dropping it would burn the whole outpoint.
    fn check_inputs_have_outputs(&self, outputs: &ClassifiedOutputs, inputs: &[Option<SpentAsset>]) -> TxResult<()> {
        for spent in inputs.iter().flatten() {
            if !outputs.transfers.iter().any(|(_, transfer)| transfer.name == spent.name) {
                return Err(TxRuleError::AssetInputsOutputsSizeMismatch);
            }
        }
        Ok(())
    }

    /// Whether the transaction carries a literal output paying exactly the
    /// mandated amount to the fixed burn destination for `kind`.
    fn has_burn_payment(&self, tx: &Transaction, kind: AssetIssuanceKind, count: u64) -> bool {
        let required = self.params().burn_payment(kind).amount.saturating_mul(count);
        let script = self.params().burn_script(kind);
        tx.outputs.iter().any(|output| output.value == required && output.script_public_key == script)
    }
}
