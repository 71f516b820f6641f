//! Construction-time parameter validation run by transaction builders
//! before signing. Best effort only: a signed transaction can be tampered
//! with afterwards, so the validator re-derives every fact from raw script
//! bytes and never trusts these checks.

use super::metadata::amount_matches_units;
use super::name::AssetType;
use super::payload::{IssueAsset, ReissueAsset, TransferAsset};
use super::registry::AssetRegistryView;
use crate::constants::{
    MAX_ASSET_UNITS, MAX_MONEY, OWNER_TOKEN_AMOUNT, UNIQUE_ASSET_AMOUNT, UNIQUE_ASSET_UNITS,
};
use crate::errors::params::{ParameterError, ParameterResult};

impl IssueAsset {
    pub fn check_parameters(&self, registry: &impl AssetRegistryView) -> ParameterResult<()> {
        self.check_formatting()?;
        if registry.asset_exists(&self.name) {
            return Err(ParameterError::AssetNameAlreadyUsed(self.name.to_string()));
        }
        Ok(())
    }

    /// The registry-independent half of the issuance checks. Re-run by the
    /// validator on payloads decoded from signed scripts.
    pub fn check_formatting(&self) -> ParameterResult<()> {
        match self.name.asset_type() {
            // Owner tokens are minted through their own script shape.
            AssetType::Owner => return Err(ParameterError::InvalidAssetName(self.name.to_string())),
            AssetType::Unique => {
                if self.amount != UNIQUE_ASSET_AMOUNT {
                    return Err(ParameterError::AmountMustBe(UNIQUE_ASSET_AMOUNT));
                }
                if self.units != UNIQUE_ASSET_UNITS {
                    return Err(ParameterError::UnitsMustBe(UNIQUE_ASSET_UNITS));
                }
                if self.reissuable {
                    return Err(ParameterError::ReissuableMustBeZero);
                }
            }
            AssetType::Root => {}
        }
        if self.amount == 0 || self.amount > MAX_MONEY {
            return Err(ParameterError::AmountOutOfRange(self.amount));
        }
        if self.units > MAX_ASSET_UNITS {
            return Err(ParameterError::UnitsOutOfRange(self.units));
        }
        if !amount_matches_units(self.amount, self.units) {
            return Err(ParameterError::AmountNotDivisible);
        }
        Ok(())
    }
}

impl TransferAsset {
    pub fn check_parameters(&self, registry: &impl AssetRegistryView) -> ParameterResult<()> {
        if self.amount == 0 || self.amount > MAX_MONEY {
            return Err(ParameterError::AmountOutOfRange(self.amount));
        }
        if self.name.is_owner() {
            if !registry.owner_token_exists(&self.name.root()) {
                return Err(ParameterError::AssetNotFound(self.name.to_string()));
            }
            if self.amount != OWNER_TOKEN_AMOUNT {
                return Err(ParameterError::AmountMustBe(OWNER_TOKEN_AMOUNT));
            }
            return Ok(());
        }
        let metadata = registry
            .lookup(&self.name)
            .ok_or_else(|| ParameterError::AssetNotFound(self.name.to_string()))?;
        if !amount_matches_units(self.amount, metadata.units) {
            return Err(ParameterError::AmountNotDivisible);
        }
        Ok(())
    }
}

impl ReissueAsset {
    pub fn check_parameters(&self, registry: &impl AssetRegistryView) -> ParameterResult<()> {
        if self.name.asset_type() != AssetType::Root {
            return Err(ParameterError::InvalidAssetName(self.name.to_string()));
        }
        let metadata = registry
            .lookup(&self.name)
            .ok_or_else(|| ParameterError::AssetNotFound(self.name.to_string()))?;
        if !metadata.reissuable {
            return Err(ParameterError::NotReissuable);
        }
        if self.amount > MAX_MONEY
            || metadata.total_supply.checked_add(self.amount).is_none_or(|total| total > MAX_MONEY)
        {
            return Err(ParameterError::SupplyOverflow);
        }
        let units = self.new_units.unwrap_or(metadata.units);
        if units > MAX_ASSET_UNITS {
            return Err(ParameterError::UnitsOutOfRange(units));
        }
        if units < metadata.units {
            return Err(ParameterError::UnitsRegression);
        }
        if !amount_matches_units(self.amount, units) {
            return Err(ParameterError::AmountNotDivisible);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::{AssetMetadata, AssetName, AssetRegistrySnapshot};
    use crate::constants::COIN;

    fn name(s: &str) -> AssetName {
        s.parse().unwrap()
    }

    fn registry_with_test_asset() -> AssetRegistrySnapshot {
        let mut registry = AssetRegistrySnapshot::new();
        registry.insert_asset(AssetMetadata::new(name("TEST_ASSET"), 1000 * COIN, 0, true, None));
        registry.insert_owner_token(name("TEST_ASSET"));
        registry
    }

    #[test]
    fn test_issue_parameters() {
        let registry = registry_with_test_asset();
        let issue = IssueAsset { name: name("NEW_ASSET"), amount: 1000 * COIN, units: 0, reissuable: true, ipfs_hash: None };
        assert_eq!(issue.check_parameters(&registry), Ok(()));

        let duplicate = IssueAsset { name: name("TEST_ASSET"), ..issue.clone() };
        let err = duplicate.check_parameters(&registry).unwrap_err();
        assert_eq!(err.to_string(), "Invalid parameter: asset_name 'TEST_ASSET' has already been used");

        let fractional = IssueAsset { amount: 1000 * COIN + 1, ..issue.clone() };
        assert_eq!(fractional.check_parameters(&registry), Err(ParameterError::AmountNotDivisible));

        let too_precise = IssueAsset { units: 9, ..issue };
        assert_eq!(too_precise.check_parameters(&registry), Err(ParameterError::UnitsOutOfRange(9)));
    }

    #[test]
    fn test_unique_issue_parameters() {
        let registry = registry_with_test_asset();
        let unique = IssueAsset {
            name: name("TEST_ASSET#gold7"),
            amount: UNIQUE_ASSET_AMOUNT,
            units: 0,
            reissuable: false,
            ipfs_hash: None,
        };
        assert_eq!(unique.check_parameters(&registry), Ok(()));

        for amount in [2 * COIN, 20 * COIN, 20000 * COIN] {
            let bad = IssueAsset { amount, ..unique.clone() };
            let err = bad.check_parameters(&registry).unwrap_err();
            assert_eq!(err.to_string(), "Invalid parameter: amount must be 100000000");
        }
        for units in 1..=MAX_ASSET_UNITS {
            let bad = IssueAsset { units, ..unique.clone() };
            let err = bad.check_parameters(&registry).unwrap_err();
            assert_eq!(err.to_string(), "Invalid parameter: units must be 0");
        }
        let bad = IssueAsset { reissuable: true, ..unique };
        assert_eq!(bad.check_parameters(&registry).unwrap_err().to_string(), "Invalid parameter: reissuable must be 0");
    }

    #[test]
    fn test_transfer_parameters() {
        let registry = registry_with_test_asset();
        let transfer = TransferAsset { name: name("TEST_ASSET"), amount: 400 * COIN };
        assert_eq!(transfer.check_parameters(&registry), Ok(()));

        let fractional = TransferAsset { amount: 400 * COIN + 1, ..transfer };
        assert_eq!(fractional.check_parameters(&registry), Err(ParameterError::AmountNotDivisible));

        let unknown = TransferAsset { name: name("ASSET_DOES_NOT_EXIST"), amount: COIN };
        assert!(matches!(unknown.check_parameters(&registry), Err(ParameterError::AssetNotFound(_))));

        let owner = TransferAsset { name: name("TEST_ASSET!"), amount: OWNER_TOKEN_AMOUNT };
        assert_eq!(owner.check_parameters(&registry), Ok(()));
        let owner_split = TransferAsset { name: name("TEST_ASSET!"), amount: OWNER_TOKEN_AMOUNT / 2 };
        assert!(owner_split.check_parameters(&registry).is_err());
    }

    #[test]
    fn test_reissue_parameters() {
        let mut registry = registry_with_test_asset();
        let reissue = ReissueAsset {
            name: name("TEST_ASSET"),
            amount: 1000 * COIN,
            new_units: None,
            new_reissuable: None,
            new_ipfs_hash: None,
        };
        assert_eq!(reissue.check_parameters(&registry), Ok(()));

        // Raising precision is allowed, lowering it is not.
        let raise = ReissueAsset { new_units: Some(2), ..reissue.clone() };
        assert_eq!(raise.check_parameters(&registry), Ok(()));
        registry.insert_asset(AssetMetadata::new(name("PRECISE"), 1000 * COIN, 4, true, None));
        let lower = ReissueAsset { name: name("PRECISE"), new_units: Some(2), ..reissue.clone() };
        assert_eq!(lower.check_parameters(&registry), Err(ParameterError::UnitsRegression));

        registry.insert_asset(AssetMetadata::new(name("LOCKED"), 1000 * COIN, 0, false, None));
        let locked = ReissueAsset { name: name("LOCKED"), ..reissue.clone() };
        assert_eq!(locked.check_parameters(&registry), Err(ParameterError::NotReissuable));

        let overflow = ReissueAsset { amount: MAX_MONEY, ..reissue };
        assert_eq!(overflow.check_parameters(&registry), Err(ParameterError::SupplyOverflow));
    }
}
