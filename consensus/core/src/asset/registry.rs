use super::metadata::AssetMetadata;
use super::name::AssetName;
use crate::constants::OWNER_TOKEN_AMOUNT;
use std::collections::{HashMap, HashSet};

/// Read interface over already-confirmed asset state. Validation only ever
/// reads through this trait; the authoritative registry applies mutations
/// after a transaction is accepted into confirmed state.
pub trait AssetRegistryView {
    fn lookup(&self, name: &AssetName) -> Option<AssetMetadata>;

    fn owner_token_exists(&self, root: &AssetName) -> bool;

    /// Whether `name` is known, routing owner-token names through the
    /// owner index.
    fn asset_exists(&self, name: &AssetName) -> bool {
        if name.is_owner() {
            self.owner_token_exists(&name.root())
        } else {
            self.lookup(name).is_some()
        }
    }
}

/// In-memory registry snapshot. A validation call borrows it immutably, so
/// any number of transactions can be validated concurrently against the
/// same snapshot; the block-acceptance loop owns the single mutation path.
#[derive(Clone, Debug, Default)]
pub struct AssetRegistrySnapshot {
    assets: HashMap<AssetName, AssetMetadata>,
    owners: HashSet<AssetName>,
}

impl AssetRegistrySnapshot {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn insert_asset(&mut self, metadata: AssetMetadata) {
        self.assets.insert(metadata.name.clone(), metadata);
    }

    pub fn insert_owner_token(&mut self, root: AssetName) {
        self.owners.insert(root);
    }

    /// Confirmed supply of `name` in the fixed-point base; owner tokens
    /// report their single indivisible unit.
    pub fn total_supply(&self, name: &AssetName) -> Option<u64> {
        if name.is_owner() {
            self.owner_token_exists(&name.root()).then_some(OWNER_TOKEN_AMOUNT)
        } else {
            self.assets.get(name).map(|metadata| metadata.total_supply)
        }
    }
}

impl AssetRegistryView for AssetRegistrySnapshot {
    fn lookup(&self, name: &AssetName) -> Option<AssetMetadata> {
        self.assets.get(name).cloned()
    }

    fn owner_token_exists(&self, root: &AssetName) -> bool {
        self.owners.contains(root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::COIN;

    #[test]
    fn test_snapshot_reads() {
        let name: AssetName = "TEST_ASSET".parse().unwrap();
        let owner = name.owner_name();
        let mut registry = AssetRegistrySnapshot::new();
        assert!(!registry.asset_exists(&name));
        assert!(!registry.asset_exists(&owner));

        registry.insert_asset(AssetMetadata::new(name.clone(), 1000 * COIN, 0, true, None));
        registry.insert_owner_token(name.clone());

        assert!(registry.asset_exists(&name));
        assert!(registry.asset_exists(&owner));
        assert_eq!(registry.total_supply(&name), Some(1000 * COIN));
        assert_eq!(registry.total_supply(&owner), Some(OWNER_TOKEN_AMOUNT));
        assert_eq!(registry.lookup(&owner), None);
    }
}
