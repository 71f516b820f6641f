mod apply;
mod classify;
mod tx_validation_in_asset_context;

pub use apply::apply_accepted_transaction;
pub use classify::{classify_inputs, classify_outputs, ClassifiedOutputs, SpentAsset};

use crate::params::Params;

/// The transaction-level asset state machine. A pure function of the
/// transaction, a UTXO snapshot and a registry snapshot: no interior
/// mutability, no I/O, safe to share across threads validating many
/// transactions against the same snapshots.
#[derive(Clone)]
pub struct AssetValidator {
    params: Params,
}

impl AssetValidator {
    pub fn new(params: Params) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &Params {
        &self.params
    }
}
