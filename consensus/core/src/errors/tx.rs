use crate::asset::AssetName;
use crate::errors::params::ParameterError;
use crate::tx::TransactionOutpoint;
use corvid_txscript_errors::TxScriptError;
use thiserror::Error;

/// Asset-layer transaction rule violations. A rejected transaction is
/// permanently invalid for its exact payload; Display output is the reject
/// string surfaced to operators, while [`TxRuleError::code`] gives the
/// stable identifier shared by all variants of one rejection class. The
/// base script layer reports through its own namespace
/// (`mandatory-script-verify-flag-failed`), never through this enum.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TxRuleError {
    #[error("bad-txns-bad-asset-script")]
    BadAssetScript(usize, #[source] TxScriptError),

    #[error("bad-txns-bad-asset-transaction")]
    BadAssetTransaction,

    #[error("bad-txns-failed-issue-asset-formatting-check")]
    FailedIssueFormattingCheck,

    #[error("bad-txns-issue-owner-name-doesn't-match")]
    IssueOwnerNameMismatch,

    #[error("bad-txns-issue-{0}")]
    IssueRejected(ParameterError),

    #[error("bad-txns-issue-asset-burn-outpoints-not-found")]
    IssueBurnNotFound,

    #[error("bad-txns-issue-unique-asset-missing-owner-asset")]
    UniqueIssueMissingOwnerToken,

    #[error("bad-txns-issue-unique-asset-burn-outpoints-not-found")]
    UniqueIssueBurnNotFound,

    #[error("bad-txns-reissue-{0}")]
    ReissueRejected(ParameterError),

    #[error("bad-txns-reissue-owner-outpoint-not-found")]
    ReissueOwnerNotFound,

    #[error("bad-txns-reissue-asset-burn-outpoints-not-found")]
    ReissueBurnNotFound,

    #[error("bad-txns-transfer-asset-not-exist")]
    TransferAssetNotFound(AssetName),

    #[error("bad-txns-transfer-asset-amount-not-match-units")]
    AmountNotMatchUnits(AssetName),

    #[error("bad-tx-inputs-outputs-mismatch Bad Transaction - Trying to create outpoint for asset that you don't have: {0}")]
    UnownedAssetOutput(AssetName),

    #[error("bad-tx-inputs-outputs-mismatch Bad Transaction - Assets would be burnt {0}")]
    AssetsWouldBeBurnt(AssetName),

    #[error("bad-tx-asset-inputs-size-does-not-match-outputs-size")]
    AssetInputsOutputsSizeMismatch,

    #[error("bad-txns-asset-amount-overflow")]
    AmountOverflow(AssetName),

    #[error("missing-tx-outpoints: input {0} spends unknown outpoint {1}")]
    MissingTxOutpoints(usize, TransactionOutpoint),
}

impl TxRuleError {
    /// The fixed identifier of this rejection class, without any dynamic
    /// detail.
    pub fn code(&self) -> &'static str {
        match self {
            TxRuleError::BadAssetScript(..) => "bad-txns-bad-asset-script",
            TxRuleError::BadAssetTransaction => "bad-txns-bad-asset-transaction",
            TxRuleError::FailedIssueFormattingCheck => "bad-txns-failed-issue-asset-formatting-check",
            TxRuleError::IssueOwnerNameMismatch => "bad-txns-issue-owner-name-doesn't-match",
            TxRuleError::IssueRejected(_) => "bad-txns-issue",
            TxRuleError::IssueBurnNotFound => "bad-txns-issue-asset-burn-outpoints-not-found",
            TxRuleError::UniqueIssueMissingOwnerToken => "bad-txns-issue-unique-asset-missing-owner-asset",
            TxRuleError::UniqueIssueBurnNotFound => "bad-txns-issue-unique-asset-burn-outpoints-not-found",
            TxRuleError::ReissueRejected(_) => "bad-txns-reissue",
            TxRuleError::ReissueOwnerNotFound => "bad-txns-reissue-owner-outpoint-not-found",
            TxRuleError::ReissueBurnNotFound => "bad-txns-reissue-asset-burn-outpoints-not-found",
            TxRuleError::TransferAssetNotFound(_) => "bad-txns-transfer-asset-not-exist",
            TxRuleError::AmountNotMatchUnits(_) => "bad-txns-transfer-asset-amount-not-match-units",
            TxRuleError::UnownedAssetOutput(_) | TxRuleError::AssetsWouldBeBurnt(_) => "bad-tx-inputs-outputs-mismatch",
            TxRuleError::AssetInputsOutputsSizeMismatch => "bad-tx-asset-inputs-size-does-not-match-outputs-size",
            TxRuleError::AmountOverflow(_) => "bad-txns-asset-amount-overflow",
            TxRuleError::MissingTxOutpoints(..) => "missing-tx-outpoints",
        }
    }
}

pub type TxResult<T> = std::result::Result<T, TxRuleError>;
