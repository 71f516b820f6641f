use corvid_addresses::{Prefix, PAYLOAD_SIZE};
use corvid_consensus_core::constants::COIN;
use corvid_consensus_core::tx::ScriptPublicKey;
use corvid_txscript::standard::pay_to_pubkey_hash;

/// The three issuance-class operations that owe a mandated burn payment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssetIssuanceKind {
    Issue,
    Reissue,
    IssueUnique,
}

/// A fixed, well-known burn destination and the amount it must be paid per
/// operation. The payload duplicates the hash the address encodes so that
/// consensus code never has to parse a Base58 string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BurnSpec {
    pub address: &'static str,
    pub payload: [u8; PAYLOAD_SIZE],
    pub amount: u64,
}

#[derive(Clone, Debug)]
pub struct Params {
    pub prefix: Prefix,
    pub issue_burn: BurnSpec,
    pub reissue_burn: BurnSpec,
    pub issue_unique_burn: BurnSpec,
}

impl Params {
    /// The burn policy entry for an operation kind.
    pub fn burn_payment(&self, kind: AssetIssuanceKind) -> &BurnSpec {
        match kind {
            AssetIssuanceKind::Issue => &self.issue_burn,
            AssetIssuanceKind::Reissue => &self.reissue_burn,
            AssetIssuanceKind::IssueUnique => &self.issue_unique_burn,
        }
    }

    /// The exact script a mandated burn payment must carry.
    pub fn burn_script(&self, kind: AssetIssuanceKind) -> ScriptPublicKey {
        ScriptPublicKey::new(0, pay_to_pubkey_hash(&self.burn_payment(kind).payload))
    }
}

pub const MAINNET_PARAMS: Params = Params {
    prefix: Prefix::Mainnet,
    issue_burn: BurnSpec {
        address: "CXRiSKK6tSzR9Pr9kpCh98st81NqTMhfXr",
        payload: [
            0xa4, 0x20, 0x98, 0x98, 0x75, 0x83, 0xc5, 0xea, 0x68, 0xa7, 0xbf, 0x31, 0x9c, 0x8f,
            0x8c, 0x14, 0xae, 0xb6, 0x4d, 0x3e,
        ],
        amount: 500 * COIN,
    },
    reissue_burn: BurnSpec {
        address: "CQNbDNP5egoGEViYcMXymmNa7ZKkGrezSQ",
        payload: [
            0x56, 0xc0, 0x70, 0x24, 0xa7, 0xfc, 0x0a, 0x85, 0x71, 0xaa, 0x03, 0xc1, 0x03, 0xce,
            0xc7, 0xdc, 0x0c, 0x4a, 0xda, 0x72,
        ],
        amount: 100 * COIN,
    },
    issue_unique_burn: BurnSpec {
        address: "CS4ijsVHJH32bj72GMVPViXjB867Yjrdbd",
        payload: [
            0x69, 0x4f, 0x7c, 0x0f, 0xb1, 0xf4, 0xfe, 0xf3, 0x64, 0x46, 0x8b, 0x59, 0x63, 0xbc,
            0x75, 0x88, 0xfb, 0xa7, 0x46, 0x0a,
        ],
        amount: 5 * COIN,
    },
};

pub const TESTNET_PARAMS: Params = Params {
    prefix: Prefix::Testnet,
    issue_burn: BurnSpec {
        address: "n1issueAssetXXXXXXXXXXXXXXXXWdnemQ",
        payload: [
            0xdd, 0xa3, 0xd2, 0x17, 0x97, 0xff, 0x26, 0xcb, 0x8a, 0xe9, 0xa7, 0x69, 0xbd, 0xc6,
            0x8c, 0xf4, 0x56, 0x7f, 0x5b, 0xba,
        ],
        amount: 500 * COIN,
    },
    reissue_burn: BurnSpec {
        address: "n1ReissueAssetXXXXXXXXXXXXXXWG9NLd",
        payload: [
            0xda, 0x61, 0xc4, 0x7a, 0xdb, 0xad, 0x4a, 0x81, 0xe5, 0xf1, 0x4e, 0x1f, 0xab, 0xb3,
            0xd1, 0x67, 0xa5, 0x1c, 0xa4, 0x48,
        ],
        amount: 100 * COIN,
    },
    issue_unique_burn: BurnSpec {
        address: "n1issueUniqueAssetXXXXXXXXXXS4695i",
        payload: [
            0xdd, 0xa3, 0xd2, 0x17, 0xae, 0x29, 0xb7, 0x3b, 0xa1, 0x3d, 0x29, 0x14, 0x29, 0xca,
            0xd4, 0x3c, 0xd1, 0x22, 0x75, 0x62,
        ],
        amount: 5 * COIN,
    },
};
