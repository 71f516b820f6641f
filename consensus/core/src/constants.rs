/// The fixed-point base of all ledger amounts, 8 decimal places.
pub const COIN: u64 = 100_000_000;

/// Upper bound for any single amount and for the total supply of an asset.
pub const MAX_MONEY: u64 = 21_000_000_000 * COIN;

pub const TX_VERSION: u16 = 1;

/// Maximum decimal precision an asset may declare.
pub const MAX_ASSET_UNITS: u8 = 8;

/// Maximum length of any asset name, including the `!` of an owner token.
pub const MAX_NAME_LENGTH: usize = 31;

/// An owner token is exactly one indivisible unit.
pub const OWNER_TOKEN_AMOUNT: u64 = COIN;

/// Unique sub-assets are minted with a fixed quantity of one at zero
/// decimal places and can never be reissued.
pub const UNIQUE_ASSET_AMOUNT: u64 = COIN;
pub const UNIQUE_ASSET_UNITS: u8 = 0;
