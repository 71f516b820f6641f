pub mod asset;
pub mod opcodes;
pub mod script_builder;
pub mod script_class;
pub mod standard;

pub use asset::{decode_asset_script, encode_asset_script};
pub use script_class::ScriptClass;
pub use standard::*;

/// Highest script public key version this engine understands.
pub const MAX_SCRIPT_PUBLIC_KEY_VERSION: u16 = 0;
pub const MAX_SCRIPTS_SIZE: usize = 10_000;
pub const MAX_SCRIPT_ELEMENT_SIZE: usize = 520;
