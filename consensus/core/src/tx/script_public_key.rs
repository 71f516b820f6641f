use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt::Formatter;

/// Size of the underlying script vector of a script, optimized for the
/// common asset-tagged p2pkh size without spilling to the heap for plain
/// payment scripts.
pub const SCRIPT_VECTOR_SIZE: usize = 36;

/// Used as the underlying type for script public key data.
pub type ScriptVec = SmallVec<[u8; SCRIPT_VECTOR_SIZE]>;

/// Represents the ScriptPublicKey Version.
pub type ScriptPublicKeyVersion = u16;

/// Alias the `smallvec!` macro to ease maintenance.
pub use smallvec::smallvec as scriptvec;

/// Represents a Corvid ScriptPublicKey.
#[derive(Default, PartialEq, Eq, Clone, Hash, Serialize, Deserialize)]
pub struct ScriptPublicKey {
    pub version: ScriptPublicKeyVersion,
    pub(super) script: ScriptVec, // Kept private to preserve read-only semantics
}

impl ScriptPublicKey {
    pub fn new(version: ScriptPublicKeyVersion, script: ScriptVec) -> Self {
        Self { version, script }
    }

    pub fn from_vec(version: ScriptPublicKeyVersion, script: Vec<u8>) -> Self {
        Self { version, script: ScriptVec::from_vec(script) }
    }

    pub fn version(&self) -> ScriptPublicKeyVersion {
        self.version
    }

    pub fn script(&self) -> &[u8] {
        &self.script
    }
}

impl std::fmt::Debug for ScriptPublicKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut hex = vec![0u8; self.script.len() * 2];
        faster_hex::hex_encode(&self.script, &mut hex).map_err(|_| std::fmt::Error)?;
        f.debug_struct("ScriptPublicKey")
            .field("version", &self.version)
            .field("script", &String::from_utf8_lossy(&hex))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spk_construction() {
        let spk = ScriptPublicKey::from_vec(0, vec![0x76, 0xa9]);
        assert_eq!(spk.version(), 0);
        assert_eq!(spk.script(), &[0x76, 0xa9]);
        assert_eq!(spk, ScriptPublicKey::new(0, scriptvec![0x76, 0xa9]));
    }
}
