use crate::constants::MAX_NAME_LENGTH;
use crate::errors::params::{ParameterError, ParameterResult};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Suffix that turns a root name into its ownership-token name.
pub const OWNER_SUFFIX: char = '!';

/// Separator between a root name and a unique sub-asset tag.
pub const UNIQUE_SEPARATOR: char = '#';

/// The three name namespaces an asset can live in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssetType {
    Root,
    Owner,
    Unique,
}

static ROOT_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z0-9._]{3,30}$").expect("static pattern"));
static UNIQUE_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[-A-Za-z0-9@$%&*()\[\]{}_.?:]+$").expect("static pattern"));

/// A validated asset name. Construction through `FromStr`/`TryFrom` is the
/// only way to obtain one, so a held value is always well formed.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AssetName(String);

impl AssetName {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn asset_type(&self) -> AssetType {
        if self.0.ends_with(OWNER_SUFFIX) {
            AssetType::Owner
        } else if self.0.contains(UNIQUE_SEPARATOR) {
            AssetType::Unique
        } else {
            AssetType::Root
        }
    }

    pub fn is_owner(&self) -> bool {
        self.asset_type() == AssetType::Owner
    }

    pub fn is_unique(&self) -> bool {
        self.asset_type() == AssetType::Unique
    }

    /// The root this name belongs to: itself for root names, the stripped
    /// base for owner tokens and unique sub-assets.
    pub fn root(&self) -> AssetName {
        match self.asset_type() {
            AssetType::Root => self.clone(),
            AssetType::Owner => Self(self.0.trim_end_matches(OWNER_SUFFIX).to_string()),
            AssetType::Unique => {
                Self(self.0.split(UNIQUE_SEPARATOR).next().unwrap_or_default().to_string())
            }
        }
    }

    /// The ownership-token name paired with this name's root.
    pub fn owner_name(&self) -> AssetName {
        Self(format!("{}{}", self.root().0, OWNER_SUFFIX))
    }

    fn validate(name: &str) -> ParameterResult<()> {
        let malformed = || ParameterError::InvalidAssetName(name.to_string());
        if name.is_empty() || name.len() > MAX_NAME_LENGTH {
            return Err(malformed());
        }
        if let Some(root) = name.strip_suffix(OWNER_SUFFIX) {
            return if is_valid_root(root) { Ok(()) } else { Err(malformed()) };
        }
        if let Some((root, tag)) = name.split_once(UNIQUE_SEPARATOR) {
            return if is_valid_root(root) && !tag.is_empty() && UNIQUE_TAG.is_match(tag) {
                Ok(())
            } else {
                Err(malformed())
            };
        }
        if is_valid_root(name) {
            Ok(())
        } else {
            Err(malformed())
        }
    }
}

fn is_valid_root(name: &str) -> bool {
    ROOT_NAME.is_match(name)
        && !name.starts_with(['.', '_'])
        && !name.ends_with(['.', '_'])
        && !name.contains("..")
        && !name.contains("__")
        && !name.contains("._")
        && !name.contains("_.")
}

impl Display for AssetName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for AssetName {
    type Err = ParameterError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::validate(name)?;
        Ok(Self(name.to_string()))
    }
}

impl TryFrom<&str> for AssetName {
    type Error = ParameterError;

    fn try_from(name: &str) -> Result<Self, Self::Error> {
        name.parse()
    }
}

impl TryFrom<String> for AssetName {
    type Error = ParameterError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        Self::validate(&name)?;
        Ok(Self(name))
    }
}

impl From<AssetName> for String {
    fn from(name: AssetName) -> Self {
        name.0
    }
}
