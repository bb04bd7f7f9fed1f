//! Core types for the hypergraph CLI.

use crate::error::CliError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Scheme prefix used when rendering module addresses.
pub const ADDRESS_SCHEME: &str = "dat://";

/// ModuleKey: 32-byte public address of a module
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ModuleKey(pub [u8; 32]);

impl ModuleKey {
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// `dat://<hex>` rendering of the address.
    pub fn address(&self) -> String {
        format!("{}{}", ADDRESS_SCHEME, self.to_hex())
    }
}

impl fmt::Display for ModuleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for ModuleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ModuleKey({})", self.to_hex())
    }
}

/// Parse error for module addresses
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidAddress(pub String);

impl fmt::Display for InvalidAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid module address: {} (expected 64 hex characters, optionally prefixed with {})",
            self.0, ADDRESS_SCHEME
        )
    }
}

impl std::error::Error for InvalidAddress {}

impl FromStr for ModuleKey {
    type Err = InvalidAddress;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let hex_str = trimmed.strip_prefix(ADDRESS_SCHEME).unwrap_or(trimmed);
        let bytes = hex::decode(hex_str).map_err(|_| InvalidAddress(s.to_string()))?;
        let key: [u8; 32] = bytes
            .try_into()
            .map_err(|_| InvalidAddress(s.to_string()))?;
        Ok(ModuleKey(key))
    }
}

impl TryFrom<String> for ModuleKey {
    type Error = InvalidAddress;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ModuleKey> for String {
    fn from(key: ModuleKey) -> Self {
        key.to_hex()
    }
}

/// Module kind managed by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleType {
    Content,
    Profile,
}

impl ModuleType {
    pub const ALL: [ModuleType; 2] = [ModuleType::Content, ModuleType::Profile];

    pub fn as_str(self) -> &'static str {
        match self {
            ModuleType::Content => "content",
            ModuleType::Profile => "profile",
        }
    }

    /// Label shown in the type picker
    pub fn title(self) -> &'static str {
        match self {
            ModuleType::Content => "Content",
            ModuleType::Profile => "Profile",
        }
    }
}

impl fmt::Display for ModuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModuleType {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "content" => Ok(ModuleType::Content),
            "profile" => Ok(ModuleType::Profile),
            _ => Err(CliError::user(format!(
                "Invalid type: {}. Must be content or profile",
                s
            ))),
        }
    }
}
