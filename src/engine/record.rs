//! Module metadata records exchanged with the engine.

use crate::types::{ModuleKey, ModuleType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// License attached to published content
pub const DEFAULT_LICENSE: &str = "https://creativecommons.org/licenses/by/4.0/";
pub const DEFAULT_LICENSE_NAME: &str = "CC-BY-4.0";

/// ModuleRecord: metadata of one content or profile module
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleRecord {
    pub url: ModuleKey,
    #[serde(rename = "type")]
    pub module_type: ModuleType,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Entry file of the module
    #[serde(default)]
    pub main: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    #[serde(default)]
    pub authors: Vec<ModuleKey>,
    #[serde(default)]
    pub parents: Vec<ModuleKey>,
    /// Registered content (profiles only)
    #[serde(default)]
    pub contents: Vec<ModuleKey>,
    pub created: DateTime<Utc>,
}

/// Parameters for creating a new module.
#[derive(Debug, Clone, PartialEq)]
pub struct InitRequest {
    pub module_type: ModuleType,
    pub title: String,
    pub description: String,
    pub subtype: Option<String>,
    pub authors: Vec<ModuleKey>,
    pub parents: Vec<ModuleKey>,
}

impl InitRequest {
    pub fn new(module_type: ModuleType, title: String, description: String) -> Self {
        Self {
            module_type,
            title,
            description,
            subtype: None,
            authors: Vec::new(),
            parents: Vec::new(),
        }
    }
}

impl ModuleRecord {
    /// Build the record an engine stores for `request` at `url`.
    pub fn from_request(url: ModuleKey, request: InitRequest, created: DateTime<Utc>) -> Self {
        let license = match request.module_type {
            ModuleType::Content => Some(DEFAULT_LICENSE.to_string()),
            ModuleType::Profile => None,
        };
        Self {
            url,
            module_type: request.module_type,
            title: request.title,
            description: request.description,
            main: String::new(),
            subtype: request.subtype,
            license,
            authors: request.authors,
            parents: request.parents,
            contents: Vec::new(),
            created,
        }
    }
}
