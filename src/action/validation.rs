//! Validation of resolved input before a handler runs.
//!
//! Turns the untyped `ResolvedInput` into a typed `ActionInput`, rejecting
//! values no handler can act on.

use crate::action::registry::ActionId;
use crate::action::resolve::ResolvedInput;
use crate::error::CliError;
use crate::types::{ModuleKey, ModuleType};
use std::fmt;
use std::str::FromStr;

/// Metadata keys that `update` may change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AllowedKey {
    Title,
    Description,
    Main,
}

impl AllowedKey {
    /// Prompt order when no key is given.
    pub const ALL: [AllowedKey; 3] = [AllowedKey::Title, AllowedKey::Description, AllowedKey::Main];

    pub fn as_str(self) -> &'static str {
        match self {
            AllowedKey::Title => "title",
            AllowedKey::Description => "description",
            AllowedKey::Main => "main",
        }
    }

    /// Comma-separated list of all allowed keys.
    pub fn allowed_list() -> String {
        Self::ALL
            .iter()
            .map(|k| k.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for AllowedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AllowedKey {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(AllowedKey::Title),
            "description" => Ok(AllowedKey::Description),
            "main" => Ok(AllowedKey::Main),
            _ => Err(CliError::InvalidKey {
                key: s.to_string(),
                allowed: Self::allowed_list(),
            }),
        }
    }
}

/// Validated, typed input of one action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionInput {
    Create {
        module_type: ModuleType,
    },
    Read {
        hash: ModuleKey,
        key: Option<String>,
    },
    Update {
        hash: ModuleKey,
        key: Option<AllowedKey>,
        value: Option<String>,
    },
    List {
        module_type: ModuleType,
    },
    Register {
        content: Option<ModuleKey>,
        profile: Option<ModuleKey>,
    },
}

/// Check `input` against the pre-conditions of `action`.
pub fn validate(action: ActionId, input: &ResolvedInput) -> Result<ActionInput, CliError> {
    let validated = match action {
        ActionId::Create => ActionInput::Create {
            module_type: required(input, "type")?.parse()?,
        },
        ActionId::Read => ActionInput::Read {
            hash: parse_address(required(input, "hash")?)?,
            key: input.get("key").map(str::to_string),
        },
        ActionId::Update => ActionInput::Update {
            hash: parse_address(required(input, "hash")?)?,
            key: input.get("key").map(str::parse).transpose()?,
            value: input.get("value").map(str::to_string),
        },
        ActionId::List => ActionInput::List {
            module_type: required(input, "type")?.parse()?,
        },
        ActionId::Register => ActionInput::Register {
            content: input.get("content").map(parse_address).transpose()?,
            profile: input.get("profile").map(parse_address).transpose()?,
        },
    };
    Ok(validated)
}

fn required<'a>(input: &'a ResolvedInput, name: &str) -> Result<&'a str, CliError> {
    match input.get(name) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(CliError::user(format!("Missing {}", name))),
    }
}

pub(crate) fn parse_address(value: &str) -> Result<ModuleKey, CliError> {
    value.parse().map_err(|e| CliError::user(format!("{}", e)))
}
