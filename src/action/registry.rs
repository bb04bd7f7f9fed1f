//! Action registry: static table of actions and their declared parameters.
//!
//! The table is pure data. Handlers are reached through an exhaustive match on
//! `ActionId` in the dispatcher, so the only place an unknown action can occur
//! is `ActionId::parse` on raw user input.

use crate::error::CliError;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionId {
    Create,
    Read,
    Update,
    List,
    Register,
}

/// Interactive source for a parameter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolverId {
    /// Pick content or profile
    ModuleType,
    /// Enter any module address
    ModuleHash,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Parameter {
    pub name: &'static str,
    /// Without a resolver a missing value stays absent.
    pub resolver: Option<ResolverId>,
}

impl Parameter {
    const fn prompted(name: &'static str, resolver: ResolverId) -> Self {
        Self {
            name,
            resolver: Some(resolver),
        }
    }

    const fn optional(name: &'static str) -> Self {
        Self {
            name,
            resolver: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Action {
    pub id: ActionId,
    pub name: &'static str,
    /// Presentation only; never matched against input
    pub title: &'static str,
    pub parameters: &'static [Parameter],
}

static CREATE: Action = Action {
    id: ActionId::Create,
    name: "create",
    title: "Create a module",
    parameters: &[Parameter::prompted("type", ResolverId::ModuleType)],
};

static READ: Action = Action {
    id: ActionId::Read,
    name: "read",
    title: "Read metadata",
    parameters: &[
        Parameter::prompted("hash", ResolverId::ModuleHash),
        Parameter::optional("key"),
    ],
};

static UPDATE: Action = Action {
    id: ActionId::Update,
    name: "update",
    title: "Update metadata",
    parameters: &[
        Parameter::prompted("hash", ResolverId::ModuleHash),
        Parameter::optional("key"),
        Parameter::optional("value"),
    ],
};

static LIST: Action = Action {
    id: ActionId::List,
    name: "list",
    title: "List modules",
    parameters: &[Parameter::prompted("type", ResolverId::ModuleType)],
};

static REGISTER: Action = Action {
    id: ActionId::Register,
    name: "register",
    title: "Register content to your profile",
    parameters: &[
        // Picked among existing content by the handler
        Parameter::optional("content"),
        Parameter::optional("profile"),
    ],
};

impl ActionId {
    /// Registry order; also the order of the action picker.
    pub const ALL: [ActionId; 5] = [
        ActionId::Create,
        ActionId::Read,
        ActionId::Update,
        ActionId::List,
        ActionId::Register,
    ];

    pub fn definition(self) -> &'static Action {
        match self {
            ActionId::Create => &CREATE,
            ActionId::Read => &READ,
            ActionId::Update => &UPDATE,
            ActionId::List => &LIST,
            ActionId::Register => &REGISTER,
        }
    }

    pub fn name(self) -> &'static str {
        self.definition().name
    }

    /// Map a raw action name to an action; unknown names are a user error.
    pub fn parse(name: &str) -> Result<Self, CliError> {
        Self::ALL
            .into_iter()
            .find(|id| id.name() == name)
            .ok_or_else(|| CliError::UnknownAction(name.to_string()))
    }
}

/// All registered actions in picker order.
pub fn actions() -> impl Iterator<Item = &'static Action> {
    ActionId::ALL.into_iter().map(ActionId::definition)
}
