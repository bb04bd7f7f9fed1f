//! Actions
//!
//! The action table, how each action's parameters are resolved from arguments
//! or prompts, the checks applied before a handler runs, and the handlers.

pub mod handlers;
pub mod output;
pub mod registry;
pub mod resolve;
pub mod validation;

pub use registry::{Action, ActionId, Parameter, ResolverId};
pub use resolve::{plan_parameters, resolve_parameters, ParamSource, ResolvedInput};
pub use validation::{validate, ActionInput, AllowedKey};
