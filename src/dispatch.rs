//! Dispatch Orchestrator
//!
//! One invocation runs through
//! `START → ACTION_SELECTED → INPUT_RESOLVED → SESSION_READY → VALIDATED →
//! HANDLED → SESSION_CLOSED → EXIT`. Once `ready()` has succeeded the engine is
//! destroyed exactly once, whatever happens in validation or the handler.

use crate::action::handlers::{self, HandlerContext};
use crate::action::registry::{self, ActionId};
use crate::action::resolve::{resolve_parameters, ResolvedInput};
use crate::action::validation::{validate, ActionInput};
use crate::engine::EngineClient;
use crate::error::CliError;
use crate::prompt::{Choice, Prompt};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Flags shared by all actions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvocationFlags {
    /// Engine environment directory
    pub env: PathBuf,
    pub title: Option<String>,
    pub name: Option<String>,
    /// `Some("")` means explicitly empty
    pub description: Option<String>,
    pub subtype: Option<String>,
    pub parents: Vec<String>,
    /// Skip license confirmation
    pub yes: bool,
}

/// A single CLI run: action name, its raw positional inputs, and flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invocation {
    pub action: Option<String>,
    pub positional: Vec<String>,
    pub flags: InvocationFlags,
}

impl Invocation {
    /// Split raw positional arguments into action name and inputs.
    pub fn from_args(args: Vec<String>, flags: InvocationFlags) -> Self {
        let mut args = args.into_iter();
        let action = args.next().filter(|a| !a.is_empty());
        Self {
            action,
            positional: args.collect(),
            flags,
        }
    }
}

/// Run one invocation end to end and return the text to print.
///
/// `connect` builds the engine for the environment directory; it is only
/// called once the action and its input are known.
pub async fn dispatch<E, F>(
    invocation: Invocation,
    prompt: &mut dyn Prompt,
    connect: F,
) -> Result<String, CliError>
where
    E: EngineClient,
    F: FnOnce(&Path) -> E,
{
    let action = select_action(invocation.action.as_deref(), prompt)?;
    info!(action = action.name(), "Action selected");

    let input = resolve_parameters(action.definition(), &invocation.positional, prompt)?;
    debug!(action = action.name(), parameters = input.len(), "Input resolved");

    let engine = connect(&invocation.flags.env);
    engine.ready().await?;
    info!(env = %invocation.flags.env.display(), "Engine session ready");

    let outcome = run_in_session(&engine, action, &input, prompt, &invocation.flags).await;

    let released = engine.destroy().await;
    info!(action = action.name(), ok = outcome.is_ok(), "Engine session closed");

    match (outcome, released) {
        (Ok(output), Ok(())) => Ok(output),
        (Ok(_), Err(e)) => Err(e.into()),
        (Err(e), Ok(())) => Err(e),
        (Err(e), Err(release_err)) => {
            warn!("Failed to release engine after error: {}", release_err);
            Err(e)
        }
    }
}

/// Validate and handle; everything between ready and destroy.
async fn run_in_session(
    engine: &dyn EngineClient,
    action: ActionId,
    input: &ResolvedInput,
    prompt: &mut dyn Prompt,
    flags: &InvocationFlags,
) -> Result<String, CliError> {
    let validated = validate(action, input)?;
    debug!(action = action.name(), "Input validated");

    let ctx = HandlerContext {
        engine,
        prompt,
        flags,
    };
    let output = match validated {
        ActionInput::Create { module_type } => handlers::create(ctx, module_type).await,
        ActionInput::Read { hash, key } => handlers::read(ctx, hash, key).await,
        ActionInput::Update { hash, key, value } => {
            handlers::update(ctx, hash, key, value).await
        }
        ActionInput::List { module_type } => handlers::list(ctx, module_type).await,
        ActionInput::Register { content, profile } => {
            handlers::register(ctx, content, profile).await
        }
    }?;
    debug!(action = action.name(), "Action handled");
    Ok(output)
}

/// Action from the first argument, or picked interactively when absent.
pub fn select_action(name: Option<&str>, prompt: &mut dyn Prompt) -> Result<ActionId, CliError> {
    match name {
        Some(name) => ActionId::parse(name),
        None => {
            let choices = registry::actions()
                .map(|a| Choice::new(a.title, a.name))
                .collect();
            let picked = prompt.select("Pick an action", choices)?;
            ActionId::parse(&picked)
        }
    }
}
