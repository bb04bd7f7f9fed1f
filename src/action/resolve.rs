//! Parameter resolution: positional argument first, then the parameter's
//! resolver, otherwise absent.
//!
//! Resolution runs strictly in declaration order. A later prompt may depend on
//! an earlier answer, and concurrent prompts would interleave on the terminal.

use crate::action::registry::{Action, ResolverId};
use crate::error::PromptError;
use crate::prompt::{Choice, Prompt};
use crate::types::ModuleType;
use std::collections::BTreeMap;

/// Where a parameter's value will come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamSource {
    Literal(String),
    Prompted(ResolverId),
    Omitted,
}

/// Parameter name → resolved value. Absent parameters have no entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedInput {
    values: BTreeMap<&'static str, String>,
}

impl ResolvedInput {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn insert(&mut self, name: &'static str, value: String) {
        self.values.insert(name, value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<const N: usize> From<[(&'static str, &str); N]> for ResolvedInput {
    fn from(pairs: [(&'static str, &str); N]) -> Self {
        let mut input = ResolvedInput::default();
        for (name, value) in pairs {
            input.insert(name, value.to_string());
        }
        input
    }
}

/// Decide the source of every declared parameter without prompting.
pub fn plan_parameters(
    action: &Action,
    positional: &[String],
) -> Vec<(&'static str, ParamSource)> {
    action
        .parameters
        .iter()
        .enumerate()
        .map(|(idx, param)| {
            let source = match positional.get(idx) {
                Some(value) if !value.is_empty() => ParamSource::Literal(value.clone()),
                _ => match param.resolver {
                    Some(resolver) => ParamSource::Prompted(resolver),
                    None => ParamSource::Omitted,
                },
            };
            (param.name, source)
        })
        .collect()
}

/// Resolve all parameters of `action`, prompting in declaration order.
///
/// The first failing resolver aborts resolution; no partial input is returned.
pub fn resolve_parameters(
    action: &Action,
    positional: &[String],
    prompt: &mut dyn Prompt,
) -> Result<ResolvedInput, PromptError> {
    let mut input = ResolvedInput::default();
    for (name, source) in plan_parameters(action, positional) {
        match source {
            ParamSource::Literal(value) => input.insert(name, value),
            ParamSource::Prompted(resolver) => {
                tracing::debug!(parameter = name, ?resolver, "Prompting for parameter");
                let value = run_resolver(resolver, prompt)?;
                input.insert(name, value);
            }
            ParamSource::Omitted => {}
        }
    }
    Ok(input)
}

/// Produce a value for one parameter interactively.
pub fn run_resolver(resolver: ResolverId, prompt: &mut dyn Prompt) -> Result<String, PromptError> {
    match resolver {
        ResolverId::ModuleType => {
            let choices = ModuleType::ALL
                .iter()
                .map(|t| Choice::new(t.title(), t.as_str()))
                .collect();
            prompt.select("Pick a type", choices)
        }
        ResolverId::ModuleHash => prompt.text("Module hash", None, true),
    }
}
