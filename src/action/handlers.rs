//! Action handlers: the only code that calls engine domain operations.
//!
//! Each handler returns the text to print on success (possibly empty).

use crate::action::output::{format_address_lines, format_field, format_record};
use crate::action::validation::{parse_address, AllowedKey};
use crate::dispatch::InvocationFlags;
use crate::engine::{EngineClient, InitRequest, ModuleRecord, DEFAULT_LICENSE_NAME};
use crate::error::{CliError, EngineError};
use crate::prompt::{Choice, Prompt};
use crate::types::{ModuleKey, ModuleType};

/// Borrowed collaborators for one handler call. The engine is owned by the
/// dispatcher; handlers must not destroy it.
pub struct HandlerContext<'a> {
    pub engine: &'a dyn EngineClient,
    pub prompt: &'a mut dyn Prompt,
    pub flags: &'a InvocationFlags,
}

pub async fn create(ctx: HandlerContext<'_>, module_type: ModuleType) -> Result<String, CliError> {
    let HandlerContext {
        engine,
        prompt,
        flags,
    } = ctx;

    let profiles = engine.list_profiles().await?;
    match (module_type, profiles.first()) {
        (ModuleType::Profile, Some(_)) => Err(CliError::user("A local profile already exists")),
        (ModuleType::Profile, None) => {
            let name = flags.name.as_deref().or(flags.title.as_deref());
            create_profile(engine, prompt, name, flags.description.as_deref()).await
        }
        (ModuleType::Content, Some(profile)) => {
            create_content(engine, prompt, flags, profile.url).await
        }
        // Content flags do not apply to the profile created instead.
        (ModuleType::Content, None) => {
            prompt.notify("create your profile first");
            tracing::info!("No local profile; creating one instead of content");
            create_profile(engine, prompt, None, None).await
        }
    }
}

async fn create_profile(
    engine: &dyn EngineClient,
    prompt: &mut dyn Prompt,
    name: Option<&str>,
    description: Option<&str>,
) -> Result<String, CliError> {
    let title = required_text(prompt, name, "Name")?;
    let description = match description {
        Some(description) => description.to_string(),
        None => prompt.text("Description", None, false)?,
    };
    let request = InitRequest::new(ModuleType::Profile, title, description);
    let record = engine.init(request).await?;
    tracing::info!(url = %record.url, "Profile created");
    Ok(record.url.address())
}

async fn create_content(
    engine: &dyn EngineClient,
    prompt: &mut dyn Prompt,
    flags: &InvocationFlags,
    author: ModuleKey,
) -> Result<String, CliError> {
    let title = required_text(prompt, flags.title.as_deref(), "Title")?;
    let description = match &flags.description {
        Some(description) => description.clone(),
        None => prompt.text("Description", None, false)?,
    };

    let mut request = InitRequest::new(ModuleType::Content, title, description);
    request.subtype = Some(match &flags.subtype {
        Some(subtype) => subtype.clone(),
        None => prompt.text("Wikidata subtype", None, false)?,
    });
    request.parents = select_parents(engine, &mut *prompt, flags).await?;
    request.authors = vec![author];

    if !flags.yes {
        let accepted = prompt.confirm(&format!(
            "License: content is published under {}. Do you agree?",
            DEFAULT_LICENSE_NAME
        ))?;
        if !accepted {
            return Err(CliError::user(
                "The license must be accepted to publish content",
            ));
        }
    }

    let record = engine.init(request).await?;
    tracing::info!(url = %record.url, "Content created");
    Ok(record.url.address())
}

/// Flag value when non-blank, otherwise a required prompt labelled `label`.
fn required_text(
    prompt: &mut dyn Prompt,
    flag: Option<&str>,
    label: &str,
) -> Result<String, CliError> {
    let value = match flag.filter(|v| !v.trim().is_empty()) {
        Some(value) => value.to_string(),
        None => prompt.text(label, None, true)?,
    };
    if value.trim().is_empty() {
        return Err(CliError::user(format!("{} required", label)));
    }
    Ok(value)
}

/// Parents from `--parent` flags, otherwise picked among existing content.
async fn select_parents(
    engine: &dyn EngineClient,
    prompt: &mut dyn Prompt,
    flags: &InvocationFlags,
) -> Result<Vec<ModuleKey>, CliError> {
    if !flags.parents.is_empty() {
        return flags.parents.iter().map(|p| parse_address(p)).collect();
    }
    let candidates = engine.list_content().await?;
    if candidates.is_empty() {
        return Ok(Vec::new());
    }
    let choices = candidates
        .iter()
        .map(|m| Choice::new(format!("{} ({})", m.title, m.url.address()), m.url.to_hex()))
        .collect();
    prompt
        .multi_select("Select parent modules", choices)?
        .iter()
        .map(|value| parse_address(value))
        .collect()
}

pub async fn read(
    ctx: HandlerContext<'_>,
    hash: ModuleKey,
    key: Option<String>,
) -> Result<String, CliError> {
    let record = fetch(ctx.engine, &hash).await?;
    match key {
        Some(key) => format_field(&record, &key),
        None => format_record(&record),
    }
}

pub async fn update(
    ctx: HandlerContext<'_>,
    hash: ModuleKey,
    key: Option<AllowedKey>,
    value: Option<String>,
) -> Result<String, CliError> {
    let HandlerContext { engine, prompt, .. } = ctx;

    // Working copy; persisted once after all edits.
    let mut record = fetch(engine, &hash).await?;
    match key {
        Some(key) => {
            let value = match value {
                Some(value) => value,
                None => prompt.text(key.as_str(), Some(field(&record, key)), false)?,
            };
            set_field(&mut record, key, value);
        }
        None => {
            for key in AllowedKey::ALL {
                let value = prompt.text(key.as_str(), Some(field(&record, key)), false)?;
                set_field(&mut record, key, value);
            }
        }
    }
    if record.title.trim().is_empty() {
        return Err(CliError::user("title required"));
    }
    engine.set(record).await?;
    tracing::info!(url = %hash, "Module metadata updated");
    Ok(String::new())
}

pub async fn list(ctx: HandlerContext<'_>, module_type: ModuleType) -> Result<String, CliError> {
    let modules = match module_type {
        ModuleType::Content => ctx.engine.list_content().await?,
        ModuleType::Profile => ctx.engine.list_profiles().await?,
    };
    Ok(format_address_lines(&modules))
}

pub async fn register(
    ctx: HandlerContext<'_>,
    content: Option<ModuleKey>,
    profile: Option<ModuleKey>,
) -> Result<String, CliError> {
    let HandlerContext { engine, prompt, .. } = ctx;
    let content = match content {
        Some(key) => key,
        None => pick_content(engine, prompt).await?,
    };
    let content_record = fetch(engine, &content).await?;
    if content_record.module_type != ModuleType::Content {
        return Err(CliError::user(format!(
            "{} is not a content module",
            content.address()
        )));
    }
    let profile = match profile {
        Some(key) => {
            let record = fetch(engine, &key).await?;
            if record.module_type != ModuleType::Profile {
                return Err(CliError::user(format!("{} is not a profile", key.address())));
            }
            key
        }
        None => match engine.list_profiles().await?.first() {
            Some(record) => record.url,
            None => return Err(CliError::user("create your profile first")),
        },
    };
    engine.register(&content, &profile).await?;
    tracing::info!(content = %content, profile = %profile, "Content registered");
    Ok(String::new())
}

/// Choose one of the existing content modules.
async fn pick_content(
    engine: &dyn EngineClient,
    prompt: &mut dyn Prompt,
) -> Result<ModuleKey, CliError> {
    let candidates = engine.list_content().await?;
    if candidates.is_empty() {
        return Err(CliError::user("No content modules to register"));
    }
    let choices = candidates
        .iter()
        .map(|m| Choice::new(format!("{} ({})", m.title, m.url.address()), m.url.to_hex()))
        .collect();
    let picked = prompt.select("Pick content to register", choices)?;
    parse_address(&picked)
}

/// `get` with a missing module reported as a user error.
async fn fetch(engine: &dyn EngineClient, key: &ModuleKey) -> Result<ModuleRecord, CliError> {
    engine.get(key).await.map_err(|e| match e {
        EngineError::NotFound(key) => {
            CliError::user(format!("Module not found: {}", key.address()))
        }
        other => CliError::Engine(other),
    })
}

fn field(record: &ModuleRecord, key: AllowedKey) -> &str {
    match key {
        AllowedKey::Title => &record.title,
        AllowedKey::Description => &record.description,
        AllowedKey::Main => &record.main,
    }
}

fn set_field(record: &mut ModuleRecord, key: AllowedKey, value: String) {
    match key {
        AllowedKey::Title => record.title = value,
        AllowedKey::Description => record.description = value,
        AllowedKey::Main => record.main = value,
    }
}
