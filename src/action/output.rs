//! Rendering of module addresses and metadata records.

use crate::engine::ModuleRecord;
use crate::error::CliError;
use serde_json::Value;

/// One `dat://<hex>` line per module, in the given order.
pub fn format_address_lines(records: &[ModuleRecord]) -> String {
    records
        .iter()
        .map(|r| r.url.address())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Record as JSON with `url` rendered as an address.
fn record_value(record: &ModuleRecord) -> Result<Value, CliError> {
    let mut value = serde_json::to_value(record)?;
    if let Some(object) = value.as_object_mut() {
        object.insert("url".to_string(), Value::String(record.url.address()));
    }
    Ok(value)
}

/// Full record as indented text.
pub fn format_record(record: &ModuleRecord) -> Result<String, CliError> {
    let value = record_value(record)?;
    Ok(serde_json::to_string_pretty(&value)?)
}

/// Single field of a record; strings print bare, anything else as JSON.
pub fn format_field(record: &ModuleRecord, key: &str) -> Result<String, CliError> {
    let value = record_value(record)?;
    match value.get(key) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Ok(serde_json::to_string_pretty(other)?),
        None => Err(CliError::user(format!(
            "Unknown key: {}. Available keys: {}",
            key,
            value
                .as_object()
                .map(|o| o.keys().cloned().collect::<Vec<_>>().join(", "))
                .unwrap_or_default()
        ))),
    }
}
