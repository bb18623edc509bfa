use super::{validate_items, ConfigError, MenuItem};
use crate::shared::next_item_id;
use serde_yaml::{Mapping, Value};

/// Parse a declarative menu document into a validated item tree.
///
/// Ids are assigned fresh on every parse; an `id` key in the input is
/// ignored. The root must be a sequence of mappings, and the decoded tree
/// must pass the semantic rules before it is returned.
pub fn parse_document(raw: &str) -> Result<Vec<MenuItem>, ConfigError> {
    if raw.trim().is_empty() {
        return Err(ConfigError::EmptyDocument);
    }

    let value: Value = serde_yaml::from_str(raw).map_err(malformed)?;
    let sequence = match value {
        Value::Sequence(sequence) => sequence,
        _ => {
            return Err(ConfigError::Malformed {
                message: "root element must be a sequence of menu items".to_string(),
                line: 0,
                column: 0,
            })
        }
    };

    let items = decode_items(&sequence, None)?;
    if items.is_empty() {
        return Err(ConfigError::EmptyResult);
    }
    validate_items(&items)?;
    Ok(items)
}

/// Decode without the semantic pass. Editors use this to load documents
/// whose issues they report through accumulating validation instead of
/// failing on the first violation.
pub fn decode_document(raw: &str) -> Result<Vec<MenuItem>, ConfigError> {
    if raw.trim().is_empty() {
        return Err(ConfigError::EmptyDocument);
    }
    let value: Value = serde_yaml::from_str(raw).map_err(malformed)?;
    let sequence = match value {
        Value::Sequence(sequence) => sequence,
        _ => {
            return Err(ConfigError::Malformed {
                message: "root element must be a sequence of menu items".to_string(),
                line: 0,
                column: 0,
            })
        }
    };
    decode_items(&sequence, None)
}

fn malformed(err: serde_yaml::Error) -> ConfigError {
    let (line, column) = err
        .location()
        .map(|loc| (loc.line(), loc.column()))
        .unwrap_or((0, 0));
    ConfigError::Malformed {
        message: err.to_string(),
        line,
        column,
    }
}

fn item_context(parent: Option<&str>, index: usize) -> String {
    match parent {
        Some(parent) => format!("{parent} > submenu item {}", index + 1),
        None => format!("item {}", index + 1),
    }
}

fn decode_items(sequence: &[Value], parent: Option<&str>) -> Result<Vec<MenuItem>, ConfigError> {
    let mut items = Vec::with_capacity(sequence.len());
    for (index, value) in sequence.iter().enumerate() {
        let context = item_context(parent, index);
        let mapping = value.as_mapping().ok_or_else(|| ConfigError::Malformed {
            message: format!("expected a mapping for {context}"),
            line: 0,
            column: 0,
        })?;
        items.push(decode_item(mapping, &context)?);
    }
    Ok(items)
}

fn decode_item(mapping: &Mapping, context: &str) -> Result<MenuItem, ConfigError> {
    let key = required_string(mapping, "key", context)?;
    let title = required_string(mapping, "title", context)?;

    let submenu = match mapping.get("submenu") {
        None | Some(Value::Null) => None,
        Some(Value::Sequence(children)) => Some(decode_items(children, Some(context))?),
        Some(_) => {
            return Err(ConfigError::TypeMismatch {
                field: "submenu".to_string(),
                context: context.to_string(),
            })
        }
    };

    Ok(MenuItem {
        id: next_item_id(),
        key,
        title,
        icon: optional_string(mapping, "icon", context)?,
        action: optional_string(mapping, "action", context)?,
        sticky: optional_bool(mapping, "sticky", context)?,
        notify: optional_bool(mapping, "notify", context)?,
        batch: optional_bool(mapping, "batch", context)?,
        hidden: optional_bool(mapping, "hidden", context)?,
        hotkey: optional_string(mapping, "hotkey", context)?,
        submenu,
    })
}

fn required_string(mapping: &Mapping, field: &str, context: &str) -> Result<String, ConfigError> {
    match mapping.get(field) {
        None | Some(Value::Null) => Err(ConfigError::MissingField {
            field: field.to_string(),
            context: context.to_string(),
        }),
        Some(Value::String(value)) => Ok(value.clone()),
        Some(_) => Err(ConfigError::TypeMismatch {
            field: field.to_string(),
            context: context.to_string(),
        }),
    }
}

fn optional_string(
    mapping: &Mapping,
    field: &str,
    context: &str,
) -> Result<Option<String>, ConfigError> {
    match mapping.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value.clone())),
        Some(_) => Err(ConfigError::TypeMismatch {
            field: field.to_string(),
            context: context.to_string(),
        }),
    }
}

fn optional_bool(
    mapping: &Mapping,
    field: &str,
    context: &str,
) -> Result<Option<bool>, ConfigError> {
    match mapping.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(value)) => Ok(Some(*value)),
        Some(_) => Err(ConfigError::TypeMismatch {
            field: field.to_string(),
            context: context.to_string(),
        }),
    }
}
