use super::{ConfigError, Hotkey, MenuItem};
use crate::actions::{validate_shell_command, ActionDescriptor, ActionKind};

/// Run the semantic rules over the whole tree, failing on the first
/// violation. Duplicate-key checks run at each level entry; per-item rules
/// then apply depth-first with siblings in order.
pub fn validate_items(items: &[MenuItem]) -> Result<(), ConfigError> {
    validate_level(items, "the root menu")
}

fn validate_level(items: &[MenuItem], level: &str) -> Result<(), ConfigError> {
    for (index, item) in items.iter().enumerate() {
        if items[..index].iter().any(|prev| prev.key == item.key) {
            return Err(ConfigError::Semantic(format!(
                "duplicate key `{}` in {level}",
                item.key
            )));
        }
    }

    for item in items {
        if let Some((_, message)) = item_rule_violations(item).into_iter().next() {
            return Err(ConfigError::Semantic(message));
        }
        if let Some(submenu) = &item.submenu {
            if !submenu.is_empty() {
                validate_level(submenu, &format!("submenu `{}`", item.title))?;
            }
        }
    }
    Ok(())
}

fn describe(item: &MenuItem) -> String {
    if item.title.trim().is_empty() {
        format!("menu item with key `{}`", item.key)
    } else {
        format!("menu item `{}`", item.title)
    }
}

/// Per-item rule violations as `(field, message)` pairs, in rule order.
/// Shared between fail-fast validation here and the editor's accumulating
/// pass.
pub(crate) fn item_rule_violations(item: &MenuItem) -> Vec<(&'static str, String)> {
    let mut violations = Vec::new();
    let subject = describe(item);

    if item.key_char().is_none() {
        violations.push((
            "key",
            format!(
                "{subject}: key must be exactly one character (got `{}`)",
                item.key
            ),
        ));
    }

    if item.title.trim().is_empty() {
        violations.push(("title", format!("{subject}: title must be non-empty")));
    }

    let has_submenu = item.submenu.as_ref().is_some_and(|s| !s.is_empty());
    if item.action.is_none() && !has_submenu {
        violations.push((
            "action",
            format!("{subject}: must have an action or a non-empty submenu"),
        ));
    }

    if let Some(action) = &item.action {
        match ActionDescriptor::parse(action) {
            Ok(descriptor) => {
                if descriptor.kind == ActionKind::Shell {
                    if let Err(reason) = validate_shell_command(&descriptor.payload) {
                        violations.push((
                            "action",
                            format!("{subject}: unsafe shell command: {reason}"),
                        ));
                    }
                }
            }
            Err(reason) => {
                violations.push(("action", format!("{subject}: invalid action: {reason}")));
            }
        }
    }

    if let Some(hotkey) = &item.hotkey {
        if let Err(reason) = Hotkey::parse(hotkey) {
            violations.push((
                "hotkey",
                format!("{subject}: invalid hotkey `{hotkey}`: {reason}"),
            ));
        }
    }

    violations
}
