use super::{parse_document, ConfigError, MenuItem};
use std::fs;
use std::path::Path;

/// Read and parse the menu document at `path`, running full validation.
pub fn load_menu_document(path: &Path) -> Result<Vec<MenuItem>, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    parse_document(&raw)
}

/// Startup load that never leaves the application without a menu: an
/// unreadable or invalid document falls back to the built-in sample items.
/// The error, when any, is returned alongside so callers can surface it.
pub fn load_menu_document_or_default(path: &Path) -> (Vec<MenuItem>, Option<ConfigError>) {
    match load_menu_document(path) {
        Ok(items) => (items, None),
        Err(err) => (MenuItem::sample_items(), Some(err)),
    }
}
