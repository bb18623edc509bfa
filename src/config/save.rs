use super::{serialize_items, validate_items, ConfigError, MenuItem};
use crate::shared::atomic_write_file;
use std::fs;
use std::path::Path;

/// Validate, serialize and atomically write the menu document. Readers of
/// the file (including the reload watcher) never observe a partial write.
pub fn save_menu_document(path: &Path, items: &[MenuItem]) -> Result<(), ConfigError> {
    validate_items(items)?;
    let body = serialize_items(items)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| ConfigError::CreateDir {
            path: parent.display().to_string(),
            source,
        })?;
    }
    atomic_write_file(path, body.as_bytes()).map_err(|source| ConfigError::Write {
        path: path.display().to_string(),
        source,
    })
}
