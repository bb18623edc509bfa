use super::ConfigError;
use std::path::PathBuf;

pub const MENU_FILE_NAME: &str = "menu.yaml";
pub const STATE_DIR: &str = ".swiftkey";
pub const SNIPPET_CACHE_FILE_NAME: &str = "snippets.json";

fn home_dir() -> Result<PathBuf, ConfigError> {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .ok_or(ConfigError::HomeDirectoryUnavailable)
}

/// Default menu document location: `<documents>/menu.yaml`.
pub fn default_menu_path() -> Result<PathBuf, ConfigError> {
    Ok(home_dir()?.join("Documents").join(MENU_FILE_NAME))
}

/// Root for process state: logs and the snippet cache.
pub fn default_state_root() -> Result<PathBuf, ConfigError> {
    Ok(home_dir()?.join(STATE_DIR))
}

pub fn snippet_cache_path() -> Result<PathBuf, ConfigError> {
    Ok(default_state_root()?.join(SNIPPET_CACHE_FILE_NAME))
}
