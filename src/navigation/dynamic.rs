use crate::actions::dispatch::run_shell_command;
use crate::actions::{DispatchBinaries, DispatchError};
use crate::config::{parse_document, ConfigError, MenuItem};

#[derive(Debug, thiserror::Error)]
pub enum DynamicError {
    #[error("dynamic submenu command failed: {0}")]
    Command(#[from] DispatchError),
    #[error("dynamic submenu output is not a valid menu: {0}")]
    InvalidOutput(#[from] ConfigError),
}

/// Run an external generator and parse its stdout as a menu document with
/// full validation. One attempt only; the caller surfaces a navigation
/// error and the user may re-trigger by pressing the key again.
pub fn resolve_dynamic_submenu(
    command: &str,
    binaries: &DispatchBinaries,
) -> Result<Vec<MenuItem>, DynamicError> {
    let output = run_shell_command(command, binaries)?;
    Ok(parse_document(&output.stdout)?)
}
