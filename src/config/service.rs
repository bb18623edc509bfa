use super::{load_menu_document, ConfigError, MenuItem};
use std::fs;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::time::SystemTime;

/// Broadcast to subscribers when the live tree changes. Receivers are
/// expected to fully reset any navigation state they hold.
#[derive(Debug, Clone)]
pub enum ConfigEvent {
    Reloaded(Arc<Vec<MenuItem>>),
}

/// Owns the live configuration tree. The OS file watcher stays external;
/// it simply calls `poll_reload` on modification notifications, and the
/// service swaps the tree atomically only when the new document parses and
/// validates.
pub struct ConfigService {
    path: PathBuf,
    items: Arc<Vec<MenuItem>>,
    modified: Option<SystemTime>,
    subscribers: Vec<Sender<ConfigEvent>>,
}

impl ConfigService {
    /// Load from `path`, falling back to the built-in sample items when the
    /// document is unreadable or invalid. The load error, if any, is
    /// returned for surfacing; the service is usable either way.
    pub fn start(path: PathBuf) -> (Self, Option<ConfigError>) {
        let (items, err) = super::load_menu_document_or_default(&path);
        let modified = fs::metadata(&path).and_then(|m| m.modified()).ok();
        (
            Self {
                path,
                items: Arc::new(items),
                modified,
                subscribers: Vec::new(),
            },
            err,
        )
    }

    pub fn items(&self) -> Arc<Vec<MenuItem>> {
        Arc::clone(&self.items)
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    pub fn subscribe(&mut self) -> Receiver<ConfigEvent> {
        let (tx, rx) = channel();
        self.subscribers.push(tx);
        rx
    }

    /// Re-read the document if its modification time moved. On success the
    /// live tree reference is swapped whole and subscribers are notified;
    /// on failure the previous tree stays in place and the error is
    /// returned.
    pub fn poll_reload(&mut self) -> Result<bool, ConfigError> {
        let modified = fs::metadata(&self.path)
            .and_then(|m| m.modified())
            .map_err(|source| ConfigError::Read {
                path: self.path.display().to_string(),
                source,
            })?;
        if self.modified == Some(modified) {
            return Ok(false);
        }

        let items = load_menu_document(&self.path)?;
        self.items = Arc::new(items);
        self.modified = Some(modified);
        let snapshot = self.items();
        self.subscribers
            .retain(|tx| tx.send(ConfigEvent::Reloaded(Arc::clone(&snapshot))).is_ok());
        Ok(true)
    }

    /// Install an already-validated tree (editor save path) and notify
    /// subscribers exactly as a file reload would.
    pub fn install(&mut self, items: Vec<MenuItem>) {
        self.items = Arc::new(items);
        self.modified = fs::metadata(&self.path).and_then(|m| m.modified()).ok();
        let snapshot = self.items();
        self.subscribers
            .retain(|tx| tx.send(ConfigEvent::Reloaded(Arc::clone(&snapshot))).is_ok());
    }
}
