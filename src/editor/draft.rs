use super::{collect_issues, has_blocking_issues, ArenaError, MenuArena, ValidationIssue};
use crate::config::{save_menu_document, ConfigError, MenuItem};
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error(transparent)]
    Arena(#[from] ArenaError),
    #[error("cannot save while {0} blocking issue(s) remain")]
    BlockedBySave(usize),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("nothing to undo")]
    NothingToUndo,
    #[error("nothing to redo")]
    NothingToRedo,
}

/// The editing surface's mutable copy of the configuration. The live tree is
/// never touched directly; committing a save round-trips through the
/// serializer and the caller installs the result.
pub struct ConfigDraft {
    arena: MenuArena,
    undo_stack: Vec<MenuArena>,
    redo_stack: Vec<MenuArena>,
}

impl ConfigDraft {
    pub fn from_items(items: &[MenuItem]) -> Self {
        Self {
            arena: MenuArena::from_items(items),
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
        }
    }

    pub fn items(&self) -> Vec<MenuItem> {
        self.arena.to_items()
    }

    pub fn issues(&self) -> Vec<ValidationIssue> {
        collect_issues(&self.items())
    }

    pub fn can_save(&self) -> bool {
        !has_blocking_issues(&self.issues())
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    fn checkpoint(&mut self) {
        self.undo_stack.push(self.arena.clone());
        self.redo_stack.clear();
    }

    pub fn insert(&mut self, path: &[usize], item: &MenuItem) -> Result<(), EditorError> {
        self.checkpoint();
        if let Err(err) = self.arena.insert_at_path(path, item) {
            self.rollback_checkpoint();
            return Err(err.into());
        }
        Ok(())
    }

    pub fn remove(&mut self, path: &[usize]) -> Result<MenuItem, EditorError> {
        self.checkpoint();
        match self.arena.remove_at_path(path) {
            Ok(removed) => Ok(removed),
            Err(err) => {
                self.rollback_checkpoint();
                Err(err.into())
            }
        }
    }

    pub fn update(
        &mut self,
        path: &[usize],
        update: impl FnOnce(&mut MenuItem),
    ) -> Result<(), EditorError> {
        self.checkpoint();
        if let Err(err) = self.arena.update_at_path(path, update) {
            self.rollback_checkpoint();
            return Err(err.into());
        }
        Ok(())
    }

    pub fn replace(&mut self, path: &[usize], item: &MenuItem) -> Result<(), EditorError> {
        self.checkpoint();
        if let Err(err) = self.arena.replace_at_path(path, item) {
            self.rollback_checkpoint();
            return Err(err.into());
        }
        Ok(())
    }

    fn rollback_checkpoint(&mut self) {
        if let Some(previous) = self.undo_stack.pop() {
            self.arena = previous;
        }
    }

    pub fn undo(&mut self) -> Result<(), EditorError> {
        let previous = self.undo_stack.pop().ok_or(EditorError::NothingToUndo)?;
        self.redo_stack.push(std::mem::replace(&mut self.arena, previous));
        Ok(())
    }

    pub fn redo(&mut self) -> Result<(), EditorError> {
        let next = self.redo_stack.pop().ok_or(EditorError::NothingToRedo)?;
        self.undo_stack.push(std::mem::replace(&mut self.arena, next));
        Ok(())
    }

    /// Commit the draft to disk. Refused while error-severity issues remain;
    /// warnings do not block. Returns the saved tree so the caller can
    /// install it as the live configuration.
    pub fn save_to(&self, path: &Path) -> Result<Vec<MenuItem>, EditorError> {
        let issues = self.issues();
        if has_blocking_issues(&issues) {
            let blocking = issues
                .iter()
                .filter(|issue| issue.severity == super::IssueSeverity::Error)
                .count();
            return Err(EditorError::BlockedBySave(blocking));
        }
        let items = self.items();
        save_menu_document(path, &items)?;
        Ok(items)
    }
}
