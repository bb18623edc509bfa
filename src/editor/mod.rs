pub mod arena;
pub mod draft;
pub mod issues;

pub use arena::{ArenaError, MenuArena};
pub use draft::{ConfigDraft, EditorError};
pub use issues::{collect_issues, has_blocking_issues, IssueSeverity, ValidationIssue};
