pub mod index;

pub use index::{builtin_snippets, SnippetIndexClient, SnippetSource, DEFAULT_INDEX_BASE_URL};

use crate::config::{merge_items, validate_items, ConfigError, MenuItem, MergeStrategy};
use crate::shared::serde_ext::parse_via_string;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum SnippetError {
    #[error("failed to fetch snippet index from {url}: {message}")]
    Fetch { url: String, message: String },
    #[error("failed to read snippet cache {path}: {source}")]
    CacheRead {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode snippet cache {path}: {source}")]
    CacheDecode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode snippet cache {path}: {source}")]
    CacheEncode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write snippet cache {path}: {source}")]
    CacheWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("snippet `{id}` is not in the index")]
    UnknownSnippet { id: String },
    #[error("snippet content is not a valid menu: {0}")]
    InvalidContent(ConfigError),
    #[error("merged configuration is invalid: {0}")]
    Merge(ConfigError),
}

/// Composite snippet identity: `author/name`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct SnippetId(String);

impl SnippetId {
    pub fn parse(raw: &str) -> Result<Self, String> {
        let (author, name) = raw
            .split_once('/')
            .ok_or_else(|| "snippet id must use the form author/name".to_string())?;
        if author.trim().is_empty() || name.trim().is_empty() {
            return Err("snippet id must use the form author/name".to_string());
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SnippetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl<'de> Deserialize<'de> for SnippetId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        parse_via_string(deserializer, "snippet id", Self::parse)
    }
}

/// A shareable bundle of menu configuration. Immutable once constructed;
/// imports always go through the merge engine, never into the live tree
/// directly.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConfigSnippet {
    pub id: SnippetId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub author: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
    pub content: String,
}

impl ConfigSnippet {
    /// Lazily parse the raw content through the full menu parser.
    pub fn items(&self) -> Result<Vec<MenuItem>, SnippetError> {
        crate::config::parse_document(&self.content).map_err(SnippetError::InvalidContent)
    }
}

/// Merge a snippet into an existing tree slice under the chosen strategy.
/// The merged result is re-validated so an import can never install a tree
/// the parser itself would reject.
pub fn import_snippet(
    base: &[MenuItem],
    snippet: &ConfigSnippet,
    strategy: MergeStrategy,
) -> Result<Vec<MenuItem>, SnippetError> {
    let incoming = snippet.items()?;
    let merged = merge_items(base, &incoming, strategy);
    validate_items(&merged).map_err(SnippetError::Merge)?;
    Ok(merged)
}
