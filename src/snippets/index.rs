use super::{ConfigSnippet, SnippetError};
use crate::shared::atomic_write_file;
use std::fs;
use std::path::PathBuf;

pub const DEFAULT_INDEX_BASE_URL: &str = "https://snippets.swiftkey.dev";

/// Where a synced snippet set actually came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnippetSource {
    Remote,
    Cache,
    Builtin,
}

impl SnippetSource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Remote => "remote",
            Self::Cache => "cache",
            Self::Builtin => "builtin",
        }
    }
}

pub struct SnippetIndexClient {
    base_url: String,
    cache_path: PathBuf,
}

impl SnippetIndexClient {
    pub fn new(base_url: String, cache_path: PathBuf) -> Self {
        Self {
            base_url,
            cache_path,
        }
    }

    fn index_url(&self) -> String {
        format!("{}/index.json", self.base_url.trim_end_matches('/'))
    }

    pub fn fetch_remote(&self) -> Result<Vec<ConfigSnippet>, SnippetError> {
        let url = self.index_url();
        let response = ureq::get(&url).call().map_err(|err| SnippetError::Fetch {
            url: url.clone(),
            message: err.to_string(),
        })?;
        response
            .into_json::<Vec<ConfigSnippet>>()
            .map_err(|err| SnippetError::Fetch {
                url,
                message: err.to_string(),
            })
    }

    pub fn load_cache(&self) -> Result<Vec<ConfigSnippet>, SnippetError> {
        let raw = fs::read_to_string(&self.cache_path).map_err(|source| SnippetError::CacheRead {
            path: self.cache_path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| SnippetError::CacheDecode {
            path: self.cache_path.display().to_string(),
            source,
        })
    }

    pub fn save_cache(&self, snippets: &[ConfigSnippet]) -> Result<(), SnippetError> {
        let body =
            serde_json::to_vec_pretty(snippets).map_err(|source| SnippetError::CacheEncode {
                path: self.cache_path.display().to_string(),
                source,
            })?;
        if let Some(parent) = self.cache_path.parent() {
            fs::create_dir_all(parent).map_err(|source| SnippetError::CacheWrite {
                path: parent.display().to_string(),
                source,
            })?;
        }
        atomic_write_file(&self.cache_path, &body).map_err(|source| SnippetError::CacheWrite {
            path: self.cache_path.display().to_string(),
            source,
        })
    }

    /// Fetch the remote index, refreshing the local cache on success. On
    /// fetch failure the cache is served; with no usable cache the built-in
    /// set keeps the gallery populated.
    pub fn sync(&self) -> (Vec<ConfigSnippet>, SnippetSource) {
        match self.fetch_remote() {
            Ok(snippets) => {
                let _ = self.save_cache(&snippets);
                (snippets, SnippetSource::Remote)
            }
            Err(_) => match self.load_cache() {
                Ok(snippets) => (snippets, SnippetSource::Cache),
                Err(_) => (builtin_snippets(), SnippetSource::Builtin),
            },
        }
    }

    pub fn find<'a>(
        &self,
        snippets: &'a [ConfigSnippet],
        id: &str,
    ) -> Result<&'a ConfigSnippet, SnippetError> {
        snippets
            .iter()
            .find(|snippet| snippet.id.as_str() == id)
            .ok_or_else(|| SnippetError::UnknownSnippet { id: id.to_string() })
    }
}

/// Shipped fallback set, available even on first launch with no network.
pub fn builtin_snippets() -> Vec<ConfigSnippet> {
    let web = ConfigSnippet {
        id: super::SnippetId::parse("swiftkey/web-essentials").expect("builtin id"),
        name: "Web Essentials".to_string(),
        description: "Quick links to everyday sites".to_string(),
        author: "swiftkey".to_string(),
        tags: vec!["web".to_string()],
        created_at: 1_735_689_600,
        updated_at: 1_735_689_600,
        content: "- key: w\n  title: Web\n  submenu:\n    - key: e\n      title: Example\n      action: open://https://www.example.com\n    - key: s\n      title: Search\n      action: open://https://duckduckgo.com\n"
            .to_string(),
    };
    let tools = ConfigSnippet {
        id: super::SnippetId::parse("swiftkey/terminal-tools").expect("builtin id"),
        name: "Terminal Tools".to_string(),
        description: "Handy shell one-liners".to_string(),
        author: "swiftkey".to_string(),
        tags: vec!["shell".to_string()],
        created_at: 1_735_689_600,
        updated_at: 1_735_689_600,
        content: "- key: t\n  title: Tools\n  submenu:\n    - key: d\n      title: Date\n      action: shell://date\n      notify: true\n    - key: u\n      title: Uptime\n      action: shell://uptime\n      notify: true\n"
            .to_string(),
    };
    vec![web, tools]
}
