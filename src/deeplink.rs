use crate::config::MenuItem;

pub const DEEP_LINK_SCHEME: &str = "swiftkey";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DeepLinkError {
    #[error("unsupported deep link scheme `{0}`; expected swiftkey://")]
    UnsupportedScheme(String),
    #[error("malformed deep link: {0}")]
    Malformed(String),
    #[error("deep link query is missing the `{0}` parameter")]
    MissingQueryParameter(&'static str),
    #[error("deep link path token `{0}` must be a single character")]
    InvalidKeyToken(String),
    #[error("no menu item with key `{key}` at depth {depth}")]
    UnknownKey { key: char, depth: usize },
    #[error("key `{key}` addresses a leaf but the path continues past it")]
    PathThroughLeaf { key: char },
}

/// External requests routed into the launcher: walk-and-execute a key path,
/// or open the snippet gallery at a given snippet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeepLink {
    Open { keys: Vec<char> },
    Snippets { snippet_id: String },
}

impl DeepLink {
    pub fn parse(uri: &str) -> Result<Self, DeepLinkError> {
        let rest = match uri.split_once("://") {
            Some((scheme, rest)) if scheme == DEEP_LINK_SCHEME => rest,
            Some((scheme, _)) => return Err(DeepLinkError::UnsupportedScheme(scheme.to_string())),
            None => {
                return Err(DeepLinkError::Malformed(
                    "expected <scheme>://<request>".to_string(),
                ))
            }
        };

        if let Some(query) = rest.strip_prefix("open?").or_else(|| {
            (rest == "open").then_some("")
        }) {
            let path_value = query
                .split('&')
                .filter_map(|pair| pair.split_once('='))
                .find(|(name, _)| *name == "path")
                .map(|(_, value)| value)
                .ok_or(DeepLinkError::MissingQueryParameter("path"))?;
            let decoded = urlencoding::decode(path_value)
                .map_err(|err| DeepLinkError::Malformed(err.to_string()))?;
            let keys = parse_key_path(&decoded)?;
            return Ok(Self::Open { keys });
        }

        if let Some(snippet_id) = rest.strip_prefix("snippets/") {
            let decoded = urlencoding::decode(snippet_id)
                .map_err(|err| DeepLinkError::Malformed(err.to_string()))?;
            if decoded.trim().is_empty() {
                return Err(DeepLinkError::Malformed(
                    "snippet id must be non-empty".to_string(),
                ));
            }
            return Ok(Self::Snippets {
                snippet_id: decoded.into_owned(),
            });
        }

        Err(DeepLinkError::Malformed(format!(
            "unrecognized request `{rest}`"
        )))
    }
}

fn parse_key_path(raw: &str) -> Result<Vec<char>, DeepLinkError> {
    let tokens: Vec<&str> = raw
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .collect();
    if tokens.is_empty() {
        return Err(DeepLinkError::Malformed(
            "path must contain at least one key".to_string(),
        ));
    }
    tokens
        .into_iter()
        .map(|token| {
            let mut chars = token.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) => Ok(ch),
                _ => Err(DeepLinkError::InvalidKeyToken(token.to_string())),
            }
        })
        .collect()
}

/// Where a resolved `open` path landed.
#[derive(Debug, PartialEq)]
pub enum PathTarget<'a> {
    /// The path ends on a leaf; its action should be dispatched.
    Leaf(&'a MenuItem),
    /// The path ends on (or is exhausted at) a branch; the presentation
    /// layer should be shown at that position.
    Branch {
        item: &'a MenuItem,
        breadcrumbs: Vec<String>,
    },
}

/// Walk the root tree following each key in order.
pub fn resolve_open_path<'a>(
    root: &'a [MenuItem],
    keys: &[char],
) -> Result<PathTarget<'a>, DeepLinkError> {
    let mut level = root;
    let mut breadcrumbs = Vec::new();
    let mut resolved: Option<&MenuItem> = None;

    for (depth, key) in keys.iter().enumerate() {
        let item = level
            .iter()
            .find(|item| item.key_char() == Some(*key))
            .ok_or(DeepLinkError::UnknownKey { key: *key, depth })?;
        let remaining = keys.len() - depth - 1;
        if item.is_branch() {
            breadcrumbs.push(item.title.clone());
            level = item.submenu.as_deref().unwrap_or_default();
            resolved = Some(item);
        } else if remaining > 0 {
            return Err(DeepLinkError::PathThroughLeaf { key: *key });
        } else {
            return Ok(PathTarget::Leaf(item));
        }
    }

    let item = resolved.ok_or_else(|| {
        DeepLinkError::Malformed("path must contain at least one key".to_string())
    })?;
    Ok(PathTarget::Branch { item, breadcrumbs })
}
