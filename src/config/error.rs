#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("menu document is empty")]
    EmptyDocument,
    #[error("menu document contains no items")]
    EmptyResult,
    /// `line`/`column` are 1-based; zero means the position is unknown. The
    /// message already carries the position when the underlying parser
    /// reported one.
    #[error("malformed menu document: {message}")]
    Malformed {
        message: String,
        line: usize,
        column: usize,
    },
    #[error("missing required field `{field}` in {context}")]
    MissingField { field: String, context: String },
    #[error("field `{field}` has the wrong type in {context}")]
    TypeMismatch { field: String, context: String },
    #[error("menu validation failed: {0}")]
    Semantic(String),
    #[error("failed to read file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write file {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode menu yaml: {0}")]
    Encode(#[source] serde_yaml::Error),
    #[error("failed to resolve home directory for configuration paths")]
    HomeDirectoryUnavailable,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_display_carries_the_parser_message() {
        let err = ConfigError::Malformed {
            message: "root element must be a sequence of menu items".to_string(),
            line: 0,
            column: 0,
        };
        assert_eq!(
            err.to_string(),
            "malformed menu document: root element must be a sequence of menu items"
        );
    }

    #[test]
    fn schema_errors_name_field_and_context() {
        let missing = ConfigError::MissingField {
            field: "title".to_string(),
            context: "item 2".to_string(),
        };
        assert_eq!(missing.to_string(), "missing required field `title` in item 2");

        let mismatch = ConfigError::TypeMismatch {
            field: "sticky".to_string(),
            context: "item 1 > submenu item 1".to_string(),
        };
        assert_eq!(
            mismatch.to_string(),
            "field `sticky` has the wrong type in item 1 > submenu item 1"
        );
    }
}
