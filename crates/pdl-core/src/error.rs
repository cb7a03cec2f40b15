use std::path::PathBuf;

use crate::ParameterKind;

/// Errors raised by tree lookups, mutation and persistence.
///
/// Every variant carries the `/`-separated path of the offending node so that
/// callers can surface it unchanged to the user.
#[derive(Debug, thiserror::Error)]
pub enum TreeError {
    #[error("parameter `{path}` not found: no entry `{segment}`")]
    NotFound { path: String, segment: String },

    #[error("parameter `{path}` is of type {actual}, expected {expected}")]
    TypeMismatch {
        path: String,
        expected: ParameterKind,
        actual: ParameterKind,
    },

    #[error("`{key}` is not a valid selection for `{path}` (one of: {})", .available.join(", "))]
    UnknownSelection {
        path: String,
        key: String,
        available: Vec<String>,
    },

    #[error("node `{path}` is missing attribute `{attribute}`")]
    MissingAttribute {
        path: String,
        attribute: &'static str,
    },

    #[error("node `{path}` has an invalid `{attribute}` attribute: {message}")]
    InvalidAttribute {
        path: String,
        attribute: &'static str,
        message: String,
    },

    #[error("invalid embedded content for `{path}`: {source}")]
    EmbeddedContent {
        path: String,
        #[source]
        source: base64::DecodeError,
    },

    #[error("failed to access `{}`: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no schema registered as `{}`", .name.as_deref().unwrap_or("<unnamed>"))]
    UnknownSchema { name: Option<String> },

    #[error("malformed parameter document: {0}")]
    Json(#[from] serde_json::Error),
}

impl TreeError {
    /// Selection key that does not name any of `available`.
    ///
    /// Generated bindings raise this when a tree carries a key their enum
    /// does not know; the path is filled in by the caller when known.
    pub fn unknown_selection<S: AsRef<str>>(key: &str, available: &[S]) -> Self {
        TreeError::UnknownSelection {
            path: String::new(),
            key: key.to_owned(),
            available: available.iter().map(|s| s.as_ref().to_owned()).collect(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TreeError::Io {
            path: path.into(),
            source,
        }
    }

    /// Anchors an error raised on a detached node at `path`.
    ///
    /// Only fills a path that is still empty, so an error already carrying
    /// the full location passes through unchanged.
    pub fn at(mut self, path: &str) -> Self {
        match &mut self {
            TreeError::UnknownSelection { path: p, .. }
            | TreeError::TypeMismatch { path: p, .. }
            | TreeError::NotFound { path: p, .. }
                if p.is_empty() =>
            {
                *p = path.to_owned()
            }
            _ => {}
        }
        self
    }
}

/// Joins two path components with `/`, skipping empty ones.
pub(crate) fn join_path(prefix: &str, name: &str) -> String {
    match (prefix.is_empty(), name.is_empty()) {
        (true, _) => name.to_owned(),
        (_, true) => prefix.to_owned(),
        _ => format!("{prefix}/{name}"),
    }
}
