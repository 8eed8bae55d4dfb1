//! Error types for metadata assembly

use std::path::PathBuf;

use thiserror::Error;

/// Result type for metadata operations
pub type Result<T> = std::result::Result<T, MetaError>;

/// A single schema violation: where in the instance it occurred and which
/// rule was broken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolation {
    /// JSON pointer into the validated instance
    pub path: String,
    /// Human-readable description of the violated rule
    pub message: String,
}

fn format_violations(violations: &[SchemaViolation]) -> String {
    violations
        .iter()
        .map(|v| {
            if v.path.is_empty() {
                v.message.clone()
            } else {
                format!("{}: {}", v.path, v.message)
            }
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// Metadata assembly errors
///
/// Every failure is fatal to the current assembly run; there is no partial
/// manifest or warning-only mode. The only expected absences are a missing
/// metadata marker directory and missing optional sibling files, which are
/// not errors.
#[derive(Error, Debug)]
pub enum MetaError {
    #[error("not a component library")]
    NotAComponentLibrary,

    #[error("invalid main metadata: {}", format_violations(.violations))]
    InvalidMainMetadata { violations: Vec<SchemaViolation> },

    #[error("invalid metadata in {}: {}", .file.display(), format_violations(.violations))]
    InvalidMetadata {
        file: PathBuf,
        violations: Vec<SchemaViolation>,
    },

    #[error("malformed JSON in {}", .file.display())]
    MalformedMetadata { file: PathBuf },

    #[error("unknown string '{key}' in {location}")]
    UnknownStringKey { key: String, location: String },

    #[error("{location} must have '{field}' field")]
    MissingField {
        field: &'static str,
        location: String,
    },

    #[error("unknown props group '{group}' in prop '{prop}' of component '{component}'")]
    UnknownPropGroup {
        group: String,
        prop: String,
        component: String,
    },

    #[error("'{component}' component: group '{group}' is not defined")]
    UndefinedComponentGroup { component: String, group: String },

    #[error("type '{name}' is not defined")]
    UnknownType { name: String },

    #[error("duplicate component '{name}' in library")]
    DuplicateComponent { name: String },

    #[error("FS error while reading {}: {source}", .file.display())]
    Io {
        file: PathBuf,
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Error while reading components metadata of '{namespace}': {source}")]
    Assembly {
        namespace: String,
        source: Box<MetaError>,
    },
}

impl MetaError {
    /// Wrap an error with the owning library's namespace for context.
    pub fn in_namespace(self, namespace: &str) -> Self {
        MetaError::Assembly {
            namespace: namespace.to_string(),
            source: Box::new(self),
        }
    }

    /// Unwrap namespace-context layers down to the originating error.
    pub fn root_cause(&self) -> &MetaError {
        match self {
            MetaError::Assembly { source, .. } => source.root_cause(),
            other => other,
        }
    }
}
