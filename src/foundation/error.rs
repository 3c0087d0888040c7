use std::path::{Path, PathBuf};

/// Convenience result type used across the crate.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Top-level error taxonomy used by catalog APIs.
#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    /// Invalid user-provided input (paths, extensions, options).
    #[error("validation error: {0}")]
    Validation(String),

    /// An existing `Contents.json` could not be read or parsed.
    #[error("metadata error: {}: {source}", path.display())]
    MetadataRead {
        /// Metadata file that failed.
        path: PathBuf,
        /// Underlying read or decode failure.
        #[source]
        source: anyhow::Error,
    },

    /// A source SVG is malformed or declares malformed dimensions.
    #[error("svg parse error: {}: {msg}", path.display())]
    SourceParse {
        /// Offending source file.
        path: PathBuf,
        /// Description of the failure.
        msg: String,
    },

    /// The external rasterizer is not installed.
    #[error("missing tool: {0}")]
    MissingTool(String),

    /// The rasterizer ran but failed to produce the requested output.
    #[error("conversion error: {}: {msg}", path.display())]
    Conversion {
        /// Source file being converted.
        path: PathBuf,
        /// Description of the failure.
        msg: String,
    },

    /// Stat, read, or write failure on the filesystem.
    #[error("filesystem error: {}: {source}", path.display())]
    Filesystem {
        /// Path the operation was applied to.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Failure attributed to a named catalog node.
    #[error("{node}: {source}")]
    Node {
        /// Name of the group or image set that failed.
        node: String,
        /// Wrapped failure.
        #[source]
        source: Box<CatalogError>,
    },

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Coarse classification of a [`CatalogError`], unaffected by node wrapping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// See [`CatalogError::Validation`].
    Validation,
    /// See [`CatalogError::MetadataRead`].
    MetadataRead,
    /// See [`CatalogError::SourceParse`].
    SourceParse,
    /// See [`CatalogError::MissingTool`].
    MissingTool,
    /// See [`CatalogError::Conversion`].
    Conversion,
    /// See [`CatalogError::Filesystem`].
    Filesystem,
    /// See [`CatalogError::Other`].
    Other,
}

impl CatalogError {
    /// Build a [`CatalogError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CatalogError::MetadataRead`] value.
    pub fn metadata(path: impl Into<PathBuf>, source: impl Into<anyhow::Error>) -> Self {
        Self::MetadataRead {
            path: path.into(),
            source: source.into(),
        }
    }

    /// Build a [`CatalogError::SourceParse`] value.
    pub fn source_parse(path: impl Into<PathBuf>, msg: impl Into<String>) -> Self {
        Self::SourceParse {
            path: path.into(),
            msg: msg.into(),
        }
    }

    /// Build a [`CatalogError::MissingTool`] value.
    pub fn missing_tool(msg: impl Into<String>) -> Self {
        Self::MissingTool(msg.into())
    }

    /// Build a [`CatalogError::Conversion`] value.
    pub fn conversion(path: impl Into<PathBuf>, msg: impl Into<String>) -> Self {
        Self::Conversion {
            path: path.into(),
            msg: msg.into(),
        }
    }

    /// Build a [`CatalogError::Filesystem`] value.
    pub fn fs(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Filesystem {
            path: path.into(),
            source,
        }
    }

    /// Attribute this error to the node `node`.
    pub fn at_node(self, node: impl Into<String>) -> Self {
        Self::Node {
            node: node.into(),
            source: Box::new(self),
        }
    }

    /// Classification of the innermost error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::MetadataRead { .. } => ErrorKind::MetadataRead,
            Self::SourceParse { .. } => ErrorKind::SourceParse,
            Self::MissingTool(_) => ErrorKind::MissingTool,
            Self::Conversion { .. } => ErrorKind::Conversion,
            Self::Filesystem { .. } => ErrorKind::Filesystem,
            Self::Node { source, .. } => source.kind(),
            Self::Other(_) => ErrorKind::Other,
        }
    }

    /// Whether the rasterizer reported that its external tool is not installed.
    pub fn is_missing_tool(&self) -> bool {
        self.kind() == ErrorKind::MissingTool
    }
}

/// Attach the failing path to an IO result.
pub(crate) trait IoResultExt<T> {
    fn at_path(self, path: &Path) -> CatalogResult<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn at_path(self, path: &Path) -> CatalogResult<T> {
        self.map_err(|e| CatalogError::fs(path, e))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
