//! Error taxonomy for the library core
//!
//! Catalog scanning and icon resolution never surface these to callers:
//! they are logged and degraded to "no entries" or "no icon". The CLI and the
//! file-backed host collaborators wrap them in `anyhow` with context.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum QuickRunError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unreadable archive {path}: {source}")]
    Zip {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("cannot decode image {path}: {source}")]
    ImageDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("cannot parse SVG {path}: {message}")]
    SvgParse { path: PathBuf, message: String },

    #[error("unknown icon key: {0}")]
    UnknownKey(String),

    #[error("unknown kind id: {0}")]
    UnknownKind(String),

    #[error("runnable item {0:?} has no command to execute")]
    NotExecutable(String),

    #[error("no runnable item named {0:?}")]
    ItemNotFound(String),
}

impl QuickRunError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn zip(path: impl Into<PathBuf>, source: zip::result::ZipError) -> Self {
        Self::Zip {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = QuickRunError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_message_names_path() {
        let err = QuickRunError::io(
            "/tmp/missing.svg",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        let msg = err.to_string();
        assert!(msg.contains("/tmp/missing.svg"));
        assert!(msg.contains("gone"));
    }
}
