//! On-disk storage for the identifiers captured by the last scan.
//!
//! The file is written once by `outpost scan` and read back by the fetch
//! commands, which then pass the identifiers explicitly into the client.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::identifiers::ScannedIdentifiers;

#[derive(Debug, Error)]
pub enum SessionFileError {
    #[error("session file I/O error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("session file {path} is not valid JSON: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// JSON file holding one [`ScannedIdentifiers`] value.
#[derive(Debug, Clone)]
pub struct SessionFile {
    path: PathBuf,
}

impl SessionFile {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stored identifiers. A missing file yields `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionFileError::Io`] if the file exists but cannot be read,
    /// or [`SessionFileError::Parse`] if its content is not valid JSON.
    pub fn load(&self) -> Result<Option<ScannedIdentifiers>, SessionFileError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_error(e)),
        };

        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| SessionFileError::Parse {
                path: self.path.display().to_string(),
                source: e,
            })
    }

    /// Writes `ids`, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns [`SessionFileError::Io`] if the directory or file cannot be written.
    pub fn save(&self, ids: &ScannedIdentifiers) -> Result<(), SessionFileError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let json = serde_json::to_string_pretty(ids).map_err(|e| SessionFileError::Parse {
            path: self.path.display().to_string(),
            source: e,
        })?;
        std::fs::write(&self.path, json).map_err(|e| self.io_error(e))?;

        tracing::debug!(path = %self.path.display(), "saved scanned identifiers");
        Ok(())
    }

    fn io_error(&self, source: std::io::Error) -> SessionFileError {
        SessionFileError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }
}
