//! Reference document loaded once at startup.
//!
//! DESIGN
//! ======
//! The newsletter never changes while the server runs, so its text is
//! extracted a single time and shared behind an `Arc` in [`crate::state`].
//! PDFs go through `pdf-extract`; `.txt` and `.md` files are read as UTF-8,
//! which keeps local runs and tests free of binary fixtures.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("failed to read reference document {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to extract text from {path}: {reason}")]
    Extract { path: PathBuf, reason: String },
}

/// Immutable text of the reference document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceDocument {
    source: PathBuf,
    text: String,
}

impl ReferenceDocument {
    /// Read and extract the document at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::Read`] when the file cannot be read and
    /// [`DocumentError::Extract`] when its text cannot be decoded.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| DocumentError::Read { path: path.to_path_buf(), source })?;

        let text = if is_plain_text(path) {
            String::from_utf8(bytes)
                .map_err(|e| DocumentError::Extract { path: path.to_path_buf(), reason: e.to_string() })?
        } else {
            pdf_extract::extract_text_from_mem(&bytes)
                .map_err(|e| DocumentError::Extract { path: path.to_path_buf(), reason: e.to_string() })?
        };

        if text.trim().is_empty() {
            warn!(path = %path.display(), "reference document has no extractable text");
        }
        info!(path = %path.display(), chars = text.chars().count(), "reference document loaded");

        Ok(Self { source: path.to_path_buf(), text })
    }

    /// Wrap already-extracted text.
    #[must_use]
    pub fn from_text(text: impl Into<String>) -> Self {
        Self { source: PathBuf::new(), text: text.into() }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// File the text was loaded from; empty for [`ReferenceDocument::from_text`].
    #[must_use]
    pub fn source(&self) -> &Path {
        &self.source
    }
}

fn is_plain_text(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("txt") || ext.eq_ignore_ascii_case("md"))
}

#[cfg(test)]
#[path = "document_test.rs"]
mod tests;
