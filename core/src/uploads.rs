//! Durable storage for uploaded files.
//!
//! Uploads are written to `<root>/<file name>` before they are submitted, so
//! the content exists on disk for as long as the operator keeps the directory.

use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

const FALLBACK_NAME: &str = "upload.bin";

#[derive(Debug, Clone)]
pub struct UploadStore {
    root: PathBuf,
}

impl UploadStore {
    /// Opens the store, creating `root` if needed.
    pub async fn open(root: impl Into<PathBuf>) -> io::Result<Self> {
        let root = root.into();
        tokio::fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Writes `content` under the final component of `display_name`.
    pub async fn persist(&self, display_name: &str, content: &[u8]) -> io::Result<PathBuf> {
        let path = self.root.join(stored_name(display_name));
        tokio::fs::write(&path, content).await?;
        debug!(path = %path.display(), bytes = content.len(), "stored upload");
        Ok(path)
    }
}

/// Reduces a client-supplied name to a bare file name.
fn stored_name(display_name: &str) -> &str {
    let name = display_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();

    match name {
        "" | "." | ".." => FALLBACK_NAME,
        name => name,
    }
}
