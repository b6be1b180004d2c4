// Disk-backed image store with an exact id -> filename index

use dashmap::DashMap;
use fresco_core::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

/// A file persisted in the upload directory.
#[derive(Debug, Clone)]
pub struct StoredImage {
    pub id: String,
    pub filename: String,
    pub path: PathBuf,
}

/// Content store for uploaded images.
///
/// Files are keyed by a generated uuid and named `{id}{original extension}`.
/// Lookups go through an exact id -> filename index rather than a substring
/// scan of the directory, so a derived `{id}_colored.png` artifact can never
/// shadow its source. The index is rebuilt lazily from the directory after a
/// restart.
pub struct ImageStore {
    root: PathBuf,
    index: DashMap<String, String>,
}

impl ImageStore {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)
            .map_err(|e| Error::Storage(format!("failed to create upload dir: {}", e)))?;
        Ok(Self {
            root,
            index: DashMap::new(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Persist uploaded bytes under a fresh id. The original filename only
    /// contributes its extension.
    pub async fn store(&self, bytes: &[u8], original_filename: &str) -> Result<StoredImage> {
        let id = Uuid::new_v4().to_string();
        let filename = match Path::new(original_filename)
            .extension()
            .and_then(|ext| ext.to_str())
        {
            Some(ext) => format!("{}.{}", id, ext),
            None => id.clone(),
        };
        let path = self.root.join(&filename);

        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| Error::Storage(format!("failed to write {}: {}", filename, e)))?;

        debug!("stored {} ({} bytes)", filename, bytes.len());
        self.index.insert(id.clone(), filename.clone());
        Ok(StoredImage { id, filename, path })
    }

    /// Resolve an id to its stored file. Exact match on the id, never a
    /// substring scan: derived artifacts are excluded by construction.
    pub async fn locate(&self, id: &str) -> Result<StoredImage> {
        if let Some(filename) = self.index.get(id).map(|entry| entry.value().clone()) {
            let path = self.root.join(&filename);
            if path.exists() {
                return Ok(StoredImage {
                    id: id.to_string(),
                    filename,
                    path,
                });
            }
            self.index.remove(id);
        }

        // Index miss: rebuild the entry from disk. The source file's stem is
        // exactly the id, which excludes `{id}_colored.png` and any other id
        // this one is a substring of.
        let mut entries = tokio::fs::read_dir(&self.root)
            .await
            .map_err(|e| Error::Storage(format!("failed to read upload dir: {}", e)))?;
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| Error::Storage(format!("failed to read upload dir: {}", e)))?
        {
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            let stem = Path::new(name)
                .file_stem()
                .and_then(|stem| stem.to_str())
                .unwrap_or(name);
            if stem == id {
                self.index.insert(id.to_string(), name.to_string());
                return Ok(StoredImage {
                    id: id.to_string(),
                    filename: name.to_string(),
                    path: entry.path(),
                });
            }
        }

        Err(Error::NotFound(format!("image '{}' not found", id)))
    }

    /// Read a stored file by exact filename.
    pub async fn retrieve(&self, filename: &str) -> Result<Vec<u8>> {
        validate_filename(filename)?;
        let path = self.root.join(filename);
        if !path.exists() {
            return Err(Error::NotFound(format!("file '{}' not found", filename)));
        }
        tokio::fs::read(&path)
            .await
            .map_err(|e| Error::Storage(format!("failed to read {}: {}", filename, e)))
    }

    /// Persist a derived artifact next to its source, e.g. the
    /// `{id}_colored.png` output of color application.
    pub async fn store_derived(&self, id: &str, suffix: &str, bytes: &[u8]) -> Result<StoredImage> {
        let filename = format!("{}{}", id, suffix);
        let path = self.root.join(&filename);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| Error::Storage(format!("failed to write {}: {}", filename, e)))?;
        debug!("stored derived {} ({} bytes)", filename, bytes.len());
        Ok(StoredImage {
            id: id.to_string(),
            filename,
            path,
        })
    }
}

/// Reject path traversal in client-supplied filenames.
fn validate_filename(filename: &str) -> Result<()> {
    if filename.is_empty()
        || filename.contains("..")
        || filename.contains('/')
        || filename.contains('\\')
    {
        return Err(Error::Validation(format!(
            "invalid filename '{}'",
            filename
        )));
    }
    Ok(())
}
