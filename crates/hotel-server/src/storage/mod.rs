use hotel_common::checksum::sha256_hex;
use hotel_common::{HotelError, Result};
use serde::Serialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

pub mod config;

/// Longest accepted file name, in bytes
pub const MAX_FILENAME_LENGTH: usize = 255;

const IGNORE_FILE: &str = ".gitignore";

/// Uploaded dataset files in a single local directory
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    pub fn new(config: config::StorageConfig) -> Self {
        debug!("Initializing file storage at {}", config.upload_dir.display());
        Self {
            root: config.upload_dir,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the upload directory, with a `.gitignore` that ignores its contents
    #[instrument(skip(self), fields(root = %self.root.display()))]
    pub async fn ensure_root(&self) -> Result<()> {
        if tokio::fs::try_exists(&self.root).await? {
            return Ok(());
        }

        tokio::fs::create_dir_all(&self.root).await?;
        tokio::fs::write(self.root.join(IGNORE_FILE), b"*").await?;
        info!("Created upload directory {}", self.root.display());
        Ok(())
    }

    /// Location of a stored file; the name is sanitized first
    pub fn path_for(&self, filename: &str) -> Result<PathBuf> {
        Ok(self.root.join(sanitize_filename(filename)?))
    }

    #[instrument(skip(self, content), fields(size = content.len()))]
    pub async fn save(&self, filename: &str, content: &[u8]) -> Result<StoredFile> {
        let name = sanitize_filename(filename)?;
        self.ensure_root().await?;

        let path = self.root.join(&name);
        tokio::fs::write(&path, content).await?;

        let stored = StoredFile {
            name,
            size: content.len() as u64,
            sha256: sha256_hex(content),
        };
        info!(
            name = %stored.name,
            size = stored.size,
            checksum = %stored.sha256,
            "Stored uploaded file"
        );
        Ok(stored)
    }

    /// Stored files sorted by name, or `None` if nothing was ever uploaded
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Option<Vec<FileEntry>>> {
        let mut dir = match tokio::fs::read_dir(&self.root).await {
            Ok(dir) => dir,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let mut entries = Vec::new();
        while let Some(entry) = dir.next_entry().await? {
            let metadata = entry.metadata().await?;
            if !metadata.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if name == IGNORE_FILE {
                continue;
            }
            entries.push(FileEntry {
                name,
                size: metadata.len(),
            });
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        debug!("Listed {} stored files", entries.len());
        Ok(Some(entries))
    }

    pub async fn exists(&self, filename: &str) -> Result<bool> {
        let path = self.path_for(filename)?;
        match tokio::fs::metadata(&path).await {
            Ok(metadata) => Ok(metadata.is_file()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, filename: &str) -> Result<String> {
        let name = sanitize_filename(filename)?;
        match tokio::fs::remove_file(self.root.join(&name)).await {
            Ok(()) => {
                info!("Deleted stored file {}", name);
                Ok(name)
            },
            Err(e) if e.kind() == ErrorKind::NotFound => Err(HotelError::not_found("File", name)),
            Err(e) => Err(e.into()),
        }
    }

    /// Delete every stored file; returns the names removed
    #[instrument(skip(self))]
    pub async fn delete_all(&self) -> Result<Vec<String>> {
        let Some(entries) = self.list().await? else {
            return Ok(Vec::new());
        };

        let mut deleted = Vec::with_capacity(entries.len());
        for entry in entries {
            tokio::fs::remove_file(self.root.join(&entry.name)).await?;
            deleted.push(entry.name);
        }

        info!("Deleted {} stored files", deleted.len());
        Ok(deleted)
    }
}

/// Result of storing an upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredFile {
    pub name: String,
    pub size: u64,
    pub sha256: String,
}

/// A file present in the upload directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileEntry {
    pub name: String,
    pub size: u64,
}

/// Strip path separators and reject names that cannot be stored
pub fn sanitize_filename(filename: &str) -> Result<String> {
    let name: String = filename
        .trim()
        .chars()
        .filter(|c| !matches!(c, '/' | '\\' | '\0'))
        .collect();

    if name.is_empty() || name == "." || name == ".." {
        return Err(HotelError::InvalidArgument(format!(
            "'{}' is not a valid file name",
            filename
        )));
    }
    if name == IGNORE_FILE {
        return Err(HotelError::InvalidArgument(format!("'{}' is reserved", name)));
    }
    if name.len() > MAX_FILENAME_LENGTH {
        return Err(HotelError::InvalidArgument(format!(
            "file name must not exceed {} bytes",
            MAX_FILENAME_LENGTH
        )));
    }
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn storage(dir: &TempDir) -> FileStorage {
        FileStorage::new(config::StorageConfig::new(dir.path().join("uploads")))
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("hotels.csv").unwrap(), "hotels.csv");
        assert_eq!(sanitize_filename("../../etc/passwd").unwrap(), "....etcpasswd");
        assert_eq!(sanitize_filename(" a/b.csv ").unwrap(), "ab.csv");
        assert!(sanitize_filename("..").is_err());
        assert!(sanitize_filename("/").is_err());
        assert!(sanitize_filename(".gitignore").is_err());
        assert!(sanitize_filename(&"x".repeat(256)).is_err());
    }

    #[tokio::test]
    async fn test_list_before_any_upload() {
        let dir = TempDir::new().unwrap();
        assert_eq!(storage(&dir).list().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_save_list_delete() {
        let dir = TempDir::new().unwrap();
        let storage = storage(&dir);

        let stored = storage.save("b.csv", b"hello world").await.unwrap();
        assert_eq!(stored.size, 11);
        assert_eq!(
            stored.sha256,
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
        storage.save("a.csv", b"x").await.unwrap();

        let names: Vec<_> = storage
            .list()
            .await
            .unwrap()
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["a.csv", "b.csv"]);
        assert!(storage.root().join(".gitignore").exists());

        assert!(storage.exists("a.csv").await.unwrap());
        storage.delete("a.csv").await.unwrap();
        assert!(!storage.exists("a.csv").await.unwrap());

        let err = storage.delete("a.csv").await.unwrap_err();
        assert!(matches!(err, HotelError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_all() {
        let dir = TempDir::new().unwrap();
        let storage = storage(&dir);
        assert!(storage.delete_all().await.unwrap().is_empty());

        storage.save("one.csv", b"1").await.unwrap();
        storage.save("two.csv", b"2").await.unwrap();

        let deleted = storage.delete_all().await.unwrap();
        assert_eq!(deleted.len(), 2);
        assert_eq!(storage.list().await.unwrap(), Some(Vec::new()));
    }
}
