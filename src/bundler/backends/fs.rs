// Filesystem archive sink with uniquify conflict handling

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::bundler::errors::BundleError;
use crate::bundler::traits::ArchiveSink;

/// Persists archives into a directory. Colliding filenames get a
/// ` (n)` suffix before the extension instead of overwriting, matching
/// the browser download manager's uniquify behavior.
pub struct FileSink {
    dir: PathBuf,
}

impl FileSink {
    pub fn new() -> Self {
        Self {
            dir: dirs::download_dir().unwrap_or_else(|| PathBuf::from(".")),
        }
    }

    pub fn with_dir<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    fn uniquify(dir: &Path, filename: &str) -> PathBuf {
        let candidate = dir.join(filename);
        if !candidate.exists() {
            return candidate;
        }

        let (stem, ext) = match filename.rsplit_once('.') {
            Some((s, e)) => (s.to_string(), format!(".{}", e)),
            None => (filename.to_string(), String::new()),
        };

        let mut n = 1u32;
        loop {
            let candidate = dir.join(format!("{} ({}){}", stem, n, ext));
            if !candidate.exists() {
                return candidate;
            }
            n += 1;
        }
    }
}

impl Default for FileSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ArchiveSink for FileSink {
    async fn save(&self, bytes: &[u8], suggested_filename: &str) -> Result<String, BundleError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| BundleError::Persistence(format!("{}: {}", self.dir.display(), e)))?;

        let path = Self::uniquify(&self.dir, suggested_filename);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| BundleError::Persistence(format!("{}: {}", path.display(), e)))?;

        let saved_as = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| suggested_filename.to_string());
        eprintln!("[FileSink] Saved archive as {}", saved_as);
        Ok(saved_as)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_writes_bytes() {
        let tmp = tempfile::tempdir().unwrap();
        let sink = FileSink::with_dir(tmp.path());

        let name = sink.save(b"PK-data", "Card.zip").await.unwrap();
        assert_eq!(name, "Card.zip");
        assert_eq!(std::fs::read(tmp.path().join("Card.zip")).unwrap(), b"PK-data");
    }

    #[tokio::test]
    async fn test_save_uniquifies_on_collision() {
        let tmp = tempfile::tempdir().unwrap();
        let sink = FileSink::with_dir(tmp.path());

        sink.save(b"one", "Card.zip").await.unwrap();
        let second = sink.save(b"two", "Card.zip").await.unwrap();
        let third = sink.save(b"three", "Card.zip").await.unwrap();

        assert_eq!(second, "Card (1).zip");
        assert_eq!(third, "Card (2).zip");
        assert_eq!(std::fs::read(tmp.path().join("Card.zip")).unwrap(), b"one");
        assert_eq!(std::fs::read(tmp.path().join("Card (1).zip")).unwrap(), b"two");
    }

    #[tokio::test]
    async fn test_save_creates_missing_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let nested = tmp.path().join("backups/yoto");
        let sink = FileSink::with_dir(&nested);

        sink.save(b"x", "a.zip").await.unwrap();
        assert!(nested.join("a.zip").exists());
    }
}
