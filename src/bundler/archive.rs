// In-memory archive accumulation and ZIP serialization

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::errors::BundleError;

/// Owns the named entries of one bundle job and serializes them into a
/// single compressed stream. Discarded after serialization.
pub struct ArchiveBuilder {
    entries: Vec<(String, Vec<u8>)>,
}

impl ArchiveBuilder {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert or overwrite an entry by name. Last write wins; name
    /// uniqueness is the manifest's responsibility, not enforced here.
    pub fn add_entry(&mut self, name: &str, data: Vec<u8>) {
        if let Some(existing) = self.entries.iter_mut().find(|(n, _)| n == name) {
            existing.1 = data;
        } else {
            self.entries.push((name.to_string(), data));
        }
    }

    pub fn add_text_entry(&mut self, name: &str, text: &str) {
        self.add_entry(name, text.as_bytes().to_vec());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize every entry into one deflated ZIP stream.
    ///
    /// `on_progress` receives non-decreasing fractions as entries are
    /// written and is always called with 1.0 before returning. The
    /// output is all-or-nothing: any zip failure aborts the whole call.
    pub fn serialize<F>(self, mut on_progress: F) -> Result<Vec<u8>, BundleError>
    where
        F: FnMut(f64),
    {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        let total = self.entries.len();
        for (i, (name, data)) in self.entries.into_iter().enumerate() {
            writer
                .start_file(name.as_str(), options)
                .map_err(|e| BundleError::Serialization(format!("{}: {}", name, e)))?;
            writer
                .write_all(&data)
                .map_err(|e| BundleError::Serialization(format!("{}: {}", name, e)))?;
            on_progress((i + 1) as f64 / total as f64);
        }

        let cursor = writer
            .finish()
            .map_err(|e| BundleError::Serialization(e.to_string()))?;
        on_progress(1.0);
        Ok(cursor.into_inner())
    }
}

impl Default for ArchiveBuilder {
    fn default() -> Self {
        Self::new()
    }
}
