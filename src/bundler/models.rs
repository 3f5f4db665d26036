// Common data models for bundle jobs

use serde::{Deserialize, Serialize};

use super::utils::{sanitize_file_name, EXT_PLACEHOLDER};

/// Kinds of assets a card backup can contain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AssetKind {
    /// Card cover art image
    Cover,
    /// Inline text document with the card details
    DetailsText,
    /// Per-chapter display icon
    Icon,
    /// Audio track
    Audio,
}

impl AssetKind {
    /// Extension used when the asset URL carries none.
    /// Matches what the card pages historically served.
    pub fn default_extension(&self) -> &'static str {
        match self {
            Self::Audio => "mp3",
            Self::Cover | Self::Icon => "jpg",
            Self::DetailsText => "txt",
        }
    }
}

/// Where an asset's bytes come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetSource {
    /// Remote resource fetched over HTTP
    Url(String),
    /// Content carried inline in the manifest (details text)
    Inline(String),
}

/// One asset to include in the bundle
#[derive(Debug, Clone)]
pub struct ManifestEntry {
    pub kind: AssetKind,
    pub source: AssetSource,
    /// Archive entry name; may end with the `{ext}` placeholder, which
    /// is resolved from the URL path suffix at fetch time
    pub target_filename: String,
}

impl ManifestEntry {
    /// Remote audio track, `01 - Title.{ext}` naming (zero-padded
    /// 2-digit, 1-based index).
    pub fn audio(index: usize, title: &str, url: &str) -> Self {
        Self {
            kind: AssetKind::Audio,
            source: AssetSource::Url(url.to_string()),
            target_filename: sanitize_file_name(&format!(
                "{:02} - {}.{}",
                index, title, EXT_PLACEHOLDER
            )),
        }
    }

    /// Chapter icon, `1 - Title.{ext}` naming (plain 1-based index).
    pub fn icon(index: usize, title: &str, url: &str) -> Self {
        Self {
            kind: AssetKind::Icon,
            source: AssetSource::Url(url.to_string()),
            target_filename: sanitize_file_name(&format!(
                "{} - {}.{}",
                index, title, EXT_PLACEHOLDER
            )),
        }
    }

    /// Cover art image.
    pub fn cover(title: &str, url: &str) -> Self {
        Self {
            kind: AssetKind::Cover,
            source: AssetSource::Url(url.to_string()),
            target_filename: sanitize_file_name(&format!(
                "Cover Art - {}.{}",
                title, EXT_PLACEHOLDER
            )),
        }
    }

    /// Inline card-details text document.
    pub fn details(title: &str, content: String) -> Self {
        Self {
            kind: AssetKind::DetailsText,
            source: AssetSource::Inline(content),
            target_filename: sanitize_file_name(&format!("{} - Details.txt", title)),
        }
    }

    pub fn is_inline(&self) -> bool {
        matches!(self.source, AssetSource::Inline(_))
    }
}

/// Ordered list of assets for one bundle job
#[derive(Debug, Clone)]
pub struct AssetManifest {
    /// Card title; names the archive (`{title}.zip` after sanitizing)
    pub title: String,
    pub entries: Vec<ManifestEntry>,
}

impl AssetManifest {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            entries: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Suggested filename for the persisted archive.
    pub fn archive_filename(&self) -> String {
        format!("{}.zip", sanitize_file_name(&self.title))
    }
}

/// Pipeline stage, as shown to observers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStage {
    Idle,
    Fetching,
    Compressing,
    Finalizing,
    Complete,
    Error,
}

/// Externally observable job state, last-known snapshot per context
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobState {
    pub stage: JobStage,
    /// 0..=100, non-decreasing within a job
    pub percent: u8,
    pub message: String,
    pub is_error: bool,
}

impl JobState {
    /// Initial state before any job has run.
    pub fn idle() -> Self {
        Self {
            stage: JobStage::Idle,
            percent: 0,
            message: "Ready to back up your card content".to_string(),
            is_error: false,
        }
    }

    pub fn in_progress(stage: JobStage, percent: u8, message: String) -> Self {
        Self {
            stage,
            percent,
            message,
            is_error: false,
        }
    }

    pub fn complete(message: String) -> Self {
        Self {
            stage: JobStage::Complete,
            percent: 100,
            message,
            is_error: false,
        }
    }

    /// Terminal failure state; percent resets to 0.
    pub fn failed(message: String) -> Self {
        Self {
            stage: JobStage::Error,
            percent: 0,
            message,
            is_error: true,
        }
    }
}
