// Scraped card payload: models, details text, manifest construction

use serde::{Deserialize, Serialize};

use crate::bundler::models::{AssetManifest, ManifestEntry};

/// Card data handed over by the page-context scraper.
///
/// Mirrors the JSON embedded in the card page, plus the title and
/// cover art URL read off the rendered DOM (the embedded title can be
/// stale, the page one wins).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    pub title: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "coverArtUrl")]
    pub cover_art_url: Option<String>,
    pub content: CardContent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardContent {
    #[serde(default)]
    pub chapters: Vec<Chapter>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chapter {
    #[serde(default)]
    pub display: Option<ChapterDisplay>,
    #[serde(default)]
    pub tracks: Vec<Track>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChapterDisplay {
    #[serde(rename = "icon16x16")]
    pub icon_16x16: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub title: String,
    #[serde(default, rename = "trackUrl")]
    pub track_url: Option<String>,
}

impl Card {
    /// Parse the scraped JSON payload.
    pub fn parse(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    fn track_titles(&self) -> Vec<&str> {
        self.content
            .chapters
            .iter()
            .flat_map(|c| c.tracks.iter())
            .map(|t| t.title.as_str())
            .collect()
    }

    /// Plain-text card details document included in every bundle.
    pub fn details_text(&self) -> String {
        let titles = self.track_titles();
        let track_list = if titles.is_empty() {
            "No tracks available".to_string()
        } else {
            titles
                .iter()
                .enumerate()
                .map(|(i, t)| format!("{}. {}", i + 1, t))
                .collect::<Vec<_>>()
                .join("\n")
        };

        format!(
            "Card Title: {}\nAuthor: {}\n\nDescription:\n{}\n\nTrack List:\n{}",
            self.title,
            self.author.as_deref().unwrap_or("Unknown Author"),
            self.description.as_deref().unwrap_or("No description available"),
            track_list
        )
    }

    /// Build the ordered bundle manifest for this card.
    ///
    /// Cover art first, then audio tracks and chapter icons in page
    /// order, details text last. Track and icon counters are global
    /// across chapters, 1-based, and independent of each other.
    pub fn build_manifest(&self) -> AssetManifest {
        let mut manifest = AssetManifest::new(&self.title);

        if let Some(url) = &self.cover_art_url {
            manifest.entries.push(ManifestEntry::cover(&self.title, url));
        }

        let mut track_number = 1usize;
        let mut icon_number = 1usize;
        for chapter in &self.content.chapters {
            for track in &chapter.tracks {
                if let Some(url) = &track.track_url {
                    manifest
                        .entries
                        .push(ManifestEntry::audio(track_number, &track.title, url));
                    track_number += 1;
                }
                if let Some(url) = chapter.display.as_ref().and_then(|d| d.icon_16x16.as_ref()) {
                    manifest
                        .entries
                        .push(ManifestEntry::icon(icon_number, &track.title, url));
                    icon_number += 1;
                }
            }
        }

        manifest
            .entries
            .push(ManifestEntry::details(&self.title, self.details_text()));
        manifest
    }
}
