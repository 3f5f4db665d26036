//! Bundling core for the Yoto card backup tools.
//!
//! Takes a manifest of card assets (cover art, chapter icons, audio
//! tracks, a details document), fetches them sequentially, folds them
//! into one compressed archive and persists it, while reporting staged
//! progress to a shared state store and any attached observers.
//! Scraping the card page and rendering UI live outside this crate and
//! talk to it through the seams in [`bundler::traits`].

pub mod bundler;
pub mod card;

use std::sync::Arc;

pub use bundler::{
    AssetManifest, BundleError, Bundler, JobStage, JobState, ManifestEntry, ProgressReporter,
    StateStore,
};
pub use card::Card;

use bundler::{FileSink, HttpFetcher};

/// Bundler wired with the production backends: HTTP fetcher and a
/// filesystem sink pointed at the platform download directory.
pub fn default_bundler(store: StateStore) -> Bundler {
    Bundler::new(
        Arc::new(HttpFetcher::new()),
        Arc::new(FileSink::new()),
        ProgressReporter::new(store),
    )
}
