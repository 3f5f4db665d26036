// Bundler module - the card backup pipeline core

pub mod errors;
pub mod models;
pub mod traits;
pub mod backends;
pub mod state;
pub mod progress;
pub mod archive;
pub mod orchestrator;
pub mod utils;

pub use errors::BundleError;
pub use models::{AssetKind, AssetManifest, AssetSource, JobStage, JobState, ManifestEntry};
pub use traits::{ArchiveSink, AssetFetcher, StateObserver};
pub use backends::{FileSink, HttpFetcher};
pub use state::StateStore;
pub use progress::{compute_stage_percent, ProgressReporter};
pub use archive::ArchiveBuilder;
pub use orchestrator::Bundler;
