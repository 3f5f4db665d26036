// Seams between the bundler core and its platform collaborators

use async_trait::async_trait;

use super::errors::BundleError;
use super::models::JobState;

/// Trait for retrieving one remote asset as raw bytes
#[async_trait]
pub trait AssetFetcher: Send + Sync {
    /// Name of the fetcher (for logging)
    fn name(&self) -> &'static str;

    /// GET the URL; no retries, a single failure is the caller's call
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, BundleError>;
}

/// Trait for persisting a finished archive
///
/// The collaborator decides the on-disk path and resolves filename
/// collisions (uniquify semantics: colliding names get a suffix rather
/// than overwriting). Returns the name the archive was saved under.
#[async_trait]
pub trait ArchiveSink: Send + Sync {
    async fn save(&self, bytes: &[u8], suggested_filename: &str) -> Result<String, BundleError>;
}

/// Observer of job state changes (popup, injected page UI, ...)
///
/// Delivery is best effort: at most once per emission, no retry. An
/// unreachable observer must never fail the job, so implementations
/// report failure through the Result and the reporter swallows it.
pub trait StateObserver: Send + Sync {
    fn on_state(&self, state: &JobState) -> Result<(), String>;
}
