// Error types for bundle jobs

use std::fmt;

#[derive(Debug, Clone)]
pub enum BundleError {
    /// Job was requested with no assets to bundle
    EmptyManifest,

    /// A single asset could not be retrieved (status is None on
    /// transport-level failures)
    Fetch {
        url: String,
        status: Option<u16>,
    },

    /// The archive could not be serialized
    Serialization(String),

    /// The finished archive could not be persisted
    Persistence(String),

    /// A bundle job is already in flight for this context
    JobAlreadyRunning,

    /// Unknown error with details
    Unknown(String),
}

impl fmt::Display for BundleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyManifest => write!(f, "Nothing to back up: the card has no downloadable content"),
            Self::Fetch { url, status } => match status {
                Some(code) => write!(f, "Failed to fetch {} (HTTP {})", url, code),
                None => write!(f, "Failed to fetch {} (network error)", url),
            },
            Self::Serialization(msg) => write!(f, "Archive error: {}", msg),
            Self::Persistence(msg) => write!(f, "Could not save backup: {}", msg),
            Self::JobAlreadyRunning => write!(f, "A backup is already in progress"),
            Self::Unknown(msg) => write!(f, "Unknown error: {}", msg),
        }
    }
}

impl std::error::Error for BundleError {}

// Convert from String for collaborators that only report text
impl From<String> for BundleError {
    fn from(s: String) -> Self {
        // Smart detection of error types

        if s.contains("zip") || s.contains("compress") || s.contains("deflate") {
            return Self::Serialization(s);
        }

        if s.contains("save") || s.contains("write") || s.contains("disk")
            || s.contains("No space")
        {
            return Self::Persistence(s);
        }

        // Everything else
        Self::Unknown(s)
    }
}

impl BundleError {
    /// Per-asset fetch failures are tolerated by the batch; everything
    /// else aborts the job.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Fetch { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_display_with_status() {
        let err = BundleError::Fetch {
            url: "https://cdn/x.mp3".to_string(),
            status: Some(404),
        };
        assert_eq!(err.to_string(), "Failed to fetch https://cdn/x.mp3 (HTTP 404)");
    }

    #[test]
    fn test_fetch_display_network() {
        let err = BundleError::Fetch {
            url: "bad://x".to_string(),
            status: None,
        };
        assert!(err.to_string().contains("network error"));
    }

    #[test]
    fn test_string_classification() {
        assert!(matches!(
            BundleError::from("zip central directory corrupt".to_string()),
            BundleError::Serialization(_)
        ));
        assert!(matches!(
            BundleError::from("could not write backup file".to_string()),
            BundleError::Persistence(_)
        ));
        assert!(matches!(
            BundleError::from("something odd".to_string()),
            BundleError::Unknown(_)
        ));
    }

    #[test]
    fn test_only_fetch_is_recoverable() {
        assert!(BundleError::Fetch { url: String::new(), status: None }.is_recoverable());
        assert!(!BundleError::EmptyManifest.is_recoverable());
        assert!(!BundleError::Serialization("x".into()).is_recoverable());
        assert!(!BundleError::Persistence("x".into()).is_recoverable());
    }
}
