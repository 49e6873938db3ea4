use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to read {location}: {source}")]
    Read {
        location: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {location}: {source}")]
    Write {
        location: String,
        #[source]
        source: std::io::Error,
    },

    #[error("document at {location} is unreadable: {reason}")]
    Corrupt { location: String, reason: String },

    #[error("document version {found} is newer than this build supports ({supported})")]
    UnsupportedVersion { found: String, supported: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
