use thiserror::Error;

/// Failures that stop a simulation before it starts. All of them are
/// recovered at the boundary: reported, then back to the menu or a
/// non-zero exit in direct mode. User cancellation is not represented
/// here — the engine reports it as a normal terminal outcome.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("file not found: {0}")]
    SourceNotFound(String),

    #[error("network error fetching {url}: {reason}")]
    Network { url: String, reason: String },

    #[error("content is empty")]
    EmptyContent,

    #[error("unknown radio preset: {0}")]
    InvalidPreset(String),

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
