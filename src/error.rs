use thiserror::Error;

/// Failures a recommendation request can surface to the caller.
#[derive(Debug, Error)]
pub enum RecommendError {
    #[error("unknown item: {0}")]
    UnknownItem(String),
    #[error("expected one or two input items, got {0}")]
    InvalidInputCount(usize),
    #[error("no candidates found for the given inputs")]
    EmptyCandidatePool,
}

/// Fatal startup failures while reading the precomputed table artifacts.
#[derive(Debug, Error)]
pub enum TableLoadError {
    #[error("cannot read table artifact {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot decode table artifact {path}")]
    Decode {
        path: String,
        #[source]
        source: bincode::Error,
    },
    #[error("invalid entry for item {item}: {reason}")]
    InvalidEntry { item: String, reason: String },
}
