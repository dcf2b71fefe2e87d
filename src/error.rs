// src/error.rs
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PatchError {
    /// Record boundaries could not be determined. Fatal to the whole run;
    /// nothing is written back.
    #[error("malformed record: unbalanced structure at byte {0}")]
    MalformedRecord(usize),

    /// Image lookup has no asset to fall back on. Caught during config
    /// validation, before any scanning starts.
    #[error("image asset unavailable: {0}")]
    AssetUnavailable(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Json(#[from] serde_json::Error),
}
