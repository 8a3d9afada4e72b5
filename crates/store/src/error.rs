use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("corrupt log {}: {source}", path.display())]
    CorruptLog {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("corrupt progress marker {}: {source}", path.display())]
    CorruptProgress {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("store is locked by another process ({})", path.display())]
    Locked { path: PathBuf },
}

pub type Result<T> = std::result::Result<T, StoreError>;
