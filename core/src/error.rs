use thiserror::Error;

#[derive(Debug, Error)]
pub enum FatprobeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("read of {count} sector(s) at LBA {lba} past end of image ({total} sectors)")]
    ReadOutOfBounds { lba: u64, count: u32, total: u64 },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Other error: {0}")]
    Other(String),
}
