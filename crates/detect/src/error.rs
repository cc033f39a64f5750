use thiserror::Error;

#[derive(Debug, Error)]
pub enum DetectError {
    #[error("Unknown CPU feature `{0}`.")]
    UnknownFeature(String),
    #[error("Failed to access the snapshot file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid snapshot: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Failed to serialize the snapshot: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Leaf {leaf:#x} subleaf {subleaf} is recorded more than once.")]
    DuplicateLeaf { leaf: u32, subleaf: u32 },
}
