use thiserror::Error;

#[derive(Error, Debug)]
pub enum PhantomError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Unknown phantom designation: {0}")]
    UnknownDesignation(String),

    #[error("Placement table mismatch for {designation}: nc={nc}, table length={table_len}")]
    PlacementMismatch {
        designation: String,
        nc: usize,
        table_len: usize,
    },

    #[error("Phantom design {0} has no container placement layout")]
    NoPlacementLayout(String),

    #[error("Missing precondition: {0}")]
    MissingPrecondition(String),

    #[error("Container index out of range: index={index}, nc={nc}")]
    ContainerOutOfRange { index: usize, nc: usize },

    #[error("Phantom record not found: {0}")]
    RecordNotFound(String),

    #[error("Shape mismatch: expected {expected:?}, found {found:?}")]
    ShapeMismatch {
        expected: [usize; 3],
        found: [usize; 3],
    },

    #[error("ROI contains no voxels: {0}")]
    EmptyRoi(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type PhantomResult<T> = Result<T, PhantomError>;
