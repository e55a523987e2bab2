use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Analysis failed: {0}")]
    AnalysisFailed(String),

    #[error("Record not found")]
    NotFound,

    #[error("An analysis is already in progress")]
    AnalysisInProgress,

    #[error("Object storage error: {0}")]
    ObjectStorageError(String),

    #[error("Camera error: {0}")]
    Camera(String),

    #[error("Internal server error")]
    InternalServerError,
}
