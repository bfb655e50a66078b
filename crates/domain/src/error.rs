use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Missing signature")]
    MissingSignature,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Invalid payload: {0}")]
    Parse(String),

    #[error("Project '{0}' matched {1} rows, expected exactly one")]
    AmbiguousProject(String, i64),

    #[error("Delivery failed: {0}")]
    Delivery(String),
}
