use crate::domain::script::ScriptError;
use crate::error::AppError;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("missing input reference")]
    MissingInput,
    #[error("script validation failed: {0}")]
    Script(#[from] ScriptError),
    #[error("synthesis submission failed: {0}")]
    Submission(String),
    #[error("synthesis status poll failed: {0}")]
    Poll(String),
    #[error("synthesis task {task_id} for utterance {index} failed")]
    SynthesisFailed { index: usize, task_id: String },
    #[error("synthesis tasks did not settle within {0:?}")]
    Timeout(Duration),
    #[error("utterance {index} has no completed synthesis output")]
    Incomplete { index: usize },
    #[error("storage error: {0}")]
    Storage(String),
    #[error("audio assembly error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<PipelineError> for AppError {
    fn from(err: PipelineError) -> Self {
        match &err {
            PipelineError::MissingInput | PipelineError::Script(_) => {
                AppError::BadRequest(err.to_string())
            }
            PipelineError::Timeout(_) => AppError::GatewayTimeout(err.to_string()),
            PipelineError::Submission(_)
            | PipelineError::Poll(_)
            | PipelineError::SynthesisFailed { .. }
            | PipelineError::Storage(_) => AppError::ExternalService(err.to_string()),
            PipelineError::Incomplete { .. }
            | PipelineError::Io(_)
            | PipelineError::Other(_) => AppError::Internal(err.to_string()),
        }
    }
}
