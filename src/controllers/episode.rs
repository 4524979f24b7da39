use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    domain::pipeline::{PipelineService, PipelineServiceApi},
    error::{AppError, AppResult},
};

/// Request for POST /api/episodes
#[derive(Debug, Serialize, Deserialize)]
pub struct EpisodeRequest {
    pub input_key: Option<String>,
}

/// Response for POST /api/episodes
#[derive(Debug, Serialize, Deserialize)]
pub struct EpisodeResponse {
    pub run_id: String,
    pub output_bucket: String,
    pub output_key: String,
}

pub struct EpisodeController {
    pipeline_service: Arc<PipelineService>,
}

impl EpisodeController {
    pub fn new(pipeline_service: Arc<PipelineService>) -> Self {
        Self { pipeline_service }
    }

    /// POST /api/episodes - Turn a stored script into one audio episode
    pub async fn create(
        State(controller): State<Arc<EpisodeController>>,
        Json(request): Json<EpisodeRequest>,
    ) -> AppResult<(StatusCode, Json<EpisodeResponse>)> {
        let artifact = controller
            .pipeline_service
            .run(request.input_key.as_deref())
            .await
            .map_err(AppError::from)?;

        Ok((
            StatusCode::OK,
            Json(EpisodeResponse {
                run_id: artifact.run_id,
                output_bucket: artifact.bucket,
                output_key: artifact.key,
            }),
        ))
    }
}
