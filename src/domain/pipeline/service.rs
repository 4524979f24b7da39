use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use super::aggregator::aggregate;
use super::assembly::materialize;
use super::dispatcher::dispatch;
use super::error::PipelineError;
use super::model::{EpisodeArtifact, RunId};
use super::tracker::{await_completion, PollOptions};
use crate::domain::script::parse;
use crate::infrastructure::repositories::{
    StorageRepository, SynthesisDestination, SynthesisRepository,
};

/// Remote key prefix for per-utterance synthesis output, scoped per run.
const SYNTHESIS_PREFIX: &str = "synthesis";
/// Remote key prefix for published episodes.
const EPISODE_PREFIX: &str = "episodes";

/// Immutable per-process pipeline settings, resolved once at startup.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub input_bucket: String,
    pub output_bucket: String,
    /// Bucket receiving per-utterance synthesis output; may equal
    /// `output_bucket`.
    pub work_bucket: String,
    /// Local root under which each run creates its own directory.
    pub work_dir: PathBuf,
    pub output_filename: String,
    pub segment_gap: Duration,
    pub submit_pacing: Duration,
    pub poll: PollOptions,
}

pub struct PipelineService {
    synthesis_repo: Arc<dyn SynthesisRepository>,
    storage_repo: Arc<dyn StorageRepository>,
    config: PipelineConfig,
}

impl PipelineService {
    pub fn new(
        synthesis_repo: Arc<dyn SynthesisRepository>,
        storage_repo: Arc<dyn StorageRepository>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            synthesis_repo,
            storage_repo,
            config,
        }
    }
}

#[async_trait]
pub trait PipelineServiceApi: Send + Sync {
    /// Turn the script at `input_key` into one published audio episode.
    ///
    /// This operation:
    /// - Parses and validates the script (fails before any synthesis call)
    /// - Submits one paced synthesis task per utterance
    /// - Polls all tasks to a terminal state under a deadline
    /// - Downloads and concatenates the segments in script order
    /// - Publishes the episode and cleans up all run-scoped storage,
    ///   on the failure path too
    async fn run(&self, input_key: Option<&str>) -> Result<EpisodeArtifact, PipelineError>;
}

#[async_trait]
impl PipelineServiceApi for PipelineService {
    async fn run(&self, input_key: Option<&str>) -> Result<EpisodeArtifact, PipelineError> {
        let input_key = match input_key {
            Some(key) if !key.trim().is_empty() => key,
            _ => return Err(PipelineError::MissingInput),
        };

        let run_id = RunId::generate();
        tracing::info!(run_id = %run_id, input_key, "Pipeline run started");

        let result = self.run_stages(&run_id, input_key).await;

        // Cleanup runs on both paths and never replaces the result
        self.cleanup(&run_id).await;

        match &result {
            Ok(artifact) => tracing::info!(
                run_id = %run_id,
                bucket = %artifact.bucket,
                key = %artifact.key,
                "Pipeline run succeeded"
            ),
            Err(error) => tracing::error!(
                run_id = %run_id,
                error = %error,
                "Pipeline run failed"
            ),
        }

        result
    }
}

impl PipelineService {
    async fn run_stages(
        &self,
        run_id: &RunId,
        input_key: &str,
    ) -> Result<EpisodeArtifact, PipelineError> {
        // 1. Fetch and parse the script
        let raw = self
            .storage_repo
            .get(&self.config.input_bucket, input_key)
            .await
            .map_err(PipelineError::Storage)?;
        let raw = String::from_utf8_lossy(&raw).into_owned();
        let records = parse(&raw)?;
        tracing::info!(run_id = %run_id, utterances = records.len(), "Script parsed");

        // 2. Dispatch one paced synthesis task per utterance
        let destination = SynthesisDestination {
            bucket: self.config.work_bucket.clone(),
            key_prefix: format!("{SYNTHESIS_PREFIX}/{run_id}/"),
        };
        let mut tasks = dispatch(
            self.synthesis_repo.as_ref(),
            &records,
            &destination,
            self.config.submit_pacing,
        )
        .await?;
        tracing::info!(run_id = %run_id, tasks = tasks.len(), "All synthesis tasks submitted");

        // 3. Poll until every task settles
        await_completion(self.synthesis_repo.as_ref(), &mut tasks, &self.config.poll).await?;
        tracing::info!(run_id = %run_id, "All synthesis tasks settled");

        // 4. Restore script order
        let ordered_uris = aggregate(&tasks)?;

        // 5. Download segments and concatenate
        let artifact = materialize(
            self.storage_repo.as_ref(),
            run_id,
            &self.config.work_dir,
            &ordered_uris,
            &self.config.output_filename,
            self.config.segment_gap,
        )
        .await?;

        // 6. Publish
        let audio = tokio::fs::read(&artifact.path).await?;
        let output_key = format!("{EPISODE_PREFIX}/{run_id}/{}", artifact.filename);
        self.storage_repo
            .put(&self.config.output_bucket, &output_key, audio)
            .await
            .map_err(PipelineError::Storage)?;
        tracing::info!(
            run_id = %run_id,
            bucket = %self.config.output_bucket,
            key = %output_key,
            "Episode published"
        );

        Ok(EpisodeArtifact {
            run_id: run_id.to_string(),
            bucket: self.config.output_bucket.clone(),
            key: output_key,
        })
    }

    /// Best-effort removal of the run's working directory and the
    /// run-scoped intermediate objects. Failures here are logged and never
    /// mask the pipeline's own outcome.
    async fn cleanup(&self, run_id: &RunId) {
        let work_dir = self.config.work_dir.join(run_id.as_str());
        if let Err(error) = tokio::fs::remove_dir_all(&work_dir).await {
            if error.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(
                    run_id = %run_id,
                    error = %error,
                    "Failed to remove local working directory"
                );
            }
        }

        let prefix = format!("{SYNTHESIS_PREFIX}/{run_id}/");
        match self
            .storage_repo
            .list(&self.config.work_bucket, &prefix)
            .await
        {
            Ok(keys) if !keys.is_empty() => {
                match self.storage_repo.delete(&self.config.work_bucket, &keys).await {
                    Ok(()) => tracing::info!(
                        run_id = %run_id,
                        deleted = keys.len(),
                        "Intermediate synthesis objects removed"
                    ),
                    Err(error) => tracing::warn!(
                        run_id = %run_id,
                        error = %error,
                        "Failed to delete intermediate synthesis objects"
                    ),
                }
            }
            Ok(_) => {}
            Err(error) => tracing::warn!(
                run_id = %run_id,
                error = %error,
                "Failed to list intermediate synthesis objects"
            ),
        }
    }
}
