use super::synthesis_repository::{
    SubmittedTask, SynthesisDestination, SynthesisRepository, TaskSnapshot,
};
use crate::domain::pipeline::TaskState;
use crate::domain::script::Voice;
use async_trait::async_trait;
use aws_sdk_polly::{
    types::{Engine, OutputFormat, TaskStatus, VoiceId},
    Client as PollyClient,
};
use std::sync::Arc;

/// AWS Polly implementation of the synthesis repository, built on the
/// asynchronous speech synthesis task API: submissions start a task that
/// writes its audio to S3, and completion is observed by polling.
pub struct PollySynthesisRepository {
    polly_client: Arc<PollyClient>,
    output_format: OutputFormat,
}

impl PollySynthesisRepository {
    pub fn new(polly_client: Arc<PollyClient>, output_format: &str) -> Self {
        Self {
            polly_client,
            output_format: OutputFormat::from(output_format),
        }
    }

    fn map_status(status: Option<&TaskStatus>) -> TaskState {
        match status {
            Some(TaskStatus::Completed) => TaskState::Completed,
            Some(TaskStatus::Failed) => TaskState::Failed,
            Some(TaskStatus::InProgress) => TaskState::InProgress,
            _ => TaskState::Scheduled,
        }
    }
}

#[async_trait]
impl SynthesisRepository for PollySynthesisRepository {
    async fn submit(
        &self,
        text: &str,
        voice: Voice,
        destination: &SynthesisDestination,
    ) -> Result<SubmittedTask, String> {
        tracing::info!(
            voice = voice.as_str(),
            output_format = ?self.output_format,
            text_length = text.len(),
            bucket = %destination.bucket,
            key_prefix = %destination.key_prefix,
            "Calling AWS Polly start_speech_synthesis_task"
        );

        let result = self
            .polly_client
            .start_speech_synthesis_task()
            .text(text)
            .voice_id(VoiceId::from(voice.as_str()))
            .output_format(self.output_format.clone())
            .engine(Engine::Neural)
            .output_s3_bucket_name(&destination.bucket)
            .output_s3_key_prefix(&destination.key_prefix)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = ?e,
                    voice = voice.as_str(),
                    text_length = text.len(),
                    "AWS Polly start_speech_synthesis_task failed"
                );
                format!("AWS Polly error: {:?}", e)
            })?;

        let task = result
            .synthesis_task()
            .ok_or_else(|| "AWS Polly returned no synthesis task".to_string())?;
        let task_id = task
            .task_id()
            .ok_or_else(|| "AWS Polly returned a task without an id".to_string())?;

        tracing::debug!(task_id, "Synthesis task started");

        Ok(SubmittedTask {
            task_id: task_id.to_string(),
            state: Self::map_status(task.task_status()),
        })
    }

    async fn task_status(&self, task_id: &str) -> Result<TaskSnapshot, String> {
        let result = self
            .polly_client
            .get_speech_synthesis_task()
            .task_id(task_id)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = ?e, task_id, "AWS Polly get_speech_synthesis_task failed");
                format!("AWS Polly error: {:?}", e)
            })?;

        let task = result
            .synthesis_task()
            .ok_or_else(|| format!("AWS Polly returned no task for id {task_id}"))?;

        Ok(TaskSnapshot {
            state: Self::map_status(task.task_status()),
            output_uri: task.output_uri().map(str::to_string),
        })
    }
}
