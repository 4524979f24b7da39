use async_trait::async_trait;

use crate::domain::pipeline::TaskState;
use crate::domain::script::Voice;

/// Where the provider should write synthesized audio.
#[derive(Debug, Clone)]
pub struct SynthesisDestination {
    pub bucket: String,
    /// Run-scoped key prefix; the provider appends its own task file name.
    pub key_prefix: String,
}

/// Provider acknowledgement of a submission.
#[derive(Debug, Clone)]
pub struct SubmittedTask {
    pub task_id: String,
    pub state: TaskState,
}

/// Point-in-time view of a task, as reported by a status poll.
#[derive(Debug, Clone)]
pub struct TaskSnapshot {
    pub state: TaskState,
    /// Locator of the synthesized audio; present once the task completed.
    pub output_uri: Option<String>,
}

/// Repository for asynchronous speech synthesis.
/// Abstracts the underlying provider (AWS Polly task API in production).
///
/// The provider offers no push notification; callers submit tasks and
/// poll their status until a terminal state is reached.
#[async_trait]
pub trait SynthesisRepository: Send + Sync {
    /// Submit one utterance for synthesis. The provider writes the audio
    /// under the destination prefix and completes the task asynchronously.
    async fn submit(
        &self,
        text: &str,
        voice: Voice,
        destination: &SynthesisDestination,
    ) -> Result<SubmittedTask, String>;

    /// Fetch the current status of a previously submitted task.
    async fn task_status(&self, task_id: &str) -> Result<TaskSnapshot, String>;
}
