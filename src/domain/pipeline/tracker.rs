use std::time::Duration;

use tokio::time::Instant;

use super::error::PipelineError;
use super::model::{SynthesisTask, TaskState};
use crate::infrastructure::repositories::SynthesisRepository;

/// Pacing and deadline settings for the completion polling loop.
#[derive(Debug, Clone)]
pub struct PollOptions {
    /// Sleep between polling rounds.
    pub batch_interval: Duration,
    /// Sleep between individual status calls within a round.
    pub poll_pacing: Duration,
    /// Wall-clock bound on the whole loop.
    pub deadline: Duration,
}

/// Block until every task reaches a terminal state.
///
/// The provider exposes no push notification, so this loops: sleep the
/// batch interval, poll each unsettled task sequentially with a short
/// pacing delay between calls, repeat. Tasks already terminal are not
/// polled again. A task reported as failed aborts the run immediately;
/// the deadline bounds the loop and surfaces as a timeout error.
pub async fn await_completion(
    synthesis_repo: &dyn SynthesisRepository,
    tasks: &mut [SynthesisTask],
    options: &PollOptions,
) -> Result<(), PipelineError> {
    let started = Instant::now();

    loop {
        tokio::time::sleep(options.batch_interval).await;

        if started.elapsed() > options.deadline {
            tracing::error!(
                deadline_secs = options.deadline.as_secs(),
                "Synthesis tasks did not settle before the deadline"
            );
            return Err(PipelineError::Timeout(options.deadline));
        }

        let mut unsettled = 0usize;
        for task in tasks.iter_mut() {
            if task.state.is_terminal() {
                continue;
            }

            tokio::time::sleep(options.poll_pacing).await;
            let snapshot = synthesis_repo
                .task_status(&task.task_id)
                .await
                .map_err(PipelineError::Poll)?;

            task.state = snapshot.state;
            match snapshot.state {
                TaskState::Completed => {
                    task.output_uri = snapshot.output_uri;
                    tracing::info!(
                        index = task.index,
                        task_id = %task.task_id,
                        "Synthesis task completed"
                    );
                }
                TaskState::Failed => {
                    tracing::error!(
                        index = task.index,
                        task_id = %task.task_id,
                        "Synthesis task failed"
                    );
                    return Err(PipelineError::SynthesisFailed {
                        index: task.index,
                        task_id: task.task_id.clone(),
                    });
                }
                TaskState::Scheduled | TaskState::InProgress => unsettled += 1,
            }
        }

        if unsettled == 0 {
            return Ok(());
        }

        tracing::debug!(unsettled, total = tasks.len(), "Synthesis tasks still in flight");
    }
}
