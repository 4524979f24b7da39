use std::time::Duration;

use super::error::PipelineError;
use super::model::SynthesisTask;
use crate::domain::script::UtteranceRecord;
use crate::infrastructure::repositories::{SynthesisDestination, SynthesisRepository};

/// Submit one synthesis task per utterance, in script order.
///
/// Submissions are strictly sequential with a fixed pacing delay between
/// them; the provider throttles bursts of task submissions. A single
/// rejected submission aborts the whole run, leaving already-submitted
/// tasks to run to completion unobserved.
pub async fn dispatch(
    synthesis_repo: &dyn SynthesisRepository,
    records: &[UtteranceRecord],
    destination: &SynthesisDestination,
    pacing: Duration,
) -> Result<Vec<SynthesisTask>, PipelineError> {
    let mut tasks = Vec::with_capacity(records.len());

    for record in records {
        if !tasks.is_empty() {
            tokio::time::sleep(pacing).await;
        }

        let submitted = synthesis_repo
            .submit(&record.text, record.voice, destination)
            .await
            .map_err(PipelineError::Submission)?;

        tracing::info!(
            index = record.index,
            voice = record.voice.as_str(),
            task_id = %submitted.task_id,
            state = ?submitted.state,
            "Synthesis task submitted"
        );

        tasks.push(SynthesisTask {
            index: record.index,
            task_id: submitted.task_id,
            state: submitted.state,
            output_uri: None,
        });
    }

    Ok(tasks)
}
