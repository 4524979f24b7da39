use super::error::PipelineError;
use super::model::{SynthesisTask, TaskState};

/// Restore script order from tasks that settled at arbitrary times.
///
/// Returns the output locator of every task sorted by utterance index.
/// Every task must be completed with a locator; anything else is an
/// incomplete result and fails aggregation.
pub fn aggregate(tasks: &[SynthesisTask]) -> Result<Vec<String>, PipelineError> {
    let mut ordered: Vec<&SynthesisTask> = tasks.iter().collect();
    ordered.sort_by_key(|task| task.index);

    ordered
        .into_iter()
        .map(|task| {
            if task.state != TaskState::Completed {
                return Err(PipelineError::Incomplete { index: task.index });
            }
            task.output_uri
                .clone()
                .ok_or(PipelineError::Incomplete { index: task.index })
        })
        .collect()
}
