use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle states reported by the synthesis provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskState {
    Scheduled,
    InProgress,
    Completed,
    Failed,
}

impl TaskState {
    /// Terminal states see no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskState::Completed | TaskState::Failed)
    }
}

/// One asynchronous synthesis task.
///
/// `index` is copied from the originating utterance so results can be put
/// back into script order after tasks complete at arbitrary times. The
/// task is mutated only by poll responses and becomes immutable once its
/// state is terminal.
#[derive(Debug, Clone)]
pub struct SynthesisTask {
    pub index: usize,
    pub task_id: String,
    pub state: TaskState,
    pub output_uri: Option<String>,
}

/// Unique token namespacing all working storage for one invocation.
///
/// Generated once per run, never reused; every local file and remote
/// intermediate object for the run lives under this token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunId(String);

impl RunId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Published episode location returned to the caller.
#[derive(Debug, Clone)]
pub struct EpisodeArtifact {
    pub run_id: String,
    pub bucket: String,
    pub key: String,
}
