pub mod aggregator;
pub mod assembly;
pub mod dispatcher;
pub mod error;
pub mod model;
pub mod service;
pub mod tracker;

pub use error::PipelineError;
pub use model::{EpisodeArtifact, RunId, SynthesisTask, TaskState};
pub use service::{PipelineConfig, PipelineService, PipelineServiceApi};
pub use tracker::PollOptions;
