
pub use fakes::{FakeStorage, FakeSynthesis, TaskPlan};

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use scripttape::domain::pipeline::{PipelineConfig, PipelineService, PollOptions};

pub const INPUT_BUCKET: &str = "tape-input";
pub const OUTPUT_BUCKET: &str = "tape-output";
pub const WORK_BUCKET: &str = "tape-work";

/// One fully wired pipeline service over fakes, with its own local
/// working directory.
pub struct TestContext {
    pub service: PipelineService,
    pub storage: Arc<FakeStorage>,
    pub synthesis: Arc<FakeSynthesis>,
    work_root: tempfile::TempDir,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_plans(Vec::new())
    }

    pub fn with_plans(plans: Vec<TaskPlan>) -> Self {
        Self::build(plans, Duration::from_secs(600))
    }

    pub fn with_deadline(plans: Vec<TaskPlan>, deadline: Duration) -> Self {
        Self::build(plans, deadline)
    }

    fn build(plans: Vec<TaskPlan>, deadline: Duration) -> Self {
        let storage = Arc::new(FakeStorage::new());
        let synthesis = Arc::new(FakeSynthesis::new(storage.clone(), plans));
        let work_root = tempfile::tempdir().unwrap();

        let config = PipelineConfig {
            input_bucket: INPUT_BUCKET.to_string(),
            output_bucket: OUTPUT_BUCKET.to_string(),
            work_bucket: WORK_BUCKET.to_string(),
            work_dir: work_root.path().to_path_buf(),
            output_filename: "episode.mp3".to_string(),
            segment_gap: Duration::ZERO,
            submit_pacing: Duration::from_millis(1100),
            poll: PollOptions {
                batch_interval: Duration::from_secs(5),
                poll_pacing: Duration::from_millis(200),
                deadline,
            },
        };

        let service = PipelineService::new(synthesis.clone(), storage.clone(), config);

        Self {
            service,
            storage,
            synthesis,
            work_root,
        }
    }

    pub fn put_script(&self, key: &str, script: &str) {
        self.storage
            .insert(INPUT_BUCKET, key, script.as_bytes().to_vec());
    }

    /// Run-scoped directories still present under the local working root.
    pub fn local_run_dirs(&self) -> Vec<PathBuf> {
        std::fs::read_dir(self.work_root.path())
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .collect()
    }

    /// Remote intermediate objects still present for any run.
    pub fn intermediate_keys(&self) -> Vec<String> {
        self.storage
            .keys(WORK_BUCKET)
            .into_iter()
            .filter(|key| key.starts_with("synthesis/"))
            .collect()
    }
}
