use std::path::{Path, PathBuf};
use std::time::Duration;

use super::error::PipelineError;
use super::model::RunId;
use crate::infrastructure::audio;
use crate::infrastructure::repositories::StorageRepository;

/// Local result of the fetch-and-concatenate stage.
#[derive(Debug, Clone)]
pub struct LocalArtifact {
    /// Full path of the concatenated audio file.
    pub path: PathBuf,
    /// Run-scoped working directory holding the segments and the output.
    pub work_dir: PathBuf,
    pub filename: String,
}

/// An object address extracted from a provider output URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectLocation {
    pub bucket: String,
    pub key: String,
}

/// Parse a provider output URI into bucket and key.
///
/// Polly reports task output either as `s3://bucket/key` or as the
/// path-style `https://s3.<region>.amazonaws.com/bucket/key` form.
pub fn object_location(uri: &str) -> Result<ObjectLocation, PipelineError> {
    let malformed = || PipelineError::Storage(format!("malformed output uri: {uri}"));

    if let Some(rest) = uri.strip_prefix("s3://") {
        let (bucket, key) = rest.split_once('/').ok_or_else(malformed)?;
        if bucket.is_empty() || key.is_empty() {
            return Err(malformed());
        }
        return Ok(ObjectLocation {
            bucket: bucket.to_string(),
            key: key.to_string(),
        });
    }

    let rest = uri
        .strip_prefix("https://")
        .or_else(|| uri.strip_prefix("http://"))
        .ok_or_else(malformed)?;
    let (_host, path) = rest.split_once('/').ok_or_else(malformed)?;
    let (bucket, key) = path.split_once('/').ok_or_else(malformed)?;
    if bucket.is_empty() || key.is_empty() {
        return Err(malformed());
    }
    Ok(ObjectLocation {
        bucket: bucket.to_string(),
        key: key.to_string(),
    })
}

/// Download the ordered segments and concatenate them into one file.
///
/// Segments are fetched sequentially, not in parallel, to bound local
/// resource usage, and land in the run's working directory under their
/// position number (`0`, `1`, `2`, ...). The concatenated output is
/// written next to them.
pub async fn materialize(
    storage_repo: &dyn StorageRepository,
    run_id: &RunId,
    work_root: &Path,
    ordered_uris: &[String],
    output_filename: &str,
    segment_gap: Duration,
) -> Result<LocalArtifact, PipelineError> {
    let work_dir = work_root.join(run_id.as_str());
    tokio::fs::create_dir_all(&work_dir).await?;

    let mut segment_paths = Vec::with_capacity(ordered_uris.len());
    for (position, uri) in ordered_uris.iter().enumerate() {
        let location = object_location(uri)?;
        let bytes = storage_repo
            .get(&location.bucket, &location.key)
            .await
            .map_err(PipelineError::Storage)?;

        let segment_path = work_dir.join(position.to_string());
        tokio::fs::write(&segment_path, &bytes).await?;
        tracing::debug!(
            position,
            bytes = bytes.len(),
            key = %location.key,
            "Audio segment downloaded"
        );
        segment_paths.push(segment_path);
    }

    let output_path = work_dir.join(output_filename);
    let summary = audio::concatenate(&segment_paths, &output_path, segment_gap).await?;
    tracing::info!(
        run_id = %run_id,
        segments = summary.segments,
        bytes = summary.bytes_written,
        "Episode audio assembled"
    );

    Ok(LocalArtifact {
        path: output_path,
        work_dir,
        filename: output_filename.to_string(),
    })
}
