use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::domain::pipeline::{PipelineConfig, PollOptions};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub aws_region: String,
    pub input_bucket: String,
    pub output_bucket: String,
    pub work_bucket: String,
    pub work_dir: PathBuf,
    pub output_filename: String,
    pub output_format: String,
    pub segment_gap_ms: u64,
    pub submit_pacing_ms: u64,
    pub poll_pacing_ms: u64,
    pub poll_interval_ms: u64,
    pub poll_deadline_secs: u64,
    pub environment: Environment,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let output_bucket = env::var("OUTPUT_BUCKET")?;

        let config = Config {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()?,
            aws_region: env::var("AWS_REGION").unwrap_or_else(|_| "eu-west-1".to_string()),
            input_bucket: env::var("INPUT_BUCKET")?,
            work_bucket: env::var("WORK_BUCKET").unwrap_or_else(|_| output_bucket.clone()),
            output_bucket,
            work_dir: env::var("WORK_DIR")
                .unwrap_or_else(|_| "/tmp/scripttape".to_string())
                .into(),
            output_filename: env::var("OUTPUT_FILENAME")
                .unwrap_or_else(|_| "episode.mp3".to_string()),
            output_format: env::var("OUTPUT_FORMAT").unwrap_or_else(|_| "mp3".to_string()),
            segment_gap_ms: env::var("SEGMENT_GAP_MS")
                .unwrap_or_else(|_| "0".to_string())
                .parse()?,
            submit_pacing_ms: env::var("SUBMIT_PACING_MS")
                .unwrap_or_else(|_| "1100".to_string())
                .parse()?,
            poll_pacing_ms: env::var("POLL_PACING_MS")
                .unwrap_or_else(|_| "200".to_string())
                .parse()?,
            poll_interval_ms: env::var("POLL_INTERVAL_MS")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()?,
            poll_deadline_secs: env::var("POLL_DEADLINE_SECS")
                .unwrap_or_else(|_| "600".to_string())
                .parse()?,
            environment: env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string())
                .parse::<String>()
                .map(|s| match s.as_str() {
                    "production" => Environment::Production,
                    _ => Environment::Development,
                })?,
            log_format: env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .parse::<String>()
                .map(|s| match s.as_str() {
                    "json" => LogFormat::Json,
                    _ => LogFormat::Pretty,
                })?,
        };

        Ok(config)
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }

    /// Resolve the immutable pipeline settings handed to the service.
    pub fn pipeline(&self) -> PipelineConfig {
        PipelineConfig {
            input_bucket: self.input_bucket.clone(),
            output_bucket: self.output_bucket.clone(),
            work_bucket: self.work_bucket.clone(),
            work_dir: self.work_dir.clone(),
            output_filename: self.output_filename.clone(),
            segment_gap: Duration::from_millis(self.segment_gap_ms),
            submit_pacing: Duration::from_millis(self.submit_pacing_ms),
            poll: PollOptions {
                batch_interval: Duration::from_millis(self.poll_interval_ms),
                poll_pacing: Duration::from_millis(self.poll_pacing_ms),
                deadline: Duration::from_secs(self.poll_deadline_secs),
            },
        }
    }
}
