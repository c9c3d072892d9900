//! Environment-driven worker configuration.
//!
//! The binary is the only place environment state is read; everything
//! below it receives immutable values. One `WorkerConfig` describes
//! both the provider connection and the single job to run.

use std::path::PathBuf;
use std::time::Duration;

use mediaforge_core::capability::{capability_for, ModelCapability, MODEL_MOTION_1};
use mediaforge_core::job::{GenerationMode, JobSpec, ReferenceImage};
use mediaforge_orchestrator::PollerConfig;
use mediaforge_provider::ProviderConfig;

/// Errors while assembling configuration from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required variable is missing.
    #[error("Missing required environment variable {0}")]
    Missing(&'static str),

    /// A variable is present but unparseable.
    #[error("Invalid value for {name}: {value}")]
    Invalid {
        /// Variable name.
        name: &'static str,
        /// The offending value.
        value: String,
    },

    /// The job description itself is invalid.
    #[error(transparent)]
    Core(#[from] mediaforge_core::error::CoreError),
}

/// Everything the worker needs to run one job.
#[derive(Debug)]
pub struct WorkerConfig {
    /// Provider connection settings.
    pub provider: ProviderConfig,
    /// Polling cadence and operation deadline.
    pub poller: PollerConfig,
    /// The normalized job to run.
    pub spec: JobSpec,
}

impl WorkerConfig {
    /// Assemble the config from environment variables.
    ///
    /// Required: `MEDIAFORGE_PROVIDER_URL`, `MEDIAFORGE_OUTPUT_URI`, and
    /// at least one of `MEDIAFORGE_PROMPT` / `MEDIAFORGE_REFERENCE_IMAGE_URI`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = require("MEDIAFORGE_PROVIDER_URL")?;
        let api_key = optional("MEDIAFORGE_API_KEY");

        let model = optional("MEDIAFORGE_MODEL").unwrap_or_else(|| MODEL_MOTION_1.to_string());
        let capability: &'static ModelCapability = capability_for(&model)?;

        let prompt = optional("MEDIAFORGE_PROMPT");
        let mode = match optional("MEDIAFORGE_REFERENCE_IMAGE_URI") {
            Some(uri) => GenerationMode::ImageToGeneration {
                reference_image: ReferenceImage {
                    uri,
                    media_type: optional("MEDIAFORGE_REFERENCE_IMAGE_TYPE")
                        .unwrap_or_else(|| "image/png".to_string()),
                },
            },
            None => {
                if prompt.is_none() {
                    return Err(ConfigError::Missing("MEDIAFORGE_PROMPT"));
                }
                GenerationMode::TextToGeneration
            }
        };

        let aspect_ratio =
            optional("MEDIAFORGE_ASPECT_RATIO").unwrap_or_else(|| "16:9".to_string());
        let artifact_count = parse_optional("MEDIAFORGE_ARTIFACT_COUNT")?;
        let duration_secs = parse_optional("MEDIAFORGE_DURATION_SECS")?;
        let output_uri = require("MEDIAFORGE_OUTPUT_URI")?;
        let local_dir = optional("MEDIAFORGE_LOCAL_DIR").map(PathBuf::from);

        let spec = JobSpec::normalized(
            prompt,
            mode,
            capability,
            &aspect_ratio,
            artifact_count,
            duration_secs,
            output_uri,
            local_dir,
        )?;

        let mut poller = PollerConfig::default();
        if let Some(secs) = parse_optional::<u64>("MEDIAFORGE_POLL_INTERVAL_SECS")? {
            poller.interval = Duration::from_secs(secs);
        }
        if let Some(secs) = parse_optional::<u64>("MEDIAFORGE_OPERATION_DEADLINE_SECS")? {
            poller.deadline = Duration::from_secs(secs);
        }

        Ok(Self {
            provider: ProviderConfig::new(base_url, api_key),
            poller,
            spec,
        })
    }
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    optional(name).ok_or(ConfigError::Missing(name))
}

fn optional(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_optional<T: std::str::FromStr>(name: &'static str) -> Result<Option<T>, ConfigError> {
    match optional(name) {
        None => Ok(None),
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}
