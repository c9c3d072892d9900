//! Job specifications and request normalization.
//!
//! A [`JobSpec`] is the immutable description of one generation job,
//! produced by the request-normalization layer and consumed exactly
//! once by the submitter. Out-of-range artifact counts and durations
//! are clamped into the model's bounds rather than rejected; an
//! unsupported aspect ratio is the one hard validation error.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::capability::ModelCapability;
use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Generation mode
// ---------------------------------------------------------------------------

/// A remote reference image used to seed image-to-video generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceImage {
    /// Remote URI of the image (e.g. `mfs://bucket/seed.png`).
    pub uri: String,
    /// Declared media type (e.g. `image/png`).
    pub media_type: String,
}

/// The two supported generation call variants.
///
/// The reference image exists only on the image variant; both variants
/// share the rest of the [`JobSpec`] shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GenerationMode {
    /// Generate from the prompt alone.
    TextToGeneration,
    /// Generate from a seed image, optionally guided by the prompt.
    ImageToGeneration { reference_image: ReferenceImage },
}

// ---------------------------------------------------------------------------
// JobSpec
// ---------------------------------------------------------------------------

/// Immutable description of one generation job.
///
/// Construct via [`JobSpec::normalized`]; fields are public for reading
/// but the struct is never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobSpec {
    /// Generation prompt. Optional for the image variant.
    pub prompt: Option<String>,
    /// Text-to-generation or image-to-generation.
    pub mode: GenerationMode,
    /// Capability record of the target model.
    pub capability: &'static ModelCapability,
    /// Chosen aspect ratio; always a member of the capability's set.
    pub aspect_ratio: String,
    /// Number of artifacts to request; always in `[1, max_artifacts]`.
    pub artifact_count: u32,
    /// Clip duration in seconds; always in `[min, max]`.
    pub duration_secs: u32,
    /// Remote container URI where the provider writes its outputs.
    pub output_uri: String,
    /// Local directory to stage artifacts into, if requested.
    pub local_dir: Option<PathBuf>,
}

impl JobSpec {
    /// Build a normalized spec against a model capability.
    ///
    /// `artifact_count` is clamped into `[1, capability.max_artifacts]`
    /// and `duration_secs` into the capability's duration range; `None`
    /// for either selects the capability default. An aspect ratio
    /// outside the supported set is rejected.
    #[allow(clippy::too_many_arguments)]
    pub fn normalized(
        prompt: Option<String>,
        mode: GenerationMode,
        capability: &'static ModelCapability,
        aspect_ratio: &str,
        artifact_count: Option<u32>,
        duration_secs: Option<u32>,
        output_uri: String,
        local_dir: Option<PathBuf>,
    ) -> Result<Self, CoreError> {
        capability.validate()?;

        if !capability.supports_aspect_ratio(aspect_ratio) {
            return Err(CoreError::Validation(format!(
                "Aspect ratio '{}' is not supported by model '{}'. Supported: {}",
                aspect_ratio,
                capability.id,
                capability.supported_aspect_ratios.join(", ")
            )));
        }

        if output_uri.trim().is_empty() {
            return Err(CoreError::Validation(
                "output_uri must be a non-empty container URI".to_string(),
            ));
        }

        let artifact_count = artifact_count
            .unwrap_or(1)
            .clamp(1, capability.max_artifacts);
        let duration_secs = duration_secs
            .unwrap_or(capability.default_duration_secs)
            .clamp(capability.min_duration_secs, capability.max_duration_secs);

        Ok(Self {
            prompt,
            mode,
            capability,
            aspect_ratio: aspect_ratio.to_string(),
            artifact_count,
            duration_secs,
            output_uri,
            local_dir,
        })
    }

    /// The reference image, when this is an image-to-generation job.
    pub fn reference_image(&self) -> Option<&ReferenceImage> {
        match &self.mode {
            GenerationMode::TextToGeneration => None,
            GenerationMode::ImageToGeneration { reference_image } => Some(reference_image),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
