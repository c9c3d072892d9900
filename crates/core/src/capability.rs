//! Static model capability table.
//!
//! Each generation model ships with fixed provider limits: the aspect
//! ratios it accepts, the duration range it can produce, and how many
//! artifacts one job may request. The table is loaded once and never
//! mutated; job normalization ([`crate::job`]) clamps requests into
//! these bounds.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Model identifiers
// ---------------------------------------------------------------------------

/// Standard-quality generation model.
pub const MODEL_MOTION_1: &str = "motion-1.0";
/// Lower-latency variant with a smaller artifact budget.
pub const MODEL_MOTION_1_FAST: &str = "motion-1.0-fast";

/// Landscape aspect ratio.
pub const ASPECT_16_9: &str = "16:9";
/// Portrait aspect ratio.
pub const ASPECT_9_16: &str = "9:16";

// ---------------------------------------------------------------------------
// ModelCapability
// ---------------------------------------------------------------------------

/// Provider limits for one generation model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelCapability {
    /// Provider-facing model identifier.
    pub id: &'static str,
    /// Aspect ratios the model accepts.
    pub supported_aspect_ratios: &'static [&'static str],
    /// Shortest producible clip, in seconds.
    pub min_duration_secs: u32,
    /// Duration used when the request does not specify one.
    pub default_duration_secs: u32,
    /// Longest producible clip, in seconds.
    pub max_duration_secs: u32,
    /// Maximum artifacts one job may request.
    pub max_artifacts: u32,
}

impl ModelCapability {
    /// Check the structural invariant: `min <= default <= max` and a
    /// positive artifact budget.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.min_duration_secs > self.default_duration_secs
            || self.default_duration_secs > self.max_duration_secs
        {
            return Err(CoreError::Validation(format!(
                "Model '{}' has inconsistent duration bounds: min={} default={} max={}",
                self.id, self.min_duration_secs, self.default_duration_secs, self.max_duration_secs
            )));
        }
        if self.max_artifacts == 0 {
            return Err(CoreError::Validation(format!(
                "Model '{}' must allow at least one artifact",
                self.id
            )));
        }
        Ok(())
    }

    /// Whether `ratio` is in the supported set.
    pub fn supports_aspect_ratio(&self, ratio: &str) -> bool {
        self.supported_aspect_ratios.contains(&ratio)
    }
}

/// The built-in capability table.
pub const CAPABILITIES: &[ModelCapability] = &[
    ModelCapability {
        id: MODEL_MOTION_1,
        supported_aspect_ratios: &[ASPECT_16_9, ASPECT_9_16],
        min_duration_secs: 5,
        default_duration_secs: 5,
        max_duration_secs: 8,
        max_artifacts: 4,
    },
    ModelCapability {
        id: MODEL_MOTION_1_FAST,
        supported_aspect_ratios: &[ASPECT_16_9, ASPECT_9_16],
        min_duration_secs: 5,
        default_duration_secs: 5,
        max_duration_secs: 8,
        max_artifacts: 2,
    },
];

/// Look up the capability record for `model_id`.
pub fn capability_for(model_id: &str) -> Result<&'static ModelCapability, CoreError> {
    CAPABILITIES
        .iter()
        .find(|c| c.id == model_id)
        .ok_or_else(|| CoreError::UnknownModel(model_id.to_string()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn builtin_table_satisfies_invariants() {
        for cap in CAPABILITIES {
            cap.validate().expect("built-in capability must be valid");
        }
    }

    #[test]
    fn lookup_known_model() {
        let cap = capability_for(MODEL_MOTION_1).unwrap();
        assert_eq!(cap.max_artifacts, 4);
        assert_eq!(cap.min_duration_secs, 5);
        assert_eq!(cap.max_duration_secs, 8);
    }

    #[test]
    fn lookup_unknown_model_fails() {
        assert_matches!(capability_for("motion-9000"), Err(CoreError::UnknownModel(_)));
    }

    #[test]
    fn validate_rejects_inverted_bounds() {
        let cap = ModelCapability {
            id: "broken",
            supported_aspect_ratios: &[ASPECT_16_9],
            min_duration_secs: 10,
            default_duration_secs: 5,
            max_duration_secs: 8,
            max_artifacts: 1,
        };
        assert_matches!(cap.validate(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn validate_rejects_zero_artifact_budget() {
        let cap = ModelCapability {
            id: "broken",
            supported_aspect_ratios: &[ASPECT_16_9],
            min_duration_secs: 5,
            default_duration_secs: 5,
            max_duration_secs: 8,
            max_artifacts: 0,
        };
        assert_matches!(cap.validate(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn aspect_ratio_membership() {
        let cap = capability_for(MODEL_MOTION_1).unwrap();
        assert!(cap.supports_aspect_ratio("16:9"));
        assert!(!cap.supports_aspect_ratio("4:3"));
    }
}
