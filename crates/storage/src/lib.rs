//! Local artifact staging.
//!
//! Provides the [`ArtifactStager`] trait the orchestrator materializes
//! artifacts through, an HTTP downloader implementation, and the
//! deterministic destination-filename derivation used to place remote
//! artifacts into a local directory.

pub mod naming;
pub mod stager;

pub use naming::destination_filename;
pub use stager::{ArtifactStager, HttpArtifactStager, StageError};
