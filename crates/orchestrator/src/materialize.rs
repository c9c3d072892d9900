//! Result materialization.
//!
//! Stages each artifact of a completed operation into the local
//! destination directory, independently: one artifact's failure never
//! prevents its siblings from being attempted. Without a local
//! directory the remote references alone are the result.

use std::path::Path;

use mediaforge_core::operation::ArtifactRef;
use mediaforge_core::outcome::MaterializedArtifact;
use mediaforge_storage::{destination_filename, ArtifactStager};

/// Materialize `artifacts`, staging a local copy of each when
/// `local_dir` is set.
///
/// All staging attempts run concurrently (parallelism bounded by the
/// artifact count) and every attempt runs to completion. The returned
/// rows preserve the operation's artifact order.
pub async fn materialize(
    stager: &dyn ArtifactStager,
    artifacts: &[ArtifactRef],
    local_dir: Option<&Path>,
) -> Vec<MaterializedArtifact> {
    let Some(dir) = local_dir else {
        return artifacts
            .iter()
            .cloned()
            .map(MaterializedArtifact::remote_only)
            .collect();
    };

    let names = unique_destination_names(artifacts);
    let attempts = artifacts.iter().zip(names).map(|(artifact, name)| async move {
        let destination = dir.join(name);
        match stager.stage(&artifact.uri, &destination).await {
            Ok(()) => MaterializedArtifact::staged(artifact.clone(), destination),
            Err(e) => {
                tracing::warn!(
                    uri = %artifact.uri,
                    error = %e,
                    "Artifact staging failed",
                );
                MaterializedArtifact::failed(artifact.clone(), e.to_string())
            }
        }
    });

    // join_all preserves input order regardless of completion order.
    futures::future::join_all(attempts).await
}

/// Derive one destination filename per artifact, de-duplicated within
/// the call.
///
/// Artifacts from different containers can share a basename; staging
/// them concurrently into one file would silently overwrite. A
/// colliding name gets a numeric suffix before its extension, re-checked
/// against every name already taken.
fn unique_destination_names(artifacts: &[ArtifactRef]) -> Vec<String> {
    let mut taken = std::collections::HashSet::new();
    artifacts
        .iter()
        .map(|artifact| {
            let base = destination_filename(&artifact.uri);
            let mut name = base.clone();
            let mut attempt = 1usize;
            while !taken.insert(name.clone()) {
                name = numbered(&base, attempt);
                attempt += 1;
            }
            name
        })
        .collect()
}

/// `clip.mp4` -> `clip-1.mp4`; without an extension, `clip` -> `clip-1`.
fn numbered(base: &str, n: usize) -> String {
    match base.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => format!("{stem}-{n}.{ext}"),
        _ => format!("{base}-{n}"),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
