//! Destination filename derivation.
//!
//! A staged artifact keeps the last path segment of its remote URI as
//! its local filename. Degenerate remote names (empty, a bare
//! separator, `.`/`..`) fall back to a generated unique name so a bad
//! provider URI can never escape the destination directory or collide
//! on an empty string.

/// Derive a local filename for a remote artifact URI.
///
/// Takes the last path segment of `remote_uri` (query and fragment
/// stripped). Falls back to `artifact-{uuid}` when the segment is empty
/// or degenerate.
pub fn destination_filename(remote_uri: &str) -> String {
    let trimmed = remote_uri
        .split(['?', '#'])
        .next()
        .unwrap_or("")
        .trim_end_matches('/');

    let segment = trimmed.rsplit('/').next().unwrap_or("");

    if is_degenerate(segment) {
        format!("artifact-{}", uuid::Uuid::new_v4())
    } else {
        segment.to_string()
    }
}

/// A segment that cannot serve as a filename.
fn is_degenerate(segment: &str) -> bool {
    segment.is_empty()
        || segment == "."
        || segment == ".."
        || segment.ends_with(':')
        || segment.chars().all(|c| c == '/' || c == '\\')
}
