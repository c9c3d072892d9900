//! End-to-end job runner.
//!
//! `run_job` is the one public entry point of the orchestrator:
//! submit, poll, materialize, report. Whatever happens, the caller
//! gets a [`JobOutcome`] back — never an error.

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use mediaforge_core::job::JobSpec;
use mediaforge_core::outcome::JobOutcome;
use mediaforge_provider::OperationsClient;
use mediaforge_storage::ArtifactStager;

use crate::materialize::materialize;
use crate::notify::{ProgressNotification, ProgressSink, ProgressStatus};
use crate::outcome::{report, JobEnd};
use crate::poller::{poll_operation, PollerConfig, TerminalState};
use crate::submit::submit;

/// Run one generation job to completion.
///
/// Each job owns its own polling loop; nothing is shared between
/// concurrently running jobs. Progress flows to `sink` throughout;
/// `cancel` is the caller lifetime and may fire at any point.
pub async fn run_job(
    client: &dyn OperationsClient,
    stager: &dyn ArtifactStager,
    spec: &JobSpec,
    sink: &dyn ProgressSink,
    cancel: &CancellationToken,
    config: &PollerConfig,
) -> JobOutcome {
    let started = Instant::now();

    let handle = match submit(client, spec, cancel).await {
        Ok(handle) => handle,
        Err(e) => {
            // The poller never ran, so the terminal notification is
            // emitted here.
            sink.notify(ProgressNotification::new(
                ProgressStatus::CompletedWithError,
                format!("Job did not start: {e}"),
            ));
            return report(JobEnd::from(&e), Vec::new(), started.elapsed());
        }
    };

    sink.notify(ProgressNotification::new(
        ProgressStatus::Initiated,
        format!(
            "Generation started: {} artifact(s) of {}s on {}",
            spec.artifact_count, spec.duration_secs, spec.capability.id
        ),
    ));

    let terminal = poll_operation(client, &handle, sink, cancel, config, started).await;
    // Elapsed covers submission to terminal state; staging time is not
    // part of the operation's lifetime.
    let elapsed = started.elapsed();

    let artifacts = match &terminal {
        TerminalState::Succeeded(op) => {
            materialize(stager, &op.artifacts, spec.local_dir.as_deref()).await
        }
        _ => Vec::new(),
    };

    let outcome = report(JobEnd::from(&terminal), artifacts, elapsed);

    tracing::info!(
        operation = %handle.name,
        status = ?outcome.status,
        artifact_count = outcome.artifacts.len(),
        elapsed_secs = outcome.elapsed.as_secs(),
        "Job finished",
    );

    outcome
}
