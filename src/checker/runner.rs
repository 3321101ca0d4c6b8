// src/checker/runner.rs
// =============================================================================
// This module runs a Prober over every target, in one of two modes.
//
// Sequential mode:
// - One target at a time, in input order
// - Each result is handed to the caller BEFORE the next probe starts,
//   so output appears as we go
//
// Concurrent mode:
// - Every target gets its own tokio task, all started together
// - An optional limit caps how many probes are in flight at once
// - Results are collected in INPUT order once every task has finished,
//   no matter which one completed first
// - A task that panics only affects its own target
//
// Rust concepts:
// - tokio::spawn: Run a future as an independent task
// - Arc: Share one value between many tasks
// - Semaphore: Limit how many tasks do something at the same time
// - Closures: FnMut callback for streaming results
// =============================================================================

use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::Semaphore;
use tracing::{debug, warn};

use super::probe::{ProbeOutcome, Prober, Target};

// One target together with what we found out about it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    pub target: Target,
    pub outcome: ProbeOutcome,
}

impl CheckResult {
    pub fn is_online(&self) -> bool {
        self.outcome.is_online()
    }
}

// Checks targets one after another
//
// Parameters:
//   prober: what to check each target with
//   targets: the targets, in the order they should be checked
//   on_result: called with each result as soon as it is ready
//
// Returns: all results, in input order
pub async fn check_sequential<P, F>(
    prober: &P,
    targets: &[Target],
    mut on_result: F,
) -> Vec<CheckResult>
where
    P: Prober + ?Sized,
    F: FnMut(&CheckResult),
{
    let mut results = Vec::with_capacity(targets.len());

    for target in targets {
        let outcome = prober.probe(target).await;
        let result = CheckResult {
            target: target.clone(),
            outcome,
        };
        on_result(&result);
        results.push(result);
    }

    results
}

// Checks all targets at the same time
//
// Parameters:
//   prober: shared between all tasks (hence Arc)
//   targets: the targets to check
//   max_concurrency: Some(n) = at most n probes in flight, None = no limit
//
// Returns: all results, in input order
pub async fn check_concurrent(
    prober: Arc<dyn Prober>,
    targets: &[Target],
    max_concurrency: Option<usize>,
) -> Vec<CheckResult> {
    // 0 permits would block forever; more than MAX_PERMITS makes tokio panic
    let semaphore = max_concurrency
        .map(|limit| Arc::new(Semaphore::new(limit.clamp(1, Semaphore::MAX_PERMITS))));

    debug!(
        total = targets.len(),
        max_concurrency = ?max_concurrency,
        "Starting concurrent checks"
    );

    // Start every task right away; the semaphore (if any) holds some back
    let handles: Vec<_> = targets
        .iter()
        .cloned()
        .map(|target| {
            let prober = Arc::clone(&prober);
            let semaphore = semaphore.clone();

            tokio::spawn(async move {
                let _permit = match semaphore {
                    Some(semaphore) => match semaphore.acquire_owned().await {
                        Ok(permit) => Some(permit),
                        Err(_) => return ProbeOutcome::Other("probe cancelled".to_string()),
                    },
                    None => None,
                };

                prober.probe(&target).await
            })
        })
        .collect();

    // join_all keeps the order of the handles, which is the input order
    let joined = join_all(handles).await;

    targets
        .iter()
        .cloned()
        .zip(joined)
        .map(|(target, joined)| {
            let outcome = joined.unwrap_or_else(|e| {
                warn!(site = %target, error = %e, "Probe task failed");
                ProbeOutcome::Other(format!("probe task failed: {}", e))
            });
            CheckResult { target, outcome }
        })
        .collect()
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why tokio::spawn instead of just awaiting futures together?
//    - A spawned task is isolated: if it panics, tokio catches the panic
//      and hands us a JoinError instead of crashing everything
//    - Spawned tasks can also run on different threads
//
// 2. What is a Semaphore?
//    - A counter of "permits"
//    - acquire() waits until a permit is free and takes it
//    - Dropping the permit (_permit at the end of the task) gives it back
//    - With 50 permits, at most 50 probes run at once
//
// 3. Why Arc<dyn Prober>?
//    - Every task needs access to the prober
//    - Arc = "Atomically Reference Counted" shared ownership
//    - dyn Prober = any type that implements the Prober trait
//
// 4. What is ?Sized on P?
//    - By default generic types must have a known size
//    - ?Sized also allows `dyn Prober` to be passed by reference
//
// 5. Why FnMut for the callback?
//    - FnMut closures may change what they capture (e.g. push to a Vec)
//    - We call it once per target, so Fn would be too strict
// -----------------------------------------------------------------------------
