//! Streaming variant: the whole pipeline runs on a background worker
//! while typed progress events flow over a bounded channel. Slow or
//! disconnected consumers only lose updates, they never stop the work;
//! cancellation is explicit and honored at stage boundaries.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use triage_core::errors::{PipelineError, TriageResult};
use triage_core::models::{InvestigationRequest, ProgressEvent};

use crate::engine::InvestigationEngine;

/// Progress events buffered before the producer starts dropping them.
const CHANNEL_CAPACITY: usize = 64;

/// Cooperative cancellation flag, checked at every stage boundary.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Error out of the pipeline when cancelled.
    pub(crate) fn check(&self) -> TriageResult<()> {
        if self.is_cancelled() {
            Err(PipelineError::Cancelled.into())
        } else {
            Ok(())
        }
    }
}

/// Handle to a streaming investigation: the event receiver, the cancel
/// token, and the worker handle.
pub struct InvestigationStream {
    pub events: mpsc::Receiver<ProgressEvent>,
    cancel: CancelToken,
    handle: JoinHandle<()>,
}

impl InvestigationStream {
    /// Request cancellation; the worker stops at the next stage
    /// boundary and publishes a `Failed` event.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Wait for the worker to finish. Dropping the stream without
    /// joining is fine; the worker keeps running detached.
    pub async fn join(self) {
        let _ = self.handle.await;
    }
}

/// Publish an event without blocking the pipeline. A full or closed
/// channel drops the event.
pub(crate) fn publish(progress: Option<&mpsc::Sender<ProgressEvent>>, event: ProgressEvent) {
    if let Some(tx) = progress {
        if let Err(e) = tx.try_send(event) {
            debug!(error = %e, "progress event dropped");
        }
    }
}

/// Run an investigation on a background worker, returning immediately
/// with the event stream.
pub fn spawn_streaming(
    engine: Arc<InvestigationEngine>,
    request: InvestigationRequest,
) -> InvestigationStream {
    let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
    let cancel = CancelToken::new();
    let worker_cancel = cancel.clone();

    let handle = tokio::spawn(async move {
        // `Completed` is published by the engine itself; only failures
        // need reporting here.
        if let Err(e) = engine
            .run_with_progress(request, Some(&tx), &worker_cancel)
            .await
        {
            publish(
                Some(&tx),
                ProgressEvent::Failed {
                    message: e.to_string(),
                },
            );
        }
    });

    InvestigationStream {
        events: rx,
        cancel,
        handle,
    }
}
