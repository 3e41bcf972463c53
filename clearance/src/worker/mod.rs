//! Background aggregation with cancellation by supersession.
//!
//! The interactive side submits requests carrying an immutable snapshot and a
//! monotonic sequence number. The worker skips requests that were superseded
//! before it dequeued them; the handle drops responses to superseded
//! requests. Dispatch failures degrade to an empty result.

mod task;

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use clearance_core::task::TaskGuard;
use clearance_core::{
    AggregationKind, AggregationRequest, AggregationResponse, AggregationSnapshot, ClearanceError,
    Sorting, WorkerConfig,
};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

/// Entry point for spawning the aggregation worker.
pub struct AggregationWorker;

impl AggregationWorker {
    /// Spawn the worker on the current Tokio runtime.
    ///
    /// Behavior and trade-offs:
    /// - Requests are queued up to `cfg.queue_capacity`; a full queue is a
    ///   dispatch failure, not back-pressure.
    /// - Each computation runs on the blocking pool so large trees do not
    ///   stall the async runtime.
    ///
    /// # Panics
    /// Panics when called outside a Tokio runtime.
    #[must_use]
    pub fn spawn(cfg: WorkerConfig) -> AggregationHandle {
        let (req_tx, req_rx) = mpsc::channel(cfg.queue_capacity.max(1));
        let (resp_tx, resp_rx) = mpsc::unbounded_channel();
        let (stop_tx, stop_rx) = watch::channel(false);
        let latest = Arc::new(AtomicU64::new(0));
        let join = task::spawn_loop(req_rx, resp_tx, stop_rx, Arc::clone(&latest));
        AggregationHandle {
            cfg,
            requests: req_tx,
            responses: resp_rx,
            latest,
            pending: None,
            guard: TaskGuard::new(join, stop_tx),
        }
    }
}

#[derive(Debug)]
enum Pending {
    InFlight { seq: u64, fallback: AggregationResponse },
    Failed(AggregationResponse),
}

/// Handle to a running aggregation worker.
///
/// Dropping the handle stops and aborts the worker.
pub struct AggregationHandle {
    cfg: WorkerConfig,
    requests: mpsc::Sender<AggregationRequest>,
    responses: mpsc::UnboundedReceiver<AggregationResponse>,
    latest: Arc<AtomicU64>,
    pending: Option<Pending>,
    guard: TaskGuard<JoinHandle<()>, watch::Sender<bool>>,
}

impl AggregationHandle {
    /// Sequence number of the most recent submission; 0 before the first.
    #[must_use]
    pub fn latest_seq(&self) -> u64 {
        self.latest.load(Ordering::Acquire)
    }

    /// Submit a request, superseding every earlier one. Returns its sequence
    /// number.
    ///
    /// Never fails: a rejected request is logged and its empty result is
    /// what [`latest`](Self::latest) returns next.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "clearance::worker::submit",
            skip(self, snapshot, resource_id),
            fields(kind = kind.as_str()),
        )
    )]
    pub fn submit(
        &mut self,
        snapshot: &Arc<AggregationSnapshot>,
        resource_id: impl Into<String>,
        kind: AggregationKind,
        sorting: Sorting,
    ) -> u64 {
        let seq = self.latest.fetch_add(1, Ordering::AcqRel) + 1;
        let request = AggregationRequest {
            seq,
            resource_id: resource_id.into(),
            kind,
            sorting,
            snapshot: Arc::clone(snapshot),
        };
        let fallback = request.empty_response();

        let resources = snapshot.resource_count();
        let dispatched = if resources > self.cfg.max_snapshot_resources {
            Err(ClearanceError::WorkerDispatch(format!(
                "snapshot of {resources} resources exceeds the limit of {}",
                self.cfg.max_snapshot_resources
            )))
        } else {
            self.requests.try_send(request).map_err(|e| match e {
                mpsc::error::TrySendError::Full(_) => {
                    ClearanceError::WorkerDispatch("aggregation queue is full".to_string())
                }
                mpsc::error::TrySendError::Closed(_) => {
                    ClearanceError::WorkerDispatch("aggregation worker stopped".to_string())
                }
            })
        };

        self.pending = Some(match dispatched {
            Ok(()) => Pending::InFlight { seq, fallback },
            Err(_e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(seq, error = %_e, "aggregation dispatch failed");
                Pending::Failed(fallback)
            }
        });
        seq
    }

    /// Response to the most recent submission.
    ///
    /// Responses to superseded requests are dropped. Returns `None` when
    /// nothing is pending, and the empty result when dispatch failed or the
    /// worker went away.
    pub async fn latest(&mut self) -> Option<AggregationResponse> {
        match self.pending.take()? {
            Pending::Failed(empty) => Some(empty),
            Pending::InFlight { seq, fallback } => loop {
                match self.responses.recv().await {
                    Some(resp) if resp.seq == seq => return Some(resp),
                    Some(_stale) => {
                        #[cfg(feature = "tracing")]
                        tracing::trace!(seq = _stale.seq, latest = seq, "dropped stale aggregation");
                    }
                    None => {
                        #[cfg(feature = "tracing")]
                        tracing::warn!(seq, "aggregation worker stopped before answering");
                        return Some(fallback);
                    }
                }
            },
        }
    }

    /// Submit and wait for the answer.
    pub async fn request(
        &mut self,
        snapshot: &Arc<AggregationSnapshot>,
        resource_id: impl Into<String>,
        kind: AggregationKind,
        sorting: Sorting,
    ) -> Option<AggregationResponse> {
        self.submit(snapshot, resource_id, kind, sorting);
        self.latest().await
    }

    /// Stop the worker cooperatively and wait for it to exit.
    pub async fn stop(mut self) {
        self.guard.request_stop();
        if let Some(join) = self.guard.take_task() {
            let _ = join.await;
        }
    }

    /// `true` until the worker loop has exited.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.guard.is_running()
    }
}
