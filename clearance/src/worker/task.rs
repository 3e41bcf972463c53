use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use clearance_core::{AggregationRequest, AggregationResponse};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

pub(super) fn spawn_loop(
    mut requests: mpsc::Receiver<AggregationRequest>,
    responses: mpsc::UnboundedSender<AggregationResponse>,
    mut stop_watch: watch::Receiver<bool>,
    latest: Arc<AtomicU64>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            let request = tokio::select! {
                biased;
                _ = stop_watch.changed() => break,
                () = async {}, if *stop_watch.borrow() => break,
                next = requests.recv() => match next {
                    Some(r) => r,
                    None => break,
                },
            };

            if request.seq < latest.load(Ordering::Acquire) {
                #[cfg(feature = "tracing")]
                tracing::trace!(seq = request.seq, "skipped superseded aggregation");
                continue;
            }

            let fallback = request.empty_response();
            let computed = tokio::select! {
                biased;
                _ = stop_watch.changed() => break,
                joined = tokio::task::spawn_blocking(move || request.execute()) => joined,
            };
            let response = computed.unwrap_or_else(|_e| {
                #[cfg(feature = "tracing")]
                tracing::warn!(seq = fallback.seq, error = %_e, "aggregation task failed");
                fallback
            });
            if responses.send(response).is_err() {
                break;
            }
        }
    })
}
