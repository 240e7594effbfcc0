use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::mapper::Mapper;
use crate::message::{Assignment, WorkerReply};

/// Coordinator-side handle to one pooled worker: its stable id, the
/// assignment channel and the join handle for shutdown.
pub struct WorkerHandle {
    id: usize,
    assign_tx: mpsc::Sender<Assignment>,
    handle: JoinHandle<()>,
}

impl WorkerHandle {
    /// Spawns a worker task running the request/reply loop for the lifetime
    /// of the run. The assignment channel has capacity 1: a worker is only
    /// ever handed a task while idle, so the slot is always free.
    pub fn spawn<M: Mapper>(id: usize, mapper: Arc<M>, reply_tx: mpsc::Sender<WorkerReply>) -> Self {
        let (assign_tx, assign_rx) = mpsc::channel(1);
        let handle = tokio::spawn(worker_loop(id, mapper, assign_rx, reply_tx));
        Self {
            id,
            assign_tx,
            handle,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    /// Hands the worker a task. Returns false only if the worker task is
    /// already gone.
    pub async fn assign(&self, assignment: Assignment) -> bool {
        self.assign_tx.send(assignment).await.is_ok()
    }

    /// Closes the assignment channel and waits for the worker loop to exit.
    pub async fn shutdown(self) {
        drop(self.assign_tx);
        // A panicked mapper already surfaced as a stalled or aborted run;
        // nothing to do with the join error here.
        let _ = self.handle.await;
    }
}

/// The worker loop proper: receive a task, apply the map function, send the
/// emissions and then the readiness signal. Sending `Ready` strictly after
/// `Emissions` is what lets the coordinator merge before re-dispatching.
/// Workers keep no state across tasks beyond the mapper itself.
async fn worker_loop<M: Mapper>(
    id: usize,
    mapper: Arc<M>,
    mut assign_rx: mpsc::Receiver<Assignment>,
    reply_tx: mpsc::Sender<WorkerReply>,
) {
    while let Some(Assignment(task)) = assign_rx.recv().await {
        debug!(worker = id, task = task.index, "task received");
        let pairs = mapper.map(&task.payload);
        debug!(worker = id, task = task.index, emitted = pairs.len(), "task mapped");

        if reply_tx
            .send(WorkerReply::Emissions { worker: id, pairs })
            .await
            .is_err()
        {
            // Coordinator is gone; nothing left to report to.
            return;
        }
        if reply_tx
            .send(WorkerReply::Ready { worker: id })
            .await
            .is_err()
        {
            return;
        }
    }
    debug!(worker = id, "assignment channel closed, worker exiting");
}
