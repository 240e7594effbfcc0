use std::path::PathBuf;

use thiserror::Error;

/// Failure taxonomy for a run. There is no local recovery anywhere in the
/// engine: every variant aborts the run.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The input file could not be opened or read. Fatal before any worker
    /// starts.
    #[error("cannot read input {path}: {source}")]
    Input {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A worker broke the reply ordering contract (e.g. `Ready` before its
    /// task's `Emissions`, or a reply without an in-flight assignment).
    #[error("protocol violation from worker {worker}: {detail}")]
    Protocol { worker: usize, detail: String },

    /// A worker's assignment channel closed while the coordinator still had
    /// a task for it.
    #[error("worker {worker} exited before accepting an assignment")]
    WorkerExited { worker: usize },

    /// Every worker is gone while tasks are still outstanding. A single dead
    /// worker merely stalls the run (no recovery by design); losing the whole
    /// pool closes the reply inbox and surfaces here.
    #[error("worker pool closed with {outstanding} task(s) outstanding")]
    PoolClosed { outstanding: usize },
}
