use serde::{Deserialize, Serialize};

use crate::task::Task;

/// Coordinator-to-worker message: one task to process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assignment(pub Task);

/// Worker-to-coordinator messages, tagged with the sending worker so the
/// coordinator can check per-worker ordering on the shared inbox.
///
/// A worker always sends `Emissions` for its current task (possibly with an
/// empty pair list) before `Ready`; the coordinator treats any other order as
/// a protocol violation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum WorkerReply {
    /// Map output for the just-completed task, in emission order.
    Emissions {
        worker: usize,
        pairs: Vec<(String, i64)>,
    },
    /// The worker is idle and may receive another task.
    Ready { worker: usize },
}
