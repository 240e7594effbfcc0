use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::error::EngineError;
use crate::mapper::Mapper;
use crate::message::{Assignment, WorkerReply};
use crate::reducer::Reducer;
use crate::task::{Task, TaskQueue};
use crate::worker::WorkerHandle;

/// What a busy worker currently holds, and whether its result message has
/// arrived yet. `Ready` is only legal once `result_seen` is set.
struct InFlight {
    task: usize,
    result_seen: bool,
}

/// Owns every piece of scheduling state - task queue, in-flight table,
/// emission accumulator - and mutates it from a single control loop in
/// response to worker replies. Workers never touch shared state, which makes
/// the whole engine lock-free by construction.
pub struct Coordinator {
    pool_size: usize,
}

impl Coordinator {
    /// `pool_size` is fixed for the lifetime of the run; workers are never
    /// added, removed or replaced after startup.
    pub fn new(pool_size: usize) -> Self {
        assert!(pool_size >= 1, "worker pool must have at least one worker");
        Self { pool_size }
    }

    /// Drives one full run: drain the source, dispatch every task across the
    /// pool, merge emissions as they arrive, and reduce per key once all
    /// tasks are dispatched and acknowledged.
    ///
    /// The final mapping is stable across runs for any commutative and
    /// associative reducer, regardless of worker completion interleaving.
    pub async fn run<S, M, R>(
        &self,
        source: S,
        mapper: Arc<M>,
        reducer: &R,
    ) -> Result<HashMap<String, i64>, EngineError>
    where
        S: IntoIterator<Item = Result<Task, EngineError>>,
        M: Mapper,
        R: Reducer,
    {
        // Loading: the whole input is materialized before any dispatch, so
        // the queue length is final from here on.
        let tasks = source.into_iter().collect::<Result<Vec<_>, _>>()?;
        let mut queue = TaskQueue::new(tasks);
        info!(tasks = queue.len(), workers = self.pool_size, "input loaded");

        if queue.is_empty() {
            info!("empty input, nothing to reduce");
            return Ok(HashMap::new());
        }

        let (reply_tx, mut reply_rx) = mpsc::channel(self.pool_size * 2);
        let workers: Vec<WorkerHandle> = (0..self.pool_size)
            .map(|id| WorkerHandle::spawn(id, mapper.clone(), reply_tx.clone()))
            .collect();
        // The inbox must only close when every worker is gone.
        drop(reply_tx);

        let mut in_flight: HashMap<usize, InFlight> = HashMap::new();
        let mut accumulator: HashMap<String, Vec<i64>> = HashMap::new();

        dispatch(&workers, &mut queue, &mut in_flight).await?;

        // Awaiting: react to replies in arrival order until every task has
        // been dispatched and every dispatched task acknowledged.
        while !(queue.is_drained() && in_flight.is_empty()) {
            let Some(reply) = reply_rx.recv().await else {
                let outstanding = queue.len() - queue.cursor() + in_flight.len();
                return Err(EngineError::PoolClosed { outstanding });
            };
            match reply {
                WorkerReply::Emissions { worker, pairs } => {
                    let Some(entry) = in_flight.get_mut(&worker) else {
                        return Err(protocol(worker, "emissions without an assignment"));
                    };
                    if entry.result_seen {
                        return Err(protocol(worker, "duplicate emissions for one task"));
                    }
                    entry.result_seen = true;
                    debug!(worker, task = entry.task, pairs = pairs.len(), "merging emissions");
                    for (key, value) in pairs {
                        accumulator.entry(key).or_default().push(value);
                    }
                }
                WorkerReply::Ready { worker } => match in_flight.remove(&worker) {
                    Some(InFlight { result_seen: true, task }) => {
                        debug!(worker, task, "worker idle again");
                        dispatch(&workers, &mut queue, &mut in_flight).await?;
                    }
                    Some(InFlight { result_seen: false, .. }) => {
                        return Err(protocol(worker, "ready before emissions"));
                    }
                    None => {
                        return Err(protocol(worker, "ready without an assignment"));
                    }
                },
            }
        }

        for worker in workers {
            worker.shutdown().await;
        }

        // Terminating: the accumulator is complete and frozen; fold each
        // key's full value sequence into the final result.
        info!(keys = accumulator.len(), "map phase complete, reducing");
        let result = accumulator
            .iter()
            .map(|(key, values)| (key.clone(), reducer.reduce(key, values)))
            .collect();
        Ok(result)
    }
}

/// Hands tasks to idle workers until the queue is drained or the pool is
/// saturated. Ties between idle workers break to the lowest id by scanning
/// the pool in fixed order - deliberately simple, not load-aware.
async fn dispatch(
    workers: &[WorkerHandle],
    queue: &mut TaskQueue,
    in_flight: &mut HashMap<usize, InFlight>,
) -> Result<(), EngineError> {
    while !queue.is_drained() && in_flight.len() < workers.len() {
        let Some(worker) = workers.iter().find(|w| !in_flight.contains_key(&w.id())) else {
            break;
        };
        let Some(task) = queue.peek().cloned() else {
            break;
        };
        let task_index = task.index;
        debug!(worker = worker.id(), task = task_index, "dispatching task");
        if !worker.assign(Assignment(task)).await {
            return Err(EngineError::WorkerExited { worker: worker.id() });
        }
        in_flight.insert(
            worker.id(),
            InFlight {
                task: task_index,
                result_seen: false,
            },
        );
        queue.advance();
    }
    Ok(())
}

fn protocol(worker: usize, detail: &str) -> EngineError {
    EngineError::Protocol {
        worker,
        detail: detail.to_string(),
    }
}
