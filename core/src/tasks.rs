//! Structured fan-out for collection work.
//!
//! [`TaskGroup`] is the one primitive behind both levels of fan-out in a run:
//! the orchestrator's one-task-per-collector spawn, and a collector's
//! one-task-per-item describe calls. Every spawned unit reports through an
//! [`Emitter`]: rows it returns are sent in order, an error is sent as a single
//! failure, and a panic is turned into a failure instead of tearing down the
//! run. Joining the group waits for every unit, whatever its outcome.

use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use awsinv_common::inventory::Row;
use futures::FutureExt;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{Instrument, error};

use crate::channel::Emitter;
use crate::error::CollectError;

pub type UnitResult = Result<Vec<Row>, CollectError>;

pub struct TaskGroup {
    tasks: JoinSet<()>,
    permits: Arc<Semaphore>,
}

impl TaskGroup {
    /// At most `limit` units run at once; the rest wait for a permit.
    pub fn bounded(limit: usize) -> Self {
        Self {
            tasks: JoinSet::new(),
            permits: Arc::new(Semaphore::new(limit.max(1))),
        }
    }

    pub fn unbounded() -> Self {
        Self {
            tasks: JoinSet::new(),
            permits: Arc::new(Semaphore::new(Semaphore::MAX_PERMITS)),
        }
    }

    /// Number of units spawned and not yet joined.
    pub(crate) fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Spawns one unit of work. The unit is registered before this returns.
    pub fn spawn<F>(&mut self, emitter: Emitter, subject: Option<String>, work: F)
    where
        F: Future<Output = UnitResult> + Send + 'static,
    {
        let permits = Arc::clone(&self.permits);
        let unit = async move {
            let _permit = permits.acquire_owned().await;

            let outcome = match AssertUnwindSafe(work).catch_unwind().await {
                Ok(outcome) => outcome,
                Err(payload) => Err(CollectError::Panicked(panic_message(payload))),
            };

            match outcome {
                Ok(rows) => {
                    for row in rows {
                        emitter.row(row).await;
                    }
                }
                Err(e) => emitter.failure(subject, e).await,
            }
        };
        self.tasks.spawn(unit.in_current_span());
    }

    /// Waits until every spawned unit has finished.
    pub async fn join(mut self) {
        while let Some(joined) = self.tasks.join_next().await {
            if let Err(e) = joined {
                error!("collection task did not complete: {e}");
            }
        }
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
