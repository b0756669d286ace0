// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Background execution of mutating commands.
//!
//! Mutations run on the blocking thread pool so callers on the async
//! runtime never wait on storage. At most `mutation_workers` run at once,
//! and mutations targeting the same assignment run one at a time in the
//! order they were submitted. There is no cancellation and no timeout.
//!
//! The store sits behind an async mutex so readers on the runtime wait
//! with `.lock().await` instead of parking a worker thread.

use crate::command::{Command, MutationOutcome};
use crate::engine::PatternEngine;
use crate::error::CoreError;
use crate::ports::PatternStore;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::{Mutex as StoreMutex, Semaphore, oneshot};
use tokio::task::JoinHandle;
use tracing::debug;

/// The tail of one assignment's queue.
///
/// The receiver resolves once the most recently submitted mutation for the
/// assignment has finished.
struct QueueTail {
    ticket: u64,
    done: oneshot::Receiver<()>,
}

#[derive(Default)]
struct Queues {
    next_ticket: u64,
    tails: HashMap<i64, QueueTail>,
}

/// Runs commands against a shared store on a bounded worker pool.
pub struct MutationExecutor<S> {
    engine: PatternEngine,
    store: Arc<StoreMutex<S>>,
    permits: Arc<Semaphore>,
    queues: Arc<Mutex<Queues>>,
}

impl<S> Clone for MutationExecutor<S> {
    fn clone(&self) -> Self {
        Self {
            engine: self.engine.clone(),
            store: Arc::clone(&self.store),
            permits: Arc::clone(&self.permits),
            queues: Arc::clone(&self.queues),
        }
    }
}

impl<S: PatternStore + Send + 'static> MutationExecutor<S> {
    /// Creates an executor sized by the engine's `mutation_workers`.
    #[must_use]
    pub fn new(engine: PatternEngine, store: Arc<StoreMutex<S>>) -> Self {
        let workers: usize = engine.config().mutation_workers.max(1);
        Self {
            engine,
            store,
            permits: Arc::new(Semaphore::new(workers)),
            queues: Arc::new(Mutex::new(Queues::default())),
        }
    }

    #[must_use]
    pub const fn engine(&self) -> &PatternEngine {
        &self.engine
    }

    /// The store mutations run against. Reads may lock it directly.
    #[must_use]
    pub const fn store(&self) -> &Arc<StoreMutex<S>> {
        &self.store
    }

    /// Queues a command and returns a handle resolving to its result.
    ///
    /// Must be called from within a tokio runtime.
    pub fn submit(&self, command: Command) -> JoinHandle<Result<MutationOutcome, CoreError>> {
        let assignment_id: Option<i64> = command.assignment_id();
        let (done_tx, done_rx) = oneshot::channel::<()>();
        let (ticket, previous) = self.enqueue(assignment_id, done_rx);

        let engine: PatternEngine = self.engine.clone();
        let store: Arc<StoreMutex<S>> = Arc::clone(&self.store);
        let permits: Arc<Semaphore> = Arc::clone(&self.permits);
        let queues: Arc<Mutex<Queues>> = Arc::clone(&self.queues);

        tokio::spawn(async move {
            // Dropped when this task ends, which releases the next mutation
            // for the same assignment.
            let _done = done_tx;

            if let Some(previous) = previous {
                // An error only means the previous task ended without sending.
                let _ = previous.await;
            }

            let result: Result<MutationOutcome, CoreError> =
                run(engine, store, &permits, command).await;

            if let Some(id) = assignment_id {
                release(&queues, id, ticket);
            }
            result
        })
    }

    fn enqueue(
        &self,
        assignment_id: Option<i64>,
        done: oneshot::Receiver<()>,
    ) -> (u64, Option<oneshot::Receiver<()>>) {
        let Some(id) = assignment_id else {
            return (0, None);
        };

        let mut queues = self
            .queues
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        queues.next_ticket += 1;
        let ticket: u64 = queues.next_ticket;
        let previous: Option<QueueTail> = queues.tails.insert(id, QueueTail { ticket, done });

        if previous.is_some() {
            debug!(assignment_id = id, ticket, "Mutation queued behind in-flight mutation");
        }
        (ticket, previous.map(|tail| tail.done))
    }
}

async fn run<S: PatternStore + Send + 'static>(
    engine: PatternEngine,
    store: Arc<StoreMutex<S>>,
    permits: &Semaphore,
    command: Command,
) -> Result<MutationOutcome, CoreError> {
    let name: &'static str = command.name();
    let failure: fn(String) -> CoreError = match &command {
        Command::CreatePattern(_) => CoreError::Create,
        Command::UpdatePattern { .. } => CoreError::Update,
        Command::DeletePattern { .. } => CoreError::Delete,
    };

    let _permit = permits
        .acquire()
        .await
        .map_err(|e| failure(format!("worker pool closed: {e}")))?;

    tokio::task::spawn_blocking(move || {
        let mut guard = store.blocking_lock();
        debug!(command = name, "Applying mutation");
        engine.apply(&mut *guard, command)
    })
    .await
    .map_err(|e| failure(format!("mutation worker failed: {e}")))?
}

/// Forgets a finished queue tail unless a newer mutation replaced it.
fn release(queues: &Mutex<Queues>, assignment_id: i64, ticket: u64) {
    let mut queues = queues
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner);
    if queues
        .tails
        .get(&assignment_id)
        .is_some_and(|tail| tail.ticket == ticket)
    {
        queues.tails.remove(&assignment_id);
    }
}
