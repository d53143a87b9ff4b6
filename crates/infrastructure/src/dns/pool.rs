//! Bounded worker pool for DNS request tasks.
//!
//! `min_workers` workers are spawned up front and never retire. Every accepted
//! task counts as in flight until it finishes; while more tasks are in flight
//! than workers exist the pool grows, up to `max_workers`. Extra workers
//! retire after sitting idle for `idle_timeout`. At most `backlog` tasks wait
//! beyond the `max_workers` running ones, and submission fails immediately
//! once that limit is reached.

use ferrous_dyndns_domain::{DnsConfig, DomainError};
use futures::FutureExt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{debug, error, info, warn};

type Job = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerPoolConfig {
    pub min_workers: usize,
    pub max_workers: usize,
    pub idle_timeout: Duration,
    pub backlog: usize,
}

impl From<&DnsConfig> for WorkerPoolConfig {
    fn from(config: &DnsConfig) -> Self {
        Self {
            min_workers: config.min_workers,
            max_workers: config.max_workers,
            idle_timeout: config.worker_idle_timeout(),
            backlog: config.backlog,
        }
    }
}

/// How [`WorkerPool::shutdown`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownOutcome {
    /// Every in-flight task finished within the grace period.
    Graceful,
    /// The grace period elapsed and the remaining tasks were cancelled.
    Forced,
}

struct PoolShared {
    receiver: tokio::sync::Mutex<mpsc::Receiver<Job>>,
    workers: AtomicUsize,
    idle: AtomicUsize,
    /// Accepted tasks that have not finished yet, queued or running
    in_flight: AtomicUsize,
    idle_timeout: Duration,
    cancel: CancellationToken,
}

pub struct WorkerPool {
    shared: Arc<PoolShared>,
    sender: Mutex<Option<mpsc::Sender<Job>>>,
    tracker: TaskTracker,
    max_workers: usize,
    backlog: usize,
}

impl WorkerPool {
    /// Spawns the core workers, so it must be called from inside a tokio
    /// runtime.
    pub fn new(config: WorkerPoolConfig) -> Self {
        let min_workers = config.min_workers.max(1);
        let max_workers = config.max_workers.max(min_workers);
        let backlog = config.backlog.max(1);

        let (sender, receiver) = mpsc::channel(max_workers + backlog);
        let pool = Self {
            shared: Arc::new(PoolShared {
                receiver: tokio::sync::Mutex::new(receiver),
                workers: AtomicUsize::new(0),
                idle: AtomicUsize::new(0),
                in_flight: AtomicUsize::new(0),
                idle_timeout: config.idle_timeout,
                cancel: CancellationToken::new(),
            }),
            sender: Mutex::new(Some(sender)),
            tracker: TaskTracker::new(),
            max_workers,
            backlog,
        };

        for _ in 0..min_workers {
            pool.shared.workers.fetch_add(1, Ordering::SeqCst);
            pool.spawn_worker(WorkerKind::Core);
        }

        debug!(min_workers, max_workers, backlog, "Worker pool started");
        pool
    }

    /// Queue a task without waiting.
    ///
    /// Fails with `WorkerPoolFull` once `max_workers + backlog` tasks are in
    /// flight and with `WorkerPoolClosed` once shutdown has begun. Any growth
    /// the new task needs has happened by the time this returns.
    pub fn submit<F>(&self, task: F) -> Result<(), DomainError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        {
            let guard = self.sender.lock().unwrap_or_else(PoisonError::into_inner);
            let sender = guard.as_ref().ok_or(DomainError::WorkerPoolClosed)?;

            let limit = self.max_workers + self.backlog;
            self.shared
                .in_flight
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| {
                    (n < limit).then_some(n + 1)
                })
                .map_err(|_| DomainError::WorkerPoolFull {
                    capacity: self.backlog,
                })?;

            if let Err(e) = sender.try_send(Box::pin(task)) {
                self.shared.in_flight.fetch_sub(1, Ordering::SeqCst);
                return Err(match e {
                    TrySendError::Full(_) => DomainError::WorkerPoolFull {
                        capacity: self.backlog,
                    },
                    TrySendError::Closed(_) => DomainError::WorkerPoolClosed,
                });
            }
        }

        self.grow_to_demand();
        Ok(())
    }

    pub fn worker_count(&self) -> usize {
        self.shared.workers.load(Ordering::SeqCst)
    }

    pub fn idle_workers(&self) -> usize {
        self.shared.idle.load(Ordering::SeqCst)
    }

    /// Two-phase shutdown: refuse new tasks and let queued and running ones
    /// finish for up to `grace_period`, then cancel whatever is left.
    pub async fn shutdown(&self, grace_period: Duration) -> ShutdownOutcome {
        self.sender
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        self.tracker.close();

        if tokio::time::timeout(grace_period, self.tracker.wait())
            .await
            .is_ok()
        {
            info!("Worker pool drained");
            return ShutdownOutcome::Graceful;
        }

        warn!(
            grace_period_ms = grace_period.as_millis() as u64,
            workers = self.worker_count(),
            "Grace period elapsed, cancelling remaining request tasks"
        );
        self.shared.cancel.cancel();
        self.tracker.wait().await;
        ShutdownOutcome::Forced
    }

    /// Spawn workers until every in-flight task has one, up to `max_workers`.
    fn grow_to_demand(&self) {
        let max = self.max_workers;
        loop {
            let demand = self.shared.in_flight.load(Ordering::SeqCst).min(max);
            let grown = self
                .shared
                .workers
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| {
                    (n < demand).then_some(n + 1)
                });

            match grown {
                Ok(previous) => {
                    debug!(workers = previous + 1, "Worker pool grown");
                    self.spawn_worker(WorkerKind::Extra);
                }
                Err(_) => break,
            }
        }
    }

    fn spawn_worker(&self, kind: WorkerKind) {
        self.tracker.spawn(run_worker(Arc::clone(&self.shared), kind));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WorkerKind {
    Core,
    Extra,
}

enum NextJob {
    Job(Job),
    Closed,
    Retire,
}

async fn run_worker(shared: Arc<PoolShared>, kind: WorkerKind) {
    loop {
        shared.idle.fetch_add(1, Ordering::SeqCst);
        let next = next_job(&shared, kind).await;
        shared.idle.fetch_sub(1, Ordering::SeqCst);

        match next {
            NextJob::Job(job) => {
                run_job(&shared.cancel, job).await;
                shared.in_flight.fetch_sub(1, Ordering::SeqCst);
            }
            NextJob::Closed => break,
            NextJob::Retire => {
                debug!("Idle worker retired");
                break;
            }
        }
    }

    shared.workers.fetch_sub(1, Ordering::SeqCst);
}

async fn next_job(shared: &PoolShared, kind: WorkerKind) -> NextJob {
    let receive = async {
        let mut receiver = shared.receiver.lock().await;
        receiver.recv().await
    };

    let received = tokio::select! {
        biased;
        _ = shared.cancel.cancelled() => return NextJob::Closed,
        received = async {
            match kind {
                WorkerKind::Core => Some(receive.await),
                WorkerKind::Extra => tokio::time::timeout(shared.idle_timeout, receive).await.ok(),
            }
        } => received,
    };

    match received {
        Some(Some(job)) => NextJob::Job(job),
        Some(None) => NextJob::Closed,
        None => NextJob::Retire,
    }
}

async fn run_job(cancel: &CancellationToken, job: Job) {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            debug!("Request task cancelled by shutdown");
        }
        result = AssertUnwindSafe(job).catch_unwind() => {
            if result.is_err() {
                error!("Request task panicked");
            }
        }
    }
}
