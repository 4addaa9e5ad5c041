//! Bounded worker pool for running checks.
//!
//! A fixed number of executors drain a shared queue. The producer enqueues
//! every check and closes the queue; executors exit once it is empty, and
//! [`WorkerPool::run`] returns after all of them have finished.
//!
//! Each check is moved into exactly one executor and handed back when done,
//! so no two executors ever touch the same check.

mod progress;

pub use progress::{render_line, NoProgress, ProgressObserver, TerminalProgress};

use crate::check::Check;
use futures::future::join_all;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};

/// Default number of concurrent executors.
pub const DEFAULT_WORKERS: usize = 3;

type Queue = Arc<Mutex<mpsc::Receiver<(usize, Check)>>>;

/// Runs checks with bounded concurrency.
#[derive(Debug, Clone)]
pub struct WorkerPool {
    workers: usize,
}

impl Default for WorkerPool {
    fn default() -> Self {
        Self::new(DEFAULT_WORKERS)
    }
}

impl WorkerPool {
    /// Create a pool with `workers` executors; zero is treated as one.
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Run every check once and return them in input order.
    pub async fn run(&self, checks: Vec<Check>, progress: Arc<dyn ProgressObserver>) -> Vec<Check> {
        let total = checks.len();
        let workers = self.workers.min(total.max(1));

        tracing::info!(checks = total, workers, "Running checks");
        progress.started(total);

        // Capacity 1 keeps the producer at most one check ahead of the executors.
        let (tx, rx) = mpsc::channel::<(usize, Check)>(1);
        let queue: Queue = Arc::new(Mutex::new(rx));
        let completed = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..workers)
            .map(|worker| {
                tokio::spawn(execute(
                    worker,
                    Arc::clone(&queue),
                    Arc::clone(&completed),
                    Arc::clone(&progress),
                    total,
                ))
            })
            .collect();
        // Executors own the receiver from here on; if they all stop, sends fail.
        drop(queue);

        for item in checks.into_iter().enumerate() {
            if tx.send(item).await.is_err() {
                tracing::error!("All executors stopped before the queue was drained");
                break;
            }
        }
        drop(tx);

        let mut finished = Vec::with_capacity(total);
        for result in join_all(handles).await {
            match result {
                Ok(done) => finished.extend(done),
                Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
                Err(e) => tracing::error!(error = %e, "Check executor terminated abnormally"),
            }
        }
        if finished.len() < total {
            tracing::error!(
                lost = total - finished.len(),
                total,
                "Some checks were not returned by their executor"
            );
        }
        finished.sort_by_key(|(index, _)| *index);

        progress.finished(total);
        tracing::info!(
            checks = finished.len(),
            failed = finished.iter().filter(|(_, c)| !c.success()).count(),
            "All checks completed"
        );

        finished.into_iter().map(|(_, check)| check).collect()
    }
}

/// One executor: pull, run, count, repeat until the queue is closed and empty.
async fn execute(
    worker: usize,
    queue: Queue,
    completed: Arc<AtomicUsize>,
    progress: Arc<dyn ProgressObserver>,
    total: usize,
) -> Vec<(usize, Check)> {
    let mut done = Vec::new();

    loop {
        let next = {
            let mut rx = queue.lock().await;
            rx.recv().await
        };
        let Some((index, mut check)) = next else {
            break;
        };

        check.run().await;

        let count = completed.fetch_add(1, Ordering::SeqCst) + 1;
        progress.completed(count, total, &check);
        done.push((index, check));
    }

    tracing::debug!(worker, checks = done.len(), "Executor finished");
    done
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::{CheckId, CheckState, Expectations, ProbeRequest};
    use reqwest::Url;
    use std::collections::BTreeMap;

    #[derive(Default)]
    struct Recorder {
        started: AtomicUsize,
        completed: AtomicUsize,
        highest: AtomicUsize,
        finished: AtomicUsize,
    }

    impl ProgressObserver for Recorder {
        fn started(&self, total: usize) {
            self.started.store(total, Ordering::SeqCst);
        }

        fn completed(&self, done: usize, _total: usize, _check: &Check) {
            self.completed.fetch_add(1, Ordering::SeqCst);
            self.highest.fetch_max(done, Ordering::SeqCst);
        }

        fn finished(&self, total: usize) {
            self.finished.store(total, Ordering::SeqCst);
        }
    }

    fn unreachable_check(i: usize) -> Check {
        // Nothing listens on port 1 of the loopback interface.
        let url = Url::parse(&format!("http://127.0.0.1:1/{}", i)).unwrap();
        Check::new(
            CheckId {
                service: "svc".to_string(),
                address: "127.0.0.1:1".to_string(),
                test: "t".to_string(),
                resource: format!("r{}", i),
            },
            ProbeRequest::new(url),
            1,
            Expectations {
                status: 200,
                contains: vec![],
                headers: BTreeMap::new(),
            },
        )
    }

    #[test]
    fn test_zero_workers_becomes_one() {
        assert_eq!(WorkerPool::new(0).workers(), 1);
        assert_eq!(WorkerPool::default().workers(), DEFAULT_WORKERS);
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let recorder = Arc::new(Recorder::default());
        let checks = WorkerPool::new(3).run(vec![], recorder.clone()).await;

        assert!(checks.is_empty());
        assert_eq!(recorder.completed.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_failures_are_contained_and_order_preserved() {
        let checks: Vec<_> = (0..5).map(unreachable_check).collect();
        let recorder = Arc::new(Recorder::default());

        let checks = WorkerPool::new(2).run(checks, recorder.clone()).await;

        assert_eq!(checks.len(), 5);
        for (i, check) in checks.iter().enumerate() {
            assert_eq!(check.id.resource, format!("r{}", i));
            assert_eq!(check.state(), CheckState::Failed);
            assert_eq!(check.reason().len(), 1);
        }

        assert_eq!(recorder.started.load(Ordering::SeqCst), 5);
        assert_eq!(recorder.completed.load(Ordering::SeqCst), 5);
        assert_eq!(recorder.highest.load(Ordering::SeqCst), 5);
        assert_eq!(recorder.finished.load(Ordering::SeqCst), 5);
    }

    struct PanickingObserver;

    impl ProgressObserver for PanickingObserver {
        fn completed(&self, _done: usize, _total: usize, _check: &Check) {
            panic!("observer failed");
        }
    }

    #[tokio::test]
    #[should_panic(expected = "observer failed")]
    async fn test_executor_panic_is_propagated() {
        // With one executor gone the producer must not block on the full queue.
        let checks: Vec<_> = (0..3).map(unreachable_check).collect();
        WorkerPool::new(1).run(checks, Arc::new(PanickingObserver)).await;
    }

    #[tokio::test]
    async fn test_more_workers_than_checks() {
        let checks: Vec<_> = (0..2).map(unreachable_check).collect();
        let checks = WorkerPool::new(16).run(checks, Arc::new(NoProgress)).await;

        assert_eq!(checks.len(), 2);
        assert!(checks.iter().all(|c| c.state().is_finished()));
    }
}
