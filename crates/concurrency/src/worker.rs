//! Named worker threads with a bounded-wait completion signal
//!
//! A worker is an OS thread named after its role ("T1", "T2", ...). Besides the
//! usual unconditional join, every worker carries a [`CompletionSignal`] that
//! the orchestrator can wait on with a timeout. A worker that is still running
//! when the orchestrator gives up is detached, not cancelled: it keeps running
//! (or stays blocked) until the host process exits.

use parking_lot::{Condvar, Mutex};
use std::fmt;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use syncscope_core::Result;

/// One-shot flag set when a worker's body returns or unwinds.
#[derive(Debug, Default)]
pub struct CompletionSignal {
    done: Mutex<bool>,
    cond: Condvar,
}

impl CompletionSignal {
    fn complete(&self) {
        let mut done = self.done.lock();
        *done = true;
        self.cond.notify_all();
    }

    /// Whether the worker has finished.
    pub fn is_complete(&self) -> bool {
        *self.done.lock()
    }

    /// Wait up to `timeout` for completion. Returns `true` if completed.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut done = self.done.lock();
        while !*done {
            if self.cond.wait_until(&mut done, deadline).timed_out() {
                return *done;
            }
        }
        true
    }
}

/// Sets the completion signal on drop, so a panicking body still reports.
struct CompletionGuard(Arc<CompletionSignal>);

impl Drop for CompletionGuard {
    fn drop(&mut self) {
        self.0.complete();
    }
}

/// Handle to a running worker.
pub struct WorkerHandle {
    name: String,
    thread: JoinHandle<()>,
    signal: Arc<CompletionSignal>,
}

impl WorkerHandle {
    /// Worker name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the worker body has returned.
    pub fn is_finished(&self) -> bool {
        self.signal.is_complete()
    }

    /// Wait up to `timeout` for the worker to finish.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        self.signal.wait_timeout(timeout)
    }

    /// Wait unconditionally. A panic in the worker is resumed on the caller.
    pub fn join(self) {
        if let Err(payload) = self.thread.join() {
            std::panic::resume_unwind(payload);
        }
    }

    /// Stop tracking the thread without cancelling it.
    ///
    /// The returned handle can still report liveness, but can no longer join.
    pub fn detach(self) -> DetachedWorker {
        let WorkerHandle {
            name,
            thread,
            signal,
        } = self;
        drop(thread);
        DetachedWorker { name, signal }
    }
}

impl fmt::Debug for WorkerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkerHandle")
            .field("name", &self.name)
            .field("finished", &self.is_finished())
            .finish()
    }
}

/// A worker the orchestrator stopped waiting for. The thread is leaked.
#[derive(Debug, Clone)]
pub struct DetachedWorker {
    name: String,
    signal: Arc<CompletionSignal>,
}

impl DetachedWorker {
    /// Worker name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the leaked thread has since finished.
    pub fn is_finished(&self) -> bool {
        self.signal.is_complete()
    }
}

/// Spawn a named worker running `work`.
///
/// # Errors
///
/// Returns `Error::Io` if the OS refuses to create the thread.
pub fn spawn_worker<F>(name: impl Into<String>, work: F) -> Result<WorkerHandle>
where
    F: FnOnce() + Send + 'static,
{
    let name = name.into();
    let signal = Arc::new(CompletionSignal::default());
    let guard_signal = Arc::clone(&signal);

    let thread = thread::Builder::new().name(name.clone()).spawn(move || {
        let _guard = CompletionGuard(guard_signal);
        work();
    })?;

    tracing::trace!(target: "syncscope::worker", worker = %name, "spawned");
    Ok(WorkerHandle {
        name,
        thread,
        signal,
    })
}

/// Spawn `count` workers named `T1..Tn`, each running `make_work(index)`.
///
/// If a spawn fails, already started workers are joined before the error is
/// returned.
pub fn spawn_pool<F, W>(count: usize, mut make_work: F) -> Result<Vec<WorkerHandle>>
where
    F: FnMut(usize) -> W,
    W: FnOnce() + Send + 'static,
{
    let mut handles = Vec::with_capacity(count);
    for i in 0..count {
        match spawn_worker(worker_name(i), make_work(i)) {
            Ok(handle) => handles.push(handle),
            Err(e) => {
                join_all(handles);
                return Err(e);
            }
        }
    }
    Ok(handles)
}

/// Join every handle unconditionally.
pub fn join_all(handles: Vec<WorkerHandle>) {
    for handle in handles {
        handle.join();
    }
}

/// Stable worker name for a zero-based index: 0 -> "T1".
pub fn worker_name(index: usize) -> String {
    format!("T{}", index + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Barrier;

    #[test]
    fn test_worker_names() {
        assert_eq!(worker_name(0), "T1");
        assert_eq!(worker_name(4), "T5");
    }

    #[test]
    fn test_thread_carries_worker_name() {
        let seen = Arc::new(Mutex::new(None));
        let seen2 = Arc::clone(&seen);
        let handle = spawn_worker("T9", move || {
            *seen2.lock() = thread::current().name().map(str::to_string);
        })
        .unwrap();
        assert_eq!(handle.name(), "T9");
        handle.join();
        assert_eq!(seen.lock().as_deref(), Some("T9"));
    }

    #[test]
    fn test_wait_timeout_completes() {
        let handle = spawn_worker("T1", || {}).unwrap();
        assert!(handle.wait_timeout(Duration::from_secs(5)));
        assert!(handle.is_finished());
        handle.join();
    }

    #[test]
    fn test_wait_timeout_expires_while_blocked() {
        let gate = Arc::new(Barrier::new(2));
        let gate2 = Arc::clone(&gate);
        let handle = spawn_worker("T1", move || {
            gate2.wait();
        })
        .unwrap();

        let start = Instant::now();
        assert!(!handle.wait_timeout(Duration::from_millis(50)));
        assert!(start.elapsed() >= Duration::from_millis(50));
        assert!(!handle.is_finished());

        gate.wait();
        handle.join();
    }

    #[test]
    fn test_detached_worker_reports_liveness() {
        let gate = Arc::new(Barrier::new(2));
        let gate2 = Arc::clone(&gate);
        let handle = spawn_worker("T2", move || {
            gate2.wait();
        })
        .unwrap();

        let detached = handle.detach();
        assert_eq!(detached.name(), "T2");
        assert!(!detached.is_finished());

        gate.wait();
        let start = Instant::now();
        while !detached.is_finished() {
            assert!(start.elapsed() < Duration::from_secs(5));
            thread::sleep(Duration::from_millis(1));
        }
    }

    #[test]
    fn test_signal_set_when_body_panics() {
        let handle = spawn_worker("T3", || panic!("worker panic")).unwrap();
        assert!(handle.wait_timeout(Duration::from_secs(5)));
        let detached = handle.detach();
        assert!(detached.is_finished());
    }

    #[test]
    fn test_spawn_pool_runs_every_worker() {
        let ran = Arc::new(AtomicUsize::new(0));
        let handles = spawn_pool(6, |_| {
            let ran = Arc::clone(&ran);
            move || {
                ran.fetch_add(1, Ordering::SeqCst);
            }
        })
        .unwrap();

        let names: Vec<_> = handles.iter().map(|h| h.name().to_string()).collect();
        assert_eq!(names, vec!["T1", "T2", "T3", "T4", "T5", "T6"]);

        join_all(handles);
        assert_eq!(ran.load(Ordering::SeqCst), 6);
    }
}
