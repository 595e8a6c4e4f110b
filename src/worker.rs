//! Background workers for long-running operations.
//!
//! Scanning and switching both block on subprocesses and filesystem calls.
//! Each owns a [`BackgroundWorker`]: one named thread fed through a channel,
//! so callers can start the work and collect the result later through a
//! [`TaskHandle`].
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use jdkswitch::worker::{BackgroundWorker, TracingReporter};
//!
//! let worker = BackgroundWorker::spawn("example", Arc::new(TracingReporter)).unwrap();
//! let handle = worker.submit(|| 2 + 2);
//! assert_eq!(handle.wait().unwrap(), 4);
//! ```

use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::thread;

use crate::error::{JdkSwitchError, Result};

type Job = Box<dyn FnOnce() + Send + 'static>;

/// Receives conditions the core cannot recover from on its own.
///
/// Whatever hosts the core (the CLI, a GUI) implements this to surface the
/// problem to the user.
pub trait FatalReporter: Send + Sync {
    /// Report an unrecoverable condition.
    fn report_fatal(&self, context: &str, detail: &str);
}

/// Reports fatal conditions through `tracing` at error level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl FatalReporter for TracingReporter {
    fn report_fatal(&self, context: &str, detail: &str) {
        tracing::error!("{}: {}", context, detail);
    }
}

/// A single dedicated thread that runs submitted jobs in order.
///
/// Dropping the worker closes its queue; jobs already queued still run and
/// the thread exits afterwards.
pub struct BackgroundWorker {
    name: String,
    sender: Sender<Job>,
    reporter: Arc<dyn FatalReporter>,
}

impl std::fmt::Debug for BackgroundWorker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackgroundWorker")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl BackgroundWorker {
    /// Start a worker thread named `jdkswitch-<name>`.
    pub fn spawn(name: &str, reporter: Arc<dyn FatalReporter>) -> Result<Self> {
        let (sender, receiver) = mpsc::channel::<Job>();
        let thread_name = format!("jdkswitch-{}", name);

        thread::Builder::new()
            .name(thread_name.clone())
            .spawn(move || {
                for job in receiver {
                    job();
                }
            })
            .map_err(|e| {
                reporter.report_fatal(&format!("Starting worker '{}'", name), &e.to_string());
                JdkSwitchError::Io(e)
            })?;

        tracing::debug!("Started background worker {}", thread_name);

        Ok(Self {
            name: name.to_string(),
            sender,
            reporter,
        })
    }

    /// Worker name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Queue `job` and return a handle to its eventual result.
    ///
    /// If the job panics, the panic is reported to the [`FatalReporter`] and
    /// the handle yields [`JdkSwitchError::WorkerUnavailable`].
    pub fn submit<T, F>(&self, job: F) -> TaskHandle<T>
    where
        T: Send + 'static,
        F: FnOnce() -> T + Send + 'static,
    {
        let (tx, rx) = mpsc::sync_channel(1);
        let reporter = Arc::clone(&self.reporter);
        let context = format!("Background task on worker '{}'", self.name);

        let wrapped: Job = Box::new(move || {
            match panic::catch_unwind(AssertUnwindSafe(job)) {
                Ok(value) => {
                    let _ = tx.send(value);
                }
                Err(payload) => {
                    reporter.report_fatal(&context, &panic_message(payload.as_ref()));
                }
            }
        });

        if self.sender.send(wrapped).is_err() {
            self.reporter.report_fatal(
                &format!("Submitting to worker '{}'", self.name),
                "worker thread has exited",
            );
        }

        TaskHandle {
            worker: self.name.clone(),
            receiver: rx,
        }
    }
}

/// Pending result of a job submitted to a [`BackgroundWorker`].
#[derive(Debug)]
pub struct TaskHandle<T> {
    worker: String,
    receiver: Receiver<T>,
}

impl<T> TaskHandle<T> {
    /// Block until the job finishes.
    pub fn wait(self) -> Result<T> {
        self.receiver
            .recv()
            .map_err(|_| JdkSwitchError::WorkerUnavailable {
                worker: self.worker.clone(),
            })
    }

    /// Take the result if the job has finished, without blocking.
    ///
    /// Returns `Ok(None)` while the job is still running.
    pub fn try_take(&self) -> Result<Option<T>> {
        match self.receiver.try_recv() {
            Ok(value) => Ok(Some(value)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(JdkSwitchError::WorkerUnavailable {
                worker: self.worker.clone(),
            }),
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
