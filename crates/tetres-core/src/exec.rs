// ── Execution modes ──
//
// Data-client operations are plain futures. This module decides how a
// caller waits for them: blocking the calling thread behind a busy
// indicator, or fire-and-forget with a completion callback. Both paths
// run the same future, so listeners cannot tell them apart.

use std::future::Future;
use std::panic::resume_unwind;
use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::error::CoreError;

/// Shown while a blocking operation is outstanding.
pub trait BusyIndicator: Send + Sync {
    fn begin(&self, label: &str);
    fn end(&self);
}

/// Indicator that shows nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoIndicator;

impl BusyIndicator for NoIndicator {
    fn begin(&self, _label: &str) {}
    fn end(&self) {}
}

/// Ends the indicator on every exit path, panics included.
struct BusyScope<'a> {
    indicator: &'a dyn BusyIndicator,
}

impl<'a> BusyScope<'a> {
    fn enter(indicator: &'a dyn BusyIndicator, label: &str) -> Self {
        indicator.begin(label);
        Self { indicator }
    }
}

impl Drop for BusyScope<'_> {
    fn drop(&mut self) {
        self.indicator.end();
    }
}

/// Runs data-client futures on a multi-threaded tokio runtime.
#[derive(Clone)]
pub struct Executor {
    handle: Handle,
    indicator: Arc<dyn BusyIndicator>,
}

impl Executor {
    pub fn new(handle: Handle) -> Self {
        Self {
            handle,
            indicator: Arc::new(NoIndicator),
        }
    }

    /// Executor bound to the runtime of the calling context.
    ///
    /// Panics outside a tokio runtime, like [`Handle::current`].
    pub fn current() -> Self {
        Self::new(Handle::current())
    }

    pub fn with_indicator(mut self, indicator: Arc<dyn BusyIndicator>) -> Self {
        self.indicator = indicator;
        self
    }

    pub fn handle(&self) -> &Handle {
        &self.handle
    }

    /// Run `fut` on a runtime worker and block the calling thread until it
    /// finishes, showing the busy indicator meanwhile.
    ///
    /// Must be called from a thread that is not driving the runtime. A
    /// panic inside `fut` (a listener bug) is resumed on the caller.
    pub fn run_blocking<F, R>(&self, label: &str, fut: F) -> Result<R, CoreError>
    where
        F: Future<Output = Result<R, CoreError>> + Send + 'static,
        R: Send + 'static,
    {
        let _busy = BusyScope::enter(self.indicator.as_ref(), label);
        debug!(label, "running blocking operation");

        let task = self.handle.spawn(fut);
        match self.handle.block_on(task) {
            Ok(result) => result,
            Err(e) if e.is_panic() => resume_unwind(e.into_panic()),
            Err(e) => Err(CoreError::Internal(format!("{label} was cancelled: {e}"))),
        }
    }

    /// Dispatch `fut` without waiting and hand its output to `on_done`.
    ///
    /// No indicator is shown. The callback runs on a runtime worker.
    pub fn spawn<F, C>(&self, fut: F, on_done: C) -> JoinHandle<()>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
        C: FnOnce(F::Output) + Send + 'static,
    {
        self.handle.spawn(async move {
            let output = fut.await;
            on_done(output);
        })
    }
}

impl std::fmt::Debug for Executor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Executor").finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::sync::mpsc;
    use std::time::Duration;

    #[derive(Default)]
    struct Recording {
        calls: Mutex<Vec<String>>,
    }

    impl BusyIndicator for Recording {
        fn begin(&self, label: &str) {
            self.calls.lock().unwrap().push(format!("begin {label}"));
        }

        fn end(&self) {
            self.calls.lock().unwrap().push("end".into());
        }
    }

    fn runtime() -> tokio::runtime::Runtime {
        tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .unwrap()
    }

    #[test]
    fn run_blocking_wraps_the_future_in_the_indicator() {
        let rt = runtime();
        let indicator = Arc::new(Recording::default());
        let exec = Executor::new(rt.handle().clone()).with_indicator(indicator.clone());

        let value = exec
            .run_blocking("Loading", async {
                tokio::time::sleep(Duration::from_millis(10)).await;
                Ok::<_, CoreError>(7)
            })
            .unwrap();

        assert_eq!(value, 7);
        assert_eq!(*indicator.calls.lock().unwrap(), vec!["begin Loading", "end"]);
    }

    #[test]
    fn run_blocking_passes_errors_through() {
        let rt = runtime();
        let indicator = Arc::new(Recording::default());
        let exec = Executor::new(rt.handle().clone()).with_indicator(indicator.clone());

        let err = exec
            .run_blocking("Deleting", async {
                Err::<(), _>(CoreError::Internal("boom".into()))
            })
            .unwrap_err();

        assert!(matches!(err, CoreError::Internal(_)));
        assert_eq!(indicator.calls.lock().unwrap().len(), 2);
    }

    #[test]
    fn run_blocking_resumes_panics_and_still_ends_indicator() {
        let rt = runtime();
        let indicator = Arc::new(Recording::default());
        let exec = Executor::new(rt.handle().clone()).with_indicator(indicator.clone());

        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            exec.run_blocking("Saving", listener_bug())
        }));

        assert!(outcome.is_err());
        assert_eq!(indicator.calls.lock().unwrap().last().unwrap(), "end");
    }

    async fn listener_bug() -> Result<(), CoreError> {
        panic!("listener bug");
    }

    #[test]
    fn spawn_invokes_callback_without_indicator() {
        let rt = runtime();
        let indicator = Arc::new(Recording::default());
        let exec = Executor::new(rt.handle().clone()).with_indicator(indicator.clone());
        let (tx, rx) = mpsc::channel();

        exec.spawn(async { 40 + 2 }, move |v| tx.send(v).unwrap());

        assert_eq!(rx.recv_timeout(Duration::from_secs(5)).unwrap(), 42);
        assert!(indicator.calls.lock().unwrap().is_empty());
    }
}
