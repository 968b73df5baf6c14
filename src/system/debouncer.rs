use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use color_eyre::{Result, eyre::Context as _};
use tokio::{runtime::Handle, task::JoinHandle};

/// Delays calls to `func` until no new call has come in for `wait`.
///
/// Only the trailing call fires, with the arguments of the most recent [`Debouncer::call`].
/// At most one invocation is pending at a time; each call replaces the previous one.
pub struct Debouncer<A> {
    wait: Duration,
    func: Arc<dyn Fn(A) + Send + Sync>,
    runtime: Handle,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl<A: Send + 'static> Debouncer<A> {
    /// Must be called from within a tokio runtime, which the timers will run on.
    pub fn new(wait: Duration, func: impl Fn(A) + Send + Sync + 'static) -> Result<Self> {
        let runtime = Handle::try_current().context("Debouncer requires a tokio runtime")?;
        Ok(Self::with_runtime(wait, func, runtime))
    }

    pub fn with_runtime(
        wait: Duration,
        func: impl Fn(A) + Send + Sync + 'static,
        runtime: Handle,
    ) -> Self {
        Self {
            wait,
            func: Arc::new(func),
            runtime,
            pending: Mutex::new(None),
        }
    }

    /// Schedules `func(args)` after the quiet period, cancelling anything still pending.
    pub fn call(&self, args: A) {
        let func = self.func.clone();
        let wait = self.wait;

        let mut pending = self.pending.lock().unwrap();
        if let Some(previous) = pending.take() {
            previous.abort();
        }
        *pending = Some(self.runtime.spawn(async move {
            tokio::time::sleep(wait).await;
            func(args);
        }));
        tracing::trace!("Debounced call scheduled in {wait:?}");
    }

    /// Drops the pending invocation, if any.
    pub fn cancel(&self) {
        if let Some(previous) = self.pending.lock().unwrap().take() {
            previous.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
            .lock()
            .unwrap()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl<A> Drop for Debouncer<A> {
    fn drop(&mut self) {
        if let Ok(mut pending) = self.pending.lock()
            && let Some(handle) = pending.take()
        {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recording_debouncer(wait: Duration) -> (Debouncer<u32>, Arc<Mutex<Vec<u32>>>) {
        let calls = Arc::new(Mutex::new(vec![]));
        let debouncer = Debouncer::new(wait, {
            let calls = calls.clone();
            move |n| calls.lock().unwrap().push(n)
        })
        .unwrap();
        (debouncer, calls)
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_fires_once_with_last_args() {
        let (debouncer, calls) = recording_debouncer(Duration::from_millis(100));

        for n in 1..=5 {
            debouncer.call(n);
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        assert!(calls.lock().unwrap().is_empty());
        assert!(debouncer.is_pending());

        tokio::time::sleep(Duration::from_millis(60)).await;
        assert_eq!(*calls.lock().unwrap(), vec![5]);
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_separate_quiet_periods_fire_separately() {
        let (debouncer, calls) = recording_debouncer(Duration::from_millis(100));

        debouncer.call(1);
        tokio::time::sleep(Duration::from_millis(150)).await;
        debouncer.call(2);
        tokio::time::sleep(Duration::from_millis(150)).await;

        assert_eq!(*calls.lock().unwrap(), vec![1, 2]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel() {
        let (debouncer, calls) = recording_debouncer(Duration::from_millis(100));

        debouncer.call(1);
        debouncer.cancel();
        assert!(!debouncer.is_pending());
        tokio::time::sleep(Duration::from_millis(200)).await;

        assert!(calls.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_pending_call() {
        let (debouncer, calls) = recording_debouncer(Duration::from_millis(100));

        debouncer.call(1);
        drop(debouncer);
        tokio::time::sleep(Duration::from_millis(200)).await;

        assert!(calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_requires_runtime() {
        assert!(Debouncer::new(Duration::from_millis(10), |_: ()| {}).is_err());
    }
}
