//! Trailing-edge debouncing on the tokio clock.
//!
//! Each trigger replaces the pending timer, so a burst of triggers closer
//! together than the delay produces one callback with the last value. The
//! timer is a tokio task sleeping on the runtime clock; under a paused
//! clock (`tokio::time::pause`) tests control exactly when it fires.
//!
//! Aborting a task cannot stop one that a worker thread is already polling
//! past its sleep, so every timer also carries the generation it was
//! scheduled under. The callback runs with the generation lock held and
//! only if no trigger or cancel has happened since. Once `trigger` or
//! `cancel` returns, a replaced timer has either finished its callback or
//! will never run it.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::sleep;

/// Delays a callback until `delay` has passed since the last trigger.
///
/// Must be triggered from within a tokio runtime. Dropping the debouncer
/// cancels any pending invocation.
pub struct Debouncer<T> {
    delay: Duration,
    callback: Arc<dyn Fn(T) + Send + Sync>,
    generation: Arc<Mutex<u64>>,
    pending: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new<F>(delay: Duration, callback: F) -> Self
    where
        F: Fn(T) + Send + Sync + 'static,
    {
        Self {
            delay,
            callback: Arc::new(callback),
            generation: Arc::new(Mutex::new(0)),
            pending: None,
        }
    }

    /// Schedule the callback with `value`, replacing any pending invocation.
    pub fn trigger(&mut self, value: T) {
        let scheduled = self.invalidate();

        let callback = Arc::clone(&self.callback);
        let generation = Arc::clone(&self.generation);
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            sleep(delay).await;
            let current = generation.lock().unwrap_or_else(PoisonError::into_inner);
            if *current == scheduled {
                callback(value);
            }
        }));
    }
}

impl<T> Debouncer<T> {
    /// Cancel the pending invocation. A no-op if it already fired.
    pub fn cancel(&mut self) {
        self.invalidate();
    }

    /// Whether an invocation is scheduled and has not fired yet.
    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Abort the pending task and bump the generation so a timer already
    /// past its sleep skips the callback. Returns the new generation.
    fn invalidate(&mut self) -> u64 {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
        let mut generation = self
            .generation
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        *generation += 1;
        *generation
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        self.invalidate();
    }
}

impl<T> fmt::Debug for Debouncer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Debouncer")
            .field("delay", &self.delay)
            .field("pending", &self.pending.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;
    use tokio::time::sleep;

    fn recording(delay_ms: u64) -> (Debouncer<String>, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let debouncer = Debouncer::new(Duration::from_millis(delay_ms), move |value: String| {
            tx.send(value).ok();
        });
        (debouncer, rx)
    }

    #[tokio::test(start_paused = true)]
    async fn test_fires_after_quiet_period() {
        let (mut debouncer, mut rx) = recording(300);
        debouncer.trigger("love".to_string());
        assert!(debouncer.is_pending());

        sleep(Duration::from_millis(299)).await;
        assert!(rx.try_recv().is_err());

        sleep(Duration::from_millis(2)).await;
        assert_eq!(rx.try_recv().unwrap(), "love");
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_fires_once_with_last_value() {
        let (mut debouncer, mut rx) = recording(300);
        for value in ["l", "lo", "lov", "love"] {
            debouncer.trigger(value.to_string());
            sleep(Duration::from_millis(100)).await;
        }

        sleep(Duration::from_millis(500)).await;
        assert_eq!(rx.try_recv().unwrap(), "love");
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_separate_quiet_periods_fire_separately() {
        let (mut debouncer, mut rx) = recording(300);
        debouncer.trigger("get".to_string());
        sleep(Duration::from_millis(400)).await;
        debouncer.trigger("get you".to_string());
        sleep(Duration::from_millis(400)).await;

        assert_eq!(rx.try_recv().unwrap(), "get");
        assert_eq!(rx.try_recv().unwrap(), "get you");
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_prevents_firing() {
        let (mut debouncer, mut rx) = recording(300);
        debouncer.trigger("love".to_string());
        debouncer.cancel();
        assert!(!debouncer.is_pending());

        sleep(Duration::from_secs(1)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_after_fire_is_noop() {
        let (mut debouncer, mut rx) = recording(10);
        debouncer.trigger("love".to_string());
        sleep(Duration::from_millis(50)).await;
        debouncer.cancel();
        debouncer.cancel();
        assert_eq!(rx.try_recv().unwrap(), "love");
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_clears_pending_timer() {
        let (mut debouncer, mut rx) = recording(300);
        debouncer.trigger("love".to_string());
        drop(debouncer);

        sleep(Duration::from_secs(1)).await;
        // The sender lived inside the callback, so the channel is closed
        // without ever having delivered a value.
        assert!(matches!(
            rx.try_recv(),
            Err(mpsc::error::TryRecvError::Disconnected)
        ));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_no_callback_after_cancel_returns_on_worker_threads() {
        let fired = Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let counter = Arc::clone(&fired);
        let mut debouncer = Debouncer::new(Duration::ZERO, move |_: usize| {
            counter.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        });

        for i in 0..200 {
            debouncer.trigger(i);
            tokio::task::yield_now().await;
            debouncer.trigger(i);
            debouncer.cancel();
            let settled = fired.load(std::sync::atomic::Ordering::SeqCst);

            sleep(Duration::from_millis(1)).await;
            assert_eq!(fired.load(std::sync::atomic::Ordering::SeqCst), settled);
        }
    }

    #[test]
    fn test_debug_output() {
        let debouncer: Debouncer<String> = Debouncer::new(Duration::from_millis(300), |_| {});
        let debug = format!("{:?}", debouncer);
        assert!(debug.contains("Debouncer"));
        assert!(debug.contains("300ms"));
    }
}
