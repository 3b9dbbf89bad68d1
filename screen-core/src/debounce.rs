use std::{
    future::Future,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};
use tokio::task::JoinHandle;

/// Single-shot, self-superseding timer.
///
/// Each call to [`Debouncer::schedule`] takes a fresh token. A timer task that
/// wakes up with a stale token does nothing, so at most one scheduled action
/// runs per quiet period. An action whose timer already fired is never
/// interrupted by a later call.
#[derive(Debug, Clone)]
pub struct Debouncer {
    quiet: Duration,
    token: Arc<AtomicU64>,
}

impl Debouncer {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            token: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Run `action` once `quiet` has elapsed without another call.
    ///
    /// The returned handle completes when the timer task ends, whether the
    /// action ran or was superseded. Must be called from within a tokio runtime.
    pub fn schedule<F>(&self, action: F) -> JoinHandle<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let mine = self.token.fetch_add(1, Ordering::SeqCst) + 1;
        let token = Arc::clone(&self.token);
        let quiet = self.quiet;

        tokio::spawn(async move {
            tokio::time::sleep(quiet).await;
            if token.load(Ordering::SeqCst) != mine {
                return;
            }
            action.await;
        })
    }

    /// Supersede any pending action without scheduling a new one.
    pub fn cancel(&self) {
        self.token.fetch_add(1, Ordering::SeqCst);
    }
}
