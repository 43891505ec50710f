//! Request-scoped cancellation
//!
//! Every async resource method receives a Context. Resources race their
//! remote calls against [`Context::cancelled`] so a cancelled or timed out
//! request stops waiting on the API.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time;

/// Context carries request-scoped cancellation and timeouts
/// Pass this as first parameter to all async trait methods
#[derive(Clone)]
pub struct Context {
    inner: Arc<ContextInner>,
}

struct ContextInner {
    done: watch::Receiver<bool>,
    done_tx: watch::Sender<bool>,
}

impl Context {
    pub fn new() -> Self {
        let (done_tx, done) = watch::channel(false);
        Self {
            inner: Arc::new(ContextInner { done, done_tx }),
        }
    }

    /// Derive a context that is cancelled once `timeout` has elapsed or
    /// this one is cancelled.
    /// Must be called from within a tokio runtime.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        let child = Self::new();

        let timer_tx = child.inner.done_tx.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = time::sleep(timeout) => {}
                _ = self.cancelled() => {}
            }
            let _ = timer_tx.send(true);
        });

        child
    }

    pub fn is_cancelled(&self) -> bool {
        *self.inner.done.borrow()
    }

    /// Resolves once the context is cancelled
    pub async fn cancelled(&self) {
        let mut done = self.inner.done.clone();
        // the sender lives in `inner`, so the channel cannot close under us
        let _ = done.wait_for(|cancelled| *cancelled).await;
    }

    pub fn cancel(&self) {
        let _ = self.inner.done_tx.send(true);
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}
