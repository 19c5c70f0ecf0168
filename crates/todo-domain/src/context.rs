//! Request Context - What every port call carries along
//!
//! A `RequestContext` is handed to each repository operation. It knows
//! which request (if any) the call belongs to and whether that request
//! has been abandoned.
//!
//! Cancellation is built on std only, to keep the domain dependency-free:
//! a shared flag plus the wakers of whoever is waiting on it.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::task::{Context, Poll, Waker};

/// Request-scoped execution context
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    request_id: Option<String>,
    cancellation: CancellationSignal,
}

impl RequestContext {
    /// Context for an inbound request
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: Some(request_id.into()),
            cancellation: CancellationSignal::new(),
        }
    }

    /// Context for work happening outside request handling
    /// (startup, maintenance tasks, tests).
    pub fn background() -> Self {
        Self::default()
    }

    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }

    pub fn cancellation(&self) -> &CancellationSignal {
        &self.cancellation
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }

    /// Resolves once the request has been cancelled
    pub fn cancelled(&self) -> Cancelled<'_> {
        self.cancellation.cancelled()
    }
}

#[derive(Default)]
struct SignalState {
    cancelled: AtomicBool,
    waiters: Mutex<Vec<Waker>>,
}

/// One-shot cancellation flag shared between clones
///
/// Once cancelled it stays cancelled.
#[derive(Clone, Default)]
pub struct CancellationSignal {
    state: Arc<SignalState>,
}

impl CancellationSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire the signal and wake every pending [`Cancelled`] future
    pub fn cancel(&self) {
        if self.state.cancelled.swap(true, Ordering::SeqCst) {
            return;
        }
        let waiters = std::mem::take(
            &mut *self
                .state
                .waiters
                .lock()
                .unwrap_or_else(PoisonError::into_inner),
        );
        for waker in waiters {
            waker.wake();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.state.cancelled.load(Ordering::SeqCst)
    }

    pub fn cancelled(&self) -> Cancelled<'_> {
        Cancelled { signal: self }
    }

    /// Guard that cancels this signal when dropped, unless disarmed first
    pub fn cancel_on_drop(&self) -> CancelOnDrop {
        CancelOnDrop {
            signal: Some(self.clone()),
        }
    }
}

impl core::fmt::Debug for CancellationSignal {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CancellationSignal")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}

/// Future returned by [`CancellationSignal::cancelled`]
#[derive(Debug)]
#[must_use = "futures do nothing unless polled"]
pub struct Cancelled<'a> {
    signal: &'a CancellationSignal,
}

impl Future for Cancelled<'_> {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.signal.is_cancelled() {
            return Poll::Ready(());
        }

        let mut waiters = self
            .signal
            .state
            .waiters
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        // cancel() may have run between the check above and taking the lock
        if self.signal.is_cancelled() {
            return Poll::Ready(());
        }

        if !waiters.iter().any(|waker| waker.will_wake(cx.waker())) {
            waiters.push(cx.waker().clone());
        }
        Poll::Pending
    }
}

/// Cancels the signal on drop unless [`CancelOnDrop::disarm`] was called
///
/// Held by whoever drives a request to completion; if that driver is
/// dropped half-way (client gone, server shutting down) the request's
/// context observes the cancellation.
#[derive(Debug)]
pub struct CancelOnDrop {
    signal: Option<CancellationSignal>,
}

impl CancelOnDrop {
    /// The request finished normally; don't cancel anything
    pub fn disarm(mut self) {
        self.signal = None;
    }
}

impl Drop for CancelOnDrop {
    fn drop(&mut self) {
        if let Some(signal) = self.signal.take() {
            signal.cancel();
        }
    }
}
