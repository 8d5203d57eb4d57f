//! One-shot copy intercept.
//!
//! A copy action is delivered as a [`CopyEvent`]. Whoever wants to supply
//! the data for the *next* copy arms the [`CopyIntercept`] with a handler; the
//! platform dispatches its event through the intercept and commits whatever
//! the handler wrote.
//!
//! The intercept is a single slot:
//!
//! - [`arm`](CopyIntercept::arm) refuses a second registration while one is
//!   pending.
//! - [`dispatch`](CopyIntercept::dispatch) takes the handler out of the slot
//!   before running it, so a handler fires at most once even if two events
//!   race or the handler panics.
//! - [`cancel`](CopyIntercept::cancel) disarms only the registration the
//!   token was issued for, so a late cancel never removes a newer handler.

use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, trace};

use crate::formats::ClipboardTransaction;
use crate::{ClipboardError, ClipboardResult};

/// A copy action in flight.
///
/// Mirrors the data-transfer object a windowing system hands to copy
/// listeners: handlers set data per MIME type and call
/// [`prevent_default`](Self::prevent_default) to claim the event.
#[derive(Debug, Default)]
pub struct CopyEvent {
    data: ClipboardTransaction,
    default_prevented: bool,
}

impl CopyEvent {
    /// Create an empty copy event
    pub fn new() -> Self {
        Self::default()
    }

    /// Set data for a MIME type
    pub fn set_data(&mut self, mime_type: &str, data: impl Into<Vec<u8>>) {
        self.data.set(mime_type, data);
    }

    /// Claim the event: the platform commits the handler's data instead of
    /// its own default content
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Whether a handler claimed the event
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Data written so far
    pub fn data(&self) -> &ClipboardTransaction {
        &self.data
    }

    /// Consume into the transaction to commit
    pub fn into_transaction(self) -> ClipboardTransaction {
        self.data
    }
}

/// Handler invoked for the next copy event
pub type CopyHandler = Box<dyn FnOnce(&mut CopyEvent) + Send>;

/// Identifies one registration on a [`CopyIntercept`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InterceptToken(u64);

/// Whether a handler is currently waiting for a copy event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterceptState {
    /// Nothing registered
    Idle,
    /// A handler waits for the next copy event
    Armed,
}

/// Lifetime counters for an intercept
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InterceptStats {
    /// Registrations accepted
    pub armed: u64,
    /// Handlers that ran
    pub fired: u64,
    /// Registrations removed without firing
    pub cancelled: u64,
}

struct Registration {
    token: InterceptToken,
    handler: CopyHandler,
}

/// Single-slot, at-most-once, cancellable copy subscription
pub struct CopyIntercept {
    slot: Mutex<Option<Registration>>,
    next_token: AtomicU64,
    armed: AtomicU64,
    fired: AtomicU64,
    cancelled: AtomicU64,
}

impl Default for CopyIntercept {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CopyIntercept {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CopyIntercept")
            .field("state", &self.state())
            .field("stats", &self.stats())
            .finish()
    }
}

impl CopyIntercept {
    /// Create an idle intercept
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(None),
            next_token: AtomicU64::new(1),
            armed: AtomicU64::new(0),
            fired: AtomicU64::new(0),
            cancelled: AtomicU64::new(0),
        }
    }

    /// Register a handler for the next copy event.
    ///
    /// Fails with [`ClipboardError::InvalidState`] if a handler is already
    /// armed.
    pub fn arm<F>(&self, handler: F) -> ClipboardResult<InterceptToken>
    where
        F: FnOnce(&mut CopyEvent) + Send + 'static,
    {
        let mut slot = self.slot.lock();
        if slot.is_some() {
            return Err(ClipboardError::InvalidState(
                "copy intercept already armed".to_string(),
            ));
        }

        let token = InterceptToken(self.next_token.fetch_add(1, Ordering::Relaxed));
        *slot = Some(Registration {
            token,
            handler: Box::new(handler),
        });
        self.armed.fetch_add(1, Ordering::Relaxed);

        debug!(token = token.0, "Copy intercept armed");
        Ok(token)
    }

    /// Deliver a copy event to the armed handler, if any.
    ///
    /// Returns true if a handler ran. The slot is empty afterwards either way.
    pub fn dispatch(&self, event: &mut CopyEvent) -> bool {
        let registration = self.slot.lock().take();

        match registration {
            Some(Registration { token, handler }) => {
                self.fired.fetch_add(1, Ordering::Relaxed);
                debug!(token = token.0, "Copy intercept fired and disarmed");
                handler(event);
                true
            }
            None => {
                trace!("Copy event dispatched with no intercept armed");
                false
            }
        }
    }

    /// Disarm the registration identified by `token`.
    ///
    /// Returns false if it already fired, was already cancelled, or the slot
    /// now holds a different registration.
    pub fn cancel(&self, token: InterceptToken) -> bool {
        let mut slot = self.slot.lock();
        match slot.as_ref() {
            Some(registration) if registration.token == token => {
                *slot = None;
                self.cancelled.fetch_add(1, Ordering::Relaxed);
                debug!(token = token.0, "Copy intercept cancelled");
                true
            }
            _ => false,
        }
    }

    /// Current state
    pub fn state(&self) -> InterceptState {
        if self.slot.lock().is_some() {
            InterceptState::Armed
        } else {
            InterceptState::Idle
        }
    }

    /// True while a handler waits
    pub fn is_armed(&self) -> bool {
        self.state() == InterceptState::Armed
    }

    /// Lifetime counters
    pub fn stats(&self) -> InterceptStats {
        InterceptStats {
            armed: self.armed.load(Ordering::Relaxed),
            fired: self.fired.load(Ordering::Relaxed),
            cancelled: self.cancelled.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::{MIME_JSON, MIME_TEXT_PLAIN};
    use std::sync::Arc;

    #[test]
    fn test_dispatch_without_handler() {
        let intercept = CopyIntercept::new();
        let mut event = CopyEvent::new();

        assert!(!intercept.dispatch(&mut event));
        assert!(event.data().is_empty());
        assert!(!event.is_default_prevented());
    }

    #[test]
    fn test_fires_once() {
        let intercept = CopyIntercept::new();
        intercept
            .arm(|event| {
                event.set_data(MIME_TEXT_PLAIN, "hi");
                event.prevent_default();
            })
            .unwrap();
        assert_eq!(intercept.state(), InterceptState::Armed);

        let mut first = CopyEvent::new();
        assert!(intercept.dispatch(&mut first));
        assert!(first.is_default_prevented());
        assert_eq!(first.data().get_text(MIME_TEXT_PLAIN), Some("hi"));

        // The second event finds the slot empty
        let mut second = CopyEvent::new();
        assert!(!intercept.dispatch(&mut second));
        assert!(second.data().is_empty());

        assert_eq!(intercept.state(), InterceptState::Idle);
        assert_eq!(
            intercept.stats(),
            InterceptStats {
                armed: 1,
                fired: 1,
                cancelled: 0
            }
        );
    }

    #[test]
    fn test_double_arm_refused() {
        let intercept = CopyIntercept::new();
        intercept.arm(|_| {}).unwrap();

        let err = intercept.arm(|_| {}).unwrap_err();
        assert!(matches!(err, ClipboardError::InvalidState(_)));
        assert_eq!(intercept.stats().armed, 1);
    }

    #[test]
    fn test_cancel_disarms() {
        let intercept = CopyIntercept::new();
        let token = intercept.arm(|_| {}).unwrap();

        assert!(intercept.cancel(token));
        assert!(!intercept.is_armed());
        assert!(!intercept.cancel(token));

        let mut event = CopyEvent::new();
        assert!(!intercept.dispatch(&mut event));
        assert_eq!(intercept.stats().cancelled, 1);
        assert_eq!(intercept.stats().fired, 0);
    }

    #[test]
    fn test_stale_cancel_keeps_newer_registration() {
        let intercept = CopyIntercept::new();
        let old = intercept.arm(|_| {}).unwrap();
        let mut event = CopyEvent::new();
        intercept.dispatch(&mut event);

        let _new = intercept.arm(|e| e.set_data(MIME_JSON, "{}")).unwrap();
        assert!(!intercept.cancel(old));
        assert!(intercept.is_armed());
    }

    #[test]
    fn test_concurrent_dispatch_fires_once() {
        let intercept = Arc::new(CopyIntercept::new());
        let hits = Arc::new(AtomicU64::new(0));

        let counter = Arc::clone(&hits);
        intercept
            .arm(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();

        let threads: Vec<_> = (0..8)
            .map(|_| {
                let intercept = Arc::clone(&intercept);
                std::thread::spawn(move || {
                    let mut event = CopyEvent::new();
                    intercept.dispatch(&mut event)
                })
            })
            .collect();

        let delivered = threads
            .into_iter()
            .map(|t| t.join().unwrap())
            .filter(|ran| *ran)
            .count();

        assert_eq!(delivered, 1);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }
}
