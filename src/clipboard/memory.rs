//! In-process clipboard
//!
//! Records every committed transaction instead of touching the OS
//! clipboard. Backs `--backend memory` dry runs and the writer tests, and can
//! imitate hosts that drop, reject or cannot confirm a synthetic copy.

use parking_lot::Mutex;
use tracing::{debug, trace};

use lamco_clipboard_mime::{
    ClipboardError, ClipboardResult, ClipboardTransaction, CopyDelivery, CopyEvent, CopyIntercept, CopyPlatform,
};

/// How the in-memory host reacts to a synthesized copy
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MemoryBehavior {
    /// Dispatch, record, report `Committed`
    #[default]
    Deliver,
    /// Dispatch, record, report `Unconfirmed`
    Unconfirmed,
    /// Never dispatch; the returned future stays pending
    Ignore,
    /// Dispatch, then fail the commit with this reason
    Reject(String),
    /// Dispatch, then never report the commit
    Stall,
    /// Fail with a backend error before any event is synthesized
    Unavailable(String),
}

/// Clipboard that keeps transactions in memory
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    behavior: MemoryBehavior,
    committed: Mutex<Vec<ClipboardTransaction>>,
}

impl MemoryClipboard {
    /// Clipboard that accepts every copy
    pub fn new() -> Self {
        Self::default()
    }

    /// Clipboard with a specific behaviour
    pub fn with_behavior(behavior: MemoryBehavior) -> Self {
        Self {
            behavior,
            committed: Mutex::new(Vec::new()),
        }
    }

    /// All committed transactions, oldest first
    pub fn transactions(&self) -> Vec<ClipboardTransaction> {
        self.committed.lock().clone()
    }

    /// The current clipboard content
    pub fn last_transaction(&self) -> Option<ClipboardTransaction> {
        self.committed.lock().last().cloned()
    }
}

impl CopyPlatform for MemoryClipboard {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn synthesize_copy(&self, intercept: &CopyIntercept) -> ClipboardResult<CopyDelivery> {
        match &self.behavior {
            MemoryBehavior::Ignore => {
                trace!("Dropping synthetic copy trigger");
                return std::future::pending().await;
            }
            MemoryBehavior::Unavailable(reason) => {
                return Err(ClipboardError::Backend(reason.clone()));
            }
            _ => {}
        }

        let mut event = CopyEvent::new();
        if !intercept.dispatch(&mut event) || !event.is_default_prevented() {
            return Ok(CopyDelivery::NotHandled);
        }

        match &self.behavior {
            MemoryBehavior::Reject(reason) => return Err(ClipboardError::WriteFailed(reason.clone())),
            MemoryBehavior::Stall => {
                trace!("Holding claimed copy without committing");
                return std::future::pending().await;
            }
            _ => {}
        }

        let tx = event.into_transaction();
        debug!(
            entries = tx.len(),
            bytes = tx.total_bytes(),
            "Recorded clipboard transaction"
        );
        self.committed.lock().push(tx);

        Ok(match self.behavior {
            MemoryBehavior::Unconfirmed => CopyDelivery::Unconfirmed,
            _ => CopyDelivery::Committed,
        })
    }
}
