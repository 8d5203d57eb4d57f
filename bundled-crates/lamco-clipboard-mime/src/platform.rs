//! CopyPlatform trait - abstract host clipboard interface.
//!
//! A platform knows how to synthesize a copy action and commit the resulting
//! transaction to a real (or simulated) clipboard. It does not decide what
//! goes into the transaction: that is the armed intercept's job.

use std::future::Future;

use crate::intercept::CopyIntercept;
use crate::ClipboardResult;

/// What the platform can tell about a synthesized copy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyDelivery {
    /// The clipboard API accepted the transaction
    Committed,

    /// The transaction was handed over but acceptance cannot be observed
    Unconfirmed,

    /// The event fired but no armed handler claimed it
    NotHandled,
}

/// Abstract host clipboard.
///
/// # Contract
///
/// `synthesize_copy` creates a fresh [`CopyEvent`](crate::CopyEvent),
/// passes it through [`CopyIntercept::dispatch`], and, if a handler claimed
/// it, commits the event's transaction as a single clipboard write.
///
/// A platform that silently drops synthetic copy triggers may return a
/// future that never resolves; callers are expected to bound the wait.
///
/// # Example
///
/// ```rust,ignore
/// use lamco_clipboard_mime::{CopyDelivery, CopyEvent, CopyIntercept, CopyPlatform, ClipboardResult};
///
/// struct Discard;
///
/// impl CopyPlatform for Discard {
///     async fn synthesize_copy(&self, intercept: &CopyIntercept) -> ClipboardResult<CopyDelivery> {
///         let mut event = CopyEvent::new();
///         if intercept.dispatch(&mut event) {
///             Ok(CopyDelivery::Unconfirmed)
///         } else {
///             Ok(CopyDelivery::NotHandled)
///         }
///     }
/// }
/// ```
pub trait CopyPlatform: Send + Sync {
    /// Short backend name for logs
    fn name(&self) -> &'static str;

    /// Synthesize a copy action, deliver it to `intercept`, commit the result.
    fn synthesize_copy(
        &self,
        intercept: &CopyIntercept,
    ) -> impl Future<Output = ClipboardResult<CopyDelivery>> + Send;
}

