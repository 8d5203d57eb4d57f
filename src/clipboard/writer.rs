//! Clipboard Writer
//!
//! Puts a serialized envelope on the clipboard as one copy action carrying
//! three representations:
//!
//! | identifier          | content                      |
//! |---------------------|------------------------------|
//! | `@webflow/XscpData` | payload text                 |
//! | `application/json`  | payload text (same bytes)    |
//! | `text/plain`        | original input, unescaped    |
//!
//! The Designer picks up its own identifier; any other paste target falls
//! back to the plain text the user pasted in.
//!
//! # Flow
//!
//! ```text
//! idle ─> arm intercept ─> platform.synthesize_copy ─┬─> handler writes 3 entries ─> disarmed ─> idle
//!                                                    └─> timeout / failure ─> cancel ─> idle
//! ```
//!
//! A timeout only means "nothing was copied" while the intercept is still
//! armed. Once the handler has run, a late commit is reported as
//! [`CopyOutcome::Issued`].

use std::time::Duration;
use tracing::{debug, info, warn};

use lamco_clipboard_mime::formats::{MIME_JSON, MIME_TEXT_PLAIN};
use lamco_clipboard_mime::{
    ClipboardError, ClipboardResult, CopyDelivery, CopyEvent, CopyIntercept, CopyPlatform, InterceptState,
};

use crate::xscp::XSCP_DATA_TYPE;

/// Default bound on waiting for the platform to deliver the copy event
pub const DEFAULT_COPY_TIMEOUT_MS: u64 = 2000;

/// Result of a copy request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    /// Nothing to copy; the clipboard was not touched
    Skipped,
    /// Transaction handed to the platform, acceptance unknown
    Issued,
    /// The platform clipboard accepted the transaction
    Confirmed,
}

impl CopyOutcome {
    /// True for `Issued` and `Confirmed`
    pub fn is_issued(&self) -> bool {
        matches!(self, Self::Issued | Self::Confirmed)
    }
}

/// Writes payloads to a [`CopyPlatform`] through a one-shot intercept
pub struct ClipboardWriter<P> {
    platform: P,
    intercept: CopyIntercept,
    timeout: Duration,
}

impl<P: CopyPlatform> ClipboardWriter<P> {
    /// Create a writer with the default timeout
    pub fn new(platform: P) -> Self {
        Self::with_timeout(platform, Duration::from_millis(DEFAULT_COPY_TIMEOUT_MS))
    }

    /// Create a writer with a custom timeout
    pub fn with_timeout(platform: P, timeout: Duration) -> Self {
        Self {
            platform,
            intercept: CopyIntercept::new(),
            timeout,
        }
    }

    /// Underlying platform
    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// The writer's intercept, for inspecting its state and counters
    pub fn intercept(&self) -> &CopyIntercept {
        &self.intercept
    }

    /// Whether a copy is waiting for its event
    pub fn state(&self) -> InterceptState {
        self.intercept.state()
    }

    /// Copy `payload` (structured entries) and `raw_input` (plain text).
    ///
    /// An empty `payload` is a no-op returning [`CopyOutcome::Skipped`].
    /// The intercept is disarmed on every return path. Platform errors are
    /// returned unchanged, except that an unclaimed event becomes
    /// [`ClipboardError::WriteFailed`].
    pub async fn copy(&self, payload: &str, raw_input: &str) -> ClipboardResult<CopyOutcome> {
        if payload.is_empty() {
            debug!("Empty payload, skipping clipboard write");
            return Ok(CopyOutcome::Skipped);
        }

        let structured = payload.to_owned();
        let plain = raw_input.to_owned();
        let token = self.intercept.arm(move |event: &mut CopyEvent| {
            event.set_data(XSCP_DATA_TYPE, structured.clone());
            event.set_data(MIME_JSON, structured);
            event.set_data(MIME_TEXT_PLAIN, plain);
            event.prevent_default();
        })?;

        debug!(
            backend = self.platform.name(),
            payload_bytes = payload.len(),
            text_bytes = raw_input.len(),
            "Synthesizing copy event"
        );

        let result = tokio::time::timeout(self.timeout, self.platform.synthesize_copy(&self.intercept)).await;

        // False once the handler has run: the platform already holds the
        // transaction, whatever happens to the commit.
        let disarmed = self.intercept.cancel(token);
        if disarmed {
            debug!("Copy intercept disarmed without firing");
        }

        match result {
            Ok(Ok(CopyDelivery::Committed)) => {
                info!(backend = self.platform.name(), "Clipboard transaction committed");
                Ok(CopyOutcome::Confirmed)
            }
            Ok(Ok(CopyDelivery::Unconfirmed)) => {
                info!(
                    backend = self.platform.name(),
                    "Clipboard transaction issued (unconfirmed)"
                );
                Ok(CopyOutcome::Issued)
            }
            Ok(Ok(CopyDelivery::NotHandled)) => {
                warn!(backend = self.platform.name(), "Copy event was not claimed by the intercept");
                Err(ClipboardError::WriteFailed(
                    "copy event was not handled".to_string(),
                ))
            }
            Ok(Err(e)) => {
                warn!(backend = self.platform.name(), error = %e, "Clipboard write rejected");
                Err(e)
            }
            Err(_) if !disarmed => {
                warn!(
                    backend = self.platform.name(),
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Copy event handled but commit not reported in time"
                );
                Ok(CopyOutcome::Issued)
            }
            Err(_) => {
                let ms = self.timeout.as_millis() as u64;
                warn!(
                    backend = self.platform.name(),
                    timeout_ms = ms,
                    "No copy event delivered, intercept cancelled"
                );
                Err(ClipboardError::CopyEventTimeout(ms))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::memory::{MemoryBehavior, MemoryClipboard};

    #[tokio::test]
    async fn test_empty_payload_skips() {
        let writer = ClipboardWriter::new(MemoryClipboard::new());

        let outcome = writer.copy("", "raw").await.unwrap();
        assert_eq!(outcome, CopyOutcome::Skipped);
        assert_eq!(writer.intercept().stats().armed, 0);
        assert!(writer.platform().transactions().is_empty());
    }

    #[tokio::test]
    async fn test_three_entries_written() {
        let writer = ClipboardWriter::new(MemoryClipboard::new());

        let outcome = writer.copy("{\"a\":1}", "<b>\n</b>").await.unwrap();
        assert_eq!(outcome, CopyOutcome::Confirmed);

        let tx = writer.platform().last_transaction().unwrap();
        assert_eq!(tx.mime_types(), vec![XSCP_DATA_TYPE, MIME_JSON, MIME_TEXT_PLAIN]);
        assert_eq!(tx.get_text(XSCP_DATA_TYPE), Some("{\"a\":1}"));
        assert_eq!(tx.get(XSCP_DATA_TYPE), tx.get(MIME_JSON));
        assert_eq!(tx.get_text(MIME_TEXT_PLAIN), Some("<b>\n</b>"));
    }

    #[tokio::test]
    async fn test_single_armed_fired_cycle() {
        let writer = ClipboardWriter::new(MemoryClipboard::new());
        writer.copy("x", "y").await.unwrap();

        let stats = writer.intercept().stats();
        assert_eq!(stats.armed, 1);
        assert_eq!(stats.fired, 1);
        assert_eq!(stats.cancelled, 0);
        assert_eq!(writer.state(), InterceptState::Idle);
    }

    #[tokio::test]
    async fn test_unconfirmed_reports_issued() {
        let writer = ClipboardWriter::new(MemoryClipboard::with_behavior(MemoryBehavior::Unconfirmed));
        assert_eq!(writer.copy("x", "y").await.unwrap(), CopyOutcome::Issued);
    }

    #[tokio::test]
    async fn test_ignored_event_times_out_and_disarms() {
        let writer = ClipboardWriter::with_timeout(
            MemoryClipboard::with_behavior(MemoryBehavior::Ignore),
            Duration::from_millis(30),
        );

        let err = writer.copy("x", "y").await.unwrap_err();
        assert!(matches!(err, ClipboardError::CopyEventTimeout(30)));
        assert!(err.is_write_failure());
        assert_eq!(writer.state(), InterceptState::Idle);
        assert_eq!(writer.intercept().stats().cancelled, 1);

        // A later copy can arm again
        let writer = ClipboardWriter::new(MemoryClipboard::new());
        assert!(writer.copy("x", "y").await.is_ok());
    }

    #[tokio::test]
    async fn test_slow_commit_after_dispatch_is_issued() {
        let writer = ClipboardWriter::with_timeout(
            MemoryClipboard::with_behavior(MemoryBehavior::Stall),
            Duration::from_millis(20),
        );

        let outcome = writer.copy("x", "y").await.unwrap();
        assert_eq!(outcome, CopyOutcome::Issued);

        let stats = writer.intercept().stats();
        assert_eq!(stats.fired, 1);
        assert_eq!(stats.cancelled, 0);
        assert_eq!(writer.state(), InterceptState::Idle);
    }

    #[tokio::test]
    async fn test_backend_error_passes_through() {
        let writer = ClipboardWriter::new(MemoryClipboard::with_behavior(MemoryBehavior::Unavailable(
            "failed to open clipboard: no DISPLAY".to_string(),
        )));

        let err = writer.copy("x", "y").await.unwrap_err();
        assert!(matches!(err, ClipboardError::Backend(_)));
        assert!(!err.is_write_failure());
        assert_eq!(writer.intercept().stats().cancelled, 1);
        assert_eq!(writer.state(), InterceptState::Idle);
    }

    #[tokio::test]
    async fn test_rejected_commit_still_disarms() {
        let writer = ClipboardWriter::new(MemoryClipboard::with_behavior(MemoryBehavior::Reject(
            "clipboard locked".to_string(),
        )));

        let err = writer.copy("x", "y").await.unwrap_err();
        assert!(matches!(err, ClipboardError::WriteFailed(_)));
        assert_eq!(writer.intercept().stats().fired, 1);
        assert_eq!(writer.state(), InterceptState::Idle);
    }

    #[tokio::test]
    async fn test_sequential_copies_rearm() {
        let writer = ClipboardWriter::new(MemoryClipboard::new());
        writer.copy("one", "1").await.unwrap();
        writer.copy("two", "2").await.unwrap();

        assert_eq!(writer.intercept().stats().armed, 2);
        assert_eq!(writer.platform().transactions().len(), 2);
        assert_eq!(
            writer.platform().last_transaction().unwrap().get_text(MIME_JSON),
            Some("two")
        );
    }
}
