//! Clipboard Module
//!
//! Places an XscpData payload on the clipboard under three identifiers in a
//! single copy action.
//!
//! # Architecture
//!
//! Primitives come from the bundled [`lamco_clipboard_mime`] crate:
//!
//! - [`ClipboardTransaction`] - MIME-typed entries committed together
//! - [`CopyIntercept`] - one-shot, cancellable registration for the next copy
//! - [`CopyPlatform`] - host clipboard abstraction
//!
//! This module adds:
//!
//! - [`ClipboardWriter`] - arms the intercept, synthesizes the copy, bounds the wait
//! - [`SystemClipboard`] - the desktop clipboard via `clipboard-rs`
//! - [`MemoryClipboard`] - in-process clipboard for dry runs and tests
//!
//! # Data Flow
//!
//! ```text
//! ClipboardWriter::copy(payload, raw)
//!   ├─> CopyIntercept::arm(handler)
//!   ├─> CopyPlatform::synthesize_copy
//!   │     ├─> CopyEvent ──> CopyIntercept::dispatch ──> handler sets 3 entries
//!   │     └─> commit transaction (clipboard-rs / memory)
//!   └─> CopyIntercept::cancel (no-op once fired)
//! ```

pub mod memory;
pub mod system;
pub mod writer;

pub use memory::{MemoryBehavior, MemoryClipboard};
pub use system::{Ownership, SystemClipboard};
pub use writer::{ClipboardWriter, CopyOutcome, DEFAULT_COPY_TIMEOUT_MS};

pub use lamco_clipboard_mime::{
    ClipboardError, ClipboardResult, ClipboardTransaction, CopyDelivery, CopyIntercept, CopyPlatform, InterceptState,
};
