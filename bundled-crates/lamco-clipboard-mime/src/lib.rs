//! # lamco-clipboard-mime
//!
//! Multi-representation clipboard writes for Rust.
//!
//! This crate provides the pieces needed to put several MIME-typed
//! representations of one piece of content on the clipboard in a single copy
//! action, independent of the clipboard backend:
//!
//! - **[`ClipboardTransaction`]** - Ordered MIME-type → bytes entries
//! - **[`CopyIntercept`]** - One-shot, cancellable registration for the next copy event
//! - **[`CopyPlatform`] trait** - Abstract host clipboard that synthesizes and commits copies
//!
//! ## Quick Start
//!
//! ```rust
//! use lamco_clipboard_mime::{CopyEvent, CopyIntercept};
//! use lamco_clipboard_mime::formats::{MIME_JSON, MIME_TEXT_PLAIN};
//!
//! let intercept = CopyIntercept::new();
//! intercept
//!     .arm(|event| {
//!         event.set_data(MIME_JSON, r#"{"a":1}"#);
//!         event.set_data(MIME_TEXT_PLAIN, "a = 1");
//!         event.prevent_default();
//!     })
//!     .unwrap();
//!
//! let mut event = CopyEvent::new();
//! assert!(intercept.dispatch(&mut event));
//! assert_eq!(event.into_transaction().len(), 2);
//! assert!(!intercept.is_armed());
//! ```
//!
//! ## Architecture
//!
//! The [`CopyPlatform`] trait is the only async surface. Implementations own
//! the actual clipboard access (OS clipboard, in-memory, etc.) while this
//! crate owns the transaction model and the at-most-once delivery rules.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]

mod error;
mod platform;

pub mod formats;
pub mod intercept;

pub use error::{ClipboardError, ClipboardResult};
pub use formats::{ClipboardEntry, ClipboardTransaction};
pub use intercept::{CopyEvent, CopyHandler, CopyIntercept, InterceptState, InterceptStats, InterceptToken};
pub use platform::{CopyDelivery, CopyPlatform};

