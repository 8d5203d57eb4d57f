//! # lamco-xscp
//!
//! Converts arbitrary HTML/SVG/code snippets into Webflow `@webflow/XscpData`
//! clipboard payloads and writes them to the clipboard so the Webflow
//! Designer pastes them as a single HTML embed component.
//!
//! This crate builds on:
//! - [`lamco_clipboard_mime`] - MIME-typed clipboard transactions and the one-shot copy intercept
//!
//! # Architecture
//!
//! ```text
//! lamco-xscp
//!   ├─> xscp       (payload builder: ids, escaping, envelope types)
//!   ├─> session    (input/output state, copy feedback window)
//!   ├─> clipboard  (multi-MIME writer, system + memory platforms)
//!   ├─> config     (TOML configuration)
//!   └─> utils      (user-facing error formatting)
//! ```
//!
//! # Data Flow
//!
//! **Convert Path:** raw text → escape → Envelope → pretty JSON
//!
//! **Copy Path:** payload + raw text → ClipboardWriter → CopyIntercept → platform clipboard

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Clipboard writing (XscpData, JSON and plain text in one copy)
pub mod clipboard;

/// Configuration loading and validation
pub mod config;

/// Converter session state
pub mod session;

/// Utility functions
pub mod utils;

/// XscpData payload construction
pub mod xscp;

pub use lamco_clipboard_mime;
