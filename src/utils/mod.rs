//! Utility Functions
//!
//! User-friendly error formatting for the command-line front end.
//!
//! ```rust
//! use lamco_xscp::utils::format_user_error;
//!
//! let err = anyhow::anyhow!("Failed to read input file: snippet.html");
//! let text = format_user_error(&err);
//! assert!(text.contains("Input Error"));
//! ```
//!
//! Error categories with context-aware help:
//! - Copy timeouts → display server reachability, longer `--timeout-ms`
//! - Write failures → competing clipboard owners, sandbox permissions
//! - Backend errors → graphical session checks, `convert` as a fallback
//! - Config errors → syntax validation, supported values
//! - Input errors → `--input` path or stdin

pub mod errors;

pub use errors::format_user_error;
