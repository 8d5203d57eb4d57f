//! Webflow XscpData payloads
//!
//! Wraps arbitrary HTML/SVG/code in a single `HtmlEmbed` node so that pasting
//! into the Webflow Designer inserts an embed component instead of raw text.
//!
//! # Payload shape
//!
//! ```text
//! Envelope ("@webflow/XscpData")
//!   ├─> payload
//!   │     ├─> nodes:  [EmbedNode]   ── classes[0] ─┐
//!   │     ├─> styles: [StyleRecord] <── _id ───────┘
//!   │     ├─> assets: []
//!   │     ├─> ix1:    []
//!   │     └─> ix2:    { interactions: [], events: [], actionLists: [] }
//!   └─> meta: seven zero counters
//! ```
//!
//! ```rust
//! use lamco_xscp::xscp::{build_envelope, build_payload};
//!
//! let envelope = build_envelope("<div>Hi</div>\n");
//! assert!(envelope.is_linked());
//! assert_eq!(envelope.embed_node().unwrap().v, "<div>Hi</div>\\n");
//!
//! let text = build_payload("");
//! assert!(text.contains("\"HtmlEmbed\""));
//! ```

pub mod builder;
pub mod escape;
pub mod id;
pub mod types;

pub use builder::{build_envelope, build_envelope_with, build_payload, build_payload_with};
pub use escape::{escape_content, unescape_content};
pub use id::{generate_id, is_v4_id, IdGenerator, UuidGenerator};
pub use types::{Envelope, EmbedNode, StyleRecord, XSCP_DATA_TYPE};
