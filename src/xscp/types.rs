//! XscpData wire types
//!
//! Field names, nesting and declaration order match what the Webflow
//! Designer expects on paste. Serialization order follows declaration order,
//! so do not reorder fields.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Envelope type discriminator, also the clipboard identifier
pub const XSCP_DATA_TYPE: &str = "@webflow/XscpData";

/// Node type for an HTML embed component
pub const HTML_EMBED_TYPE: &str = "HtmlEmbed";

/// Container tag of the embed node
pub const EMBED_TAG: &str = "div";

/// Embed kind inside `data.embed`
pub const EMBED_KIND_HTML: &str = "html";

/// Style record type
pub const STYLE_TYPE_CLASS: &str = "class";

/// Class name attached to every generated embed
pub const EMBED_CLASS_NAME: &str = "custom-embed";

/// Top-level clipboard payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Always [`XSCP_DATA_TYPE`]
    #[serde(rename = "type")]
    pub kind: String,
    /// Nodes, styles and auxiliary collections
    pub payload: Payload,
    /// Removal counters
    pub meta: ConversionMeta,
}

/// Nodes, styles and the (empty) asset and interaction collections
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payload {
    /// Exactly one [`EmbedNode`]
    pub nodes: Vec<EmbedNode>,
    /// Exactly one [`StyleRecord`]
    pub styles: Vec<StyleRecord>,
    /// Always empty
    pub assets: Vec<Value>,
    /// Legacy interactions, always empty
    pub ix1: Vec<Value>,
    /// Interactions 2.0, all lists empty
    pub ix2: Interactions,
}

/// Interactions 2.0 block
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interactions {
    /// Interaction definitions
    pub interactions: Vec<Value>,
    /// Trigger events
    pub events: Vec<Value>,
    /// Action lists run by interactions
    pub action_lists: Vec<Value>,
}

/// Counters of what the conversion had to drop. A fresh embed drops
/// nothing, so all are zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionMeta {
    /// Links removed from the pasted content
    pub dropped_links: u32,
    /// Dynamic bindings removed
    pub dyn_bind_removed_count: u32,
    /// Collection list bindings removed
    pub dyn_list_bind_removed_count: u32,
    /// Pagination settings removed
    pub pagination_removed_count: u32,
    /// Universal bindings removed
    pub universal_bindings_removed_count: u32,
    /// Symbols that could not be linked
    pub unlinked_symbol_count: u32,
    /// Code components removed
    pub code_components_removed_count: u32,
}

/// HTML embed component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbedNode {
    /// Fresh v4 identifier
    #[serde(rename = "_id")]
    pub id: String,
    /// Always [`HTML_EMBED_TYPE`]
    #[serde(rename = "type")]
    pub kind: String,
    /// Always [`EMBED_TAG`]
    pub tag: String,
    /// Style ids; the first one links to the generated [`StyleRecord`]
    pub classes: Vec<String>,
    /// Always empty
    pub children: Vec<Value>,
    /// Escaped embed source
    pub v: String,
    /// Embed settings
    pub data: EmbedNodeData,
}

/// Settings carried by an [`EmbedNode`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbedNodeData {
    /// Site search indexing
    pub search: SearchSettings,
    /// Embed source and flags
    pub embed: EmbedSettings,
    /// Whether the node sits inside a rich text element
    #[serde(rename = "insideRTE")]
    pub inside_rte: bool,
    /// DevLink component settings
    pub devlink: DevlinkSettings,
    /// Navigator label, empty for the default
    pub display_name: String,
    /// HTML attributes
    pub attr: NodeAttributes,
    /// Custom attributes
    pub xattr: Vec<Value>,
    /// Conditional visibility
    pub visibility: Visibility,
}

/// Site search settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSettings {
    /// Keep the embed out of the search index
    pub exclude: bool,
}

/// `data.embed` block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbedSettings {
    /// Source and behaviour flags
    pub meta: EmbedMeta,
    /// Always [`EMBED_KIND_HTML`]
    #[serde(rename = "type")]
    pub kind: String,
}

/// Embed source plus behaviour flags
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedMeta {
    /// Escaped embed source, same text as [`EmbedNode::v`]
    pub html: String,
    /// Raw container rather than a wrapper div
    pub div: bool,
    /// Scripts inside the embed may run
    pub script: bool,
    /// Source is compiled before publishing
    pub compilable: bool,
    /// Source is rendered in an iframe
    pub iframe: bool,
}

/// DevLink settings, empty for plain embeds
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DevlinkSettings {
    /// Component runtime props
    pub runtime_props: Map<String, Value>,
    /// Slot name
    pub slot: String,
}

/// HTML attributes of the node
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeAttributes {
    /// `id` attribute, empty for none
    pub id: String,
}

/// Conditional visibility rules
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Visibility {
    /// Conditions, empty means always visible
    pub conditions: Vec<Value>,
}

/// CSS class definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleRecord {
    /// Fresh v4 identifier, referenced by [`EmbedNode::classes`]
    #[serde(rename = "_id")]
    pub id: String,
    /// Always false
    pub fake: bool,
    /// Always [`STYLE_TYPE_CLASS`]
    #[serde(rename = "type")]
    pub kind: String,
    /// Always [`EMBED_CLASS_NAME`]
    pub name: String,
    /// Empty
    pub namespace: String,
    /// Combo class marker, empty
    pub comb: String,
    /// Serialized CSS, empty
    pub style_less: String,
    /// Breakpoint and state variants, empty
    pub variants: Map<String, Value>,
    /// Child styles, empty
    pub children: Vec<Value>,
    /// Serialized as `null`
    pub origin: Option<Value>,
    /// Serialized as `null`
    pub selector: Option<Value>,
}

impl Envelope {
    /// The single embed node, if present
    pub fn embed_node(&self) -> Option<&EmbedNode> {
        self.payload.nodes.first()
    }

    /// The single style record, if present
    pub fn style(&self) -> Option<&StyleRecord> {
        self.payload.styles.first()
    }

    /// True when the first node's first class is the first style's id
    pub fn is_linked(&self) -> bool {
        match (self.embed_node(), self.style()) {
            (Some(node), Some(style)) => node.classes.first() == Some(&style.id),
            _ => false,
        }
    }

    /// Pretty-printed JSON, two-space indent, declaration key order
    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Payload text as placed in the editor and on the clipboard.
    ///
    /// Every map in the envelope is keyed by `String` and every value is
    /// plain data, so serialization cannot fail.
    pub fn to_payload_text(&self) -> String {
        self.to_pretty_json()
            .expect("envelope has only string map keys")
    }

    /// Parse payload text back into an envelope
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }
}
