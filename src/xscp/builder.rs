//! Envelope construction
//!
//! Every call builds a fresh envelope: one HTML embed node and one style
//! record linked through the node's class list, with two new identifiers.

use serde_json::Map;
use tracing::debug;

use super::escape::escape_content;
use super::id::{IdGenerator, UuidGenerator};
use super::types::{
    ConversionMeta, DevlinkSettings, EmbedMeta, EmbedNode, EmbedNodeData, EmbedSettings, Envelope,
    Interactions, NodeAttributes, Payload, SearchSettings, StyleRecord, Visibility, EMBED_CLASS_NAME,
    EMBED_KIND_HTML, EMBED_TAG, HTML_EMBED_TYPE, STYLE_TYPE_CLASS, XSCP_DATA_TYPE,
};

/// Build the payload text for `content`.
///
/// Never fails; empty input yields a valid envelope with an empty embed.
pub fn build_payload(content: &str) -> String {
    build_payload_with(content, &mut UuidGenerator)
}

/// Build the payload text drawing identifiers from `ids`
pub fn build_payload_with<G: IdGenerator + ?Sized>(content: &str, ids: &mut G) -> String {
    build_envelope_with(content, ids).to_payload_text()
}

/// Build an envelope with random identifiers
pub fn build_envelope(content: &str) -> Envelope {
    build_envelope_with(content, &mut UuidGenerator)
}

/// Build an envelope drawing the node id, then the style id, from `ids`
pub fn build_envelope_with<G: IdGenerator + ?Sized>(content: &str, ids: &mut G) -> Envelope {
    let node_id = ids.next_id();
    let style_id = ids.next_id();
    let escaped = escape_content(content);

    debug!(
        node_id = %node_id,
        style_id = %style_id,
        raw_len = content.len(),
        escaped_len = escaped.len(),
        "Built HtmlEmbed envelope"
    );

    Envelope {
        kind: XSCP_DATA_TYPE.to_string(),
        payload: Payload {
            nodes: vec![embed_node(node_id, style_id.clone(), escaped)],
            styles: vec![embed_style(style_id)],
            assets: Vec::new(),
            ix1: Vec::new(),
            ix2: Interactions::default(),
        },
        meta: ConversionMeta::default(),
    }
}

fn embed_node(id: String, class_id: String, escaped: String) -> EmbedNode {
    EmbedNode {
        id,
        kind: HTML_EMBED_TYPE.to_string(),
        tag: EMBED_TAG.to_string(),
        classes: vec![class_id],
        children: Vec::new(),
        v: escaped.clone(),
        data: EmbedNodeData {
            search: SearchSettings { exclude: true },
            embed: EmbedSettings {
                meta: EmbedMeta {
                    html: escaped,
                    div: false,
                    script: true,
                    compilable: false,
                    iframe: false,
                },
                kind: EMBED_KIND_HTML.to_string(),
            },
            inside_rte: false,
            devlink: DevlinkSettings::default(),
            display_name: String::new(),
            attr: NodeAttributes::default(),
            xattr: Vec::new(),
            visibility: Visibility::default(),
        },
    }
}

fn embed_style(id: String) -> StyleRecord {
    StyleRecord {
        id,
        fake: false,
        kind: STYLE_TYPE_CLASS.to_string(),
        name: EMBED_CLASS_NAME.to_string(),
        namespace: String::new(),
        comb: String::new(),
        style_less: String::new(),
        variants: Map::new(),
        children: Vec::new(),
        origin: None,
        selector: None,
    }
}
