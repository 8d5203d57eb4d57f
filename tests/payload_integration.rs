use lamco_xscp::xscp::{build_payload, is_v4_id, Envelope, XSCP_DATA_TYPE};
use serde_json::{json, Value};

#[test]
fn test_div_snippet_end_to_end() {
    let text = build_payload("<div>Hi</div>\n");
    let json: Value = serde_json::from_str(&text).unwrap();

    assert_eq!(json["type"], XSCP_DATA_TYPE);

    let node = &json["payload"]["nodes"][0];
    assert_eq!(node["type"], "HtmlEmbed");
    assert_eq!(node["tag"], "div");
    assert_eq!(node["children"], json!([]));
    assert_eq!(node["v"], "<div>Hi</div>\\n");
    assert_eq!(node["data"]["embed"]["meta"]["html"], "<div>Hi</div>\\n");
    assert_eq!(node["data"]["embed"]["meta"]["script"], true);
    assert_eq!(node["data"]["embed"]["type"], "html");
    assert_eq!(node["data"]["insideRTE"], false);
    assert_eq!(node["data"]["search"]["exclude"], true);
    assert_eq!(node["data"]["devlink"], json!({ "runtimeProps": {}, "slot": "" }));

    let style = &json["payload"]["styles"][0];
    assert_eq!(style["name"], "custom-embed");
    assert_eq!(style["type"], "class");
    assert_eq!(style["styleLess"], "");
    assert!(style["origin"].is_null());
    assert!(style["selector"].is_null());
    assert_eq!(node["classes"][0], style["_id"]);
}

#[test]
fn test_empty_input_is_valid() {
    let envelope = Envelope::from_json(&build_payload("")).unwrap();
    let node = envelope.embed_node().unwrap();

    assert_eq!(node.v, "");
    assert!(envelope.is_linked());
    assert_eq!(envelope.payload.nodes.len(), 1);
    assert_eq!(envelope.payload.styles.len(), 1);
}

#[test]
fn test_ids_are_fresh_and_distinct() {
    let first = Envelope::from_json(&build_payload("x")).unwrap();
    let second = Envelope::from_json(&build_payload("x")).unwrap();

    let node_id = &first.embed_node().unwrap().id;
    let style_id = &first.style().unwrap().id;
    assert_ne!(node_id, style_id);
    assert!(is_v4_id(node_id));
    assert!(is_v4_id(style_id));
    assert_ne!(node_id, &second.embed_node().unwrap().id);
}

#[test]
fn test_auxiliary_collections_are_empty() {
    let json: Value = serde_json::from_str(&build_payload("<svg/>")).unwrap();
    let payload = &json["payload"];

    assert_eq!(payload["assets"], json!([]));
    assert_eq!(payload["ix1"], json!([]));
    assert_eq!(
        payload["ix2"],
        json!({ "interactions": [], "events": [], "actionLists": [] })
    );
}

#[test]
fn test_meta_counters_zero_and_ordered() {
    let text = build_payload("a");
    let json: Value = serde_json::from_str(&text).unwrap();

    let order = [
        "droppedLinks",
        "dynBindRemovedCount",
        "dynListBindRemovedCount",
        "paginationRemovedCount",
        "universalBindingsRemovedCount",
        "unlinkedSymbolCount",
        "codeComponentsRemovedCount",
    ];
    assert_eq!(json["meta"].as_object().unwrap().len(), order.len());
    for key in order {
        assert_eq!(json["meta"][key], 0, "{key}");
    }

    let positions: Vec<usize> = order
        .iter()
        .map(|key| text.find(&format!("\"{key}\"")).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_pretty_printed_with_two_spaces() {
    let text = build_payload("a");
    assert!(text.starts_with("{\n  \"type\": \"@webflow/XscpData\",\n  \"payload\": {\n    \"nodes\""));
}

#[test]
fn test_quotes_survive_serialization() {
    let envelope = Envelope::from_json(&build_payload("<a href=\"x\">\t</a>")).unwrap();
    assert_eq!(envelope.embed_node().unwrap().v, "<a href=\"x\">\\t</a>");
}
