//! Parsing of registry JSON documents into model types.

use crate::model::{PathNode, UnitNode};
use anyhow::Context;
use serde::de::DeserializeOwned;
use serde_json::Value;

pub fn parse_unit_tree(input: &str) -> anyhow::Result<UnitNode> {
    parse_document(input).context("failed to parse organization tree document")
}

pub fn parse_unit_path(input: &str) -> anyhow::Result<PathNode> {
    parse_document(input).context("failed to parse organization path document")
}

fn parse_document<T: DeserializeOwned>(input: &str) -> anyhow::Result<T> {
    let value = parse_value(input)?;
    let parsed = serde_json::from_value(unwrap_envelope(value))?;
    Ok(parsed)
}

fn parse_value(input: &str) -> anyhow::Result<Value> {
    match serde_json::from_str(input) {
        Ok(value) => Ok(value),
        // Hand-written fixture files tend to carry comments and trailing
        // commas; retry tolerantly but report the strict error.
        Err(strict_err) => match json5::from_str(input) {
            Ok(value) => Ok(value),
            Err(_) => Err(strict_err.into()),
        },
    }
}

// The registry wraps payloads in one or more {"data": ...} envelopes. A
// unit document always carries a "code" field, so an object with "data"
// and no "code" is an envelope.
fn unwrap_envelope(mut value: Value) -> Value {
    while is_envelope(&value) {
        if let Value::Object(mut map) = std::mem::take(&mut value) {
            value = map.remove("data").unwrap_or(Value::Null);
        }
    }
    value
}

fn is_envelope(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|map| map.contains_key("data") && !map.contains_key("code"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TREE_DOC: &str = r#"{
        "code": "ORG",
        "preferredLabel": "Υπουργείο Εσωτερικών",
        "unitType": 1,
        "children": [
            {"code": "U1", "preferredLabel": "Διεύθυνση Διοίκησης", "unitType": 2}
        ]
    }"#;

    #[test]
    fn parses_a_plain_tree_document() {
        let tree = parse_unit_tree(TREE_DOC).unwrap();
        assert_eq!(tree.code, "ORG");
        assert_eq!(tree.children.len(), 1);
        assert_eq!(tree.children[0].unit_type, Some(2));
    }

    #[test]
    fn unwraps_the_response_envelope() {
        let wrapped = format!("{{\"data\": {TREE_DOC}}}");
        let tree = parse_unit_tree(&wrapped).unwrap();
        assert_eq!(tree.code, "ORG");

        let double = format!("{{\"data\": {{\"data\": {TREE_DOC}}}}}");
        let tree = parse_unit_tree(&double).unwrap();
        assert_eq!(tree.children[0].code, "U1");
    }

    #[test]
    fn tolerates_json5_fixture_syntax() {
        let doc = r#"{
            // hand-edited fixture
            code: "ORG",
            preferredLabel: "Root",
            children: [
                {code: "U1", preferredLabel: "Unit One"},
            ],
        }"#;
        let tree = parse_unit_tree(doc).unwrap();
        assert_eq!(tree.children.len(), 1);
    }

    #[test]
    fn parses_a_path_document() {
        let doc = r#"{"data": {
            "code": "ORG",
            "preferredLabel": "Root",
            "child": {"code": "U1", "preferredLabel": "Unit One", "unitType": 2}
        }}"#;
        let path = parse_unit_path(doc).unwrap();
        assert_eq!(path.code, "ORG");
        assert_eq!(path.child.as_ref().unwrap().code, "U1");
        assert!(path.child.as_ref().unwrap().child.is_none());
    }

    #[test]
    fn reports_the_strict_error_for_malformed_input() {
        let err = parse_unit_tree("{\"code\": }").unwrap_err();
        assert!(format!("{err:#}").contains("organization tree"));
    }

    #[test]
    fn missing_required_fields_fail() {
        assert!(parse_unit_tree(r#"{"code": "ORG"}"#).is_err());
        assert!(parse_unit_tree("null").is_err());
    }
}
