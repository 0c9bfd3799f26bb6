use serde::{Deserialize, Serialize};

/// One organizational unit in the hierarchy tree. Field names follow the
/// upstream registry wire format (`preferredLabel`, `unitType`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitNode {
    pub code: String,
    #[serde(rename = "preferredLabel")]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_type: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<UnitNode>,
}

/// A root-to-unit chain as served by the registry's path endpoint. Each
/// node links to at most one child; the terminal node is the target unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathNode {
    pub code: String,
    #[serde(rename = "preferredLabel")]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_type: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child: Option<Box<PathNode>>,
}

/// Flattened trail element for breadcrumb display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Breadcrumb {
    pub code: String,
    pub label: String,
}

impl UnitNode {
    pub fn new(code: &str, label: &str) -> Self {
        Self {
            code: code.to_string(),
            label: label.to_string(),
            unit_type: None,
            children: Vec::new(),
        }
    }

    /// Locates the subtree rooted at the unit with the given code.
    pub fn find_subtree(&self, code: &str) -> Option<&UnitNode> {
        if self.code == code {
            return Some(self);
        }
        self.children
            .iter()
            .find_map(|child| child.find_subtree(code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_map_to_model_fields() {
        let doc = r#"{
            "code": "ORG",
            "preferredLabel": "Organization Root",
            "unitType": 1,
            "children": [{"code": "U1", "preferredLabel": "Unit One"}]
        }"#;
        let node: UnitNode = serde_json::from_str(doc).unwrap();
        assert_eq!(node.label, "Organization Root");
        assert_eq!(node.unit_type, Some(1));
        assert_eq!(node.children.len(), 1);
        assert_eq!(node.children[0].children.len(), 0);
        assert_eq!(node.children[0].unit_type, None);
    }

    #[test]
    fn find_subtree_reaches_nested_units() {
        let mut root = UnitNode::new("ORG", "Root");
        let mut u1 = UnitNode::new("U1", "Unit One");
        u1.children.push(UnitNode::new("U1.1", "Section"));
        root.children.push(u1);
        root.children.push(UnitNode::new("U2", "Unit Two"));

        assert_eq!(root.find_subtree("ORG").map(|n| n.code.as_str()), Some("ORG"));
        assert_eq!(root.find_subtree("U1.1").map(|n| n.label.as_str()), Some("Section"));
        assert!(root.find_subtree("U9").is_none());
    }
}
