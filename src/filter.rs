//! Search pruning over the unit hierarchy.

use crate::model::UnitNode;

/// Prunes the tree to units whose label or code contains `query`,
/// case-insensitively, keeping every ancestor of a match so the result is
/// a connected tree rooted at the original root. A unit that matches
/// directly keeps its entire subtree. Returns `None` when nothing matches;
/// an empty query returns the tree unchanged.
pub fn filter_tree(node: &UnitNode, query: &str) -> Option<UnitNode> {
    if query.is_empty() {
        return Some(node.clone());
    }
    filter_node(node, &query.to_lowercase())
}

fn filter_node(node: &UnitNode, needle: &str) -> Option<UnitNode> {
    let matches = node.label.to_lowercase().contains(needle)
        || node.code.to_lowercase().contains(needle);
    if matches {
        return Some(node.clone());
    }
    let children: Vec<UnitNode> = node
        .children
        .iter()
        .filter_map(|child| filter_node(child, needle))
        .collect();
    if children.is_empty() {
        return None;
    }
    Some(UnitNode {
        code: node.code.clone(),
        label: node.label.clone(),
        unit_type: node.unit_type,
        children,
    })
}
