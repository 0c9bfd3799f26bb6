//! Root-to-unit trail resolution for breadcrumb display.

use crate::model::{Breadcrumb, PathNode, UnitNode};
use std::collections::HashSet;

/// Flattens a path chain into an ordered trail, root first, target last.
/// `None` resolves to an empty trail. A chain that revisits a code is
/// truncated at the repeat; everything collected up to that point stays
/// usable.
pub fn breadcrumbs(path: Option<&PathNode>) -> Vec<Breadcrumb> {
    let mut trail = Vec::new();
    let mut seen = HashSet::new();
    let mut current = path;
    while let Some(node) = current {
        if !seen.insert(node.code.as_str()) {
            break;
        }
        trail.push(Breadcrumb {
            code: node.code.clone(),
            label: node.label.clone(),
        });
        current = node.child.as_deref();
    }
    trail
}

/// Derives the root-to-target chain from the hierarchy itself, for when no
/// path document is available. Returns `None` if the code is absent.
pub fn find_path(tree: &UnitNode, code: &str) -> Option<PathNode> {
    if tree.code == code {
        return Some(chain_node(tree, None));
    }
    for child in &tree.children {
        if let Some(tail) = find_path(child, code) {
            return Some(chain_node(tree, Some(Box::new(tail))));
        }
    }
    None
}

fn chain_node(unit: &UnitNode, child: Option<Box<PathNode>>) -> PathNode {
    PathNode {
        code: unit.code.clone(),
        label: unit.label.clone(),
        unit_type: unit.unit_type,
        child,
    }
}
