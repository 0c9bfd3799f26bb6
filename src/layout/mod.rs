mod layered;
mod tidy;

use layered::*;
use tidy::*;

use crate::config::{LayoutAlgorithm, LayoutConfig};
use crate::model::UnitNode;
use std::collections::HashSet;
use thiserror::Error;

/// One positioned unit box. `x`/`y` are the top-left anchor in renderer
/// units; `id` equals the unit code.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowNode {
    pub id: String,
    pub label: String,
    pub code: String,
    pub unit_type: Option<u32>,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FlowEdge {
    pub id: String,
    pub source: String,
    pub target: String,
}

/// Flat layout output: nodes in pre-order, one edge per parent-child pair.
#[derive(Debug, Clone, Default)]
pub struct FlowGraph {
    pub nodes: Vec<FlowNode>,
    pub edges: Vec<FlowEdge>,
}

#[derive(Debug, Error, PartialEq)]
pub enum LayoutError {
    #[error("duplicate unit code {0:?} in hierarchy")]
    DuplicateCode(String),
    #[error("unit {0:?} has an empty code")]
    EmptyCode(String),
}

pub type LayoutResult<T> = Result<T, LayoutError>;

/// Positions every unit of the tree. The tree is validated first; a
/// structural fault rejects the whole operation, no partial graph is
/// produced.
pub fn compute_layout(tree: &UnitNode, config: &LayoutConfig) -> LayoutResult<FlowGraph> {
    validate_tree(tree)?;
    let graph = match config.algorithm {
        LayoutAlgorithm::Layered => compute_layered_layout(tree, config),
        LayoutAlgorithm::Tidy => compute_tidy_layout(tree, config),
    };
    Ok(graph)
}

fn validate_tree(tree: &UnitNode) -> LayoutResult<()> {
    let mut seen = HashSet::new();
    validate_unit(tree, &mut seen)
}

fn validate_unit<'a>(node: &'a UnitNode, seen: &mut HashSet<&'a str>) -> LayoutResult<()> {
    if node.code.trim().is_empty() {
        return Err(LayoutError::EmptyCode(node.label.clone()));
    }
    if !seen.insert(node.code.as_str()) {
        return Err(LayoutError::DuplicateCode(node.code.clone()));
    }
    for child in &node.children {
        validate_unit(child, seen)?;
    }
    Ok(())
}
