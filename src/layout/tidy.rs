//! Contour-based tidy layout producing overlap-free columns for
//! unbalanced hierarchies, in the Reingold-Tilford tradition.

use super::*;

// Gap between adjacent units at the same depth, in column units. Final x
// scales columns by horizontal_spacing.
const COLUMN_GAP: f32 = 1.0;

struct TidyNode<'a> {
    unit: &'a UnitNode,
    depth: usize,
    parent: Option<usize>,
    children: Vec<usize>,
    prelim: f32,
    modifier: f32,
    // Contour continuations across subtree boundaries. The f32 is the
    // modifier delta a scan picks up when it steps through the thread.
    thread_left: Option<(usize, f32)>,
    thread_right: Option<(usize, f32)>,
}

pub(super) fn compute_tidy_layout(tree: &UnitNode, config: &LayoutConfig) -> FlowGraph {
    let mut arena: Vec<TidyNode> = Vec::new();
    build_arena(tree, None, 0, &mut arena);
    first_walk(0, &mut arena);
    let mut columns = vec![0.0f32; arena.len()];
    second_walk(0, 0.0, &arena, &mut columns);

    // Anchor the root at x = 0 so both algorithms share the origin.
    let root_column = columns[0];
    let mut graph = FlowGraph::default();
    for (idx, node) in arena.iter().enumerate() {
        graph.nodes.push(FlowNode {
            id: node.unit.code.clone(),
            label: node.unit.label.clone(),
            code: node.unit.code.clone(),
            unit_type: node.unit.unit_type,
            x: (columns[idx] - root_column) * config.horizontal_spacing,
            y: node.depth as f32 * config.vertical_spacing,
        });
        if let Some(parent_idx) = node.parent {
            let parent_code = arena[parent_idx].unit.code.as_str();
            graph.edges.push(FlowEdge {
                id: format!("{parent_code}-{}", node.unit.code),
                source: parent_code.to_string(),
                target: node.unit.code.clone(),
            });
        }
    }
    graph
}

fn build_arena<'a>(
    unit: &'a UnitNode,
    parent: Option<usize>,
    depth: usize,
    arena: &mut Vec<TidyNode<'a>>,
) -> usize {
    let idx = arena.len();
    arena.push(TidyNode {
        unit,
        depth,
        parent,
        children: Vec::new(),
        prelim: 0.0,
        modifier: 0.0,
        thread_left: None,
        thread_right: None,
    });
    let mut children = Vec::with_capacity(unit.children.len());
    for child in &unit.children {
        children.push(build_arena(child, Some(idx), depth + 1, arena));
    }
    arena[idx].children = children;
    idx
}

// Bottom-up pass: assign preliminary columns per subtree, joining sibling
// subtrees left to right, then center each parent over its children.
fn first_walk(v: usize, arena: &mut [TidyNode]) {
    let children = arena[v].children.clone();
    if children.is_empty() {
        arena[v].prelim = 0.0;
        return;
    }
    for &child in &children {
        first_walk(child, arena);
    }
    for i in 1..children.len() {
        join_subtree(children[0], children[i - 1], children[i], arena);
    }
    let first = arena[children[0]].prelim;
    let last = arena[children[children.len() - 1]].prelim;
    arena[v].prelim = (first + last) / 2.0;
}

/// Next node down the right contour, with the modifier delta a scan
/// accumulates when stepping past `v`.
fn next_right(v: usize, arena: &[TidyNode]) -> Option<(usize, f32)> {
    match arena[v].children.last() {
        Some(&child) => Some((child, arena[v].modifier)),
        None => arena[v].thread_right,
    }
}

fn next_left(v: usize, arena: &[TidyNode]) -> Option<(usize, f32)> {
    match arena[v].children.first() {
        Some(&child) => Some((child, arena[v].modifier)),
        None => arena[v].thread_left,
    }
}

// Pushes `right` far enough from the sibling forest ending at `left` that
// no two units share a column, then threads the contour bottoms so the
// merged forest scans as a single shape in later joins.
fn join_subtree(leftmost: usize, left: usize, right: usize, arena: &mut [TidyNode]) {
    let mut inner_left = left;
    let mut inner_right = right;
    let mut outer_left = leftmost;
    let mut outer_right = right;
    let mut mod_inner_left = 0.0f32;
    let mut mod_inner_right = 0.0f32;
    let mut mod_outer_left = 0.0f32;
    let mut mod_outer_right = 0.0f32;
    let mut shift = 0.0f32;

    loop {
        let left_x = arena[inner_left].prelim + mod_inner_left;
        let right_x = arena[inner_right].prelim + mod_inner_right;
        shift = shift.max(left_x + COLUMN_GAP - right_x);
        match (next_right(inner_left, arena), next_left(inner_right, arena)) {
            (Some((next_l, delta_l)), Some((next_r, delta_r))) => {
                mod_inner_left += delta_l;
                mod_inner_right += delta_r;
                inner_left = next_l;
                inner_right = next_r;
            }
            _ => break,
        }
        if let Some((next, delta)) = next_left(outer_left, arena) {
            mod_outer_left += delta;
            outer_left = next;
        }
        if let Some((next, delta)) = next_right(outer_right, arena) {
            mod_outer_right += delta;
            outer_right = next;
        }
    }

    if next_left(inner_right, arena).is_none() {
        if let Some((cont, delta)) = next_right(inner_left, arena) {
            // The forest is deeper: continue the merged right contour into
            // its remaining levels below the new subtree's bottom corner.
            let entry = if outer_right == right { 0.0 } else { shift };
            arena[outer_right].thread_right = Some((
                cont,
                mod_inner_left + delta - (mod_outer_right + entry),
            ));
        }
    }
    if next_right(inner_left, arena).is_none() {
        if let Some((cont, delta)) = next_left(inner_right, arena) {
            // The new subtree is deeper: extend the forest's left contour
            // into it.
            arena[outer_left].thread_left = Some((
                cont,
                mod_inner_right + delta + shift - mod_outer_left,
            ));
        }
    }

    arena[right].prelim += shift;
    arena[right].modifier += shift;
}

fn second_walk(v: usize, modifier_sum: f32, arena: &[TidyNode], columns: &mut [f32]) {
    columns[v] = arena[v].prelim + modifier_sum;
    for &child in &arena[v].children {
        second_walk(child, modifier_sum + arena[v].modifier, arena, columns);
    }
}
