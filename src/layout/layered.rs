use super::*;

pub(super) fn compute_layered_layout(tree: &UnitNode, config: &LayoutConfig) -> FlowGraph {
    let mut graph = FlowGraph::default();
    place_unit(tree, None, 0.0, 0.0, config, &mut graph);
    graph
}

fn place_unit(
    node: &UnitNode,
    parent: Option<&str>,
    x: f32,
    y: f32,
    config: &LayoutConfig,
    graph: &mut FlowGraph,
) {
    graph.nodes.push(FlowNode {
        id: node.code.clone(),
        label: node.label.clone(),
        code: node.code.clone(),
        unit_type: node.unit_type,
        x,
        y,
    });
    if let Some(parent_id) = parent {
        graph.edges.push(FlowEdge {
            id: format!("{parent_id}-{}", node.code),
            source: parent_id.to_string(),
            target: node.code.clone(),
        });
    }
    if node.children.is_empty() {
        return;
    }
    // Children occupy a block of child_count * horizontal_spacing centered
    // under this node; rows advance by vertical_spacing per depth level.
    let block_width = node.children.len() as f32 * config.horizontal_spacing;
    let start_x = x - block_width / 2.0;
    for (index, child) in node.children.iter().enumerate() {
        place_unit(
            child,
            Some(&node.code),
            start_x + index as f32 * config.horizontal_spacing,
            y + config.vertical_spacing,
            config,
            graph,
        );
    }
}
