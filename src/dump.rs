use crate::layout::FlowGraph;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

const NODE_KIND: &str = "orgNode";
const EDGE_KIND: &str = "smoothstep";

/// Wire form of a positioned graph, matching what downstream flow-graph
/// renderers consume.
#[derive(Debug, Serialize)]
pub struct GraphDump {
    pub nodes: Vec<NodeDump>,
    pub edges: Vec<EdgeDump>,
}

#[derive(Debug, Serialize)]
pub struct NodeDump {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub position: PositionDump,
    pub data: NodeDataDump,
}

#[derive(Debug, Serialize)]
pub struct PositionDump {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDataDump {
    pub label: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_type: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct EdgeDump {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl GraphDump {
    pub fn from_graph(graph: &FlowGraph) -> Self {
        let nodes = graph
            .nodes
            .iter()
            .map(|node| NodeDump {
                id: node.id.clone(),
                kind: NODE_KIND.to_string(),
                position: PositionDump {
                    x: node.x,
                    y: node.y,
                },
                data: NodeDataDump {
                    label: node.label.clone(),
                    code: node.code.clone(),
                    unit_type: node.unit_type,
                },
            })
            .collect();
        let edges = graph
            .edges
            .iter()
            .map(|edge| EdgeDump {
                id: edge.id.clone(),
                source: edge.source.clone(),
                target: edge.target.clone(),
                kind: EDGE_KIND.to_string(),
            })
            .collect();
        GraphDump { nodes, edges }
    }
}

pub fn graph_dump_json(graph: &FlowGraph) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(&GraphDump::from_graph(graph))?)
}

pub fn write_graph_dump(path: &Path, graph: &FlowGraph) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &GraphDump::from_graph(graph))?;
    Ok(())
}
