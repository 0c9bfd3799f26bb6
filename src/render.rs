use crate::config::Config;
use crate::layout::{FlowGraph, FlowNode};
use crate::model::UnitNode;
use anyhow::Result;
use std::collections::HashMap;
use std::path::Path;

pub const EMPTY_MESSAGE: &str = "Δεν βρέθηκαν αποτελέσματα";

pub fn render_svg(graph: &FlowGraph, config: &Config) -> String {
    if graph.nodes.is_empty() {
        return render_empty_svg(config);
    }

    let theme = &config.theme;
    let render = &config.render;
    let (min_x, min_y, width, height) = viewport(graph, config);

    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width:.2}\" height=\"{height:.2}\" viewBox=\"{min_x:.2} {min_y:.2} {width:.2} {height:.2}\">",
    ));

    svg.push_str(&format!(
        "<rect x=\"{min_x:.2}\" y=\"{min_y:.2}\" width=\"{width:.2}\" height=\"{height:.2}\" fill=\"{}\"/>",
        render.background
    ));

    svg.push_str("<defs>");
    svg.push_str(&format!(
        "<marker id=\"arrow\" viewBox=\"0 0 10 10\" refX=\"10\" refY=\"5\" markerWidth=\"6\" markerHeight=\"6\" orient=\"auto-start-reverse\"><path d=\"M 0 0 L 10 5 L 0 10 z\" fill=\"{}\"/></marker>",
        theme.line_color
    ));
    svg.push_str("</defs>");

    let index: HashMap<&str, &FlowNode> = graph
        .nodes
        .iter()
        .map(|node| (node.id.as_str(), node))
        .collect();

    for edge in &graph.edges {
        let (Some(source), Some(target)) = (
            index.get(edge.source.as_str()),
            index.get(edge.target.as_str()),
        ) else {
            continue;
        };
        let sx = source.x + render.node_width / 2.0;
        let sy = source.y + render.node_height;
        let tx = target.x + render.node_width / 2.0;
        let ty = target.y;
        let mid_y = (sy + ty) / 2.0;
        let d = points_to_path(&[(sx, sy), (sx, mid_y), (tx, mid_y), (tx, ty)]);
        svg.push_str(&format!(
            "<path d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"1.4\" marker-end=\"url(#arrow)\"/>",
            d, theme.line_color
        ));
    }

    for node in &graph.nodes {
        svg.push_str(&node_card_svg(node, config));
    }

    svg.push_str("</svg>");
    svg
}

fn node_card_svg(node: &FlowNode, config: &Config) -> String {
    let theme = &config.theme;
    let render = &config.render;
    let center_x = node.x + render.node_width / 2.0;

    let mut card = String::new();
    card.push_str(&format!(
        "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" rx=\"10\" ry=\"10\" fill=\"{}\" stroke=\"{}\" stroke-width=\"1.4\"/>",
        node.x, node.y, render.node_width, render.node_height, theme.node_fill, theme.node_border
    ));

    let label = truncate_to_width(&node.label, render.node_width - 24.0, theme.font_size);
    card.push_str(&format!(
        "<text x=\"{center_x:.2}\" y=\"{:.2}\" text-anchor=\"middle\" font-family=\"{}\" font-size=\"{}\" font-weight=\"600\" fill=\"{}\">{}</text>",
        node.y + 30.0,
        theme.font_family,
        theme.font_size,
        theme.node_text,
        escape_xml(&label)
    ));

    let code_size = theme.font_size - 2.0;
    card.push_str(&format!(
        "<text x=\"{center_x:.2}\" y=\"{:.2}\" text-anchor=\"middle\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
        node.y + 48.0,
        theme.font_family,
        code_size,
        theme.node_subtext,
        escape_xml(&node.code)
    ));

    let badge_size = theme.font_size - 3.0;
    let badge_label = config.unit_type_label(node.unit_type);
    let badge_width = estimate_text_width(badge_label, badge_size) + 16.0;
    let badge_x = center_x - badge_width / 2.0;
    let badge_y = node.y + 58.0;
    card.push_str(&format!(
        "<rect x=\"{badge_x:.2}\" y=\"{badge_y:.2}\" width=\"{badge_width:.2}\" height=\"18\" rx=\"9\" ry=\"9\" fill=\"{}\"/>",
        theme.badge_fill
    ));
    card.push_str(&format!(
        "<text x=\"{center_x:.2}\" y=\"{:.2}\" text-anchor=\"middle\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
        badge_y + 13.0,
        theme.font_family,
        badge_size,
        theme.badge_text,
        escape_xml(badge_label)
    ));

    card
}

pub fn render_empty_svg(config: &Config) -> String {
    let theme = &config.theme;
    let width = config.render.node_width * 2.0;
    let height = config.render.node_height * 2.0;
    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width:.2}\" height=\"{height:.2}\" viewBox=\"0 0 {width:.2} {height:.2}\">",
    ));
    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        config.render.background
    ));
    svg.push_str(&format!(
        "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
        width / 2.0,
        height / 2.0,
        theme.font_family,
        theme.font_size,
        theme.node_subtext,
        escape_xml(EMPTY_MESSAGE)
    ));
    svg.push_str("</svg>");
    svg
}

/// Plain-text outline of a hierarchy, one unit per line. Children are
/// indented two spaces per level and branch units carry a child count.
pub fn render_outline(tree: &UnitNode) -> String {
    let mut out = String::new();
    outline_unit(tree, 0, &mut out);
    out
}

fn outline_unit(node: &UnitNode, depth: usize, out: &mut String) {
    out.push_str(&"  ".repeat(depth));
    out.push_str(&format!("{} [{}]", node.label, node.code));
    if !node.children.is_empty() {
        out.push_str(&format!(" ({})", node.children.len()));
    }
    out.push('\n');
    for child in &node.children {
        outline_unit(child, depth + 1, out);
    }
}

fn viewport(graph: &FlowGraph, config: &Config) -> (f32, f32, f32, f32) {
    let render = &config.render;
    let mut min_x = f32::MAX;
    let mut min_y = f32::MAX;
    let mut max_x = f32::MIN;
    let mut max_y = f32::MIN;
    for node in &graph.nodes {
        min_x = min_x.min(node.x);
        min_y = min_y.min(node.y);
        max_x = max_x.max(node.x + render.node_width);
        max_y = max_y.max(node.y + render.node_height);
    }
    let pad = render.padding;
    (
        min_x - pad,
        min_y - pad,
        max_x - min_x + pad * 2.0,
        max_y - min_y + pad * 2.0,
    )
}

fn points_to_path(points: &[(f32, f32)]) -> String {
    if points.is_empty() {
        return String::new();
    }
    let mut d = String::new();
    d.push_str(&format!("M {:.2} {:.2}", points[0].0, points[0].1));
    for point in points.iter().skip(1) {
        d.push_str(&format!(" L {:.2} {:.2}", point.0, point.1));
    }
    d
}

// Rough advance-width estimate. Good enough for badge sizing and label
// truncation without shaping the actual font.
fn estimate_text_width(text: &str, font_size: f32) -> f32 {
    text.chars().count() as f32 * font_size * 0.6
}

fn truncate_to_width(text: &str, max_width: f32, font_size: f32) -> String {
    if estimate_text_width(text, font_size) <= max_width {
        return text.to_string();
    }
    let max_chars = (max_width / (font_size * 0.6)) as usize;
    let mut out: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    out.push('…');
    out
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, config: &Config) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.font_family = primary_font_family(&config.theme.font_family);

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("failed to allocate a {}x{} pixmap", size.width(), size.height()))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

#[cfg(feature = "png")]
fn primary_font_family(stack: &str) -> String {
    stack
        .split(',')
        .next()
        .unwrap_or("sans-serif")
        .trim()
        .trim_matches(['\'', '"'])
        .to_string()
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
