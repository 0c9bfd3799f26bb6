//! Flat exports of the hierarchy: CSV rows and unit statistics.

use crate::model::UnitNode;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
pub struct UnitRow {
    pub code: String,
    pub label: String,
    pub unit_type: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnitStats {
    pub total: usize,
    pub by_type: BTreeMap<u32, usize>,
    pub untyped: usize,
}

/// Depth-first pre-order rows, one per unit. The order matches layout node
/// emission, so repeated exports of the same tree are identical.
pub fn unit_rows(tree: &UnitNode) -> Vec<UnitRow> {
    let mut rows = Vec::new();
    collect_rows(tree, &mut rows);
    rows
}

fn collect_rows(node: &UnitNode, rows: &mut Vec<UnitRow>) {
    rows.push(UnitRow {
        code: node.code.clone(),
        label: node.label.clone(),
        unit_type: node.unit_type,
    });
    for child in &node.children {
        collect_rows(child, rows);
    }
}

/// RFC 4180 style output with a `code,label,unitType` header. An untyped
/// unit leaves its last cell empty.
pub fn rows_to_csv(rows: &[UnitRow]) -> String {
    let mut out = String::from("code,label,unitType\n");
    for row in rows {
        out.push_str(&csv_field(&row.code));
        out.push(',');
        out.push_str(&csv_field(&row.label));
        out.push(',');
        if let Some(unit_type) = row.unit_type {
            out.push_str(&unit_type.to_string());
        }
        out.push('\n');
    }
    out
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

pub fn unit_stats(tree: &UnitNode) -> UnitStats {
    let mut stats = UnitStats::default();
    collect_stats(tree, &mut stats);
    stats
}

fn collect_stats(node: &UnitNode, stats: &mut UnitStats) {
    stats.total += 1;
    match node.unit_type {
        Some(unit_type) => *stats.by_type.entry(unit_type).or_insert(0) += 1,
        None => stats.untyped += 1,
    }
    for child in &node.children {
        collect_stats(child, stats);
    }
}
