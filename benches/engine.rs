use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use orgchart_renderer::config::{Config, LayoutAlgorithm, LayoutConfig};
use orgchart_renderer::export::{rows_to_csv, unit_rows};
use orgchart_renderer::filter::filter_tree;
use orgchart_renderer::layout::compute_layout;
use orgchart_renderer::model::UnitNode;
use orgchart_renderer::parser::parse_unit_tree;
use orgchart_renderer::render::render_svg;
use std::hint::black_box;

fn synthetic_tree(levels: usize, fanout: usize) -> UnitNode {
    build_unit("U".to_string(), levels, fanout)
}

fn build_unit(code: String, levels: usize, fanout: usize) -> UnitNode {
    let label = if levels == 0 {
        format!("Τμήμα {code}")
    } else if levels == 1 {
        format!("Διεύθυνση {code}")
    } else {
        format!("Γενική Διεύθυνση {code}")
    };
    let mut node = UnitNode::new(&code, &label);
    node.unit_type = Some(match levels {
        0 => 3,
        1 => 2,
        _ => 1,
    });
    if levels > 0 {
        for idx in 0..fanout {
            node.children
                .push(build_unit(format!("{code}.{idx}"), levels - 1, fanout));
        }
    }
    node
}

fn count_units(node: &UnitNode) -> usize {
    1 + node.children.iter().map(count_units).sum::<usize>()
}

const SHAPES: [(usize, usize); 3] = [(3, 3), (4, 4), (6, 3)];

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    for (levels, fanout) in SHAPES {
        let tree = synthetic_tree(levels, fanout);
        let name = format!("units_{}", count_units(&tree));
        let json = serde_json::to_string(&tree).expect("serialize failed");
        group.bench_with_input(BenchmarkId::from_parameter(name), &json, |b, data| {
            b.iter(|| {
                let tree = parse_unit_tree(black_box(data)).expect("parse failed");
                black_box(tree.children.len());
            });
        });
    }
    group.finish();
}

fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter");
    let tree = synthetic_tree(6, 3);
    for (name, query) in [
        ("broad", "διεύθυνση"),
        ("narrow", "u.2.2.2.2.2.2"),
        ("miss", "ανύπαρκτη μονάδα"),
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(name), query, |b, query| {
            b.iter(|| {
                black_box(filter_tree(black_box(&tree), query));
            });
        });
    }
    group.finish();
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    let layered = LayoutConfig::default();
    let tidy = LayoutConfig {
        algorithm: LayoutAlgorithm::Tidy,
        ..LayoutConfig::default()
    };
    for (levels, fanout) in SHAPES {
        let tree = synthetic_tree(levels, fanout);
        let name = format!("units_{}", count_units(&tree));
        group.bench_with_input(BenchmarkId::new("layered", &name), &tree, |b, tree| {
            b.iter(|| {
                let graph = compute_layout(black_box(tree), &layered).expect("layout failed");
                black_box(graph.nodes.len());
            });
        });
        group.bench_with_input(BenchmarkId::new("tidy", &name), &tree, |b, tree| {
            b.iter(|| {
                let graph = compute_layout(black_box(tree), &tidy).expect("layout failed");
                black_box(graph.nodes.len());
            });
        });
    }
    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_svg");
    let config = Config::default();
    for (levels, fanout) in SHAPES {
        let tree = synthetic_tree(levels, fanout);
        let name = format!("units_{}", count_units(&tree));
        let graph = compute_layout(&tree, &config.layout).expect("layout failed");
        group.bench_with_input(BenchmarkId::from_parameter(name), &graph, |b, graph| {
            b.iter(|| {
                let svg = render_svg(black_box(graph), &config);
                black_box(svg.len());
            });
        });
    }
    group.finish();
}

fn bench_export(c: &mut Criterion) {
    let mut group = c.benchmark_group("export_csv");
    for (levels, fanout) in SHAPES {
        let tree = synthetic_tree(levels, fanout);
        let name = format!("units_{}", count_units(&tree));
        group.bench_with_input(BenchmarkId::from_parameter(name), &tree, |b, tree| {
            b.iter(|| {
                let csv = rows_to_csv(&unit_rows(black_box(tree)));
                black_box(csv.len());
            });
        });
    }
    group.finish();
}

fn bench_end_to_end(c: &mut Criterion) {
    let mut group = c.benchmark_group("end_to_end");
    let config = Config::default();
    for (levels, fanout) in SHAPES {
        let tree = synthetic_tree(levels, fanout);
        let name = format!("units_{}", count_units(&tree));
        let json = serde_json::to_string(&tree).expect("serialize failed");
        group.bench_with_input(BenchmarkId::from_parameter(name), &json, |b, data| {
            b.iter(|| {
                let tree = parse_unit_tree(black_box(data)).expect("parse failed");
                let filtered = filter_tree(&tree, "διεύθυνση").expect("query matches");
                let graph = compute_layout(&filtered, &config.layout).expect("layout failed");
                let svg = render_svg(&graph, &config);
                black_box(svg.len());
            });
        });
    }
    group.finish();
}

criterion_group!(
    name = benches;
    config = Criterion::default();
    targets = bench_parse, bench_filter, bench_layout, bench_render, bench_export, bench_end_to_end
);
criterion_main!(benches);
