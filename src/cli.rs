use crate::config::{load_config, Config, LayoutAlgorithm, UNKNOWN_UNIT_TYPE};
use crate::dump::{graph_dump_json, write_graph_dump};
use crate::export::{rows_to_csv, unit_rows, unit_stats};
use crate::filter::filter_tree;
use crate::layout::{compute_layout, FlowGraph};
use crate::model::UnitNode;
use crate::parser::{parse_unit_path, parse_unit_tree};
use crate::path::{breadcrumbs, find_path};
use crate::render::{render_empty_svg, render_outline, render_svg, write_output_svg, EMPTY_MESSAGE};
#[cfg(feature = "png")]
use crate::render::write_output_png;
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "orgr", version, about = "Organization hierarchy renderer (filter, layout, trails, export)")]
pub struct Args {
    /// Input tree document (.json) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file. Text formats default to stdout if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config JSON file (spacing, theme, unit-type dictionary)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Case-insensitive unit search. A matched unit keeps its whole subtree.
    #[arg(short = 's', long = "search")]
    pub search: Option<String>,

    /// Re-root the hierarchy at the unit with this code
    #[arg(long = "root")]
    pub root: Option<String>,

    /// Unit code to resolve into a breadcrumb trail
    #[arg(short = 'u', long = "unit")]
    pub unit: Option<String>,

    /// Unit path document (nested chain) for trail output
    #[arg(long = "pathFile")]
    pub path_file: Option<PathBuf>,

    /// Layout algorithm override
    #[arg(short = 'a', long = "algorithm", value_enum)]
    pub algorithm: Option<AlgorithmArg>,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Svg,
    #[cfg(feature = "png")]
    Png,
    Json,
    Csv,
    Outline,
    Trail,
    Stats,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum AlgorithmArg {
    Layered,
    Tidy,
}

impl From<AlgorithmArg> for LayoutAlgorithm {
    fn from(value: AlgorithmArg) -> Self {
        match value {
            AlgorithmArg::Layered => LayoutAlgorithm::Layered,
            AlgorithmArg::Tidy => LayoutAlgorithm::Tidy,
        }
    }
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let mut config = load_config(args.config.as_deref())?;
    if let Some(algorithm) = args.algorithm {
        config.layout.algorithm = algorithm.into();
    }

    let input = read_input(args.input.as_deref())?;
    let tree = parse_unit_tree(&input)?;

    let tree = match args.root.as_deref() {
        Some(code) => tree
            .find_subtree(code)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("unit {code:?} not found in the hierarchy"))?,
        None => tree,
    };

    let query = effective_query(args.search.as_deref(), config.filter.min_query_len);
    let filtered = filter_tree(&tree, query);

    match args.output_format {
        OutputFormat::Svg => {
            let svg = render_filtered(filtered.as_ref(), &config)?;
            write_output_svg(&svg, args.output.as_deref())?;
        }
        #[cfg(feature = "png")]
        OutputFormat::Png => {
            let svg = render_filtered(filtered.as_ref(), &config)?;
            let output = ensure_output(&args.output, "png")?;
            write_output_png(&svg, &output, &config)?;
        }
        OutputFormat::Json => {
            let graph = match filtered.as_ref() {
                Some(tree) => compute_layout(tree, &config.layout)?,
                None => FlowGraph::default(),
            };
            match args.output.as_deref() {
                Some(path) => write_graph_dump(path, &graph)?,
                None => print!("{}", graph_dump_json(&graph)?),
            }
        }
        OutputFormat::Csv => {
            // Exports always cover the full (re-rooted) hierarchy, not the
            // search result, so files stay reproducible run to run.
            write_text_output(&rows_to_csv(&unit_rows(&tree)), args.output.as_deref())?;
        }
        OutputFormat::Outline => {
            let text = match filtered.as_ref() {
                Some(tree) => render_outline(tree),
                None => format!("{}\n", EMPTY_MESSAGE),
            };
            write_text_output(&text, args.output.as_deref())?;
        }
        OutputFormat::Trail => {
            let trail = resolve_trail(&args, &tree)?;
            write_text_output(&trail, args.output.as_deref())?;
        }
        OutputFormat::Stats => {
            let text = match filtered.as_ref() {
                Some(tree) => format_stats(tree, &config),
                None => "total units: 0\n".to_string(),
            };
            write_text_output(&text, args.output.as_deref())?;
        }
    }

    Ok(())
}

fn effective_query(search: Option<&str>, min_len: usize) -> &str {
    let query = search.unwrap_or("");
    if query.chars().count() < min_len {
        ""
    } else {
        query
    }
}

fn render_filtered(tree: Option<&UnitNode>, config: &Config) -> Result<String> {
    match tree {
        Some(tree) => {
            let graph = compute_layout(tree, &config.layout)?;
            Ok(render_svg(&graph, config))
        }
        None => Ok(render_empty_svg(config)),
    }
}

fn resolve_trail(args: &Args, tree: &UnitNode) -> Result<String> {
    let path = if let Some(path_file) = args.path_file.as_deref() {
        let content = std::fs::read_to_string(path_file)?;
        Some(parse_unit_path(&content)?)
    } else if let Some(code) = args.unit.as_deref() {
        let found = find_path(tree, code)
            .ok_or_else(|| anyhow::anyhow!("unit {code:?} not found in the hierarchy"))?;
        Some(found)
    } else {
        return Err(anyhow::anyhow!("trail output needs --unit or --pathFile"));
    };

    let crumbs = breadcrumbs(path.as_ref());
    let labels: Vec<&str> = crumbs.iter().map(|crumb| crumb.label.as_str()).collect();
    Ok(format!("{}\n", labels.join(" › ")))
}

fn format_stats(tree: &UnitNode, config: &Config) -> String {
    let stats = unit_stats(tree);
    let mut out = format!("total units: {}\n", stats.total);
    let mut counts: Vec<(&u32, &usize)> = stats.by_type.iter().collect();
    counts.sort_by(|a, b| b.1.cmp(a.1).then(a.0.cmp(b.0)));
    for (unit_type, count) in counts {
        out.push_str(&format!(
            "{}: {}\n",
            config.unit_type_label(Some(*unit_type)),
            count
        ));
    }
    if stats.untyped > 0 {
        out.push_str(&format!("{}: {}\n", UNKNOWN_UNIT_TYPE, stats.untyped));
    }
    out
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        if path == Path::new("-") {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            return Ok(buf);
        }
        return Ok(std::fs::read_to_string(path)?);
    }

    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

#[cfg(feature = "png")]
fn ensure_output(output: &Option<PathBuf>, ext: &str) -> Result<PathBuf> {
    if let Some(path) = output {
        return Ok(path.clone());
    }
    Err(anyhow::anyhow!("output path required for {} output", ext))
}

fn write_text_output(text: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, text)?;
        }
        None => {
            print!("{}", text);
        }
    }
    Ok(())
}
