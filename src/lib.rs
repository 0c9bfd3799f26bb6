#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod dump;
pub mod export;
pub mod filter;
pub mod layout;
pub mod model;
pub mod parser;
pub mod path;
pub mod render;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, LayoutAlgorithm, LayoutConfig};
pub use filter::filter_tree;
pub use layout::{compute_layout, FlowGraph, LayoutError};
pub use model::{Breadcrumb, PathNode, UnitNode};
pub use parser::{parse_unit_path, parse_unit_tree};
pub use path::{breadcrumbs, find_path};
pub use render::render_svg;
pub use theme::Theme;
