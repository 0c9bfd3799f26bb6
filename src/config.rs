use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Caption used for unit types missing from the dictionary.
pub const UNKNOWN_UNIT_TYPE: &str = "Άγνωστος Τύπος";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutAlgorithm {
    /// Fixed-grid rows with each child block centered under its parent.
    Layered,
    /// Contour-based columns, overlap-free for unbalanced trees.
    Tidy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub horizontal_spacing: f32,
    pub vertical_spacing: f32,
    pub algorithm: LayoutAlgorithm,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            horizontal_spacing: 250.0,
            vertical_spacing: 100.0,
            algorithm: LayoutAlgorithm::Layered,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Queries shorter than this are treated as empty at the CLI boundary.
    /// The engine itself filters on any non-empty query.
    pub min_query_len: usize,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self { min_query_len: 2 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub node_width: f32,
    pub node_height: f32,
    pub padding: f32,
    pub background: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            node_width: 200.0,
            node_height: 90.0,
            padding: 40.0,
            background: "#FFFFFF".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub filter: FilterConfig,
    pub render: RenderConfig,
    /// Unit type id to display label, seeded with the registry defaults.
    pub unit_types: BTreeMap<u32, String>,
}

impl Default for Config {
    fn default() -> Self {
        let theme = Theme::govgr();
        let render = RenderConfig {
            background: theme.background.clone(),
            ..Default::default()
        };
        Self {
            theme,
            layout: LayoutConfig::default(),
            filter: FilterConfig::default(),
            render,
            unit_types: default_unit_types(),
        }
    }
}

impl Config {
    pub fn unit_type_label(&self, unit_type: Option<u32>) -> &str {
        unit_type
            .and_then(|id| self.unit_types.get(&id))
            .map(String::as_str)
            .unwrap_or(UNKNOWN_UNIT_TYPE)
    }
}

fn default_unit_types() -> BTreeMap<u32, String> {
    BTreeMap::from([
        (1, "Γενική Διεύθυνση".to_string()),
        (2, "Διεύθυνση".to_string()),
        (3, "Τμήμα".to_string()),
        (4, "Γραφείο".to_string()),
    ])
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct LayoutConfigFile {
    horizontal_spacing: Option<f32>,
    vertical_spacing: Option<f32>,
    algorithm: Option<LayoutAlgorithm>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct FilterConfigFile {
    min_query_len: Option<usize>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct RenderConfigFile {
    node_width: Option<f32>,
    node_height: Option<f32>,
    padding: Option<f32>,
    background: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    layout: Option<LayoutConfigFile>,
    filter: Option<FilterConfigFile>,
    render: Option<RenderConfigFile>,
    unit_types: Option<BTreeMap<u32, String>>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let Some(path) = path else {
        return Ok(config);
    };

    let contents = std::fs::read_to_string(path)?;
    let parsed: ConfigFile = serde_json::from_str(&contents)?;

    if let Some(theme_name) = parsed.theme.as_deref() {
        if theme_name == "mono" {
            config.theme = Theme::mono();
        } else if theme_name == "govgr" || theme_name == "default" {
            config.theme = Theme::govgr();
        }
        config.render.background = config.theme.background.clone();
    }

    if let Some(layout) = parsed.layout {
        if let Some(v) = layout.horizontal_spacing {
            config.layout.horizontal_spacing = v;
        }
        if let Some(v) = layout.vertical_spacing {
            config.layout.vertical_spacing = v;
        }
        if let Some(v) = layout.algorithm {
            config.layout.algorithm = v;
        }
    }

    if let Some(filter) = parsed.filter {
        if let Some(v) = filter.min_query_len {
            config.filter.min_query_len = v;
        }
    }

    if let Some(render) = parsed.render {
        if let Some(v) = render.node_width {
            config.render.node_width = v;
        }
        if let Some(v) = render.node_height {
            config.render.node_height = v;
        }
        if let Some(v) = render.padding {
            config.render.padding = v;
        }
        if let Some(v) = render.background {
            config.render.background = v;
        }
    }

    if let Some(unit_types) = parsed.unit_types {
        // File entries extend or override the built-in dictionary.
        for (id, label) in unit_types {
            config.unit_types.insert(id, label);
        }
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = Config::default();
        assert_eq!(config.layout.horizontal_spacing, 250.0);
        assert_eq!(config.layout.vertical_spacing, 100.0);
        assert_eq!(config.layout.algorithm, LayoutAlgorithm::Layered);
        assert_eq!(config.filter.min_query_len, 2);
        assert_eq!(config.render.node_width, 200.0);
        assert_eq!(config.render.node_height, 90.0);
        assert_eq!(config.unit_type_label(Some(3)), "Τμήμα");
        assert_eq!(config.unit_type_label(Some(99)), UNKNOWN_UNIT_TYPE);
        assert_eq!(config.unit_type_label(None), UNKNOWN_UNIT_TYPE);
    }

    #[test]
    fn missing_path_yields_defaults() {
        let config = load_config(None).unwrap();
        assert_eq!(config.layout.horizontal_spacing, 250.0);
    }

    #[test]
    fn file_values_override_defaults_and_extend_the_dictionary() {
        let path = std::env::temp_dir().join("orgr-config-overlay-test.json");
        std::fs::write(
            &path,
            r#"{
                "theme": "mono",
                "layout": {"horizontalSpacing": 300, "algorithm": "tidy"},
                "filter": {"minQueryLen": 3},
                "render": {"nodeWidth": 240},
                "unitTypes": {"5": "Ειδική Υπηρεσία", "3": "Υποδιεύθυνση"}
            }"#,
        )
        .unwrap();
        let config = load_config(Some(&path)).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.layout.horizontal_spacing, 300.0);
        assert_eq!(config.layout.vertical_spacing, 100.0);
        assert_eq!(config.layout.algorithm, LayoutAlgorithm::Tidy);
        assert_eq!(config.filter.min_query_len, 3);
        assert_eq!(config.render.node_width, 240.0);
        assert_eq!(config.render.node_height, 90.0);
        assert_eq!(config.unit_type_label(Some(5)), "Ειδική Υπηρεσία");
        assert_eq!(config.unit_type_label(Some(3)), "Υποδιεύθυνση");
        assert_eq!(config.unit_type_label(Some(1)), "Γενική Διεύθυνση");
    }

    #[test]
    fn invalid_file_is_an_error() {
        let path = std::env::temp_dir().join("orgr-config-invalid-test.json");
        std::fs::write(&path, "not json at all").unwrap();
        let result = load_config(Some(&path));
        std::fs::remove_file(&path).ok();
        assert!(result.is_err());
    }
}
