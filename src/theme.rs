use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub font_size: f32,
    pub background: String,
    pub node_fill: String,
    pub node_border: String,
    pub node_text: String,
    pub node_subtext: String,
    pub line_color: String,
    pub badge_fill: String,
    pub badge_text: String,
}

impl Theme {
    pub fn govgr() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 14.0,
            background: "#FFFFFF".to_string(),
            node_fill: "#FFFFFF".to_string(),
            node_border: "#3B82F6".to_string(),
            node_text: "#111827".to_string(),
            node_subtext: "#6B7280".to_string(),
            line_color: "#94A3B8".to_string(),
            badge_fill: "#DBEAFE".to_string(),
            badge_text: "#1E40AF".to_string(),
        }
    }

    pub fn mono() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 14.0,
            background: "#FFFFFF".to_string(),
            node_fill: "#FFFFFF".to_string(),
            node_border: "#4B5563".to_string(),
            node_text: "#111827".to_string(),
            node_subtext: "#4B5563".to_string(),
            line_color: "#6B7280".to_string(),
            badge_fill: "#E5E7EB".to_string(),
            badge_text: "#374151".to_string(),
        }
    }
}
