use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub font_size: f32,
    pub text_color: String,
    pub muted_text_color: String,
    pub axis_color: String,
    pub tick_color: String,
    pub badge_background: String,
    pub badge_text_color: String,
    pub marker_stroke: String,
    pub popup_background: String,
    pub popup_border: String,
    pub background: String,
}

impl Theme {
    pub fn modern() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 13.0,
            text_color: "#1C2430".to_string(),
            muted_text_color: "#5B6B85".to_string(),
            axis_color: "#7A8AA6".to_string(),
            tick_color: "#C7D2E5".to_string(),
            badge_background: "#1C2430".to_string(),
            badge_text_color: "#FFFFFF".to_string(),
            marker_stroke: "#FFFFFF".to_string(),
            popup_background: "#FFFFFF".to_string(),
            popup_border: "#D7E0F0".to_string(),
            background: "#FFFFFF".to_string(),
        }
    }

    pub fn midnight() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 13.0,
            text_color: "#E6EAF2".to_string(),
            muted_text_color: "#8A96AD".to_string(),
            axis_color: "#3A4560".to_string(),
            tick_color: "#2A3248".to_string(),
            badge_background: "#E6EAF2".to_string(),
            badge_text_color: "#0B0F1A".to_string(),
            marker_stroke: "#0B0F1A".to_string(),
            popup_background: "#141A2A".to_string(),
            popup_border: "#2A3248".to_string(),
            background: "#0B0F1A".to_string(),
        }
    }

    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "modern" | "light" | "default" => Some(Self::modern()),
            "midnight" | "dark" => Some(Self::midnight()),
            _ => None,
        }
    }
}
