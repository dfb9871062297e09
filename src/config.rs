use crate::theme::Theme;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Layout is computed against this fixed day, never the wall clock.
pub const DEFAULT_REFERENCE_DATE: (i32, u32, u32) = (2026, 2, 4);

/// Share of the linear term in the hybrid position; the rest is logarithmic.
pub const LINEAR_WEIGHT: f64 = 0.6;

pub const MIN_POSITION: f64 = 3.0;
pub const MAX_POSITION: f64 = 97.0;
pub const POSITION_THRESHOLD: f64 = 3.0;
pub const STACK_STEP_PX: f64 = 25.0;

pub fn default_reference_date() -> NaiveDate {
    let (year, month, day) = DEFAULT_REFERENCE_DATE;
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlendConfig {
    pub linear_weight: f64,
}

impl BlendConfig {
    pub fn log_weight(&self) -> f64 {
        1.0 - self.linear_weight
    }
}

impl Default for BlendConfig {
    fn default() -> Self {
        Self {
            linear_weight: LINEAR_WEIGHT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PopupConfig {
    pub width: f64,
    pub edge_margin: f64,
    pub anchor_gap: f64,
}

impl Default for PopupConfig {
    fn default() -> Self {
        Self {
            width: 300.0,
            edge_margin: 10.0,
            anchor_gap: 10.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegendConfig {
    pub show: bool,
    pub swatch_size: f32,
    pub item_gap: f32,
    pub label_gap: f32,
}

impl Default for LegendConfig {
    fn default() -> Self {
        Self {
            show: true,
            swatch_size: 10.0,
            item_gap: 18.0,
            label_gap: 6.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub reference_date: NaiveDate,
    pub blend: BlendConfig,
    pub min_position: f64,
    pub max_position: f64,
    pub position_threshold: f64,
    pub stack_step: f64,
    pub marker_size: f64,
    pub popup: PopupConfig,
    pub legend: LegendConfig,
    pub fast_text_metrics: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            reference_date: default_reference_date(),
            blend: BlendConfig::default(),
            min_position: MIN_POSITION,
            max_position: MAX_POSITION,
            position_threshold: POSITION_THRESHOLD,
            stack_step: STACK_STEP_PX,
            marker_size: 12.0,
            popup: PopupConfig::default(),
            legend: LegendConfig::default(),
            fast_text_metrics: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub width: f32,
    pub height: f32,
    pub background: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 320.0,
            background: "#FFFFFF".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
}

impl Default for Config {
    fn default() -> Self {
        let theme = Theme::modern();
        let render = RenderConfig {
            background: theme.background.clone(),
            ..Default::default()
        };
        Self {
            theme,
            layout: LayoutConfig::default(),
            render,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    font_size: Option<f32>,
    text_color: Option<String>,
    muted_text_color: Option<String>,
    axis_color: Option<String>,
    tick_color: Option<String>,
    badge_background: Option<String>,
    badge_text_color: Option<String>,
    popup_background: Option<String>,
    popup_border: Option<String>,
    background: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TimelineConfigFile {
    reference_date: Option<NaiveDate>,
    linear_weight: Option<f64>,
    min_position: Option<f64>,
    max_position: Option<f64>,
    position_threshold: Option<f64>,
    stack_step: Option<f64>,
    marker_size: Option<f64>,
    popup_width: Option<f64>,
    popup_edge_margin: Option<f64>,
    popup_anchor_gap: Option<f64>,
    show_legend: Option<bool>,
    fast_text_metrics: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    timeline: Option<TimelineConfigFile>,
    width: Option<f32>,
    height: Option<f32>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let parsed: ConfigFile = match serde_json::from_str(contents) {
        Ok(parsed) => parsed,
        Err(json_err) => json5::from_str(contents).map_err(|_| json_err)?,
    };

    if let Some(theme_name) = parsed.theme.as_deref() {
        config.theme = Theme::by_name(theme_name)
            .ok_or_else(|| anyhow::anyhow!("unknown theme `{theme_name}`"))?;
        config.render.background = config.theme.background.clone();
    }

    if let Some(vars) = parsed.theme_variables {
        if let Some(v) = vars.font_family {
            config.theme.font_family = v;
        }
        if let Some(v) = vars.font_size {
            config.theme.font_size = v;
        }
        if let Some(v) = vars.text_color {
            config.theme.text_color = v;
        }
        if let Some(v) = vars.muted_text_color {
            config.theme.muted_text_color = v;
        }
        if let Some(v) = vars.axis_color {
            config.theme.axis_color = v;
        }
        if let Some(v) = vars.tick_color {
            config.theme.tick_color = v;
        }
        if let Some(v) = vars.badge_background {
            config.theme.badge_background = v;
        }
        if let Some(v) = vars.badge_text_color {
            config.theme.badge_text_color = v;
        }
        if let Some(v) = vars.popup_background {
            config.theme.popup_background = v;
        }
        if let Some(v) = vars.popup_border {
            config.theme.popup_border = v;
        }
        if let Some(v) = vars.background {
            config.render.background = v.clone();
            config.theme.background = v;
        }
    }

    if let Some(timeline) = parsed.timeline {
        apply_timeline_overrides(&mut config.layout, timeline)?;
    }

    if let Some(width) = parsed.width {
        config.render.width = width;
    }
    if let Some(height) = parsed.height {
        config.render.height = height;
    }

    Ok(config)
}

fn apply_timeline_overrides(
    layout: &mut LayoutConfig,
    file: TimelineConfigFile,
) -> anyhow::Result<()> {
    if let Some(v) = file.reference_date {
        layout.reference_date = v;
    }
    if let Some(v) = file.linear_weight {
        if !(0.0..=1.0).contains(&v) {
            anyhow::bail!("linearWeight must be within 0..=1, got {v}");
        }
        layout.blend.linear_weight = v;
    }
    if let Some(v) = file.min_position {
        layout.min_position = v;
    }
    if let Some(v) = file.max_position {
        layout.max_position = v;
    }
    if layout.min_position > layout.max_position {
        anyhow::bail!(
            "minPosition ({}) is greater than maxPosition ({})",
            layout.min_position,
            layout.max_position
        );
    }
    if let Some(v) = file.position_threshold {
        layout.position_threshold = v.max(0.0);
    }
    if let Some(v) = file.stack_step {
        layout.stack_step = v;
    }
    if let Some(v) = file.marker_size {
        layout.marker_size = v.max(1.0);
    }
    if let Some(v) = file.popup_width {
        layout.popup.width = v.max(1.0);
    }
    if let Some(v) = file.popup_edge_margin {
        layout.popup.edge_margin = v;
    }
    if let Some(v) = file.popup_anchor_gap {
        layout.popup.anchor_gap = v;
    }
    if let Some(v) = file.show_legend {
        layout.legend.show = v;
    }
    if let Some(v) = file.fast_text_metrics {
        layout.fast_text_metrics = v;
    }
    Ok(())
}
