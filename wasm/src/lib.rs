use chrono::NaiveDate;
use lifeline::config::Config;
use lifeline::interaction::{Rect, place_popup};
use lifeline::layout_dump::LayoutDump;
use lifeline::{Theme, compute_layout, parse_timeline, render_with_config};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TimelineRenderOptions {
    theme: Option<String>,
    font_family: Option<String>,
    font_size: Option<f32>,
    width: Option<f32>,
    height: Option<f32>,
    reference_date: Option<NaiveDate>,
    show_legend: Option<bool>,
}

fn build_config(options: TimelineRenderOptions) -> Config {
    let mut config = Config::default();
    if let Some(theme) = options.theme.as_deref().and_then(Theme::by_name) {
        config.render.background = theme.background.clone();
        config.theme = theme;
    }
    if let Some(font_family) = options.font_family {
        config.theme.font_family = font_family;
    }
    if let Some(font_size) = options.font_size {
        config.theme.font_size = font_size;
    }
    if let Some(width) = options.width {
        config.render.width = width;
    }
    if let Some(height) = options.height {
        config.render.height = height;
    }
    if let Some(date) = options.reference_date {
        config.layout.reference_date = date;
    }
    if let Some(show) = options.show_legend {
        config.layout.legend.show = show;
    }
    // No system fonts inside the browser sandbox.
    config.layout.fast_text_metrics = true;
    config
}

fn parse_options(options_json: Option<String>) -> Result<TimelineRenderOptions, JsValue> {
    match options_json {
        Some(raw) => serde_json::from_str::<TimelineRenderOptions>(&raw)
            .map_err(|error| JsValue::from_str(&error.to_string())),
        None => Ok(TimelineRenderOptions::default()),
    }
}

#[wasm_bindgen]
pub fn render_timeline_svg(data: &str, options_json: Option<String>) -> Result<String, JsValue> {
    let config = build_config(parse_options(options_json)?);
    render_with_config(data, &config).map_err(|error| JsValue::from_str(&error.to_string()))
}

#[wasm_bindgen]
pub fn timeline_layout_json(data: &str, options_json: Option<String>) -> Result<String, JsValue> {
    let config = build_config(parse_options(options_json)?);
    let timeline = parse_timeline(data).map_err(|error| JsValue::from_str(&error.to_string()))?;
    let layout = compute_layout(&timeline, &config.theme, &config.layout);
    serde_json::to_string(&LayoutDump::from_layout(&layout, &timeline))
        .map_err(|error| JsValue::from_str(&error.to_string()))
}

/// Left offset in pixels for the hover popup over a marker.
#[wasm_bindgen]
pub fn popup_left(marker_left: f64, marker_width: f64, viewport_width: f64) -> f64 {
    let marker = Rect {
        left: marker_left,
        width: marker_width,
        ..Rect::default()
    };
    place_popup(marker, viewport_width, &Config::default().layout.popup).left
}
