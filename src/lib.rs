#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod interaction;
pub mod ir;
pub mod layout;
pub mod layout_dump;
#[cfg(feature = "cli")]
pub mod logging;
pub mod mount;
pub mod parser;
pub mod render;
pub mod surface;
pub mod text_metrics;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, LayoutConfig, RenderConfig};
pub use error::TimelineError;
pub use ir::{Category, Event, EventDate, Timeline};
pub use layout::{TimelineLayout, compute_layout};
pub use parser::parse_timeline;
pub use render::render_svg;
pub use theme::Theme;

/// Parses a timeline document and renders it to SVG in one call.
pub fn render_with_config(input: &str, config: &Config) -> Result<String, TimelineError> {
    let timeline = parse_timeline(input)?;
    let layout = compute_layout(&timeline, &config.theme, &config.layout);
    Ok(render_svg(
        &timeline,
        &layout,
        &config.theme,
        &config.layout,
        &config.render,
    ))
}
