use crate::config::{LayoutConfig, RenderConfig};
use crate::interaction::PopupContent;
use crate::ir::Timeline;
use crate::layout::{MarkerLayout, TimelineLayout};
use crate::theme::Theme;
use anyhow::Result;
use std::path::Path;

const PAD_X: f32 = 40.0;
const PAD_Y: f32 = 24.0;
const MIN_BAND_HALF: f32 = 48.0;
const YEAR_LABEL_BAND: f32 = 32.0;
const LEGEND_GAP: f32 = 20.0;
const TICK_HALF: f32 = 5.0;
const BADGE_RADIUS: f32 = 8.0;

/// Vertical bands of the static rendering, top to bottom.
struct Frame {
    width: f32,
    height: f32,
    axis_y: f32,
    year_label_y: f32,
    legend_y: f32,
}

impl Frame {
    fn new(layout: &TimelineLayout, config: &LayoutConfig, render: &RenderConfig) -> Self {
        let reach = layout
            .markers
            .iter()
            .map(|marker| marker.offset.abs() as f32)
            .fold(0.0, f32::max);
        let band_half = (reach + config.marker_size as f32 + BADGE_RADIUS).max(MIN_BAND_HALF);
        let legend_height = layout
            .legend
            .as_ref()
            .filter(|legend| !legend.items.is_empty())
            .map_or(0.0, |legend| legend.height + LEGEND_GAP);
        let needed = PAD_Y * 2.0 + band_half * 2.0 + YEAR_LABEL_BAND + legend_height;
        let height = render.height.max(needed);
        let slack = height - needed;
        let axis_y = PAD_Y + slack / 2.0 + band_half;
        let year_label_y = axis_y + band_half + YEAR_LABEL_BAND / 2.0;
        Self {
            width: render.width.max(2.0 * PAD_X + 100.0),
            height,
            axis_y,
            year_label_y,
            legend_y: year_label_y + YEAR_LABEL_BAND / 2.0 + LEGEND_GAP,
        }
    }

    fn x(&self, percent: f64) -> f32 {
        PAD_X + (percent as f32 / 100.0) * (self.width - 2.0 * PAD_X)
    }
}

pub fn render_svg(
    timeline: &Timeline,
    layout: &TimelineLayout,
    theme: &Theme,
    config: &LayoutConfig,
    render: &RenderConfig,
) -> String {
    let frame = Frame::new(layout, config, render);
    let (width, height) = (frame.width, frame.height);
    let mut svg = String::new();

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    ));
    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        render.background
    ));

    svg.push_str(&format!(
        "<line class=\"timeline-axis\" x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" stroke=\"{}\" stroke-width=\"2\" stroke-linecap=\"round\"/>",
        frame.x(0.0),
        frame.axis_y,
        frame.x(100.0),
        frame.axis_y,
        theme.axis_color
    ));

    svg.push_str("<g class=\"timeline-years\">");
    for tick in &layout.years {
        let x = frame.x(tick.position);
        svg.push_str(&format!(
            "<line x1=\"{x:.2}\" y1=\"{:.2}\" x2=\"{x:.2}\" y2=\"{:.2}\" stroke=\"{}\" stroke-width=\"1\"/>",
            frame.axis_y - TICK_HALF,
            frame.axis_y + TICK_HALF,
            theme.tick_color
        ));
        svg.push_str(&format!(
            "<text class=\"year-marker\" x=\"{x:.2}\" y=\"{:.2}\" text-anchor=\"middle\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
            frame.year_label_y,
            escape_xml(&theme.font_family),
            theme.font_size * 0.85,
            theme.muted_text_color,
            tick.year
        ));
    }
    svg.push_str("</g>");

    svg.push_str("<g class=\"timeline-events\">");
    for marker in &layout.markers {
        svg.push_str(&marker_svg(timeline, marker, &frame, theme, config));
    }
    svg.push_str("</g>");

    if let Some(legend) = layout.legend.as_ref().filter(|legend| !legend.items.is_empty()) {
        let origin_x = (width - legend.width) / 2.0;
        let size = config.legend.swatch_size;
        svg.push_str("<g class=\"timeline-legend\">");
        for item in &legend.items {
            let x = origin_x + item.x;
            svg.push_str(&format!(
                "<rect x=\"{x:.2}\" y=\"{:.2}\" width=\"{size}\" height=\"{size}\" rx=\"2\" fill=\"{}\"/>",
                frame.legend_y - size / 2.0,
                escape_xml(&item.color)
            ));
            svg.push_str(&format!(
                "<text x=\"{:.2}\" y=\"{:.2}\" dominant-baseline=\"middle\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
                x + size + config.legend.label_gap,
                frame.legend_y,
                escape_xml(&theme.font_family),
                theme.font_size,
                theme.text_color,
                escape_xml(&item.key)
            ));
        }
        svg.push_str("</g>");
    }

    svg.push_str("</svg>");
    svg
}

fn marker_svg(
    timeline: &Timeline,
    marker: &MarkerLayout,
    frame: &Frame,
    theme: &Theme,
    config: &LayoutConfig,
) -> String {
    let event = &timeline.events[marker.event];
    let content = PopupContent::for_event(event);
    let x = frame.x(marker.x);
    let y = frame.axis_y + marker.offset as f32;
    let size = config.marker_size as f32;
    let color = escape_xml(&marker.color);

    let mut out = String::new();
    let class = if marker.is_range {
        "timeline-event range"
    } else {
        "timeline-event"
    };
    out.push_str(&format!("<g class=\"{class}\">"));
    out.push_str(&format!(
        "<title>{}\n{}\n{}</title>",
        escape_xml(&content.date),
        escape_xml(&content.title),
        escape_xml(&content.description)
    ));
    if marker.is_range {
        let w = size * 1.6;
        out.push_str(&format!(
            "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{w:.2}\" height=\"{size:.2}\" rx=\"{:.2}\" fill=\"{color}\" stroke=\"{}\" stroke-width=\"2\"/>",
            x - w / 2.0,
            y - size / 2.0,
            size / 2.0,
            theme.marker_stroke
        ));
    } else {
        out.push_str(&format!(
            "<circle cx=\"{x:.2}\" cy=\"{y:.2}\" r=\"{:.2}\" fill=\"{color}\" stroke=\"{}\" stroke-width=\"2\"/>",
            size / 2.0,
            theme.marker_stroke
        ));
    }
    if let Some(count) = marker.stacked_count {
        let bx = x + size / 2.0 + BADGE_RADIUS * 0.5;
        let by = y - size / 2.0 - BADGE_RADIUS * 0.5;
        out.push_str(&format!(
            "<circle class=\"stack-count\" cx=\"{bx:.2}\" cy=\"{by:.2}\" r=\"{BADGE_RADIUS}\" fill=\"{}\"/>",
            theme.badge_background
        ));
        out.push_str(&format!(
            "<text x=\"{bx:.2}\" y=\"{by:.2}\" text-anchor=\"middle\" dominant-baseline=\"central\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{count}</text>",
            escape_xml(&theme.font_family),
            theme.font_size * 0.75,
            theme.badge_text_color
        ));
    }
    out.push_str("</g>");
    out
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    write_output_text(svg, output)
}

pub fn write_output_text(text: &str, output: Option<&Path>) -> Result<()> {
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

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, render_cfg: &RenderConfig, theme: &Theme) -> Result<()> {
    let mut opt = usvg::Options::default();
    if let Some(primary) = theme.font_family.split(',').next() {
        opt.font_family = primary.trim().trim_matches('"').to_string();
    }
    opt.fontdb_mut().load_system_fonts();
    opt.default_size = usvg::Size::from_wh(render_cfg.width, render_cfg.height)
        .ok_or_else(|| anyhow::anyhow!("invalid render size"))?;

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::compute_layout;
    use crate::parser::parse_timeline;

    const DATA: &str = r##"{
        "events": [
            {"title": "Born", "description": "", "category": "life", "date": "2010-03-12"},
            {"title": "Degree", "description": "Physics & Maths", "category": "study", "startDate": "2015-06-01", "endDate": "2017-09-01"},
            {"title": "A", "description": "", "category": "work", "date": "2020-01-01"},
            {"title": "B", "description": "", "category": "work", "date": "2020-01-15"}
        ],
        "categories": {
            "life": {"color": "#7bd88f"},
            "study": {"color": "#ffb347"},
            "work": {"color": "#4f8cff"}
        }
    }"##;

    fn render(config: &LayoutConfig) -> String {
        let timeline = parse_timeline(DATA).unwrap();
        let theme = Theme::modern();
        let layout = compute_layout(&timeline, &theme, config);
        render_svg(&timeline, &layout, &theme, config, &RenderConfig::default())
    }

    fn fast() -> LayoutConfig {
        LayoutConfig {
            fast_text_metrics: true,
            ..LayoutConfig::default()
        }
    }

    #[test]
    fn render_svg_basic() {
        let svg = render(&fast());
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert_eq!(svg.matches("class=\"year-marker\"").count(), 17);
        assert_eq!(svg.matches("<g class=\"timeline-event").count(), 4);
        assert_eq!(svg.matches("class=\"stack-count\"").count(), 1);
        assert!(svg.contains("timeline-event range"));
        assert!(svg.contains("Jun 2015 - Sep 2017"));
        assert!(svg.contains("Physics &amp; Maths"));
        assert!(svg.contains("#4f8cff"));
    }

    #[test]
    fn legend_lists_categories() {
        let svg = render(&fast());
        assert!(svg.contains("timeline-legend"));
        assert!(svg.contains(">study</text>"));

        let mut config = fast();
        config.legend.show = false;
        assert!(!render(&config).contains("timeline-legend"));
    }

    #[test]
    fn tall_stacks_grow_the_canvas() {
        let mut events = Vec::new();
        for day in 1..=12 {
            events.push(format!(
                r#"{{"title": "e{day}", "description": "", "category": "work", "date": "2000-01-{day:02}"}}"#
            ));
        }
        events.push(r#"{"title": "late", "description": "", "category": "work", "date": "2025-01-01"}"#.to_string());
        let data = format!(
            r##"{{"events": [{}], "categories": {{"work": {{"color": "#4f8cff"}}}}}}"##,
            events.join(",")
        );
        let timeline = parse_timeline(&data).unwrap();
        let theme = Theme::modern();
        let config = fast();
        let layout = compute_layout(&timeline, &theme, &config);
        let render_cfg = RenderConfig {
            height: 100.0,
            ..RenderConfig::default()
        };
        let frame = Frame::new(&layout, &config, &render_cfg);
        assert!(frame.height > 2.0 * 275.0);
        assert!(frame.axis_y - 275.0 > 0.0);
    }
}
