use crate::config::LayoutConfig;
use crate::ir::Timeline;
use crate::theme::Theme;

use super::text::measure_label;
use super::types::{LegendItem, LegendLayout};

/// Lays category swatches out left to right, in category key order.
pub(super) fn compute_legend(timeline: &Timeline, theme: &Theme, config: &LayoutConfig) -> LegendLayout {
    let legend = &config.legend;
    let mut items = Vec::with_capacity(timeline.categories.len());
    let mut cursor = 0.0f32;
    let mut height = legend.swatch_size;
    for category in timeline.categories.values() {
        let label = measure_label(&category.key, theme, config.fast_text_metrics);
        height = height.max(label.height);
        let advance = legend.swatch_size + legend.label_gap + label.width;
        items.push(LegendItem {
            key: category.key.clone(),
            color: category.color.clone(),
            label,
            x: cursor,
        });
        cursor += advance + legend.item_gap;
    }
    let width = if items.is_empty() {
        0.0
    } else {
        cursor - legend.item_gap
    };
    LegendLayout {
        items,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::Category;

    #[test]
    fn items_do_not_overlap() {
        let mut timeline = Timeline::new();
        for (key, color) in [("work", "#4f8cff"), ("study", "#ffb347"), ("life", "#7bd88f")] {
            timeline.categories.insert(
                key.to_string(),
                Category {
                    key: key.to_string(),
                    color: color.to_string(),
                },
            );
        }
        let config = LayoutConfig {
            fast_text_metrics: true,
            ..LayoutConfig::default()
        };
        let legend = compute_legend(&timeline, &Theme::modern(), &config);
        let keys: Vec<&str> = legend.items.iter().map(|item| item.key.as_str()).collect();
        assert_eq!(keys, vec!["life", "study", "work"]);
        for pair in legend.items.windows(2) {
            let end = pair[0].x + config.legend.swatch_size + config.legend.label_gap + pair[0].label.width;
            assert!(pair[1].x > end);
        }
        assert!(legend.width > 0.0);
    }

    #[test]
    fn empty_table_has_zero_width() {
        let legend = compute_legend(&Timeline::new(), &Theme::modern(), &LayoutConfig::default());
        assert!(legend.items.is_empty());
        assert_eq!(legend.width, 0.0);
    }
}
