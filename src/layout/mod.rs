mod axis;
mod dates;
mod grouping;
mod legend;
mod position;
mod stack;
mod text;
pub(crate) mod types;
pub use axis::year_ticks;
pub use dates::{days_ago, days_between, max_days, reference_instant};
pub use grouping::{absorb, group_events, place_events};
pub use position::PositionScale;
pub use stack::{stack_groups, stack_offset};
pub use types::*;
use legend::compute_legend;

use crate::config::LayoutConfig;
use crate::ir::Timeline;
use crate::theme::Theme;
use chrono::Datelike;
use log::debug;

/// Computes the complete timeline layout as plain data. Nothing here touches
/// a rendering surface; renderers consume the result in a separate pass.
pub fn compute_layout(timeline: &Timeline, theme: &Theme, config: &LayoutConfig) -> TimelineLayout {
    let reference = reference_instant(config.reference_date);
    let max_days = max_days(timeline, reference);
    let scale = PositionScale::new(max_days, config);

    let placed = place_events(timeline, reference, &scale);
    let groups = group_events(placed, config.position_threshold);
    let markers = stack_groups(&groups, timeline, config.stack_step);

    let reference_year = config.reference_date.year();
    let first_year = timeline
        .oldest_date()
        .map_or(reference_year, |oldest| oldest.year().min(reference_year));
    let years = year_ticks(first_year, config.reference_date, &scale);

    let legend = config
        .legend
        .show
        .then(|| compute_legend(timeline, theme, config));

    debug!(
        "timeline layout: {} events in {} groups ({} stacked), {} year ticks, max_days={}",
        markers.len(),
        groups.len(),
        groups.iter().filter(|group| group.len() > 1).count(),
        years.len(),
        max_days
    );

    TimelineLayout {
        reference_date: config.reference_date,
        max_days,
        groups,
        markers,
        years,
        legend,
    }
}
