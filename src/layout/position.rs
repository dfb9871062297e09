use crate::config::{BlendConfig, LayoutConfig};

/// Maps days-ago onto the axis, blending a linear and a logarithmic scale.
///
/// A purely linear axis crowds everything except the last few years against
/// the left edge; a purely logarithmic one squeezes recent events together.
/// The blend weights live in [`BlendConfig`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionScale {
    max_days: f64,
    log_span: f64,
    blend: BlendConfig,
    min_position: f64,
    max_position: f64,
}

impl PositionScale {
    pub fn new(max_days: i64, config: &LayoutConfig) -> Self {
        let max_days = max_days.max(1) as f64;
        Self {
            max_days,
            log_span: (max_days + 1.0).ln(),
            blend: config.blend,
            min_position: config.min_position,
            max_position: config.max_position,
        }
    }

    pub fn max_days(&self) -> f64 {
        self.max_days
    }

    /// Percent along the axis: oldest near `min_position`, today near
    /// `max_position`. Non-increasing in `days_ago`.
    pub fn position(&self, days_ago: i64) -> f64 {
        let days = days_ago.max(1) as f64;
        let linear = 1.0 - days / self.max_days;
        let log = 1.0 - days.ln() / self.log_span;
        let blended = linear * self.blend.linear_weight + log * self.blend.log_weight();
        (blended * 100.0).max(self.min_position).min(self.max_position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scale(max_days: i64) -> PositionScale {
        PositionScale::new(max_days, &LayoutConfig::default())
    }

    #[test]
    fn stays_within_bounds() {
        for max_days in [1, 2, 30, 365, 3_650, 13_000, 50_000] {
            let scale = scale(max_days);
            for days in [1, 2, 7, 100, 1_000, 10_000, 49_999, 50_000, 200_000] {
                let pos = scale.position(days);
                assert!(
                    (3.0..=97.0).contains(&pos),
                    "max_days={max_days} days={days} -> {pos}"
                );
            }
        }
    }

    #[test]
    fn recent_is_never_left_of_older() {
        let scale = scale(13_000);
        let mut previous = f64::INFINITY;
        for days in (1..=13_000).step_by(17) {
            let pos = scale.position(days);
            assert!(pos <= previous, "days={days}: {pos} > {previous}");
            previous = pos;
        }
    }

    #[test]
    fn matches_blend_formula() {
        let scale = scale(1_000);
        let days = 100.0_f64;
        let linear = 1.0 - days / 1_000.0;
        let log = 1.0 - days.ln() / 1_001.0_f64.ln();
        let expected = (0.6 * linear + 0.4 * log) * 100.0;
        assert!((scale.position(100) - expected).abs() < 1e-9);
    }

    #[test]
    fn oldest_event_clamps_to_left_edge() {
        let scale = scale(13_000);
        assert_eq!(scale.position(13_000), 3.0);
    }

    #[test]
    fn alternate_blend_is_a_config_change() {
        let mut config = LayoutConfig::default();
        config.blend.linear_weight = 1.0;
        let linear_only = PositionScale::new(1_000, &config);
        assert!((linear_only.position(500) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn degenerate_span_is_finite() {
        let scale = PositionScale::new(0, &LayoutConfig::default());
        let pos = scale.position(0);
        assert!(pos.is_finite());
        assert!((pos - 40.0).abs() < 1e-9);
    }
}
