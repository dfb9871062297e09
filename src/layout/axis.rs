use super::dates::{days_ago, reference_instant};
use super::position::PositionScale;
use super::types::YearTick;
use chrono::{Datelike, NaiveDate};

/// One tick per calendar year from `first_year` through the reference year,
/// each anchored at July 1 and mapped with the same scale as the events.
pub fn year_ticks(first_year: i32, reference: NaiveDate, scale: &PositionScale) -> Vec<YearTick> {
    let reference_at = reference_instant(reference);
    (first_year..=reference.year())
        .filter_map(|year| {
            let mid_year = NaiveDate::from_ymd_opt(year, 7, 1)?;
            let position = scale.position(days_ago(reference_at, reference_instant(mid_year)));
            Some(YearTick { year, position })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use crate::layout::dates::days_between;

    #[test]
    fn one_tick_per_year_inclusive() {
        let reference = NaiveDate::from_ymd_opt(2026, 2, 4).unwrap();
        let oldest = reference_instant(NaiveDate::from_ymd_opt(2010, 3, 1).unwrap());
        let max_days = days_between(reference_instant(reference), oldest);
        let scale = PositionScale::new(max_days, &LayoutConfig::default());

        let ticks = year_ticks(2010, reference, &scale);
        assert_eq!(ticks.len(), 17);
        assert_eq!(ticks.first().map(|t| t.year), Some(2010));
        assert_eq!(ticks.last().map(|t| t.year), Some(2026));
        for pair in ticks.windows(2) {
            assert!(pair[0].position <= pair[1].position);
        }
    }

    #[test]
    fn reference_year_only_when_range_is_empty() {
        let reference = NaiveDate::from_ymd_opt(2026, 2, 4).unwrap();
        let scale = PositionScale::new(1, &LayoutConfig::default());
        let ticks = year_ticks(2026, reference, &scale);
        assert_eq!(ticks.len(), 1);
        assert!((3.0..=97.0).contains(&ticks[0].position));
    }
}
