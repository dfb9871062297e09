use super::types::{EventGroup, MarkerLayout};
use crate::ir::Timeline;

/// Vertical offset of the `index`-th member: 0, -step, +2*step, -3*step, ...
pub fn stack_offset(index: usize, step: f64) -> f64 {
    let magnitude = step * index as f64;
    if index % 2 == 0 { magnitude } else { -magnitude }
}

/// Turns finalized groups into one marker per event. Every member sits at
/// the group's final position; only the first carries the stacked count.
pub fn stack_groups(groups: &[EventGroup], timeline: &Timeline, step: f64) -> Vec<MarkerLayout> {
    let mut markers = Vec::with_capacity(groups.iter().map(EventGroup::len).sum());
    for (group_idx, group) in groups.iter().enumerate() {
        let stacked = group.len() > 1;
        for (slot, member) in group.members.iter().enumerate() {
            let event = &timeline.events[member.event];
            markers.push(MarkerLayout {
                event: member.event,
                group: group_idx,
                slot,
                x: group.position,
                offset: stack_offset(slot, step),
                stacked_count: (stacked && slot == 0).then_some(group.len()),
                is_range: event.is_range(),
                color: timeline.color_of(event).to_string(),
            });
        }
    }
    markers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{Category, Event, EventDate};
    use crate::layout::types::PositionedEvent;
    use crate::parser::parse_date;

    #[test]
    fn offsets_alternate_and_grow() {
        let offsets: Vec<f64> = (0..5).map(|i| stack_offset(i, 25.0)).collect();
        assert_eq!(offsets, vec![0.0, -25.0, 50.0, -75.0, 100.0]);
    }

    #[test]
    fn first_member_carries_count() {
        let mut timeline = Timeline::new();
        timeline.categories.insert(
            "work".to_string(),
            Category {
                key: "work".to_string(),
                color: "#4f8cff".to_string(),
            },
        );
        for (title, date) in [("a", "2020-01-01"), ("b", "2020-01-15"), ("c", "2024-06-01")] {
            timeline.events.push(Event {
                title: title.to_string(),
                description: String::new(),
                category: "work".to_string(),
                date: EventDate::Single(parse_date(date).unwrap()),
            });
        }
        let member = |event, position| PositionedEvent {
            event,
            days_ago: 1,
            position,
        };
        let groups = vec![
            EventGroup {
                position: 20.5,
                members: vec![member(0, 20.0), member(1, 21.0)],
            },
            EventGroup::seed(member(2, 80.0)),
        ];

        let markers = stack_groups(&groups, &timeline, 25.0);
        assert_eq!(markers.len(), 3);
        assert_eq!(markers[0].stacked_count, Some(2));
        assert_eq!(markers[1].stacked_count, None);
        assert_eq!(markers[1].x, 20.5);
        assert_eq!(markers[1].offset, -25.0);
        assert_eq!(markers[2].stacked_count, None);
        assert_eq!(markers[2].offset, 0.0);
        assert_eq!(markers[2].color, "#4f8cff");
    }
}
