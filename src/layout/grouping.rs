use super::dates::days_ago;
use super::position::PositionScale;
use super::types::{EventGroup, PositionedEvent};
use crate::ir::{Instant, Timeline};

/// Positions every event, oldest first. Ties keep document order.
pub fn place_events(
    timeline: &Timeline,
    reference: Instant,
    scale: &PositionScale,
) -> Vec<PositionedEvent> {
    let mut order: Vec<usize> = (0..timeline.events.len()).collect();
    order.sort_by_key(|&idx| timeline.events[idx].effective_date());
    order
        .into_iter()
        .map(|idx| {
            let days_ago = days_ago(reference, timeline.events[idx].effective_date());
            PositionedEvent {
                event: idx,
                days_ago,
                position: scale.position(days_ago),
            }
        })
        .collect()
}

/// Folds date-sorted events into collision groups.
pub fn group_events<I>(placed: I, threshold: f64) -> Vec<EventGroup>
where
    I: IntoIterator<Item = PositionedEvent>,
{
    placed
        .into_iter()
        .fold(Vec::new(), |groups, event| absorb(groups, event, threshold))
}

/// One grouping step: join the first group whose current anchor is closer
/// than `threshold`, or open a new group.
///
/// Joining moves the anchor to the mean of the old anchor and the new event,
/// so a long chain of merges can drift the anchor away from its seed and
/// later events are compared against the drifted value.
pub fn absorb(mut groups: Vec<EventGroup>, event: PositionedEvent, threshold: f64) -> Vec<EventGroup> {
    match groups
        .iter_mut()
        .find(|group| (group.position - event.position).abs() < threshold)
    {
        Some(group) => {
            group.members.push(event);
            group.position = (group.position + event.position) / 2.0;
        }
        None => groups.push(EventGroup::seed(event)),
    }
    groups
}
