use chrono::NaiveDate;

#[derive(Debug, Clone)]
pub struct TextBlock {
    pub lines: Vec<String>,
    pub width: f32,
    pub height: f32,
}

/// An event with its mapped horizontal coordinate (percent of the axis).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionedEvent {
    /// Index into `Timeline::events`.
    pub event: usize,
    pub days_ago: i64,
    pub position: f64,
}

/// Events drawn at a single x coordinate. `members` keeps insertion order,
/// which is date order.
#[derive(Debug, Clone, PartialEq)]
pub struct EventGroup {
    pub position: f64,
    pub members: Vec<PositionedEvent>,
}

impl EventGroup {
    pub fn seed(event: PositionedEvent) -> Self {
        Self {
            position: event.position,
            members: vec![event],
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerLayout {
    pub event: usize,
    pub group: usize,
    /// Position of the event inside its group.
    pub slot: usize,
    /// Final group position, percent of the axis.
    pub x: f64,
    /// Pixels from the axis centerline; negative is above.
    pub offset: f64,
    /// Set on the first member of a multi-event group.
    pub stacked_count: Option<usize>,
    pub is_range: bool,
    pub color: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YearTick {
    pub year: i32,
    pub position: f64,
}

#[derive(Debug, Clone)]
pub struct LegendItem {
    pub key: String,
    pub color: String,
    pub label: TextBlock,
    pub x: f32,
}

#[derive(Debug, Clone)]
pub struct LegendLayout {
    pub items: Vec<LegendItem>,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone)]
pub struct TimelineLayout {
    pub reference_date: NaiveDate,
    pub max_days: i64,
    pub groups: Vec<EventGroup>,
    pub markers: Vec<MarkerLayout>,
    pub years: Vec<YearTick>,
    pub legend: Option<LegendLayout>,
}

impl TimelineLayout {
    pub fn marker_for_event(&self, event: usize) -> Option<&MarkerLayout> {
        self.markers.iter().find(|marker| marker.event == event)
    }

    pub fn stacked_groups(&self) -> usize {
        self.groups.iter().filter(|group| group.len() > 1).count()
    }
}
