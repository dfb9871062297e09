use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

pub type Instant = DateTime<Utc>;

/// When an event happened: a single day, or a span that may still be ongoing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventDate {
    Single(Instant),
    Range {
        start: Instant,
        end: Option<Instant>,
    },
}

impl EventDate {
    /// The instant used for sorting and positioning.
    pub fn effective(&self) -> Instant {
        match self {
            EventDate::Single(at) => *at,
            EventDate::Range { start, .. } => *start,
        }
    }

    pub fn is_closed_range(&self) -> bool {
        matches!(self, EventDate::Range { end: Some(_), .. })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub title: String,
    pub description: String,
    pub category: String,
    pub date: EventDate,
}

impl Event {
    pub fn effective_date(&self) -> Instant {
        self.date.effective()
    }

    pub fn is_range(&self) -> bool {
        self.date.is_closed_range()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub key: String,
    pub color: String,
}

/// A loaded, validated dataset. Every event's category exists in `categories`.
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    pub events: Vec<Event>,
    pub categories: BTreeMap<String, Category>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(&self, key: &str) -> Option<&Category> {
        self.categories.get(key)
    }

    pub fn color_of(&self, event: &Event) -> &str {
        self.category(&event.category)
            .map(|category| category.color.as_str())
            .unwrap_or("currentColor")
    }

    pub fn oldest_date(&self) -> Option<Instant> {
        self.events.iter().map(Event::effective_date).min()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
