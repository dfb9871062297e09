use crate::config::PopupConfig;
use crate::ir::{Event, EventDate};

/// Anchors the popup by its bottom edge, so `top` is where that edge sits.
pub const POPUP_TRANSFORM: &str = "translateY(-100%)";

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn center_x(&self) -> f64 {
        self.left + self.width / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PopupPlacement {
    pub left: f64,
    pub top: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupContent {
    pub date: String,
    pub title: String,
    pub description: String,
}

impl PopupContent {
    pub fn for_event(event: &Event) -> Self {
        Self {
            date: format_event_date(event),
            title: event.title.clone(),
            description: event.description.clone(),
        }
    }
}

/// `"Jun 2015 - Sep 2017"` for ranges, `"15 Jan 2020"` for single days.
pub fn format_event_date(event: &Event) -> String {
    match event.date {
        EventDate::Single(at) => at.format("%-d %b %Y").to_string(),
        EventDate::Range {
            start,
            end: Some(end),
        } => format!("{} - {}", start.format("%b %Y"), end.format("%b %Y")),
        EventDate::Range { start, end: None } => format!("{} - Present", start.format("%b %Y")),
    }
}

/// Centers the popup over the marker, keeping `edge_margin` clear of both
/// viewport edges. When the viewport is too narrow for both, the left margin
/// wins so the popup never starts off-screen.
pub fn place_popup(marker: Rect, viewport_width: f64, popup: &PopupConfig) -> PopupPlacement {
    let centered = marker.center_x() - popup.width / 2.0;
    let right_limit = viewport_width - popup.width - popup.edge_margin;
    PopupPlacement {
        left: centered.min(right_limit).max(popup.edge_margin),
        top: marker.top - popup.anchor_gap,
    }
}

/// The single popup: hidden, or showing one event at one placement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PopupState {
    pub visible: bool,
    pub content: Option<PopupContent>,
    pub placement: Option<PopupPlacement>,
}

impl PopupState {
    pub fn show(&mut self, content: PopupContent, placement: PopupPlacement) {
        self.visible = true;
        self.content = Some(content);
        self.placement = Some(placement);
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }
}
