use crate::config::{LayoutConfig, PopupConfig};
use crate::error::{Result, TimelineError};
use crate::interaction::{POPUP_TRANSFORM, PopupContent, PopupState, place_popup};
use crate::ir::Timeline;
use crate::layout::{TimelineLayout, compute_layout};
use crate::parser::parse_timeline;
use crate::surface::Surface;
use crate::theme::Theme;
use log::{debug, error, info};
use std::path::PathBuf;

pub const TIMELINE_ID: &str = "horizontal-timeline";
pub const EVENTS_ID: &str = "timeline-events";
pub const YEARS_ID: &str = "timeline-years";
pub const POPUP_ID: &str = "timeline-popup";
pub const POPUP_DATE_ID: &str = "popup-date";
pub const POPUP_TITLE_ID: &str = "popup-title";
pub const POPUP_DESCRIPTION_ID: &str = "popup-description";

/// Where the timeline document comes from. Fetched exactly once per mount.
pub trait DataSource {
    fn fetch(&self) -> Result<String>;
}

impl<F> DataSource for F
where
    F: Fn() -> Result<String>,
{
    fn fetch(&self) -> Result<String> {
        self()
    }
}

#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DataSource for FileSource {
    fn fetch(&self) -> Result<String> {
        std::fs::read_to_string(&self.path)
            .map_err(|err| TimelineError::Fetch(format!("{}: {err}", self.path.display())))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Containers<N> {
    pub events: N,
    pub years: N,
    pub popup: PopupSlots<N>,
}

#[derive(Debug, Clone, Copy)]
pub struct PopupSlots<N> {
    pub root: N,
    pub date: N,
    pub title: N,
    pub description: N,
}

impl<N: Copy> Containers<N> {
    /// `None` when any element is missing: the page has no timeline.
    pub fn find<S: Surface<Node = N>>(surface: &S) -> Option<Self> {
        surface.element_by_id(TIMELINE_ID)?;
        Some(Self {
            events: surface.element_by_id(EVENTS_ID)?,
            years: surface.element_by_id(YEARS_ID)?,
            popup: PopupSlots {
                root: surface.element_by_id(POPUP_ID)?,
                date: surface.element_by_id(POPUP_DATE_ID)?,
                title: surface.element_by_id(POPUP_TITLE_ID)?,
                description: surface.element_by_id(POPUP_DESCRIPTION_ID)?,
            },
        })
    }
}

#[derive(Debug)]
pub enum MountOutcome<N> {
    /// Containers absent; nothing to do on this page.
    NotPresent,
    /// Data could not be fetched or validated. The error has been logged and
    /// no node was created.
    Aborted(TimelineError),
    Mounted(TimelineWidget<N>),
}

/// Finds the containers, fetches and validates the data, lays it out and
/// renders it into `surface`.
pub fn mount<S, D>(
    surface: &mut S,
    source: &D,
    theme: &Theme,
    config: &LayoutConfig,
) -> MountOutcome<S::Node>
where
    S: Surface,
    D: DataSource + ?Sized,
{
    let Some(containers) = Containers::find(surface) else {
        debug!("timeline containers not found; skipping");
        return MountOutcome::NotPresent;
    };

    let timeline = match source.fetch().and_then(|raw| parse_timeline(&raw)) {
        Ok(timeline) => timeline,
        Err(err) => {
            error!("failed to load timeline data: {err}");
            return MountOutcome::Aborted(err);
        }
    };

    let layout = compute_layout(&timeline, theme, config);
    let markers = render_into(surface, &containers, &timeline, &layout);
    info!(
        "timeline mounted: {} events, {} year markers",
        markers.len(),
        layout.years.len()
    );

    MountOutcome::Mounted(TimelineWidget {
        timeline,
        layout,
        popup: containers.popup,
        popup_config: config.popup,
        markers,
        state: PopupState::default(),
    })
}

/// Second pass: materializes a computed layout as nodes. Returns each event
/// marker node with the index of the event it shows.
pub fn render_into<S: Surface>(
    surface: &mut S,
    containers: &Containers<S::Node>,
    timeline: &Timeline,
    layout: &TimelineLayout,
) -> Vec<(S::Node, usize)> {
    let mut markers = Vec::with_capacity(layout.markers.len());
    for marker in &layout.markers {
        let node = surface.create_element("timeline-event");
        if marker.is_range {
            surface.add_class(node, "range");
        }
        surface.set_style(node, "left", &format!("{}%", marker.x));
        surface.set_style(node, "top", &format!("calc(50% + {}px)", marker.offset));
        if let Some(count) = marker.stacked_count {
            surface.add_class(node, "stacked");
            surface.set_attribute(node, "data-count", &count.to_string());
        }

        let dot = surface.create_element("event-dot");
        surface.set_style(dot, "background-color", &marker.color);
        surface.set_style(dot, "color", &marker.color);
        surface.append_child(node, dot);
        surface.set_attribute(node, "aria-label", &timeline.events[marker.event].title);

        surface.append_child(containers.events, node);
        markers.push((node, marker.event));
    }

    for tick in &layout.years {
        let node = surface.create_element("year-marker");
        surface.set_text(node, &tick.year.to_string());
        surface.set_style(node, "left", &format!("{}%", tick.position));
        surface.append_child(containers.years, node);
    }

    markers
}

/// A mounted timeline. Pointer handlers repopulate and move the one shared
/// popup; they can arrive in any order.
#[derive(Debug)]
pub struct TimelineWidget<N> {
    timeline: Timeline,
    layout: TimelineLayout,
    popup: PopupSlots<N>,
    popup_config: PopupConfig,
    markers: Vec<(N, usize)>,
    state: PopupState,
}

impl<N: Copy + Eq> TimelineWidget<N> {
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn layout(&self) -> &TimelineLayout {
        &self.layout
    }

    pub fn popup(&self) -> &PopupState {
        &self.state
    }

    pub fn marker_nodes(&self) -> impl Iterator<Item = (N, usize)> + '_ {
        self.markers.iter().copied()
    }

    pub fn event_at(&self, node: N) -> Option<usize> {
        self.markers
            .iter()
            .find(|(marker, _)| *marker == node)
            .map(|(_, event)| *event)
    }

    /// Returns `false` when `node` is not one of this timeline's markers.
    pub fn pointer_enter<S: Surface<Node = N>>(&mut self, surface: &mut S, node: N) -> bool {
        let Some(event) = self.event_at(node) else {
            return false;
        };
        let content = PopupContent::for_event(&self.timeline.events[event]);
        let placement = place_popup(
            surface.bounding_rect(node),
            surface.viewport_width(),
            &self.popup_config,
        );

        surface.set_text(self.popup.date, &content.date);
        surface.set_text(self.popup.title, &content.title);
        surface.set_text(self.popup.description, &content.description);
        surface.set_style(self.popup.root, "left", &format!("{}px", placement.left));
        surface.set_style(self.popup.root, "top", &format!("{}px", placement.top));
        surface.set_style(self.popup.root, "transform", POPUP_TRANSFORM);
        surface.add_class(self.popup.root, "active");

        self.state.show(content, placement);
        true
    }

    pub fn pointer_leave<S: Surface<Node = N>>(&mut self, surface: &mut S, node: N) -> bool {
        if self.event_at(node).is_none() {
            return false;
        }
        surface.remove_class(self.popup.root, "active");
        self.state.hide();
        true
    }
}
