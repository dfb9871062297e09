use crate::interaction::format_event_date;
use crate::ir::Timeline;
use crate::layout::TimelineLayout;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutDump {
    pub reference_date: String,
    pub max_days: i64,
    pub groups: Vec<GroupDump>,
    pub markers: Vec<MarkerDump>,
    pub years: Vec<YearDump>,
}

#[derive(Debug, Serialize)]
pub struct GroupDump {
    pub position: f64,
    pub members: Vec<usize>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerDump {
    pub event: usize,
    pub title: String,
    pub date_label: String,
    pub category: String,
    pub color: String,
    pub group: usize,
    pub left_percent: f64,
    pub offset_px: f64,
    pub raw_position: f64,
    pub days_ago: i64,
    pub stacked_count: Option<usize>,
    pub range: bool,
}

#[derive(Debug, Serialize)]
pub struct YearDump {
    pub year: i32,
    pub position: f64,
}

impl LayoutDump {
    pub fn from_layout(layout: &TimelineLayout, timeline: &Timeline) -> Self {
        let groups = layout
            .groups
            .iter()
            .map(|group| GroupDump {
                position: group.position,
                members: group.members.iter().map(|member| member.event).collect(),
            })
            .collect();

        let markers = layout
            .markers
            .iter()
            .map(|marker| {
                let event = &timeline.events[marker.event];
                let placed = layout.groups[marker.group].members[marker.slot];
                MarkerDump {
                    event: marker.event,
                    title: event.title.clone(),
                    date_label: format_event_date(event),
                    category: event.category.clone(),
                    color: marker.color.clone(),
                    group: marker.group,
                    left_percent: marker.x,
                    offset_px: marker.offset,
                    raw_position: placed.position,
                    days_ago: placed.days_ago,
                    stacked_count: marker.stacked_count,
                    range: marker.is_range,
                }
            })
            .collect();

        let years = layout
            .years
            .iter()
            .map(|tick| YearDump {
                year: tick.year,
                position: tick.position,
            })
            .collect();

        LayoutDump {
            reference_date: layout.reference_date.format("%Y-%m-%d").to_string(),
            max_days: layout.max_days,
            groups,
            markers,
            years,
        }
    }
}

pub fn layout_dump_json(layout: &TimelineLayout, timeline: &Timeline) -> anyhow::Result<String> {
    let dump = LayoutDump::from_layout(layout, timeline);
    Ok(serde_json::to_string_pretty(&dump)?)
}

pub fn write_layout_dump(path: &Path, layout: &TimelineLayout, timeline: &Timeline) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = LayoutDump::from_layout(layout, timeline);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}
