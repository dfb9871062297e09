use crate::error::{Result, TimelineError};
use crate::ir::{Category, Event, EventDate, Instant, Timeline};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::collections::BTreeMap;

static PARTIAL_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})(?:-(\d{1,2}))?$").unwrap());

#[derive(Debug, Deserialize)]
struct TimelineFile {
    #[serde(default)]
    events: Vec<EventRecord>,
    #[serde(default)]
    categories: BTreeMap<String, CategoryRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventRecord {
    title: String,
    #[serde(default)]
    description: String,
    category: String,
    date: Option<String>,
    start_date: Option<String>,
    end_date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CategoryRecord {
    color: String,
}

/// Parses and validates a timeline document.
///
/// Validation runs over the whole document before anything is returned, so a
/// dataset either loads completely or not at all. Unknown category keys are
/// rejected here instead of surfacing later as a missing color.
pub fn parse_timeline(input: &str) -> Result<Timeline> {
    let file: TimelineFile = serde_json::from_str(input)?;

    let categories: BTreeMap<String, Category> = file
        .categories
        .into_iter()
        .map(|(key, record)| {
            let category = Category {
                key: key.clone(),
                color: record.color,
            };
            (key, category)
        })
        .collect();

    let mut events = Vec::with_capacity(file.events.len());
    for record in file.events {
        if !categories.contains_key(&record.category) {
            return Err(TimelineError::UnknownCategory {
                title: record.title,
                category: record.category,
            });
        }
        events.push(build_event(record)?);
    }

    debug!(
        "parsed timeline: {} events, {} categories",
        events.len(),
        categories.len()
    );

    Ok(Timeline { events, categories })
}

fn build_event(record: EventRecord) -> Result<Event> {
    let date = non_empty(record.date.as_deref());
    let start = non_empty(record.start_date.as_deref());
    let end = non_empty(record.end_date.as_deref());

    let parse = |field: &'static str, value: &str| {
        parse_date(value).ok_or_else(|| TimelineError::InvalidDate {
            title: record.title.clone(),
            field,
            value: value.to_string(),
        })
    };

    let when = match (date, start, end) {
        (Some(_), Some(_), _) | (Some(_), _, Some(_)) => {
            return Err(TimelineError::ConflictingDates {
                title: record.title,
            });
        }
        (Some(date), None, None) => EventDate::Single(parse("date", date)?),
        (None, Some(start), end) => {
            let start = parse("startDate", start)?;
            let end = end.map(|value| parse("endDate", value)).transpose()?;
            if let Some(end) = end
                && end < start
            {
                return Err(TimelineError::EndBeforeStart {
                    title: record.title,
                });
            }
            EventDate::Range { start, end }
        }
        (None, None, Some(_)) => {
            return Err(TimelineError::EndWithoutStart {
                title: record.title,
            });
        }
        (None, None, None) => {
            return Err(TimelineError::MissingDate {
                title: record.title,
            });
        }
    };

    Ok(Event {
        title: record.title,
        description: record.description,
        category: record.category,
        date: when,
    })
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

/// Parses the ISO-8601 shapes found in timeline documents. Everything is
/// interpreted as UTC; offsets on full datetimes are honored.
pub fn parse_date(value: &str) -> Option<Instant> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt.and_utc());
        }
    }
    let caps = PARTIAL_DATE_RE.captures(value)?;
    let year: i32 = caps.get(1)?.as_str().parse().ok()?;
    let month: u32 = match caps.get(2) {
        Some(month) => month.as_str().parse().ok()?,
        None => 1,
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    fn doc(events: &str) -> String {
        format!(
            r##"{{"events": [{events}], "categories": {{"work": {{"color": "#4f8cff"}}, "study": {{"color": "#ffb347"}}}}}}"##
        )
    }

    #[test]
    fn parses_single_and_range_events() {
        let input = doc(
            r#"{"title": "Started", "description": "First job", "category": "work", "date": "2020-01-15"},
               {"title": "Degree", "description": "BSc", "category": "study", "startDate": "2015-06-01", "endDate": "2017-09-01"}"#,
        );
        let timeline = parse_timeline(&input).unwrap();
        assert_eq!(timeline.events.len(), 2);
        assert!(!timeline.events[0].is_range());
        assert!(timeline.events[1].is_range());
        assert_eq!(timeline.events[1].effective_date().year(), 2015);
        assert_eq!(timeline.categories.len(), 2);
    }

    #[test]
    fn open_range_is_positioned_by_start() {
        let input = doc(
            r#"{"title": "Now", "description": "", "category": "work", "startDate": "2024-03-01"}"#,
        );
        let timeline = parse_timeline(&input).unwrap();
        let event = &timeline.events[0];
        assert!(!event.is_range());
        assert_eq!(event.effective_date().month(), 3);
    }

    #[test]
    fn rejects_unknown_category() {
        let input = doc(
            r#"{"title": "Mystery", "description": "", "category": "hobby", "date": "2020-01-01"}"#,
        );
        let err = parse_timeline(&input).unwrap_err();
        assert!(matches!(err, TimelineError::UnknownCategory { ref category, .. } if category == "hobby"));
        assert!(err.to_string().contains("unknown category"));
    }

    #[test]
    fn rejects_inverted_range() {
        let input = doc(
            r#"{"title": "Backwards", "description": "", "category": "work", "startDate": "2019-01-01", "endDate": "2018-01-01"}"#,
        );
        assert!(matches!(
            parse_timeline(&input),
            Err(TimelineError::EndBeforeStart { .. })
        ));
    }

    #[test]
    fn rejects_missing_and_conflicting_dates() {
        let missing = doc(r#"{"title": "Nothing", "description": "", "category": "work"}"#);
        assert!(matches!(
            parse_timeline(&missing),
            Err(TimelineError::MissingDate { .. })
        ));

        let both = doc(
            r#"{"title": "Both", "description": "", "category": "work", "date": "2020-01-01", "startDate": "2019-01-01"}"#,
        );
        assert!(matches!(
            parse_timeline(&both),
            Err(TimelineError::ConflictingDates { .. })
        ));

        let dangling = doc(
            r#"{"title": "End", "description": "", "category": "work", "endDate": "2019-01-01"}"#,
        );
        assert!(matches!(
            parse_timeline(&dangling),
            Err(TimelineError::EndWithoutStart { .. })
        ));
    }

    #[test]
    fn rejects_garbage_dates_and_json() {
        let input = doc(
            r#"{"title": "Bad", "description": "", "category": "work", "date": "sometime"}"#,
        );
        assert!(matches!(
            parse_timeline(&input),
            Err(TimelineError::InvalidDate { field: "date", .. })
        ));
        assert!(matches!(parse_timeline("<html>"), Err(TimelineError::Json(_))));
    }

    #[test]
    fn empty_strings_count_as_absent() {
        let input = doc(
            r#"{"title": "Blank", "description": "", "category": "work", "date": "", "startDate": "2021-02-03"}"#,
        );
        let timeline = parse_timeline(&input).unwrap();
        assert!(matches!(timeline.events[0].date, EventDate::Range { end: None, .. }));
    }

    #[test]
    fn parse_date_accepts_iso_shapes() {
        let day = parse_date("2020-01-15").unwrap();
        assert_eq!((day.year(), day.month(), day.day()), (2020, 1, 15));

        let stamped = parse_date("2020-01-15T23:30:00+02:00").unwrap();
        assert_eq!((stamped.day(), stamped.hour()), (15, 21));

        let month = parse_date("2020-05").unwrap();
        assert_eq!((month.month(), month.day()), (5, 1));

        let year = parse_date("1999").unwrap();
        assert_eq!((year.year(), year.month()), (1999, 1));

        assert!(parse_date("2020-13").is_none());
        assert!(parse_date("yesterday").is_none());
    }
}
