use std::fmt;

use crate::events::model::{EventKind, SpaceWeatherEvent};

const MISSING: &str = "N/A";

/// Text rendering of one event, as shown in the page's event grid.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct EventCard {
    pub title: String,
    pub lines: Vec<(&'static str, String)>,
}

impl EventCard {
    pub fn for_event(event: &SpaceWeatherEvent) -> Self {
        let title = match event.kind {
            Some(kind) => format!("{} ({})", kind.title(), kind.code()),
            None => "Unknown Event".to_string(),
        };
        let field = |v: &Option<String>| or_missing(v, MISSING);

        let time = event.time_str().unwrap_or(MISSING).to_string();
        let detail = match event.kind {
            Some(EventKind::Cme) => ("Source", field(&event.source_location)),
            Some(EventKind::Flr) => ("Class", field(&event.class_type)),
            Some(EventKind::Ips) => ("Location", field(&event.location)),
            Some(EventKind::Gst | EventKind::Mpc) | None => ("Link", field(&event.link)),
        };

        Self {
            title,
            lines: vec![("Time", time), detail],
        }
    }

    /// Full per-kind record: id, times, location fields, notes and link.
    pub fn detailed(event: &SpaceWeatherEvent) -> Self {
        let title = event
            .kind
            .map_or("Unknown Event", EventKind::title)
            .to_uppercase();
        let field = |v: &Option<String>| or_missing(v, MISSING);
        let id = |v: &Option<String>| ("ID", field(v));

        let lines = match event.kind {
            Some(EventKind::Flr) => vec![
                id(&event.flr_id),
                ("Class", or_missing(&event.class_type, "Unknown")),
                ("Begin Time", field(&event.begin_time)),
                ("Peak Time", field(&event.peak_time)),
                ("Source Location", field(&event.source_location)),
                (
                    "Active Region",
                    event
                        .active_region_num
                        .map_or_else(|| MISSING.to_string(), |n| n.to_string()),
                ),
                ("Link", field(&event.link)),
            ],
            Some(EventKind::Cme) => vec![
                id(&event.activity_id),
                ("Start Time", field(&event.start_time)),
                ("Source Location", field(&event.source_location)),
                ("Note", field(&event.note)),
                ("Link", field(&event.link)),
            ],
            Some(EventKind::Gst) => vec![
                id(&event.gst_id),
                ("Start Time", field(&event.start_time)),
                ("Link", field(&event.link)),
            ],
            Some(EventKind::Ips) => vec![
                id(&event.activity_id),
                ("Start Time", field(&event.event_time)),
                ("Location", field(&event.location)),
                ("Catalog", field(&event.catalog)),
                ("Link", field(&event.link)),
            ],
            Some(EventKind::Mpc) => vec![
                id(&event.mpc_id),
                ("Event Time", field(&event.event_time)),
                ("Link", field(&event.link)),
            ],
            None => vec![
                ("ID", event.unique_id()),
                ("Time", event.time_str().unwrap_or(MISSING).to_string()),
                ("Link", field(&event.link)),
            ],
        };
        Self { title, lines }
    }
}

fn or_missing(v: &Option<String>, fallback: &str) -> String {
    v.as_deref()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(fallback)
        .to_string()
}

impl fmt::Display for EventCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        for (label, value) in &self.lines {
            writeln!(f, "{label}: {value}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/events/card.rs"]
mod tests;
