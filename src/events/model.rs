use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::foundation::error::{SoleilError, SoleilResult};

const DONKI_BASE_URL: &str = "https://api.nasa.gov/DONKI";

/// Space-weather event categories, serialized as their DONKI codes.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum EventKind {
    /// Coronal mass ejection.
    Cme,
    /// Solar flare.
    Flr,
    /// Geomagnetic storm.
    Gst,
    /// Interplanetary shock.
    Ips,
    /// Magnetopause crossing.
    Mpc,
}

impl EventKind {
    pub const ALL: [EventKind; 5] = [Self::Cme, Self::Flr, Self::Gst, Self::Ips, Self::Mpc];

    pub fn code(self) -> &'static str {
        match self {
            Self::Cme => "CME",
            Self::Flr => "FLR",
            Self::Gst => "GST",
            Self::Ips => "IPS",
            Self::Mpc => "MPC",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Cme => "Coronal Mass Ejection",
            Self::Flr => "Solar Flare",
            Self::Gst => "Geomagnetic Storm",
            Self::Ips => "Interplanetary Shock",
            Self::Mpc => "Magnetopause Crossing",
        }
    }

    /// Page API route returning the latest event of this kind.
    pub fn api_path(self) -> &'static str {
        match self {
            Self::Cme => "/api/events/getcme",
            Self::Flr => "/api/events/getflr",
            Self::Gst => "/api/events/getgst",
            Self::Ips => "/api/events/getips",
            Self::Mpc => "/api/events/getmpc",
        }
    }

    /// Upstream DONKI feed for this kind.
    pub fn donki_url(self) -> String {
        format!("{DONKI_BASE_URL}/{}", self.code())
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for EventKind {
    type Err = SoleilError;

    fn from_str(s: &str) -> SoleilResult<Self> {
        Self::ALL
            .into_iter()
            .find(|k| k.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SoleilError::config(format!("unknown event kind '{s}'")))
    }
}

/// Route for one page of the mixed, newest-first event feed.
pub fn page_api_path(page: usize) -> String {
    format!("/api/events/paginate5?page={page}")
}

/// One event as served by the API. Fields not modelled here are kept in `extra`.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpaceWeatherEvent {
    #[serde(rename = "eventType", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<EventKind>,

    #[serde(rename = "flrID", default, skip_serializing_if = "Option::is_none")]
    pub flr_id: Option<String>,
    #[serde(rename = "activityID", default, skip_serializing_if = "Option::is_none")]
    pub activity_id: Option<String>,
    #[serde(rename = "gstID", default, skip_serializing_if = "Option::is_none")]
    pub gst_id: Option<String>,
    #[serde(rename = "eventID", default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
    #[serde(rename = "mpcID", default, skip_serializing_if = "Option::is_none")]
    pub mpc_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub begin_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub peak_time: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_region_num: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

fn present(v: &Option<String>) -> Option<&str> {
    v.as_deref().filter(|s| !s.trim().is_empty())
}

impl SpaceWeatherEvent {
    pub fn with_kind(mut self, kind: EventKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// The event's own time field; the name differs per kind.
    pub fn time_str(&self) -> Option<&str> {
        present(&self.begin_time)
            .or_else(|| present(&self.start_time))
            .or_else(|| present(&self.event_time))
    }

    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.time_str().and_then(parse_event_time)
    }

    /// Best available identifier: the kind-specific id, then the link, then the timestamp.
    pub fn unique_id(&self) -> String {
        let ids = [
            &self.flr_id,
            &self.activity_id,
            &self.gst_id,
            &self.event_id,
            &self.id,
            &self.mpc_id,
        ];
        if let Some(id) = ids.into_iter().find_map(present) {
            return id.to_string();
        }
        if let Some(link) = present(&self.link) {
            return link.to_string();
        }
        match self.timestamp() {
            Some(t) => format!("unknown-{}", t.format("%Y-%m-%dT%H:%M:%S")),
            None => "unknown-0001-01-01T00:00:00".to_string(),
        }
    }

    /// `<KIND>::<unique id>`, unique across kinds.
    pub fn document_id(&self) -> String {
        let kind = self.kind.map_or("UNKNOWN", EventKind::code);
        format!("{kind}::{}", self.unique_id())
    }
}

/// Parses DONKI timestamps: RFC 3339, or minute/second precision with an optional `Z`.
pub fn parse_event_time(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(t) = DateTime::parse_from_rfc3339(s) {
        return Some(t.with_timezone(&Utc));
    }
    if let Ok(t) = DateTime::parse_from_str(s, "%Y-%m-%dT%H:%M%:z") {
        return Some(t.with_timezone(&Utc));
    }
    let naive = s.strip_suffix('Z').unwrap_or(s);
    ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"]
        .into_iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(naive, fmt).ok())
        .map(|t| t.and_utc())
}

#[cfg(test)]
#[path = "../../tests/unit/events/model.rs"]
mod tests;
