//! Child records ("events"), each owned by exactly one project

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::project::ProjectId;
use crate::status::Status;

/// The server-assigned, stable identifier of an event
pub type EventId = i64;

/// The parent back-reference carried by every event: the owning project's id
/// and a snapshot of its title at fetch time
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectRef {
    #[serde(rename = "Id")]
    pub id: ProjectId,
    #[serde(rename = "Title")]
    pub title: String,
}

/// A dated record owned by exactly one [`Project`](crate::Project).
///
/// Events are fetched fresh (filtered by parent id, ordered by start date)
/// every time a project's edit dialog opens, and patched one at a time
/// through the per-event save path.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "ID")]
    id: EventId,
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Start", with = "iso_date")]
    start: NaiveDate,
    #[serde(rename = "End", with = "iso_date")]
    end: NaiveDate,
    #[serde(rename = "Status")]
    status: Status,
    /// Invariant: the id in here equals the project whose children were requested
    #[serde(rename = "Project")]
    project: ProjectRef,
}

impl Event {
    pub fn new<S: ToString>(id: EventId, title: S, start: NaiveDate, end: NaiveDate,
                            status: Status, project: ProjectRef) -> Self {
        Self {
            id,
            title: title.to_string(),
            start,
            end,
            status,
            project,
        }
    }

    pub fn id(&self) -> EventId { self.id }
    pub fn title(&self) -> &str { &self.title }
    pub fn start(&self) -> NaiveDate { self.start }
    pub fn end(&self) -> NaiveDate { self.end }
    pub fn status(&self) -> Status { self.status }
    pub fn project(&self) -> &ProjectRef { &self.project }

    /// Overlay the editable fields onto this event, keeping its identity and
    /// its parent back-reference untouched
    pub fn with_edits(&self, title: String, start: NaiveDate, end: NaiveDate, status: Status) -> Event {
        Event {
            id: self.id,
            title,
            start,
            end,
            status,
            project: self.project.clone(),
        }
    }
}

/// (De)serialization of the `Start`/`End` wire fields.
///
/// Stores send either a bare ISO date or a full datetime; only the date part
/// is kept. Serialization always writes the bare date.
pub mod iso_date {
    use chrono::NaiveDate;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format("%Y-%m-%d").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let text = String::deserialize(deserializer)?;
        parse(&text).ok_or_else(|| D::Error::custom(format!("invalid date {:?}", text)))
    }

    /// Accepts `2024-05-01` as well as `2024-05-01T09:30:00Z`
    pub fn parse(text: &str) -> Option<NaiveDate> {
        let date_part = text.split('T').next().unwrap_or(text);
        NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn decodes_dates_and_datetimes() {
        let decoded: Event = serde_json::from_str(r#"{
            "ID": 12,
            "Title": "Kick-off",
            "Start": "2024-03-01T09:00:00Z",
            "End": "2024-03-02",
            "Status": "Completed",
            "Project": {"Id": 1, "Title": "Warehouse move"}
        }"#).unwrap();

        assert_eq!(decoded.start(), date(2024, 3, 1));
        assert_eq!(decoded.end(), date(2024, 3, 2));
        assert_eq!(decoded.project().id, 1);
    }

    #[test]
    fn serializes_bare_iso_dates() {
        let event = Event::new(12, "Kick-off", date(2024, 3, 1), date(2024, 3, 2),
                               Status::Completed, ProjectRef { id: 1, title: "Warehouse move".to_string() });
        let encoded = serde_json::to_value(&event).unwrap();
        assert_eq!(encoded["Start"], "2024-03-01");
        assert_eq!(encoded["End"], "2024-03-02");
        assert_eq!(encoded["Project"]["Id"], 1);
    }

    #[test]
    fn rejects_garbage_dates() {
        assert_eq!(iso_date::parse("yesterday"), None);
        assert_eq!(iso_date::parse("2024-13-01"), None);
        assert_eq!(iso_date::parse("2024-03-01"), Some(date(2024, 3, 1)));
    }

    #[test]
    fn edits_preserve_identity_and_parent() {
        let event = Event::new(7, "Kick-off", date(2024, 3, 1), date(2024, 3, 2),
                               Status::NotStarted, ProjectRef { id: 1, title: "Warehouse move".to_string() });
        let edited = event.with_edits("Kick-off (moved)".to_string(), date(2024, 3, 8), date(2024, 3, 9), Status::InProgress);

        assert_eq!(edited.id(), 7);
        assert_eq!(edited.project(), event.project());
        assert_eq!(edited.title(), "Kick-off (moved)");
    }
}
