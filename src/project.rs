//! Parent records ("projects")

use serde::{Deserialize, Deserializer, Serialize};

use crate::status::Status;

/// The server-assigned, stable identifier of a project
pub type ProjectId = i64;

/// A top-level editable record.
///
/// Projects are created externally; this crate only ever fetches them and
/// patches their Title/Description/Status through the save path.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(rename = "ID")]
    id: ProjectId,
    #[serde(rename = "Title")]
    title: String,
    /// Optional on the server. An absent or `null` description decodes to an
    /// empty string, so it stays present through a save round trip.
    #[serde(rename = "Description", default, deserialize_with = "null_as_empty")]
    description: String,
    #[serde(rename = "Status")]
    status: Status,
}

impl Project {
    pub fn new<S: ToString, T: ToString>(id: ProjectId, title: S, description: T, status: Status) -> Self {
        Self {
            id,
            title: title.to_string(),
            description: description.to_string(),
            status,
        }
    }

    pub fn id(&self) -> ProjectId { self.id }
    pub fn title(&self) -> &str { &self.title }
    pub fn description(&self) -> &str { &self.description }
    pub fn status(&self) -> Status { self.status }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_description_decodes_to_empty_string() {
        let decoded: Project = serde_json::from_str(
            r#"{"ID": 3, "Title": "Audit", "Description": null, "Status": "Not Started"}"#,
        ).unwrap();
        assert_eq!(decoded.description(), "");

        let absent: Project = serde_json::from_str(
            r#"{"ID": 3, "Title": "Audit", "Status": "Not Started"}"#,
        ).unwrap();
        assert_eq!(absent, decoded);
    }

    #[test]
    fn wire_field_names() {
        let project = Project::new(7, "Roof repair", "Fix the east wing", Status::InProgress);
        let encoded = serde_json::to_value(&project).unwrap();
        assert_eq!(encoded["ID"], 7);
        assert_eq!(encoded["Title"], "Roof repair");
        assert_eq!(encoded["Description"], "Fix the east wing");
        assert_eq!(encoded["Status"], "In Progress");
    }
}
