//! The progress status shared by projects and events

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// The progress status of a project or an event.
///
/// On the wire this is one of the literal strings `"Not Started"`,
/// `"In Progress"` or `"Completed"`. The enumeration is closed: any other
/// value is rejected when a response is decoded, instead of being carried
/// around as an opaque string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "Not Started")]
    NotStarted,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Completed")]
    Completed,
}

impl Status {
    /// Every status, in the order the edit surface lists them
    pub const ALL: [Status; 3] = [Status::NotStarted, Status::InProgress, Status::Completed];

    /// The literal string this status has on the wire
    pub fn as_wire_str(&self) -> &'static str {
        match self {
            Status::NotStarted => "Not Started",
            Status::InProgress => "In Progress",
            Status::Completed => "Completed",
        }
    }

    /// The badge class the renderer puts on rows with this status
    pub fn css_class(&self) -> &'static str {
        match self {
            Status::NotStarted => "status-not-started",
            Status::InProgress => "status-in-progress",
            Status::Completed => "status-completed",
        }
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.as_wire_str())
    }
}

impl FromStr for Status {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Not Started" => Ok(Status::NotStarted),
            "In Progress" => Ok(Status::InProgress),
            "Completed" => Ok(Status::Completed),
            other => Err(Error::UnrecognizedStatus(other.to_string())),
        }
    }
}
