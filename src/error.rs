//! The failure taxonomy of this crate
//!
//! Every operation reports its failures through [`Error`]. None of these are
//! fatal: the engine catches them at its dispatch boundary, logs them, and
//! leaves the editing state in the last consistent configuration.

/// A failure hit by a record store call or an editing operation
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The record store answered with a non-success HTTP status
    #[error("record store answered with HTTP status {0}")]
    Transport(reqwest::StatusCode),

    /// The record store could not be reached at all
    #[error("unable to reach the record store: {0}")]
    Request(#[from] reqwest::Error),

    /// A response body could not be decoded into records
    #[error("unable to decode the {collection} response: {source}")]
    Decode {
        collection: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// A referenced record is absent from the freshly fetched data
    #[error("no {kind} with id {id} in the freshly fetched data")]
    NotFound { kind: &'static str, id: i64 },

    /// A required form field was not submitted. The save is short-circuited
    /// before any network call is made.
    #[error("the {0:?} form field is missing")]
    MissingField(&'static str),

    /// A status string is not part of the closed enumeration
    #[error("unrecognized status value {0:?}")]
    UnrecognizedStatus(String),

    /// A submitted date is not ISO date or datetime text
    #[error("invalid {field} date {value:?}")]
    InvalidDate { field: &'static str, value: String },

    /// A save was attempted while no edit dialog is open
    #[error("no edit dialog is currently open")]
    DialogClosed,
}
