use async_trait::async_trait;

use crate::error::Error;
use crate::event::Event;
use crate::project::{Project, ProjectId};

/// A store holding the two parent-linked record collections.
///
/// The HTTP implementation is [`Client`](crate::client::Client); tests and
/// the demo binary use [`MockSource`](crate::mock_source::MockSource) instead.
/// Updates use merge semantics throughout: only the editable fields are sent,
/// everything else stays untouched server-side, and the overwrite is
/// unconditional (no concurrency token is checked, the last write wins).
#[async_trait]
pub trait RecordSource {
    /// Fetch every project, with this crate's fixed field projection.
    /// A non-success response is an error; a caller that can degrade to an
    /// empty collection is expected to do so itself, and to log the error.
    async fn list_projects(&self) -> Result<Vec<Project>, Error>;

    /// Fetch the events whose parent is `project_id`, ordered by start date
    /// ascending, with the parent reference expanded.
    ///
    /// This operation is fail-soft: a non-success response from the store
    /// yields an empty collection (and a logged warning) so a dialog can
    /// still open without its children. Failures to reach the store at all
    /// still surface as errors.
    async fn events_for_project(&self, project_id: ProjectId) -> Result<Vec<Event>, Error>;

    /// Persist the editable fields (Title/Description/Status) of `project`,
    /// keyed by its id
    async fn update_project(&mut self, project: &Project) -> Result<(), Error>;

    /// Persist the editable fields (Title/Start/End/Status) of `event`,
    /// keyed by its id
    async fn update_event(&mut self, event: &Event) -> Result<(), Error>;
}
