//! The reconciliation engine
//!
//! It owns the browsing collection and the editing session, opens and closes
//! the edit dialog, merges form input back into the right record, and keeps
//! the in-memory collections consistent with the store after every confirmed
//! save, without a full refetch.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::error::Error;
use crate::event::{iso_date, EventId};
use crate::project::{Project, ProjectId};
use crate::session::EditSession;
use crate::status::Status;
use crate::traits::RecordSource;

/// Form values harvested from the edit surface, keyed by wire field name
/// (`"Title"`, `"Description"`, `"Status"`, `"Start"`, `"End"`)
pub type FormValues = BTreeMap<String, String>;

/// Everything a user can do on the rendered surface.
///
/// [`render::bindings`](crate::render::bindings) derives these from state;
/// the host feeds them back through [`ProjectBoard::dispatch`].
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    OpenProject(ProjectId),
    CloseDialog,
    SaveProject,
    BeginEventEdit(EventId),
    CancelEventEdit,
    SaveEvent(EventId),
}

/// The engine that ties a record source to the editing session.
///
/// All mutating operations are strictly sequential: there is one board, one
/// session, and no operation is issued while a previous save for the same
/// dialog is still awaited. The only concurrency is the pair of independent
/// read fetches in [`ProjectBoard::open`].
pub struct ProjectBoard<S: RecordSource> {
    source: S,
    /// The browsing collection: fetched on init, patched element-wise on save
    projects: Vec<Project>,
    session: EditSession,
}

impl<S: RecordSource> ProjectBoard<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            projects: Vec::new(),
            session: EditSession::new(),
        }
    }

    pub fn projects(&self) -> &[Project] { &self.projects }
    pub fn session(&self) -> &EditSession { &self.session }
    pub fn source(&self) -> &S { &self.source }

    /// Host-shell initialization hook: populate the browsing collection so
    /// the first render has cards to show.
    ///
    /// A fetch failure degrades to an empty collection (the surface simply
    /// shows no cards); the error is still returned for diagnostics.
    pub async fn init(&mut self) -> Result<(), Error> {
        match self.source.list_projects().await {
            Ok(projects) => {
                self.projects = projects;
                Ok(())
            },
            Err(err) => {
                self.projects = Vec::new();
                Err(err)
            },
        }
    }

    /// Open the edit dialog for `project_id`.
    ///
    /// The project list and the child events are fetched concurrently, and
    /// both are awaited before any state is touched. The project must be
    /// found in the freshly fetched list (never in a cached copy); otherwise
    /// the open is aborted and no state changes. A failed child fetch
    /// degrades to an empty event collection instead of aborting.
    pub async fn open(&mut self, project_id: ProjectId) -> Result<(), Error> {
        let (projects, events) = tokio::join!(
            self.source.list_projects(),
            self.source.events_for_project(project_id),
        );

        let projects = projects?;
        let events = events.unwrap_or_else(|err| {
            log::warn!("Unable to fetch events for project {}: {}. Opening with an empty collection", project_id, err);
            Vec::new()
        });

        let project = match projects.iter().find(|p| p.id() == project_id) {
            Some(project) => project.clone(),
            None => return Err(Error::NotFound { kind: "project", id: project_id }),
        };

        log::debug!("Opening the edit dialog for project {} with {} events", project_id, events.len());
        self.session.open_project(project, events);
        Ok(())
    }

    /// Close the dialog, discarding any unsaved input. Safe to call when
    /// already closed.
    pub fn close(&mut self) {
        self.session.close();
    }

    /// Persist the project form, then patch the browsing collection and
    /// close the dialog.
    ///
    /// Local state is only touched after the store has confirmed the write:
    /// on any failure the dialog stays open and nothing is half-applied.
    pub async fn save_project(&mut self, values: &FormValues) -> Result<(), Error> {
        let current = self.session.project().ok_or(Error::DialogClosed)?;

        let title = required(values, "Title")?.to_string();
        // Description is optional and defaults to an empty string, never to an absent field
        let description = values.get("Description").cloned().unwrap_or_default();
        let status: Status = required(values, "Status")?.parse()?;

        let updated = Project::new(current.id(), title, description, status);
        self.source.update_project(&updated).await?;

        if let Some(slot) = self.projects.iter_mut().find(|p| p.id() == updated.id()) {
            *slot = updated;
        }
        self.session.close();
        Ok(())
    }

    /// Put one event row in edit mode. Only one row can be editable at a
    /// time; a previous row's edit state is silently replaced.
    pub fn begin_event_edit(&mut self, id: EventId) {
        self.session.begin_event_edit(id);
    }

    /// Leave row edit mode without persisting anything
    pub fn cancel_event_edit(&mut self) {
        self.session.end_event_edit();
    }

    /// Persist one event row, patch it in place and leave row edit mode.
    ///
    /// The form only ever overlays Title/Start/End/Status; the event's parent
    /// back-reference is preserved as fetched. On any failure the row stays
    /// in edit mode and no sibling is touched.
    pub async fn save_event(&mut self, id: EventId, values: &FormValues) -> Result<(), Error> {
        if self.session.is_open() == false {
            return Err(Error::DialogClosed);
        }

        let existing = match self.session.events().iter().find(|e| e.id() == id) {
            Some(event) => event.clone(),
            None => return Err(Error::NotFound { kind: "event", id }),
        };

        let title = required(values, "Title")?.to_string();
        let start = parse_date(values, "Start")?;
        let end = parse_date(values, "End")?;
        let status: Status = required(values, "Status")?.parse()?;

        let updated = existing.with_edits(title, start, end, status);
        self.source.update_event(&updated).await?;

        self.session.replace_event(updated);
        self.session.end_event_edit();
        Ok(())
    }

    /// The single entry point the host wires interaction bindings to.
    ///
    /// Every error is caught and logged here, so nothing ever propagates to
    /// the renderer: the board is always left in a consistent state and the
    /// host can re-render unconditionally after each call.
    pub async fn dispatch(&mut self, action: Action, values: &FormValues) {
        let result = match &action {
            Action::OpenProject(id) => self.open(*id).await,
            Action::CloseDialog => { self.close(); Ok(()) },
            Action::SaveProject => self.save_project(values).await,
            Action::BeginEventEdit(id) => { self.begin_event_edit(*id); Ok(()) },
            Action::CancelEventEdit => { self.cancel_event_edit(); Ok(()) },
            Action::SaveEvent(id) => self.save_event(*id, values).await,
        };

        if let Err(err) = result {
            log::error!("{:?} failed: {}", action, err);
        }
    }

    /// Render the current state as markup. See the [`render`](crate::render) module.
    pub fn render(&self) -> String {
        crate::render::render_page(&self.projects, &self.session)
    }

    /// The interaction bindings that go with [`Self::render`]'s output
    pub fn bindings(&self) -> Vec<crate::render::Binding> {
        crate::render::bindings(&self.projects, &self.session)
    }
}

fn required<'v>(values: &'v FormValues, field: &'static str) -> Result<&'v str, Error> {
    values.get(field).map(String::as_str).ok_or(Error::MissingField(field))
}

fn parse_date(values: &FormValues, field: &'static str) -> Result<NaiveDate, Error> {
    let text = required(values, field)?;
    iso_date::parse(text).ok_or_else(|| Error::InvalidDate { field, value: text.to_string() })
}
