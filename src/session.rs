//! The session-scoped editing state
//!
//! At most one project dialog may be open, and at most one event row may be
//! in edit mode, at any time. These invariants are enforced here by the
//! mutators, not by caller discipline.

use crate::event::{Event, EventId};
use crate::project::Project;

/// The editing context of one dialog lifecycle.
///
/// The engine ([`ProjectBoard`](crate::board::ProjectBoard)) owns a single
/// instance of this for its whole life; opening and closing dialogs resets it
/// rather than replacing it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EditSession {
    /// The project currently open in the dialog, if any.
    ///
    /// This is a working copy: the browsing collection is only patched once
    /// the store has confirmed a save.
    project: Option<Project>,
    /// The children fetched when the dialog opened. Replaced wholesale on
    /// open, patched element-wise on save.
    events: Vec<Event>,
    /// The single event row currently in edit mode
    editing_event: Option<EventId>,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a dialog is currently open
    pub fn is_open(&self) -> bool {
        self.project.is_some()
    }

    pub fn project(&self) -> Option<&Project> {
        self.project.as_ref()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn editing_event(&self) -> Option<EventId> {
        self.editing_event
    }

    /// Open the dialog on a copy of `project`, replacing the child
    /// collection. Any edit state left over from a previously open dialog is
    /// discarded first.
    pub fn open_project(&mut self, project: Project, events: Vec<Event>) {
        self.project = Some(project);
        self.events = events;
        self.editing_event = None;
    }

    /// Reset to the closed state. Safe to call when already closed.
    pub fn close(&mut self) {
        self.project = None;
        self.events.clear();
        self.editing_event = None;
    }

    /// Mark one event row as editable. Beginning a new edit while another row
    /// is being edited silently replaces it: last writer wins.
    pub fn begin_event_edit(&mut self, id: EventId) {
        self.editing_event = Some(id);
    }

    /// Leave row edit mode without touching any record
    pub fn end_event_edit(&mut self) {
        self.editing_event = None;
    }

    /// Replace the event with the same id, leaving every sibling untouched
    pub(crate) fn replace_event(&mut self, updated: Event) {
        if let Some(slot) = self.events.iter_mut().find(|e| e.id() == updated.id()) {
            *slot = updated;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::ProjectRef;
    use crate::status::Status;
    use chrono::NaiveDate;

    fn some_project() -> Project {
        Project::new(1, "Warehouse move", "", Status::InProgress)
    }

    fn some_event(id: EventId) -> Event {
        let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        Event::new(id, "Kick-off", day, day, Status::NotStarted,
                   ProjectRef { id: 1, title: "Warehouse move".to_string() })
    }

    #[test]
    fn at_most_one_row_is_ever_editable() {
        let mut session = EditSession::new();
        session.open_project(some_project(), vec![some_event(7), some_event(8)]);

        session.begin_event_edit(7);
        assert_eq!(session.editing_event(), Some(7));
        session.begin_event_edit(8);
        assert_eq!(session.editing_event(), Some(8));
    }

    #[test]
    fn close_clears_everything_and_is_idempotent() {
        let mut session = EditSession::new();
        session.open_project(some_project(), vec![some_event(7)]);
        session.begin_event_edit(7);

        session.close();
        assert_eq!(session, EditSession::new());

        session.close();
        assert_eq!(session, EditSession::new());
    }

    #[test]
    fn reopening_discards_stale_edit_state() {
        let mut session = EditSession::new();
        session.open_project(some_project(), vec![some_event(7)]);
        session.begin_event_edit(7);

        session.open_project(some_project(), vec![some_event(8)]);
        assert_eq!(session.editing_event(), None);
        assert_eq!(session.events().len(), 1);
        assert_eq!(session.events()[0].id(), 8);
    }
}
