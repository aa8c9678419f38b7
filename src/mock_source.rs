//! An in-memory record source, for tests and demos
//!
//! It holds both collections directly and mimics the remote store's merge
//! semantics, so the engine can be exercised without a server. Failure
//! injection goes through [`MockBehaviour`].

use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::Error;
use crate::event::{Event, EventId};
use crate::mock_behaviour::MockBehaviour;
use crate::project::{Project, ProjectId};
use crate::traits::RecordSource;

/// A record source whose collections live in memory
#[derive(Debug, Default)]
pub struct MockSource {
    projects: Vec<Project>,
    events: Vec<Event>,
    /// Interior mutability, because read operations also need to decrement
    /// the failure counters
    behaviour: Mutex<MockBehaviour>,
}

impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_behaviour(&self, behaviour: MockBehaviour) {
        *self.behaviour.lock().unwrap() = behaviour;
    }

    pub fn add_project(&mut self, project: Project) {
        self.projects.push(project);
    }

    pub fn add_event(&mut self, event: Event) {
        self.events.push(event);
    }

    /// What the store currently holds for this project, for assertions
    pub fn project(&self, id: ProjectId) -> Option<&Project> {
        self.projects.iter().find(|p| p.id() == id)
    }

    /// What the store currently holds for this event, for assertions
    pub fn event(&self, id: EventId) -> Option<&Event> {
        self.events.iter().find(|e| e.id() == id)
    }
}

#[async_trait]
impl RecordSource for MockSource {
    async fn list_projects(&self) -> Result<Vec<Project>, Error> {
        self.behaviour.lock().unwrap().can_list_projects()?;
        Ok(self.projects.clone())
    }

    async fn events_for_project(&self, project_id: ProjectId) -> Result<Vec<Event>, Error> {
        // Same fail-soft policy as the HTTP client
        if let Err(err) = self.behaviour.lock().unwrap().can_list_events() {
            log::warn!("Mocked event fetch for project {} failed ({}), degrading to an empty collection", project_id, err);
            return Ok(Vec::new());
        }

        let mut events: Vec<Event> = self.events.iter()
            .filter(|e| e.project().id == project_id)
            .cloned()
            .collect();
        events.sort_by_key(|e| e.start());
        Ok(events)
    }

    async fn update_project(&mut self, project: &Project) -> Result<(), Error> {
        self.behaviour.lock().unwrap().can_update_project()?;
        match self.projects.iter_mut().find(|p| p.id() == project.id()) {
            Some(slot) => {
                // The patch carries every editable field plus the id, so
                // replacing the record wholesale matches merge semantics here
                *slot = project.clone();
                Ok(())
            },
            None => Err(Error::Transport(reqwest::StatusCode::NOT_FOUND)),
        }
    }

    async fn update_event(&mut self, event: &Event) -> Result<(), Error> {
        self.behaviour.lock().unwrap().can_update_event()?;
        match self.events.iter_mut().find(|e| e.id() == event.id()) {
            Some(slot) => {
                *slot = event.clone();
                Ok(())
            },
            None => Err(Error::Transport(reqwest::StatusCode::NOT_FOUND)),
        }
    }
}
