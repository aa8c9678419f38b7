//! This module provides ways to tweak a mocked record source, so that it can
//! return errors on some tests

use crate::error::Error;

/// This stores some behaviour tweaks, that describe how a mocked source will
/// behave during a given test
///
/// So that a function fails _n_ times after _m_ initial successes, set
/// `(m, n)` for the suited parameter
#[derive(Default, Clone, Debug)]
pub struct MockBehaviour {
    /// If this is true, every action will be allowed
    pub is_suspended: bool,

    pub list_projects_behaviour: (u32, u32),
    pub events_for_project_behaviour: (u32, u32),
    pub update_project_behaviour: (u32, u32),
    pub update_event_behaviour: (u32, u32),
}

impl MockBehaviour {
    pub fn new() -> Self {
        Self::default()
    }

    /// All operations will fail at once, for `n_fails` times
    pub fn fail_now(n_fails: u32) -> Self {
        Self {
            is_suspended: false,
            list_projects_behaviour: (0, n_fails),
            events_for_project_behaviour: (0, n_fails),
            update_project_behaviour: (0, n_fails),
            update_event_behaviour: (0, n_fails),
        }
    }

    /// Suspend this mock behaviour until you call `resume`
    pub fn suspend(&mut self) {
        self.is_suspended = true;
    }
    /// Make this behaviour active again
    pub fn resume(&mut self) {
        self.is_suspended = false;
    }

    pub fn can_list_projects(&mut self) -> Result<(), Error> {
        if self.is_suspended { return Ok(()) }
        decrement(&mut self.list_projects_behaviour, "list_projects")
    }
    pub fn can_list_events(&mut self) -> Result<(), Error> {
        if self.is_suspended { return Ok(()) }
        decrement(&mut self.events_for_project_behaviour, "events_for_project")
    }
    pub fn can_update_project(&mut self) -> Result<(), Error> {
        if self.is_suspended { return Ok(()) }
        decrement(&mut self.update_project_behaviour, "update_project")
    }
    pub fn can_update_event(&mut self) -> Result<(), Error> {
        if self.is_suspended { return Ok(()) }
        decrement(&mut self.update_event_behaviour, "update_event")
    }
}

/// Return Ok(()) in case the value is `(1+, _)` or `(_, 0)`, or return Err
/// and decrement otherwise
fn decrement(value: &mut (u32, u32), descr: &str) -> Result<(), Error> {
    let remaining_successes = value.0;
    let remaining_failures = value.1;

    if remaining_successes > 0 {
        value.0 = value.0 - 1;
        log::debug!("Mock behaviour: allowing a {} ({:?})", descr, value);
        Ok(())
    } else {
        if remaining_failures > 0 {
            value.1 = value.1 - 1;
            log::debug!("Mock behaviour: failing a {} ({:?})", descr, value);
            Err(Error::Transport(reqwest::StatusCode::INTERNAL_SERVER_ERROR))
        } else {
            log::debug!("Mock behaviour: allowing a {} ({:?})", descr, value);
            Ok(())
        }
    }
}
