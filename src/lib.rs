//! This crate provides a way to browse and edit two parent-linked record
//! collections that live in a remote store: "projects", and the "events"
//! each project owns.
//!
//! It provides a record store client in the [`client`] module, that can be used as a stand-alone module.
//!
//! The interesting part is the editing machinery built on top of it: a
//! [`ProjectBoard`] ties any [`RecordSource`](traits::RecordSource) to a single [`EditSession`]
//! (one open dialog, one editable event row at a time), keeps the in-memory
//! collections consistent with the store after every confirmed save, and the
//! [`render`] module turns that state into markup and interaction bindings,
//! idempotently, on every call.
//!
//! Hosts that want to exercise the machinery without a server (or to test
//! against injected failures) can plug in a [`MockSource`](mock_source::MockSource) instead.

pub mod error;
pub use error::Error;

pub mod status;
pub use status::Status;
mod project;
pub use project::{Project, ProjectId};
mod event;
pub use event::{Event, EventId, ProjectRef};

pub mod traits;

pub mod client;
pub use client::Client;
mod resource;
pub use resource::Resource;

pub mod session;
pub use session::EditSession;
pub mod board;
pub use board::ProjectBoard;
pub mod render;

pub mod mock_behaviour;
pub mod mock_source;
