//! The view layer: a pure function from state to markup, plus the
//! declarative interaction bindings that go with it
//!
//! Rendering rebuilds the full structure from state every time, so calling it
//! twice on the same state yields byte-identical markup. The bindings are
//! keyed by stable record ids and derived from the same state, which lets the
//! host throw away and re-apply them after every render without ever
//! orphaning a handler. Markup carries structure and class names only;
//! styling is the host's concern.

use chrono::NaiveDate;

use crate::board::Action;
use crate::event::Event;
use crate::project::Project;
use crate::session::EditSession;
use crate::status::Status;

/// How many characters of a description fit on a summary card
const CARD_DESCRIPTION_LIMIT: usize = 100;

/// One interaction handler the host must attach after rendering: when the
/// element matching `selector` is activated, feed `action` back into
/// [`ProjectBoard::dispatch`](crate::board::ProjectBoard::dispatch)
#[derive(Clone, Debug, PartialEq)]
pub struct Binding {
    pub selector: String,
    pub action: Action,
}

/// Render the whole surface: the summary cards, and the edit dialog when a
/// project is open
pub fn render_page(projects: &[Project], session: &EditSession) -> String {
    let mut out = String::new();
    out.push_str("<div class=\"projectboard\">\n<div class=\"projects-container\">\n");
    for project in projects {
        out.push_str(&project_card(project));
    }
    out.push_str("</div>\n");

    if let Some(project) = session.project() {
        out.push_str(&edit_dialog(project, session));
    }

    out.push_str("</div>\n");
    out
}

/// Derive the full interaction surface from state.
///
/// Exactly the elements present in [`render_page`]'s output get a binding,
/// in document order.
pub fn bindings(projects: &[Project], session: &EditSession) -> Vec<Binding> {
    let mut bindings = Vec::new();

    for project in projects {
        bindings.push(Binding {
            selector: format!(".project-card[data-project-id=\"{}\"]", project.id()),
            action: Action::OpenProject(project.id()),
        });
    }

    if session.is_open() {
        bindings.push(Binding { selector: ".dialog-overlay".to_string(), action: Action::CloseDialog });

        for event in session.events() {
            if session.editing_event() == Some(event.id()) {
                bindings.push(Binding {
                    selector: format!(".save-event-edit[data-event-id=\"{}\"]", event.id()),
                    action: Action::SaveEvent(event.id()),
                });
                bindings.push(Binding { selector: ".cancel-event-edit".to_string(), action: Action::CancelEventEdit });
            } else {
                bindings.push(Binding {
                    selector: format!(".edit-event-button[data-event-id=\"{}\"]", event.id()),
                    action: Action::BeginEventEdit(event.id()),
                });
            }
        }

        bindings.push(Binding { selector: ".cancel-button".to_string(), action: Action::CloseDialog });
        bindings.push(Binding { selector: ".save-button".to_string(), action: Action::SaveProject });
    }

    bindings
}

fn project_card(project: &Project) -> String {
    let description = if project.description().is_empty() {
        "No description available".to_string()
    } else {
        escape(&truncate(project.description(), CARD_DESCRIPTION_LIMIT))
    };

    format!(
        "<div class=\"project-card\" data-project-id=\"{id}\">\n\
         <div class=\"card-header\">{title}</div>\n\
         <div class=\"card-body\">{description}</div>\n\
         <div class=\"card-footer\">Status: {status}</div>\n\
         </div>\n",
        id = project.id(),
        title = escape(project.title()),
        description = description,
        status = project.status(),
    )
}

fn edit_dialog(project: &Project, session: &EditSession) -> String {
    let mut events_html = String::new();
    for event in session.events() {
        if session.editing_event() == Some(event.id()) {
            events_html.push_str(&event_edit_row(event));
        } else {
            events_html.push_str(&event_row(event));
        }
    }

    format!(
        "<div class=\"dialog-overlay\">\n\
         <div class=\"dialog-content\">\n\
         <h2>Edit Project</h2>\n\
         <label>Title:</label>\n\
         <input type=\"text\" class=\"project-title\" value=\"{title}\">\n\
         <label>Description:</label>\n\
         <textarea class=\"project-description\">{description}</textarea>\n\
         <label>Status:</label>\n\
         <select class=\"project-status\">\n{options}</select>\n\
         <h3>Related Events</h3>\n\
         {events}\
         <button class=\"cancel-button\">Cancel</button>\n\
         <button class=\"save-button\">Save</button>\n\
         </div>\n\
         </div>\n",
        title = escape(project.title()),
        description = escape(project.description()),
        options = status_options(project.status()),
        events = events_html,
    )
}

fn event_row(event: &Event) -> String {
    format!(
        "<div class=\"event-item {badge}\" data-event-id=\"{id}\">\n\
         <strong>{title}</strong><br>\n\
         {start} - {end}<br>\n\
         Status: {status}\n\
         <button class=\"edit-event-button\" data-event-id=\"{id}\">Edit</button>\n\
         </div>\n",
        badge = event.status().css_class(),
        id = event.id(),
        title = escape(event.title()),
        start = format_date(event.start()),
        end = format_date(event.end()),
        status = event.status(),
    )
}

fn event_edit_row(event: &Event) -> String {
    format!(
        "<div class=\"event-item {badge}\" data-event-id=\"{id}\">\n\
         <input type=\"text\" class=\"event-title\" value=\"{title}\">\n\
         <input type=\"date\" class=\"event-start\" value=\"{start}\">\n\
         <input type=\"date\" class=\"event-end\" value=\"{end}\">\n\
         <select class=\"event-status\">\n{options}</select>\n\
         <button class=\"save-event-edit\" data-event-id=\"{id}\">Save</button>\n\
         <button class=\"cancel-event-edit\">Cancel</button>\n\
         </div>\n",
        badge = event.status().css_class(),
        id = event.id(),
        title = escape(event.title()),
        start = event.start().format("%Y-%m-%d"),
        end = event.end().format("%Y-%m-%d"),
        options = status_options(event.status()),
    )
}

fn status_options(selected: Status) -> String {
    let mut options = String::new();
    for status in &Status::ALL {
        let marker = if *status == selected { " selected" } else { "" };
        options.push_str(&format!("<option value=\"{0}\"{1}>{0}</option>\n", status, marker));
    }
    options
}

/// `Mar 1, 2024`, for read-mode rows
fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Cut `text` down to at most `limit` characters, marking the cut with `...`
fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let cut: String = text.chars().take(limit).collect();
    format!("{}...", cut)
}

/// Minimal HTML escaping for text and attribute values
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            other => escaped.push(other),
        }
    }
    escaped
}
