//! A self-contained walkthrough of the dialog lifecycle, against a mocked
//! record store. Run with `RUST_LOG=debug` to watch the engine's decisions.

use chrono::NaiveDate;

use projectboard::board::{Action, FormValues};
use projectboard::mock_behaviour::MockBehaviour;
use projectboard::mock_source::MockSource;
use projectboard::{Event, Project, ProjectBoard, ProjectRef, Status};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let mut source = MockSource::new();
    source.add_project(Project::new(1, "Warehouse move", "Relocate the whole southern warehouse to the new site", Status::InProgress));
    source.add_project(Project::new(2, "Yearly audit", "", Status::NotStarted));
    source.add_event(Event::new(7, "Kick-off", date(2024, 3, 1), date(2024, 3, 1), Status::Completed,
                                ProjectRef { id: 1, title: "Warehouse move".to_string() }));
    source.add_event(Event::new(8, "Shelving teardown", date(2024, 4, 10), date(2024, 4, 20), Status::InProgress,
                                ProjectRef { id: 1, title: "Warehouse move".to_string() }));

    let mut board = ProjectBoard::new(source);
    if let Err(err) = board.init().await {
        log::warn!("Starting with an empty project list: {}", err);
    }

    println!("---- initial render ----");
    println!("{}", board.render());

    board.dispatch(Action::OpenProject(1), &FormValues::new()).await;
    println!("---- dialog open ----");
    println!("{}", board.render());
    println!("---- bindings ----");
    for binding in board.bindings() {
        println!("  {} -> {:?}", binding.selector, binding.action);
    }

    // Edit one event row and save it
    board.dispatch(Action::BeginEventEdit(8), &FormValues::new()).await;
    let mut event_form = FormValues::new();
    event_form.insert("Title".to_string(), "Shelving teardown (delayed)".to_string());
    event_form.insert("Start".to_string(), "2024-04-15".to_string());
    event_form.insert("End".to_string(), "2024-04-25".to_string());
    event_form.insert("Status".to_string(), "Not Started".to_string());
    board.dispatch(Action::SaveEvent(8), &event_form).await;

    // Save the project itself; this also closes the dialog
    let mut project_form = FormValues::new();
    project_form.insert("Title".to_string(), "Warehouse move (phase 2)".to_string());
    project_form.insert("Description".to_string(), "Relocate the remaining aisles".to_string());
    project_form.insert("Status".to_string(), "In Progress".to_string());
    board.dispatch(Action::SaveProject, &project_form).await;

    println!("---- after saving ----");
    println!("{}", board.render());

    // A store outage leaves the board exactly where it was
    board.source().set_behaviour(MockBehaviour::fail_now(1));
    board.dispatch(Action::OpenProject(2), &FormValues::new()).await;
    println!("dialog open after a failed fetch: {}", board.session().is_open());
}
