//! Portfolio frontend entry point

use std::sync::OnceLock;
use zoon::*;

/// Stores the main application task handle to prevent it from being dropped.
static MAIN_TASK: OnceLock<TaskHandle> = OnceLock::new();

mod app;
mod browser;
mod config;
mod contact;
mod dataflow;
mod debug;
mod driver;
mod projects;
mod strips;
mod views;

pub fn main() {
    let handle = Task::start_droppable(async {
        let app = crate::app::PortfolioApp::new();
        let root_element = app.root();
        start_app("app", move || root_element);
    });
    let _ = MAIN_TASK.set(handle);
}
