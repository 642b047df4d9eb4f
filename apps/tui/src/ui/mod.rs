// UI module for biodiversity-dash
// Paints frames from the app's chart surface

pub mod screens;
pub mod widgets;

use crate::app::{App, LoadState};
use ratatui::Frame;

pub fn ui(app: &App, f: &mut Frame<'_>) {
    match &app.load_state {
        LoadState::Loading => screens::loading::render_loading(app, f),
        LoadState::Failed(message) => screens::loading::render_failure(message, f),
        LoadState::Ready => screens::dashboard::render_dashboard(app, f),
    }
}
