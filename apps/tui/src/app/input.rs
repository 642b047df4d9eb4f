use crate::app::state::{App, InputMode};
use crossterm::event::KeyCode;

const PAGE_STEP: isize = 10;

pub fn handle_input(app: &mut App, key: KeyCode) {
    if handle_help_toggle(app, key) {
        return;
    }

    if app.input_mode == InputMode::JumpToSubject {
        handle_jump_input(app, key);
        return;
    }

    handle_browse_input(app, key);
}

fn handle_help_toggle(app: &mut App, key: KeyCode) -> bool {
    if key == KeyCode::F(1) || (key == KeyCode::Char('?') && app.input_mode == InputMode::Browse)
    {
        app.show_help = !app.show_help;
        return true;
    }

    if app.show_help {
        if key == KeyCode::Esc {
            app.show_help = false;
        }
        return true;
    }

    false
}

fn handle_browse_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Char('q') | KeyCode::Esc => {
            app.running = false;
        }
        // Everything below needs a loaded dataset
        _ if !app.is_ready() => {}
        KeyCode::Up | KeyCode::Char('k') => app.move_highlight(-1),
        KeyCode::Down | KeyCode::Char('j') => app.move_highlight(1),
        KeyCode::PageUp => app.move_highlight(-PAGE_STEP),
        KeyCode::PageDown => app.move_highlight(PAGE_STEP),
        KeyCode::Home => app.highlight_first(),
        KeyCode::End => app.highlight_last(),
        KeyCode::Enter => app.commit_highlighted(),
        KeyCode::Char('/') => app.start_jump(),
        _ => {}
    }
}

fn handle_jump_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Esc => app.cancel_jump(),
        KeyCode::Enter => app.submit_jump(),
        KeyCode::Backspace => {
            app.current_input.pop();
        }
        KeyCode::Char(c) if !c.is_control() => app.current_input.push(c),
        _ => {}
    }
}
