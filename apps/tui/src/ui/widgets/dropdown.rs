use crate::app::{App, InputMode};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

/// First visible row so that `selected_index` stays on screen.
pub const fn scroll_offset(
    total_rows: usize,
    max_visible_rows: usize,
    selected_index: usize,
) -> usize {
    if total_rows <= max_visible_rows {
        return 0;
    }

    if selected_index >= max_visible_rows {
        return selected_index.saturating_sub(max_visible_rows) + 1;
    }

    0
}

/// The subject dropdown: every subject id in dataset order, the highlighted
/// row inverted and the subject on screen marked.
pub fn render_subject_dropdown(app: &App, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title(format!(" Test Subject ID ({}) ", app.subjects.len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let split = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);

    let visible = split[0].height as usize;
    let offset = scroll_offset(app.subjects.len(), visible, app.dropdown_index);
    let current = app.current_subject();

    let lines = app
        .subjects
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible)
        .map(|(position, subject)| {
            let marker = if Some(subject) == current { "● " } else { "  " };
            let style = if position == app.dropdown_index {
                Style::default()
                    .fg(Color::White)
                    .bg(Color::Rgb(0, 0, 238))
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            TextLine::from(Span::styled(format!("{marker}{subject}"), style))
        })
        .collect::<Vec<_>>();

    f.render_widget(Paragraph::new(Text::from(lines)), split[0]);

    let prompt = if app.input_mode == InputMode::JumpToSubject {
        TextLine::from(vec![
            Span::styled("id> ", Style::default().fg(Color::Yellow)),
            Span::raw(format!("{}_", app.current_input)),
        ])
    } else {
        TextLine::from(Span::styled("/ to jump", Style::default().fg(Color::DarkGray)))
    };
    f.render_widget(Paragraph::new(prompt), split[1]);
}

#[cfg(test)]
mod tests {
    use super::scroll_offset;

    #[test]
    fn short_lists_never_scroll() {
        assert_eq!(scroll_offset(5, 10, 4), 0);
    }

    #[test]
    fn selection_below_viewport_scrolls_into_view() {
        assert_eq!(scroll_offset(153, 10, 9), 0);
        assert_eq!(scroll_offset(153, 10, 10), 1);
        assert_eq!(scroll_offset(153, 10, 152), 143);
    }
}
