use crate::app::App;
use crate::ui::widgets::charts::{
    render_bar_chart, render_bubble_chart, render_demographic_panel, render_gauge,
};
use crate::ui::widgets::dropdown::render_subject_dropdown;
use crate::ui::widgets::popup::{centered_rect, ClearWidget};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

pub fn render_dashboard(app: &App, f: &mut Frame<'_>) {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(12),   // Charts
            Constraint::Length(3), // Status
            Constraint::Length(1), // Shortcuts hint
        ])
        .split(f.area().inner(Margin::new(1, 0)));

    render_title_section(app, f, main_layout[0]);
    render_content_section(app, f, main_layout[1]);
    render_status_section(app, f, main_layout[2]);
    render_shortcuts(f, main_layout[3]);

    if app.show_help {
        let area = f.area();
        render_help_popup(f, area);
    }
}

fn render_title_section(app: &App, f: &mut Frame<'_>, area: Rect) {
    let subject = app
        .current_subject()
        .map_or_else(|| "-".to_string(), ToString::to_string);

    let title = Paragraph::new(TextLine::from(vec![
        Span::styled(
            "Belly Button Biodiversity ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("Dashboard", Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
        Span::raw("   "),
        Span::styled(format!("subject {subject}"), Style::default().fg(Color::Yellow)),
        Span::raw("   "),
        Span::styled(app.source_label.clone(), Style::default().fg(Color::DarkGray)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    )
    .alignment(Alignment::Left);

    f.render_widget(title, area);
}

fn render_content_section(app: &App, f: &mut Frame<'_>, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(34), Constraint::Min(30)])
        .split(area);

    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(6),
            Constraint::Length(9),
            Constraint::Length(5),
        ])
        .split(columns[0]);

    render_subject_dropdown(app, f, side[0]);
    render_demographic_panel(app.surface.panel_lines(), f, side[1]);
    render_gauge(app.surface.gauge.as_ref(), f, side[2]);

    let charts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(columns[1]);

    render_bar_chart(app.surface.bar.as_ref(), f, charts[0]);
    render_bubble_chart(app.surface.bubble.as_ref(), f, charts[1]);
}

fn render_status_section(app: &App, f: &mut Frame<'_>, area: Rect) {
    let status_block = Block::default()
        .title(" Status ")
        .title_style(Style::default().fg(Color::Yellow))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let style = if app.status_message.starts_with("Error") {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::Green)
    };

    let status_paragraph = Paragraph::new(Text::from(Span::styled(
        app.status_message.as_str(),
        style,
    )))
    .block(status_block)
    .wrap(Wrap { trim: true });
    f.render_widget(status_paragraph, area);
}

fn render_shortcuts(f: &mut Frame<'_>, area: Rect) {
    let key = |text: &'static str| {
        Span::styled(
            text,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    };
    let hint = |text: &'static str| Span::styled(text, Style::default().fg(Color::Gray));

    let shortcuts = TextLine::from(vec![
        key("↑/↓"),
        hint(": Browse | "),
        key("Enter"),
        hint(": Show subject | "),
        key("/"),
        hint(": Jump to id | "),
        key("F1"),
        hint(": Help | "),
        key("q"),
        hint(": Quit"),
    ]);
    f.render_widget(Paragraph::new(shortcuts).alignment(Alignment::Center), area);
}

fn render_help_popup(f: &mut Frame<'_>, area: Rect) {
    let popup_area = centered_rect(70, 70, area);
    f.render_widget(ClearWidget, popup_area);

    let help_block = Block::default()
        .title("== Help & Keyboard Shortcuts ==")
        .title_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let help_paragraph = Paragraph::new(Text::from(build_help_lines()))
        .block(help_block)
        .wrap(Wrap { trim: true });
    f.render_widget(help_paragraph, popup_area);
}

fn build_help_lines() -> Vec<TextLine<'static>> {
    let key = |text: &'static str, description: &'static str| {
        TextLine::from(vec![
            Span::styled(
                text,
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::raw(description),
        ])
    };

    let mut lines = vec![
        TextLine::from(vec![Span::styled(
            "Belly Button Biodiversity",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )]),
        TextLine::from(""),
        TextLine::from(
            "Pick a test subject to see its ten most abundant OTUs, every OTU by count, \
             washing frequency and demographic info.",
        ),
        TextLine::from(""),
        TextLine::from(vec![Span::styled(
            "Keyboard Shortcuts:",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        key("  ↑/↓ j/k", " - Move through subjects"),
        key("  PgUp/PgDn", " - Move ten subjects"),
        key("  Home/End", " - First / last subject"),
        key("  Enter", " - Show highlighted subject"),
        key("  /", " - Type a subject id, Enter to show it"),
        key("  F1 ?", " - Toggle this help"),
        key("  q Esc", " - Quit"),
        TextLine::from(""),
        TextLine::from(vec![Span::styled(
            "CLI Options:",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
    ];

    let help_text = crate::cli::CliArgs::help_text();
    for line in help_text.lines() {
        if line.starts_with("Usage") || line.starts_with("Options") || line.trim().is_empty() {
            continue;
        }
        lines.push(TextLine::from(line.to_string()));
    }

    lines
}
