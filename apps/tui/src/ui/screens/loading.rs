use crate::app::App;
use crate::ui::widgets::popup::centered_rect;
use ratatui::layout::{Alignment, Margin};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;
use throbber_widgets_tui::Throbber;

pub fn render_loading(app: &App, f: &mut Frame<'_>) {
    let area = centered_rect(70, 20, f.area());
    let block = Block::default()
        .title(" Belly Button Biodiversity ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area).inner(Margin::new(1, 0));
    f.render_widget(block, area);

    let throbber = Throbber::default()
        .label(format!("Loading {}...", app.source_label))
        .style(Style::default().fg(Color::Gray))
        .throbber_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));

    // Rendering advances nothing; App::update steps the spinner
    let mut state = app.throbber_state.clone();
    f.render_stateful_widget(throbber, inner, &mut state);
}

pub fn render_failure(message: &str, f: &mut Frame<'_>) {
    let area = centered_rect(70, 30, f.area());
    let block = Block::default()
        .title(" Dataset unavailable ")
        .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));

    let text = Text::from(vec![
        TextLine::from(Span::styled(
            message.to_string(),
            Style::default().fg(Color::White),
        )),
        TextLine::from(""),
        TextLine::from(Span::styled(
            "Press q to quit",
            Style::default().fg(Color::Gray),
        )),
    ]);

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}
