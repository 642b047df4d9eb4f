mod dashboard;

use std::cell::RefCell;
use std::io;
use std::rc::Rc;

use biodiversity_core::{BarSpec, BubbleSpec, Colorscale, GaugeSpec, RawDataset};
use ratzilla::ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line as TextLine, Span, Text},
    widgets::{
        canvas::{Canvas, Circle, Line as CanvasLine},
        Bar, BarChart, BarGroup, Block, Borders, Gauge, List, ListItem, Paragraph, Wrap,
    },
    Frame, Terminal,
};
use ratzilla::{DomBackend, WebRenderer};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Request, RequestInit, RequestMode, Response};

use dashboard::{LoadState, WebDashboard};

const DATASET_PATH: &str = "samples.json";
const PAGE: isize = 10;

fn main() -> io::Result<()> {
    let state = Rc::new(RefCell::new(LoadState::Loading));

    spawn_local(fetch_dataset(state.clone()));

    let backend = DomBackend::new()?;
    let mut terminal = Terminal::new(backend)?;

    terminal.on_key_event({
        let state = state.clone();
        move |event| {
            let mut state = state.borrow_mut();
            let LoadState::Ready(dashboard) = &mut *state else {
                return;
            };
            match event.code {
                ratzilla::event::KeyCode::Up => dashboard.move_cursor(-1),
                ratzilla::event::KeyCode::Down => dashboard.move_cursor(1),
                ratzilla::event::KeyCode::PageUp => dashboard.move_cursor(-PAGE),
                ratzilla::event::KeyCode::PageDown => dashboard.move_cursor(PAGE),
                ratzilla::event::KeyCode::Home => dashboard.cursor = 0,
                ratzilla::event::KeyCode::End => {
                    dashboard.cursor = dashboard.subjects.len().saturating_sub(1);
                }
                ratzilla::event::KeyCode::Enter => dashboard.commit_cursor(),
                _ => {}
            }
        }
    });

    terminal.draw_web(move |f| {
        let area = f.area();
        let block = Block::default()
            .title("Belly Button Biodiversity")
            .title_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Gray));
        let inner = block.inner(area).inner(Margin::new(1, 1));
        f.render_widget(block, area);

        match &*state.borrow() {
            LoadState::Loading => {
                let paragraph =
                    Paragraph::new(Text::from(TextLine::from(format!("Loading {DATASET_PATH}..."))))
                        .alignment(Alignment::Center);
                f.render_widget(paragraph, inner);
            }
            LoadState::Failed(message) => {
                let paragraph = Paragraph::new(Text::from(vec![
                    TextLine::from(Span::styled(
                        "Could not load the dataset",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )),
                    TextLine::from(""),
                    TextLine::from(message.as_str()),
                ]))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true });
                f.render_widget(paragraph, inner);
            }
            LoadState::Ready(dashboard) => render_dashboard(dashboard, f, inner),
        }
    });

    Ok(())
}

fn render_dashboard(dashboard: &WebDashboard, f: &mut Frame<'_>, area: Rect) {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(12), Constraint::Length(1)])
        .split(area);

    let content = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(main_layout[0]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(6),
            Constraint::Length(9),
            Constraint::Length(5),
        ])
        .split(content[0]);

    render_subject_list(dashboard, f, left[0]);
    render_panel(dashboard.surface.panel_lines(), f, left[1]);
    render_gauge(dashboard.surface.gauge.as_ref(), f, left[2]);

    let charts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(content[1]);

    render_bar_chart(dashboard.surface.bar.as_ref(), f, charts[0]);
    render_bubble_chart(dashboard.surface.bubble.as_ref(), f, charts[1]);

    let footer = TextLine::from(vec![
        Span::styled(dashboard.status.as_str(), Style::default().fg(Color::White)),
        Span::raw("  "),
        Span::styled("Arrows/PgUp/PgDn", Style::default().fg(Color::Gray)),
        Span::raw(" move  "),
        Span::styled("Enter", Style::default().fg(Color::Gray)),
        Span::raw(" select"),
    ]);
    f.render_widget(
        Paragraph::new(Text::from(footer)).alignment(Alignment::Center),
        main_layout[1],
    );
}

fn render_subject_list(dashboard: &WebDashboard, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title(format!("Test Subject ID No. ({})", dashboard.subjects.len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let visible = usize::from(block.inner(area).height).max(1);
    let offset = dashboard.cursor.saturating_sub(visible - 1);

    let items = dashboard
        .subjects
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible)
        .map(|(row, subject)| {
            let current = dashboard.current() == Some(subject);
            let marker = if current { "● " } else { "  " };
            let style = if row == dashboard.cursor {
                Style::default()
                    .fg(Color::White)
                    .bg(Color::Rgb(0, 0, 238))
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(format!("{marker}{subject}")).style(style)
        })
        .collect::<Vec<_>>();

    f.render_widget(List::new(items).block(block), area);
}

fn render_panel(lines: &[String], f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title("Demographic Info")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let text = lines
        .iter()
        .map(|line| TextLine::from(line.as_str()))
        .collect::<Vec<_>>();
    let paragraph = Paragraph::new(Text::from(text))
        .block(block)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn render_gauge(spec: Option<&GaugeSpec>, f: &mut Frame<'_>, area: Rect) {
    let Some(spec) = spec else {
        return;
    };
    let label = match spec.value {
        Some(value) if spec.show_number => format!("{value} of {}", spec.range[1]),
        Some(_) => String::new(),
        None => "no data".to_string(),
    };
    let color = spec
        .fraction()
        .map_or(Color::Gray, |t| rgb(Colorscale::Portland.sample(t)));
    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(spec.title.as_str())
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .gauge_style(Style::default().fg(color))
        .ratio(spec.fraction().unwrap_or(0.0))
        .label(label);
    f.render_widget(gauge, area);
}

fn render_bar_chart(spec: Option<&BarSpec>, f: &mut Frame<'_>, area: Rect) {
    let Some(spec) = spec else {
        return;
    };
    let block = Block::default()
        .title(spec.title.as_str())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let max_value = spec.max_value();
    let bars: Vec<Bar<'_>> = spec
        .tick_order
        .iter()
        .zip(&spec.values)
        .map(|(category, value)| {
            let t = if max_value > 0.0 { value / max_value } else { 0.0 };
            Bar::default()
                .value(to_count(*value))
                .label(TextLine::from(category.as_str()))
                .style(Style::default().fg(rgb(Colorscale::Portland.sample(t))))
                .value_style(Style::default().fg(Color::White))
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .direction(Direction::Horizontal)
        .data(BarGroup::default().bars(&bars))
        .max(to_count(max_value).max(1))
        .bar_width(1)
        .bar_gap(0);

    f.render_widget(chart, area);
}

fn render_bubble_chart(spec: Option<&BubbleSpec>, f: &mut Frame<'_>, area: Rect) {
    let Some(spec) = spec else {
        return;
    };
    let block = Block::default()
        .title(spec.title.as_str())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if spec.is_empty() {
        let paragraph = Paragraph::new("No OTUs recorded")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray));
        f.render_widget(paragraph, inner);
        return;
    }

    #[allow(clippy::cast_precision_loss)]
    let points = spec
        .x
        .iter()
        .zip(&spec.y)
        .enumerate()
        .map(|(k, (id, count))| {
            let x = id.parse::<f64>().unwrap_or(k as f64);
            let color = spec.marker_rgb(k).map_or(Color::Gray, rgb);
            (x, *count, spec.marker_size[k], color)
        })
        .collect::<Vec<_>>();

    let x_max = points.iter().map(|p| p.0).fold(1.0_f64, f64::max) * 1.05;
    let y_max = points.iter().map(|p| p.1).fold(1.0_f64, f64::max) * 1.1;
    let size_max = points.iter().map(|p| p.2).fold(1.0_f64, f64::max);

    f.render_widget(
        Canvas::default()
            .paint(|ctx| {
                ctx.draw(&CanvasLine {
                    x1: 0.0,
                    y1: 0.0,
                    x2: x_max,
                    y2: 0.0,
                    color: Color::Gray,
                });
                ctx.draw(&CanvasLine {
                    x1: 0.0,
                    y1: 0.0,
                    x2: 0.0,
                    y2: y_max,
                    color: Color::Gray,
                });

                for (x, y, size, color) in &points {
                    ctx.draw(&Circle {
                        x: *x,
                        y: *y,
                        radius: (size / size_max) * y_max * 0.06,
                        color: *color,
                    });
                }
            })
            .x_bounds([0.0, x_max])
            .y_bounds([0.0, y_max]),
        inner,
    );
}

const fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb(r, g, b)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_count(value: f64) -> u64 {
    value.max(0.0).round() as u64
}

fn fail(store: &Rc<RefCell<LoadState>>, message: String) {
    web_sys::console::error_1(&message.as_str().into());
    *store.borrow_mut() = LoadState::Failed(message);
}

async fn fetch_dataset(store: Rc<RefCell<LoadState>>) {
    let Some(window) = web_sys::window() else {
        fail(&store, "no browser window available".to_string());
        return;
    };

    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::SameOrigin);

    let Ok(request) = Request::new_with_str_and_init(DATASET_PATH, &opts) else {
        fail(&store, format!("could not build request for {DATASET_PATH}"));
        return;
    };

    let Ok(response_value) =
        wasm_bindgen_futures::JsFuture::from(window.fetch_with_request(&request)).await
    else {
        fail(&store, format!("request for {DATASET_PATH} failed"));
        return;
    };

    let Ok(response) = response_value.dyn_into::<Response>() else {
        fail(&store, "failed to read response".to_string());
        return;
    };

    if !response.ok() {
        fail(
            &store,
            format!("{DATASET_PATH} returned HTTP {}", response.status()),
        );
        return;
    }

    let Ok(body) = response.json() else {
        fail(&store, format!("{DATASET_PATH} body is not JSON"));
        return;
    };

    let Ok(json) = wasm_bindgen_futures::JsFuture::from(body).await else {
        fail(&store, format!("failed to read {DATASET_PATH} body"));
        return;
    };

    let dataset = match serde_wasm_bindgen::from_value::<RawDataset>(json) {
        Ok(dataset) => dataset,
        Err(error) => {
            fail(&store, format!("failed to parse {DATASET_PATH}: {error}"));
            return;
        }
    };

    match WebDashboard::from_dataset(dataset) {
        Ok(dashboard) => *store.borrow_mut() = LoadState::Ready(Box::new(dashboard)),
        Err(error) => fail(&store, error.to_string()),
    }
}
