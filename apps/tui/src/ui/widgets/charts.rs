use biodiversity_core::{BarSpec, BubbleSpec, Colorscale, GaugeSpec, RenderTarget};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{
    Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, Gauge, GraphType, Paragraph,
    Wrap,
};
use ratatui::Frame;

/// Colour buckets used for bubble markers; the top buckets get heavier glyphs.
const BUBBLE_BUCKETS: usize = 5;

const fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb(r, g, b)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_count(value: f64) -> u64 {
    value.max(0.0).round() as u64
}

fn empty_panel(title: &str, message: &str, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let paragraph = Paragraph::new(message.to_string())
        .block(block)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray));
    f.render_widget(paragraph, area);
}

/// Horizontal bars, drawn top to bottom in tick order.
pub fn render_bar_chart(spec: Option<&BarSpec>, f: &mut Frame<'_>, area: Rect) {
    let Some(spec) = spec else {
        empty_panel(RenderTarget::Bar.label(), "No subject selected", f, area);
        return;
    };
    if spec.is_empty() {
        empty_panel(&spec.title, "No OTUs recorded", f, area);
        return;
    }

    let scale = Colorscale::Portland;
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
                .text_value(format!("{value}"))
                .style(Style::default().fg(rgb(scale.sample(t))))
                .value_style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
        })
        .collect();

    // Hover text has no pointer here; show the leading OTU's taxonomy instead
    let footer = spec
        .hover_text
        .first()
        .map(|label| format!(" #1: {label} "))
        .unwrap_or_default();

    let chart = BarChart::default()
        .block(
            Block::default()
                .title(format!(" {} ", spec.title))
                .title_bottom(TextLine::from(Span::styled(
                    footer,
                    Style::default().fg(Color::DarkGray),
                )))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .direction(Direction::Horizontal)
        .data(BarGroup::default().bars(&bars))
        .max(to_count(max_value).max(1))
        .bar_width(1)
        .bar_gap(0);

    f.render_widget(chart, area);
}

/// Scatter of every OTU: x is the OTU id, y the count, colour and glyph
/// weight follow the marker values.
pub fn render_bubble_chart(spec: Option<&BubbleSpec>, f: &mut Frame<'_>, area: Rect) {
    let Some(spec) = spec else {
        empty_panel(RenderTarget::Bubble.label(), "No subject selected", f, area);
        return;
    };
    if spec.is_empty() {
        empty_panel(&spec.title, "No OTUs recorded", f, area);
        return;
    }

    let mut buckets = vec![Vec::new(); BUBBLE_BUCKETS];
    let mut x_bounds = [f64::INFINITY, f64::NEG_INFINITY];
    let mut y_max = 0.0_f64;

    for (k, (id, count)) in spec.x.iter().zip(&spec.y).enumerate() {
        #[allow(clippy::cast_precision_loss)]
        let x = id.parse::<f64>().unwrap_or(k as f64);
        let t = spec.color_fraction(k).unwrap_or(0.0);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let bucket = ((t * (BUBBLE_BUCKETS - 1) as f64).round() as usize).min(BUBBLE_BUCKETS - 1);

        buckets[bucket].push((x, *count));
        x_bounds = [x_bounds[0].min(x), x_bounds[1].max(x)];
        y_max = y_max.max(*count);
    }

    let datasets = buckets
        .iter()
        .enumerate()
        .filter(|(_, points)| !points.is_empty())
        .map(|(bucket, points)| {
            #[allow(clippy::cast_precision_loss)]
            let t = bucket as f64 / (BUBBLE_BUCKETS - 1) as f64;
            let marker = match bucket {
                0 | 1 => Marker::Braille,
                2 => Marker::Dot,
                _ => Marker::Block,
            };
            Dataset::default()
                .marker(marker)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(rgb(spec.colorscale.sample(t))))
                .data(points)
        })
        .collect::<Vec<_>>();

    let pad = ((x_bounds[1] - x_bounds[0]) * 0.05).max(1.0);
    let x_axis = [x_bounds[0] - pad, x_bounds[1] + pad];
    let y_axis = [0.0, (y_max * 1.1).max(1.0)];

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .title(format!(" {} ", spec.title))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .x_axis(
            Axis::default()
                .title(spec.x_axis_title.clone())
                .style(Style::default().fg(Color::Gray))
                .bounds(x_axis)
                .labels(axis_labels(x_axis)),
        )
        .y_axis(
            Axis::default()
                .title(spec.y_axis_title.clone())
                .style(Style::default().fg(Color::Gray))
                .bounds(y_axis)
                .labels(axis_labels(y_axis)),
        );

    f.render_widget(chart, area);
}

fn axis_labels([low, high]: [f64; 2]) -> Vec<Span<'static>> {
    let mid = (low + high) / 2.0;
    [low, mid, high]
        .iter()
        .map(|value| Span::raw(format!("{value:.0}")))
        .collect()
}

pub fn render_gauge(spec: Option<&GaugeSpec>, f: &mut Frame<'_>, area: Rect) {
    let Some(spec) = spec else {
        empty_panel(RenderTarget::Gauge.label(), "No subject selected", f, area);
        return;
    };

    let block = Block::default()
        .title(format!(" {} ", spec.title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);

    let fraction = spec.fraction();
    let label = match (spec.value, spec.show_number) {
        (Some(value), true) => format!("{value}"),
        (Some(_), false) => String::new(),
        (None, _) => "no data".to_string(),
    };
    let color = fraction.map_or(Color::DarkGray, |t| rgb(Colorscale::Portland.sample(t)));

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(color).bg(Color::Black))
        .ratio(fraction.unwrap_or(0.0))
        .label(Span::styled(
            label,
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ));
    f.render_widget(gauge, rows[0]);

    let [low, high] = spec.range;
    let ticks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);
    f.render_widget(
        Paragraph::new(format!("{low}")).style(Style::default().fg(Color::Gray)),
        ticks[0],
    );
    f.render_widget(
        Paragraph::new(format!("{high}"))
            .alignment(Alignment::Right)
            .style(Style::default().fg(Color::Gray)),
        ticks[1],
    );
}

pub fn render_demographic_panel(lines: &[String], f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title(format!(" {} ", RenderTarget::SampleMetadata.label()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let text = lines
        .iter()
        .map(|line| match line.split_once(": ") {
            Some((key, value)) => TextLine::from(vec![
                Span::styled(format!("{key}: "), Style::default().fg(Color::Gray)),
                Span::styled(value.to_string(), Style::default().fg(Color::White)),
            ]),
            None => TextLine::from(line.as_str()),
        })
        .collect::<Vec<_>>();

    let paragraph = Paragraph::new(Text::from(text))
        .block(block)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_round_and_floor_at_zero() {
        assert_eq!(to_count(163.0), 163);
        assert_eq!(to_count(2.6), 3);
        assert_eq!(to_count(-4.0), 0);
    }

    #[test]
    fn axis_labels_cover_bounds() {
        let labels = axis_labels([0.0, 200.0])
            .into_iter()
            .map(|span| span.content.to_string())
            .collect::<Vec<_>>();
        assert_eq!(labels, vec!["0", "100", "200"]);
    }
}
