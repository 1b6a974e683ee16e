pub mod charting;
pub mod screen;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType, Paragraph,
        Tabs, Widget, Wrap,
    },
};

use crate::{
    app::{App, Tab},
    clock::{self, TARGET_LABEL},
    round::Status,
    ui::charting::{compute_chart_params, format_label, histogram_bars, mean_bin_index},
};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 1;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);

        let tabs = Tabs::new(Tab::ALL.iter().map(|t| t.to_string()))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Reflex Trainer"),
            )
            .select(self.tab.index())
            .highlight_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            );
        tabs.render(chunks[0], buf);

        screen::current_screen(self.tab).render(self, chunks[1], buf);
    }
}

pub(crate) fn render_countdown(app: &App, area: Rect, buf: &mut Buffer) {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let dim_style = Style::default().add_modifier(Modifier::DIM);
    let italic_style = Style::default().add_modifier(Modifier::ITALIC);

    let view = app.view();
    let face = app.clock_face();
    let window = app.session.round().timings().window;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // heading
            Constraint::Length(1), // clock face
            Constraint::Length(1), // ready status
            Constraint::Length(1), // padding
            Constraint::Length(1), // target
            Constraint::Length(1), // padding
            Constraint::Length(2), // last result
            Constraint::Min(0),
            Constraint::Length(1), // caption
            Constraint::Length(1), // legend
        ])
        .split(area);

    Paragraph::new(Span::styled(
        format!("Counting up to {TARGET_LABEL}"),
        dim_style,
    ))
    .alignment(Alignment::Center)
    .render(chunks[0], buf);

    let clock_style = if face.ready {
        bold_style.fg(Color::Green)
    } else {
        bold_style.fg(Color::LightCyan)
    };
    Paragraph::new(Span::styled(face.clock.clone(), clock_style))
        .alignment(Alignment::Center)
        .render(chunks[1], buf);

    let status_style = if face.ready {
        bold_style.fg(Color::Green)
    } else {
        bold_style.fg(Color::Gray)
    };
    Paragraph::new(Span::styled(face.status_line.clone(), status_style))
        .alignment(Alignment::Center)
        .render(chunks[2], buf);

    Paragraph::new(Line::from(vec![
        Span::styled(format!("{TARGET_LABEL} AM"), bold_style),
        Span::styled("  simulated window", dim_style),
    ]))
    .alignment(Alignment::Center)
    .render(chunks[4], buf);

    if let Some(message) = &view.message {
        let result_style = match view.status {
            Some(Status::Warning) => bold_style.fg(Color::Yellow),
            _ => bold_style.fg(Color::Green),
        };
        Paragraph::new(vec![
            Line::from(Span::styled(message.clone(), result_style)),
            Line::from(Span::styled("Resetting for the next attempt…", italic_style)),
        ])
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(chunks[6], buf);
    }

    let mode = if app.session.show_millis {
        "milliseconds"
    } else {
        "hundredths"
    };
    Paragraph::new(Span::styled(
        format!(
            "Window: {} → {TARGET_LABEL} • Mode: {mode}",
            clock::display_anchor(window).format("%-I:%M:%S")
        ),
        dim_style,
    ))
    .alignment(Alignment::Center)
    .render(chunks[8], buf);

    Paragraph::new(Span::styled(
        "(space) register / (r)eset / (m)illis / (tab) stats / (esc)ape",
        italic_style,
    ))
    .render(chunks[9], buf);
}

pub(crate) fn render_stats(app: &App, area: Rect, buf: &mut Buffer) {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let italic_style = Style::default().add_modifier(Modifier::ITALIC);
    let magenta_style = Style::default().fg(Color::Magenta);

    let stats = app.session.stats();
    let Some(summary) = stats.summary() else {
        Paragraph::new(Span::styled(
            "No reaction times yet. Nail a registration to start building your chart.",
            italic_style.fg(Color::Cyan),
        ))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(area, buf);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),      // headline numbers
            Constraint::Percentage(45), // distribution
            Constraint::Min(5),         // trend
            Constraint::Length(1),      // caption
        ])
        .split(area);

    Paragraph::new(Span::styled(
        format!(
            "Attempts {}   Mean {:.3}s   Best {:.3}s   90th %ile {:.3}s   sd {:.3}s",
            summary.count, summary.mean, summary.best, summary.p90, summary.std_dev
        ),
        bold_style,
    ))
    .alignment(Alignment::Center)
    .render(chunks[0], buf);

    if let Some(bins) = stats.histogram(app.histogram_bins) {
        let labelled = histogram_bars(&bins);
        let mean_idx = mean_bin_index(&bins, summary.mean);
        let bars: Vec<Bar> = labelled
            .iter()
            .enumerate()
            .map(|(i, (label, count))| {
                let style = if Some(i) == mean_idx {
                    Style::default().fg(Color::LightBlue)
                } else {
                    Style::default().fg(Color::Cyan)
                };
                Bar::default()
                    .value(*count)
                    .label(Line::from(label.clone()))
                    .style(style)
            })
            .collect();

        let inner_width = chunks[1].width.saturating_sub(2);
        let bar_width = (inner_width / bars.len().max(1) as u16)
            .saturating_sub(1)
            .max(1);

        BarChart::default()
            .block(Block::default().borders(Borders::ALL).title(format!(
                "Distribution (s)  mean {:.3}s",
                summary.mean
            )))
            .bar_width(bar_width)
            .bar_gap(1)
            .data(BarGroup::default().bars(&bars))
            .render(chunks[1], buf);
    }

    if let Some(points) = stats.sequence() {
        let (last_attempt, ceiling) = compute_chart_params(&points);
        let tuples: Vec<(f64, f64)> = points.iter().copied().map(Into::into).collect();
        let datasets = vec![Dataset::default()
            .marker(Marker::Braille)
            .style(magenta_style)
            .graph_type(GraphType::Line)
            .data(&tuples)];

        Chart::new(datasets)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Recent streak"),
            )
            .x_axis(
                Axis::default()
                    .title("attempt")
                    .bounds([0.0, last_attempt])
                    .labels(vec![
                        Span::styled("0", bold_style),
                        Span::styled(format_label(last_attempt), bold_style),
                    ]),
            )
            .y_axis(
                Axis::default()
                    .title("s")
                    .bounds([0.0, ceiling])
                    .labels(vec![
                        Span::styled("0", bold_style),
                        Span::styled(format_label(ceiling), bold_style),
                    ]),
            )
            .render(chunks[2], buf);
    }

    Paragraph::new(Span::styled(
        format!("Lower is better. Aim to press just after the clock hits {TARGET_LABEL} to shave down your average."),
        italic_style,
    ))
    .alignment(Alignment::Center)
    .render(chunks[3], buf);
}
