//! The result view: status label, semicircular confidence gauge and the
//! climate-tile grid. Reached only through the transfer slot; with nothing
//! transferred it renders a "no data" placeholder instead of the gauge.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Line as CanvasLine};
use ratatui::widgets::{Block, Paragraph};

use geopredict_core::gauge::{self, Band, GaugeGeometry, NEEDLE_LENGTH_RATIO};
use geopredict_core::{ClimateTile, PredictionResult};

use crate::app::App;

/// Arc sampling resolution: one short chord per two degrees.
const ARC_STEPS: u32 = 90;

pub fn render(frame: &mut Frame, app: &App) {
    match app.slot.load() {
        Ok(result) => render_result(frame, &result),
        Err(_) => render_missing(frame),
    }
}

fn render_result(frame: &mut Frame, result: &PredictionResult) {
    let panel = super::centered(frame.area(), 78, 28);

    let outer = Block::bordered().title(" Analysis Result ");
    let inner = outer.inner(panel);
    frame.render_widget(outer, panel);

    let chunks = Layout::vertical([
        Constraint::Length(1),  // Status label
        Constraint::Length(1),  // Timestamp
        Constraint::Length(10), // Gauge
        Constraint::Length(1),  // Confidence label
        Constraint::Length(1),  // Spacer
        Constraint::Min(8),     // Climate tiles
        Constraint::Length(1),  // Hints
    ])
    .split(inner);

    let status_style = if result.status_label == "Landslide" {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    };
    frame.render_widget(
        Paragraph::new(Span::styled(result.status_label.clone(), status_style))
            .alignment(Alignment::Center),
        chunks[0],
    );

    frame.render_widget(
        Paragraph::new(Span::styled(
            format!("as of {}", result.requested_at.format("%Y-%m-%d %H:%M UTC")),
            Style::default().fg(Color::DarkGray),
        ))
        .alignment(Alignment::Center),
        chunks[1],
    );

    let geometry = gauge::compute_geometry(result.confidence);
    render_gauge(frame, chunks[2], &geometry);

    frame.render_widget(
        Paragraph::new(Span::styled(
            format!("{}%", result.confidence),
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center),
        chunks[3],
    );

    render_tiles(frame, chunks[5], &gauge::climate_tiles(&result.details));

    frame.render_widget(
        Paragraph::new(Span::styled(
            "b go back \u{b7} q quit",
            Style::default().fg(Color::DarkGray),
        ))
        .alignment(Alignment::Center),
        chunks[6],
    );
}

/// Rendering adapter for the pure gauge geometry: a donut band sampled as
/// short chords, plus the needle anchored at the arc center and lowered
/// slightly into the cutout.
fn render_gauge(frame: &mut Frame, area: Rect, geometry: &GaugeGeometry) {
    let needle_angle = geometry.needle_angle;
    let band_at = |angle: f64| geometry.band_at(angle);

    let canvas = Canvas::default()
        .x_bounds([-1.25, 1.25])
        .y_bounds([-0.15, 1.1])
        .paint(move |ctx| {
            for step in 0..ARC_STEPS {
                let from = std::f64::consts::PI * f64::from(step) / f64::from(ARC_STEPS);
                let to = std::f64::consts::PI * f64::from(step + 1) / f64::from(ARC_STEPS);
                let midpoint = (from + to) / 2.0;
                let color = match band_at(midpoint) {
                    Band::Pass => Color::Green,
                    Band::Fail => Color::Red,
                };
                // Inner and outer rim of the donut band (cutout at 80%).
                for radius in [0.8, 0.9, 1.0] {
                    ctx.draw(&CanvasLine {
                        x1: radius * from.cos(),
                        y1: radius * from.sin(),
                        x2: radius * to.cos(),
                        y2: radius * to.sin(),
                        color,
                    });
                }
            }

            let center = (0.0, -0.05);
            let (x, y) = gauge::needle_point(center, NEEDLE_LENGTH_RATIO, needle_angle);
            ctx.draw(&CanvasLine {
                x1: center.0,
                y1: center.1,
                x2: x,
                y2: y,
                color: Color::LightRed,
            });
        });

    frame.render_widget(canvas, area);
}

fn render_tiles(frame: &mut Frame, area: Rect, tiles: &[ClimateTile]) {
    let rows = Layout::vertical([Constraint::Length(4), Constraint::Length(4)]).split(area);

    for (row_index, row_area) in rows.iter().enumerate() {
        let columns = Layout::horizontal([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(*row_area);

        for (column_index, column_area) in columns.iter().enumerate() {
            let Some(tile) = tiles.get(row_index * 4 + column_index) else {
                continue;
            };
            render_tile(frame, *column_area, tile);
        }
    }
}

fn render_tile(frame: &mut Frame, area: Rect, tile: &ClimateTile) {
    let lines = vec![
        Line::from(Span::styled(
            format!("{} {}", tile.icon, tile.title),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            tile.display_value.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().border_style(Style::default().fg(Color::DarkGray))),
        area,
    );
}

fn render_missing(frame: &mut Frame) {
    let panel = super::centered(frame.area(), 54, 7);

    let outer = Block::bordered().title(" Analysis Result ");
    let inner = outer.inner(panel);
    frame.render_widget(outer, panel);

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .split(inner);

    frame.render_widget(
        Paragraph::new("No prediction to show.").alignment(Alignment::Center),
        chunks[1],
    );
    frame.render_widget(
        Paragraph::new(Span::styled(
            "Submit a location first, or press Esc to go back.",
            Style::default().fg(Color::DarkGray),
        ))
        .alignment(Alignment::Center),
        chunks[3],
    );
}
