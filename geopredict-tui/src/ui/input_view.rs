//! The input form: city XOR latitude/longitude, inline validation, busy
//! indicator while a request is outstanding.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use crate::app::{App, Field};

const SPINNER_FRAMES: [&str; 4] = ["|", "/", "-", "\\"];

pub fn render(frame: &mut Frame, app: &App) {
    let panel = super::centered(frame.area(), 64, 15);

    let outer = Block::bordered().title(" GeoPredict ");
    let inner = outer.inner(panel);
    frame.render_widget(outer, panel);

    let chunks = Layout::vertical([
        Constraint::Length(1), // Subtitle
        Constraint::Length(3), // City
        Constraint::Length(1), // OR divider
        Constraint::Length(3), // Latitude + Longitude
        Constraint::Length(1), // Validation / submit error
        Constraint::Length(1), // Spacer
        Constraint::Length(1), // Status / hints
    ])
    .split(inner);

    frame.render_widget(
        Paragraph::new("Enter a location to analyze").alignment(Alignment::Center),
        chunks[0],
    );

    render_field(frame, chunks[1], app, Field::City, "City Name", &app.form.city);

    frame.render_widget(
        Paragraph::new(Span::styled(
            "OR",
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center),
        chunks[2],
    );

    let coords = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[3]);
    render_field(frame, coords[0], app, Field::Latitude, "Latitude", &app.form.latitude);
    render_field(frame, coords[1], app, Field::Longitude, "Longitude", &app.form.longitude);

    if let Some(message) = error_message(app) {
        frame.render_widget(
            Paragraph::new(Span::styled(message, Style::default().fg(Color::Red)))
                .alignment(Alignment::Center),
            chunks[4],
        );
    }

    frame.render_widget(status_line(app), chunks[6]);
}

fn render_field(
    frame: &mut Frame,
    area: Rect,
    app: &App,
    field: Field,
    title: &str,
    value: &str,
) {
    let focused = app.focus == field && !app.in_flight;
    let border_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let mut text = value.to_string();
    if focused {
        text.push('_');
    }

    let widget = Paragraph::new(text).block(
        Block::bordered()
            .title(format!(" {title} "))
            .border_style(border_style),
    );
    frame.render_widget(widget, area);
}

fn error_message(app: &App) -> Option<String> {
    if let Some(message) = &app.submit_error {
        return Some(message.clone());
    }
    app.form.last_error().map(ToString::to_string)
}

fn status_line(app: &App) -> Paragraph<'static> {
    if app.in_flight {
        let spinner = SPINNER_FRAMES[app.spinner_frame % SPINNER_FRAMES.len()];
        return Paragraph::new(Line::from(vec![
            Span::styled(
                format!("{spinner} Analyzing... "),
                Style::default().fg(Color::Cyan),
            ),
            Span::styled("(Esc to abort)", Style::default().fg(Color::DarkGray)),
        ]))
        .alignment(Alignment::Center);
    }

    let hint = if app.form.is_submit_ready() {
        "Enter analyze \u{b7} Tab next field \u{b7} Ctrl+R results \u{b7} Esc quit"
    } else {
        "Tab next field \u{b7} Ctrl+R results \u{b7} Esc quit"
    };
    Paragraph::new(Span::styled(hint, Style::default().fg(Color::DarkGray)))
        .alignment(Alignment::Center)
}
