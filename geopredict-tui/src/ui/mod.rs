//! View rendering. Each screen reads the app state and draws; nothing in
//! here mutates state.

mod input_view;
mod result_view;

use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};

use crate::app::{App, Screen};

pub fn render(frame: &mut Frame, app: &App) {
    match app.screen {
        Screen::Input => input_view::render(frame, app),
        Screen::Result => result_view::render(frame, app),
    }
}

/// Center a fixed-size panel in the available area, shrinking to fit.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [area] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    area
}
