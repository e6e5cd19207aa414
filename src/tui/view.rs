use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use super::grid::draw_pad_grid;
use crate::press::{RegionId, TouchRouter};
use crate::shared::{ControlId, DisplayState, FunctionColor, FunctionKind};

const FUNCTION_KEYS: [&str; 3] = ["R", "H", "C"];

// Draws the board and rebuilds the router's hit table from this frame's layout
pub fn render(frame: &mut Frame, area: Rect, state: &DisplayState, router: &mut TouchRouter) {
    router.clear();
    let root = router.register_container(area, None);

    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // status line
            Constraint::Length(5), // function controls
            Constraint::Min(12),   // pad grid
        ])
        .split(area);

    draw_screen(frame, sections[0], state);
    draw_function_row(frame, sections[1], state, router, root);
    draw_pad_grid(frame, sections[2], &state.pads, &state.pads_pressed, router, Some(root));
}

fn draw_screen(frame: &mut Frame, area: Rect, state: &DisplayState) {
    let text = Paragraph::new(state.display_text.as_str())
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(" padboard "));
    frame.render_widget(text, area);
}

fn function_bg(color: FunctionColor) -> Color {
    match color {
        FunctionColor::White => Color::White,
        FunctionColor::Red => Color::Red,
        FunctionColor::Blue => Color::Blue,
        FunctionColor::Purple => Color::Magenta,
    }
}

fn draw_function_row(
    frame: &mut Frame,
    area: Rect,
    state: &DisplayState,
    router: &mut TouchRouter,
    root: RegionId,
) {
    let row = router.register_container(area, Some(root));
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(area);

    for (i, kind) in FunctionKind::ALL.into_iter().enumerate() {
        router.register_control(cols[i], Some(row), ControlId::Function(kind));
        let style = Style::default().fg(Color::Black).bg(function_bg(state.functions[i]));
        let label = format!("{} [{}]", kind.label(), FUNCTION_KEYS[i]);
        let widget = Paragraph::new(label)
            .alignment(Alignment::Center)
            .style(style)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(widget, cols[i]);
    }
}

// shown until the audio devices open
pub fn render_waiting(frame: &mut Frame, area: Rect, attempts: u32, last_error: Option<&str>) {
    let mut lines = vec![format!("waiting for audio devices (attempt {attempts})")];
    if let Some(err) = last_error {
        lines.push(err.to_string());
    }
    lines.push(String::from("Esc to quit"));
    let widget = Paragraph::new(lines.join("\n"))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(" padboard "));
    frame.render_widget(widget, area);
}
