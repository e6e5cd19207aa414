use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::press::{RegionId, TouchRouter};
use crate::shared::{ControlId, PadColor, PadId, NUM_PADS};

const COLS: usize = 2;
const ROWS: usize = 3;

pub const PAD_LABELS: [&str; NUM_PADS] = ["1", "2", "Q", "W", "A", "S"];

fn pad_style(color: PadColor, pressed: bool) -> Style {
    let bg = match color {
        PadColor::Default => Color::Gray,
        PadColor::Red => Color::Red,
        PadColor::Yellow => Color::Yellow,
        PadColor::Green => Color::Green,
    };
    let style = Style::default().fg(Color::Black).bg(bg);
    if pressed {
        style.add_modifier(Modifier::DIM)
    } else {
        style
    }
}

// Draws the pads and registers each one with the router, under `parent`
pub fn draw_pad_grid(
    frame: &mut Frame,
    area: Rect,
    pads: &[PadColor; NUM_PADS],
    pressed: &[bool; NUM_PADS],
    router: &mut TouchRouter,
    parent: Option<RegionId>,
) {
    let grid = router.register_container(area, parent);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Ratio(1, ROWS as u32); ROWS])
        .split(area);

    for (row_idx, row_area) in rows.iter().enumerate() {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, COLS as u32); COLS])
            .split(*row_area);

        for (col_idx, cell_area) in cols.iter().enumerate() {
            let idx = row_idx * COLS + col_idx;
            let pad = router.register_control(
                *cell_area,
                Some(grid),
                ControlId::Pad(PadId(idx as u8)),
            );

            let style = pad_style(pads[idx], pressed[idx]);
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .style(style);
            let inner = block.inner(*cell_area);
            frame.render_widget(block, *cell_area);

            // the label has no handlers, touches on it walk up to the pad
            let label_area = Rect { height: inner.height.min(1), ..inner };
            router.register_container(label_area, Some(pad));
            frame.render_widget(
                Paragraph::new(PAD_LABELS[idx]).alignment(Alignment::Center).style(style),
                label_area,
            );
        }
    }
}
