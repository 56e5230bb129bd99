//! Board panel: replays the stroke list to a raster and paints it with
//! half-block cells, two pixels per terminal row.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders};

use super::theme;
use crate::app::App;
use crate::board::{raster, Rgb, Tool};

const BOARD_BG: Color = Color::Rgb(28, 30, 34);

fn to_color(pixel: Option<Rgb>) -> Color {
    match pixel {
        Some(Rgb(r, g, b)) => Color::Rgb(r, g, b),
        None => BOARD_BG,
    }
}

pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let tool = match app.state.board.tool {
        Tool::Pen => "कलम",
        Tool::Eraser => "मिटाएँ",
    };
    let title = format!(" श्यामपट्ट — {tool}  [c] रंग [e] उपकरण [u] वापस [x] साफ़ ");
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(title, Style::default().fg(theme::TEXT_SECONDARY)))
        .border_style(Style::default().fg(theme::BORDER));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Mouse events are mapped against this frame's geometry.
    app.state.board_rect = Some(inner);
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    // Logical surface: one pixel per column, two per row.
    let surface = raster::render(
        &app.state.board.strokes,
        inner.width as usize,
        inner.height as usize * 2,
    );

    let buffer = frame.buffer_mut();
    for row in 0..inner.height {
        for column in 0..inner.width {
            let top = surface.sample(column as usize, row as usize * 2);
            let bottom = surface.sample(column as usize, row as usize * 2 + 1);
            if let Some(cell) = buffer.cell_mut((inner.x + column, inner.y + row)) {
                cell.set_char('▀');
                cell.set_fg(to_color(top));
                cell.set_bg(to_color(bottom));
            }
        }
    }
}
