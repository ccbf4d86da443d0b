use ratatui::{buffer::Buffer, layout::Rect as CellArea, style::Color};

use crate::error::RenderError;
use crate::game::{Position, Rect, Rgb};

/// Draw calls the game scene is expressed in. Coordinates are pixels.
pub trait Canvas {
    fn draw_rect(&mut self, area: Rect, color: Rgb) -> Result<(), RenderError>;
    fn draw_ellipse(&mut self, area: Rect, color: Rgb) -> Result<(), RenderError>;
    /// Draw `text` with its top-left corner at `pos`
    fn draw_text(&mut self, text: &str, pos: Position, color: Rgb) -> Result<(), RenderError>;
    /// Width `text` would take, in pixels
    fn text_width(&self, text: &str) -> i32;
}

/// Smallest terminal that still shows the HUD
pub const MIN_COLUMNS: u16 = 48;
pub const MIN_ROWS: u16 = 8;

/// Rasterizes pixel draw calls onto terminal cells.
///
/// One tile is two columns wide and one row tall. Anything outside the
/// viewport is clipped.
pub struct BufferCanvas<'a> {
    buf: &'a mut Buffer,
    viewport: CellArea,
    /// Pixels per column
    cell_width: i32,
    /// Pixels per row
    cell_height: i32,
}

impl<'a> BufferCanvas<'a> {
    pub fn new(buf: &'a mut Buffer, viewport: CellArea, tile_size: i32) -> Result<Self, RenderError> {
        if viewport.width < MIN_COLUMNS || viewport.height < MIN_ROWS {
            return Err(RenderError::ViewportTooSmall {
                width: viewport.width,
                height: viewport.height,
                min_width: MIN_COLUMNS,
                min_height: MIN_ROWS,
            });
        }

        Ok(Self {
            buf,
            viewport,
            cell_width: (tile_size / 2).max(1),
            cell_height: tile_size.max(1),
        })
    }

    /// Columns and rows covered by a pixel box, at least one of each
    fn cells(&self, area: &Rect) -> (std::ops::Range<i32>, std::ops::Range<i32>) {
        let col0 = area.left().div_euclid(self.cell_width);
        let col1 = area.right().div_euclid(self.cell_width).max(col0 + 1);
        let row0 = area.top().div_euclid(self.cell_height);
        let row1 = area.bottom().div_euclid(self.cell_height).max(row0 + 1);
        (col0..col1, row0..row1)
    }

    fn cell_mut(&mut self, col: i32, row: i32) -> Option<&mut ratatui::buffer::Cell> {
        if col < 0 || row < 0 || col >= i32::from(self.viewport.width) || row >= i32::from(self.viewport.height) {
            return None;
        }
        let x = self.viewport.x + col as u16;
        let y = self.viewport.y + row as u16;
        self.buf.cell_mut((x, y))
    }
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

impl Canvas for BufferCanvas<'_> {
    fn draw_rect(&mut self, area: Rect, rgb: Rgb) -> Result<(), RenderError> {
        let (cols, rows) = self.cells(&area);
        for row in rows {
            for col in cols.clone() {
                if let Some(cell) = self.cell_mut(col, row) {
                    cell.set_char(' ').set_bg(color(rgb));
                }
            }
        }
        Ok(())
    }

    fn draw_ellipse(&mut self, area: Rect, rgb: Rgb) -> Result<(), RenderError> {
        let (cols, rows) = self.cells(&area);
        for row in rows {
            for col in cols.clone() {
                if let Some(cell) = self.cell_mut(col, row) {
                    cell.set_char('•').set_fg(color(rgb));
                }
            }
        }
        Ok(())
    }

    fn draw_text(&mut self, text: &str, pos: Position, rgb: Rgb) -> Result<(), RenderError> {
        let col0 = pos.x.div_euclid(self.cell_width);
        let row = pos.y.div_euclid(self.cell_height);
        for (offset, ch) in text.chars().enumerate() {
            if let Some(cell) = self.cell_mut(col0 + offset as i32, row) {
                cell.set_char(ch).set_fg(color(rgb));
            }
        }
        Ok(())
    }

    fn text_width(&self, text: &str) -> i32 {
        text.chars().count() as i32 * self.cell_width
    }
}
