use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Paragraph, Widget},
};

use crate::constants::{background, game};

/// Scrolling scenery behind the game. It repeats a fixed art tile across the
/// bottom of the canvas, shifted left by the simulation's backdrop offset, so
/// it freezes, scrolls and resets exactly with the rest of the state. Purely
/// visual, no collision relevance.
#[derive(Debug, Default)]
pub struct Scenery {
    offset: f32,
}

impl Scenery {
    pub fn new(offset: f32) -> Self {
        Self { offset }
    }

    fn tile_char(row: &str, col: usize) -> char {
        row.chars().nth(col % background::TILE_W).unwrap_or(' ')
    }

    /// Offset is in playfield units and non-positive; map it to a rightward
    /// sample shift in cells, wrapping by the tile period.
    fn shift_cells(&self, area: Rect) -> usize {
        let scale = area.width as f32 / game::PLAYFIELD_W;
        let cells = (-self.offset * scale) as usize;
        cells % background::TILE_W
    }
}

impl Widget for Scenery {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let rows = background::TILE.len();
        if area.height < rows as u16 {
            return;
        }

        let shift = self.shift_cells(area);
        let top = area.height as usize - rows;
        let lines = background::TILE
            .iter()
            .enumerate()
            .map(|(index, row)| {
                let text: String = (0..area.width as usize).map(|col| Self::tile_char(row, col + shift)).collect();
                let color = if index >= rows - background::GROUND_ROWS { Color::Green } else { Color::DarkGray };
                Line::from(text).style(Style::default().fg(color))
            })
            .collect::<Vec<_>>();

        let scenery_area = Rect { y: area.y + top as u16, height: rows as u16, ..area };
        Paragraph::new(lines).render(scenery_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_shift_wraps_by_tile_period() {
        let area = Rect::new(0, 0, 100, 20);
        // One full playfield width of scroll equals one canvas width of cells.
        let scenery = Scenery::new(-(game::PLAYFIELD_W));
        assert_eq!(scenery.shift_cells(area), 100 % background::TILE_W);
        // Zero offset means no shift.
        assert_eq!(Scenery::new(0.0).shift_cells(area), 0);
    }

    #[test]
    fn test_tile_char_wraps() {
        let row = background::TILE[0];
        assert_eq!(Scenery::tile_char(row, 0), Scenery::tile_char(row, background::TILE_W));
    }
}
