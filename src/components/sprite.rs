use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Span, Text},
    widgets::Widget,
};

/// Multi-line ASCII-art renderer. In line mode each line is rendered as a
/// whole; with `transparent_whitespace` the leading whitespace of every line
/// is skipped so sprites do not punch blank holes into what is behind them.
/// Pixel mode renders every non-whitespace character cell individually, which
/// makes interior whitespace transparent too (used for layered art).
#[derive(Debug, Default)]
pub struct Sprite {
    lines: Vec<String>,
    style: Option<Style>,
    transparent_whitespace: bool,
    pixel_mode: bool,
}

impl Sprite {
    pub fn new<T: ToString>(lines: Vec<T>) -> Self {
        Sprite {
            lines: lines.into_iter().map(|s| s.to_string()).collect(),
            style: None,
            transparent_whitespace: false,
            pixel_mode: false,
        }
    }

    /// Splits a `r#"..."#` art block into lines, dropping empty ones.
    pub fn from_text(text: &str) -> Self {
        Self::new(text.lines().filter(|line| !line.is_empty()).collect::<Vec<_>>())
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }

    pub fn transparent_whitespace(mut self, transparent_whitespace: bool) -> Self {
        self.transparent_whitespace = transparent_whitespace;
        self
    }

    pub fn pixel_mode(mut self) -> Self {
        self.pixel_mode = true;
        self
    }

    pub fn size(&self) -> (u16, u16) {
        let width = self.lines.iter().map(|line| line.chars().count()).max().unwrap_or(0) as u16;
        let height = self.lines.len() as u16;
        (width, height)
    }

    fn render_lines(self, area: Rect, buf: &mut Buffer) {
        for (row, line) in self.lines.into_iter().enumerate() {
            if row as u16 >= area.height {
                break;
            }
            let (prefix, line) = if self.transparent_whitespace {
                let prefix = line.chars().take_while(|c| c.is_whitespace()).count() as u16;
                (prefix, line.trim().to_string())
            } else {
                (0, line)
            };
            if prefix >= area.width {
                continue;
            }
            let width = (line.chars().count() as u16).min(area.width - prefix);
            let line_area = Rect { x: area.x + prefix, y: area.y + row as u16, width, height: 1 };
            match self.style {
                Some(style) => Text::from(line).style(style).render(line_area, buf),
                None => Text::from(line).render(line_area, buf),
            }
        }
    }

    fn render_pixels(self, area: Rect, buf: &mut Buffer) {
        for (row, line) in self.lines.into_iter().enumerate() {
            if row as u16 >= area.height {
                break;
            }
            for (col, c) in line.chars().enumerate() {
                if col as u16 >= area.width {
                    break;
                }
                if self.transparent_whitespace && c.is_whitespace() {
                    continue;
                }
                let cell = Rect { x: area.x + col as u16, y: area.y + row as u16, width: 1, height: 1 };
                let span = Span::from(c.to_string());
                match self.style {
                    Some(style) => span.style(style).render(cell, buf),
                    None => span.render(cell, buf),
                }
            }
        }
    }
}

impl Widget for Sprite {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        if self.pixel_mode {
            self.render_pixels(area, buf);
        } else {
            self.render_lines(area, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use ratatui::{backend::TestBackend, Terminal};

    use super::*;

    fn render_to_strings(sprite: Sprite, width: u16, height: u16) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                f.render_widget(sprite, area);
            })
            .unwrap();
        let buffer = terminal.backend().buffer().clone();
        (0..height)
            .map(|y| (0..width).map(|x| buffer[(x, y)].symbol().to_string()).collect::<String>())
            .collect()
    }

    #[test]
    fn test_size() {
        let sprite = Sprite::from_text("\nab\nabcd\n");
        assert_eq!(sprite.size(), (4, 2));
    }

    #[test]
    fn test_line_mode_render() {
        let lines = render_to_strings(Sprite::new(vec!["ab", "cd"]), 4, 3);
        assert_eq!(lines, vec!["ab  ", "cd  ", "    "]);
    }

    #[test]
    fn test_pixel_mode_keeps_background() {
        let mut terminal = Terminal::new(TestBackend::new(3, 1)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                f.render_widget(Sprite::new(vec!["###"]), area);
                f.render_widget(Sprite::new(vec!["o o"]).transparent_whitespace(true).pixel_mode(), area);
            })
            .unwrap();
        let buffer = terminal.backend().buffer().clone();
        let row: String = (0..3).map(|x| buffer[(x, 0)].symbol().to_string()).collect();
        assert_eq!(row, "o#o");
    }

    #[test]
    fn test_clipped_to_area() {
        let lines = render_to_strings(Sprite::new(vec!["abcdef", "ghijkl", "mnopqr"]), 4, 2);
        assert_eq!(lines, vec!["abcd", "ghij"]);
    }
}
