use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};
use std::f64::consts::PI;

const FILLED: &str = "●";
const EMPTY: &str = "○";

/// Circular progress indicator drawn as a ring of dots, filled clockwise from
/// twelve o'clock.
#[derive(Debug, Clone)]
pub struct CircularProgress<'a> {
    value: i64,
    minimum: i64,
    maximum: i64,
    foreground: Color,
    background: Color,
    draw_outer_border: bool,
    label: Option<&'a str>,
}

impl<'a> Default for CircularProgress<'a> {
    fn default() -> Self {
        Self {
            value: 0,
            minimum: 0,
            maximum: 100,
            foreground: Color::Green,
            background: Color::DarkGray,
            draw_outer_border: false,
            label: None,
        }
    }
}

impl<'a> CircularProgress<'a> {
    pub fn new(value: i64, maximum: i64) -> Self {
        Self {
            value,
            maximum,
            ..Self::default()
        }
    }

    pub fn minimum(mut self, minimum: i64) -> Self {
        self.minimum = minimum;
        self
    }

    pub fn foreground(mut self, color: Color) -> Self {
        self.foreground = color;
        self
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    pub fn draw_outer_border(mut self, draw: bool) -> Self {
        self.draw_outer_border = draw;
        self
    }

    /// Text centered inside the ring
    pub fn label(mut self, label: &'a str) -> Self {
        self.label = Some(label);
        self
    }

    /// Completed fraction in 0.0..=1.0. An empty range counts as no progress.
    pub fn fraction(&self) -> f64 {
        let span = self.maximum - self.minimum;
        if span <= 0 {
            return 0.0;
        }
        ((self.value - self.minimum) as f64 / span as f64).clamp(0.0, 1.0)
    }
}

/// Cells of an ellipse inscribed in `area`, clockwise from the top, without repeats
fn ring_cells(area: Rect) -> Vec<(u16, u16)> {
    if area.width < 3 || area.height < 3 {
        return Vec::new();
    }

    let rx = (area.width - 1) as f64 / 2.0;
    let ry = (area.height - 1) as f64 / 2.0;
    let cx = area.x as f64 + rx;
    let cy = area.y as f64 + ry;
    let steps = ((rx + ry) * PI * 2.0).ceil() as usize;

    let mut cells: Vec<(u16, u16)> = Vec::with_capacity(steps);
    for step in 0..steps {
        let angle = step as f64 / steps as f64 * 2.0 * PI;
        let x = (cx + rx * angle.sin()).round() as u16;
        let y = (cy - ry * angle.cos()).round() as u16;
        if !cells.contains(&(x, y)) {
            cells.push((x, y));
        }
    }
    cells
}

impl<'a> Widget for CircularProgress<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let ring_area = if self.draw_outer_border && area.width > 4 && area.height > 4 {
            for (x, y) in ring_cells(area) {
                buf.get_mut(x, y)
                    .set_symbol("·")
                    .set_style(Style::default().fg(self.background));
            }
            Rect::new(area.x + 1, area.y + 1, area.width - 2, area.height - 2)
        } else {
            area
        };

        let cells = ring_cells(ring_area);
        let filled = (cells.len() as f64 * self.fraction()).round() as usize;
        for (i, (x, y)) in cells.into_iter().enumerate() {
            let (symbol, color) = if i < filled {
                (FILLED, self.foreground)
            } else {
                (EMPTY, self.background)
            };
            buf.get_mut(x, y)
                .set_symbol(symbol)
                .set_style(Style::default().fg(color));
        }

        if let Some(label) = self.label {
            let width = label.chars().count() as u16;
            if width <= ring_area.width {
                let x = ring_area.x + (ring_area.width - width) / 2;
                let y = ring_area.y + ring_area.height / 2;
                buf.set_string(x, y, label, Style::default().fg(self.foreground));
            }
        }
    }
}
