//! Character-cell surface for drawing in a terminal.
//!
//! Pixel coordinates are mapped onto cells of `CELL_W x CELL_H` pixels, so the
//! same scene code that targets a canvas can draw here.

use folio::surface::{Color, Rect, Surface};

pub const CELL_W: f64 = 8.0;
pub const CELL_H: f64 = 16.0;

pub struct CharGrid {
    cols: usize,
    rows: usize,
    cells: Vec<char>,
}

impl CharGrid {
    pub fn new(cols: usize, rows: usize) -> Self {
        let cols = cols.max(1);
        let rows = rows.max(1);
        Self {
            cols,
            rows,
            cells: vec![' '; cols * rows],
        }
    }

    fn cell(&self, x: f64, y: f64) -> Option<usize> {
        if !(x.is_finite() && y.is_finite()) || x < 0.0 || y < 0.0 {
            return None;
        }
        let c = (x / CELL_W) as usize;
        let r = (y / CELL_H) as usize;
        (c < self.cols && r < self.rows).then(|| r * self.cols + c)
    }

    fn put(&mut self, x: f64, y: f64, ch: char) {
        if let Some(i) = self.cell(x, y) {
            self.cells[i] = ch;
        }
    }

    /// Rows joined with newlines, trailing spaces trimmed.
    pub fn render(&self) -> String {
        self.cells
            .chunks(self.cols)
            .map(|row| row.iter().collect::<String>().trim_end().to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Surface for CharGrid {
    fn size(&self) -> (f64, f64) {
        (self.cols as f64 * CELL_W, self.rows as f64 * CELL_H)
    }

    fn clear(&mut self, _color: Color) {
        self.cells.fill(' ');
    }

    fn fill_rect(&mut self, rect: Rect, _color: Color) {
        let mut y = rect.y + CELL_H * 0.5;
        while y < rect.y + rect.h {
            let mut x = rect.x + CELL_W * 0.5;
            while x < rect.x + rect.w {
                self.put(x, y, '#');
                x += CELL_W;
            }
            y += CELL_H;
        }
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f64) {
        let (x0, y0) = (rect.x, rect.y);
        let (x1, y1) = (rect.x + rect.w, rect.y + rect.h);
        self.line((x0, y0), (x1, y0), color, width);
        self.line((x1, y0), (x1, y1), color, width);
        self.line((x1, y1), (x0, y1), color, width);
        self.line((x0, y1), (x0, y0), color, width);
    }

    fn fill_circle(&mut self, cx: f64, cy: f64, _r: f64, _color: Color) {
        self.put(cx, cy, 'o');
    }

    fn line(&mut self, from: (f64, f64), to: (f64, f64), _color: Color, _width: f64) {
        let dx = to.0 - from.0;
        let dy = to.1 - from.1;
        if !(dx.is_finite() && dy.is_finite()) {
            return;
        }
        let glyph = if dy.abs() < f64::EPSILON || dx.abs() > dy.abs() * 4.0 {
            '-'
        } else if dx.abs() * 4.0 < dy.abs() {
            '|'
        } else if (dx > 0.0) == (dy < 0.0) {
            '/'
        } else {
            '\\'
        };
        let cells = (dx / CELL_W).abs().max((dy / CELL_H).abs()).ceil() as usize;
        let steps = cells.clamp(1, 4096) * 2;
        for i in 0..=steps {
            let t = i as f64 / steps as f64;
            self.put(from.0 + dx * t, from.1 + dy * t, glyph);
        }
    }

    fn text(&mut self, x: f64, y: f64, text: &str, _color: Color) {
        // Canvas text sits above its baseline; use the cell the glyphs occupy.
        let y = (y - CELL_H * 0.5).max(0.0);
        for (i, ch) in text.chars().enumerate() {
            self.put(x + i as f64 * CELL_W, y, ch);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_lands_on_its_row() {
        let mut g = CharGrid::new(20, 3);
        g.text(0.0, CELL_H * 1.9, "hi", "#fff");
        assert_eq!(g.render(), "\nhi\n");
    }

    #[test]
    fn out_of_bounds_draws_are_dropped() {
        let mut g = CharGrid::new(4, 2);
        g.fill_circle(-5.0, 0.0, 1.0, "#fff");
        g.fill_circle(1000.0, 1000.0, 1.0, "#fff");
        g.line((0.0, f64::NAN), (10.0, 10.0), "#fff", 1.0);
        assert_eq!(g.render(), "\n");
    }

    #[test]
    fn vertical_line_uses_pipes() {
        let mut g = CharGrid::new(3, 4);
        g.line((12.0, 60.0), (12.0, 4.0), "#fff", 1.0);
        let out = g.render();
        assert_eq!(out.lines().filter(|l| l.contains('|')).count(), 4);
    }

    #[test]
    fn clear_blanks_everything() {
        let mut g = CharGrid::new(5, 2);
        g.fill_rect(Rect::new(0.0, 0.0, 40.0, 32.0), "#fff");
        assert!(g.render().contains('#'));
        g.clear("#000");
        assert_eq!(g.render(), "\n");
    }
}
