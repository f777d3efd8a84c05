//! Minimal 2-D drawing surface.
//!
//! Widgets render through [`Surface`] so the same drawing code targets a
//! browser canvas, a terminal, or a [`DrawList`] recorder in tests.

/// CSS color string (`"#0a0f1a"`, `"rgba(122, 162, 255, 0.25)"`, ...).
pub type Color = &'static str;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn center_x(&self) -> f64 {
        self.x + self.w * 0.5
    }
}

pub trait Surface {
    /// Drawable area in pixels `(width, height)`.
    fn size(&self) -> (f64, f64);

    fn clear(&mut self, color: Color);

    fn fill_rect(&mut self, rect: Rect, color: Color);

    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f64);

    fn fill_circle(&mut self, cx: f64, cy: f64, r: f64, color: Color);

    fn line(&mut self, from: (f64, f64), to: (f64, f64), color: Color, width: f64);

    /// Left-aligned text with its baseline at `(x, y)`.
    fn text(&mut self, x: f64, y: f64, text: &str, color: Color);
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    FillRect(Rect, Color),
    StrokeRect(Rect, Color, f64),
    FillCircle { cx: f64, cy: f64, r: f64, color: Color },
    Line { from: (f64, f64), to: (f64, f64), color: Color, width: f64 },
    Text { x: f64, y: f64, text: String, color: Color },
}

/// Records draw calls instead of rasterizing them.
#[derive(Debug, Clone)]
pub struct DrawList {
    width: f64,
    height: f64,
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// All text drawn so far, in order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Surface for DrawList {
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn clear(&mut self, color: Color) {
        // A clear hides everything drawn before it.
        self.commands.clear();
        self.commands.push(DrawCommand::Clear(color));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect(rect, color));
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f64) {
        self.commands.push(DrawCommand::StrokeRect(rect, color, width));
    }

    fn fill_circle(&mut self, cx: f64, cy: f64, r: f64, color: Color) {
        self.commands
            .push(DrawCommand::FillCircle { cx, cy, r, color });
    }

    fn line(&mut self, from: (f64, f64), to: (f64, f64), color: Color, width: f64) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            color,
            width,
        });
    }

    fn text(&mut self, x: f64, y: f64, text: &str, color: Color) {
        self.commands.push(DrawCommand::Text {
            x,
            y,
            text: text.to_string(),
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_discards_previous_frame() {
        let mut dl = DrawList::new(100.0, 50.0);
        dl.fill_rect(Rect::new(0.0, 0.0, 10.0, 10.0), "#fff");
        dl.text(1.0, 2.0, "old", "#fff");
        dl.clear("#000");
        dl.text(1.0, 2.0, "new", "#fff");
        assert_eq!(dl.commands().len(), 2);
        assert_eq!(dl.texts().collect::<Vec<_>>(), vec!["new"]);
        assert_eq!(dl.size(), (100.0, 50.0));
    }
}
