use geo_types::Point;

use crate::context::typography::TypographyError;
use crate::context::DrawingContext;
use crate::errors::ContextError;

/// One call made against a [`RecordingContext`].
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    MoveTo(f64, f64),
    LineTo(f64, f64),
    ClosePath,
    Stroke,
    Fill,
    PushState,
    PopState,
    Translate(f64, f64),
    Rotate(f64),
    Glyph(char, f64, f64),
    LineWidth(f64),
    StrokeColor(String),
    FillColor(String),
}

/// A drawing context that draws nothing and remembers everything.
///
/// Coordinates are recorded exactly as they were passed in, without applying
/// translate/rotate. Every glyph measures the same fixed width, and glyphs
/// listed with [`RecordingContext::missing_glyphs`] fail to draw.
#[derive(Clone, Debug)]
pub struct RecordingContext {
    commands: Vec<DrawCommand>,
    current: Option<Point<f64>>,
    subpath_start: Option<Point<f64>>,
    depth: usize,
    glyph_width: f64,
    missing: Vec<char>,
}

impl RecordingContext {
    pub fn new() -> RecordingContext {
        RecordingContext {
            commands: vec![],
            current: None,
            subpath_start: None,
            depth: 0,
            glyph_width: 10.0,
            missing: vec![],
        }
    }

    pub fn glyph_width(&mut self, width: f64) -> &mut Self {
        self.glyph_width = width;
        self
    }

    pub fn missing_glyphs(&mut self, glyphs: &str) -> &mut Self {
        self.missing = glyphs.chars().collect();
        self
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn clear(&mut self) {
        self.commands.clear();
        self.current = None;
        self.subpath_start = None;
    }

    /// Current push/pop nesting depth.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn count(&self, command: &DrawCommand) -> usize {
        self.commands.iter().filter(|c| *c == command).count()
    }

    /// All move-to/line-to coordinates, in order.
    pub fn vertices(&self) -> Vec<Point<f64>> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::MoveTo(x, y) | DrawCommand::LineTo(x, y) => Some(Point::new(*x, *y)),
                _ => None,
            })
            .collect()
    }

    /// Vertices grouped by subpath; every move-to starts a new one.
    pub fn subpaths(&self) -> Vec<Vec<Point<f64>>> {
        let mut out: Vec<Vec<Point<f64>>> = vec![];
        for command in &self.commands {
            match command {
                DrawCommand::MoveTo(x, y) => out.push(vec![Point::new(*x, *y)]),
                DrawCommand::LineTo(x, y) => match out.last_mut() {
                    Some(line) => line.push(Point::new(*x, *y)),
                    None => out.push(vec![Point::new(*x, *y)]),
                },
                _ => {}
            }
        }
        out
    }

    fn glyph_check(&self, glyph: char) -> Result<(), ContextError> {
        if self.missing.contains(&glyph) {
            Err(TypographyError::GlyphNotFound(glyph).into())
        } else {
            Ok(())
        }
    }
}

impl Default for RecordingContext {
    fn default() -> Self {
        RecordingContext::new()
    }
}

impl DrawingContext for RecordingContext {
    fn move_to(&mut self, x: f64, y: f64) {
        self.commands.push(DrawCommand::MoveTo(x, y));
        self.current = Some(Point::new(x, y));
        self.subpath_start = self.current;
    }

    fn line_to(&mut self, x: f64, y: f64) {
        if self.current.is_none() {
            return self.move_to(x, y);
        }
        self.commands.push(DrawCommand::LineTo(x, y));
        self.current = Some(Point::new(x, y));
    }

    fn close_path(&mut self) {
        self.commands.push(DrawCommand::ClosePath);
        self.current = self.subpath_start;
    }

    fn stroke(&mut self) {
        self.commands.push(DrawCommand::Stroke);
        self.current = None;
        self.subpath_start = None;
    }

    fn fill(&mut self) {
        self.commands.push(DrawCommand::Fill);
        self.current = None;
        self.subpath_start = None;
    }

    fn current_point(&self) -> Option<Point<f64>> {
        self.current
    }

    fn push_state(&mut self) {
        self.commands.push(DrawCommand::PushState);
        self.depth += 1;
    }

    fn pop_state(&mut self) -> Result<(), ContextError> {
        if self.depth == 0 {
            return Err(ContextError::PoppedEmptyStack);
        }
        self.depth -= 1;
        self.commands.push(DrawCommand::PopState);
        Ok(())
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.commands.push(DrawCommand::Translate(dx, dy));
    }

    fn rotate(&mut self, angle: f64) {
        self.commands.push(DrawCommand::Rotate(angle));
    }

    fn draw_glyph(&mut self, glyph: char, dx: f64, dy: f64) -> Result<(), ContextError> {
        self.glyph_check(glyph)?;
        self.commands.push(DrawCommand::Glyph(glyph, dx, dy));
        Ok(())
    }

    fn measure_glyph(&self, glyph: char) -> Result<f64, ContextError> {
        self.glyph_check(glyph)?;
        Ok(self.glyph_width)
    }

    fn set_line_width(&mut self, width: f64) {
        self.commands.push(DrawCommand::LineWidth(width));
    }

    fn set_stroke_color(&mut self, color: &str) {
        self.commands.push(DrawCommand::StrokeColor(color.to_string()));
    }

    fn set_fill_color(&mut self, color: &str) {
        self.commands.push(DrawCommand::FillColor(color.to_string()));
    }
}
