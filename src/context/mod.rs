//! Drawing surfaces.
//!
//! [`DrawingContext`] is the small capability set the sketch code needs from
//! a canvas: a current point and path, a state stack with translate/rotate,
//! stroke/fill, glyphs, and a few style setters that are just passed through.
//!
//! Two implementations ship with the crate: [`PlotContext`], which collects
//! strokes and fills as plotter-ready geometry and writes SVG, and
//! [`recording::RecordingContext`], which only remembers what it was told.
use geo::BoundingRect;
use geo_types::{coord, Geometry, GeometryCollection, LineString, MultiLineString, MultiPolygon};
use geo_types::{Point, Polygon, Rect};
use kurbo::{BezPath, PathEl};
use nalgebra::{Affine2, Matrix3, Point2};
use svg::Document;

use crate::errors::ContextError;

pub mod glyph_proxy;
pub mod operation;
pub mod recording;
pub mod typography;

use operation::Operation;
use typography::Typography;

/// Tolerance used when flattening glyph curves. 0.1mm should be close
/// enough for anybody.
const FLATTEN_ACCURACY: f64 = 0.1;

/// The operations a canvas has to offer before it can be sketched on.
///
/// Coordinates are in user space, that is, before the current
/// transformation is applied.
pub trait DrawingContext {
    /// Starts a new subpath at x,y.
    fn move_to(&mut self, x: f64, y: f64);

    /// Adds a straight segment from the current point. Without a current
    /// point this behaves like `move_to`.
    fn line_to(&mut self, x: f64, y: f64);

    /// Closes the current subpath back to its first point.
    fn close_path(&mut self);

    /// Commits the accumulated path as lines, then clears it.
    fn stroke(&mut self);

    /// Commits the accumulated path as filled areas, then clears it.
    fn fill(&mut self);

    /// The last committed pen position, if there is a path in progress.
    fn current_point(&self) -> Option<Point<f64>>;

    /// Saves the transformation and style state.
    fn push_state(&mut self);

    /// Restores the most recently saved state.
    fn pop_state(&mut self) -> Result<(), ContextError>;

    fn translate(&mut self, dx: f64, dy: f64);

    /// Rotates user space by `angle` radians.
    fn rotate(&mut self, angle: f64);

    /// Draws a single glyph with its origin (on the baseline) at dx,dy.
    fn draw_glyph(&mut self, glyph: char, dx: f64, dy: f64) -> Result<(), ContextError>;

    /// Horizontal advance of a single glyph in user space units.
    fn measure_glyph(&self, glyph: char) -> Result<f64, ContextError>;

    fn set_line_width(&mut self, width: f64);

    fn set_stroke_color(&mut self, color: &str);

    fn set_fill_color(&mut self, color: &str);
}

impl<C: DrawingContext + ?Sized> DrawingContext for &mut C {
    fn move_to(&mut self, x: f64, y: f64) {
        (**self).move_to(x, y)
    }

    fn line_to(&mut self, x: f64, y: f64) {
        (**self).line_to(x, y)
    }

    fn close_path(&mut self) {
        (**self).close_path()
    }

    fn stroke(&mut self) {
        (**self).stroke()
    }

    fn fill(&mut self) {
        (**self).fill()
    }

    fn current_point(&self) -> Option<Point<f64>> {
        (**self).current_point()
    }

    fn push_state(&mut self) {
        (**self).push_state()
    }

    fn pop_state(&mut self) -> Result<(), ContextError> {
        (**self).pop_state()
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        (**self).translate(dx, dy)
    }

    fn rotate(&mut self, angle: f64) {
        (**self).rotate(angle)
    }

    fn draw_glyph(&mut self, glyph: char, dx: f64, dy: f64) -> Result<(), ContextError> {
        (**self).draw_glyph(glyph, dx, dy)
    }

    fn measure_glyph(&self, glyph: char) -> Result<f64, ContextError> {
        (**self).measure_glyph(glyph)
    }

    fn set_line_width(&mut self, width: f64) {
        (**self).set_line_width(width)
    }

    fn set_stroke_color(&mut self, color: &str) {
        (**self).set_stroke_color(color)
    }

    fn set_fill_color(&mut self, color: &str) {
        (**self).set_fill_color(color)
    }
}

/// The part of a [`PlotContext`] that push/pop saves and restores.
#[derive(Clone, Debug)]
struct ContextState {
    transformation: Affine2<f64>,
    stroke_color: String,
    fill_color: String,
    pen_width: f64,
}

/// # PlotContext
///
/// A canvas-style drawing context that turns strokes and fills into
/// plotter-ready geometry. Paths are accumulated in device space (the
/// transformation is applied as each point arrives), and every
/// [`DrawingContext::stroke`] or [`DrawingContext::fill`] becomes one
/// [`Operation`]. When you're done, grab it all with
/// [`PlotContext::to_geo`] or [`PlotContext::to_svg`].
///
/// # Example
///
/// ```rust
/// use aoer_sketch_rs::context::{DrawingContext, PlotContext};
///
/// let mut ctx = PlotContext::new();
/// ctx.set_stroke_color("red");
/// ctx.move_to(10.0, 10.0);
/// ctx.line_to(90.0, 10.0);
/// ctx.line_to(90.0, 90.0);
/// ctx.close_path();
/// ctx.stroke();
/// let svg = ctx.to_svg(100.0, 100.0).unwrap();
/// assert!(svg.to_string().contains("M10,10 L90,10 L90,90 L10,10"));
/// ```
#[derive(Clone)]
pub struct PlotContext {
    operations: Vec<Operation>,
    typography: Option<Typography>,
    state: ContextState,
    stack: Vec<ContextState>,
    path: BezPath,
    current: Option<Point2<f64>>,
    subpath_start: Option<Point2<f64>>,
    closed: bool,
}

impl PlotContext {
    /// I can haz a new default drawing context?
    pub fn new() -> PlotContext {
        PlotContext {
            operations: vec![],
            typography: None,
            state: ContextState {
                transformation: PlotContext::unit_matrix(),
                stroke_color: "black".to_string(),
                fill_color: "black".to_string(),
                pen_width: 0.5,
            },
            stack: vec![],
            path: BezPath::new(),
            current: None,
            subpath_start: None,
            closed: false,
        }
    }

    /// Sets the font used by glyph drawing and measurement.
    pub fn typography(&mut self, typography: &Typography) -> &mut Self {
        self.typography = Some(typography.clone());
        self
    }

    /// Unit matrix. Basically a no-op
    pub fn unit_matrix() -> Affine2<f64> {
        Affine2::from_matrix_unchecked(Matrix3::new(1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0))
    }

    /// Helper to create a translation matrix
    pub fn translate_matrix(tx: f64, ty: f64) -> Affine2<f64> {
        Affine2::from_matrix_unchecked(Matrix3::new(1.0, 0.0, tx, 0.0, 1.0, ty, 0.0, 0.0, 1.0))
    }

    /// Rotation in radians. On a y-down canvas positive angles turn clockwise.
    pub fn rotate_matrix(angle: f64) -> Affine2<f64> {
        Affine2::from_matrix_unchecked(Matrix3::new(
            angle.cos(),
            -angle.sin(),
            0.0,
            angle.sin(),
            angle.cos(),
            0.0,
            0.0,
            0.0,
            1.0,
        ))
    }

    /// Multiplies the current transformation by a new one. The new
    /// transformation is applied first, in the current user space, which is
    /// what translate and rotate want.
    pub fn mul_transform(&mut self, transformation: &Affine2<f64>) -> &mut Self {
        self.state.transformation = self.state.transformation * transformation;
        self
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Bounds of everything stroked or filled so far.
    pub fn bounds(&self) -> Option<Rect<f64>> {
        self.to_geo().bounding_rect()
    }

    pub fn to_geo(&self) -> Geometry<f64> {
        Geometry::GeometryCollection(GeometryCollection::new_from(
            self.operations.iter().map(|op| op.content.clone()).collect(),
        ))
    }

    /// Generates an SVG document of the given size (in mm, one user unit per
    /// mm) with one path per operation.
    pub fn to_svg(&self, width: f64, height: f64) -> Result<Document, ContextError> {
        if !(width > 0.0 && height > 0.0) {
            return Err(ContextError::SvgGenerationError(format!(
                "Invalid document size {}x{}",
                width, height
            )));
        }
        let mut svg = Document::new()
            .set("viewBox", (0.0, 0.0, width, height))
            .set("width", format!("{}mm", width))
            .set("height", format!("{}mm", height));
        for (id, op) in self.operations.iter().enumerate() {
            svg = svg.add(op.to_svg_path(id));
        }
        Ok(svg)
    }

    fn device(&self, x: f64, y: f64) -> Point2<f64> {
        self.state.transformation * Point2::new(x, y)
    }

    fn clear_path(&mut self) {
        self.path = BezPath::new();
        self.current = None;
        self.subpath_start = None;
        self.closed = false;
    }

    fn font(&self) -> Result<&Typography, ContextError> {
        self.typography.as_ref().ok_or(ContextError::NoFontSet)
    }
}

impl Default for PlotContext {
    fn default() -> Self {
        PlotContext::new()
    }
}

/// Flattens a bezier path into polylines, one per subpath.
fn flatten_lines(bezier: &BezPath, accuracy: f64) -> Vec<LineString<f64>> {
    let mut lines: Vec<LineString<f64>> = vec![];
    let mut start = kurbo::Point::ZERO;
    bezier.flatten(accuracy, |el| match el {
        PathEl::MoveTo(pos) => {
            lines.push(LineString::new(vec![coord! {x: pos.x, y: pos.y}]));
            start = pos;
        }
        PathEl::LineTo(pos) => {
            if let Some(line) = lines.last_mut() {
                line.0.push(coord! {x: pos.x, y: pos.y});
            }
        }
        PathEl::ClosePath => {
            if let Some(line) = lines.last_mut() {
                line.0.push(coord! {x: start.x, y: start.y});
            }
        }
        _ => {}
    });
    lines
}

impl DrawingContext for PlotContext {
    fn move_to(&mut self, x: f64, y: f64) {
        let pos = self.device(x, y);
        self.path.move_to((pos.x, pos.y));
        self.current = Some(pos);
        self.subpath_start = Some(pos);
        self.closed = false;
    }

    fn line_to(&mut self, x: f64, y: f64) {
        let from = match self.current {
            Some(from) => from,
            None => return self.move_to(x, y),
        };
        if self.closed {
            self.path.move_to((from.x, from.y));
            self.subpath_start = Some(from);
            self.closed = false;
        }
        let pos = self.device(x, y);
        self.path.line_to((pos.x, pos.y));
        self.current = Some(pos);
    }

    fn close_path(&mut self) {
        if self.current.is_some() {
            self.path.close_path();
            self.current = self.subpath_start;
            self.closed = true;
        }
    }

    fn stroke(&mut self) {
        let lines: Vec<LineString<f64>> = flatten_lines(&self.path, FLATTEN_ACCURACY)
            .into_iter()
            .filter(|line| line.0.len() >= 2)
            .collect();
        if !lines.is_empty() {
            self.operations.push(Operation::stroked(
                MultiLineString::new(lines),
                &self.state.stroke_color,
                self.state.pen_width,
            ));
        }
        self.clear_path();
    }

    fn fill(&mut self) {
        let polys: Vec<Polygon<f64>> = flatten_lines(&self.path, FLATTEN_ACCURACY)
            .into_iter()
            .filter(|line| line.0.len() >= 3)
            .map(|line| Polygon::new(line, vec![]))
            .collect();
        if !polys.is_empty() {
            self.operations.push(Operation::filled(
                MultiPolygon::new(polys),
                &self.state.fill_color,
                self.state.pen_width,
            ));
        }
        self.clear_path();
    }

    fn current_point(&self) -> Option<Point<f64>> {
        let pos = self.current?;
        let inverse = self.state.transformation.try_inverse()?;
        let user = inverse * pos;
        Some(Point::new(user.x, user.y))
    }

    fn push_state(&mut self) {
        self.stack.push(self.state.clone());
    }

    fn pop_state(&mut self) -> Result<(), ContextError> {
        self.state = self.stack.pop().ok_or(ContextError::PoppedEmptyStack)?;
        Ok(())
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.mul_transform(&PlotContext::translate_matrix(dx, dy));
    }

    fn rotate(&mut self, angle: f64) {
        self.mul_transform(&PlotContext::rotate_matrix(angle));
    }

    fn draw_glyph(&mut self, glyph: char, dx: f64, dy: f64) -> Result<(), ContextError> {
        let outline = self.font()?.outline(glyph)?;
        let lines: Vec<LineString<f64>> = flatten_lines(&outline, FLATTEN_ACCURACY)
            .into_iter()
            .filter(|line| line.0.len() >= 2)
            .map(|line| {
                line.0
                    .iter()
                    .map(|c| {
                        let pos = self.device(c.x + dx, c.y + dy);
                        coord! {x: pos.x, y: pos.y}
                    })
                    .collect()
            })
            .collect();
        if !lines.is_empty() {
            self.operations.push(Operation::stroked(
                MultiLineString::new(lines),
                &self.state.stroke_color,
                self.state.pen_width,
            ));
        }
        Ok(())
    }

    fn measure_glyph(&self, glyph: char) -> Result<f64, ContextError> {
        Ok(self.font()?.advance(glyph)?)
    }

    fn set_line_width(&mut self, width: f64) {
        self.state.pen_width = width;
    }

    fn set_stroke_color(&mut self, color: &str) {
        self.state.stroke_color = color.to_string();
    }

    fn set_fill_color(&mut self, color: &str) {
        self.state.fill_color = color.to_string();
    }
}
