use std::f64::consts::TAU;

use geo_types::Point;

use crate::context::DrawingContext;
use crate::errors::SketchError;
use crate::random::RandomSource;
use crate::sketch::jitter::{checked_coord, checked_steps};
use crate::sketch::Sketch;

impl<C: DrawingContext, R: RandomSource> Sketch<C, R> {
    /// Builds a shaky closed circle. The circumference is divided into
    /// segment sized arcs; each vertex is jittered and joined directly,
    /// without further subdivision. Negative radii are treated as positive.
    /// Non-finite input, or a circle needing more than
    /// [`MAX_STEPS`](crate::sketch::jitter::MAX_STEPS)
    /// vertices, is rejected before anything is drawn.
    pub fn circle(&mut self, xc: f64, yc: f64, r: f64) -> Result<(), SketchError> {
        self.checked_state()?;
        let xc = checked_coord("x", xc)?;
        let yc = checked_coord("y", yc)?;
        let r = checked_coord("r", r)?.abs();
        let d = self.state.half_shake();
        let steps = checked_steps(r * TAU / self.state.segment_size)?;
        let res = if steps > 0.0 { TAU / steps } else { 0.0 };
        // One vertex for every a = i * res with a < 2π, and always at least one.
        let vertices = (steps.ceil() as usize).max(1);
        for i in 0..vertices {
            let a = i as f64 * res;
            let x = xc + a.cos() * r + self.wobble(d);
            let y = yc + a.sin() * r + self.wobble(d);
            if i == 0 {
                self.context.move_to(x, y);
            } else {
                self.context.line_to(x, y);
            }
        }
        self.context.close_path();
        Ok(())
    }

    pub fn stroke_circle(&mut self, xc: f64, yc: f64, r: f64) -> Result<(), SketchError> {
        self.circle(xc, yc, r)?;
        self.context.stroke();
        Ok(())
    }

    pub fn fill_circle(&mut self, xc: f64, yc: f64, r: f64) -> Result<(), SketchError> {
        self.circle(xc, yc, r)?;
        self.context.fill();
        Ok(())
    }

    /// Builds a shaky rectangle, clockwise from the top-left corner and back.
    pub fn rectangle(&mut self, x: f64, y: f64, w: f64, h: f64) -> Result<(), SketchError> {
        self.jittered_move_to(x, y)?;
        self.jittered_line_to(x + w, y)?;
        self.jittered_line_to(x + w, y + h)?;
        self.jittered_line_to(x, y + h)?;
        self.jittered_line_to(x, y)
    }

    pub fn stroke_rectangle(&mut self, x: f64, y: f64, w: f64, h: f64) -> Result<(), SketchError> {
        self.rectangle(x, y, w, h)?;
        self.context.stroke();
        Ok(())
    }

    pub fn fill_rectangle(&mut self, x: f64, y: f64, w: f64, h: f64) -> Result<(), SketchError> {
        self.rectangle(x, y, w, h)?;
        self.context.fill();
        Ok(())
    }

    /// Builds a shaky path through `points`, optionally back to the start.
    /// Needs at least one point.
    pub fn path(&mut self, points: &[Point<f64>], closed: bool) -> Result<(), SketchError> {
        let (first, rest) = points.split_first().ok_or(SketchError::EmptyGeometry)?;
        self.jittered_move_to(first.x(), first.y())?;
        for point in rest {
            self.jittered_line_to(point.x(), point.y())?;
        }
        if closed {
            self.jittered_line_to(first.x(), first.y())?;
        }
        Ok(())
    }

    pub fn stroke_path(&mut self, points: &[Point<f64>], closed: bool) -> Result<(), SketchError> {
        self.path(points, closed)?;
        self.context.stroke();
        Ok(())
    }

    pub fn fill_path(&mut self, points: &[Point<f64>], closed: bool) -> Result<(), SketchError> {
        self.path(points, closed)?;
        self.context.fill();
        Ok(())
    }

    /// A single shaky stroked line.
    pub fn stroke_line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64) -> Result<(), SketchError> {
        self.jittered_move_to(x0, y0)?;
        self.jittered_line_to(x1, y1)?;
        self.context.stroke();
        Ok(())
    }
}
