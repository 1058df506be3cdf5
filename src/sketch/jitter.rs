use tracing::{trace, warn};

use crate::context::DrawingContext;
use crate::errors::SketchError;
use crate::random::RandomSource;
use crate::sketch::Sketch;

/// Upper bound on how many pieces one sketchy line or circle is cut into.
/// Anything that would need more is rejected instead of drawn.
pub const MAX_STEPS: f64 = 100_000.0;

/// Coordinates and radii must be finite.
pub(crate) fn checked_coord(name: &'static str, value: f64) -> Result<f64, SketchError> {
    if value.is_finite() {
        Ok(value)
    } else {
        warn!(name, value, "Rejecting non-finite coordinate");
        Err(SketchError::InvalidConfiguration(name, value))
    }
}

/// Step counts above [`MAX_STEPS`] (or NaN) are rejected.
pub(crate) fn checked_steps(steps: f64) -> Result<f64, SketchError> {
    if steps <= MAX_STEPS {
        Ok(steps)
    } else {
        warn!(steps, max = MAX_STEPS, "Rejecting oversubdivided shape");
        Err(SketchError::InvalidConfiguration("steps", steps))
    }
}

impl<C: DrawingContext, R: RandomSource> Sketch<C, R> {
    pub(crate) fn checked_state(&self) -> Result<(), SketchError> {
        self.state.validate().map_err(|err| {
            warn!(state = ?self.state, "Rejecting sketch operation: {}", err);
            err
        })
    }

    /// Only the shake, for operations that never subdivide.
    pub(crate) fn checked_shake(&self) -> Result<(), SketchError> {
        self.state.validate_shake().map_err(|err| {
            warn!(state = ?self.state, "Rejecting sketch operation: {}", err);
            err
        })
    }

    /// Moves the pen to x,y, give or take half the shake on each axis.
    /// Leaves no mark.
    pub fn jittered_move_to(&mut self, x: f64, y: f64) -> Result<(), SketchError> {
        self.checked_state()?;
        checked_coord("x", x)?;
        checked_coord("y", y)?;
        let d = self.state.half_shake();
        let (jx, jy) = (self.wobble(d), self.wobble(d));
        self.context.move_to(x + jx, y + jy);
        Ok(())
    }

    /// Draws a shaky line from the current point to (roughly) x,y.
    ///
    /// The endpoint is jittered first. The run to it is then cut into
    /// `floor(distance / segment_size)` equal steps, and every intermediate
    /// vertex gets its own jitter. The last line-to lands exactly on the
    /// jittered endpoint. Short runs (a step or less) are a single line-to.
    /// Without a current point this is just a [`Sketch::jittered_move_to`].
    /// Non-finite coordinates, or runs that would need more than
    /// [`MAX_STEPS`] pieces, fail with [`SketchError::InvalidConfiguration`]
    /// and draw nothing.
    pub fn jittered_line_to(&mut self, x: f64, y: f64) -> Result<(), SketchError> {
        self.checked_state()?;
        checked_coord("x", x)?;
        checked_coord("y", y)?;
        let start = match self.context.current_point() {
            Some(start) => start,
            None => return self.jittered_move_to(x, y),
        };
        let d = self.state.half_shake();
        let end_x = x + self.wobble(d);
        let end_y = y + self.wobble(d);
        let dx = end_x - start.x();
        let dy = end_y - start.y();
        let steps = checked_steps((dx.hypot(dy) / self.state.segment_size).floor())?;
        if steps > 1.0 {
            trace!(steps, "Subdividing sketchy line");
            let (res_x, res_y) = (dx / steps, dy / steps);
            let mut i = 1.0;
            while i < steps {
                let jx = self.wobble(d);
                let jy = self.wobble(d);
                self.context
                    .line_to(start.x() + res_x * i + jx, start.y() + res_y * i + jy);
                i += 1.0;
            }
        }
        self.context.line_to(end_x, end_y);
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use crate::context::recording::{DrawCommand, RecordingContext};
    use crate::errors::SketchError;
    use crate::random::{FixedRandom, SeededRandom};
    use crate::sketch::{Sketch, SketchState};
    use geo_types::Point;

    fn still(segment_size: f64) -> SketchState {
        SketchState::new(segment_size, 0.0).unwrap()
    }

    #[test]
    fn test_zero_shake_interpolates_exactly() {
        let mut ctx = RecordingContext::new();
        let mut sketch = Sketch::with_state(&mut ctx, SeededRandom::new(3), still(10.0));
        sketch.jittered_move_to(0.0, 0.0).unwrap();
        sketch.jittered_line_to(40.0, 0.0).unwrap();
        drop(sketch);
        assert_eq!(
            ctx.commands(),
            &[
                DrawCommand::MoveTo(0.0, 0.0),
                DrawCommand::LineTo(10.0, 0.0),
                DrawCommand::LineTo(20.0, 0.0),
                DrawCommand::LineTo(30.0, 0.0),
                DrawCommand::LineTo(40.0, 0.0),
            ]
        );
    }

    #[test]
    fn test_partial_last_segment() {
        let mut ctx = RecordingContext::new();
        let mut sketch = Sketch::with_state(&mut ctx, FixedRandom::centered(), still(10.0));
        sketch.jittered_move_to(0.0, 0.0).unwrap();
        sketch.jittered_line_to(0.0, 35.0).unwrap();
        drop(sketch);
        // floor(35 / 10) = 3 steps of 35/3 each, endpoint still exact.
        let vertices = ctx.vertices();
        assert_eq!(vertices.len(), 4);
        assert!((vertices[1].y() - 35.0 / 3.0).abs() < 1e-12);
        assert!((vertices[2].y() - 70.0 / 3.0).abs() < 1e-12);
        assert_eq!(vertices[3], Point::new(0.0, 35.0));
    }

    #[test]
    fn test_short_segment_has_no_intermediates() {
        for segment_size in [50.0, 100.0, 1000.0] {
            let mut ctx = RecordingContext::new();
            let state = SketchState::new(segment_size, 4.0).unwrap();
            let mut sketch = Sketch::with_state(&mut ctx, SeededRandom::new(11), state);
            sketch.jittered_move_to(0.0, 0.0).unwrap();
            sketch.jittered_line_to(30.0, 30.0).unwrap();
            drop(sketch);
            assert_eq!(ctx.commands().len(), 2);
        }
    }

    #[test]
    fn test_jitter_stays_in_band() {
        let mut ctx = RecordingContext::new();
        let state = SketchState::new(5.0, 6.0).unwrap();
        let mut sketch = Sketch::with_state(&mut ctx, SeededRandom::new(8), state);
        sketch.jittered_move_to(0.0, 0.0).unwrap();
        sketch.jittered_line_to(200.0, 0.0).unwrap();
        drop(sketch);
        let vertices = ctx.vertices();
        // Both ends wander by up to 3, and each intermediate vertex by up to
        // another 3 on top of the interpolated position.
        assert!(vertices.len() > 30);
        for vertex in &vertices {
            assert!(vertex.y().abs() <= 6.0);
        }
        assert!(vertices[0].y().abs() <= 3.0);
        let last = vertices.last().unwrap();
        assert!((last.x() - 200.0).abs() <= 3.0);
    }

    #[test]
    fn test_endpoint_is_not_rejittered() {
        let mut ctx = RecordingContext::new();
        let state = SketchState::new(10.0, 4.0).unwrap();
        let mut sketch = Sketch::with_state(&mut ctx, FixedRandom(1.0), state);
        sketch.jittered_move_to(0.0, 0.0).unwrap();
        sketch.jittered_line_to(100.0, 0.0).unwrap();
        drop(sketch);
        // FixedRandom(1.0) pushes everything by +2 on both axes.
        let vertices = ctx.vertices();
        assert_eq!(vertices[0], Point::new(2.0, 2.0));
        assert_eq!(*vertices.last().unwrap(), Point::new(102.0, 2.0));
        assert_eq!(vertices[1], Point::new(2.0 + 10.0 + 2.0, 2.0 + 2.0));
    }

    #[test]
    fn test_line_without_current_point_moves() {
        let mut ctx = RecordingContext::new();
        let mut sketch = Sketch::with_state(&mut ctx, FixedRandom::centered(), still(10.0));
        sketch.jittered_line_to(5.0, 5.0).unwrap();
        drop(sketch);
        assert_eq!(ctx.commands(), &[DrawCommand::MoveTo(5.0, 5.0)]);
    }

    #[test]
    fn test_invalid_segment_size_rejected() {
        let mut ctx = RecordingContext::new();
        let mut sketch = Sketch::new(&mut ctx, FixedRandom::centered());
        sketch.state.segment_size = 0.0;
        assert!(matches!(
            sketch.jittered_move_to(0.0, 0.0),
            Err(SketchError::InvalidConfiguration("segment_size", _))
        ));
        sketch.state.segment_size = -1.0;
        assert!(sketch.jittered_line_to(10.0, 10.0).is_err());
        sketch.state.segment_size = 10.0;
        sketch.state.shake = -1.0;
        assert!(matches!(
            sketch.jittered_line_to(10.0, 10.0),
            Err(SketchError::InvalidConfiguration("shake", _))
        ));
        drop(sketch);
        assert!(ctx.commands().is_empty());
    }

    #[test]
    fn test_non_finite_coordinates_rejected() {
        let mut ctx = RecordingContext::new();
        let mut sketch = Sketch::new(&mut ctx, SeededRandom::new(4));
        assert!(matches!(
            sketch.jittered_move_to(f64::NAN, 0.0),
            Err(SketchError::InvalidConfiguration("x", _))
        ));
        sketch.jittered_move_to(0.0, 0.0).unwrap();
        assert!(matches!(
            sketch.jittered_line_to(f64::INFINITY, 0.0),
            Err(SketchError::InvalidConfiguration("x", _))
        ));
        assert!(matches!(
            sketch.jittered_line_to(0.0, f64::NEG_INFINITY),
            Err(SketchError::InvalidConfiguration("y", _))
        ));
        drop(sketch);
        assert_eq!(ctx.commands().len(), 1);
    }

    #[test]
    fn test_oversubdivided_line_rejected() {
        let mut ctx = RecordingContext::new();
        let state = SketchState::new(f64::MIN_POSITIVE, 2.0).unwrap();
        let mut sketch = Sketch::with_state(&mut ctx, SeededRandom::new(4), state);
        sketch.jittered_move_to(0.0, 0.0).unwrap();
        assert!(matches!(
            sketch.jittered_line_to(100.0, 0.0),
            Err(SketchError::InvalidConfiguration("steps", _))
        ));
        // Far apart but finite ends overflow the length, which is rejected too.
        sketch.state.segment_size = 10.0;
        sketch.jittered_move_to(-f64::MAX, 0.0).unwrap();
        assert!(matches!(
            sketch.jittered_line_to(f64::MAX, 0.0),
            Err(SketchError::InvalidConfiguration("steps", _))
        ));
        drop(sketch);
        assert_eq!(ctx.count(&DrawCommand::LineTo(100.0, 0.0)), 0);
        assert!(ctx
            .commands()
            .iter()
            .all(|c| matches!(c, DrawCommand::MoveTo(..))));
    }

    #[test]
    fn test_longest_allowed_line() {
        let mut ctx = RecordingContext::new();
        let mut sketch = Sketch::with_state(&mut ctx, FixedRandom::centered(), still(1.0));
        sketch.jittered_move_to(0.0, 0.0).unwrap();
        sketch.jittered_line_to(super::MAX_STEPS, 0.0).unwrap();
        drop(sketch);
        assert_eq!(ctx.vertices().len(), super::MAX_STEPS as usize + 1);
    }

    #[test]
    fn test_same_seed_same_line() {
        let run = |seed| {
            let mut ctx = RecordingContext::new();
            let mut sketch = Sketch::new(&mut ctx, SeededRandom::new(seed));
            sketch.jittered_move_to(10.0, 10.0).unwrap();
            sketch.jittered_line_to(300.0, 120.0).unwrap();
            drop(sketch);
            ctx.commands().to_vec()
        };
        assert_eq!(run(5), run(5));
        assert_ne!(run(5), run(6));
    }
}
