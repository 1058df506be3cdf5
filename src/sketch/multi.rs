use geo_types::Point;
use tracing::{debug, warn};

use crate::context::DrawingContext;
use crate::errors::SketchError;
use crate::random::RandomSource;
use crate::sketch::Sketch;

/// How independent offsets are handed out when a stroke is replicated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OffsetGranularity {
    /// Every vertex of every repetition moves on its own.
    PerVertex,
    /// Each edge is replicated on its own, with its endpoints moving
    /// independently. Corners drift apart into a loose bundle.
    PerEdge,
    /// One offset per repetition shifts the whole shape, which stays
    /// connected.
    PerShape,
}

impl<C: DrawingContext, R: RandomSource> Sketch<C, R> {
    fn offset_point(&mut self, point: &Point<f64>, separation: f64) -> Point<f64> {
        let dx = self.wobble(separation);
        let dy = self.wobble(separation);
        Point::new(point.x() + dx, point.y() + dy)
    }

    /// Strokes `points` `iterations` times, each time displaced by up to
    /// `separation` on each axis at the given granularity. This is in
    /// addition to the usual shake applied while drawing each line.
    ///
    /// With [`OffsetGranularity::PerEdge`] a single point has no edges and
    /// draws nothing.
    pub fn stroke_replicated(
        &mut self,
        points: &[Point<f64>],
        closed: bool,
        separation: f64,
        iterations: usize,
        granularity: OffsetGranularity,
    ) -> Result<(), SketchError> {
        if points.is_empty() {
            return Err(SketchError::EmptyGeometry);
        }
        if !(separation.is_finite() && separation >= 0.0) {
            warn!(separation, "Rejecting replicated stroke");
            return Err(SketchError::InvalidConfiguration("separation", separation));
        }
        self.checked_state()?;
        debug!(
            ?granularity,
            iterations,
            separation,
            vertices = points.len(),
            "Replicating sketchy stroke"
        );
        match granularity {
            OffsetGranularity::PerVertex => {
                for _ in 0..iterations {
                    let shifted: Vec<Point<f64>> = points
                        .iter()
                        .map(|point| self.offset_point(point, separation))
                        .collect();
                    self.stroke_path(&shifted, closed)?;
                }
            }
            OffsetGranularity::PerEdge => {
                let mut edges: Vec<[Point<f64>; 2]> =
                    points.windows(2).map(|pair| [pair[0], pair[1]]).collect();
                if closed && points.len() > 1 {
                    edges.push([points[points.len() - 1], points[0]]);
                }
                for edge in edges {
                    self.stroke_replicated(
                        &edge,
                        false,
                        separation,
                        iterations,
                        OffsetGranularity::PerVertex,
                    )?;
                }
            }
            OffsetGranularity::PerShape => {
                for _ in 0..iterations {
                    let dx = self.wobble(separation);
                    let dy = self.wobble(separation);
                    let shifted: Vec<Point<f64>> = points
                        .iter()
                        .map(|point| Point::new(point.x() + dx, point.y() + dy))
                        .collect();
                    self.context.push_state();
                    let drawn = self.stroke_path(&shifted, closed);
                    self.context.pop_state()?;
                    drawn?;
                }
            }
        }
        Ok(())
    }

    /// Strokes a bundle of roughly parallel sketchy lines.
    pub fn stroke_multi_line(
        &mut self,
        x0: f64,
        y0: f64,
        x1: f64,
        y1: f64,
        separation: f64,
        iterations: usize,
    ) -> Result<(), SketchError> {
        self.stroke_replicated(
            &[Point::new(x0, y0), Point::new(x1, y1)],
            false,
            separation,
            iterations,
            OffsetGranularity::PerVertex,
        )
    }

    /// Strokes each edge of a rectangle `iterations` times on its own, so
    /// that's `4 * iterations` strokes with corners that don't quite meet.
    pub fn stroke_multi_rect(
        &mut self,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        separation: f64,
        iterations: usize,
    ) -> Result<(), SketchError> {
        self.stroke_replicated(
            &[
                Point::new(x, y),
                Point::new(x + w, y),
                Point::new(x + w, y + h),
                Point::new(x, y + h),
            ],
            true,
            separation,
            iterations,
            OffsetGranularity::PerEdge,
        )
    }

    /// Strokes a whole path `iterations` times, each copy shifted as one
    /// piece.
    pub fn stroke_multi_path(
        &mut self,
        points: &[Point<f64>],
        closed: bool,
        separation: f64,
        iterations: usize,
    ) -> Result<(), SketchError> {
        self.stroke_replicated(
            points,
            closed,
            separation,
            iterations,
            OffsetGranularity::PerShape,
        )
    }
}

#[cfg(test)]
mod test {
    use super::OffsetGranularity;
    use crate::context::recording::{DrawCommand, RecordingContext};
    use crate::errors::SketchError;
    use crate::random::{FixedRandom, SeededRandom};
    use crate::sketch::{Sketch, SketchState};
    use geo_types::Point;

    fn triangle() -> Vec<Point<f64>> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(50.0, 80.0),
        ]
    }

    #[test]
    fn test_multi_rect_stroke_count() {
        for iterations in [0, 1, 3, 7] {
            let mut ctx = RecordingContext::new();
            let mut sketch = Sketch::new(&mut ctx, SeededRandom::new(9));
            sketch
                .stroke_multi_rect(250.0, 350.0, 200.0, 200.0, 10.0, iterations)
                .unwrap();
            drop(sketch);
            assert_eq!(ctx.count(&DrawCommand::Stroke), 4 * iterations);
            assert_eq!(ctx.subpaths().len(), 4 * iterations);
        }
    }

    #[test]
    fn test_multi_rect_edges_in_order() {
        let mut ctx = RecordingContext::new();
        let state = SketchState::new(1000.0, 0.0).unwrap();
        let mut sketch = Sketch::with_state(&mut ctx, FixedRandom::centered(), state);
        sketch.stroke_multi_rect(0.0, 0.0, 10.0, 20.0, 5.0, 2).unwrap();
        drop(sketch);
        let subpaths = ctx.subpaths();
        let expected = [
            [Point::new(0.0, 0.0), Point::new(10.0, 0.0)],
            [Point::new(10.0, 0.0), Point::new(10.0, 20.0)],
            [Point::new(10.0, 20.0), Point::new(0.0, 20.0)],
            [Point::new(0.0, 20.0), Point::new(0.0, 0.0)],
        ];
        for (i, subpath) in subpaths.iter().enumerate() {
            assert_eq!(subpath.as_slice(), &expected[i / 2]);
        }
    }

    #[test]
    fn test_multi_line_bundle() {
        let mut ctx = RecordingContext::new();
        let state = SketchState::new(1000.0, 0.0).unwrap();
        let mut sketch = Sketch::with_state(&mut ctx, SeededRandom::new(77), state);
        sketch
            .stroke_multi_line(250.0, 350.0, 350.0, 250.0, 5.0, 20)
            .unwrap();
        drop(sketch);
        let subpaths = ctx.subpaths();
        assert_eq!(subpaths.len(), 20);
        assert_eq!(ctx.count(&DrawCommand::Stroke), 20);
        for line in &subpaths {
            assert!((line[0].x() - 250.0).abs() <= 5.0);
            assert!((line[0].y() - 350.0).abs() <= 5.0);
            assert!((line[1].x() - 350.0).abs() <= 5.0);
            assert!((line[1].y() - 250.0).abs() <= 5.0);
        }
        // Endpoints move independently of each other.
        let starts: Vec<f64> = subpaths.iter().map(|l| l[0].x() - 250.0).collect();
        let ends: Vec<f64> = subpaths.iter().map(|l| l[1].x() - 350.0).collect();
        assert_ne!(starts, ends);
        assert!(starts.windows(2).any(|w| w[0] != w[1]));
    }

    #[test]
    fn test_multi_path_single_copy_matches_stroke_path() {
        let points = triangle();
        let mut plain = RecordingContext::new();
        let mut sketch = Sketch::new(&mut plain, SeededRandom::new(31));
        sketch.stroke_path(&points, true).unwrap();
        drop(sketch);

        let mut multi = RecordingContext::new();
        let mut sketch = Sketch::new(&mut multi, SeededRandom::new(31));
        sketch.stroke_multi_path(&points, true, 0.0, 1).unwrap();
        drop(sketch);

        assert_eq!(plain.vertices(), multi.vertices());
        assert_eq!(multi.count(&DrawCommand::Stroke), 1);
        assert_eq!(multi.count(&DrawCommand::PushState), 1);
        assert_eq!(multi.count(&DrawCommand::PopState), 1);
        assert_eq!(multi.depth(), 0);
    }

    #[test]
    fn test_multi_path_shifts_whole_shape() {
        let points = triangle();
        let mut ctx = RecordingContext::new();
        let state = SketchState::new(1000.0, 0.0).unwrap();
        let mut sketch = Sketch::with_state(&mut ctx, SeededRandom::new(5), state);
        sketch.stroke_multi_path(&points, true, 8.0, 5).unwrap();
        drop(sketch);
        let subpaths = ctx.subpaths();
        assert_eq!(subpaths.len(), 5);
        for copy in &subpaths {
            assert_eq!(copy.len(), 4);
            let dx = copy[0].x() - points[0].x();
            let dy = copy[0].y() - points[0].y();
            assert!(dx.abs() <= 8.0 && dy.abs() <= 8.0);
            for (drawn, wanted) in copy.iter().zip(points.iter().chain(points.iter().take(1))) {
                assert!((drawn.x() - wanted.x() - dx).abs() < 1e-9);
                assert!((drawn.y() - wanted.y() - dy).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_per_vertex_closed_path() {
        let points = triangle();
        let mut ctx = RecordingContext::new();
        let state = SketchState::new(1000.0, 0.0).unwrap();
        let mut sketch = Sketch::with_state(&mut ctx, FixedRandom(0.0), state);
        sketch
            .stroke_replicated(&points, true, 2.0, 3, OffsetGranularity::PerVertex)
            .unwrap();
        drop(sketch);
        assert_eq!(ctx.count(&DrawCommand::Stroke), 3);
        let subpaths = ctx.subpaths();
        assert_eq!(subpaths[0][0], Point::new(-2.0, -2.0));
        assert_eq!(subpaths[0][3], Point::new(-2.0, -2.0));
    }

    #[test]
    fn test_per_edge_single_point_draws_nothing() {
        let mut ctx = RecordingContext::new();
        let mut sketch = Sketch::new(&mut ctx, SeededRandom::new(5));
        sketch
            .stroke_replicated(&[Point::new(1.0, 1.0)], true, 2.0, 3, OffsetGranularity::PerEdge)
            .unwrap();
        drop(sketch);
        assert!(ctx.commands().is_empty());
    }

    #[test]
    fn test_rejects_bad_input() {
        let mut ctx = RecordingContext::new();
        let mut sketch = Sketch::new(&mut ctx, SeededRandom::new(5));
        assert!(matches!(
            sketch.stroke_multi_path(&[], true, 1.0, 3),
            Err(SketchError::EmptyGeometry)
        ));
        assert!(matches!(
            sketch.stroke_multi_line(0.0, 0.0, 1.0, 1.0, -1.0, 3),
            Err(SketchError::InvalidConfiguration("separation", _))
        ));
        sketch.state.segment_size = -2.0;
        assert!(matches!(
            sketch.stroke_multi_rect(0.0, 0.0, 1.0, 1.0, 1.0, 3),
            Err(SketchError::InvalidConfiguration("segment_size", _))
        ));
        drop(sketch);
        assert!(ctx.commands().is_empty());
    }

    #[test]
    fn test_replication_is_repeatable() {
        let run = || {
            let mut ctx = RecordingContext::new();
            let mut sketch = Sketch::new(&mut ctx, SeededRandom::new(1234));
            sketch.stroke_multi_rect(10.0, 10.0, 100.0, 60.0, 4.0, 3).unwrap();
            sketch.stroke_multi_path(&triangle(), true, 4.0, 3).unwrap();
            drop(sketch);
            ctx.commands().to_vec()
        };
        assert_eq!(run(), run());
    }
}
