//! # Sketch
//!
//! Hand-drawn shapes on top of any [`DrawingContext`]. Straight runs are
//! broken into short segments whose vertices are shaken by a random amount,
//! and shapes can be restroked several times with independent offsets to
//! build up that scribbled-with-a-pencil density.
//!
//! A [`Sketch`] owns (or borrows, since `&mut` contexts and random sources
//! work too) a context and a [`RandomSource`], plus the [`SketchState`] that
//! every operation reads. Tweak `sketch.state` between calls as you please.
//!
//! # Example
//!
//! ```rust
//! use aoer_sketch_rs::prelude::*;
//!
//! let mut ctx = PlotContext::new();
//! let mut sketch = Sketch::new(&mut ctx, SeededRandom::new(101));
//! sketch.fill_circle(400.0, 400.0, 300.0).unwrap();
//! sketch.state.segment_size = 40.0;
//! sketch.stroke_multi_rect(250.0, 350.0, 200.0, 200.0, 10.0, 3).unwrap();
//! sketch.stroke_multi_line(250.0, 350.0, 350.0, 250.0, 10.0, 3).unwrap();
//! drop(sketch);
//! assert_eq!(ctx.operations().len(), 1 + 4 * 3 + 3);
//! ```
use crate::context::DrawingContext;
use crate::random::RandomSource;

pub mod jitter;
pub mod multi;
pub mod primitives;
pub mod state;
pub mod text;

pub use multi::OffsetGranularity;
pub use state::SketchState;

pub struct Sketch<C: DrawingContext, R: RandomSource> {
    context: C,
    rng: R,
    pub state: SketchState,
}

impl<C: DrawingContext, R: RandomSource> Sketch<C, R> {
    /// A sketch with the default state: 15 unit segments and a shake of 5.
    pub fn new(context: C, rng: R) -> Sketch<C, R> {
        Self::with_state(context, rng, SketchState::default())
    }

    pub fn with_state(context: C, rng: R, state: SketchState) -> Sketch<C, R> {
        Sketch {
            context,
            rng,
            state,
        }
    }

    pub fn context(&self) -> &C {
        &self.context
    }

    /// Direct access to the underlying context, for styling and anything
    /// else that isn't sketchy.
    pub fn context_mut(&mut self) -> &mut C {
        &mut self.context
    }

    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Restart the random sequence. Typically called once per frame.
    pub fn reseed(&mut self, seed: u64) {
        self.rng.reseed(seed);
    }

    pub fn into_inner(self) -> (C, R) {
        (self.context, self.rng)
    }

    /// Uniform draw in `[-d, d]`.
    pub(crate) fn wobble(&mut self, d: f64) -> f64 {
        self.rng.uniform(-d, d)
    }

    pub fn set_line_width(&mut self, width: f64) -> &mut Self {
        self.context.set_line_width(width);
        self
    }

    pub fn set_stroke_color(&mut self, color: &str) -> &mut Self {
        self.context.set_stroke_color(color);
        self
    }

    pub fn set_fill_color(&mut self, color: &str) -> &mut Self {
        self.context.set_fill_color(color);
        self
    }

    pub fn stroke(&mut self) {
        self.context.stroke();
    }

    pub fn fill(&mut self) {
        self.context.fill();
    }
}
