//! ArmyOfEvilRobots sketchy drawing tools
//!
//! Shapes and lettering that look like somebody drew them by hand with a
//! slightly wobbly pen: lines are chopped into short segments with every
//! vertex shaken a little, and shapes can be restroked a few times with
//! independent offsets to build up a scribbled look. Works on top of any
//! [`context::DrawingContext`]; the bundled [`context::PlotContext`] turns
//! the result into plotter-ready geometry and SVG.
//!
//! *CAUTION: This isn't even Alpha quality yet. It's meant to be shaky, but
//! maybe not THAT shaky.*

/// Error types for sketching and drawing contexts
pub mod errors;

/// Drawing contexts: the capability trait, a plotter/SVG context, and a
/// recording context for tests.
pub mod context;

/// Injectable random sources
pub mod random;

/// The sketchy drawing operations themselves
pub mod sketch;

/// Make your life easy! Just import prelude::* and ignore all the warnings!
pub mod prelude {
    pub use crate::context::recording::{DrawCommand, RecordingContext};
    pub use crate::context::typography::Typography;
    pub use crate::context::{DrawingContext, PlotContext};
    pub use crate::errors::{ContextError, SketchError};
    pub use crate::random::{FixedRandom, RandomSource, SeededRandom};
    pub use crate::sketch::{OffsetGranularity, Sketch, SketchState};
}
