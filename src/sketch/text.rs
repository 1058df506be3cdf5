use tracing::debug;

use crate::context::DrawingContext;
use crate::errors::SketchError;
use crate::random::RandomSource;
use crate::sketch::jitter::checked_coord;
use crate::sketch::Sketch;

/// Glyph rotation, in radians per unit of half-shake.
const ROTATION_PER_SHAKE: f64 = 0.05;

impl<C: DrawingContext, R: RandomSource> Sketch<C, R> {
    /// Draws one glyph at x,y, tilted and nudged, and returns its advance.
    fn sketch_glyph(&mut self, glyph: char, x: f64, y: f64) -> Result<f64, SketchError> {
        let d = self.state.half_shake();
        let rot = d * ROTATION_PER_SHAKE;
        self.context.translate(x, y);
        let angle = self.wobble(rot);
        self.context.rotate(angle);
        let (jx, jy) = (self.wobble(d), self.wobble(d));
        self.context
            .draw_glyph(glyph, jx, jy)
            .map_err(|err| SketchError::FontUnavailable(glyph, err))?;
        self.context
            .measure_glyph(glyph)
            .map_err(|err| SketchError::FontUnavailable(glyph, err))
    }

    /// Hand-letters `text` with its baseline starting at x,y.
    ///
    /// Glyphs advance along an unperturbed baseline, but each one is drawn
    /// with its own small rotation and offset. A glyph the font can't draw or
    /// measure stops the run with [`SketchError::FontUnavailable`]. Only the
    /// shake is checked here; `segment_size` plays no part in lettering.
    pub fn draw_string(&mut self, text: &str, x: f64, y: f64) -> Result<(), SketchError> {
        self.checked_shake()?;
        let mut x = checked_coord("x", x)?;
        let y = checked_coord("y", y)?;
        debug!(chars = text.chars().count(), x, y, "Sketching text");
        for glyph in text.chars() {
            self.context.push_state();
            let placed = self.sketch_glyph(glyph, x, y);
            self.context.pop_state()?;
            x += placed?;
        }
        Ok(())
    }
}
