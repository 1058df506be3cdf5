pub use kurbo::BezPath;
pub use kurbo::Point as BezPoint;
use ttf_parser::OutlineBuilder;

/// Collects a glyph outline into a [`BezPath`], scaling from font units and
/// flipping Y so the outline sits on a y-down canvas with its origin on the
/// baseline.
pub struct GlyphProxy {
    path: BezPath,
    scale: f64,
}

impl GlyphProxy {
    pub fn new(scale: f64) -> GlyphProxy {
        GlyphProxy {
            path: BezPath::new(),
            scale,
        }
    }

    pub fn path(&self) -> BezPath {
        self.path.clone()
    }

    fn point(&self, x: f32, y: f32) -> BezPoint {
        BezPoint::new(f64::from(x) * self.scale, -f64::from(y) * self.scale)
    }
}

impl OutlineBuilder for GlyphProxy {
    fn move_to(&mut self, x: f32, y: f32) {
        let to = self.point(x, y);
        self.path.move_to(to);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let to = self.point(x, y);
        self.path.line_to(to);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let ctrl = self.point(x1, y1);
        let to = self.point(x, y);
        self.path.quad_to(ctrl, to);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let ctrl0 = self.point(x1, y1);
        let ctrl1 = self.point(x2, y2);
        let to = self.point(x, y);
        self.path.curve_to(ctrl0, ctrl1, to);
    }

    fn close(&mut self) {
        self.path.close_path();
    }
}
