use geo_types::{Geometry, MultiLineString, MultiPolygon};
use svg::node::element::path::Data;
use svg::node::element::Path;

/// How an operation puts ink down.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Paint {
    Stroke,
    Fill,
}

/// Operations are the finished strokes and fills of a
/// [`crate::context::PlotContext`], already in device coordinates, along with
/// the style state that was active when they were committed.
#[derive(Clone, Debug)]
pub struct Operation {
    pub(crate) paint: Paint,
    pub(crate) content: Geometry<f64>,
    pub(crate) color: String,
    pub(crate) pen_width: f64,
}

impl Operation {
    pub fn stroked(lines: MultiLineString<f64>, color: &str, pen_width: f64) -> Operation {
        Operation {
            paint: Paint::Stroke,
            content: Geometry::MultiLineString(lines),
            color: color.to_string(),
            pen_width,
        }
    }

    pub fn filled(polys: MultiPolygon<f64>, color: &str, pen_width: f64) -> Operation {
        Operation {
            paint: Paint::Fill,
            content: Geometry::MultiPolygon(polys),
            color: color.to_string(),
            pen_width,
        }
    }

    pub fn paint(&self) -> Paint {
        self.paint
    }

    pub fn content(&self) -> &Geometry<f64> {
        &self.content
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn pen_width(&self) -> f64 {
        self.pen_width
    }

    fn path_data(&self) -> Data {
        let mut svg_data = Data::new();
        match &self.content {
            Geometry::MultiLineString(mls) => {
                for line in mls {
                    for coord in line.0.iter().take(1) {
                        svg_data = svg_data.move_to((coord.x, coord.y));
                    }
                    for coord in line.0.iter().skip(1) {
                        svg_data = svg_data.line_to((coord.x, coord.y));
                    }
                }
            }
            Geometry::MultiPolygon(mp) => {
                for poly in mp {
                    let ring = poly.exterior();
                    for coord in ring.0.iter().take(1) {
                        svg_data = svg_data.move_to((coord.x, coord.y));
                    }
                    for coord in ring.0.iter().skip(1) {
                        svg_data = svg_data.line_to((coord.x, coord.y));
                    }
                    svg_data = svg_data.close();
                }
            }
            _ => {}
        }
        svg_data
    }

    /// Renders this operation as a single SVG path element.
    pub fn to_svg_path(&self, id: usize) -> Path {
        let path = Path::new()
            .set("d", self.path_data())
            .set("stroke-linejoin", "round")
            .set("stroke-linecap", "round");
        match self.paint {
            Paint::Stroke => path
                .set("id", format!("stroke-{}", id))
                .set("fill", "none")
                .set("stroke", self.color.clone())
                .set("stroke-width", self.pen_width),
            Paint::Fill => path
                .set("id", format!("fill-{}", id))
                .set("fill", self.color.clone())
                .set("stroke", "none"),
        }
    }
}
