use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;
use std::sync::Arc;

use ttf_parser::{Face, GlyphId};

use crate::context::glyph_proxy::{BezPath, GlyphProxy};

#[derive(Debug)]
pub enum TypographyError {
    FontError(String),
    GlyphNotFound(char),
}

impl Display for TypographyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TypographyError::FontError(msg) => write!(f, "Font error: {}", msg),
            TypographyError::GlyphNotFound(glyph) => write!(f, "No glyph for {:?}", glyph),
        }
    }
}

impl Error for TypographyError {}

/// A font plus a size. Glyph outlines and advances come back in canvas
/// units: `size` is the em height in the same units as the canvas.
#[derive(Clone)]
pub struct Typography {
    data: Arc<Vec<u8>>,
    index: u32,
    size: f64,
}

impl Typography {
    /// Wrap raw TTF/OTF data. The face is parsed once here to reject garbage
    /// early, and again (cheaply) whenever a glyph is needed.
    pub fn from_bytes(data: Vec<u8>, index: u32) -> Result<Self, TypographyError> {
        Face::parse(&data, index).map_err(|err| TypographyError::FontError(err.to_string()))?;
        Ok(Typography {
            data: Arc::new(data),
            index,
            size: 12.0,
        })
    }

    pub fn from_file(path: &Path) -> Result<Self, TypographyError> {
        let data = std::fs::read(path).map_err(|err| {
            TypographyError::FontError(format!("{}: {}", path.display(), err))
        })?;
        Self::from_bytes(data, 0)
    }

    pub fn size(&mut self, size: f64) -> &mut Self {
        self.size = size;
        self
    }

    fn face(&self) -> Result<Face<'_>, TypographyError> {
        Face::parse(self.data.as_slice(), self.index)
            .map_err(|err| TypographyError::FontError(err.to_string()))
    }

    fn glyph(face: &Face<'_>, glyph: char) -> Result<GlyphId, TypographyError> {
        face.glyph_index(glyph)
            .ok_or(TypographyError::GlyphNotFound(glyph))
    }

    fn scale(&self, face: &Face<'_>) -> f64 {
        self.size / f64::from(face.units_per_em())
    }

    /// Horizontal advance of a single glyph.
    pub fn advance(&self, glyph: char) -> Result<f64, TypographyError> {
        let face = self.face()?;
        let id = Self::glyph(&face, glyph)?;
        let advance = face.glyph_hor_advance(id).unwrap_or(0);
        Ok(f64::from(advance) * self.scale(&face))
    }

    /// Outline of a single glyph with its origin on the baseline. Glyphs
    /// without an outline (spaces and friends) give an empty path.
    pub fn outline(&self, glyph: char) -> Result<BezPath, TypographyError> {
        let face = self.face()?;
        let id = Self::glyph(&face, glyph)?;
        let mut proxy = GlyphProxy::new(self.scale(&face));
        face.outline_glyph(id, &mut proxy);
        Ok(proxy.path())
    }
}
