use std::{
    error::Error,
    fmt::{self, Display},
};

use crate::context::typography::TypographyError;

/// Errors raised by the sketchy drawing operations themselves.
#[derive(Debug)]
pub enum SketchError {
    /// A sketch parameter is outside its valid range. Carries the parameter
    /// name and the rejected value.
    InvalidConfiguration(&'static str, f64),
    /// A path operation was handed no points at all.
    EmptyGeometry,
    /// The drawing surface could not draw or measure this glyph.
    FontUnavailable(char, ContextError),
    /// Anything else the drawing surface complained about.
    Context(ContextError),
}

impl Display for SketchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SketchError::InvalidConfiguration(name, value) => {
                write!(f, "Invalid sketch configuration: {} = {}", name, value)
            }
            SketchError::EmptyGeometry => write!(f, "Cannot sketch a path with no points."),
            SketchError::FontUnavailable(glyph, err) => {
                write!(f, "Font unavailable for glyph {:?}: {}", glyph, err)
            }
            SketchError::Context(err) => write!(f, "Drawing context error: {}", err),
        }
    }
}

impl Error for SketchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SketchError::FontUnavailable(_, err) | SketchError::Context(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ContextError> for SketchError {
    fn from(error: ContextError) -> Self {
        SketchError::Context(error)
    }
}

/// Errors raised by a drawing context.
#[derive(Debug)]
pub enum ContextError {
    PoppedEmptyStack,
    NoFontSet,
    Typography(TypographyError),
    SvgGenerationError(String),
}

impl std::error::Error for ContextError {}

impl fmt::Display for ContextError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ContextError::PoppedEmptyStack => write!(f, "Popping from an empty context stack."),
            ContextError::NoFontSet => write!(f, "No font set on the context."),
            ContextError::Typography(err) => write!(f, "Typography error: {}", err),
            ContextError::SvgGenerationError(msg) => write!(f, "Svg generation error: {}", msg),
        }
    }
}

impl From<TypographyError> for ContextError {
    fn from(error: TypographyError) -> Self {
        ContextError::Typography(error)
    }
}
