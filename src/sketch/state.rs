use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::errors::SketchError;

/// How shaky the pen is.
///
/// `segment_size` is the target length of each sub-segment a sketchy line
/// is broken into, `shake` is the full width of the random displacement
/// applied to each point (each axis moves by up to `shake / 2`).
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct SketchState {
    pub segment_size: f64,
    pub shake: f64,
}

impl Default for SketchState {
    fn default() -> Self {
        SketchState {
            segment_size: 15.0,
            shake: 5.0,
        }
    }
}

impl SketchState {
    pub fn new(segment_size: f64, shake: f64) -> Result<SketchState, SketchError> {
        let state = SketchState {
            segment_size,
            shake,
        };
        state.validate()?;
        Ok(state)
    }

    /// `segment_size` must be positive and `shake` non-negative, both finite.
    /// Bad values are rejected rather than clamped.
    pub fn validate(&self) -> Result<(), SketchError> {
        if !(self.segment_size.is_finite() && self.segment_size > 0.0) {
            return Err(SketchError::InvalidConfiguration(
                "segment_size",
                self.segment_size,
            ));
        }
        self.validate_shake()
    }

    /// Just the `shake` half of [`SketchState::validate`].
    pub fn validate_shake(&self) -> Result<(), SketchError> {
        if !(self.shake.is_finite() && self.shake >= 0.0) {
            return Err(SketchError::InvalidConfiguration("shake", self.shake));
        }
        Ok(())
    }

    /// Half the shake; the per-axis jitter range is `[-d, d]`.
    pub fn half_shake(&self) -> f64 {
        self.shake / 2.0
    }

    pub fn from_ron_str(data: &str) -> Result<SketchState> {
        let state: SketchState = ron::from_str(data)?;
        state.validate()?;
        Ok(state)
    }

    pub fn to_ron_string(&self) -> Result<String> {
        Ok(ron::to_string(self)?)
    }

    pub fn from_file(path: &Path) -> Result<SketchState> {
        let data = std::fs::read_to_string(path)?;
        Self::from_ron_str(data.as_str())
    }

    pub fn to_file(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_ron_string()?)?;
        Ok(())
    }
}
