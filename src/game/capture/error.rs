// src/game/capture/error.rs
use crate::math::error::MathError;
use thiserror::Error;

/// Fehler der Capture-Logik. Keiner davon ist fatal: jeder `Err` bedeutet
/// "keine Zustandsänderung in diesem Tick".
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CaptureError {
    #[error("Capture path too short: expected at least {expected} points, got {actual}")]
    PathTooShort { expected: usize, actual: usize },

    #[error("Region is already fully captured")]
    RegionEmpty,

    #[error("Capture path does not overlap the region")]
    NoOverlap,

    #[error("Clip operation produced no usable polygon")]
    NoCandidate,

    #[error("Point ({x:.3}, {y:.3}) is not on the region border")]
    NotOnBorder { x: f32, y: f32 },

    #[error("Invalid capture settings: {message}")]
    InvalidSettings { message: String },

    #[error(transparent)]
    Math(#[from] MathError),
}

pub type CaptureResult<T> = Result<T, CaptureError>;
