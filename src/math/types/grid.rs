// src/math/types/grid.rs

use crate::math::{error::*, types::Point2D};

/// Standard-Rasterweite für Pfad- und Randpunkte
pub const DEFAULT_GRID_PITCH: f32 = 0.05;

/// Rastet Koordinaten auf ein festes Gitter ein.
///
/// Alle dauerhaft gespeicherten Rand- und Pfadpunkte laufen hier durch, damit
/// spätere Orthogonalitätsprüfungen exakt auf identische Koordinaten treffen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSnap {
    pitch: f32,
}

impl Default for GridSnap {
    fn default() -> Self {
        Self {
            pitch: DEFAULT_GRID_PITCH,
        }
    }
}

impl GridSnap {
    pub fn new(pitch: f32) -> MathResult<Self> {
        if !(pitch > 0.0 && pitch.is_finite()) {
            return Err(MathError::InvalidConfiguration {
                message: format!("Grid pitch must be positive and finite, got {pitch}"),
            });
        }
        Ok(Self { pitch })
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn snap_scalar(&self, value: f32) -> f32 {
        (value / self.pitch).round() * self.pitch
    }

    pub fn snap(&self, point: Point2D) -> Point2D {
        Point2D::new(self.snap_scalar(point.x), self.snap_scalar(point.y))
    }

    /// Liegt der Punkt (bis auf Float-Rauschen) bereits auf dem Gitter?
    pub fn is_aligned(&self, point: Point2D) -> bool {
        let tolerance = self.pitch * 1e-3;
        (point.x - self.snap_scalar(point.x)).abs() < tolerance
            && (point.y - self.snap_scalar(point.y)).abs() < tolerance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_snap_rounds_to_nearest_pitch() {
        let grid = GridSnap::default();
        let snapped = grid.snap(Point2D::new(1.024, -2.376));
        assert_abs_diff_eq!(snapped.x, 1.0, epsilon = 1e-5);
        assert_abs_diff_eq!(snapped.y, -2.4, epsilon = 1e-5);
        assert!(grid.is_aligned(snapped));
        assert!(!grid.is_aligned(Point2D::new(1.02, 0.0)));
    }

    #[test]
    fn test_invalid_pitch_is_rejected() {
        assert!(GridSnap::new(0.0).is_err());
        assert!(GridSnap::new(-0.5).is_err());
        assert!(GridSnap::new(f32::INFINITY).is_err());
        assert_eq!(GridSnap::new(0.25).unwrap().pitch(), 0.25);
    }
}
