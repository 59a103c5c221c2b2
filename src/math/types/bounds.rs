// src/math/types/bounds.rs

use crate::math::{error::*, types::*};
use std::fmt;

/// 2D Bounding Box (Axis-Aligned Bounding Box)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds2D {
    pub min: Point2D,
    pub max: Point2D,
}

impl Bounds2D {
    /// Erstellt eine neue Bounding Box
    pub fn new(min: Point2D, max: Point2D) -> MathResult<Self> {
        if min.x > max.x || min.y > max.y {
            return Err(MathError::InvalidConfiguration {
                message: format!("Invalid bounds: min {:?} > max {:?}", min, max),
            });
        }

        Ok(Self { min, max })
    }

    /// Erstellt eine Bounding Box aus Zentrum und Größe
    pub fn from_center_size(center: Point2D, size: Point2D) -> Self {
        let half_size = size * 0.5;
        Self {
            min: center - half_size,
            max: center + half_size,
        }
    }

    /// Rechteck um den Ursprung, wie das Spielfeld es verwendet
    pub fn centered(width: f32, height: f32) -> MathResult<Self> {
        if !(width > 0.0 && height > 0.0) {
            return Err(MathError::InvalidConfiguration {
                message: format!("Playfield size must be positive, got {width} x {height}"),
            });
        }
        Ok(Self::from_center_size(
            Point2D::ZERO,
            Point2D::new(width, height),
        ))
    }

    /// Erstellt eine Bounding Box die alle Punkte umschließt
    pub fn from_points_iter<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point2D>,
    {
        let mut points_iter = points.into_iter();
        let first_point = points_iter.next()?;

        let mut min = first_point;
        let mut max = first_point;

        for point in points_iter {
            min = min.min(point);
            max = max.max(point);
        }

        Some(Self { min, max })
    }

    /// Breite der Bounding Box
    pub fn width(&self) -> f32 {
        (self.max.x - self.min.x).max(0.0)
    }

    /// Höhe der Bounding Box
    pub fn height(&self) -> f32 {
        (self.max.y - self.min.y).max(0.0)
    }

    /// Fläche der Bounding Box
    pub fn area(&self) -> f32 {
        self.width() * self.height()
    }

    /// Klemmt einen Punkt komponentenweise in die Box
    pub fn clamp_point(&self, point: Point2D) -> Point2D {
        point.clamp(self.min, self.max)
    }

    /// Eckpunkte gegen den Uhrzeigersinn, beginnend links unten
    pub fn corners_ccw(&self) -> [Point2D; 4] {
        [
            self.min,
            Point2D::new(self.max.x, self.min.y),
            self.max,
            Point2D::new(self.min.x, self.max.y),
        ]
    }

    /// Erweitert die Bounding Box um einen Margin
    pub fn expand(&self, margin: f32) -> Self {
        Self {
            min: Point2D::new(self.min.x - margin, self.min.y - margin),
            max: Point2D::new(self.max.x + margin, self.max.y + margin),
        }
    }
}

impl fmt::Display for Bounds2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Bounds2D(min: ({:.3}, {:.3}), max: ({:.3}, {:.3}))",
            self.min.x, self.min.y, self.max.x, self.max.y
        )
    }
}
