// src/math/geometry/polygon/properties.rs

use super::core::Polygon;
use crate::math::{types::*, utils::constants};

/// Vorzeichenbehaftete Fläche nach der Shoelace-Formel.
/// Positiv für Punktfolgen gegen den Uhrzeigersinn.
pub fn shoelace_signed_area(points: &[Point2D]) -> f32 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }

    let mut area = 0.0;
    for i in 0..n {
        let current = points[i];
        let next = points[(i + 1) % n];
        area += current.x * next.y - next.x * current.y;
    }
    area * 0.5
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Clockwise,
    CounterClockwise,
    Collinear,
}

/// Trait für Polygon-Eigenschaften
pub trait PolygonProperties {
    /// Vorzeichenbehaftete Fläche (Shoelace)
    fn signed_area(&self) -> f32;

    /// Betrag der Fläche
    fn area(&self) -> f32 {
        self.signed_area().abs()
    }

    /// Prüft die Orientierung (im Uhrzeigersinn oder gegen)
    fn orientation(&self) -> Orientation {
        let area = self.signed_area();
        if area.abs() < constants::EPSILON {
            Orientation::Collinear
        } else if area > 0.0 {
            Orientation::CounterClockwise
        } else {
            Orientation::Clockwise
        }
    }
}

impl PolygonProperties for Polygon {
    fn signed_area(&self) -> f32 {
        shoelace_signed_area(self.vertices())
    }
}

impl Polygon {
    /// Dreht die Punktfolge um, falls sie im Uhrzeigersinn läuft
    pub fn ensure_counter_clockwise(&mut self) {
        if self.orientation() == Orientation::Clockwise {
            self.reverse();
        }
    }
}
