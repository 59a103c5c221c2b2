// src/math/geometry/polygon/operations/boolean.rs
//
// Boolean-Operationen über `geo::BooleanOps`. Intern wird in f64 gerechnet,
// nach außen bleiben wir bei Bevy-`Vec2`.

use super::super::Polygon;
use crate::math::{error::*, types::Point2D};
use geo::{BooleanOps, Coord, LineString, MultiPolygon};

type GeoPolygon = geo::Polygon<f64>;

/// Boolean-Operationstypen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BooleanOperation {
    /// Schnittmenge (A ∩ B)
    Intersection,
    /// Differenz (A - B)
    Difference,
}

/// Boolean-Engine für Polygon-Operationen
#[derive(Debug, Clone, Copy, Default)]
pub struct PolygonBoolean;

impl PolygonBoolean {
    pub fn new() -> Self {
        Self
    }

    /// Führt eine Boolean-Operation durch.
    ///
    /// Ergebnis sind nur die Außenringe der Ergebnis-Polygone, Löcher werden
    /// verworfen. Ringe mit weniger als 3 Punkten fallen heraus.
    pub fn execute(
        &self,
        subject: &Polygon,
        clip: &Polygon,
        operation: BooleanOperation,
    ) -> MathResult<Vec<Polygon>> {
        if subject.len() < 3 || clip.len() < 3 {
            return Err(MathError::InsufficientPoints {
                expected: 3,
                actual: subject.len().min(clip.len()),
            });
        }

        Ok(self.apply(&[subject], &[clip], operation))
    }

    /// Variante mit mehreren Clip-Polygonen, die gemeinsam abgezogen bzw.
    /// geschnitten werden. Leere Clip-Liste ergibt bei Differenz das Subjekt.
    pub fn execute_many(
        &self,
        subject: &Polygon,
        clips: &[Polygon],
        operation: BooleanOperation,
    ) -> MathResult<Vec<Polygon>> {
        if subject.len() < 3 {
            return Err(MathError::InsufficientPoints {
                expected: 3,
                actual: subject.len(),
            });
        }

        let clips: Vec<&Polygon> = clips.iter().filter(|c| c.len() >= 3).collect();
        Ok(self.apply(&[subject], &clips, operation))
    }

    fn apply(
        &self,
        subject: &[&Polygon],
        clips: &[&Polygon],
        operation: BooleanOperation,
    ) -> Vec<Polygon> {
        let a = to_geo_multi(subject);
        let b = to_geo_multi(clips);

        let result: MultiPolygon<f64> = match operation {
            BooleanOperation::Intersection => a.intersection(&b),
            BooleanOperation::Difference => a.difference(&b),
        };

        result.0.iter().filter_map(from_geo).collect()
    }

    /// A ∩ B
    pub fn intersection(&self, subject: &Polygon, clip: &Polygon) -> MathResult<Vec<Polygon>> {
        self.execute(subject, clip, BooleanOperation::Intersection)
    }
}

/// Konvertierung nach geo (f64, geschlossener Außenring)
pub fn to_geo(polygon: &Polygon) -> GeoPolygon {
    let coords: Vec<Coord<f64>> = polygon
        .vertices()
        .iter()
        .map(|p| Coord {
            x: p.x as f64,
            y: p.y as f64,
        })
        .collect();
    // Polygon::new schließt den Ring selbst
    GeoPolygon::new(LineString::new(coords), vec![])
}

fn to_geo_multi(polygons: &[&Polygon]) -> MultiPolygon<f64> {
    MultiPolygon::new(polygons.iter().map(|p| to_geo(p)).collect())
}

/// Konvertierung zurück, ohne den wiederholten Schlusspunkt
pub fn from_geo(polygon: &GeoPolygon) -> Option<Polygon> {
    let mut points: Vec<Point2D> = polygon
        .exterior()
        .coords()
        .map(|c| Point2D::new(c.x as f32, c.y as f32))
        .collect();

    if points.len() > 1 && points.first() == points.last() {
        points.pop();
    }

    Polygon::new(points).ok()
}
