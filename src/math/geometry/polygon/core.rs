// src/math/geometry/polygon/core.rs

use crate::math::{
    error::*,
    types::{Bounds2D, Point2D},
};
use std::fmt;

/// Einfaches Polygon als geordnete Eckpunktfolge.
///
/// Das Polygon ist implizit geschlossen: der letzte Vertex ist mit dem ersten
/// verbunden, der erste Punkt wird *nicht* am Ende wiederholt. Kante `i` läuft
/// von Vertex `i` nach Vertex `(i + 1) % n`. Ein leeres Polygon ist erlaubt und
/// steht für "keine Fläche mehr übrig".
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polygon {
    vertices: Vec<Point2D>,
}

impl Polygon {
    /// Erstellt ein Polygon, mindestens 3 Vertices nötig
    pub fn new(vertices: Vec<Point2D>) -> MathResult<Self> {
        if vertices.len() < 3 {
            return Err(MathError::InsufficientPoints {
                expected: 3,
                actual: vertices.len(),
            });
        }
        Ok(Self { vertices })
    }

    /// Leeres Polygon (vollständig eingenommene Fläche)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Rechteck aus einer Bounding Box, gegen den Uhrzeigersinn
    pub fn from_bounds(bounds: &Bounds2D) -> Self {
        Self {
            vertices: bounds.corners_ccw().to_vec(),
        }
    }

    /// Zugriff auf Vertices
    pub fn vertices(&self) -> &[Point2D] {
        &self.vertices
    }

    pub fn into_vertices(self) -> Vec<Point2D> {
        self.vertices
    }

    /// Anzahl der Vertices
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Ist das Polygon leer?
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Vertex mit Umlauf-Index (`index` darf über `len()` hinausgehen)
    pub fn vertex(&self, index: usize) -> Option<Point2D> {
        if self.vertices.is_empty() {
            return None;
        }
        Some(self.vertices[index % self.vertices.len()])
    }

    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.vertices.len().max(1)
    }

    pub fn prev_index(&self, index: usize) -> usize {
        let n = self.vertices.len().max(1);
        (index + n - 1) % n
    }

    /// Anzahl der Kanten; unter zwei Punkten gibt es keinen Rand
    pub fn edge_count(&self) -> usize {
        if self.vertices.len() < 2 {
            0
        } else {
            self.vertices.len()
        }
    }

    /// Kante `index` als (Start, Ende)
    pub fn edge(&self, index: usize) -> Option<(Point2D, Point2D)> {
        if index >= self.edge_count() {
            return None;
        }
        Some((self.vertices[index], self.vertices[self.next_index(index)]))
    }

    /// Iteriert über alle Kanten als (Index, Start, Ende)
    pub fn edges(&self) -> impl Iterator<Item = (usize, Point2D, Point2D)> + '_ {
        (0..self.edge_count()).map(move |i| {
            (
                i,
                self.vertices[i],
                self.vertices[(i + 1) % self.vertices.len()],
            )
        })
    }

    /// Bounding Box berechnen
    pub fn bounds(&self) -> Option<Bounds2D> {
        Bounds2D::from_points_iter(self.vertices.iter().copied())
    }

    /// Polygon umkehren (Vertices in umgekehrter Reihenfolge)
    pub fn reverse(&mut self) {
        self.vertices.reverse();
    }
}

/// Display-Implementierung für Debugging
impl fmt::Display for Polygon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Polygon({} vertices)", self.vertices.len())
    }
}

/// Konvertierung von Vec<Point2D>
impl TryFrom<Vec<Point2D>> for Polygon {
    type Error = MathError;

    fn try_from(vertices: Vec<Point2D>) -> Result<Self, Self::Error> {
        Self::new(vertices)
    }
}

/// Konvertierung zu Vec<Point2D>
impl From<Polygon> for Vec<Point2D> {
    fn from(polygon: Polygon) -> Self {
        polygon.vertices
    }
}

impl<'a> IntoIterator for &'a Polygon {
    type Item = &'a Point2D;
    type IntoIter = std::slice::Iter<'a, Point2D>;

    fn into_iter(self) -> Self::IntoIter {
        self.vertices.iter()
    }
}
