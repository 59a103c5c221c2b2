// src/math/geometry/polygon/operations/triangulation.rs
use super::super::{Polygon, properties::shoelace_signed_area};
use crate::math::utils::simple_geometry;
use bevy::log::warn;
use bevy::math::Vec2;

/// Triangle representation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub a: Vec2,
    pub b: Vec2,
    pub c: Vec2,
}

impl Triangle {
    pub fn new(a: Vec2, b: Vec2, c: Vec2) -> Self {
        Self { a, b, c }
    }

    /// Berechnet die Fläche des Dreiecks
    pub fn area(&self) -> f32 {
        0.5 * simple_geometry::orient2d(self.a, self.b, self.c).abs()
    }

    /// Prüft ob ein Punkt im Dreieck liegt (Rand zählt als innen)
    pub fn contains_point(&self, point: Vec2) -> bool {
        simple_geometry::point_in_triangle(point, self.a, self.b, self.c)
    }
}

/// Ergebnis einer Triangulation als Indexliste auf die Polygon-Vertices
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Triangulation {
    pub triangles: Vec<[usize; 3]>,
    /// Wurde auf Fan-Triangulation zurückgefallen?
    pub used_fallback: bool,
}

impl Triangulation {
    /// Flache u32-Indexliste für `Indices::U32`
    pub fn flat_indices(&self) -> Vec<u32> {
        self.triangles
            .iter()
            .flat_map(|t| t.iter().map(|&i| i as u32))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Gesamtfläche aller Dreiecke
    pub fn area(&self, vertices: &[Vec2]) -> f32 {
        self.triangles
            .iter()
            .filter_map(|&[a, b, c]| {
                Some(Triangle::new(*vertices.get(a)?, *vertices.get(b)?, *vertices.get(c)?))
            })
            .map(|triangle| triangle.area())
            .sum()
    }
}

/// Triangulations-Engine: Ear Clipping mit Fan-Fallback
#[derive(Debug, Clone, Copy, Default)]
pub struct PolygonTriangulator;

impl PolygonTriangulator {
    pub fn new() -> Self {
        Self
    }

    /// Trianguliert ein Polygon
    pub fn triangulate(&self, polygon: &Polygon) -> Triangulation {
        self.triangulate_points(polygon.vertices())
    }

    /// Trianguliert eine implizit geschlossene Punktfolge.
    /// Unter 3 Punkten ist das Ergebnis leer.
    pub fn triangulate_points(&self, vertices: &[Vec2]) -> Triangulation {
        let n = vertices.len();
        if n < 3 {
            return Triangulation::default();
        }

        // Ear-Test erwartet Links-Kurven, also CCW-Reihenfolge
        let mut remaining: Vec<usize> = (0..n).collect();
        if shoelace_signed_area(vertices) < 0.0 {
            remaining.reverse();
        }

        let mut triangles = Vec::with_capacity(n - 2);

        while remaining.len() > 3 {
            let count = remaining.len();
            let ear = (0..count).find(|&i| {
                let prev = remaining[(i + count - 1) % count];
                let curr = remaining[i];
                let next = remaining[(i + 1) % count];
                self.is_ear(vertices, prev, curr, next, &remaining)
            });

            match ear {
                Some(i) => {
                    let prev = remaining[(i + count - 1) % count];
                    let next = remaining[(i + 1) % count];
                    triangles.push([prev, remaining[i], next]);
                    remaining.remove(i);
                }
                None => {
                    warn!(
                        "Kein Ear gefunden ({} Vertices übrig), Fan-Triangulation als Fallback",
                        count
                    );
                    triangles.extend(Self::fan(&remaining));
                    return Triangulation {
                        triangles,
                        used_fallback: true,
                    };
                }
            }
        }

        triangles.push([remaining[0], remaining[1], remaining[2]]);

        Triangulation {
            triangles,
            used_fallback: false,
        }
    }

    /// Prüft ob drei aufeinanderfolgende Vertices ein "Ear" bilden
    fn is_ear(
        &self,
        vertices: &[Vec2],
        prev: usize,
        curr: usize,
        next: usize,
        remaining: &[usize],
    ) -> bool {
        let (a, b, c) = (vertices[prev], vertices[curr], vertices[next]);

        // 1. Konvex (Links-Kurve)?
        if simple_geometry::orient2d(a, b, c) <= 0.0 {
            return false;
        }

        // 2. Kein anderer Vertex im Dreieck, Rand eingeschlossen
        let triangle = Triangle::new(a, b, c);
        remaining
            .iter()
            .filter(|&&i| i != prev && i != curr && i != next)
            .map(|&i| vertices[i])
            .filter(|&p| p != a && p != b && p != c)
            .all(|p| !triangle.contains_point(p))
    }

    /// Fan-Triangulation ab dem ersten Index
    fn fan(indices: &[usize]) -> Vec<[usize; 3]> {
        (1..indices.len().saturating_sub(1))
            .map(|i| [indices[0], indices[i], indices[i + 1]])
            .collect()
    }
}
