// src/math/geometry/border/traversal.rs

use super::locator::BorderLocator;
use crate::math::{
    geometry::polygon::Polygon,
    types::Point2D,
    utils::simple_geometry::closest_point_on_segment,
};

/// Bewegung entlang des Polygonrands, inklusive Kantenwechsel an Ecken.
///
/// Die Position wird nach jedem Schritt auf die aktive Kante geklemmt, der
/// Agent kann den Rand dadurch nicht verlassen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BorderTraversal {
    /// Abstand, ab dem eine Position als "an der Ecke" gilt
    pub vertex_tolerance: f32,
    /// Minimales Skalarprodukt für einen Kantenwechsel
    pub min_alignment: f32,
    /// Maximaler Abstand zur nächsten Kante, sonst keine Bewegung
    pub edge_tolerance: f32,
}

impl Default for BorderTraversal {
    fn default() -> Self {
        Self {
            vertex_tolerance: 0.05,
            min_alignment: 0.1,
            edge_tolerance: 0.15,
        }
    }
}

impl BorderTraversal {
    /// Nächste Position nach einem Schritt der Länge `travel` in `direction`
    pub fn step(
        &self,
        current: Point2D,
        direction: Point2D,
        polygon: &Polygon,
        travel: f32,
    ) -> Point2D {
        if polygon.len() < 2 {
            return current;
        }

        let direction = direction.normalize_or_zero();
        if direction == Point2D::ZERO {
            return current;
        }

        let Some(hit) = BorderLocator::closest_edge(polygon, current) else {
            return current;
        };
        if hit.distance > self.edge_tolerance {
            return current;
        }

        let edge = self.active_edge(current, direction, polygon, hit.index);
        let Some((start, end)) = polygon.edge(edge) else {
            return current;
        };

        let target = current + direction * travel;
        closest_point_on_segment(target, start, end)
    }

    /// Wählt an einer Ecke die Kante, die besser zur Eingaberichtung passt.
    ///
    /// Gewertet werden nur die beiden Richtungen, die von der Ecke wegführen:
    /// zurück entlang der aktuellen Kante und weiter entlang der Nachbarkante.
    /// Bei Gleichstand bleibt die aktuelle Kante aktiv.
    fn active_edge(
        &self,
        current: Point2D,
        direction: Point2D,
        polygon: &Polygon,
        edge: usize,
    ) -> usize {
        let Some((start, end)) = polygon.edge(edge) else {
            return edge;
        };

        // (Nachbarkante, Ecke, Ende der aktuellen Kante, fernes Ende der Nachbarkante)
        let (neighbour, vertex, other_end, far_end) =
            if current.distance(end) < self.vertex_tolerance {
                let neighbour = polygon.next_index(edge);
                match polygon.edge(neighbour) {
                    Some((_, far)) => (neighbour, end, start, far),
                    None => return edge,
                }
            } else if current.distance(start) < self.vertex_tolerance {
                let neighbour = polygon.prev_index(edge);
                match polygon.edge(neighbour) {
                    Some((far, _)) => (neighbour, start, end, far),
                    None => return edge,
                }
            } else {
                return edge;
            };

        let stay = (other_end - vertex).normalize_or_zero().dot(direction);
        let switch = (far_end - vertex).normalize_or_zero().dot(direction);

        if switch > stay && switch > self.min_alignment {
            neighbour
        } else {
            edge
        }
    }
}
