// src/math/geometry/border/locator.rs

use crate::math::{
    geometry::polygon::Polygon,
    types::Point2D,
    utils::simple_geometry::closest_point_on_segment,
};

/// Toleranz, ab der eine Kante als vertikal gilt
pub const AXIS_TOLERANCE: f32 = 0.01;

/// Ausrichtung einer Randkante
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeAxis {
    Horizontal,
    Vertical,
}

impl EdgeAxis {
    /// Vertikal, wenn sich x kaum ändert, sonst horizontal
    pub fn classify(start: Point2D, end: Point2D) -> Self {
        if (end.x - start.x).abs() < AXIS_TOLERANCE {
            EdgeAxis::Vertical
        } else {
            EdgeAxis::Horizontal
        }
    }

    /// Legt `point` auf die konstante Koordinate der Kante `start`-`end`
    pub fn project(self, point: Point2D, start: Point2D) -> Point2D {
        match self {
            EdgeAxis::Vertical => Point2D::new(start.x, point.y),
            EdgeAxis::Horizontal => Point2D::new(point.x, start.y),
        }
    }
}

/// Treffer der Kantensuche
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeHit {
    /// Kante `index` läuft von Vertex `index` nach `index + 1`
    pub index: usize,
    /// Nächster Punkt auf der Kante
    pub point: Point2D,
    pub distance: f32,
}

/// Zustandslose Hilfsfunktionen rund um den Polygonrand
pub struct BorderLocator;

impl BorderLocator {
    /// Nächste Kante zum Punkt. Bei Gleichstand gewinnt der kleinere Index.
    pub fn closest_edge(polygon: &Polygon, point: Point2D) -> Option<EdgeHit> {
        let mut best: Option<EdgeHit> = None;

        for (index, start, end) in polygon.edges() {
            let closest = closest_point_on_segment(point, start, end);
            let distance = point.distance(closest);

            if best.is_none_or(|hit| distance < hit.distance) {
                best = Some(EdgeHit {
                    index,
                    point: closest,
                    distance,
                });
            }
        }

        best
    }

    /// Index der Kante, auf der `point` liegt (innerhalb `tolerance`)
    pub fn edge_index(polygon: &Polygon, point: Point2D, tolerance: f32) -> Option<usize> {
        Self::closest_edge(polygon, point)
            .filter(|hit| hit.distance <= tolerance)
            .map(|hit| hit.index)
    }

    /// Abstand zum Rand; `None` wenn das Polygon keinen Rand hat
    pub fn distance_to_border(polygon: &Polygon, point: Point2D) -> Option<f32> {
        Self::closest_edge(polygon, point).map(|hit| hit.distance)
    }

    /// Liegt der Punkt höchstens `threshold` vom Rand entfernt?
    pub fn is_on_border(polygon: &Polygon, point: Point2D, threshold: f32) -> bool {
        Self::distance_to_border(polygon, point).is_some_and(|d| d <= threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn playfield() -> Polygon {
        Polygon::new(vec![
            Point2D::new(-5.0, -7.0),
            Point2D::new(5.0, -7.0),
            Point2D::new(5.0, 7.0),
            Point2D::new(-5.0, 7.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_closest_edge_on_rectangle() {
        let polygon = playfield();
        let hit = BorderLocator::closest_edge(&polygon, Point2D::new(4.8, 1.0)).unwrap();
        assert_eq!(hit.index, 1);
        assert_eq!(hit.point, Point2D::new(5.0, 1.0));
        assert_relative_eq!(hit.distance, 0.2, epsilon = 1e-5);
    }

    #[test]
    fn test_corner_tie_prefers_lower_index() {
        let polygon = playfield();
        let hit = BorderLocator::closest_edge(&polygon, Point2D::new(5.0, 7.0)).unwrap();
        assert_eq!(hit.index, 1);
        let hit = BorderLocator::closest_edge(&polygon, Point2D::new(-5.0, -7.0)).unwrap();
        assert_eq!(hit.index, 0);
    }

    #[test]
    fn test_edge_index_respects_tolerance() {
        let polygon = playfield();
        assert_eq!(
            BorderLocator::edge_index(&polygon, Point2D::new(0.0, 6.9), 0.15),
            Some(2)
        );
        assert_eq!(
            BorderLocator::edge_index(&polygon, Point2D::new(0.0, 6.0), 0.15),
            None
        );
        assert!(BorderLocator::is_on_border(&polygon, Point2D::new(-4.97, 0.0), 0.05));
        assert!(!BorderLocator::is_on_border(&Polygon::empty(), Point2D::ZERO, 1.0));
    }

    #[test]
    fn test_edge_axis() {
        assert_eq!(
            EdgeAxis::classify(Point2D::new(-5.0, -7.0), Point2D::new(5.0, -7.0)),
            EdgeAxis::Horizontal
        );
        assert_eq!(
            EdgeAxis::classify(Point2D::new(5.0, -7.0), Point2D::new(5.005, 7.0)),
            EdgeAxis::Vertical
        );
        assert_eq!(
            EdgeAxis::Vertical.project(Point2D::new(4.98, 2.0), Point2D::new(5.0, -7.0)),
            Point2D::new(5.0, 2.0)
        );
    }
}
