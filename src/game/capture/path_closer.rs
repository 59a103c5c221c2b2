// src/game/capture/path_closer.rs
use super::error::{CaptureError, CaptureResult};
use crate::math::{
    geometry::{
        border::{BorderLocator, EdgeAxis},
        polygon::{Polygon, shoelace_signed_area},
    },
    types::Point2D,
};
use bevy::log::debug;

/// Welcher Randbogen den Pfad geschlossen hat
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArcDirection {
    /// Start und Ende liegen auf derselben Kante
    SameEdge,
    /// Aufsteigende Vertex-Indizes vom Ende zum Start
    Forward,
    /// Absteigende Vertex-Indizes
    Backward,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClosingArc {
    pub direction: ArcDirection,
    /// Betrag der Fläche von Pfad plus Bogen
    pub enclosed_area: f32,
    /// Anzahl angehängter Punkte
    pub appended: usize,
}

/// Schließt einen offenen Capture-Pfad entlang des Randes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathCloser {
    /// Maximaler Abstand eines Endpunkts zu seiner Kante
    pub edge_tolerance: f32,
    /// Toleranz für "liegt auf gleicher Achse"
    pub axis_tolerance: f32,
}

impl Default for PathCloser {
    fn default() -> Self {
        Self {
            edge_tolerance: 0.15,
            axis_tolerance: 0.01,
        }
    }
}

impl PathCloser {
    pub fn new(edge_tolerance: f32, axis_tolerance: f32) -> Self {
        Self {
            edge_tolerance,
            axis_tolerance,
        }
    }

    /// Hängt Randpunkte an `path` an, sodass ein geschlossener Ring entsteht.
    ///
    /// `path[0]` ist der Startpunkt und wird gegebenenfalls auf seine Kante
    /// gezogen. Der Ring endet wieder mit dem Startpunkt.
    pub fn close(
        &self,
        path: &mut Vec<Point2D>,
        start: Point2D,
        end: Point2D,
        polygon: &Polygon,
    ) -> CaptureResult<ClosingArc> {
        if polygon.len() < 3 {
            return Err(CaptureError::RegionEmpty);
        }

        let start_edge = self.locate(polygon, start)?;
        let end_edge = self.locate(polygon, end)?;

        let (mut start, end) = (
            Self::onto_edge(polygon, start_edge, start),
            Self::onto_edge(polygon, end_edge, end),
        );

        if start_edge == end_edge {
            Self::set_start(path, start);
            let before = path.len();
            self.push_distinct(path, end);
            self.push_distinct(path, start);

            let enclosed_area = shoelace_signed_area(path).abs();
            debug!(
                "Pfad auf gleicher Kante {} geschlossen, Fläche {:.3}",
                start_edge, enclosed_area
            );
            return Ok(ClosingArc {
                direction: ArcDirection::SameEdge,
                enclosed_area,
                appended: path.len() - before,
            });
        }

        start = self.match_cross_axis(path, polygon, start_edge, start, end);
        Self::set_start(path, start);

        let forward = self.candidate(path, polygon, start_edge, end_edge, start, end, true);
        let backward = self.candidate(path, polygon, start_edge, end_edge, start, end, false);

        let forward_area = shoelace_signed_area(&forward).abs();
        let backward_area = shoelace_signed_area(&backward).abs();
        debug!(
            "Schließbögen: vorwärts {:.3}, rückwärts {:.3} (Kanten {} -> {})",
            forward_area, backward_area, end_edge, start_edge
        );

        let before = path.len();
        let (direction, ring, enclosed_area) = if forward_area <= backward_area {
            (ArcDirection::Forward, forward, forward_area)
        } else {
            (ArcDirection::Backward, backward, backward_area)
        };
        *path = ring;

        Ok(ClosingArc {
            direction,
            enclosed_area,
            appended: path.len() - before,
        })
    }

    fn locate(&self, polygon: &Polygon, point: Point2D) -> CaptureResult<usize> {
        BorderLocator::edge_index(polygon, point, self.edge_tolerance).ok_or(
            CaptureError::NotOnBorder {
                x: point.x,
                y: point.y,
            },
        )
    }

    /// Zieht den Punkt auf die konstante Koordinate seiner Kante
    fn onto_edge(polygon: &Polygon, edge: usize, point: Point2D) -> Point2D {
        match polygon.edge(edge) {
            Some((a, b)) => EdgeAxis::classify(a, b).project(point, a),
            None => point,
        }
    }

    /// Verschiebt den Start entlang seiner Kante auf die freie Koordinate des
    /// Endpunkts. Nur wenn der Start dabei auf der Kante bleibt und der
    /// Anschluss an den nächsten Pfadpunkt achsenparallel bleibt.
    fn match_cross_axis(
        &self,
        path: &[Point2D],
        polygon: &Polygon,
        start_edge: usize,
        start: Point2D,
        end: Point2D,
    ) -> Point2D {
        let Some((a, b)) = polygon.edge(start_edge) else {
            return start;
        };

        let moved = match EdgeAxis::classify(a, b) {
            EdgeAxis::Vertical => Point2D::new(start.x, end.y),
            EdgeAxis::Horizontal => Point2D::new(end.x, start.y),
        };
        if moved == start {
            return start;
        }

        let within_edge = moved.x >= a.x.min(b.x) - self.axis_tolerance
            && moved.x <= a.x.max(b.x) + self.axis_tolerance
            && moved.y >= a.y.min(b.y) - self.axis_tolerance
            && moved.y <= a.y.max(b.y) + self.axis_tolerance;

        let keeps_join = match path.get(1) {
            Some(&next) => self.is_axis_aligned(moved, next),
            None => true,
        };

        if within_edge && keeps_join {
            moved
        } else {
            start
        }
    }

    /// Pfad + Bogen über die Polygon-Vertices.
    /// Vorwärts: Ende, v[e+1] .. v[s], Start. Rückwärts: Ende, v[e] .. v[s+1], Start.
    #[allow(clippy::too_many_arguments)]
    fn candidate(
        &self,
        path: &[Point2D],
        polygon: &Polygon,
        start_edge: usize,
        end_edge: usize,
        start: Point2D,
        end: Point2D,
        forward: bool,
    ) -> Vec<Point2D> {
        let n = polygon.len();
        let mut ring = path.to_vec();
        self.push_distinct(&mut ring, end);

        let (mut index, last) = if forward {
            ((end_edge + 1) % n, start_edge)
        } else {
            (end_edge, (start_edge + 1) % n)
        };

        // Höchstens n Schritte, schützt vor Endlosschleifen
        for _ in 0..n {
            if let Some(vertex) = polygon.vertex(index) {
                self.push_distinct(&mut ring, vertex);
            }
            if index == last {
                break;
            }
            index = if forward {
                polygon.next_index(index)
            } else {
                polygon.prev_index(index)
            };
        }

        self.push_distinct(&mut ring, start);
        ring
    }

    fn set_start(path: &mut Vec<Point2D>, start: Point2D) {
        match path.first_mut() {
            Some(first) => *first = start,
            None => path.push(start),
        }
    }

    fn push_distinct(&self, path: &mut Vec<Point2D>, point: Point2D) {
        let duplicate = path
            .last()
            .is_some_and(|last| last.distance(point) < self.axis_tolerance);
        if !duplicate {
            path.push(point);
        }
    }

    fn is_axis_aligned(&self, a: Point2D, b: Point2D) -> bool {
        (a.x - b.x).abs() < self.axis_tolerance || (a.y - b.y).abs() < self.axis_tolerance
    }
}

/// Indizes `i`, bei denen das Segment `path[i]` -> `path[i + 1]` diagonal ist
pub fn orthogonality_violations(path: &[Point2D], tolerance: f32) -> Vec<usize> {
    path.windows(2)
        .enumerate()
        .filter(|(_, pair)| {
            (pair[0].x - pair[1].x).abs() > tolerance && (pair[0].y - pair[1].y).abs() > tolerance
        })
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn rectangle() -> Polygon {
        Polygon::new(vec![
            Point2D::new(-5.0, -7.0),
            Point2D::new(5.0, -7.0),
            Point2D::new(5.0, 7.0),
            Point2D::new(-5.0, 7.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_corner_capture_takes_smaller_arc() {
        let polygon = rectangle();
        let mut path = vec![Point2D::new(5.0, 0.0), Point2D::new(2.0, 0.0)];

        let arc = PathCloser::default()
            .close(
                &mut path,
                Point2D::new(5.0, 0.0),
                Point2D::new(2.0, 7.0),
                &polygon,
            )
            .unwrap();

        assert_eq!(arc.direction, ArcDirection::Backward);
        assert_relative_eq!(arc.enclosed_area, 21.0, epsilon = 1e-4);
        assert_eq!(
            path,
            vec![
                Point2D::new(5.0, 0.0),
                Point2D::new(2.0, 0.0),
                Point2D::new(2.0, 7.0),
                Point2D::new(5.0, 7.0),
                Point2D::new(5.0, 0.0),
            ]
        );
        assert!(orthogonality_violations(&path, 0.01).is_empty());
    }

    #[test]
    fn test_forward_arc_wins_when_smaller() {
        let polygon = rectangle();
        // Von der rechten Kante nach unten zur unteren Kante
        let mut path = vec![Point2D::new(5.0, -5.0), Point2D::new(3.0, -5.0)];

        let arc = PathCloser::default()
            .close(
                &mut path,
                Point2D::new(5.0, -5.0),
                Point2D::new(3.0, -7.0),
                &polygon,
            )
            .unwrap();

        // Ende auf Kante 0, Start auf Kante 1: vorwärts über v1
        assert_eq!(arc.direction, ArcDirection::Forward);
        assert_relative_eq!(arc.enclosed_area, 4.0, epsilon = 1e-4);
        assert_eq!(path[3], Point2D::new(5.0, -7.0));
    }

    #[test]
    fn test_same_edge_adds_at_most_two_points() {
        let polygon = rectangle();
        let original = vec![
            Point2D::new(5.0, -2.0),
            Point2D::new(3.0, -2.0),
            Point2D::new(3.0, 2.0),
        ];
        let mut path = original.clone();

        let arc = PathCloser::default()
            .close(
                &mut path,
                Point2D::new(5.0, -2.0),
                Point2D::new(4.98, 2.0),
                &polygon,
            )
            .unwrap();

        assert_eq!(arc.direction, ArcDirection::SameEdge);
        assert!(path.len() <= original.len() + 2);
        assert_eq!(path[3], Point2D::new(5.0, 2.0));
        // Keine weiteren Polygon-Vertices im Ring
        assert!(!path.contains(&Point2D::new(5.0, 7.0)));
        assert!(!path.contains(&Point2D::new(5.0, -7.0)));
        assert_relative_eq!(arc.enclosed_area, 8.0, epsilon = 1e-4);
    }

    #[test]
    fn test_straight_cut_matches_cross_axis() {
        let polygon = rectangle();
        // Quer über das Feld, leichter Versatz am Start
        let mut path = vec![Point2D::new(5.0, 0.02)];

        PathCloser::default()
            .close(
                &mut path,
                Point2D::new(5.0, 0.02),
                Point2D::new(-5.0, 0.0),
                &polygon,
            )
            .unwrap();

        assert_eq!(path[0], Point2D::new(5.0, 0.0));
        assert!(orthogonality_violations(&path, 0.01).is_empty());
    }

    #[test]
    fn test_endpoint_off_border_is_rejected() {
        let polygon = rectangle();
        let mut path = vec![Point2D::new(5.0, 0.0)];
        let result = PathCloser::default().close(
            &mut path,
            Point2D::new(5.0, 0.0),
            Point2D::new(0.0, 0.0),
            &polygon,
        );
        assert!(matches!(result, Err(CaptureError::NotOnBorder { .. })));
        assert_eq!(path, vec![Point2D::new(5.0, 0.0)]);
    }

    #[test]
    fn test_orthogonality_violations() {
        let path = [
            Point2D::new(0.0, 0.0),
            Point2D::new(1.0, 0.0),
            Point2D::new(2.0, 1.0),
            Point2D::new(2.0, 1.0),
            Point2D::new(2.0, 3.0),
        ];
        assert_eq!(orthogonality_violations(&path, 0.01), vec![1]);
    }
}
