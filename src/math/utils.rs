// src/math/utils.rs

/// Mathematische Konstanten
pub mod constants {
    pub const EPSILON: f32 = 1e-6;
    /// Segmente kürzer als das gelten als Punkt
    pub const DEGENERATE_SEGMENT_LENGTH: f32 = 1e-3;
}

/// Geometrische Hilfsfunktionen (einfach, ohne komplexe Strukturen)
pub mod simple_geometry {
    use crate::math::utils::constants;
    use bevy::math::Vec2;

    /// Berechnet das Kreuzprodukt zweier 2D-Vektoren (Skalar)
    pub fn cross_product_2d(a: Vec2, b: Vec2) -> f32 {
        a.x * b.y - a.y * b.x
    }

    /// Nächster Punkt auf dem Segment `start`-`end`.
    /// Degenerierte Segmente liefern `start`.
    pub fn closest_point_on_segment(point: Vec2, start: Vec2, end: Vec2) -> Vec2 {
        let line = end - start;
        let length = line.length();
        if length < constants::DEGENERATE_SEGMENT_LENGTH {
            return start;
        }

        let direction = line / length;
        let projection = (point - start).dot(direction).clamp(0.0, length);
        start + direction * projection
    }

    /// Vorzeichenbehaftete Dreiecksfläche (verdoppelt), > 0 bei Links-Kurve
    pub fn orient2d(a: Vec2, b: Vec2, c: Vec2) -> f32 {
        cross_product_2d(b - a, c - a)
    }

    /// Prüft ob ein Punkt im Dreieck liegt (Rand zählt als innen)
    pub fn point_in_triangle(point: Vec2, a: Vec2, b: Vec2, c: Vec2) -> bool {
        let sign = |p1: Vec2, p2: Vec2, p3: Vec2| -> f32 {
            (p1.x - p3.x) * (p2.y - p3.y) - (p2.x - p3.x) * (p1.y - p3.y)
        };

        let d1 = sign(point, a, b);
        let d2 = sign(point, b, c);
        let d3 = sign(point, c, a);

        let has_neg = (d1 < 0.0) || (d2 < 0.0) || (d3 < 0.0);
        let has_pos = (d1 > 0.0) || (d2 > 0.0) || (d3 > 0.0);

        !(has_neg && has_pos)
    }
}

#[cfg(test)]
mod tests {
    use super::simple_geometry::*;
    use approx::assert_relative_eq;
    use bevy::math::Vec2;

    #[test]
    fn test_closest_point_clamps_to_segment_ends() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(4.0, 0.0);

        assert_eq!(closest_point_on_segment(Vec2::new(2.0, 3.0), a, b), Vec2::new(2.0, 0.0));
        assert_eq!(closest_point_on_segment(Vec2::new(-1.0, 1.0), a, b), a);
        assert_eq!(closest_point_on_segment(Vec2::new(9.0, -2.0), a, b), b);
        assert_relative_eq!(cross_product_2d(b - a, Vec2::new(0.0, 3.0)), 12.0);
    }

    #[test]
    fn test_closest_point_on_degenerate_segment() {
        let a = Vec2::new(1.0, 1.0);
        assert_eq!(closest_point_on_segment(Vec2::new(5.0, 5.0), a, a), a);
    }

    #[test]
    fn test_point_in_triangle_includes_edges() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(2.0, 0.0);
        let c = Vec2::new(0.0, 2.0);

        assert!(point_in_triangle(Vec2::new(0.5, 0.5), a, b, c));
        assert!(point_in_triangle(Vec2::new(1.0, 0.0), a, b, c));
        assert!(!point_in_triangle(Vec2::new(2.0, 2.0), a, b, c));
        assert!(orient2d(a, b, c) > 0.0);
    }
}
