// src/game/capture/direction.rs
use crate::math::{types::Point2D, utils::constants};

/// Eine der vier erlaubten Bewegungsrichtungen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardinalDirection {
    Up,
    Down,
    Left,
    Right,
}

impl CardinalDirection {
    /// Reduziert einen Richtungsvektor auf die dominante Achse.
    /// Bei gleich großen Komponenten gewinnt die Horizontale.
    pub fn from_vector(direction: Point2D) -> Option<Self> {
        if direction.length_squared() < constants::EPSILON || !direction.is_finite() {
            return None;
        }

        if direction.x.abs() >= direction.y.abs() {
            if direction.x > 0.0 {
                Some(Self::Right)
            } else {
                Some(Self::Left)
            }
        } else if direction.y > 0.0 {
            Some(Self::Up)
        } else {
            Some(Self::Down)
        }
    }

    pub fn as_vec2(self) -> Point2D {
        match self {
            Self::Up => Point2D::Y,
            Self::Down => Point2D::NEG_Y,
            Self::Left => Point2D::NEG_X,
            Self::Right => Point2D::X,
        }
    }
}
