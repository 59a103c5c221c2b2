// src/game/capture/input.rs
use super::direction::CardinalDirection;
use crate::math::types::Point2D;
use bevy::prelude::*;

/// Totzone des linken Sticks
pub const STICK_DEAD_ZONE: f32 = 0.2;

/// Eingabe des aktuellen Frames, wird vom Capture-Tick verbraucht.
///
/// Die Anfragen bleiben gesetzt, bis der nächste FixedUpdate-Tick sie
/// abholt, damit kein Tastendruck zwischen zwei Ticks verloren geht.
#[derive(Resource, Debug, Default, Clone)]
pub struct CaptureInput {
    /// Rohe Richtung (Tasten als Einheitsvektor, Stick nach Totzone)
    pub direction: Point2D,
    pub start_requested: bool,
    pub cancel_requested: bool,
    pub recall_requested: bool,
}

impl CaptureInput {
    pub fn direction_vector(&self) -> Point2D {
        self.direction
    }

    /// Holt die Anfragen ab und setzt sie zurück
    pub fn take_requests(&mut self) -> (bool, bool, bool) {
        let requests = (
            self.start_requested,
            self.cancel_requested,
            self.recall_requested,
        );
        self.start_requested = false;
        self.cancel_requested = false;
        self.recall_requested = false;
        requests
    }
}

/// Tastenrichtung mit fester Priorität: hoch > runter > links > rechts
pub fn direction_from_keys(
    up: bool,
    down: bool,
    left: bool,
    right: bool,
) -> Option<CardinalDirection> {
    if up {
        Some(CardinalDirection::Up)
    } else if down {
        Some(CardinalDirection::Down)
    } else if left {
        Some(CardinalDirection::Left)
    } else if right {
        Some(CardinalDirection::Right)
    } else {
        None
    }
}

/// Stick-Auslenkung unterhalb der Totzone zählt nicht
pub fn stick_direction(stick: Point2D, dead_zone: f32) -> Option<Point2D> {
    (stick.is_finite() && stick.length() >= dead_zone).then_some(stick)
}

/// Liest Tastatur und Gamepad in die `CaptureInput`-Ressource.
/// Space drücken startet, Space loslassen bricht ab, R ruft zurück.
pub fn gather_capture_input_system(
    keys: Res<ButtonInput<KeyCode>>,
    gamepads: Res<Gamepads>,
    axes: Res<Axis<GamepadAxis>>,
    buttons: Res<ButtonInput<GamepadButton>>,
    mut input: ResMut<CaptureInput>,
) {
    let mut direction = direction_from_keys(
        keys.any_pressed([KeyCode::KeyW, KeyCode::ArrowUp]),
        keys.any_pressed([KeyCode::KeyS, KeyCode::ArrowDown]),
        keys.any_pressed([KeyCode::KeyA, KeyCode::ArrowLeft]),
        keys.any_pressed([KeyCode::KeyD, KeyCode::ArrowRight]),
    )
    .map(CardinalDirection::as_vec2);

    let mut start = keys.just_pressed(KeyCode::Space);
    let mut cancel = keys.just_released(KeyCode::Space);
    let mut recall = keys.just_pressed(KeyCode::KeyR);

    for gamepad in gamepads.iter() {
        if direction.is_none() {
            let x = axes
                .get(GamepadAxis::new(gamepad, GamepadAxisType::LeftStickX))
                .unwrap_or(0.0);
            let y = axes
                .get(GamepadAxis::new(gamepad, GamepadAxisType::LeftStickY))
                .unwrap_or(0.0);
            direction = stick_direction(Point2D::new(x, y), STICK_DEAD_ZONE);
        }

        let south = GamepadButton::new(gamepad, GamepadButtonType::South);
        start |= buttons.just_pressed(south);
        cancel |= buttons.just_released(south);
        recall |= buttons.just_pressed(GamepadButton::new(gamepad, GamepadButtonType::East));
    }

    input.direction = direction.unwrap_or(Point2D::ZERO);
    input.start_requested |= start;
    input.cancel_requested |= cancel;
    input.recall_requested |= recall;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_priority() {
        assert_eq!(
            direction_from_keys(true, true, true, true),
            Some(CardinalDirection::Up)
        );
        assert_eq!(
            direction_from_keys(false, true, true, false),
            Some(CardinalDirection::Down)
        );
        assert_eq!(
            direction_from_keys(false, false, true, true),
            Some(CardinalDirection::Left)
        );
        assert_eq!(direction_from_keys(false, false, false, false), None);
    }

    #[test]
    fn test_stick_keeps_raw_vector_outside_dead_zone() {
        assert_eq!(stick_direction(Point2D::new(0.1, 0.05), STICK_DEAD_ZONE), None);
        assert_eq!(
            stick_direction(Point2D::new(0.6, 0.6), STICK_DEAD_ZONE),
            Some(Point2D::new(0.6, 0.6))
        );
        assert_eq!(stick_direction(Point2D::new(f32::NAN, 1.0), STICK_DEAD_ZONE), None);

        // Die Achsenwahl passiert erst in der Session
        let input = CaptureInput {
            direction: Point2D::new(0.6, 0.6),
            ..Default::default()
        };
        assert_eq!(
            CardinalDirection::from_vector(input.direction_vector()),
            Some(CardinalDirection::Right)
        );
    }

    #[test]
    fn test_requests_are_consumed_once() {
        let mut input = CaptureInput {
            start_requested: true,
            recall_requested: true,
            ..Default::default()
        };
        assert_eq!(input.take_requests(), (true, false, true));
        assert_eq!(input.take_requests(), (false, false, false));
        assert_eq!(input.direction_vector(), Point2D::ZERO);
    }
}
