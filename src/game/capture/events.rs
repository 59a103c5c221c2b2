// src/game/capture/events.rs
use crate::math::types::Point2D;
use bevy::prelude::*;

/// Der Rand der Region hat sich geändert (auch beim ersten Aufbau)
#[derive(Event, Debug, Clone)]
pub struct BorderChangedEvent {
    pub border: Vec<Point2D>,
    pub area: f32,
}

/// Eine Eroberung wurde abgeschlossen und abgezogen
#[derive(Event, Debug, Clone)]
pub struct CaptureCompletedEvent {
    pub agent: Entity,
    pub captured_area: f32,
    pub remaining_area: f32,
    pub cleared: bool,
}
