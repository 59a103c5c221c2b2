// src/game/capture/settings.rs
use super::error::{CaptureError, CaptureResult};
use crate::math::{
    geometry::border::BorderTraversal,
    types::{Bounds2D, GridSnap},
};
use bevy::prelude::*;

/// Parameter für Spielfeld, Bewegung und Toleranzen.
/// Wird beim Start eingelesen und danach nicht mehr verändert.
#[derive(Resource, Debug, Clone)]
pub struct CaptureSettings {
    // --- Spielfeld ---
    pub playfield_width: f32,
    pub playfield_height: f32,
    pub grid_pitch: f32,

    // --- Bewegung ---
    /// Einheiten pro Sekunde
    pub move_speed: f32,
    /// Faktor auf `move_speed` beim Zurückkehren zum Anker
    pub return_speed_factor: f32,
    pub tick_rate_hz: f64,

    // --- Toleranzen ---
    pub border_threshold: f32,
    pub edge_lookup_tolerance: f32,
    pub vertex_tolerance: f32,
    pub min_alignment: f32,
    pub corner_merge_distance: f32,
    pub jitter_limit: f32,
    pub orthogonality_tolerance: f32,
    pub arrival_tolerance: f32,

    // --- Debug ---
    pub dump_border_svg: bool,
    pub svg_output_dir: String,
}

impl Default for CaptureSettings {
    fn default() -> Self {
        let grid_pitch = crate::math::types::DEFAULT_GRID_PITCH;
        Self {
            // Spielfeld
            playfield_width: 10.0,
            playfield_height: 14.0,
            grid_pitch,

            // Bewegung
            move_speed: 5.0,
            return_speed_factor: 2.0,
            tick_rate_hz: 60.0,

            // Toleranzen
            border_threshold: grid_pitch,
            edge_lookup_tolerance: 0.15,
            vertex_tolerance: 0.05,
            min_alignment: 0.1,
            corner_merge_distance: 0.1,
            jitter_limit: 0.1,
            orthogonality_tolerance: 0.01,
            arrival_tolerance: 0.01,

            // Debug
            dump_border_svg: false,
            svg_output_dir: "debug_svgs".to_string(),
        }
    }
}

impl CaptureSettings {
    /// Prüft Größen und Raster auf sinnvolle Werte
    pub fn validate(&self) -> CaptureResult<()> {
        let positive = [
            ("playfield_width", self.playfield_width),
            ("playfield_height", self.playfield_height),
            ("grid_pitch", self.grid_pitch),
            ("move_speed", self.move_speed),
            ("return_speed_factor", self.return_speed_factor),
            ("border_threshold", self.border_threshold),
            ("edge_lookup_tolerance", self.edge_lookup_tolerance),
        ];

        for (name, value) in positive {
            if !(value > 0.0 && value.is_finite()) {
                return Err(CaptureError::InvalidSettings {
                    message: format!("{name} must be positive, got {value}"),
                });
            }
        }

        if !(self.tick_rate_hz > 0.0) {
            return Err(CaptureError::InvalidSettings {
                message: format!("tick_rate_hz must be positive, got {}", self.tick_rate_hz),
            });
        }

        Ok(())
    }

    /// Das feste Spielfeld-Rechteck um den Ursprung
    pub fn playfield(&self) -> CaptureResult<Bounds2D> {
        Ok(Bounds2D::centered(
            self.playfield_width,
            self.playfield_height,
        )?)
    }

    pub fn grid(&self) -> CaptureResult<GridSnap> {
        Ok(GridSnap::new(self.grid_pitch)?)
    }

    pub fn traversal(&self) -> BorderTraversal {
        BorderTraversal {
            vertex_tolerance: self.vertex_tolerance,
            min_alignment: self.min_alignment,
            edge_tolerance: self.edge_lookup_tolerance,
        }
    }

    /// Mindestabstand zum Anker, damit ein Rückkehrpunkt als Abschluss zählt
    pub fn min_loop_distance(&self) -> f32 {
        2.0 * self.grid_pitch
    }
}
