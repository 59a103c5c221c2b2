//! Bevy-Plugin für die Capture-Mechanik.
//!
//! Registriert Einstellungen, Eingabe, Events und den Zustand und hängt den
//! Capture-Tick in `FixedUpdate` ein, solange die Simulation läuft.

use super::{
    events::{BorderChangedEvent, CaptureCompletedEvent},
    input::{CaptureInput, gather_capture_input_system},
    settings::CaptureSettings,
    state::SimulationState,
    systems::*,
};
use bevy::prelude::*;

pub struct CapturePlugin;

impl Plugin for CapturePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CaptureSettings>();
        let tick_rate_hz = app
            .world
            .get_resource::<CaptureSettings>()
            .map(|settings| settings.tick_rate_hz)
            .unwrap_or(60.0);

        app.init_resource::<CaptureInput>()
            .insert_resource(Time::<Fixed>::from_hz(tick_rate_hz))
            .add_event::<BorderChangedEvent>()
            .add_event::<CaptureCompletedEvent>()
            .init_state::<SimulationState>()
            .add_systems(
                OnEnter(SimulationState::Initializing),
                init_capture_world_system,
            )
            .add_systems(
                Update,
                finish_initialization_system.run_if(in_state(SimulationState::Initializing)),
            )
            .add_systems(
                Update,
                (
                    gather_capture_input_system,
                    toggle_pause_system,
                    sync_agent_transform_system,
                    log_capture_completed_system
                        .run_if(resource_exists::<super::region::PolygonRegion>),
                ),
            )
            .add_systems(
                FixedUpdate,
                capture_tick_system.run_if(in_state(SimulationState::Running)),
            );
    }
}
