// src/game/capture/systems.rs
use super::{
    events::{BorderChangedEvent, CaptureCompletedEvent},
    input::CaptureInput,
    region::{PolygonRegion, SubtractOutcome},
    session::{CaptureSession, TickOutcome},
    settings::CaptureSettings,
    state::SimulationState,
};
use crate::debug::visualization::svg::BorderSvgDumper;
use crate::math::types::Point2D;
use bevy::prelude::*;

/// Markiert das Agenten-Sprite
#[derive(Component, Debug, Default)]
pub struct Agent;

/// Baut Region und Agenten auf. Bei ungültigen Einstellungen bleibt die
/// Simulation in `Initializing` stehen.
pub fn init_capture_world_system(
    mut commands: Commands,
    settings: Res<CaptureSettings>,
    mut border_events: EventWriter<BorderChangedEvent>,
) {
    let mut region = match PolygonRegion::from_settings(&settings) {
        Ok(region) => region,
        Err(err) => {
            error!("Region konnte nicht erstellt werden: {}", err);
            return;
        }
    };

    if settings.dump_border_svg {
        match settings.playfield() {
            Ok(playfield) => {
                let dumper = BorderSvgDumper::new(&settings.svg_output_dir, playfield);
                // Ausgangszustand ebenfalls sichern
                if let Err(err) = dumper.dump(region.polygon()) {
                    warn!("SVG-Export fehlgeschlagen: {}", err);
                }
                region.on_border_changed(dumper.into_observer());
            }
            Err(err) => warn!("SVG-Export deaktiviert: {}", err),
        }
    }

    // Start in der Mitte der unteren Kante
    let spawn = Point2D::new(0.0, -settings.playfield_height * 0.5);
    let session = match CaptureSession::new(&settings, spawn) {
        Ok(session) => session,
        Err(err) => {
            error!("CaptureSession konnte nicht erstellt werden: {}", err);
            return;
        }
    };

    commands.spawn((
        Agent,
        session,
        SpriteBundle {
            sprite: Sprite {
                color: Color::rgb(0.95, 0.75, 0.2),
                custom_size: Some(Vec2::splat(0.3)),
                ..default()
            },
            transform: Transform::from_xyz(spawn.x, spawn.y, 2.0),
            ..default()
        },
    ));

    border_events.send(BorderChangedEvent {
        border: region.border().to_vec(),
        area: region.area(),
    });
    info!(
        "Region initialisiert: {:.1} x {:.1}, Fläche {:.2}",
        settings.playfield_width,
        settings.playfield_height,
        region.area()
    );
    commands.insert_resource(region);
}

/// Wechselt nach erfolgreicher Initialisierung in `Running`
pub fn finish_initialization_system(
    region: Option<Res<PolygonRegion>>,
    mut next_state: ResMut<NextState<SimulationState>>,
) {
    if region.is_some() {
        next_state.set(SimulationState::Running);
        info!("Initialisierung abgeschlossen, Simulation läuft.");
    }
}

/// Fester Simulationsschritt: Anfragen verarbeiten, dann jeden Agenten ticken
pub fn capture_tick_system(
    time: Res<Time>,
    mut input: ResMut<CaptureInput>,
    mut region: ResMut<PolygonRegion>,
    mut sessions: Query<(Entity, &mut CaptureSession)>,
    mut border_events: EventWriter<BorderChangedEvent>,
    mut completed_events: EventWriter<CaptureCompletedEvent>,
) {
    let dt = time.delta_seconds();
    let direction = input.direction_vector();
    let (start, cancel, recall) = input.take_requests();

    for (entity, mut session) in sessions.iter_mut() {
        if start {
            if let Err(err) = session.start(&region) {
                warn!("Capture kann nicht starten: {}", err);
            }
        }
        if recall {
            session.recall();
        }
        if cancel {
            session.cancel();
        }

        match session.tick(direction, dt, &mut region) {
            TickOutcome::Completed(report) => {
                let (captured_area, cleared) = match report.outcome {
                    SubtractOutcome::Replaced {
                        previous_area,
                        area,
                        ..
                    } => (previous_area - area, false),
                    SubtractOutcome::Cleared { previous_area } => (previous_area, true),
                };

                completed_events.send(CaptureCompletedEvent {
                    agent: entity,
                    captured_area,
                    remaining_area: region.area(),
                    cleared,
                });
                border_events.send(BorderChangedEvent {
                    border: region.border().to_vec(),
                    area: region.area(),
                });
            }
            TickOutcome::Rejected(err) => {
                debug!("Capture ohne Flächenänderung beendet: {}", err);
            }
            TickOutcome::Idle | TickOutcome::Moved | TickOutcome::Returned => {}
        }
    }
}

/// Sprite folgt der Session-Position
pub fn sync_agent_transform_system(
    mut agents: Query<(&CaptureSession, &mut Transform), With<Agent>>,
) {
    for (session, mut transform) in agents.iter_mut() {
        let position = session.position();
        transform.translation.x = position.x;
        transform.translation.y = position.y;
    }
}

/// Protokolliert abgeschlossene Eroberungen
pub fn log_capture_completed_system(
    mut events: EventReader<CaptureCompletedEvent>,
    region: Res<PolygonRegion>,
) {
    for event in events.read() {
        info!(
            "Agent {:?} hat {:.2} erobert, verbleibend {:.2} ({:.1}% erobert)",
            event.agent,
            event.captured_area,
            event.remaining_area,
            region.captured_fraction() * 100.0
        );
        if event.cleared {
            info!("Gesamte Fläche erobert.");
        }
    }
}

/// Pausieren/Fortsetzen per Taste P
pub fn toggle_pause_system(
    keys: Res<ButtonInput<KeyCode>>,
    current_state: Res<State<SimulationState>>,
    mut next_state: ResMut<NextState<SimulationState>>,
) {
    if !keys.just_pressed(KeyCode::KeyP) {
        return;
    }
    match current_state.get() {
        SimulationState::Running => next_state.set(SimulationState::Paused),
        SimulationState::Paused => next_state.set(SimulationState::Running),
        SimulationState::Initializing => {}
    }
}
