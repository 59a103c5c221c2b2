// ./src/debug/ui.rs
use crate::game::capture::{
    CaptureInput, CaptureSession, CaptureSettings, CaptureState, PolygonRegion, SimulationState,
};
use bevy::prelude::*;
use bevy_egui::{
    EguiContexts,
    egui::{self, Window},
};

fn state_label(state: CaptureState) -> &'static str {
    match state {
        CaptureState::OnBorder => "Auf dem Rand",
        CaptureState::Capturing => "Erobert",
        CaptureState::Returning => "Kehrt zurück",
    }
}

pub fn capture_control_ui_system(
    mut contexts: EguiContexts,
    mut input: ResMut<CaptureInput>,
    settings: Res<CaptureSettings>,
    region: Option<Res<PolygonRegion>>,
    sessions: Query<&CaptureSession>,
    mut next_state: ResMut<NextState<SimulationState>>,
    current_state: Res<State<SimulationState>>,
) {
    Window::new("Capture-Steuerung")
        .default_width(300.0)
        .show(contexts.ctx_mut(), |ui| {
            ui.heading("Region");
            match region.as_deref() {
                Some(region) => {
                    ui.label(format!(
                        "Fläche: {:.2} / {:.2}",
                        region.area(),
                        region.initial_area()
                    ));
                    ui.label(format!("Ecken: {}", region.polygon().len()));
                    ui.label(format!(
                        "Erobert: {:.1}%",
                        region.captured_fraction() * 100.0
                    ));
                    if region.is_cleared() {
                        ui.colored_label(egui::Color32::LIGHT_GREEN, "Alles erobert");
                    }
                }
                None => {
                    ui.label("Noch nicht initialisiert.");
                }
            }

            ui.separator();
            ui.heading("Agenten");
            for session in sessions.iter() {
                let position = session.position();
                ui.label(format!(
                    "{} bei ({:.2}, {:.2}), Pfad {:.2}",
                    state_label(session.state()),
                    position.x,
                    position.y,
                    session.path_length()
                ));
            }

            ui.horizontal(|ui| {
                if ui.button("▶ Start").clicked() {
                    input.start_requested = true;
                }
                if ui.button("✖ Abbrechen").clicked() {
                    input.cancel_requested = true;
                }
                if ui.button("↩ Zurückrufen").clicked() {
                    input.recall_requested = true;
                }
            });

            ui.separator();
            let paused = *current_state.get() == SimulationState::Paused;
            if ui
                .button(if paused { "▶ Fortsetzen" } else { "⏸ Pause" })
                .clicked()
            {
                match current_state.get() {
                    SimulationState::Running => next_state.set(SimulationState::Paused),
                    SimulationState::Paused => next_state.set(SimulationState::Running),
                    SimulationState::Initializing => {}
                }
            }

            ui.collapsing("Einstellungen", |ui| {
                ui.label(format!(
                    "Spielfeld: {:.1} x {:.1}",
                    settings.playfield_width, settings.playfield_height
                ));
                ui.label(format!("Raster: {:.3}", settings.grid_pitch));
                ui.label(format!("Geschwindigkeit: {:.1}", settings.move_speed));
                ui.label(format!("Tickrate: {:.0} Hz", settings.tick_rate_hz));
                ui.label(format!(
                    "SVG-Export: {}",
                    if settings.dump_border_svg { "an" } else { "aus" }
                ));
            });

            ui.collapsing("Steuerung", |ui| {
                ui.label("WASD / Pfeiltasten: Bewegen");
                ui.label("Space halten: Eroberung, loslassen: Abbrechen");
                ui.label("R: Zurückrufen, P: Pause");
                ui.label("Gamepad: linker Stick, A halten, B zurückrufen");
            });
        });
}
