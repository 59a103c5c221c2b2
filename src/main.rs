// ./src/main.rs
use bevy::prelude::*;
use bevy_egui::EguiPlugin;

// Eigene Module deklarieren
pub mod debug;
pub mod game;
pub mod math;
pub mod setup; // Kamera und Füllfläche

use debug::{
    ui::capture_control_ui_system,
    visualization::polygon::{
        draw_border_system, draw_capture_path_system, rebuild_region_mesh_system,
    },
};
use game::capture::CapturePlugin;
use setup::setup_scene;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Territory Capture".into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(EguiPlugin)
        .add_plugins(CapturePlugin)
        .add_systems(Startup, setup_scene)
        .add_systems(
            Update,
            (
                capture_control_ui_system,
                rebuild_region_mesh_system,
                draw_border_system,
                draw_capture_path_system,
            ),
        )
        .run();
}
