// ./src/setup.rs
use crate::debug::visualization::polygon::RegionFill;
use bevy::{
    prelude::*,
    render::{
        camera::ScalingMode,
        mesh::{Indices, PrimitiveTopology},
        render_asset::RenderAssetUsages,
    },
    sprite::{MaterialMesh2dBundle, Mesh2dHandle},
};

/// Sichtbare Höhe in Welteinheiten, etwas mehr als das Spielfeld
const VIEW_HEIGHT: f32 = 16.0;

pub fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    // Kamera
    let mut camera = Camera2dBundle::default();
    camera.projection.scaling_mode = ScalingMode::FixedVertical(VIEW_HEIGHT);
    commands.spawn(camera);

    // Füllfläche, wird beim ersten BorderChangedEvent befüllt
    let empty = Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, Vec::<[f32; 3]>::new())
        .with_inserted_indices(Indices::U32(Vec::new()));
    commands.spawn((
        RegionFill,
        MaterialMesh2dBundle {
            mesh: Mesh2dHandle(meshes.add(empty)),
            material: materials.add(ColorMaterial::from(Color::rgba(0.3, 0.5, 0.75, 0.6))),
            transform: Transform::from_xyz(0.0, 0.0, 0.0),
            ..default()
        },
    ));
}
