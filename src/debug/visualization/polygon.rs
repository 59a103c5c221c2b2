use crate::game::capture::{BorderChangedEvent, CaptureSession, CaptureState, PolygonRegion};
use crate::math::{
    geometry::polygon::{Polygon, PolygonTriangulator},
    types::Point2D,
};
use bevy::{
    prelude::*,
    render::{
        mesh::{Indices, PrimitiveTopology},
        render_asset::RenderAssetUsages,
    },
    sprite::Mesh2dHandle,
};

/// Markiert die gefüllte Fläche der neutralen Region
#[derive(Component, Debug, Default)]
pub struct RegionFill;

/// Trianguliert den Rand und baut daraus ein flaches Mesh in der xy-Ebene.
pub fn build_region_mesh(polygon: &Polygon) -> Mesh {
    let triangulation = PolygonTriangulator::new().triangulate(polygon);
    let bounds = polygon.bounds();
    debug!(
        "{} Dreiecke, Fläche {:.2}",
        triangulation.len(),
        triangulation.area(polygon.vertices())
    );

    let positions: Vec<[f32; 3]> = polygon
        .vertices()
        .iter()
        .map(|v| [v.x, v.y, 0.0])
        .collect();
    let normals = vec![[0.0, 0.0, 1.0]; positions.len()];
    let uvs: Vec<[f32; 2]> = match bounds {
        Some(bounds) if bounds.width() > 0.0 && bounds.height() > 0.0 => polygon
            .vertices()
            .iter()
            .map(|v| {
                [
                    (v.x - bounds.min.x) / bounds.width(),
                    (v.y - bounds.min.y) / bounds.height(),
                ]
            })
            .collect(),
        _ => vec![[0.0, 0.0]; positions.len()],
    };

    Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
        .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
        .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, uvs)
        .with_inserted_indices(Indices::U32(triangulation.flat_indices()))
}

/// Ersetzt das Mesh der Füllfläche bei jeder Randänderung
pub fn rebuild_region_mesh_system(
    mut events: EventReader<BorderChangedEvent>,
    fills: Query<&Mesh2dHandle, With<RegionFill>>,
    mut meshes: ResMut<Assets<Mesh>>,
) {
    // Nur der letzte Rand zählt
    let Some(event) = events.read().last() else {
        return;
    };
    // Vollständig erobert: leeres Mesh
    let polygon = Polygon::new(event.border.clone()).unwrap_or_else(|_| Polygon::empty());

    for handle in fills.iter() {
        if let Some(mesh) = meshes.get_mut(&handle.0) {
            *mesh = build_region_mesh(&polygon);
        }
    }
    debug!(
        "Region-Mesh neu aufgebaut ({} Ecken, Fläche {:.2})",
        polygon.len(),
        event.area
    );
}

/// Zeichnet den Rand der Region als geschlossenen Linienzug
pub fn draw_border_system(region: Option<Res<PolygonRegion>>, mut gizmos: Gizmos) {
    let Some(region) = region else {
        return;
    };
    let border = region.border();
    if border.len() < 3 {
        return;
    }

    let mut closed: Vec<Point2D> = border.to_vec();
    closed.push(border[0]);
    gizmos.linestrip_2d(closed, Color::rgb(0.4, 0.7, 1.0));
    for vertex in border {
        gizmos.circle_2d(*vertex, 0.05, Color::rgb(0.2, 0.4, 0.8));
    }
}

/// Zeichnet den offenen Pfad jeder Session bis zur aktuellen Position
pub fn draw_capture_path_system(sessions: Query<&CaptureSession>, mut gizmos: Gizmos) {
    for session in sessions.iter() {
        if session.state() == CaptureState::OnBorder {
            continue;
        }
        let color = match session.state() {
            CaptureState::Returning => Color::rgb(0.9, 0.3, 0.3),
            _ => Color::rgb(0.95, 0.75, 0.2),
        };
        let preview = session.path_preview();
        if preview.len() >= 2 {
            gizmos.linestrip_2d(preview, color);
        }
        gizmos.circle_2d(session.anchor(), 0.1, color);
    }
}
