// src/debug/visualization/svg.rs
use crate::math::{
    geometry::polygon::Polygon,
    types::{Bounds2D, Point2D},
};
use bevy::log::{info, warn};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use svg::Document;
use svg::node::element::{Circle, Group, Polygon as SvgPolygon, Polyline, Rectangle};

/// Rand um das Spielfeld im Dokument, relativ zur größeren Seite
const MARGIN_FACTOR: f32 = 0.05;

fn points_attribute(points: &[Point2D]) -> String {
    points
        .iter()
        .map(|p| format!("{:.3},{:.3}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Baut ein SVG-Dokument mit Spielfeld, Rand der neutralen Fläche und optional
/// einem offenen Pfad. Die y-Achse zeigt wie in der Szene nach oben.
pub fn border_document(playfield: &Bounds2D, border: &Polygon, path: Option<&[Point2D]>) -> Document {
    let margin = playfield.width().max(playfield.height()) * MARGIN_FACTOR;
    let view = playfield.expand(margin);
    let stroke = (view.width() + view.height()) * 0.5 * 0.004;

    let mut content = Group::new().set("transform", "scale(1,-1)").add(
        Rectangle::new()
            .set("x", playfield.min.x)
            .set("y", playfield.min.y)
            .set("width", playfield.width())
            .set("height", playfield.height())
            .set("fill", "#3a3a3a")
            .set("stroke", "#888888")
            .set("stroke-width", stroke),
    );

    if border.len() >= 3 {
        content = content.add(
            SvgPolygon::new()
                .set("points", points_attribute(border.vertices()))
                .set("fill", "#4f7fbf")
                .set("fill-opacity", 0.8)
                .set("stroke", "#1f3f7f")
                .set("stroke-width", stroke),
        );
        for vertex in border.vertices() {
            content = content.add(
                Circle::new()
                    .set("cx", vertex.x)
                    .set("cy", vertex.y)
                    .set("r", stroke * 1.5)
                    .set("fill", "#1f3f7f"),
            );
        }
    }

    if let Some(path) = path.filter(|p| p.len() >= 2) {
        content = content.add(
            Polyline::new()
                .set("points", points_attribute(path))
                .set("fill", "none")
                .set("stroke", "#f2bf33")
                .set("stroke-width", stroke * 1.5),
        );
    }

    // viewBox im gespiegelten System
    Document::new()
        .set(
            "viewBox",
            (view.min.x, -view.max.y, view.width(), view.height()),
        )
        .set("width", 600)
        .set("height", (600.0 * view.height() / view.width()).round())
        .add(content)
}

/// Schreibt bei jeder Randänderung eine nummerierte SVG-Datei.
#[derive(Debug)]
pub struct BorderSvgDumper {
    output_dir: PathBuf,
    playfield: Bounds2D,
    counter: AtomicUsize,
}

impl BorderSvgDumper {
    pub fn new(output_dir: impl Into<PathBuf>, playfield: Bounds2D) -> Self {
        Self {
            output_dir: output_dir.into(),
            playfield,
            counter: AtomicUsize::new(0),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn dump(&self, border: &Polygon) -> io::Result<PathBuf> {
        std::fs::create_dir_all(&self.output_dir)?;
        let index = self.counter.fetch_add(1, Ordering::Relaxed);
        let file = self.output_dir.join(format!("border_{index:04}.svg"));
        let document = border_document(&self.playfield, border, None);
        svg::save(&file, &document)?;
        info!("SVG geschrieben: {}", file.display());
        Ok(file)
    }

    /// Verpackt den Dumper als Beobachter für `PolygonRegion::on_border_changed`
    pub fn into_observer(self) -> impl Fn(&Polygon) + Send + Sync + 'static {
        move |border: &Polygon| {
            if let Err(err) = self.dump(border) {
                warn!("SVG-Export fehlgeschlagen: {}", err);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playfield() -> Bounds2D {
        Bounds2D::centered(10.0, 14.0).unwrap()
    }

    #[test]
    fn test_document_contains_border_and_path() {
        let border = Polygon::from_bounds(&playfield());
        let path = [Point2D::new(0.0, -7.0), Point2D::new(0.0, 2.0)];
        let rendered = border_document(&playfield(), &border, Some(&path)).to_string();

        assert!(rendered.contains("<polygon"));
        assert!(rendered.contains("<polyline"));
        assert!(rendered.contains("scale(1,-1)"));
        assert!(rendered.contains("-5.000,-7.000"));
    }

    #[test]
    fn test_dumper_writes_numbered_files() {
        let dir = std::env::temp_dir().join(format!(
            "territory_capture_svg_{}",
            std::process::id()
        ));
        let dumper = BorderSvgDumper::new(&dir, playfield());
        let border = Polygon::from_bounds(&playfield());

        let first = dumper.dump(&border).unwrap();
        let second = dumper.dump(&border).unwrap();

        assert_ne!(first, second);
        assert!(first.ends_with("border_0000.svg"));
        assert!(second.exists());
        let _ = std::fs::remove_dir_all(dumper.output_dir());
    }
}
