// src/game/capture/region.rs
use super::{
    error::{CaptureError, CaptureResult},
    settings::CaptureSettings,
};
use crate::math::{
    geometry::polygon::{
        BooleanOperation, Polygon, PolygonBoolean, PolygonProperties, cleanup,
    },
    types::{GridSnap, Point2D},
    utils::constants,
};
use bevy::prelude::*;
use std::fmt;

/// Beobachter, der bei jeder Randänderung das neue Polygon erhält
pub type BorderObserver = Box<dyn Fn(&Polygon) + Send + Sync>;

/// Ergebnis einer erfolgreichen Subtraktion
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SubtractOutcome {
    /// Neues Polygon übernommen
    Replaced {
        previous_area: f32,
        area: f32,
        /// Fläche, die der Schnitt mit dem Pfad tatsächlich abgedeckt hat
        captured_area: f32,
        /// Anzahl verworfener Inseln
        discarded: usize,
    },
    /// Nichts mehr übrig, die Region ist leer
    Cleared { previous_area: f32 },
}

/// Die aktuelle neutrale Fläche.
///
/// Das Polygon wird bei jeder Eroberung komplett ersetzt, nie teilweise
/// verändert. Es ist immer gegen den Uhrzeigersinn orientiert und liegt auf
/// dem Raster.
#[derive(Resource)]
pub struct PolygonRegion {
    polygon: Polygon,
    initial_area: f32,
    grid: GridSnap,
    clipper: PolygonBoolean,
    observers: Vec<BorderObserver>,
}

impl PolygonRegion {
    /// Übernimmt ein Startpolygon (wird eingerastet und CCW ausgerichtet)
    pub fn new(polygon: Polygon, grid: GridSnap) -> CaptureResult<Self> {
        let mut points = polygon.into_vertices();
        cleanup::snap_points(&mut points, &grid);
        cleanup::merge_near_duplicates(&mut points, grid.pitch() * 0.5);

        let mut polygon = Polygon::new(points)?;
        polygon.ensure_counter_clockwise();
        let initial_area = polygon.area();

        Ok(Self {
            polygon,
            initial_area,
            grid,
            clipper: PolygonBoolean::new(),
            observers: Vec::new(),
        })
    }

    /// Spielfeld-Rechteck als Startregion
    pub fn from_settings(settings: &CaptureSettings) -> CaptureResult<Self> {
        settings.validate()?;
        let playfield = settings.playfield()?;
        Self::new(Polygon::from_bounds(&playfield), settings.grid()?)
    }

    pub fn polygon(&self) -> &Polygon {
        &self.polygon
    }

    /// Randpunkte in Reihenfolge
    pub fn border(&self) -> &[Point2D] {
        self.polygon.vertices()
    }

    pub fn area(&self) -> f32 {
        self.polygon.area()
    }

    pub fn initial_area(&self) -> f32 {
        self.initial_area
    }

    /// Anteil der bereits eroberten Fläche, 0.0 bis 1.0
    pub fn captured_fraction(&self) -> f32 {
        if self.initial_area <= constants::EPSILON {
            return 0.0;
        }
        (1.0 - self.area() / self.initial_area).clamp(0.0, 1.0)
    }

    pub fn is_cleared(&self) -> bool {
        self.polygon.is_empty()
    }

    pub fn grid(&self) -> &GridSnap {
        &self.grid
    }

    /// Registriert einen Beobachter für Randänderungen
    pub fn on_border_changed<F>(&mut self, observer: F)
    where
        F: Fn(&Polygon) + Send + Sync + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    /// Zieht die vom Pfad umschlossene Fläche ab.
    ///
    /// Der Pfad wird zuerst mit der Region geschnitten, erst das Ergebnis
    /// wird abgezogen. Jeder `Err` lässt die Region unverändert.
    pub fn subtract(&mut self, path: &[Point2D]) -> CaptureResult<SubtractOutcome> {
        if path.len() < 3 {
            return Err(CaptureError::PathTooShort {
                expected: 3,
                actual: path.len(),
            });
        }
        if self.polygon.len() < 3 {
            return Err(CaptureError::RegionEmpty);
        }

        let mut ring = path.to_vec();
        cleanup::merge_near_duplicates(&mut ring, self.grid.pitch() * 0.5);
        if ring.len() < 3 {
            return Err(CaptureError::PathTooShort {
                expected: 3,
                actual: ring.len(),
            });
        }
        let mut capture = Polygon::new(ring)?;
        capture.ensure_counter_clockwise();

        // 1. Tatsächlich umschlossene Fläche innerhalb der Region
        let captured = self.clipper.intersection(&self.polygon, &capture)?;
        let captured_area: f32 = captured.iter().map(|p| p.area()).sum();
        if captured.is_empty() || captured_area <= constants::EPSILON {
            return Err(CaptureError::NoOverlap);
        }

        // 2. Differenz Region - Schnittmenge
        let mut candidates =
            self.clipper
                .execute_many(&self.polygon, &captured, BooleanOperation::Difference)?;
        for candidate in candidates.iter_mut() {
            candidate.ensure_counter_clockwise();
        }

        let previous_area = self.area();

        if candidates.is_empty() {
            self.replace(Polygon::empty());
            info!("Region vollständig erobert (vorher {:.3})", previous_area);
            return Ok(SubtractOutcome::Cleared { previous_area });
        }

        let discarded = candidates.len() - 1;
        let chosen = Self::select_candidate(candidates, previous_area)
            .ok_or(CaptureError::NoCandidate)?;

        // 3. Einrasten und Duplikate entfernen
        let mut points = chosen.into_vertices();
        cleanup::snap_points(&mut points, &self.grid);
        cleanup::merge_near_duplicates(&mut points, self.grid.pitch() * 0.5);

        let Ok(mut polygon) = Polygon::new(points) else {
            self.replace(Polygon::empty());
            info!("Restfläche nach dem Einrasten degeneriert, Region geleert");
            return Ok(SubtractOutcome::Cleared { previous_area });
        };
        polygon.ensure_counter_clockwise();

        let area = polygon.area();
        if discarded > 0 {
            debug!("{} Inseln verworfen", discarded);
        }
        info!(
            "Region ersetzt: {:.3} -> {:.3} ({} Vertices)",
            previous_area,
            area,
            polygon.len()
        );
        self.replace(polygon);

        Ok(SubtractOutcome::Replaced {
            previous_area,
            area,
            captured_area,
            discarded,
        })
    }

    /// Größter Kandidat, der echt kleiner als das Original ist.
    /// Gibt es keinen, dann der kleinste. Bei Gleichstand gewinnt der erste.
    fn select_candidate(candidates: Vec<Polygon>, original_area: f32) -> Option<Polygon> {
        let areas: Vec<f32> = candidates.iter().map(|c| c.area()).collect();

        let mut best: Option<usize> = None;
        for (i, &area) in areas.iter().enumerate() {
            if area < original_area && best.is_none_or(|b| area > areas[b]) {
                best = Some(i);
            }
        }

        if best.is_none() {
            debug!("Kein Kandidat kleiner als das Original, nehme den kleinsten");
            for (i, &area) in areas.iter().enumerate() {
                if best.is_none_or(|b| area < areas[b]) {
                    best = Some(i);
                }
            }
        }

        best.and_then(|i| candidates.into_iter().nth(i))
    }

    fn replace(&mut self, polygon: Polygon) {
        self.polygon = polygon;
        for observer in &self.observers {
            observer(&self.polygon);
        }
    }
}

impl fmt::Debug for PolygonRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PolygonRegion")
            .field("polygon", &self.polygon)
            .field("initial_area", &self.initial_area)
            .field("grid", &self.grid)
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    fn pts(raw: &[(f32, f32)]) -> Vec<Point2D> {
        raw.iter().map(|&(x, y)| Point2D::new(x, y)).collect()
    }

    fn playfield_region() -> PolygonRegion {
        PolygonRegion::from_settings(&CaptureSettings::default()).unwrap()
    }

    fn l_shape_region() -> PolygonRegion {
        let mut region = playfield_region();
        region
            .subtract(&pts(&[(5.0, 0.0), (2.0, 0.0), (2.0, 7.0), (5.0, 7.0)]))
            .unwrap();
        region
    }

    fn square(min: (f32, f32), size: f32) -> Polygon {
        Polygon::new(pts(&[
            min,
            (min.0 + size, min.1),
            (min.0 + size, min.1 + size),
            (min.0, min.1 + size),
        ]))
        .unwrap()
    }

    #[test]
    fn test_candidate_selection_prefers_largest_smaller_piece() {
        let candidates = vec![square((0.0, 0.0), 2.0), square((5.0, 0.0), 3.0)];
        let chosen = PolygonRegion::select_candidate(candidates, 20.0).unwrap();
        assert_relative_eq!(chosen.area(), 9.0);
    }

    #[test]
    fn test_candidate_selection_falls_back_to_smallest() {
        // Kein Kandidat echt kleiner als das Original
        let candidates = vec![
            square((0.0, 0.0), 5.0),
            square((10.0, 0.0), 4.0),
            square((20.0, 0.0), 6.0),
        ];
        let chosen = PolygonRegion::select_candidate(candidates, 16.0).unwrap();
        assert_relative_eq!(chosen.area(), 16.0);
        assert_eq!(chosen.vertices()[0], Point2D::new(10.0, 0.0));

        assert!(PolygonRegion::select_candidate(Vec::new(), 16.0).is_none());
    }

    #[test]
    fn test_candidate_selection_tie_keeps_first() {
        let candidates = vec![
            square((0.0, 0.0), 1.0),
            square((3.0, 0.0), 2.0),
            square((8.0, 0.0), 2.0),
        ];
        let chosen = PolygonRegion::select_candidate(candidates, 10.0).unwrap();
        assert_eq!(chosen.vertices()[0], Point2D::new(3.0, 0.0));

        // Gleichstand auch im Rückfall
        let candidates = vec![square((0.0, 0.0), 4.0), square((8.0, 0.0), 4.0)];
        let chosen = PolygonRegion::select_candidate(candidates, 10.0).unwrap();
        assert_eq!(chosen.vertices()[0], Point2D::new(0.0, 0.0));
    }

    #[test]
    fn test_initial_region_is_playfield() {
        let region = playfield_region();
        assert_relative_eq!(region.area(), 140.0);
        assert_relative_eq!(region.captured_fraction(), 0.0);
        assert_eq!(region.border().len(), 4);
        assert!(region.polygon().signed_area() > 0.0);
    }

    #[test]
    fn test_corner_capture_leaves_l_shape() {
        let region = l_shape_region();
        assert_relative_eq!(region.area(), 119.0, epsilon = 1e-3);
        assert_eq!(region.border().len(), 6);
        assert!(region.polygon().signed_area() > 0.0);
        assert!(region.border().contains(&Point2D::new(2.0, 0.0)));
        assert!(region.border().contains(&Point2D::new(2.0, 7.0)));
        assert_relative_eq!(region.captured_fraction(), 0.15, epsilon = 1e-4);
    }

    #[test]
    fn test_area_is_conserved() {
        let mut region = playfield_region();
        let before = region.area();
        let outcome = region
            .subtract(&pts(&[(-5.0, -7.0), (-5.0, -3.0), (-1.0, -3.0), (-1.0, -7.0)]))
            .unwrap();

        let SubtractOutcome::Replaced {
            area,
            captured_area,
            ..
        } = outcome
        else {
            panic!("expected Replaced, got {outcome:?}");
        };
        assert_relative_eq!(captured_area, 16.0, epsilon = 1e-3);
        assert_relative_eq!(area + captured_area, before, epsilon = 1e-2);
        assert_relative_eq!(region.area(), area);
    }

    #[test]
    fn test_path_outside_region_is_intersected_first() {
        let mut region = l_shape_region();
        // Rechteck ragt teilweise in die bereits eroberte Ecke
        let outcome = region
            .subtract(&pts(&[(1.0, -1.0), (4.0, -1.0), (4.0, 3.0), (1.0, 3.0)]))
            .unwrap();

        match outcome {
            SubtractOutcome::Replaced { captured_area, .. } => {
                assert_relative_eq!(captured_area, 6.0, epsilon = 1e-3)
            }
            other => panic!("unexpected outcome {other:?}"),
        }
        assert_relative_eq!(region.area(), 113.0, epsilon = 1e-3);
        assert!(region.polygon().signed_area() > 0.0);
    }

    #[test]
    fn test_non_overlapping_path_is_a_noop() {
        let mut region = l_shape_region();
        let before = region.polygon().clone();

        let result = region.subtract(&pts(&[(3.0, 1.0), (4.5, 1.0), (4.5, 6.0), (3.0, 6.0)]));
        assert_eq!(result, Err(CaptureError::NoOverlap));
        assert_eq!(region.polygon(), &before);
    }

    #[test]
    fn test_short_or_degenerate_path_is_rejected() {
        let mut region = playfield_region();
        let before = region.polygon().clone();

        assert!(matches!(
            region.subtract(&pts(&[(0.0, 0.0), (1.0, 0.0)])),
            Err(CaptureError::PathTooShort { .. })
        ));
        assert!(matches!(
            region.subtract(&pts(&[(0.0, 0.0), (0.01, 0.0), (0.0, 0.01)])),
            Err(CaptureError::PathTooShort { .. })
        ));
        assert_eq!(region.polygon(), &before);
    }

    #[test]
    fn test_split_keeps_single_fragment() {
        let mut region = playfield_region();
        let outcome = region
            .subtract(&pts(&[(-1.0, -7.0), (1.0, -7.0), (1.0, 7.0), (-1.0, 7.0)]))
            .unwrap();

        match outcome {
            SubtractOutcome::Replaced { discarded, area, .. } => {
                assert_eq!(discarded, 1);
                assert_relative_eq!(area, 56.0, epsilon = 1e-3);
            }
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn test_full_capture_clears_region() {
        let mut region = playfield_region();
        let outcome = region
            .subtract(&pts(&[(-6.0, -8.0), (6.0, -8.0), (6.0, 8.0), (-6.0, 8.0)]))
            .unwrap();
        assert!(matches!(outcome, SubtractOutcome::Cleared { .. }));
        assert!(region.is_cleared());
        assert_relative_eq!(region.captured_fraction(), 1.0);
        assert_eq!(
            region.subtract(&pts(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)])),
            Err(CaptureError::RegionEmpty)
        );
    }

    #[test]
    fn test_observers_are_notified_on_change_only() {
        let mut region = playfield_region();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        region.on_border_changed(move |polygon| {
            assert!(polygon.len() >= 3);
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let _ = region.subtract(&pts(&[(10.0, 10.0), (11.0, 10.0), (11.0, 11.0)]));
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        region
            .subtract(&pts(&[(5.0, 0.0), (2.0, 0.0), (2.0, 7.0), (5.0, 7.0)]))
            .unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_result_is_grid_aligned() {
        let mut region = playfield_region();
        region
            .subtract(&pts(&[(5.0, 0.013), (2.004, 0.013), (2.004, 7.0), (5.0, 7.0)]))
            .unwrap();
        let grid = *region.grid();
        assert!(region.border().iter().all(|p| grid.is_aligned(*p)));
    }
}
