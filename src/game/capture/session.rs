// src/game/capture/session.rs
use super::{
    direction::CardinalDirection,
    error::{CaptureError, CaptureResult},
    path_closer::{ClosingArc, PathCloser, orthogonality_violations},
    region::{PolygonRegion, SubtractOutcome},
    settings::CaptureSettings,
};
use crate::math::{
    geometry::border::{BorderLocator, BorderTraversal},
    types::{Bounds2D, GridSnap, Point2D},
};
use bevy::prelude::*;

/// Zustand des Agenten
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptureState {
    /// Läuft auf dem Rand
    #[default]
    OnBorder,
    /// Zeichnet einen Pfad abseits des Randes
    Capturing,
    /// Kehrt zum Anker zurück
    Returning,
}

/// Was ein Tick bewirkt hat
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// Keine Bewegung
    Idle,
    Moved,
    /// Pfad geschlossen und Fläche abgezogen
    Completed(CaptureReport),
    /// Pfad geschlossen, aber die Subtraktion war ein No-op
    Rejected(CaptureError),
    /// Am Anker angekommen
    Returned,
}

/// Zusammenfassung einer abgeschlossenen Eroberung
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureReport {
    pub outcome: SubtractOutcome,
    pub arc: ClosingArc,
    /// Der geschlossene Ring, der abgezogen wurde
    pub path: Vec<Point2D>,
    /// Diagonale Segmente im Ring (sollte leer sein)
    pub violations: Vec<usize>,
}

/// Zustandsautomat eines Agenten.
///
/// Hält selbst keine Referenz auf die Region; jede Operation bekommt sie
/// explizit übergeben.
#[derive(Component, Debug, Clone)]
pub struct CaptureSession {
    state: CaptureState,
    position: Point2D,
    anchor: Point2D,
    path: Vec<Point2D>,
    has_left_border: bool,
    last_direction: Option<CardinalDirection>,

    settings: CaptureSettings,
    grid: GridSnap,
    playfield: Bounds2D,
    traversal: BorderTraversal,
    closer: PathCloser,
}

impl CaptureSession {
    pub fn new(settings: &CaptureSettings, position: Point2D) -> CaptureResult<Self> {
        settings.validate()?;
        let grid = settings.grid()?;
        let playfield = settings.playfield()?;

        Ok(Self {
            state: CaptureState::OnBorder,
            position,
            anchor: position,
            path: Vec::new(),
            has_left_border: false,
            last_direction: None,
            settings: settings.clone(),
            grid,
            playfield,
            traversal: settings.traversal(),
            closer: PathCloser::new(
                settings.edge_lookup_tolerance,
                settings.orthogonality_tolerance,
            ),
        })
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    pub fn position(&self) -> Point2D {
        self.position
    }

    pub fn anchor(&self) -> Point2D {
        self.anchor
    }

    /// Bisher aufgezeichnete Eckpunkte
    pub fn path(&self) -> &[Point2D] {
        &self.path
    }

    /// Aufgezeichnete Punkte plus aktuelle Position, für die Anzeige
    pub fn path_preview(&self) -> Vec<Point2D> {
        if self.path.is_empty() {
            return Vec::new();
        }
        let mut preview = self.path.clone();
        if preview.last() != Some(&self.position) {
            preview.push(self.position);
        }
        preview
    }

    /// Länge des sichtbaren Pfades
    pub fn path_length(&self) -> f32 {
        self.path_preview()
            .windows(2)
            .map(|pair| pair[0].distance(pair[1]))
            .sum()
    }

    /// OnBorder -> Capturing. Position wird eingerastet und zum Anker.
    pub fn start(&mut self, region: &PolygonRegion) -> CaptureResult<()> {
        if self.state != CaptureState::OnBorder {
            debug!("start() ignoriert, Zustand {:?}", self.state);
            return Ok(());
        }
        if region.is_cleared() {
            return Err(CaptureError::RegionEmpty);
        }
        if !BorderLocator::is_on_border(
            region.polygon(),
            self.position,
            self.settings.edge_lookup_tolerance,
        ) {
            return Err(CaptureError::NotOnBorder {
                x: self.position.x,
                y: self.position.y,
            });
        }

        let anchor = self.grid.snap(self.position);
        self.position = anchor;
        self.anchor = anchor;
        self.path.clear();
        self.path.push(anchor);
        self.has_left_border = false;
        self.last_direction = None;
        self.state = CaptureState::Capturing;

        info!("Capture gestartet bei ({:.2}, {:.2})", anchor.x, anchor.y);
        Ok(())
    }

    /// Capturing/Returning -> OnBorder, sofort zurück zum Anker
    pub fn cancel(&mut self) {
        if self.state == CaptureState::OnBorder {
            return;
        }
        self.position = self.anchor;
        self.reset_path();
        info!("Capture abgebrochen, zurück am Anker");
    }

    /// Capturing -> Returning, Rückweg wird pro Tick animiert
    pub fn recall(&mut self) {
        if self.state == CaptureState::Capturing {
            self.state = CaptureState::Returning;
            info!("Rückkehr zum Anker eingeleitet");
        }
    }

    /// Ein Simulationsschritt
    pub fn tick(
        &mut self,
        direction: Point2D,
        dt: f32,
        region: &mut PolygonRegion,
    ) -> TickOutcome {
        match self.state {
            CaptureState::OnBorder => self.tick_on_border(direction, dt, region),
            CaptureState::Capturing => self.tick_capturing(direction, dt, region),
            CaptureState::Returning => self.tick_returning(dt),
        }
    }

    fn tick_on_border(
        &mut self,
        direction: Point2D,
        dt: f32,
        region: &PolygonRegion,
    ) -> TickOutcome {
        let travel = self.settings.move_speed * dt;
        let next = self
            .traversal
            .step(self.position, direction, region.polygon(), travel);

        if next == self.position {
            TickOutcome::Idle
        } else {
            self.position = next;
            TickOutcome::Moved
        }
    }

    fn tick_capturing(
        &mut self,
        direction: Point2D,
        dt: f32,
        region: &mut PolygonRegion,
    ) -> TickOutcome {
        let Some(cardinal) = CardinalDirection::from_vector(direction) else {
            return TickOutcome::Idle;
        };

        if let Some(previous) = self.last_direction {
            if previous != cardinal {
                self.record_corner();
            }
        }
        self.last_direction = Some(cardinal);

        let travel = self.settings.move_speed * dt;
        self.position = self
            .playfield
            .clamp_point(self.position + cardinal.as_vec2() * travel);

        let distance = BorderLocator::distance_to_border(region.polygon(), self.position);
        let threshold = self.settings.border_threshold;

        if distance.is_some_and(|d| d >= threshold) {
            self.has_left_border = true;
        }

        let back_on_border = distance.is_some_and(|d| d < threshold);
        let far_enough = self.position.distance(self.anchor) > self.settings.min_loop_distance();

        if self.has_left_border && back_on_border && far_enough {
            return self.finalize(region);
        }

        TickOutcome::Moved
    }

    fn tick_returning(&mut self, dt: f32) -> TickOutcome {
        let step = self.settings.move_speed * self.settings.return_speed_factor * dt;
        let to_anchor = self.anchor - self.position;
        let remaining = to_anchor.length();
        self.position = if remaining <= step {
            self.anchor
        } else {
            self.position + to_anchor / remaining * step
        };

        if self.position.distance(self.anchor) <= self.settings.arrival_tolerance {
            self.position = self.anchor;
            self.reset_path();
            info!("Am Anker angekommen");
            return TickOutcome::Returned;
        }

        TickOutcome::Moved
    }

    /// Eckpunkt bei Richtungswechsel, eingerastet
    fn record_corner(&mut self) {
        let corner = self.grid.snap(self.position);
        self.position = corner;

        let distinct = self
            .path
            .last()
            .is_none_or(|last| last.distance(corner) >= self.settings.corner_merge_distance);
        if distinct {
            self.path.push(corner);
        }
    }

    /// Pfad abschließen, schließen und von der Region abziehen
    fn finalize(&mut self, region: &mut PolygonRegion) -> TickOutcome {
        let contact = match BorderLocator::closest_edge(region.polygon(), self.position) {
            Some(hit) => self.grid.snap(hit.point),
            None => self.grid.snap(self.position),
        };
        self.position = contact;

        self.smooth_final_vertex(contact);

        let mut ring = std::mem::take(&mut self.path);
        let start = ring.first().copied().unwrap_or(self.anchor);

        let arc = match self.closer.close(&mut ring, start, contact, region.polygon()) {
            Ok(arc) => arc,
            Err(err) => {
                warn!("Pfad konnte nicht geschlossen werden: {}", err);
                self.finish_on_border(contact);
                return TickOutcome::Rejected(err);
            }
        };

        let violations =
            orthogonality_violations(&ring, self.settings.orthogonality_tolerance);
        for &i in &violations {
            error!(
                "Diagonales Segment im Capture-Pfad: {} ({:?} -> {:?})",
                i,
                ring[i],
                ring[i + 1]
            );
        }

        let outcome = region.subtract(&ring);
        self.finish_on_border(contact);

        match outcome {
            Ok(outcome) => {
                info!(
                    "Capture abgeschlossen ({:?}, Bogenfläche {:.3})",
                    arc.direction, arc.enclosed_area
                );
                TickOutcome::Completed(CaptureReport {
                    outcome,
                    arc,
                    path: ring,
                    violations,
                })
            }
            Err(err) => {
                warn!("Subtraktion ohne Wirkung: {}", err);
                TickOutcome::Rejected(err)
            }
        }
    }

    /// Letzten Eckpunkt entlang seines eigenen Schenkels auf die freie
    /// Koordinate des Kontaktpunkts schieben (nur Sub-Raster-Zittern)
    fn smooth_final_vertex(&mut self, contact: Point2D) {
        let len = self.path.len();
        if len < 2 {
            return;
        }
        let previous = self.path[len - 2];
        let last = &mut self.path[len - 1];
        let tolerance = self.settings.orthogonality_tolerance;
        let limit = self.settings.jitter_limit;

        if (previous.y - last.y).abs() < tolerance {
            if (last.x - contact.x).abs() <= limit {
                last.x = contact.x;
            }
        } else if (previous.x - last.x).abs() < tolerance
            && (last.y - contact.y).abs() <= limit
        {
            last.y = contact.y;
        }
    }

    fn finish_on_border(&mut self, contact: Point2D) {
        self.position = contact;
        self.anchor = contact;
        self.reset_path();
    }

    fn reset_path(&mut self) {
        self.path.clear();
        self.has_left_border = false;
        self.last_direction = None;
        self.state = CaptureState::OnBorder;
    }
}
