// src/math/geometry/polygon/cleanup.rs
//
// Nachbearbeitung von Clip-Ergebnissen: Einrasten aufs Gitter und Entfernen
// fast identischer Nachbarpunkte.

use crate::math::types::{GridSnap, Point2D};

/// Rastet jeden Punkt auf das Gitter ein
pub fn snap_points(points: &mut [Point2D], grid: &GridSnap) {
    for point in points.iter_mut() {
        *point = grid.snap(*point);
    }
}

/// Entfernt aufeinanderfolgende Punkte mit Abstand < `threshold`,
/// inklusive des Paares (letzter, erster).
pub fn merge_near_duplicates(points: &mut Vec<Point2D>, threshold: f32) {
    if points.len() < 2 {
        return;
    }

    let mut merged: Vec<Point2D> = Vec::with_capacity(points.len());
    for &point in points.iter() {
        match merged.last() {
            Some(last) if last.distance(point) < threshold => {}
            _ => merged.push(point),
        }
    }

    while merged.len() >= 2 {
        let first = merged[0];
        let last = merged[merged.len() - 1];
        if first.distance(last) < threshold {
            merged.pop();
        } else {
            break;
        }
    }

    *points = merged;
}
