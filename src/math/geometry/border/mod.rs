// src/math/geometry/border/mod.rs

// Randabfragen und Bewegung entlang des Randes
pub mod locator;
pub mod traversal;

pub use locator::{AXIS_TOLERANCE, BorderLocator, EdgeAxis, EdgeHit};
pub use traversal::BorderTraversal;
