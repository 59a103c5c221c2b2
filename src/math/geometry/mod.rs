// src/math/geometry/mod.rs

// Deklaration der Haupt-Geometriemodule
pub mod border;
pub mod polygon;

// Re-Exporte für einen schnellen Zugriff auf die Kern-Geometrietypen,
// falls man nicht das gesamte `math::prelude` importieren möchte.
pub use self::border::{BorderLocator, BorderTraversal, EdgeAxis, EdgeHit};
pub use self::polygon::{
    Orientation, Polygon, PolygonBoolean, PolygonProperties, PolygonTriangulator, Triangulation,
};
