// src/math/geometry/polygon/mod.rs

pub mod cleanup; // Gitter-Einrasten und Duplikat-Bereinigung
pub mod core; // Enthält die Polygon-Struktur selbst
pub mod operations; // Boolean (geo) und Triangulation
pub mod properties; // Enthält den PolygonProperties-Trait

// Re-Exporte für den einfachen Zugriff auf die wichtigsten Polygon-Elemente
pub use self::core::Polygon;
pub use self::properties::{Orientation, PolygonProperties, shoelace_signed_area};

pub use self::operations::{
    boolean::{BooleanOperation, PolygonBoolean},
    triangulation::{PolygonTriangulator, Triangle, Triangulation},
};
