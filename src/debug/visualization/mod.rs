pub mod polygon;
pub mod svg;
