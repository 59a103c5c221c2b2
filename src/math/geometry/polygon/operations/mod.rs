pub mod boolean;
pub mod triangulation;

pub use boolean::*;
pub use triangulation::*;
