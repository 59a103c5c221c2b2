// src/game/capture/mod.rs

pub mod direction;
pub mod error;
pub mod events;
pub mod input;
pub mod path_closer; // Schließbogen entlang des Randes
pub mod plugin;
pub mod region; // Die neutrale Fläche und ihre Subtraktion
pub mod session; // Zustandsautomat des Agenten
pub mod settings;
pub mod state;
pub mod systems;

pub use direction::CardinalDirection;
pub use error::{CaptureError, CaptureResult};
pub use events::{BorderChangedEvent, CaptureCompletedEvent};
pub use input::CaptureInput;
pub use path_closer::{ArcDirection, ClosingArc, PathCloser};
pub use plugin::CapturePlugin;
pub use region::{BorderObserver, PolygonRegion, SubtractOutcome};
pub use session::{CaptureReport, CaptureSession, CaptureState, TickOutcome};
pub use settings::CaptureSettings;
pub use state::SimulationState;
