//! Annotation session module
//!
//! Markers, sessions, and the settings that shape how they are captured
//! and rendered.

pub mod marker;
pub mod settings;

pub use marker::{MarkerAnnotation, MarkerColor, RecordingSession};
pub use settings::{OutputDetail, Settings};
