//! Interaction engine module
//!
//! The overlay state machine, its state/event types, and the breadcrumb
//! trail shown while an element is locked.

pub mod breadcrumb;
pub mod overlay;
pub mod state;

pub use breadcrumb::{BreadcrumbEntry, BreadcrumbTrail};
pub use overlay::OverlayEngine;
pub use state::{ClickDisposition, ClickOutcome, EngineEvent, EngineState, Highlight, Tooltip};
