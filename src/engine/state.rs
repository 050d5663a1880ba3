//! Interaction state types
//!
//! The engine moves through four states while recording. Hovering and
//! Locked carry the resolved node so downstream consumers never
//! re-resolve; EditingMarker carries only the marker index.

use crate::host::page::Rect;
use crate::resolve::node::ComponentNode;
use crate::session::marker::MarkerColor;

/// Interaction state of the overlay.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineState {
    /// Recording but not interacting with any element.
    Inactive,
    /// Pointer is over a resolvable element.
    Hovering(ComponentNode),
    /// A candidate element is locked, awaiting confirm or retarget.
    Locked(ComponentNode),
    /// The intent editor is open for an existing marker.
    EditingMarker(usize),
}

impl EngineState {
    /// Hover resolution is suspended in these states.
    pub fn suspends_hover(&self) -> bool {
        matches!(self, EngineState::Locked(_) | EngineState::EditingMarker(_))
    }
}

/// What the host should do with a click it just forwarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickDisposition {
    /// Consume the click; the page must not see it.
    Suppress,
    /// Let the click reach the page or chrome untouched.
    PassThrough,
}

/// Result of forwarding a click to the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct ClickOutcome {
    pub disposition: ClickDisposition,
    pub events: Vec<EngineEvent>,
}

impl ClickOutcome {
    pub fn pass_through() -> Self {
        Self {
            disposition: ClickDisposition::PassThrough,
            events: Vec::new(),
        }
    }

    pub fn suppress(events: Vec<EngineEvent>) -> Self {
        Self {
            disposition: ClickDisposition::Suppress,
            events,
        }
    }
}

/// Notifications the engine emits for the host chrome to react to.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    RecordingStarted,
    RecordingStopped,
    ComponentHovered(ComponentNode),
    HoverCleared,
    MarkerAdded(usize),
    MarkerUpdated(usize),
    MarkerDeleted(usize),
    EditorOpened(usize),
    SessionCleared,
}

/// Rectangle outline the host should draw over the current target.
#[derive(Debug, Clone, PartialEq)]
pub struct Highlight {
    pub rect: Rect,
    pub color: MarkerColor,
}

/// Identity tooltip anchored near the pointer.
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub text: String,
    pub x: f64,
    pub y: f64,
}
