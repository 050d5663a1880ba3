//! Component node model
//!
//! A [`ComponentNode`] is a read-only snapshot of one live UI element at
//! resolution time: identity, logical state, render geometry, and
//! structural context. Nodes are created fresh on every resolution and
//! never cached across pointer moves; once a marker holds a node, that
//! reference is reused rather than recomputed.

use crate::host::page::{ElementId, Rect};
use crate::host::value::Value;
use serde::{Deserialize, Serialize};

/// Style properties extracted for every resolved node.
pub const KEY_COMPUTED_STYLES: &[&str] = &[
    "display",
    "position",
    "width",
    "height",
    "padding",
    "margin",
    "background-color",
    "color",
    "font-size",
    "font-family",
    "border",
    "border-radius",
    "opacity",
    "cursor",
    "z-index",
];

/// Classification of a resolved node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    /// The element is a component host with framework metadata.
    Component,
    /// A plain element inside a component subtree, identified by tag plus
    /// id or first class token.
    Plain,
}

/// Brief identity of the nearest ancestor component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentInfo {
    pub display_name: String,
    pub selector: String,
}

/// A resolved, read-only description of one live UI element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentNode {
    /// Process-unique identifier, e.g. `ag-1714500000000-3`.
    pub uid: String,
    /// Component class name, or tag/id/class identity for plain nodes.
    pub display_name: String,
    /// Framework tag selector, or the plain tag name.
    pub selector: String,
    /// Root-to-node path of tag/id/first-class tokens.
    pub dom_path: String,
    /// Bound property names with sanitized current values.
    pub bound_properties: Vec<(String, Value)>,
    /// Names of the events the component can emit.
    pub emitted_events: Vec<String>,
    /// Sanitized public state, excluding bound properties, events, and
    /// internal names.
    pub public_state: Vec<(String, Value)>,
    /// Handle to the live element, owned by the host page.
    pub element: ElementId,
    /// Viewport-relative bounding box at resolution time.
    pub rect: Rect,
    /// Allow-listed computed styles.
    pub computed_styles: Vec<(String, String)>,
    /// Names of cross-cutting behaviors applied to the element.
    pub behaviors: Vec<String>,
    /// Nearest ancestor component, if any.
    pub parent: Option<ParentInfo>,
    /// Component vs plain classification.
    pub kind: NodeKind,
}

impl ComponentNode {
    /// Whether this node carries framework metadata.
    pub fn is_component(&self) -> bool {
        self.kind == NodeKind::Component
    }
}
