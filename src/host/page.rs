//! Host page abstraction
//!
//! The engine never touches a real document. Everything it needs from the
//! host page — structure, geometry, styles, hit testing — goes through the
//! [`HostPage`] trait, keeping the core unit-testable against an in-memory
//! fixture tree.

use serde::{Deserialize, Serialize};

/// Opaque handle to one element in the host document.
///
/// The handle is owned by the host page and is only meaningful for the
/// page that issued it. It is deliberately `Copy`: component nodes and
/// markers hold the handle, never a copy of the element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementId(pub u64);

/// Viewport-relative bounding box of an element.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Center point of the rectangle.
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Check whether a viewport point falls inside the rectangle.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }
}

/// Viewport dimensions in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

/// Read access to the host document.
///
/// All queries take an [`ElementId`] previously returned by the same page.
/// Queries on stale or foreign handles return empty defaults rather than
/// panicking; the resolver treats those as resolution misses.
pub trait HostPage {
    /// Lower-case tag name, e.g. `"button"`.
    fn tag_name(&self, element: ElementId) -> String;

    /// Value of the `id` attribute, if any.
    fn id_attr(&self, element: ElementId) -> Option<String>;

    /// CSS classes in declaration order.
    fn classes(&self, element: ElementId) -> Vec<String>;

    /// Arbitrary attribute lookup (`role`, `aria-label`, `tabindex`, ...).
    fn attribute(&self, element: ElementId, name: &str) -> Option<String>;

    /// Concatenated text content of the element subtree.
    fn text_content(&self, element: ElementId) -> String;

    /// Parent element, `None` at the document root.
    fn parent(&self, element: ElementId) -> Option<ElementId>;

    /// Child elements in document order.
    fn children(&self, element: ElementId) -> Vec<ElementId>;

    /// Viewport-relative bounding box.
    fn rect(&self, element: ElementId) -> Rect;

    /// Computed value of one style property, `None` when unknown.
    fn computed_style(&self, element: ElementId, property: &str) -> Option<String>;

    /// Topmost visible element at a viewport point.
    fn element_at(&self, x: f64, y: f64) -> Option<ElementId>;

    /// Hide or restore an element for hit testing.
    ///
    /// Used by the interaction engine to point-test through its own
    /// click-capture overlay; the element must be restored within the
    /// same event handler.
    fn set_hidden(&self, element: ElementId, hidden: bool);

    /// Current viewport dimensions.
    fn viewport(&self) -> Viewport;

    /// Current scroll offset (left, top) in CSS pixels.
    fn scroll_offset(&self) -> (f64, f64);

    /// Page URL, when the host exposes one.
    fn url(&self) -> Option<String>;

    /// User agent string, when the host exposes one.
    fn user_agent(&self) -> Option<String>;
}
