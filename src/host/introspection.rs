//! Framework introspection capability
//!
//! The resolver needs the host framework's private component metadata:
//! which component owns an element, what its bound properties and emitted
//! events are, and what public state the instance carries. That access is
//! framework- and host-specific, so it sits behind the [`Introspection`]
//! trait with a fixture-backed double in [`crate::host::fixture`] and live
//! adapters in embedder code.

use super::page::ElementId;
use super::value::{Property, Value};

/// Opaque handle to a component instance known to the host framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComponentHandle(pub u64);

/// Access to the host framework's component metadata.
///
/// All lookups are best-effort: a handle the framework no longer knows
/// about yields empty defaults, never a panic. `is_available` gates the
/// whole feature — when it reports `false`, recording cannot start.
pub trait Introspection {
    /// Whether the framework debug surface is reachable at all.
    fn is_available(&self) -> bool;

    /// Component hosted directly on this element, if the element is a
    /// component host.
    fn component_for(&self, element: ElementId) -> Option<ComponentHandle>;

    /// Nearest ancestor component owning this element, if any.
    fn owning_component_for(&self, element: ElementId) -> Option<ComponentHandle>;

    /// Cross-cutting behaviors/directives applied to this element.
    fn behaviors_for(&self, element: ElementId) -> Vec<ComponentHandle>;

    /// Component class name, e.g. `"ProductCardComponent"`.
    fn display_name(&self, component: ComponentHandle) -> String;

    /// Framework-level tag selector, e.g. `"app-product-card"`.
    fn selector(&self, component: ComponentHandle) -> String;

    /// The element this component is hosted on.
    fn host_element(&self, component: ComponentHandle) -> Option<ElementId>;

    /// Bound property names and their current values, in definition order.
    fn bound_properties(&self, component: ComponentHandle) -> Vec<(String, Value)>;

    /// Names of the events the component can emit.
    fn emitted_events(&self, component: ComponentHandle) -> Vec<String>;

    /// All enumerable state entries on the component instance, unfiltered.
    ///
    /// The resolver filters out bound properties, event members, internal
    /// names, and function values before sanitizing.
    fn state_entries(&self, component: ComponentHandle) -> Vec<(String, Property)>;
}
