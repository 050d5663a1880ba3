//! Node resolver
//!
//! Maps a raw element handle to a [`ComponentNode`] by walking the host
//! page and the framework introspection capability. Resolution either
//! succeeds with a fresh snapshot or misses with `None` — a miss is not
//! an error, it just means the pointer is over nothing markable.

use super::node::{ComponentNode, NodeKind, ParentInfo, KEY_COMPUTED_STYLES};
use crate::host::introspection::{ComponentHandle, Introspection};
use crate::host::page::{ElementId, HostPage};
use crate::sanitize::{is_internal_key, Sanitizer};
use std::collections::HashSet;
use std::time::Instant;
use tracing::warn;

/// Soft per-resolution budget: one animation frame.
const FRAME_BUDGET_MS: f64 = 16.0;

/// Resolves element handles to component nodes.
///
/// Every call produces a fresh node; the private counter makes `uid`
/// unique within the process run.
#[derive(Debug)]
pub struct ComponentWalker {
    uid_counter: u64,
    sanitizer: Sanitizer,
}

impl Default for ComponentWalker {
    fn default() -> Self {
        Self::new()
    }
}

impl ComponentWalker {
    pub fn new() -> Self {
        Self {
            uid_counter: 0,
            // The inspectable property listing expands one nested level.
            sanitizer: Sanitizer::shallow(),
        }
    }

    /// Resolve an element to a component node.
    ///
    /// Returns `None` when introspection is unavailable or the element
    /// has no owning component and sits outside any component subtree.
    pub fn resolve(
        &mut self,
        page: &dyn HostPage,
        intro: &dyn Introspection,
        element: ElementId,
    ) -> Option<ComponentNode> {
        if !intro.is_available() {
            warn!("framework introspection not available; resolution disabled");
            return None;
        }

        let started = Instant::now();
        let node = self.resolve_inner(page, intro, element);

        let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
        if elapsed_ms > FRAME_BUDGET_MS {
            warn!(
                elapsed_ms = format!("{elapsed_ms:.2}"),
                "node resolution exceeded one-frame budget"
            );
        }

        node
    }

    fn resolve_inner(
        &mut self,
        page: &dyn HostPage,
        intro: &dyn Introspection,
        element: ElementId,
    ) -> Option<ComponentNode> {
        if let Some(component) = intro.component_for(element) {
            return Some(self.component_node(page, intro, element, component));
        }

        let owning = intro.owning_component_for(element)?;
        if intro.host_element(owning) == Some(element) {
            // The hit landed on the owning component's own host element.
            return Some(self.component_node(page, intro, element, owning));
        }

        Some(self.plain_node(page, intro, element, owning))
    }

    /// Full component node with framework metadata.
    fn component_node(
        &mut self,
        page: &dyn HostPage,
        intro: &dyn Introspection,
        element: ElementId,
        component: ComponentHandle,
    ) -> ComponentNode {
        let bound = intro.bound_properties(component);
        let bound_names: HashSet<&str> = bound.iter().map(|(name, _)| name.as_str()).collect();
        let events = intro.emitted_events(component);
        let event_names: HashSet<&str> = events.iter().map(String::as_str).collect();

        let bound_properties: Vec<_> = bound
            .iter()
            .filter(|(_, value)| !value.is_undefined())
            .map(|(name, value)| (name.clone(), self.sanitizer.sanitize(value)))
            .collect();

        let public_state: Vec<_> = intro
            .state_entries(component)
            .iter()
            .filter(|(name, _)| {
                !is_internal_key(name)
                    && !bound_names.contains(name.as_str())
                    && !event_names.contains(name.as_str())
            })
            .filter_map(|(name, property)| match property {
                crate::host::value::Property::Value(value) if value.is_function() => None,
                crate::host::value::Property::Value(value) => {
                    Some((name.clone(), self.sanitizer.sanitize(value)))
                }
                crate::host::value::Property::AccessFailed => {
                    Some((name.clone(), crate::host::value::Value::str("[AccessDenied]")))
                }
            })
            .collect();

        ComponentNode {
            uid: self.next_uid(),
            display_name: intro.display_name(component),
            selector: intro.selector(component),
            dom_path: compute_dom_path(page, element),
            bound_properties,
            emitted_events: events,
            public_state,
            element,
            rect: page.rect(element),
            computed_styles: extract_computed_styles(page, element),
            behaviors: behavior_names(intro, element),
            parent: parent_info(page, intro, element),
            kind: NodeKind::Component,
        }
    }

    /// Plain-node variant for an element without a component of its own.
    fn plain_node(
        &mut self,
        page: &dyn HostPage,
        intro: &dyn Introspection,
        element: ElementId,
        owning: ComponentHandle,
    ) -> ComponentNode {
        let tag = page.tag_name(element);
        let display_name = if let Some(id) = page.id_attr(element) {
            format!("{tag}#{id}")
        } else if let Some(class) = page.classes(element).first() {
            format!("{tag}.{class}")
        } else {
            tag.clone()
        };

        ComponentNode {
            uid: self.next_uid(),
            display_name,
            selector: tag,
            dom_path: compute_dom_path(page, element),
            bound_properties: Vec::new(),
            emitted_events: Vec::new(),
            public_state: Vec::new(),
            element,
            rect: page.rect(element),
            computed_styles: extract_computed_styles(page, element),
            behaviors: behavior_names(intro, element),
            parent: Some(ParentInfo {
                display_name: intro.display_name(owning),
                selector: intro.selector(owning),
            }),
            kind: NodeKind::Plain,
        }
    }

    fn next_uid(&mut self) -> String {
        self.uid_counter += 1;
        format!(
            "ag-{}-{}",
            chrono::Utc::now().timestamp_millis(),
            self.uid_counter
        )
    }
}

/// One path token: tag plus `#id` or `.first-class` when present.
fn path_token(page: &dyn HostPage, element: ElementId) -> String {
    let tag = page.tag_name(element);
    if let Some(id) = page.id_attr(element) {
        format!("{tag}#{id}")
    } else if let Some(class) = page.classes(element).first() {
        format!("{tag}.{class}")
    } else {
        tag
    }
}

/// Root-to-node path of tag/id/first-class tokens, rooted at `body`.
fn compute_dom_path(page: &dyn HostPage, element: ElementId) -> String {
    let mut tokens = Vec::new();
    let mut current = Some(element);
    while let Some(id) = current {
        if page.tag_name(id) == "body" {
            break;
        }
        tokens.push(path_token(page, id));
        current = page.parent(id);
    }
    tokens.push("body".to_string());
    tokens.reverse();
    tokens.join(" > ")
}

/// Allow-listed computed styles, missing properties skipped.
fn extract_computed_styles(page: &dyn HostPage, element: ElementId) -> Vec<(String, String)> {
    KEY_COMPUTED_STYLES
        .iter()
        .filter_map(|prop| {
            page.computed_style(element, prop)
                .map(|value| (prop.to_string(), value))
        })
        .collect()
}

/// Names of behaviors applied to the element, anonymous entries dropped.
fn behavior_names(intro: &dyn Introspection, element: ElementId) -> Vec<String> {
    intro
        .behaviors_for(element)
        .into_iter()
        .map(|handle| intro.display_name(handle))
        .filter(|name| !name.is_empty() && name != "Object")
        .collect()
}

/// Nearest ancestor component identity, walking strictly upward.
fn parent_info(
    page: &dyn HostPage,
    intro: &dyn Introspection,
    element: ElementId,
) -> Option<ParentInfo> {
    let mut current = page.parent(element);
    while let Some(id) = current {
        if let Some(component) = intro.component_for(id) {
            return Some(ParentInfo {
                display_name: intro.display_name(component),
                selector: intro.selector(component),
            });
        }
        current = page.parent(id);
    }
    None
}
