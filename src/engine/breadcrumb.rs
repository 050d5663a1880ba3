//! Breadcrumb trail
//!
//! When an element is locked, the trail lists its component-host
//! ancestry (outermost first) ending with the locked element itself, so
//! the user can retarget a wrapping component without re-hovering.

use crate::host::introspection::Introspection;
use crate::host::page::{ElementId, HostPage};
use crate::resolve::node::ComponentNode;

/// One step in the ancestry trail.
#[derive(Debug, Clone, PartialEq)]
pub struct BreadcrumbEntry {
    pub display_name: String,
    pub selector: String,
    pub element: ElementId,
}

/// Component ancestry of a locked element, outermost to innermost.
#[derive(Debug, Clone, PartialEq)]
pub struct BreadcrumbTrail {
    entries: Vec<BreadcrumbEntry>,
    selected: usize,
}

impl BreadcrumbTrail {
    /// Build the trail for a freshly locked node.
    pub fn for_node(
        page: &dyn HostPage,
        intro: &dyn Introspection,
        node: &ComponentNode,
    ) -> Self {
        let mut entries = vec![BreadcrumbEntry {
            display_name: node.display_name.clone(),
            selector: node.selector.clone(),
            element: node.element,
        }];

        let mut current = page.parent(node.element);
        while let Some(id) = current {
            if let Some(component) = intro.component_for(id) {
                entries.push(BreadcrumbEntry {
                    display_name: intro.display_name(component),
                    selector: intro.selector(component),
                    element: id,
                });
            }
            current = page.parent(id);
        }

        entries.reverse();
        let selected = entries.len() - 1;
        Self { entries, selected }
    }

    pub fn entries(&self) -> &[BreadcrumbEntry] {
        &self.entries
    }

    /// Index of the entry the lock currently targets.
    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn select(&mut self, index: usize) {
        if index < self.entries.len() {
            self.selected = index;
        }
    }

    /// Trails with a single entry carry no extra information.
    pub fn is_visible(&self) -> bool {
        self.entries.len() > 1
    }
}
