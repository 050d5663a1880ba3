//! Fixture-backed host page
//!
//! An in-memory implementation of [`HostPage`] and [`Introspection`] over
//! a hand-built element tree. This is the test double that makes the node
//! resolver and the interaction engine testable without a live document,
//! and it backs the CLI `demo` command.
//!
//! Elements must be added parent-first; hit testing returns the most
//! recently added visible element containing the point, so children win
//! over their ancestors.

use super::introspection::{ComponentHandle, Introspection};
use super::page::{ElementId, HostPage, Rect, Viewport};
use super::value::{Property, Value};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

/// Builder for one fixture element.
#[derive(Debug, Clone, Default)]
pub struct FixtureElement {
    tag: String,
    id_attr: Option<String>,
    classes: Vec<String>,
    attributes: Vec<(String, String)>,
    text: String,
    rect: Rect,
    styles: Vec<(String, String)>,
}

impl FixtureElement {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id_attr = Some(id.into());
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn rect(mut self, x: f64, y: f64, width: f64, height: f64) -> Self {
        self.rect = Rect::new(x, y, width, height);
        self
    }

    pub fn style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.styles.push((property.into(), value.into()));
        self
    }
}

#[derive(Debug, Clone)]
struct ElementData {
    tag: String,
    id_attr: Option<String>,
    classes: Vec<String>,
    attributes: Vec<(String, String)>,
    text: String,
    rect: Rect,
    styles: Vec<(String, String)>,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
}

#[derive(Debug, Clone)]
struct ComponentData {
    display_name: String,
    selector: String,
    host: ElementId,
    bound: Vec<(String, Value)>,
    events: Vec<String>,
    state: Vec<(String, Property)>,
}

/// In-memory host page + introspection double.
#[derive(Debug, Default)]
pub struct FixturePage {
    elements: Vec<ElementData>,
    components: Vec<ComponentData>,
    host_to_component: HashMap<ElementId, ComponentHandle>,
    behaviors: HashMap<ElementId, Vec<ComponentHandle>>,
    hidden: RefCell<HashSet<ElementId>>,
    viewport: Viewport,
    scroll: (f64, f64),
    url: Option<String>,
    user_agent: Option<String>,
    introspection_available: bool,
}

impl FixturePage {
    /// Empty page with introspection available and a default viewport.
    pub fn new() -> Self {
        Self {
            introspection_available: true,
            ..Default::default()
        }
    }

    /// Empty page with nothing resolvable — every query returns defaults.
    pub fn empty() -> Self {
        Self::new()
    }

    /// The introspection side of this fixture (the same object).
    pub fn introspection(&self) -> &Self {
        self
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.viewport = Viewport { width, height };
    }

    pub fn set_scroll_offset(&mut self, left: f64, top: f64) {
        self.scroll = (left, top);
    }

    pub fn set_url(&mut self, url: impl Into<String>) {
        self.url = Some(url.into());
    }

    pub fn set_user_agent(&mut self, user_agent: impl Into<String>) {
        self.user_agent = Some(user_agent.into());
    }

    /// Simulate a missing framework debug surface.
    pub fn set_introspection_available(&mut self, available: bool) {
        self.introspection_available = available;
    }

    /// First element with the given tag name, in insertion order.
    pub fn find_by_tag(&self, tag: &str) -> Option<ElementId> {
        self.elements
            .iter()
            .position(|data| data.tag == tag)
            .map(|index| ElementId(index as u64))
    }

    /// Add a root element (no parent).
    pub fn add_root(&mut self, element: FixtureElement) -> ElementId {
        self.push_element(element, None)
    }

    /// Add a child element under `parent`.
    pub fn add_child(&mut self, parent: ElementId, element: FixtureElement) -> ElementId {
        self.push_element(element, Some(parent))
    }

    fn push_element(&mut self, element: FixtureElement, parent: Option<ElementId>) -> ElementId {
        let id = ElementId(self.elements.len() as u64);
        self.elements.push(ElementData {
            tag: element.tag,
            id_attr: element.id_attr,
            classes: element.classes,
            attributes: element.attributes,
            text: element.text,
            rect: element.rect,
            styles: element.styles,
            parent,
            children: Vec::new(),
        });
        if let Some(parent) = parent {
            if let Some(data) = self.elements.get_mut(parent.0 as usize) {
                data.children.push(id);
            }
        }
        id
    }

    /// Register a component hosted on `host`.
    pub fn register_component(
        &mut self,
        host: ElementId,
        display_name: impl Into<String>,
        selector: impl Into<String>,
    ) -> ComponentHandle {
        let handle = ComponentHandle(self.components.len() as u64);
        self.components.push(ComponentData {
            display_name: display_name.into(),
            selector: selector.into(),
            host,
            bound: Vec::new(),
            events: Vec::new(),
            state: Vec::new(),
        });
        self.host_to_component.insert(host, handle);
        handle
    }

    pub fn set_bound_properties(
        &mut self,
        component: ComponentHandle,
        bound: Vec<(impl Into<String>, Value)>,
    ) {
        if let Some(data) = self.components.get_mut(component.0 as usize) {
            data.bound = bound.into_iter().map(|(k, v)| (k.into(), v)).collect();
        }
    }

    pub fn set_emitted_events(
        &mut self,
        component: ComponentHandle,
        events: Vec<impl Into<String>>,
    ) {
        if let Some(data) = self.components.get_mut(component.0 as usize) {
            data.events = events.into_iter().map(Into::into).collect();
        }
    }

    pub fn set_state_entries(
        &mut self,
        component: ComponentHandle,
        state: Vec<(impl Into<String>, Property)>,
    ) {
        if let Some(data) = self.components.get_mut(component.0 as usize) {
            data.state = state.into_iter().map(|(k, v)| (k.into(), v)).collect();
        }
    }

    /// Register a behavior/directive applied to an element.
    pub fn register_behavior(
        &mut self,
        element: ElementId,
        display_name: impl Into<String>,
    ) -> ComponentHandle {
        let handle = ComponentHandle(self.components.len() as u64);
        self.components.push(ComponentData {
            display_name: display_name.into(),
            selector: String::new(),
            host: element,
            bound: Vec::new(),
            events: Vec::new(),
            state: Vec::new(),
        });
        self.behaviors.entry(element).or_default().push(handle);
        handle
    }

    fn element(&self, id: ElementId) -> Option<&ElementData> {
        self.elements.get(id.0 as usize)
    }

    /// A small shop page used by the CLI demo, doc examples, and tests.
    ///
    /// Layout (viewport 1280×720, all rects viewport-relative):
    /// - `body` — full viewport
    /// - `app-root` (`AppComponent`) — full viewport
    ///   - `header.app-header` — (0, 0, 1280, 64), "Demo Shop"
    ///   - `app-product-card` (`ProductCardComponent`) — (40, 80, 400, 110)
    ///     - `div.card-body` — (48, 88, 384, 94)
    ///       - `h3.card-title` — (56, 96, 200, 24), "Ceramic Mug"
    ///       - `p.card-text` — (56, 128, 360, 40)
    ///   - `app-submit-button` (`SubmitButtonComponent`) — (40, 200, 180, 56)
    ///     - `button#login-btn.btn.primary` — (48, 208, 164, 40), "Log in"
    ///   - `p#description` — (40, 280, 600, 60)
    ///   - `div.links` — (40, 360, 700, 40) with seven `a.link` children
    pub fn sample() -> Self {
        let mut page = Self::new();
        page.set_viewport(1280, 720);
        page.set_url("http://localhost:4200/products");
        page.set_user_agent("AgentationFixture/1.0");

        let body = page.add_root(FixtureElement::new("body").rect(0.0, 0.0, 1280.0, 720.0));
        let app_root = page.add_child(
            body,
            FixtureElement::new("app-root").rect(0.0, 0.0, 1280.0, 720.0),
        );
        page.register_component(app_root, "AppComponent", "app-root");

        page.add_child(
            app_root,
            FixtureElement::new("header")
                .class("app-header")
                .rect(0.0, 0.0, 1280.0, 64.0)
                .text("Demo Shop")
                .style("display", "flex")
                .style("background-color", "rgb(17, 24, 39)")
                .style("color", "rgb(255, 255, 255)"),
        );

        let card = page.add_child(
            app_root,
            FixtureElement::new("app-product-card")
                .rect(40.0, 80.0, 400.0, 110.0)
                .style("display", "block")
                .style("border", "1px solid rgb(229, 231, 235)")
                .style("border-radius", "8px"),
        );
        let card_component = page.register_component(card, "ProductCardComponent", "app-product-card");
        page.set_bound_properties(
            card_component,
            vec![
                ("title", Value::str("Ceramic Mug")),
                ("price", Value::Number(18.5)),
                ("inStock", Value::Bool(true)),
            ],
        );
        page.set_emitted_events(card_component, vec!["addToCart", "priceChanged"]);
        page.set_state_entries(
            card_component,
            vec![
                ("quantity", Property::Value(Value::Number(1.0))),
                ("cartStream", Property::Value(Value::stream("Observable"))),
                (
                    "formatPrice",
                    Property::Value(Value::Function {
                        name: "formatPrice".to_string(),
                        source: "function formatPrice(value, currency) { return currency + value; }"
                            .to_string(),
                    }),
                ),
                ("_renderCount", Property::Value(Value::Number(4.0))),
                ("ngHostBinding", Property::Value(Value::str("internal"))),
                ("title", Property::Value(Value::str("Ceramic Mug"))),
            ],
        );
        page.register_behavior(card, "HighlightDirective");

        let card_body = page.add_child(
            card,
            FixtureElement::new("div")
                .class("card-body")
                .rect(48.0, 88.0, 384.0, 94.0)
                .text("Ceramic Mug Handmade stoneware, 350 ml"),
        );
        page.add_child(
            card_body,
            FixtureElement::new("h3")
                .class("card-title")
                .rect(56.0, 96.0, 200.0, 24.0)
                .text("Ceramic Mug")
                .style("font-size", "18px"),
        );
        page.add_child(
            card_body,
            FixtureElement::new("p")
                .class("card-text")
                .rect(56.0, 128.0, 360.0, 40.0)
                .text("Handmade stoneware, 350 ml"),
        );

        let submit = page.add_child(
            app_root,
            FixtureElement::new("app-submit-button").rect(40.0, 200.0, 180.0, 56.0),
        );
        let submit_component =
            page.register_component(submit, "SubmitButtonComponent", "app-submit-button");
        page.set_bound_properties(submit_component, vec![("label", Value::str("Log in"))]);
        page.set_emitted_events(submit_component, vec!["pressed"]);
        page.set_state_entries(
            submit_component,
            vec![("disabled", Property::Value(Value::Bool(false)))],
        );
        page.add_child(
            submit,
            FixtureElement::new("button")
                .id("login-btn")
                .class("btn")
                .class("primary")
                .attr("type", "submit")
                .attr("tabindex", "0")
                .rect(48.0, 208.0, 164.0, 40.0)
                .text("Log in")
                .style("display", "inline-block")
                .style("color", "rgb(255, 255, 255)")
                .style("background-color", "rgb(59, 130, 246)")
                .style("font-size", "14px")
                .style("border-radius", "6px")
                .style("cursor", "pointer"),
        );

        page.add_child(
            app_root,
            FixtureElement::new("p")
                .id("description")
                .rect(40.0, 280.0, 600.0, 60.0)
                .text("Every mug is thrown by hand and fired twice for durability."),
        );

        let links = page.add_child(
            app_root,
            FixtureElement::new("div")
                .class("links")
                .rect(40.0, 360.0, 700.0, 40.0),
        );
        for i in 0..7 {
            page.add_child(
                links,
                FixtureElement::new("a")
                    .class("link")
                    .rect(40.0 + (i as f64) * 100.0, 360.0, 90.0, 40.0)
                    .text(format!("Link {}", i + 1)),
            );
        }

        page
    }
}

impl HostPage for FixturePage {
    fn tag_name(&self, element: ElementId) -> String {
        self.element(element)
            .map(|e| e.tag.clone())
            .unwrap_or_default()
    }

    fn id_attr(&self, element: ElementId) -> Option<String> {
        self.element(element).and_then(|e| e.id_attr.clone())
    }

    fn classes(&self, element: ElementId) -> Vec<String> {
        self.element(element)
            .map(|e| e.classes.clone())
            .unwrap_or_default()
    }

    fn attribute(&self, element: ElementId, name: &str) -> Option<String> {
        self.element(element).and_then(|e| {
            e.attributes
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, v)| v.clone())
        })
    }

    fn text_content(&self, element: ElementId) -> String {
        self.element(element)
            .map(|e| e.text.clone())
            .unwrap_or_default()
    }

    fn parent(&self, element: ElementId) -> Option<ElementId> {
        self.element(element).and_then(|e| e.parent)
    }

    fn children(&self, element: ElementId) -> Vec<ElementId> {
        self.element(element)
            .map(|e| e.children.clone())
            .unwrap_or_default()
    }

    fn rect(&self, element: ElementId) -> Rect {
        self.element(element).map(|e| e.rect).unwrap_or_default()
    }

    fn computed_style(&self, element: ElementId, property: &str) -> Option<String> {
        self.element(element).and_then(|e| {
            e.styles
                .iter()
                .find(|(p, _)| p == property)
                .map(|(_, v)| v.clone())
        })
    }

    fn element_at(&self, x: f64, y: f64) -> Option<ElementId> {
        let hidden = self.hidden.borrow();
        (0..self.elements.len())
            .rev()
            .map(|i| ElementId(i as u64))
            .find(|id| {
                !hidden.contains(id)
                    && self
                        .element(*id)
                        .map(|e| e.rect.contains(x, y))
                        .unwrap_or(false)
            })
    }

    fn set_hidden(&self, element: ElementId, hidden: bool) {
        if hidden {
            self.hidden.borrow_mut().insert(element);
        } else {
            self.hidden.borrow_mut().remove(&element);
        }
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn scroll_offset(&self) -> (f64, f64) {
        self.scroll
    }

    fn url(&self) -> Option<String> {
        self.url.clone()
    }

    fn user_agent(&self) -> Option<String> {
        self.user_agent.clone()
    }
}

impl Introspection for FixturePage {
    fn is_available(&self) -> bool {
        self.introspection_available
    }

    fn component_for(&self, element: ElementId) -> Option<ComponentHandle> {
        self.host_to_component.get(&element).copied()
    }

    fn owning_component_for(&self, element: ElementId) -> Option<ComponentHandle> {
        let mut current = Some(element);
        while let Some(id) = current {
            if let Some(handle) = self.host_to_component.get(&id) {
                return Some(*handle);
            }
            current = self.parent(id);
        }
        None
    }

    fn behaviors_for(&self, element: ElementId) -> Vec<ComponentHandle> {
        self.behaviors.get(&element).cloned().unwrap_or_default()
    }

    fn display_name(&self, component: ComponentHandle) -> String {
        self.components
            .get(component.0 as usize)
            .map(|c| c.display_name.clone())
            .unwrap_or_default()
    }

    fn selector(&self, component: ComponentHandle) -> String {
        self.components
            .get(component.0 as usize)
            .map(|c| c.selector.clone())
            .unwrap_or_default()
    }

    fn host_element(&self, component: ComponentHandle) -> Option<ElementId> {
        self.components.get(component.0 as usize).map(|c| c.host)
    }

    fn bound_properties(&self, component: ComponentHandle) -> Vec<(String, Value)> {
        self.components
            .get(component.0 as usize)
            .map(|c| c.bound.clone())
            .unwrap_or_default()
    }

    fn emitted_events(&self, component: ComponentHandle) -> Vec<String> {
        self.components
            .get(component.0 as usize)
            .map(|c| c.events.clone())
            .unwrap_or_default()
    }

    fn state_entries(&self, component: ComponentHandle) -> Vec<(String, Property)> {
        self.components
            .get(component.0 as usize)
            .map(|c| c.state.clone())
            .unwrap_or_default()
    }
}
