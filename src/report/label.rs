//! Element labels
//!
//! Human-readable one-line identity for a marker target, used as the
//! section heading in reports.

use crate::host::page::HostPage;
use crate::resolve::node::ComponentNode;

fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

/// Derive the label for a node.
///
/// Priority: framework display name (components only), ARIA role, then
/// per-tag heuristics, then the selector, then the bare tag.
pub fn element_label(page: &dyn HostPage, node: &ComponentNode) -> String {
    let element = node.element;
    let tag = page.tag_name(element);
    let text = truncate_chars(page.text_content(element).trim(), 30);

    if node.is_component() && node.display_name != tag {
        return node.display_name.clone();
    }

    if let Some(role) = page.attribute(element, "role") {
        let subject = if text.is_empty() { tag.as_str() } else { &text };
        return format!("{role}: \"{subject}\"");
    }

    match tag.as_str() {
        "button" => {
            let subject = if text.is_empty() { "(no text)" } else { &text };
            format!("button \"{subject}\"")
        }
        "a" => {
            let aria = page.attribute(element, "aria-label");
            let subject = if !text.is_empty() {
                text.clone()
            } else if let Some(aria) = aria {
                aria
            } else {
                "(no text)".to_string()
            };
            format!("link \"{subject}\"")
        }
        "input" => {
            let kind = page
                .attribute(element, "type")
                .unwrap_or_else(|| "text".to_string());
            format!("input[{kind}]")
        }
        "p" => {
            if text.is_empty() {
                "paragraph: \"\"".to_string()
            } else {
                format!("paragraph: \"{}...\"", truncate_chars(&text, 40))
            }
        }
        "div" | "section" => {
            if let Some(class) = page.classes(element).first() {
                format!("{tag}.{class}")
            } else if !node.selector.is_empty() {
                format!("<{}>", node.selector)
            } else {
                tag
            }
        }
        _ => {
            if !node.selector.is_empty() {
                format!("<{}>", node.selector)
            } else {
                tag
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::fixture::{FixtureElement, FixturePage};
    use crate::resolve::walker::ComponentWalker;

    fn resolve(page: &FixturePage, x: f64, y: f64) -> ComponentNode {
        let element = page.element_at(x, y).unwrap();
        ComponentWalker::new()
            .resolve(page, page.introspection(), element)
            .unwrap()
    }

    #[test]
    fn test_component_label_is_display_name() {
        let page = FixturePage::sample();
        let node = resolve(&page, 45.0, 85.0);
        assert_eq!(element_label(&page, &node), "ProductCardComponent");
    }

    #[test]
    fn test_button_label_uses_text() {
        let page = FixturePage::sample();
        let node = resolve(&page, 60.0, 220.0);
        assert_eq!(element_label(&page, &node), "button \"Log in\"");
    }

    #[test]
    fn test_paragraph_label_truncates() {
        let page = FixturePage::sample();
        let node = resolve(&page, 50.0, 290.0);
        let label = element_label(&page, &node);
        assert!(label.starts_with("paragraph: \""));
        assert!(label.ends_with("...\""));
    }

    #[test]
    fn test_role_attribute_wins_over_tag() {
        let mut page = FixturePage::new();
        let body = page.add_root(FixtureElement::new("body").rect(0.0, 0.0, 100.0, 100.0));
        let host = page.add_child(body, FixtureElement::new("app-x").rect(0.0, 0.0, 50.0, 50.0));
        page.register_component(host, "XComponent", "app-x");
        let tab = page.add_child(
            host,
            FixtureElement::new("span")
                .attr("role", "tab")
                .text("Details")
                .rect(0.0, 0.0, 20.0, 20.0),
        );
        let node = ComponentWalker::new()
            .resolve(&page, page.introspection(), tab)
            .unwrap();
        assert_eq!(element_label(&page, &node), "tab: \"Details\"");
    }
}
