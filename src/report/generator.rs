//! Tiered report generator
//!
//! Renders a session's markers as markdown at four verbosity tiers.
//! Tiers are strictly additive: every line a lower tier prints appears
//! verbatim at the higher tiers, in the same order, so diffs between
//! tiers are pure insertions.

use crate::host::page::{HostPage, Viewport};
use crate::resolve::node::ComponentNode;
use crate::report::label::element_label;
use crate::session::marker::MarkerAnnotation;
use crate::session::settings::{OutputDetail, Settings};
use chrono::{TimeZone, Utc};
use std::fmt::Write;

/// Style properties shown at the standard tier.
const KEY_STYLE_SUBSET: &[&str] = &[
    "color",
    "background-color",
    "font-size",
    "font-weight",
    "display",
    "position",
];

/// Maximum characters of element text rendered as context.
const CONTEXT_LIMIT: usize = 200;

/// Text longer than this also gets a quoted selected-text line at the
/// forensic tier.
const SELECTED_TEXT_THRESHOLD: usize = 100;

/// Page-level facts rendered in the report header.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Environment {
    pub url: Option<String>,
    pub viewport: Option<Viewport>,
    pub user_agent: Option<String>,
    /// Epoch milliseconds.
    pub timestamp: Option<i64>,
}

impl Environment {
    /// Snapshot the environment from a live page.
    pub fn from_page(page: &dyn HostPage) -> Self {
        Self {
            url: page.url(),
            viewport: Some(page.viewport()),
            user_agent: page.user_agent(),
            timestamp: Some(Utc::now().timestamp_millis()),
        }
    }
}

/// Markdown report builder. Reusable; each `generate` call starts from
/// an empty buffer.
#[derive(Debug, Default)]
pub struct ReportGenerator {
    buffer: String,
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render the full report for a set of markers.
    pub fn generate(
        &mut self,
        markers: &[MarkerAnnotation],
        settings: &Settings,
        env: &Environment,
        page: &dyn HostPage,
    ) -> String {
        self.buffer.clear();
        let tier = settings.output_detail;

        self.header(tier, env);
        for marker in markers {
            self.marker_section(marker, tier, page);
            self.line("");
        }

        std::mem::take(&mut self.buffer)
    }

    fn line(&mut self, text: &str) {
        self.buffer.push_str(text);
        self.buffer.push('\n');
    }

    fn header(&mut self, tier: OutputDetail, env: &Environment) {
        if tier == OutputDetail::Compact {
            self.line("## Page Feedback");
            self.line("");
            return;
        }

        let path = path_from_url(env.url.as_deref());
        write!(self.buffer, "## Page Feedback: {path}").expect("write to String");
        self.line("");
        self.line("");
        self.line("**Environment:**");

        if let Some(viewport) = &env.viewport {
            write!(
                self.buffer,
                "- Viewport: {}×{}",
                viewport.width, viewport.height
            )
            .expect("write to String");
            self.line("");
        }
        if let Some(url) = &env.url {
            write!(self.buffer, "- URL: {url}").expect("write to String");
            self.line("");
        }
        if tier != OutputDetail::Standard {
            if let Some(user_agent) = &env.user_agent {
                write!(self.buffer, "- User Agent: {user_agent}").expect("write to String");
                self.line("");
            }
        }
        if let Some(timestamp) = env.timestamp {
            if let Some(when) = Utc.timestamp_millis_opt(timestamp).single() {
                write!(
                    self.buffer,
                    "- Timestamp: {}",
                    when.to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
                )
                .expect("write to String");
                self.line("");
            }
        }
        self.line("");
        self.line("---");
        self.line("");
    }

    fn marker_section(&mut self, marker: &MarkerAnnotation, tier: OutputDetail, page: &dyn HostPage) {
        let node = &marker.target;
        let label = element_label(page, node);
        write!(self.buffer, "### {}. {label}", marker.index).expect("write to String");
        self.line("");

        if tier == OutputDetail::Compact {
            if !node.selector.is_empty() {
                write!(self.buffer, "**Selector:** `<{}>`", node.selector)
                    .expect("write to String");
                self.line("");
            }
            self.feedback(marker);
            return;
        }

        write!(self.buffer, "**Full DOM Path:** {}", node.dom_path).expect("write to String");
        self.line("");

        let classes = page.classes(node.element);
        if !classes.is_empty() {
            write!(self.buffer, "**CSS Classes:** {}", classes.join(", "))
                .expect("write to String");
            self.line("");
        }

        let rect = &node.rect;
        write!(
            self.buffer,
            "**Position:** x:{}, y:{} ({}×{}px)",
            rect.x.round(),
            rect.y.round(),
            rect.width.round(),
            rect.height.round()
        )
        .expect("write to String");
        self.line("");

        let key_styles = format_styles(node, KEY_STYLE_SUBSET, &["none", "normal"]);
        if !key_styles.is_empty() {
            write!(self.buffer, "**Computed Styles:** {key_styles}").expect("write to String");
            self.line("");
        }

        if tier >= OutputDetail::Detailed {
            self.detailed_fields(marker, tier, page);
        }

        self.feedback(marker);
    }

    fn detailed_fields(&mut self, marker: &MarkerAnnotation, tier: OutputDetail, page: &dyn HostPage) {
        let node = &marker.target;
        let rect = &node.rect;

        let viewport_width = page.viewport().width.max(1) as f64;
        let percent_x = (rect.x + rect.width / 2.0) / viewport_width * 100.0;
        let center_y = (rect.y + rect.height / 2.0).round();
        write!(
            self.buffer,
            "**Annotation at:** {percent_x:.1}% from left, {center_y}px from top"
        )
        .expect("write to String");
        self.line("");

        let context = context_text(page, node);
        if !context.is_empty() {
            write!(self.buffer, "**Context:** {context}").expect("write to String");
            self.line("");
            if tier == OutputDetail::Forensic && context.chars().count() > SELECTED_TEXT_THRESHOLD {
                write!(self.buffer, "**Selected text:** \"{context}\"").expect("write to String");
                self.line("");
            }
        }

        let extra_props: Vec<&str> = node
            .computed_styles
            .iter()
            .map(|(prop, _)| prop.as_str())
            .filter(|prop| !KEY_STYLE_SUBSET.contains(prop))
            .collect();
        let additional = format_styles(node, &extra_props, &["none", "normal", "auto"]);
        if !additional.is_empty() {
            write!(self.buffer, "**Additional Styles:** {additional}").expect("write to String");
            self.line("");
        }

        let accessibility = accessibility_summary(page, node);
        if !accessibility.is_empty() {
            write!(self.buffer, "**Accessibility:** {accessibility}").expect("write to String");
            self.line("");
        }

        let nearby = nearby_elements(page, node);
        if !nearby.is_empty() {
            write!(self.buffer, "**Nearby Elements:** {nearby}").expect("write to String");
            self.line("");
        }
    }

    fn feedback(&mut self, marker: &MarkerAnnotation) {
        if !marker.intent.is_empty() {
            write!(self.buffer, "**Feedback:** {}", marker.intent).expect("write to String");
            self.line("");
        }
    }
}

/// Path component of a URL, `/` when absent or unparseable.
fn path_from_url(url: Option<&str>) -> String {
    let Some(url) = url else {
        return "/".to_string();
    };
    let Some(scheme_end) = url.find("://") else {
        return "/".to_string();
    };
    let rest = &url[scheme_end + 3..];
    let Some(slash) = rest.find('/') else {
        return "/".to_string();
    };
    let path = &rest[slash..];
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let path = &path[..end];
    if path.is_empty() {
        "/".to_string()
    } else {
        path.to_string()
    }
}

/// `prop: value; ...` over the allow-listed properties, values matching
/// `skip` dropped.
fn format_styles(node: &ComponentNode, props: &[&str], skip: &[&str]) -> String {
    let parts: Vec<String> = props
        .iter()
        .filter_map(|prop| {
            node.computed_styles
                .iter()
                .find(|(name, _)| name == prop)
                .filter(|(_, value)| !value.is_empty() && !skip.contains(&value.as_str()))
                .map(|(name, value)| format!("{name}: {value}"))
        })
        .collect();
    parts.join("; ")
}

/// Element text trimmed and capped for the context line.
fn context_text(page: &dyn HostPage, node: &ComponentNode) -> String {
    let text = page.text_content(node.element);
    let text = text.trim();
    if text.chars().count() > CONTEXT_LIMIT {
        let truncated: String = text.chars().take(CONTEXT_LIMIT).collect();
        format!("{truncated}...")
    } else {
        text.to_string()
    }
}

fn accessibility_summary(page: &dyn HostPage, node: &ComponentNode) -> String {
    let mut parts = Vec::new();
    if page.attribute(node.element, "tabindex").is_some() {
        parts.push("focusable".to_string());
    }
    if let Some(aria) = page.attribute(node.element, "aria-label") {
        parts.push(format!("aria-label: \"{aria}\""));
    }
    if let Some(role) = page.attribute(node.element, "role") {
        parts.push(format!("role: {role}"));
    }
    parts.join(", ")
}

/// Sibling sample: up to 5 rendered in full, beyond that the first 3
/// plus a parent-relative count.
fn nearby_elements(page: &dyn HostPage, node: &ComponentNode) -> String {
    let Some(parent) = page.parent(node.element) else {
        return String::new();
    };
    let siblings = page.children(parent);
    let nearby: Vec<String> = siblings
        .iter()
        .filter(|id| **id != node.element)
        .map(|id| {
            let tag = page.tag_name(*id);
            let class = page
                .classes(*id)
                .first()
                .map(|c| format!(".{c}"))
                .unwrap_or_default();
            let text: String = page.text_content(*id).trim().chars().take(20).collect();
            if text.is_empty() {
                format!("{tag}{class}")
            } else {
                format!("{tag}{class} \"{text}\"")
            }
        })
        .collect();

    if nearby.len() > 5 {
        let parent_class = page
            .classes(parent)
            .first()
            .cloned()
            .unwrap_or_else(|| "parent".to_string());
        format!(
            "{} ({} total in .{})",
            nearby[..3].join(", "),
            siblings.len(),
            parent_class
        )
    } else {
        nearby.join(", ")
    }
}
