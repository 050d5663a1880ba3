//! Recursive value sanitizer
//!
//! Converts arbitrary runtime values into serialization-safe, size-bounded
//! representations. The sanitizer is total: it never fails, and a property
//! whose getter failed on the host side becomes a localized sentinel
//! instead of aborting the surrounding serialization.
//!
//! One recursive rule set, parameterised by maximum expansion depth,
//! serves both call sites: the component inspector listing uses
//! [`Sanitizer::shallow`] (depth 1) and everything else the default
//! (depth 3).

use crate::host::value::{Property, Value};
use regex::Regex;
use std::sync::OnceLock;

/// Strings longer than this collapse to a truncated descriptor.
pub const MAX_STRING_LENGTH: usize = 1024;

/// Characters of a long string kept in its truncated descriptor.
pub const STRING_SAMPLE_LENGTH: usize = 100;

/// Arrays longer than this collapse to a truncated-array object.
pub const MAX_ARRAY_LENGTH: usize = 20;

/// Elements sampled from a truncated array.
pub const ARRAY_SAMPLE_LENGTH: usize = 5;

/// Default maximum expansion depth.
pub const DEFAULT_MAX_DEPTH: usize = 3;

/// Key prefixes marking framework-internal state, skipped during object
/// expansion and public-state extraction.
pub const INTERNAL_PREFIXES: &[&str] = &["_", "ng", "\u{0275}"];

fn signature_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\(([^)]*)\)").expect("valid signature regex"))
}

/// Check whether a key carries an internal/private prefix.
pub fn is_internal_key(key: &str) -> bool {
    INTERNAL_PREFIXES.iter().any(|p| key.starts_with(p))
}

/// Depth-bounded recursive sanitizer.
#[derive(Debug, Clone)]
pub struct Sanitizer {
    max_depth: usize,
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

impl Sanitizer {
    /// Sanitizer with a custom maximum expansion depth.
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Shallow sanitizer for the inspectable property listing: one level
    /// of nested-object expansion.
    pub fn shallow() -> Self {
        Self::new(1)
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Sanitize a single value. Idempotent on its own output.
    pub fn sanitize(&self, value: &Value) -> Value {
        self.sanitize_at(value, 0)
    }

    /// Sanitize a name → value record, skipping internal-prefixed keys.
    pub fn sanitize_record(&self, record: &[(String, Value)]) -> Vec<(String, Value)> {
        record
            .iter()
            .filter(|(key, _)| !is_internal_key(key))
            .map(|(key, value)| (key.clone(), self.sanitize(value)))
            .collect()
    }

    fn sanitize_at(&self, value: &Value, depth: usize) -> Value {
        // Containers stop expanding at the depth boundary; leaves are
        // always representable and pass through at any depth.
        if depth >= self.max_depth && matches!(value, Value::Array(_) | Value::Object { .. }) {
            return Value::str("[MaxDepthReached]");
        }

        match value {
            Value::Null => Value::Null,
            Value::Undefined => Value::Undefined,
            Value::Bool(b) => Value::Bool(*b),
            Value::Number(n) => Value::Number(*n),
            Value::Str(s) => self.sanitize_string(s),
            Value::Function { name, source } => sanitize_function(name, source),
            Value::Symbol { description } => Value::Str(format!(
                "[Symbol: {}]",
                description.as_deref().unwrap_or("unknown")
            )),
            Value::BigInt(digits) => Value::Str(digits.clone()),
            Value::Array(items) => self.sanitize_array(items, depth),
            Value::Object {
                type_name,
                capabilities,
                entries,
            } => self.sanitize_object(type_name, *capabilities, entries, depth),
            Value::Date(iso) => Value::Str(iso.clone()),
            Value::Pattern(source) => Value::Str(source.clone()),
            Value::Error(message) => Value::Str(format!("[Error: {message}]")),
            Value::Element { tag } => Value::Str(format!("[HTMLElement: <{tag}>]")),
            Value::UiEvent { kind } => Value::Str(format!("[Event: {kind}]")),
        }
    }

    fn sanitize_string(&self, s: &str) -> Value {
        if s.starts_with("data:image/") {
            return Value::str("[Base64Image]");
        }
        if s.chars().count() > MAX_STRING_LENGTH {
            let sample: String = s.chars().take(STRING_SAMPLE_LENGTH).collect();
            return Value::Str(format!(
                "[String: {} chars, truncated: \"{}...\"]",
                s.chars().count(),
                sample
            ));
        }
        Value::Str(s.to_string())
    }

    fn sanitize_array(&self, items: &[Value], depth: usize) -> Value {
        if items.is_empty() {
            return Value::Array(Vec::new());
        }
        if items.len() > MAX_ARRAY_LENGTH {
            let sample: Vec<Value> = items
                .iter()
                .take(ARRAY_SAMPLE_LENGTH)
                .map(|item| self.sanitize_at(item, depth + 1))
                .collect();
            return Value::object(
                "Object",
                vec![
                    ("type", Value::str("TruncatedArray")),
                    ("length", Value::Number(items.len() as f64)),
                    ("sample", Value::Array(sample)),
                ],
            );
        }
        Value::Array(
            items
                .iter()
                .map(|item| self.sanitize_at(item, depth + 1))
                .collect(),
        )
    }

    fn sanitize_object(
        &self,
        type_name: &str,
        capabilities: crate::host::value::ObjectCapabilities,
        entries: &[(String, Property)],
        depth: usize,
    ) -> Value {
        // Capability probes take precedence over structural expansion.
        if capabilities.is_stream_sink() {
            return Value::str("[Subject]");
        }
        if capabilities.is_stream() {
            return Value::str("[Observable]");
        }
        if capabilities.is_pending() {
            return Value::str("[Promise]");
        }

        let mut sanitized = Vec::new();
        for (key, property) in entries {
            if is_internal_key(key) {
                continue;
            }
            let value = match property {
                Property::Value(value) => self.sanitize_at(value, depth + 1),
                Property::AccessFailed => Value::str("[AccessDenied]"),
            };
            sanitized.push((key.clone(), Property::Value(value)));
        }

        if sanitized.is_empty() {
            return Value::Str(format!("[Object: {type_name}]"));
        }

        Value::Object {
            type_name: "Object".to_string(),
            capabilities: Default::default(),
            entries: sanitized,
        }
    }
}

fn sanitize_function(name: &str, source: &str) -> Value {
    let name = if name.is_empty() { "anonymous" } else { name };
    let args = signature_regex()
        .captures(source)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default();
    Value::Str(format!("[Function: {name}({args})]"))
}
