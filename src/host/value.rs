//! Runtime value model
//!
//! A closed, tagged representation of the arbitrary runtime values the
//! host framework hands back when the resolver inspects component state.
//! Duck-typed kinds from the original environment (reactive streams,
//! stream sinks, pending computations) are modelled as capability flags
//! probed at the serialization boundary, so the sanitizer stays total and
//! dependency-free.

use serde::{Deserialize, Serialize};

/// Capability probes on an object value.
///
/// `subscribe` alone marks a reactive stream; `subscribe` + `emit` marks a
/// stream sink; `then_continue` marks a pending computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ObjectCapabilities {
    pub subscribe: bool,
    pub emit: bool,
    pub then_continue: bool,
}

impl ObjectCapabilities {
    /// Stream sink: can both emit and be subscribed to.
    pub fn is_stream_sink(&self) -> bool {
        self.subscribe && self.emit
    }

    /// Reactive stream: subscribable but not a sink.
    pub fn is_stream(&self) -> bool {
        self.subscribe && !self.emit
    }

    /// Pending computation (promise-like).
    pub fn is_pending(&self) -> bool {
        self.then_continue
    }
}

/// One property slot on an object value.
///
/// A throwing getter in the host environment surfaces as `AccessFailed`
/// instead of propagating; the sanitizer turns it into a sentinel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Property {
    Value(Value),
    AccessFailed,
}

/// A runtime value as observed on the host side of the boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Null,
    Undefined,
    Bool(bool),
    Number(f64),
    Str(String),
    /// Arbitrary-precision integer, carried as its decimal rendering.
    BigInt(String),
    Symbol {
        description: Option<String>,
    },
    /// A function value with its own textual source, used to recover the
    /// argument list for the descriptor tag.
    Function {
        name: String,
        source: String,
    },
    /// A date, carried as its ISO-8601 rendering.
    Date(String),
    /// A pattern/regular-expression literal, carried as source text.
    Pattern(String),
    /// An error value, carried as its message.
    Error(String),
    /// A live UI element reference.
    Element {
        tag: String,
    },
    /// A UI event object.
    UiEvent {
        kind: String,
    },
    Array(Vec<Value>),
    Object {
        type_name: String,
        capabilities: ObjectCapabilities,
        entries: Vec<(String, Property)>,
    },
}

impl Value {
    /// String value convenience constructor.
    pub fn str(s: impl Into<String>) -> Self {
        Value::Str(s.into())
    }

    /// Plain object with the given entries, no capabilities.
    pub fn object(
        type_name: impl Into<String>,
        entries: Vec<(impl Into<String>, Value)>,
    ) -> Self {
        Value::Object {
            type_name: type_name.into(),
            capabilities: ObjectCapabilities::default(),
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), Property::Value(v)))
                .collect(),
        }
    }

    /// Reactive stream stand-in (subscribable object).
    pub fn stream(type_name: impl Into<String>) -> Self {
        Value::Object {
            type_name: type_name.into(),
            capabilities: ObjectCapabilities {
                subscribe: true,
                ..Default::default()
            },
            entries: Vec::new(),
        }
    }

    /// Stream sink stand-in (emit + subscribe).
    pub fn stream_sink(type_name: impl Into<String>) -> Self {
        Value::Object {
            type_name: type_name.into(),
            capabilities: ObjectCapabilities {
                subscribe: true,
                emit: true,
                ..Default::default()
            },
            entries: Vec::new(),
        }
    }

    /// Pending computation stand-in.
    pub fn pending(type_name: impl Into<String>) -> Self {
        Value::Object {
            type_name: type_name.into(),
            capabilities: ObjectCapabilities {
                then_continue: true,
                ..Default::default()
            },
            entries: Vec::new(),
        }
    }

    /// Whether this is a function value.
    pub fn is_function(&self) -> bool {
        matches!(self, Value::Function { .. })
    }

    /// Whether this is the undefined sentinel.
    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }
}
