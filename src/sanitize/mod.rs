//! Value sanitization module
//!
//! One unified, depth-parameterised recursive sanitizer converts runtime
//! values into serialization-safe, size-bounded output for component
//! nodes and reports.

pub mod sanitizer;

pub use sanitizer::{
    is_internal_key, Sanitizer, ARRAY_SAMPLE_LENGTH, DEFAULT_MAX_DEPTH, INTERNAL_PREFIXES,
    MAX_ARRAY_LENGTH, MAX_STRING_LENGTH, STRING_SAMPLE_LENGTH,
};
