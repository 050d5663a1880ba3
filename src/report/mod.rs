//! Report generation module
//!
//! Markdown rendering of annotation sessions at four additive verbosity
//! tiers.

pub mod generator;
pub mod label;

pub use generator::{Environment, ReportGenerator};
pub use label::element_label;
