//! Engine settings

use crate::session::marker::MarkerColor;
use serde::{Deserialize, Serialize};

/// Report verbosity tier. Each tier is a strict superset of the one
/// below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputDetail {
    Compact,
    Standard,
    Detailed,
    Forensic,
}

impl OutputDetail {
    pub fn name(&self) -> &'static str {
        match self {
            OutputDetail::Compact => "compact",
            OutputDetail::Standard => "standard",
            OutputDetail::Detailed => "detailed",
            OutputDetail::Forensic => "forensic",
        }
    }
}

impl std::fmt::Display for OutputDetail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for OutputDetail {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "compact" => Ok(OutputDetail::Compact),
            "standard" => Ok(OutputDetail::Standard),
            "detailed" => Ok(OutputDetail::Detailed),
            "forensic" => Ok(OutputDetail::Forensic),
            other => Err(format!("unknown output detail: {other}")),
        }
    }
}

/// User-tunable behavior knobs, applied live to the running engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub output_detail: OutputDetail,
    pub marker_color: MarkerColor,
    /// Reset the session after a successful report copy.
    pub clear_on_copy: bool,
    /// Suppress the page's own click handlers while recording.
    pub block_page_interactions: bool,
    pub show_framework_components: bool,
    pub is_dark_mode: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output_detail: OutputDetail::Forensic,
            marker_color: MarkerColor::Blue,
            clear_on_copy: false,
            block_page_interactions: false,
            show_framework_components: true,
            is_dark_mode: false,
        }
    }
}
