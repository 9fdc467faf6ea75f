//! Duration classification for runtime-based views.
//!
//! Boundaries are fixed and non-overlapping. 120 minutes is Standard and
//! 150 minutes is Long; both upper bounds are inclusive.

use serde::{Deserialize, Serialize};

/// Runtimes strictly below this are Short
pub const SHORT_BELOW_MINUTES: u32 = 90;
/// Inclusive upper bound for Standard
pub const STANDARD_MAX_MINUTES: u32 = 120;
/// Inclusive upper bound for Long
pub const LONG_MAX_MINUTES: u32 = 150;

/// Ordered runtime category
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationClass {
    /// Under 90 minutes
    Short,
    /// 90 to 120 minutes
    Standard,
    /// Over 120, up to 150 minutes
    Long,
    /// Over 150 minutes
    Epic,
}

impl DurationClass {
    pub const ALL: [DurationClass; 4] = [
        DurationClass::Short,
        DurationClass::Standard,
        DurationClass::Long,
        DurationClass::Epic,
    ];

    /// Get label for display
    pub fn label(&self) -> &'static str {
        match self {
            DurationClass::Short => "Short (<90m)",
            DurationClass::Standard => "Standard (90-120m)",
            DurationClass::Long => "Long (120-150m)",
            DurationClass::Epic => "Epic (>150m)",
        }
    }
}

/// Classify a runtime in minutes.
pub fn classify(runtime_minutes: u32) -> DurationClass {
    if runtime_minutes < SHORT_BELOW_MINUTES {
        DurationClass::Short
    } else if runtime_minutes <= STANDARD_MAX_MINUTES {
        DurationClass::Standard
    } else if runtime_minutes <= LONG_MAX_MINUTES {
        DurationClass::Long
    } else {
        DurationClass::Epic
    }
}

/// Classify an optional runtime; unknown runtimes have no class.
pub fn classify_runtime(runtime_minutes: Option<u32>) -> Option<DurationClass> {
    runtime_minutes.map(classify)
}
