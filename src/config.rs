use serde::{Deserialize, Serialize};

/// Engine-wide configuration knobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Hours a full-time person works on a standard day.
    pub standard_daily_hours: f64,
    /// Optional rounding step applied to allocated hours (e.g. 0.25).
    /// None leaves values unrounded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantization_step: Option<f64>,
    /// Whether tasks that could not be allocated (no working days,
    /// missing planned start) still count toward summary task counts.
    /// They never contribute hours either way.
    #[serde(default)]
    pub count_unallocatable_tasks: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            standard_daily_hours: 7.5,
            quantization_step: None,
            count_unallocatable_tasks: false,
        }
    }
}
