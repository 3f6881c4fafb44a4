use serde::{Deserialize, Serialize};

use crate::sampler::ReducePolicy;

/// Per-session processing configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionConfig {
    /// How the 2-D reader-box strip collapses to one intensity per column.
    #[serde(default)]
    pub reduce: ReducePolicy,
    /// Encode a PNG preview of the sampled strip on every processed tick.
    #[serde(default = "default_true")]
    pub emit_preview: bool,
}

fn default_true() -> bool {
    true
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            reduce: ReducePolicy::default(),
            emit_preview: true,
        }
    }
}
