use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::catalog::{FilterKind, ParamValue};
use crate::consts::{DEFAULT_FRAME_INTERVAL_MS, DEFAULT_MAX_FILTERS};
use crate::io::snapshot::SnapshotConfig;

/// One saved filter: its kind and the parameters the user overrode.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    pub kind: FilterKind,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub params: BTreeMap<String, ParamValue>,
}

impl FilterConfig {
    pub fn new(kind: FilterKind) -> Self {
        Self {
            kind,
            params: BTreeMap::new(),
        }
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Delay between scheduler ticks.
    pub frame_interval_ms: u64,
    /// Restart frame sequences when they reach the end.
    pub loop_frames: bool,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            frame_interval_ms: DEFAULT_FRAME_INTERVAL_MS,
            loop_frames: false,
        }
    }
}

impl PlaybackConfig {
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Upper bound on the number of filters in the chain.
    pub max_filters: usize,
    /// Seed for the grain RNG. Random per run when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub snapshot: SnapshotConfig,
    pub playback: PlaybackConfig,
    pub filters: Vec<FilterConfig>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_filters: DEFAULT_MAX_FILTERS,
            seed: None,
            snapshot: SnapshotConfig::default(),
            playback: PlaybackConfig::default(),
            filters: Vec::new(),
        }
    }
}
