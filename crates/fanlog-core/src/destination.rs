//! The contract every log destination implements

use serde::{Deserialize, Serialize};
use std::any::Any;
use uuid::Uuid;

use crate::types::{Level, LogEvent};

/// Opaque per-instance identity.
///
/// Two destinations built from identical settings still get different ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DestinationId(Uuid);

impl DestinationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DestinationId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for DestinationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Enabled flag plus minimum level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Threshold {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_min_level")]
    pub min_level: Level,
}

fn default_enabled() -> bool {
    true
}

fn default_min_level() -> Level {
    Level::Verbose
}

impl Default for Threshold {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            min_level: default_min_level(),
        }
    }
}

impl Threshold {
    pub fn at(min_level: Level) -> Self {
        Self {
            enabled: true,
            min_level,
        }
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    pub fn allows(&self, level: Level) -> bool {
        self.enabled && level >= self.min_level
    }
}

/// A sink that receives formatted log events.
///
/// `log` never fails: a destination absorbs its own errors and reports them
/// through `tracing` instead.
pub trait Destination: Send + Sync {
    fn id(&self) -> DestinationId;

    fn threshold(&self) -> Threshold;

    /// Whether an event at `level` would be written
    fn accepts(&self, level: Level) -> bool {
        self.threshold().allows(level)
    }

    fn log(&self, event: &LogEvent);

    /// Lets registries hand back the concrete destination type
    fn as_any(&self) -> &dyn Any;
}
