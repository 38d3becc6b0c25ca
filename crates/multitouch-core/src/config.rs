use crate::gesture_constants::{DEFAULT_MAX_SCROLL, DEFAULT_MIN_SCROLL};
use std::time::Duration;

/// Tracker configuration, fixed for the lifetime of a tracker.
#[derive(Clone, Debug, PartialEq)]
pub struct GestureConfig {
    /// Activation threshold: displacement a scroll must exceed to arm, and
    /// a tap must exceed to be cancelled.
    pub min_scroll: f32,
    /// Touch scroll steps are only emitted while the displacement from the
    /// origin stays below this ceiling.
    pub max_scroll: f32,
    /// Ignore mouse input entirely.
    pub touch_only: bool,
    /// Turn wheel events over bound scroll regions into scroll steps.
    pub wheel_scroll: bool,
    /// Evict records that have not seen an event for this long. `None`
    /// keeps records until their pointer ends or is cancelled.
    ///
    /// A record is refreshed only by start and move events of its own
    /// pointer. Hosts do not report a contact that is held perfectly still,
    /// so a press held longer than this timeout is evicted like an orphaned
    /// pointer and its release is ignored. Pick a timeout well above the
    /// longest press that should still count as a tap.
    pub stale_after: Option<Duration>,
}

impl GestureConfig {
    pub fn new(min_scroll: f32, max_scroll: f32, touch_only: bool) -> Self {
        Self {
            min_scroll,
            max_scroll,
            touch_only,
            ..Self::default()
        }
    }

    pub fn with_touch_only(mut self, touch_only: bool) -> Self {
        self.touch_only = touch_only;
        self
    }

    pub fn with_wheel_scroll(mut self, wheel_scroll: bool) -> Self {
        self.wheel_scroll = wheel_scroll;
        self
    }

    pub fn with_stale_after(mut self, stale_after: Duration) -> Self {
        self.stale_after = Some(stale_after);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.min_scroll.is_finite() || self.min_scroll < 0.0 {
            return Err(ConfigError::InvalidThreshold {
                name: "min_scroll",
                value: self.min_scroll,
            });
        }
        if !self.max_scroll.is_finite() || self.max_scroll < 0.0 {
            return Err(ConfigError::InvalidThreshold {
                name: "max_scroll",
                value: self.max_scroll,
            });
        }
        if self.max_scroll <= self.min_scroll {
            return Err(ConfigError::CeilingBelowThreshold {
                min_scroll: self.min_scroll,
                max_scroll: self.max_scroll,
            });
        }
        if self.stale_after == Some(Duration::ZERO) {
            return Err(ConfigError::ZeroStaleTimeout);
        }
        Ok(())
    }
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            min_scroll: DEFAULT_MIN_SCROLL,
            max_scroll: DEFAULT_MAX_SCROLL,
            touch_only: false,
            wheel_scroll: false,
            stale_after: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    InvalidThreshold { name: &'static str, value: f32 },
    CeilingBelowThreshold { min_scroll: f32, max_scroll: f32 },
    ZeroStaleTimeout,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidThreshold { name, value } => {
                write!(f, "{name} must be a finite, non-negative distance (got {value})")
            }
            ConfigError::CeilingBelowThreshold {
                min_scroll,
                max_scroll,
            } => write!(
                f,
                "max_scroll ({max_scroll}) must be greater than min_scroll ({min_scroll})"
            ),
            ConfigError::ZeroStaleTimeout => f.write_str("stale_after must be non-zero"),
        }
    }
}

impl std::error::Error for ConfigError {}
