//! Deck configuration
//!
//! Every tunable constant of the deck lives here. All sections default, so an
//! empty file (or no file at all) yields a working deck.
//!
//! ```toml
//! [input]
//! wheel_sensitivity = 1.0
//! touch_multiplier = 3.0
//!
//! [motion.wheel]
//! type = "tween"
//! duration_ms = 100
//! easing = "ease_out"
//!
//! [motion.settle]
//! type = "spring"
//! stiffness = 300.0
//! damping = 30.0
//!
//! [track]
//! length = 200.0
//!
//! [snap]
//! enabled = true
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use reel_animation::{Easing, MotionProfile, SpringConfig};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Config file is not valid TOML for a deck
    #[error("failed to parse deck config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config could not be written back out
    #[error("failed to serialize deck config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A value is out of its allowed range
    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Top-level deck configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckConfig {
    pub input: InputConfig,
    pub motion: MotionConfig,
    pub track: TrackConfig,
    pub snap: SnapConfig,
    pub overview: OverviewConfig,
}

/// Raw input scaling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Pixels of offset per pixel of wheel delta
    pub wheel_sensitivity: f32,
    /// Pixels of offset per pixel of finger travel
    pub touch_multiplier: f32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            wheel_sensitivity: 1.0,
            touch_multiplier: 3.0,
        }
    }
}

/// Motion profile per kind of offset change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Each wheel tick
    pub wheel: MotionProfile,
    /// Each touch move
    pub touch: MotionProfile,
    /// Pointer-down or click on the track
    pub track_jump: MotionProfile,
    /// Snap to a section boundary after a drag is released
    pub settle: MotionProfile,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            wheel: MotionProfile::ease_out(100),
            touch: MotionProfile::ease_out(100),
            track_jump: MotionProfile::ease_out(500),
            settle: MotionProfile::spring(SpringConfig::snappy()),
        }
    }
}

/// Progress rail geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackConfig {
    /// Fixed rail length in pixels; when unset the rail spans
    /// `viewport_fraction` of the viewport height
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<f32>,
    pub viewport_fraction: f32,
    /// Width of the pointer-sensitive strip along the right edge
    pub hit_width: f32,
    /// Distance of the visible rail from the right edge
    pub rail_inset: f32,
    pub rail_width: f32,
    /// Edge length of the draggable thumb
    pub thumb_size: f32,
}

impl Default for TrackConfig {
    fn default() -> Self {
        Self {
            length: None,
            viewport_fraction: 0.8,
            hit_width: 48.0,
            rail_inset: 20.0,
            rail_width: 3.0,
            thumb_size: 14.0,
        }
    }
}

/// Snap-to-section after drags
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapConfig {
    /// Snap on touch end and on thumb release
    pub enabled: bool,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Zoomed-out preview while the rail is being used with a mouse
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverviewConfig {
    pub enabled: bool,
    /// Content scale while zoomed out
    pub scale: f32,
    /// Scale transition in and out
    pub transition: MotionProfile,
    /// Hold time after a rail drag ends
    pub release_after_drag_ms: u32,
    /// Hold time after a rail click, long enough to show the jump target
    pub release_after_click_ms: u32,
}

impl Default for OverviewConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            scale: 0.3,
            transition: MotionProfile::tween(300, Easing::EaseInOut),
            release_after_drag_ms: 300,
            release_after_click_ms: 400,
        }
    }
}

impl DeckConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: DeckConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded deck config");
        Ok(config)
    }

    /// Serialize to a TOML string
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reject values the deck cannot operate with
    pub fn validate(&self) -> Result<()> {
        positive("input.wheel_sensitivity", self.input.wheel_sensitivity)?;
        positive("input.touch_multiplier", self.input.touch_multiplier)?;

        profile("motion.wheel", &self.motion.wheel)?;
        profile("motion.touch", &self.motion.touch)?;
        profile("motion.track_jump", &self.motion.track_jump)?;
        profile("motion.settle", &self.motion.settle)?;

        if let Some(length) = self.track.length {
            positive("track.length", length)?;
        }
        fraction("track.viewport_fraction", self.track.viewport_fraction)?;
        positive("track.hit_width", self.track.hit_width)?;
        positive("track.thumb_size", self.track.thumb_size)?;
        non_negative("track.rail_inset", self.track.rail_inset)?;
        positive("track.rail_width", self.track.rail_width)?;

        fraction("overview.scale", self.overview.scale)?;
        profile("overview.transition", &self.overview.transition)?;
        Ok(())
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

fn positive(field: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("expected a positive number, got {value}")))
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("expected zero or more, got {value}")))
    }
}

fn fraction(field: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("expected a value in (0, 1], got {value}")))
    }
}

fn profile(field: &'static str, profile: &MotionProfile) -> Result<()> {
    match profile {
        MotionProfile::Tween { .. } => Ok(()),
        MotionProfile::Spring(spring) => {
            if !(spring.stiffness.is_finite() && spring.stiffness > 0.0) {
                return Err(invalid(field, "spring stiffness must be positive"));
            }
            if !(spring.damping.is_finite() && spring.damping > 0.0) {
                return Err(invalid(field, "spring damping must be positive"));
            }
            if !(spring.mass.is_finite() && spring.mass > 0.0) {
                return Err(invalid(field, "spring mass must be positive"));
            }
            let decay = spring.decay_rate();
            if decay < SpringConfig::MIN_DECAY_RATE {
                return Err(invalid(
                    field,
                    format!(
                        "spring decays at {decay:.3}/s and would take too long to settle (minimum {}/s)",
                        SpringConfig::MIN_DECAY_RATE
                    ),
                ));
            }
            let rate = spring.rate_bound();
            if rate > SpringConfig::MAX_RATE {
                return Err(invalid(
                    field,
                    format!(
                        "spring moves at up to {rate:.0}/s, faster than {}/s can be simulated",
                        SpringConfig::MAX_RATE
                    ),
                ));
            }
            Ok(())
        }
    }
}
