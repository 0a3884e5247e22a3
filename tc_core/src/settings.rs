//! # Timecode Settings
//!
//! The configuration surface every caller hands to the engine:
//! `{frame_rate, drop_frame, strict_mode}`. Settings serialize to plain JSON
//! and every field has a default, so a partial settings file is valid.
//!
//! ```json
//! { "frame_rate": "29.97", "drop_frame": true, "strict_mode": false }
//! ```
//!
//! ## Example
//!
//! ```rust
//! use tc_core::{FrameRate, TimecodeSettings};
//!
//! let settings: TimecodeSettings = serde_json::from_str(r#"{"frame_rate": "24"}"#).unwrap();
//! assert_eq!(settings.frame_rate, FrameRate::Fps24);
//! assert!(settings.strict_mode);
//! assert!(!settings.drop_frame);
//! ```

use serde::{Deserialize, Serialize};

use crate::frame_rate::FrameRate;

/// Frame rate and validation flags for parsing and arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimecodeSettings {
    /// One of the eight supported rates
    pub frame_rate: FrameRate,

    /// Read and write SMPTE with drop-frame numbering.
    ///
    /// Ignored at rates that have no drop-frame form.
    pub drop_frame: bool,

    /// Keep values inside `[0, 24h)`: parsing rejects values outside the
    /// range, arithmetic wraps around it
    pub strict_mode: bool,
}

impl TimecodeSettings {
    /// Settings at `frame_rate` with the default flags.
    pub fn new(frame_rate: FrameRate) -> Self {
        TimecodeSettings {
            frame_rate,
            ..TimecodeSettings::default()
        }
    }

    /// Builder: set drop-frame
    pub fn with_drop_frame(mut self, drop_frame: bool) -> Self {
        self.drop_frame = drop_frame;
        self
    }

    /// Builder: set strict mode
    pub fn with_strict_mode(mut self, strict_mode: bool) -> Self {
        self.strict_mode = strict_mode;
        self
    }

    /// Drop-frame numbering actually in effect (requested and supported).
    pub fn effective_drop_frame(&self) -> bool {
        self.drop_frame && self.frame_rate.is_drop_frame_eligible()
    }
}

impl Default for TimecodeSettings {
    fn default() -> Self {
        TimecodeSettings {
            frame_rate: FrameRate::default(),
            drop_frame: false,
            strict_mode: true,
        }
    }
}
