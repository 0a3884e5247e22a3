//! # Frame Rates
//!
//! The eight supported frame rates as a closed enum. Each rate carries an
//! exact rational frames-per-second (`30000/1001` for 29.97, never `29.97_f64`)
//! and the integer base used for SMPTE frame fields.
//!
//! | Rate   | Exact        | Frame field base | Drop-frame |
//! |--------|--------------|------------------|------------|
//! | 23.976 | 24000/1001   | 24               | no         |
//! | 24     | 24/1         | 24               | no         |
//! | 25     | 25/1         | 25               | no         |
//! | 29.97  | 30000/1001   | 30               | yes (2)    |
//! | 30     | 30/1         | 30               | no         |
//! | 50     | 50/1         | 50               | no         |
//! | 59.94  | 60000/1001   | 60               | yes (4)    |
//! | 60     | 60/1         | 60               | no         |
//!
//! ## Example
//!
//! ```rust
//! use tc_core::FrameRate;
//!
//! let rate = FrameRate::from_nominal(29.97).unwrap();
//! assert_eq!(rate.exact_ratio().to_string(), "30000/1001");
//! assert!(rate.is_drop_frame_eligible());
//!
//! let film: FrameRate = "23.98".parse().unwrap();
//! assert_eq!(film, FrameRate::Fps23_976);
//! assert!(FrameRate::from_nominal(48.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::{TcError, TcResult};
use crate::units::Ratio;

/// Tolerance when matching a requested float rate against a nominal label.
const NOMINAL_TOLERANCE: f64 = 0.006;

/// Supported frame rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FrameRate {
    /// 23.976 fps (24000/1001, film on NTSC)
    #[serde(rename = "23.976")]
    Fps23_976,
    /// 24 fps (film)
    #[serde(rename = "24")]
    Fps24,
    /// 25 fps (PAL)
    #[serde(rename = "25")]
    Fps25,
    /// 29.97 fps (30000/1001, NTSC)
    #[serde(rename = "29.97")]
    Fps29_97,
    /// 30 fps
    #[serde(rename = "30")]
    Fps30,
    /// 50 fps
    #[serde(rename = "50")]
    Fps50,
    /// 59.94 fps (60000/1001)
    #[serde(rename = "59.94")]
    Fps59_94,
    /// 60 fps
    #[serde(rename = "60")]
    Fps60,
}

impl FrameRate {
    /// All supported rates, slowest first.
    pub const ALL: [FrameRate; 8] = [
        FrameRate::Fps23_976,
        FrameRate::Fps24,
        FrameRate::Fps25,
        FrameRate::Fps29_97,
        FrameRate::Fps30,
        FrameRate::Fps50,
        FrameRate::Fps59_94,
        FrameRate::Fps60,
    ];

    /// Look up the rate whose nominal label matches `fps`.
    ///
    /// Accepts the common spellings `23.976`/`23.98`, `29.97` and `59.94`.
    pub fn from_nominal(fps: f64) -> TcResult<Self> {
        FrameRate::ALL
            .into_iter()
            .find(|rate| (rate.as_f64() - fps).abs() < NOMINAL_TOLERANCE)
            .ok_or_else(|| TcError::unsupported_rate(fps.to_string()))
    }

    /// Look up the rate with exactly this rational value.
    pub fn from_ratio(num: i64, den: i64) -> TcResult<Self> {
        let requested = Ratio::new(num, den)
            .ok_or_else(|| TcError::unsupported_rate(format!("{}/{}", num, den)))?;
        FrameRate::ALL
            .into_iter()
            .find(|rate| rate.exact_ratio() == requested)
            .ok_or_else(|| TcError::unsupported_rate(requested.to_string()))
    }

    /// Exact frames per second.
    pub const fn exact_ratio(self) -> Ratio {
        match self {
            FrameRate::Fps23_976 => Ratio::new_unchecked(24000, 1001),
            FrameRate::Fps24 => Ratio::new_unchecked(24, 1),
            FrameRate::Fps25 => Ratio::new_unchecked(25, 1),
            FrameRate::Fps29_97 => Ratio::new_unchecked(30000, 1001),
            FrameRate::Fps30 => Ratio::new_unchecked(30, 1),
            FrameRate::Fps50 => Ratio::new_unchecked(50, 1),
            FrameRate::Fps59_94 => Ratio::new_unchecked(60000, 1001),
            FrameRate::Fps60 => Ratio::new_unchecked(60, 1),
        }
    }

    /// Integer frames per displayed second (the SMPTE frame field base).
    pub const fn nominal_fps(self) -> u32 {
        match self {
            FrameRate::Fps23_976 | FrameRate::Fps24 => 24,
            FrameRate::Fps25 => 25,
            FrameRate::Fps29_97 | FrameRate::Fps30 => 30,
            FrameRate::Fps50 => 50,
            FrameRate::Fps59_94 | FrameRate::Fps60 => 60,
        }
    }

    /// True only for 29.97 and 59.94.
    pub const fn is_drop_frame_eligible(self) -> bool {
        matches!(self, FrameRate::Fps29_97 | FrameRate::Fps59_94)
    }

    /// Frame numbers skipped per non-tenth minute in drop-frame display.
    pub const fn dropped_per_minute(self) -> u32 {
        match self {
            FrameRate::Fps29_97 => 2,
            FrameRate::Fps59_94 => 4,
            _ => 0,
        }
    }

    /// Display label, e.g. `"29.97"`.
    pub const fn label(self) -> &'static str {
        match self {
            FrameRate::Fps23_976 => "23.976",
            FrameRate::Fps24 => "24",
            FrameRate::Fps25 => "25",
            FrameRate::Fps29_97 => "29.97",
            FrameRate::Fps30 => "30",
            FrameRate::Fps50 => "50",
            FrameRate::Fps59_94 => "59.94",
            FrameRate::Fps60 => "60",
        }
    }

    /// Floating-point value for display. Never used for frame math.
    pub fn as_f64(self) -> f64 {
        self.exact_ratio().to_f64()
    }
}

impl Default for FrameRate {
    fn default() -> Self {
        FrameRate::Fps25
    }
}

impl fmt::Display for FrameRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FrameRate {
    type Err = TcError;

    /// Parse `"29.97"`, `"23.98"`, `"25"`, `"30000/1001"` or `"24fps"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let trimmed = trimmed.strip_suffix("fps").unwrap_or(trimmed).trim();

        if let Some((num, den)) = trimmed.split_once('/') {
            let num: i64 = num
                .trim()
                .parse()
                .map_err(|_| TcError::unsupported_rate(s))?;
            let den: i64 = den
                .trim()
                .parse()
                .map_err(|_| TcError::unsupported_rate(s))?;
            return FrameRate::from_ratio(num, den);
        }

        if let Some(rate) = FrameRate::ALL.into_iter().find(|r| r.label() == trimmed) {
            return Ok(rate);
        }

        let fps: f64 = trimmed.parse().map_err(|_| TcError::unsupported_rate(s))?;
        FrameRate::from_nominal(fps)
    }
}
