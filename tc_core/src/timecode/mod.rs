//! # Timecode Values
//!
//! [`TimecodeValue`] is the single canonical representation behind every
//! textual form: a signed naive frame count plus the frame rate and flags it
//! was read with. Drop-frame labels and sub-second clock fields are always
//! derived from the frame count on output, never stored.
//!
//! [`TimecodeFormat`] is the closed set of seven external representations.
//! Parsing and formatting dispatch on the tag to one dedicated function per
//! format:
//!
//! | Format | Shape           | Sub-second field                  |
//! |--------|-----------------|-----------------------------------|
//! | SMPTE  | `HH:MM:SS:FF`   | frames (`;` when drop-frame)      |
//! | SRT    | `HH:MM:SS,mmm`  | milliseconds, rounded             |
//! | DLP    | `HH:MM:SS:sss`  | thousandths, truncated            |
//! | FFmpeg | `HH:MM:SS.xx`   | hundredths, truncated             |
//! | FCPX   | `N/Ds`          | exact rational seconds            |
//! | Frame  | `N`             | absolute frame count              |
//! | Time   | `S.ssssss`      | decimal seconds                   |
//!
//! ## Example
//!
//! ```rust
//! use tc_core::{FrameRate, TimecodeFormat, TimecodeSettings, TimecodeValue};
//!
//! let settings = TimecodeSettings::new(FrameRate::Fps24);
//! let tc = TimecodeValue::parse(TimecodeFormat::Smpte, "00:00:01:12", &settings).unwrap();
//! assert_eq!(tc.frames(), 36);
//! assert_eq!(tc.format(TimecodeFormat::Srt), "00:00:01,500");
//! assert_eq!(tc.format(TimecodeFormat::Fcpx), "36/24s");
//! ```

mod formatters;
mod parsers;
mod partial;

pub use partial::{partial_parse, PartialParse};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::drop_frame::DropFrameCorrector;
use crate::errors::{TcError, TcResult};
use crate::frame_rate::FrameRate;
use crate::settings::TimecodeSettings;
use crate::units::Ratio;

// ============================================================================
// Formats
// ============================================================================

/// External timecode representations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimecodeFormat {
    /// `HH:MM:SS:FF` or `HH:MM:SS;FF`
    Smpte,
    /// `HH:MM:SS,mmm`
    Srt,
    /// `HH:MM:SS:sss`
    Dlp,
    /// `HH:MM:SS.xx`
    Ffmpeg,
    /// `N/Ds`
    Fcpx,
    /// Absolute frame count
    Frame,
    /// Decimal seconds
    Time,
}

impl TimecodeFormat {
    /// All formats in declaration order.
    pub const ALL: [TimecodeFormat; 7] = [
        TimecodeFormat::Smpte,
        TimecodeFormat::Srt,
        TimecodeFormat::Dlp,
        TimecodeFormat::Ffmpeg,
        TimecodeFormat::Fcpx,
        TimecodeFormat::Frame,
        TimecodeFormat::Time,
    ];

    /// Converter display order: counts first, then clock formats.
    pub const CONVERTER_ORDER: [TimecodeFormat; 7] = [
        TimecodeFormat::Frame,
        TimecodeFormat::Time,
        TimecodeFormat::Smpte,
        TimecodeFormat::Srt,
        TimecodeFormat::Dlp,
        TimecodeFormat::Ffmpeg,
        TimecodeFormat::Fcpx,
    ];

    /// Lowercase identifier, as used in JSON and on the command line
    pub const fn id(self) -> &'static str {
        match self {
            TimecodeFormat::Smpte => "smpte",
            TimecodeFormat::Srt => "srt",
            TimecodeFormat::Dlp => "dlp",
            TimecodeFormat::Ffmpeg => "ffmpeg",
            TimecodeFormat::Fcpx => "fcpx",
            TimecodeFormat::Frame => "frame",
            TimecodeFormat::Time => "time",
        }
    }

    /// Human-readable name
    pub const fn name(self) -> &'static str {
        match self {
            TimecodeFormat::Smpte => "SMPTE",
            TimecodeFormat::Srt => "SRT",
            TimecodeFormat::Dlp => "DLP",
            TimecodeFormat::Ffmpeg => "FFmpeg",
            TimecodeFormat::Fcpx => "FCPX",
            TimecodeFormat::Frame => "Frame",
            TimecodeFormat::Time => "Time",
        }
    }

    /// Placeholder shown in an empty input field
    pub const fn placeholder(self) -> &'static str {
        match self {
            TimecodeFormat::Smpte => "00:00:00:00",
            TimecodeFormat::Srt => "00:00:00,000",
            TimecodeFormat::Dlp => "00:00:00:000",
            TimecodeFormat::Ffmpeg => "00:00:00.00",
            TimecodeFormat::Fcpx => "0/1s",
            TimecodeFormat::Frame => "0",
            TimecodeFormat::Time => "0.0",
        }
    }

    /// Short description of the shape, e.g. `HH:MM:SS,mmm`
    pub const fn shape(self) -> &'static str {
        match self {
            TimecodeFormat::Smpte => "HH:MM:SS:FF",
            TimecodeFormat::Srt => "HH:MM:SS,mmm",
            TimecodeFormat::Dlp => "HH:MM:SS:sss",
            TimecodeFormat::Ffmpeg => "HH:MM:SS.xx",
            TimecodeFormat::Fcpx => "fraction/s",
            TimecodeFormat::Frame => "frames",
            TimecodeFormat::Time => "seconds",
        }
    }
}

impl fmt::Display for TimecodeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TimecodeFormat {
    type Err = TcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        TimecodeFormat::ALL
            .into_iter()
            .find(|f| f.id() == wanted)
            .ok_or_else(|| {
                TcError::invalid_input(
                    "format",
                    s,
                    "expected one of smpte, srt, dlp, ffmpeg, fcpx, frame, time",
                )
            })
    }
}

// ============================================================================
// Day length
// ============================================================================

/// Frames in 24 hours of timecode at `frame_rate`.
///
/// Non-drop values use `24 × 3600 × nominal_fps`. Drop-frame values use the
/// real frame count of the label `24:00:00;00`, so a wrapped drop-frame value
/// never displays an hour of 24 or more.
///
/// Note that the drop-frame length is deliberately not `24 × 3600 × 30`
/// (2 592 000 at 29.97): strict drop-frame values wrap at 2 589 408, so frame
/// 2 591 999 becomes frame 2 591 (`00:01:26;13`).
pub fn day_length(frame_rate: FrameRate, drop_frame: bool) -> i64 {
    match DropFrameCorrector::for_rate(frame_rate) {
        Ok(df) if drop_frame => df.frames_per_ten_minutes() * 6 * 24,
        _ => 24 * 3600 * frame_rate.nominal_fps() as i64,
    }
}

// ============================================================================
// TimecodeValue
// ============================================================================

/// Canonical timecode: naive frame count at a frame rate.
///
/// Deserializing goes through [`TimecodeValue::new`], so a stored value is
/// normalized the same way as a constructed one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawTimecodeValue")]
pub struct TimecodeValue {
    frames: i64,
    frame_rate: FrameRate,
    drop_frame: bool,
    strict: bool,
}

/// Wire form of [`TimecodeValue`] before normalization.
#[derive(Deserialize)]
struct RawTimecodeValue {
    frames: i64,
    frame_rate: FrameRate,
    drop_frame: bool,
    strict: bool,
}

impl From<RawTimecodeValue> for TimecodeValue {
    fn from(raw: RawTimecodeValue) -> Self {
        TimecodeValue::new(raw.frames, raw.frame_rate, raw.drop_frame, raw.strict)
    }
}

impl TimecodeValue {
    /// Build from a naive frame count.
    ///
    /// The drop-frame flag is dropped at rates without a drop-frame form. In
    /// strict mode the count wraps into `[0, day_length)`.
    pub fn new(frames: i64, frame_rate: FrameRate, drop_frame: bool, strict: bool) -> Self {
        let drop_frame = drop_frame && frame_rate.is_drop_frame_eligible();
        let frames = if strict {
            frames.rem_euclid(day_length(frame_rate, drop_frame))
        } else {
            frames
        };
        TimecodeValue {
            frames,
            frame_rate,
            drop_frame,
            strict,
        }
    }

    /// Build from a naive frame count using `settings`.
    pub fn from_frames(frames: i64, settings: &TimecodeSettings) -> Self {
        TimecodeValue::new(frames, settings.frame_rate, settings.drop_frame, settings.strict_mode)
    }

    /// Frame zero
    pub fn zero(settings: &TimecodeSettings) -> Self {
        TimecodeValue::from_frames(0, settings)
    }

    /// Parse `text` in `format`.
    pub fn parse(format: TimecodeFormat, text: &str, settings: &TimecodeSettings) -> TcResult<Self> {
        parse(format, text, settings)
    }

    /// Render in `format`.
    pub fn format(&self, format: TimecodeFormat) -> String {
        self::format(self, format)
    }

    /// Naive (real) frame count, signed
    pub fn frames(&self) -> i64 {
        self.frames
    }

    /// Frame rate
    pub fn frame_rate(&self) -> FrameRate {
        self.frame_rate
    }

    /// Whether SMPTE output uses drop-frame numbering
    pub fn is_drop_frame(&self) -> bool {
        self.drop_frame
    }

    /// Whether the value is held to `[0, 24h)`
    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Whether the frame count is below zero
    pub fn is_negative(&self) -> bool {
        self.frames < 0
    }

    /// Settings this value carries
    pub fn settings(&self) -> TimecodeSettings {
        TimecodeSettings {
            frame_rate: self.frame_rate,
            drop_frame: self.drop_frame,
            strict_mode: self.strict,
        }
    }

    /// Same frame count, with drop-frame display switched on or off.
    pub fn with_drop_frame(self, drop_frame: bool) -> Self {
        TimecodeValue::new(self.frames, self.frame_rate, drop_frame, self.strict)
    }

    /// Same frame count, with strict mode switched on or off.
    pub fn with_strict(self, strict: bool) -> Self {
        TimecodeValue::new(self.frames, self.frame_rate, self.drop_frame, strict)
    }

    /// Exact elapsed seconds, `frames / exact_ratio`.
    pub fn seconds(&self) -> TcResult<Ratio> {
        let rate = self.frame_rate.exact_ratio();
        let num = self
            .frames
            .checked_mul(rate.den())
            .ok_or_else(|| TcError::overflow("frames to seconds"))?;
        Ratio::new(num, rate.num()).ok_or_else(|| TcError::overflow("frames to seconds"))
    }

    /// Elapsed seconds as a float, for display.
    pub fn as_secs_f64(&self) -> f64 {
        self.frames as f64 / self.frame_rate.as_f64()
    }
}

impl fmt::Display for TimecodeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(TimecodeFormat::Smpte))
    }
}

// ============================================================================
// Dispatch
// ============================================================================

/// Parse `text` in `format` with `settings`.
pub fn parse(format: TimecodeFormat, text: &str, settings: &TimecodeSettings) -> TcResult<TimecodeValue> {
    let value = match format {
        TimecodeFormat::Smpte => parsers::smpte(text, settings),
        TimecodeFormat::Srt => parsers::srt(text, settings),
        TimecodeFormat::Dlp => parsers::dlp(text, settings),
        TimecodeFormat::Ffmpeg => parsers::ffmpeg(text, settings),
        TimecodeFormat::Fcpx => parsers::fcpx(text, settings),
        TimecodeFormat::Frame => parsers::frame(text, settings),
        TimecodeFormat::Time => parsers::time(text, settings),
    }?;
    tracing::trace!(format = format.id(), text, frames = value.frames, "parsed timecode");
    Ok(value)
}

/// Render `value` in `format`.
pub fn format(value: &TimecodeValue, format: TimecodeFormat) -> String {
    match format {
        TimecodeFormat::Smpte => formatters::smpte(value),
        TimecodeFormat::Srt => formatters::srt(value),
        TimecodeFormat::Dlp => formatters::dlp(value),
        TimecodeFormat::Ffmpeg => formatters::ffmpeg(value),
        TimecodeFormat::Fcpx => formatters::fcpx(value),
        TimecodeFormat::Frame => formatters::frame(value),
        TimecodeFormat::Time => formatters::time(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn loose(rate: FrameRate) -> TimecodeSettings {
        TimecodeSettings::new(rate).with_strict_mode(false)
    }

    #[test]
    fn test_day_length() {
        assert_eq!(day_length(FrameRate::Fps24, false), 2_073_600);
        assert_eq!(day_length(FrameRate::Fps23_976, false), 2_073_600);
        assert_eq!(day_length(FrameRate::Fps29_97, false), 2_592_000);
        assert_eq!(day_length(FrameRate::Fps29_97, true), 2_589_408);
        assert_eq!(day_length(FrameRate::Fps59_94, true), 5_178_816);
        // Drop-frame request is meaningless at 25 fps
        assert_eq!(day_length(FrameRate::Fps25, true), 2_160_000);
    }

    #[test]
    fn test_strict_construction_wraps() {
        let settings = TimecodeSettings::new(FrameRate::Fps24);
        assert_eq!(TimecodeValue::from_frames(-1, &settings).frames(), 2_073_599);
        assert_eq!(TimecodeValue::from_frames(2_073_600, &settings).frames(), 0);

        let value = TimecodeValue::from_frames(-1, &loose(FrameRate::Fps24));
        assert_eq!(value.frames(), -1);
        assert!(value.is_negative());
    }

    #[test]
    fn test_drop_frame_flag_normalized() {
        let value = TimecodeValue::new(100, FrameRate::Fps25, true, false);
        assert!(!value.is_drop_frame());
        let value = TimecodeValue::new(100, FrameRate::Fps29_97, true, false);
        assert!(value.is_drop_frame());
    }

    #[test]
    fn test_display_is_smpte() {
        let value = TimecodeValue::new(1800, FrameRate::Fps29_97, true, true);
        assert_eq!(value.to_string(), "00:01:00;02");
        let value = value.with_drop_frame(false);
        assert_eq!(value.to_string(), "00:01:00:00");
    }

    #[test]
    fn test_exact_seconds() {
        let value = TimecodeValue::new(30, FrameRate::Fps29_97, false, true);
        assert_eq!(value.seconds().unwrap(), Ratio::new(1001, 1000).unwrap());
        let value = TimecodeValue::new(2400, FrameRate::Fps30, false, true);
        assert_eq!(value.seconds().unwrap(), Ratio::from_int(80));
        assert!((value.as_secs_f64() - 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_all_formats_of_one_value() {
        let settings = TimecodeSettings::new(FrameRate::Fps25);
        let value = TimecodeValue::from_frames(90_061, &settings);
        let rendered: Vec<_> = TimecodeFormat::CONVERTER_ORDER
            .into_iter()
            .map(|f| value.format(f))
            .collect();
        assert_eq!(
            rendered,
            vec![
                "90061",
                "3602.44",
                "01:00:02:11",
                "01:00:02,440",
                "01:00:02:440",
                "01:00:02.44",
                "90061/25s",
            ]
        );
    }

    #[test]
    fn test_format_tag_parsing() {
        assert_eq!("SMPTE".parse::<TimecodeFormat>().unwrap(), TimecodeFormat::Smpte);
        assert_eq!("ffmpeg".parse::<TimecodeFormat>().unwrap(), TimecodeFormat::Ffmpeg);
        assert!("edl".parse::<TimecodeFormat>().is_err());
        for format in TimecodeFormat::ALL {
            assert_eq!(format.id().parse::<TimecodeFormat>().unwrap(), format);
        }
    }

    #[test]
    fn test_format_serialization() {
        let json = serde_json::to_string(&TimecodeFormat::Fcpx).unwrap();
        assert_eq!(json, "\"fcpx\"");
        let value = TimecodeValue::new(-48, FrameRate::Fps24, false, false);
        let json = serde_json::to_string(&value).unwrap();
        let roundtrip: TimecodeValue = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, value);
    }

    #[test]
    fn test_deserialize_normalizes() {
        let value: TimecodeValue =
            serde_json::from_str(r#"{"frames":-5,"frame_rate":"25","drop_frame":true,"strict":true}"#).unwrap();
        assert_eq!(value.frames(), 2_159_995);
        assert!(!value.is_drop_frame());
        assert!(value.is_strict());
        assert_eq!(value.to_string(), "23:59:59:20");

        let value: TimecodeValue =
            serde_json::from_str(r#"{"frames":2591999,"frame_rate":"29.97","drop_frame":true,"strict":true}"#)
                .unwrap();
        assert_eq!(value.frames(), 2_591);
        assert_eq!(value.to_string(), "00:01:26;13");
    }

    #[test]
    fn test_converting_between_formats() {
        let settings = loose(FrameRate::Fps24);
        let value = parse(TimecodeFormat::Ffmpeg, "00:00:02.50", &settings).unwrap();
        assert_eq!(value.frames(), 60);
        assert_eq!(format(&value, TimecodeFormat::Smpte), "00:00:02:12");
        assert_eq!(format(&value, TimecodeFormat::Time), "2.5");
    }
}
