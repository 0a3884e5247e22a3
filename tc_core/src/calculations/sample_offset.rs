//! # Sample Offsets
//!
//! Converts between audio sample counts (such as a Broadcast Wave
//! `TimeReference`) and timecode, and shifts a sample offset by a whole
//! number of frames.
//!
//! ## Conversions
//!
//! - samples to frames: `floor(samples × num / (sample_rate × den))`
//! - frames to samples: `ceil(frames × sample_rate × den / num)`, the first
//!   sample inside the frame
//!
//! With a sample rate at or above the frame rate, frames to samples to frames
//! is the identity for every frame count.
//!
//! ## Example
//!
//! ```rust
//! use tc_core::{apply_frame_offset, FrameRate, NegativeResultPolicy, Offset, TimecodeSettings};
//!
//! let settings = TimecodeSettings::new(FrameRate::Fps25);
//!
//! // One hour at 48 kHz, moved back by one second
//! let result = apply_frame_offset(172_800_000, 48_000, Offset(-25), &settings, NegativeResultPolicy::Clamp).unwrap();
//! assert_eq!(result.new_time_reference, 172_752_000);
//! assert_eq!(result.shifted.to_string(), "00:59:59:00");
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::arithmetic::add;
use crate::errors::{ClampedToZeroWarning, TcError, TcResult};
use crate::frame_rate::FrameRate;
use crate::settings::TimecodeSettings;
use crate::timecode::{TimecodeFormat, TimecodeValue};
use crate::units::{div_ceil, div_floor, Offset};

/// Sample rate and frame rate pair for sample/frame conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleOffsetAdapter {
    sample_rate: u32,
    frame_rate: FrameRate,
}

impl SampleOffsetAdapter {
    /// Adapter for `sample_rate` Hz at `frame_rate`.
    ///
    /// The sample rate must be at least one sample per frame.
    pub fn new(sample_rate: u32, frame_rate: FrameRate) -> TcResult<Self> {
        let rate = frame_rate.exact_ratio();
        if sample_rate == 0 || (sample_rate as i64) * rate.den() < rate.num() {
            return Err(TcError::invalid_input(
                "sample_rate",
                sample_rate.to_string(),
                format!("must be at least {} Hz at {} fps", rate.to_f64().ceil(), frame_rate),
            ));
        }
        Ok(SampleOffsetAdapter {
            sample_rate,
            frame_rate,
        })
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn frame_rate(&self) -> FrameRate {
        self.frame_rate
    }

    /// Frame containing sample `samples`
    pub fn samples_to_frames(&self, samples: i64) -> i64 {
        let rate = self.frame_rate.exact_ratio();
        let frames = div_floor(
            samples as i128 * rate.num() as i128,
            self.sample_rate as i128 * rate.den() as i128,
        );
        // |frames| <= |samples| because sample_rate >= frame rate
        frames as i64
    }

    /// First sample of frame `frames`
    pub fn frames_to_samples(&self, frames: i64) -> TcResult<i64> {
        let rate = self.frame_rate.exact_ratio();
        let samples = div_ceil(
            frames as i128 * self.sample_rate as i128 * rate.den() as i128,
            rate.num() as i128,
        );
        i64::try_from(samples).map_err(|_| TcError::overflow("frames to samples"))
    }
}

/// Timecode of the frame containing sample `samples`.
pub fn samples_to_timecode(samples: i64, sample_rate: u32, settings: &TimecodeSettings) -> TcResult<TimecodeValue> {
    let adapter = SampleOffsetAdapter::new(sample_rate, settings.frame_rate)?;
    Ok(TimecodeValue::from_frames(adapter.samples_to_frames(samples), settings))
}

/// First sample of the frame `tc` names.
pub fn timecode_to_samples(tc: &TimecodeValue, sample_rate: u32) -> TcResult<i64> {
    SampleOffsetAdapter::new(sample_rate, tc.frame_rate())?.frames_to_samples(tc.frames())
}

/// First sample of frame `frames` at `frame_rate`.
pub fn frames_to_samples(frames: i64, sample_rate: u32, frame_rate: FrameRate) -> TcResult<i64> {
    SampleOffsetAdapter::new(sample_rate, frame_rate)?.frames_to_samples(frames)
}

/// What to do when an offset moves a sample position before zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NegativeResultPolicy {
    /// Use frame zero and report a [`ClampedToZeroWarning`]
    #[default]
    Clamp,
    /// Fail with [`TcError::NegativeResult`]
    Reject,
}

/// One shifted sample offset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleOffsetResult {
    /// Frame the original sample offset falls in
    pub original: TimecodeValue,

    /// Frame after the offset
    pub shifted: TimecodeValue,

    /// First sample of `shifted`
    pub new_time_reference: u64,

    /// Samples between the start of `original` and the input offset
    pub discarded_subframe_samples: u64,

    /// Set when the result was clamped to zero
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<ClampedToZeroWarning>,
}

/// Move a sample offset by `offset` frames.
///
/// The input snaps to the start of its frame, the frame is shifted, and the
/// first sample of the shifted frame is returned. Negative results follow
/// `policy`; in strict mode the shifted frame also wraps into one day.
pub fn apply_frame_offset(
    time_reference: u64,
    sample_rate: u32,
    offset: Offset,
    settings: &TimecodeSettings,
    policy: NegativeResultPolicy,
) -> TcResult<SampleOffsetResult> {
    let adapter = SampleOffsetAdapter::new(sample_rate, settings.frame_rate)?;
    let samples = i64::try_from(time_reference).map_err(|_| {
        TcError::invalid_input("time_reference", time_reference.to_string(), "exceeds the 64-bit sample range")
    })?;

    let frames = adapter.samples_to_frames(samples);
    let frame_start = adapter.frames_to_samples(frames)?;
    let raw = TimecodeValue::new(frames, settings.frame_rate, settings.drop_frame, false);
    let requested = add(&raw, offset)?;

    let mut warning = None;
    let shifted_frames = if requested.is_negative() {
        match policy {
            NegativeResultPolicy::Reject => {
                return Err(TcError::NegativeResult {
                    frames: requested.frames(),
                })
            }
            NegativeResultPolicy::Clamp => {
                warning = Some(ClampedToZeroWarning {
                    requested_frames: requested.frames(),
                    requested_timecode: requested.format(TimecodeFormat::Smpte),
                });
                0
            }
        }
    } else {
        requested.frames()
    };

    let shifted = TimecodeValue::from_frames(shifted_frames, settings);
    let new_time_reference = adapter.frames_to_samples(shifted.frames())?;
    let new_time_reference =
        u64::try_from(new_time_reference).map_err(|_| TcError::overflow("shifted time reference"))?;

    tracing::debug!(
        time_reference,
        new_time_reference,
        offset = offset.frames(),
        clamped = warning.is_some(),
        "applied frame offset"
    );

    Ok(SampleOffsetResult {
        original: raw.with_strict(settings.strict_mode),
        shifted,
        new_time_reference,
        discarded_subframe_samples: (samples - frame_start) as u64,
        warning,
    })
}

// ============================================================================
// Calculation request/response
// ============================================================================

/// Input for shifting a list of sample offsets by the same frame offset.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Sync fix reel 2",
///   "settings": { "frame_rate": "23.976" },
///   "sample_rate": 48000,
///   "time_references": [172800000, 345600000],
///   "offset_frames": -12,
///   "policy": "clamp"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleOffsetInput {
    /// User label for this batch
    #[serde(default)]
    pub label: String,

    #[serde(default)]
    pub settings: TimecodeSettings,

    /// Sample rate in Hz
    pub sample_rate: u32,

    /// Raw sample offsets to shift
    pub time_references: Vec<u64>,

    /// Signed frame offset applied to each
    pub offset_frames: i64,

    #[serde(default)]
    pub policy: NegativeResultPolicy,
}

/// Outcome for one sample offset of a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleOffsetItem {
    pub time_reference: u64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<SampleOffsetResult>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<TcError>,
}

/// Per-item outcomes of a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleOffsetBatchResult {
    pub label: String,
    pub items: Vec<SampleOffsetItem>,
}

impl SampleOffsetBatchResult {
    /// Items that failed
    pub fn failures(&self) -> usize {
        self.items.iter().filter(|item| item.error.is_some()).count()
    }

    /// Items that were clamped to zero
    pub fn clamped(&self) -> usize {
        self.items
            .iter()
            .filter(|item| item.result.as_ref().is_some_and(|r| r.warning.is_some()))
            .count()
    }
}

/// Shift every sample offset in the batch, continuing past failed items.
///
/// Only a configuration error shared by the whole batch (a sample rate
/// below the frame rate) fails the call itself.
pub fn calculate(input: &SampleOffsetInput) -> TcResult<SampleOffsetBatchResult> {
    SampleOffsetAdapter::new(input.sample_rate, input.settings.frame_rate)?;

    let offset = Offset(input.offset_frames);
    let items = input
        .time_references
        .iter()
        .map(|&time_reference| {
            match apply_frame_offset(time_reference, input.sample_rate, offset, &input.settings, input.policy) {
                Ok(result) => SampleOffsetItem {
                    time_reference,
                    result: Some(result),
                    error: None,
                },
                Err(error) => SampleOffsetItem {
                    time_reference,
                    result: None,
                    error: Some(error),
                },
            }
        })
        .collect();

    Ok(SampleOffsetBatchResult {
        label: input.label.clone(),
        items,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_sample_rate_validation() {
        assert!(SampleOffsetAdapter::new(0, FrameRate::Fps24).is_err());
        assert!(SampleOffsetAdapter::new(59, FrameRate::Fps59_94).is_err());
        assert!(SampleOffsetAdapter::new(60, FrameRate::Fps59_94).is_ok());
        assert_eq!(
            samples_to_timecode(100, 0, &TimecodeSettings::default()).unwrap_err().error_code(),
            "INVALID_INPUT"
        );
    }

    #[test]
    fn test_samples_to_timecode() {
        let settings = TimecodeSettings::new(FrameRate::Fps25);
        let tc = samples_to_timecode(172_800_000, 48_000, &settings).unwrap();
        assert_eq!(tc.to_string(), "01:00:00:00");

        // 1919 samples is still frame 0 at 25 fps / 48 kHz
        assert_eq!(samples_to_timecode(1919, 48_000, &settings).unwrap().frames(), 0);
        assert_eq!(samples_to_timecode(1920, 48_000, &settings).unwrap().frames(), 1);
    }

    #[test]
    fn test_ntsc_frames_start_mid_sample() {
        let adapter = SampleOffsetAdapter::new(48_000, FrameRate::Fps29_97).unwrap();
        // Frame 1 starts at 1601.6 samples
        assert_eq!(adapter.frames_to_samples(1).unwrap(), 1602);
        assert_eq!(adapter.samples_to_frames(1601), 0);
        assert_eq!(adapter.samples_to_frames(1602), 1);
        assert_eq!(adapter.frames_to_samples(30).unwrap(), 48_048);
    }

    #[test]
    fn test_frames_samples_roundtrip() {
        for rate in FrameRate::ALL {
            for sample_rate in [44_100, 48_000, 96_000] {
                let adapter = SampleOffsetAdapter::new(sample_rate, rate).unwrap();
                for frames in (-100..5_000).chain([1_000_000, 86_400 * 60]) {
                    let samples = adapter.frames_to_samples(frames).unwrap();
                    assert_eq!(adapter.samples_to_frames(samples), frames, "{} fps @ {} Hz", rate, sample_rate);
                }
            }
        }
    }

    #[test]
    fn test_timecode_to_samples() {
        let settings = TimecodeSettings::new(FrameRate::Fps24);
        let tc = TimecodeValue::parse(TimecodeFormat::Smpte, "00:00:01:00", &settings).unwrap();
        assert_eq!(timecode_to_samples(&tc, 48_000).unwrap(), 48_000);
        assert_eq!(frames_to_samples(12, 48_000, FrameRate::Fps24).unwrap(), 24_000);
    }

    #[test]
    fn test_apply_frame_offset_discards_subframe_samples() {
        let settings = TimecodeSettings::new(FrameRate::Fps25);
        let result = apply_frame_offset(1_000, 48_000, Offset(2), &settings, NegativeResultPolicy::Clamp).unwrap();
        assert_eq!(result.original.frames(), 0);
        assert_eq!(result.shifted.frames(), 2);
        assert_eq!(result.new_time_reference, 3_840);
        assert_eq!(result.discarded_subframe_samples, 1_000);
        assert_eq!(result.warning, None);
    }

    #[test]
    fn test_negative_result_clamps_with_warning() {
        let settings = TimecodeSettings::new(FrameRate::Fps25);
        let result = apply_frame_offset(1_920, 48_000, Offset(-13), &settings, NegativeResultPolicy::Clamp).unwrap();
        assert_eq!(result.new_time_reference, 0);
        assert_eq!(result.shifted.frames(), 0);
        assert_eq!(
            result.warning,
            Some(ClampedToZeroWarning {
                requested_frames: -12,
                requested_timecode: "-00:00:00:12".to_string(),
            })
        );
    }

    #[test]
    fn test_negative_result_rejected() {
        let settings = TimecodeSettings::new(FrameRate::Fps25);
        let err = apply_frame_offset(0, 48_000, Offset(-1), &settings, NegativeResultPolicy::Reject).unwrap_err();
        assert_eq!(err, TcError::NegativeResult { frames: -1 });
    }

    #[test]
    fn test_strict_mode_wraps_past_one_day() {
        let strict = TimecodeSettings::new(FrameRate::Fps25);
        let last_frame = frames_to_samples(2_159_999, 48_000, FrameRate::Fps25).unwrap() as u64;
        let result = apply_frame_offset(last_frame, 48_000, Offset(1), &strict, NegativeResultPolicy::Clamp).unwrap();
        assert_eq!(result.shifted.frames(), 0);
        assert_eq!(result.new_time_reference, 0);

        let loose = strict.with_strict_mode(false);
        let result = apply_frame_offset(last_frame, 48_000, Offset(1), &loose, NegativeResultPolicy::Clamp).unwrap();
        assert_eq!(result.shifted.to_string(), "24:00:00:00");
        assert_eq!(result.new_time_reference, 4_147_200_000);
    }

    #[test]
    fn test_batch_continues_past_failures() {
        let input = SampleOffsetInput {
            label: "reel 1".to_string(),
            settings: TimecodeSettings::new(FrameRate::Fps24),
            sample_rate: 48_000,
            time_references: vec![48_000, 0, u64::MAX],
            offset_frames: -12,
            policy: NegativeResultPolicy::Clamp,
        };
        let batch = calculate(&input).unwrap();
        assert_eq!(batch.items.len(), 3);
        assert_eq!(batch.items[0].result.as_ref().map(|r| r.new_time_reference), Some(24_000));
        assert!(batch.items[1].result.as_ref().is_some_and(|r| r.warning.is_some()));
        assert!(batch.items[2].error.is_some());
        assert_eq!(batch.failures(), 1);
        assert_eq!(batch.clamped(), 1);
    }

    #[test]
    fn test_batch_rejects_bad_sample_rate() {
        let input: SampleOffsetInput = serde_json::from_str(
            r#"{ "sample_rate": 0, "time_references": [1], "offset_frames": 1 }"#,
        )
        .unwrap();
        assert_eq!(input.policy, NegativeResultPolicy::Clamp);
        assert!(calculate(&input).is_err());
    }
}
