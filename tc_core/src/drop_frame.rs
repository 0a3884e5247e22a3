//! # Drop-Frame Correction
//!
//! NTSC drop-frame timecode keeps the displayed clock aligned with wall time
//! at 29.97 and 59.94 fps by skipping frame *numbers* (never actual frames):
//!
//! - at second 0 of every minute, frame numbers `00`–`01` (29.97) or
//!   `00`–`03` (59.94) do not exist,
//! - except in minutes 00, 10, 20, 30, 40 and 50.
//!
//! Two counts are involved:
//!
//! - the **naive** count: one per real frame, the crate's canonical unit,
//! - the **displayed** count: the position of the label in an unskipped
//!   `nominal_fps` numbering, i.e. `((h·60 + m)·60 + s)·nominal + f`.
//!
//! [`DropFrameCorrector`] maps between the two with pure integer math over
//! ten-minute and one-minute buckets.
//!
//! ## Example
//!
//! ```rust
//! use tc_core::{DropFrameCorrector, FrameRate};
//!
//! let df = DropFrameCorrector::for_rate(FrameRate::Fps29_97).unwrap();
//!
//! // Naive frame 1800 is labelled 00:01:00;02 (displayed count 1802)
//! assert_eq!(df.naive_to_displayed(1800), 1802);
//! assert_eq!(df.displayed_to_naive(1802).unwrap(), 1800);
//!
//! // 00:01:00;00 does not exist
//! assert!(df.displayed_to_naive(1800).is_err());
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{TcError, TcResult, NON_EXISTENT_DROP_FRAME};
use crate::frame_rate::FrameRate;
use crate::timecode::TimecodeFormat;

/// Minutes per drop-frame cycle (every tenth minute keeps all numbers).
const CYCLE_MINUTES: i64 = 10;

/// Bidirectional naive/displayed mapping for one drop-frame rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropFrameCorrector {
    frame_rate: FrameRate,
    nominal_fps: i64,
    dropped_per_minute: i64,
}

impl DropFrameCorrector {
    /// Corrector for `frame_rate`.
    ///
    /// Fails with [`TcError::DropFrameIneligible`] for every rate other than
    /// 29.97 and 59.94.
    pub fn for_rate(frame_rate: FrameRate) -> TcResult<Self> {
        if !frame_rate.is_drop_frame_eligible() {
            return Err(TcError::DropFrameIneligible { frame_rate });
        }
        Ok(DropFrameCorrector {
            frame_rate,
            nominal_fps: frame_rate.nominal_fps() as i64,
            dropped_per_minute: frame_rate.dropped_per_minute() as i64,
        })
    }

    /// Rate this corrector was built for
    pub fn frame_rate(&self) -> FrameRate {
        self.frame_rate
    }

    /// Frame numbers skipped at the top of each non-tenth minute
    pub fn dropped_per_minute(&self) -> i64 {
        self.dropped_per_minute
    }

    /// Displayed frame numbers in one minute with no drops
    pub fn displayed_per_minute(&self) -> i64 {
        self.nominal_fps * 60
    }

    /// Real frames in a minute that drops numbers (1798 / 3596)
    pub fn frames_per_dropping_minute(&self) -> i64 {
        self.displayed_per_minute() - self.dropped_per_minute
    }

    /// Real frames in a ten-minute cycle (17982 / 35964)
    pub fn frames_per_ten_minutes(&self) -> i64 {
        self.displayed_per_minute() * CYCLE_MINUTES - (CYCLE_MINUTES - 1) * self.dropped_per_minute
    }

    /// Count of frame numbers skipped before naive frame `naive`.
    pub fn dropped_before(&self, naive: i64) -> i64 {
        let magnitude = naive.saturating_abs();
        let ten_minute_cycles = magnitude / self.frames_per_ten_minutes();
        let into_cycle = magnitude % self.frames_per_ten_minutes();

        let mut dropped = ten_minute_cycles * (CYCLE_MINUTES - 1) * self.dropped_per_minute;
        if into_cycle > self.dropped_per_minute {
            dropped += self.dropped_per_minute
                * ((into_cycle - self.dropped_per_minute) / self.frames_per_dropping_minute());
        }
        dropped * naive.signum()
    }

    /// Naive (real) frame count to displayed label count.
    pub fn naive_to_displayed(&self, naive: i64) -> i64 {
        naive.saturating_add(self.dropped_before(naive))
    }

    /// Whether a displayed count names a skipped frame number.
    pub fn is_dropped(&self, displayed: i64) -> bool {
        let magnitude = displayed.saturating_abs();
        let minute = magnitude / self.displayed_per_minute();
        let into_minute = magnitude % self.displayed_per_minute();
        minute % CYCLE_MINUTES != 0 && into_minute < self.dropped_per_minute
    }

    /// Displayed label count back to the naive (real) frame count.
    ///
    /// Fails when `displayed` names a skipped frame number.
    pub fn displayed_to_naive(&self, displayed: i64) -> TcResult<i64> {
        if self.is_dropped(displayed) {
            return Err(TcError::parse(
                TimecodeFormat::Smpte,
                displayed.to_string(),
                NON_EXISTENT_DROP_FRAME,
            ));
        }
        let minutes = displayed.saturating_abs() / self.displayed_per_minute();
        let dropped = self.dropped_per_minute * (minutes - minutes / CYCLE_MINUTES);
        Ok(displayed - dropped * displayed.signum())
    }
}
