//! # Error Types
//!
//! Structured error types for tc_core. Every failure is a typed, recoverable
//! value: parse and rate errors are surfaced to the caller as-is, never
//! coerced to a default timecode.
//!
//! The one auto-recovered condition, a sample-offset result that would fall
//! before zero, is not an error at all. It is reported as a
//! [`ClampedToZeroWarning`] inside the successful result so batch callers can
//! log it per item and keep going.
//!
//! ## Example
//!
//! ```rust
//! use tc_core::errors::{TcError, TcResult};
//! use tc_core::TimecodeFormat;
//!
//! fn require_digits(text: &str) -> TcResult<()> {
//!     if !text.chars().all(|c| c.is_ascii_digit()) {
//!         return Err(TcError::parse(TimecodeFormat::Frame, text, "expected digits"));
//!     }
//!     Ok(())
//! }
//!
//! assert!(require_digits("12a").is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::frame_rate::FrameRate;
use crate::timecode::TimecodeFormat;

/// Result type alias for tc_core operations
pub type TcResult<T> = Result<T, TcError>;

/// Reason attached to parse failures that name a skipped drop-frame number.
pub const NON_EXISTENT_DROP_FRAME: &str = "non-existent drop-frame value";

/// Structured error type for timecode operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum TcError {
    /// Text does not match the format grammar, a component is out of bounds,
    /// or the value names a dropped frame number
    #[error("Cannot parse '{input}' as {format}: {reason}")]
    Parse {
        format: TimecodeFormat,
        input: String,
        reason: String,
    },

    /// Requested frame rate is not one of the eight supported rates
    #[error("Unsupported frame rate: {requested}")]
    UnsupportedRate { requested: String },

    /// Arithmetic between timecodes at different frame rates
    #[error("Frame rate mismatch: {left} vs {right}")]
    RateMismatch { left: FrameRate, right: FrameRate },

    /// Drop-frame correction requested at a rate that has no drop-frame form
    #[error("Drop-frame is not defined at {frame_rate} fps")]
    DropFrameIneligible { frame_rate: FrameRate },

    /// An input value is invalid (zero sample rate, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Offset result fell before zero and the caller asked to reject it
    #[error("Offset result is negative ({frames} frames)")]
    NegativeResult { frames: i64 },

    /// Frame or sample count does not fit in 64 bits
    #[error("Arithmetic overflow during {operation}")]
    Overflow { operation: String },
}

impl TcError {
    /// Create a Parse error
    pub fn parse(format: TimecodeFormat, input: impl Into<String>, reason: impl Into<String>) -> Self {
        TcError::Parse {
            format,
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Create an UnsupportedRate error
    pub fn unsupported_rate(requested: impl Into<String>) -> Self {
        TcError::UnsupportedRate {
            requested: requested.into(),
        }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        TcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an Overflow error
    pub fn overflow(operation: impl Into<String>) -> Self {
        TcError::Overflow {
            operation: operation.into(),
        }
    }

    /// Check if this error names a dropped drop-frame number
    pub fn is_non_existent_drop_frame(&self) -> bool {
        matches!(self, TcError::Parse { reason, .. } if reason == NON_EXISTENT_DROP_FRAME)
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            TcError::Parse { .. } => "PARSE_ERROR",
            TcError::UnsupportedRate { .. } => "UNSUPPORTED_RATE",
            TcError::RateMismatch { .. } => "RATE_MISMATCH",
            TcError::DropFrameIneligible { .. } => "DROP_FRAME_INELIGIBLE",
            TcError::InvalidInput { .. } => "INVALID_INPUT",
            TcError::NegativeResult { .. } => "NEGATIVE_RESULT",
            TcError::Overflow { .. } => "OVERFLOW",
        }
    }
}

/// Non-fatal report that a result was floored to frame zero.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClampedToZeroWarning {
    /// Frame count the operation would have produced
    pub requested_frames: i64,

    /// Same value as SMPTE text, for logs
    pub requested_timecode: String,
}

impl std::fmt::Display for ClampedToZeroWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "result {} ({} frames) is negative, clamped to 00:00:00:00",
            self.requested_timecode, self.requested_frames
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_error_serialization() {
        let error = TcError::parse(TimecodeFormat::Smpte, "00:61:00:00", "minutes must be below 60");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"Parse\""));
        assert!(json.contains("\"format\":\"smpte\""));
        let roundtrip: TcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(TcError::unsupported_rate("48").error_code(), "UNSUPPORTED_RATE");
        assert_eq!(
            TcError::RateMismatch {
                left: FrameRate::Fps24,
                right: FrameRate::Fps30,
            }
            .error_code(),
            "RATE_MISMATCH"
        );
        assert_eq!(TcError::overflow("add").error_code(), "OVERFLOW");
    }

    #[test]
    fn test_error_display() {
        let error = TcError::RateMismatch {
            left: FrameRate::Fps24,
            right: FrameRate::Fps29_97,
        };
        assert_eq!(error.to_string(), "Frame rate mismatch: 24 vs 29.97");
    }

    #[test]
    fn test_non_existent_drop_frame_detection() {
        let error = TcError::parse(TimecodeFormat::Smpte, "00:01:00;00", NON_EXISTENT_DROP_FRAME);
        assert!(error.is_non_existent_drop_frame());
        assert!(!TcError::unsupported_rate("12").is_non_existent_drop_frame());
    }

    #[test]
    fn test_warning_display() {
        let warning = ClampedToZeroWarning {
            requested_frames: -12,
            requested_timecode: "-00:00:00:12".to_string(),
        };
        assert_eq!(
            warning.to_string(),
            "result -00:00:00:12 (-12 frames) is negative, clamped to 00:00:00:00"
        );
    }
}
