//! # Timecode Arithmetic
//!
//! Addition and subtraction on the canonical frame count. The right-hand
//! operand is either another [`TimecodeValue`] or a bare frame [`Offset`].
//!
//! ## Rules
//!
//! - Two timecodes must share a frame rate, otherwise [`TcError::RateMismatch`]
//! - The sum or difference is exact; leaving the i64 range is [`TcError::Overflow`]
//! - If either timecode is strict, the result wraps into one day
//! - Drop-frame display follows the left operand
//!
//! ## Example
//!
//! ```rust
//! use tc_core::{add, FrameRate, Offset, TimecodeFormat, TimecodeSettings, TimecodeValue};
//!
//! let settings = TimecodeSettings::new(FrameRate::Fps24);
//! let start = TimecodeValue::parse(TimecodeFormat::Smpte, "01:00:00:00", &settings).unwrap();
//!
//! let earlier = add(&start, Offset(-934)).unwrap();
//! assert_eq!(earlier.to_string(), "00:59:21:02");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{TcError, TcResult};
use crate::settings::TimecodeSettings;
use crate::timecode::{TimecodeFormat, TimecodeValue};
use crate::units::Offset;

/// Right-hand side of an addition or subtraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    /// Another timecode at the same frame rate
    Timecode(TimecodeValue),
    /// Signed frame delta
    Offset(Offset),
}

impl From<TimecodeValue> for Operand {
    fn from(value: TimecodeValue) -> Self {
        Operand::Timecode(value)
    }
}

impl From<&TimecodeValue> for Operand {
    fn from(value: &TimecodeValue) -> Self {
        Operand::Timecode(*value)
    }
}

impl From<Offset> for Operand {
    fn from(offset: Offset) -> Self {
        Operand::Offset(offset)
    }
}

impl From<i64> for Operand {
    fn from(frames: i64) -> Self {
        Operand::Offset(Offset(frames))
    }
}

/// Addition or subtraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Add,
    Subtract,
}

impl Operation {
    /// `+` or `-`
    pub fn symbol(self) -> char {
        match self {
            Operation::Add => '+',
            Operation::Subtract => '-',
        }
    }

    /// Parse `+`, `-`, `add` or `subtract`.
    pub fn from_symbol(text: &str) -> TcResult<Self> {
        match text.trim().to_ascii_lowercase().as_str() {
            "+" | "add" | "plus" => Ok(Operation::Add),
            "-" | "subtract" | "minus" => Ok(Operation::Subtract),
            _ => Err(TcError::invalid_input("operation", text, "expected '+' or '-'")),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// `a + b`
pub fn add(a: &TimecodeValue, b: impl Into<Operand>) -> TcResult<TimecodeValue> {
    combine(a, b.into(), Operation::Add)
}

/// `a - b`
pub fn subtract(a: &TimecodeValue, b: impl Into<Operand>) -> TcResult<TimecodeValue> {
    combine(a, b.into(), Operation::Subtract)
}

fn combine(a: &TimecodeValue, b: Operand, operation: Operation) -> TcResult<TimecodeValue> {
    let (delta, strict) = match b {
        Operand::Timecode(other) => {
            if other.frame_rate() != a.frame_rate() {
                return Err(TcError::RateMismatch {
                    left: a.frame_rate(),
                    right: other.frame_rate(),
                });
            }
            (other.frames(), a.is_strict() || other.is_strict())
        }
        Operand::Offset(offset) => (offset.frames(), a.is_strict()),
    };

    let frames = match operation {
        Operation::Add => a.frames().checked_add(delta),
        Operation::Subtract => a.frames().checked_sub(delta),
    }
    .ok_or_else(|| TcError::overflow(format!("{} {} {}", a.frames(), operation, delta)))?;

    Ok(TimecodeValue::new(frames, a.frame_rate(), a.is_drop_frame(), strict))
}

// ============================================================================
// Calculation request/response
// ============================================================================

/// Right-hand operand as supplied by a caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RightOperand {
    /// Text in the calculation's format
    Timecode(String),
    /// Signed frame delta
    Frames(i64),
}

/// Input for a timecode calculation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Pre-roll",
///   "settings": { "frame_rate": "24" },
///   "format": "smpte",
///   "left": "01:00:00:00",
///   "operation": "add",
///   "right": { "frames": -934 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArithmeticInput {
    /// User label for this calculation
    #[serde(default)]
    pub label: String,

    /// Rate and flags both operands are read with
    #[serde(default)]
    pub settings: TimecodeSettings,

    /// Format of the operand text and of the result
    pub format: TimecodeFormat,

    /// Left operand text
    pub left: String,

    pub operation: Operation,

    pub right: RightOperand,
}

/// Result of a timecode calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArithmeticResult {
    pub label: String,
    pub left: TimecodeValue,
    pub right: Option<TimecodeValue>,
    pub result: TimecodeValue,
    /// Result rendered in the input format
    pub display: String,
    /// `A + B = R [FORMAT @ RATEfps]`
    pub summary: String,
}

/// Parse both operands, combine them and render the result.
pub fn calculate(input: &ArithmeticInput) -> TcResult<ArithmeticResult> {
    let left = TimecodeValue::parse(input.format, &input.left, &input.settings)?;

    let (right, operand, right_text) = match &input.right {
        RightOperand::Timecode(text) => {
            let value = TimecodeValue::parse(input.format, text, &input.settings)?;
            (Some(value), Operand::Timecode(value), value.format(input.format))
        }
        RightOperand::Frames(frames) => (None, Operand::Offset(Offset(*frames)), Offset(*frames).to_string()),
    };

    let result = combine(&left, operand, input.operation)?;
    let display = result.format(input.format);
    let summary = format!(
        "{} {} {} = {} [{} @ {}fps]",
        left.format(input.format),
        input.operation,
        right_text,
        display,
        input.format,
        input.settings.frame_rate
    );
    tracing::debug!(label = %input.label, %summary, "calculated");

    Ok(ArithmeticResult {
        label: input.label.clone(),
        left,
        right,
        result,
        display,
        summary,
    })
}
