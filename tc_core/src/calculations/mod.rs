//! # Timecode Calculations
//!
//! JSON-first request/response layer over the timecode engine. Each
//! calculation follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Result` - Calculation results (JSON-serializable)
//! - `calculate(input) -> TcResult<*Result>` - Pure calculation function
//!
//! ## Available Calculations
//!
//! - [`convert`] - Render one timecode in several formats
//! - [`arithmetic`] - Add or subtract timecodes and frame offsets
//! - [`sample_offset`] - Shift audio sample offsets by whole frames

pub mod arithmetic;
pub mod convert;
pub mod sample_offset;

use serde::{Deserialize, Serialize};

use crate::errors::TcResult;

// Re-export commonly used types
pub use arithmetic::{add, subtract, ArithmeticInput, ArithmeticResult, Operand, Operation, RightOperand};
pub use convert::{ConvertInput, ConvertResult, FormattedValue};
pub use sample_offset::{
    apply_frame_offset, frames_to_samples, samples_to_timecode, timecode_to_samples, NegativeResultPolicy,
    SampleOffsetAdapter, SampleOffsetBatchResult, SampleOffsetInput, SampleOffsetItem, SampleOffsetResult,
};

/// Enum wrapper for all calculation types.
///
/// This allows storing heterogeneous calculations in a single collection
/// while maintaining type safety and clean serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationItem {
    /// Format conversion
    Convert(ConvertInput),
    /// Addition or subtraction
    Arithmetic(ArithmeticInput),
    /// Sample offset batch
    SampleOffset(SampleOffsetInput),
}

/// Result of any [`CalculationItem`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationOutput {
    Convert(ConvertResult),
    Arithmetic(ArithmeticResult),
    SampleOffset(SampleOffsetBatchResult),
}

impl CalculationItem {
    /// Get the user-provided label for this calculation
    pub fn label(&self) -> &str {
        match self {
            CalculationItem::Convert(c) => &c.label,
            CalculationItem::Arithmetic(a) => &a.label,
            CalculationItem::SampleOffset(s) => &s.label,
        }
    }

    /// Get the calculation type as a string
    pub fn calc_type(&self) -> &'static str {
        match self {
            CalculationItem::Convert(_) => "Convert",
            CalculationItem::Arithmetic(_) => "Arithmetic",
            CalculationItem::SampleOffset(_) => "SampleOffset",
        }
    }

    /// Run the wrapped calculation
    pub fn calculate(&self) -> TcResult<CalculationOutput> {
        tracing::trace!(calc_type = self.calc_type(), label = self.label(), "running calculation");
        match self {
            CalculationItem::Convert(input) => convert::calculate(input).map(CalculationOutput::Convert),
            CalculationItem::Arithmetic(input) => arithmetic::calculate(input).map(CalculationOutput::Arithmetic),
            CalculationItem::SampleOffset(input) => {
                sample_offset::calculate(input).map(CalculationOutput::SampleOffset)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_tagged_json() {
        let json = r#"{
            "type": "Arithmetic",
            "label": "Pre-roll",
            "settings": { "frame_rate": "24" },
            "format": "smpte",
            "left": "01:00:00:00",
            "operation": "add",
            "right": { "frames": -934 }
        }"#;
        let item: CalculationItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.label(), "Pre-roll");
        assert_eq!(item.calc_type(), "Arithmetic");

        match item.calculate().unwrap() {
            CalculationOutput::Arithmetic(result) => assert_eq!(result.display, "00:59:21:02"),
            other => panic!("unexpected output {:?}", other),
        }
    }

    #[test]
    fn test_roundtrip_item() {
        let item = CalculationItem::SampleOffset(SampleOffsetInput {
            label: "Reel 2".to_string(),
            settings: Default::default(),
            sample_rate: 48_000,
            time_references: vec![0, 1920],
            offset_frames: 5,
            policy: NegativeResultPolicy::Reject,
        });
        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains("\"type\":\"SampleOffset\""));
        let back: CalculationItem = serde_json::from_str(&json).unwrap();
        assert_eq!(back, item);
    }
}
