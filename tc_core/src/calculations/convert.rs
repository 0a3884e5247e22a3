//! # Format Conversion
//!
//! Parse a timecode in one format and render it in others.
//!
//! ## Example
//!
//! ```rust
//! use tc_core::calculations::convert::{calculate, ConvertInput};
//! use tc_core::{FrameRate, TimecodeFormat, TimecodeSettings};
//!
//! let input = ConvertInput {
//!     label: "Slate".to_string(),
//!     settings: TimecodeSettings::new(FrameRate::Fps24),
//!     from: TimecodeFormat::Smpte,
//!     text: "00:00:01:12".to_string(),
//!     to: vec![TimecodeFormat::Srt, TimecodeFormat::Frame],
//! };
//!
//! let result = calculate(&input).unwrap();
//! assert_eq!(result.get(TimecodeFormat::Srt), Some("00:00:01,500"));
//! assert_eq!(result.get(TimecodeFormat::Frame), Some("36"));
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::TcResult;
use crate::settings::TimecodeSettings;
use crate::timecode::{TimecodeFormat, TimecodeValue};

/// Input for a format conversion.
///
/// ## JSON Example
///
/// ```json
/// {
///   "settings": { "frame_rate": "29.97", "drop_frame": true },
///   "from": "frame",
///   "text": "1800"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertInput {
    /// User label for this conversion
    #[serde(default)]
    pub label: String,

    #[serde(default)]
    pub settings: TimecodeSettings,

    /// Format of `text`
    pub from: TimecodeFormat,

    pub text: String,

    /// Formats to render; empty means all of them
    #[serde(default)]
    pub to: Vec<TimecodeFormat>,
}

/// One rendered representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedValue {
    pub format: TimecodeFormat,
    pub text: String,
}

/// Result of a format conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertResult {
    pub label: String,
    pub value: TimecodeValue,
    pub outputs: Vec<FormattedValue>,
}

impl ConvertResult {
    /// Rendered text for `format`, if it was requested
    pub fn get(&self, format: TimecodeFormat) -> Option<&str> {
        self.outputs
            .iter()
            .find(|out| out.format == format)
            .map(|out| out.text.as_str())
    }
}

/// Parse `input.text` and render it in every requested format.
pub fn calculate(input: &ConvertInput) -> TcResult<ConvertResult> {
    let value = TimecodeValue::parse(input.from, &input.text, &input.settings)?;

    let targets: &[TimecodeFormat] = if input.to.is_empty() {
        &TimecodeFormat::CONVERTER_ORDER
    } else {
        &input.to
    };

    let outputs = targets
        .iter()
        .map(|&format| FormattedValue {
            format,
            text: value.format(format),
        })
        .collect();

    tracing::debug!(label = %input.label, from = input.from.id(), frames = value.frames(), "converted");

    Ok(ConvertResult {
        label: input.label.clone(),
        value,
        outputs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame_rate::FrameRate;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_all_formats_in_converter_order() {
        let input: ConvertInput = serde_json::from_str(
            r#"{ "settings": { "frame_rate": "29.97", "drop_frame": true }, "from": "frame", "text": "1800" }"#,
        )
        .unwrap();
        let result = calculate(&input).unwrap();
        let formats: Vec<_> = result.outputs.iter().map(|o| o.format).collect();
        assert_eq!(formats, TimecodeFormat::CONVERTER_ORDER.to_vec());
        assert_eq!(result.get(TimecodeFormat::Smpte), Some("00:01:00;02"));
        assert_eq!(result.get(TimecodeFormat::Srt), Some("00:01:00,060"));
        assert_eq!(result.get(TimecodeFormat::Fcpx), Some("1801800/30000s"));
    }

    #[test]
    fn test_parse_error_is_surfaced() {
        let input = ConvertInput {
            label: String::new(),
            settings: TimecodeSettings::new(FrameRate::Fps29_97).with_drop_frame(true),
            from: TimecodeFormat::Smpte,
            text: "00:01:00;00".to_string(),
            to: Vec::new(),
        };
        assert!(calculate(&input).unwrap_err().is_non_existent_drop_frame());
    }
}
