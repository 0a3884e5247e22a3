//! # tc_core - Timecode Representation and Conversion Engine
//!
//! `tc_core` is the computational heart of the timecode toolbox: it parses,
//! normalizes, combines and converts timecodes across seven text formats and
//! eight frame rates, including NTSC drop-frame numbering. All inputs and
//! outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **One canonical value**: every format is a view of a signed naive frame count
//! - **Exact**: integer and rational math only; floats are for display
//! - **Rich Errors**: Structured error types, not just strings
//!
//! ## Quick Start
//!
//! ```rust
//! use tc_core::{add, format, parse, FrameRate, Offset, TimecodeFormat, TimecodeSettings};
//!
//! let settings = TimecodeSettings::new(FrameRate::Fps29_97).with_drop_frame(true);
//!
//! let start = parse(TimecodeFormat::Smpte, "00:00:59;29", &settings).unwrap();
//! let next = add(&start, Offset(1)).unwrap();
//!
//! assert_eq!(format(&next, TimecodeFormat::Smpte), "00:01:00;02");
//! assert_eq!(format(&next, TimecodeFormat::Frame), "1800");
//! ```
//!
//! ## Modules
//!
//! - [`frame_rate`] - The eight supported frame rates
//! - [`timecode`] - Canonical value, formats, parsers and formatters
//! - [`drop_frame`] - Naive/displayed frame count mapping for 29.97 and 59.94
//! - [`calculations`] - Conversion, arithmetic and sample-offset workflows
//! - [`settings`] - Frame rate, drop-frame and strict-mode configuration
//! - [`units`] - Exact ratios and frame offsets
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod drop_frame;
pub mod errors;
pub mod frame_rate;
pub mod settings;
pub mod timecode;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{
    add, apply_frame_offset, frames_to_samples, samples_to_timecode, subtract, timecode_to_samples,
    CalculationItem, CalculationOutput, NegativeResultPolicy, Operand, SampleOffsetAdapter, SampleOffsetResult,
};
pub use drop_frame::DropFrameCorrector;
pub use errors::{ClampedToZeroWarning, TcError, TcResult};
pub use frame_rate::FrameRate;
pub use settings::TimecodeSettings;
pub use timecode::{day_length, format, parse, partial_parse, PartialParse, TimecodeFormat, TimecodeValue};
pub use units::{Offset, Ratio};
