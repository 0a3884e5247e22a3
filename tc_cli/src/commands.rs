use clap::Subcommand;
use color_eyre::eyre::bail;
use color_eyre::Result;
use serde::Serialize;

use tc_core::calculations::{
    ArithmeticInput, ArithmeticResult, CalculationItem, CalculationOutput, ConvertInput, ConvertResult,
    Operation, RightOperand, SampleOffsetBatchResult, SampleOffsetInput,
};
use tc_core::{partial_parse, NegativeResultPolicy, PartialParse, TimecodeFormat};

use crate::config::Config;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show a timecode in every format
    Convert {
        /// Timecode text
        #[arg(allow_hyphen_values = true)]
        text: String,

        /// Format of TEXT: smpte, srt, dlp, ffmpeg, fcpx, frame, time
        #[arg(long, default_value = "smpte")]
        from: TimecodeFormat,

        /// Only print these formats (repeatable)
        #[arg(long)]
        to: Vec<TimecodeFormat>,
    },

    /// Add or subtract two timecodes, or a timecode and a frame offset
    Calc {
        /// Left operand
        #[arg(allow_hyphen_values = true)]
        a: String,

        /// + or -
        #[arg(allow_hyphen_values = true)]
        op: String,

        /// Right operand
        #[arg(allow_hyphen_values = true)]
        b: String,

        /// Format of both operands and the result
        #[arg(long, default_value = "smpte")]
        format: TimecodeFormat,

        /// Read B as a signed frame count instead of a timecode
        #[arg(long)]
        frames: bool,
    },

    /// Show how partially typed input is read
    Preview {
        /// Format being typed
        format: TimecodeFormat,

        /// Text typed so far
        #[arg(allow_hyphen_values = true, default_value = "")]
        typed: String,
    },

    /// Shift BWF TimeReference sample offsets by a number of frames
    Offset {
        /// Sample offsets to shift
        #[arg(long = "time-reference", required = true, num_args = 1..)]
        time_references: Vec<u64>,

        /// Sample rate in Hz
        #[arg(long, default_value_t = 48_000)]
        sample_rate: u32,

        /// Signed frame offset
        #[arg(long, allow_hyphen_values = true)]
        frames: i64,

        /// Fail items that would land before zero instead of clamping them
        #[arg(long)]
        reject_negative: bool,
    },
}

impl Commands {
    /// Build the calculation this subcommand describes
    fn to_item(&self, config: &Config) -> Result<Option<CalculationItem>> {
        let item = match self {
            Commands::Convert { text, from, to } => CalculationItem::Convert(ConvertInput {
                label: "convert".to_string(),
                settings: config.settings,
                from: *from,
                text: text.clone(),
                to: to.clone(),
            }),
            Commands::Calc { a, op, b, format, frames } => {
                let right = if *frames {
                    RightOperand::Frames(b.trim().parse()?)
                } else {
                    RightOperand::Timecode(b.clone())
                };
                CalculationItem::Arithmetic(ArithmeticInput {
                    label: "calc".to_string(),
                    settings: config.settings,
                    format: *format,
                    left: a.clone(),
                    operation: Operation::from_symbol(op)?,
                    right,
                })
            }
            Commands::Offset {
                time_references,
                sample_rate,
                frames,
                reject_negative,
            } => CalculationItem::SampleOffset(SampleOffsetInput {
                label: "offset".to_string(),
                settings: config.settings,
                sample_rate: *sample_rate,
                time_references: time_references.clone(),
                offset_frames: *frames,
                policy: if *reject_negative {
                    NegativeResultPolicy::Reject
                } else {
                    NegativeResultPolicy::Clamp
                },
            }),
            Commands::Preview { .. } => return Ok(None),
        };
        Ok(Some(item))
    }
}

/// Run one subcommand and print its output
pub fn run(command: &Commands, config: &Config) -> Result<()> {
    if let Commands::Preview { format, typed } = command {
        let preview = partial_parse(*format, typed, &config.settings);
        return emit(config, &preview, render_preview(&preview));
    }

    let Some(item) = command.to_item(config)? else {
        return Ok(());
    };
    tracing::debug!(calc_type = item.calc_type(), settings = ?config.settings, "running");

    match item.calculate()? {
        CalculationOutput::Convert(result) => emit(config, &result, render_convert(&result)),
        CalculationOutput::Arithmetic(result) => emit(config, &result, render_arithmetic(&result)),
        CalculationOutput::SampleOffset(batch) => {
            report_batch(&batch);
            emit(config, &batch, render_offsets(&batch))?;
            if batch.failures() > 0 {
                bail!("{} of {} items failed", batch.failures(), batch.items.len());
            }
            Ok(())
        }
    }
}

fn emit<T: Serialize>(config: &Config, value: &T, text: String) -> Result<()> {
    if config.json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{}", text);
    }
    Ok(())
}

/// One log line per clamped or failed item
fn report_batch(batch: &SampleOffsetBatchResult) {
    for item in &batch.items {
        if let Some(error) = &item.error {
            tracing::error!(time_reference = item.time_reference, code = error.error_code(), "{}", error);
        }
        if let Some(warning) = item.result.as_ref().and_then(|r| r.warning.as_ref()) {
            tracing::warn!(time_reference = item.time_reference, "{}", warning);
        }
    }
}

fn render_convert(result: &ConvertResult) -> String {
    let width = result
        .outputs
        .iter()
        .map(|out| out.format.name().len())
        .max()
        .unwrap_or(0);
    result
        .outputs
        .iter()
        .map(|out| format!("{:<width$}  {}", out.format.name(), out.text, width = width))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_arithmetic(result: &ArithmeticResult) -> String {
    format!("{}\n{}", result.display, result.summary)
}

fn render_preview(preview: &PartialParse) -> String {
    let value = preview
        .value
        .map(|v| format!("{} ({} frames)", v.format(TimecodeFormat::Smpte), v.frames()))
        .unwrap_or_else(|| "-".to_string());
    let state = if preview.complete { "complete" } else { "incomplete" };
    format!("{}\n{} [{}]", preview.display, value, state)
}

fn render_offsets(batch: &SampleOffsetBatchResult) -> String {
    batch
        .items
        .iter()
        .map(|item| match (&item.result, &item.error) {
            (Some(result), _) => format!(
                "{} -> {}  ({} -> {})",
                item.time_reference, result.new_time_reference, result.original, result.shifted
            ),
            (None, Some(error)) => format!("{} -> error: {}", item.time_reference, error),
            (None, None) => format!("{} -> no result", item.time_reference),
        })
        .collect::<Vec<_>>()
        .join("\n")
}
