//! One formatter per [`TimecodeFormat`](super::TimecodeFormat).
//!
//! Every formatter is a pure function of the naive frame count. Negative
//! values print as `-` followed by the magnitude.

use super::TimecodeValue;
use crate::drop_frame::DropFrameCorrector;
use crate::units::{div_floor, div_round};

const MICROS_PER_SECOND: i128 = 1_000_000;

/// Sign prefix and magnitude of the frame count.
fn sign_and_magnitude(value: &TimecodeValue) -> (&'static str, i128) {
    let sign = if value.frames < 0 { "-" } else { "" };
    (sign, value.frames.unsigned_abs() as i128)
}

/// `frames × den × scale`, the numerator of elapsed time in `1/scale` units.
fn scaled_numerator(frames: i128, value: &TimecodeValue, scale: i128) -> (i128, i128) {
    let rate = value.frame_rate.exact_ratio();
    (frames * rate.den() as i128 * scale, rate.num() as i128)
}

/// `HH:MM:SS{sep}{sub}` from a count of `per_second` sub-units.
fn clock(units: i128, per_second: i128, sub_digits: usize, separator: char) -> String {
    let seconds_total = units / per_second;
    let sub = units % per_second;
    let hours = seconds_total / 3600;
    let minutes = (seconds_total % 3600) / 60;
    let seconds = seconds_total % 60;
    format!(
        "{:02}:{:02}:{:02}{}{:0width$}",
        hours,
        minutes,
        seconds,
        separator,
        sub,
        width = sub_digits
    )
}

pub(super) fn smpte(value: &TimecodeValue) -> String {
    let (sign, magnitude) = sign_and_magnitude(value);
    let nominal = value.frame_rate.nominal_fps() as i128;

    let corrector = if value.drop_frame {
        DropFrameCorrector::for_rate(value.frame_rate).ok()
    } else {
        None
    };

    match corrector {
        Some(df) => {
            // Magnitude fits in i64 except for i64::MIN, which has no label anyway
            let displayed = df.naive_to_displayed(i64::try_from(magnitude).unwrap_or(i64::MAX));
            format!("{}{}", sign, clock(displayed as i128, nominal, 2, ';'))
        }
        None => format!("{}{}", sign, clock(magnitude, nominal, 2, ':')),
    }
}

pub(super) fn srt(value: &TimecodeValue) -> String {
    let (sign, magnitude) = sign_and_magnitude(value);
    let (num, den) = scaled_numerator(magnitude, value, 1000);
    format!("{}{}", sign, clock(div_round(num, den), 1000, 3, ','))
}

pub(super) fn dlp(value: &TimecodeValue) -> String {
    let (sign, magnitude) = sign_and_magnitude(value);
    let (num, den) = scaled_numerator(magnitude, value, 1000);
    format!("{}{}", sign, clock(div_floor(num, den), 1000, 3, ':'))
}

pub(super) fn ffmpeg(value: &TimecodeValue) -> String {
    let (sign, magnitude) = sign_and_magnitude(value);
    let (num, den) = scaled_numerator(magnitude, value, 100);
    format!("{}{}", sign, clock(div_floor(num, den), 100, 2, '.'))
}

pub(super) fn fcpx(value: &TimecodeValue) -> String {
    let (sign, magnitude) = sign_and_magnitude(value);
    let (num, den) = scaled_numerator(magnitude, value, 1);
    format!("{}{}/{}s", sign, num, den)
}

pub(super) fn frame(value: &TimecodeValue) -> String {
    value.frames.to_string()
}

pub(super) fn time(value: &TimecodeValue) -> String {
    let (sign, magnitude) = sign_and_magnitude(value);
    let (num, den) = scaled_numerator(magnitude, value, MICROS_PER_SECOND);
    let micros = div_round(num, den);

    let whole = micros / MICROS_PER_SECOND;
    let fraction = format!("{:06}", micros % MICROS_PER_SECOND);
    let fraction = fraction.trim_end_matches('0');
    let fraction = if fraction.is_empty() { "0" } else { fraction };
    format!("{}{}.{}", sign, whole, fraction)
}
