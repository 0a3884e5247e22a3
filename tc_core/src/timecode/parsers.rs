//! One parser per [`TimecodeFormat`].
//!
//! Clock-shaped formats share [`Clock::read`]; each parser then turns its
//! fields into a naive frame count with the rounding direction that inverts
//! its formatter, and [`finish`] applies the sign and the strict-mode range.

use super::{day_length, TimecodeFormat, TimecodeValue};
use crate::drop_frame::DropFrameCorrector;
use crate::errors::{TcError, TcResult, NON_EXISTENT_DROP_FRAME};
use crate::settings::TimecodeSettings;
use crate::units::{div_ceil, div_round};

/// Longest digit run accepted in one field; keeps every product inside i128.
const MAX_FIELD_DIGITS: usize = 18;

/// Decimal places accepted by the Time parser
const MAX_TIME_DECIMALS: usize = 9;

/// Fields of `HH:MM:SS<sep>XX`.
#[derive(Debug, Clone, Copy)]
struct Clock {
    negative: bool,
    hours: i128,
    minutes: i128,
    seconds: i128,
    sub: i128,
    separator: char,
}

impl Clock {
    /// Split `text` into clock fields.
    ///
    /// `separators` lists the characters allowed before the sub-second field
    /// and `sub_digits` its exact width.
    fn read(
        format: TimecodeFormat,
        text: &str,
        separators: &[char],
        sub_digits: usize,
    ) -> TcResult<Self> {
        let expected = || {
            TcError::parse(format, text, format!("expected {}", format.shape()))
        };

        let (negative, body) = split_sign(text.trim());
        let mut fields = body.split(':');
        let hours = fields.next().ok_or_else(expected)?;
        let minutes = fields.next().ok_or_else(expected)?;
        let rest = fields.collect::<Vec<_>>().join(":");

        let sep_at = rest
            .char_indices()
            .find(|(_, c)| separators.contains(c))
            .map(|(i, _)| i)
            .ok_or_else(expected)?;
        let seconds = &rest[..sep_at];
        let separator = rest[sep_at..].chars().next().ok_or_else(expected)?;
        let sub = &rest[sep_at + separator.len_utf8()..];

        if hours.len() < 2 || minutes.len() != 2 || seconds.len() != 2 || sub.len() != sub_digits {
            return Err(expected());
        }

        let clock = Clock {
            negative,
            hours: digits(format, text, hours)?,
            minutes: digits(format, text, minutes)?,
            seconds: digits(format, text, seconds)?,
            sub: digits(format, text, sub)?,
            separator,
        };

        if clock.minutes >= 60 {
            return Err(TcError::parse(format, text, "minutes must be below 60"));
        }
        if clock.seconds >= 60 {
            return Err(TcError::parse(format, text, "seconds must be below 60"));
        }
        Ok(clock)
    }

    /// Whole seconds on the clock
    fn total_seconds(&self) -> i128 {
        (self.hours * 60 + self.minutes) * 60 + self.seconds
    }
}

fn split_sign(text: &str) -> (bool, &str) {
    match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    }
}

/// Unsigned decimal field.
fn digits(format: TimecodeFormat, text: &str, field: &str) -> TcResult<i128> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TcError::parse(format, text, format!("'{}' is not a number", field)));
    }
    if field.len() > MAX_FIELD_DIGITS {
        return Err(TcError::parse(format, text, "value exceeds the 64-bit frame count"));
    }
    field
        .parse::<i128>()
        .map_err(|e| TcError::parse(format, text, e.to_string()))
}

/// Apply sign, range and strict-mode rules to a naive frame magnitude.
fn finish(
    format: TimecodeFormat,
    text: &str,
    negative: bool,
    magnitude: i128,
    drop_frame: bool,
    settings: &TimecodeSettings,
) -> TcResult<TimecodeValue> {
    let signed = if negative { -magnitude } else { magnitude };
    let frames = i64::try_from(signed)
        .map_err(|_| TcError::parse(format, text, "value exceeds the 64-bit frame count"))?;

    if settings.strict_mode {
        let day = day_length(settings.frame_rate, drop_frame);
        if frames < 0 || frames >= day {
            return Err(TcError::parse(
                format,
                text,
                "value is outside the 24-hour range allowed in strict mode",
            ));
        }
    }

    Ok(TimecodeValue::new(
        frames,
        settings.frame_rate,
        drop_frame,
        settings.strict_mode,
    ))
}

/// `frames = round|ceil(units × num / (per_second × den))`
fn units_to_frames(units: i128, per_second: i128, settings: &TimecodeSettings, ceil: bool) -> i128 {
    let rate = settings.frame_rate.exact_ratio();
    let num = units * rate.num() as i128;
    let den = per_second * rate.den() as i128;
    if ceil {
        div_ceil(num, den)
    } else {
        div_round(num, den)
    }
}

pub(super) fn smpte(text: &str, settings: &TimecodeSettings) -> TcResult<TimecodeValue> {
    let format = TimecodeFormat::Smpte;
    let clock = Clock::read(format, text, &[':', ';'], 2)?;
    let rate = settings.frame_rate;
    let nominal = rate.nominal_fps() as i128;

    if clock.separator == ';' && !rate.is_drop_frame_eligible() {
        return Err(TcError::parse(
            format,
            text,
            format!("';' marks drop-frame, which {} fps does not have", rate),
        ));
    }
    if clock.sub >= nominal {
        return Err(TcError::parse(
            format,
            text,
            format!("frame field must be below {} at {} fps", nominal, rate),
        ));
    }

    let drop_frame = rate.is_drop_frame_eligible() && (clock.separator == ';' || settings.drop_frame);
    let displayed = clock.total_seconds() * nominal + clock.sub;

    let magnitude = if drop_frame {
        let df = DropFrameCorrector::for_rate(rate)?;
        let displayed = i64::try_from(displayed)
            .map_err(|_| TcError::parse(format, text, "value exceeds the 64-bit frame count"))?;
        df.displayed_to_naive(displayed)
            .map_err(|_| TcError::parse(format, text, NON_EXISTENT_DROP_FRAME))? as i128
    } else {
        displayed
    };

    finish(format, text, clock.negative, magnitude, drop_frame, settings)
}

pub(super) fn srt(text: &str, settings: &TimecodeSettings) -> TcResult<TimecodeValue> {
    let format = TimecodeFormat::Srt;
    let clock = Clock::read(format, text, &[','], 3)?;
    let millis = clock.total_seconds() * 1000 + clock.sub;
    let magnitude = units_to_frames(millis, 1000, settings, false);
    finish(format, text, clock.negative, magnitude, settings.effective_drop_frame(), settings)
}

pub(super) fn dlp(text: &str, settings: &TimecodeSettings) -> TcResult<TimecodeValue> {
    let format = TimecodeFormat::Dlp;
    let clock = Clock::read(format, text, &[':'], 3)?;
    let millis = clock.total_seconds() * 1000 + clock.sub;
    let magnitude = units_to_frames(millis, 1000, settings, true);
    finish(format, text, clock.negative, magnitude, settings.effective_drop_frame(), settings)
}

pub(super) fn ffmpeg(text: &str, settings: &TimecodeSettings) -> TcResult<TimecodeValue> {
    let format = TimecodeFormat::Ffmpeg;
    let clock = Clock::read(format, text, &['.'], 2)?;
    let centis = clock.total_seconds() * 100 + clock.sub;
    let magnitude = units_to_frames(centis, 100, settings, true);
    finish(format, text, clock.negative, magnitude, settings.effective_drop_frame(), settings)
}

pub(super) fn fcpx(text: &str, settings: &TimecodeSettings) -> TcResult<TimecodeValue> {
    let format = TimecodeFormat::Fcpx;
    let (negative, body) = split_sign(text.trim());
    let body = body
        .strip_suffix('s')
        .ok_or_else(|| TcError::parse(format, text, "expected a trailing 's'"))?;

    let (numerator, denominator) = match body.split_once('/') {
        Some((n, d)) => (digits(format, text, n)?, digits(format, text, d)?),
        None => (digits(format, text, body)?, 1),
    };
    if denominator == 0 {
        return Err(TcError::parse(format, text, "denominator must not be zero"));
    }

    let rate = settings.frame_rate.exact_ratio();
    let magnitude = div_round(
        numerator * rate.num() as i128,
        denominator * rate.den() as i128,
    );
    finish(format, text, negative, magnitude, settings.effective_drop_frame(), settings)
}

pub(super) fn frame(text: &str, settings: &TimecodeSettings) -> TcResult<TimecodeValue> {
    let format = TimecodeFormat::Frame;
    let (negative, body) = split_sign(text.trim());
    let magnitude = digits(format, text, body)?;
    finish(format, text, negative, magnitude, settings.effective_drop_frame(), settings)
}

pub(super) fn time(text: &str, settings: &TimecodeSettings) -> TcResult<TimecodeValue> {
    let format = TimecodeFormat::Time;
    let (negative, body) = split_sign(text.trim());

    let (whole, fraction) = body.split_once('.').unwrap_or((body, ""));
    if whole.is_empty() {
        return Err(TcError::parse(format, text, "expected digits before the decimal point"));
    }
    if fraction.len() > MAX_TIME_DECIMALS {
        return Err(TcError::parse(
            format,
            text,
            format!("at most {} decimal places", MAX_TIME_DECIMALS),
        ));
    }
    let scale = 10_i128.pow(fraction.len() as u32);
    let units = if fraction.is_empty() {
        digits(format, text, whole)?
    } else {
        digits(format, text, whole)? * scale + digits(format, text, fraction)?
    };

    let magnitude = units_to_frames(units, scale, settings, false);
    finish(format, text, negative, magnitude, settings.effective_drop_frame(), settings)
}
