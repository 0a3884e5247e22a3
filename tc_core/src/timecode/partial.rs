//! Live interpretation of partially typed input.
//!
//! Unlike [`parse`](super::parse), this never fails: it normalizes whatever
//! has been typed so far into the format's shape and reports the best value
//! it can read from it.

use serde::Serialize;

use super::{parse, TimecodeFormat, TimecodeValue};
use crate::settings::TimecodeSettings;

/// Normalized text, best-effort value and completeness of typed input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartialParse {
    /// Typed text with foreign characters removed and separators inserted
    pub display: String,

    /// Value with missing trailing digits read as zero, if that parses
    pub value: Option<TimecodeValue>,

    /// Whether every field has been typed and the text parses as-is
    pub complete: bool,
}

/// Digit groups and the separator that precedes each group after the first.
struct ClockLayout {
    groups: [usize; 4],
    separators: [char; 3],
}

impl ClockLayout {
    fn for_format(format: TimecodeFormat, drop_frame: bool) -> Option<Self> {
        let last = match format {
            TimecodeFormat::Smpte if drop_frame => ';',
            TimecodeFormat::Smpte | TimecodeFormat::Dlp => ':',
            TimecodeFormat::Srt => ',',
            TimecodeFormat::Ffmpeg => '.',
            _ => return None,
        };
        let sub_digits = match format {
            TimecodeFormat::Srt | TimecodeFormat::Dlp => 3,
            _ => 2,
        };
        Some(ClockLayout {
            groups: [2, 2, 2, sub_digits],
            separators: [':', ':', last],
        })
    }

    fn max_digits(&self) -> usize {
        self.groups.iter().sum()
    }

    /// Lay `digits` out as `HH:MM:SS?XX`, adding a separator only once a
    /// digit follows it.
    fn render(&self, digits: &str) -> String {
        let mut out = String::with_capacity(digits.len() + 3);
        let mut rest = digits;
        for (i, width) in self.groups.iter().enumerate() {
            if rest.is_empty() {
                break;
            }
            if i > 0 {
                out.push(self.separators[i - 1]);
            }
            let take = (*width).min(rest.len());
            out.push_str(&rest[..take]);
            rest = &rest[take..];
        }
        out
    }
}

/// Interpret `typed` as an in-progress entry in `format`.
pub fn partial_parse(format: TimecodeFormat, typed: &str, settings: &TimecodeSettings) -> PartialParse {
    let trimmed = typed.trim_start();
    let (sign, body) = match trimmed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", trimmed),
    };

    let semicolon = body.contains(';') && settings.frame_rate.is_drop_frame_eligible();
    match ClockLayout::for_format(format, settings.effective_drop_frame() || semicolon) {
        Some(layout) => partial_clock(format, &layout, sign, body, settings),
        None => partial_free(format, sign, body, settings),
    }
}

fn partial_clock(
    format: TimecodeFormat,
    layout: &ClockLayout,
    sign: &str,
    body: &str,
    settings: &TimecodeSettings,
) -> PartialParse {
    let digits: String = body
        .chars()
        .filter(char::is_ascii_digit)
        .take(layout.max_digits())
        .collect();

    let display = format!("{}{}", sign, layout.render(&digits));
    if digits.is_empty() {
        return PartialParse {
            display,
            value: None,
            complete: false,
        };
    }

    let padded = format!("{:0<width$}", digits, width = layout.max_digits());
    let candidate = format!("{}{}", sign, layout.render(&padded));
    let value = parse(format, &candidate, settings).ok();
    let complete = digits.len() == layout.max_digits() && value.is_some();

    PartialParse {
        display,
        value,
        complete,
    }
}

fn partial_free(format: TimecodeFormat, sign: &str, body: &str, settings: &TimecodeSettings) -> PartialParse {
    let mut seen_point = false;
    let mut seen_slash = false;
    let filtered: String = body
        .chars()
        .filter(|c| match (format, *c) {
            (_, '0'..='9') => true,
            (TimecodeFormat::Time, '.') if !seen_point => {
                seen_point = true;
                true
            }
            (TimecodeFormat::Fcpx, '/') if !seen_slash => {
                seen_slash = true;
                true
            }
            _ => false,
        })
        .collect();

    let display = match format {
        TimecodeFormat::Fcpx if !filtered.is_empty() && body.trim_end().ends_with('s') => {
            format!("{}{}s", sign, filtered)
        }
        _ => format!("{}{}", sign, filtered),
    };

    let exact = parse(format, &display, settings).ok();
    let complete = exact.is_some();
    let value = exact.or_else(|| match format {
        TimecodeFormat::Fcpx => best_effort_fcpx(sign, &filtered, settings),
        TimecodeFormat::Time => parse(format, &format!("{}{}0", sign, filtered), settings).ok(),
        _ => None,
    });

    PartialParse {
        display,
        value,
        complete,
    }
}

/// Read an FCPX entry still missing its denominator or trailing `s`.
fn best_effort_fcpx(sign: &str, filtered: &str, settings: &TimecodeSettings) -> Option<TimecodeValue> {
    let candidate = match filtered.strip_suffix('/') {
        Some(numerator) => format!("{}{}s", sign, numerator),
        None => format!("{}{}s", sign, filtered),
    };
    parse(TimecodeFormat::Fcpx, &candidate, settings).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame_rate::FrameRate;
    use pretty_assertions::assert_eq;

    fn settings(rate: FrameRate) -> TimecodeSettings {
        TimecodeSettings::new(rate)
    }

    #[test]
    fn test_separators_appear_as_digits_arrive() {
        let s = settings(FrameRate::Fps24);
        let shown: Vec<_> = ["0", "01", "010", "0100", "01000", "010000", "0100000", "01000000"]
            .into_iter()
            .map(|typed| partial_parse(TimecodeFormat::Smpte, typed, &s).display)
            .collect();
        assert_eq!(
            shown,
            vec![
                "0",
                "01",
                "01:0",
                "01:00",
                "01:00:0",
                "01:00:00",
                "01:00:00:0",
                "01:00:00:00",
            ]
        );
    }

    #[test]
    fn test_best_effort_value_pads_with_zeros() {
        let s = settings(FrameRate::Fps24);
        let p = partial_parse(TimecodeFormat::Smpte, "01", &s);
        assert_eq!(p.value.map(|v| v.frames()), Some(86_400));
        assert!(!p.complete);

        let p = partial_parse(TimecodeFormat::Smpte, "01:00:00:12", &s);
        assert_eq!(p.value.map(|v| v.frames()), Some(86_412));
        assert!(p.complete);
    }

    #[test]
    fn test_digit_cap_and_filtering() {
        let s = settings(FrameRate::Fps25);
        let p = partial_parse(TimecodeFormat::Srt, "00x00:01,5009999", &s);
        assert_eq!(p.display, "00:00:01,500");
        assert!(p.complete);

        let p = partial_parse(TimecodeFormat::Ffmpeg, "000001999", &s);
        assert_eq!(p.display, "00:00:01.99");

        let p = partial_parse(TimecodeFormat::Dlp, "0000015", &s);
        assert_eq!(p.display, "00:00:01:5");
        assert!(!p.complete);
        assert_eq!(p.value.map(|v| v.frames()), Some(38));
    }

    #[test]
    fn test_out_of_range_prefix_has_no_value() {
        let s = settings(FrameRate::Fps24);
        let p = partial_parse(TimecodeFormat::Smpte, "0099", &s);
        assert_eq!(p.display, "00:99");
        assert_eq!(p.value, None);
        assert!(!p.complete);

        let p = partial_parse(TimecodeFormat::Smpte, "", &s);
        assert_eq!(p.display, "");
        assert_eq!(p.value, None);
    }

    #[test]
    fn test_drop_frame_separator() {
        let s = settings(FrameRate::Fps29_97).with_drop_frame(true);
        let p = partial_parse(TimecodeFormat::Smpte, "00010002", &s);
        assert_eq!(p.display, "00:01:00;02");
        assert_eq!(p.value.map(|v| v.frames()), Some(1800));

        // Typed ';' selects drop-frame even when the setting is off
        let s = settings(FrameRate::Fps29_97);
        let p = partial_parse(TimecodeFormat::Smpte, "00:01:00;0", &s);
        assert_eq!(p.display, "00:01:00;0");
        assert_eq!(p.value, None);
    }

    #[test]
    fn test_free_form_formats() {
        let s = settings(FrameRate::Fps24);

        let p = partial_parse(TimecodeFormat::Frame, "1a2b3", &s);
        assert_eq!(p.display, "123");
        assert!(p.complete);

        let p = partial_parse(TimecodeFormat::Time, "2.", &s);
        assert_eq!(p.display, "2.");
        assert_eq!(p.value.map(|v| v.frames()), Some(48));

        let p = partial_parse(TimecodeFormat::Fcpx, "48/", &s);
        assert_eq!(p.display, "48/");
        assert!(!p.complete);
        assert_eq!(p.value.map(|v| v.frames()), Some(1152));

        let p = partial_parse(TimecodeFormat::Fcpx, "48/24s", &s);
        assert_eq!(p.display, "48/24s");
        assert!(p.complete);
        assert_eq!(p.value.map(|v| v.frames()), Some(48));
    }

    #[test]
    fn test_negative_entry_in_loose_mode() {
        let s = settings(FrameRate::Fps24).with_strict_mode(false);
        let p = partial_parse(TimecodeFormat::Smpte, "-000001", &s);
        assert_eq!(p.display, "-00:00:01");
        assert_eq!(p.value.map(|v| v.frames()), Some(-24));
    }
}
