//! Elapsed-time text format: `HH:MM:SS.ff`.
//!
//! Rules:
//! - hours, minutes, seconds and hundredths are zero-padded to 2 digits.
//! - hundredths are truncated, never rounded, so a later duration never
//!   renders smaller than an earlier one.
//! - hours do not roll over into days; 100h and beyond print more digits.

use std::time::Duration;

use crate::error::{Result, StopwatchError};

const NANOS_PER_HUNDREDTH: u32 = 10_000_000;

/// Render a duration as `HH:MM:SS.ff`.
pub fn format_elapsed(d: Duration) -> String {
    let total = d.as_secs();
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    let hundredths = d.subsec_nanos() / NANOS_PER_HUNDREDTH;
    format!("{hours:02}:{minutes:02}:{seconds:02}.{hundredths:02}")
}

/// Parse the `HH:MM:SS.ff` shape back into a duration (hundredth precision).
pub fn parse_elapsed(s: &str) -> Result<Duration> {
    let bad = || StopwatchError::BadRequest(format!("invalid elapsed time: {s:?}"));

    let mut parts = s.split(':');
    let (Some(h), Some(m), Some(rest), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(bad());
    };
    let (sec, frac) = rest.split_once('.').ok_or_else(bad)?;

    if h.len() < 2 || m.len() != 2 || sec.len() != 2 || frac.len() != 2 {
        return Err(bad());
    }
    let field = |v: &str| -> Result<u64> {
        if !v.bytes().all(|b| b.is_ascii_digit()) {
            return Err(bad());
        }
        v.parse::<u64>().map_err(|_| bad())
    };

    let hours = field(h)?;
    let minutes = field(m)?;
    let seconds = field(sec)?;
    let hundredths = field(frac)?;
    if minutes >= 60 || seconds >= 60 {
        return Err(bad());
    }

    let secs = hours
        .checked_mul(3600)
        .and_then(|v| v.checked_add(minutes * 60 + seconds))
        .ok_or_else(bad)?;
    // hundredths < 100 by the length check above
    let nanos = hundredths as u32 * NANOS_PER_HUNDREDTH;
    Ok(Duration::new(secs, nanos))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn zero() {
        assert_eq!(format_elapsed(Duration::ZERO), "00:00:00.00");
    }

    #[test]
    fn truncates_hundredths() {
        assert_eq!(format_elapsed(Duration::from_millis(1_999)), "00:00:01.99");
        assert_eq!(format_elapsed(Duration::from_micros(9_999)), "00:00:00.00");
    }

    #[test]
    fn sub_day_value() {
        let d = Duration::from_millis(((13 * 60 + 7) * 60 + 42) * 1000 + 50);
        assert_eq!(format_elapsed(d), "13:07:42.05");
    }

    #[test]
    fn hours_overflow_two_digits() {
        assert_eq!(format_elapsed(Duration::from_secs(123 * 3600)), "123:00:00.00");
    }

    #[test]
    fn parse_accepts_formatted_output() {
        let d = parse_elapsed("01:02:03.45").unwrap();
        assert_eq!(d, Duration::from_millis(3_723_450));
        assert_eq!(format_elapsed(d), "01:02:03.45");
    }

    #[test]
    fn parse_rejects_malformed() {
        for s in ["", "1:02:03.45", "01:02:03", "01:60:00.00", "01:00:61.00", "aa:00:00.00", "01:02:03.4", "00:00:00.00:00"] {
            assert!(parse_elapsed(s).is_err(), "{s}");
        }
    }
}
