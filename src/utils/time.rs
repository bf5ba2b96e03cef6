//! Timecode parsing and duration formatting

use std::time::Duration;

use crate::domain::errors::ParseError;

/// Time parser for clip timecodes
pub struct TimeParser;

impl TimeParser {
    /// Parse `HH:MM` or `HH:MM:SS` into elapsed seconds.
    ///
    /// Every field may be fractional and no field has an upper bound, so
    /// `"00:90"` is 5400 seconds. Range checks belong to the validator.
    pub fn parse_timecode(time_str: &str) -> Result<f64, ParseError> {
        let parts: Vec<&str> = time_str.split(':').collect();

        let (hours, minutes, seconds) = match parts.as_slice() {
            [h, m] => (
                Self::parse_field(time_str, h)?,
                Self::parse_field(time_str, m)?,
                0.0,
            ),
            [h, m, s] => (
                Self::parse_field(time_str, h)?,
                Self::parse_field(time_str, m)?,
                Self::parse_field(time_str, s)?,
            ),
            _ => {
                return Err(ParseError::FieldCount {
                    input: time_str.to_string(),
                })
            }
        };

        Ok(hours * 3600.0 + minutes * 60.0 + seconds)
    }

    /// Parse a single non-negative, finite field
    fn parse_field(input: &str, field: &str) -> Result<f64, ParseError> {
        let invalid = || ParseError::InvalidField {
            input: input.to_string(),
            field: field.to_string(),
        };

        let value: f64 = field.parse().map_err(|_| invalid())?;
        if !value.is_finite() || value < 0.0 {
            return Err(invalid());
        }
        Ok(value)
    }

    /// Format a remaining-time estimate rounded to whole seconds,
    /// e.g. `0s`, `42s`, `3m7s`, `1h0m5s`
    pub fn format_eta(duration: Duration) -> String {
        let total_seconds = duration.as_secs_f64().round() as u64;
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h{}m{}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m{}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_three_fields() {
        assert_eq!(TimeParser::parse_timecode("00:00:10").unwrap(), 10.0);
        assert_eq!(TimeParser::parse_timecode("01:02:03.5").unwrap(), 3723.5);
        assert_eq!(TimeParser::parse_timecode("1.5:0:0").unwrap(), 5400.0);
    }

    #[test]
    fn test_parse_two_fields_is_hours_and_minutes() {
        assert_eq!(TimeParser::parse_timecode("01:30").unwrap(), 5400.0);
        assert_eq!(TimeParser::parse_timecode("00:02").unwrap(), 120.0);
    }

    #[test]
    fn test_parse_has_no_field_upper_bound() {
        assert_eq!(TimeParser::parse_timecode("00:90:00").unwrap(), 5400.0);
        assert_eq!(TimeParser::parse_timecode("00:00:75").unwrap(), 75.0);
    }

    #[test]
    fn test_parse_matches_formula_across_inputs() {
        for h in [0.0, 1.0, 2.5, 10.0] {
            for m in [0.0, 30.0, 59.0, 61.0] {
                for s in [0.0, 0.25, 59.5] {
                    let text = format!("{}:{}:{}", h, m, s);
                    assert_eq!(
                        TimeParser::parse_timecode(&text).unwrap(),
                        h * 3600.0 + m * 60.0 + s,
                        "{}",
                        text
                    );
                }
                let text = format!("{}:{}", h, m);
                assert_eq!(
                    TimeParser::parse_timecode(&text).unwrap(),
                    h * 3600.0 + m * 60.0
                );
            }
        }
    }

    #[test]
    fn test_parse_rejects_wrong_field_count() {
        for input in ["", "10", "1:2:3:4", "::::"] {
            assert!(
                matches!(
                    TimeParser::parse_timecode(input),
                    Err(ParseError::FieldCount { .. })
                ),
                "{:?}",
                input
            );
        }
    }

    #[test]
    fn test_parse_rejects_bad_fields() {
        for input in ["aa:bb", "00:-1:00", "00::00", "00:00:x", "inf:00", "NaN:00:00"] {
            assert!(
                matches!(
                    TimeParser::parse_timecode(input),
                    Err(ParseError::InvalidField { .. })
                ),
                "{:?}",
                input
            );
        }
    }

    #[test]
    fn test_parse_rejects_surrounding_whitespace() {
        for input in [" 00:01", "00:00:10\n", " 00:00:10 ", "00: 01"] {
            assert!(
                matches!(
                    TimeParser::parse_timecode(input),
                    Err(ParseError::InvalidField { .. })
                ),
                "{:?}",
                input
            );
        }
    }

    #[test]
    fn test_parse_error_message() {
        let err = TimeParser::parse_timecode("ab:cd").unwrap_err();
        assert_eq!(err.to_string(), "invalid time format");
    }

    #[test]
    fn test_format_eta() {
        assert_eq!(TimeParser::format_eta(Duration::ZERO), "0s");
        assert_eq!(TimeParser::format_eta(Duration::from_millis(400)), "0s");
        assert_eq!(TimeParser::format_eta(Duration::from_millis(1500)), "2s");
        assert_eq!(TimeParser::format_eta(Duration::from_secs(42)), "42s");
        assert_eq!(TimeParser::format_eta(Duration::from_secs(187)), "3m7s");
        assert_eq!(TimeParser::format_eta(Duration::from_secs(3605)), "1h0m5s");
    }
}
