//! # Sample Source Module
//!
//! Upstream hand-position samples and their text encoding.
//!
//! Hand detection runs outside this crate. The driver binary receives one
//! sample per line on stdin, in the form:
//!
//! ```text
//! <x> <y> [tracking]
//! ```
//!
//! | Field | Range | Description |
//! |-------|-------|-------------|
//! | `x` | 0.0-1.0 | Horizontal wrist position, 0.0 = left edge |
//! | `y` | 0.0-1.0 | Vertical wrist position, 0.0 = top edge |
//! | `tracking` | `1`/`0`/`true`/`false` | Hand detected (default `true`) |
//!
//! Fields may be separated by whitespace or commas. Blank lines and lines
//! starting with `#` are ignored.
//!
//! ## Usage
//!
//! ```
//! use hand_pilot::source::{parse_sample_line, HandSample};
//!
//! let sample = parse_sample_line("0.62, 0.40, 1")?.unwrap();
//! assert_eq!(sample, HandSample { x: 0.62, y: 0.40, tracking: true });
//!
//! assert!(parse_sample_line("# comment")?.is_none());
//! # Ok::<(), hand_pilot::error::HandPilotError>(())
//! ```

use crate::error::{HandPilotError, Result};

/// One upstream observation of the hand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandSample {
    /// Normalized horizontal position (0.0 to 1.0).
    pub x: f32,
    /// Normalized vertical position (0.0 to 1.0).
    pub y: f32,
    /// Whether the position is valid.
    pub tracking: bool,
}

impl HandSample {
    /// Sample reporting no hand. Position is the frame center.
    #[must_use]
    pub fn lost() -> Self {
        Self {
            x: 0.5,
            y: 0.5,
            tracking: false,
        }
    }
}

/// Parses one text line into a sample.
///
/// # Returns
///
/// * `Ok(Some(sample))` - A sample was parsed
/// * `Ok(None)` - Blank line or comment
///
/// # Errors
///
/// Returns [`HandPilotError::Sample`] when a coordinate is missing, not a
/// number or not finite, the tracking token is unknown, or extra fields follow.
pub fn parse_sample_line(line: &str) -> Result<Option<HandSample>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut fields = line
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|f| !f.is_empty());

    let x = parse_coordinate(fields.next(), "x", line)?;
    let y = parse_coordinate(fields.next(), "y", line)?;
    let tracking = match fields.next() {
        None => true,
        Some(token) => parse_tracking(token)
            .ok_or_else(|| sample_error(format!("unknown tracking flag '{}'", token)))?,
    };

    if let Some(extra) = fields.next() {
        return Err(sample_error(format!("unexpected field '{}' in '{}'", extra, line)));
    }

    Ok(Some(HandSample { x, y, tracking }))
}

fn sample_error(msg: String) -> HandPilotError {
    HandPilotError::Sample(msg)
}

fn parse_coordinate(field: Option<&str>, name: &str, line: &str) -> Result<f32> {
    let field = field.ok_or_else(|| sample_error(format!("missing {} in '{}'", name, line)))?;
    let value = field
        .parse::<f32>()
        .map_err(|e| sample_error(format!("invalid {} '{}': {}", name, field, e)))?;

    if !value.is_finite() {
        return Err(sample_error(format!("{} must be a finite number, got '{}'", name, field)));
    }

    Ok(value)
}

fn parse_tracking(token: &str) -> Option<bool> {
    match token.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_space_separated() {
        let sample = parse_sample_line("0.25 0.75").unwrap().unwrap();
        assert_eq!(sample, HandSample { x: 0.25, y: 0.75, tracking: true });
    }

    #[test]
    fn test_parse_comma_separated_with_flag() {
        let sample = parse_sample_line("0.1,0.9,0").unwrap().unwrap();
        assert_eq!(sample, HandSample { x: 0.1, y: 0.9, tracking: false });
    }

    #[test]
    fn test_parse_word_flags() {
        assert!(parse_sample_line("0.5 0.5 TRUE").unwrap().unwrap().tracking);
        assert!(!parse_sample_line("0.5 0.5 false").unwrap().unwrap().tracking);
    }

    #[test]
    fn test_parse_surrounding_whitespace() {
        let sample = parse_sample_line("   0.3 \t 0.6  \n").unwrap().unwrap();
        assert_eq!(sample.x, 0.3);
        assert_eq!(sample.y, 0.6);
    }

    #[test]
    fn test_blank_and_comment_lines_skipped() {
        assert!(parse_sample_line("").unwrap().is_none());
        assert!(parse_sample_line("   ").unwrap().is_none());
        assert!(parse_sample_line("# x y tracking").unwrap().is_none());
    }

    #[test]
    fn test_out_of_range_coordinates_accepted() {
        // Range handling belongs to the pipeline clamp
        let sample = parse_sample_line("1.4 -0.2").unwrap().unwrap();
        assert_eq!(sample.x, 1.4);
        assert_eq!(sample.y, -0.2);
    }

    #[test]
    fn test_missing_coordinate_is_error() {
        match parse_sample_line("0.5") {
            Err(HandPilotError::Sample(msg)) => assert!(msg.contains("missing y")),
            other => panic!("Expected Sample error, got: {:?}", other),
        }
    }

    #[test]
    fn test_non_numeric_coordinate_is_error() {
        assert!(matches!(parse_sample_line("left 0.5"), Err(HandPilotError::Sample(_))));
    }

    #[test]
    fn test_non_finite_coordinate_is_error() {
        for line in ["nan 0.5", "0.5 NaN", "inf 0.5", "0.5 -infinity 1"] {
            match parse_sample_line(line) {
                Err(HandPilotError::Sample(msg)) => assert!(msg.contains("finite"), "{}", msg),
                other => panic!("Expected Sample error for '{}', got: {:?}", line, other),
            }
        }
    }

    #[test]
    fn test_unknown_flag_is_error() {
        assert!(matches!(parse_sample_line("0.5 0.5 maybe"), Err(HandPilotError::Sample(_))));
    }

    #[test]
    fn test_extra_field_is_error() {
        assert!(matches!(parse_sample_line("0.5 0.5 1 7"), Err(HandPilotError::Sample(_))));
    }

    #[test]
    fn test_lost_sample() {
        let sample = HandSample::lost();
        assert!(!sample.tracking);
        assert_eq!((sample.x, sample.y), (0.5, 0.5));
    }
}
