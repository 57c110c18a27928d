//! # Axis Mapper Module
//!
//! Converts a center-relative hand offset into a normalized control axis.
//!
//! ## Steps
//!
//! 1. **Deadzone**: offsets with `|value| < deadzone` become 0.0
//! 2. **Sensitivity**: the offset is multiplied by `sensitivity`
//! 3. **Range map**: `[-0.5, 0.5]` is mapped linearly to `[-1.0, 1.0]` and clamped
//! 4. **Inversion**: the result is negated when `invert` is set
//!
//! Offsets are in screen units, so a deadzone of 0.12 ignores hand movement
//! within 12% of the frame around the center.
//!
//! ## Usage
//!
//! ```
//! use hand_pilot::control::mapper::{map_axis, MapperConfig};
//!
//! let config = MapperConfig::new(0.1, 2.0, false)?;
//!
//! // Within deadzone
//! assert_eq!(map_axis(0.05, &config), 0.0);
//!
//! // Halfway to the edge with 2x sensitivity is full deflection
//! assert_eq!(map_axis(0.25, &config), 1.0);
//! # Ok::<(), hand_pilot::error::HandPilotError>(())
//! ```

use crate::error::{HandPilotError, Result};

/// Largest accepted deadzone (half the frame width on each side).
pub const MAX_DEADZONE: f32 = 0.5;

/// Smallest accepted sensitivity multiplier.
pub const MIN_SENSITIVITY: f32 = 1.0;

/// Offset domain of a normalized position relative to the frame center.
pub const OFFSET_MIN: f32 = -0.5;
/// Offset domain of a normalized position relative to the frame center.
pub const OFFSET_MAX: f32 = 0.5;

/// Control axis output range.
pub const AXIS_MIN: f32 = -1.0;
/// Control axis output range.
pub const AXIS_MAX: f32 = 1.0;

/// Input spans narrower than this are treated as zero width.
const DEGENERATE_SPAN: f32 = 1e-9;

/// Per-axis mapping parameters.
///
/// Immutable once built. Use [`MapperConfig::new`] to get a validated value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapperConfig {
    deadzone: f32,
    sensitivity: f32,
    invert: bool,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            deadzone: 0.0,
            sensitivity: 1.0,
            invert: false,
        }
    }
}

impl MapperConfig {
    /// Creates a validated mapper configuration.
    ///
    /// # Arguments
    ///
    /// * `deadzone` - Ignored offset around center (0.0 to 0.5)
    /// * `sensitivity` - Offset multiplier (at least 1.0)
    /// * `invert` - Negate the mapped output
    ///
    /// # Errors
    ///
    /// Returns [`HandPilotError::InvalidParameter`] if `deadzone` or
    /// `sensitivity` is out of range or not finite.
    pub fn new(deadzone: f32, sensitivity: f32, invert: bool) -> Result<Self> {
        if !(0.0..=MAX_DEADZONE).contains(&deadzone) {
            return Err(HandPilotError::InvalidParameter(format!(
                "deadzone must be between 0.0 and {}, got {}",
                MAX_DEADZONE, deadzone
            )));
        }

        if !sensitivity.is_finite() || sensitivity < MIN_SENSITIVITY {
            return Err(HandPilotError::InvalidParameter(format!(
                "sensitivity must be a finite value >= {}, got {}",
                MIN_SENSITIVITY, sensitivity
            )));
        }

        Ok(Self {
            deadzone,
            sensitivity,
            invert,
        })
    }

    /// Returns the configured deadzone.
    #[must_use]
    pub fn deadzone(&self) -> f32 {
        self.deadzone
    }

    /// Returns the configured sensitivity.
    #[must_use]
    pub fn sensitivity(&self) -> f32 {
        self.sensitivity
    }

    /// Returns whether the output is negated.
    #[must_use]
    pub fn invert(&self) -> bool {
        self.invert
    }

    /// Returns a copy of this configuration with a different inversion flag.
    ///
    /// Used to derive the pitch configuration from the shared roll settings.
    #[must_use]
    pub fn with_invert(self, invert: bool) -> Self {
        Self { invert, ..self }
    }
}

/// Maps a center-relative offset to a control axis value in `[-1.0, 1.0]`.
///
/// # Arguments
///
/// * `centered_value` - Offset from the frame center (nominally -0.5 to 0.5)
/// * `config` - Deadzone, sensitivity and inversion for this axis
///
/// # Examples
///
/// ```
/// use hand_pilot::control::mapper::{map_axis, MapperConfig};
///
/// let normal = MapperConfig::new(0.1, 1.0, false)?;
/// let inverted = MapperConfig::new(0.1, 1.0, true)?;
///
/// assert!(map_axis(0.3, &normal) > 0.0);
/// assert!(map_axis(0.3, &inverted) < 0.0);
/// # Ok::<(), hand_pilot::error::HandPilotError>(())
/// ```
#[must_use]
pub fn map_axis(centered_value: f32, config: &MapperConfig) -> f32 {
    let after_deadzone = apply_deadzone(centered_value, config.deadzone);
    let scaled = after_deadzone * config.sensitivity;
    let mapped = map_range_clamped(scaled, OFFSET_MIN, OFFSET_MAX, AXIS_MIN, AXIS_MAX);

    if config.invert {
        -mapped
    } else {
        mapped
    }
}

/// Zeroes values strictly inside the deadzone.
///
/// A value exactly at the threshold passes through unchanged.
///
/// # Examples
///
/// ```
/// use hand_pilot::control::mapper::apply_deadzone;
///
/// assert_eq!(apply_deadzone(0.05, 0.1), 0.0);
/// assert_eq!(apply_deadzone(0.2, 0.1), 0.2);
/// assert_eq!(apply_deadzone(0.1, 0.1), 0.1);
/// ```
#[inline]
#[must_use]
pub fn apply_deadzone(value: f32, threshold: f32) -> f32 {
    if value.abs() < threshold {
        0.0
    } else {
        value
    }
}

/// Linearly maps `value` from `[in_min, in_max]` to `[out_min, out_max]` and
/// clamps the result to the output range.
///
/// Inverted output ranges (`out_min > out_max`) are clamped the same way. A
/// zero-width input range returns `out_min`.
///
/// # Examples
///
/// ```
/// use hand_pilot::control::mapper::map_range_clamped;
///
/// assert_eq!(map_range_clamped(0.5, 0.0, 1.0, -100.0, 100.0), 0.0);
/// assert_eq!(map_range_clamped(2.0, 0.0, 1.0, -100.0, 100.0), 100.0);
/// assert_eq!(map_range_clamped(0.0, 0.0, 1.0, 1.0, -1.0), 1.0);
/// ```
#[must_use]
pub fn map_range_clamped(value: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    if (in_max - in_min).abs() < DEGENERATE_SPAN {
        return out_min;
    }

    let slope = (out_max - out_min) / (in_max - in_min);
    let result = out_min + slope * (value - in_min);

    // f32::clamp panics on NaN bounds only, a NaN value passes through
    if out_min < out_max {
        result.clamp(out_min, out_max)
    } else {
        result.clamp(out_max, out_min)
    }
}
