//! # Control Pipeline Module
//!
//! Per-frame flow from a raw hand position to a smoothed [`ControlFrame`].
//!
//! ## Frame Flow
//!
//! | Step | Operation | Notes |
//! |------|-----------|-------|
//! | 1 | `dx = x - 0.5`, `dy = y - 0.5` | Offset from frame center |
//! | 2 | Zero offsets when not tracking | Auto-leveling |
//! | 3 | [`map_axis`] per axis | Pitch honors `invert_pitch` |
//! | 4 | [`AxisFilter::update`] per axis | Smoothing in axis units |
//!
//! Mapping happens before smoothing, so deadzone and sensitivity thresholds
//! stay in screen-offset units regardless of the smoothing factor.
//!
//! ## Usage
//!
//! ```
//! use hand_pilot::control::pipeline::{ControlPipeline, PipelineSettings};
//!
//! let mut pipeline = ControlPipeline::new(PipelineSettings::default())?;
//!
//! let frame = pipeline.process(0.9, 0.5, true);
//! assert!(frame.roll > 0.0);
//! assert_eq!(frame.pitch, 0.0);
//! assert!(frame.tracking);
//! # Ok::<(), hand_pilot::error::HandPilotError>(())
//! ```

use super::filter::AxisFilter;
use super::mapper::{map_axis, MapperConfig};
use crate::error::Result;
use crate::source::HandSample;

/// Normalized position of the frame center.
pub const FRAME_CENTER: f32 = 0.5;

/// Control output for one frame.
///
/// `roll` and `pitch` are smoothed and lie within `[-1.0, 1.0]`. `tracking`
/// is the current frame's raw flag and is never smoothed.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ControlFrame {
    /// Roll axis (-1.0 = full left, 1.0 = full right).
    pub roll: f32,
    /// Pitch axis (-1.0 = full up, 1.0 = full down unless inverted).
    pub pitch: f32,
    /// Whether a hand was tracked this frame.
    pub tracking: bool,
}

impl ControlFrame {
    /// Neutral frame: both axes centered, no tracking.
    #[must_use]
    pub fn neutral() -> Self {
        Self::default()
    }
}

/// Tuning values used to build a [`ControlPipeline`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipelineSettings {
    /// EMA alpha for both axes (0.0 to 1.0).
    pub smoothing_factor: f32,
    /// Deadzone shared by both axes (0.0 to 0.5).
    pub deadzone: f32,
    /// Sensitivity shared by both axes (at least 1.0).
    pub sensitivity: f32,
    /// Negate pitch after mapping.
    pub invert_pitch: bool,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            smoothing_factor: 0.15,
            deadzone: 0.12,
            sensitivity: 1.6,
            invert_pitch: false,
        }
    }
}

/// Owns the per-axis filters and mapper configurations.
///
/// # Thread Safety
///
/// `ControlPipeline` holds mutable filter state and is meant to be driven by
/// a single owner, one frame at a time.
#[derive(Debug, Clone)]
pub struct ControlPipeline {
    roll_filter: AxisFilter,
    pitch_filter: AxisFilter,
    roll_config: MapperConfig,
    pitch_config: MapperConfig,
}

impl ControlPipeline {
    /// Creates a pipeline from tuning settings.
    ///
    /// Roll never inverts. Pitch uses the same deadzone and sensitivity and
    /// inverts when `invert_pitch` is set.
    ///
    /// # Errors
    ///
    /// Returns [`HandPilotError::InvalidParameter`](crate::error::HandPilotError::InvalidParameter)
    /// if the smoothing factor, deadzone or sensitivity is out of range.
    pub fn new(settings: PipelineSettings) -> Result<Self> {
        let roll_config = MapperConfig::new(settings.deadzone, settings.sensitivity, false)?;
        let pitch_config = roll_config.with_invert(settings.invert_pitch);

        Ok(Self::from_parts(
            AxisFilter::new(settings.smoothing_factor)?,
            AxisFilter::new(settings.smoothing_factor)?,
            roll_config,
            pitch_config,
        ))
    }

    /// Creates a pipeline from already-validated parts.
    #[must_use]
    pub fn from_parts(
        roll_filter: AxisFilter,
        pitch_filter: AxisFilter,
        roll_config: MapperConfig,
        pitch_config: MapperConfig,
    ) -> Self {
        Self {
            roll_filter,
            pitch_filter,
            roll_config,
            pitch_config,
        }
    }

    /// Processes one frame.
    ///
    /// When `tracking` is false both offsets are forced to center, so the
    /// output decays toward 0.0 at the filter rate instead of holding the
    /// last value. A NaN or infinite position is also treated as centered.
    ///
    /// # Arguments
    ///
    /// * `raw_x` - Normalized horizontal position (0.0 to 1.0)
    /// * `raw_y` - Normalized vertical position (0.0 to 1.0)
    /// * `tracking` - Whether the position is valid this frame
    ///
    /// # Examples
    ///
    /// ```
    /// use hand_pilot::control::pipeline::{ControlPipeline, PipelineSettings};
    ///
    /// let settings = PipelineSettings { smoothing_factor: 1.0, ..Default::default() };
    /// let mut pipeline = ControlPipeline::new(settings)?;
    ///
    /// assert!(pipeline.process(1.0, 1.0, true).roll > 0.9);
    ///
    /// // Lost tracking with alpha 1.0 recenters immediately
    /// let frame = pipeline.process(1.0, 1.0, false);
    /// assert_eq!(frame.roll, 0.0);
    /// assert!(!frame.tracking);
    /// # Ok::<(), hand_pilot::error::HandPilotError>(())
    /// ```
    pub fn process(&mut self, raw_x: f32, raw_y: f32, tracking: bool) -> ControlFrame {
        let (dx, dy) = if tracking {
            (center_offset(raw_x), center_offset(raw_y))
        } else {
            (0.0, 0.0)
        };

        let roll = map_axis(dx, &self.roll_config);
        let pitch = map_axis(dy, &self.pitch_config);

        ControlFrame {
            roll: self.roll_filter.update(roll),
            pitch: self.pitch_filter.update(pitch),
            tracking,
        }
    }

    /// Processes one upstream sample.
    pub fn process_sample(&mut self, sample: HandSample) -> ControlFrame {
        self.process(sample.x, sample.y, sample.tracking)
    }

    /// Recenters both filters immediately.
    pub fn reset(&mut self) {
        self.roll_filter.reset(0.0);
        self.pitch_filter.reset(0.0);
    }

    /// Current smoothed roll.
    #[must_use]
    pub fn roll(&self) -> f32 {
        self.roll_filter.value()
    }

    /// Current smoothed pitch.
    #[must_use]
    pub fn pitch(&self) -> f32 {
        self.pitch_filter.value()
    }

    /// Mapper configuration used for roll.
    #[must_use]
    pub fn roll_config(&self) -> &MapperConfig {
        &self.roll_config
    }

    /// Mapper configuration used for pitch.
    #[must_use]
    pub fn pitch_config(&self) -> &MapperConfig {
        &self.pitch_config
    }
}

/// Offset from the frame center. A non-finite position counts as centered so
/// it never reaches the filter state.
fn center_offset(raw: f32) -> f32 {
    if raw.is_finite() {
        raw - FRAME_CENTER
    } else {
        0.0
    }
}
