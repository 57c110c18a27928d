//! # Axis Filter Module
//!
//! Single-pole exponential moving average (EMA) used to smooth each control
//! axis.
//!
//! The formula used is: `state = alpha * input + (1 - alpha) * state`
//!
//! - `alpha = 1.0`: No smoothing (output follows input)
//! - `alpha = 0.15`: Heavy smoothing (recommended default)
//! - `alpha = 0.0`: Frozen output
//!
//! After `n` updates with a constant input, the remaining error is
//! `(1 - alpha)^n` of the initial error.
//!
//! ## Usage
//!
//! ```
//! use hand_pilot::control::filter::AxisFilter;
//!
//! let mut filter = AxisFilter::new(0.1)?;
//! assert!((filter.update(1.0) - 0.1).abs() < 1e-6);
//! assert!((filter.update(1.0) - 0.19).abs() < 1e-6);
//! # Ok::<(), hand_pilot::error::HandPilotError>(())
//! ```

use crate::error::{HandPilotError, Result};

/// Stateful EMA smoother for one control axis.
///
/// One instance must live for the whole session. Building a new filter each
/// frame resets the state and disables smoothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisFilter {
    /// Weight of the newest measurement (0.0 to 1.0).
    alpha: f32,
    /// Last smoothed output.
    state: f32,
}

impl AxisFilter {
    /// Creates a filter starting at 0.0.
    ///
    /// # Errors
    ///
    /// Returns [`HandPilotError::InvalidParameter`] if `alpha` is not within `[0, 1]`.
    pub fn new(alpha: f32) -> Result<Self> {
        Self::with_initial(alpha, 0.0)
    }

    /// Creates a filter starting at `initial`.
    ///
    /// # Errors
    ///
    /// Returns [`HandPilotError::InvalidParameter`] if `alpha` is not within `[0, 1]`.
    ///
    /// # Examples
    ///
    /// ```
    /// use hand_pilot::control::filter::AxisFilter;
    ///
    /// let filter = AxisFilter::with_initial(0.5, 0.8)?;
    /// assert_eq!(filter.value(), 0.8);
    ///
    /// assert!(AxisFilter::with_initial(1.5, 0.0).is_err());
    /// # Ok::<(), hand_pilot::error::HandPilotError>(())
    /// ```
    pub fn with_initial(alpha: f32, initial: f32) -> Result<Self> {
        // NaN fails the range check as well
        if !(0.0..=1.0).contains(&alpha) {
            return Err(HandPilotError::InvalidParameter(format!(
                "alpha must be between 0.0 and 1.0, got {}",
                alpha
            )));
        }

        Ok(Self {
            alpha,
            state: initial,
        })
    }

    /// Returns the configured smoothing factor.
    #[must_use]
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Returns the current smoothed value without updating it.
    #[must_use]
    pub fn value(&self) -> f32 {
        self.state
    }

    /// Blends a new measurement into the state and returns the smoothed value.
    pub fn update(&mut self, measurement: f32) -> f32 {
        self.state = measurement * self.alpha + self.state * (1.0 - self.alpha);
        self.state
    }

    /// Overwrites the state without blending.
    pub fn reset(&mut self, value: f32) {
        self.state = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_starts_at_zero() {
        let filter = AxisFilter::new(0.3).unwrap();
        assert_eq!(filter.value(), 0.0);
        assert_eq!(filter.alpha(), 0.3);
    }

    #[test]
    fn test_alpha_bounds_are_inclusive() {
        assert!(AxisFilter::new(0.0).is_ok());
        assert!(AxisFilter::new(1.0).is_ok());
    }

    #[test]
    fn test_alpha_out_of_range_rejected() {
        for alpha in [-0.01, 1.01, f32::NAN, f32::INFINITY] {
            match AxisFilter::new(alpha) {
                Err(HandPilotError::InvalidParameter(msg)) => assert!(msg.contains("alpha")),
                other => panic!("Expected InvalidParameter for {}, got: {:?}", alpha, other),
            }
        }
    }

    #[test]
    fn test_step_response_matches_reference() {
        // Reference sequence: alpha 0.1, step from 0 to 1
        let mut filter = AxisFilter::new(0.1).unwrap();
        let inputs = [0.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0];
        let outputs: Vec<f32> = inputs.iter().map(|&x| filter.update(x)).collect();

        assert_eq!(outputs[0], 0.0);
        assert!((outputs[1] - 0.1).abs() < 1e-6);
        assert!((outputs[2] - 0.19).abs() < 1e-6);
        assert!((outputs[3] - 0.271).abs() < 1e-6);
    }

    #[test]
    fn test_first_update_from_rest() {
        let mut filter = AxisFilter::new(0.1).unwrap();
        assert!((filter.update(1.0) - 0.1).abs() < 1e-6);
        assert!((filter.update(1.0) - 0.19).abs() < 1e-6);
    }

    #[test]
    fn test_alpha_one_is_passthrough() {
        let mut filter = AxisFilter::new(1.0).unwrap();
        for x in [0.5, -0.7, 1.0, 0.0, 0.33] {
            assert_eq!(filter.update(x), x);
        }
    }

    #[test]
    fn test_alpha_zero_freezes_output() {
        let mut filter = AxisFilter::with_initial(0.0, 0.4).unwrap();
        for x in [1.0, -1.0, 0.0] {
            assert_eq!(filter.update(x), 0.4);
        }
    }

    #[test]
    fn test_residual_error_follows_power_law() {
        let alpha = 0.25_f32;
        let mut filter = AxisFilter::new(alpha).unwrap();

        for n in 1..=20 {
            let out = filter.update(1.0);
            let expected_residual = (1.0 - alpha).powi(n);
            assert!(
                ((1.0 - out) - expected_residual).abs() < 1e-5,
                "step {}: residual {} vs expected {}",
                n,
                1.0 - out,
                expected_residual
            );
        }
    }

    #[test]
    fn test_reset_overwrites_without_blending() {
        let mut filter = AxisFilter::new(0.1).unwrap();
        filter.update(1.0);
        filter.reset(0.0);
        assert_eq!(filter.value(), 0.0);

        filter.reset(0.75);
        assert_eq!(filter.value(), 0.75);

        // Next update blends from the reset value
        let out = filter.update(0.75);
        assert!((out - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_negative_measurements() {
        let mut filter = AxisFilter::new(0.5).unwrap();
        assert!((filter.update(-1.0) - (-0.5)).abs() < 1e-6);
        assert!((filter.update(-1.0) - (-0.75)).abs() < 1e-6);
    }
}
