//! Property-based tests for the filter, mapper and pipeline.
//!
//! Uses proptest to verify the numeric guarantees independent of specific
//! tuning values.

use hand_pilot::control::filter::AxisFilter;
use hand_pilot::control::mapper::{apply_deadzone, map_axis, map_range_clamped, MapperConfig};
use hand_pilot::control::pipeline::{ControlPipeline, PipelineSettings};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Constant input converges monotonically with residual (1 - alpha)^n.
    #[test]
    fn prop_filter_converges_geometrically(
        alpha in 0.01f32..=1.0f32,
        target in -1.0f32..=1.0f32,
        initial in -1.0f32..=1.0f32,
        steps in 1usize..60,
    ) {
        let mut filter = AxisFilter::with_initial(alpha, initial).unwrap();
        let initial_error = (target - initial).abs();
        let mut previous_error = initial_error;

        for n in 1..=steps {
            let out = filter.update(target);
            let error = (target - out).abs();
            let expected = (1.0 - alpha).powi(n as i32) * initial_error;

            prop_assert!((error - expected).abs() < 1e-4,
                "step {n}: error {error} expected {expected}");
            prop_assert!(error <= previous_error + 1e-6,
                "step {n}: error grew from {previous_error} to {error}");
            previous_error = error;
        }
    }

    /// Alpha 1.0 applies no smoothing.
    #[test]
    fn prop_alpha_one_is_identity(values in prop::collection::vec(-10.0f32..10.0f32, 1..50)) {
        let mut filter = AxisFilter::new(1.0).unwrap();
        for v in values {
            prop_assert_eq!(filter.update(v), v);
        }
    }

    /// Mapped output stays within [-1, 1] for any finite input and valid config.
    #[test]
    fn prop_map_axis_bounded(
        value in -1.0e6f32..1.0e6f32,
        deadzone in 0.0f32..=0.5f32,
        sensitivity in 1.0f32..10.0f32,
        invert in any::<bool>(),
    ) {
        let config = MapperConfig::new(deadzone, sensitivity, invert).unwrap();
        let out = map_axis(value, &config);
        prop_assert!((-1.0..=1.0).contains(&out), "map_axis({value}) = {out}");
    }

    /// Offsets strictly inside the deadzone map to exactly zero.
    #[test]
    fn prop_deadzone_zeroes_inside(
        deadzone in 0.001f32..=0.5f32,
        fraction in -0.999f32..0.999f32,
        sensitivity in 1.0f32..10.0f32,
    ) {
        let value = deadzone * fraction;
        prop_assert_eq!(apply_deadzone(value, deadzone), 0.0);

        let config = MapperConfig::new(deadzone, sensitivity, false).unwrap();
        prop_assert_eq!(map_axis(value, &config), 0.0);
    }

    /// Inversion only flips the sign.
    #[test]
    fn prop_inversion_is_negation(value in -2.0f32..2.0f32, deadzone in 0.0f32..=0.5f32) {
        let normal = MapperConfig::new(deadzone, 1.5, false).unwrap();
        let inverted = normal.with_invert(true);
        prop_assert_eq!(map_axis(value, &inverted), -map_axis(value, &normal));
    }

    /// Clamping holds for both output directions.
    #[test]
    fn prop_range_clamped_either_direction(
        value in -100.0f32..100.0f32,
        a in -10.0f32..10.0f32,
        b in -10.0f32..10.0f32,
    ) {
        let out = map_range_clamped(value, 0.0, 1.0, a, b);
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        prop_assert!(out >= lo && out <= hi, "{out} outside [{lo}, {hi}]");
    }

    /// Lost tracking decays both axes toward zero at the constant-input rate.
    #[test]
    fn prop_tracking_loss_levels_out(
        alpha in 0.05f32..=1.0f32,
        x in 0.0f32..=1.0f32,
        y in 0.0f32..=1.0f32,
        lost_frames in 1i32..40,
    ) {
        let mut pipeline = ControlPipeline::new(PipelineSettings {
            smoothing_factor: alpha,
            deadzone: 0.05,
            sensitivity: 1.5,
            invert_pitch: false,
        })
        .unwrap();

        for _ in 0..10 {
            pipeline.process(x, y, true);
        }
        let roll0 = pipeline.roll();
        let pitch0 = pipeline.pitch();

        let mut frame = pipeline.process(x, y, false);
        for _ in 1..lost_frames {
            frame = pipeline.process(x, y, false);
        }

        let decay = (1.0 - alpha).powi(lost_frames);
        prop_assert!(!frame.tracking);
        prop_assert!((frame.roll - roll0 * decay).abs() < 1e-5);
        prop_assert!((frame.pitch - pitch0 * decay).abs() < 1e-5);
        prop_assert!(frame.roll.abs() <= roll0.abs() + 1e-6);
        prop_assert!(frame.pitch.abs() <= pitch0.abs() + 1e-6);
    }
}
