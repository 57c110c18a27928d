//! # Hand Pilot Library
//!
//! Turn a tracked hand position into smoothed roll/pitch control axes and
//! stream them to a flight simulator over UDP.
//!
//! This library provides the signal-conditioning pipeline (smoothing,
//! deadzone, sensitivity, clamping, inversion, auto-leveling) and the
//! non-blocking telemetry transport. Hand detection and rendering live
//! outside this crate.

pub mod config;
pub mod error;
pub mod control;
pub mod source;
pub mod telemetry;
