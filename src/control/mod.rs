//! # Control Module
//!
//! Signal conditioning from a raw hand position to control axes.
//!
//! This module handles:
//! - Exponential smoothing per axis
//! - Deadzone, sensitivity and range mapping
//! - Pitch inversion
//! - Auto-leveling when tracking is lost

pub mod filter;
pub mod mapper;
pub mod pipeline;

pub use filter::AxisFilter;
pub use mapper::{map_axis, MapperConfig};
pub use pipeline::{ControlFrame, ControlPipeline, PipelineSettings};
