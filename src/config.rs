//! # Configuration Module
//!
//! Handles loading and validating configuration from TOML files.

use serde::de::Error;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::control::pipeline::PipelineSettings;
use crate::error::{HandPilotError, Result};
use crate::telemetry::transport::{TelemetryDestination, TransportOptions};

/// Main configuration structure
#[derive(Debug, Default, Deserialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub flight: FlightConfig,
    #[serde(default)]
    pub source: SourceConfig,
}

/// Telemetry destination configuration
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct NetworkConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u32,

    #[serde(default)]
    pub debug_packets: bool,
}

/// Flight handling configuration
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct FlightConfig {
    #[serde(default = "default_smoothing_factor")]
    pub smoothing_factor: f32,

    #[serde(default = "default_deadzone")]
    pub deadzone: f32,

    #[serde(default = "default_sensitivity")]
    pub sensitivity: f32,

    #[serde(default)]
    pub invert_pitch: bool,
}

/// Sample source (frame loop) configuration
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SourceConfig {
    #[serde(default = "default_frame_rate_hz")]
    pub frame_rate_hz: u32,

    #[serde(default = "default_tracking_timeout_ms")]
    pub tracking_timeout_ms: u64,
}

// Default value functions
fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u32 { 5005 }

fn default_smoothing_factor() -> f32 { 0.15 }
fn default_deadzone() -> f32 { 0.12 }
fn default_sensitivity() -> f32 { 1.6 }

fn default_frame_rate_hz() -> u32 { 60 }
fn default_tracking_timeout_ms() -> u64 { 250 }

/// Upper bound for the sensitivity multiplier
const MAX_SENSITIVITY: f32 = 10.0;

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            debug_packets: false,
        }
    }
}

impl Default for FlightConfig {
    fn default() -> Self {
        Self {
            smoothing_factor: default_smoothing_factor(),
            deadzone: default_deadzone(),
            sensitivity: default_sensitivity(),
            invert_pitch: false,
        }
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            frame_rate_hz: default_frame_rate_hz(),
            tracking_timeout_ms: default_tracking_timeout_ms(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    ///
    /// * `Result<Config>` - Loaded and validated configuration
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - TOML parsing fails
    /// - Validation fails
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use hand_pilot::config::Config;
    ///
    /// let config = Config::load("config/default.toml")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse and validate configuration from a TOML string
    ///
    /// # Errors
    ///
    /// Returns error if parsing or validation fails
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Tuning values for the control pipeline
    #[must_use]
    pub fn pipeline_settings(&self) -> PipelineSettings {
        PipelineSettings {
            smoothing_factor: self.flight.smoothing_factor,
            deadzone: self.flight.deadzone,
            sensitivity: self.flight.sensitivity,
            invert_pitch: self.flight.invert_pitch,
        }
    }

    /// Telemetry destination
    ///
    /// # Errors
    ///
    /// Returns error if the host is empty or the port is out of range
    pub fn destination(&self) -> Result<TelemetryDestination> {
        TelemetryDestination::new(self.network.host.clone(), self.network.port)
    }

    /// Telemetry transport options
    #[must_use]
    pub fn transport_options(&self) -> TransportOptions {
        TransportOptions {
            debug_packets: self.network.debug_packets,
        }
    }

    /// Validate configuration values
    ///
    /// # Returns
    ///
    /// * `Result<()>` - Ok if valid, Err if invalid
    ///
    /// # Errors
    ///
    /// Returns error if any configuration value is out of valid range
    pub fn validate(&self) -> Result<()> {
        // Validate network configuration
        if self.network.host.trim().is_empty() {
            return Err(invalid("network host cannot be empty"));
        }

        if self.network.port == 0 || self.network.port > 65535 {
            return Err(invalid("port must be between 1 and 65535"));
        }

        // Validate flight handling. Alpha 0.0 would freeze the controls.
        if !(self.flight.smoothing_factor > 0.0 && self.flight.smoothing_factor <= 1.0) {
            return Err(invalid("smoothing_factor must be greater than 0.0 and at most 1.0"));
        }

        if !(0.0..=0.5).contains(&self.flight.deadzone) {
            return Err(invalid("deadzone must be between 0.0 and 0.5"));
        }

        if !(1.0..=MAX_SENSITIVITY).contains(&self.flight.sensitivity) {
            return Err(invalid(&format!(
                "sensitivity must be between 1.0 and {}",
                MAX_SENSITIVITY
            )));
        }

        // Validate frame loop timing
        if self.source.frame_rate_hz == 0 || self.source.frame_rate_hz > 240 {
            return Err(invalid("frame_rate_hz must be between 1 and 240"));
        }

        if self.source.tracking_timeout_ms == 0 || self.source.tracking_timeout_ms > 10000 {
            return Err(invalid("tracking_timeout_ms must be between 1 and 10000"));
        }

        Ok(())
    }
}

fn invalid(msg: &str) -> HandPilotError {
    HandPilotError::Config(toml::de::Error::custom(msg))
}
