//! # Hand Pilot
//!
//! Turn a tracked hand position into smoothed roll/pitch control axes and
//! stream them to a flight simulator over UDP.
//!
//! Hand samples arrive on stdin, one per line (`<x> <y> [tracking]`), from
//! whatever process runs hand detection.

use std::io::{self, BufRead};
use std::path::PathBuf;
use std::thread;

use anyhow::{anyhow, bail, Context, Result};
use tokio::sync::{oneshot, watch};
use tokio::time::{interval, Duration, Instant, MissedTickBehavior};
use tracing::{error, info, warn};

use hand_pilot::config::Config;
use hand_pilot::control::pipeline::ControlPipeline;
use hand_pilot::control::ControlFrame;
use hand_pilot::source::{parse_sample_line, HandSample};
use hand_pilot::telemetry::listener::TelemetryListener;
use hand_pilot::telemetry::TelemetryTransport;

/// Seconds between status log messages
const STATUS_LOG_INTERVAL_SECS: u64 = 10;

/// Latest sample from the reader task and when it arrived
type TimedSample = Option<(HandSample, Instant)>;

/// What the binary should do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Run the frame loop
    Run,
    /// Network preflight check
    Check,
    /// Print received telemetry
    Listen,
}

/// Main entry point for Hand Pilot
///
/// # Usage
///
/// ```text
/// hand-pilot [--check | --listen] [CONFIG]
/// ```
///
/// Without a config path the built-in defaults are used (UDP to
/// 127.0.0.1:5005, 60 Hz frame loop).
///
/// # Control Flow
///
/// 1. **Initialization**
///    - Set up logging with tracing subscriber
///    - Load configuration
///    - Build the control pipeline and open the UDP transport
///
/// 2. **Main Loop**
///    - Read samples from stdin on a dedicated reader thread
///    - Every tick, process the latest sample and send one packet
///    - Samples older than `tracking_timeout_ms` count as lost tracking
///
/// 3. **Graceful Shutdown**
///    - Ctrl+C or end of stdin stops the loop
///    - The socket is closed and packet counters are logged
#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Hand Pilot v{} starting...", env!("CARGO_PKG_VERSION"));

    let (mode, config_path) = parse_args(std::env::args().skip(1))?;
    let config = match config_path {
        Some(path) => Config::load(&path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => {
            info!("No configuration file given, using defaults");
            Config::default()
        }
    };

    match mode {
        Mode::Run => run(&config).await,
        Mode::Check => check_network(&config),
        Mode::Listen => listen(&config).await,
    }
}

/// Parses `[--check | --listen] [CONFIG]`
fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<(Mode, Option<PathBuf>)> {
    let mut mode = Mode::Run;
    let mut path = None;

    for arg in args {
        match arg.as_str() {
            "--check" if mode == Mode::Run => mode = Mode::Check,
            "--listen" if mode == Mode::Run => mode = Mode::Listen,
            "--check" | "--listen" => bail!("--check and --listen cannot be combined"),
            flag if flag.starts_with("--") => bail!("Unknown option: {}", flag),
            _ if path.is_none() => path = Some(PathBuf::from(arg)),
            _ => bail!("Unexpected argument: {}", arg),
        }
    }

    Ok((mode, path))
}

/// Runs the frame loop until Ctrl+C or end of input
async fn run(config: &Config) -> Result<()> {
    let mut pipeline = ControlPipeline::new(config.pipeline_settings())?;
    let mut transport = TelemetryTransport::open(&config.destination()?, config.transport_options())?;

    let (tx, rx) = watch::channel::<TimedSample>(None);
    let mut reader = spawn_sample_reader(tx)?;

    let rate = config.source.frame_rate_hz;
    let tracking_timeout = Duration::from_millis(config.source.tracking_timeout_ms);
    let mut frame_interval = interval(Duration::from_secs_f64(1.0 / f64::from(rate)));
    frame_interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let log_interval_frames = u64::from(rate) * STATUS_LOG_INTERVAL_SECS;
    let mut frame_count: u64 = 0;
    let mut last_frame = ControlFrame::neutral();

    info!("Starting control loop at {}Hz, reading samples from stdin", rate);
    info!("Press Ctrl+C to exit");

    loop {
        tokio::select! {
            _ = frame_interval.tick() => {
                let sample = current_sample(*rx.borrow(), Instant::now(), tracking_timeout);
                let frame = pipeline.process_sample(sample);
                transport.send(&frame);

                if frame.tracking != last_frame.tracking {
                    info!("Tracking {}", if frame.tracking { "acquired" } else { "lost, auto-leveling" });
                }
                last_frame = frame;
                frame_count += 1;

                if is_status_frame(frame_count, log_interval_frames) {
                    info!(
                        "Processed {} frames (roll {:+.3}, pitch {:+.3})",
                        frame_count, frame.roll, frame.pitch
                    );
                }
            }

            result = &mut reader => {
                match result {
                    Ok(Ok(())) => info!("Sample input closed, shutting down..."),
                    Ok(Err(e)) => warn!("Sample input failed: {}", e),
                    Err(_) => warn!("Sample reader thread ended unexpectedly"),
                }
                break;
            }

            // Handle Ctrl+C for graceful shutdown. A reader blocked on stdin
            // is left behind and ends with the process.
            _ = tokio::signal::ctrl_c() => {
                info!("Received Ctrl+C, shutting down...");
                break;
            }
        }
    }

    let stats = transport.close();
    info!(
        "Total frames processed: {} ({} packets sent, {} full-buffer drops, {} invalid, {} errors)",
        frame_count, stats.sent, stats.dropped_backpressure, stats.dropped_invalid, stats.failed
    );

    Ok(())
}

/// Starts the stdin reader on its own OS thread.
///
/// The returned receiver completes when input ends or fails.
fn spawn_sample_reader(tx: watch::Sender<TimedSample>) -> Result<oneshot::Receiver<io::Result<()>>> {
    let (done_tx, done_rx) = oneshot::channel();

    thread::Builder::new()
        .name("sample-reader".to_string())
        .spawn(move || {
            let result = read_samples(io::stdin().lock(), &tx);
            // The frame loop may already be gone
            let _ = done_tx.send(result);
        })
        .context("Failed to start sample reader thread")?;

    Ok(done_rx)
}

/// Reads sample lines and publishes the latest one
fn read_samples<R: BufRead>(input: R, tx: &watch::Sender<TimedSample>) -> io::Result<()> {
    for line in input.lines() {
        let line = line?;
        match parse_sample_line(&line) {
            Ok(Some(sample)) => {
                tx.send_replace(Some((sample, Instant::now())));
            }
            Ok(None) => {}
            Err(e) => warn!("Skipping sample: {}", e),
        }
    }

    Ok(())
}

/// Whether this frame emits a periodic status line
fn is_status_frame(frame_count: u64, log_interval_frames: u64) -> bool {
    log_interval_frames > 0 && frame_count % log_interval_frames == 0
}

/// Sample to process this frame. Missing or stale input counts as lost tracking.
fn current_sample(latest: TimedSample, now: Instant, tracking_timeout: Duration) -> HandSample {
    match latest {
        Some((sample, received)) if now.duration_since(received) <= tracking_timeout => sample,
        _ => HandSample::lost(),
    }
}

/// Opens the transport and sends one neutral frame
fn check_network(config: &Config) -> Result<()> {
    let destination = config.destination()?;
    let mut transport = TelemetryTransport::open(&destination, config.transport_options())
        .with_context(|| format!("Network check failed: cannot open socket for {}", destination))?;

    transport.send(&ControlFrame::neutral());
    let stats = transport.close();

    if stats.sent == 1 {
        info!("Network check OK: UDP socket ready, target {}", destination);
        Ok(())
    } else {
        error!("Network check failed: test packet to {} was not sent", destination);
        Err(anyhow!("test packet to {} was not sent", destination))
    }
}

/// Prints telemetry packets received on the configured address
async fn listen(config: &Config) -> Result<()> {
    let addr = config.destination()?.resolve()?;
    let mut listener = TelemetryListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind listener on {}", addr))?;

    info!("Listening for telemetry on {}", listener.local_addr()?);
    info!("Press Ctrl+C to exit");

    loop {
        tokio::select! {
            received = listener.recv() => {
                match received? {
                    (Ok(packet), from) => info!(
                        "{} roll={:+.3} pitch={:+.3} active={}",
                        from, packet.roll, packet.pitch, packet.active
                    ),
                    (Err(e), from) => warn!("Malformed packet from {}: {}", from, e),
                }
            }

            _ = tokio::signal::ctrl_c() => {
                info!("Received Ctrl+C, shutting down...");
                break;
            }
        }
    }

    Ok(())
}
