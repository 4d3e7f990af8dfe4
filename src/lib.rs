//! # Framekit
//!
//! Computes the XY frame of a G-code program and traces it as a rectangular
//! outline, so an operator can check where a job will cut before running it.
//!
//! ## Architecture
//!
//! Framekit is organized as a workspace with multiple crates:
//!
//! 1. **framekit-core** - Errors, units, points and collaborator traits
//! 2. **framekit-gcode** - Word scanner, modal interpreter, frame and outline
//! 3. **framekit-settings** - Persisted frame job configuration
//! 4. **framekit** - Frame job and command-line binary
//!
//! ## Quick start
//!
//! ```
//! use framekit::compute_frame;
//!
//! let frame = compute_frame("G21\nG0 X5 Y0\nG3 X0 Y5 I-5 J0");
//! assert_eq!(frame.bounds.max.x, 5.0);
//! assert_eq!(frame.outline().commands[0], "G21");
//! ```

pub mod job;

pub use framekit_core::{
    convert_feed_rate, unit_label, CommandSink, Error, FeedRateUnits, FileProgramSource, FrameError,
    InMemoryProgram, MachineState, Point2D, ProgramSource, RecordingSink, Result,
    StaticMachineState, UnitMode, WriterSink,
};
pub use framekit_gcode::{
    calculate_frame_and_outline, compute_frame, BoundingBox, Frame, FrameCalculator, FrameStats,
    Outline,
};
pub use framekit_settings::{Config, FrameSettings, SettingsError};
pub use job::{run, FrameJob, FrameJobReport};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

/// Initialize logging
///
/// Sets up structured logging with:
/// - Output on stderr so stdout carries only commands
/// - RUST_LOG environment variable support, `warn` when unset
pub fn init_logging(format: LogFormat) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::WARN.into())
        .from_env_lossy();

    match format {
        LogFormat::Text => {
            let fmt_layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_level(true)
                .with_line_number(true);

            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .try_init()?;
        }
        LogFormat::Json => {
            let fmt_layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .json();

            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .try_init()?;
        }
    }

    Ok(())
}
