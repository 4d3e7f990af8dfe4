//! Frame job
//!
//! Reads the loaded program, computes its frame, annotates the outline with
//! the operator's feed, appends the closing commands and hands the result to
//! the execution sink.

use framekit_core::{
    convert_feed_rate, CommandSink, Error, FrameError, MachineState, Point2D, ProgramSource, Result,
};
use framekit_gcode::{compute_frame, format_coord, Frame};
use framekit_settings::FrameSettings;
use serde::Serialize;
use tracing::{debug, info, warn};

/// What a frame job produced
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameJobReport {
    pub frame: Frame,
    /// Machine position the job started from
    pub start: Point2D,
    /// Feed used for the outline, in program units per minute
    pub feed_rate: f64,
    /// Commands handed to the sink, in order
    pub commands: Vec<String>,
}

/// Frames programs with a fixed set of settings
#[derive(Debug, Clone, Default)]
pub struct FrameJob {
    settings: FrameSettings,
}

impl FrameJob {
    pub fn new(settings: FrameSettings) -> Self {
        Self { settings }
    }

    /// Frame the program from `source` and send the outline to `sink`
    pub fn run<S, M, K>(&self, source: &S, machine: &M, sink: &mut K) -> Result<FrameJobReport>
    where
        S: ProgramSource + ?Sized,
        M: MachineState + ?Sized,
        K: CommandSink + ?Sized,
    {
        let program = source.read_program()?;
        let start = machine.position().map_err(|e| match e {
            Error::Frame(err) => Error::Frame(err),
            other => FrameError::PositionUnavailable {
                reason: other.to_string(),
            }
            .into(),
        })?;
        let feed_text = machine.feed_setting();

        let frame = compute_frame(&program);
        if frame.is_degenerate() {
            warn!("Program has no XY movement, outline collapses to a point");
        }
        let (feed_rate, commands) = self.compose(&frame, start, &feed_text)?;

        sink.execute(&commands).map_err(|e| match e {
            Error::Frame(err) => Error::Frame(err),
            other => FrameError::Execution {
                reason: other.to_string(),
            }
            .into(),
        })?;

        info!(
            "Framed program: {} x {} at F{:.1}, {} commands sent",
            format_coord(frame.bounds.width()),
            format_coord(frame.bounds.height()),
            feed_rate,
            commands.len()
        );

        Ok(FrameJobReport {
            frame,
            start,
            feed_rate,
            commands,
        })
    }

    /// Outline commands for `frame` plus the closing sequence
    ///
    /// Returns the feed used for the outline along with the commands.
    pub fn compose(
        &self,
        frame: &Frame,
        start: Point2D,
        feed_text: &str,
    ) -> Result<(f64, Vec<String>)> {
        let original = feed_text.trim();
        let entered = self.resolve_feed(original)?;
        let feed_rate = convert_feed_rate(entered, self.settings.feed_units, frame.unit_mode);
        debug!(
            "Feed {} {} becomes {:.1} for program units",
            entered, self.settings.feed_units, feed_rate
        );

        let mut commands: Vec<String> = frame
            .outline()
            .commands
            .into_iter()
            .map(|command| match command.strip_prefix("G1 ") {
                Some(target) => format!("G1 F{:.1} {}", feed_rate, target),
                None => command,
            })
            .collect();

        if self.settings.return_to_start {
            commands.push(format!(
                "G0 X{} Y{}",
                format_coord(start.x),
                format_coord(start.y)
            ));
        }

        if let Some(restore_macro) = &self.settings.restore_feed_macro {
            if !original.is_empty() {
                commands.push(format!(
                    "#{}={} {}",
                    self.settings.restore_feed_parameter, original, restore_macro
                ));
            }
        }

        if self.settings.end_program {
            commands.push("M30".to_string());
        }

        Ok((feed_rate, commands))
    }

    /// Empty text selects the configured default
    fn resolve_feed(&self, text: &str) -> Result<f64> {
        if text.is_empty() {
            return Ok(self.settings.default_feed_rate);
        }

        text.parse::<f64>()
            .ok()
            .filter(|value| value.is_finite() && *value > 0.0)
            .ok_or_else(|| {
                FrameError::InvalidFeedRate {
                    value: text.to_string(),
                }
                .into()
            })
    }
}

/// Run a frame job with `settings`
pub fn run<S, M, K>(
    source: &S,
    machine: &M,
    sink: &mut K,
    settings: &FrameSettings,
) -> Result<FrameJobReport>
where
    S: ProgramSource + ?Sized,
    M: MachineState + ?Sized,
    K: CommandSink + ?Sized,
{
    FrameJob::new(settings.clone()).run(source, machine, sink)
}
