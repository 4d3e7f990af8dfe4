//! Collaborator interfaces
//!
//! A frame job never touches files, controllers or screens directly. It
//! reads the program through a [`ProgramSource`], asks a [`MachineState`] for
//! the current position and feed setting, and hands the outline to a
//! [`CommandSink`]. The implementations here cover files, fixed values and
//! plain writers; controller-backed implementations live with the controller.

use crate::error::{FrameError, Result};
use crate::position::Point2D;
use std::io::Write;
use std::path::PathBuf;
use tracing::debug;

/// Supplies the text of the loaded motion program
pub trait ProgramSource {
    /// Return the program text, or `FrameError::ProgramNotFound`
    fn read_program(&self) -> Result<String>;
}

/// Reports the live state of the machine
pub trait MachineState {
    /// Current XY position in the active coordinate frame
    fn position(&self) -> Result<Point2D>;

    /// Raw feed setting as entered by the operator; may be empty
    fn feed_setting(&self) -> String;
}

/// Receives the generated command list for execution
pub trait CommandSink {
    /// Dispatch the commands in order
    fn execute(&mut self, commands: &[String]) -> Result<()>;
}

/// Program read from a file on disk
#[derive(Debug, Clone)]
pub struct FileProgramSource {
    path: PathBuf,
}

impl FileProgramSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ProgramSource for FileProgramSource {
    fn read_program(&self) -> Result<String> {
        if !self.path.is_file() {
            return Err(FrameError::ProgramNotFound {
                location: self.path.display().to_string(),
            }
            .into());
        }
        debug!("Reading program from {}", self.path.display());
        Ok(std::fs::read_to_string(&self.path)?)
    }
}

/// Program held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryProgram {
    text: Option<String>,
}

impl InMemoryProgram {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }

    /// A source with nothing loaded
    pub fn empty() -> Self {
        Self { text: None }
    }
}

impl ProgramSource for InMemoryProgram {
    fn read_program(&self) -> Result<String> {
        self.text.clone().ok_or_else(|| {
            FrameError::ProgramNotFound {
                location: "<memory>".to_string(),
            }
            .into()
        })
    }
}

/// Machine state with fixed values, for offline runs and tests
#[derive(Debug, Clone, Default)]
pub struct StaticMachineState {
    pub position: Option<Point2D>,
    pub feed: String,
}

impl StaticMachineState {
    pub fn new(position: Point2D, feed: impl Into<String>) -> Self {
        Self {
            position: Some(position),
            feed: feed.into(),
        }
    }
}

impl MachineState for StaticMachineState {
    fn position(&self) -> Result<Point2D> {
        self.position.ok_or_else(|| {
            FrameError::PositionUnavailable {
                reason: "no position reported".to_string(),
            }
            .into()
        })
    }

    fn feed_setting(&self) -> String {
        self.feed.clone()
    }
}

/// Writes each command on its own line
pub struct WriterSink<W: Write> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> CommandSink for WriterSink<W> {
    fn execute(&mut self, commands: &[String]) -> Result<()> {
        for command in commands {
            writeln!(self.writer, "{}", command)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

/// Keeps every batch it receives
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub batches: Vec<Vec<String>>,
}

impl CommandSink for RecordingSink {
    fn execute(&mut self, commands: &[String]) -> Result<()> {
        self.batches.push(commands.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_program_not_found() {
        let source = FileProgramSource::new("/definitely/not/here.nc");
        let err = source.read_program().unwrap_err();
        assert!(err.is_program_not_found());
    }

    #[test]
    fn test_in_memory_program() {
        assert_eq!(InMemoryProgram::new("G0 X1").read_program().unwrap(), "G0 X1");
        assert!(InMemoryProgram::empty()
            .read_program()
            .unwrap_err()
            .is_program_not_found());
    }

    #[test]
    fn test_static_machine_state() {
        let state = StaticMachineState::new(Point2D::new(1.0, 2.0), "300");
        assert_eq!(state.position().unwrap(), Point2D::new(1.0, 2.0));
        assert_eq!(state.feed_setting(), "300");

        let unknown = StaticMachineState::default();
        assert!(unknown.position().is_err());
    }

    #[test]
    fn test_writer_sink_writes_lines() {
        let mut sink = WriterSink::new(Vec::new());
        sink.execute(&["G90".to_string(), "M30".to_string()])
            .unwrap();
        assert_eq!(String::from_utf8(sink.into_inner()).unwrap(), "G90\nM30\n");
    }
}
