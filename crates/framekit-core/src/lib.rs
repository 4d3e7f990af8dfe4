//! # Framekit Core
//!
//! Core types, traits, and utilities for framekit.
//! Provides the error taxonomy, unit handling, planar points and the
//! collaborator traits through which a frame job reaches the outside world.

pub mod error;
pub mod machine;
pub mod position;
pub mod units;

pub use error::{Error, FrameError, Result};
pub use machine::{
    CommandSink, FileProgramSource, InMemoryProgram, MachineState, ProgramSource, RecordingSink,
    StaticMachineState, WriterSink,
};
pub use position::Point2D;
pub use units::{convert_feed_rate, unit_label, FeedRateUnits, UnitMode};
