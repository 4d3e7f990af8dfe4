//! # Framekit G-code
//!
//! Interprets G-code programs to find the XY frame of every move and emits a
//! rectangular outline of that frame.
//! Includes the word scanner, modal interpreter, bounding-box accumulator and
//! outline emitter.

pub mod gcode;

pub use gcode::{
    calculate_frame_and_outline, compute_frame, format_coord, scan_line, BoundingBox, CoordMode,
    Frame, FrameCalculator, FrameIssue, FrameStats, InterpreterState, LineOutcome, MotionMode,
    MoveKind, Outline, ParsedWords, ResolvedMove,
};
