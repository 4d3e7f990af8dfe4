//! Frame calculation
//!
//! One linear pass over a program: interpret each line, fold every resolved
//! move into the bounding box, and count what had to be skipped. The pass is
//! deterministic and never fails; problems on a line are logged and the line
//! contributes nothing.

use framekit_core::{Point2D, UnitMode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, trace, warn};

use super::bounds::BoundingBox;
use super::interpreter::{InterpreterState, LineOutcome, MoveKind};
use super::outline::Outline;

/// Conditions recovered during a frame pass
///
/// None of these stop the pass. They are reported through logging and
/// [`FrameStats`] only.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FrameIssue {
    /// A word carried a number that is not a finite value
    #[error("Malformed words dropped at line {line_number}: {count}")]
    MalformedLine { line_number: usize, count: usize },

    /// An arc lacked I or J (radius-form arcs are not supported)
    #[error("Arc without I/J offsets skipped at line {line_number}")]
    UnsupportedArcForm { line_number: usize },

    /// The program never moved in X or Y
    #[error("Program contains no XY movement")]
    NoMovement,
}

/// Counters collected during a frame pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameStats {
    /// Lines read, including blank ones
    pub lines: usize,
    /// Moves folded into the bounds
    pub moves: usize,
    /// Of those, arcs
    pub arcs: usize,
    /// Arcs skipped for lacking I/J
    pub skipped_arcs: usize,
    /// Words dropped as malformed
    pub dropped_words: usize,
}

/// Result of a frame pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Finalized bounds; `(0,0)-(0,0)` when nothing moved
    pub bounds: BoundingBox,
    /// Last unit mode the program selected
    pub unit_mode: Option<UnitMode>,
    pub stats: FrameStats,
}

impl Frame {
    /// Outline traversal of this frame
    pub fn outline(&self) -> Outline {
        Outline::for_bounds(&self.bounds, self.unit_mode)
    }

    /// True when no move contributed to the bounds
    pub fn is_degenerate(&self) -> bool {
        self.stats.moves == 0
    }
}

/// Incremental frame calculator
///
/// Feed it lines in program order, then call [`FrameCalculator::finish`].
#[derive(Debug, Clone, Default)]
pub struct FrameCalculator {
    state: InterpreterState,
    bounds: BoundingBox,
    stats: FrameStats,
}

impl FrameCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Calculator whose interpreter starts at `position` instead of the origin
    pub fn starting_at(position: Point2D) -> Self {
        Self {
            state: InterpreterState {
                position,
                ..InterpreterState::new()
            },
            ..Self::default()
        }
    }

    /// Process one line
    pub fn feed_line(&mut self, line: &str) {
        self.stats.lines += 1;
        let line_number = self.stats.lines;

        let (next, outcome) = self.state.apply_line(line);
        self.state = next;

        let dropped = outcome.dropped();
        if dropped > 0 {
            self.stats.dropped_words += dropped;
            warn!(
                "{}",
                FrameIssue::MalformedLine {
                    line_number,
                    count: dropped
                }
            );
        }

        match outcome {
            LineOutcome::Move { motion, .. } => {
                trace!(
                    "Line {}: {:?} from {} to {}",
                    line_number,
                    motion.kind,
                    motion.start,
                    motion.end
                );
                if matches!(motion.kind, MoveKind::Arc { .. }) {
                    self.stats.arcs += 1;
                }
                self.stats.moves += 1;
                self.bounds.include_move(&motion);
            }
            LineOutcome::SkippedArc { .. } => {
                self.stats.skipped_arcs += 1;
                warn!("{}", FrameIssue::UnsupportedArcForm { line_number });
            }
            LineOutcome::Blank | LineOutcome::NoTarget { .. } => {}
        }
    }

    /// Finalize the bounds and return the frame
    pub fn finish(self) -> Frame {
        if self.bounds.is_empty() {
            debug!("{}", FrameIssue::NoMovement);
        }

        let frame = Frame {
            bounds: self.bounds.finalize(),
            unit_mode: self.state.unit_mode,
            stats: self.stats,
        };

        debug!(
            "Frame complete: lines={}, moves={}, arcs={}, skipped_arcs={}, bounds=[{} - {}]",
            frame.stats.lines,
            frame.stats.moves,
            frame.stats.arcs,
            frame.stats.skipped_arcs,
            frame.bounds.min,
            frame.bounds.max
        );
        frame
    }
}

/// Compute the frame of a whole program
pub fn compute_frame(program: &str) -> Frame {
    debug!("Computing frame, input size: {} bytes", program.len());
    let mut calculator = FrameCalculator::new();
    for line in program.lines() {
        calculator.feed_line(line);
    }
    calculator.finish()
}

/// Outline of a program's frame and the unit mode it declared
pub fn calculate_frame_and_outline(program: &str) -> (Outline, Option<UnitMode>) {
    let frame = compute_frame(program);
    (frame.outline(), frame.unit_mode)
}
