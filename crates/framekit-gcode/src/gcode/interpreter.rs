//! Modal interpreter
//!
//! Folds program lines over an explicit [`InterpreterState`]. Each line is a
//! pure transition `(state, line) -> (state', outcome)`, so the whole pass is
//! a fold with no hidden globals.

use framekit_core::{Point2D, UnitMode};
use serde::{Deserialize, Serialize};

use super::words::{modal_code, scan_line, ParsedWords};

/// Motion mode - Group 1 (G00, G01, G02, G03)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MotionMode {
    /// G00
    #[default]
    Rapid,
    /// G01
    Linear,
    /// G02
    ArcCw,
    /// G03
    ArcCcw,
}

/// Distance mode - Group 3 (G90, G91)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CoordMode {
    /// G90, targets are final positions
    #[default]
    Absolute,
    /// G91, targets are offsets from the current position
    Incremental,
}

/// Modal state carried from line to line
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct InterpreterState {
    /// Current XY position
    pub position: Point2D,
    pub motion_mode: MotionMode,
    pub coord_mode: CoordMode,
    /// Last unit mode the program selected, if any
    pub unit_mode: Option<UnitMode>,
}

/// Geometry of a resolved move
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MoveKind {
    Straight,
    Arc { center: Point2D, clockwise: bool },
}

/// A move with absolute endpoints
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedMove {
    pub start: Point2D,
    pub end: Point2D,
    pub kind: MoveKind,
}

/// What a single line did
#[derive(Debug, Clone, PartialEq)]
pub enum LineOutcome {
    /// Nothing left after removing the comment
    Blank,
    /// No X/Y target; modal state may have changed
    NoTarget { dropped: usize },
    /// A move that contributes to the frame
    Move {
        motion: ResolvedMove,
        dropped: usize,
    },
    /// An arc without both I and J; position still advanced to `end`
    SkippedArc { end: Point2D, dropped: usize },
}

impl LineOutcome {
    /// Number of words dropped as malformed on this line
    pub fn dropped(&self) -> usize {
        match self {
            Self::Blank => 0,
            Self::NoTarget { dropped }
            | Self::Move { dropped, .. }
            | Self::SkippedArc { dropped, .. } => *dropped,
        }
    }
}

impl InterpreterState {
    /// State at the start of a program: origin, G0, G90, no units
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one raw program line
    pub fn apply_line(self, line: &str) -> (Self, LineOutcome) {
        match scan_line(line) {
            Some(words) => self.apply_words(&words),
            None => (self, LineOutcome::Blank),
        }
    }

    /// Apply the words of one line
    pub fn apply_words(mut self, words: &ParsedWords) -> (Self, LineOutcome) {
        for &value in &words.g_codes {
            if let Some(code) = modal_code(value) {
                self.apply_gcode(code);
            }
        }

        if !words.has_target() {
            return (
                self,
                LineOutcome::NoTarget {
                    dropped: words.dropped,
                },
            );
        }

        let start = self.position;
        let end = self.resolve_target(words);
        self.position = end;

        let kind = match self.motion_mode {
            MotionMode::Rapid | MotionMode::Linear => MoveKind::Straight,
            MotionMode::ArcCw | MotionMode::ArcCcw => match words.arc_offsets() {
                // IJ offsets are always relative to the start, whatever G90/G91 says
                Some((i, j)) => MoveKind::Arc {
                    center: start.offset(i, j),
                    clockwise: self.motion_mode == MotionMode::ArcCw,
                },
                None => {
                    return (
                        self,
                        LineOutcome::SkippedArc {
                            end,
                            dropped: words.dropped,
                        },
                    )
                }
            },
        };

        (
            self,
            LineOutcome::Move {
                motion: ResolvedMove { start, end, kind },
                dropped: words.dropped,
            },
        )
    }

    fn apply_gcode(&mut self, code: u32) {
        match code {
            0 => self.motion_mode = MotionMode::Rapid,
            1 => self.motion_mode = MotionMode::Linear,
            2 => self.motion_mode = MotionMode::ArcCw,
            3 => self.motion_mode = MotionMode::ArcCcw,
            90 => self.coord_mode = CoordMode::Absolute,
            91 => self.coord_mode = CoordMode::Incremental,
            20 | 21 => self.unit_mode = UnitMode::from_gcode(code),
            _ => {}
        }
    }

    fn resolve_target(&self, words: &ParsedWords) -> Point2D {
        let current = self.position;
        match self.coord_mode {
            CoordMode::Absolute => {
                Point2D::new(words.x.unwrap_or(current.x), words.y.unwrap_or(current.y))
            }
            CoordMode::Incremental => {
                current.offset(words.x.unwrap_or(0.0), words.y.unwrap_or(0.0))
            }
        }
    }
}
