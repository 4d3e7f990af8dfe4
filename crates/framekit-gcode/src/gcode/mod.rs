//! G-code interpretation and framing
//!
//! This module provides:
//! - Tolerant word scanning
//! - Modal state tracking and target resolution
//! - Bounding-box accumulation with true arc extents
//! - Outline emission
//! - The single-pass frame calculation tying them together

pub mod bounds;
pub mod frame;
pub mod interpreter;
pub mod outline;
pub mod words;

pub use bounds::*;
pub use frame::*;
pub use interpreter::*;
pub use outline::*;
pub use words::*;
