//! G-Code toolpath parsing
//!
//! This module provides:
//! - Line tokenizing into motion, mode, and slicer-comment records
//! - Machine state tracking (position, extrusion mode, layers)
//! - Feature classification of slicer type labels
//! - Segment building with bounding boxes, filters, and a segment cap
//! - Cooperative cancellation of long parses

pub mod builder;
pub mod cancel;
pub mod classifier;
pub(crate) mod state;
pub mod tokenizer;

pub use builder::*;
pub use cancel::CancelToken;
pub use classifier::classify_feature;
pub use tokenizer::{tokenize_line, GcodeLine, MotionWords};
