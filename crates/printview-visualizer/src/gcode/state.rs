//! Machine state tracking
//!
//! Folds tokenized lines into position, extrusion, feature, and layer state
//! for the duration of one parse.

use printview_core::constants::EXTRUSION_EPSILON;
use printview_core::{FeatureType, Point3};

use super::classifier::classify_feature;
use super::tokenizer::GcodeLine;

/// Kind of a position-changing move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MoveKind {
    Extrusion,
    Travel,
}

/// A move that changed the tool position
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Motion {
    pub start: Point3,
    pub end: Point3,
    pub kind: MoveKind,
}

/// Mutable machine state, owned by a single parse
#[derive(Debug, Clone)]
pub(crate) struct MachineState {
    pub position: Point3,
    pub extrusion_absolute: bool,
    pub extrusion_accumulator: f64,
    pub current_feature: FeatureType,
    pub current_layer: u32,
    pub max_layer_seen: u32,
}

impl Default for MachineState {
    fn default() -> Self {
        Self {
            position: Point3::ORIGIN,
            extrusion_absolute: true,
            extrusion_accumulator: 0.0,
            current_feature: FeatureType::Other,
            current_layer: 0,
            max_layer_seen: 0,
        }
    }
}

impl MachineState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one line. Returns the move when the position changed.
    pub fn apply(&mut self, line: &GcodeLine<'_>) -> Option<Motion> {
        match *line {
            GcodeLine::ExtrusionMode { absolute } => {
                self.extrusion_absolute = absolute;
                None
            }
            GcodeLine::FeatureType(label) => {
                self.current_feature = classify_feature(label);
                None
            }
            GcodeLine::LayerZ(z) => {
                self.position.z = z;
                None
            }
            GcodeLine::LayerNumber(layer) => {
                self.max_layer_seen = self.max_layer_seen.max(layer);
                self.current_layer = self.current_layer.max(layer);
                None
            }
            GcodeLine::LayerChange => {
                // Only numbered directives raise the layer maximum
                self.current_layer = self.current_layer.saturating_add(1);
                None
            }
            GcodeLine::SetPosition(words) => {
                self.position = Point3::new(
                    words.x.unwrap_or(self.position.x),
                    words.y.unwrap_or(self.position.y),
                    words.z.unwrap_or(self.position.z),
                );
                if let Some(e) = words.e {
                    self.extrusion_accumulator = e;
                }
                None
            }
            GcodeLine::Motion { words, .. } => {
                let start = self.position;
                let end = Point3::new(
                    words.x.unwrap_or(start.x),
                    words.y.unwrap_or(start.y),
                    words.z.unwrap_or(start.z),
                );

                let delta_e = match words.e {
                    Some(e) if self.extrusion_absolute => {
                        let delta = e - self.extrusion_accumulator;
                        self.extrusion_accumulator = e;
                        delta
                    }
                    Some(e) => e,
                    None => 0.0,
                };

                // Position always follows the line, whatever happens to the move later
                self.position = end;

                if start == end {
                    return None;
                }

                let kind = if delta_e > EXTRUSION_EPSILON {
                    MoveKind::Extrusion
                } else {
                    MoveKind::Travel
                };
                Some(Motion { start, end, kind })
            }
            GcodeLine::Empty | GcodeLine::Comment | GcodeLine::Unrecognized => None,
        }
    }
}
