//! Segment building and the parse entry points
//!
//! One forward pass over the text: every line is tokenized and folded into
//! the machine state, and each move that changes position is routed into a
//! per-feature segment bucket after the length, layer-window, and cap
//! filters. Two bounding boxes are accumulated along the way.

use printview_core::constants::{MAX_BYTES, MAX_SEGMENTS, MIN_SEG_LEN};
use printview_core::{Aabb, FeatureType, ParseError, Segment};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use super::cancel::CancelToken;
use super::state::{MachineState, Motion, MoveKind};
use super::tokenizer::tokenize_line;
use crate::visualizer::bounds::BoundsAccumulator;

/// Options controlling which moves become segments
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParseOptions {
    /// Keep only the most recent N layers; `None` keeps everything
    pub layer_window: Option<u32>,
    /// Minimum planar length of a retained extrusion segment (mm)
    pub min_seg_len: f64,
    /// Hard cap on accepted segments across all buckets
    pub max_segments: usize,
    /// Largest input accepted (bytes)
    pub max_bytes: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            layer_window: None,
            min_seg_len: MIN_SEG_LEN,
            max_segments: MAX_SEGMENTS,
            max_bytes: MAX_BYTES,
        }
    }
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the layer window from a `last` option value.
    ///
    /// Zero, negative, or non-finite values disable windowing.
    pub fn with_last(mut self, last: f64) -> Self {
        self.layer_window = layer_window_from_last(last);
        self
    }

    pub fn with_min_seg_len(mut self, min_seg_len: f64) -> Self {
        self.min_seg_len = min_seg_len;
        self
    }

    pub fn with_max_segments(mut self, max_segments: usize) -> Self {
        self.max_segments = max_segments;
        self
    }

    pub fn with_max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    /// Whether the layer window keeps `layer`, given the highest layer seen so far
    pub fn keeps_layer(&self, layer: u32, max_layer_seen: u32) -> bool {
        match self.layer_window {
            None => true,
            Some(window) => u64::from(layer) + u64::from(window) > u64::from(max_layer_seen),
        }
    }
}

/// Convert a `last` option value into a layer window
pub fn layer_window_from_last(last: f64) -> Option<u32> {
    if !last.is_finite() || last <= 0.0 {
        return None;
    }
    Some((last.floor() as u32).max(1))
}

/// Segments grouped by feature, each in source order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SegmentBuckets {
    buckets: [Vec<Segment>; FeatureType::COUNT],
}

impl SegmentBuckets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, feature: FeatureType) -> &[Segment] {
        &self.buckets[feature.index()]
    }

    pub fn push(&mut self, feature: FeatureType, segment: Segment) {
        self.buckets[feature.index()].push(segment);
    }

    /// Total segments across all buckets
    pub fn total(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Vec::is_empty)
    }

    /// Buckets in declaration order, including empty ones
    pub fn iter(&self) -> impl Iterator<Item = (FeatureType, &[Segment])> + '_ {
        FeatureType::ALL
            .into_iter()
            .map(move |feature| (feature, self.get(feature)))
    }
}

impl Serialize for SegmentBuckets {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(FeatureType::COUNT))?;
        for (feature, segments) in self.iter() {
            map.serialize_entry(&feature, segments)?;
        }
        map.end()
    }
}

/// Counters gathered during a parse
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ParseStats {
    /// Lines consumed
    pub lines: usize,
    /// Moves that changed position and extruded
    pub extrusion_moves: usize,
    /// Moves that changed position without extruding
    pub travel_moves: usize,
    /// Extrusion moves dropped by the minimum length filter
    pub short_segments: usize,
    /// Moves dropped by the layer window.
    ///
    /// The window is checked against the running layer maximum, and the
    /// current layer never falls below it, so a single forward parse keeps
    /// every move and this stays 0.
    pub windowed_out: usize,
    /// Moves dropped after the segment cap was reached
    pub capped: usize,
}

/// Immutable outcome of one parse
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParseResult {
    pub segments_by_feature: SegmentBuckets,
    /// Every extrusion move, model or not
    pub bbox_all: Aabb,
    /// Extrusion moves of model features only
    pub bbox_model: Aabb,
    pub max_layer: u32,
    /// Set when the segment cap truncated the output
    pub clipped: bool,
    pub stats: ParseStats,
}

impl ParseResult {
    pub fn segments(&self, feature: FeatureType) -> &[Segment] {
        self.segments_by_feature.get(feature)
    }

    pub fn segment_count(&self) -> usize {
        self.segments_by_feature.total()
    }
}

/// Routes moves into buckets and accumulates bounds
#[derive(Debug, Clone)]
struct SegmentBuilder {
    options: ParseOptions,
    buckets: SegmentBuckets,
    bbox_all: BoundsAccumulator,
    bbox_model: BoundsAccumulator,
    accepted: usize,
    clipped: bool,
    stats: ParseStats,
}

impl SegmentBuilder {
    fn new(options: ParseOptions) -> Self {
        Self {
            options,
            buckets: SegmentBuckets::new(),
            bbox_all: BoundsAccumulator::new(),
            bbox_model: BoundsAccumulator::new(),
            accepted: 0,
            clipped: false,
            stats: ParseStats::default(),
        }
    }

    fn record(&mut self, motion: Motion, state: &MachineState) {
        let segment = Segment::new(motion.start, motion.end, state.current_layer);

        match motion.kind {
            MoveKind::Extrusion => {
                self.stats.extrusion_moves += 1;

                // Boxes reflect true machine travel, so they ignore the length filter
                self.bbox_all.include_segment(motion.start, motion.end);
                if state.current_feature.is_model() {
                    self.bbox_model.include_segment(motion.start, motion.end);
                }

                if segment.planar_length() < self.options.min_seg_len {
                    self.stats.short_segments += 1;
                    return;
                }
                self.accept(state.current_feature, segment, state.max_layer_seen);
            }
            MoveKind::Travel => {
                self.stats.travel_moves += 1;
                self.accept(FeatureType::Travel, segment, state.max_layer_seen);
            }
        }
    }

    fn accept(&mut self, feature: FeatureType, segment: Segment, max_layer_seen: u32) {
        if !self.options.keeps_layer(segment.layer, max_layer_seen) {
            self.stats.windowed_out += 1;
            return;
        }

        if self.accepted >= self.options.max_segments {
            if !self.clipped {
                warn!(
                    "Segment cap of {} reached at layer {}, dropping further segments",
                    self.options.max_segments, segment.layer
                );
            }
            self.clipped = true;
            self.stats.capped += 1;
            return;
        }

        self.buckets.push(feature, segment);
        self.accepted += 1;
    }
}

/// Streaming toolpath parser.
///
/// Feed lines in source order, then call [`finish`](Self::finish).
#[derive(Debug, Clone)]
pub struct ToolpathParser {
    state: MachineState,
    builder: SegmentBuilder,
}

impl ToolpathParser {
    pub fn new(options: ParseOptions) -> Self {
        Self {
            state: MachineState::new(),
            builder: SegmentBuilder::new(options),
        }
    }

    /// Consume one line of G-code
    pub fn feed_line(&mut self, line: &str) {
        self.builder.stats.lines += 1;
        let token = tokenize_line(line);
        if let Some(motion) = self.state.apply(&token) {
            trace!(
                "Line {}: {:?} move on layer {} ({})",
                self.builder.stats.lines,
                motion.kind,
                self.state.current_layer,
                self.state.current_feature
            );
            self.builder.record(motion, &self.state);
        }
    }

    /// Consume lines until they run out or `cancel` is set.
    ///
    /// The token is polled before each line.
    pub fn feed_lines_cancellable<'a>(
        &mut self,
        lines: impl IntoIterator<Item = &'a str>,
        cancel: &CancelToken,
    ) -> Result<(), ParseError> {
        for line in lines {
            if cancel.is_cancelled() {
                debug!("Parse cancelled after {} lines", self.lines());
                return Err(ParseError::Cancelled {
                    lines: self.lines(),
                });
            }
            self.feed_line(line);
        }
        Ok(())
    }

    /// Lines consumed so far
    pub fn lines(&self) -> usize {
        self.builder.stats.lines
    }

    pub fn finish(self) -> ParseResult {
        let builder = self.builder;
        ParseResult {
            segments_by_feature: builder.buckets,
            bbox_all: builder.bbox_all.finish(),
            bbox_model: builder.bbox_model.finish(),
            max_layer: self.state.max_layer_seen,
            clipped: builder.clipped,
            stats: builder.stats,
        }
    }
}

/// Parse a complete G-code buffer
pub fn parse_gcode(text: &str, options: &ParseOptions) -> Result<ParseResult, ParseError> {
    parse_with(text, options, None)
}

/// Parse a complete G-code buffer, polling `cancel` between lines
pub fn parse_gcode_cancellable(
    text: &str,
    options: &ParseOptions,
    cancel: &CancelToken,
) -> Result<ParseResult, ParseError> {
    parse_with(text, options, Some(cancel))
}

fn parse_with(
    text: &str,
    options: &ParseOptions,
    cancel: Option<&CancelToken>,
) -> Result<ParseResult, ParseError> {
    if text.len() > options.max_bytes {
        return Err(ParseError::TooLarge {
            size: text.len(),
            limit: options.max_bytes,
        });
    }
    if text.trim().is_empty() {
        return Err(ParseError::Empty);
    }

    debug!("Starting G-code parse, input size: {} bytes", text.len());

    let mut parser = ToolpathParser::new(*options);
    match cancel {
        Some(cancel) => parser.feed_lines_cancellable(text.lines(), cancel)?,
        None => text.lines().for_each(|line| parser.feed_line(line)),
    }

    let result = parser.finish();
    debug!(
        "Parse complete: lines={}, extrusion={}, travel={}, accepted={}, short={}, windowed={}, capped={}, max_layer={}",
        result.stats.lines,
        result.stats.extrusion_moves,
        result.stats.travel_moves,
        result.segment_count(),
        result.stats.short_segments,
        result.stats.windowed_out,
        result.stats.capped,
        result.max_layer
    );
    Ok(result)
}
