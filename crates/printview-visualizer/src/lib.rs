//! # PrintView Visualizer
//!
//! G-code toolpath parsing and preview geometry for PrintView.
//! Includes the line tokenizer, machine state tracking, feature
//! classification, segment building, ribbon meshes, camera framing,
//! ground grid sizing, and input loading.

pub mod gcode;
pub mod utils;
pub mod visualizer;

pub use gcode::{
    classify_feature, parse_gcode, parse_gcode_cancellable, tokenize_line, CancelToken,
    GcodeLine, MotionWords, ParseOptions, ParseResult, ParseStats, SegmentBuckets,
    ToolpathParser,
};

pub use visualizer::{
    build_ribbon, build_scene, fit_camera, fit_camera_with, grid_spec, view_direction,
    BoundsAccumulator, CameraFit, CameraSettings, FeatureMesh, GridSettings, GridSpec,
    RibbonMesh, RibbonParams, SceneOptions, ZBiasTable,
};

pub use utils::{
    decode_gcode_bytes, decode_gcode_vec, fetch_ranged, load_whole, ChunkSignature, ContentRange,
    FetchLimits, FetchStop, FetchedBuffer, GcodeFileReader, RangeChunk, RangeSource,
};
