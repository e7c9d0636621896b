//! # PrintView
//!
//! Streaming G-code toolpath parser and ribbon-mesh preview builder for
//! 3D-printer slicer output:
//! - Single-pass parse of tens of megabytes of G-code under a segment cap
//! - Print-feature classification from slicer type comments
//! - Model and full bounding boxes, camera framing, and ground grid sizing
//! - GPU-ready ribbon vertex and index buffers in a fixed draw order
//!
//! ## Architecture
//!
//! PrintView is organized as a workspace with multiple crates:
//!
//! 1. **printview-core** - Data model, constants, errors
//! 2. **printview-visualizer** - Tokenizer, state tracking, segment building, geometry, input loading
//! 3. **printview-settings** - Configuration files and validation
//! 4. **printview** - Preview pipeline glue and the command-line binary

pub mod preview;

pub use printview_core::{
    Aabb, Error, FeatureType, FetchError, ParseError, Point3, Result, Segment,
};

pub use printview_visualizer::{
    build_ribbon, build_scene, classify_feature, decode_gcode_bytes, decode_gcode_vec,
    fetch_ranged, fit_camera, grid_spec, load_whole, parse_gcode, parse_gcode_cancellable,
    CameraFit, CancelToken, FeatureMesh, FetchLimits, FetchedBuffer, GcodeFileReader, GridSpec,
    ParseOptions, ParseResult, RangeChunk, RangeSource, RibbonMesh, SceneOptions, ToolpathParser,
    ZBiasTable,
};

pub use printview_settings::{Config, SettingsError};

pub use preview::{Preview, PreviewSummary};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Output on stderr, leaving stdout for results
/// - RUST_LOG environment variable support
/// - `warn` as the default level, `debug` when `verbose` is set
pub fn init_logging(verbose: bool) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(level.into()));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(verbose)
        .with_line_number(verbose);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
