//! Input loading
//!
//! The parser works on one in-memory buffer. These helpers produce it:
//! whole-object loading under a byte ceiling, chunked byte-range assembly,
//! and reading from a file on disk.

pub mod fetch;
pub mod file_io;

pub use fetch::{
    fetch_ranged, ChunkSignature, ContentRange, FetchLimits, FetchStop, FetchedBuffer, RangeChunk,
    RangeSource,
};
pub use file_io::{decode_gcode_bytes, decode_gcode_vec, load_whole, GcodeFileReader};
