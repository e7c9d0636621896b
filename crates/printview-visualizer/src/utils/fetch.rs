//! # Ranged Fetch
//!
//! Assembles one input buffer from consecutive byte-range requests.
//! Transport is left to a [`RangeSource`]; this module only decides which
//! range to ask for next and when to stop.

use std::fmt;
use std::str::FromStr;

use printview_core::constants::{CHUNK_SIGNATURE_BYTES, MAX_BYTES, RANGE_CHUNK};
use printview_core::{FetchError, ParseError, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// One chunk returned by a range request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeChunk {
    pub bytes: Vec<u8>,
    /// Raw `Content-Range` header value, if the source reported one
    pub content_range: Option<String>,
}

impl RangeChunk {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            content_range: None,
        }
    }

    pub fn with_content_range(mut self, header: impl Into<String>) -> Self {
        self.content_range = Some(header.into());
        self
    }
}

/// Something that can serve inclusive byte ranges of one object
pub trait RangeSource {
    /// Fetch bytes `start..=end`.
    ///
    /// `Ok(None)` means the source has nothing at that offset.
    fn fetch_range(&mut self, start: u64, end: u64)
        -> std::result::Result<Option<RangeChunk>, FetchError>;
}

/// Parsed `Content-Range: bytes start-end/total` header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentRange {
    pub start: u64,
    pub end: u64,
    /// `None` for an unknown total (`/*`)
    pub total: Option<u64>,
}

impl FromStr for ContentRange {
    type Err = FetchError;

    fn from_str(header: &str) -> std::result::Result<Self, Self::Err> {
        let invalid = || FetchError::InvalidContentRange {
            header: header.to_string(),
        };

        let trimmed = header.trim();
        let rest = trimmed
            .get(..6)
            .filter(|unit| unit.eq_ignore_ascii_case("bytes "))
            .map(|_| &trimmed[6..])
            .ok_or_else(invalid)?;

        let (range, total) = rest.trim().split_once('/').ok_or_else(invalid)?;
        let (start, end) = range.split_once('-').ok_or_else(invalid)?;
        let start: u64 = start.trim().parse().map_err(|_| invalid())?;
        let end: u64 = end.trim().parse().map_err(|_| invalid())?;
        if end < start {
            return Err(invalid());
        }

        let total = match total.trim() {
            "*" => None,
            value => Some(value.parse::<u64>().map_err(|_| invalid())?),
        };

        Ok(Self { start, end, total })
    }
}

/// Limits for ranged assembly
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchLimits {
    pub max_bytes: usize,
    pub range_chunk: usize,
}

impl Default for FetchLimits {
    fn default() -> Self {
        Self {
            max_bytes: MAX_BYTES,
            range_chunk: RANGE_CHUNK,
        }
    }
}

/// Identity of a chunk for repeat detection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkSignature {
    head: Vec<u8>,
    tail: Vec<u8>,
    len: usize,
}

impl ChunkSignature {
    pub fn of(bytes: &[u8]) -> Self {
        let n = CHUNK_SIGNATURE_BYTES.min(bytes.len());
        Self {
            head: bytes[..n].to_vec(),
            tail: bytes[bytes.len() - n..].to_vec(),
            len: bytes.len(),
        }
    }
}

/// Why assembly stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchStop {
    /// Reached the total reported by `Content-Range`
    Complete,
    /// A chunk came back shorter than requested
    ShortChunk,
    /// The source returned nothing
    NoChunk,
    /// The byte ceiling was reached
    ByteLimit,
    /// Two consecutive chunks were identical
    DuplicateChunk,
}

impl fmt::Display for FetchStop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FetchStop::Complete => "complete",
            FetchStop::ShortChunk => "short chunk",
            FetchStop::NoChunk => "no chunk",
            FetchStop::ByteLimit => "byte limit",
            FetchStop::DuplicateChunk => "duplicate chunk",
        };
        f.write_str(s)
    }
}

/// Assembled input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedBuffer {
    pub bytes: Vec<u8>,
    /// Total object size, when the source reported one
    pub total: Option<u64>,
    /// More data existed past the byte ceiling
    pub truncated: bool,
    pub chunks: usize,
    pub stop: FetchStop,
}

impl FetchedBuffer {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Fetch consecutive ranges from `source` until one of the stop conditions
/// in [`FetchStop`] is met
///
/// # Errors
/// Source failures are propagated. Assembling zero bytes is
/// [`ParseError::Empty`].
pub fn fetch_ranged<S>(source: &mut S, limits: &FetchLimits) -> Result<FetchedBuffer>
where
    S: RangeSource + ?Sized,
{
    let chunk_size = limits.range_chunk.max(1);
    let mut bytes: Vec<u8> = Vec::new();
    let mut total: Option<u64> = None;
    let mut previous: Option<ChunkSignature> = None;
    let mut truncated = false;
    let mut chunks = 0usize;

    let stop = loop {
        let remaining = limits.max_bytes.saturating_sub(bytes.len());
        if remaining == 0 {
            truncated = total.map_or(true, |t| (bytes.len() as u64) < t);
            break FetchStop::ByteLimit;
        }

        let offset = bytes.len() as u64;
        let mut want = chunk_size.min(remaining) as u64;
        if let Some(t) = total {
            want = want.min(t.saturating_sub(offset));
        }
        if want == 0 {
            break FetchStop::Complete;
        }
        let end = offset + want - 1;

        debug!("Requesting bytes {}-{}", offset, end);
        let chunk = match source.fetch_range(offset, end)? {
            Some(chunk) if !chunk.bytes.is_empty() => chunk,
            _ => break FetchStop::NoChunk,
        };

        if let Some(header) = chunk.content_range.as_deref() {
            match header.parse::<ContentRange>() {
                Ok(range) => {
                    if range.total.is_some() {
                        total = range.total;
                    }
                }
                Err(e) => warn!("Ignoring Content-Range: {}", e),
            }
        }

        let signature = ChunkSignature::of(&chunk.bytes);
        if previous.as_ref() == Some(&signature) {
            warn!("Range source repeated chunk at offset {}", offset);
            break FetchStop::DuplicateChunk;
        }
        previous = Some(signature);

        let received = chunk.bytes.len();
        let take = received.min(remaining);
        bytes.extend_from_slice(&chunk.bytes[..take]);
        chunks += 1;

        if take < received {
            truncated = true;
            break FetchStop::ByteLimit;
        }
        if total.is_some_and(|t| bytes.len() as u64 >= t) {
            break FetchStop::Complete;
        }
        if (received as u64) < want {
            break FetchStop::ShortChunk;
        }
    };

    if bytes.is_empty() {
        return Err(ParseError::Empty.into());
    }

    if truncated {
        warn!(
            "Input truncated at {} bytes (limit {})",
            bytes.len(),
            limits.max_bytes
        );
    }
    info!(
        "Fetched {} bytes in {} chunks ({})",
        bytes.len(),
        chunks,
        stop
    );

    Ok(FetchedBuffer {
        bytes,
        total,
        truncated,
        chunks,
        stop,
    })
}
