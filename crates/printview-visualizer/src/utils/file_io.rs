//! File I/O Module
//!
//! Handles reading G-code into memory for a single parse:
//! - Size check against the byte ceiling before anything is read
//! - UTF-8 decoding with BOM stripping; invalid bytes are replaced
//! - Empty content is reported as an error

use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

use printview_core::{Error, ParseError, Result};
use tracing::{debug, warn};

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Decode raw G-code bytes to text
///
/// Slicer output is ASCII in practice; anything else is replaced rather
/// than rejected, which also covers a multi-byte character cut in half at
/// a truncation point.
pub fn decode_gcode_bytes(bytes: &[u8]) -> Cow<'_, str> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let text = String::from_utf8_lossy(bytes);
    if matches!(text, Cow::Owned(_)) {
        warn!("G-code contains invalid UTF-8, replacing undecodable bytes");
    }
    text
}

/// Decode an owned buffer, reusing its allocation when it is valid UTF-8
pub fn decode_gcode_vec(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(mut text) => {
            if text.starts_with('\u{FEFF}') {
                text.replace_range(..'\u{FEFF}'.len_utf8(), "");
            }
            text
        }
        Err(err) => decode_gcode_bytes(err.as_bytes()).into_owned(),
    }
}

/// Accept a whole object fetched in one piece
///
/// # Errors
/// Returns [`ParseError::TooLarge`] above `max_bytes` and
/// [`ParseError::Empty`] when there is nothing to parse.
pub fn load_whole(bytes: Vec<u8>, max_bytes: usize) -> Result<String> {
    if bytes.len() > max_bytes {
        return Err(ParseError::TooLarge {
            size: bytes.len(),
            limit: max_bytes,
        }
        .into());
    }
    let text = decode_gcode_vec(bytes);
    if text.trim().is_empty() {
        return Err(ParseError::Empty.into());
    }
    Ok(text)
}

/// G-code file reader
pub struct GcodeFileReader {
    path: PathBuf,
    file_size: u64,
}

impl GcodeFileReader {
    /// Create a new G-code file reader
    ///
    /// # Arguments
    /// * `path` - Path to the G-code file
    ///
    /// # Errors
    /// Returns error if file does not exist or cannot be accessed
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if !path.exists() {
            return Err(Error::other(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        if !path.is_file() {
            return Err(Error::other(format!(
                "Path is not a file: {}",
                path.display()
            )));
        }

        let metadata = fs::metadata(&path)?;
        let file_size = metadata.len();

        Ok(Self { path, file_size })
    }

    /// Get file size in bytes
    pub fn file_size(&self) -> u64 {
        self.file_size
    }

    /// Get file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole file, refusing it if it exceeds `max_bytes`
    ///
    /// # Errors
    /// Returns a size-limit error before reading oversized files, an
    /// empty-content error for blank files, or an I/O error.
    pub fn read_all(&self, max_bytes: usize) -> Result<String> {
        if self.file_size > max_bytes as u64 {
            return Err(ParseError::TooLarge {
                size: usize::try_from(self.file_size).unwrap_or(usize::MAX),
                limit: max_bytes,
            }
            .into());
        }

        debug!(
            "Reading {} ({} bytes)",
            self.path.display(),
            self.file_size
        );
        let bytes = fs::read(&self.path)?;
        load_whole(bytes, max_bytes)
    }
}
