//! G-Code line tokenizer
//!
//! Turns one line of slicer output into a [`GcodeLine`] record. The tokenizer
//! keeps no state between calls; everything it returns borrows from the line.

use regex::Regex;
use std::sync::OnceLock;

/// Axis and feed words of a motion or set-position command.
///
/// `None` means the word was absent (or malformed) and the current value
/// must be held.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MotionWords {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub z: Option<f64>,
    pub e: Option<f64>,
    pub f: Option<f64>,
}

/// One tokenized line of G-code
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GcodeLine<'a> {
    /// Blank line
    Empty,
    /// Comment carrying no metadata we track
    Comment,
    /// `;TYPE:<label>` feature directive
    FeatureType(&'a str),
    /// `;Z:<height>` layer height directive
    LayerZ(f64),
    /// `;LAYER:<n>` layer number directive
    LayerNumber(u32),
    /// `;LAYER_CHANGE` marker
    LayerChange,
    /// `M82` (absolute) or `M83` (relative) extrusion
    ExtrusionMode { absolute: bool },
    /// `G0`/`G1` move
    Motion { rapid: bool, words: MotionWords },
    /// `G92` position override
    SetPosition(MotionWords),
    /// Anything else
    Unrecognized,
}

/// Tokenize a single line of G-code
pub fn tokenize_line(line: &str) -> GcodeLine<'_> {
    let line = line.trim();
    if line.is_empty() {
        return GcodeLine::Empty;
    }

    if let Some(comment) = line.strip_prefix(';') {
        return tokenize_comment(comment.trim());
    }

    // Drop any trailing comment
    let code = match line.find(';') {
        Some(idx) => &line[..idx],
        None => line,
    };

    if !code.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return GcodeLine::Unrecognized;
    }

    let words = split_words(code);
    let Some((&(letter, number), rest)) = words.split_first() else {
        return GcodeLine::Unrecognized;
    };

    match (letter, command_number(number)) {
        ('G', Some(0)) => GcodeLine::Motion {
            rapid: true,
            words: read_words(rest),
        },
        ('G', Some(1)) => GcodeLine::Motion {
            rapid: false,
            words: read_words(rest),
        },
        ('G', Some(92)) => GcodeLine::SetPosition(read_words(rest)),
        ('M', Some(82)) => GcodeLine::ExtrusionMode { absolute: true },
        ('M', Some(83)) => GcodeLine::ExtrusionMode { absolute: false },
        _ => GcodeLine::Unrecognized,
    }
}

fn tokenize_comment(text: &str) -> GcodeLine<'_> {
    if let Some(label) = strip_directive(text, "TYPE:") {
        return GcodeLine::FeatureType(label.trim());
    }

    if text.eq_ignore_ascii_case("LAYER_CHANGE") {
        return GcodeLine::LayerChange;
    }

    if let Some(value) = strip_directive(text, "LAYER:") {
        // Raft layers come out negative on some slicers; they never raise the count
        return match value.trim().parse::<i64>() {
            Ok(n) => GcodeLine::LayerNumber(u32::try_from(n.max(0)).unwrap_or(u32::MAX)),
            Err(_) => GcodeLine::Comment,
        };
    }

    if let Some(value) = strip_directive(text, "Z:") {
        return match parse_number(value.trim()) {
            Some(z) => GcodeLine::LayerZ(z),
            None => GcodeLine::Comment,
        };
    }

    GcodeLine::Comment
}

/// Case-insensitive prefix strip
fn strip_directive<'a>(text: &'a str, key: &str) -> Option<&'a str> {
    let prefix = text.get(..key.len())?;
    if prefix.eq_ignore_ascii_case(key) {
        Some(&text[key.len()..])
    } else {
        None
    }
}

/// Split the code part of a line into `(letter, number text)` words.
///
/// Handles both `G1 X10 Y0` and the compact `G1X10Y0` form. A spaced word
/// keeps the full number grammar; compact words have no exponent, since
/// `E` there is always the extruder axis.
fn split_words(code: &str) -> Vec<(char, &str)> {
    static COMPACT_WORD_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = COMPACT_WORD_REGEX.get_or_init(|| {
        Regex::new(r"([A-Za-z])([+-]?(?:\d+\.?\d*|\.\d+))").expect("invalid regex pattern")
    });

    let mut words = Vec::new();
    for token in code.split_whitespace() {
        let mut chars = token.chars();
        let Some(letter) = chars.next().filter(char::is_ascii_alphabetic) else {
            continue;
        };
        let number = chars.as_str();

        if !number.bytes().any(|b| b.is_ascii_alphabetic()) || parse_number(number).is_some() {
            words.push((letter.to_ascii_uppercase(), number));
            continue;
        }

        for caps in regex.captures_iter(token) {
            if let (Some(letter), Some(number)) = (caps.get(1), caps.get(2)) {
                let letter = letter.as_str().chars().next().unwrap_or_default();
                words.push((letter.to_ascii_uppercase(), number.as_str()));
            }
        }
    }
    words
}

/// Integer part of a command word like `G1` or `M083`
fn command_number(digits: &str) -> Option<u32> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse::<u32>().ok()
}

fn read_words(words: &[(char, &str)]) -> MotionWords {
    let mut motion = MotionWords::default();

    for &(letter, number) in words {
        let Some(value) = parse_number(number) else {
            continue;
        };
        match letter {
            'X' => motion.x = Some(value),
            'Y' => motion.y = Some(value),
            'Z' => motion.z = Some(value),
            'E' => motion.e = Some(value),
            'F' => motion.f = Some(value),
            _ => {}
        }
    }

    motion
}

/// Parse a number with optional sign, fraction, and exponent.
///
/// Rejects anything outside that grammar, including `inf` and `nan`.
fn parse_number(text: &str) -> Option<f64> {
    static NUMBER_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = NUMBER_REGEX.get_or_init(|| {
        Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?$").expect("invalid regex pattern")
    });

    if !regex.is_match(text) {
        return None;
    }
    text.parse::<f64>().ok().filter(|v| v.is_finite())
}
