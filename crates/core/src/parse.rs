//! Permissive multi-line color input.
//!
//! Each non-blank line holds one RGB color (or one or more hex colors). A
//! trailing `,` or `;` on a line is treated as a list separator and dropped,
//! so text copied out of the formatter in any notation parses back. RGB
//! segments may be bare (`0.1, 0.2, 0.3`), wrapped in `()`, `[]` or `{}`,
//! and prefixed with `rgb` in any case.
//!
//! Parsing is all-or-nothing: the first bad segment fails the whole input
//! with a [`FormatError`] naming its 1-based line.

use crate::codec::{Hex, Rgb01, Rgb256};
use crate::error::{FormatError, FormatErrorKind};

/// One non-blank line with its list separator removed.
struct Segment<'a> {
    line: usize,
    text: &'a str,
}

fn segments(text: &str) -> impl Iterator<Item = Segment<'_>> {
    text.lines().enumerate().filter_map(|(i, raw)| {
        let trimmed = raw.trim();
        let text = trimmed
            .strip_suffix(',')
            .or_else(|| trimmed.strip_suffix(';'))
            .unwrap_or(trimmed)
            .trim_end();
        (!text.is_empty()).then_some(Segment { line: i + 1, text })
    })
}

/// Parses hex colors, one or more per line.
///
/// Tokens on a line may be separated by commas, semicolons or whitespace.
pub fn parse_hex(text: &str) -> Result<Vec<Hex>, FormatError> {
    let mut out = Vec::new();
    for seg in segments(text) {
        let tokens = seg
            .text
            .split(|c: char| c == ',' || c == ';' || c.is_whitespace())
            .filter(|t| !t.is_empty());
        for token in tokens {
            out.push(Hex::parse(token).map_err(|e| e.at_line(seg.line))?);
        }
    }
    Ok(out)
}

/// Parses RGB triples with components in [0, 1].
pub fn parse_rgb01(text: &str) -> Result<Vec<Rgb01>, FormatError> {
    let triples = parse_triples(text, parse_unit)?;
    Ok(triples.into_iter().map(|[r, g, b]| Rgb01 { r, g, b }).collect())
}

/// Parses RGB triples with integer components in [0, 255].
pub fn parse_rgb256(text: &str) -> Result<Vec<Rgb256>, FormatError> {
    let triples = parse_triples(text, parse_byte)?;
    Ok(triples.into_iter().map(|[r, g, b]| Rgb256 { r, g, b }).collect())
}

fn parse_triples<T: Copy>(
    text: &str,
    component: fn(&str) -> Result<T, FormatErrorKind>,
) -> Result<Vec<[T; 3]>, FormatError> {
    segments(text)
        .map(|seg| {
            parse_triple(seg.text, component)
                .map_err(|kind| FormatError::new(seg.text, kind).at_line(seg.line))
        })
        .collect()
}

fn parse_triple<T: Copy>(
    segment: &str,
    component: fn(&str) -> Result<T, FormatErrorKind>,
) -> Result<[T; 3], FormatErrorKind> {
    let body = unwrap_brackets(strip_rgb_prefix(segment))?;
    let parts: Vec<&str> = body.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(FormatErrorKind::ComponentCount(parts.len()));
    }
    let mut values = [component(parts[0])?; 3];
    values[1] = component(parts[1])?;
    values[2] = component(parts[2])?;
    Ok(values)
}

/// Drops a leading `rgb` in any case.
fn strip_rgb_prefix(s: &str) -> &str {
    match s.get(..3) {
        Some(prefix) if prefix.eq_ignore_ascii_case("rgb") => s[3..].trim_start(),
        _ => s,
    }
}

/// Removes one matching pair of outer brackets, rejecting any other bracket.
fn unwrap_brackets(s: &str) -> Result<&str, FormatErrorKind> {
    let inner = match s.chars().next() {
        Some(open @ ('(' | '[' | '{')) => {
            let close = match open {
                '(' => ')',
                '[' => ']',
                _ => '}',
            };
            s[1..]
                .strip_suffix(close)
                .ok_or(FormatErrorKind::UnbalancedBrackets)?
        }
        _ => s,
    };
    if inner.contains(['(', ')', '[', ']', '{', '}']) {
        return Err(FormatErrorKind::UnbalancedBrackets);
    }
    Ok(inner)
}

fn parse_unit(s: &str) -> Result<f64, FormatErrorKind> {
    if s.is_empty() {
        return Err(FormatErrorKind::EmptyComponent);
    }
    let v: f64 = s.parse().map_err(|_| FormatErrorKind::InvalidNumber {
        value: s.to_string(),
        expected: "a number",
    })?;
    if !v.is_finite() || !(0.0..=1.0).contains(&v) {
        return Err(FormatErrorKind::OutOfRange {
            value: s.to_string(),
            min: "0",
            max: "1",
        });
    }
    Ok(v)
}

fn parse_byte(s: &str) -> Result<u8, FormatErrorKind> {
    if s.is_empty() {
        return Err(FormatErrorKind::EmptyComponent);
    }
    let v: i64 = s.parse().map_err(|_| FormatErrorKind::InvalidNumber {
        value: s.to_string(),
        expected: "an integer",
    })?;
    u8::try_from(v).map_err(|_| FormatErrorKind::OutOfRange {
        value: s.to_string(),
        min: "0",
        max: "255",
    })
}
