//! Color normalization between `rgb()`/`rgba()` and `#rrggbb`
//!
//! Color inputs in the customization panel only understand hex, while
//! computed styles come back as `rgb(...)`. `transparent` and any color with
//! zero alpha show up as white.

use thiserror::Error;

pub const TRANSPARENT_FALLBACK: &str = "#ffffff";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    #[error("Invalid color: {0}")]
    Invalid(String),
}

/// Normalize a CSS color to lowercase `#rrggbb`
///
/// Accepts `rgb(r, g, b)`, `rgba(r, g, b, a)` (comma or space separated),
/// `#rgb`, `#rrggbb` and `transparent`.
pub fn rgb_to_hex(value: &str) -> Result<String, ColorError> {
    let value = value.trim();
    let lower = value.to_ascii_lowercase();

    if lower == "transparent" {
        return Ok(TRANSPARENT_FALLBACK.to_string());
    }

    if lower.starts_with('#') {
        let (r, g, b) = hex_to_rgb(&lower)?;
        return Ok(format_hex(r, g, b));
    }

    let inner = lower
        .strip_prefix("rgba(")
        .or_else(|| lower.strip_prefix("rgb("))
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(|| ColorError::Invalid(value.to_string()))?;

    let parts: Vec<&str> = inner
        .split(|c: char| c == ',' || c == '/' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .collect();

    if parts.len() != 3 && parts.len() != 4 {
        return Err(ColorError::Invalid(value.to_string()));
    }

    let mut channels = [0u8; 3];
    for (channel, part) in channels.iter_mut().zip(&parts) {
        *channel = parse_channel(part).ok_or_else(|| ColorError::Invalid(value.to_string()))?;
    }

    if let Some(alpha) = parts.get(3) {
        let alpha = parse_alpha(alpha).ok_or_else(|| ColorError::Invalid(value.to_string()))?;
        if alpha <= 0.0 {
            return Ok(TRANSPARENT_FALLBACK.to_string());
        }
    }

    Ok(format_hex(channels[0], channels[1], channels[2]))
}

/// Parse `#rgb` or `#rrggbb`
pub fn hex_to_rgb(value: &str) -> Result<(u8, u8, u8), ColorError> {
    let invalid = || ColorError::Invalid(value.to_string());
    let digits = value.trim().strip_prefix('#').ok_or_else(invalid)?;

    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let expanded: String = match digits.len() {
        3 => digits.chars().flat_map(|c| [c, c]).collect(),
        6 => digits.to_string(),
        _ => return Err(invalid()),
    };

    let channel = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).map_err(|_| invalid());
    Ok((channel(0)?, channel(2)?, channel(4)?))
}

/// `#rrggbb` as `rgb(r, g, b)`
pub fn hex_to_rgb_string(value: &str) -> Result<String, ColorError> {
    let (r, g, b) = hex_to_rgb(value)?;
    Ok(format!("rgb({}, {}, {})", r, g, b))
}

fn format_hex(r: u8, g: u8, b: u8) -> String {
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}

/// Finite numbers only; `f64` parsing also accepts `nan` and `inf`
fn parse_number(part: &str) -> Option<f64> {
    part.parse::<f64>().ok().filter(|value| value.is_finite())
}

fn parse_channel(part: &str) -> Option<u8> {
    let value = match part.strip_suffix('%') {
        Some(percent) => parse_number(percent)? * 255.0 / 100.0,
        None => parse_number(part)?,
    };
    Some(value.round().clamp(0.0, 255.0) as u8)
}

fn parse_alpha(part: &str) -> Option<f64> {
    match part.strip_suffix('%') {
        Some(percent) => Some(parse_number(percent)? / 100.0),
        None => parse_number(part),
    }
}
