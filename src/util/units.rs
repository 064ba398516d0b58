//! Unit-aware parsing and formatting of scalar quantities.
//!
//! The dialog's numeric fields carry unit suffixes ("12 mm", "45 deg").
//! Lengths are canonically millimetres, angles degrees; bare numbers are
//! interpreted in the canonical unit.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum UnitParseError {
    #[error("Empty quantity string")]
    Empty,

    #[error("Invalid number: '{0}'")]
    Number(String),

    #[error("Unknown unit suffix: '{0}'")]
    UnknownUnit(String),
}

/// Splits "12.5 mm" into the numeric part and the (possibly empty) suffix.
fn split_number_suffix(text: &str) -> (&str, &str) {
    let trimmed = text.trim();
    let end = trimmed
        .char_indices()
        .find(|(_, c)| !(c.is_ascii_digit() || matches!(c, '.' | '+' | '-' | 'e' | 'E')))
        .map(|(i, _)| i)
        .unwrap_or(trimmed.len());
    (&trimmed[..end], trimmed[end..].trim())
}

/// Parses a length quantity into millimetres.
pub fn parse_length(text: &str) -> Result<f64, UnitParseError> {
    let (number, suffix) = split_number_suffix(text);
    if number.is_empty() {
        return Err(UnitParseError::Empty);
    }
    let value: f64 = number
        .parse()
        .map_err(|_| UnitParseError::Number(number.to_string()))?;
    match suffix {
        "" | "mm" => Ok(value),
        "cm" => Ok(value * 10.0),
        "m" => Ok(value * 1000.0),
        other => Err(UnitParseError::UnknownUnit(other.to_string())),
    }
}

/// Parses an angle quantity into degrees.
pub fn parse_angle(text: &str) -> Result<f64, UnitParseError> {
    let (number, suffix) = split_number_suffix(text);
    if number.is_empty() {
        return Err(UnitParseError::Empty);
    }
    let value: f64 = number
        .parse()
        .map_err(|_| UnitParseError::Number(number.to_string()))?;
    match suffix {
        "" | "deg" | "°" => Ok(value),
        "rad" => Ok(value.to_degrees()),
        other => Err(UnitParseError::UnknownUnit(other.to_string())),
    }
}

pub fn format_length(value_mm: f64) -> String {
    format!("{} mm", value_mm)
}

pub fn format_angle(value_deg: f64) -> String {
    format!("{} deg", value_deg)
}
