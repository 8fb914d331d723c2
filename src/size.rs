//! Human-readable byte counts

use crate::error::{Result, ZfspaceError};
use serde::Serialize;

/// Binary unit names used by the long format
const LONG_UNITS: [&str; 9] = ["B", "kiB", "MiB", "GiB", "TiB", "PiB", "EiB", "ZiB", "YiB"];

/// Single-letter unit names used by the short format
const SHORT_UNITS: [&str; 9] = ["B", "k", "M", "G", "T", "P", "E", "Z", "Y"];

/// Significant digits kept by the long format (integer digits are never dropped)
const SIGNIFICANT_DIGITS: usize = 3;

/// Output style for [`size2human`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeFormat {
    /// `1.21 kiB`
    #[default]
    Long,
    /// `1k`
    Short,
}

impl SizeFormat {
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "long" => Ok(Self::Long),
            "short" => Ok(Self::Short),
            _ => Err(ZfspaceError::invalid_format(s)),
        }
    }
}

/// Convert a byte count into a human-readable string.
///
/// Counts below one kibibyte print as a plain integer. Larger counts are
/// scaled by the largest power of 1024 not exceeding them.
pub fn size2human(bytes: i128, format: SizeFormat) -> Result<String> {
    if bytes < 0 {
        return Err(ZfspaceError::InvalidSize { size: bytes });
    }

    let (index, scale) = unit_for(bytes);

    let text = match format {
        SizeFormat::Long if index == 0 => format!("{} {}", bytes, LONG_UNITS[0]),
        SizeFormat::Long => {
            let value = bytes as f64 / scale as f64;
            format!("{} {}", significant(value), LONG_UNITS[index])
        }
        SizeFormat::Short => {
            let value = (bytes as f64 / scale as f64).round();
            format!("{}{}", value as i128, SHORT_UNITS[index])
        }
    };

    Ok(text)
}

/// Same as [`size2human`] with the format given by name (`long` or `short`).
pub fn format_size(bytes: i128, format: &str) -> Result<String> {
    size2human(bytes, SizeFormat::parse(format)?)
}

/// Unit index and scale for a non-negative byte count
fn unit_for(bytes: i128) -> (usize, i128) {
    let mut index = 0;
    let mut scale: i128 = 1;

    while index + 1 < LONG_UNITS.len() && bytes >= scale * 1024 {
        scale *= 1024;
        index += 1;
    }

    (index, scale)
}

fn significant(value: f64) -> String {
    let integer_digits = if value >= 1.0 {
        value.log10().floor() as usize + 1
    } else {
        1
    };
    let decimals = SIGNIFICANT_DIGITS.saturating_sub(integer_digits);
    let text = format!("{:.*}", decimals, value);

    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    }
}
