use thiserror::Error;
use time::{Date, format_description::parse_strftime_borrowed};

pub(crate) const DEFAULT_FORMAT: &str = "%Y-%m-%d";

/// Quick-select date formats offered while editing the date format
pub(crate) static CATALOG: [(&str, &str); 8] = [
    ("1", "%Y-%m-%d"),
    ("2", "%d/%m/%Y"),
    ("3", "%m/%d/%Y"),
    ("4", "%B %d, %Y"),
    ("5", "%b %d, %Y"),
    ("6", "%Y%m%d"),
    ("7", "%d-%b-%Y"),
    ("8", "%A, %B %d, %Y"),
];

pub(crate) fn catalog_pattern(key: &str) -> Option<&'static str> {
    CATALOG
        .iter()
        .find_map(|&(k, pattern)| (k == key).then_some(pattern))
}

#[derive(Debug, Error)]
pub(crate) enum FormatError {
    #[error("invalid date format {pattern:?}")]
    Parse {
        pattern: String,
        source: time::error::InvalidFormatDescription,
    },
    #[error("date format {pattern:?} cannot be applied to a date")]
    Format {
        pattern: String,
        source: time::error::Format,
    },
}

pub(crate) fn format_date(date: Date, pattern: &str) -> Result<String, FormatError> {
    let items = parse_strftime_borrowed(pattern).map_err(|source| FormatError::Parse {
        pattern: pattern.to_owned(),
        source,
    })?;
    date.format(items.as_slice())
        .map_err(|source| FormatError::Format {
            pattern: pattern.to_owned(),
            source,
        })
}

/// Formats `date` per `pattern`, falling back to ISO 8601 if the pattern is
/// unusable
pub(crate) fn display_date(date: Date, pattern: &str) -> String {
    match format_date(date, pattern) {
        Ok(s) => s,
        Err(e) => {
            tracing::warn!(error = %e, "falling back to default date format");
            format_date(date, DEFAULT_FORMAT).unwrap_or_else(|_| date.to_string())
        }
    }
}
