//! Track file formats and extension-based dispatch
//!
//! Each supported format is one [`TrackFormat`] variant with one parser module.
//! Dispatch looks only at the filename extension; content is never sniffed.

pub mod fit;
pub mod gpx;
pub mod tcx;

use crate::{Result, Track, TrackError};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Supported track file formats
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TrackFormat {
    Gpx,
    Tcx,
    Fit,
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl TrackFormat {
    pub fn all() -> &'static [Self] {
        &[Self::Gpx, Self::Tcx, Self::Fit]
    }

    /// File extension (lowercase, without the dot)
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Gpx => "gpx",
            Self::Tcx => "tcx",
            Self::Fit => "fit",
        }
    }

    /// Identify the format from a filename extension, case-insensitively
    pub fn from_filename(filename: &str) -> Option<Self> {
        let extension = Path::new(filename).extension()?.to_str()?.to_ascii_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|format| format.extension() == extension)
    }

    /// Parse raw file content in this format
    ///
    /// The filename is only used by formats that carry no name of their own.
    pub fn parse(&self, filename: &str, content: &[u8]) -> Result<Track> {
        match self {
            Self::Gpx => gpx::parse(&String::from_utf8_lossy(content)),
            Self::Tcx => tcx::parse(&String::from_utf8_lossy(content)),
            Self::Fit => Ok(fit::parse(filename, content)),
        }
    }
}

impl fmt::Display for TrackFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Gpx => "GPX",
            Self::Tcx => "TCX",
            Self::Fit => "FIT",
        };
        f.write_str(name)
    }
}

/// Route a file to the parser matching its extension
///
/// Fails with [`TrackError::UnsupportedFormat`] for unknown extensions; parser
/// errors are propagated unchanged.
pub fn parse_track(filename: &str, content: &[u8]) -> Result<Track> {
    #[cfg(feature = "profiling")]
    profiling::scope!("formats::parse_track");

    let format =
        TrackFormat::from_filename(filename).ok_or_else(|| TrackError::UnsupportedFormat {
            filename: filename.to_string(),
        })?;
    tracing::debug!("Parsing {filename} as {format} ({} bytes)", content.len());
    format.parse(filename, content)
}

/// Parse an XML document leniently (DTDs allowed), mapping failures to
/// [`TrackError::MalformedDocument`]
pub(crate) fn parse_xml(format: TrackFormat, text: &str) -> Result<roxmltree::Document<'_>> {
    let parse_options = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..roxmltree::ParsingOptions::default()
    };
    roxmltree::Document::parse_with_options(text, parse_options)
        .map_err(|source| TrackError::MalformedDocument { format, source })
}

/// First element below `node` (in document order) with the given local name
pub(crate) fn find_descendant<'a, 'input>(
    node: roxmltree::Node<'a, 'input>,
    name: &str,
) -> Option<roxmltree::Node<'a, 'input>> {
    node.descendants()
        .skip(1)
        .find(|n| n.is_element() && n.tag_name().name() == name)
}

/// Trimmed text of the first matching descendant, `None` when absent or blank
pub(crate) fn descendant_text<'a>(node: roxmltree::Node<'a, '_>, name: &str) -> Option<&'a str> {
    find_descendant(node, name)
        .and_then(|n| n.text())
        .map(str::trim)
        .filter(|text| !text.is_empty())
}

/// Parse a finite floating point number, ignoring surrounding whitespace
pub(crate) fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse an ISO-8601 timestamp; anything unparsable is treated as missing
///
/// Accepts RFC 3339, a date-time without offset (taken as UTC) and a bare date.
pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(time) = DateTime::parse_from_rfc3339(text) {
        return Some(time.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
