//! Best-effort FIT (binary) coordinate scanner
//!
//! This is not a schema-aware FIT decoder. Definition records are skipped without
//! decoding their field table, and every data record is probed for a little-endian
//! `i32` latitude/longitude pair (semicircles) at its first byte. Whether that pair
//! really is a position depends on the record layout, which is not inspected.
//!
//! Scanning never fails: truncated or inconsistent input ends the scan and whatever
//! was accumulated so far is returned.

use crate::distance::TrackAccumulator;
use crate::{Coordinate, Track};
use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{self, Cursor, Seek, SeekFrom};
use std::path::Path;

/// Record header bit marking a definition record
const DEFINITION_RECORD_FLAG: u8 = 0x40;

/// Bytes in a definition record between the record header and its field table:
/// reserved, architecture, global message number (2), field count
const DEFINITION_PREAMBLE_SIZE: u64 = 5;

/// Bytes per field definition entry: field number, size, base type
const FIELD_DEFINITION_SIZE: u64 = 3;

/// Size of the probed latitude/longitude pair
const POSITION_PAIR_SIZE: u64 = 8;

/// Trailing CRC bytes that are never scanned as records
const FILE_CRC_SIZE: u64 = 2;

/// Degrees per semicircle: 180 / 2^31
pub const SEMICIRCLES_TO_DEGREES: f64 = 180.0 / 2_147_483_648.0;

/// Convert a raw semicircle value to degrees
#[inline]
pub fn semicircles_to_degrees(raw: i32) -> f64 {
    raw as f64 * SEMICIRCLES_TO_DEGREES
}

/// Scan a FIT buffer for coordinates
///
/// The track name is the filename without directory and extension. Distance is the
/// haversine accumulation over accepted points; no timing is recovered.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn parse(filename: &str, data: &[u8]) -> Track {
    let mut accumulator = TrackAccumulator::new();
    if let Err(err) = scan_records(data, &mut accumulator) {
        tracing::warn!(
            "FIT scan of {filename} stopped early ({err}), keeping {} points",
            accumulator.len()
        );
    }

    let mut track = accumulator.into_track();
    track.metadata.name = Path::new(filename)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .map(str::to_string);
    track
}

/// Walk the record stream, pushing every accepted position into `accumulator`
///
/// Returns `Ok` when the scan reached its natural end, `Err` when a read ran past
/// the buffer. Either way the accumulator keeps the points found so far.
fn scan_records(data: &[u8], accumulator: &mut TrackAccumulator) -> io::Result<()> {
    let len = data.len() as u64;
    let mut cursor = Cursor::new(data);

    let header_size = match cursor.read_u8() {
        Ok(size) => u64::from(size),
        Err(_) => return Ok(()), // Empty buffer
    };
    cursor.seek(SeekFrom::Start(header_size))?;

    while cursor.position() + FILE_CRC_SIZE < len {
        let record_header = cursor.read_u8()?;

        if record_header & DEFINITION_RECORD_FLAG != 0 {
            cursor.seek(SeekFrom::Current(DEFINITION_PREAMBLE_SIZE as i64 - 1))?;
            let field_count = u64::from(cursor.read_u8()?);
            let table_size = field_count * FIELD_DEFINITION_SIZE;
            cursor.seek(SeekFrom::Current(table_size as i64))?;
            continue;
        }

        if cursor.position() + POSITION_PAIR_SIZE > len {
            break;
        }
        let raw_lat = cursor.read_i32::<LittleEndian>()?;
        let raw_lon = cursor.read_i32::<LittleEndian>()?;
        if let Some(coordinate) = accept_position(raw_lat, raw_lon) {
            accumulator.push(coordinate, None);
        }
    }

    Ok(())
}

/// Plausibility filter for a raw semicircle pair
///
/// Rejects the `i32` extremes (`0x7FFFFFFF` is FIT's "invalid" marker) and pairs
/// with a zero component, which are what zero-filled data records look like.
fn accept_position(raw_lat: i32, raw_lon: i32) -> Option<Coordinate> {
    let plausible = |raw: i32| raw != 0 && raw != i32::MAX && raw != i32::MIN;
    if !(plausible(raw_lat) && plausible(raw_lon)) {
        return None;
    }
    Some(Coordinate::new(
        semicircles_to_degrees(raw_lat),
        semicircles_to_degrees(raw_lon),
    ))
}
