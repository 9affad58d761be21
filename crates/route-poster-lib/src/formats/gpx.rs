//! GPX parsing
//!
//! Only coordinates and summary metadata are extracted. Track points are preferred;
//! waypoints are used when the document has no track points at all.

use super::{TrackFormat, descendant_text, parse_number, parse_timestamp, parse_xml};
use crate::distance::TrackAccumulator;
use crate::{Coordinate, Result, Track};

/// Parse GPX text into a track
///
/// Points with a missing, non-numeric or out-of-range `lat`/`lon` are skipped.
/// A document without usable points yields an empty track, not an error.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn parse(text: &str) -> Result<Track> {
    let doc = parse_xml(TrackFormat::Gpx, text)?;
    let root = doc.root();

    let name = descendant_text(root, "name").map(str::to_string);
    let start_time = descendant_text(root, "time").and_then(parse_timestamp);

    let elements_named = |tag: &'static str| {
        root.descendants()
            .filter(move |n| n.is_element() && n.tag_name().name() == tag)
    };
    let use_track_points = elements_named("trkpt").next().is_some();
    let points = elements_named(if use_track_points { "trkpt" } else { "wpt" });

    let mut accumulator = TrackAccumulator::new();
    let mut skipped = 0usize;
    for point in points {
        let lat = point.attribute("lat").and_then(parse_number);
        let lon = point.attribute("lon").and_then(parse_number);
        let Some(coordinate) = lat.zip(lon).and_then(|(lat, lon)| Coordinate::checked(lat, lon))
        else {
            skipped += 1;
            continue;
        };
        let time = descendant_text(point, "time").and_then(parse_timestamp);
        accumulator.push(coordinate, time);
    }

    if skipped > 0 {
        tracing::debug!("Skipped {skipped} GPX points without valid coordinates");
    }

    let mut track = accumulator.into_track();
    track.metadata.name = name;
    track.metadata.start_time = start_time;
    Ok(track)
}
