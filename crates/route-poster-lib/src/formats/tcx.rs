//! TCX (Training Center XML) parsing
//!
//! Track points carry position as `LatitudeDegrees`/`LongitudeDegrees` child
//! elements. Explicit distance and duration fields win over derived values.

use super::{TrackFormat, descendant_text, parse_number, parse_timestamp, parse_xml};
use crate::distance::TrackAccumulator;
use crate::{Coordinate, Result, Track};
use roxmltree::Node;

/// Parse TCX text into a track
///
/// Summary values, in order of preference:
/// - distance: sum of lap `DistanceMeters`, else the last cumulative trackpoint
///   `DistanceMeters`, else haversine accumulation
/// - duration: sum of lap `TotalTimeSeconds`, else the trackpoint timestamp span
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn parse(text: &str) -> Result<Track> {
    let doc = parse_xml(TrackFormat::Tcx, text)?;
    let root = doc.root();

    let name = activity_name(root);
    let start_time = descendant_text(root, "Id").and_then(parse_timestamp);

    let mut accumulator = TrackAccumulator::new();
    let mut cumulative_distance = None;
    let mut skipped = 0usize;
    for point in elements(root, "Trackpoint") {
        if let Some(distance) = child_number(point, "DistanceMeters") {
            cumulative_distance = Some(distance);
        }

        let lat = descendant_text(point, "LatitudeDegrees").and_then(parse_number);
        let lon = descendant_text(point, "LongitudeDegrees").and_then(parse_number);
        let Some(coordinate) = lat.zip(lon).and_then(|(lat, lon)| Coordinate::checked(lat, lon))
        else {
            skipped += 1;
            continue;
        };
        let time = descendant_text(point, "Time").and_then(parse_timestamp);
        accumulator.push(coordinate, time);
    }

    if skipped > 0 {
        tracing::debug!("Skipped {skipped} TCX trackpoints without a valid position");
    }

    let lap_distance = sum_lap_field(root, "DistanceMeters");
    let lap_duration = sum_lap_field(root, "TotalTimeSeconds");

    let mut track = accumulator.into_track();
    let metadata = &mut track.metadata;
    metadata.name = name;
    metadata.start_time = start_time;
    if let Some(distance) = lap_distance.or(cumulative_distance) {
        metadata.distance_meters = distance.max(0.0);
    }
    if let Some(duration) = lap_duration {
        metadata.duration_seconds = Some(duration.max(0.0));
    }
    Ok(track)
}

fn elements<'a, 'input>(
    root: Node<'a, 'input>,
    tag: &'static str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    root.descendants()
        .filter(move |n| n.is_element() && n.tag_name().name() == tag)
}

/// Activity sport, or the course name for course files
fn activity_name(root: Node<'_, '_>) -> Option<String> {
    let sport = elements(root, "Activity")
        .next()
        .and_then(|activity| activity.attribute("Sport"))
        .map(str::trim)
        .filter(|sport| !sport.is_empty());
    sport
        .or_else(|| {
            elements(root, "Course")
                .next()
                .and_then(|course| child_text(course, "Name"))
        })
        .map(str::to_string)
}

/// Text of a direct child element (not any descendant)
fn child_text<'a>(node: Node<'a, '_>, name: &str) -> Option<&'a str> {
    node.children()
        .find(|n| n.is_element() && n.tag_name().name() == name)
        .and_then(|n| n.text())
        .map(str::trim)
        .filter(|text| !text.is_empty())
}

fn child_number(node: Node<'_, '_>, name: &str) -> Option<f64> {
    child_text(node, name).and_then(parse_number)
}

/// Sum a numeric field over all laps that carry it, `None` if none does
fn sum_lap_field(root: Node<'_, '_>, field: &str) -> Option<f64> {
    elements(root, "Lap")
        .filter_map(|lap| child_number(lap, field))
        .fold(None, |total, value| Some(total.unwrap_or(0.0) + value))
}
