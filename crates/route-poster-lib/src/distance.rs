//! Distance and duration derivation shared by all parsers

use crate::{Coordinate, Track, TrackMetadata};
use chrono::{DateTime, Utc};

/// Earth's radius in meters
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Great-circle distance between two coordinates in meters (spherical haversine)
#[inline]
pub fn haversine_distance(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let delta_lat = (b.lat - a.lat).to_radians();
    let delta_lon = (b.lon - a.lon).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_M * c
}

/// Collects retained points in order, accumulating distance between consecutive
/// points and the span between the first and last timestamp seen.
///
/// Points without a timestamp still contribute distance; they just don't move the
/// timing window.
#[derive(Clone, Debug, Default)]
pub struct TrackAccumulator {
    coordinates: Vec<Coordinate>,
    distance_meters: f64,
    first_time: Option<DateTime<Utc>>,
    last_time: Option<DateTime<Utc>>,
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl TrackAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a point, with its timestamp when the source carried a parsable one
    pub fn push(&mut self, coordinate: Coordinate, time: Option<DateTime<Utc>>) {
        if let Some(prev) = self.coordinates.last() {
            self.distance_meters += haversine_distance(*prev, coordinate);
        }
        self.coordinates.push(coordinate);

        if let Some(time) = time {
            self.first_time.get_or_insert(time);
            self.last_time = Some(time);
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    /// Accumulated haversine distance in meters
    #[inline]
    pub fn distance_meters(&self) -> f64 {
        self.distance_meters
    }

    /// `last - first` timestamp in seconds, `None` if no point carried a timestamp
    ///
    /// Out-of-order timestamps that would give a negative span clamp to zero.
    pub fn duration_seconds(&self) -> Option<f64> {
        let (first, last) = (self.first_time?, self.last_time?);
        let millis = last.signed_duration_since(first).num_milliseconds();
        Some((millis as f64 / 1000.0).max(0.0))
    }

    /// Finish into a track carrying the derived distance and duration
    pub fn into_track(self) -> Track {
        let metadata = TrackMetadata {
            name: None,
            start_time: None,
            distance_meters: self.distance_meters,
            duration_seconds: self.duration_seconds(),
        };
        Track::new(self.coordinates, metadata)
    }
}
