//! Normalized track storage
//!
//! A [`Track`] is what every parser produces: an ordered coordinate sequence and the
//! summary metadata that could be recovered or derived from the source file.

use crate::projection::GeoBounds;
use crate::{Result, TrackError};
use chrono::{DateTime, Utc};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A geographic position in WGS84 degrees
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    #[inline]
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Build a coordinate only if both values are finite and inside the WGS84 ranges
    pub fn checked(lat: f64, lon: f64) -> Option<Self> {
        let valid = lat.is_finite()
            && lon.is_finite()
            && (-90.0..=90.0).contains(&lat)
            && (-180.0..=180.0).contains(&lon);
        valid.then_some(Self { lat, lon })
    }
}

impl From<Coordinate> for geo::Coord<f64> {
    #[inline]
    fn from(coordinate: Coordinate) -> Self {
        geo::Coord {
            x: coordinate.lon,
            y: coordinate.lat,
        }
    }
}

/// Summary information about a track
///
/// Derived, not authoritative: when the source format has no explicit value the
/// parser fills in haversine distance and timestamp span.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TrackMetadata {
    pub name: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    /// Total distance in meters (never negative)
    pub distance_meters: f64,
    /// Elapsed time in seconds, when any timing information was present
    pub duration_seconds: Option<f64>,
}

/// Coordinates plus metadata extracted from one source file
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Track {
    pub coordinates: Vec<Coordinate>,
    pub metadata: TrackMetadata,
}

impl Track {
    pub fn new(coordinates: Vec<Coordinate>, metadata: TrackMetadata) -> Self {
        Self {
            coordinates,
            metadata,
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

    /// Bounding rectangle of all coordinates, `None` for an empty track
    pub fn bounds(&self) -> Option<GeoBounds> {
        GeoBounds::from_coordinates(&self.coordinates)
    }

    /// Reject a track that parsed successfully but carries no coordinates
    ///
    /// Parsers return empty tracks without error; callers that need something to
    /// draw use this to turn that outcome into [`TrackError::NoCoordinates`].
    pub fn require_coordinates(self) -> Result<Self> {
        if self.coordinates.is_empty() {
            return Err(TrackError::NoCoordinates);
        }
        Ok(self)
    }
}
