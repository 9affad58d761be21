//! Bounds-fitting projection from geographic degrees to page units
//!
//! The transform is a plain equirectangular affine map: one `scale` (page units per
//! degree) shared by both axes, so a track is never stretched independently in x and
//! y. Page space has its origin at the top-left corner with y growing downwards.

use crate::{Coordinate, PageSize, Result, TrackError};
use geo::BoundingRect;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Substitute range (degrees) for an axis on which all coordinates coincide
pub const DEGENERATE_RANGE_EPSILON: f64 = 1e-9;

/// Minimal lat/lon rectangle enclosing a set of coordinates
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GeoBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl GeoBounds {
    /// Componentwise min/max over all coordinates, `None` when empty
    pub fn from_coordinates(coordinates: &[Coordinate]) -> Option<Self> {
        let points: geo::MultiPoint<f64> = coordinates
            .iter()
            .map(|&c| geo::Point::from(geo::Coord::from(c)))
            .collect();
        points.bounding_rect().map(Self::from)
    }

    #[inline]
    pub fn lat_range(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    #[inline]
    pub fn lon_range(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    /// Midpoint of the bounds
    pub fn center(&self) -> Coordinate {
        Coordinate::new(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lon + self.max_lon) / 2.0,
        )
    }

    pub fn contains(&self, coordinate: Coordinate) -> bool {
        (self.min_lat..=self.max_lat).contains(&coordinate.lat)
            && (self.min_lon..=self.max_lon).contains(&coordinate.lon)
    }
}

impl From<geo::Rect<f64>> for GeoBounds {
    fn from(rect: geo::Rect<f64>) -> Self {
        Self {
            min_lat: rect.min().y,
            max_lat: rect.max().y,
            min_lon: rect.min().x,
            max_lon: rect.max().x,
        }
    }
}

/// A point in page units (origin top-left, y downwards)
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ProjectedPoint {
    pub x: f64,
    pub y: f64,
}

/// Affine map from (lat, lon) to page coordinates for one bounds/page pairing
///
/// Recompute whenever the coordinate set or the page size changes.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ProjectionTransform {
    /// Page units per degree, identical for both axes
    pub scale: f64,
    pub center_lat: f64,
    pub center_lon: f64,
    pub page_center_x: f64,
    pub page_center_y: f64,
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl ProjectionTransform {
    /// Fit `bounds` into `page_size` minus `padding` on every side
    ///
    /// A latitude or longitude range below [`DEGENERATE_RANGE_EPSILON`] is raised
    /// to it, so a single point or a (nearly) straight
    /// north-south/east-west track still lands centered on the page. A padding that
    /// leaves no drawing area collapses the track onto the page center.
    pub fn fit(bounds: &GeoBounds, page_size: PageSize, padding: f64) -> Self {
        let (width, height) = page_size.dimensions_mm();

        let lat_range = bounds.lat_range().max(DEGENERATE_RANGE_EPSILON);
        let lon_range = bounds.lon_range().max(DEGENERATE_RANGE_EPSILON);

        let available_width = (width - 2.0 * padding).max(0.0);
        let available_height = (height - 2.0 * padding).max(0.0);

        let scale_x = available_width / lon_range;
        let scale_y = available_height / lat_range;
        let scale = scale_x.min(scale_y);

        let center = bounds.center();
        let (page_center_x, page_center_y) = page_size.center();

        Self {
            scale,
            center_lat: center.lat,
            center_lon: center.lon,
            page_center_x,
            page_center_y,
        }
    }

    /// Map a coordinate to page units
    #[inline]
    pub fn apply(&self, coordinate: Coordinate) -> ProjectedPoint {
        ProjectedPoint {
            x: self.page_center_x + (coordinate.lon - self.center_lon) * self.scale,
            // Latitude grows upwards, page y grows downwards
            y: self.page_center_y - (coordinate.lat - self.center_lat) * self.scale,
        }
    }

    /// Map a whole coordinate sequence, preserving order
    pub fn apply_all(&self, coordinates: &[Coordinate]) -> Vec<ProjectedPoint> {
        coordinates.iter().map(|&c| self.apply(c)).collect()
    }
}

/// Compute the transform fitting `coordinates` onto `page_size`
///
/// Fails with [`TrackError::NoCoordinates`] for an empty sequence.
pub fn project(
    coordinates: &[Coordinate],
    page_size: PageSize,
    padding: f64,
) -> Result<ProjectionTransform> {
    #[cfg(feature = "profiling")]
    profiling::scope!("projection::project");

    let bounds = GeoBounds::from_coordinates(coordinates).ok_or(TrackError::NoCoordinates)?;
    Ok(ProjectionTransform::fit(&bounds, page_size, padding))
}

/// Map a coordinate through a transform
#[inline]
pub fn apply(transform: &ProjectionTransform, coordinate: Coordinate) -> ProjectedPoint {
    transform.apply(coordinate)
}
