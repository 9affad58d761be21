//! Route Poster Library - Track Ingestion and Page Projection
//!
//! This library turns a recorded GPS track (GPX, TCX or FIT) into a backend-agnostic
//! drawing [`Scene`] laid out on a fixed paper size. Every stage is a pure function of
//! its inputs, so independent files can be processed in parallel.
//!
//! # Architecture
//!
//! - **[`formats`]**: Per-format parsers plus the extension-based [`TrackFormat`] dispatcher
//! - **[`distance`]**: Haversine distance and the per-point distance/duration accumulator
//! - **[`Track`]**: Normalized coordinates plus summary [`TrackMetadata`]
//! - **[`projection`]**: Geographic bounds and the bounds-fitting page transform
//! - **[`SceneBuilder`]**: Assembles projected path, colors and annotations into a [`Scene`]
//!
//! # Pipeline
//!
//! ```text
//! bytes -> TrackFormat -> Track -> ProjectionTransform -> Scene -> export backend
//! ```

pub mod annotation;
pub mod color;
pub mod distance;
pub mod formats;
mod page;
pub mod projection;
mod scene;
mod track;
pub mod utils;

// Public API exports
pub use annotation::{TextAlign, TextAnnotation};
pub use color::Color;
pub use formats::{TrackFormat, parse_track};
pub use page::PageSize;
pub use projection::{GeoBounds, ProjectedPoint, ProjectionTransform};
pub use scene::{DEFAULT_PADDING, RouteStyle, Scene, SceneBuilder};
pub use track::{Coordinate, Track, TrackMetadata};

/// Error types for track ingestion and projection
#[derive(Debug, thiserror::Error)]
pub enum TrackError {
    #[error("Unsupported file format: {filename}")]
    UnsupportedFormat { filename: String },

    #[error("Invalid {format} file format: {source}")]
    MalformedDocument {
        format: TrackFormat,
        #[source]
        source: roxmltree::Error,
    },

    #[error("No GPS coordinates found in file")]
    NoCoordinates,

    #[error("Invalid page size: {0}")]
    InvalidPageSize(String),

    #[error("Invalid color: {0}")]
    InvalidColor(String),
}

pub type Result<T> = std::result::Result<T, TrackError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_exports() {
        // Verify that all public types are accessible
        let _: fn(&str, &[u8]) -> Result<Track> = parse_track;
        let _: fn(PageSize) -> SceneBuilder = SceneBuilder::new;
        let _: fn() -> RouteStyle = RouteStyle::default;
    }

    #[test]
    fn test_error_messages() {
        let err = TrackError::UnsupportedFormat {
            filename: "route.kml".to_string(),
        };
        assert_eq!(err.to_string(), "Unsupported file format: route.kml");
        assert_eq!(
            TrackError::NoCoordinates.to_string(),
            "No GPS coordinates found in file"
        );
    }
}
