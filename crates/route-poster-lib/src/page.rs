//! Paper size catalog

use crate::TrackError;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Millimetres per PostScript point
const MM_PER_POINT: f64 = 25.4 / 72.0;

/// Supported ISO 216 paper sizes, portrait orientation
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PageSize {
    A5,
    #[default]
    A4,
    A3,
    A2,
    A1,
    A0,
}

/// (size, width mm, height mm)
const CATALOG: [(PageSize, f64, f64); 6] = [
    (PageSize::A5, 148.0, 210.0),
    (PageSize::A4, 210.0, 297.0),
    (PageSize::A3, 297.0, 420.0),
    (PageSize::A2, 420.0, 594.0),
    (PageSize::A1, 594.0, 841.0),
    (PageSize::A0, 841.0, 1189.0),
];

impl PageSize {
    pub fn all() -> &'static [Self] {
        &[Self::A5, Self::A4, Self::A3, Self::A2, Self::A1, Self::A0]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::A5 => "a5",
            Self::A4 => "a4",
            Self::A3 => "a3",
            Self::A2 => "a2",
            Self::A1 => "a1",
            Self::A0 => "a0",
        }
    }

    /// (width, height) in millimetres
    pub fn dimensions_mm(&self) -> (f64, f64) {
        CATALOG
            .iter()
            .find(|(size, _, _)| size == self)
            .map(|&(_, width, height)| (width, height))
            .unwrap_or((210.0, 297.0))
    }

    #[inline]
    pub fn width_mm(&self) -> f64 {
        self.dimensions_mm().0
    }

    #[inline]
    pub fn height_mm(&self) -> f64 {
        self.dimensions_mm().1
    }

    /// Geometric center of the page in page units
    pub fn center(&self) -> (f64, f64) {
        let (width, height) = self.dimensions_mm();
        (width / 2.0, height / 2.0)
    }

    /// (width, height) in PostScript points, for paginated document writers
    pub fn dimensions_pt(&self) -> (f64, f64) {
        let (width, height) = self.dimensions_mm();
        (width / MM_PER_POINT, height / MM_PER_POINT)
    }

    /// Raster dimensions for a given pixels-per-millimetre factor
    pub fn pixel_dimensions(&self, pixels_per_mm: f64) -> (u32, u32) {
        let (width, height) = self.dimensions_mm();
        let to_pixels = |mm: f64| (mm * pixels_per_mm).round().max(1.0) as u32;
        (to_pixels(width), to_pixels(height))
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PageSize {
    type Err = TrackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::all()
            .iter()
            .copied()
            .find(|size| size.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| TrackError::InvalidPageSize(s.to_string()))
    }
}
