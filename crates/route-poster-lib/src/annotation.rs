//! Text annotations placed on the page
//!
//! Annotations are owned by whatever edits them; the scene builder only copies their
//! current values. This module also seeds the default caption set from a track's
//! metadata.

use crate::utils::{format_duration_short, format_km};
use crate::{Color, PageSize, TrackMetadata};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Left edge for seeded captions, in page units
const CAPTION_X: f64 = 50.0;

/// Horizontal text anchoring relative to the annotation's x position
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// A piece of text with position and style, in page units
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TextAnnotation {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size_pt: f64,
    pub font_family: String,
    pub color: Color,
    pub alignment: TextAlign,
}

impl Default for TextAnnotation {
    fn default() -> Self {
        Self {
            text: "New Text".to_string(),
            x: 50.0,
            y: 50.0,
            font_size_pt: 16.0,
            font_family: "Arial".to_string(),
            color: Color::BLACK,
            alignment: TextAlign::Left,
        }
    }
}

impl TextAnnotation {
    /// Default-styled annotation with the given text at (x, y)
    pub fn new(text: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            ..Self::default()
        }
    }

    pub fn with_font_size(mut self, font_size_pt: f64) -> Self {
        self.font_size_pt = font_size_pt;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_alignment(mut self, alignment: TextAlign) -> Self {
        self.alignment = alignment;
        self
    }

    /// A user-added text placed slightly left of the page center
    pub fn centered_on(page_size: PageSize, text: impl Into<String>) -> Self {
        let (center_x, center_y) = page_size.center();
        Self::new(text, center_x - 50.0, center_y).with_font_size(20.0)
    }
}

/// Captions seeded from track metadata: name, date, distance and duration
///
/// Only values that are present (and non-zero for distance/duration) produce a
/// caption; each keeps its own fixed row.
pub fn default_annotations(metadata: &TrackMetadata) -> Vec<TextAnnotation> {
    let mut annotations = Vec::with_capacity(4);

    if let Some(name) = metadata.name.as_deref().filter(|n| !n.trim().is_empty()) {
        annotations.push(TextAnnotation::new(name, CAPTION_X, 50.0).with_font_size(24.0));
    }

    if let Some(start) = metadata.start_time {
        annotations.push(TextAnnotation::new(
            start.format("%Y-%m-%d").to_string(),
            CAPTION_X,
            80.0,
        ));
    }

    if metadata.distance_meters > 0.0 {
        annotations.push(TextAnnotation::new(
            format_km(metadata.distance_meters),
            CAPTION_X,
            110.0,
        ));
    }

    if let Some(duration) = metadata.duration_seconds.filter(|d| *d > 0.0) {
        annotations.push(TextAnnotation::new(
            format_duration_short(duration),
            CAPTION_X,
            140.0,
        ));
    }

    annotations
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_defaults() {
        let annotation = TextAnnotation::default();
        assert_eq!(annotation.text, "New Text");
        assert_eq!((annotation.x, annotation.y), (50.0, 50.0));
        assert_eq!(annotation.font_size_pt, 16.0);
        assert_eq!(annotation.font_family, "Arial");
        assert_eq!(annotation.color, Color::BLACK);
        assert_eq!(annotation.alignment, TextAlign::Left);
    }

    #[test]
    fn test_full_metadata_captions() {
        let metadata = TrackMetadata {
            name: Some("Alpine Loop".to_string()),
            start_time: Some(Utc.with_ymd_and_hms(2024, 7, 14, 6, 30, 0).unwrap()),
            distance_meters: 42_196.0,
            duration_seconds: Some(3.0 * 3600.0 + 25.0 * 60.0 + 59.0),
        };
        let annotations = default_annotations(&metadata);
        let texts: Vec<&str> = annotations.iter().map(|a| a.text.as_str()).collect();
        assert_eq!(texts, ["Alpine Loop", "2024-07-14", "42.20 km", "3h 25m"]);

        let rows: Vec<f64> = annotations.iter().map(|a| a.y).collect();
        assert_eq!(rows, [50.0, 80.0, 110.0, 140.0]);
        assert_eq!(annotations[0].font_size_pt, 24.0);
        assert_eq!(annotations[1].font_size_pt, 16.0);
    }

    #[test]
    fn test_missing_values_produce_no_caption() {
        let metadata = TrackMetadata {
            name: Some("   ".to_string()),
            start_time: None,
            distance_meters: 0.0,
            duration_seconds: Some(0.0),
        };
        assert!(default_annotations(&metadata).is_empty());
    }

    #[test]
    fn test_short_duration_caption() {
        let metadata = TrackMetadata {
            duration_seconds: Some(19.0 * 60.0 + 5.0),
            ..TrackMetadata::default()
        };
        let annotations = default_annotations(&metadata);
        assert_eq!(annotations.len(), 1);
        assert_eq!(annotations[0].text, "19m");
        assert_eq!(annotations[0].y, 140.0);
    }

    #[test]
    fn test_centered_custom_text() {
        let annotation = TextAnnotation::centered_on(PageSize::A4, "Custom Text");
        assert_eq!((annotation.x, annotation.y), (55.0, 148.5));
        assert_eq!(annotation.font_size_pt, 20.0);
    }
}
