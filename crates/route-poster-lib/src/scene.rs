//! Scene assembly
//!
//! A [`Scene`] is everything an export backend needs to draw one page: background,
//! a single polyline through the projected path, and the text annotations. Building
//! it makes no geometry decisions beyond running the track through the projection.

use crate::projection::{self, ProjectedPoint, ProjectionTransform};
use crate::{Color, PageSize, TextAnnotation, Track};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default distance between the page edge and the route, in page units
pub const DEFAULT_PADDING: f64 = 40.0;

/// Colors and stroke width of the route drawing
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RouteStyle {
    pub route_color: Color,
    pub background_color: Color,
    pub line_width_pt: f64,
}

impl Default for RouteStyle {
    fn default() -> Self {
        Self {
            route_color: Color::BLACK,
            background_color: Color::WHITE,
            line_width_pt: 2.0,
        }
    }
}

/// Backend-agnostic description of one page to draw
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Scene {
    pub page_size: PageSize,
    pub background_color: Color,
    pub route_color: Color,
    pub line_width_pt: f64,
    pub path: Vec<ProjectedPoint>,
    pub annotations: Vec<TextAnnotation>,
}

impl Scene {
    /// Page (width, height) in page units
    #[inline]
    pub fn dimensions(&self) -> (f64, f64) {
        self.page_size.dimensions_mm()
    }

    /// Whether there is a route to stroke (a background is always drawable)
    #[inline]
    pub fn has_path(&self) -> bool {
        !self.path.is_empty()
    }
}

/// Page settings a scene is built with
///
/// Every rebuild takes the track and annotations as explicit inputs, so changing
/// page size, padding or colors is just building again with a new builder value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneBuilder {
    page_size: PageSize,
    padding: f64,
    style: RouteStyle,
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl SceneBuilder {
    pub fn new(page_size: PageSize) -> Self {
        Self {
            page_size,
            padding: DEFAULT_PADDING,
            style: RouteStyle::default(),
        }
    }

    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_style(mut self, style: RouteStyle) -> Self {
        self.style = style;
        self
    }

    #[inline]
    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    #[inline]
    pub fn padding(&self) -> f64 {
        self.padding
    }

    #[inline]
    pub fn style(&self) -> RouteStyle {
        self.style
    }

    /// Projection for `track` on this page, `None` for a track without coordinates
    pub fn transform_for(&self, track: &Track) -> Option<ProjectionTransform> {
        projection::project(&track.coordinates, self.page_size, self.padding).ok()
    }

    /// Project `track` and merge in the caller's current annotations
    ///
    /// An empty track gives a scene with an empty path and the background only.
    pub fn build(&self, track: &Track, annotations: &[TextAnnotation]) -> Scene {
        match self.transform_for(track) {
            Some(transform) => self.build_with_transform(track, &transform, annotations),
            None => {
                tracing::debug!("Building scene without a route: track has no coordinates");
                self.assemble(Vec::new(), annotations)
            }
        }
    }

    /// Like [`SceneBuilder::build`], reusing an already computed transform
    pub fn build_with_transform(
        &self,
        track: &Track,
        transform: &ProjectionTransform,
        annotations: &[TextAnnotation],
    ) -> Scene {
        self.assemble(transform.apply_all(&track.coordinates), annotations)
    }

    fn assemble(&self, path: Vec<ProjectedPoint>, annotations: &[TextAnnotation]) -> Scene {
        Scene {
            page_size: self.page_size,
            background_color: self.style.background_color,
            route_color: self.style.route_color,
            line_width_pt: self.style.line_width_pt,
            path,
            annotations: annotations.to_vec(),
        }
    }
}
