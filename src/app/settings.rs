use crate::entrypoints::cli::parse_args;
use clap::Parser;
use route_poster_lib::{Color, DEFAULT_PADDING, PageSize, RouteStyle};
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
/// Route Poster - Turn a recorded GPS track (GPX, TCX, FIT) into a printable poster layout
pub struct Settings {
    /// Track files to lay out (.gpx, .tcx or .fit)
    #[clap(required = true, value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Paper size (a5, a4, a3, a2, a1, a0)
    #[clap(short, long, default_value = "a4")]
    pub page_size: PageSize,

    /// Distance between page edge and route, in millimetres
    #[clap(long, default_value_t = DEFAULT_PADDING)]
    pub padding: f64,

    /// Route stroke color
    #[clap(long, default_value = "#000000")]
    pub route_color: Color,

    /// Page background color
    #[clap(long, default_value = "#ffffff")]
    pub background_color: Color,

    /// Route stroke width
    #[clap(long, default_value = "2.0")]
    pub line_width: f64,

    /// Extra text placed near the page center (repeatable)
    #[clap(short, long = "text", value_name = "TEXT")]
    pub texts: Vec<String>,

    /// Do not add the name/date/distance/duration captions
    #[clap(long, default_value = "false")]
    pub no_default_annotations: bool,

    /// Write one `<name>.scene.json` per track into this directory instead of stdout
    #[clap(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Pretty-print the scene JSON
    #[clap(long, default_value = "false")]
    pub pretty: bool,
}

impl Settings {
    /// Parse settings from the command line, exiting with usage on error
    pub fn from_cli() -> Self {
        match parse_args::<Settings>() {
            Ok(args) => args,
            Err(e) => e.exit(),
        }
    }

    pub fn route_style(&self) -> RouteStyle {
        RouteStyle {
            route_color: self.route_color,
            background_color: self.background_color,
            line_width_pt: self.line_width,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::try_parse_from(["route-poster", "ride.gpx"]).unwrap();
        assert_eq!(settings.files, vec![PathBuf::from("ride.gpx")]);
        assert_eq!(settings.page_size, PageSize::A4);
        assert_eq!(settings.padding, 40.0);
        assert_eq!(settings.route_style(), RouteStyle::default());
        assert!(settings.texts.is_empty());
        assert!(!settings.no_default_annotations);
        assert!(settings.output_dir.is_none());
    }

    #[test]
    fn test_full_arguments() {
        let settings = Settings::try_parse_from([
            "route-poster",
            "--page-size",
            "A2",
            "--padding",
            "25",
            "--route-color",
            "#c00",
            "--background-color",
            "#101030",
            "--line-width",
            "4",
            "-t",
            "Berlin Marathon",
            "-t",
            "2024",
            "--no-default-annotations",
            "-o",
            "out",
            "a.gpx",
            "b.fit",
        ])
        .unwrap();
        assert_eq!(settings.page_size, PageSize::A2);
        assert_eq!(settings.padding, 25.0);
        assert_eq!(settings.route_color, Color::from_rgb(204, 0, 0));
        assert_eq!(settings.background_color, Color::from_rgb(16, 16, 48));
        assert_eq!(settings.line_width, 4.0);
        assert_eq!(settings.texts, ["Berlin Marathon", "2024"]);
        assert!(settings.no_default_annotations);
        assert_eq!(settings.output_dir, Some(PathBuf::from("out")));
        assert_eq!(settings.files.len(), 2);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(Settings::try_parse_from(["route-poster"]).is_err());
        assert!(Settings::try_parse_from(["route-poster", "-p", "letter", "a.gpx"]).is_err());
        assert!(
            Settings::try_parse_from(["route-poster", "--route-color", "red", "a.gpx"]).is_err()
        );
    }
}
