pub(crate) mod export;
pub(crate) mod loader;
pub(crate) mod settings;

use export::{SceneDocument, StemAllocator};
use loader::LoadedFile;
use route_poster_lib::annotation::default_annotations;
use route_poster_lib::utils::{export_file_stem, format_distance, format_duration_short};
use route_poster_lib::{SceneBuilder, TextAnnotation, Track, TrackError, TrackMetadata};
use settings::Settings;
use std::path::{Path, PathBuf};

/// Failures of a single input file; other files keep going
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: {source}", path.display())]
    Track {
        path: PathBuf,
        #[source]
        source: TrackError,
    },

    #[error("Processing of {} was aborted", path.display())]
    Aborted { path: PathBuf },

    #[error("Failed to serialize scene: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write to stdout: {0}")]
    Stdout(#[source] std::io::Error),
}

/// Outcome counts of one run
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunReport {
    pub succeeded: usize,
    pub failed: usize,
}

/// Batch pipeline: files in, one scene per file out
pub struct PosterApp {
    settings: Settings,
    builder: SceneBuilder,
}

impl PosterApp {
    pub fn new(settings: Settings) -> Self {
        let builder = SceneBuilder::new(settings.page_size)
            .with_padding(settings.padding)
            .with_style(settings.route_style());
        Self { settings, builder }
    }

    /// Captions for one track: the metadata rows unless disabled, then every `--text`
    pub fn annotations_for(&self, metadata: &TrackMetadata) -> Vec<TextAnnotation> {
        let mut annotations = if self.settings.no_default_annotations {
            Vec::new()
        } else {
            default_annotations(metadata)
        };
        annotations.extend(
            self.settings
                .texts
                .iter()
                .map(|text| TextAnnotation::centered_on(self.settings.page_size, text.as_str())),
        );
        annotations
    }

    pub async fn run(&self) -> RunReport {
        profiling::scope!("PosterApp::run");

        tracing::info!(
            "Laying out {} file(s) on {} with {} mm padding",
            self.settings.files.len(),
            self.settings.page_size,
            self.settings.padding
        );

        let loaded = loader::load_tracks(&self.settings.files).await;
        let mut stems = StemAllocator::default();
        let mut report = RunReport::default();

        for LoadedFile { path, result } in loaded {
            let outcome = match result {
                Ok(track) => self.export(&path, &track, &mut stems).await,
                Err(e) => Err(e),
            };
            match outcome {
                Ok(()) => report.succeeded += 1,
                Err(e) => {
                    tracing::error!("{}", e);
                    report.failed += 1;
                }
            }
        }

        report
    }

    async fn export(
        &self,
        path: &Path,
        track: &Track,
        stems: &mut StemAllocator,
    ) -> Result<(), AppError> {
        let annotations = self.annotations_for(&track.metadata);
        let scene = self.builder.build(track, &annotations);
        let document = SceneDocument {
            source: path,
            metadata: &track.metadata,
            scene: &scene,
        };
        let json = export::to_json(&document, self.settings.pretty)?;

        match &self.settings.output_dir {
            Some(dir) => {
                let stem = stems.allocate(export_file_stem(track.metadata.name.as_deref()));
                let written = export::write_to_dir(dir, &stem, &json).await?;
                tracing::info!("Wrote {}", written.display());
            }
            None => export::write_stdout(&json).await?,
        }

        tracing::info!(
            "{}: {} points, {}, {}",
            path.display(),
            track.len(),
            format_distance(track.metadata.distance_meters),
            track
                .metadata
                .duration_seconds
                .map(format_duration_short)
                .unwrap_or_else(|| "no timing".to_string())
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    const LOOP_GPX: &str = r#"<gpx><trk><name>Harbour Loop</name><trkseg>
        <trkpt lat="53.54" lon="9.98"><time>2024-05-04T08:00:00Z</time></trkpt>
        <trkpt lat="53.55" lon="9.99"><time>2024-05-04T08:20:00Z</time></trkpt>
    </trkseg></trk></gpx>"#;

    fn scratch_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("route-poster-{}-{}", name, std::process::id()))
    }

    fn settings(args: &[&str]) -> Settings {
        Settings::try_parse_from(std::iter::once("route-poster").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_annotations_default_and_custom() {
        let app = PosterApp::new(settings(&["-t", "Hamburg", "x.gpx"]));
        let metadata = TrackMetadata {
            name: Some("Harbour Loop".to_string()),
            ..Default::default()
        };
        let annotations = app.annotations_for(&metadata);
        assert_eq!(annotations.first().map(|a| a.text.as_str()), Some("Harbour Loop"));
        assert_eq!(annotations.last().map(|a| a.text.as_str()), Some("Hamburg"));

        let app = PosterApp::new(settings(&["--no-default-annotations", "-t", "Hamburg", "x.gpx"]));
        let annotations = app.annotations_for(&metadata);
        assert_eq!(annotations.len(), 1);
        assert_eq!(annotations[0].font_size_pt, 20.0);
    }

    #[tokio::test]
    async fn test_run_writes_scene_files_and_counts_failures() {
        let dir = scratch_dir("run");
        let out = dir.join("out");
        tokio::fs::create_dir_all(&dir).await.unwrap();
        let gpx = dir.join("loop.gpx");
        tokio::fs::write(&gpx, LOOP_GPX).await.unwrap();
        let kml = dir.join("loop.kml");
        tokio::fs::write(&kml, LOOP_GPX).await.unwrap();

        let app = PosterApp::new(settings(&[
            "-o",
            out.to_str().unwrap(),
            gpx.to_str().unwrap(),
            gpx.to_str().unwrap(),
            kml.to_str().unwrap(),
            dir.join("missing.fit").to_str().unwrap(),
        ]));
        let report = app.run().await;
        assert_eq!(
            report,
            RunReport {
                succeeded: 2,
                failed: 2
            }
        );

        let first = tokio::fs::read_to_string(out.join("Harbour_Loop.scene.json"))
            .await
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&first).unwrap();
        assert_eq!(value["scene"]["page_size"], "a4");
        assert_eq!(value["scene"]["annotations"][0]["text"], "Harbour Loop");
        assert!(out.join("Harbour_Loop_2.scene.json").exists());

        let _ = tokio::fs::remove_dir_all(&dir).await;
    }
}
