use super::AppError;
use route_poster_lib::{Scene, TrackMetadata};
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

/// Suffix of every scene file written to the output directory
pub const SCENE_FILE_SUFFIX: &str = ".scene.json";

/// What gets handed to a rendering backend for one track
#[derive(Debug, Serialize)]
pub struct SceneDocument<'a> {
    pub source: &'a Path,
    pub metadata: &'a TrackMetadata,
    pub scene: &'a Scene,
}

pub fn to_json(document: &SceneDocument<'_>, pretty: bool) -> Result<String, AppError> {
    let json = if pretty {
        serde_json::to_string_pretty(document)?
    } else {
        serde_json::to_string(document)?
    };
    Ok(json)
}

/// Hands out unique file stems within one run (`loop`, `loop_2`, `loop_3`, ...)
///
/// A generated suffix never reuses a stem already handed out, including one that
/// came from a track literally named `loop_2`.
#[derive(Debug, Default)]
pub struct StemAllocator {
    issued: HashSet<String>,
}

impl StemAllocator {
    pub fn allocate(&mut self, stem: String) -> String {
        if self.issued.insert(stem.clone()) {
            return stem;
        }
        let mut suffix = 2;
        loop {
            let candidate = format!("{}_{}", stem, suffix);
            if self.issued.insert(candidate.clone()) {
                return candidate;
            }
            suffix += 1;
        }
    }
}

/// Write `json` as `<dir>/<stem>.scene.json`, creating the directory if needed
pub async fn write_to_dir(dir: &Path, stem: &str, json: &str) -> Result<PathBuf, AppError> {
    let path = dir.join(format!("{stem}{SCENE_FILE_SUFFIX}"));
    let write_error = |source| AppError::Write {
        path: path.clone(),
        source,
    };
    tokio::fs::create_dir_all(dir).await.map_err(write_error)?;
    tokio::fs::write(&path, json).await.map_err(write_error)?;
    Ok(path)
}

/// Write `json` followed by a newline to stdout
pub async fn write_stdout(json: &str) -> Result<(), AppError> {
    let mut stdout = tokio::io::stdout();
    stdout
        .write_all(json.as_bytes())
        .await
        .map_err(AppError::Stdout)?;
    stdout.write_all(b"\n").await.map_err(AppError::Stdout)?;
    stdout.flush().await.map_err(AppError::Stdout)
}
