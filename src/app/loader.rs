use super::AppError;
use rayon::prelude::*;
use route_poster_lib::{Track, parse_track};
use std::path::{Path, PathBuf};
use tokio::task::JoinSet;

/// One input file after reading and parsing
#[derive(Debug)]
pub struct LoadedFile {
    pub path: PathBuf,
    pub result: Result<Track, AppError>,
}

type RawFile = (PathBuf, Result<Vec<u8>, AppError>);

/// Read and parse every file, keeping the input order
///
/// Reads run concurrently on the async runtime, parsing runs on the rayon pool.
pub async fn load_tracks(paths: &[PathBuf]) -> Vec<LoadedFile> {
    let files = read_files(paths).await;
    match tokio::task::spawn_blocking(move || parse_files(files)).await {
        Ok(loaded) => loaded,
        Err(e) => {
            tracing::error!("Parsing task failed: {}", e);
            paths
                .iter()
                .map(|path| LoadedFile {
                    path: path.clone(),
                    result: Err(AppError::Aborted { path: path.clone() }),
                })
                .collect()
        }
    }
}

async fn read_files(paths: &[PathBuf]) -> Vec<RawFile> {
    profiling::scope!("read_files");

    let mut tasks = JoinSet::new();
    for (index, path) in paths.iter().cloned().enumerate() {
        tasks.spawn(async move {
            let result = tokio::fs::read(&path)
                .await
                .map_err(|source| AppError::Read {
                    path: path.clone(),
                    source,
                });
            (index, result)
        });
    }

    let mut slots: Vec<Option<Result<Vec<u8>, AppError>>> = paths.iter().map(|_| None).collect();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, result)) => slots[index] = Some(result),
            Err(e) => tracing::error!("File read task failed: {}", e),
        }
    }

    paths
        .iter()
        .zip(slots)
        .map(|(path, slot)| {
            let result = slot.unwrap_or_else(|| Err(AppError::Aborted { path: path.clone() }));
            (path.clone(), result)
        })
        .collect()
}

fn parse_files(files: Vec<RawFile>) -> Vec<LoadedFile> {
    profiling::scope!("parse_files");

    files
        .into_par_iter()
        .map(|(path, bytes)| {
            let result = bytes.and_then(|bytes| parse_file(&path, &bytes));
            LoadedFile { path, result }
        })
        .collect()
}

/// Parse one file by its extension, rejecting tracks without coordinates
fn parse_file(path: &Path, bytes: &[u8]) -> Result<Track, AppError> {
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_else(|| path.to_string_lossy());
    parse_track(&filename, bytes)
        .and_then(Track::require_coordinates)
        .map_err(|source| AppError::Track {
            path: path.to_path_buf(),
            source,
        })
}
