//! Performance benchmarks for route-poster-lib
//!
//! Run with: cargo bench --package route-poster-lib

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use route_poster_lib::{Coordinate, PageSize, SceneBuilder, Track, TrackMetadata, parse_track};
use std::fmt::Write;
use std::hint::black_box;

/// Generate a realistic wiggly track with the specified number of points.
fn generate_coordinates(num_points: usize, base_lat: f64, base_lon: f64) -> Vec<Coordinate> {
    (0..num_points)
        .map(|i| {
            let t = i as f64 / num_points as f64;
            let lat = base_lat + t * 0.1 + (t * 50.0).sin() * 0.001;
            let lon = base_lon + t * 0.1 + (t * 30.0).cos() * 0.001;
            Coordinate::new(lat, lon)
        })
        .collect()
}

/// Serialize coordinates as a minimal GPX document with one timestamp per point
fn generate_gpx(coordinates: &[Coordinate]) -> String {
    let mut gpx = String::from("<gpx version=\"1.1\"><trk><name>Bench</name><trkseg>");
    for (i, c) in coordinates.iter().enumerate() {
        let _ = write!(
            gpx,
            "<trkpt lat=\"{}\" lon=\"{}\"><time>2024-01-01T{:02}:{:02}:{:02}Z</time></trkpt>",
            c.lat,
            c.lon,
            (i / 3600) % 24,
            (i / 60) % 60,
            i % 60
        );
    }
    gpx.push_str("</trkseg></trk></gpx>");
    gpx
}

/// Encode coordinates as FIT-like data records (semicircles) behind a 12-byte header
fn generate_fit(coordinates: &[Coordinate]) -> Vec<u8> {
    let to_semicircles = |deg: f64| (deg * 2_147_483_648.0 / 180.0) as i32;
    let mut data = vec![12, 0x10, 0, 0, 0, 0, 0, 0, b'.', b'F', b'I', b'T'];
    for c in coordinates {
        data.push(0x00);
        data.extend_from_slice(&to_semicircles(c.lat).to_le_bytes());
        data.extend_from_slice(&to_semicircles(c.lon).to_le_bytes());
    }
    data.extend_from_slice(&[0, 0]);
    data
}

// ============================================================================
// Core Benchmarks - Key performance indicators
// ============================================================================

fn bench_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for num_points in [1_000, 50_000] {
        let coordinates = generate_coordinates(num_points, 51.5, -0.1);
        let gpx = generate_gpx(&coordinates);
        let fit = generate_fit(&coordinates);

        group.throughput(Throughput::Elements(num_points as u64));
        group.bench_with_input(BenchmarkId::new("gpx", num_points), &gpx, |b, gpx| {
            b.iter(|| parse_track("bench.gpx", black_box(gpx.as_bytes())))
        });
        group.bench_with_input(BenchmarkId::new("fit", num_points), &fit, |b, fit| {
            b.iter(|| parse_track("bench.fit", black_box(fit)))
        });
    }

    group.finish();
}

fn bench_scene_building(c: &mut Criterion) {
    let mut group = c.benchmark_group("scene");

    for num_points in [1_000, 100_000] {
        let track = Track::new(
            generate_coordinates(num_points, 51.5, -0.1),
            TrackMetadata::default(),
        );

        group.throughput(Throughput::Elements(num_points as u64));
        group.bench_with_input(BenchmarkId::new("a4", num_points), &track, |b, track| {
            let builder = SceneBuilder::new(PageSize::A4);
            b.iter(|| builder.build(black_box(track), &[]))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parsing, bench_scene_building);
criterion_main!(benches);
