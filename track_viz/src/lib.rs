//! GPX track visualization library: segment selection, path geometry, and
//! the map/profile renderers.

pub mod map;
pub mod profile;

use std::io::Cursor;

use gpx::{Gpx, TrackSegment};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrackError {
    #[error("failed to parse GPX file: {0}")]
    GpxParse(String),
    #[error("track index {index} out of range: file has {count} track(s)")]
    TrackIndex { index: usize, count: usize },
    #[error("segment index {index} out of range: track has {count} segment(s)")]
    SegmentIndex { index: usize, count: usize },
    #[error("segment has no points")]
    EmptySegment,
    #[error("failed to render output: {0}")]
    Render(String),
}

/// Parse a GPX document from raw file bytes.
pub fn parse_gpx(input: &[u8]) -> Result<Gpx, TrackError> {
    let cursor = Cursor::new(input);
    gpx::read(cursor).map_err(|e| TrackError::GpxParse(e.to_string()))
}

/// Select one segment out of the parsed document by track and segment index.
///
/// A document with zero tracks (or a track with zero segments) takes the same
/// out-of-range path as a numeric overshoot, with `count = 0`.
pub fn select_segment(
    gpx: &Gpx,
    track: usize,
    segment: usize,
) -> Result<&TrackSegment, TrackError> {
    let track_data = gpx.tracks.get(track).ok_or(TrackError::TrackIndex {
        index: track,
        count: gpx.tracks.len(),
    })?;
    track_data
        .segments
        .get(segment)
        .ok_or(TrackError::SegmentIndex {
            index: segment,
            count: track_data.segments.len(),
        })
}

/// Ordered (latitude, longitude) pairs for every point in the segment.
pub fn coordinates(segment: &TrackSegment) -> Vec<(f64, f64)> {
    segment
        .points
        .iter()
        .map(|p| {
            let point = p.point();
            (point.y(), point.x())
        })
        .collect()
}

/// Per-point elevation in meters. Missing elevation is zero-filled rather
/// than rejected; the resulting dip to 0 in the profile is accepted.
pub fn elevations(segment: &TrackSegment) -> Vec<f64> {
    segment
        .points
        .iter()
        .map(|p| p.elevation.unwrap_or(0.0))
        .collect()
}

/// Cumulative horizontal distance in meters, one entry per point.
///
/// The first entry is exactly 0 (a point's distance to itself), and the
/// sequence is monotonically non-decreasing. Elevation is ignored.
pub fn cumulative_distances(segment: &TrackSegment) -> Vec<f64> {
    let mut out = Vec::with_capacity(segment.points.len());
    let mut total = 0.0;
    let mut last: Option<(f64, f64)> = None;
    for p in &segment.points {
        let point = p.point();
        let (lat, lon) = (point.y(), point.x());
        if let Some((last_lat, last_lon)) = last {
            total += haversine_distance(last_lat, last_lon, lat, lon);
        }
        last = Some((lat, lon));
        out.push(total);
    }
    out
}

fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let r = 6_371_000.0_f64;
    let dlat = (lat2 - lat1).to_radians();
    let dlon = (lon2 - lon1).to_radians();
    let a = (dlat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    r * c
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="track_viz" xmlns="http://www.topografix.com/GPX/1/1">
  <trk>
    <name>fixture</name>
    <trkseg>
      <trkpt lat="0" lon="0"><ele>10</ele></trkpt>
      <trkpt lat="0" lon="0.01"><ele>20</ele></trkpt>
      <trkpt lat="0" lon="0.02"></trkpt>
    </trkseg>
    <trkseg></trkseg>
  </trk>
</gpx>
"#;

    fn fixture() -> Gpx {
        parse_gpx(FIXTURE.as_bytes()).expect("fixture parses")
    }

    #[test]
    fn test_haversine_distance() {
        let dist = haversine_distance(0.0, 0.0, 0.0, 1.0);
        assert!((dist - 111_195.0).abs() < 200.0);
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(matches!(
            parse_gpx(b"not a gpx file"),
            Err(TrackError::GpxParse(_))
        ));
    }

    #[test]
    fn selects_segment_by_index() {
        let gpx = fixture();
        let segment = select_segment(&gpx, 0, 0).unwrap();
        assert_eq!(segment.points.len(), 3);
    }

    #[test]
    fn track_index_out_of_range() {
        let gpx = fixture();
        match select_segment(&gpx, 5, 0) {
            Err(TrackError::TrackIndex { index: 5, count: 1 }) => {}
            other => panic!("expected track index error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn segment_index_out_of_range() {
        let gpx = fixture();
        match select_segment(&gpx, 0, 2) {
            Err(TrackError::SegmentIndex { index: 2, count: 2 }) => {}
            other => panic!("expected segment index error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn coordinates_preserve_order() {
        let gpx = fixture();
        let segment = select_segment(&gpx, 0, 0).unwrap();
        let coords = coordinates(segment);
        assert_eq!(coords, vec![(0.0, 0.0), (0.0, 0.01), (0.0, 0.02)]);
    }

    #[test]
    fn missing_elevation_is_zero_filled() {
        let gpx = fixture();
        let segment = select_segment(&gpx, 0, 0).unwrap();
        assert_eq!(elevations(segment), vec![10.0, 20.0, 0.0]);
    }

    #[test]
    fn cumulative_distances_start_at_zero_and_grow() {
        let gpx = fixture();
        let segment = select_segment(&gpx, 0, 0).unwrap();
        let distances = cumulative_distances(segment);
        assert_eq!(distances.len(), 3);
        assert_eq!(distances[0], 0.0);
        assert!(distances[1] > 0.0);
        assert!(distances[2] > distances[1]);
        // 0.01 degrees of longitude at the equator is roughly 1.1 km.
        assert!((distances[1] - 1_112.0).abs() < 10.0);
        assert!((distances[2] - 2.0 * distances[1]).abs() < 1e-6);
    }

    #[test]
    fn empty_segment_yields_empty_series() {
        let gpx = fixture();
        let segment = select_segment(&gpx, 0, 1).unwrap();
        assert!(coordinates(segment).is_empty());
        assert!(elevations(segment).is_empty());
        assert!(cumulative_distances(segment).is_empty());
    }
}
