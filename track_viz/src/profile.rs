//! Elevation profile rendering: cumulative distance on the x axis, elevation
//! on the y axis, drawn as a filled area chart with plotters.

use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::{FontDesc, FontFamily, FontStyle};

use crate::TrackError;

// 9x3 inches at 100 dots per inch.
pub const FIGURE_SIZE: (u32, u32) = (900, 300);

const FILL_COLOR: RGBColor = RGBColor(31, 119, 180);

enum ChartKind {
    Png,
    Svg,
}

impl ChartKind {
    fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("svg") => ChartKind::Svg,
            _ => ChartKind::Png,
        }
    }
}

/// Exact (min, max) of the elevation series. Errors on an empty sequence.
pub fn elevation_range(elevations: &[f64]) -> Result<(f64, f64), TrackError> {
    let (&first, rest) = elevations.split_first().ok_or(TrackError::EmptySegment)?;
    let mut min = first;
    let mut max = first;
    for &value in rest {
        min = min.min(value);
        max = max.max(value);
    }
    Ok((min, max))
}

/// Render the filled elevation-vs-distance chart to `path`, overwriting any
/// existing file. The backend is chosen by extension (`.svg` vector output,
/// PNG bitmap otherwise) and the y axis is clamped exactly to the elevation
/// range.
pub fn render(distances: &[f64], elevations: &[f64], path: &Path) -> Result<(), TrackError> {
    let (y_min, y_max) = elevation_range(elevations)?;
    match ChartKind::from_path(path) {
        ChartKind::Png => {
            let root = BitMapBackend::new(path, FIGURE_SIZE).into_drawing_area();
            draw(root, distances, elevations, y_min, y_max)
        }
        ChartKind::Svg => {
            let root = SVGBackend::new(path, FIGURE_SIZE).into_drawing_area();
            draw(root, distances, elevations, y_min, y_max)
        }
    }
}

fn draw<DB>(
    root: DrawingArea<DB, Shift>,
    distances: &[f64],
    elevations: &[f64],
    y_min: f64,
    y_max: f64,
) -> Result<(), TrackError>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE).map_err(render_err)?;

    let x_max = distances.iter().copied().fold(0.0, f64::max);
    let mut chart = ChartBuilder::on(&root)
        .margin(15)
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .set_label_area_size(LabelAreaPosition::Bottom, 40)
        .build_cartesian_2d(0.0..x_max, y_min..y_max)
        .map_err(render_err)?;

    let axis_font = FontDesc::new(FontFamily::SansSerif, 18.0, FontStyle::Normal);
    chart
        .configure_mesh()
        .light_line_style(&TRANSPARENT)
        .bold_line_style(&TRANSPARENT)
        .x_label_formatter(&label_km)
        .y_label_formatter(&label_m)
        .label_style(axis_font.color(&BLACK.mix(0.85)))
        .draw()
        .map_err(render_err)?;

    chart
        .draw_series(AreaSeries::new(
            distances
                .iter()
                .copied()
                .zip(elevations.iter().copied()),
            0.0,
            FILL_COLOR.mix(0.9),
        ))
        .map_err(render_err)?;

    root.present().map_err(render_err)?;
    Ok(())
}

fn render_err<E: std::error::Error>(e: E) -> TrackError {
    TrackError::Render(e.to_string())
}

/// Distance tick label: meters shown as kilometers, trailing zeros trimmed.
pub fn label_km(x: &f64) -> String {
    format!("{}km", trim_zeros(x / 1000.0))
}

/// Elevation tick label: meters, trailing zeros trimmed.
pub fn label_m(y: &f64) -> String {
    format!("{}m", trim_zeros(*y))
}

fn trim_zeros(value: f64) -> String {
    let mut s = format!("{:.6}", value);
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    if s == "-0" {
        s = "0".to_string();
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_is_exact_min_max() {
        assert_eq!(elevation_range(&[10.0, 20.0, 0.0]).unwrap(), (0.0, 20.0));
        assert_eq!(elevation_range(&[5.0]).unwrap(), (5.0, 5.0));
    }

    #[test]
    fn range_of_empty_sequence_fails() {
        assert!(matches!(
            elevation_range(&[]),
            Err(TrackError::EmptySegment)
        ));
    }

    #[test]
    fn labels_trim_trailing_zeros() {
        assert_eq!(label_km(&1500.0), "1.5km");
        assert_eq!(label_km(&2000.0), "2km");
        assert_eq!(label_km(&250.0), "0.25km");
        assert_eq!(label_m(&20.0), "20m");
        assert_eq!(label_m(&-12.5), "-12.5m");
        assert_eq!(label_m(&0.0), "0m");
    }

    #[test]
    fn renders_png_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.png");
        let distances = [0.0, 500.0, 1200.0];
        let elevations = [10.0, 20.0, 0.0];
        render(&distances, &elevations, &path).unwrap();
        let metadata = std::fs::metadata(&path).unwrap();
        assert!(metadata.len() > 0);
    }

    #[test]
    fn renders_svg_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.svg");
        render(&[0.0, 1000.0], &[1.0, 2.0], &path).unwrap();
        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"));
    }

    #[test]
    fn empty_elevations_fail_before_any_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.png");
        assert!(matches!(
            render(&[], &[], &path),
            Err(TrackError::EmptySegment)
        ));
        assert!(!path.exists());
    }
}
