//! Interactive map rendering: the selected segment drawn as a polyline on an
//! OpenStreetMap base layer, serialized as a self-contained HTML document.

use crate::TrackError;

pub const MAP_WIDTH: u32 = 1024;
pub const MAP_HEIGHT: u32 = 768;
pub const PATH_WEIGHT: u32 = 6;

const TILE_URL: &str = "https://tile.openstreetmap.org/{z}/{x}/{y}.png";
const TILE_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";

const MAP_TEMPLATE: &str = r##"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8" />
<meta name="viewport" content="width=device-width, initial-scale=1.0" />
<title>Track map</title>
<link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css" />
<script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
<style>
  #map { width: %WIDTH%px; height: %HEIGHT%px; }
</style>
</head>
<body>
<div id="map"></div>
<script>
  var map = L.map('map');
  L.tileLayer('%TILE_URL%', {
    maxZoom: 19,
    attribution: '%ATTRIBUTION%'
  }).addTo(map);
  var track = %COORDINATES%;
  L.polyline(track, { weight: %WEIGHT% }).addTo(map);
  map.fitBounds([[%MIN_LAT%, %MIN_LON%], [%MAX_LAT%, %MAX_LON%]]);
</script>
</body>
</html>
"##;

/// Minimal bounding box over a (latitude, longitude) sequence.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min_lat: f64,
    pub min_lon: f64,
    pub max_lat: f64,
    pub max_lon: f64,
}

/// Compute the minimal bounding box enclosing every coordinate.
///
/// Errors on an empty sequence: there are no bounds to fit.
pub fn fit_bounds(coords: &[(f64, f64)]) -> Result<Bounds, TrackError> {
    let (&(first_lat, first_lon), rest) =
        coords.split_first().ok_or(TrackError::EmptySegment)?;
    let mut bounds = Bounds {
        min_lat: first_lat,
        min_lon: first_lon,
        max_lat: first_lat,
        max_lon: first_lon,
    };
    for &(lat, lon) in rest {
        bounds.min_lat = bounds.min_lat.min(lat);
        bounds.min_lon = bounds.min_lon.min(lon);
        bounds.max_lat = bounds.max_lat.max(lat);
        bounds.max_lon = bounds.max_lon.max(lon);
    }
    Ok(bounds)
}

/// Render the standalone Leaflet document for the given coordinate sequence.
///
/// The polyline keeps the segment's point count and order; the initial
/// viewport is fitted to the path bounds.
pub fn render_html(coords: &[(f64, f64)]) -> Result<String, TrackError> {
    let bounds = fit_bounds(coords)?;
    let coords_json =
        serde_json::to_string(coords).map_err(|e| TrackError::Render(e.to_string()))?;
    Ok(MAP_TEMPLATE
        .replace("%WIDTH%", &MAP_WIDTH.to_string())
        .replace("%HEIGHT%", &MAP_HEIGHT.to_string())
        .replace("%TILE_URL%", TILE_URL)
        .replace("%ATTRIBUTION%", TILE_ATTRIBUTION)
        .replace("%COORDINATES%", &coords_json)
        .replace("%WEIGHT%", &PATH_WEIGHT.to_string())
        .replace("%MIN_LAT%", &bounds.min_lat.to_string())
        .replace("%MIN_LON%", &bounds.min_lon.to_string())
        .replace("%MAX_LAT%", &bounds.max_lat.to_string())
        .replace("%MAX_LON%", &bounds.max_lon.to_string()))
}
