use crate::domain::model::{Coordinate, Viewport};

pub const DEFAULT_CENTER: Coordinate = Coordinate::new(0.0, 0.0);
pub const DEFAULT_ZOOM: u8 = 2;

// (上限, 縮放等級)，上限不含
const ZOOM_LADDER: [(f64, u8); 4] = [(1.0, 10), (5.0, 8), (20.0, 6), (60.0, 4)];

/// Picks the zoom level for the larger of the latitude/longitude spans.
pub fn zoom_for_range(max_range: f64) -> u8 {
    ZOOM_LADDER
        .iter()
        .find(|(limit, _)| max_range < *limit)
        .map(|(_, zoom)| *zoom)
        .unwrap_or(DEFAULT_ZOOM)
}

/// Centers on the mean coordinate and zooms to fit the spread of all points.
/// An empty slice gives the world view.
pub fn calculate_viewport(coordinates: &[Coordinate]) -> Viewport {
    if coordinates.is_empty() {
        return Viewport {
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
        };
    }

    let count = coordinates.len() as f64;
    let mut lat_sum = 0.0;
    let mut lon_sum = 0.0;
    let mut lat_min = f64::INFINITY;
    let mut lat_max = f64::NEG_INFINITY;
    let mut lon_min = f64::INFINITY;
    let mut lon_max = f64::NEG_INFINITY;

    for coordinate in coordinates {
        lat_sum += coordinate.latitude;
        lon_sum += coordinate.longitude;
        lat_min = lat_min.min(coordinate.latitude);
        lat_max = lat_max.max(coordinate.latitude);
        lon_min = lon_min.min(coordinate.longitude);
        lon_max = lon_max.max(coordinate.longitude);
    }

    let max_range = (lat_max - lat_min).max(lon_max - lon_min);

    Viewport {
        center: Coordinate::new(lat_sum / count, lon_sum / count),
        zoom: zoom_for_range(max_range),
    }
}
