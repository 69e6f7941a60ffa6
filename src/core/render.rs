use crate::domain::model::{ResolvedMarker, Viewport};
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};

pub const DEFAULT_OUTPUT_FILE: &str = "locations_map.html";

const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";
const AWESOME_MARKERS_CSS: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/Leaflet.awesome-markers/2.0.2/leaflet.awesome-markers.css";
const AWESOME_MARKERS_JS: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/Leaflet.awesome-markers/2.0.2/leaflet.awesome-markers.js";
const GLYPHICONS_CSS: &str = "https://netdna.bootstrapcdn.com/bootstrap/3.0.0/css/bootstrap-glyphicons.css";

/// 地圖外觀設定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapStyle {
    pub title: String,
    pub tile_url: String,
    pub attribution: String,
    pub marker_color: String,
    pub marker_icon: String,
}

impl Default for MapStyle {
    fn default() -> Self {
        Self {
            title: "Locations".to_string(),
            tile_url: "https://tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            attribution: "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors"
                .to_string(),
            marker_color: "red".to_string(),
            marker_icon: "info-sign".to_string(),
        }
    }
}

/// Renders a standalone full-page Leaflet map with one pin per marker.
///
/// The page has no margins and the map fills the window, so it can be
/// embedded through an iframe as-is.
pub fn render_map(markers: &[ResolvedMarker], viewport: &Viewport, style: &MapStyle) -> Result<String> {
    let mut script = String::new();

    // 地圖與底圖
    script.push_str(&format!(
        "        var map = L.map(\"map\", {{ center: [{}, {}], zoom: {} }});\n",
        viewport.center.latitude, viewport.center.longitude, viewport.zoom
    ));
    script.push_str(&format!(
        "        L.tileLayer({}, {{ attribution: {}, maxZoom: 19 }}).addTo(map);\n",
        js_string(&style.tile_url)?,
        js_string(&style.attribution)?
    ));
    script.push_str(&format!(
        "        var icon = L.AwesomeMarkers.icon({{ icon: {}, markerColor: {}, iconColor: \"white\", prefix: \"glyphicon\" }});\n",
        js_string(&style.marker_icon)?,
        js_string(&style.marker_color)?
    ));

    for marker in markers {
        script.push_str(&format!(
            "        L.marker([{}, {}], {{ icon: icon }}).bindTooltip({}).bindPopup({}).addTo(map);\n",
            marker.coordinate.latitude,
            marker.coordinate.longitude,
            js_string(&escape_html(&marker.name))?,
            js_string(&escape_html(marker.popup_text()))?
        ));
    }

    Ok(format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <link rel="stylesheet" href="{leaflet_css}">
    <link rel="stylesheet" href="{markers_css}">
    <link rel="stylesheet" href="{glyphicons_css}">
    <script src="{leaflet_js}"></script>
    <script src="{markers_js}"></script>
    <style>
        html, body {{ width: 100%; height: 100%; margin: 0; padding: 0; }}
        #map {{ position: absolute; top: 0; bottom: 0; right: 0; left: 0; }}
    </style>
</head>
<body>
    <div id="map"></div>
    <script>
{script}    </script>
</body>
</html>
"#,
        title = escape_html(&style.title),
        leaflet_css = LEAFLET_CSS,
        markers_css = AWESOME_MARKERS_CSS,
        glyphicons_css = GLYPHICONS_CSS,
        leaflet_js = LEAFLET_JS,
        markers_js = AWESOME_MARKERS_JS,
        script = script,
    ))
}

// JSON 字串即合法的 JS 字面值；另外避免 `</script>` 提前結束區塊
fn js_string(text: &str) -> Result<String> {
    Ok(serde_json::to_string(text)?.replace("</", "<\\/"))
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Coordinate, LocationRecord};

    fn marker(name: &str, description: &str, lat: f64, lon: f64) -> ResolvedMarker {
        ResolvedMarker::new(LocationRecord::new(name, description), Coordinate::new(lat, lon))
    }

    fn viewport() -> Viewport {
        Viewport {
            center: Coordinate::new(42.0, 70.0),
            zoom: 4,
        }
    }

    #[test]
    fn test_one_marker_per_location() {
        let markers = vec![
            marker("Paris", "the city of lights", 48.8566, 2.3522),
            marker("Tokyo", "", 35.6762, 139.6503),
        ];
        let html = render_map(&markers, &viewport(), &MapStyle::default()).unwrap();

        assert_eq!(html.matches("L.marker(").count(), 2);
        assert!(html.contains(".bindTooltip(\"Paris\").bindPopup(\"the city of lights\")"));
        assert!(html.contains(".bindTooltip(\"Tokyo\").bindPopup(\"Tokyo\")"));
        assert!(html.contains("L.marker([48.8566, 2.3522]"));
    }

    #[test]
    fn test_viewport_and_full_bleed_page() {
        let html = render_map(&[], &viewport(), &MapStyle::default()).unwrap();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("center: [42, 70], zoom: 4"));
        assert!(html.contains("margin: 0; padding: 0;"));
        assert!(html.contains("#map { position: absolute; top: 0; bottom: 0; right: 0; left: 0; }"));
        assert_eq!(html.matches("L.marker(").count(), 0);
    }

    #[test]
    fn test_script_has_one_statement_per_line() {
        let markers = vec![marker("Paris", "", 48.8566, 2.3522), marker("Tokyo", "", 35.6762, 139.6503)];
        let html = render_map(&markers, &viewport(), &MapStyle::default()).unwrap();

        let marker_lines: Vec<&str> = html.lines().filter(|line| line.contains("L.marker(")).collect();
        assert_eq!(marker_lines.len(), 2);
        assert!(marker_lines.iter().all(|line| line.trim_end().ends_with(".addTo(map);")));
        assert!(html.contains("zoom: 4 });\n        L.tileLayer("));
        assert!(html.contains(".addTo(map);\n    </script>"));
    }

    #[test]
    fn test_default_marker_icon() {
        let html = render_map(&[], &viewport(), &MapStyle::default()).unwrap();
        assert!(html.contains("icon: \"info-sign\", markerColor: \"red\""));
    }

    #[test]
    fn test_text_cannot_break_out_of_script() {
        let markers = vec![marker("Evil", "</script><b>\"hi\"</b>", 0.0, 0.0)];
        let html = render_map(&markers, &viewport(), &MapStyle::default()).unwrap();

        assert_eq!(html.matches("</script>").count(), 3);
        assert!(html.contains("&lt;/script&gt;&lt;b&gt;&quot;hi&quot;&lt;/b&gt;"));
    }

    #[test]
    fn test_custom_style() {
        let style = MapStyle {
            title: "Trip <2024>".to_string(),
            marker_color: "blue".to_string(),
            ..MapStyle::default()
        };
        let html = render_map(&[], &viewport(), &style).unwrap();

        assert!(html.contains("<title>Trip &lt;2024&gt;</title>"));
        assert!(html.contains("markerColor: \"blue\""));
    }
}
