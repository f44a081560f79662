use crate::models::{City, Coordinates, LayerStyle, MapLine, MapPoint, RouteMapSpec, ViewState};
use geo::{coord, Centroid, HaversineLength, Line};

pub const DEFAULT_ZOOM: f64 = 4.0;
pub const DEFAULT_MAP_STYLE: &str = "https://basemaps.cartocdn.com/gl/positron-gl-style/style.json";

/// Fixed airport-city coordinates
pub fn city_coordinates(city: City) -> Coordinates {
    let (lat, lon) = match city {
        City::Delhi => (28.6139, 77.2090),
        City::Mumbai => (19.0760, 72.8777),
        City::Bangalore => (12.9716, 77.5946),
        City::Hyderabad => (17.3850, 78.4867),
        City::Kolkata => (22.5726, 88.3639),
        City::Chennai => (13.0827, 80.2707),
    };
    Coordinates { lat, lon }
}

/// Builds the two-point route map shown under the form
#[derive(Debug, Clone)]
pub struct RouteMapper {
    zoom: f64,
    pitch: f64,
    map_style: String,
    style: LayerStyle,
}

impl Default for RouteMapper {
    fn default() -> Self {
        Self::new(DEFAULT_ZOOM, 0.0, DEFAULT_MAP_STYLE.to_string())
    }
}

impl RouteMapper {
    pub fn new(zoom: f64, pitch: f64, map_style: String) -> Self {
        Self {
            zoom,
            pitch,
            map_style,
            style: LayerStyle {
                point_color: [200, 30, 0, 160],
                point_radius: 50_000,
                line_color: [0, 0, 255],
                line_width: 5,
            },
        }
    }

    /// Lay out source and destination markers, the joining line and a camera
    /// centred on the midpoint of the two cities.
    pub fn build(&self, source: City, destination: City) -> RouteMapSpec {
        let src = city_coordinates(source);
        let dst = city_coordinates(destination);

        let line = Line::new(coord! { x: src.lon, y: src.lat }, coord! { x: dst.lon, y: dst.lat });
        let center = line.centroid();
        let distance_km = line.haversine_length() / 1000.0;

        RouteMapSpec {
            points: [
                MapPoint {
                    name: "Source".to_string(),
                    city: source,
                    lat: src.lat,
                    lon: src.lon,
                },
                MapPoint {
                    name: "Destination".to_string(),
                    city: destination,
                    lat: dst.lat,
                    lon: dst.lon,
                },
            ],
            line: MapLine {
                from_lat: src.lat,
                from_lon: src.lon,
                to_lat: dst.lat,
                to_lon: dst.lon,
            },
            view_state: ViewState {
                latitude: center.y(),
                longitude: center.x(),
                zoom: self.zoom,
                pitch: self.pitch,
            },
            map_style: self.map_style.clone(),
            style: self.style.clone(),
            distance_km,
        }
    }
}
