//! Tile map, marker and geofence configuration.

use serde::{Deserialize, Serialize};

use crate::config::map::{self as defaults, geofence, marker};
use crate::core::error::WidgetError;

/// A point as (latitude, longitude). Serializes as `[lat, lng]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng(pub f64, pub f64);

impl LatLng {
    pub fn lat(&self) -> f64 {
        self.0
    }

    pub fn lng(&self) -> f64 {
        self.1
    }
}

/// Initial viewport of a map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapView {
    pub center: LatLng,
    pub zoom: u8,
}

impl Default for MapView {
    fn default() -> Self {
        let (lat, lng) = defaults::DEFAULT_CENTER;
        Self {
            center: LatLng(lat, lng),
            zoom: defaults::DEFAULT_ZOOM,
        }
    }
}

/// Tile layer source and options.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TileLayer {
    #[serde(skip)]
    pub url_template: &'static str,
    pub attribution: &'static str,
    pub max_zoom: u8,
}

impl Default for TileLayer {
    fn default() -> Self {
        Self {
            url_template: defaults::TILE_URL,
            attribution: defaults::TILE_ATTRIBUTION,
            max_zoom: defaults::TILE_MAX_ZOOM,
        }
    }
}

/// Path style shared by circle markers and polygons.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<String>,
    pub color: String,
    pub weight: f64,
    pub opacity: f64,
    pub fill_opacity: f64,
}

impl PathStyle {
    /// Fixed-radius circle marker filled with `fill`.
    pub fn marker(fill: &str) -> Self {
        Self {
            radius: Some(marker::RADIUS),
            fill_color: Some(fill.to_string()),
            color: marker::STROKE.to_string(),
            weight: marker::WEIGHT,
            opacity: marker::OPACITY,
            fill_opacity: marker::FILL_OPACITY,
        }
    }

    /// Translucent geofence polygon.
    pub fn geofence() -> Self {
        Self {
            radius: None,
            fill_color: None,
            color: geofence::COLOR.to_string(),
            weight: geofence::WEIGHT,
            opacity: geofence::OPACITY,
            fill_opacity: geofence::FILL_OPACITY,
        }
    }
}

/// Mapping library bound to containers on the page.
pub trait MapBackend {
    type Map;
    type Layer;

    /// Create a map in the container with the given id and add the tiles.
    fn create_map(
        &self,
        element_id: &str,
        view: MapView,
        tiles: &TileLayer,
    ) -> Result<Self::Map, WidgetError>;

    /// Add a circle marker with a popup.
    fn add_circle_marker(
        &self,
        map: &Self::Map,
        at: LatLng,
        style: &PathStyle,
        popup: &str,
    ) -> Result<Self::Layer, WidgetError>;

    /// Add a polygon with a popup.
    fn add_polygon(
        &self,
        map: &Self::Map,
        ring: &[LatLng],
        style: &PathStyle,
        popup: &str,
    ) -> Result<Self::Layer, WidgetError>;
}

/// Map, marker and geofence constructors over a [`MapBackend`].
///
/// Coordinates are passed through as given; ranges are not checked.
pub struct MapFactory<B> {
    backend: B,
}

impl<B: MapBackend> MapFactory<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Create a map, defaulting to center `[20, 0]` and zoom 2.
    pub fn init_map(
        &self,
        element_id: &str,
        center: Option<LatLng>,
        zoom: Option<u8>,
    ) -> Result<B::Map, WidgetError> {
        let fallback = MapView::default();
        let view = MapView {
            center: center.unwrap_or(fallback.center),
            zoom: zoom.unwrap_or(fallback.zoom),
        };
        self.backend.create_map(element_id, view, &TileLayer::default())
    }

    /// Add a circle marker; `color` defaults to blue.
    pub fn add_marker(
        &self,
        map: &B::Map,
        lat: f64,
        lng: f64,
        title: &str,
        color: Option<&str>,
    ) -> Result<B::Layer, WidgetError> {
        let style = PathStyle::marker(color.unwrap_or(marker::DEFAULT_FILL));
        self.backend.add_circle_marker(map, LatLng(lat, lng), &style, title)
    }

    pub fn add_geofence(
        &self,
        map: &B::Map,
        coordinates: &[LatLng],
        name: &str,
    ) -> Result<B::Layer, WidgetError> {
        self.backend.add_polygon(map, coordinates, &PathStyle::geofence(), name)
    }
}
