//! Bindings to the page's charting, mapping and UI toolkit libraries.
//!
//! The libraries are loaded by the page as globals (`Chart`, `L`,
//! `bootstrap`); nothing here bundles them.

use serde::Serialize;
use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlCanvasElement};

use super::dom::{self, describe_js};
use crate::core::bootstrap::{Toggle, WidgetToolkit};
use crate::core::chart::{ChartBackend, ChartConfig};
use crate::core::error::{DomError, WidgetError};
use crate::core::map::{LatLng, MapBackend, MapView, PathStyle, TileLayer};

/// Convert a config value into a plain JS object.
pub fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, WidgetError> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| WidgetError::InvalidConfig(e.to_string()))
}

fn library_error(err: JsValue) -> WidgetError {
    WidgetError::Library(describe_js(&err))
}

fn require_element(id: &str) -> Result<Element, WidgetError> {
    dom::document()
        .ok_or(DomError::NoDocument)?
        .get_element_by_id(id)
        .ok_or_else(|| WidgetError::ElementNotFound(id.to_string()))
}

// =============================================================================
// Charts
// =============================================================================

#[wasm_bindgen]
extern "C" {
    /// A live chart instance.
    pub type Chart;

    #[wasm_bindgen(constructor, catch)]
    fn new(context: &JsValue, config: &JsValue) -> Result<Chart, JsValue>;
}

/// Renders charts with the global `Chart` constructor.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChartJs;

impl ChartBackend for ChartJs {
    type Chart = Chart;

    fn render(&self, canvas_id: &str, config: &ChartConfig) -> Result<Chart, WidgetError> {
        let canvas = require_element(canvas_id)?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| WidgetError::ElementNotFound(canvas_id.to_string()))?;
        let context = canvas
            .get_context("2d")
            .map_err(library_error)?
            .ok_or_else(|| WidgetError::Library("2d context unavailable".to_string()))?;

        Chart::new(&context, &to_js(config)?).map_err(library_error)
    }
}

// =============================================================================
// Maps
// =============================================================================

#[wasm_bindgen]
extern "C" {
    /// A map instance.
    pub type LeafletMap;

    /// A layer added to a map (tiles, marker, polygon).
    pub type LeafletLayer;

    #[wasm_bindgen(js_namespace = L, js_name = map, catch)]
    fn leaflet_map(element_id: &str) -> Result<LeafletMap, JsValue>;

    #[wasm_bindgen(method, js_name = setView)]
    fn set_view(this: &LeafletMap, center: &JsValue, zoom: u8) -> LeafletMap;

    #[wasm_bindgen(js_namespace = L, js_name = tileLayer, catch)]
    fn tile_layer(url_template: &str, options: &JsValue) -> Result<LeafletLayer, JsValue>;

    #[wasm_bindgen(js_namespace = L, js_name = circleMarker, catch)]
    fn circle_marker(latlng: &JsValue, options: &JsValue) -> Result<LeafletLayer, JsValue>;

    #[wasm_bindgen(js_namespace = L, js_name = polygon, catch)]
    fn polygon(latlngs: &JsValue, options: &JsValue) -> Result<LeafletLayer, JsValue>;

    #[wasm_bindgen(method, js_name = bindPopup)]
    fn bind_popup(this: &LeafletLayer, content: &str) -> LeafletLayer;

    #[wasm_bindgen(method, js_name = addTo)]
    fn add_to(this: &LeafletLayer, map: &LeafletMap) -> LeafletLayer;
}

/// Builds maps with the global `L` namespace.
#[derive(Debug, Clone, Copy, Default)]
pub struct Leaflet;

impl MapBackend for Leaflet {
    type Map = LeafletMap;
    type Layer = LeafletLayer;

    fn create_map(
        &self,
        element_id: &str,
        view: MapView,
        tiles: &TileLayer,
    ) -> Result<LeafletMap, WidgetError> {
        require_element(element_id)?;

        let map = leaflet_map(element_id)
            .map_err(library_error)?
            .set_view(&to_js(&view.center)?, view.zoom);
        tile_layer(tiles.url_template, &to_js(tiles)?)
            .map_err(library_error)?
            .add_to(&map);

        tracing::debug!(element_id, zoom = view.zoom, "map created");
        Ok(map)
    }

    fn add_circle_marker(
        &self,
        map: &LeafletMap,
        at: LatLng,
        style: &PathStyle,
        popup: &str,
    ) -> Result<LeafletLayer, WidgetError> {
        let marker = circle_marker(&to_js(&at)?, &to_js(style)?).map_err(library_error)?;
        Ok(marker.bind_popup(popup).add_to(map))
    }

    fn add_polygon(
        &self,
        map: &LeafletMap,
        ring: &[LatLng],
        style: &PathStyle,
        popup: &str,
    ) -> Result<LeafletLayer, WidgetError> {
        let shape = polygon(&to_js(ring)?, &to_js(style)?).map_err(library_error)?;
        Ok(shape.bind_popup(popup).add_to(map))
    }
}

// =============================================================================
// Tooltips and popovers
// =============================================================================

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = bootstrap)]
    type Tooltip;

    #[wasm_bindgen(constructor, js_namespace = bootstrap, catch)]
    fn new(element: &Element) -> Result<Tooltip, JsValue>;
}

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = bootstrap)]
    type Popover;

    #[wasm_bindgen(constructor, js_namespace = bootstrap, catch)]
    fn new(element: &Element) -> Result<Popover, JsValue>;
}

/// Activates widgets through the global `bootstrap` namespace.
#[derive(Debug, Clone, Copy, Default)]
pub struct BootstrapToolkit;

impl WidgetToolkit<Element> for BootstrapToolkit {
    fn activate(&self, kind: Toggle, element: &Element) -> Result<(), DomError> {
        let activated = match kind {
            Toggle::Tooltip => Tooltip::new(element).map(drop),
            Toggle::Popover => Popover::new(element).map(drop),
        };
        activated.map_err(dom::js_error)
    }
}
