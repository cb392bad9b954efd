//! JavaScript entry points.
//!
//! Page scripts import these from the generated module instead of reading
//! helpers off `window`. Every export builds its helper over the browser
//! implementations in [`crate::utils`]; errors surface as JS `Error`s.

use std::cell::RefCell;
use std::fmt::Display;

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use wasm_bindgen::prelude::*;
use web_sys::HtmlFormElement;

use crate::core::chart::{ChartFactory, Dataset};
use crate::core::cookie::Cookies;
use crate::core::date;
use crate::core::form::{self, FormValues, ValidationRules};
use crate::core::http::ApiClient;
use crate::core::map::{LatLng, MapFactory};
use crate::core::notify::{Notifier, Severity};
use crate::core::poll::{PollHandle, Poller};
use crate::utils::{
    BrowserScheduler, Chart, ChartJs, DocumentCookies, DomBannerHost, FetchTransport, Leaflet,
    LeafletLayer, LeafletMap, serialize_form as read_form, to_web_response,
};

type BrowserClient = ApiClient<FetchTransport, DocumentCookies>;
type BrowserPoller = Poller<FetchTransport, DocumentCookies, BrowserScheduler>;

fn client() -> BrowserClient {
    ApiClient::new(FetchTransport, DocumentCookies)
}

fn js_error(err: impl Display) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(js_error)
}

fn from_js<T: DeserializeOwned>(value: JsValue) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(js_error)
}

fn is_missing(value: &JsValue) -> bool {
    value.is_undefined() || value.is_null()
}

// =============================================================================
// Cookies and API
// =============================================================================

#[wasm_bindgen(js_name = getCookie)]
pub fn get_cookie(name: &str) -> Option<String> {
    Cookies::new(DocumentCookies).get(name)
}

#[wasm_bindgen(js_name = apiGet)]
pub async fn api_get(url: String) -> Result<JsValue, JsValue> {
    let data: Value = client().get(&url).await.map_err(js_error)?;
    to_js(&data)
}

#[wasm_bindgen(js_name = apiPost)]
pub async fn api_post(url: String, body: JsValue) -> Result<JsValue, JsValue> {
    let body: Value = from_js(body)?;
    let data: Value = client().post(&url, &body).await.map_err(js_error)?;
    to_js(&data)
}

#[wasm_bindgen(js_name = apiPut)]
pub async fn api_put(url: String, body: JsValue) -> Result<JsValue, JsValue> {
    let body: Value = from_js(body)?;
    let data: Value = client().put(&url, &body).await.map_err(js_error)?;
    to_js(&data)
}

/// Resolves to a `Response` with the status and unparsed body; response
/// headers are not carried over.
#[wasm_bindgen(js_name = apiDelete)]
pub async fn api_delete(url: String) -> Result<web_sys::Response, JsValue> {
    let response = client().delete(&url).await.map_err(js_error)?;
    to_web_response(&response).map_err(js_error)
}

// =============================================================================
// Notifications
// =============================================================================

fn notifier() -> Notifier<DomBannerHost> {
    Notifier::new(DomBannerHost::default())
}

#[wasm_bindgen]
pub fn notify(message: &str, severity: Option<String>) -> Result<(), JsValue> {
    let severity = match severity {
        Some(tag) => tag.parse::<Severity>().map_err(js_error)?,
        None => Severity::Info,
    };
    notifier().show(message, severity);
    Ok(())
}

#[wasm_bindgen(js_name = notifySuccess)]
pub fn notify_success(message: &str) {
    notifier().success(message);
}

#[wasm_bindgen(js_name = notifyError)]
pub fn notify_error(message: &str) {
    notifier().error(message);
}

#[wasm_bindgen(js_name = notifyInfo)]
pub fn notify_info(message: &str) {
    notifier().info(message);
}

#[wasm_bindgen(js_name = notifyWarning)]
pub fn notify_warning(message: &str) {
    notifier().warning(message);
}

// =============================================================================
// Charts
// =============================================================================

#[wasm_bindgen(js_name = createLineChart)]
pub fn create_line_chart(canvas_id: &str, labels: JsValue, datasets: JsValue) -> Result<Chart, JsValue> {
    let labels: Vec<Value> = from_js(labels)?;
    let datasets: Vec<Dataset> = from_js(datasets)?;
    ChartFactory::new(ChartJs)
        .create_line_chart(canvas_id, labels, datasets)
        .map_err(js_error)
}

#[wasm_bindgen(js_name = createBarChart)]
pub fn create_bar_chart(canvas_id: &str, labels: JsValue, datasets: JsValue) -> Result<Chart, JsValue> {
    let labels: Vec<Value> = from_js(labels)?;
    let datasets: Vec<Dataset> = from_js(datasets)?;
    ChartFactory::new(ChartJs)
        .create_bar_chart(canvas_id, labels, datasets)
        .map_err(js_error)
}

#[wasm_bindgen(js_name = createDoughnutChart)]
pub fn create_doughnut_chart(canvas_id: &str, labels: JsValue, data: JsValue) -> Result<Chart, JsValue> {
    let labels: Vec<Value> = from_js(labels)?;
    let data: Vec<Value> = from_js(data)?;
    ChartFactory::new(ChartJs)
        .create_doughnut_chart(canvas_id, labels, data)
        .map_err(js_error)
}

// =============================================================================
// Maps
// =============================================================================

/// `center` is an optional `[lat, lng]` pair.
#[wasm_bindgen(js_name = initMap)]
pub fn init_map(element_id: &str, center: JsValue, zoom: Option<u8>) -> Result<LeafletMap, JsValue> {
    let center: Option<LatLng> = if is_missing(&center) {
        None
    } else {
        Some(from_js(center)?)
    };
    MapFactory::new(Leaflet)
        .init_map(element_id, center, zoom)
        .map_err(js_error)
}

#[wasm_bindgen(js_name = addMarker)]
pub fn add_marker(
    map: &LeafletMap,
    lat: f64,
    lng: f64,
    title: &str,
    color: Option<String>,
) -> Result<LeafletLayer, JsValue> {
    MapFactory::new(Leaflet)
        .add_marker(map, lat, lng, title, color.as_deref())
        .map_err(js_error)
}

/// `coordinates` is an array of `[lat, lng]` pairs.
#[wasm_bindgen(js_name = addGeofence)]
pub fn add_geofence(map: &LeafletMap, coordinates: JsValue, name: &str) -> Result<LeafletLayer, JsValue> {
    let ring: Vec<LatLng> = from_js(coordinates)?;
    MapFactory::new(Leaflet)
        .add_geofence(map, &ring, name)
        .map_err(js_error)
}

// =============================================================================
// Dates
// =============================================================================

/// Accepts anything `new Date(..)` accepts.
#[wasm_bindgen(js_name = formatDate)]
pub fn format_date(value: JsValue, pattern: Option<String>) -> Result<String, JsValue> {
    let millis = js_sys::Date::new(&value).get_time();
    if millis.is_nan() {
        return Err(js_error("Invalid date"));
    }
    let pattern = pattern.as_deref().unwrap_or(date::DEFAULT_PATTERN);
    date::format_millis(millis as i64, pattern).map_err(js_error)
}

#[wasm_bindgen(js_name = daysAgo)]
pub fn days_ago(days: i32) -> js_sys::Date {
    let millis = date::days_ago(i64::from(days)).timestamp_millis();
    js_sys::Date::new(&JsValue::from_f64(millis as f64))
}

// =============================================================================
// Forms
// =============================================================================

#[wasm_bindgen(js_name = serializeForm)]
pub fn serialize_form(form: &HtmlFormElement) -> Result<JsValue, JsValue> {
    to_js(&read_form(form).map_err(js_error)?)
}

/// Resolves to a `{field: message}` object; empty when valid.
#[wasm_bindgen(js_name = validateForm)]
pub fn validate_form(data: JsValue, rules: JsValue) -> Result<JsValue, JsValue> {
    let data: FormValues = from_js(data)?;
    let rules: ValidationRules = from_js(rules)?;
    to_js(&form::validate(&data, &rules))
}

// =============================================================================
// Polling
// =============================================================================

/// Handle returned by `startPolling`; pass it to `stopPolling`.
#[wasm_bindgen]
pub struct PollingHandle {
    poller: BrowserPoller,
    handle: RefCell<Option<PollHandle<gloo_timers::callback::Interval>>>,
}

#[wasm_bindgen(js_name = startPolling)]
pub fn start_polling(url: &str, interval: u32, callback: js_sys::Function) -> PollingHandle {
    let poller = Poller::new(client(), BrowserScheduler);
    let handle = poller.start(url, interval, move |data| {
        let delivered = to_js(&data).and_then(|value| callback.call1(&JsValue::NULL, &value));
        if let Err(err) = delivered {
            tracing::error!("polling callback failed: {}", crate::utils::dom::describe_js(&err));
        }
    });

    PollingHandle {
        poller,
        handle: RefCell::new(Some(handle)),
    }
}

/// Stopping an already stopped handle does nothing.
#[wasm_bindgen(js_name = stopPolling)]
pub fn stop_polling(handle: &PollingHandle) {
    if let Some(active) = handle.handle.borrow_mut().take() {
        handle.poller.stop(active);
    }
}
