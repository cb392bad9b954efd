//! DOM and Web API utility functions.
//!
//! Provides safe, consistent access to browser APIs with proper error
//! handling, plus the browser implementations of the document-facing core
//! traits: the cookie jar, the page bootstrap surface and the notification
//! region.

use gloo_timers::callback::Timeout;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, FormData, HtmlDocument, HtmlFormElement, HtmlInputElement, Window};

use crate::config::notify::CONTAINER_SELECTOR;
use crate::core::bootstrap::{PageDom, Toggle};
use crate::core::cookie::CookieSource;
use crate::core::error::DomError;
use crate::core::form::FormValues;
use crate::core::notify::{Banner, BannerHost};

/// Get the browser window object.
#[inline]
pub fn window() -> Option<Window> {
    web_sys::window()
}

/// Get the current document.
#[inline]
pub fn document() -> Option<Document> {
    window()?.document()
}

/// Best-effort message for a thrown JS value.
pub fn describe_js(err: &JsValue) -> String {
    if let Some(message) = err.as_string() {
        return message;
    }
    if let Some(error) = err.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    format!("{err:?}")
}

/// Convert a thrown JS value into a [`DomError`].
pub fn js_error(err: JsValue) -> DomError {
    DomError::Js(describe_js(&err))
}

/// All elements matching `selector`, in document order.
pub fn query_all(root: &Document, selector: &str) -> Vec<Element> {
    let Ok(nodes) = root.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|i| nodes.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Run `callback` once the document has been parsed.
///
/// Runs immediately when the `DOMContentLoaded` event has already fired.
pub fn on_ready(callback: impl FnOnce() + 'static) -> Result<(), DomError> {
    let document = document().ok_or(DomError::NoDocument)?;

    if document.ready_state() != "loading" {
        callback();
        return Ok(());
    }

    let listener = wasm_bindgen::closure::Closure::once_into_js(callback);
    document
        .add_event_listener_with_callback("DOMContentLoaded", listener.unchecked_ref())
        .map_err(js_error)
}

// =============================================================================
// Cookies
// =============================================================================

/// Reads `document.cookie`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentCookies;

impl CookieSource for DocumentCookies {
    fn cookie_string(&self) -> Option<String> {
        document()?.dyn_into::<HtmlDocument>().ok()?.cookie().ok()
    }
}

// =============================================================================
// Forms
// =============================================================================

/// Read every named, string-valued field of `form`.
///
/// File inputs are skipped; a repeated name keeps its last value.
pub fn serialize_form(form: &HtmlFormElement) -> Result<FormValues, DomError> {
    let data = FormData::new_with_form(form).map_err(js_error)?;
    let entries = js_sys::try_iter(&data)
        .map_err(js_error)?
        .ok_or_else(|| DomError::Js("FormData is not iterable".to_string()))?;

    let mut values = FormValues::new();
    for entry in entries {
        let pair = js_sys::Array::from(&entry.map_err(js_error)?);
        if let (Some(name), Some(value)) = (pair.get(0).as_string(), pair.get(1).as_string()) {
            values.insert(name, value);
        }
    }
    Ok(values)
}

// =============================================================================
// Page
// =============================================================================

/// The live document as seen by the page bootstrap.
pub struct BrowserPage {
    document: Document,
}

impl BrowserPage {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    /// The page of the current window, if any.
    pub fn current() -> Option<Self> {
        document().map(Self::new)
    }
}

impl PageDom for BrowserPage {
    type Form = HtmlFormElement;
    type Element = Element;

    fn forms(&self) -> Vec<HtmlFormElement> {
        query_all(&self.document, "form")
            .into_iter()
            .filter_map(|el| el.dyn_into::<HtmlFormElement>().ok())
            .collect()
    }

    fn form_has_field(&self, form: &HtmlFormElement, name: &str) -> bool {
        form.query_selector(&format!(r#"[name="{name}"]"#))
            .ok()
            .flatten()
            .is_some()
    }

    fn append_hidden_field(
        &self,
        form: &HtmlFormElement,
        name: &str,
        value: &str,
    ) -> Result<(), DomError> {
        let input = self
            .document
            .create_element("input")
            .map_err(js_error)?
            .dyn_into::<HtmlInputElement>()
            .map_err(|_| DomError::Js("created element is not an input".to_string()))?;
        input.set_type("hidden");
        input.set_name(name);
        input.set_value(value);
        form.append_child(&input).map_err(js_error)?;
        Ok(())
    }

    fn toggles(&self, kind: Toggle) -> Vec<Element> {
        query_all(&self.document, kind.selector())
    }
}

// =============================================================================
// Notifications
// =============================================================================

/// Mounts banners into the first element matching a selector.
#[derive(Debug, Clone)]
pub struct DomBannerHost {
    selector: String,
}

impl DomBannerHost {
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
        }
    }
}

impl Default for DomBannerHost {
    fn default() -> Self {
        Self::new(CONTAINER_SELECTOR)
    }
}

impl BannerHost for DomBannerHost {
    type Mounted = Element;

    fn mount(&self, banner: &Banner) -> Option<Element> {
        let document = document()?;
        let container = document.query_selector(&self.selector).ok().flatten()?;

        let alert = match build_banner(&document, banner) {
            Ok(alert) => alert,
            Err(err) => {
                tracing::warn!("failed to build notification: {err}");
                return None;
            }
        };

        if let Err(err) = container.insert_before(&alert, container.first_child().as_ref()) {
            tracing::warn!("failed to mount notification: {}", describe_js(&err));
            return None;
        }
        Some(alert)
    }

    fn dismiss_after(&self, mounted: Element, delay_ms: u32) {
        Timeout::new(delay_ms, move || mounted.remove()).forget();
    }
}

/// `<div class=alert role=alert>message<button class=btn-close></button></div>`
///
/// The message is set as text, never parsed as markup.
fn build_banner(document: &Document, banner: &Banner) -> Result<Element, DomError> {
    let alert = document.create_element("div").map_err(js_error)?;
    alert.set_class_name(&banner.class_name());
    alert.set_attribute("role", Banner::ROLE).map_err(js_error)?;
    alert.set_text_content(Some(&banner.message));

    let close = document.create_element("button").map_err(js_error)?;
    close.set_attribute("type", "button").map_err(js_error)?;
    close.set_class_name(Banner::CLOSE_CLASS);
    close
        .set_attribute("data-bs-dismiss", Banner::DISMISS_TARGET)
        .map_err(js_error)?;
    alert.append_child(&close).map_err(js_error)?;

    Ok(alert)
}
