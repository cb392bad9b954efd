//! Browser helpers for the server-rendered dashboard pages.
//!
//! Compiled to WebAssembly and loaded by the page templates. The crate:
//!
//! - calls the JSON API with session and anti-forgery headers
//! - shows transient notification banners
//! - configures chart and map widgets
//! - formats dates, serializes and validates forms
//! - polls endpoints on an interval
//! - bootstraps each page once on load
//!
//! The logic lives in [`core`] behind capability traits; [`utils`] provides
//! the browser implementations and [`bindings`] the exports page scripts
//! import.

pub mod bindings;
pub mod config;
pub mod core;
pub mod logging;
pub mod utils;

use wasm_bindgen::prelude::*;

use crate::config::CSRF_COOKIE;
use crate::core::bootstrap::bootstrap_page;
use crate::core::cookie::Cookies;
use crate::utils::{BootstrapToolkit, BrowserPage, DocumentCookies};

/// Module entry point: set up logging and bootstrap the page once it is ready.
#[wasm_bindgen(start)]
pub fn start() {
    logging::init();

    if let Err(err) = utils::dom::on_ready(run_page_bootstrap) {
        tracing::warn!("page bootstrap not scheduled: {err}");
    }
}

fn run_page_bootstrap() {
    let Some(page) = BrowserPage::current() else {
        tracing::warn!("document not available; page bootstrap skipped");
        return;
    };
    let token = Cookies::new(DocumentCookies).get(CSRF_COOKIE);
    bootstrap_page(&page, &BootstrapToolkit, token.as_deref());
}
