//! Browser implementations of the core capability traits.
//!
//! Provides:
//! - [`FetchTransport`] - Fetch API transport for the API client
//! - [`DocumentCookies`], [`BrowserPage`], [`DomBannerHost`] - document access
//! - [`BrowserScheduler`] - `setInterval` timers and `spawn_local`
//! - [`ChartJs`], [`Leaflet`], [`BootstrapToolkit`] - third-party widget libraries

pub mod dom;
mod fetch;
mod timer;
pub mod widgets;

pub use dom::{BrowserPage, DocumentCookies, DomBannerHost, serialize_form};
pub use fetch::{FetchTransport, to_web_response};
pub use timer::BrowserScheduler;
pub use widgets::{BootstrapToolkit, Chart, ChartJs, Leaflet, LeafletLayer, LeafletMap};
