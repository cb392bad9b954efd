//! Core logic for the dashboard page helpers.
//!
//! Everything here is independent of the browser: capabilities such as the
//! network, the cookie jar, the document and third-party widget libraries
//! are injected through traits and implemented for the browser in
//! [`crate::utils`].
//!
//! - [`ApiClient`] - JSON API calls with session and anti-forgery headers
//! - [`Notifier`] - transient notification banners
//! - [`ChartFactory`], [`MapFactory`] - widget configuration
//! - [`date`], [`form`] - formatting and validation helpers
//! - [`Poller`] - fixed-interval polling
//! - [`bootstrap_page`] - one-time page setup

pub mod bootstrap;
pub mod chart;
pub mod cookie;
pub mod date;
pub mod error;
pub mod form;
pub mod http;
pub mod map;
pub mod notify;
pub mod poll;

pub use bootstrap::{BootstrapReport, PageDom, Toggle, WidgetToolkit, bootstrap_page};
pub use chart::{ChartBackend, ChartConfig, ChartFactory, Dataset};
pub use cookie::{CookieSource, Cookies, read_cookie};
pub use form::{FieldRule, FormValues, ValidationErrors, ValidationRules, validate};
pub use http::{ApiClient, HttpRequest, HttpResponse, Method, Transport};
pub use map::{LatLng, MapBackend, MapFactory, MapView};
pub use notify::{Banner, BannerHost, Notifier, Severity};
pub use poll::{LocalTask, PollHandle, Poller, Scheduler};
