//! Application configuration.
//!
//! Centralizes all configuration constants used throughout the crate:
//! cookie and header names shared with the server, DOM selectors the page
//! templates provide, and default styling for chart and map widgets.

// =============================================================================
// Session Configuration
// =============================================================================

/// Cookie holding the session id, sent as the bearer token.
pub const SESSION_COOKIE: &str = "sessionid";

/// Cookie holding the anti-forgery token.
pub const CSRF_COOKIE: &str = "csrftoken";

/// Hidden form field name the server expects the anti-forgery token in.
pub const CSRF_FORM_FIELD: &str = "csrfmiddlewaretoken";

/// HTTP header names attached to every API request.
pub mod headers {
    pub const AUTHORIZATION: &str = "Authorization";
    pub const CSRF_TOKEN: &str = "X-CSRFToken";
    pub const CONTENT_TYPE: &str = "Content-Type";
    /// Content type for JSON request bodies.
    pub const JSON: &str = "application/json";
}

// =============================================================================
// Notification Configuration
// =============================================================================

/// Notification banner settings.
pub mod notify {
    /// Selector of the page region banners are prepended to.
    pub const CONTAINER_SELECTOR: &str = ".main-content";
    /// Delay before a banner removes itself (milliseconds).
    pub const DISMISS_AFTER_MS: u32 = 5000;
}

// =============================================================================
// Chart Configuration
// =============================================================================

/// Slice colours for doughnut charts, in order.
pub const DOUGHNUT_PALETTE: [&str; 5] = ["#667eea", "#f093fb", "#4facfe", "#fa709a", "#fd7e14"];

// =============================================================================
// Map Configuration
// =============================================================================

/// Map defaults and overlay styles.
pub mod map {
    /// Initial center when the caller gives none (latitude, longitude).
    pub const DEFAULT_CENTER: (f64, f64) = (20.0, 0.0);
    /// Initial zoom when the caller gives none.
    pub const DEFAULT_ZOOM: u8 = 2;

    pub const TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
    pub const TILE_ATTRIBUTION: &str = "© OpenStreetMap contributors";
    pub const TILE_MAX_ZOOM: u8 = 19;

    /// Circle marker style.
    pub mod marker {
        pub const RADIUS: f64 = 8.0;
        pub const DEFAULT_FILL: &str = "blue";
        pub const STROKE: &str = "#000";
        pub const WEIGHT: f64 = 1.0;
        pub const OPACITY: f64 = 1.0;
        pub const FILL_OPACITY: f64 = 0.8;
    }

    /// Geofence polygon style.
    pub mod geofence {
        pub const COLOR: &str = "#667eea";
        pub const WEIGHT: f64 = 2.0;
        pub const OPACITY: f64 = 0.7;
        pub const FILL_OPACITY: f64 = 0.2;
    }
}

// =============================================================================
// Date Configuration
// =============================================================================

/// Pattern used when the caller does not supply one.
pub const DEFAULT_DATE_PATTERN: &str = "YYYY-MM-DD HH:mm";

// =============================================================================
// Page Bootstrap Configuration
// =============================================================================

/// Attribute selectors for elements the UI toolkit turns into widgets.
pub mod toggles {
    pub const TOOLTIP_SELECTOR: &str = r#"[data-bs-toggle="tooltip"]"#;
    pub const POPOVER_SELECTOR: &str = r#"[data-bs-toggle="popover"]"#;
}

// =============================================================================
// Logging Configuration
// =============================================================================

/// Maximum level forwarded to the browser console.
pub const LOG_LEVEL: tracing::Level = tracing::Level::INFO;
