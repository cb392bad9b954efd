//! Cookie lookup over a `document.cookie` style string.
//!
//! The ambient cookie string is read fresh on every lookup; nothing is cached.

use percent_encoding::percent_decode_str;

/// Source of the raw `key=value; key=value` cookie string.
pub trait CookieSource {
    /// Returns the current cookie string, or `None` when there is no document.
    fn cookie_string(&self) -> Option<String>;
}

/// Find `name` in a semicolon-delimited cookie string.
///
/// The first matching pair wins. Its value is percent-decoded as UTF-8; a
/// value that does not decode cleanly is returned as written.
pub fn read_cookie(cookies: &str, name: &str) -> Option<String> {
    if cookies.is_empty() {
        return None;
    }

    cookies.split(';').find_map(|pair| {
        let value = pair.trim().strip_prefix(name)?.strip_prefix('=')?;
        Some(decode_value(value))
    })
}

fn decode_value(raw: &str) -> String {
    percent_decode_str(raw)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| raw.to_string())
}

/// Cookie reader bound to a [`CookieSource`].
#[derive(Debug, Clone, Default)]
pub struct Cookies<S> {
    source: S,
}

impl<S: CookieSource> Cookies<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Look up a cookie by name.
    pub fn get(&self, name: &str) -> Option<String> {
        read_cookie(&self.source.cookie_string()?, name)
    }
}

impl CookieSource for String {
    fn cookie_string(&self) -> Option<String> {
        Some(self.clone())
    }
}

impl CookieSource for &str {
    fn cookie_string(&self) -> Option<String> {
        Some((*self).to_string())
    }
}
