//! Cookie Building
//!
//! `Set-Cookie` header construction for credentials handed to browsers.

use axum::http::HeaderValue;
use axum::http::header::InvalidHeaderValue;

/// SameSite policy for cookies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SameSite {
    Strict,
    #[default]
    Lax,
    None,
}

impl SameSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }
}

/// Cookie attributes
#[derive(Debug, Clone)]
pub struct CookieConfig {
    pub name: String,
    pub path: String,
    pub http_only: bool,
    pub secure: bool,
    pub max_age_secs: Option<u64>,
    /// Omitted from the header when `None`
    pub same_site: Option<SameSite>,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            name: "session".to_string(),
            path: "/".to_string(),
            http_only: true,
            secure: true,
            max_age_secs: None,
            same_site: None,
        }
    }
}

impl CookieConfig {
    /// Build Set-Cookie header value
    ///
    /// Attribute order: `name=value; Path; HttpOnly; Secure; Max-Age; SameSite`.
    pub fn build_set_cookie(&self, value: &str) -> String {
        let mut cookie = format!("{}={}; Path={}", self.name, value, self.path);

        if self.http_only {
            cookie.push_str("; HttpOnly");
        }
        if self.secure {
            cookie.push_str("; Secure");
        }
        if let Some(max_age) = self.max_age_secs {
            cookie.push_str(&format!("; Max-Age={}", max_age));
        }
        if let Some(same_site) = self.same_site {
            cookie.push_str(&format!("; SameSite={}", same_site.as_str()));
        }

        cookie
    }

    /// Set-Cookie header value, failing if `value` holds bytes a header cannot carry
    pub fn header_value(&self, value: &str) -> Result<HeaderValue, InvalidHeaderValue> {
        HeaderValue::from_str(&self.build_set_cookie(value))
    }
}
