use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

/// Non-empty cookie value by name
pub fn cookie_value<'a>(jar: &'a CookieJar, name: &str) -> Option<&'a str> {
    jar.get(name).map(|c| c.value()).filter(|v| !v.is_empty())
}

/// Attributes shared by every cookie this service sets
#[derive(Debug, Clone, Copy)]
pub struct CookieOptions {
    pub secure: bool,
}

impl CookieOptions {
    /// HttpOnly, SameSite=Lax cookie on `/`
    pub fn build(&self, name: &'static str, value: impl Into<String>, max_age_secs: i64) -> Cookie<'static> {
        Cookie::build((name, value.into()))
            .path("/")
            .max_age(Duration::seconds(max_age_secs))
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure)
            .build()
    }

    /// Cookie that removes `name` from the browser
    pub fn expire(&self, name: &'static str) -> Cookie<'static> {
        self.build(name, "", 0)
    }
}
