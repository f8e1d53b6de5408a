//! The `jwt` session cookie.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use super::jwt::JwtConfig;

/// Name of the cookie holding the session token.
pub const SESSION_COOKIE: &str = "jwt";

/// HTTP-only cookie carrying `token` for the configured lifetime.
///
/// Cross-site (`SameSite=None`) when secure; plain-HTTP development falls
/// back to `Lax` since browsers drop insecure `SameSite=None` cookies.
pub fn session_cookie(token: String, config: &JwtConfig) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .secure(config.cookie_secure)
        .same_site(same_site(config))
        .max_age(time::Duration::days(config.expiry_days))
        .build()
}

/// Expired, empty replacement for the session cookie.
pub fn cleared_cookie(config: &JwtConfig) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .secure(config.cookie_secure)
        .same_site(same_site(config))
        .max_age(time::Duration::ZERO)
        .build()
}

/// Session token from the request cookies, if any.
pub fn session_token(jar: &CookieJar) -> Option<String> {
    jar.get(SESSION_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
}

fn same_site(config: &JwtConfig) -> SameSite {
    if config.cookie_secure {
        SameSite::None
    } else {
        SameSite::Lax
    }
}
