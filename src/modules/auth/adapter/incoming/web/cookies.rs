use actix_web::cookie::{time::Duration, Cookie, SameSite};
use std::env;

/// Name of the session cookie carried by browsers.
pub const SESSION_COOKIE: &str = "token";

/// How session cookies are stamped. Production runs cross-site behind a
/// separate frontend origin, so it needs Secure + SameSite=None; local
/// development keeps Lax so plain http works.
#[derive(Debug, Clone)]
pub struct SessionCookieOptions {
    pub secure: bool,
    pub same_site: SameSite,
    pub max_age_seconds: i64,
}

impl SessionCookieOptions {
    pub fn from_env(ttl_seconds: i64) -> Self {
        let is_production = env::var("RUST_ENV")
            .map(|v| v == "production")
            .unwrap_or(false);

        if is_production {
            Self {
                secure: true,
                same_site: SameSite::None,
                max_age_seconds: ttl_seconds,
            }
        } else {
            Self {
                secure: false,
                same_site: SameSite::Lax,
                max_age_seconds: ttl_seconds,
            }
        }
    }
}

pub fn session_cookie(token: &str, options: &SessionCookieOptions) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, token.to_owned())
        .http_only(true)
        .secure(options.secure)
        .same_site(options.same_site)
        .path("/")
        .max_age(Duration::seconds(options.max_age_seconds))
        .finish()
}

/// Cookie that instructs the browser to drop the session.
pub fn expired_session_cookie(options: &SessionCookieOptions) -> Cookie<'static> {
    let mut cookie = Cookie::build(SESSION_COOKIE, "")
        .http_only(true)
        .secure(options.secure)
        .same_site(options.same_site)
        .path("/")
        .finish();
    cookie.make_removal();
    cookie
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dev_options() -> SessionCookieOptions {
        SessionCookieOptions {
            secure: false,
            same_site: SameSite::Lax,
            max_age_seconds: 604_800,
        }
    }

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie("abc.def.ghi", &dev_options());

        assert_eq!(cookie.name(), "token");
        assert_eq!(cookie.value(), "abc.def.ghi");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), Some(Duration::seconds(604_800)));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
    }

    #[test]
    fn test_expired_cookie_clears_value() {
        let cookie = expired_session_cookie(&dev_options());

        assert_eq!(cookie.name(), "token");
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(Duration::ZERO));
    }
}
