//! Flash notice cookie and the extractor that reads it.

use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use gatehouse_core::{FLASH_COOKIE, Notice};
use std::convert::Infallible;

pub fn flash_cookie(notice: &Notice) -> Cookie<'static> {
    Cookie::build((FLASH_COOKIE, notice.encode()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Reads the pending notice and returns a jar that removes it, so the notice
/// is shown once.
pub fn take_flash(jar: CookieJar) -> (CookieJar, Option<Notice>) {
    match jar.get(FLASH_COOKIE).and_then(|c| Notice::decode(c.value())) {
        Some(notice) => (jar.remove(Cookie::build(FLASH_COOKIE).path("/")), Some(notice)),
        None => (jar, None),
    }
}

/// The notice left by the previous response, if any. Reading it does not
/// consume it; use [`take_flash`] for that.
#[derive(Debug, Clone)]
pub struct FlashNotice(pub Option<Notice>);

impl<S> FromRequestParts<S> for FlashNotice
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        Ok(FlashNotice(
            jar.get(FLASH_COOKIE)
                .and_then(|c| Notice::decode(c.value())),
        ))
    }
}
