//! `Date` header stamping.
//!
//! Response finalization stamps every response with the current time in
//! IMF-fixdate form. Rendering the date per response is wasted work under
//! load, so the module keeps one preformatted header value for the whole
//! process and a background task re-renders it twice a second; stamping a
//! response is a lookup plus a cheap clone.

use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use bytes::Bytes;
use http::header::{self, HeaderMap, HeaderValue};
use once_cell::sync::Lazy;

/// How often the cached value is re-rendered. Coarser than a second would
/// produce visibly stale `Date` headers.
const REFRESH_INTERVAL: Duration = Duration::from_millis(500);

static CURRENT_DATE: Lazy<Arc<ArcSwap<HeaderValue>>> = Lazy::new(|| {
    let current = Arc::new(ArcSwap::from_pointee(render_date()));

    let shared = Arc::clone(&current);
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(REFRESH_INTERVAL).await;
            shared.store(Arc::new(render_date()));
        }
    });

    current
});

/// Sets the `Date` header to the cached current time, replacing whatever a
/// handler may have put there.
pub(crate) fn stamp_date(headers: &mut HeaderMap) {
    headers.insert(header::DATE, CURRENT_DATE.load().as_ref().clone());
}

fn render_date() -> HeaderValue {
    let mut buf = faf_http_date::get_date_buff_no_key();
    faf_http_date::get_date_no_key(&mut buf);
    // SAFETY: the rendered date is fixed-width visible ascii
    unsafe { HeaderValue::from_maybe_shared_unchecked(Bytes::from_owner(buf)) }
}
