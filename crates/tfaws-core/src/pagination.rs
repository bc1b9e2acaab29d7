//! Continuation-token page walking
//!
//! List APIs return bounded pages plus an optional `next_token`. The helper
//! here feeds each token into the next request and hands every page to a
//! callback that decides whether to keep going.

use crate::error::ApiError;
use std::future::Future;

/// A list request that accepts a continuation token
pub trait PagedRequest: Clone {
    fn set_next_token(&mut self, token: Option<String>);
}

/// A list response that may carry a continuation token
pub trait PagedResponse {
    fn next_token(&self) -> Option<&str>;
}

/// Walk pages until the callback stops or no continuation token remains
///
/// `callback` receives each page and whether it is the last one; returning
/// `false` stops before the next request is made. An empty token counts as
/// no token. The first API error is returned as-is.
pub async fn for_each_page<Req, Resp, F, Fut, C>(
    mut request: Req,
    mut fetch: F,
    mut callback: C,
) -> Result<(), ApiError>
where
    Req: PagedRequest,
    Resp: PagedResponse,
    F: FnMut(Req) -> Fut,
    Fut: Future<Output = Result<Resp, ApiError>>,
    C: FnMut(&Resp, bool) -> bool,
{
    loop {
        let page = fetch(request.clone()).await?;

        let next = page
            .next_token()
            .filter(|token| !token.is_empty())
            .map(str::to_string);
        let last_page = next.is_none();

        if !callback(&page, last_page) || last_page {
            return Ok(());
        }

        request.set_next_token(next);
    }
}
