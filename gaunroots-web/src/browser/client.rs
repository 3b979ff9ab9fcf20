use once_cell::unsync::OnceCell;
use shared::{ApiError, ApiResult, GaunRootsClient};

use crate::WebConfig;

thread_local! {
    static SHARED_CLIENT: OnceCell<GaunRootsClient> = const { OnceCell::new() };
}

/// The page-wide gateway client, rooted at the API path on the page origin.
///
/// # Errors
/// Fails when the page origin is unavailable or the resulting URL is invalid.
pub fn shared_client(config: &WebConfig) -> ApiResult<GaunRootsClient> {
    SHARED_CLIENT.with(|cell| cell.get_or_try_init(|| build(config)).cloned())
}

fn build(config: &WebConfig) -> ApiResult<GaunRootsClient> {
    let origin = web_sys::window()
        .and_then(|window| window.location().origin().ok())
        .ok_or_else(|| ApiError::InvalidBaseUrl("page origin unavailable".to_string()))?;
    GaunRootsClient::new(&config.api_base_url(&origin))
}
