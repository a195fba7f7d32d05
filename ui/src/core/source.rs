//! Remote document access.

use super::error::LoadResult;
#[cfg(not(target_arch = "wasm32"))]
use super::error::LoadError;

const BLOB_HOST: &str = "https://github.com/";
const RAW_HOST: &str = "https://raw.githubusercontent.com/";

/// Rewrite a GitHub "blob" page URL to its raw-content form. Other URLs pass through.
pub fn raw_content_url(url: &str) -> String {
    match url.strip_prefix(BLOB_HOST) {
        Some(path) => format!("{RAW_HOST}{}", path.replacen("/blob/", "/", 1)),
        None => url.to_string(),
    }
}

#[cfg(target_arch = "wasm32")]
pub async fn fetch_text(url: &str) -> LoadResult<String> {
    use super::error::LoadError;
    use gloo_net::http::Request;

    let fetch_error = |reason: String| LoadError::Fetch {
        url: url.to_string(),
        reason,
    };

    let response = Request::get(url)
        .send()
        .await
        .map_err(|err| fetch_error(err.to_string()))?;
    if !response.ok() {
        return Err(LoadError::HttpStatus {
            url: url.to_string(),
            status: response.status(),
        });
    }
    response.text().await.map_err(|err| fetch_error(err.to_string()))
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn fetch_text(_url: &str) -> LoadResult<String> {
    Err(LoadError::Unsupported("Fetching remote documents"))
}
