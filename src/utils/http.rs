use crate::error::{Error, Result};

/// Suffix appended to share links; the raw file is served without it.
pub const SHARE_MARKER: &str = "?dl=0";

/// Remove a trailing share marker from `url`, if present
pub fn strip_share_marker(url: &str) -> &str {
    url.strip_suffix(SHARE_MARKER).unwrap_or(url)
}

/// HTTP client shared by every download in a run
pub fn build_client() -> reqwest::Client {
    reqwest::Client::new()
}

/// GET `url` and return the full response body
pub async fn fetch_bytes(client: &reqwest::Client, url: &str) -> Result<Vec<u8>> {
    let fetch_error = |source| Error::Fetch {
        url: url.to_string(),
        source,
    };

    let response = client.get(url).send().await.map_err(fetch_error)?;

    if !response.status().is_success() {
        return Err(Error::Status {
            url: url.to_string(),
            status: response.status(),
        });
    }

    let bytes = response.bytes().await.map_err(fetch_error)?;
    Ok(bytes.to_vec())
}
