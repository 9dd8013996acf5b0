// src/fetch/mod.rs
use reqwest::Client;
use tokio::fs;
use tracing::info;
use url::Url;

use crate::error::EtlError;

/// Retrieve the raw markup behind `url`.
///
/// `http`/`https` go out through `client` as a single GET; non-2xx statuses
/// are errors. `file://` URLs are read from disk, which is how tests feed
/// the pipeline a fixture page. No retries either way.
#[tracing::instrument(level = "info", skip(client, url), fields(url = %url))]
pub async fn fetch_page(client: &Client, url: &Url) -> Result<String, EtlError> {
    let html = match url.scheme() {
        "http" | "https" => fetch_http(client, url).await?,
        "file" => {
            let path = url
                .to_file_path()
                .map_err(|_| EtlError::UnsupportedScheme {
                    scheme: "file".into(),
                    url: url.to_string(),
                })?;
            fs::read_to_string(&path)
                .await
                .map_err(|e| EtlError::io(path, e))?
        }
        other => {
            return Err(EtlError::UnsupportedScheme {
                scheme: other.to_string(),
                url: url.to_string(),
            })
        }
    };

    info!(bytes = html.len(), "fetched page");
    Ok(html)
}

async fn fetch_http(client: &Client, url: &Url) -> Result<String, EtlError> {
    let network = |source| EtlError::Network {
        url: url.to_string(),
        source,
    };

    client
        .get(url.clone())
        .send()
        .await
        .map_err(network)?
        .error_for_status()
        .map_err(network)?
        .text()
        .await
        .map_err(network)
}
