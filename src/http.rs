use crate::config::{Headers, Http};
use anyhow::Context as _;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, LOCATION};

pub mod server;

pub fn new_client(config: &Http) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(config.timeout())
        .build()
        .with_context(|| "cannot build http client")
}

/// A client that hands back redirects instead of following them
pub fn no_redirect_client(config: &Http) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(config.timeout())
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .with_context(|| "cannot build http client")
}

/// Validates a header profile
pub fn header_map(headers: &Headers) -> anyhow::Result<HeaderMap> {
    headers
        .iter()
        .map(|(k, v)| {
            let name = HeaderName::from_bytes(k.as_bytes())
                .with_context(|| format!("invalid header name '{}'", k))?;
            let value = HeaderValue::from_str(v)
                .with_context(|| format!("invalid value for header '{}'", k))?;
            Ok::<_, anyhow::Error>((name, value))
        })
        .collect()
}

pub async fn get(
    client: &reqwest::Client,
    url: &str,
    headers: &HeaderMap,
) -> anyhow::Result<reqwest::Response> {
    log::debug!("fetching '{}'", url);
    client
        .get(url)
        .headers(headers.clone())
        .send()
        .await
        .with_context(|| format!("cannot get url '{}'", url))
}

/// Get the body as text, whatever the status is
pub async fn get_body(
    client: &reqwest::Client,
    url: &str,
    headers: &HeaderMap,
) -> anyhow::Result<String> {
    get(client, url, headers)
        .await?
        .text()
        .await
        .with_context(|| format!("cannot get body for '{}'", url))
}

/// Get the `Location` the url points to, if any
///
/// The client should be one from [`no_redirect_client`]. Relative locations are
/// resolved against `url`
pub async fn get_location(
    client: &reqwest::Client,
    url: &str,
    headers: &HeaderMap,
) -> anyhow::Result<Option<String>> {
    let resp = get(client, url, headers).await?;
    let location = resp
        .headers()
        .get(LOCATION)
        .and_then(|s| s.to_str().ok())
        .filter(|s| !s.is_empty())
        .map(|location| resolve(url, location));
    Ok(location)
}

fn resolve(base: &str, location: &str) -> String {
    url::Url::parse(base)
        .and_then(|base| base.join(location))
        .map(String::from)
        .unwrap_or_else(|_| location.to_string())
}
