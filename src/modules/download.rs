use crate::{config::Config, http, util::Error};
use anyhow::Context as _;
use reqwest::header::HeaderMap;

/// Fetches media with headers that get past hotlink protection
pub struct Downloader {
    client: reqwest::Client,
    headers: HeaderMap,
    stream: bool,
}

pub enum Payload {
    Buffered(bytes::Bytes),
    /// The body hasn't been read yet
    Streaming(reqwest::Response),
}

pub struct Video {
    pub content_type: mime_guess::Mime,
    /// Always known when buffered
    pub content_length: Option<u64>,
    pub payload: Payload,
}

impl Downloader {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        Ok(Self {
            client: http::new_client(&config.http)?,
            headers: http::header_map(&config.download.headers)?,
            stream: config.download.stream,
        })
    }

    pub async fn fetch(&self, url: &str) -> anyhow::Result<Video> {
        let resp = http::get(&self.client, url, &self.headers).await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Download(status.as_u16()).into());
        }

        let content_type = mime_guess::from_ext("mp4").first_or_octet_stream();
        if self.stream {
            return Ok(Video {
                content_type,
                content_length: resp.content_length(),
                payload: Payload::Streaming(resp),
            });
        }

        let body = resp
            .bytes()
            .await
            .with_context(|| format!("cannot get body for '{}'", url))?;
        log::debug!("downloaded {} bytes from '{}'", body.len(), url);

        Ok(Video {
            content_type,
            content_length: Some(body.len() as u64),
            payload: Payload::Buffered(body),
        })
    }
}
