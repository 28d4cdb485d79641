use super::Platform;
use crate::{config, http, matches::Anchor, responses::VideoMetadata, util::*};
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use reqwest::header::HeaderMap;
use serde::Deserialize;


static PHOTO: Lazy<Anchor> = Lazy::new(|| {
    Anchor::members(
        r#""photo":\s*\{(?P<object>.*?)\},\s*"serialInfo""#,
        "无法提取快手视频数据",
    )
});

const UNKNOWN_USER: &str = "未知用户";

pub struct Kuaishou {
    no_redirect: reqwest::Client,
    client: reqwest::Client,
    headers: HeaderMap,
    rewrite_from: String,
    rewrite_to: String,
}

impl Kuaishou {
    pub fn new(http: &config::Http, config: &config::Kuaishou) -> anyhow::Result<Self> {
        Ok(Self {
            no_redirect: http::no_redirect_client(http)?,
            client: http::new_client(http)?,
            headers: http::header_map(&config.headers)?,
            rewrite_from: config.rewrite_from.clone(),
            rewrite_to: config.rewrite_to.clone(),
        })
    }

    pub async fn extract(&self, url: &str) -> anyhow::Result<VideoMetadata> {
        // share links redirect to the desktop page, which doesn't have the data
        let location = http::get_location(&self.no_redirect, url, &self.headers).await?;
        let page = self.page_url(location.as_deref().unwrap_or(url));
        log::debug!("kuaishou page for '{}' is '{}'", url, page);

        let body = http::get_body(&self.client, &page, &self.headers).await?;
        let photo = Photo::deserialize(&PHOTO.parse(&body)?)?;
        photo.into_metadata(Utc::now())
    }

    fn page_url(&self, url: &str) -> String {
        if self.rewrite_from.is_empty() {
            return url.to_string();
        }
        url.replacen(&self.rewrite_from, &self.rewrite_to, 1)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct Photo {
    #[serde(deserialize_with = "or_default")]
    manifest: Manifest,
    #[serde(deserialize_with = "text")]
    photo_id: String,
    #[serde(deserialize_with = "text")]
    user_name: String,
    #[serde(deserialize_with = "text")]
    user_id: String,
    #[serde(deserialize_with = "text")]
    head_url: String,
    #[serde(deserialize_with = "text")]
    caption: String,
    #[serde(deserialize_with = "items")]
    cover_urls: Vec<CdnUrl>,
    #[serde(deserialize_with = "items")]
    main_mv_urls: Vec<CdnUrl>,
    /// milliseconds
    #[serde(deserialize_with = "count")]
    timestamp: u64,
    #[serde(deserialize_with = "count")]
    like_count: u64,
    #[serde(deserialize_with = "count")]
    comment_count: u64,
    #[serde(deserialize_with = "count")]
    share_count: u64,
    #[serde(deserialize_with = "count")]
    view_count: u64,
    #[serde(deserialize_with = "count")]
    duration: u64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct Manifest {
    #[serde(deserialize_with = "text")]
    video_id: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CdnUrl {
    #[serde(deserialize_with = "text")]
    url: String,
}

fn first_url(urls: Vec<CdnUrl>) -> String {
    urls.into_iter()
        .next()
        .map(|cdn| cdn.url)
        .unwrap_or_default()
}

fn non_empty_or(s: String, fallback: impl FnOnce() -> String) -> String {
    if s.is_empty() {
        fallback()
    } else {
        s
    }
}

impl Photo {
    fn into_metadata(self, now: DateTime<Utc>) -> anyhow::Result<VideoMetadata> {
        let created = match self.timestamp {
            0 => now,
            ts => from_epoch_millis(ts)?,
        };

        let video_id = self.manifest.video_id;
        let photo_id = self.photo_id;

        Ok(VideoMetadata {
            platform: Platform::Kuaishou,
            video_id: non_empty_or(video_id, || photo_id),
            author_name: non_empty_or(self.user_name, || UNKNOWN_USER.to_string()),
            unique_id: self.user_id,
            author_avatar: self.head_url,
            title: self.caption.clone(),
            cover: first_url(self.cover_urls),
            video_url: first_url(self.main_mv_urls),
            created_time: created.as_iso_timestamp(),
            desc: self.caption,
            digg_count: self.like_count,
            collect_count: 0,
            comment_count: self.comment_count,
            share_count: self.share_count,
            view_count: self.view_count,
            duration: self.duration,
        })
    }
}
