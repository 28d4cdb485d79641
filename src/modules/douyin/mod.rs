use super::Platform;
use crate::{config, http, matches::Anchor, responses::VideoMetadata, util::*};
use once_cell::sync::Lazy;
use reqwest::header::HeaderMap;
use serde::Deserialize;

#[cfg(test)]
mod tests;

static ROUTER_DATA: Lazy<Anchor> =
    Lazy::new(|| Anchor::object(r"_ROUTER_DATA\s*=\s*(?P<object>\{.*?\})<", "无法提取视频数据"));

static ITEM_PATH: &str = "/loaderData/video_(id)~1page/videoInfoRes/item_list/0";

/// `aweme_type` of an image post
const SLIDESHOW: u64 = 2;

pub struct Douyin {
    client: reqwest::Client,
    headers: HeaderMap,
}

impl Douyin {
    pub fn new(http: &config::Http, config: &config::Douyin) -> anyhow::Result<Self> {
        Ok(Self {
            client: http::new_client(http)?,
            headers: http::header_map(&config.headers)?,
        })
    }

    pub async fn extract(&self, url: &str) -> anyhow::Result<VideoMetadata> {
        let body = http::get_body(&self.client, url, &self.headers).await?;
        find_item(&body)?.into_metadata()
    }
}

fn find_item(body: &str) -> anyhow::Result<Item> {
    let data = ROUTER_DATA.parse(body)?;
    let item = data
        .pointer(ITEM_PATH)
        .filter(|item| item.is_object())
        .ok_or_else(|| ROUTER_DATA.missing())?;
    Item::deserialize(item).map_err(Into::into)
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Item {
    #[serde(deserialize_with = "text")]
    aweme_id: String,
    #[serde(deserialize_with = "count")]
    aweme_type: u64,
    #[serde(deserialize_with = "text")]
    desc: String,
    #[serde(deserialize_with = "count")]
    create_time: u64,
    #[serde(deserialize_with = "or_default")]
    author: Author,
    #[serde(deserialize_with = "or_default")]
    video: Video,
    #[serde(deserialize_with = "or_default")]
    statistics: Statistics,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Author {
    #[serde(deserialize_with = "text")]
    nickname: String,
    #[serde(deserialize_with = "text")]
    unique_id: String,
    #[serde(deserialize_with = "text")]
    short_id: String,
    #[serde(deserialize_with = "text")]
    signature: String,
    #[serde(deserialize_with = "or_default")]
    avatar_thumb: UrlList,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Video {
    #[serde(deserialize_with = "or_default")]
    play_addr: UrlList,
    #[serde(deserialize_with = "or_default")]
    cover: UrlList,
    #[serde(deserialize_with = "count")]
    duration: u64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Statistics {
    #[serde(deserialize_with = "count")]
    digg_count: u64,
    #[serde(deserialize_with = "count")]
    collect_count: u64,
    #[serde(deserialize_with = "count")]
    comment_count: u64,
    #[serde(deserialize_with = "count")]
    share_count: u64,
    #[serde(deserialize_with = "count")]
    play_count: u64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct UrlList {
    #[serde(deserialize_with = "items")]
    url_list: Vec<String>,
}

impl UrlList {
    fn first(&self) -> String {
        self.url_list.first().cloned().unwrap_or_default()
    }

    fn last(&self) -> String {
        self.url_list.last().cloned().unwrap_or_default()
    }
}

impl Item {
    fn video_url(&self) -> String {
        if self.aweme_type == SLIDESHOW {
            return self.video.cover.first();
        }
        // 'playwm' serves the watermarked variant
        self.video.play_addr.first().replacen("playwm", "play", 1)
    }

    fn into_metadata(self) -> anyhow::Result<VideoMetadata> {
        let video_url = self.video_url();
        let created_time = from_epoch_secs(self.create_time)?.as_iso_timestamp();

        let Self {
            aweme_id,
            desc,
            author,
            video,
            statistics,
            ..
        } = self;

        let unique_id = if author.unique_id.is_empty() {
            author.short_id
        } else {
            author.unique_id
        };

        Ok(VideoMetadata {
            platform: Platform::Douyin,
            video_id: aweme_id,
            author_name: author.nickname,
            unique_id,
            author_avatar: author.avatar_thumb.first(),
            // the author's bio, not the caption
            title: author.signature,
            cover: video.cover.last(),
            video_url,
            created_time,
            desc,
            digg_count: statistics.digg_count,
            collect_count: statistics.collect_count,
            comment_count: statistics.comment_count,
            share_count: statistics.share_count,
            view_count: statistics.play_count,
            duration: video.duration,
        })
    }
}
