use crate::{config::Config, responses::VideoMetadata, util::Error};
use serde::{Deserialize, Serialize};

mod douyin;
mod kuaishou;

pub mod download;

pub use download::Downloader;

/// The platforms a share link can be resolved for
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Douyin,
    Kuaishou,
}

impl Platform {
    /// Pick the platform from the `hint` or the url. Douyin is checked first
    pub fn detect(url: &str, hint: Option<&str>) -> Option<Self> {
        if hint == Some("douyin") || url.contains("douyin.com") {
            return Some(Self::Douyin);
        }
        if hint == Some("kuaishou") || url.contains("kuaishou.com") {
            return Some(Self::Kuaishou);
        }
        None
    }
}

/// Turns a share link into [`VideoMetadata`]
pub struct Resolver {
    douyin: douyin::Douyin,
    kuaishou: kuaishou::Kuaishou,
}

impl Resolver {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        Ok(Self {
            douyin: douyin::Douyin::new(&config.http, &config.douyin)?,
            kuaishou: kuaishou::Kuaishou::new(&config.http, &config.kuaishou)?,
        })
    }

    pub async fn resolve(&self, url: &str, hint: Option<&str>) -> anyhow::Result<VideoMetadata> {
        let platform = Platform::detect(url, hint).ok_or(Error::UnsupportedPlatform)?;
        log::debug!("resolving '{}' as {:?}", url, platform);
        match platform {
            Platform::Douyin => self.douyin.extract(url).await,
            Platform::Kuaishou => self.kuaishou.extract(url).await,
        }
    }
}
