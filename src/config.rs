use anyhow::Context as _;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, net::SocketAddr, path::Path};

/// Header name to header value, sent with every request of a profile
pub type Headers = BTreeMap<String, String>;

const MOBILE_UA: &str = "Mozilla/5.0 (Linux; Android 8.0.0; SM-G955U Build/R16NW) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/116.0.0.0 Mobile Safari/537.36";

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,\
    image/avif,image/webp,image/apng,*/*;q=0.8";

const ACCEPT_HTML_EXCHANGE: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,\
    image/avif,image/webp,image/apng,*/*;q=0.8,application/signed-exchange;v=b3;q=0.7";

fn headers(pairs: &[(&str, &str)]) -> Headers {
    pairs
        .iter()
        .map(|&(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Configuration for the service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// The log level to use for the console output
    pub log_level: LogLevel,
    /// Where the web server listens
    pub web: Web,
    /// Settings shared by every outbound request
    pub http: Http,
    /// The douyin page fetch
    pub douyin: Douyin,
    /// The kuaishou redirect lookup and page fetch
    pub kuaishou: Kuaishou,
    /// The video proxy
    pub download: Download,
}

impl Config {
    /// Tries to load the config at `path`, returning `None` if it doesn't exist
    pub async fn load(path: impl AsRef<Path>) -> anyhow::Result<Option<Self>> {
        let data = match tokio::fs::read_to_string(&path).await {
            Ok(data) => data,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(err).with_context(|| {
                    format!("cannot read config file '{}'", path.as_ref().display())
                })
            }
        };
        toml::from_str(&data)
            .map(Some)
            .with_context(|| "invalid config toml")
    }

    /// Print out the default configuration
    pub fn print_default() {
        println!("{}", crate::DEFAULT_CONFIG)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl Default for LogLevel {
    fn default() -> Self {
        LogLevel::Info
    }
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => log::LevelFilter::Trace,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Error => log::LevelFilter::Error,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Web {
    pub listen: SocketAddr,
}

impl Default for Web {
    fn default() -> Self {
        Self {
            listen: SocketAddr::from(([127, 0, 0, 1], 3000)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Http {
    pub timeout_secs: u64,
}

impl Default for Http {
    fn default() -> Self {
        Self { timeout_secs: 30 }
    }
}

impl Http {
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Douyin {
    pub headers: Headers,
}

impl Default for Douyin {
    fn default() -> Self {
        Self {
            headers: headers(&[
                ("User-Agent", MOBILE_UA),
                ("Accept", ACCEPT_HTML_EXCHANGE),
                ("Accept-Language", "zh-CN,zh;q=0.9,en;q=0.8"),
                ("Cache-Control", "no-cache"),
                ("Pragma", "no-cache"),
            ]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Kuaishou {
    /// Prefix of the desktop share page
    pub rewrite_from: String,
    /// What `rewrite_from` is replaced with to get the mobile page
    pub rewrite_to: String,
    pub headers: Headers,
}

impl Default for Kuaishou {
    fn default() -> Self {
        Self {
            rewrite_from: "https://www.kuaishou.com/short-video".into(),
            rewrite_to: "https://m.gifshow.com/fw/photo".into(),
            headers: headers(&[
                ("User-Agent", MOBILE_UA),
                ("Accept", ACCEPT_HTML),
                ("Accept-Language", "zh-CN,zh;q=0.9"),
                ("Cache-Control", "no-cache"),
                ("Connection", "keep-alive"),
            ]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Download {
    /// Pass the upstream body through as it arrives instead of buffering it
    pub stream: bool,
    pub headers: Headers,
}

impl Default for Download {
    fn default() -> Self {
        Self {
            stream: false,
            headers: headers(&[
                ("User-Agent", MOBILE_UA),
                ("Accept", ACCEPT_HTML_EXCHANGE),
                ("Accept-Language", "zh-CN,zh;q=0.9,en;q=0.8"),
                ("Cache-Control", "no-cache"),
                ("Pragma", "no-cache"),
                // the origin checks this before serving media
                ("Referer", "https://www.douyin.com/?recommend=1"),
                ("Sec-Fetch-Dest", "video"),
                ("Sec-Fetch-Mode", "no-cors"),
                ("Sec-Fetch-Site", "cross-site"),
            ]),
        }
    }
}
