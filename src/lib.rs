/*!
vidgrab. resolves douyin and kuaishou share links into video metadata, and proxies the
videos past hotlink protection
*/

/// Configuration
pub mod config;

/// The web server and outbound request helpers
pub mod http;

#[doc(hidden)]
pub mod matches;

/// The platform scrapers and the video proxy
pub mod modules;

/// Response bodies
pub mod responses;

mod util;

#[cfg(test)]
mod test;

pub use config::Config;
pub use modules::{Downloader, Platform, Resolver};
pub use responses::VideoMetadata;
pub use util::Error;

pub static DEFAULT_CONFIG: &str = include_str!("../default.toml");
