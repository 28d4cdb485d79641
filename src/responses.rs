use crate::modules::Platform;
use serde::{Deserialize, Serialize};

/// What both scrapers produce, every field is always present
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoMetadata {
    pub platform: Platform,
    pub video_id: String,
    pub author_name: String,
    pub unique_id: String,
    pub author_avatar: String,
    pub title: String,
    pub cover: String,
    /// Direct, unwatermarked media url. Can be handed to the download endpoint
    pub video_url: String,
    pub created_time: String,
    pub desc: String,
    pub digg_count: u64,
    pub collect_count: u64,
    pub comment_count: u64,
    pub share_count: u64,
    pub view_count: u64,
    pub duration: u64,
}

/// Error body for every route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Failure {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
