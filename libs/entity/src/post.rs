use chrono::NaiveDate;

use crate::option::{ContentType, Platform, PostType};

/// One row of the posts database, flattened from its property bag.
///
/// Counters default to zero when the upstream row leaves them blank.
#[derive(Debug, Default, PartialEq, Clone)]
pub struct PostRecord {
    pub title: String,
    pub platform: Option<Platform>,
    pub post_type: Option<PostType>,
    pub content_type: Option<ContentType>,
    pub date: Option<NaiveDate>,
    pub reach: u64,
    pub impressions: u64,
    pub likes: u64,
    pub comments: u64,
    pub shares: u64,
    pub saves: u64,
    pub reposts: u64,
}

/// A [`PostRecord`] with its derived engagement columns.
#[derive(Debug, Default, PartialEq, Clone)]
pub struct AnalyzedPost {
    pub record: PostRecord,
    pub total_engagement: u64,
    pub engagement_rate: f64,
}

impl PostRecord {
    pub fn platform_name(&self) -> String {
        self.platform.map(|p| p.to_string()).unwrap_or_default()
    }
}
