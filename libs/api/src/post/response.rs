use analytics::Summary;
use entity::prelude::*;
use serde::Serialize;
use utoipa::ToSchema;

use super::{form::FormState, request::PostFormFields};

#[derive(Serialize, ToSchema, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FetchStatus {
    Ok,
    Empty,
    NoDatabase,
    Error,
}

#[derive(Serialize, ToSchema, Debug, PartialEq)]
pub struct PostResp {
    pub title: String,
    pub platform: String,
    pub post_type: String,
    pub content_type: String,
    pub date: Option<String>,
    pub reach: u64,
    pub impressions: u64,
    pub likes: u64,
    pub comments: u64,
    pub shares: u64,
    pub saves: u64,
    pub reposts: u64,
    pub total_engagement: u64,
    pub engagement_rate: f64,
}

impl From<AnalyzedPost> for PostResp {
    fn from(post: AnalyzedPost) -> Self {
        let record = post.record;
        Self {
            platform: record.platform_name(),
            post_type: record.post_type.map(|p| p.to_string()).unwrap_or_default(),
            content_type: record
                .content_type
                .map(|c| c.to_string())
                .unwrap_or_default(),
            date: record.date.map(|d| d.to_string()),
            title: record.title,
            reach: record.reach,
            impressions: record.impressions,
            likes: record.likes,
            comments: record.comments,
            shares: record.shares,
            saves: record.saves,
            reposts: record.reposts,
            total_engagement: post.total_engagement,
            engagement_rate: post.engagement_rate,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct GetPostsResp {
    pub status: FetchStatus,
    pub message: Option<String>,
    pub posts: Vec<PostResp>,
}

#[derive(Serialize, ToSchema, Debug, PartialEq)]
pub struct SummaryResp {
    pub total_posts: usize,
    pub average_reach: f64,
    /// Percentage
    pub average_engagement_rate: f64,
    pub total_engagement: u64,
}

impl From<Summary> for SummaryResp {
    fn from(summary: Summary) -> Self {
        Self {
            total_posts: summary.total_posts,
            average_reach: summary.average_reach,
            average_engagement_rate: summary.average_engagement_rate,
            total_engagement: summary.total_engagement,
        }
    }
}

#[derive(Serialize, ToSchema, Debug, PartialEq)]
pub struct PlatformEngagementResp {
    /// Empty for posts without a platform
    pub platform: String,
    pub total_engagement: u64,
}

#[derive(Serialize, ToSchema)]
pub struct GetDashboardResp {
    pub status: FetchStatus,
    pub message: Option<String>,
    pub posts: Vec<PostResp>,
    pub summary: SummaryResp,
    pub engagement_by_platform: Vec<PlatformEngagementResp>,
}

#[derive(Serialize, ToSchema)]
pub struct FormOptionsResp {
    pub platforms: Vec<String>,
    pub post_types: Vec<String>,
    pub content_types: Vec<String>,
}

#[derive(Serialize, ToSchema)]
pub struct GetFormResp {
    pub state: FormState,
    pub fields: PostFormFields,
    pub options: FormOptionsResp,
}

#[derive(Serialize, ToSchema)]
pub struct SubmitPostResp {
    /// How the submission ended
    pub outcome: FormState,
    /// State of the form after the submission, always `idle`
    pub state: FormState,
    pub message: String,
    pub page_id: Option<String>,
    /// Status code returned by Notion when the write was rejected
    pub write_status: Option<u16>,
    pub fields: PostFormFields,
}
