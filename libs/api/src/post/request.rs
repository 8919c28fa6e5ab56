use notion::PostDraft;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Text of every field on the submission form. Omitted fields take the
/// form's defaults.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PostFormFields {
    pub title: String,
    pub platform: String,
    pub post_type: String,
    pub content_type: String,
    /// `YYYY-MM-DD`
    pub date: String,
    #[schema(example = "5,000")]
    pub reach: String,
    pub impressions: String,
    pub likes: String,
    pub comments: String,
    pub shares: String,
    pub saves: String,
    pub reposts: String,
}

impl Default for PostFormFields {
    fn default() -> Self {
        PostDraft::default().into()
    }
}

impl From<PostDraft> for PostFormFields {
    fn from(draft: PostDraft) -> Self {
        Self {
            title: draft.title,
            platform: draft.platform,
            post_type: draft.post_type,
            content_type: draft.content_type,
            date: draft.date,
            reach: draft.reach,
            impressions: draft.impressions,
            likes: draft.likes,
            comments: draft.comments,
            shares: draft.shares,
            saves: draft.saves,
            reposts: draft.reposts,
        }
    }
}

impl From<PostFormFields> for PostDraft {
    fn from(fields: PostFormFields) -> Self {
        Self {
            title: fields.title,
            platform: fields.platform,
            post_type: fields.post_type,
            content_type: fields.content_type,
            date: fields.date,
            reach: fields.reach,
            impressions: fields.impressions,
            likes: fields.likes,
            comments: fields.comments,
            shares: fields.shares,
            saves: fields.saves,
            reposts: fields.reposts,
        }
    }
}
