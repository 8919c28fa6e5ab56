use std::collections::BTreeMap;

use entity::prelude::*;

#[derive(Debug, Default, PartialEq, Clone)]
pub struct Summary {
    pub total_posts: usize,
    pub average_reach: f64,
    pub average_engagement_rate: f64,
    pub total_engagement: u64,
}

/// Everything the dashboard shows for one fetch.
#[derive(Debug, Default, PartialEq, Clone)]
pub struct Dashboard {
    pub posts: Vec<AnalyzedPost>,
    pub summary: Summary,
    pub engagement_by_platform: BTreeMap<String, u64>,
}

/// Likes, comments, shares and saves. Saturates instead of overflowing.
pub fn total_engagement(record: &PostRecord) -> u64 {
    [record.comments, record.shares, record.saves]
        .into_iter()
        .fold(record.likes, u64::saturating_add)
}

/// Engagement as a percentage of reach. Zero reach gives a zero rate.
pub fn engagement_rate(total_engagement: u64, reach: u64) -> f64 {
    if reach == 0 {
        return 0.0;
    }

    total_engagement as f64 / reach as f64 * 100.0
}

pub fn analyze(records: Vec<PostRecord>) -> Vec<AnalyzedPost> {
    records
        .into_iter()
        .map(|record| {
            let total_engagement = total_engagement(&record);
            let engagement_rate = engagement_rate(total_engagement, record.reach);
            AnalyzedPost {
                record,
                total_engagement,
                engagement_rate,
            }
        })
        .collect()
}

pub fn summarize(posts: &[AnalyzedPost]) -> Summary {
    let total_posts = posts.len();
    if total_posts == 0 {
        return Summary::default();
    }

    let reach: f64 = posts.iter().map(|p| p.record.reach as f64).sum();
    let rates: f64 = posts.iter().map(|p| p.engagement_rate).sum();
    let total_engagement = posts
        .iter()
        .map(|p| p.total_engagement)
        .fold(0, u64::saturating_add);

    Summary {
        total_posts,
        average_reach: reach / total_posts as f64,
        average_engagement_rate: rates / total_posts as f64,
        total_engagement,
    }
}

/// Sums total engagement per platform. Posts without a platform are grouped
/// under the empty key.
pub fn engagement_by_platform(posts: &[AnalyzedPost]) -> BTreeMap<String, u64> {
    posts.iter().fold(BTreeMap::new(), |mut groups, post| {
        let total = groups.entry(post.record.platform_name()).or_insert(0);
        *total = total.saturating_add(post.total_engagement);
        groups
    })
}

pub fn build_dashboard(records: Vec<PostRecord>) -> Dashboard {
    let posts = analyze(records);
    let summary = summarize(&posts);
    let engagement_by_platform = engagement_by_platform(&posts);

    Dashboard {
        posts,
        summary,
        engagement_by_platform,
    }
}
