use std::str::FromStr;

use strum::{Display, EnumIter, EnumString};

/// Select options of the `Platform` column.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString, EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum Platform {
    X,
    Threads,
    Instagram,
    LinkedIn,
    Facebook,
    Snapchat,
    TikTok,
}

/// Select options of the `Post type` column.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString, EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum PostType {
    Image,
    Story,
    Carousel,
    Text,
    Video,
    Reel,
}

/// Select options of the `Content` column.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString, EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum ContentType {
    #[strum(to_string = "Job Recruitment", serialize = "JobRecruitment")]
    JobRecruitment,
    Webinars,
    Entertainment,
    Personal,
    Promotion,
    #[strum(to_string = "Data Insights", serialize = "DataInsights")]
    DataInsights,
    Announcement,
    Education,
}

/// Parses a select option by its display name. Blank names mean "nothing
/// selected" and yield `Ok(None)`.
pub fn from_name<T: FromStr>(name: &str) -> Result<Option<T>, T::Err> {
    let name = name.trim();
    if name.is_empty() {
        return Ok(None);
    }

    name.parse().map(Some)
}
