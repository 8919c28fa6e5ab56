use std::fmt::Display;

use chrono::{Local, NaiveDate};
use entity::{option::from_name, prelude::*};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use strum::IntoEnumIterator;
use tracing::{error, info};

use crate::{
    posts::resolve_database, properties, Client, NotionError, PostSource,
};

/// Raw values as typed into the submission form.
#[derive(Debug, Clone, PartialEq)]
pub struct PostDraft {
    pub title: String,
    pub platform: String,
    pub post_type: String,
    pub content_type: String,
    pub date: String,
    pub reach: String,
    pub impressions: String,
    pub likes: String,
    pub comments: String,
    pub shares: String,
    pub saves: String,
    pub reposts: String,
}

impl Default for PostDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            platform: first_option::<Platform>(),
            post_type: first_option::<PostType>(),
            content_type: first_option::<ContentType>(),
            date: Local::now().date_naive().to_string(),
            reach: "0".to_string(),
            impressions: "0".to_string(),
            likes: "0".to_string(),
            comments: "0".to_string(),
            shares: "0".to_string(),
            saves: "0".to_string(),
            reposts: "0".to_string(),
        }
    }
}

fn first_option<T: IntoEnumIterator + Display>() -> String {
    T::iter().next().map(|t| t.to_string()).unwrap_or_default()
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error(
        "Please enter valid values for: {}. Counts must be whole numbers, e.g. 5,000.",
        .fields.join(", ")
    )]
    Validation { fields: Vec<String> },

    #[error("no inline database was found in page {}", page_id)]
    NoDatabase { page_id: String },

    #[error("Error {}: {}", status, message)]
    Write { status: u16, message: String },

    #[error(transparent)]
    Notion(NotionError),
}

impl From<NotionError> for SubmitError {
    fn from(e: NotionError) -> Self {
        match e {
            NotionError::FailedStatusCode {
                status_code,
                message,
            } => SubmitError::Write {
                status: status_code.as_u16(),
                message,
            },
            e => SubmitError::Notion(e),
        }
    }
}

#[derive(Deserialize)]
struct Created {
    id: String,
}

/// Parses a count such as `5,000`. Blank, negative and fractional input is
/// rejected, as are commas that do not separate groups of three digits.
pub fn parse_count(text: &str) -> Option<u64> {
    let text = text.trim();
    if !text.chars().all(|c| c.is_ascii_digit() || c == ',') {
        return None;
    }

    let mut groups = text.split(',');
    let lead = groups.next()?;
    let mut rest = groups.peekable();
    if rest.peek().is_some()
        && (!(1..=3).contains(&lead.len()) || !rest.all(|group| group.len() == 3))
    {
        return None;
    }

    text.replace(',', "").parse::<u64>().ok()
}

impl PostDraft {
    /// Checks every field at once so the form can report all problems in a
    /// single message.
    pub fn validate(&self) -> Result<PostRecord, SubmitError> {
        let mut invalid = vec![];

        let mut count = |label: &str, text: &str| {
            parse_count(text).unwrap_or_else(|| {
                invalid.push(label.to_string());
                0
            })
        };
        let reach = count(properties::REACH, &self.reach);
        let impressions = count(properties::IMPRESSIONS, &self.impressions);
        let likes = count(properties::LIKES, &self.likes);
        let comments = count(properties::COMMENTS, &self.comments);
        let shares = count(properties::SHARES, &self.shares);
        let saves = count(properties::SAVES, &self.saves);
        let reposts = count(properties::REPOST, &self.reposts);

        let platform = from_name::<Platform>(&self.platform)
            .map_err(|_| invalid.push(properties::PLATFORM.to_string()))
            .unwrap_or_default();
        let post_type = from_name::<PostType>(&self.post_type)
            .map_err(|_| invalid.push(properties::POST_TYPE.to_string()))
            .unwrap_or_default();
        let content_type = from_name::<ContentType>(&self.content_type)
            .map_err(|_| invalid.push(properties::CONTENT.to_string()))
            .unwrap_or_default();

        let date = match self.date.trim() {
            "" => None,
            date => NaiveDate::parse_from_str(date, "%Y-%m-%d")
                .map_err(|_| invalid.push(properties::DATE.to_string()))
                .ok(),
        };

        if !invalid.is_empty() {
            return Err(SubmitError::Validation { fields: invalid });
        }

        Ok(PostRecord {
            title: self.title.trim().to_string(),
            platform,
            post_type,
            content_type,
            date,
            reach,
            impressions,
            likes,
            comments,
            shares,
            saves,
            reposts,
        })
    }
}

/// Property bag for a new row of the posts database.
pub fn to_properties(record: &PostRecord) -> Value {
    let mut bag = Map::new();
    bag.insert(
        properties::TITLE.to_string(),
        properties::title_value(&record.title),
    );

    let selects = [
        (properties::PLATFORM, record.platform.map(|p| p.to_string())),
        (properties::POST_TYPE, record.post_type.map(|p| p.to_string())),
        (properties::CONTENT, record.content_type.map(|c| c.to_string())),
    ];
    for (column, name) in selects {
        if let Some(name) = name {
            bag.insert(column.to_string(), properties::select_value(&name));
        }
    }

    if let Some(date) = record.date {
        bag.insert(
            properties::DATE.to_string(),
            properties::date_value(&date.format("%Y-%m-%d").to_string()),
        );
    }

    let counts = [
        (properties::REACH, record.reach),
        (properties::IMPRESSIONS, record.impressions),
        (properties::LIKES, record.likes),
        (properties::COMMENTS, record.comments),
        (properties::SHARES, record.shares),
        (properties::SAVES, record.saves),
        (properties::REPOST, record.reposts),
    ];
    for (column, count) in counts {
        bag.insert(column.to_string(), properties::number_value(count));
    }

    Value::Object(bag)
}

/// Creates a row for an already validated post and returns the id of the
/// new page.
#[tracing::instrument(skip(client, record))]
pub async fn create_post(
    client: &Client,
    source: &PostSource,
    record: &PostRecord,
) -> Result<String, SubmitError> {
    let Some(database_id) = resolve_database(client, source).await? else {
        let page_id = match source {
            PostSource::Page(id) | PostSource::Database(id) => id.clone(),
        };
        return Err(SubmitError::NoDatabase { page_id });
    };

    let body = json!({
        "parent": { "database_id": database_id },
        "properties": to_properties(record),
    });

    let created = client.post::<_, Created>("pages", &body).await;
    match created {
        Ok(created) => {
            info!(task = "create post", page_id = created.id.as_str());
            Ok(created.id)
        }
        Err(e) => {
            error!(task = "create post", database_id, error = e.to_string());
            Err(e.into())
        }
    }
}
