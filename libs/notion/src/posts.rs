use std::str::FromStr;

use chrono::NaiveDate;
use entity::{option::from_name, prelude::*};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::{properties, Client, NotionError, PostSource};

const PAGE_SIZE: u32 = 100;

/// Result of reading the posts table. A page without an inline database is
/// reported apart from a database that simply has no rows.
#[derive(Debug, PartialEq)]
pub enum FetchOutcome {
    Posts(Vec<PostRecord>),
    NoDatabase { page_id: String },
}

#[derive(Deserialize)]
struct List {
    #[serde(default)]
    results: Vec<Value>,
    #[serde(default)]
    has_more: bool,
    next_cursor: Option<String>,
}

#[tracing::instrument(skip(client))]
pub async fn fetch_posts(
    client: &Client,
    source: &PostSource,
) -> Result<FetchOutcome, NotionError> {
    let database_id = match source {
        PostSource::Database(id) => id.clone(),
        PostSource::Page(page_id) => {
            let Some(id) = find_inline_database(client, page_id).await? else {
                info!(task = "fetch posts", page_id, "no inline database found");
                return Ok(FetchOutcome::NoDatabase {
                    page_id: page_id.clone(),
                });
            };
            id
        }
    };

    let pages = query_database(client, &database_id).await?;
    let posts = pages.iter().map(to_post_record).collect();

    Ok(FetchOutcome::Posts(posts))
}

/// The database id to read from and write to, looking inside the page when
/// the source is a page.
pub async fn resolve_database(
    client: &Client,
    source: &PostSource,
) -> Result<Option<String>, NotionError> {
    match source {
        PostSource::Database(id) => Ok(Some(id.clone())),
        PostSource::Page(id) => find_inline_database(client, id).await,
    }
}

/// First child block of the page that is an inline database.
pub async fn find_inline_database(
    client: &Client,
    page_id: &str,
) -> Result<Option<String>, NotionError> {
    let mut next_cursor: Option<String> = None;
    loop {
        let mut query = vec![("page_size", PAGE_SIZE.to_string())];
        if let Some(cursor) = &next_cursor {
            query.push(("start_cursor", cursor.clone()));
        }

        let list: List = client
            .get(&format!("blocks/{}/children", page_id), &query)
            .await?;

        let found = list.results.iter().find_map(|block| {
            if block.get("type").and_then(Value::as_str) != Some("child_database") {
                return None;
            }
            block.get("id").and_then(Value::as_str).map(str::to_string)
        });
        if found.is_some() {
            return Ok(found);
        }

        match (list.has_more, list.next_cursor) {
            (true, Some(cursor)) => next_cursor = Some(cursor),
            _ => return Ok(None),
        }
    }
}

/// Every row of the database, following pagination to the end.
pub async fn query_database(
    client: &Client,
    database_id: &str,
) -> Result<Vec<Value>, NotionError> {
    let mut next_cursor: Option<String> = None;
    let mut pages = vec![];
    loop {
        let mut body = json!({ "page_size": PAGE_SIZE });
        if let Some(cursor) = &next_cursor {
            body["start_cursor"] = json!(cursor);
        }

        let mut list: List = client
            .post(&format!("databases/{}/query", database_id), &body)
            .await?;
        pages.append(&mut list.results);

        match (list.has_more, list.next_cursor) {
            (true, Some(cursor)) => next_cursor = Some(cursor),
            _ => break,
        }
    }

    Ok(pages)
}

/// Flattens one database row. Never fails: anything missing reads as blank
/// or zero.
pub fn to_post_record(page: &Value) -> PostRecord {
    let empty = json!({});
    let props = page.get("properties").unwrap_or(&empty);

    PostRecord {
        title: properties::title(props, properties::TITLE),
        platform: option(props, properties::PLATFORM),
        post_type: option(props, properties::POST_TYPE),
        content_type: option(props, properties::CONTENT),
        date: parse_date(&properties::date(props, properties::DATE)),
        reach: properties::number(props, properties::REACH),
        impressions: properties::number(props, properties::IMPRESSIONS),
        likes: properties::number(props, properties::LIKES),
        comments: properties::number(props, properties::COMMENTS),
        shares: properties::number(props, properties::SHARES),
        saves: properties::number(props, properties::SAVES),
        reposts: properties::number(props, properties::REPOST),
    }
}

fn option<T: FromStr>(props: &Value, column: &str) -> Option<T> {
    let name = properties::select(props, column);
    match from_name(&name) {
        Ok(option) => option,
        Err(_) => {
            warn!(task = "read select option", column, name, "unknown option");
            None
        }
    }
}

/// Date part of an ISO date or datetime.
fn parse_date(start: &str) -> Option<NaiveDate> {
    let date = start.get(..10)?;
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}
