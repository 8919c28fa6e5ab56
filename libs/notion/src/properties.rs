//! Defensive readers for Notion property values.
//!
//! Every reader takes a page's `properties` object and a column name and
//! falls back to an empty string or zero when any step of the shape is
//! missing, null or of the wrong type.

use serde_json::{json, Value};

pub const TITLE: &str = "Post title";
pub const PLATFORM: &str = "Platform";
pub const POST_TYPE: &str = "Post type";
pub const CONTENT: &str = "Content";
pub const DATE: &str = "Date";
pub const REACH: &str = "Reach";
pub const IMPRESSIONS: &str = "Impressions";
pub const LIKES: &str = "Likes";
pub const COMMENTS: &str = "Comments";
pub const SHARES: &str = "Shares";
pub const SAVES: &str = "Saves";
pub const REPOST: &str = "Repost";

fn property<'a>(properties: &'a Value, name: &str, kind: &str) -> Option<&'a Value> {
    properties.get(name)?.get(kind)
}

/// Plain text of the first rich-text run of a title column.
pub fn title(properties: &Value, name: &str) -> String {
    let Some(run) = property(properties, name, "title")
        .and_then(Value::as_array)
        .and_then(|runs| runs.first())
    else {
        return String::new();
    };

    run.get("plain_text")
        .or_else(|| run.get("text").and_then(|text| text.get("content")))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Name of the selected option, empty when nothing is selected.
pub fn select(properties: &Value, name: &str) -> String {
    property(properties, name, "select")
        .and_then(|option| option.get("name"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Stored number as a non-negative integer. Fractions are truncated and
/// negative or non-finite values read as zero.
pub fn number(properties: &Value, name: &str) -> u64 {
    let Some(number) = property(properties, name, "number") else {
        return 0;
    };

    if let Some(n) = number.as_u64() {
        return n;
    }

    match number.as_f64() {
        Some(n) if n.is_finite() && n >= 0.0 => n as u64,
        _ => 0,
    }
}

/// ISO start of a date column, empty when unset.
pub fn date(properties: &Value, name: &str) -> String {
    property(properties, name, "date")
        .and_then(|date| date.get("start"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

pub fn title_value(content: &str) -> Value {
    json!({ "title": [{ "text": { "content": content } }] })
}

pub fn select_value(name: &str) -> Value {
    json!({ "select": { "name": name } })
}

pub fn number_value(number: u64) -> Value {
    json!({ "number": number })
}

pub fn date_value(start: &str) -> Value {
    json!({ "date": { "start": start } })
}
