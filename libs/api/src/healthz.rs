use axum::{extract::State, Json};
use notion::PostSource;
use serde::Serialize;

use crate::ApiState;

#[derive(Serialize)]
pub struct HealthResp {
    pub status: &'static str,
    /// `database` or `page`, depending on how the posts are located
    pub source: &'static str,
}

pub async fn get_health(State(state): State<ApiState>) -> Json<HealthResp> {
    let source = match state.source {
        PostSource::Database(_) => "database",
        PostSource::Page(_) => "page",
    };

    Json(HealthResp {
        status: "ok",
        source,
    })
}
