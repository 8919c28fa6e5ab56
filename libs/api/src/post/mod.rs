use analytics::{analyze, build_dashboard};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use entity::prelude::*;
use notion::{create_post, fetch_posts, FetchOutcome};
use strum::IntoEnumIterator;

pub mod form;
pub mod request;
pub mod response;

use crate::{
    response::{error_message, ApiResponse, IntoApiResponse, IntoNotice},
    ApiState,
};

use self::{
    form::{FormState, PostForm},
    request::PostFormFields,
    response::{
        FetchStatus, FormOptionsResp, GetDashboardResp, GetFormResp,
        GetPostsResp, PlatformEngagementResp, PostResp, SubmitPostResp,
    },
};

const NO_POSTS: &str = "No posts found in the Notion database.";

/// Reads the whole table. Failures become an empty table plus a notice.
async fn load_posts(
    state: &ApiState,
) -> (FetchStatus, Option<String>, Vec<PostRecord>) {
    match fetch_posts(&state.notion, &state.source).await {
        Ok(FetchOutcome::Posts(posts)) if posts.is_empty() => {
            (FetchStatus::Empty, Some(NO_POSTS.to_string()), posts)
        }
        Ok(FetchOutcome::Posts(posts)) => (FetchStatus::Ok, None, posts),
        Ok(FetchOutcome::NoDatabase { page_id }) => (
            FetchStatus::NoDatabase,
            Some(format!("{}: {}", error_message("404-001"), page_id)),
            vec![],
        ),
        Err(e) => (FetchStatus::Error, Some(e.into_notice("502-001")), vec![]),
    }
}

/// List all posts with their engagement
#[utoipa::path(
    get,
    path = "/posts",
    tag = "posts",
    responses(
        (status = 200, description = "Posts table, possibly empty with a notice", body = GetPostsResp)
    )
)]
pub async fn get_posts(State(state): State<ApiState>) -> Json<GetPostsResp> {
    let (status, message, records) = load_posts(&state).await;

    Json(GetPostsResp {
        status,
        message,
        posts: analyze(records).into_iter().map(PostResp::from).collect(),
    })
}

/// Posts table, summary metrics and engagement per platform
#[utoipa::path(
    get,
    path = "/dashboard",
    tag = "posts",
    responses(
        (status = 200, description = "Dashboard data, possibly empty with a notice", body = GetDashboardResp)
    )
)]
pub async fn get_dashboard(
    State(state): State<ApiState>,
) -> Json<GetDashboardResp> {
    let (status, message, records) = load_posts(&state).await;
    let dashboard = build_dashboard(records);

    Json(GetDashboardResp {
        status,
        message,
        posts: dashboard.posts.into_iter().map(PostResp::from).collect(),
        summary: dashboard.summary.into(),
        engagement_by_platform: dashboard
            .engagement_by_platform
            .into_iter()
            .map(|(platform, total_engagement)| PlatformEngagementResp {
                platform,
                total_engagement,
            })
            .collect(),
    })
}

/// Blank submission form with the selectable options
#[utoipa::path(
    get,
    path = "/posts/form",
    tag = "posts",
    responses(
        (status = 200, description = "Form defaults", body = GetFormResp)
    )
)]
pub async fn get_form() -> Json<GetFormResp> {
    let form = PostForm::new(PostFormFields::default());

    Json(GetFormResp {
        state: form.state(),
        fields: form.fields().clone(),
        options: FormOptionsResp {
            platforms: Platform::iter().map(|p| p.to_string()).collect(),
            post_types: PostType::iter().map(|p| p.to_string()).collect(),
            content_types: ContentType::iter().map(|c| c.to_string()).collect(),
        },
    })
}

/// Add a post to the Notion database
#[utoipa::path(
    post,
    path = "/posts",
    tag = "posts",
    request_body = PostFormFields,
    responses(
        (status = 201, description = "Post created, fields reset", body = SubmitPostResp),
        (status = 400, description = "The request body is not a form"),
        (status = 422, description = "A field could not be parsed, nothing was written", body = SubmitPostResp),
        (status = 502, description = "Notion rejected the write", body = SubmitPostResp),
        (status = 500, description = "The submission did not reach an outcome")
    )
)]
pub async fn submit_post(
    State(state): State<ApiState>,
    payload: Result<Json<PostFormFields>, JsonRejection>,
) -> ApiResponse<(StatusCode, Json<SubmitPostResp>)> {
    let Json(fields) = payload.into_response("400-001")?;
    let mut form = PostForm::new(fields);

    if let Some(record) = form.validate() {
        let result = create_post(&state.notion, &state.source, &record).await;
        form.complete(result);
    }

    let (form, outcome) = form.finish();
    let outcome = outcome
        .ok_or("form finished without an outcome")
        .into_response("500-001")?;

    let status_code = match outcome.state {
        FormState::Succeeded => StatusCode::CREATED,
        FormState::ValidationFailed => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::BAD_GATEWAY,
    };

    Ok((
        status_code,
        Json(SubmitPostResp {
            outcome: outcome.state,
            state: form.state(),
            message: outcome.message,
            page_id: outcome.page_id,
            write_status: outcome.write_status,
            fields: form.fields().clone(),
        }),
    ))
}

#[cfg(test)]
mod test {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use notion::PostSource;
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use wiremock::{
        matchers::{method, path},
        Mock, MockServer, ResponseTemplate,
    };

    use crate::{router, ApiState, Config};

    fn database() -> PostSource {
        PostSource::Database("db-1".to_string())
    }

    async fn call(
        server: &MockServer,
        source: PostSource,
        request: Request<Body>,
    ) -> (StatusCode, Value) {
        let client =
            notion::Client::new("secret", &server.uri(), "2022-06-28").unwrap();
        let app = router(ApiState::new(client, source), &Config::default());

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();

        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn mount_rows(server: &MockServer, rows: Value) {
        Mock::given(method("POST"))
            .and(path("/databases/db-1/query"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": rows,
                "has_more": false,
                "next_cursor": null
            })))
            .mount(server)
            .await;
    }

    fn form() -> Value {
        json!({
            "title": "Summer webinar",
            "platform": "LinkedIn",
            "post_type": "Video",
            "content_type": "Webinars",
            "date": "2024-07-15",
            "reach": "5,000",
            "likes": "75"
        })
    }

    #[tokio::test]
    async fn test_get_dashboard() {
        // Arrange
        let server = MockServer::start().await;
        mount_rows(
            &server,
            json!([
                { "properties": {
                    "Post title": { "title": [{ "plain_text": "first" }] },
                    "Platform": { "select": { "name": "X" } },
                    "Likes": { "number": 10 },
                    "Comments": { "number": 2 },
                    "Shares": { "number": 1 },
                    "Saves": { "number": 0 },
                    "Reach": { "number": 100 }
                }},
                { "properties": {
                    "Post title": { "title": [] },
                    "Platform": { "select": { "name": "Instagram" } },
                    "Likes": { "number": 5 }
                }}
            ]),
        )
        .await;

        // Act
        let (status, body) = call(&server, database(), get("/dashboard")).await;

        // Assert
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["posts"][0]["total_engagement"], 13);
        assert_eq!(body["posts"][0]["engagement_rate"], 13.0);
        assert_eq!(body["posts"][1]["title"], "");
        assert_eq!(body["posts"][1]["engagement_rate"], 0.0);
        assert_eq!(body["summary"]["total_posts"], 2);
        assert_eq!(body["summary"]["average_reach"], 50.0);
        assert_eq!(body["summary"]["average_engagement_rate"], 6.5);
        assert_eq!(
            body["engagement_by_platform"],
            json!([
                { "platform": "Instagram", "total_engagement": 5 },
                { "platform": "X", "total_engagement": 13 }
            ])
        );
    }

    #[tokio::test]
    async fn test_get_posts_empty_database() {
        let server = MockServer::start().await;
        mount_rows(&server, json!([])).await;

        let (status, body) = call(&server, database(), get("/posts")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "empty");
        assert_eq!(body["posts"], json!([]));
    }

    #[tokio::test]
    async fn test_get_dashboard_when_notion_fails() {
        // Arrange
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/databases/db-1/query"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "object": "error",
                "message": "API token is invalid."
            })))
            .mount(&server)
            .await;

        // Act
        let (status, body) = call(&server, database(), get("/dashboard")).await;

        // Assert
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "error");
        assert!(body["message"]
            .as_str()
            .unwrap()
            .starts_with("Error fetching data from Notion"));
        assert_eq!(body["summary"]["total_posts"], 0);
        assert_eq!(body["engagement_by_platform"], json!([]));
    }

    #[tokio::test]
    async fn test_get_posts_page_without_database() {
        // Arrange
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/blocks/page-1/children"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [{ "id": "para", "type": "paragraph" }],
                "has_more": false
            })))
            .mount(&server)
            .await;

        // Act
        let (status, body) = call(
            &server,
            PostSource::Page("page-1".to_string()),
            get("/posts"),
        )
        .await;

        // Assert
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "no_database");
        assert_eq!(body["posts"], json!([]));
    }

    #[tokio::test]
    async fn test_get_form() {
        let server = MockServer::start().await;

        let (status, body) = call(&server, database(), get("/posts/form")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["state"], "idle");
        assert_eq!(body["fields"]["reach"], "0");
        assert_eq!(body["options"]["platforms"][3], "LinkedIn");
        assert_eq!(body["options"]["content_types"][0], "Job Recruitment");
    }

    #[tokio::test]
    async fn test_submit_post() {
        // Arrange
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/pages"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "id": "page-7" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        // Act
        let (status, body) = call(&server, database(), post("/posts", form())).await;

        // Assert
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["outcome"], "succeeded");
        assert_eq!(body["state"], "idle");
        assert_eq!(body["page_id"], "page-7");
        assert_eq!(body["message"], "Post added to Notion!");
        assert_eq!(body["fields"]["title"], "");
        assert_eq!(body["fields"]["reach"], "0");
    }

    #[tokio::test]
    async fn test_submit_post_with_bad_number_writes_nothing() {
        // Arrange
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/pages"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;
        let mut body = form();
        body["reach"] = json!("abc");

        // Act
        let (status, body) = call(&server, database(), post("/posts", body)).await;

        // Assert
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["outcome"], "validation_failed");
        assert_eq!(body["state"], "idle");
        assert_eq!(body["fields"]["reach"], "abc");
        assert_eq!(body["fields"]["title"], "Summer webinar");
    }

    #[tokio::test]
    async fn test_submit_post_rejected_by_notion() {
        // Arrange
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/pages"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "object": "error",
                "status": 400,
                "code": "validation_error",
                "message": "Platform is expected to be select."
            })))
            .mount(&server)
            .await;

        // Act
        let (status, body) = call(&server, database(), post("/posts", form())).await;

        // Assert
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["outcome"], "failed");
        assert_eq!(body["write_status"], 400);
        assert_eq!(body["message"], "Error 400: Platform is expected to be select.");
        assert_eq!(body["fields"]["reach"], "5,000");
    }

    #[tokio::test]
    async fn test_submit_post_with_unreadable_body() {
        // Arrange
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/pages"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;
        let request = Request::builder()
            .method("POST")
            .uri("/posts")
            .header("content-type", "application/json")
            .body(Body::from("{ not json"))
            .unwrap();

        // Act
        let (status, body) = call(&server, database(), request).await;

        // Assert
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"]
            .as_str()
            .unwrap()
            .starts_with("The submitted form could not be read"));
    }

    #[tokio::test]
    async fn test_health_and_fallback() {
        let server = MockServer::start().await;

        let (health, body) = call(&server, database(), get("/healthz")).await;
        let (missing, _) = call(&server, database(), get("/nope")).await;
        let (missing_post_route, _) =
            call(&server, database(), get("/posts/nope")).await;

        assert_eq!(health, StatusCode::OK);
        assert_eq!(body["source"], "database");
        assert_eq!(missing, StatusCode::NOT_FOUND);
        assert_eq!(missing_post_route, StatusCode::NOT_FOUND);
    }
}
