use anyhow::Context;
use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    routing::get,
    Router,
};
use notion::PostSource;
use toml::{map::Map, Value};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{info, warn};
use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;
use utoipa_redoc::{Redoc, Servable};
use utoipa_swagger_ui::SwaggerUi;

pub mod healthz;
pub mod home;
pub mod post;
mod response;

const DEFAULT_PORT: u16 = 8000;

#[derive(Debug)]
pub enum ApiError {
    ClientError(String),
    ServerError(String),
}

#[derive(Clone, Debug)]
pub struct ApiState {
    notion: notion::Client,
    source: PostSource,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub port: u16,
    pub allowed_origins: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            allowed_origins: vec!["http://localhost:3000".to_string()],
        }
    }
}

impl Config {
    /// Reads the `[api]` table, keeping defaults for anything left out.
    pub fn load(config: &Map<String, Value>) -> anyhow::Result<Self> {
        let mut api = Config::default();
        let Some(table) = config.get("api") else {
            return Ok(api);
        };

        if let Some(port) = table.get("port") {
            let port = port.as_integer().context("api.port must be an integer")?;
            api.port = u16::try_from(port).context("api.port is out of range")?;
        }

        if let Some(origins) = table.get("allowed_origins") {
            api.allowed_origins = origins
                .as_array()
                .context("api.allowed_origins must be an array")?
                .iter()
                .map(|origin| {
                    origin
                        .as_str()
                        .map(str::to_string)
                        .context("api.allowed_origins must hold strings")
                })
                .collect::<anyhow::Result<_>>()?;
        }

        Ok(api)
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        post::get_posts,
        post::get_dashboard,
        post::get_form,
        post::submit_post,
    ),
    components(schemas(
        post::request::PostFormFields,
        post::response::FetchStatus,
        post::response::PostResp,
        post::response::GetPostsResp,
        post::response::SummaryResp,
        post::response::PlatformEngagementResp,
        post::response::GetDashboardResp,
        post::response::FormOptionsResp,
        post::response::GetFormResp,
        post::response::SubmitPostResp,
        post::form::FormState,
    )),
    tags(
        (name = "posts", description = "Post analytics backed by a Notion database")
    )
)]
struct ApiDoc;

pub async fn serve(
    notion_config: notion::Config,
    config: &Config,
) -> anyhow::Result<Router> {
    info!(task = "start api serving");

    let notion = notion::Client::new(
        &notion_config.token,
        &notion_config.base_url,
        &notion_config.version,
    )
    .context("failed to build notion client")?;

    let state = ApiState {
        notion,
        source: notion_config.source,
    };

    Ok(router(state, config))
}

async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}

fn allow_origin(allowed_origins: &[String]) -> AllowOrigin {
    if allowed_origins.iter().any(|origin| origin == "*") {
        return AllowOrigin::any();
    }

    let origins = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(origin) => Some(origin),
            Err(e) => {
                warn!(task = "parse origin", origin, error = e.to_string());
                None
            }
        })
        .collect::<Vec<_>>();

    AllowOrigin::list(origins)
}

pub fn router(state: ApiState, config: &Config) -> Router {
    // posts
    let post_router = Router::new()
        .route("/", get(post::get_posts).post(post::submit_post))
        .route("/form", get(post::get_form))
        .fallback(not_found)
        .with_state(state.clone());

    Router::new()
        .merge(
            SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", ApiDoc::openapi()),
        )
        .merge(Redoc::with_url("/redoc", ApiDoc::openapi()))
        .merge(RapiDoc::new("/api-docs/openapi.json").path("/rapidoc"))
        .route("/", get(home::get_home))
        .route("/healthz", get(healthz::get_health))
        .route("/dashboard", get(post::get_dashboard))
        .nest("/posts", post_router)
        .layer(
            CorsLayer::new()
                .allow_origin(allow_origin(&config.allowed_origins))
                .allow_methods([Method::GET, Method::POST])
                .allow_headers([header::CONTENT_TYPE]),
        )
        .fallback(not_found)
        .with_state(state)
}

impl ApiState {
    pub fn new(notion: notion::Client, source: PostSource) -> Self {
        Self { notion, source }
    }
}
