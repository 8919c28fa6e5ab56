use reqwest::header::{HeaderMap, HeaderValue};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::{response::IntoResponse, NotionError};

#[derive(Clone, Debug)]
pub struct Client {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl Client {
    pub fn new(
        token: &str,
        base_url: &str,
        version: &str,
    ) -> Result<Self, NotionError> {
        let mut headers = HeaderMap::new();
        headers.insert("Accept", HeaderValue::from_static("application/json"));
        headers.insert(
            "Content-Type",
            HeaderValue::from_static("application/json"),
        );
        headers.insert(
            "Authorization",
            HeaderValue::from_str(format!("Bearer {}", token).as_str())
                .into_response("failed to build authorization header")?,
        );
        headers.insert(
            "Notion-Version",
            HeaderValue::from_str(version)
                .into_response("failed to build version header")?,
        );

        let client = reqwest::ClientBuilder::new()
            .default_headers(headers)
            .build()
            .into_response("failed to build http client")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub async fn get<Q, T>(&self, path: &str, query: &Q) -> Result<T, NotionError>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self
            .client
            .get(format!("{}/{}", self.base_url, path))
            .query(query);

        self.send(request).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, NotionError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_string(body)
            .into_response("failed to serialize body")?;
        let request = self
            .client
            .post(format!("{}/{}", self.base_url, path))
            .body(body);

        self.send(request).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, NotionError> {
        let response = request.send().await.into_response("failed to send")?;

        let status = response.status();
        let text = response.text().await.into_response("failed to get text")?;

        if !status.is_success() {
            // Notion wraps failures as {"object":"error","message":...}
            let message = serde_json::from_str::<ErrorBody>(&text)
                .map(|body| body.message)
                .unwrap_or(text);
            return Err(NotionError::FailedStatusCode {
                status_code: status,
                message,
            });
        }

        serde_json::from_str(&text).into_response("failed to parse response")
    }
}
