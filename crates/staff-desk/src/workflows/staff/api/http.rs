use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::{ApiError, StaffApi};
use crate::config::ApiConfig;
use crate::workflows::staff::domain::{StaffId, StaffRecord, VacancyRecord};
use crate::workflows::staff::form::StaffFormPayload;

/// Some deployments wrap payloads in `{ "data": ... }`, others do not.
#[derive(Deserialize)]
#[serde(untagged)]
enum Envelope<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Envelope<T> {
    fn into_inner(self) -> T {
        match self {
            Self::Wrapped { data } | Self::Bare(data) => data,
        }
    }
}

/// `reqwest` client for the staff backend.
#[derive(Debug, Clone)]
pub struct HttpStaffApi {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpStaffApi {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|err| ApiError::Transport(format!("unable to build http client: {err}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let error = error_from_response(status, &body);
            warn!(%status, error = %error, "staff backend rejected request");
            return Err(error);
        }

        let envelope: Envelope<T> = response.json().await.map_err(|err| {
            ApiError::Transport(format!("unexpected response from staff backend: {err}"))
        })?;
        Ok(envelope.into_inner())
    }
}

#[async_trait]
impl StaffApi for HttpStaffApi {
    async fn list_staff(&self) -> Result<Vec<StaffRecord>, ApiError> {
        debug!("GET company/staff");
        self.send(self.client.get(self.url("company/staff"))).await
    }

    async fn list_vacancies(&self) -> Result<Vec<VacancyRecord>, ApiError> {
        debug!("GET company/vacancies");
        self.send(self.client.get(self.url("company/vacancies")))
            .await
    }

    async fn create_staff(&self, payload: &StaffFormPayload) -> Result<StaffRecord, ApiError> {
        debug!("POST company/staff");
        self.send(self.client.post(self.url("company/staff")).json(payload))
            .await
    }

    async fn update_staff(
        &self,
        id: StaffId,
        payload: &StaffFormPayload,
    ) -> Result<StaffRecord, ApiError> {
        debug!(%id, "PUT company/staff");
        self.send(
            self.client
                .put(self.url(&format!("company/staff/{id}")))
                .json(payload),
        )
        .await
    }
}

fn transport_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        ApiError::Transport("staff backend timed out".to_string())
    } else if err.is_connect() {
        ApiError::Transport(format!("unable to reach staff backend: {err}"))
    } else {
        ApiError::Transport(format!("staff backend request failed: {err}"))
    }
}

/// Map a non-success response onto the error taxonomy.
pub(crate) fn error_from_response(status: StatusCode, body: &str) -> ApiError {
    let message = extract_message(body).unwrap_or_else(|| {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    });

    match status {
        StatusCode::BAD_REQUEST | StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY => {
            ApiError::Validation(message)
        }
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            ApiError::Transport(format!("not authorized: {message}"))
        }
        _ => ApiError::Transport(format!("staff backend error ({}): {message}", status.as_u16())),
    }
}

fn extract_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    match serde_json::from_str::<Value>(trimmed) {
        Ok(value) => ["error", "message", "detail"]
            .iter()
            .find_map(|key| value.get(key).and_then(Value::as_str))
            .map(str::to_string),
        Err(_) => Some(trimmed.to_string()),
    }
}
