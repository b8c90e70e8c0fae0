use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::api::AdminApi;
use crate::config::Config;
use crate::console::TeamQuery;
use crate::error::{AdminError, Result};
use crate::session::{Session, SessionStore};
use crate::types::{
    Contact, DashboardStats, DepartmentCount, EventId, EventStats, RevenuePoint, TeamId, TeamPage,
    YearCount,
};

/// HTTP client for the registration backend.
///
/// Holds the session it was given; a 401 from any endpoint clears the
/// session store so the next invocation has to log in again.
pub struct AdminClient {
    http: Client,
    base: Url,
    session: Option<Session>,
    store: SessionStore,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    role: String,
}

impl AdminClient {
    pub fn new(config: &Config, store: SessionStore) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            http,
            base: config.api_url()?,
            session: None,
            store,
        })
    }

    pub fn with_session(mut self, session: Session) -> Self {
        self.session = Some(session);
        self
    }

    fn url(&self, path: &str) -> Result<Url> {
        self.base
            .join(path.trim_start_matches('/'))
            .map_err(|_| AdminError::InvalidUrl(format!("{}{path}", self.base)))
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let mut request = self.http.request(method, self.url(path)?);
        if let Some(session) = &self.session {
            request = request.bearer_auth(&session.token);
        }
        Ok(request)
    }

    /// Send and map non-success statuses onto the error taxonomy.
    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.send().await?;
        let status = response.status();
        debug!(status = status.as_u16(), url = %response.url(), "response");

        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::UNAUTHORIZED {
            self.store.clear();
            return Err(AdminError::Unauthorized);
        }

        Err(error_for(status, &read_body(response).await))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        let request = self.request(Method::GET, path)?.query(query);
        Ok(self.send(request).await?.json().await?)
    }

    async fn get_bytes(&self, path: &str, query: &[(&str, String)]) -> Result<Vec<u8>> {
        let request = self.request(Method::GET, path)?.query(query);
        Ok(self.send(request).await?.bytes().await?.to_vec())
    }

    /// Bodiless command; the response body is informational only.
    async fn command(&self, method: Method, path: &str) -> Result<()> {
        let request = self.request(method, path)?;
        self.send(request).await?;
        Ok(())
    }

    /// Exchange credentials for a session.
    ///
    /// A 401 here means bad credentials, not an expired session, so it is
    /// reported as a validation failure and the store is left alone.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session> {
        let response = self
            .http
            .post(self.url("teams/login")?)
            .json(&LoginRequest { email, password })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = read_body(response).await;
            return Err(match status {
                StatusCode::UNAUTHORIZED => AdminError::Validation {
                    status: status.as_u16(),
                    message: detail_message(&body)
                        .unwrap_or_else(|| "Invalid email or password".to_string()),
                },
                _ => error_for(status, &body),
            });
        }

        let token: TokenResponse = response.json().await?;
        Ok(Session {
            token: token.access_token,
            role: token.role,
            email: Some(email.to_string()),
        })
    }

    pub async fn contacts(&self, unread_only: bool) -> Result<Vec<Contact>> {
        self.get_json("admin/contacts", &[("unread_only", unread_only.to_string())])
            .await
    }

    pub async fn mark_contact_read(&self, id: u64) -> Result<()> {
        self.command(Method::PUT, &format!("admin/contacts/{id}/read"))
            .await
    }

    pub async fn year_stats(&self, event: Option<EventId>) -> Result<Vec<YearCount>> {
        self.get_json("admin/year-wise-stats", &event_param(event))
            .await
    }

    pub async fn revenue_chart(&self, event: Option<EventId>) -> Result<Vec<RevenuePoint>> {
        self.get_json("admin/revenue-chart", &event_param(event))
            .await
    }
}

#[async_trait]
impl AdminApi for AdminClient {
    async fn stats(&self) -> Result<DashboardStats> {
        self.get_json("admin/stats", &[]).await
    }

    async fn event_stats(&self) -> Result<Vec<EventStats>> {
        self.get_json("admin/event-stats", &[]).await
    }

    async fn departments(&self) -> Result<Vec<DepartmentCount>> {
        self.get_json("admin/departments", &[]).await
    }

    async fn teams(&self, query: &TeamQuery) -> Result<TeamPage> {
        self.get_json("admin/teams", &query.to_pairs()).await
    }

    async fn toggle_verification(&self, id: TeamId) -> Result<()> {
        self.command(Method::PUT, &format!("admin/teams/{id}/verify"))
            .await
    }

    async fn delete_team(&self, id: TeamId) -> Result<()> {
        self.command(Method::DELETE, &format!("admin/teams/{id}"))
            .await
    }

    async fn verify_payment(&self, id: TeamId) -> Result<()> {
        self.command(Method::PUT, &format!("admin/payments/{id}/verify"))
            .await
    }

    async fn reject_payment(&self, id: TeamId) -> Result<()> {
        self.command(Method::PUT, &format!("admin/payments/{id}/reject"))
            .await
    }

    async fn export_csv(&self, event: Option<EventId>) -> Result<Vec<u8>> {
        self.get_bytes("admin/export/csv", &event_param(event)).await
    }

    async fn export_all(&self) -> Result<Vec<u8>> {
        self.get_bytes("admin/export/csv/all", &[]).await
    }
}

fn event_param(event: Option<EventId>) -> Vec<(&'static str, String)> {
    event
        .map(|e| vec![("event_id", e.as_str().to_string())])
        .unwrap_or_default()
}

async fn read_body(response: Response) -> String {
    response
        .text()
        .await
        .unwrap_or_else(|_| "<failed to read response body>".to_string())
}

fn error_for(status: StatusCode, body: &str) -> AdminError {
    let detail = detail_message(body);
    match status {
        StatusCode::NOT_FOUND => {
            AdminError::NotFound(detail.unwrap_or_else(|| "resource".to_string()))
        }
        s if s.is_client_error() => AdminError::Validation {
            status: s.as_u16(),
            message: detail.unwrap_or_else(|| body.to_string()),
        },
        s => AdminError::ApiError {
            status: s.as_u16(),
            message: detail.unwrap_or_else(|| body.to_string()),
        },
    }
}

/// Pull a readable message out of an error body's `detail`, which is either
/// a string or a list of `{loc, msg}` field errors.
pub fn detail_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        Value::String(message) => Some(message.clone()),
        Value::Array(items) => {
            let messages: Vec<String> = items.iter().filter_map(field_message).collect();
            (!messages.is_empty()).then(|| messages.join("; "))
        }
        _ => None,
    }
}

fn field_message(item: &Value) -> Option<String> {
    let msg = item.get("msg")?.as_str()?;
    let field = item
        .get("loc")
        .and_then(Value::as_array)
        .and_then(|loc| loc.last())
        .and_then(|last| match last {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
        .filter(|field| field != "body");

    Some(match field {
        Some(field) => format!("{field}: {msg}"),
        None => msg.to_string(),
    })
}
