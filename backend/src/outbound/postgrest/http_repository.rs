//! Reqwest-backed tutor repository for PostgREST-compatible endpoints.
//!
//! This adapter owns transport details only: URL and header construction,
//! HTTP error mapping, and JSON decoding into domain tutors. One request is
//! issued per port call.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, InvalidHeaderValue};
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use tracing::debug;

use super::dto::{NewTutorRowDto, PostgrestErrorDto, TutorChangesRowDto, TutorRowDto};
use crate::domain::ports::{TutorRepository, TutorRepositoryError};
use crate::domain::{NewTutor, Tutor, TutorChanges, TutorId};

const REST_PATH: &str = "rest/v1/";
const ORDER_NEWEST_FIRST: &str = "created_at.desc";
const RETURN_REPRESENTATION: &str = "return=representation";
/// PostgreSQL `undefined_table`.
const UNDEFINED_TABLE: &str = "42P01";
/// PostgREST schema cache miss for an unknown relation.
const SCHEMA_CACHE_MISS: &str = "PGRST205";
/// PostgreSQL `invalid_text_representation`, raised when an `eq.` filter
/// value cannot be cast to the id column type.
const INVALID_TEXT_REPRESENTATION: &str = "22P02";

/// Errors raised while building a [`PostgrestTutorRepository`].
#[derive(Debug, thiserror::Error)]
pub enum PostgrestSetupError {
    /// The base URL cannot carry a path.
    #[error("storage url {url} cannot be used as a REST base")]
    InvalidBaseUrl { url: String },
    /// The table name is not a plain identifier.
    #[error("storage table {table:?} must contain only letters, digits and underscores")]
    InvalidTable { table: String },
    /// The API key cannot be sent as a header value.
    #[error("storage api key is not a valid header value")]
    InvalidApiKey(#[from] InvalidHeaderValue),
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Connection settings for [`PostgrestTutorRepository`].
#[derive(Debug, Clone)]
pub struct PostgrestSettings {
    /// Project base URL, e.g. `https://abc.supabase.co`.
    pub base_url: Url,
    /// Key sent as `apikey` and as the bearer token.
    pub api_key: String,
    /// Table holding tutor rows.
    pub table: String,
    /// Per-request timeout; `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

/// Tutor repository that talks to a PostgREST table over HTTP.
pub struct PostgrestTutorRepository {
    client: Client,
    table_url: Url,
    table: String,
}

impl PostgrestTutorRepository {
    /// Build the adapter and its HTTP client.
    ///
    /// ```rust,ignore
    /// let repository = PostgrestTutorRepository::new(settings)?;
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`PostgrestSetupError`] when the URL, table or key cannot be
    /// used, or the reqwest client cannot be constructed.
    pub fn new(settings: PostgrestSettings) -> Result<Self, PostgrestSetupError> {
        let table_url = table_url(&settings.base_url, &settings.table)?;

        let mut api_key = HeaderValue::from_str(&settings.api_key)?;
        api_key.set_sensitive(true);
        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", settings.api_key))?;
        bearer.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert("apikey", api_key);
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            table_url,
            table: settings.table,
        })
    }

    async fn fetch_rows(
        &self,
        request: RequestBuilder,
        id: Option<&TutorId>,
    ) -> Result<Vec<Tutor>, TutorRepositoryError> {
        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref(), &self.table, id));
        }
        parse_rows(body.as_ref())
    }

    async fn fetch_one(
        &self,
        request: RequestBuilder,
        id: &TutorId,
    ) -> Result<Tutor, TutorRepositoryError> {
        self.fetch_rows(request, Some(id))
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| TutorRepositoryError::not_found(id.as_ref()))
    }
}

#[async_trait]
impl TutorRepository for PostgrestTutorRepository {
    async fn list(&self) -> Result<Vec<Tutor>, TutorRepositoryError> {
        debug!(table = %self.table, "listing tutors");
        let request = self
            .client
            .get(self.table_url.clone())
            .query(&[("select", "*"), ("order", ORDER_NEWEST_FIRST)]);
        self.fetch_rows(request, None).await
    }

    async fn find(&self, id: &TutorId) -> Result<Tutor, TutorRepositoryError> {
        debug!(table = %self.table, tutor_id = %id, "fetching tutor");
        let request = self
            .client
            .get(self.table_url.clone())
            .query(&[("select", "*")]);
        self.fetch_one(filter_by_id(request, id), id).await
    }

    async fn create(&self, tutor: NewTutor) -> Result<Tutor, TutorRepositoryError> {
        debug!(table = %self.table, "inserting tutor");
        let request = self
            .client
            .post(self.table_url.clone())
            .header("Prefer", RETURN_REPRESENTATION)
            .json(&NewTutorRowDto::from(&tutor));
        self.fetch_rows(request, None).await?.into_iter().next().ok_or_else(|| {
            TutorRepositoryError::query("insert returned no representation")
        })
    }

    async fn update(
        &self,
        id: &TutorId,
        changes: TutorChanges,
    ) -> Result<Tutor, TutorRepositoryError> {
        if changes.is_empty() {
            return self.find(id).await;
        }
        debug!(table = %self.table, tutor_id = %id, "updating tutor");
        let request = self
            .client
            .patch(self.table_url.clone())
            .header("Prefer", RETURN_REPRESENTATION)
            .json(&TutorChangesRowDto::from(&changes));
        self.fetch_one(filter_by_id(request, id), id).await
    }

    async fn delete(&self, id: &TutorId) -> Result<(), TutorRepositoryError> {
        debug!(table = %self.table, tutor_id = %id, "deleting tutor");
        let request = self
            .client
            .delete(self.table_url.clone())
            .header("Prefer", RETURN_REPRESENTATION);
        self.fetch_one(filter_by_id(request, id), id)
            .await
            .map(|_| ())
    }
}

fn filter_by_id(request: RequestBuilder, id: &TutorId) -> RequestBuilder {
    request.query(&[("id", format!("eq.{id}"))])
}

fn table_url(base_url: &Url, table: &str) -> Result<Url, PostgrestSetupError> {
    if base_url.cannot_be_a_base() {
        return Err(PostgrestSetupError::InvalidBaseUrl {
            url: base_url.to_string(),
        });
    }
    let mut base = base_url.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    let is_identifier = !table.is_empty()
        && table
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '_');
    if !is_identifier {
        return Err(PostgrestSetupError::InvalidTable {
            table: table.to_owned(),
        });
    }
    base.join(REST_PATH)
        .and_then(|rest| rest.join(table))
        .map_err(|_| PostgrestSetupError::InvalidBaseUrl {
            url: base_url.to_string(),
        })
}

fn parse_rows(body: &[u8]) -> Result<Vec<Tutor>, TutorRepositoryError> {
    let rows: Vec<TutorRowDto> = serde_json::from_slice(body).map_err(|error| {
        TutorRepositoryError::query(format!("invalid tutor rows payload: {error}"))
    })?;
    rows.into_iter()
        .map(TutorRowDto::into_domain)
        .collect::<Result<Vec<_>, _>>()
        .map_err(TutorRepositoryError::query)
}

fn map_transport_error(error: reqwest::Error) -> TutorRepositoryError {
    if error.is_timeout() {
        TutorRepositoryError::connection(format!("request timed out: {error}"))
    } else {
        TutorRepositoryError::connection(error.to_string())
    }
}

/// Keyed requests (`id` present) treat an uncastable id as a missing record:
/// no row can carry a value the column type rejects.
fn map_status_error(
    status: StatusCode,
    body: &[u8],
    table: &str,
    id: Option<&TutorId>,
) -> TutorRepositoryError {
    let decoded: PostgrestErrorDto = serde_json::from_slice(body).unwrap_or_default();
    match (decoded.code.as_deref(), id) {
        (Some(UNDEFINED_TABLE | SCHEMA_CACHE_MISS), _) => {
            return TutorRepositoryError::schema_missing(table);
        }
        (Some(INVALID_TEXT_REPRESENTATION), Some(id)) => {
            return TutorRepositoryError::not_found(id.as_ref());
        }
        _ => {}
    }

    let detail = decoded
        .message
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| body_preview(body));
    let message = if detail.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), detail)
    };

    match status {
        StatusCode::BAD_GATEWAY | StatusCode::SERVICE_UNAVAILABLE | StatusCode::GATEWAY_TIMEOUT => {
            TutorRepositoryError::connection(message)
        }
        _ => TutorRepositoryError::query(message),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
