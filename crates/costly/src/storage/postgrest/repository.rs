//! PostgREST repository implementation.
//!
//! Implements `WaitlistRepository` from `costly_core::storage` on top of the
//! managed store's REST interface.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue, InvalidHeaderValue, AUTHORIZATION},
    Client, RequestBuilder, Response,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use costly_core::storage::{RepositoryError, Result, WaitlistRepository};
use costly_core::waitlist::WaitlistEntry;

use super::error::{map_error_response, map_transport_error, ENTITY_TYPE};

const SELECT_COLUMNS: (&str, &str) = ("select", "id,email");
const RETURN_REPRESENTATION: (&str, &str) = ("Prefer", "return=representation");

/// Rows fetched per `list_entries` request. Must not exceed the server's
/// `max-rows` setting (1000 on Supabase), or pages come back short and the
/// listing stops early.
const PAGE_SIZE: usize = 1000;

#[derive(Debug, Serialize)]
struct EmailPayload<'a> {
    email: &'a str,
}

#[derive(Debug, Deserialize)]
struct IdRow {
    id: i64,
}

/// Builds the REST endpoint of a table.
fn table_url(base_url: &str, table: &str) -> String {
    format!("{}/rest/v1/{}", base_url.trim_end_matches('/'), table)
}

fn id_filter(id: i64) -> (&'static str, String) {
    ("id", format!("eq.{id}"))
}

/// Waitlist repository backed by a PostgREST endpoint.
#[derive(Debug, Clone)]
pub struct PostgrestRepository {
    client: Client,
    table_url: String,
    page_size: usize,
}

impl PostgrestRepository {
    /// Creates a repository for `table` on the store at `base_url`.
    ///
    /// Every request carries the service key both as `apikey` and as a bearer token.
    pub fn new(base_url: &str, service_key: &str, table: &str, timeout: Duration) -> Result<Self> {
        let invalid_key = |_: InvalidHeaderValue| {
            RepositoryError::NotConfigured("Invalid waitlist store service key".to_string())
        };

        let mut headers = HeaderMap::new();
        headers.insert("apikey", HeaderValue::from_str(service_key).map_err(invalid_key)?);
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {service_key}")).map_err(invalid_key)?,
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            table_url: table_url(base_url, table),
            page_size: PAGE_SIZE,
        })
    }

    /// Sends a request, turning non-success responses into repository errors.
    ///
    /// `id` names the row the request concerns, for error reporting.
    async fn send(&self, request: RequestBuilder, id: &str) -> Result<Response> {
        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::debug!(%status, body = %body, "Waitlist store request failed");
        Err(map_error_response(status, &body, id))
    }

    /// Sends a request and decodes the returned rows.
    async fn rows<T: DeserializeOwned>(&self, request: RequestBuilder, id: &str) -> Result<Vec<T>> {
        self.send(request, id)
            .await?
            .json::<Vec<T>>()
            .await
            .map_err(|e| RepositoryError::Serialization(e.to_string()))
    }
}

#[async_trait]
impl WaitlistRepository for PostgrestRepository {
    async fn list_entries(&self) -> Result<Vec<WaitlistEntry>> {
        let limit = self.page_size.to_string();
        let mut entries = Vec::new();

        loop {
            let offset = entries.len().to_string();
            let request = self.client.get(&self.table_url).query(&[
                SELECT_COLUMNS,
                ("order", "id.asc"),
                ("limit", limit.as_str()),
                ("offset", offset.as_str()),
            ]);

            let page: Vec<WaitlistEntry> = self.rows(request, "unknown").await?;
            let last_page = page.len() < self.page_size;
            entries.extend(page);
            if last_page {
                return Ok(entries);
            }
        }
    }

    async fn insert_entry(&self, email: &str) -> Result<WaitlistEntry> {
        let request = self
            .client
            .post(&self.table_url)
            .header(RETURN_REPRESENTATION.0, RETURN_REPRESENTATION.1)
            .query(&[SELECT_COLUMNS])
            .json(&[EmailPayload { email }]);

        self.rows::<WaitlistEntry>(request, email)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| RepositoryError::Serialization("Insert returned no rows".to_string()))
    }

    async fn find_by_email_ilike(&self, email: &str) -> Result<Option<WaitlistEntry>> {
        let pattern = format!("ilike.{email}");
        let request = self.client.get(&self.table_url).query(&[
            SELECT_COLUMNS,
            ("email", pattern.as_str()),
            ("limit", "1"),
        ]);

        Ok(self.rows(request, email).await?.into_iter().next())
    }

    async fn update_email(&self, id: i64, email: &str) -> Result<()> {
        let request = self
            .client
            .patch(&self.table_url)
            .header(RETURN_REPRESENTATION.0, RETURN_REPRESENTATION.1)
            .query(&[id_filter(id)])
            .query(&[SELECT_COLUMNS])
            .json(&EmailPayload { email });

        let updated: Vec<WaitlistEntry> = self.rows(request, email).await?;
        if updated.is_empty() {
            return Err(RepositoryError::NotFound {
                entity_type: ENTITY_TYPE,
                id: id.to_string(),
            });
        }
        Ok(())
    }

    async fn delete_entry(&self, id: i64) -> Result<()> {
        let request = self
            .client
            .delete(&self.table_url)
            .header(RETURN_REPRESENTATION.0, RETURN_REPRESENTATION.1)
            .query(&[id_filter(id)])
            .query(&[SELECT_COLUMNS]);

        let deleted: Vec<WaitlistEntry> = self.rows(request, &id.to_string()).await?;
        if deleted.is_empty() {
            return Err(RepositoryError::NotFound {
                entity_type: ENTITY_TYPE,
                id: id.to_string(),
            });
        }
        Ok(())
    }

    async fn max_id(&self) -> Result<Option<i64>> {
        let request = self.client.get(&self.table_url).query(&[
            ("select", "id"),
            ("order", "id.desc"),
            ("limit", "1"),
        ]);

        let rows: Vec<IdRow> = self.rows(request, "unknown").await?;
        Ok(rows.into_iter().next().map(|row| row.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Query, State},
        http::{HeaderMap as AxumHeaderMap, StatusCode},
        response::{IntoResponse, Response as AxumResponse},
        routing::{any, get},
        Json, Router,
    };
    use serde_json::json;
    use tokio::net::TcpListener;

    const TEST_KEY: &str = "test-service-key";

    /// Server-side cap on rows per response, like PostgREST's `max-rows`.
    const MOCK_MAX_ROWS: usize = 3;

    #[derive(Debug, Default)]
    struct MockTable {
        rows: Vec<WaitlistEntry>,
        last_id: i64,
    }

    type MockState = Arc<Mutex<MockTable>>;

    #[derive(Debug, Deserialize)]
    struct NewRow {
        email: String,
    }

    fn unauthorized(headers: &AxumHeaderMap) -> Option<AxumResponse> {
        let apikey = headers.get("apikey").and_then(|v| v.to_str().ok());
        let bearer = headers.get("authorization").and_then(|v| v.to_str().ok());
        let expected_bearer = format!("Bearer {TEST_KEY}");

        if apikey == Some(TEST_KEY) && bearer == Some(expected_bearer.as_str()) {
            None
        } else {
            Some(
                (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({ "message": "Invalid API key" })),
                )
                    .into_response(),
            )
        }
    }

    fn duplicate_key() -> AxumResponse {
        (
            StatusCode::CONFLICT,
            Json(json!({
                "code": "23505",
                "message": "duplicate key value violates unique constraint \"waitlist_email_key\"",
                "details": null,
                "hint": null
            })),
        )
            .into_response()
    }

    fn target_id(params: &HashMap<String, String>) -> Option<i64> {
        params
            .get("id")
            .and_then(|v| v.strip_prefix("eq."))
            .and_then(|v| v.parse().ok())
    }

    async fn select_rows(
        State(state): State<MockState>,
        headers: AxumHeaderMap,
        Query(params): Query<HashMap<String, String>>,
    ) -> AxumResponse {
        if let Some(response) = unauthorized(&headers) {
            return response;
        }

        let table = state.lock().unwrap();
        let mut rows = table.rows.clone();
        if let Some(pattern) = params.get("email").and_then(|v| v.strip_prefix("ilike.")) {
            let pattern = pattern.to_lowercase();
            rows.retain(|row| row.email.to_lowercase() == pattern);
        }
        if params.get("order").map(String::as_str) == Some("id.desc") {
            rows.reverse();
        }
        if let Some(offset) = params.get("offset").and_then(|v| v.parse().ok()) {
            rows = rows.into_iter().skip(offset).collect();
        }
        if let Some(limit) = params.get("limit").and_then(|v| v.parse().ok()) {
            rows.truncate(limit);
        }
        rows.truncate(MOCK_MAX_ROWS);

        Json(rows).into_response()
    }

    async fn insert_rows(
        State(state): State<MockState>,
        headers: AxumHeaderMap,
        Json(body): Json<Vec<NewRow>>,
    ) -> AxumResponse {
        if let Some(response) = unauthorized(&headers) {
            return response;
        }
        assert_eq!(
            headers.get("prefer").and_then(|v| v.to_str().ok()),
            Some("return=representation")
        );

        let mut table = state.lock().unwrap();
        let mut inserted = Vec::new();
        for row in body {
            if table.rows.iter().any(|existing| existing.email == row.email) {
                return duplicate_key();
            }
            table.last_id += 1;
            let entry = WaitlistEntry::new(table.last_id, row.email);
            table.rows.push(entry.clone());
            inserted.push(entry);
        }

        (StatusCode::CREATED, Json(inserted)).into_response()
    }

    async fn update_rows(
        State(state): State<MockState>,
        headers: AxumHeaderMap,
        Query(params): Query<HashMap<String, String>>,
        Json(body): Json<NewRow>,
    ) -> AxumResponse {
        if let Some(response) = unauthorized(&headers) {
            return response;
        }

        let id = target_id(&params);
        let mut table = state.lock().unwrap();
        if table
            .rows
            .iter()
            .any(|row| row.email == body.email && Some(row.id) != id)
        {
            return duplicate_key();
        }

        let updated: Vec<WaitlistEntry> = table
            .rows
            .iter_mut()
            .filter(|row| Some(row.id) == id)
            .map(|row| {
                row.email = body.email.clone();
                row.clone()
            })
            .collect();

        Json(updated).into_response()
    }

    async fn delete_rows(
        State(state): State<MockState>,
        headers: AxumHeaderMap,
        Query(params): Query<HashMap<String, String>>,
    ) -> AxumResponse {
        if let Some(response) = unauthorized(&headers) {
            return response;
        }

        let id = target_id(&params);
        let mut table = state.lock().unwrap();
        let (deleted, kept): (Vec<_>, Vec<_>) =
            table.rows.drain(..).partition(|row| Some(row.id) == id);
        table.rows = kept;

        Json(deleted).into_response()
    }

    async fn broken() -> AxumResponse {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "code": "XX000", "message": "boom" })),
        )
            .into_response()
    }

    /// Starts a mock PostgREST server seeded with `rows` and returns its base URL.
    async fn spawn_mock(rows: Vec<WaitlistEntry>) -> String {
        let last_id = rows.iter().map(|row| row.id).max().unwrap_or(0);
        let state: MockState = Arc::new(Mutex::new(MockTable { rows, last_id }));

        let app = Router::new()
            .route(
                "/rest/v1/waitlist",
                get(select_rows)
                    .post(insert_rows)
                    .patch(update_rows)
                    .delete(delete_rows),
            )
            .route("/rest/v1/broken", any(broken))
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{addr}")
    }

    fn repo_for(base_url: &str, table: &str) -> PostgrestRepository {
        PostgrestRepository::new(base_url, TEST_KEY, table, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_table_url_trims_trailing_slash() {
        assert_eq!(
            table_url("https://x.supabase.co/", "waitlist"),
            "https://x.supabase.co/rest/v1/waitlist"
        );
    }

    #[test]
    fn test_invalid_service_key_is_not_configured() {
        let err = PostgrestRepository::new(
            "http://localhost",
            "bad\nkey",
            "waitlist",
            Duration::from_secs(1),
        )
        .unwrap_err();

        assert!(matches!(err, RepositoryError::NotConfigured(_)));
    }

    #[tokio::test]
    async fn test_insert_and_list() {
        let base = spawn_mock(vec![]).await;
        let repo = repo_for(&base, "waitlist");

        let entry = repo.insert_entry("a@b.com").await.unwrap();
        assert_eq!(entry, WaitlistEntry::new(1, "a@b.com"));

        repo.insert_entry("c@d.com").await.unwrap();
        let entries = repo.list_entries().await.unwrap();
        assert_eq!(
            entries,
            vec![
                WaitlistEntry::new(1, "a@b.com"),
                WaitlistEntry::new(2, "c@d.com"),
            ]
        );
    }

    #[tokio::test]
    async fn test_list_entries_reads_past_row_cap() {
        let rows: Vec<WaitlistEntry> = (1..=7)
            .map(|id| WaitlistEntry::new(id, format!("user{id}@b.com")))
            .collect();
        let base = spawn_mock(rows.clone()).await;
        let mut repo = repo_for(&base, "waitlist");
        repo.page_size = MOCK_MAX_ROWS;

        assert_eq!(repo.list_entries().await.unwrap(), rows);
    }

    #[tokio::test]
    async fn test_list_entries_exact_page_multiple() {
        let rows: Vec<WaitlistEntry> = (1..=6)
            .map(|id| WaitlistEntry::new(id, format!("user{id}@b.com")))
            .collect();
        let base = spawn_mock(rows.clone()).await;
        let mut repo = repo_for(&base, "waitlist");
        repo.page_size = MOCK_MAX_ROWS;

        assert_eq!(repo.list_entries().await.unwrap(), rows);
    }

    #[tokio::test]
    async fn test_duplicate_insert_is_conflict() {
        let base = spawn_mock(vec![WaitlistEntry::new(1, "a@b.com")]).await;
        let repo = repo_for(&base, "waitlist");

        let err = repo.insert_entry("a@b.com").await.unwrap_err();

        assert_eq!(
            err,
            RepositoryError::AlreadyExists {
                entity_type: "WaitlistEntry",
                id: "a@b.com".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_find_by_email_ilike() {
        let base = spawn_mock(vec![WaitlistEntry::new(3, "A@B.com")]).await;
        let repo = repo_for(&base, "waitlist");

        let found = repo.find_by_email_ilike("a@b.com").await.unwrap();
        assert_eq!(found, Some(WaitlistEntry::new(3, "A@B.com")));

        let missing = repo.find_by_email_ilike("z@b.com").await.unwrap();
        assert_eq!(missing, None);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let base = spawn_mock(vec![
            WaitlistEntry::new(1, " A@B.com "),
            WaitlistEntry::new(2, "a@b.com "),
        ])
        .await;
        let repo = repo_for(&base, "waitlist");

        repo.delete_entry(2).await.unwrap();
        repo.update_email(1, "a@b.com").await.unwrap();

        assert_eq!(
            repo.list_entries().await.unwrap(),
            vec![WaitlistEntry::new(1, "a@b.com")]
        );

        let err = repo.delete_entry(2).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound { .. }));

        let err = repo.update_email(9, "x@y.com").await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_max_id() {
        let base = spawn_mock(vec![]).await;
        let repo = repo_for(&base, "waitlist");
        assert_eq!(repo.max_id().await.unwrap(), None);

        let base = spawn_mock(vec![
            WaitlistEntry::new(4, "a@b.com"),
            WaitlistEntry::new(9, "c@d.com"),
        ])
        .await;
        let repo = repo_for(&base, "waitlist");
        assert_eq!(repo.max_id().await.unwrap(), Some(9));
    }

    #[tokio::test]
    async fn test_wrong_key_is_connection_failed() {
        let base = spawn_mock(vec![]).await;
        let repo =
            PostgrestRepository::new(&base, "wrong-key", "waitlist", Duration::from_secs(5)).unwrap();

        let err = repo.list_entries().await.unwrap_err();

        assert_eq!(
            err,
            RepositoryError::ConnectionFailed("Invalid API key".to_string())
        );
    }

    #[tokio::test]
    async fn test_server_error_is_query_failed() {
        let base = spawn_mock(vec![]).await;
        let repo = repo_for(&base, "broken");

        let err = repo.max_id().await.unwrap_err();

        assert_eq!(err, RepositoryError::QueryFailed("boom".to_string()));
    }
}
