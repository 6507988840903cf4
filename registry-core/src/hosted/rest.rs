//! Table API Client
//!
//! PostgREST-style access to the hosted tables: filtered/ordered selects,
//! inserts and updates returning the stored rows, deletes and RPC calls.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

use crate::config::BackendConfig;
use crate::domain::{DomainError, DomainResult};

/// Characters that would break a query-string value
const QUERY_VALUE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b'=')
    .add(b'?');

pub(super) fn encode(value: &str) -> String {
    utf8_percent_encode(value, QUERY_VALUE).to_string()
}

/// A select/filter/order description for one table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableQuery {
    table: String,
    select: String,
    filters: Vec<(String, String)>,
    order: Vec<String>,
    limit: Option<usize>,
}

impl TableQuery {
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            select: "*".to_string(),
            filters: Vec::new(),
            order: Vec::new(),
            limit: None,
        }
    }

    pub fn select(mut self, columns: &str) -> Self {
        self.select = columns.to_string();
        self
    }

    /// `column = value`
    pub fn eq(mut self, column: &str, value: impl Display) -> Self {
        self.filters.push((column.to_string(), format!("eq.{}", value)));
        self
    }

    pub fn order_desc(mut self, column: &str) -> Self {
        self.order.push(format!("{}.desc", column));
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    fn filter_params(&self) -> Vec<String> {
        self.filters
            .iter()
            .map(|(column, value)| format!("{}={}", encode(column), encode(value)))
            .collect()
    }

    /// Query string for a read
    pub fn read_query(&self) -> String {
        let mut params = vec![format!("select={}", encode(&self.select))];
        params.extend(self.filter_params());
        if !self.order.is_empty() {
            params.push(format!("order={}", self.order.join(",")));
        }
        if let Some(limit) = self.limit {
            params.push(format!("limit={}", limit));
        }
        params.join("&")
    }

    /// Query string for an update or delete: filters only
    pub fn write_query(&self) -> String {
        self.filter_params().join("&")
    }

    pub fn table(&self) -> &str {
        &self.table
    }
}

#[derive(Deserialize, Default)]
struct ErrorBody {
    message: Option<String>,
    msg: Option<String>,
    error_description: Option<String>,
    error: Option<String>,
}

/// Map a failed response to the domain error taxonomy
pub fn status_error(status: u16, body: &str) -> DomainError {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    let message = parsed
        .message
        .or(parsed.msg)
        .or(parsed.error_description)
        .or(parsed.error)
        .unwrap_or_else(|| body.trim().to_string());

    match status {
        401 => DomainError::Unauthenticated,
        403 => DomainError::Forbidden(message),
        404 | 406 => DomainError::NotFound(message),
        409 => DomainError::Conflict(message),
        400..=499 => DomainError::InvalidInput(message),
        _ => DomainError::Backend(format!("HTTP {}: {}", status, message)),
    }
}

/// Fail on non-2xx responses, carrying the backend's message
pub(crate) async fn check(response: Response) -> DomainResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    log::warn!("Backend request failed with {}: {}", status, body);
    Err(status_error(status.as_u16(), &body))
}

pub(crate) async fn read_json<R: DeserializeOwned>(response: Response) -> DomainResult<R> {
    let text = check(response).await?.text().await?;
    Ok(serde_json::from_str(&text)?)
}

/// Table API client bound to one bearer token (user or anonymous key)
#[derive(Clone)]
pub struct RestClient {
    http: reqwest::Client,
    config: BackendConfig,
    bearer: String,
}

impl RestClient {
    pub fn new(http: reqwest::Client, config: BackendConfig, bearer: String) -> Self {
        Self { http, config, bearer }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, self.config.endpoint(path))
            .header("apikey", &self.config.anon_key)
            .header("Authorization", format!("Bearer {}", self.bearer))
    }

    pub async fn select<T: DeserializeOwned>(&self, query: &TableQuery) -> DomainResult<Vec<T>> {
        let path = format!("rest/v1/{}?{}", query.table(), query.read_query());
        let response = self.request(Method::GET, &path).send().await?;
        read_json(response).await
    }

    pub async fn select_one<T: DeserializeOwned>(&self, query: TableQuery) -> DomainResult<Option<T>> {
        let rows: Vec<T> = self.select(&query.limit(1)).await?;
        Ok(rows.into_iter().next())
    }

    pub async fn insert<T: Serialize, R: DeserializeOwned>(&self, table: &str, row: &T) -> DomainResult<R> {
        let response = self
            .request(Method::POST, &format!("rest/v1/{}", table))
            .header("Prefer", "return=representation")
            .json(row)
            .send()
            .await?;
        let rows: Vec<R> = read_json(response).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| DomainError::Backend(format!("Insert into {} returned no row", table)))
    }

    /// Patch matching rows; `None` when no visible row matched
    pub async fn update<T: Serialize, R: DeserializeOwned>(
        &self,
        query: &TableQuery,
        patch: &T,
    ) -> DomainResult<Option<R>> {
        let path = format!("rest/v1/{}?{}", query.table(), query.write_query());
        let response = self
            .request(Method::PATCH, &path)
            .header("Prefer", "return=representation")
            .json(patch)
            .send()
            .await?;
        let rows: Vec<R> = read_json(response).await?;
        Ok(rows.into_iter().next())
    }

    pub async fn delete(&self, query: &TableQuery) -> DomainResult<()> {
        let path = format!("rest/v1/{}?{}", query.table(), query.write_query());
        let response = self.request(Method::DELETE, &path).send().await?;
        check(response).await?;
        Ok(())
    }

    /// Call a database function
    pub async fn rpc<A: Serialize, R: DeserializeOwned>(&self, function: &str, args: &A) -> DomainResult<R> {
        let response = self
            .request(Method::POST, &format!("rest/v1/rpc/{}", function))
            .json(args)
            .send()
            .await?;
        read_json(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_query() {
        let q = TableQuery::new("gift_items")
            .eq("list_id", "0b5e")
            .order_desc("priority")
            .order_desc("created_at");
        assert_eq!(
            q.read_query(),
            "select=*&list_id=eq.0b5e&order=priority.desc,created_at.desc"
        );
    }

    #[test]
    fn test_embedded_select_and_limit() {
        let q = TableQuery::new("gift_lists")
            .select("*,gift_items(count)")
            .eq("user_id", "u1")
            .limit(1);
        assert_eq!(q.read_query(), "select=*,gift_items(count)&user_id=eq.u1&limit=1");
    }

    #[test]
    fn test_values_are_encoded() {
        let q = TableQuery::new("gift_lists").eq("slug", "a&b c");
        assert_eq!(q.write_query(), "slug=eq.a%26b%20c");
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_error(401, ""), DomainError::Unauthenticated);
        assert_eq!(
            status_error(409, r#"{"code":"PT409","message":"Only 0 unit(s) available"}"#),
            DomainError::Conflict("Only 0 unit(s) available".into())
        );
        assert_eq!(
            status_error(400, r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#),
            DomainError::InvalidInput("Invalid login credentials".into())
        );
        assert_eq!(status_error(406, "not acceptable"), DomainError::NotFound("not acceptable".into()));
        assert!(matches!(status_error(503, "down"), DomainError::Backend(_)));
    }
}
