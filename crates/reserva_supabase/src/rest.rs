// --- File: crates/reserva_supabase/src/rest.rs ---
//! A small request builder for the hosted data (PostgREST) API.
//!
//! Supports the row-level query surface the booking operations use:
//! equality/range filters, embedded-resource selects, ordering, limits, and
//! duplicate-aware conditional writes keyed on a composite uniqueness
//! constraint.

use crate::client::SupabaseClient;
use crate::error::SupabaseError;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Shape of a PostgREST error body.
#[derive(Debug, serde::Deserialize)]
struct PostgrestErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

pub struct RestRequest<'c> {
    client: &'c SupabaseClient,
    table: String,
    query: Vec<(String, String)>,
    prefer: Vec<&'static str>,
    access_token: Option<String>,
}

impl SupabaseClient {
    /// Start building a request against a data collection.
    pub fn from_table(&self, table: &str) -> RestRequest<'_> {
        RestRequest {
            client: self,
            table: table.to_string(),
            query: Vec::new(),
            prefer: Vec::new(),
            access_token: None,
        }
    }
}

impl<'c> RestRequest<'c> {
    /// Columns (and embedded resources) to return.
    pub fn select(mut self, columns: &str) -> Self {
        self.query.push(("select".into(), columns.into()));
        self
    }

    pub fn eq(mut self, column: &str, value: impl ToString) -> Self {
        self.query
            .push((column.into(), format!("eq.{}", value.to_string())));
        self
    }

    pub fn gte(mut self, column: &str, value: impl ToString) -> Self {
        self.query
            .push((column.into(), format!("gte.{}", value.to_string())));
        self
    }

    pub fn lte(mut self, column: &str, value: impl ToString) -> Self {
        self.query
            .push((column.into(), format!("lte.{}", value.to_string())));
        self
    }

    /// Membership filter: `column=in.(a,b,c)`.
    pub fn in_list<I, T>(mut self, column: &str, values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: ToString,
    {
        let joined = values
            .into_iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(",");
        self.query.push((column.into(), format!("in.({})", joined)));
        self
    }

    pub fn order(mut self, column: &str) -> Self {
        self.query.push(("order".into(), column.into()));
        self
    }

    pub fn order_desc(mut self, column: &str) -> Self {
        self.query
            .push(("order".into(), format!("{}.desc", column)));
        self
    }

    pub fn limit(mut self, count: u32) -> Self {
        self.query.push(("limit".into(), count.to_string()));
        self
    }

    /// Uniqueness key for conditional writes.
    pub fn on_conflict(mut self, columns: &str) -> Self {
        self.query.push(("on_conflict".into(), columns.into()));
        self
    }

    /// Skip rows that collide on the `on_conflict` key instead of failing.
    pub fn ignore_duplicates(mut self) -> Self {
        self.prefer.push("resolution=ignore-duplicates");
        self
    }

    /// Authorize with a specific bearer token instead of the client session.
    pub fn auth(mut self, access_token: impl Into<String>) -> Self {
        self.access_token = Some(access_token.into());
        self
    }

    /// Execute a read, decoding the rows.
    pub async fn fetch<T: DeserializeOwned>(self) -> Result<Vec<T>, SupabaseError> {
        self.execute(Method::GET, None::<&()>).await
    }

    /// Insert rows, returning the representation of what was written.
    pub async fn insert<T: DeserializeOwned, B: Serialize + ?Sized>(
        mut self,
        rows: &B,
    ) -> Result<Vec<T>, SupabaseError> {
        self.prefer.push("return=representation");
        self.execute(Method::POST, Some(rows)).await
    }

    /// Patch rows matching the filters, returning the updated representation.
    pub async fn update<T: DeserializeOwned, B: Serialize + ?Sized>(
        mut self,
        patch: &B,
    ) -> Result<Vec<T>, SupabaseError> {
        self.prefer.push("return=representation");
        self.execute(Method::PATCH, Some(patch)).await
    }

    async fn execute<T: DeserializeOwned, B: Serialize + ?Sized>(
        self,
        method: Method,
        body: Option<&B>,
    ) -> Result<Vec<T>, SupabaseError> {
        let token = match self.access_token {
            Some(token) => token,
            None => self.client.access_token().await,
        };

        let mut request = self
            .client
            .http()
            .request(method, self.client.rest_url(&self.table))
            .header("apikey", self.client.anon_key())
            .bearer_auth(token)
            .query(&self.query);
        if !self.prefer.is_empty() {
            request = request.header("Prefer", self.prefer.join(","));
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let body_text = response.text().await?;

        if !status.is_success() {
            let parsed: PostgrestErrorBody =
                serde_json::from_str(&body_text).unwrap_or(PostgrestErrorBody {
                    code: None,
                    message: None,
                });
            return Err(SupabaseError::DataApiError {
                status: status.as_u16(),
                code: parsed.code,
                message: parsed.message.unwrap_or(body_text),
            });
        }

        // Writes without a representation answer with an empty body.
        if body_text.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&body_text)?)
    }
}
