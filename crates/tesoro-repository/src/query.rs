//! Query string plumbing: named-parameter expansion and the low-level
//! query handle returned by `create_query`.

use crate::params::{ParamValue, QueryParams};
use crate::session::Session;
use sqlx::mysql::MySqlRow;
use sqlx::FromRow;
use std::sync::Arc;
use tesoro_core::{TesoroError, TesoroResult};

/// Binds expanded parameter values onto a sqlx query builder, in order.
macro_rules! bind_values {
    ($query:expr, $binds:expr) => {{
        let mut query = $query;
        for value in $binds {
            query = match value {
                ParamValue::Text(s) => query.bind(s.clone()),
                ParamValue::Int(i) => query.bind(*i),
                ParamValue::Float(f) => query.bind(*f),
                ParamValue::Bool(b) => query.bind(*b),
                ParamValue::Uuid(u) => query.bind(u.to_string()),
                ParamValue::Timestamp(t) => query.bind(*t),
                ParamValue::Null => query.bind(None::<String>),
            };
        }
        query
    }};
}

/// Rewrites `:name` placeholders to positional `?` markers.
///
/// Returns the rewritten SQL and the parameter values in order of
/// appearance. Quoted literals and `::` casts are left untouched; a
/// placeholder with no matching parameter is a validation error.
pub(crate) fn expand_named(
    query: &str,
    params: &QueryParams,
) -> TesoroResult<(String, Vec<ParamValue>)> {
    let mut sql = String::with_capacity(query.len());
    let mut binds = Vec::new();
    let mut chars = query.chars().peekable();
    let mut in_quote: Option<char> = None;

    while let Some(c) = chars.next() {
        if let Some(quote) = in_quote {
            sql.push(c);
            if c == quote {
                in_quote = None;
            }
            continue;
        }

        match c {
            '\'' | '"' | '`' => {
                in_quote = Some(c);
                sql.push(c);
            }
            ':' => {
                if chars.peek() == Some(&':') {
                    chars.next();
                    sql.push_str("::");
                    continue;
                }

                let mut name = String::new();
                while let Some(&next) = chars.peek() {
                    if next.is_ascii_alphanumeric() || next == '_' {
                        name.push(next);
                        chars.next();
                    } else {
                        break;
                    }
                }

                if name.is_empty() {
                    sql.push(':');
                } else {
                    let value = params.get(&name).ok_or_else(|| {
                        TesoroError::validation(format!("Missing query parameter `{}`", name))
                    })?;
                    binds.push(value.clone());
                    sql.push('?');
                }
            }
            _ => sql.push(c),
        }
    }

    Ok((sql, binds))
}

/// Lower-level query handle over the session.
///
/// The escape hatch from the generic repository surface: callers set
/// parameters and paging manually, then execute. Queries use `:name`
/// placeholders bound from [`QueryParams`].
pub struct QueryHandle {
    session: Arc<dyn Session>,
    query: String,
    params: QueryParams,
    max_results: Option<u64>,
}

impl QueryHandle {
    /// Creates a handle for the given query string.
    #[must_use]
    pub fn new(session: Arc<dyn Session>, query: impl Into<String>) -> Self {
        Self {
            session,
            query: query.into(),
            params: QueryParams::new(),
            max_results: None,
        }
    }

    /// Sets a named parameter.
    #[must_use]
    pub fn set_parameter(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.params.insert(name, value);
        self
    }

    /// Replaces the whole parameter map.
    #[must_use]
    pub fn with_params(mut self, params: QueryParams) -> Self {
        self.params = params;
        self
    }

    /// Caps the number of fetched rows (LIMIT semantics).
    #[must_use]
    pub fn set_max_results(mut self, max_results: u64) -> Self {
        self.max_results = Some(max_results);
        self
    }

    /// Returns the raw query string.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    fn expand(&self) -> TesoroResult<(String, Vec<ParamValue>)> {
        let (mut sql, mut binds) = expand_named(&self.query, &self.params)?;
        if let Some(max) = self.max_results {
            sql.push_str(" LIMIT ?");
            binds.push(ParamValue::Int(i64::try_from(max).unwrap_or(i64::MAX)));
        }
        Ok((sql, binds))
    }

    /// Fetches all matching rows.
    pub async fn fetch<T>(&self) -> TesoroResult<Vec<T>>
    where
        T: for<'r> FromRow<'r, MySqlRow> + Send + Unpin,
    {
        let (sql, binds) = self.expand()?;
        let query = bind_values!(sqlx::query_as::<_, T>(&sql), &binds);
        Ok(query.fetch_all(self.session.pool()).await?)
    }

    /// Fetches the first matching row, if any.
    pub async fn fetch_optional<T>(&self) -> TesoroResult<Option<T>>
    where
        T: for<'r> FromRow<'r, MySqlRow> + Send + Unpin,
    {
        let (sql, binds) = self.expand()?;
        let query = bind_values!(sqlx::query_as::<_, T>(&sql), &binds);
        Ok(query.fetch_optional(self.session.pool()).await?)
    }

    /// Fetches the first matching row; no-result error when none match.
    pub async fn fetch_one<T>(&self) -> TesoroResult<T>
    where
        T: for<'r> FromRow<'r, MySqlRow> + Send + Unpin,
    {
        self.fetch_optional()
            .await?
            .ok_or_else(|| TesoroError::no_result(self.query.clone()))
    }

    /// Executes a statement, returning the number of affected rows.
    pub async fn execute(&self) -> TesoroResult<u64> {
        let (sql, binds) = self.expand()?;
        let query = bind_values!(sqlx::query(&sql), &binds);
        Ok(query.execute(self.session.pool()).await?.rows_affected())
    }
}

impl std::fmt::Debug for QueryHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryHandle")
            .field("query", &self.query)
            .field("params", &self.params)
            .field("max_results", &self.max_results)
            .finish_non_exhaustive()
    }
}
