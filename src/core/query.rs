//! Query-string construction shared by every endpoint.
//!
//! Values are emitted verbatim: list values are comma-joined and missing values are
//! skipped, but nothing is percent-encoded. Callers pass timestamps, tickers and metric
//! names, none of which need escaping.

/// A single query parameter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    /// Emitted as-is.
    Text(String),
    /// Emitted comma-joined.
    List(Vec<String>),
    /// Emitted in decimal.
    Int(i64),
    /// Not emitted at all.
    Missing,
}

impl From<&str> for QueryValue {
    fn from(v: &str) -> Self {
        QueryValue::Text(v.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(v: String) -> Self {
        QueryValue::Text(v)
    }
}

impl From<i64> for QueryValue {
    fn from(v: i64) -> Self {
        QueryValue::Int(v)
    }
}

impl From<u32> for QueryValue {
    fn from(v: u32) -> Self {
        QueryValue::Int(i64::from(v))
    }
}

impl From<Vec<String>> for QueryValue {
    fn from(v: Vec<String>) -> Self {
        QueryValue::List(v)
    }
}

impl From<&[&str]> for QueryValue {
    fn from(v: &[&str]) -> Self {
        QueryValue::List(v.iter().map(|s| (*s).to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for QueryValue {
    fn from(v: [&str; N]) -> Self {
        QueryValue::List(v.iter().map(|s| (*s).to_string()).collect())
    }
}

impl<T: Into<QueryValue>> From<Option<T>> for QueryValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(QueryValue::Missing, Into::into)
    }
}

/// An ordered mapping from parameter name to value.
///
/// Insertion order is the order parameters appear in the query string. Setting a name
/// that is already present replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, QueryValue)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`QueryParams::set`].
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<QueryValue>) {
        let name = name.into();
        let value = value.into();
        match self.pairs.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = value,
            None => self.pairs.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&QueryValue> {
        self.pairs.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &QueryValue)> {
        self.pairs.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Build the full request URL for `endpoint_path`.
///
/// Produces `{base_url}{endpoint_path}?token={token}&name=value&...`; the output depends
/// only on the inputs.
pub fn build_query(
    base_url: &str,
    endpoint_path: &str,
    token: &str,
    params: &QueryParams,
) -> String {
    let mut query = format!("{base_url}{endpoint_path}?token={token}&");
    for (name, value) in params.iter() {
        let rendered = match value {
            QueryValue::Text(s) => s.clone(),
            QueryValue::List(items) => items.join(","),
            QueryValue::Int(n) => n.to_string(),
            QueryValue::Missing => continue,
        };
        query.push_str(name);
        query.push('=');
        query.push_str(&rendered);
        query.push('&');
    }
    query.pop();
    query
}
