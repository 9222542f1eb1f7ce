use std::fmt;

use serde::Serialize;

/// Error surfaced by a grid source. Wraps whatever the backing store
/// produced; the pipeline propagates it without inspecting it, and retry
/// policy (if any) belongs to the source.
#[derive(Debug)]
pub struct SourceError(Box<dyn std::error::Error + Send + Sync>);

impl SourceError {
    pub fn new(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        SourceError(err.into())
    }
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for SourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.0.as_ref())
    }
}

/// A composable query against some row store.
///
/// The grid pipeline only ever narrows a query: filter predicates, an order
/// clause, and an offset/limit window. Builder calls consume and return the
/// query; `Clone` derives an independent copy so a filtered query can be
/// built without disturbing the caller's base query.
///
/// Predicates are clause text plus one bound parameter. Every column
/// identifier interpolated into clause text has passed column validation
/// before a predicate is built; the parameter value is never interpolated.
pub trait GridQuery: Clone {
    type Row: Serialize;

    /// Number of rows matching the query as currently composed.
    fn count(&self) -> Result<u64, SourceError>;

    /// AND the predicate onto the query.
    fn filter(self, predicate: &str, param: &str) -> Self;

    /// OR the predicate onto the query.
    fn or_filter(self, predicate: &str, param: &str) -> Self;

    /// Append an order clause, e.g. `"created_at desc"`.
    fn order(self, clause: &str) -> Self;

    fn offset(self, n: usize) -> Self;

    fn limit(self, n: usize) -> Self;

    /// Execute and return the matching rows.
    fn fetch(&self) -> Result<Vec<Self::Row>, SourceError>;
}

/// Per-request factory for base queries, shared across the handler's
/// concurrent requests.
pub trait GridSource: Send + Sync {
    type Query: GridQuery;

    fn query(&self) -> Result<Self::Query, SourceError>;
}
