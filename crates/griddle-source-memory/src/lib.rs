mod demo;
mod query;

pub use demo::demo_records;
pub use query::{MemoryQuery, Op, QueryKind, QueryTrace};

use std::sync::{Arc, Mutex};

use griddle_grid::{GridSource, Record, SourceError, records_from_value};
use serde_json::Value;

use crate::query::Trace;

/// In-memory grid source over a fixed set of records.
///
/// Evaluates the predicate and clause shapes the grid pipeline emits, and
/// keeps a trace of every executed query so tests and tools can assert on
/// what was asked of the store rather than on backend-defined row order.
pub struct MemorySource {
    rows: Arc<Vec<Record>>,
    trace: Trace,
}

impl MemorySource {
    pub fn new(rows: Vec<Record>) -> Self {
        MemorySource {
            rows: Arc::new(rows),
            trace: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Build a source from a dynamic JSON value. `None` unless the value is
    /// an array of objects.
    pub fn from_value(value: &Value) -> Option<Self> {
        records_from_value(value).map(MemorySource::new)
    }

    /// Snapshot of every query executed so far, in execution order.
    pub fn trace(&self) -> Vec<QueryTrace> {
        self.trace.lock().expect("trace lock poisoned").clone()
    }
}

impl GridSource for MemorySource {
    type Query = MemoryQuery;

    fn query(&self) -> Result<MemoryQuery, SourceError> {
        Ok(MemoryQuery::new(Arc::clone(&self.rows), Arc::clone(&self.trace)))
    }
}

#[cfg(test)]
mod tests {
    use griddle_grid::GridQuery;
    use serde_json::json;

    use super::*;

    fn seed() -> MemorySource {
        MemorySource::from_value(&json!([
            { "id": 1, "name": "Acme Corp", "status": "active", "revenue": 50000.0 },
            { "id": 2, "name": "Globex", "status": "rejected", "revenue": 80000.0 },
            { "id": 3, "name": "Initech", "status": "active", "revenue": 12000.0 },
        ]))
        .unwrap()
    }

    #[test]
    fn count_and_fetch_unfiltered() {
        let source = seed();
        let query = source.query().unwrap();
        assert_eq!(query.count().unwrap(), 3);
        assert_eq!(query.fetch().unwrap().len(), 3);
    }

    #[test]
    fn filter_matches_case_insensitive_substring() {
        let source = seed();
        let query = source
            .query()
            .unwrap()
            .filter("LOWER(name) LIKE LOWER(?)", "%GLO%");
        assert_eq!(query.count().unwrap(), 1);
        assert_eq!(query.fetch().unwrap()[0]["name"], json!("Globex"));
    }

    #[test]
    fn or_filter_widens_the_match() {
        let source = seed();
        let query = source
            .query()
            .unwrap()
            .filter("LOWER(name) LIKE LOWER(?)", "%globex%")
            .or_filter("LOWER(status) LIKE LOWER(?)", "%active%");
        assert_eq!(query.count().unwrap(), 3);
    }

    #[test]
    fn numbers_match_through_their_text_form() {
        let source = seed();
        let query = source
            .query()
            .unwrap()
            .filter("LOWER(revenue) LIKE LOWER(?)", "%80000%");
        assert_eq!(query.count().unwrap(), 1);
    }

    #[test]
    fn order_sorts_rows() {
        let source = seed();
        let rows = source
            .query()
            .unwrap()
            .order("revenue desc")
            .fetch()
            .unwrap();
        assert_eq!(rows[0]["name"], json!("Globex"));
        assert_eq!(rows[2]["name"], json!("Initech"));
    }

    #[test]
    fn order_defaults_to_ascending() {
        let source = seed();
        let rows = source.query().unwrap().order("name").fetch().unwrap();
        assert_eq!(rows[0]["name"], json!("Acme Corp"));
    }

    #[test]
    fn offset_and_limit_window_the_rows() {
        let source = seed();
        let rows = source
            .query()
            .unwrap()
            .order("id asc")
            .offset(1)
            .limit(1)
            .fetch()
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["id"], json!(2));
    }

    #[test]
    fn seed_order_is_preserved_without_an_order_clause() {
        let source = seed();
        let rows = source.query().unwrap().fetch().unwrap();
        let ids: Vec<i64> = rows.iter().map(|r| r["id"].as_i64().unwrap()).collect();
        assert_eq!(ids, [1, 2, 3]);
    }

    #[test]
    fn unsupported_predicates_error_loudly() {
        let source = seed();
        let query = source.query().unwrap().filter("name = ?", "Globex");
        assert!(query.count().is_err());
    }

    #[test]
    fn trace_records_executed_queries() {
        let source = seed();
        let query = source
            .query()
            .unwrap()
            .filter("LOWER(name) LIKE LOWER(?)", "%a%");
        let _ = query.count().unwrap();
        let _ = query.fetch().unwrap();

        let trace = source.trace();
        assert_eq!(trace.len(), 2);
        assert_eq!(trace[0].kind, QueryKind::Count);
        assert_eq!(trace[1].kind, QueryKind::Fetch);
        assert_eq!(
            trace[1].ops,
            [Op::Filter {
                predicate: "LOWER(name) LIKE LOWER(?)".to_string(),
                param: "%a%".to_string(),
            }]
        );
    }

    #[test]
    fn from_value_rejects_non_sequences() {
        assert!(MemorySource::from_value(&json!({ "rows": [] })).is_none());
        assert!(MemorySource::from_value(&json!("nope")).is_none());
    }
}
