use std::cmp::Ordering;
use std::sync::{Arc, Mutex};

use griddle_grid::{GridQuery, Record, SourceError};
use serde_json::Value;

pub(crate) type Trace = Arc<Mutex<Vec<QueryTrace>>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    Count,
    Fetch,
}

/// One builder call recorded on a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    Filter { predicate: String, param: String },
    OrFilter { predicate: String, param: String },
    Order(String),
    Offset(usize),
    Limit(usize),
}

/// One executed query: what was run, and the ops composed onto it at the
/// time it ran.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryTrace {
    pub kind: QueryKind,
    pub ops: Vec<Op>,
}

/// Query over the source's records. Understands the clause shapes the grid
/// pipeline emits: `LOWER(col) LIKE LOWER(?)` predicates with a `%text%`
/// parameter, and `column [asc|desc]` order clauses.
#[derive(Clone)]
pub struct MemoryQuery {
    rows: Arc<Vec<Record>>,
    ops: Vec<Op>,
    trace: Trace,
}

impl MemoryQuery {
    pub(crate) fn new(rows: Arc<Vec<Record>>, trace: Trace) -> Self {
        MemoryQuery {
            rows,
            ops: Vec::new(),
            trace,
        }
    }

    fn record(&self, kind: QueryKind) {
        self.trace
            .lock()
            .expect("trace lock poisoned")
            .push(QueryTrace {
                kind,
                ops: self.ops.clone(),
            });
    }

    /// Evaluate the filter ops against one row. Filters AND onto the
    /// running result, or-filters OR onto it; no filters means a match.
    fn matches(&self, row: &Record) -> Result<bool, SourceError> {
        let mut matched: Option<bool> = None;
        for op in &self.ops {
            match op {
                Op::Filter { predicate, param } => {
                    let hit = eval_predicate(predicate, param, row)?;
                    matched = Some(matched.unwrap_or(true) && hit);
                }
                Op::OrFilter { predicate, param } => {
                    let hit = eval_predicate(predicate, param, row)?;
                    matched = Some(matched.unwrap_or(false) || hit);
                }
                _ => {}
            }
        }
        Ok(matched.unwrap_or(true))
    }

    fn matching_rows(&self) -> Result<Vec<Record>, SourceError> {
        let mut out = Vec::new();
        for row in self.rows.iter() {
            if self.matches(row)? {
                out.push(row.clone());
            }
        }
        Ok(out)
    }
}

impl GridQuery for MemoryQuery {
    type Row = Record;

    fn count(&self) -> Result<u64, SourceError> {
        self.record(QueryKind::Count);
        Ok(self.matching_rows()?.len() as u64)
    }

    fn filter(mut self, predicate: &str, param: &str) -> Self {
        self.ops.push(Op::Filter {
            predicate: predicate.to_string(),
            param: param.to_string(),
        });
        self
    }

    fn or_filter(mut self, predicate: &str, param: &str) -> Self {
        self.ops.push(Op::OrFilter {
            predicate: predicate.to_string(),
            param: param.to_string(),
        });
        self
    }

    fn order(mut self, clause: &str) -> Self {
        self.ops.push(Op::Order(clause.to_string()));
        self
    }

    fn offset(mut self, n: usize) -> Self {
        self.ops.push(Op::Offset(n));
        self
    }

    fn limit(mut self, n: usize) -> Self {
        self.ops.push(Op::Limit(n));
        self
    }

    fn fetch(&self) -> Result<Vec<Record>, SourceError> {
        self.record(QueryKind::Fetch);
        let mut rows = self.matching_rows()?;

        // Later order clauses are subordinate sort keys: stable-sorting by
        // each clause in reverse registration order yields the combined
        // ordering.
        let order_clauses: Vec<&str> = self
            .ops
            .iter()
            .filter_map(|op| match op {
                Op::Order(clause) => Some(clause.as_str()),
                _ => None,
            })
            .collect();
        for clause in order_clauses.into_iter().rev() {
            sort_rows(&mut rows, clause)?;
        }

        let offset = self.ops.iter().rev().find_map(|op| match op {
            Op::Offset(n) => Some(*n),
            _ => None,
        });
        let limit = self.ops.iter().rev().find_map(|op| match op {
            Op::Limit(n) => Some(*n),
            _ => None,
        });

        let mut rows: Vec<Record> = rows.into_iter().skip(offset.unwrap_or(0)).collect();
        if let Some(limit) = limit {
            rows.truncate(limit);
        }
        Ok(rows)
    }
}

/// `LOWER(col) LIKE LOWER(?)` → case-insensitive substring match of the
/// parameter (stripped of its `%` wrapping) against the column's text form.
fn eval_predicate(predicate: &str, param: &str, row: &Record) -> Result<bool, SourceError> {
    let column = parse_like_predicate(predicate).ok_or_else(|| {
        SourceError::new(format!("unsupported predicate: {predicate}"))
    })?;

    let needle = param.trim_matches('%').to_lowercase();
    Ok(field_text(row.get(column)).to_lowercase().contains(&needle))
}

fn parse_like_predicate(predicate: &str) -> Option<&str> {
    let rest = predicate.strip_prefix("LOWER(")?;
    let end = rest.find(')')?;
    let tail = &rest[end + 1..];
    if tail != " LIKE LOWER(?)" {
        return None;
    }
    Some(&rest[..end])
}

fn field_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(other @ (Value::Array(_) | Value::Object(_))) => other.to_string(),
        Some(Value::Null) | None => String::new(),
    }
}

/// `column [asc|desc]`; direction defaults to ascending.
fn sort_rows(rows: &mut [Record], clause: &str) -> Result<(), SourceError> {
    let mut parts = clause.split_whitespace();
    let column = parts
        .next()
        .ok_or_else(|| SourceError::new(format!("empty order clause: {clause:?}")))?;
    let descending = parts
        .next()
        .is_some_and(|dir| dir.eq_ignore_ascii_case("desc"));

    rows.sort_by(|a, b| {
        let ordering = compare_values(a.get(column), b.get(column));
        if descending { ordering.reverse() } else { ordering }
    });
    Ok(())
}

/// Total order over JSON values: missing < null < booleans < numbers <
/// strings < composites. Composites compare through their text form; this
/// only needs to be consistent, not meaningful.
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    fn rank(value: Option<&Value>) -> u8 {
        match value {
            None => 0,
            Some(Value::Null) => 1,
            Some(Value::Bool(_)) => 2,
            Some(Value::Number(_)) => 3,
            Some(Value::String(_)) => 4,
            Some(Value::Array(_) | Value::Object(_)) => 5,
        }
    }

    match (a, b) {
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(x @ (Value::Array(_) | Value::Object(_))), Some(y @ (Value::Array(_) | Value::Object(_)))) => {
            x.to_string().cmp(&y.to_string())
        }
        _ => rank(a).cmp(&rank(b)),
    }
}
