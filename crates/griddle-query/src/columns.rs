use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

/// Allowed shape for column identifiers: alphanumerics, underscores, and
/// dots for qualified `table.column` notation. This whitelist is the sole
/// defense against SQL injection through identifiers, so it runs before any
/// caller- or request-supplied name is used to build a clause.
static COLUMN_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_.]+$").expect("column name pattern compiles"));

/// Validation error for a rejected column identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnError {
    pub column: String,
    pub message: &'static str,
}

impl std::fmt::Display for ColumnError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid column {:?}: {}", self.column, self.message)
    }
}

impl std::error::Error for ColumnError {}

/// Whether a column name is safe to interpolate into a query clause.
/// Case-sensitive, passed through verbatim; empty names are rejected.
pub fn is_valid_column(name: &str) -> bool {
    !name.is_empty() && COLUMN_NAME.is_match(name)
}

/// Validate every searchable column name, failing on the first invalid one.
pub fn validate_searchable(columns: &[String]) -> Result<(), ColumnError> {
    for column in columns {
        if !is_valid_column(column) {
            return Err(ColumnError {
                column: column.clone(),
                message: "searchable column name contains invalid characters",
            });
        }
    }
    Ok(())
}

/// Validate an orderable mapping. Keys are frontend-facing order keys,
/// values are the database columns they resolve to; both sides end up in
/// generated clauses, so both are checked.
pub fn validate_orderable(columns: &BTreeMap<String, String>) -> Result<(), ColumnError> {
    for (key, value) in columns {
        if !is_valid_column(key) {
            return Err(ColumnError {
                column: key.clone(),
                message: "orderable column key contains invalid characters",
            });
        }
        if !is_valid_column(value) {
            return Err(ColumnError {
                column: value.clone(),
                message: "orderable column value contains invalid characters",
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_and_qualified_names() {
        assert!(is_valid_column("user_id"));
        assert!(is_valid_column("users.id"));
        assert!(is_valid_column("Name2"));
        assert!(is_valid_column("_internal"));
    }

    #[test]
    fn rejects_injection_attempts() {
        assert!(!is_valid_column("id; DROP TABLE users"));
        assert!(!is_valid_column("id--"));
        assert!(!is_valid_column("user name"));
        assert!(!is_valid_column("name'"));
        assert!(!is_valid_column("col()"));
    }

    #[test]
    fn rejects_empty_name() {
        assert!(!is_valid_column(""));
    }

    #[test]
    fn searchable_ok() {
        let columns = vec!["name".to_string(), "email".to_string()];
        assert!(validate_searchable(&columns).is_ok());
    }

    #[test]
    fn searchable_fails_on_first_invalid() {
        let columns = vec![
            "name".to_string(),
            "email'; DROP TABLE users--".to_string(),
            "also bad".to_string(),
        ];
        let err = validate_searchable(&columns).unwrap_err();
        assert_eq!(err.column, "email'; DROP TABLE users--");
        assert_eq!(err.message, "searchable column name contains invalid characters");
    }

    #[test]
    fn orderable_ok() {
        let mut columns = BTreeMap::new();
        columns.insert("created".to_string(), "created_at".to_string());
        columns.insert("name".to_string(), "users.name".to_string());
        assert!(validate_orderable(&columns).is_ok());
    }

    #[test]
    fn orderable_rejects_bad_key() {
        let mut columns = BTreeMap::new();
        columns.insert("na me".to_string(), "name".to_string());
        let err = validate_orderable(&columns).unwrap_err();
        assert_eq!(err.column, "na me");
    }

    #[test]
    fn orderable_rejects_bad_value() {
        let mut columns = BTreeMap::new();
        columns.insert("name".to_string(), "name; --".to_string());
        let err = validate_orderable(&columns).unwrap_err();
        assert_eq!(err.column, "name; --");
        assert_eq!(err.message, "orderable column value contains invalid characters");
    }
}
