use serde::Serialize;

use crate::record::Record;

/// Grid result payload in the shape the table frontend consumes.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridData {
    /// Echo of the request's draw counter.
    pub draw: i64,
    /// Row count before the global search filter.
    pub records_total: u64,
    /// Row count after the global search filter, before pagination.
    pub records_filtered: u64,
    pub data: Vec<Record>,
}

/// Standard response envelope for grid endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse {
    pub success: bool,
    pub message: String,
    pub data: Option<GridData>,
    pub errors: Option<String>,
}

impl ApiResponse {
    pub fn ok(data: GridData) -> Self {
        ApiResponse {
            success: true,
            message: "success".to_string(),
            data: Some(data),
            errors: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        let message = message.into();
        ApiResponse {
            success: false,
            errors: Some(message.clone()),
            message,
            data: None,
        }
    }
}
