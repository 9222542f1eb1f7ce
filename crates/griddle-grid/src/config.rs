use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Column exposure for one grid endpoint.
///
/// `searchable` lists the raw database columns eligible for the global
/// free-text filter. `orderable` maps frontend-facing sort keys to the
/// database columns they resolve to; a client can only ever pick a key, so
/// nothing it sends reaches a clause directly. Both sets pass column
/// validation before any query is issued.
///
/// Typically built once at route-registration time (or loaded from a JSON
/// file) and shared read-only across requests.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    #[serde(default)]
    pub searchable: Vec<String>,
    #[serde(default)]
    pub orderable: BTreeMap<String, String>,
}
