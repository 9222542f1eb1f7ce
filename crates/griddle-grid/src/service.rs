use griddle_query::{PageLength, Params, validate_orderable, validate_searchable};
use tracing::debug;

use crate::config::GridConfig;
use crate::error::GridError;
use crate::options::GridOptions;
use crate::record::to_records;
use crate::response::GridData;
use crate::source::GridQuery;
use crate::transform::apply_transforms;

/// Request-to-query processor for one grid endpoint.
///
/// Holds the column exposure and output options, both fixed at registration
/// time; `data` runs the whole pipeline for one request against a
/// caller-supplied base query.
#[derive(Debug)]
pub struct GridService {
    config: GridConfig,
    options: GridOptions,
}

impl GridService {
    pub fn new(config: GridConfig) -> Self {
        GridService {
            config,
            options: GridOptions::new(),
        }
    }

    pub fn with_options(mut self, options: GridOptions) -> Self {
        self.options = options;
        self
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Execute the pipeline: validate columns, count, search, count again,
    /// order, paginate, fetch, convert, transform.
    ///
    /// The base query may already carry the caller's own scoping. Filtering
    /// happens on an independent derived copy; `base` itself is never
    /// narrowed. The first error aborts the request with no partial result.
    pub fn data<Q: GridQuery>(&self, base: &Q, params: &Params) -> Result<GridData, GridError> {
        validate_searchable(&self.config.searchable)?;
        validate_orderable(&self.config.orderable)?;

        let total = base.count()?;

        let mut query = base.clone();
        if !params.search.is_empty() && !self.config.searchable.is_empty() {
            query = apply_search(query, &self.config.searchable, &params.search);
        }

        let filtered = query.count()?;

        query = self.apply_order(query, params);

        if let PageLength::Limited(length) = params.length {
            query = query.offset(params.start).limit(length);
        }

        let rows = query.fetch()?;
        debug!(total, filtered, rows = rows.len(), "grid query executed");

        let records = to_records(&rows)?;
        let data = apply_transforms(records, &self.options, params.start);

        Ok(GridData {
            draw: params.draw,
            records_total: total,
            records_filtered: filtered,
            data,
        })
    }

    /// Ordering precedence: an orderable-mapped request key, then the
    /// configured default order, then none at all (row order becomes
    /// backend-defined).
    fn apply_order<Q: GridQuery>(&self, query: Q, params: &Params) -> Q {
        if !params.order.is_empty() {
            if let Some(column) = self.config.orderable.get(&params.order) {
                return query.order(&format!("{column} {}", params.dir.as_str()));
            }
        }

        if let Some(clause) = self.options.default_order() {
            return query.order(clause);
        }

        query
    }
}

/// OR one case-insensitive substring predicate per searchable column. The
/// column names have passed validation; the search text itself is only ever
/// bound as a parameter.
fn apply_search<Q: GridQuery>(mut query: Q, searchable: &[String], search: &str) -> Q {
    let param = format!("%{search}%");
    for (i, column) in searchable.iter().enumerate() {
        let predicate = format!("LOWER({column}) LIKE LOWER(?)");
        query = if i == 0 {
            query.filter(&predicate, &param)
        } else {
            query.or_filter(&predicate, &param)
        };
    }
    query
}
