mod columns;
mod params;
mod parse;
mod sort;

pub use columns::{ColumnError, is_valid_column, validate_orderable, validate_searchable};
pub use params::{MAX_PAGE_LENGTH, PageLength, Params};
pub use parse::{ParamSource, parse_params};
pub use sort::SortDirection;
