mod config;
mod error;
pub mod http;
mod options;
mod record;
mod response;
mod service;
mod source;
mod transform;

pub use config::GridConfig;
pub use error::GridError;
pub use http::GridHttp;
pub use options::{AddFn, DEFAULT_INDEX_COLUMN, EditFn, GridOptions};
pub use record::{Record, records_from_value, to_records};
pub use response::{ApiResponse, GridData};
pub use service::GridService;
pub use source::{GridQuery, GridSource, SourceError};
pub use transform::apply_transforms;
