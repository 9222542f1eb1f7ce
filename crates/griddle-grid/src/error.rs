use std::fmt;

use griddle_query::ColumnError;

use crate::source::SourceError;

#[derive(Debug)]
pub enum GridError {
    /// A searchable or orderable column identifier failed validation. No
    /// query was issued.
    InvalidColumn(ColumnError),
    /// The query source failed while counting or fetching; propagated
    /// unchanged.
    Source(SourceError),
    /// A fetched row could not be converted to a generic record.
    Convert(String),
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::InvalidColumn(e) => write!(f, "{e}"),
            GridError::Source(e) => write!(f, "source error: {e}"),
            GridError::Convert(message) => write!(f, "record conversion error: {message}"),
        }
    }
}

impl std::error::Error for GridError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GridError::InvalidColumn(e) => Some(e),
            GridError::Source(e) => Some(e),
            GridError::Convert(_) => None,
        }
    }
}

impl GridError {
    pub fn status_code(&self) -> http::StatusCode {
        match self {
            GridError::InvalidColumn(_) => http::StatusCode::BAD_REQUEST,
            GridError::Source(_) | GridError::Convert(_) => {
                http::StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<ColumnError> for GridError {
    fn from(e: ColumnError) -> Self {
        GridError::InvalidColumn(e)
    }
}

impl From<SourceError> for GridError {
    fn from(e: SourceError) -> Self {
        GridError::Source(e)
    }
}
