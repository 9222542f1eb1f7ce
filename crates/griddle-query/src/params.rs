use crate::sort::SortDirection;

/// Hard ceiling on the page size a client may request.
pub const MAX_PAGE_LENGTH: usize = 500;

/// Requested page size. `All` disables pagination entirely; clients ask for
/// it with the `-1` sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLength {
    Limited(usize),
    All,
}

/// Normalized request intent, extracted once per request.
///
/// Parsing never fails: these values are advisory input from an untrusted
/// client, so garbage degrades to defaults instead of erroring.
#[derive(Debug, Clone, PartialEq)]
pub struct Params {
    /// Opaque counter echoed back so the client can discard stale responses.
    pub draw: i64,
    /// Row offset of the requested page.
    pub start: usize,
    pub length: PageLength,
    /// Global free-text search value, empty when absent.
    pub search: String,
    /// Frontend-facing order key, empty when absent. Resolved through the
    /// orderable mapping before it gets anywhere near a query.
    pub order: String,
    pub dir: SortDirection,
}

impl Default for Params {
    fn default() -> Self {
        Params {
            draw: 1,
            start: 0,
            length: PageLength::Limited(10),
            search: String::new(),
            order: String::new(),
            dir: SortDirection::Asc,
        }
    }
}
