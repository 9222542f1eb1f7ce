use std::collections::HashMap;

use crate::params::{MAX_PAGE_LENGTH, PageLength, Params};
use crate::sort::SortDirection;

/// Named-parameter lookup capability, implemented over whatever the HTTP
/// layer hands us (decoded query pairs, a test map, ...).
pub trait ParamSource {
    fn param(&self, name: &str) -> Option<String>;

    /// Value of `name`, or `default` when the parameter is absent. A
    /// present-but-empty parameter returns the empty value, not the default.
    fn param_or(&self, name: &str, default: &str) -> String {
        self.param(name).unwrap_or_else(|| default.to_string())
    }
}

impl ParamSource for HashMap<String, String> {
    fn param(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

/// First occurrence wins, matching how frameworks resolve repeated keys.
impl ParamSource for [(String, String)] {
    fn param(&self, name: &str) -> Option<String> {
        self.iter().find(|(key, _)| key == name).map(|(_, value)| value.clone())
    }
}

/// Extract pagination, search, and sort intent from the request parameters.
///
/// Defaults apply as default strings before integer parsing, so an absent
/// `draw` becomes `1` while a present-but-unparseable `draw` parses to `0`.
pub fn parse_params<S: ParamSource + ?Sized>(source: &S) -> Params {
    let draw = source.param_or("draw", "1").parse().unwrap_or(0);
    let start = source.param_or("start", "0").parse().unwrap_or(0);
    let length = page_length(&source.param_or("length", "10"));
    let search = source.param_or("search[value]", "");
    let order = order_key(source);
    let dir = SortDirection::parse(&source.param_or("order[0][dir]", "asc"));

    Params {
        draw,
        start,
        length,
        search,
        order,
        dir,
    }
}

/// Page size with the abuse cap applied. `-1` is the documented unbounded
/// sentinel; any other non-positive or unparseable value also disables
/// pagination, since no limit clause can be built from it.
fn page_length(raw: &str) -> PageLength {
    match raw.parse::<i64>() {
        Ok(length) if length >= 1 => PageLength::Limited((length as usize).min(MAX_PAGE_LENGTH)),
        _ => PageLength::All,
    }
}

/// Resolve the frontend order key. Newer clients send the column name
/// directly in `order[0][column]`; older ones send a positional index there
/// and describe the column in `columns[<index>][data]`. The direct name wins
/// when both shapes are present.
fn order_key<S: ParamSource + ?Sized>(source: &S) -> String {
    let direct = source.param_or("order[0][column]", "");
    if !direct.is_empty() {
        return direct;
    }

    let index = source.param_or("order[0][column]", "0");
    source.param_or(&format!("columns[{index}][data]"), "")
}
