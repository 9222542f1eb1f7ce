use std::collections::BTreeMap;

use serde_json::Value;

use crate::record::Record;

/// Computes the value of a new column from the original row.
pub type AddFn = Box<dyn Fn(&Record) -> Value + Send + Sync>;

/// Rewrites an existing column's value; receives the current value and the
/// original (pre-transformation) row.
pub type EditFn = Box<dyn Fn(&Value, &Record) -> Value + Send + Sync>;

/// Index column name used unless configured otherwise.
pub const DEFAULT_INDEX_COLUMN: &str = "DT_RowIndex";

/// Per-row output customization: a synthetic index column, computed columns,
/// column edits, and column removal, plus the default order clause applied
/// when the request does not pick one.
///
/// Built fluently with value semantics (every call returns the augmented
/// options), typically once at route-registration time. The stored closures
/// are invoked per row across concurrent requests, so they must not mutate
/// shared state.
pub struct GridOptions {
    index_column: Option<String>,
    reset_index: bool,
    default_order: Option<String>,
    add_columns: BTreeMap<String, AddFn>,
    edit_columns: BTreeMap<String, EditFn>,
    remove_columns: Vec<String>,
}

impl Default for GridOptions {
    fn default() -> Self {
        GridOptions {
            index_column: Some(DEFAULT_INDEX_COLUMN.to_string()),
            reset_index: false,
            default_order: None,
            add_columns: BTreeMap::new(),
            edit_columns: BTreeMap::new(),
            remove_columns: Vec::new(),
        }
    }
}

impl GridOptions {
    pub fn new() -> Self {
        GridOptions::default()
    }

    /// Rename the index column, and choose whether numbering restarts at 1
    /// on every page or continues across pages from the request offset.
    pub fn with_index(mut self, column: impl Into<String>, reset: bool) -> Self {
        self.index_column = Some(column.into());
        self.reset_index = reset;
        self
    }

    /// Drop the index column from the output entirely.
    pub fn without_index(mut self) -> Self {
        self.index_column = None;
        self
    }

    /// Order clause applied verbatim when the request does not resolve an
    /// orderable key. Operator-supplied configuration only; never sourced
    /// from the network.
    pub fn with_default_order(mut self, clause: impl Into<String>) -> Self {
        self.default_order = Some(clause.into());
        self
    }

    /// Register a computed column. Multiple additions must not depend on
    /// each other; they all read the original row.
    pub fn add(
        mut self,
        column: impl Into<String>,
        f: impl Fn(&Record) -> Value + Send + Sync + 'static,
    ) -> Self {
        self.add_columns.insert(column.into(), Box::new(f));
        self
    }

    /// Register a rewrite for an existing column. Rows without the column
    /// are left untouched.
    pub fn edit(
        mut self,
        column: impl Into<String>,
        f: impl Fn(&Value, &Record) -> Value + Send + Sync + 'static,
    ) -> Self {
        self.edit_columns.insert(column.into(), Box::new(f));
        self
    }

    /// Remove columns from the final output, whether they came from the row
    /// itself or from an earlier add/edit step.
    pub fn remove<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.remove_columns.extend(columns.into_iter().map(Into::into));
        self
    }

    pub fn index_column(&self) -> Option<&str> {
        self.index_column.as_deref()
    }

    pub fn reset_index(&self) -> bool {
        self.reset_index
    }

    pub fn default_order(&self) -> Option<&str> {
        self.default_order.as_deref()
    }

    pub fn add_columns(&self) -> &BTreeMap<String, AddFn> {
        &self.add_columns
    }

    pub fn edit_columns(&self) -> &BTreeMap<String, EditFn> {
        &self.edit_columns
    }

    pub fn remove_columns(&self) -> &[String] {
        &self.remove_columns
    }
}

impl std::fmt::Debug for GridOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GridOptions")
            .field("index_column", &self.index_column)
            .field("reset_index", &self.reset_index)
            .field("default_order", &self.default_order)
            .field("add_columns", &self.add_columns.keys().collect::<Vec<_>>())
            .field("edit_columns", &self.edit_columns.keys().collect::<Vec<_>>())
            .field("remove_columns", &self.remove_columns)
            .finish()
    }
}
