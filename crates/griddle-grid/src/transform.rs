use serde_json::Value;

use crate::options::GridOptions;
use crate::record::Record;

/// Apply the configured per-row transformations.
///
/// For the row at position `i` within the page: the index column is set to
/// `i + 1` in reset mode or `page_start + i + 1` otherwise, then added
/// columns are computed, then edits rewrite columns that exist in the
/// augmented row, then removals delete columns. The order is a contract:
/// adds and edits read the original row snapshot, never each other's
/// output, and removal runs last so it can delete original and added
/// columns alike. Row order is preserved.
pub fn apply_transforms(
    records: Vec<Record>,
    options: &GridOptions,
    page_start: usize,
) -> Vec<Record> {
    let mut out = Vec::with_capacity(records.len());

    for (i, row) in records.iter().enumerate() {
        let mut next = row.clone();

        if let Some(column) = options.index_column() {
            let index = if options.reset_index() {
                i + 1
            } else {
                page_start + i + 1
            };
            next.insert(column.to_string(), Value::from(index as u64));
        }

        for (column, add) in options.add_columns() {
            next.insert(column.clone(), add(row));
        }

        for (column, edit) in options.edit_columns() {
            if let Some(current) = next.get(column).cloned() {
                next.insert(column.clone(), edit(&current, row));
            }
        }

        for column in options.remove_columns() {
            // shift_remove keeps the remaining keys in their original order.
            next.shift_remove(column);
        }

        out.push(next);
    }

    out
}
