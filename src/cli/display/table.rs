//! Table builder wrapper around comfy-table for key-value display.

use comfy_table::{presets, Cell, CellAlignment, ContentArrangement, Table};

/// Create a borderless two-column table of `(field, value)` rows.
pub fn detail_table<K, V>(rows: impl IntoIterator<Item = (K, V)>) -> Table
where
    K: Into<String>,
    V: Into<String>,
{
    let mut table = Table::new();
    table
        .load_preset(presets::NOTHING)
        .set_content_arrangement(ContentArrangement::Dynamic);
    for (key, value) in rows {
        table.add_row(vec![
            Cell::new(key.into()).set_alignment(CellAlignment::Left),
            Cell::new(value.into()),
        ]);
    }
    table
}
