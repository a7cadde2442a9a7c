//! Highlighting of one team's row
//!
//! The highlighted team's row is bolded in place and a copy of it is pinned
//! above the standings, so a team opening the page from its own link sees its
//! result first.
//!
//! Matching is by substring on the first cell (the rendered team id), so a
//! target of `1` also matches `12`. Only the first match in document order is
//! used.

use crate::table::{RowEmphasis, TableSpec};

pub fn apply(table: TableSpec, target: Option<&str>) -> TableSpec {
    let Some(target) = target.filter(|t| !t.is_empty()) else {
        return table;
    };

    let Some(index) = find_row(&table, target) else {
        log::debug!("highlight target {} matches no row", target);
        return table;
    };

    let mut table = table;
    table.rows[index].emphasis = RowEmphasis::Bold;

    let mut pinned = table.rows[index].clone();
    pinned.emphasis = RowEmphasis::Pinned;
    table.rows.insert(0, pinned);
    table.highlighted_row_index = Some(index + 1);

    table
}

/// Index of the first row whose id cell contains `target`.
pub fn find_row(table: &TableSpec, target: &str) -> Option<usize> {
    table
        .rows
        .iter()
        .position(|row| row.first_text().is_some_and(|id| id.contains(target)))
}
