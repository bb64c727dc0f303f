//! Plain-text rendering of the grid model, used by the CLI.

use std::ops::Range;

use super::{CellView, Grid, HeaderCellView};
use crate::types::CellContent;

fn fit(text: &str, columns: usize) -> String {
    let len = text.chars().count();
    if len <= columns {
        let mut out = String::with_capacity(columns);
        out.push_str(text);
        out.extend(std::iter::repeat(' ').take(columns - len));
        return out;
    }
    if columns == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(columns - 1).collect();
    out.push('…');
    out
}

fn columns_for(width: u32, px_per_char: u32) -> usize {
    usize::try_from(width / px_per_char.max(1)).unwrap_or(0).max(1)
}

fn header_text(cell: &HeaderCellView) -> String {
    let label = match &cell.label {
        CellContent::Empty => String::new(),
        label => label.plain_text().into_owned(),
    };
    match cell.sort_indicator {
        Some(order) => format!("{label} {}", order.glyph()),
        None => label,
    }
}

fn cell_text(cell: &CellView) -> String {
    cell.content.plain_text().split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Render `rows[range]` as a text table.
///
/// Each column gets `width / px_per_char` character cells, so the table keeps
/// the proportions of the pixel layout.
pub fn render_text<R>(grid: &Grid<R>, rows: &[R], range: Range<usize>, px_per_char: u32) -> String {
    let header = grid.header();
    let sizes: Vec<usize> = header
        .iter()
        .map(|h| columns_for(h.width, px_per_char))
        .collect();

    let mut out = String::new();
    let line: Vec<String> = header
        .iter()
        .zip(&sizes)
        .map(|(h, &n)| fit(&header_text(h), n))
        .collect();
    out.push_str(line.join(" | ").trim_end());
    out.push('\n');
    let rule: Vec<String> = sizes.iter().map(|&n| "-".repeat(n)).collect();
    out.push_str(&rule.join("-+-"));
    out.push('\n');

    let start = range.start.min(rows.len());
    let end = range.end.min(rows.len());
    for (offset, row) in rows.get(start..end).unwrap_or_default().iter().enumerate() {
        let view = grid.row_view(row, start + offset);
        let line: Vec<String> = view
            .cells
            .iter()
            .zip(&sizes)
            .map(|(c, &n)| fit(&cell_text(c), n))
            .collect();
        out.push_str(line.join(" | ").trim_end());
        out.push('\n');
    }
    out
}
