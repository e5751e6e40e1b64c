//! Markdown pipe tables.
//!
//! Numeric columns are right-aligned, everything else left-aligned. The first
//! column is the row index and has an empty header. Pipes in cell text are
//! escaped and line breaks become spaces, so every row stays on one line.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Right,
}

/// Format `headers` and row-major `rows` as a markdown pipe table.
///
/// Every row must have `headers.len()` cells.
pub(crate) fn pipe_table(headers: &[String], rows: &[Vec<String>]) -> String {
    let headers: Vec<String> = headers.iter().map(|h| escape_cell(h)).collect();
    let rows: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.iter().map(|cell| escape_cell(cell)).collect())
        .collect();

    let aligns: Vec<Align> = (0..headers.len())
        .map(|c| column_align(rows.iter().map(|row| row[c].as_str())))
        .collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(c, header)| {
            rows.iter()
                .map(|row| row[c].chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
                .max(1)
        })
        .collect();

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(format_row(&headers, &widths, &aligns));
    lines.push(separator(&widths, &aligns));
    for row in &rows {
        lines.push(format_row(row, &widths, &aligns));
    }
    lines.join("\n")
}

fn escape_cell(text: &str) -> String {
    text.replace("\r\n", " ")
        .replace(['\n', '\r'], " ")
        .replace('|', "\\|")
}

fn column_align<'a>(mut cells: impl Iterator<Item = &'a str>) -> Align {
    let mut any = false;
    let numeric = cells.all(|cell| {
        any = true;
        is_numeric(cell)
    });
    if any && numeric { Align::Right } else { Align::Left }
}

fn is_numeric(cell: &str) -> bool {
    cell == "NaN" || cell.parse::<f64>().is_ok()
}

fn format_row(cells: &[String], widths: &[usize], aligns: &[Align]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths.iter().zip(aligns))
        .map(|(cell, (w, align))| match align {
            Align::Left => format!("{cell:<w$}"),
            Align::Right => format!("{cell:>w$}"),
        })
        .collect();
    format!("| {} |", padded.join(" | "))
}

fn separator(widths: &[usize], aligns: &[Align]) -> String {
    let parts: Vec<String> = widths
        .iter()
        .zip(aligns)
        .map(|(w, align)| match align {
            Align::Left => format!(":{}", "-".repeat(w + 1)),
            Align::Right => format!("{}:", "-".repeat(w + 1)),
        })
        .collect();
    format!("|{}|", parts.join("|"))
}
