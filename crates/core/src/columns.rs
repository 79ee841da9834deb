//! Column set and plain-text rendering for binding rows.
//!
//! This module provides:
//! - The fixed header used for every binding listing
//! - A borderless, left-aligned, tab-separated table writer
//! - A JSON writer for machine-readable output

#![forbid(unsafe_code)]

use std::io::{self, Write};

use crate::DisplayRow;

pub const COL_BINDING_NAME: &str = "BindingName";
pub const COL_ROLE_NAME: &str = "RoleName";
pub const COL_SUBJECT_KIND: &str = "SujKind";
pub const COL_SUBJECT_NAME: &str = "SujName";

/// Header row, in the same order as [`DisplayRow::cells`].
pub const HEADER: [&str; 4] = [COL_BINDING_NAME, COL_ROLE_NAME, COL_SUBJECT_KIND, COL_SUBJECT_NAME];

const PADDING: &str = "\t";

fn widths<'a, const N: usize>(header: &'a [&'a str; N], rows: &'a [[&'a str; N]]) -> [usize; N] {
    let mut out = [0usize; N];
    for line in std::iter::once(header).chain(rows.iter()) {
        for (w, cell) in out.iter_mut().zip(line.iter()) {
            *w = (*w).max(cell.chars().count());
        }
    }
    out
}

fn write_line<W: Write, const N: usize>(w: &mut W, cells: &[&str; N], widths: &[usize; N]) -> io::Result<()> {
    let mut line = String::new();
    for (i, (cell, width)) in cells.iter().zip(widths.iter()).enumerate() {
        if i > 0 { line.push_str(PADDING); }
        line.push_str(cell);
        let pad = width.saturating_sub(cell.chars().count());
        line.extend(std::iter::repeat(' ').take(pad));
    }
    writeln!(w, "{}", line.trim_end())
}

/// Write `header` and `rows` as left-aligned columns with no borders or separator lines.
pub fn render_table<W: Write>(w: &mut W, header: &[&str; 4], rows: &[DisplayRow]) -> io::Result<()> {
    let cells: Vec<[&str; 4]> = rows.iter().map(DisplayRow::cells).collect();
    let widths = widths(header, &cells);
    write_line(w, header, &widths)?;
    for row in &cells {
        write_line(w, row, &widths)?;
    }
    Ok(())
}

/// Write rows as a pretty-printed JSON array.
pub fn render_json<W: Write>(w: &mut W, rows: &[DisplayRow]) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *w, rows).map_err(io::Error::from)?;
    writeln!(w)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(a: &str, b: &str, c: &str, d: &str) -> DisplayRow {
        DisplayRow { binding_name: a.into(), role_name: b.into(), subject_kind: c.into(), subject_name: d.into() }
    }

    fn render(rows: &[DisplayRow]) -> String {
        let mut buf = Vec::new();
        render_table(&mut buf, &HEADER, rows).expect("render");
        String::from_utf8(buf).expect("utf8")
    }

    #[test]
    fn header_only_when_no_rows() {
        assert_eq!(render(&[]), "BindingName\tRoleName\tSujKind\tSujName\n");
    }

    #[test]
    fn pads_columns_to_widest_cell() {
        let out = render(&[
            row("admin-binding", "cluster-admin", "User", "alice"),
            row("rb", "view", "ServiceAccount", "default"),
        ]);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "BindingName  \tRoleName     \tSujKind       \tSujName");
        assert_eq!(lines[1], "admin-binding\tcluster-admin\tUser          \talice");
        assert_eq!(lines[2], "rb           \tview         \tServiceAccount\tdefault");
    }

    #[test]
    fn width_counts_chars_not_bytes() {
        let out = render(&[row("ünïcode", "r", "k", "n")]);
        assert_eq!(out.lines().nth(1), Some("ünïcode    \tr       \tk      \tn"));
    }

    #[test]
    fn json_uses_field_names() {
        let mut buf = Vec::new();
        render_json(&mut buf, &[row("b", "r", "User", "u")]).expect("json");
        let v: serde_json::Value = serde_json::from_slice(&buf).expect("parse");
        assert_eq!(v[0]["binding_name"], "b");
        assert_eq!(v[0]["subject_kind"], "User");
        assert_eq!(v.as_array().map(|a| a.len()), Some(1));
    }
}
