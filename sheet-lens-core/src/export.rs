use crate::profile::{ColumnKind, ColumnSummary, Preview, TableProfile};
use crate::walker::{SheetError, SheetOutcome};
use sheet_lens_common::Result;
use std::io::Write;

const RULE_WIDTH: usize = 55;

// --- console report ---

pub fn write_workbook_header<W: Write + ?Sized>(
    w: &mut W,
    file_name: &str,
    size_bytes: u64,
    sheet_names: &[String],
) -> Result<()> {
    let stars = "*".repeat(RULE_WIDTH);
    writeln!(w, "\n{stars}")?;
    writeln!(w, "  File: {file_name}")?;
    writeln!(w, "  Size: {:.1} KB", size_bytes as f64 / 1024.0)?;
    writeln!(w, "{stars}")?;
    writeln!(w, "\n  Sheets: {}", sheet_names.len())?;
    for (i, name) in sheet_names.iter().enumerate() {
        writeln!(w, "     {}. {name}", i + 1)?;
    }
    Ok(())
}

pub fn write_profile<W: Write + ?Sized>(w: &mut W, profile: &TableProfile) -> Result<()> {
    let rule = "=".repeat(RULE_WIDTH);
    writeln!(w, "\n{rule}\n  Sheet: {}\n{rule}", profile.sheet_name)?;
    writeln!(
        w,
        "\n  Shape: {} rows x {} columns",
        group_thousands(profile.row_count as i128),
        profile.column_count
    )?;

    writeln!(w, "\n  Columns ({}):", profile.column_count)?;
    for (i, col) in profile.columns.iter().enumerate() {
        let nulls = if col.null_count > 0 {
            format!("  ! {} nulls", group_thousands(col.null_count as i128))
        } else {
            String::new()
        };
        writeln!(
            w,
            "     {:>2}. {:<25} [{}]  non-null: {}{nulls}",
            i + 1,
            col.name,
            col.data_type,
            group_thousands(col.non_null_count as i128),
        )?;
    }

    let numeric: Vec<_> = profile.columns_of(ColumnKind::Numeric).collect();
    if !numeric.is_empty() {
        writeln!(w, "\n  Numeric columns ({}):", numeric.len())?;
        for col in numeric {
            if let Some(ColumnSummary::Numeric(s)) = &col.summary {
                writeln!(
                    w,
                    "  {:<25} sum:{:>15} mean:{:>12}",
                    col.name,
                    format_one_decimal(s.sum.as_f64()),
                    format_one_decimal(s.mean),
                )?;
            }
        }
    }

    let temporal: Vec<_> = profile.columns_of(ColumnKind::Temporal).collect();
    if !temporal.is_empty() {
        writeln!(w, "\n  Date columns ({}):", temporal.len())?;
        for col in temporal {
            if let Some(ColumnSummary::Temporal(s)) = &col.summary {
                writeln!(w, "     {}: {} ~ {}", col.name, s.min, s.max)?;
            }
        }
    }

    let textual: Vec<_> = profile.columns_of(ColumnKind::Textual).collect();
    if !textual.is_empty() {
        writeln!(w, "\n  Text columns:")?;
        for col in textual {
            if let Some(ColumnSummary::Textual(s)) = &col.summary {
                let listing = match &s.values {
                    Some(values) => format!("{} distinct -> [{}]", s.distinct_count, values.join(", ")),
                    None => format!("{} distinct (varied)", group_thousands(s.distinct_count as i128)),
                };
                writeln!(w, "     {:<25} {listing}", col.name)?;
            }
        }
    }

    writeln!(w, "\n  Preview (first {} rows):", profile.preview.rows.len())?;
    for line in render_preview(&profile.preview) {
        writeln!(w, "     {line}")?;
    }
    Ok(())
}

pub fn write_sheet_error<W: Write + ?Sized>(w: &mut W, err: &SheetError) -> Result<()> {
    writeln!(w, "\n  ! error reading sheet '{}': {}", err.sheet, err.reason)?;
    Ok(())
}

pub fn write_outcome<W: Write + ?Sized>(w: &mut W, outcome: &SheetOutcome) -> Result<()> {
    match &outcome.result {
        Ok(profile) => write_profile(w, profile),
        Err(err) => write_sheet_error(w, err),
    }
}

/// Full console report: workbook header, one block per outcome, completion line.
pub fn write_report<W: Write + ?Sized>(
    w: &mut W,
    file_name: &str,
    size_bytes: u64,
    sheet_names: &[String],
    outcomes: &[SheetOutcome],
) -> Result<()> {
    write_workbook_header(w, file_name, size_bytes, sheet_names)?;
    for outcome in outcomes {
        write_outcome(w, outcome)?;
    }
    writeln!(w, "\n  Done.\n")?;
    Ok(())
}

/// Right-aligned text grid, one string per line, header first.
fn render_preview(preview: &Preview) -> Vec<String> {
    if preview.columns.is_empty() {
        return vec!["(no columns)".into()];
    }
    let widths: Vec<usize> = preview
        .columns
        .iter()
        .enumerate()
        .map(|(i, name)| {
            preview
                .rows
                .iter()
                .filter_map(|row| row.get(i))
                .map(|v| v.chars().count())
                .chain(std::iter::once(name.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();
    let line = |cells: &[String]| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, &w)| format!("{cell:>w$}"))
            .collect::<Vec<_>>()
            .join(" ")
    };
    std::iter::once(line(preview.columns.as_slice()))
        .chain(preview.rows.iter().map(|row| line(row.as_slice())))
        .collect()
}

fn group_thousands(n: i128) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

fn format_one_decimal(v: f64) -> String {
    if !v.is_finite() {
        return v.to_string();
    }
    let fixed = format!("{:.1}", v.abs());
    let (int_part, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "0"));
    let sign = if v < 0.0 && fixed != "0.0" { "-" } else { "" };
    let int_grouped = match int_part.parse::<i128>() {
        Ok(n) => group_thousands(n),
        Err(_) => int_part.to_owned(),
    };
    format!("{sign}{int_grouped}.{frac}")
}

// --- JSON export ---

pub fn export_json<W: Write>(writer: W, file_name: &str, outcomes: &[SheetOutcome]) -> Result<()> {
    let sheets: Vec<serde_json::Value> = outcomes
        .iter()
        .map(|o| match &o.result {
            Ok(profile) => serde_json::json!({ "sheet": o.sheet_name, "profile": profile }),
            Err(err) => serde_json::json!({ "sheet": o.sheet_name, "error": err.reason }),
        })
        .collect();
    let doc = serde_json::json!({
        "file": file_name,
        "sheets": sheets,
    });
    serde_json::to_writer_pretty(writer, &doc)?;
    Ok(())
}
