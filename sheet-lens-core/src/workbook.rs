use arrow::record_batch::RecordBatch;
use serde::{Deserialize, Serialize};
use sheet_lens_common::{Result, SheetLensError};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// A decoded workbook: named sheets in workbook order, each loadable as a table.
/// Names may repeat, so sheets are loaded by 0-based position.
pub trait Workbook {
    fn sheet_names(&self) -> Vec<String>;
    /// Fails with `SheetLensError::SheetRead` when the sheet's cells cannot be typed.
    fn load_table(&mut self, index: usize) -> Result<RecordBatch>;
}

/// Which sheets to profile.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SheetSelector {
    #[default]
    All,
    /// 1-based position; `raw` is retried as a name when the position is out of range
    Ordinal { position: i64, raw: String },
    Name(String),
}

impl SheetSelector {
    pub fn parse(selector: Option<&str>) -> Self {
        selector.map_or(SheetSelector::All, |s| {
            s.parse().unwrap_or_else(|e: Infallible| match e {})
        })
    }
}

impl FromStr for SheetSelector {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s == "all" {
            return Ok(SheetSelector::All);
        }
        Ok(match s.parse::<i64>() {
            Ok(position) => SheetSelector::Ordinal {
                position,
                raw: s.to_owned(),
            },
            Err(_) => SheetSelector::Name(s.to_owned()),
        })
    }
}

impl fmt::Display for SheetSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SheetSelector::All => f.write_str("all"),
            SheetSelector::Ordinal { raw, .. } => f.write_str(raw),
            SheetSelector::Name(name) => f.write_str(name),
        }
    }
}

/// Resolves a selector against the workbook's sheet list into 0-based
/// positions. An ordinal is tried first; when it is out of range the same
/// text is matched as a sheet name.
pub fn resolve_sheets(sheet_names: &[String], selector: &SheetSelector) -> Result<Vec<usize>> {
    let by_name = |name: &str| sheet_names.iter().position(|s| s.as_str() == name);
    let resolved = match selector {
        SheetSelector::All => return Ok((0..sheet_names.len()).collect()),
        SheetSelector::Ordinal { position, raw } => usize::try_from(*position)
            .ok()
            .filter(|&n| (1..=sheet_names.len()).contains(&n))
            .map(|n| n - 1)
            .or_else(|| by_name(raw)),
        SheetSelector::Name(name) => by_name(name),
    };
    resolved
        .map(|index| vec![index])
        .ok_or_else(|| SheetLensError::SheetNotFound(selector.to_string()))
}
