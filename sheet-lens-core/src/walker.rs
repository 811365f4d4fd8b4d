use crate::profile::{profile_table, ProfileOptions, TableProfile};
use crate::workbook::{resolve_sheets, SheetSelector, Workbook};
use serde::{Deserialize, Serialize};
use sheet_lens_common::{Result, SheetLensError};
use std::fmt;
use tracing::{debug, warn};

/// Why one sheet produced no profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetError {
    pub sheet: String,
    pub reason: String,
}

impl fmt::Display for SheetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sheet '{}': {}", self.sheet, self.reason)
    }
}

impl std::error::Error for SheetError {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetOutcome {
    pub sheet_name: String,
    pub result: std::result::Result<TableProfile, SheetError>,
}

/// Resolves the selector, then loads and profiles each sheet once, in order.
/// Selector failures abort before any sheet is read; a failing sheet becomes
/// an error outcome and the walk moves on.
pub fn run(
    workbook: &mut dyn Workbook,
    selector: &SheetSelector,
    options: &ProfileOptions,
) -> Result<Vec<SheetOutcome>> {
    let sheet_names = workbook.sheet_names();
    let resolved = resolve_sheets(&sheet_names, selector)?;
    debug!(selector = %selector, sheets = resolved.len(), "resolved sheet selection");
    let outcomes = resolved
        .into_iter()
        .map(|index| {
            let sheet_name = sheet_names[index].clone();
            let result = profile_sheet(&mut *workbook, index, &sheet_name, options).map_err(|e| {
                warn!(sheet = %sheet_name, error = %e, "skipping sheet");
                SheetError {
                    sheet: sheet_name.clone(),
                    reason: sheet_failure_reason(e),
                }
            });
            SheetOutcome { sheet_name, result }
        })
        .collect();
    Ok(outcomes)
}

fn profile_sheet(
    workbook: &mut dyn Workbook,
    index: usize,
    sheet_name: &str,
    options: &ProfileOptions,
) -> Result<TableProfile> {
    let batch = workbook.load_table(index)?;
    debug!(sheet = sheet_name, rows = batch.num_rows(), cols = batch.num_columns(), "profiling sheet");
    profile_table(sheet_name, &batch, options)
}

fn sheet_failure_reason(err: SheetLensError) -> String {
    match err {
        SheetLensError::SheetRead { reason, .. } => reason,
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{ArrayRef, Int64Array};
    use arrow::datatypes::{DataType, Field, Schema};
    use arrow::record_batch::RecordBatch;
    use std::sync::Arc;

    struct FakeWorkbook {
        sheets: Vec<(String, Option<RecordBatch>)>,
        loads: Vec<usize>,
    }

    impl FakeWorkbook {
        fn new(sheets: &[(&str, bool)]) -> Self {
            let sheets = sheets
                .iter()
                .map(|(name, ok)| (name.to_string(), ok.then(one_column_batch)))
                .collect();
            Self { sheets, loads: Vec::new() }
        }
    }

    impl Workbook for FakeWorkbook {
        fn sheet_names(&self) -> Vec<String> {
            self.sheets.iter().map(|(n, _)| n.clone()).collect()
        }
        fn load_table(&mut self, index: usize) -> Result<RecordBatch> {
            self.loads.push(index);
            match &self.sheets[index] {
                (_, Some(batch)) => Ok(batch.clone()),
                (name, None) => Err(SheetLensError::SheetRead {
                    sheet: name.clone(),
                    reason: "malformed cell data".into(),
                }),
            }
        }
    }

    fn one_column_batch() -> RecordBatch {
        let schema = Arc::new(Schema::new(vec![Field::new("n", DataType::Int64, true)]));
        RecordBatch::try_new(schema, vec![Arc::new(Int64Array::from(vec![1, 2, 3])) as ArrayRef])
            .unwrap()
    }

    #[test]
    fn bad_sheet_does_not_abort_run() {
        let mut wb = FakeWorkbook::new(&[("Good", true), ("Bad", false)]);
        let outcomes = run(&mut wb, &SheetSelector::All, &ProfileOptions::default()).unwrap();
        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[0].sheet_name, "Good");
        assert_eq!(outcomes[0].result.as_ref().unwrap().row_count, 3);
        let err = outcomes[1].result.as_ref().unwrap_err();
        assert_eq!(err.sheet, "Bad");
        assert_eq!(err.reason, "malformed cell data");
    }

    #[test]
    fn failure_first_still_profiles_rest() {
        let mut wb = FakeWorkbook::new(&[("Bad", false), ("Good", true)]);
        let outcomes = run(&mut wb, &SheetSelector::All, &ProfileOptions::default()).unwrap();
        assert!(outcomes[0].result.is_err());
        assert!(outcomes[1].result.is_ok());
        assert_eq!(wb.loads, vec![0, 1]);
    }

    #[test]
    fn unresolved_selector_loads_nothing() {
        let mut wb = FakeWorkbook::new(&[("A", true), ("B", true)]);
        let err = run(&mut wb, &"Z".parse().unwrap(), &ProfileOptions::default()).unwrap_err();
        assert!(matches!(err, SheetLensError::SheetNotFound(_)));
        assert!(wb.loads.is_empty());
    }

    #[test]
    fn single_sheet_selected_by_ordinal() {
        let mut wb = FakeWorkbook::new(&[("A", true), ("B", true), ("C", true)]);
        let outcomes = run(&mut wb, &"2".parse().unwrap(), &ProfileOptions::default()).unwrap();
        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].sheet_name, "B");
        assert_eq!(wb.loads, vec![1]);
    }

    #[test]
    fn repeated_names_load_each_sheet_once() {
        let mut wb = FakeWorkbook::new(&[("X", true), ("Dup", true), ("Dup", false)]);
        let outcomes = run(&mut wb, &SheetSelector::All, &ProfileOptions::default()).unwrap();
        assert_eq!(wb.loads, vec![0, 1, 2]);
        let names: Vec<&str> = outcomes.iter().map(|o| o.sheet_name.as_str()).collect();
        assert_eq!(names, vec!["X", "Dup", "Dup"]);
        assert!(outcomes[1].result.is_ok());
        assert!(outcomes[2].result.is_err());
    }
}
