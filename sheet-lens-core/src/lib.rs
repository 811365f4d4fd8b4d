pub mod export;
pub mod profile;
pub mod reader;
pub mod walker;
pub mod workbook;

pub use export::{
    export_json, write_outcome, write_profile, write_report, write_sheet_error, write_workbook_header,
};
pub use profile::{
    classify, profile_table, ColumnKind, ColumnProfile, ColumnSummary, NumericSum, NumericSummary,
    Preview, ProfileOptions, TableProfile, TemporalSummary, TextualSummary,
};
pub use reader::{open_workbook, range_to_batch, ExcelWorkbook};
pub use sheet_lens_common::{Result, SheetLensError};
pub use walker::{run, SheetError, SheetOutcome};
pub use workbook::{resolve_sheets, SheetSelector, Workbook};
