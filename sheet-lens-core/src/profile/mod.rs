pub mod distinct;
pub mod numeric;
pub mod preview;
pub mod table;
pub mod temporal;

pub use distinct::{DistinctCounter, TextualSummary};
pub use numeric::{NumericAccumulator, NumericSum, NumericSummary};
pub use preview::{build_preview, Preview};
pub use table::{classify, profile_table, ColumnKind, ColumnProfile, ColumnSummary, TableProfile};
pub use temporal::{TemporalAccumulator, TemporalSummary};

use sheet_lens_common::Config;

/// Output bounds applied while profiling a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileOptions {
    pub preview_rows: usize,
    pub preview_columns: usize,
    /// textual columns with more distinct values than this list none of them
    pub distinct_threshold: usize,
    /// hard cap on listed distinct values, applied even below the threshold
    pub distinct_display_cap: usize,
    pub null_marker: String,
}

impl Default for ProfileOptions {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for ProfileOptions {
    fn from(cfg: &Config) -> Self {
        Self {
            preview_rows: cfg.profiling.preview_rows,
            preview_columns: cfg.profiling.preview_columns,
            distinct_threshold: cfg.profiling.distinct_threshold,
            distinct_display_cap: cfg.profiling.distinct_display_cap,
            null_marker: cfg.display.null_marker.clone(),
        }
    }
}
