use arrow::record_batch::RecordBatch;
use arrow::util::display::{ArrayFormatter, FormatOptions};
use serde::{Deserialize, Serialize};
use sheet_lens_common::Result;

/// Leading rows of a table rendered as text, clipped to a fixed window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preview {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

pub fn build_preview(
    batch: &RecordBatch,
    max_rows: usize,
    max_cols: usize,
    null_marker: &str,
) -> Result<Preview> {
    let ncols = batch.num_columns().min(max_cols);
    let nrows = batch.num_rows().min(max_rows);
    let schema = batch.schema();
    let columns = schema
        .fields()
        .iter()
        .take(ncols)
        .map(|f| f.name().clone())
        .collect();
    let options = FormatOptions::default().with_null(null_marker);
    let formatters = batch
        .columns()
        .iter()
        .take(ncols)
        .map(|a| ArrayFormatter::try_new(a.as_ref(), &options))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    let rows = (0..nrows)
        .map(|row| formatters.iter().map(|f| f.value(row).to_string()).collect())
        .collect();
    Ok(Preview { columns, rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{ArrayRef, Int64Array, StringArray};
    use arrow::datatypes::{DataType, Field, Schema};
    use std::sync::Arc;

    #[test]
    fn nulls_use_marker() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("id", DataType::Int64, true),
            Field::new("name", DataType::Utf8, true),
        ]));
        let batch = RecordBatch::try_new(
            schema,
            vec![
                Arc::new(Int64Array::from(vec![Some(1), None])) as ArrayRef,
                Arc::new(StringArray::from(vec![None, Some("kim")])) as ArrayRef,
            ],
        )
        .unwrap();
        let p = build_preview(&batch, 5, 8, "NaN").unwrap();
        assert_eq!(p.columns, vec!["id", "name"]);
        assert_eq!(p.rows, vec![vec!["1", "NaN"], vec!["NaN", "kim"]]);
    }
}
