use crate::workbook::Workbook;
use arrow::array::{ArrayRef, BooleanArray, Float64Array, Int64Array, StringArray, TimestampMillisecondArray};
use arrow::datatypes::{DataType, Field, Schema, TimeUnit};
use arrow::record_batch::RecordBatch;
use calamine::{open_workbook_auto, Data, Range, Reader, Sheets};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use sheet_lens_common::{Result, SheetLensError};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

static EMPTY_CELL: Data = Data::Empty;

/// Spreadsheet file (.xlsx, .xlsm, .xlsb, .xls, .ods) read through calamine.
pub struct ExcelWorkbook {
    path: PathBuf,
    sheets: Sheets<BufReader<File>>,
}

pub fn open_workbook(path: &Path) -> Result<ExcelWorkbook> {
    let unreadable = |reason: String| SheetLensError::UnreadableWorkbook {
        path: path.display().to_string(),
        reason,
    };
    if !path.is_file() {
        return Err(unreadable("file does not exist".into()));
    }
    let sheets = open_workbook_auto(path).map_err(|e| unreadable(e.to_string()))?;
    debug!(path = %path.display(), "opened workbook");
    Ok(ExcelWorkbook {
        path: path.to_path_buf(),
        sheets,
    })
}

impl ExcelWorkbook {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Workbook for ExcelWorkbook {
    fn sheet_names(&self) -> Vec<String> {
        self.sheets.sheet_names()
    }

    fn load_table(&mut self, index: usize) -> Result<RecordBatch> {
        let sheet_name = self
            .sheets
            .sheet_names()
            .get(index)
            .cloned()
            .ok_or_else(|| SheetLensError::SheetNotFound(format!("position {}", index + 1)))?;
        let sheet_read = |reason: String| SheetLensError::SheetRead {
            sheet: sheet_name.clone(),
            reason,
        };
        let range = self
            .sheets
            .worksheet_range_at(index)
            .ok_or_else(|| sheet_read("sheet disappeared from workbook".into()))?
            .map_err(|e| sheet_read(e.to_string()))?;
        range_to_batch(&sheet_name, &range)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellClass {
    Int,
    Float,
    DateTime,
    Bool,
    Text,
}

fn classify_cell(cell: &Data) -> Option<CellClass> {
    match cell {
        Data::Empty => None,
        Data::Int(_) => Some(CellClass::Int),
        Data::Float(f) if is_integral(*f) => Some(CellClass::Int),
        Data::Float(_) => Some(CellClass::Float),
        Data::DateTime(dt) if dt.is_datetime() => Some(CellClass::DateTime),
        Data::DateTimeIso(_) => Some(CellClass::DateTime),
        Data::Bool(_) => Some(CellClass::Bool),
        // strings, error cells, durations
        _ => Some(CellClass::Text),
    }
}

fn is_integral(f: f64) -> bool {
    f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64
}

/// Column type from the classes of its non-empty cells; any disagreement
/// makes the whole column text. A column with no values is an all-null Float64.
fn infer_column_type<'a>(cells: impl Iterator<Item = &'a Data>) -> DataType {
    let mut classes = cells.filter_map(classify_cell).peekable();
    let Some(&first) = classes.peek() else {
        return DataType::Float64;
    };
    let mut numeric_only = true;
    let mut all_same = true;
    for class in classes {
        numeric_only &= matches!(class, CellClass::Int | CellClass::Float);
        all_same &= class == first;
    }
    match first {
        CellClass::Int if all_same => DataType::Int64,
        CellClass::Int | CellClass::Float if numeric_only => DataType::Float64,
        CellClass::DateTime if all_same => DataType::Timestamp(TimeUnit::Millisecond, None),
        CellClass::Bool if all_same => DataType::Boolean,
        _ => DataType::Utf8,
    }
}

fn cell_datetime(cell: &Data) -> Option<NaiveDateTime> {
    match cell {
        Data::DateTime(dt) => dt.as_datetime(),
        Data::DateTimeIso(s) => s
            .parse::<NaiveDateTime>()
            .ok()
            .or_else(|| s.parse::<NaiveDate>().ok().map(|d| d.and_time(NaiveTime::MIN))),
        _ => None,
    }
}

fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(s) => Some(s.clone()),
        Data::DateTime(dt) if dt.is_datetime() => Some(
            dt.as_datetime()
                .map(|d| d.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_else(|| cell.to_string()),
        ),
        other => Some(other.to_string()),
    }
}

fn header_names(range: &Range<Data>) -> Vec<String> {
    let width = range.width();
    let header = range.rows().next().unwrap_or(&[]);
    (0..width)
        .map(|i| match header.get(i).and_then(cell_text) {
            Some(name) if !name.is_empty() => name,
            _ => format!("Unnamed: {i}"),
        })
        .collect()
}

/// Decodes a sheet's used range into a typed table. The first row is the header.
pub fn range_to_batch(sheet_name: &str, range: &Range<Data>) -> Result<RecordBatch> {
    if range.is_empty() {
        return Ok(RecordBatch::new_empty(Arc::new(Schema::empty())));
    }
    let names = header_names(range);
    let body: Vec<&[Data]> = range.rows().skip(1).collect();
    let mut fields = Vec::with_capacity(names.len());
    let mut arrays: Vec<ArrayRef> = Vec::with_capacity(names.len());
    for (col, name) in names.into_iter().enumerate() {
        let column = || body.iter().map(move |row| row.get(col).unwrap_or(&EMPTY_CELL));
        let data_type = infer_column_type(column());
        let array: ArrayRef = match data_type {
            DataType::Int64 => Arc::new(Int64Array::from(
                column()
                    .map(|c| match c {
                        Data::Int(i) => Some(*i),
                        Data::Float(f) => Some(*f as i64),
                        _ => None,
                    })
                    .collect::<Vec<_>>(),
            )),
            DataType::Float64 => Arc::new(Float64Array::from(
                column()
                    .map(|c| match c {
                        Data::Int(i) => Some(*i as f64),
                        Data::Float(f) => Some(*f),
                        _ => None,
                    })
                    .collect::<Vec<_>>(),
            )),
            DataType::Timestamp(_, _) => {
                let mut values = Vec::with_capacity(body.len());
                for (row, cell) in column().enumerate() {
                    if classify_cell(cell).is_none() {
                        values.push(None);
                        continue;
                    }
                    let dt = cell_datetime(cell).ok_or_else(|| SheetLensError::SheetRead {
                        sheet: sheet_name.to_owned(),
                        reason: format!("column '{name}' row {}: '{cell}' is not a valid date", row + 1),
                    })?;
                    values.push(Some(dt.and_utc().timestamp_millis()));
                }
                Arc::new(TimestampMillisecondArray::from(values))
            }
            DataType::Boolean => Arc::new(BooleanArray::from(
                column()
                    .map(|c| match c {
                        Data::Bool(b) => Some(*b),
                        _ => None,
                    })
                    .collect::<Vec<_>>(),
            )),
            _ => Arc::new(StringArray::from(column().map(cell_text).collect::<Vec<_>>())),
        };
        fields.push(Field::new(name, data_type, true));
        arrays.push(array);
    }
    Ok(RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays)?)
}
