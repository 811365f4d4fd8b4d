use super::distinct::{DistinctCounter, TextualSummary};
use super::numeric::{NumericAccumulator, NumericSummary};
use super::preview::{build_preview, Preview};
use super::temporal::{TemporalAccumulator, TemporalSummary};
use super::ProfileOptions;
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::buffer::NullBuffer;
use arrow::compute::{cast, cast_with_options, CastOptions};
use arrow::datatypes::{
    DataType, Float64Type, Int64Type, TimeUnit, TimestampMillisecondType, UInt64Type,
};
use arrow::record_batch::RecordBatch;
use arrow::util::display::{ArrayFormatter, FormatOptions};
use serde::{Deserialize, Serialize};
use sheet_lens_common::Result;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Numeric,
    Temporal,
    Textual,
}

impl ColumnKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ColumnKind::Numeric => "numeric",
            ColumnKind::Temporal => "temporal",
            ColumnKind::Textual => "textual",
        }
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maps a declared column type to its kind. Total: anything that is neither
/// a number nor a date/datetime is textual.
pub fn classify(data_type: &DataType) -> ColumnKind {
    match data_type {
        DataType::Int8
        | DataType::Int16
        | DataType::Int32
        | DataType::Int64
        | DataType::UInt8
        | DataType::UInt16
        | DataType::UInt32
        | DataType::UInt64
        | DataType::Float16
        | DataType::Float32
        | DataType::Float64
        | DataType::Decimal128(_, _)
        | DataType::Decimal256(_, _) => ColumnKind::Numeric,
        DataType::Date32 | DataType::Date64 | DataType::Timestamp(_, _) => ColumnKind::Temporal,
        _ => ColumnKind::Textual,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnSummary {
    Numeric(NumericSummary),
    Temporal(TemporalSummary),
    Textual(TextualSummary),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnProfile {
    pub name: String,
    pub kind: ColumnKind,
    pub data_type: String,
    pub total_count: usize,
    pub non_null_count: usize,
    pub null_count: usize,
    pub summary: Option<ColumnSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableProfile {
    pub sheet_name: String,
    pub row_count: usize,
    pub column_count: usize,
    pub columns: Vec<ColumnProfile>,
    pub preview: Preview,
}

impl TableProfile {
    pub fn columns_of(&self, kind: ColumnKind) -> impl Iterator<Item = &ColumnProfile> {
        self.columns.iter().filter(move |c| c.kind == kind)
    }
}

pub fn profile_table(
    sheet_name: &str,
    batch: &RecordBatch,
    options: &ProfileOptions,
) -> Result<TableProfile> {
    let schema = batch.schema();
    let columns = schema
        .fields()
        .iter()
        .zip(batch.columns())
        .map(|(field, array)| profile_column(field.name(), array, options))
        .collect::<Result<Vec<_>>>()?;
    let preview = build_preview(
        batch,
        options.preview_rows,
        options.preview_columns,
        &options.null_marker,
    )?;
    Ok(TableProfile {
        sheet_name: sheet_name.to_owned(),
        row_count: batch.num_rows(),
        column_count: batch.num_columns(),
        columns,
        preview,
    })
}

fn profile_column(name: &str, array: &ArrayRef, options: &ProfileOptions) -> Result<ColumnProfile> {
    let kind = classify(array.data_type());
    let total_count = array.len();
    // logical nulls so that untyped all-null arrays count as null too
    let nulls = array.logical_nulls();
    let null_count = nulls.as_ref().map_or(0, |n| n.null_count()) + nan_count(array)?;
    let summary = match kind {
        ColumnKind::Numeric => numeric_summary(array)?.map(ColumnSummary::Numeric),
        ColumnKind::Temporal => temporal_summary(array)?.map(ColumnSummary::Temporal),
        ColumnKind::Textual => Some(ColumnSummary::Textual(textual_summary(
            array,
            nulls.as_ref(),
            options,
        )?)),
    };
    Ok(ColumnProfile {
        name: name.to_owned(),
        kind,
        data_type: array.data_type().to_string(),
        total_count,
        non_null_count: total_count - null_count,
        null_count,
        summary,
    })
}

/// Float NaN counts as missing, same as a null slot.
fn nan_count(array: &ArrayRef) -> Result<usize> {
    if !array.data_type().is_floating() {
        return Ok(0);
    }
    let floats = cast(array, &DataType::Float64)?;
    Ok(floats
        .as_primitive::<Float64Type>()
        .iter()
        .flatten()
        .filter(|v| v.is_nan())
        .count())
}

fn numeric_summary(array: &ArrayRef) -> Result<Option<NumericSummary>> {
    let data_type = array.data_type();
    let acc = if data_type.is_signed_integer() {
        let ints = cast(array, &DataType::Int64)?;
        let mut acc = NumericAccumulator::integer();
        for v in ints.as_primitive::<Int64Type>().iter().flatten() {
            acc.add_int(v as i128);
        }
        acc
    } else if data_type.is_unsigned_integer() {
        let ints = cast(array, &DataType::UInt64)?;
        let mut acc = NumericAccumulator::integer();
        for v in ints.as_primitive::<UInt64Type>().iter().flatten() {
            acc.add_int(v as i128);
        }
        acc
    } else {
        // floats and decimals
        let floats = cast(array, &DataType::Float64)?;
        let mut acc = NumericAccumulator::float();
        for v in floats.as_primitive::<Float64Type>().iter().flatten() {
            acc.add_float(v);
        }
        acc
    };
    Ok(acc.finish())
}

fn temporal_summary(array: &ArrayRef) -> Result<Option<TemporalSummary>> {
    // overflow while rescaling is an error, not a null
    let strict = CastOptions {
        safe: false,
        ..Default::default()
    };
    let millis = cast_with_options(array, &DataType::Timestamp(TimeUnit::Millisecond, None), &strict)?;
    let mut acc = TemporalAccumulator::new();
    for ts in millis.as_primitive::<TimestampMillisecondType>().iter().flatten() {
        acc.add_ms(ts);
    }
    acc.finish()
}

fn textual_summary(
    array: &ArrayRef,
    nulls: Option<&NullBuffer>,
    options: &ProfileOptions,
) -> Result<TextualSummary> {
    let formatter = ArrayFormatter::try_new(array.as_ref(), &FormatOptions::default())?;
    let mut counter = DistinctCounter::new();
    for row in 0..array.len() {
        if nulls.is_some_and(|n| n.is_null(row)) {
            continue;
        }
        counter.add(formatter.value(row).to_string());
    }
    Ok(counter.finish(options.distinct_threshold, options.distinct_display_cap))
}
