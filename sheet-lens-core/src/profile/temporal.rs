use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use sheet_lens_common::{Result, SheetLensError};

/// Calendar range of a date/datetime column; both ends display as `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemporalSummary {
    pub min: NaiveDate,
    pub max: NaiveDate,
}

pub struct TemporalAccumulator {
    count: u64,
    min: Option<i64>,
    max: Option<i64>,
}

impl TemporalAccumulator {
    pub fn new() -> Self {
        Self {
            count: 0,
            min: None,
            max: None,
        }
    }
    pub fn add_ms(&mut self, ts_ms: i64) {
        self.count += 1;
        self.min = Some(self.min.map_or(ts_ms, |m| m.min(ts_ms)));
        self.max = Some(self.max.map_or(ts_ms, |m| m.max(ts_ms)));
    }
    /// None only when nothing was added. A timestamp outside the calendar
    /// range is an error, not a missing summary.
    pub fn finish(self) -> Result<Option<TemporalSummary>> {
        let to_date = |ms: i64| {
            DateTime::from_timestamp_millis(ms)
                .map(|dt| dt.date_naive())
                .ok_or_else(|| {
                    SheetLensError::OutOfRange(format!("timestamp {ms} ms has no calendar date"))
                })
        };
        match (self.min, self.max) {
            (Some(mn), Some(mx)) => Ok(Some(TemporalSummary {
                min: to_date(mn)?,
                max: to_date(mx)?,
            })),
            _ => Ok(None),
        }
    }
}

impl Default for TemporalAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chronological_not_insertion_order() {
        let mut acc = TemporalAccumulator::new();
        // 2024-03-01, 2023-12-31 23:00, 2024-01-15
        for ms in [1_709_251_200_000, 1_704_063_600_000, 1_705_276_800_000] {
            acc.add_ms(ms);
        }
        let s = acc.finish().unwrap().unwrap();
        assert_eq!(s.min.to_string(), "2023-12-31");
        assert_eq!(s.max.to_string(), "2024-03-01");
    }

    #[test]
    fn empty_has_no_range() {
        assert!(TemporalAccumulator::new().finish().unwrap().is_none());
    }

    #[test]
    fn uncalendarable_timestamp_is_an_error() {
        let mut acc = TemporalAccumulator::new();
        acc.add_ms(0);
        acc.add_ms(i64::MAX);
        assert!(matches!(acc.finish(), Err(SheetLensError::OutOfRange(_))));
    }
}
