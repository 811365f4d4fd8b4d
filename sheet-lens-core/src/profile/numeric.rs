use serde::{Deserialize, Serialize};
use std::fmt;

/// Column sum kept in the column's own precision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericSum {
    Integer(i128),
    Float(f64),
}

impl NumericSum {
    pub fn as_f64(&self) -> f64 {
        match *self {
            NumericSum::Integer(v) => v as f64,
            NumericSum::Float(v) => v,
        }
    }
}

impl fmt::Display for NumericSum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericSum::Integer(v) => write!(f, "{v}"),
            NumericSum::Float(v) => write!(f, "{v}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericSummary {
    pub sum: NumericSum,
    pub mean: f64,
}

pub struct NumericAccumulator {
    sum: NumericSum,
    count: u64,
}

impl NumericAccumulator {
    pub fn integer() -> Self {
        Self {
            sum: NumericSum::Integer(0),
            count: 0,
        }
    }
    pub fn float() -> Self {
        Self {
            sum: NumericSum::Float(0.0),
            count: 0,
        }
    }
    pub fn add_int(&mut self, v: i128) {
        match &mut self.sum {
            NumericSum::Integer(s) => *s = s.saturating_add(v),
            NumericSum::Float(s) => *s += v as f64,
        }
        self.count += 1;
    }
    /// NaN is treated as missing and contributes to neither sum nor mean.
    pub fn add_float(&mut self, v: f64) {
        if v.is_nan() {
            return;
        }
        self.sum = match self.sum {
            NumericSum::Integer(s) => NumericSum::Float(s as f64 + v),
            NumericSum::Float(s) => NumericSum::Float(s + v),
        };
        self.count += 1;
    }
    pub fn count(&self) -> u64 {
        self.count
    }
    /// None when nothing was added; an empty column has no sum rather than a zero one.
    pub fn finish(self) -> Option<NumericSummary> {
        if self.count == 0 {
            return None;
        }
        Some(NumericSummary {
            sum: self.sum,
            mean: self.sum.as_f64() / self.count as f64,
        })
    }
}
