use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextualSummary {
    pub distinct_count: usize,
    /// first-seen distinct values; None when the column is too varied to list
    pub values: Option<Vec<String>>,
}

/// Tracks distinct values in first-appearance order.
pub struct DistinctCounter {
    seen: HashSet<String>,
    ordered: Vec<String>,
}

impl DistinctCounter {
    pub fn new() -> Self {
        Self {
            seen: HashSet::new(),
            ordered: Vec::new(),
        }
    }
    pub fn add(&mut self, val: String) {
        if !self.seen.contains(&val) {
            self.seen.insert(val.clone());
            self.ordered.push(val);
        }
    }
    pub fn len(&self) -> usize {
        self.ordered.len()
    }
    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }
    pub fn finish(self, threshold: usize, display_cap: usize) -> TextualSummary {
        let distinct_count = self.ordered.len();
        let values = if distinct_count <= threshold {
            Some(self.ordered.into_iter().take(display_cap).collect())
        } else {
            None
        };
        TextualSummary {
            distinct_count,
            values,
        }
    }
}

impl Default for DistinctCounter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counter(vals: &[&str]) -> DistinctCounter {
        let mut c = DistinctCounter::new();
        for v in vals {
            c.add(v.to_string());
        }
        c
    }

    #[test]
    fn keeps_first_appearance_order() {
        let s = counter(&["b", "a", "b", "c", "a"]).finish(10, 10);
        assert_eq!(s.distinct_count, 3);
        assert_eq!(s.values.unwrap(), vec!["b", "a", "c"]);
    }

    #[test]
    fn case_sensitive() {
        let c = counter(&["Seoul", "seoul", "SEOUL"]);
        assert_eq!(c.len(), 3);
    }

    #[test]
    fn over_threshold_lists_nothing() {
        let vals: Vec<String> = (0..11).map(|i| format!("v{i}")).collect();
        let refs: Vec<&str> = vals.iter().map(|s| s.as_str()).collect();
        let s = counter(&refs).finish(10, 10);
        assert_eq!(s.distinct_count, 11);
        assert!(s.values.is_none());
    }

    #[test]
    fn display_cap_applies_below_threshold() {
        let s = counter(&["a", "b", "c", "d"]).finish(10, 2);
        assert_eq!(s.distinct_count, 4);
        assert_eq!(s.values.unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn exactly_ten_is_listed() {
        let vals: Vec<String> = (0..10).map(|i| i.to_string()).collect();
        let refs: Vec<&str> = vals.iter().map(|s| s.as_str()).collect();
        let s = counter(&refs).finish(10, 10);
        assert_eq!(s.values.map(|v| v.len()), Some(10));
    }
}
