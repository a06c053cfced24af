//! Per-column statistics computed from a table sample.

use serde::{Deserialize, Serialize};

/// Statistics for one column of a [`crate::RawTable`].
///
/// `values` keeps every sampled value in row order (missing cells as `""`),
/// so every derived signal can be recomputed from the profile alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnProfile {
    pub name: String,
    pub values: Vec<String>,
    /// Distinct non-empty trimmed values.
    pub unique_count: usize,
    /// Rows whose trimmed value is empty or absent.
    pub empty_count: usize,
    pub row_count: usize,
}

impl ColumnProfile {
    /// `unique_count / max(1, row_count)`.
    pub fn uniqueness_ratio(&self) -> f64 {
        self.unique_count as f64 / self.row_count.max(1) as f64
    }

    /// `empty_count / max(1, row_count)`.
    pub fn empty_ratio(&self) -> f64 {
        self.empty_count as f64 / self.row_count.max(1) as f64
    }

    pub fn has_empty(&self) -> bool {
        self.empty_count > 0
    }

    pub fn is_fully_unique(&self) -> bool {
        self.unique_count == self.row_count
    }

    /// Some values repeat, but the column is not entirely empty.
    pub fn has_duplicates(&self) -> bool {
        self.unique_count > 0 && self.unique_count < self.row_count
    }

    /// Non-empty trimmed values in row order.
    pub fn non_empty_values(&self) -> impl Iterator<Item = &str> {
        self.values
            .iter()
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }

    /// First non-empty value, used as the example shown next to a field.
    pub fn first_value(&self) -> Option<&str> {
        self.non_empty_values().next()
    }

    /// True when the column has data and every non-empty value is a number.
    ///
    /// Thousands separators and a trailing `%` are tolerated.
    pub fn is_numeric(&self) -> bool {
        let mut seen = false;
        for value in self.non_empty_values() {
            seen = true;
            let cleaned: String = value
                .trim_end_matches('%')
                .chars()
                .filter(|ch| *ch != ',')
                .collect();
            if cleaned.parse::<f64>().is_err() {
                return false;
            }
        }
        seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(values: &[&str], unique_count: usize, empty_count: usize) -> ColumnProfile {
        ColumnProfile {
            name: "col".to_string(),
            values: values.iter().map(|v| (*v).to_string()).collect(),
            unique_count,
            empty_count,
            row_count: values.len(),
        }
    }

    #[test]
    fn ratios_use_guarded_denominator() {
        let empty = profile(&[], 0, 0);
        assert_eq!(empty.uniqueness_ratio(), 0.0);
        assert_eq!(empty.empty_ratio(), 0.0);
        assert!(!empty.has_empty());
        assert!(!empty.has_duplicates());
    }

    #[test]
    fn duplicate_and_unique_flags() {
        let dupes = profile(&["a", "a", "b"], 2, 0);
        assert!(dupes.has_duplicates());
        assert!(!dupes.is_fully_unique());

        let unique = profile(&["a", "b", "c"], 3, 0);
        assert!(unique.is_fully_unique());
        assert!((unique.uniqueness_ratio() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn numeric_detection_ignores_blanks_and_separators() {
        assert!(profile(&["1,200", "", "35%", "4.5"], 3, 1).is_numeric());
        assert!(!profile(&["12", "n/a"], 2, 0).is_numeric());
        assert!(!profile(&["", " "], 0, 2).is_numeric());
    }

    #[test]
    fn first_value_skips_blanks() {
        assert_eq!(profile(&[" ", " Acme "], 1, 1).first_value(), Some("Acme"));
    }
}
