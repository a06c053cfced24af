//! Column profiling over a table sample.

use std::collections::BTreeSet;

use acct_model::{ColumnProfile, RawTable};
use tracing::{debug, trace};

/// Profiles every column of `table`, preserving header order.
///
/// Never fails: absent cells count as empty, and a table without rows
/// yields zero-valued profiles.
pub fn profile(table: &RawTable) -> Vec<ColumnProfile> {
    let profiles: Vec<ColumnProfile> = table
        .headers
        .iter()
        .map(|header| profile_column(table, header))
        .collect();
    debug!(
        columns = profiles.len(),
        rows = table.row_count(),
        "profiled columns"
    );
    profiles
}

/// Profiles a single column of `table`.
pub fn profile_column(table: &RawTable, header: &str) -> ColumnProfile {
    let mut values = Vec::with_capacity(table.row_count());
    let mut uniques: BTreeSet<&str> = BTreeSet::new();
    let mut empty_count = 0usize;
    for row in &table.sample_rows {
        let value = RawTable::value(row, header);
        let trimmed = value.trim();
        if trimmed.is_empty() {
            empty_count += 1;
        } else {
            uniques.insert(trimmed);
        }
        values.push(value.to_string());
    }
    let profile = ColumnProfile {
        name: header.to_string(),
        unique_count: uniques.len(),
        empty_count,
        row_count: values.len(),
        values,
    };
    trace!(
        column = %profile.name,
        unique = profile.unique_count,
        empty = profile.empty_count,
        "column profile"
    );
    profile
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn row(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn missing_keys_count_as_empty() {
        let table = RawTable::new(
            vec!["id".into(), "name".into()],
            vec![row(&[("id", "1"), ("name", "Acme")]), row(&[("id", "2")])],
        );
        let profiles = profile(&table);
        assert_eq!(profiles[1].name, "name");
        assert_eq!(profiles[1].empty_count, 1);
        assert_eq!(profiles[1].unique_count, 1);
        assert_eq!(profiles[1].values, vec!["Acme", ""]);
    }

    #[test]
    fn uniqueness_uses_trimmed_values() {
        let table = RawTable::new(
            vec!["id".into()],
            vec![row(&[("id", "A1")]), row(&[("id", " A1 ")]), row(&[("id", "  ")])],
        );
        let profile = profile_column(&table, "id");
        assert_eq!(profile.unique_count, 1);
        assert_eq!(profile.empty_count, 1);
        assert_eq!(profile.row_count, 3);
    }

    #[test]
    fn zero_rows_yield_zero_profiles() {
        let table = RawTable::new(vec!["id".into()], Vec::new());
        let profiles = profile(&table);
        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles[0].unique_count, 0);
        assert_eq!(profiles[0].empty_count, 0);
        assert_eq!(profiles[0].uniqueness_ratio(), 0.0);
    }
}
