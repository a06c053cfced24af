//! Bucket assignment state for the field categorisation step.
//!
//! Tracks which fields have been placed into which bucket, alongside the
//! classifier's suggestions. Independent of the singleton selection held by
//! [`crate::SuggestionArbiter`]: a field may be the account identifier and
//! also sit in a bucket.

use std::collections::BTreeMap;

use acct_model::RoleKind;
use tracing::debug;

use crate::error::SelectionError;
use crate::types::BucketSuggestion;

/// Placement of one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldStatus {
    /// Placed in a bucket.
    Assigned(RoleKind),
    /// Not placed yet, but a bucket is suggested.
    Suggested(RoleKind),
    /// Neither placed nor suggested.
    Unassigned,
}

/// Counts for the categorisation step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentSummary {
    pub total_fields: usize,
    pub assigned: usize,
    /// Fields with a suggestion that is not yet accepted.
    pub suggested: usize,
    pub per_bucket: BTreeMap<RoleKind, usize>,
}

#[derive(Debug, Clone)]
pub struct FieldAssignments {
    fields: Vec<String>,
    suggestions: Vec<BucketSuggestion>,
    assigned: BTreeMap<String, RoleKind>,
}

impl FieldAssignments {
    pub fn new(fields: Vec<String>, suggestions: Vec<BucketSuggestion>) -> Self {
        Self {
            fields,
            suggestions,
            assigned: BTreeMap::new(),
        }
    }

    /// Maximum fields a bucket can hold (`None` for unbounded).
    pub fn capacity(bucket: RoleKind) -> Option<usize> {
        match bucket {
            RoleKind::Identifier => Some(1),
            _ => None,
        }
    }

    pub fn suggestion_for(&self, field: &str) -> Option<&BucketSuggestion> {
        self.suggestions.iter().find(|s| s.field == field)
    }

    pub fn bucket_of(&self, field: &str) -> Option<RoleKind> {
        self.assigned.get(field).copied()
    }

    pub fn status(&self, field: &str) -> FieldStatus {
        if let Some(bucket) = self.bucket_of(field) {
            FieldStatus::Assigned(bucket)
        } else if let Some(suggestion) = self.suggestion_for(field) {
            FieldStatus::Suggested(suggestion.bucket)
        } else {
            FieldStatus::Unassigned
        }
    }

    /// Places `field` into `bucket`.
    pub fn assign(&mut self, field: &str, bucket: RoleKind) -> Result<(), SelectionError> {
        if !bucket.is_bucket() {
            return Err(SelectionError::NotABucket(bucket));
        }
        if !self.fields.iter().any(|f| f == field) {
            return Err(SelectionError::UnknownField(field.to_string()));
        }
        if let Some(existing) = self.bucket_of(field) {
            return Err(SelectionError::FieldAlreadyAssigned {
                field: field.to_string(),
                bucket: existing,
            });
        }
        if let Some(limit) = Self::capacity(bucket) {
            let held = self.fields_in(bucket);
            if held.len() >= limit {
                return Err(SelectionError::BucketFull {
                    bucket,
                    field: held[0].to_string(),
                });
            }
        }
        self.assigned.insert(field.to_string(), bucket);
        debug!(field = %field, bucket = ?bucket, "field assigned");
        Ok(())
    }

    /// Places a field into its suggested bucket.
    pub fn accept_suggestion(&mut self, field: &str) -> Result<RoleKind, SelectionError> {
        let bucket = self
            .suggestion_for(field)
            .map(|s| s.bucket)
            .ok_or_else(|| SelectionError::UnknownField(field.to_string()))?;
        self.assign(field, bucket)?;
        Ok(bucket)
    }

    /// Accepts every suggestion that can be applied; returns how many were.
    ///
    /// Fields already placed and suggestions for full buckets are skipped.
    pub fn accept_all(&mut self) -> usize {
        let pending: Vec<(String, RoleKind)> = self
            .suggestions
            .iter()
            .map(|s| (s.field.clone(), s.bucket))
            .collect();
        pending
            .into_iter()
            .filter(|(field, bucket)| self.assign(field, *bucket).is_ok())
            .count()
    }

    /// Removes a field from its bucket. Returns false if it was not placed.
    pub fn clear(&mut self, field: &str) -> bool {
        self.assigned.remove(field).is_some()
    }

    /// Fields placed in `bucket`, in field order.
    pub fn fields_in(&self, bucket: RoleKind) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|f| self.bucket_of(f) == Some(bucket))
            .map(String::as_str)
            .collect()
    }

    /// Fields not placed in any bucket, in field order.
    pub fn unassigned(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|f| !self.assigned.contains_key(f.as_str()))
            .map(String::as_str)
            .collect()
    }

    pub fn summary(&self) -> AssignmentSummary {
        let mut per_bucket = BTreeMap::new();
        for bucket in self.assigned.values() {
            *per_bucket.entry(*bucket).or_insert(0) += 1;
        }
        AssignmentSummary {
            total_fields: self.fields.len(),
            assigned: self.assigned.len(),
            suggested: self
                .suggestions
                .iter()
                .filter(|s| !self.assigned.contains_key(&s.field))
                .count(),
            per_bucket,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suggestion(field: &str, bucket: RoleKind) -> BucketSuggestion {
        BucketSuggestion {
            field: field.to_string(),
            bucket,
            confidence: 0.9,
            reason: "test".to_string(),
        }
    }

    fn state() -> FieldAssignments {
        FieldAssignments::new(
            vec![
                "Account ID".to_string(),
                "Customer Key".to_string(),
                "Industry".to_string(),
                "Notes".to_string(),
            ],
            vec![
                suggestion("Account ID", RoleKind::Identifier),
                suggestion("Customer Key", RoleKind::Identifier),
                suggestion("Industry", RoleKind::Firmographic),
            ],
        )
    }

    #[test]
    fn accept_all_respects_identifier_capacity() {
        let mut state = state();
        assert_eq!(state.accept_all(), 2);
        assert_eq!(state.fields_in(RoleKind::Identifier), vec!["Account ID"]);
        assert_eq!(state.status("Customer Key"), FieldStatus::Suggested(RoleKind::Identifier));
        assert_eq!(state.unassigned(), vec!["Customer Key", "Notes"]);

        let summary = state.summary();
        assert_eq!(summary.assigned, 2);
        assert_eq!(summary.suggested, 1);
        assert_eq!(summary.per_bucket.get(&RoleKind::Firmographic), Some(&1));
    }

    #[test]
    fn manual_assignment_rules() {
        let mut state = state();
        assert_eq!(
            state.assign("Notes", RoleKind::DisplayName),
            Err(SelectionError::NotABucket(RoleKind::DisplayName))
        );
        state.assign("Notes", RoleKind::Feature).unwrap();
        assert!(matches!(
            state.assign("Notes", RoleKind::Target),
            Err(SelectionError::FieldAlreadyAssigned { .. })
        ));
        assert!(state.clear("Notes"));
        assert!(!state.clear("Notes"));
        assert_eq!(state.status("Notes"), FieldStatus::Unassigned);
    }

    #[test]
    fn target_bucket_admits_many_fields() {
        let mut state = FieldAssignments::new(vec!["Won".into(), "Status".into()], Vec::new());
        state.assign("Won", RoleKind::Target).unwrap();
        state.assign("Status", RoleKind::Target).unwrap();
        assert_eq!(state.fields_in(RoleKind::Target).len(), 2);
    }
}
