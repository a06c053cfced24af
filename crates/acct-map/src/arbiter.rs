//! Confirmation flow for the identifier and display-name columns.
//!
//! Confident, distinct suggestions are offered for a single accept/reject
//! decision; otherwise the caller picks both columns by hand.

use std::collections::BTreeMap;

use acct_model::{ColumnProfile, RoleScore, RoleSuggestion, SingletonRole};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::classifier::best_singleton;
use crate::config::DEFAULT_CONFIDENCE_THRESHOLD;
use crate::error::SelectionError;

/// Where the selection flow currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "state", content = "role")]
pub enum SelectionState {
    AwaitingSuggestionResponse,
    ManualPick(SingletonRole),
    Resolved,
}

/// The confirmed identifier and display-name columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedMapping {
    pub identifier: String,
    pub display_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackStatus {
    Success,
    Warning,
}

/// Advisory message about a selected column. Never blocks the transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickFeedback {
    pub field: String,
    pub role: SingletonRole,
    pub status: FeedbackStatus,
    pub message: String,
}

/// Snapshot of the arbiter for hosts that render or serialize it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArbitrationOutcome {
    pub state: SelectionState,
    pub identifier_suggestion: Option<RoleSuggestion>,
    pub display_name_suggestion: Option<RoleSuggestion>,
    pub resolved: Option<ResolvedMapping>,
}

/// Tracks suggestion responses and manual picks for the singleton roles.
#[derive(Debug, Clone)]
pub struct SuggestionArbiter {
    state: SelectionState,
    identifier_suggestion: Option<RoleSuggestion>,
    display_name_suggestion: Option<RoleSuggestion>,
    identifier: Option<String>,
    display_name: Option<String>,
    profiles: BTreeMap<String, ColumnProfile>,
}

impl SuggestionArbiter {
    /// Starts arbitration with the default 30-point threshold.
    pub fn new(scores: &[RoleScore], profiles: &[ColumnProfile]) -> Self {
        Self::with_threshold(scores, profiles, DEFAULT_CONFIDENCE_THRESHOLD)
    }

    /// Starts arbitration; a suggestion must score strictly above `threshold`.
    pub fn with_threshold(scores: &[RoleScore], profiles: &[ColumnProfile], threshold: f64) -> Self {
        let best_id = best_singleton(scores, SingletonRole::Identifier)
            .filter(|score| score.score > threshold);
        let best_name = best_singleton(scores, SingletonRole::DisplayName)
            .filter(|score| score.score > threshold)
            .filter(|name| best_id.is_none_or(|id| id.field != name.field));

        let state = if best_id.is_some() && best_name.is_some() {
            SelectionState::AwaitingSuggestionResponse
        } else {
            SelectionState::ManualPick(SingletonRole::Identifier)
        };
        info!(
            identifier = best_id.map(|s| s.field.as_str()),
            display_name = best_name.map(|s| s.field.as_str()),
            state = ?state,
            "column suggestions evaluated"
        );

        Self {
            state,
            identifier_suggestion: best_id.map(RoleScore::to_suggestion),
            display_name_suggestion: best_name.map(RoleScore::to_suggestion),
            identifier: None,
            display_name: None,
            profiles: profiles
                .iter()
                .map(|profile| (profile.name.clone(), profile.clone()))
                .collect(),
        }
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    /// Confident suggestion for a role, if one cleared the threshold.
    pub fn suggestion(&self, role: SingletonRole) -> Option<&RoleSuggestion> {
        match role {
            SingletonRole::Identifier => self.identifier_suggestion.as_ref(),
            SingletonRole::DisplayName => self.display_name_suggestion.as_ref(),
        }
    }

    /// Column currently selected for a role.
    pub fn selection(&self, role: SingletonRole) -> Option<&str> {
        match role {
            SingletonRole::Identifier => self.identifier.as_deref(),
            SingletonRole::DisplayName => self.display_name.as_deref(),
        }
    }

    pub fn resolved_mapping(&self) -> Option<ResolvedMapping> {
        if self.state != SelectionState::Resolved {
            return None;
        }
        Some(ResolvedMapping {
            identifier: self.identifier.clone()?,
            display_name: self.display_name.clone()?,
        })
    }

    pub fn outcome(&self) -> ArbitrationOutcome {
        ArbitrationOutcome {
            state: self.state,
            identifier_suggestion: self.identifier_suggestion.clone(),
            display_name_suggestion: self.display_name_suggestion.clone(),
            resolved: self.resolved_mapping(),
        }
    }

    /// Accepts both pending suggestions and resolves the selection.
    pub fn accept(&mut self) -> Result<Vec<PickFeedback>, SelectionError> {
        if self.state != SelectionState::AwaitingSuggestionResponse {
            return Err(SelectionError::NoPendingSuggestion);
        }
        let (Some(id), Some(name)) = (
            self.identifier_suggestion.clone(),
            self.display_name_suggestion.clone(),
        ) else {
            return Err(SelectionError::NoPendingSuggestion);
        };
        self.identifier = Some(id.field.clone());
        self.display_name = Some(name.field.clone());
        self.state = SelectionState::Resolved;
        info!(identifier = %id.field, display_name = %name.field, "suggestions accepted");
        Ok([
            self.feedback(&id.field, SingletonRole::Identifier),
            self.feedback(&name.field, SingletonRole::DisplayName),
        ]
        .into_iter()
        .flatten()
        .collect())
    }

    /// Declines the pending suggestions and starts manual selection.
    pub fn reject(&mut self) -> Result<(), SelectionError> {
        if self.state != SelectionState::AwaitingSuggestionResponse {
            return Err(SelectionError::NoPendingSuggestion);
        }
        self.state = SelectionState::ManualPick(SingletonRole::Identifier);
        info!("suggestions rejected; manual selection");
        Ok(())
    }

    /// Selects `field` for `role`.
    ///
    /// A field already holding the other singleton role is rejected and the
    /// state does not change. Otherwise the state moves to the role still
    /// missing, or to `Resolved` once both are set.
    pub fn pick(
        &mut self,
        field: &str,
        role: SingletonRole,
    ) -> Result<Option<PickFeedback>, SelectionError> {
        if self.state == SelectionState::AwaitingSuggestionResponse {
            return Err(SelectionError::SuggestionPending);
        }
        if !self.profiles.contains_key(field) {
            return Err(SelectionError::UnknownField(field.to_string()));
        }
        let other = role.other();
        if self.selection(other) == Some(field) {
            return Err(SelectionError::FieldAlreadyBound {
                field: field.to_string(),
                role: other,
            });
        }
        match role {
            SingletonRole::Identifier => self.identifier = Some(field.to_string()),
            SingletonRole::DisplayName => self.display_name = Some(field.to_string()),
        }
        self.state = match (&self.identifier, &self.display_name) {
            (Some(_), Some(_)) => SelectionState::Resolved,
            (None, _) => SelectionState::ManualPick(SingletonRole::Identifier),
            (_, None) => SelectionState::ManualPick(SingletonRole::DisplayName),
        };
        debug!(field = %field, role = ?role, state = ?self.state, "manual pick");
        Ok(self.feedback(field, role))
    }

    fn feedback(&self, field: &str, role: SingletonRole) -> Option<PickFeedback> {
        let profile = self.profiles.get(field)?;
        let (status, message) = match role {
            SingletonRole::Identifier => {
                if profile.is_fully_unique() {
                    (
                        FeedbackStatus::Success,
                        "Good choice! This column has unique values for each row.",
                    )
                } else if profile.has_duplicates() {
                    (
                        FeedbackStatus::Warning,
                        "This column has duplicate values. IDs should be unique.",
                    )
                } else if profile.has_empty() {
                    (
                        FeedbackStatus::Warning,
                        "This column has empty values which may cause issues later.",
                    )
                } else {
                    return None;
                }
            }
            SingletonRole::DisplayName => {
                if profile.has_empty() {
                    (
                        FeedbackStatus::Warning,
                        "This column has empty values. All accounts should have names.",
                    )
                } else {
                    (FeedbackStatus::Success, "Column selected for account names.")
                }
            }
        };
        Some(PickFeedback {
            field: field.to_string(),
            role,
            status,
            message: message.to_string(),
        })
    }
}

/// Starts arbitration over classifier scores with the default threshold.
pub fn arbitrate(scores: &[RoleScore], profiles: &[ColumnProfile]) -> SuggestionArbiter {
    SuggestionArbiter::new(scores, profiles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use acct_model::{Namespace, RoleKind, Signal};

    fn score(field: &str, role: RoleKind, points: f64) -> RoleScore {
        RoleScore::from_signals(
            field,
            role,
            Namespace::Singleton,
            vec![Signal::new("test", points)],
        )
    }

    fn profile(name: &str, values: &[&str]) -> ColumnProfile {
        let uniques: std::collections::BTreeSet<&str> =
            values.iter().copied().filter(|v| !v.is_empty()).collect();
        ColumnProfile {
            name: name.to_string(),
            values: values.iter().map(|v| (*v).to_string()).collect(),
            unique_count: uniques.len(),
            empty_count: values.iter().filter(|v| v.is_empty()).count(),
            row_count: values.len(),
        }
    }

    fn profiles() -> Vec<ColumnProfile> {
        vec![
            profile("id", &["1", "2", "3"]),
            profile("name", &["Acme", "", "Globex"]),
            profile("region", &["EU", "EU", "US"]),
        ]
    }

    #[test]
    fn threshold_is_exclusive() {
        let scores = vec![
            score("id", RoleKind::Identifier, 30.0),
            score("name", RoleKind::DisplayName, 60.0),
        ];
        let arbiter = arbitrate(&scores, &profiles());
        assert_eq!(
            arbiter.state(),
            SelectionState::ManualPick(SingletonRole::Identifier)
        );
        assert!(arbiter.suggestion(SingletonRole::Identifier).is_none());
        assert!(arbiter.suggestion(SingletonRole::DisplayName).is_some());
    }

    #[test]
    fn same_best_field_forces_manual_pick() {
        let scores = vec![
            score("id", RoleKind::Identifier, 80.0),
            score("id", RoleKind::DisplayName, 70.0),
        ];
        let arbiter = arbitrate(&scores, &profiles());
        assert_eq!(
            arbiter.state(),
            SelectionState::ManualPick(SingletonRole::Identifier)
        );
        assert!(arbiter.suggestion(SingletonRole::DisplayName).is_none());
    }

    #[test]
    fn reject_then_manual_flow() {
        let scores = vec![
            score("id", RoleKind::Identifier, 80.0),
            score("name", RoleKind::DisplayName, 70.0),
        ];
        let mut arbiter = arbitrate(&scores, &profiles());
        assert_eq!(arbiter.state(), SelectionState::AwaitingSuggestionResponse);
        assert_eq!(
            arbiter.pick("region", SingletonRole::Identifier),
            Err(SelectionError::SuggestionPending)
        );

        arbiter.reject().unwrap();
        assert_eq!(
            arbiter.state(),
            SelectionState::ManualPick(SingletonRole::Identifier)
        );
        assert_eq!(arbiter.reject(), Err(SelectionError::NoPendingSuggestion));

        let feedback = arbiter
            .pick("region", SingletonRole::Identifier)
            .unwrap()
            .unwrap();
        assert_eq!(feedback.status, FeedbackStatus::Warning);
        assert_eq!(
            feedback.message,
            "This column has duplicate values. IDs should be unique."
        );
        assert_eq!(
            arbiter.state(),
            SelectionState::ManualPick(SingletonRole::DisplayName)
        );

        let feedback = arbiter
            .pick("name", SingletonRole::DisplayName)
            .unwrap()
            .unwrap();
        assert_eq!(feedback.status, FeedbackStatus::Warning);
        assert_eq!(arbiter.state(), SelectionState::Resolved);
        assert_eq!(
            arbiter.resolved_mapping(),
            Some(ResolvedMapping {
                identifier: "region".to_string(),
                display_name: "name".to_string(),
            })
        );
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let mut arbiter = arbitrate(&[], &profiles());
        assert_eq!(
            arbiter.pick("missing", SingletonRole::Identifier),
            Err(SelectionError::UnknownField("missing".to_string()))
        );
        assert!(arbiter.accept().is_err());
    }

    #[test]
    fn display_name_can_be_picked_first() {
        let mut arbiter = arbitrate(&[], &profiles());
        let feedback = arbiter
            .pick("region", SingletonRole::DisplayName)
            .unwrap()
            .unwrap();
        assert_eq!(feedback.message, "Column selected for account names.");
        assert_eq!(
            arbiter.state(),
            SelectionState::ManualPick(SingletonRole::Identifier)
        );
        let feedback = arbiter.pick("id", SingletonRole::Identifier).unwrap().unwrap();
        assert_eq!(feedback.status, FeedbackStatus::Success);
        assert_eq!(arbiter.state(), SelectionState::Resolved);
    }
}
