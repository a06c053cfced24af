//! Rule-based field role scoring.
//!
//! Every point is traceable to a named rule so the caller can show why a
//! field was suggested. Singleton roles (identifier, display name) use an
//! additive point scale; bucket roles use fixed keyword weights.

use std::collections::BTreeMap;

use acct_model::{ColumnProfile, Namespace, RoleKind, RoleScore, Signal, SingletonRole};
use tracing::debug;

use crate::config::ClassifierConfig;
use crate::patterns::{
    ENGAGEMENT_KEYWORDS, ENGAGEMENT_LEADS, ENGAGEMENT_TIME_TOKENS, FEATURE_KEYWORDS,
    FIRMOGRAPHIC_KEYWORDS, FIRMOGRAPHIC_LEADS, IDENTIFIER_BUCKET_TOKENS, IDENTIFIER_TOKENS,
    NAME_TOKENS, ORGANIZATION_TOKENS, TARGET_KEYWORDS, is_date_like, is_id_like, is_name_like,
    is_plain_number,
};
use crate::tokens::HeaderTokens;
use crate::types::BucketSuggestion;

const ID_HEADER_POINTS: f64 = 20.0;
const ID_ACCOUNT_HEADER_POINTS: f64 = 30.0;
const ID_UNIQUENESS_POINTS: f64 = 30.0;
const ID_SHAPE_POINTS: f64 = 10.0;
const ID_EMPTY_PENALTY: f64 = 20.0;

const NAME_HEADER_POINTS: f64 = 20.0;
const NAME_ACCOUNT_HEADER_POINTS: f64 = 30.0;
const NAME_ORGANIZATION_POINTS: f64 = 25.0;
const NAME_UNIQUENESS_POINTS: f64 = 15.0;
const NAME_SHAPE_POINTS: f64 = 15.0;
const NAME_EMPTY_PENALTY: f64 = 15.0;

/// Share of non-empty values that must parse as dates to count as a date column.
const DATE_VALUE_RATIO: f64 = 0.5;

pub const IDENTIFIER_REASON: &str = "Field name suggests a unique identifier";
pub const TARGET_REASON: &str = "Field appears to represent an outcome or status";
pub const ENGAGEMENT_REASON: &str = "Field indicates user interaction or engagement metrics";
pub const FIRMOGRAPHIC_REASON: &str = "Field contains company characteristics or firmographic data";
pub const FEATURE_REASON: &str = "Field contains measurable or categorical data";

/// Scores imported fields for every role they could plausibly hold.
#[derive(Debug, Clone, Default)]
pub struct FieldRoleClassifier {
    config: ClassifierConfig,
}

impl FieldRoleClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Scores each header in order.
    ///
    /// For every field the identifier and display-name scores come first,
    /// followed by one score per matching bucket in precedence order. A
    /// table without headers or without rows yields no scores.
    pub fn classify(&self, profiles: &[ColumnProfile], headers: &[String]) -> Vec<RoleScore> {
        if headers.is_empty() || profiles.iter().all(|p| p.row_count == 0) {
            debug!(headers = headers.len(), "no data to classify");
            return Vec::new();
        }
        let by_name: BTreeMap<&str, &ColumnProfile> =
            profiles.iter().map(|p| (p.name.as_str(), p)).collect();
        let mut scores = Vec::new();
        for header in headers {
            let fallback;
            let profile = match by_name.get(header.as_str()) {
                Some(profile) => *profile,
                None => {
                    fallback = ColumnProfile {
                        name: header.clone(),
                        ..ColumnProfile::default()
                    };
                    &fallback
                }
            };
            let tokens = HeaderTokens::new(header);
            let identifier = self.identifier_score(header, profile, &tokens);
            let display_name = self.display_name_score(header, profile, &tokens);
            debug!(
                field = %header,
                identifier = identifier.score,
                display_name = display_name.score,
                "singleton scores"
            );
            scores.push(identifier);
            scores.push(display_name);
            scores.extend(self.bucket_scores(header, profile, &tokens));
        }
        scores
    }

    fn identifier_score(
        &self,
        field: &str,
        profile: &ColumnProfile,
        tokens: &HeaderTokens,
    ) -> RoleScore {
        let mut signals = Vec::new();
        let names_id = tokens.has_any(&IDENTIFIER_TOKENS);
        if names_id {
            signals.push(Signal::new("Header mentions an identifier", ID_HEADER_POINTS));
        }
        if names_id && tokens.has_any(&["account"]) {
            signals.push(Signal::new(
                "Header names an account identifier",
                ID_ACCOUNT_HEADER_POINTS,
            ));
        }
        let uniqueness = profile.uniqueness_ratio() * ID_UNIQUENESS_POINTS;
        if uniqueness > 0.0 {
            signals.push(Signal::new("Unique values", uniqueness));
        }
        if profile.non_empty_values().any(is_id_like) {
            signals.push(Signal::new("ID-like values", ID_SHAPE_POINTS));
        }
        if profile.has_empty() {
            signals.push(Signal::new(
                "Empty values",
                -profile.empty_ratio() * ID_EMPTY_PENALTY,
            ));
        }
        RoleScore::from_signals(field, RoleKind::Identifier, Namespace::Singleton, signals)
    }

    fn display_name_score(
        &self,
        field: &str,
        profile: &ColumnProfile,
        tokens: &HeaderTokens,
    ) -> RoleScore {
        let mut signals = Vec::new();
        let names_name = tokens.has_any(&NAME_TOKENS);
        if names_name {
            signals.push(Signal::new("Header mentions a name", NAME_HEADER_POINTS));
        }
        if names_name && tokens.has_any(&["account"]) {
            signals.push(Signal::new(
                "Header names an account name",
                NAME_ACCOUNT_HEADER_POINTS,
            ));
        }
        if tokens.has_any(&ORGANIZATION_TOKENS) {
            signals.push(Signal::new(
                "Header mentions a company",
                NAME_ORGANIZATION_POINTS,
            ));
        }
        let ratio = profile.uniqueness_ratio();
        if ratio > 0.5 && ratio < 1.0 {
            signals.push(Signal::new("Mostly unique values", NAME_UNIQUENESS_POINTS));
        }
        if profile.non_empty_values().any(is_name_like) {
            signals.push(Signal::new("Name-like values", NAME_SHAPE_POINTS));
        }
        if profile.has_empty() {
            signals.push(Signal::new(
                "Empty values",
                -profile.empty_ratio() * NAME_EMPTY_PENALTY,
            ));
        }
        RoleScore::from_signals(field, RoleKind::DisplayName, Namespace::Singleton, signals)
    }

    fn bucket_scores(
        &self,
        field: &str,
        profile: &ColumnProfile,
        tokens: &HeaderTokens,
    ) -> Vec<RoleScore> {
        RoleKind::BUCKETS
            .iter()
            .filter_map(|bucket| {
                let (reason, detail) = match_bucket(*bucket, profile, tokens)?;
                let weight = self.config.bucket_weights.get(*bucket)?;
                Some(RoleScore::from_signals(
                    field,
                    *bucket,
                    Namespace::Bucket,
                    vec![Signal::new(reason, weight), Signal::new(detail, 0.0)],
                ))
            })
            .collect()
    }
}

/// Returns the bucket's reason and the specific rule that fired.
fn match_bucket(
    bucket: RoleKind,
    profile: &ColumnProfile,
    tokens: &HeaderTokens,
) -> Option<(&'static str, String)> {
    match bucket {
        RoleKind::Identifier => tokens
            .as_slice()
            .iter()
            .find(|t| IDENTIFIER_BUCKET_TOKENS.contains(&t.as_str()))
            .map(|t| (IDENTIFIER_REASON, format!("Header token '{t}'"))),
        RoleKind::Target => tokens
            .prefix_match(&TARGET_KEYWORDS)
            .map(|k| (TARGET_REASON, format!("Header keyword '{k}'"))),
        RoleKind::Engagement => engagement_rule(profile, tokens).map(|d| (ENGAGEMENT_REASON, d)),
        RoleKind::Firmographic => firmographic_rule(tokens).map(|d| (FIRMOGRAPHIC_REASON, d)),
        RoleKind::Feature => feature_rule(profile, tokens).map(|d| (FEATURE_REASON, d)),
        RoleKind::DisplayName => None,
    }
}

fn engagement_rule(profile: &ColumnProfile, tokens: &HeaderTokens) -> Option<String> {
    if let Some(keyword) = tokens.prefix_match(&ENGAGEMENT_KEYWORDS) {
        return Some(format!("Header keyword '{keyword}'"));
    }
    if tokens.has_any(&ENGAGEMENT_TIME_TOKENS) {
        return Some("Date or time header".to_string());
    }
    if tokens.leads_with(&ENGAGEMENT_LEADS) {
        return Some("Recency or count header".to_string());
    }
    let non_empty = profile.non_empty_values().count();
    let dates = profile.non_empty_values().filter(|v| is_date_like(v)).count();
    if non_empty > 0 && dates as f64 / non_empty as f64 >= DATE_VALUE_RATIO {
        return Some("Date-like values".to_string());
    }
    None
}

fn firmographic_rule(tokens: &HeaderTokens) -> Option<String> {
    if let Some(keyword) = tokens.prefix_match(&FIRMOGRAPHIC_KEYWORDS) {
        return Some(format!("Header keyword '{keyword}'"));
    }
    if tokens.leads_with(&FIRMOGRAPHIC_LEADS) {
        return Some("Company attribute header".to_string());
    }
    if tokens.has_any(&["type"]) && !tokens.has_any(&["data"]) {
        return Some("Account type header".to_string());
    }
    None
}

fn feature_rule(profile: &ColumnProfile, tokens: &HeaderTokens) -> Option<String> {
    if profile.is_numeric() {
        return Some("Numeric values".to_string());
    }
    if profile.first_value().is_some_and(is_plain_number) {
        return Some("Numeric sample value".to_string());
    }
    if let Some(keyword) = tokens.prefix_match(&FEATURE_KEYWORDS) {
        return Some(format!("Header keyword '{keyword}'"));
    }
    if profile.non_empty_values().any(|v| v.ends_with('%')) {
        return Some("Percentage values".to_string());
    }
    None
}

/// Classifies with the default configuration.
pub fn classify(profiles: &[ColumnProfile], headers: &[String]) -> Vec<RoleScore> {
    FieldRoleClassifier::default().classify(profiles, headers)
}

/// Highest-scoring field for a singleton role; ties keep the earliest field.
pub fn best_singleton(scores: &[RoleScore], role: SingletonRole) -> Option<&RoleScore> {
    let role = RoleKind::from(role);
    scores
        .iter()
        .filter(|s| s.namespace == Namespace::Singleton && s.role == role)
        .fold(None, |best: Option<&RoleScore>, current| match best {
            Some(best) if current.score <= best.score => Some(best),
            _ => Some(current),
        })
}

/// One bucket suggestion per field, in field order.
///
/// When several buckets match a field the earliest in
/// [`RoleKind::BUCKETS`] wins.
pub fn bucket_suggestions(scores: &[RoleScore]) -> Vec<BucketSuggestion> {
    let mut order: Vec<&str> = Vec::new();
    let mut best: BTreeMap<&str, &RoleScore> = BTreeMap::new();
    for score in scores.iter().filter(|s| s.namespace == Namespace::Bucket) {
        let rank = precedence(score.role);
        match best.get(score.field.as_str()) {
            Some(existing) if precedence(existing.role) <= rank => {}
            Some(_) => {
                best.insert(score.field.as_str(), score);
            }
            None => {
                order.push(score.field.as_str());
                best.insert(score.field.as_str(), score);
            }
        }
    }
    order
        .into_iter()
        .filter_map(|field| best.get(field))
        .map(|score| BucketSuggestion {
            field: score.field.clone(),
            bucket: score.role,
            confidence: score.confidence(),
            reason: score
                .signals
                .first()
                .map(|s| s.name.clone())
                .unwrap_or_default(),
        })
        .collect()
}

fn precedence(role: RoleKind) -> usize {
    RoleKind::BUCKETS
        .iter()
        .position(|bucket| *bucket == role)
        .unwrap_or(RoleKind::BUCKETS.len())
}
