use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::{debug, info, info_span, warn};

use acct_ingest::{
    IngestOptions, load_accounts_table, profile, quality_warnings, read_raw_table_with_options,
};
use acct_map::{
    ClassifierConfig, FeedbackStatus, FieldRoleClassifier, PickFeedback, ResolvedMapping,
    SelectionState, SuggestionArbiter, best_singleton, bucket_suggestions,
};
use acct_model::{RawTable, SingletonRole, WeightSet};
use acct_score::{
    Scenario, ScoringEngine, TierSummary, all_scored, export_rows, validate_weights,
    write_export_file,
};

use crate::logging::redact_value;
use crate::types::{ClassifyReport, ScoreReport, WeightsReport};

/// Loads classifier settings, falling back to defaults without a file.
pub fn load_classifier_config(path: Option<&Path>) -> Result<ClassifierConfig> {
    let Some(path) = path else {
        return Ok(ClassifierConfig::default());
    };
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    ClassifierConfig::from_json(&raw)
        .with_context(|| format!("parse classifier config {}", path.display()))
}

pub fn run_classify(file: &Path, config: &ClassifierConfig) -> Result<ClassifyReport> {
    let span = info_span!("classify", file = %file.display());
    let _guard = span.enter();

    let options = IngestOptions::default().with_row_limit(config.sample_rows);
    let table = read_raw_table_with_options(file, options)
        .with_context(|| format!("load {}", file.display()))?;
    let profiles = profile(&table);
    let scores = FieldRoleClassifier::new(*config).classify(&profiles, &table.headers);
    let arbiter =
        SuggestionArbiter::with_threshold(&scores, &profiles, config.confidence_threshold);
    let buckets = bucket_suggestions(&scores);
    let warnings = quality_warnings(&profiles);
    info!(
        headers = table.headers.len(),
        rows = table.row_count(),
        buckets = buckets.len(),
        warnings = warnings.len(),
        "classification complete"
    );

    Ok(ClassifyReport {
        file: file.to_path_buf(),
        headers: table.headers.clone(),
        sampled_rows: table.row_count(),
        outcome: arbiter.outcome(),
        best_identifier: best_singleton(&scores, SingletonRole::Identifier).cloned(),
        best_display_name: best_singleton(&scores, SingletonRole::DisplayName).cloned(),
        bucket_suggestions: buckets,
        warnings,
    })
}

/// Settles the identifier and name columns for scoring.
///
/// Without overrides, confident suggestions are accepted. Overrides reject
/// the suggestions and pick the columns by hand; a role without an override
/// keeps its suggestion.
pub fn resolve_mapping(
    table: &RawTable,
    scenario: &Scenario,
    config: &ClassifierConfig,
) -> Result<(ResolvedMapping, Vec<PickFeedback>)> {
    let sample = table.sampled(config.sample_rows);
    let profiles = profile(&sample);
    let scores = FieldRoleClassifier::new(*config).classify(&profiles, &sample.headers);
    let mut arbiter =
        SuggestionArbiter::with_threshold(&scores, &profiles, config.confidence_threshold);

    let overridden = scenario.id_column.is_some() || scenario.name_column.is_some();
    let feedback = if !overridden && arbiter.state() == SelectionState::AwaitingSuggestionResponse
    {
        arbiter.accept()?
    } else {
        if arbiter.state() == SelectionState::AwaitingSuggestionResponse {
            arbiter.reject()?;
        }
        let identifier = scenario.id_column.clone().or_else(|| {
            arbiter
                .suggestion(SingletonRole::Identifier)
                .map(|s| s.field.clone())
        });
        let display_name = scenario.name_column.clone().or_else(|| {
            arbiter
                .suggestion(SingletonRole::DisplayName)
                .map(|s| s.field.clone())
        });
        let (Some(identifier), Some(display_name)) = (identifier, display_name) else {
            bail!(
                "could not detect the account ID and name columns with confidence; \
                 set \"id_column\" and \"name_column\" in the scenario"
            );
        };
        let mut feedback = Vec::new();
        feedback.extend(arbiter.pick(&identifier, SingletonRole::Identifier)?);
        feedback.extend(arbiter.pick(&display_name, SingletonRole::DisplayName)?);
        feedback
    };

    for item in &feedback {
        match item.status {
            FeedbackStatus::Warning => {
                warn!(field = %item.field, role = %item.role, "{}", item.message);
            }
            FeedbackStatus::Success => {
                debug!(field = %item.field, role = %item.role, "{}", item.message);
            }
        }
    }
    let mapping = arbiter
        .resolved_mapping()
        .context("account ID and name columns are unresolved")?;
    Ok((mapping, feedback))
}

pub fn run_score(
    file: &Path,
    scenario_path: &Path,
    output: Option<&Path>,
    config: &ClassifierConfig,
) -> Result<ScoreReport> {
    let span = info_span!("score", file = %file.display());
    let _guard = span.enter();

    let raw = fs::read_to_string(scenario_path)
        .with_context(|| format!("read {}", scenario_path.display()))?;
    let scenario = Scenario::from_json(&raw)
        .with_context(|| format!("load scenario {}", scenario_path.display()))?;
    let table = load_accounts_table(file).with_context(|| format!("load {}", file.display()))?;

    let (mapping, feedback) = resolve_mapping(&table, &scenario, config)?;
    info!(
        identifier = %mapping.identifier,
        display_name = %mapping.display_name,
        "account columns resolved"
    );
    let mut accounts =
        scenario.build_accounts(&table, &mapping.identifier, &mapping.display_name)?;
    scenario.apply_levels(&mut accounts)?;

    let results = ScoringEngine::new(&scenario.criteria).score_all(&accounts);
    for result in &results {
        debug!(
            account = redact_value(&result.account_id),
            total = result.total_score,
            tier = %result.tier,
            "account scored"
        );
    }
    let summary = TierSummary::from_results(&results);
    let fully_scored = all_scored(&accounts);
    if !fully_scored {
        warn!("some accounts have unscored criteria; they count as 0");
    }
    let weights = scenario.weights.as_ref().map(validate_weights);

    let export_path = output.map_or_else(|| default_export_path(file), Path::to_path_buf);
    write_export_file(&export_path, &accounts, &scenario.criteria)?;

    Ok(ScoreReport {
        scenario: scenario.name.clone(),
        mapping,
        feedback,
        criteria: scenario
            .criteria
            .iter()
            .map(|criterion| criterion.label.clone())
            .collect(),
        rows: export_rows(&accounts, &scenario.criteria),
        summary,
        all_scored: fully_scored,
        weights,
        export_path,
    })
}

/// `<dir>/<stem>-scores.csv` beside the input file.
pub fn default_export_path(file: &Path) -> PathBuf {
    let stem = file
        .file_stem()
        .map_or_else(|| "accounts".to_string(), |stem| stem.to_string_lossy().into_owned());
    file.with_file_name(format!("{stem}-scores.csv"))
}

/// Parses `CATEGORY=PERCENT`; a trailing `%` is accepted.
pub fn parse_weight(arg: &str) -> Result<(String, f64)> {
    let (category, value) = arg
        .split_once('=')
        .with_context(|| format!("expected CATEGORY=PERCENT, got '{arg}'"))?;
    let category = category.trim();
    if category.is_empty() {
        bail!("missing category in '{arg}'");
    }
    let value = value.trim();
    let percent: f64 = value
        .trim_end_matches('%')
        .parse()
        .with_context(|| format!("'{value}' is not a percentage"))?;
    Ok((category.to_string(), percent))
}

pub fn run_weights(args: &[String]) -> Result<WeightsReport> {
    let pairs = args
        .iter()
        .map(|arg| parse_weight(arg))
        .collect::<Result<Vec<_>>>()?;
    let mut categories = BTreeSet::new();
    for (category, _) in &pairs {
        if !categories.insert(category.as_str()) {
            bail!("category '{category}' is given more than once");
        }
    }
    let weights = WeightSet::from_floats(pairs)?;
    let validation = validate_weights(&weights);
    Ok(WeightsReport {
        weights,
        validation,
    })
}
