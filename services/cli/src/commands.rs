use clap::Args;
use serde::Serialize;
use std::path::{Path, PathBuf};
use teamfit::comparisons::ComparisonEngine;
use teamfit::config::AppConfig;
use teamfit::error::AppError;
use teamfit::forms::{FieldType, FormDefinition, FormMetadata};
use teamfit::submission::Submission;
use tracing::info;

#[derive(Args, Debug)]
pub(crate) struct CompareArgs {
    /// JSON file holding the first submission
    #[arg(long)]
    pub(crate) first: PathBuf,
    /// JSON file holding the second submission
    #[arg(long)]
    pub(crate) second: PathBuf,
    /// Form definition CSV (overrides TEAMFIT_FORM_DEFINITION)
    #[arg(long)]
    pub(crate) form_definition: Option<PathBuf>,
    /// Pretty-print the JSON report
    #[arg(long)]
    pub(crate) pretty: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ClassifyArgs {
    /// JSON file holding the submission to inspect
    #[arg(long)]
    pub(crate) submission: PathBuf,
    /// Form definition CSV (overrides TEAMFIT_FORM_DEFINITION)
    #[arg(long)]
    pub(crate) form_definition: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
pub(crate) struct FieldClassification {
    pub(crate) field: String,
    pub(crate) field_type: FieldType,
    pub(crate) label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) ranking_group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) max_rank: Option<u32>,
}

pub(crate) fn run_compare(args: CompareArgs, config: &AppConfig) -> Result<(), AppError> {
    let CompareArgs {
        first,
        second,
        form_definition,
        pretty,
    } = args;

    let metadata = load_metadata(form_definition.as_deref(), config)?;
    let engine = ComparisonEngine::new(metadata);
    let first = read_submission(&first)?;
    let second = read_submission(&second)?;

    let report = engine.compare(&first, &second);
    let rendered = if pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{rendered}");

    Ok(())
}

pub(crate) fn run_classify(args: ClassifyArgs, config: &AppConfig) -> Result<(), AppError> {
    let metadata = load_metadata(args.form_definition.as_deref(), config)?;
    let submission = read_submission(&args.submission)?;
    let engine = ComparisonEngine::new(metadata);

    let classifications = classify_submission(&engine, &submission);
    println!("{}", serde_json::to_string_pretty(&classifications)?);

    Ok(())
}

pub(crate) fn classify_submission(
    engine: &ComparisonEngine,
    submission: &Submission,
) -> Vec<FieldClassification> {
    submission
        .iter()
        .filter(|(_, value)| !value.trim().is_empty())
        .map(|(field, value)| {
            let field_type = engine.classify_field(field, value);
            let ranking = (field_type == FieldType::Ranking)
                .then(|| engine.metadata().ranking_info(field));

            FieldClassification {
                field: field.to_string(),
                field_type,
                label: field_type.label(),
                ranking_group: ranking.map(|info| info.group.to_string()),
                max_rank: ranking.map(|info| info.max_rank),
            }
        })
        .collect()
}

pub(crate) fn load_metadata(
    override_path: Option<&Path>,
    config: &AppConfig,
) -> Result<FormMetadata, AppError> {
    let path = override_path.or(config.forms.definition_path.as_deref());

    let metadata = match path {
        Some(path) => {
            info!(path = %path.display(), "loading form definition");
            FormDefinition::from_path(path)?.to_metadata(config.forms.fallback_max_rank)?
        }
        None => FormMetadata::builder()
            .fallback_max_rank(config.forms.fallback_max_rank)
            .build()
            .map_err(teamfit::forms::FormDefinitionError::from)?,
    };

    info!(
        declared_fields = metadata.declared_fields(),
        fallback_max_rank = metadata.fallback_max_rank(),
        "form metadata ready"
    );
    Ok(metadata)
}

fn read_submission(path: &Path) -> Result<Submission, AppError> {
    let raw = std::fs::read_to_string(path)?;
    Submission::from_json(&raw).map_err(|err| AppError::submission(path.display().to_string(), err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use teamfit::config::{AppEnvironment, FormConfig, TelemetryConfig};

    fn config() -> AppConfig {
        AppConfig {
            environment: AppEnvironment::Test,
            telemetry: TelemetryConfig {
                log_level: "warn".to_string(),
            },
            forms: FormConfig {
                definition_path: None,
                fallback_max_rank: 5,
            },
        }
    }

    #[test]
    fn classify_reports_ranking_groups() {
        let metadata = load_metadata(None, &config()).expect("metadata builds");
        let engine = ComparisonEngine::new(metadata);
        let submission: Submission = [
            ("rank_opposing", "2"),
            ("timing_preference", "1"),
            ("notes", ""),
        ]
        .into_iter()
        .collect();

        let classifications = classify_submission(&engine, &submission);

        assert_eq!(classifications.len(), 2);
        let rank = &classifications[0];
        assert_eq!(rank.field, "rank_opposing");
        assert_eq!(rank.field_type, FieldType::Ranking);
        assert_eq!(rank.ranking_group.as_deref(), Some("unknown_group"));
        assert_eq!(rank.max_rank, Some(5));
        assert_eq!(rank.label, "Ranking");
        assert_eq!(classifications[1].field_type, FieldType::Likert);
        assert_eq!(classifications[1].label, "Likert scale");
        assert!(classifications[1].ranking_group.is_none());
    }

    #[test]
    fn metadata_without_definition_uses_configured_fallback() {
        let metadata = load_metadata(None, &config()).expect("metadata builds");
        assert_eq!(metadata.fallback_max_rank(), 5);
        assert_eq!(metadata.ranking_groups().count(), 0);
    }

    #[test]
    fn missing_form_definition_is_reported() {
        let err = load_metadata(Some(Path::new("/nonexistent/form.csv")), &config())
            .expect_err("missing definition");
        assert!(matches!(err, AppError::FormDefinition(_)));
    }

    #[test]
    fn unreadable_submission_names_its_file() {
        let path = std::env::temp_dir().join("teamfit-cli-broken-submission.json");
        std::fs::write(&path, "[\"not\", \"an\", \"object\"]").expect("fixture written");

        let err = read_submission(&path).expect_err("array root rejected");
        assert!(err.to_string().contains("teamfit-cli-broken-submission.json"));

        std::fs::remove_file(&path).ok();
    }
}
