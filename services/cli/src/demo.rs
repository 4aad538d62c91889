use clap::Args;
use teamfit::comparisons::{Assessment, ComparisonEngine, ComparisonReport, ConflictKind};
use teamfit::error::AppError;
use teamfit::forms::{FieldType, FormMetadata};
use teamfit::submission::Submission;

const SAMPLE_FIRST: &[(&str, &str)] = &[
    ("timing_preference", "1"),
    ("working_hours", "2"),
    ("ocean_openness", "high"),
    ("ocean_agreeableness", "low"),
    ("rank_priorities_quality", "1"),
    ("rank_priorities_speed", "2"),
    ("rank_priorities_cost", "3"),
    ("rank_priorities_learning", "4"),
    ("rank_priorities_visibility", "5"),
    ("professional_goals", "I want to become a team lead within two years"),
];

const SAMPLE_SECOND: &[(&str, &str)] = &[
    ("timing_preference", "3"),
    ("working_hours", "2"),
    ("ocean_openness", "medium"),
    ("ocean_agreeableness", "high"),
    ("rank_priorities_quality", "5"),
    ("rank_priorities_speed", "1"),
    ("rank_priorities_cost", "2"),
    ("rank_priorities_learning", "3"),
    ("rank_priorities_visibility", "4"),
    ("professional_goals", "I want to develop deep technical expertise"),
];

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Print the full JSON report after the digest
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let engine = ComparisonEngine::new(sample_metadata()?);
    let first: Submission = SAMPLE_FIRST.iter().copied().collect();
    let second: Submission = SAMPLE_SECOND.iter().copied().collect();

    let report = engine.compare(&first, &second);
    for line in digest(&report) {
        println!("{line}");
    }

    if args.json {
        println!("\n{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(())
}

fn sample_metadata() -> Result<FormMetadata, AppError> {
    FormMetadata::builder()
        .field_type("professional_goals", FieldType::Text)
        .ranking_group(
            "priorities",
            SAMPLE_FIRST
                .iter()
                .map(|(field, _)| *field)
                .filter(|field| field.starts_with("rank_priorities_")),
        )
        .build()
        .map_err(|err| AppError::FormDefinition(err.into()))
}

pub(crate) fn digest(report: &ComparisonReport) -> Vec<String> {
    let summary = &report.conflict_summary;
    let mut lines = vec![
        "Team fit comparison".to_string(),
        format!("Fields compared: {}", report.compared_fields()),
        format!(
            "Conflicts: {} ({} high priority)",
            summary.total_conflicts, summary.high_priority_conflicts
        ),
        format!("Overall: {}", summary.overall_assessment.label()),
    ];

    if !report.has_conflicts() {
        lines.push("\nNothing to discuss".to_string());
        return lines;
    }

    lines.push("\nTopics to discuss".to_string());
    for entry in &summary.conflict_areas {
        let kind = match entry.kind {
            ConflictKind::Likert => "scale",
            ConflictKind::Ranking => "ranking",
            ConflictKind::Trait => "trait",
            ConflictKind::FreeText => "free text",
        };
        let priority = if entry.is_high_priority {
            " [high priority]"
        } else {
            ""
        };
        let group = entry
            .group
            .as_deref()
            .map(|group| format!(" in {group}"))
            .unwrap_or_default();
        lines.push(format!("- {} ({kind}{group}){priority}", entry.field));
    }

    let aligned_rankings = report
        .rankings
        .values()
        .flat_map(|group| group.values())
        .filter(|result| result.assessment == Assessment::Aligned)
        .count();
    lines.push(format!("\nAligned ranking answers: {aligned_rankings}"));

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_comparison_surfaces_expected_topics() {
        let engine = ComparisonEngine::new(sample_metadata().expect("sample metadata"));
        let first: Submission = SAMPLE_FIRST.iter().copied().collect();
        let second: Submission = SAMPLE_SECOND.iter().copied().collect();

        let report = engine.compare(&first, &second);
        let lines = digest(&report);

        assert!(lines
            .iter()
            .any(|line| line == "- rank_priorities_quality (ranking in priorities) [high priority]"));
        assert!(lines
            .iter()
            .any(|line| line == "- timing_preference (scale)"));
        assert!(lines
            .iter()
            .any(|line| line == "- ocean_agreeableness (trait)"));
        assert!(lines
            .iter()
            .any(|line| line == "Overall: High potential for conflict in key areas"));
    }

    #[test]
    fn identical_samples_have_nothing_to_discuss() {
        let engine = ComparisonEngine::new(sample_metadata().expect("sample metadata"));
        let first: Submission = SAMPLE_FIRST.iter().copied().collect();

        let lines = digest(&engine.compare(&first, &first));

        assert!(lines.iter().any(|line| line == "Overall: Highly compatible"));
        assert_eq!(lines.last().map(String::as_str), Some("\nNothing to discuss"));
    }
}
