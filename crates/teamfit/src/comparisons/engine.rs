use std::sync::Arc;

use tracing::{debug, info};

use super::text::{analyze_or_default, TextAnalyzer, UnavailableTextAnalyzer};
use super::{compare_likert, compare_ranking, compare_trait, ComparisonReport, FieldComparison};
use crate::forms::{classify, FieldType, FormMetadata};
use crate::submission::{Submission, SubmissionError};

/// Stateless comparer of two submissions.
///
/// Metadata and the text collaborator are shared read-only, so one engine can serve
/// concurrent comparisons.
#[derive(Clone)]
pub struct ComparisonEngine {
    metadata: Arc<FormMetadata>,
    text_analyzer: Arc<dyn TextAnalyzer>,
}

impl Default for ComparisonEngine {
    fn default() -> Self {
        Self::new(FormMetadata::default())
    }
}

impl std::fmt::Debug for ComparisonEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComparisonEngine")
            .field("metadata", &self.metadata)
            .finish_non_exhaustive()
    }
}

impl ComparisonEngine {
    pub fn new(metadata: FormMetadata) -> Self {
        Self::with_text_analyzer(metadata, Arc::new(UnavailableTextAnalyzer))
    }

    pub fn with_text_analyzer(metadata: FormMetadata, text_analyzer: Arc<dyn TextAnalyzer>) -> Self {
        Self {
            metadata: Arc::new(metadata),
            text_analyzer,
        }
    }

    pub fn metadata(&self) -> &FormMetadata {
        &self.metadata
    }

    pub fn classify_field(&self, field: &str, sample: &str) -> FieldType {
        classify(field, sample, &self.metadata)
    }

    /// Compares the fields answered in both submissions.
    ///
    /// Fields missing from either side, blank answers and unclassifiable fields are
    /// skipped. Malformed answers never fail the comparison.
    pub fn compare(&self, first: &Submission, second: &Submission) -> ComparisonReport {
        let mut report = ComparisonReport::default();
        let mut one_sided = 0usize;

        for field in first.fields() {
            if !second.contains(field) {
                one_sided += 1;
                debug!(field, "skipping field answered in only one submission");
                continue;
            }

            let (Some(value1), Some(value2)) = (first.answer(field), second.answer(field)) else {
                debug!(field, "skipping blank answer");
                continue;
            };

            match self.compare_field(field, value1, value2) {
                Some(comparison) => {
                    debug!(
                        field,
                        assessment = comparison.assessment().label(),
                        "field compared"
                    );
                    report.record(field, comparison);
                }
                None => debug!(field, "skipping unclassified field"),
            }
        }

        one_sided += second.fields().filter(|field| !first.contains(field)).count();

        info!(
            compared = report.compared_fields(),
            one_sided,
            total_conflicts = report.conflict_summary.total_conflicts,
            high_priority_conflicts = report.conflict_summary.high_priority_conflicts,
            "submissions compared"
        );

        report
    }

    /// Decodes two JSON submissions and compares them.
    pub fn compare_json(&self, first: &str, second: &str) -> Result<ComparisonReport, SubmissionError> {
        let first = Submission::from_json(first)?;
        let second = Submission::from_json(second)?;
        Ok(self.compare(&first, &second))
    }

    fn compare_field(&self, field: &str, value1: &str, value2: &str) -> Option<FieldComparison> {
        let comparison = match self.classify_field(field, value1) {
            FieldType::Likert => FieldComparison::Likert(compare_likert(value1, value2)),
            FieldType::Trait => FieldComparison::Trait(compare_trait(value1, value2)),
            FieldType::Ranking => {
                let info = self.metadata.ranking_info(field);
                FieldComparison::Ranking {
                    group: info.group.to_string(),
                    comparison: compare_ranking(value1, value2, info.max_rank),
                }
            }
            FieldType::Text => FieldComparison::Text(analyze_or_default(
                self.text_analyzer.as_ref(),
                value1,
                value2,
            )),
            FieldType::Other => return None,
        };

        Some(comparison)
    }
}
