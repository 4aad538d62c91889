use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::comparisons::{
    ComparisonEngine, ConflictLevel, TextAnalysis, TextAnalysisError, TextAnalyzer,
};
use crate::forms::{FieldType, FormMetadata};
use crate::submission::Submission;

pub(super) fn submission(answers: &[(&str, &str)]) -> Submission {
    answers.iter().copied().collect()
}

pub(super) fn team_metadata() -> FormMetadata {
    FormMetadata::builder()
        .field_type("timing_preference", FieldType::Likert)
        .field_type("working_hours", FieldType::Likert)
        .field_type("professional_goals", FieldType::Text)
        .ranking_group(
            "work_values",
            [
                "rank_values_pay",
                "rank_values_growth",
                "rank_values_team",
                "rank_values_balance",
                "rank_values_impact",
                "rank_values_status",
            ],
        )
        .build()
        .expect("team metadata builds")
}

pub(super) fn alex() -> Submission {
    submission(&[
        ("timing_preference", "1"),
        ("working_hours", "2"),
        ("ocean_openness", "high"),
        ("ocean_conscientiousness", "medium"),
        ("rank_values_pay", "1"),
        ("rank_values_growth", "2"),
        ("rank_values_team", "3"),
        ("rank_values_balance", "4"),
        ("rank_values_impact", "5"),
        ("rank_values_status", "6"),
        ("professional_goals", "I want to become a team lead within two years"),
    ])
}

pub(super) fn jordan() -> Submission {
    submission(&[
        ("timing_preference", "3"),
        ("working_hours", "2"),
        ("ocean_openness", "medium"),
        ("ocean_conscientiousness", "medium"),
        ("rank_values_pay", "6"),
        ("rank_values_growth", "1"),
        ("rank_values_team", "4"),
        ("rank_values_balance", "3"),
        ("rank_values_impact", "5"),
        ("rank_values_status", "2"),
        ("professional_goals", "I want to develop deep technical expertise"),
    ])
}

/// Collaborator returning a fixed level and counting calls.
pub(super) struct ScriptedTextAnalyzer {
    level: ConflictLevel,
    calls: AtomicUsize,
}

impl ScriptedTextAnalyzer {
    pub(super) fn new(level: ConflictLevel) -> Arc<Self> {
        Arc::new(Self {
            level,
            calls: AtomicUsize::new(0),
        })
    }

    pub(super) fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

impl TextAnalyzer for ScriptedTextAnalyzer {
    fn analyze(&self, _first: &str, _second: &str) -> Result<TextAnalysis, TextAnalysisError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        Ok(TextAnalysis::new(
            35,
            self.level,
            "scripted verdict",
            vec!["Career direction".to_string()],
            vec!["Discuss: Career direction".to_string()],
        ))
    }
}

pub(super) fn engine_with_text(level: ConflictLevel) -> (ComparisonEngine, Arc<ScriptedTextAnalyzer>) {
    let analyzer = ScriptedTextAnalyzer::new(level);
    let engine = ComparisonEngine::with_text_analyzer(team_metadata(), analyzer.clone());
    (engine, analyzer)
}
