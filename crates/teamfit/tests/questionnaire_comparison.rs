use std::sync::Arc;

use teamfit::comparisons::{
    Assessment, ComparisonEngine, ConflictKind, ConflictLevel, OverallAssessment, TextAnalysis,
    TextAnalysisError, TextAnalyzer,
};
use teamfit::forms::{FieldType, FormDefinition, FormMetadata};
use teamfit::submission::Submission;

const TEAM_FORM: &str = include_str!("fixtures/team_form.csv");
const ALEX: &str = include_str!("fixtures/alex.json");
const JORDAN: &str = include_str!("fixtures/jordan.json");

fn team_metadata() -> FormMetadata {
    FormDefinition::from_reader(TEAM_FORM.as_bytes())
        .expect("form definition parses")
        .to_metadata(4)
        .expect("metadata builds")
}

struct ModelReplyAnalyzer(&'static str);

impl TextAnalyzer for ModelReplyAnalyzer {
    fn analyze(&self, _first: &str, _second: &str) -> Result<TextAnalysis, TextAnalysisError> {
        TextAnalysis::parse_model_response(self.0)
    }
}

#[test]
fn form_definition_drives_classification() {
    let engine = ComparisonEngine::new(team_metadata());

    assert_eq!(engine.classify_field("feedback_style", "3"), FieldType::Likert);
    assert_eq!(engine.classify_field("meeting_load", "medium"), FieldType::Trait);
    assert_eq!(engine.classify_field("professional_goals", "Lead"), FieldType::Text);
    assert_eq!(engine.classify_field("display_name", "Alex"), FieldType::Other);

    let groups: Vec<(String, u32)> = engine
        .metadata()
        .ranking_groups()
        .map(|group| (group.name.clone(), group.max_rank))
        .collect();
    assert_eq!(
        groups,
        vec![("work_values".to_string(), 4), ("conflict".to_string(), 3)]
    );
}

#[test]
fn full_questionnaire_comparison() {
    let engine = ComparisonEngine::new(team_metadata());
    let report = engine.compare_json(ALEX, JORDAN).expect("submissions decode");

    // timing 1 vs 3, extraversion low vs high, pay 1 vs 4, conflict avoid/compete inverted
    let flagged: Vec<&str> = report
        .conflict_summary
        .conflict_areas
        .iter()
        .map(|entry| entry.field.as_str())
        .collect();
    assert_eq!(
        flagged,
        vec![
            "ocean_extraversion",
            "rank_conflict_avoid",
            "rank_conflict_compete",
            "rank_values_pay",
            "timing_preference",
        ]
    );
    assert_eq!(report.conflict_summary.high_priority_conflicts, 3);
    assert_eq!(
        report.overall_assessment(),
        OverallAssessment::HighPotential
    );

    assert_eq!(
        report.likert_scales["feedback_style"].assessment,
        Assessment::Aligned
    );
    assert_eq!(report.traits["ocean_openness"].difference, Some(0));
    assert!(!report.traits.contains_key("meeting_load"));
    assert!(!report.likert_scales.contains_key("display_name"));
    assert_eq!(report.rankings["work_values"].len(), 4);
    assert_eq!(report.rankings["conflict"].len(), 3);

    let pay = report
        .conflicts_for("rank_values_pay")
        .next()
        .expect("pay flagged");
    assert_eq!(pay.kind, ConflictKind::Ranking);
    assert_eq!(pay.group.as_deref(), Some("work_values"));
    assert_eq!(pay.difference, Some(3));
    assert!(pay.is_high_priority);

    assert!(report.conflicts_for("pronoun_note").next().is_none());
    assert!(report.conflicts_for("favourite_tool").next().is_none());
}

#[test]
fn model_replies_flow_into_the_report() {
    let analyzer = Arc::new(ModelReplyAnalyzer(
        r#"```json
{"similarity_score": 30, "conflict_level": "medium", "explanation": "Management versus craft",
 "potential_conflicts": ["Career track"], "discussion_recommendations": ["Discuss: Mentoring split"]}
```"#,
    ));
    let engine = ComparisonEngine::with_text_analyzer(team_metadata(), analyzer);
    let first = Submission::from_json(ALEX).expect("alex decodes");
    let second = Submission::from_json(JORDAN).expect("jordan decodes");

    let report = engine.compare(&first, &second);

    let goals = &report.free_text["professional_goals"];
    assert_eq!(goals.conflict_level, ConflictLevel::Medium);
    assert_eq!(goals.similarity_score, 30);
    assert_eq!(
        goals.discussion_points,
        vec![
            "Career track".to_string(),
            "Discuss: Mentoring split".to_string()
        ]
    );
    let entry = report
        .conflicts_for("professional_goals")
        .next()
        .expect("text conflict recorded");
    assert_eq!(entry.kind, ConflictKind::FreeText);
    assert_eq!(report.conflict_summary.total_conflicts, 6);
}

#[test]
fn broken_model_replies_degrade_to_no_conflict() {
    let engine = ComparisonEngine::with_text_analyzer(
        team_metadata(),
        Arc::new(ModelReplyAnalyzer("I'm sorry, I can't help with that")),
    );

    let report = engine.compare_json(ALEX, JORDAN).expect("submissions decode");

    let goals = &report.free_text["professional_goals"];
    assert!(!goals.has_conflicts);
    assert!(goals.error.is_some());
    assert_eq!(report.conflict_summary.total_conflicts, 5);
}

#[test]
fn comparisons_share_one_engine_across_threads() {
    let engine = ComparisonEngine::new(team_metadata());
    let first = Submission::from_json(ALEX).expect("alex decodes");
    let second = Submission::from_json(JORDAN).expect("jordan decodes");
    let expected = engine.compare(&first, &second);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let engine = engine.clone();
            let first = first.clone();
            let second = second.clone();
            std::thread::spawn(move || engine.compare(&first, &second))
        })
        .collect();

    for handle in handles {
        let report = handle.join().expect("comparison thread completes");
        assert_eq!(report, expected);
    }
}
