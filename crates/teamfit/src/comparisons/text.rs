//! Boundary to the external free-text similarity collaborator.
//!
//! The engine never judges prose itself. It hands both answers to a [`TextAnalyzer`] and
//! folds every failure into a no-conflict [`TextAnalysis`].

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::Assessment;

const FALLBACK_RECOMMENDATION: &str = "Discuss: Team members' work styles and expectations";

/// Severity reported by the collaborator for a pair of answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictLevel {
    None,
    Low,
    Medium,
    High,
}

impl ConflictLevel {
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "none" => Some(Self::None),
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }

    pub const fn is_conflict(self) -> bool {
        !matches!(self, Self::None)
    }

    pub const fn assessment(self) -> Assessment {
        match self {
            Self::None => Assessment::Aligned,
            Self::Low | Self::Medium => Assessment::Discuss,
            Self::High => Assessment::HighPriority,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TextAnalysisError {
    #[error("text analysis unavailable: {0}")]
    Unavailable(String),
    #[error("text analysis returned an unreadable response: {0}")]
    InvalidResponse(#[from] serde_json::Error),
}

/// Collaborator comparing two free-text answers.
pub trait TextAnalyzer: Send + Sync {
    fn analyze(&self, first: &str, second: &str) -> Result<TextAnalysis, TextAnalysisError>;
}

/// Default collaborator when no model is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableTextAnalyzer;

impl TextAnalyzer for UnavailableTextAnalyzer {
    fn analyze(&self, _first: &str, _second: &str) -> Result<TextAnalysis, TextAnalysisError> {
        Err(TextAnalysisError::Unavailable(
            "no text-analysis model configured".to_string(),
        ))
    }
}

/// Similarity verdict for two free-text answers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextAnalysis {
    pub similarity_score: u8,
    pub conflict_level: ConflictLevel,
    pub has_conflicts: bool,
    pub assessment: Assessment,
    pub explanation: String,
    pub discussion_points: Vec<String>,
    pub recommendations: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TextAnalysis {
    /// Builds a result whose conflict flag and assessment follow `conflict_level`.
    pub fn new(
        similarity_score: u8,
        conflict_level: ConflictLevel,
        explanation: impl Into<String>,
        discussion_points: Vec<String>,
        recommendations: Vec<String>,
    ) -> Self {
        Self {
            similarity_score: similarity_score.min(100),
            conflict_level,
            has_conflicts: conflict_level.is_conflict(),
            assessment: conflict_level.assessment(),
            explanation: explanation.into(),
            discussion_points,
            recommendations,
            error: None,
        }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        let mut analysis = Self::new(
            50,
            ConflictLevel::None,
            "Could not complete analysis because the text-analysis service failed",
            Vec::new(),
            vec![FALLBACK_RECOMMENDATION.to_string()],
        );
        analysis.error = Some(reason.into());
        analysis
    }

    fn both_empty() -> Self {
        Self::new(
            100,
            ConflictLevel::None,
            "Both responses are empty",
            Vec::new(),
            Vec::new(),
        )
    }

    fn one_empty() -> Self {
        Self::new(
            0,
            ConflictLevel::Medium,
            "One person answered while the other did not, which may indicate different engagement levels",
            vec!["One response is empty while the other has content".to_string()],
            vec!["Discuss: Expectations around participation and sharing perspectives".to_string()],
        )
    }

    /// Decodes the JSON reply of a generative model.
    ///
    /// Replies are often wrapped in markdown fences; those are stripped before parsing.
    /// Recommendations are merged into the discussion points.
    pub fn parse_model_response(raw: &str) -> Result<Self, TextAnalysisError> {
        let cleaned = raw.trim_matches(|c: char| c == '`' || c.is_whitespace());
        let cleaned = cleaned.strip_prefix("json").unwrap_or(cleaned).trim();

        let reply: ModelReply = serde_json::from_str(cleaned)?;
        let conflict_level = reply
            .conflict_level
            .as_deref()
            .and_then(ConflictLevel::from_label)
            .unwrap_or(ConflictLevel::None);

        let recommendations = reply.discussion_recommendations.unwrap_or_default();
        let mut discussion_points = reply.potential_conflicts.unwrap_or_default();
        for recommendation in &recommendations {
            if !discussion_points.contains(recommendation) {
                discussion_points.push(recommendation.clone());
            }
        }

        let similarity_score = reply
            .similarity_score
            .unwrap_or(NEUTRAL_SIMILARITY)
            .clamp(0.0, 100.0)
            .round() as u8;

        Ok(Self::new(
            similarity_score,
            conflict_level,
            reply.explanation.unwrap_or_default(),
            discussion_points,
            recommendations,
        ))
    }

    /// Re-derives the flag and assessment so a collaborator cannot report them inconsistently.
    fn normalized(mut self) -> Self {
        self.has_conflicts = self.conflict_level.is_conflict();
        self.assessment = self.conflict_level.assessment();
        self.similarity_score = self.similarity_score.min(100);
        self
    }
}

const NEUTRAL_SIMILARITY: f64 = 50.0;

/// Every field may be missing or `null`.
#[derive(Debug, Deserialize)]
struct ModelReply {
    #[serde(default)]
    similarity_score: Option<f64>,
    #[serde(default)]
    conflict_level: Option<String>,
    #[serde(default)]
    explanation: Option<String>,
    #[serde(default)]
    potential_conflicts: Option<Vec<String>>,
    #[serde(default)]
    discussion_recommendations: Option<Vec<String>>,
}

/// Runs the collaborator, never letting its failure escape.
pub fn analyze_or_default(analyzer: &dyn TextAnalyzer, first: &str, second: &str) -> TextAnalysis {
    let first_empty = first.trim().is_empty();
    let second_empty = second.trim().is_empty();

    if first_empty && second_empty {
        return TextAnalysis::both_empty();
    }
    if first_empty || second_empty {
        return TextAnalysis::one_empty();
    }

    match analyzer.analyze(first, second) {
        Ok(analysis) => analysis.normalized(),
        Err(err) => {
            warn!(error = %err, "text analysis failed; treating answers as aligned");
            TextAnalysis::unavailable(err.to_string())
        }
    }
}
