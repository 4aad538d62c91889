//! Field analyzers and the engine that turns two submissions into a report.

mod engine;
mod likert;
mod ranking;
mod report;
mod text;
mod traits;

#[cfg(test)]
mod tests;

pub use engine::ComparisonEngine;
pub use likert::{compare_likert, LikertComparison};
pub use ranking::{assess_ranks, compare_ranking, RankingComparison, RankingTier};
pub use report::{
    ComparisonReport, ConflictEntry, ConflictKind, ConflictSummary, OverallAssessment,
};
pub use text::{
    analyze_or_default, ConflictLevel, TextAnalysis, TextAnalysisError, TextAnalyzer,
    UnavailableTextAnalyzer,
};
pub use traits::{compare_trait, TraitComparison};

use serde::{Deserialize, Serialize};

/// Three-state verdict attached to every compared field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Assessment {
    Aligned,
    Discuss,
    HighPriority,
}

impl Assessment {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Aligned => "aligned",
            Self::Discuss => "discuss",
            Self::HighPriority => "high_priority",
        }
    }

    pub const fn is_conflict(self) -> bool {
        !matches!(self, Self::Aligned)
    }
}

/// Answer that could not be read on its scale. Analyzers fold it into an aligned result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScaleError {
    #[error("invalid Likert scale value '{0}' (expected 1, 2 or 3)")]
    Likert(String),
    #[error("invalid trait value '{0}' (expected low, medium or high)")]
    Trait(String),
    #[error("invalid ranking value '{0}' (expected a rank starting at 1)")]
    Ranking(String),
}

/// Only the two ends of a three-point scale are worth a conversation.
fn assess_three_point(difference: u8) -> Assessment {
    if difference >= 2 {
        Assessment::Discuss
    } else {
        Assessment::Aligned
    }
}

/// Result for one field, tagged by how the field was compared.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldComparison {
    Likert(LikertComparison),
    Ranking {
        group: String,
        comparison: RankingComparison,
    },
    Trait(TraitComparison),
    Text(TextAnalysis),
}

impl FieldComparison {
    pub fn assessment(&self) -> Assessment {
        match self {
            Self::Likert(result) => result.assessment,
            Self::Ranking { comparison, .. } => comparison.assessment,
            Self::Trait(result) => result.assessment,
            Self::Text(analysis) => analysis.assessment,
        }
    }

    /// Conflict area for the summary, or `None` when the field is aligned.
    pub fn conflict_entry(&self, field: &str) -> Option<ConflictEntry> {
        let entry = match self {
            Self::Likert(result) if result.assessment.is_conflict() => {
                ConflictEntry::new(ConflictKind::Likert, field).with_difference(result.difference)
            }
            Self::Trait(result) if result.assessment.is_conflict() => {
                ConflictEntry::new(ConflictKind::Trait, field).with_difference(result.difference)
            }
            Self::Ranking { group, comparison } if comparison.assessment.is_conflict() => {
                let mut entry = ConflictEntry::new(ConflictKind::Ranking, field)
                    .with_difference(comparison.difference)
                    .with_group(group);
                entry.is_high_priority = comparison.assessment == Assessment::HighPriority;
                entry
            }
            Self::Text(analysis) if analysis.has_conflicts => {
                ConflictEntry::new(ConflictKind::FreeText, field)
                    .with_conflict_level(analysis.conflict_level)
            }
            _ => return None,
        };

        Some(entry)
    }
}
