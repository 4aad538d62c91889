use std::collections::BTreeMap;

use serde::Serialize;

use super::{
    ConflictLevel, FieldComparison, LikertComparison, RankingComparison, TextAnalysis,
    TraitComparison,
};

const MODERATE_CONFLICT_THRESHOLD: usize = 5;

/// Which analyzer produced a conflict area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictKind {
    Likert,
    Ranking,
    Trait,
    FreeText,
}

/// A field the two respondents should talk about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConflictEntry {
    #[serde(rename = "type")]
    pub kind: ConflictKind,
    pub field: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difference: Option<u32>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_high_priority: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conflict_level: Option<ConflictLevel>,
}

impl ConflictEntry {
    pub fn new(kind: ConflictKind, field: impl Into<String>) -> Self {
        Self {
            kind,
            field: field.into(),
            group: None,
            difference: None,
            is_high_priority: false,
            conflict_level: None,
        }
    }

    pub fn with_difference<D: Into<u32>>(mut self, difference: Option<D>) -> Self {
        self.difference = difference.map(Into::into);
        self
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn with_conflict_level(mut self, level: ConflictLevel) -> Self {
        self.conflict_level = Some(level);
        self
    }
}

/// Qualitative verdict derived from the conflict counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum OverallAssessment {
    #[serde(rename = "High potential for conflict in key areas")]
    HighPotential,
    #[serde(rename = "Moderate potential for conflict")]
    Moderate,
    #[serde(rename = "Some areas of potential difference")]
    SomeDifferences,
    #[serde(rename = "Highly compatible")]
    HighlyCompatible,
}

impl OverallAssessment {
    pub fn from_counts(total_conflicts: usize, high_priority_conflicts: usize) -> Self {
        if high_priority_conflicts > 0 {
            Self::HighPotential
        } else if total_conflicts > MODERATE_CONFLICT_THRESHOLD {
            Self::Moderate
        } else if total_conflicts > 0 {
            Self::SomeDifferences
        } else {
            Self::HighlyCompatible
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::HighPotential => "High potential for conflict in key areas",
            Self::Moderate => "Moderate potential for conflict",
            Self::SomeDifferences => "Some areas of potential difference",
            Self::HighlyCompatible => "Highly compatible",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConflictSummary {
    pub total_conflicts: usize,
    pub high_priority_conflicts: usize,
    pub conflict_areas: Vec<ConflictEntry>,
    pub overall_assessment: OverallAssessment,
}

impl Default for ConflictSummary {
    fn default() -> Self {
        Self {
            total_conflicts: 0,
            high_priority_conflicts: 0,
            conflict_areas: Vec::new(),
            overall_assessment: OverallAssessment::HighlyCompatible,
        }
    }
}

impl ConflictSummary {
    fn push(&mut self, entry: ConflictEntry) {
        self.total_conflicts += 1;
        if entry.kind == ConflictKind::Ranking && entry.is_high_priority {
            self.high_priority_conflicts += 1;
        }
        self.conflict_areas.push(entry);
        self.overall_assessment =
            OverallAssessment::from_counts(self.total_conflicts, self.high_priority_conflicts);
    }
}

/// Everything learned from comparing two submissions, bucketed by field kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ComparisonReport {
    pub likert_scales: BTreeMap<String, LikertComparison>,
    /// Keyed by ranking group, then field.
    pub rankings: BTreeMap<String, BTreeMap<String, RankingComparison>>,
    pub traits: BTreeMap<String, TraitComparison>,
    pub free_text: BTreeMap<String, TextAnalysis>,
    pub conflict_summary: ConflictSummary,
}

impl ComparisonReport {
    pub(crate) fn record(&mut self, field: &str, comparison: FieldComparison) {
        if let Some(entry) = comparison.conflict_entry(field) {
            self.conflict_summary.push(entry);
        }

        let field = field.to_string();
        match comparison {
            FieldComparison::Likert(result) => {
                self.likert_scales.insert(field, result);
            }
            FieldComparison::Ranking { group, comparison } => {
                self.rankings
                    .entry(group)
                    .or_default()
                    .insert(field, comparison);
            }
            FieldComparison::Trait(result) => {
                self.traits.insert(field, result);
            }
            FieldComparison::Text(analysis) => {
                self.free_text.insert(field, analysis);
            }
        }
    }

    pub fn compared_fields(&self) -> usize {
        self.likert_scales.len()
            + self.rankings.values().map(BTreeMap::len).sum::<usize>()
            + self.traits.len()
            + self.free_text.len()
    }

    pub fn conflicts_for<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a ConflictEntry> {
        self.conflict_summary
            .conflict_areas
            .iter()
            .filter(move |entry| entry.field == field)
    }

    pub fn has_conflicts(&self) -> bool {
        self.conflict_summary.total_conflicts > 0
    }

    pub fn overall_assessment(&self) -> OverallAssessment {
        self.conflict_summary.overall_assessment
    }
}
