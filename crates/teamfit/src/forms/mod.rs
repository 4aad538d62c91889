//! Form structure knowledge: which answers are scales, rankings, traits or free text.

mod classifier;
pub mod definition;
mod metadata;

pub use classifier::classify;
pub use definition::{FormDefinition, FormDefinitionError};
pub use metadata::{
    FormMetadata, FormMetadataBuilder, FormMetadataError, RankingGroup, RankingInfo,
    DEFAULT_FALLBACK_MAX_RANK, UNKNOWN_RANKING_GROUP,
};

use serde::{Deserialize, Serialize};

/// Semantic type of a questionnaire field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    /// Ordinal answer on a 1-3 scale.
    Likert,
    /// Position within a bounded group of mutually exclusive ranks.
    Ranking,
    /// Ordinal low/medium/high answer.
    Trait,
    /// Free-form prose.
    Text,
    /// Anything the engine does not compare.
    Other,
}

impl FieldType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Likert => "Likert scale",
            Self::Ranking => "Ranking",
            Self::Trait => "Trait",
            Self::Text => "Free text",
            Self::Other => "Other",
        }
    }
}
