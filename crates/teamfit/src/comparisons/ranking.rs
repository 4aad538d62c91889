use serde::Serialize;

use super::{Assessment, ScaleError};

/// Sensitivity band chosen from the size of a ranking group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankingTier {
    /// At most three ranked items.
    Small,
    /// Four to six ranked items.
    Medium,
    /// More than six ranked items.
    Large,
}

impl RankingTier {
    pub const fn for_max_rank(max_rank: u32) -> Self {
        if max_rank <= 3 {
            Self::Small
        } else if max_rank <= 6 {
            Self::Medium
        } else {
            Self::Large
        }
    }
}

/// Outcome of comparing two ranks inside one group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingComparison {
    pub rank1: String,
    pub rank2: String,
    pub max_rank: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difference: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentage_difference: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub assessment: Assessment,
}

pub fn compare_ranking(first: &str, second: &str, max_rank: u32) -> RankingComparison {
    let parsed = parse_rank(first).and_then(|r1| Ok((r1, parse_rank(second)?)));

    match parsed {
        Ok((r1, r2)) => {
            let difference = r1.abs_diff(r2);
            RankingComparison {
                rank1: r1.to_string(),
                rank2: r2.to_string(),
                max_rank,
                difference: Some(difference),
                percentage_difference: Some(percentage_of_range(difference, max_rank)),
                error: None,
                assessment: assess_ranks(r1, r2, max_rank),
            }
        }
        Err(err) => RankingComparison {
            rank1: first.to_string(),
            rank2: second.to_string(),
            max_rank,
            difference: None,
            percentage_difference: None,
            error: Some(err.to_string()),
            assessment: Assessment::Aligned,
        },
    }
}

/// Applies the tiered ranking policy.
///
/// Disagreements near the top of a list matter most: each tier flags wide gaps and
/// escalates when one side put the item first and the other put it near the bottom. A
/// one-step swap between two items that are both below second place is never flagged.
pub fn assess_ranks(r1: u32, r2: u32, max_rank: u32) -> Assessment {
    let difference = r1.abs_diff(r2);
    let first_against = |floor: u32| (r1 == 1 && r2 >= floor) || (r2 == 1 && r1 >= floor);

    let assessment = match RankingTier::for_max_rank(max_rank) {
        RankingTier::Small => {
            // a two-item group can only ever be one step apart
            let threshold = max_rank.saturating_sub(1).clamp(1, 2);
            let top_vs_bottom =
                (r1 == 1 && r2 == max_rank) || (r2 == 1 && r1 == max_rank);
            escalate(difference >= threshold, top_vs_bottom)
        }
        RankingTier::Medium => {
            let discuss = difference >= 3 || ((r1 <= 2 || r2 <= 2) && difference >= 2);
            escalate(discuss, first_against(max_rank - 1))
        }
        RankingTier::Large => escalate(difference >= max_rank / 3, first_against(max_rank / 2)),
    };

    if difference == 1 && r1 > 2 && r2 > 2 {
        return Assessment::Aligned;
    }

    assessment
}

fn escalate(discuss: bool, high_priority: bool) -> Assessment {
    match (discuss, high_priority) {
        (true, true) => Assessment::HighPriority,
        (true, false) => Assessment::Discuss,
        (false, _) => Assessment::Aligned,
    }
}

fn percentage_of_range(difference: u32, max_rank: u32) -> f64 {
    let percentage = 100.0 * f64::from(difference) / f64::from(max_rank.max(1));
    (percentage * 10.0).round() / 10.0
}

fn parse_rank(raw: &str) -> Result<u32, ScaleError> {
    raw.trim()
        .parse::<u32>()
        .ok()
        .filter(|rank| *rank >= 1)
        .ok_or_else(|| ScaleError::Ranking(raw.to_string()))
}
