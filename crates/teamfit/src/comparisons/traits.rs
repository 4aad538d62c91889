use serde::Serialize;

use super::{assess_three_point, Assessment, ScaleError};

/// Outcome of comparing two low/medium/high answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraitComparison {
    pub trait1: String,
    pub trait2: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difference: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub assessment: Assessment,
}

pub fn compare_trait(first: &str, second: &str) -> TraitComparison {
    let parsed = trait_level(first).and_then(|v1| Ok((v1, trait_level(second)?)));

    let (difference, error, assessment) = match parsed {
        Ok((v1, v2)) => {
            let difference = v1.abs_diff(v2);
            (Some(difference), None, assess_three_point(difference))
        }
        Err(err) => (None, Some(err.to_string()), Assessment::Aligned),
    };

    TraitComparison {
        trait1: first.to_string(),
        trait2: second.to_string(),
        difference,
        error,
        assessment,
    }
}

fn trait_level(raw: &str) -> Result<u8, ScaleError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "low" => Ok(1),
        "medium" => Ok(2),
        "high" => Ok(3),
        _ => Err(ScaleError::Trait(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_traits_are_aligned() {
        let result = compare_trait("medium", "medium");
        assert_eq!(result.assessment, Assessment::Aligned);
        assert_eq!(result.difference, Some(0));
    }

    #[test]
    fn adjacent_traits_are_aligned() {
        let result = compare_trait("low", "medium");
        assert_eq!(result.assessment, Assessment::Aligned);
        assert_eq!(result.difference, Some(1));
    }

    #[test]
    fn low_versus_high_needs_discussion() {
        let result = compare_trait("low", "high");
        assert_eq!(result.assessment, Assessment::Discuss);
        assert_eq!(result.difference, Some(2));

        let reversed = compare_trait("high", "low");
        assert_eq!(reversed.assessment, result.assessment);
        assert_eq!(reversed.difference, result.difference);
    }

    #[test]
    fn comparison_ignores_case() {
        let result = compare_trait("HIGH", "high");
        assert_eq!(result.assessment, Assessment::Aligned);
        assert_eq!(result.difference, Some(0));
        assert_eq!(result.trait1, "HIGH");

        assert_eq!(compare_trait("Low", "hIgH").assessment, Assessment::Discuss);
    }

    #[test]
    fn unknown_levels_fail_soft() {
        let result = compare_trait("invalid", "low");
        assert!(result.error.is_some());
        assert_eq!(result.difference, None);
        assert_eq!(result.assessment, Assessment::Aligned);
    }
}
