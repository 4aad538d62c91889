use serde::Serialize;

use super::{assess_three_point, Assessment, ScaleError};

/// Outcome of comparing two answers on the 1-3 agreement scale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LikertComparison {
    pub value1: String,
    pub value2: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difference: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub assessment: Assessment,
}

pub fn compare_likert(first: &str, second: &str) -> LikertComparison {
    let parsed = parse_likert(first).and_then(|v1| Ok((v1, parse_likert(second)?)));

    match parsed {
        Ok((v1, v2)) => {
            let difference = v1.abs_diff(v2);
            LikertComparison {
                value1: v1.to_string(),
                value2: v2.to_string(),
                difference: Some(difference),
                error: None,
                assessment: assess_three_point(difference),
            }
        }
        Err(err) => LikertComparison {
            value1: first.to_string(),
            value2: second.to_string(),
            difference: None,
            error: Some(err.to_string()),
            assessment: Assessment::Aligned,
        },
    }
}

fn parse_likert(raw: &str) -> Result<u8, ScaleError> {
    raw.trim()
        .parse::<u8>()
        .ok()
        .filter(|value| (1..=3).contains(value))
        .ok_or_else(|| ScaleError::Likert(raw.to_string()))
}
