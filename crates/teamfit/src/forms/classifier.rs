use super::{FieldType, FormMetadata};

const LIKERT_VALUES: [&str; 3] = ["1", "2", "3"];
const TRAIT_VALUES: [&str; 3] = ["low", "medium", "high"];
const TEXT_MIN_CHARS: usize = 20;

/// Determines how a field is compared.
///
/// Declared metadata wins, then name prefixes, then the shape of `sample`. Fields that match
/// nothing are `Other` and get skipped by the engine.
pub fn classify(field: &str, sample: &str, metadata: &FormMetadata) -> FieldType {
    if let Some(declared) = metadata.declared_type(field) {
        return declared;
    }

    if let Some(by_prefix) = metadata.prefix_type(field) {
        return by_prefix;
    }

    classify_value(sample)
}

fn classify_value(sample: &str) -> FieldType {
    if LIKERT_VALUES.contains(&sample) {
        return FieldType::Likert;
    }

    if TRAIT_VALUES
        .iter()
        .any(|value| sample.eq_ignore_ascii_case(value))
    {
        return FieldType::Trait;
    }

    if sample.chars().count() > TEXT_MIN_CHARS {
        return FieldType::Text;
    }

    FieldType::Other
}
