//! Form definitions exported as CSV, one row per form control.
//!
//! ```text
//! name,control,options,ranking_group
//! timing_preference,radio,1|2|3,
//! rank_values_pay,select,1|2|3,work_values
//! ocean_openness,select,low|medium|high,
//! professional_goals,textarea,,
//! ```

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer};
use tracing::{info, warn};

use super::{FieldType, FormMetadata, FormMetadataBuilder, FormMetadataError};

const OPTION_SEPARATOR: char = '|';
const TRAIT_OPTIONS: [&str; 3] = ["low", "medium", "high"];

#[derive(Debug)]
pub enum FormDefinitionError {
    Io(std::io::Error),
    Csv(csv::Error),
    Metadata(FormMetadataError),
}

impl std::fmt::Display for FormDefinitionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormDefinitionError::Io(err) => write!(f, "failed to read form definition: {}", err),
            FormDefinitionError::Csv(err) => write!(f, "invalid form definition CSV: {}", err),
            FormDefinitionError::Metadata(err) => {
                write!(f, "form definition is inconsistent: {}", err)
            }
        }
    }
}

impl std::error::Error for FormDefinitionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FormDefinitionError::Io(err) => Some(err),
            FormDefinitionError::Csv(err) => Some(err),
            FormDefinitionError::Metadata(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for FormDefinitionError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for FormDefinitionError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<FormMetadataError> for FormDefinitionError {
    fn from(err: FormMetadataError) -> Self {
        Self::Metadata(err)
    }
}

/// Kind of input widget a form field is rendered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlKind {
    Radio,
    Select,
    Textarea,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormControl {
    pub name: String,
    pub kind: ControlKind,
    pub options: Vec<String>,
    pub ranking_group: Option<String>,
}

impl FormControl {
    fn declared_type(&self) -> Option<FieldType> {
        match self.kind {
            ControlKind::Radio => Some(FieldType::Likert),
            ControlKind::Select if self.ranking_group.is_some() || self.name.contains("rank") => {
                Some(FieldType::Ranking)
            }
            ControlKind::Select if self.has_trait_options() => Some(FieldType::Trait),
            ControlKind::Select | ControlKind::Other => None,
            ControlKind::Textarea => Some(FieldType::Text),
        }
    }

    fn has_trait_options(&self) -> bool {
        let mut options = self
            .options
            .iter()
            .filter(|option| !option.is_empty())
            .peekable();

        options.peek().is_some()
            && options.all(|option| {
                TRAIT_OPTIONS
                    .iter()
                    .any(|known| option.eq_ignore_ascii_case(known))
            })
    }
}

/// Parsed form structure, reduced to what classification needs.
#[derive(Debug, Clone, Default)]
pub struct FormDefinition {
    controls: Vec<FormControl>,
}

impl FormDefinition {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, FormDefinitionError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, FormDefinitionError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut controls: Vec<FormControl> = Vec::new();

        for record in csv_reader.deserialize::<ControlRow>() {
            let row = record?;
            let Some(name) = row.name else {
                warn!("skipping form control without a name");
                continue;
            };

            // radio buttons repeat one row per option
            if controls.iter().any(|control| control.name == name) {
                continue;
            }

            controls.push(FormControl {
                name,
                kind: row.control,
                options: row
                    .options
                    .map(|raw| {
                        raw.split(OPTION_SEPARATOR)
                            .map(|option| option.trim().to_string())
                            .collect()
                    })
                    .unwrap_or_default(),
                ranking_group: row.ranking_group,
            });
        }

        Ok(Self { controls })
    }

    pub fn controls(&self) -> &[FormControl] {
        &self.controls
    }

    /// Seeds a builder so callers can layer extra declarations on top.
    pub fn metadata_builder(&self) -> FormMetadataBuilder {
        let mut builder = FormMetadata::builder();
        let mut groups: Vec<(&str, Vec<&str>)> = Vec::new();

        for control in &self.controls {
            let Some(field_type) = control.declared_type() else {
                continue;
            };

            builder = builder.field_type(control.name.clone(), field_type);

            if field_type == FieldType::Ranking {
                if let Some(group) = control.ranking_group.as_deref() {
                    match groups.iter_mut().find(|(name, _)| *name == group) {
                        Some((_, members)) => members.push(&control.name),
                        None => groups.push((group, vec![control.name.as_str()])),
                    }
                }
            }
        }

        for (group, members) in groups {
            builder = builder.ranking_group(group, members);
        }

        builder
    }

    pub fn to_metadata(&self, fallback_max_rank: u32) -> Result<FormMetadata, FormDefinitionError> {
        let metadata = self
            .metadata_builder()
            .fallback_max_rank(fallback_max_rank)
            .build()?;

        info!(
            fields = metadata.declared_fields(),
            groups = metadata.ranking_groups().count(),
            "parsed form definition"
        );

        Ok(metadata)
    }
}

#[derive(Debug, Deserialize)]
struct ControlRow {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    name: Option<String>,
    control: ControlKind,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    options: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    ranking_group: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
