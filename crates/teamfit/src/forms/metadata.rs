use std::collections::HashMap;

use serde::Serialize;

use super::FieldType;

/// Group size assumed for ranking fields that belong to no declared group.
pub const DEFAULT_FALLBACK_MAX_RANK: u32 = 4;

/// Bucket name used for ranking fields that belong to no declared group.
pub const UNKNOWN_RANKING_GROUP: &str = "unknown_group";

const DEFAULT_NAME_PREFIXES: &[(&str, FieldType)] =
    &[("rank_", FieldType::Ranking), ("ocean_", FieldType::Trait)];

/// Cluster of mutually exclusive ranking fields sharing one rank range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankingGroup {
    pub name: String,
    pub max_rank: u32,
}

/// Group resolution for a single ranking field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankingInfo<'a> {
    pub group: &'a str,
    pub max_rank: u32,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FormMetadataError {
    #[error("field '{field}' is assigned to ranking groups '{existing}' and '{requested}'")]
    ConflictingGroup {
        field: String,
        existing: String,
        requested: String,
    },
    #[error("ranking group '{0}' declares no fields")]
    EmptyGroup(String),
    #[error("ranking group '{0}' must allow at least one rank")]
    ZeroMaxRank(String),
    #[error("field '{field}' is declared as {declared:?} but belongs to ranking group '{group}'")]
    ConflictingType {
        field: String,
        declared: FieldType,
        group: String,
    },
}

/// Read-only field declarations consulted during classification.
///
/// Built once, usually from the form's own definition, and shared across comparisons.
#[derive(Debug, Clone)]
pub struct FormMetadata {
    field_types: HashMap<String, FieldType>,
    /// In declaration order; name-based resolution takes the first match.
    groups: Vec<RankingGroup>,
    memberships: HashMap<String, String>,
    name_prefixes: Vec<(String, FieldType)>,
    fallback_max_rank: u32,
}

impl Default for FormMetadata {
    fn default() -> Self {
        Self {
            field_types: HashMap::new(),
            groups: Vec::new(),
            memberships: HashMap::new(),
            name_prefixes: default_prefixes(),
            fallback_max_rank: DEFAULT_FALLBACK_MAX_RANK,
        }
    }
}

impl FormMetadata {
    pub fn builder() -> FormMetadataBuilder {
        FormMetadataBuilder::default()
    }

    pub fn declared_type(&self, field: &str) -> Option<FieldType> {
        self.field_types.get(field).copied()
    }

    pub fn prefix_type(&self, field: &str) -> Option<FieldType> {
        self.name_prefixes
            .iter()
            .find(|(prefix, _)| field.starts_with(prefix.as_str()))
            .map(|(_, field_type)| *field_type)
    }

    pub fn ranking_groups(&self) -> impl Iterator<Item = &RankingGroup> {
        self.groups.iter()
    }

    pub fn declared_fields(&self) -> usize {
        self.field_types.len()
    }

    pub fn fallback_max_rank(&self) -> u32 {
        self.fallback_max_rank
    }

    /// Resolves the group a ranking field is compared within.
    ///
    /// Explicit membership wins, then the first group whose name appears inside the field
    /// name, then the unknown group sized by the fallback.
    pub fn ranking_info(&self, field: &str) -> RankingInfo<'_> {
        let declared = self
            .memberships
            .get(field)
            .and_then(|name| self.groups.iter().find(|group| &group.name == name));

        let matched = declared.or_else(|| {
            self.groups
                .iter()
                .find(|group| field.contains(group.name.as_str()))
        });

        match matched {
            Some(group) => RankingInfo {
                group: &group.name,
                max_rank: group.max_rank,
            },
            None => RankingInfo {
                group: UNKNOWN_RANKING_GROUP,
                max_rank: self.fallback_max_rank,
            },
        }
    }
}

fn default_prefixes() -> Vec<(String, FieldType)> {
    DEFAULT_NAME_PREFIXES
        .iter()
        .map(|(prefix, field_type)| (prefix.to_string(), *field_type))
        .collect()
}

/// Incremental constructor validating ranking-group membership.
#[derive(Debug)]
pub struct FormMetadataBuilder {
    field_types: HashMap<String, FieldType>,
    groups: Vec<(String, Option<u32>, Vec<String>)>,
    name_prefixes: Vec<(String, FieldType)>,
    fallback_max_rank: u32,
}

impl Default for FormMetadataBuilder {
    fn default() -> Self {
        Self {
            field_types: HashMap::new(),
            groups: Vec::new(),
            name_prefixes: default_prefixes(),
            fallback_max_rank: DEFAULT_FALLBACK_MAX_RANK,
        }
    }
}

impl FormMetadataBuilder {
    pub fn field_type(mut self, field: impl Into<String>, field_type: FieldType) -> Self {
        self.field_types.insert(field.into(), field_type);
        self
    }

    /// Declares a group whose `max_rank` is the number of member fields.
    pub fn ranking_group<I, S>(mut self, name: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fields = fields.into_iter().map(Into::into).collect();
        self.groups.push((name.into(), None, fields));
        self
    }

    pub fn ranking_group_with_max_rank<I, S>(
        mut self,
        name: impl Into<String>,
        max_rank: u32,
        fields: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fields = fields.into_iter().map(Into::into).collect();
        self.groups.push((name.into(), Some(max_rank), fields));
        self
    }

    /// Adds a name-prefix heuristic, checked after the defaults.
    pub fn name_prefix(mut self, prefix: impl Into<String>, field_type: FieldType) -> Self {
        self.name_prefixes.push((prefix.into(), field_type));
        self
    }

    pub fn without_default_prefixes(mut self) -> Self {
        self.name_prefixes
            .retain(|(prefix, _)| {
                !DEFAULT_NAME_PREFIXES
                    .iter()
                    .any(|(default, _)| *default == prefix.as_str())
            });
        self
    }

    pub fn fallback_max_rank(mut self, max_rank: u32) -> Self {
        self.fallback_max_rank = max_rank.max(1);
        self
    }

    pub fn build(self) -> Result<FormMetadata, FormMetadataError> {
        let FormMetadataBuilder {
            mut field_types,
            groups: declared_groups,
            name_prefixes,
            fallback_max_rank,
        } = self;

        let mut groups: Vec<RankingGroup> = Vec::new();
        let mut memberships: HashMap<String, String> = HashMap::new();

        for (name, max_rank, fields) in declared_groups {
            if fields.is_empty() {
                return Err(FormMetadataError::EmptyGroup(name));
            }

            let mut members: Vec<String> = Vec::with_capacity(fields.len());
            for field in fields {
                if !members.contains(&field) {
                    members.push(field);
                }
            }

            let max_rank = max_rank.unwrap_or(members.len() as u32);
            if max_rank == 0 {
                return Err(FormMetadataError::ZeroMaxRank(name));
            }

            for field in members {
                if let Some(existing) = memberships.get(&field) {
                    if existing != &name {
                        return Err(FormMetadataError::ConflictingGroup {
                            field,
                            existing: existing.clone(),
                            requested: name,
                        });
                    }
                    continue;
                }
                match field_types.get(&field) {
                    Some(declared) if *declared != FieldType::Ranking => {
                        return Err(FormMetadataError::ConflictingType {
                            field,
                            declared: *declared,
                            group: name,
                        });
                    }
                    _ => {}
                }
                field_types.insert(field.clone(), FieldType::Ranking);
                memberships.insert(field, name.clone());
            }

            match groups.iter_mut().find(|group| group.name == name) {
                Some(group) => group.max_rank = max_rank,
                None => groups.push(RankingGroup { name, max_rank }),
            }
        }

        Ok(FormMetadata {
            field_types,
            groups,
            memberships,
            name_prefixes,
            fallback_max_rank,
        })
    }
}
