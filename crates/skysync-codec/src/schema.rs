//! Declarative block schemas.
//!
//! A schema is an ordered list of `(block key, rule)` entries describing how
//! each block of the wire format maps onto a structured field. Rules are a
//! closed set of shapes resolved when the schema is built, so decode and
//! encode walk a plain enum instead of re-inspecting the shape of every
//! entry on every call. Schemas nest: a composite rule may carry a child
//! schema for its pieces. Schemas are trees, built once and shared as
//! immutable constants.

use thiserror::Error;

/// Reserved prefix for metadata entries in schema declarations. Entries
/// whose block key starts with this marker carry no wire data and are
/// dropped when the schema is built.
pub const META_PREFIX: &str = "__";

/// Errors detected while building a schema.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    /// Block keys must be unique within one schema level.
    #[error("duplicate block key `{0}` within one schema level")]
    DuplicateKey(String),
}

/// How one block decodes.
#[derive(Debug, Clone)]
pub enum BlockRule {
    /// The raw value maps straight onto a field, unparsed.
    Leaf { field: String },
    /// Separator-split pieces become a list of raw scalars.
    ArrayOfScalars {
        field: String,
        separator: Option<String>,
    },
    /// Separator-split pieces each decode against a child schema.
    ArrayOfRecords {
        field: String,
        schema: BlockSchema,
        separator: Option<String>,
    },
    /// Separator-split pieces zip positionally onto named subfields.
    ObjectOfScalars {
        field: String,
        subfields: Vec<String>,
        separator: Option<String>,
    },
    /// The value decodes against a child schema as a single record. When a
    /// separator yields several pieces, each piece is decoded and assigned
    /// in turn, so the last piece wins; that matches the servers' observed
    /// behavior and must not be "fixed".
    ObjectOfRecord {
        field: String,
        schema: BlockSchema,
        separator: Option<String>,
    },
}

impl BlockRule {
    /// The structured field name this rule populates.
    pub fn field(&self) -> &str {
        match self {
            BlockRule::Leaf { field }
            | BlockRule::ArrayOfScalars { field, .. }
            | BlockRule::ArrayOfRecords { field, .. }
            | BlockRule::ObjectOfScalars { field, .. }
            | BlockRule::ObjectOfRecord { field, .. } => field,
        }
    }

    /// Short shape tag for diagnostics.
    pub fn shape(&self) -> &'static str {
        match self {
            BlockRule::Leaf { .. } => "leaf",
            BlockRule::ArrayOfScalars { .. } => "array of scalars",
            BlockRule::ArrayOfRecords { .. } => "array of records",
            BlockRule::ObjectOfScalars { .. } => "object of scalars",
            BlockRule::ObjectOfRecord { .. } => "object of record",
        }
    }
}

/// An ordered, validated block schema.
#[derive(Debug, Clone, Default)]
pub struct BlockSchema {
    entries: Vec<(String, BlockRule)>,
}

impl BlockSchema {
    /// Start building a schema.
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder { entries: Vec::new() }
    }

    /// The `(block key, rule)` entries in declared order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &BlockRule)> {
        self.entries.iter().map(|(k, r)| (k.as_str(), r))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the schema has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find the entry that populates `field`.
    pub fn entry_for_field(&self, field: &str) -> Option<(&str, &BlockRule)> {
        self.entries()
            .find(|(_, rule)| rule.field() == field)
    }
}

/// Builder collecting entries before duplicate-key validation.
#[derive(Debug)]
pub struct SchemaBuilder {
    entries: Vec<(String, BlockRule)>,
}

impl SchemaBuilder {
    /// A leaf block: raw value straight onto `field`.
    pub fn leaf(mut self, key: &str, field: &str) -> Self {
        self.entries.push((
            key.to_string(),
            BlockRule::Leaf {
                field: field.to_string(),
            },
        ));
        self
    }

    /// A separator-joined list of raw scalars.
    pub fn scalars(mut self, key: &str, field: &str, separator: &str) -> Self {
        self.entries.push((
            key.to_string(),
            BlockRule::ArrayOfScalars {
                field: field.to_string(),
                separator: Some(separator.to_string()),
            },
        ));
        self
    }

    /// A separator-joined list of records, each decoded with `schema`.
    pub fn records(mut self, key: &str, field: &str, schema: BlockSchema, separator: &str) -> Self {
        self.entries.push((
            key.to_string(),
            BlockRule::ArrayOfRecords {
                field: field.to_string(),
                schema,
                separator: Some(separator.to_string()),
            },
        ));
        self
    }

    /// A positional tuple: pieces zip onto `subfields` by index.
    pub fn tuple(mut self, key: &str, field: &str, subfields: &[&str], separator: &str) -> Self {
        self.entries.push((
            key.to_string(),
            BlockRule::ObjectOfScalars {
                field: field.to_string(),
                subfields: subfields.iter().map(|s| s.to_string()).collect(),
                separator: Some(separator.to_string()),
            },
        ));
        self
    }

    /// A single nested record decoded with `schema`.
    pub fn record(mut self, key: &str, field: &str, schema: BlockSchema) -> Self {
        self.entries.push((
            key.to_string(),
            BlockRule::ObjectOfRecord {
                field: field.to_string(),
                schema,
                separator: None,
            },
        ));
        self
    }

    /// Add an already-constructed rule under `key`.
    pub fn rule(mut self, key: &str, rule: BlockRule) -> Self {
        self.entries.push((key.to_string(), rule));
        self
    }

    /// Validate and freeze the schema. Metadata entries (keys starting with
    /// [`META_PREFIX`]) are dropped here; duplicate keys are rejected.
    pub fn build(self) -> Result<BlockSchema, SchemaError> {
        let mut entries: Vec<(String, BlockRule)> = Vec::with_capacity(self.entries.len());
        for (key, rule) in self.entries {
            if key.starts_with(META_PREFIX) {
                continue;
            }
            if entries.iter().any(|(existing, _)| *existing == key) {
                return Err(SchemaError::DuplicateKey(key));
            }
            entries.push((key, rule));
        }
        Ok(BlockSchema { entries })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_preserves_declared_order() {
        let schema = BlockSchema::builder()
            .leaf("Pc", "coins")
            .leaf("Pb", "bux")
            .build()
            .unwrap();
        let keys: Vec<&str> = schema.entries().map(|(k, _)| k).collect();
        assert_eq!(keys, ["Pc", "Pb"]);
    }

    #[test]
    fn duplicate_keys_are_rejected() {
        let result = BlockSchema::builder()
            .leaf("Pc", "coins")
            .leaf("Pc", "copper")
            .build();
        assert_eq!(result.unwrap_err(), SchemaError::DuplicateKey("Pc".into()));
    }

    #[test]
    fn metadata_entries_are_dropped_at_build_time() {
        let schema = BlockSchema::builder()
            .leaf("Pc", "coins")
            .leaf("__type", "ignored")
            .build()
            .unwrap();
        assert_eq!(schema.len(), 1);
    }

    #[test]
    fn duplicate_keys_in_nested_schemas_are_independent() {
        let child = BlockSchema::builder().leaf("Pc", "coins").build().unwrap();
        let parent = BlockSchema::builder()
            .leaf("Pc", "coins")
            .record("Pn", "nested", child)
            .build();
        assert!(parent.is_ok());
    }

    #[test]
    fn entry_for_field_finds_rule_by_field_name() {
        let schema = BlockSchema::builder()
            .leaf("Pc", "coins")
            .scalars("Pcos", "costumes", ",")
            .build()
            .unwrap();
        let (key, rule) = schema.entry_for_field("costumes").unwrap();
        assert_eq!(key, "Pcos");
        assert_eq!(rule.shape(), "array of scalars");
    }
}
