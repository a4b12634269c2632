//! Schema-driven decode of a block string into a structured record.

use crate::block::{get_block, BlockQuery};
use crate::schema::{BlockRule, BlockSchema};
use crate::value::{SaveRecord, SaveValue};

/// Decode `save` against `schema`.
///
/// Walks schema entries in declared order. A key absent from the wire
/// string leaves its field absent from the record; a null block assigns
/// `Null`; decode itself never fails. Composite pieces are produced by
/// splitting the raw value on the rule's separator (no separator means the
/// value is a single piece).
pub fn parse(save: &str, schema: &BlockSchema) -> SaveRecord {
    let mut record = SaveRecord::new();

    for (key, rule) in schema.entries() {
        let raw = match get_block(save, key) {
            BlockQuery::Missing => {
                tracing::debug!(key, "save does not carry block");
                continue;
            }
            BlockQuery::Null => {
                record.insert(rule.field(), SaveValue::Null);
                continue;
            }
            BlockQuery::Value(raw) => raw,
        };

        match rule {
            BlockRule::Leaf { field } => {
                record.insert(field.as_str(), SaveValue::Scalar(raw.to_string()));
            }
            BlockRule::ArrayOfScalars { field, separator } => {
                let items = split_pieces(raw, separator.as_deref())
                    .map(|piece| SaveValue::Scalar(piece.to_string()))
                    .collect();
                record.insert(field.as_str(), SaveValue::List(items));
            }
            BlockRule::ArrayOfRecords {
                field,
                schema,
                separator,
            } => {
                let items = split_pieces(raw, separator.as_deref())
                    .map(|piece| SaveValue::Record(parse(piece, schema)))
                    .collect();
                record.insert(field.as_str(), SaveValue::List(items));
            }
            BlockRule::ObjectOfScalars {
                field,
                subfields,
                separator,
            } => {
                let mut object = SaveRecord::new();
                for (index, piece) in split_pieces(raw, separator.as_deref()).enumerate() {
                    // Pieces beyond the declared subfields carry no name
                    // and are dropped.
                    if let Some(name) = subfields.get(index) {
                        object.insert(name.as_str(), SaveValue::Scalar(piece.to_string()));
                    }
                }
                record.insert(field.as_str(), SaveValue::Record(object));
            }
            BlockRule::ObjectOfRecord {
                field,
                schema,
                separator,
            } => {
                // Each piece is decoded and assigned in turn: with several
                // pieces only the last assignment survives. Observed server
                // semantics, preserved as-is.
                for piece in split_pieces(raw, separator.as_deref()) {
                    record.insert(field.as_str(), SaveValue::Record(parse(piece, schema)));
                }
            }
        }
    }

    record
}

fn split_pieces<'a>(
    raw: &'a str,
    separator: Option<&'a str>,
) -> Box<dyn Iterator<Item = &'a str> + 'a> {
    match separator {
        Some(separator) => Box::new(raw.split(separator)),
        None => Box::new(std::iter::once(raw)),
    }
}
