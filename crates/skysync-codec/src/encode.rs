//! Schema-driven encode of a structured record back into a block string.

use crate::block::block_string;
use crate::error::CodecError;
use crate::schema::{BlockRule, BlockSchema};
use crate::value::{SaveRecord, SaveValue};

/// Encode `record` against `schema`, the structural inverse of decode.
///
/// Walks the same schema in the same order. Absent fields emit nothing;
/// `Null` fields emit null blocks; composite fields re-join their pieces
/// with the rule's separator, recursing exactly where decode recursed. A
/// field whose value does not fit its rule's shape is a contract violation
/// and fails with [`CodecError::ShapeMismatch`].
pub fn concat(record: &SaveRecord, schema: &BlockSchema) -> Result<String, CodecError> {
    let mut out = String::new();

    for (key, rule) in schema.entries() {
        let Some(value) = record.get(rule.field()) else {
            continue;
        };
        if matches!(value, SaveValue::Null) {
            out.push_str(&block_string(key, None));
            continue;
        }

        let rendered = match rule {
            BlockRule::Leaf { field } => scalar_of(value, field)?.to_string(),
            BlockRule::ArrayOfScalars { field, separator } => {
                let items = list_of(value, field, rule.shape())?;
                let pieces: Vec<&str> = items
                    .iter()
                    .map(|item| scalar_of(item, field))
                    .collect::<Result<_, _>>()?;
                pieces.join(separator.as_deref().unwrap_or(""))
            }
            BlockRule::ArrayOfRecords {
                field,
                schema,
                separator,
            } => {
                let items = list_of(value, field, rule.shape())?;
                let pieces: Vec<String> = items
                    .iter()
                    .map(|item| concat(record_of(item, field, rule.shape())?, schema))
                    .collect::<Result<_, _>>()?;
                pieces.join(separator.as_deref().unwrap_or(""))
            }
            BlockRule::ObjectOfScalars {
                field,
                subfields,
                separator,
            } => {
                let object = record_of(value, field, rule.shape())?;
                let pieces: Vec<&str> = subfields
                    .iter()
                    .filter_map(|name| object.get(name))
                    .map(|item| scalar_of(item, field))
                    .collect::<Result<_, _>>()?;
                pieces.join(separator.as_deref().unwrap_or(""))
            }
            BlockRule::ObjectOfRecord { field, schema, .. } => {
                concat(record_of(value, field, rule.shape())?, schema)?
            }
        };

        out.push_str(&block_string(key, Some(&rendered)));
    }

    Ok(out)
}

fn scalar_of<'a>(value: &'a SaveValue, field: &str) -> Result<&'a str, CodecError> {
    value.as_scalar().ok_or_else(|| CodecError::ShapeMismatch {
        field: field.to_string(),
        expected: "scalar",
    })
}

fn list_of<'a>(
    value: &'a SaveValue,
    field: &str,
    expected: &'static str,
) -> Result<&'a [SaveValue], CodecError> {
    value.as_list().ok_or_else(|| CodecError::ShapeMismatch {
        field: field.to_string(),
        expected,
    })
}

fn record_of<'a>(
    value: &'a SaveValue,
    field: &str,
    expected: &'static str,
) -> Result<&'a SaveRecord, CodecError> {
    value.as_record().ok_or_else(|| CodecError::ShapeMismatch {
        field: field.to_string(),
        expected,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::parse;

    fn nested_schema() -> BlockSchema {
        let bitizen = BlockSchema::builder()
            .leaf("h", "homeIndex")
            .tuple("BA", "attributes", &["male", "firstNameIndex"], ",")
            .build()
            .unwrap();
        BlockSchema::builder()
            .leaf("Pc", "coins")
            .scalars("Pcos", "costumes", ",")
            .records("Pbits", "bzns", bitizen.clone(), "|")
            .record("Pdrmn", "doorman", bitizen)
            .build()
            .unwrap()
    }

    #[test]
    fn encode_skips_absent_fields() {
        let mut record = SaveRecord::new();
        record.insert("coins", SaveValue::Scalar("100".into()));
        let out = concat(&record, &nested_schema()).unwrap();
        assert_eq!(out, "[Pc]100[Pc]");
    }

    #[test]
    fn encode_emits_null_blocks_for_null_fields() {
        let mut record = SaveRecord::new();
        record.insert("coins", SaveValue::Null);
        let out = concat(&record, &nested_schema()).unwrap();
        assert_eq!(out, "[Pc][Pc]");
    }

    #[test]
    fn encode_rejoins_scalar_lists_with_separator() {
        let mut record = SaveRecord::new();
        record.insert(
            "costumes",
            SaveValue::List(vec![
                SaveValue::Scalar("a".into()),
                SaveValue::Scalar("b".into()),
            ]),
        );
        let out = concat(&record, &nested_schema()).unwrap();
        assert_eq!(out, "[Pcos]a,b[Pcos]");
    }

    #[test]
    fn encode_decode_round_trip_on_canonical_string() {
        let wire = "[Pc]100[Pc][Pcos]a,b[Pcos][Pbits][h]1[h][BA]1,5[BA]|[h]2[h][BA]0,9[BA][Pbits][Pdrmn][h]3[h][BA]1,2[BA][Pdrmn]";
        let schema = nested_schema();
        let record = parse(wire, &schema);
        assert_eq!(concat(&record, &schema).unwrap(), wire);
    }

    #[test]
    fn decode_encode_round_trip_on_decoded_record() {
        let schema = nested_schema();
        let wire = "[Pc]7[Pc][Pdrmn][h]3[h][BA]1,2[BA][Pdrmn]";
        let record = parse(wire, &schema);
        let encoded = concat(&record, &schema).unwrap();
        assert_eq!(parse(&encoded, &schema), record);
    }

    #[test]
    fn shape_mismatch_is_an_error_not_a_panic() {
        let mut record = SaveRecord::new();
        record.insert("costumes", SaveValue::Scalar("not-a-list".into()));
        let err = concat(&record, &nested_schema()).unwrap_err();
        assert!(matches!(err, CodecError::ShapeMismatch { .. }));
    }
}
