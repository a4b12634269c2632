//! Save codec for the tower game's block-delimited save format.
//!
//! Two transforms, each bidirectional and driven by declarative schemas:
//!
//! - the **block codec** ([`parse`]/[`concat`]) between the flat delimited
//!   wire string and a structured [`SaveRecord`];
//! - the **compression codec** ([`compress_save`]/[`decompress_save`])
//!   between the block string and its sentinel-wrapped, deflated, base64
//!   transport form.
//!
//! All operations are pure and synchronous; values are owned per call and
//! schemas are immutable shared constants, so independent saves can be
//! coded concurrently without coordination.

pub mod block;
pub mod catalog;
pub mod compress;
pub mod decode;
pub mod encode;
pub mod error;
pub mod schema;
pub mod value;

pub use block::{block_string, get_block, has_block, BlockQuery};
pub use compress::{compress_save, decompress_save, wrap_save, SaveWrapper, SAVE_SENTINEL};
pub use decode::parse;
pub use encode::concat;
pub use error::CodecError;
pub use schema::{BlockRule, BlockSchema, SchemaError, META_PREFIX};
pub use value::{SaveRecord, SaveValue};

/// Decode a compressed transport payload straight to a structured record
/// using the current save schema.
pub fn decode_save(payload: &str) -> Result<SaveRecord, CodecError> {
    let blocks = decompress_save(payload)?;
    Ok(parse(&blocks, catalog::save_schema()))
}

/// Encode a structured record straight to its compressed transport form
/// using the current save schema.
pub fn encode_save(record: &SaveRecord) -> Result<String, CodecError> {
    let blocks = concat(record, catalog::save_schema())?;
    compress_save(&blocks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_level_conveniences_round_trip() {
        let mut record = SaveRecord::new();
        record.insert("coins", SaveValue::Scalar("44745".into()));
        record.insert("ver", SaveValue::Scalar("3.14.0".into()));

        let payload = encode_save(&record).unwrap();
        assert_eq!(decode_save(&payload).unwrap(), record);
    }
}
