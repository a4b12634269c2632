//! Single-field extraction from a save.
//!
//! Several operations need one schema field of a save re-encoded as a
//! standalone block string: the upload metadata carries the doorman block
//! as the player's avatar, and visiting sends the doorman as an item.

use skysync_codec::{concat, parse, BlockSchema, CodecError, SaveRecord};

/// Decode `save_blocks` against `schema`, keep only `field`, and re-encode
/// it. A field the save does not carry extracts to an empty string.
pub fn extract_field(
    save_blocks: &str,
    schema: &BlockSchema,
    field: &str,
) -> Result<String, CodecError> {
    let mut record = parse(save_blocks, schema);
    let mut solo = SaveRecord::new();
    if let Some(value) = record.remove(field) {
        solo.insert(field, value);
    }
    concat(&solo, schema)
}
