//! Block string wire primitive.
//!
//! A save file on the wire is a flat string of delimited segments, each of
//! the form `[key]value[key]`. The same key delimits both ends of its value,
//! so a block is located by splitting the whole string on `[key]` and taking
//! the middle piece. A present-but-empty block (`[key][key]`) is distinct
//! from an absent one.

/// Result of probing a save string for one block key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockQuery<'a> {
    /// The key does not appear (as a full `[key]...[key]` segment) at all.
    Missing,
    /// The block is present with an empty value: `[key][key]`.
    Null,
    /// The block is present with a value.
    Value(&'a str),
}

impl<'a> BlockQuery<'a> {
    /// The raw value, if one is present.
    pub fn value(self) -> Option<&'a str> {
        match self {
            BlockQuery::Value(v) => Some(v),
            _ => None,
        }
    }
}

/// Extract the value of `key` from a block string.
///
/// Splitting on `[key]` must yield at least three pieces for the block to
/// count as present; the value is the piece between the first delimiter
/// pair. Extra occurrences of the same key later in the string are ignored.
pub fn get_block<'a>(save: &'a str, key: &str) -> BlockQuery<'a> {
    let delimiter = format!("[{key}]");
    let mut pieces = save.split(delimiter.as_str());

    let Some(_before) = pieces.next() else {
        return BlockQuery::Missing;
    };
    let Some(value) = pieces.next() else {
        return BlockQuery::Missing;
    };
    if pieces.next().is_none() {
        // Only one occurrence of the delimiter; not a complete block.
        return BlockQuery::Missing;
    }

    if value.is_empty() {
        BlockQuery::Null
    } else {
        BlockQuery::Value(value)
    }
}

/// Whether `key` is present in the block string at all (null counts).
pub fn has_block(save: &str, key: &str) -> bool {
    get_block(save, key) != BlockQuery::Missing
}

/// Render one `[key]value[key]` segment. A `None` value produces a null
/// block (`[key][key]`).
pub fn block_string(key: &str, value: Option<&str>) -> String {
    match value {
        Some(value) => format!("[{key}]{value}[{key}]"),
        None => format!("[{key}][{key}]"),
    }
}
