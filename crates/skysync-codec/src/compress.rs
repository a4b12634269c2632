//! Compression codec: sentinel wrapper + zlib deflate + base64.
//!
//! A canonical save travels as `base64(deflate("[_save]" + blocks +
//! "[_save]"))`. Two sentinel variants exist in the wild and decode must
//! accept both: the current unquoted form and a legacy form whose sentinels
//! carry surrounding double quotes. The variant is selected by sniffing the
//! first character of the decompressed text; the set is closed, not a
//! general quoting scheme.

use std::io::{Read, Write};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;

use crate::error::CodecError;

/// The sentinel marker wrapped around a top-level save before compression.
pub const SAVE_SENTINEL: &str = "[_save]";

/// The two historically-observed sentinel wrapper variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveWrapper {
    /// `[_save]` on each side; written by current game builds.
    Current,
    /// `"[_save]"` on each side; seen in older exported saves.
    LegacyQuoted,
}

impl SaveWrapper {
    /// Detect the wrapper variant from the first character of a
    /// decompressed save.
    pub fn sniff(payload: &str) -> Result<SaveWrapper, CodecError> {
        if payload.starts_with('"') {
            Ok(SaveWrapper::LegacyQuoted)
        } else if payload.starts_with(SAVE_SENTINEL) {
            Ok(SaveWrapper::Current)
        } else {
            Err(CodecError::UnrecognizedWrapper)
        }
    }

    /// Strip this variant's sentinels from both ends. The legacy variant
    /// quotes the whole wrapped string, so its markers are one character
    /// wider on each side.
    pub fn strip(self, payload: &str) -> Result<&str, CodecError> {
        let (prefix, suffix) = match self {
            SaveWrapper::Current => (SAVE_SENTINEL, SAVE_SENTINEL),
            SaveWrapper::LegacyQuoted => ("\"[_save]", "[_save]\""),
        };
        payload
            .strip_prefix(prefix)
            .and_then(|rest| rest.strip_suffix(suffix))
            .ok_or(CodecError::UnrecognizedWrapper)
    }
}

/// Wrap a block string in the current sentinel variant.
pub fn wrap_save(blocks: &str) -> String {
    format!("{SAVE_SENTINEL}{blocks}{SAVE_SENTINEL}")
}

/// Compress a block string into its transport form: sentinel-wrap, zlib
/// deflate, base64.
pub fn compress_save(blocks: &str) -> Result<String, CodecError> {
    let wrapped = wrap_save(blocks);
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(wrapped.as_bytes())?;
    let deflated = encoder.finish()?;
    let encoded = BASE64.encode(&deflated);
    tracing::debug!(
        decompressed_bytes = wrapped.len(),
        compressed_bytes = encoded.len(),
        "compressed save"
    );
    Ok(encoded)
}

/// Decompress a transport payload back into the inner block string,
/// stripping whichever sentinel variant it carries.
pub fn decompress_save(payload: &str) -> Result<String, CodecError> {
    let deflated = BASE64.decode(payload)?;
    let mut text = String::new();
    ZlibDecoder::new(deflated.as_slice()).read_to_string(&mut text)?;
    let wrapper = SaveWrapper::sniff(&text)?;
    tracing::debug!(
        compressed_bytes = payload.len(),
        decompressed_bytes = text.len(),
        wrapper = ?wrapper,
        "decompressed save"
    );
    Ok(wrapper.strip(&text)?.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compression_round_trips_current_wrapper() {
        let blocks = "[Pc]100[Pc][Pb]25[Pb]";
        let compressed = compress_save(blocks).unwrap();
        assert_eq!(decompress_save(&compressed).unwrap(), blocks);
    }

    #[test]
    fn decode_accepts_legacy_quoted_wrapper() {
        let wrapped = "\"[_save][Pc]1[Pc][_save]\"";
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(wrapped.as_bytes()).unwrap();
        let payload = BASE64.encode(encoder.finish().unwrap());

        assert_eq!(decompress_save(&payload).unwrap(), "[Pc]1[Pc]");
    }

    #[test]
    fn sniff_selects_variant_by_leading_character() {
        assert_eq!(
            SaveWrapper::sniff("[_save]x[_save]").unwrap(),
            SaveWrapper::Current
        );
        assert_eq!(
            SaveWrapper::sniff("\"[_save]x[_save]\"").unwrap(),
            SaveWrapper::LegacyQuoted
        );
        assert!(SaveWrapper::sniff("[Pc]1[Pc]").is_err());
    }

    #[test]
    fn mismatched_sentinel_ends_are_rejected() {
        assert!(SaveWrapper::Current.strip("[_save]x").is_err());
        assert!(SaveWrapper::LegacyQuoted.strip("\"[_save]x").is_err());
    }

    #[test]
    fn truncated_base64_is_a_codec_error() {
        assert!(matches!(
            decompress_save("!!!not-base64!!!"),
            Err(CodecError::Base64(_))
        ));
    }

    #[test]
    fn truncated_deflate_stream_is_a_codec_error() {
        let compressed = compress_save("[Pc]1[Pc]").unwrap();
        let bytes = BASE64.decode(&compressed).unwrap();
        let truncated = BASE64.encode(&bytes[..bytes.len() / 2]);
        assert!(matches!(
            decompress_save(&truncated),
            Err(CodecError::Deflate(_))
        ));
    }

    #[test]
    fn unwrapped_payload_is_rejected() {
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(b"[Pc]1[Pc]").unwrap();
        let payload = BASE64.encode(encoder.finish().unwrap());
        assert!(matches!(
            decompress_save(&payload),
            Err(CodecError::UnrecognizedWrapper)
        ));
    }
}
