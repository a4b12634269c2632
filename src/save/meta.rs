//! Upload metadata generation.
//!
//! Pushing a save (or a snapshot) posts a form describing the save next to
//! the compressed payload: the doorman block as the avatar, the floor
//! count as the level, the golden-ticket total, the VIP flag, and the
//! platform/language pair. The servers render this metadata in friend
//! lists without decompressing the save itself.

use serde::Serialize;
use skysync_codec::catalog::save_schema;
use skysync_codec::{compress_save, parse, CodecError};

use super::compare::story_count;
use super::extract::extract_field;

/// Platform literal the servers expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub enum Platform {
    #[serde(rename = "IOS")]
    Ios,
    #[default]
    Android,
}

/// Caller-tunable upload settings.
#[derive(Debug, Clone)]
pub struct UploadOptions {
    pub platform: Platform,
    /// Game language code, e.g. "en-us".
    pub language: String,
    /// Floor id the player is requesting bitizens for; -1 when none.
    pub request_floor_id: i32,
}

impl Default for UploadOptions {
    fn default() -> Self {
        Self {
            platform: Platform::default(),
            language: "en-us".to_string(),
            request_floor_id: -1,
        }
    }
}

/// The form posted next to a pushed save.
#[derive(Debug, Clone, Serialize)]
pub struct UploadMetadata {
    #[serde(rename = "saveData")]
    pub save_data: String,
    /// Doorman block, shown as the player's avatar.
    pub avatar: String,
    /// Omitted for snapshots.
    #[serde(rename = "saveVersion", skip_serializing_if = "Option::is_none")]
    pub save_version: Option<u32>,
    pub level: u32,
    #[serde(rename = "reqFID")]
    pub req_fid: i32,
    pub mg: i64,
    pub vip: u8,
    pub p: Platform,
    pub l: String,
}

/// Build the upload form and the compressed payload for `save_blocks`.
/// `version` is `None` when generating metadata for a snapshot.
pub fn generate_upload_metadata(
    save_blocks: &str,
    version: Option<u32>,
    options: &UploadOptions,
) -> Result<(UploadMetadata, String), CodecError> {
    let record = parse(save_blocks, save_schema());
    let compressed = compress_save(save_blocks)?;
    let avatar = extract_field(save_blocks, save_schema(), "doorman")?;

    let metadata = UploadMetadata {
        save_data: compressed.clone(),
        avatar,
        save_version: version,
        level: story_count(&record) as u32,
        req_fid: options.request_floor_id,
        mg: record
            .scalar("maxGold")
            .and_then(|gold| gold.parse().ok())
            .unwrap_or(0),
        vip: u8::from(record.contains("vipTrialEnd")),
        p: options.platform,
        l: options.language.clone(),
    };
    Ok((metadata, compressed))
}
