//! Schema catalog for the current save layout.
//!
//! These tables describe every block the game writes into a save string and
//! how it maps onto structured fields. Sibling scalar lists join with `,`;
//! sibling records (bitizens, floors, bitbook posts) join with `|`. The
//! save version lives in the `Pver` block.

use std::sync::OnceLock;

use crate::schema::{BlockRule, BlockSchema};

/// Positional attribute tuple carried in a bitizen's `BA` block: name
/// indices, colors, accessory flags, and the five job skills, in wire
/// order.
pub const BITIZEN_ATTRIBUTES: &[&str] = &[
    "male",
    "firstNameIndex",
    "lastNameIndex",
    "birthMonth",
    "birthDay",
    "skinColorIndex",
    "hairColorIndex",
    "showColorIndex",
    "pantColor",
    "shirtColor",
    "hasGlasses",
    "glasses",
    "hasTie",
    "tieColor",
    "hasHairAcc",
    "hairAcc",
    "hasBHat",
    "hasMHat",
    "hasFHat",
    "hat",
    "hatColor",
    "hasEarrings",
    "EarringsColor",
    "skillFood",
    "skillService",
    "skillRecreation",
    "skillRetail",
    "skillCreative",
];

fn build_bitizen() -> BlockSchema {
    BlockSchema::builder()
        .leaf("h", "homeIndex")
        .leaf("w", "workIndex")
        .leaf("d", "placedDreamJob")
        .leaf("j", "dreamJobIndex")
        .leaf("c", "costume")
        .leaf("v", "vip")
        .tuple("BA", "attributes", BITIZEN_ATTRIBUTES, ",")
        .build()
        .expect("bitizen schema block keys are unique")
}

fn build_floor() -> BlockSchema {
    BlockSchema::builder()
        .leaf("Fs", "storyHeight")
        .leaf("Ff", "floorId")
        .leaf("Fl", "level")
        .leaf("Fod", "openDate")
        .leaf("Fsbt", "stockBaseTime")
        .leaf("Fsi", "stockingTier")
        .leaf("Fst", "stockingStartTime")
        .scalars("Fstk", "stocks", ",")
        .scalars("Flst", "lastSaleTicks", ",")
        .leaf("Fn", "floorName")
        .leaf("Fp", "floorPaint")
        .build()
        .expect("floor schema block keys are unique")
}

fn build_mission() -> BlockSchema {
    BlockSchema::builder()
        .leaf("m_id", "id")
        .leaf("m_type", "type")
        .leaf("m_char", "character")
        .leaf("m_txt", "text")
        .leaf("m_cnt", "cnt")
        .leaf("m_ft", "ft")
        .leaf("m_fid", "fid")
        .leaf("m_pop", "pop")
        .leaf("m_com", "com")
        .build()
        .expect("mission schema block keys are unique")
}

fn build_bitbook_post() -> BlockSchema {
    BlockSchema::builder()
        .leaf("bb_tid", "_tid")
        .record("bb_bzn", "bitizen", bitizen_schema().clone())
        .leaf("bb_sname", "source_name")
        .leaf("bb_date", "date")
        .leaf("bb_txt", "body")
        .leaf("bb_mt", "media_type")
        .leaf("bb_mp", "media_path")
        .leaf("bb_lks", "likes")
        .build()
        .expect("bitbook post schema block keys are unique")
}

fn build_save() -> BlockSchema {
    BlockSchema::builder()
        .leaf("Pc", "coins")
        .leaf("Pb", "bux")
        .leaf("Ppig", "Ppig")
        .leaf("Pplim", "Pplim")
        .leaf("Pmg", "maxGold")
        .leaf("Pg", "gold")
        .leaf("Ptip", "tip")
        .leaf("Pnu", "needUpgrade")
        .leaf("Pver", "ver")
        .leaf("Pr", "roof")
        .leaf("Pe", "lift")
        .leaf("Pl", "lobby")
        .leaf("Pbxb", "buxBought")
        .leaf("PiT", "installTime")
        .leaf("PlST", "lastSaleTick")
        .leaf("Pln", "lobbyName")
        .leaf("Prf", "raffleID")
        .leaf("Pvte", "vipTrialEnd")
        .scalars("Pcos", "costumes", ",")
        .scalars("Ppets", "pets", ",")
        .scalars("Pmhst", "missionHist", ",")
        .scalars("Pbhst", "bbHist", ",")
        .scalars("Prfs", "roofs", ",")
        .scalars("Plfs", "lifts", ",")
        .scalars("Plbs", "lobbies", ",")
        .scalars("Pbf", "bannedFriends", ",")
        .leaf("Pls", "liftSpeed")
        .leaf("Ptp", "totalPoints")
        .leaf("Plrc", "lrc")
        .leaf("Plfc", "lfc")
        .leaf("Pcfd", "cfd")
        .leaf("Plbc", "lbc")
        .leaf("Plbbcp", "lbbcp")
        .leaf("Plcmiss", "lcmiss")
        .leaf("Plcg", "lcg")
        .leaf("Psfx", "sfx")
        .leaf("Pmus", "mus")
        .leaf("Pnts", "notes")
        .leaf("Pald", "autoLiftDisable")
        .leaf("Pvds", "videos")
        .leaf("Pvdc", "vidCheck")
        .leaf("Pbbn", "bbnotes")
        .leaf("Phchat", "hidechat")
        .leaf("Ptmi", "tmi")
        .leaf("PVF", "PVF")
        .leaf("PHP", "PHP")
        .record("Pmiss", "mission", mission_schema().clone())
        .record("Pdrmn", "doorman", bitizen_schema().clone())
        .leaf("Ppid", "playerID")
        .leaf("Preg", "playerRegistered")
        .records("Pbits", "bzns", bitizen_schema().clone(), "|")
        .records("Pstories", "stories", floor_schema().clone(), "|")
        .leaf("Pfrns", "friends")
        .records("PBB", "bbPosts", bitbook_post_schema().clone(), "|")
        .leaf("Plp", "bbpost")
        .leaf("nFreeBux", "nFreeBux")
        .leaf("padNCT", "padNCT")
        .leaf("padCC", "padCC")
        .leaf("padCRI", "padCRI")
        .leaf("ale", "ale")
        .build()
        .expect("save schema block keys are unique")
}

/// Schema for one bitizen record.
pub fn bitizen_schema() -> &'static BlockSchema {
    static SCHEMA: OnceLock<BlockSchema> = OnceLock::new();
    SCHEMA.get_or_init(build_bitizen)
}

/// Schema for one tower floor.
pub fn floor_schema() -> &'static BlockSchema {
    static SCHEMA: OnceLock<BlockSchema> = OnceLock::new();
    SCHEMA.get_or_init(build_floor)
}

/// Schema for the active mission record.
pub fn mission_schema() -> &'static BlockSchema {
    static SCHEMA: OnceLock<BlockSchema> = OnceLock::new();
    SCHEMA.get_or_init(build_mission)
}

/// Schema for one bitbook post (carries an embedded bitizen).
pub fn bitbook_post_schema() -> &'static BlockSchema {
    static SCHEMA: OnceLock<BlockSchema> = OnceLock::new();
    SCHEMA.get_or_init(build_bitbook_post)
}

/// Schema for a full top-level save.
pub fn save_schema() -> &'static BlockSchema {
    static SCHEMA: OnceLock<BlockSchema> = OnceLock::new();
    SCHEMA.get_or_init(build_save)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::parse;
    use crate::encode::concat;

    #[test]
    fn all_catalog_schemas_build() {
        assert!(!bitizen_schema().is_empty());
        assert!(!floor_schema().is_empty());
        assert!(!mission_schema().is_empty());
        assert!(!bitbook_post_schema().is_empty());
        assert!(save_schema().len() > 50);
    }

    #[test]
    fn bitizen_attribute_tuple_has_expected_width() {
        assert_eq!(BITIZEN_ATTRIBUTES.len(), 28);
    }

    #[test]
    fn save_version_block_is_declared() {
        let (key, rule) = save_schema().entry_for_field("ver").unwrap();
        assert_eq!(key, "Pver");
        assert_eq!(rule.shape(), "leaf");
    }

    #[test]
    fn representative_save_round_trips() {
        let wire = concat_wire(&[
            "[Pc]44745[Pc]",
            "[Pb]130[Pb]",
            "[Pver]3.14.0[Pver]",
            "[Pcos]c1,c2[Pcos]",
            "[Pdrmn][h]2[h][w]5[w][BA]1,4,9,2,14,3,7,0,11,6,1,2,0,0,0,0,0,0,1,4,8,0,0,4,9,0,3,1[BA][Pdrmn]",
            "[Pbits][h]0[h][w]1[w][BA]0,7,2,5,20,1,3,0,4,2,1,5,0,0,0,0,1,0,0,2,6,0,0,0,1,9,0,2[BA]|[h]1[h][w]2[w][BA]1,3,8,9,1,0,2,0,7,9,0,0,1,3,0,0,0,1,0,5,2,1,4,3,0,0,7,9[BA][Pbits]",
            "[Pstories][Ff]101[Ff][Fl]3[Fl][Fstk]10,20,30[Fstk]|[Ff]205[Ff][Fl]1[Fl][Fstk]0,0,5[Fstk][Pstories]",
            "[Pfrns]9GV59|BPQSY[Pfrns]",
        ]);

        let record = parse(&wire, save_schema());
        assert_eq!(concat(&record, save_schema()).unwrap(), wire);
        assert_eq!(record.scalar("ver"), Some("3.14.0"));
        assert_eq!(
            record.get("stories").unwrap().as_list().unwrap().len(),
            2
        );
    }

    fn concat_wire(segments: &[&str]) -> String {
        segments.concat()
    }
}
