//! Full-stack codec round trips over the catalog schema.

use skysync::codec::catalog::{save_schema, BITIZEN_ATTRIBUTES};
use skysync::codec::{
    compress_save, concat, decompress_save, parse, SaveValue,
};

fn attributes(seed: u32) -> String {
    (0..BITIZEN_ATTRIBUTES.len() as u32)
        .map(|i| ((seed + i) % 10).to_string())
        .collect::<Vec<_>>()
        .join(",")
}

fn bitizen(home: u32, seed: u32) -> String {
    format!("[h]{home}[h][w]{}[w][BA]{}[BA]", home + 1, attributes(seed))
}

fn sample_save() -> String {
    [
        "[Pc]44745[Pc]".to_string(),
        "[Pb]130[Pb]".to_string(),
        "[Pmg]12[Pmg]".to_string(),
        "[Pver]3.14.0[Pver]".to_string(),
        "[Pln]Skyline[Pln]".to_string(),
        "[Pcos]c07,c12[Pcos]".to_string(),
        "[Pbhst]4,9,17[Pbhst]".to_string(),
        "[Ptp]4620[Ptp]".to_string(),
        format!("[Pdrmn]{}[Pdrmn]", bitizen(2, 3)),
        format!("[Pbits]{}|{}|{}[Pbits]", bitizen(0, 1), bitizen(1, 5), bitizen(4, 8)),
        "[Pstories][Fs]0[Fs][Ff]101[Ff][Fl]3[Fl][Fstk]10,20,30[Fstk][Fn]Sushi Bar[Fn]|[Fs]1[Fs][Ff]205[Ff][Fl]1[Fl][Fstk]0,0,5[Fstk][Fn]Book Store[Fn][Pstories]".to_string(),
        "[Pfrns]9GV59|BPQSY[Pfrns]".to_string(),
    ]
    .concat()
}

#[test]
fn canonical_save_round_trips_byte_for_byte() {
    let wire = sample_save();
    let record = parse(&wire, save_schema());
    assert_eq!(concat(&record, save_schema()).unwrap(), wire);
}

#[test]
fn decoded_record_round_trips_semantically() {
    let wire = sample_save();
    let record = parse(&wire, save_schema());
    let reencoded = concat(&record, save_schema()).unwrap();
    assert_eq!(parse(&reencoded, save_schema()), record);
}

#[test]
fn compress_then_decompress_is_identity_over_the_block_string() {
    let wire = sample_save();
    let compressed = compress_save(&wire).unwrap();
    assert_eq!(decompress_save(&compressed).unwrap(), wire);
}

#[test]
fn full_pipeline_preserves_deep_structure() {
    let wire = sample_save();
    let compressed = compress_save(&wire).unwrap();
    let record = parse(&decompress_save(&compressed).unwrap(), save_schema());

    let bitizens = record.get("bzns").unwrap().as_list().unwrap();
    assert_eq!(bitizens.len(), 3);
    let first = bitizens[0].as_record().unwrap();
    assert_eq!(first.scalar("homeIndex"), Some("0"));
    let attributes = first.get("attributes").unwrap().as_record().unwrap();
    assert_eq!(attributes.len(), BITIZEN_ATTRIBUTES.len());
    assert_eq!(attributes.scalar("male"), Some("1"));

    let stories = record.get("stories").unwrap().as_list().unwrap();
    assert_eq!(
        stories[0].as_record().unwrap().scalar("floorName"),
        Some("Sushi Bar")
    );
    assert_eq!(
        stories[1].as_record().unwrap().get("stocks"),
        Some(&SaveValue::List(vec![
            SaveValue::Scalar("0".into()),
            SaveValue::Scalar("0".into()),
            SaveValue::Scalar("5".into()),
        ]))
    );
}

#[test]
fn missing_blocks_never_fail_a_decode() {
    let record = parse("[Pc]1[Pc]", save_schema());
    assert_eq!(record.scalar("coins"), Some("1"));
    assert!(!record.contains("bzns"));
    assert!(!record.contains("stories"));
    assert!(!record.contains("doorman"));
}
