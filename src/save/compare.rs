//! Save comparison.
//!
//! The servers only accept a pushed save they judge better than the one
//! they hold; these rules mirror that judgment so a client can predict (or
//! force) acceptance. "Better" is total points first, floor count as the
//! tie-breaker, with one special case for fresh towers whose points have
//! not started accumulating.

use skysync_codec::{SaveRecord, SaveValue};

/// Which of two saves the servers would keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BetterSave {
    First,
    Second,
}

/// Total points of a save; absent or non-numeric counts as zero.
pub fn total_points(save: &SaveRecord) -> i64 {
    save.scalar("totalPoints")
        .and_then(|points| points.parse().ok())
        .unwrap_or(0)
}

/// Number of stories in a save; absent counts as zero.
pub fn story_count(save: &SaveRecord) -> usize {
    save.get("stories")
        .and_then(SaveValue::as_list)
        .map(<[SaveValue]>::len)
        .unwrap_or(0)
}

/// Decide which save is better. Ties default to the second save, matching
/// the servers' preference for the incumbent.
pub fn which_save_is_better(first: &SaveRecord, second: &SaveRecord) -> BetterSave {
    let first_points = total_points(first);
    let second_points = total_points(second);

    // Fresh-tower special case: before points accumulate, floors decide.
    if first_points == 0 && second_points < 100 {
        if story_count(first) > story_count(second) {
            return BetterSave::First;
        }
        return BetterSave::Second;
    }

    if first_points != second_points {
        if first_points > second_points {
            return BetterSave::First;
        }
        return BetterSave::Second;
    }

    if story_count(first) > story_count(second) {
        return BetterSave::First;
    }
    if story_count(second) > story_count(first) {
        return BetterSave::Second;
    }
    BetterSave::Second
}

/// Raise `save`'s total points until the servers would prefer it over
/// `other`.
pub fn make_save_better_than(save: &mut SaveRecord, other: &SaveRecord) {
    let mut points = total_points(save);
    loop {
        points += 1;
        save.insert("totalPoints", SaveValue::Scalar(points.to_string()));
        if which_save_is_better(save, other) == BetterSave::First {
            return;
        }
    }
}
