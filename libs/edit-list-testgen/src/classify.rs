//! Which combinations get a test, and which of those are known to fail.
//!
//! Both predicates are ordered rule lists evaluated first match wins. The
//! `supported` rules describe the architectural scope of qtdemux and should
//! rarely change. The broken rules are a defect list that is expected to
//! shrink as qtdemux is fixed; deleting a rule re-enables its tests without
//! touching coverage.

use std::fmt;

use crate::case::TestCase;
use crate::dimension::EditListShape;

/// Why a combination has no test at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unsupported {
    /// Only fragmented movies carry a `mehd` box that can be removed.
    NoDurationBoxOutsideFragmented,
    /// Push scheduling reacts to whatever it is fed and only handles the
    /// basic family (or no edit list).
    PushRequiresBasicEdits,
}

impl Unsupported {
    pub fn reason(self) -> &'static str {
        match self {
            Unsupported::NoDurationBoxOutsideFragmented => {
                "there is no mehd box to remove in non-fragmented media"
            }
            Unsupported::PushRequiresBasicEdits => {
                "push scheduling only supports basic edit lists"
            }
        }
    }
}

/// Returns the first scope rule that rejects `case`.
pub fn unsupported(case: &TestCase) -> Option<Unsupported> {
    if !case.frag.is_fragmented() && case.edits == EditListShape::BasicZeroDurNoMehd {
        return Some(Unsupported::NoDurationBoxOutsideFragmented);
    }
    if case.sched.is_pull() {
        return None;
    }
    if case.edits == EditListShape::NoEdts || case.edits.is_basic() {
        None
    } else {
        Some(Unsupported::PushRequiresBasicEdits)
    }
}

pub fn is_supported(case: &TestCase) -> bool {
    unsupported(case).is_none()
}

/// A known qtdemux defect that makes a supported test fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Defect {
    /// Push mode takes the duration from `min(mvhd, mdhd)` instead of the
    /// sample table, so presentation ends early and the last frames are lost.
    UnreliablePushDuration,
    /// After crossing into the next edit, the frame following the last frame
    /// before the edit in decode order is wrongly emitted.
    FragmentedSkipLeak,
    /// Empty edits are ignored in fragmented media.
    FragmentedEmptyEditIgnored,
    /// Fragmented output follows track decode order from the start of the
    /// track, with segments only emitted when an edit boundary is crossed.
    FragmentedReorderUnsupported,
}

impl Defect {
    pub fn reason(self) -> &'static str {
        match self {
            Defect::UnreliablePushDuration => {
                "duration comes from min(mvhd, mdhd) instead of the sample table, truncating playback"
            }
            Defect::FragmentedSkipLeak => {
                "the frame after the pre-edit boundary in decode order is emitted after the edit"
            }
            Defect::FragmentedEmptyEditIgnored => "empty edits are ignored in fragmented media",
            Defect::FragmentedReorderUnsupported => {
                "fragmented output follows decode order, so frames cannot be reordered or repeated"
            }
        }
    }
}

/// One entry of the broken rule list.
pub struct BrokenRule {
    pub defect: Defect,
    pub matches: fn(&TestCase) -> bool,
}

pub static BROKEN_RULES: &[BrokenRule] = &[
    BrokenRule {
        defect: Defect::UnreliablePushDuration,
        matches: push_without_edts,
    },
    BrokenRule {
        defect: Defect::FragmentedSkipLeak,
        matches: fragmented_skipping,
    },
    BrokenRule {
        defect: Defect::FragmentedEmptyEditIgnored,
        matches: fragmented_empty_edit,
    },
    BrokenRule {
        defect: Defect::FragmentedReorderUnsupported,
        matches: fragmented_pull_reorder,
    },
];

fn push_without_edts(c: &TestCase) -> bool {
    !c.sched.is_pull() && c.edits == EditListShape::NoEdts
}

fn fragmented_skipping(c: &TestCase) -> bool {
    c.frag.is_fragmented()
        && matches!(
            c.edits,
            EditListShape::Skipping | EditListShape::SkippingNonRap
        )
}

fn fragmented_empty_edit(c: &TestCase) -> bool {
    c.frag.is_fragmented()
        && matches!(
            c.edits,
            EditListShape::EmptyEditStartThenClip | EditListShape::EmptyEditMiddle
        )
}

fn fragmented_pull_reorder(c: &TestCase) -> bool {
    c.sched.is_pull()
        && c.frag.is_fragmented()
        && matches!(c.edits, EditListShape::Reorder | EditListShape::Repeating)
}

/// Returns the defect a supported case is registered as failing for.
///
/// Unsupported cases are never broken: they do not exist in the suite.
pub fn currently_broken(case: &TestCase) -> Option<Defect> {
    if !is_supported(case) {
        return None;
    }
    BROKEN_RULES
        .iter()
        .find(|rule| (rule.matches)(case))
        .map(|rule| rule.defect)
}

pub fn is_currently_broken(case: &TestCase) -> bool {
    currently_broken(case).is_some()
}

/// Where a case of the full cross-product ends up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Enabled,
    Broken(Defect),
    Unsupported(Unsupported),
}

pub fn status(case: &TestCase) -> Status {
    if let Some(scope) = unsupported(case) {
        return Status::Unsupported(scope);
    }
    match currently_broken(case) {
        Some(defect) => Status::Broken(defect),
        None => Status::Enabled,
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Enabled => write!(f, "enabled"),
            Status::Broken(defect) => write!(f, "broken: {}", defect.reason()),
            Status::Unsupported(scope) => write!(f, "unsupported: {}", scope.reason()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dimension::{FragMode, SchedMode};

    fn case(frag: FragMode, sched: SchedMode, edits: EditListShape) -> TestCase {
        TestCase { frag, sched, edits }
    }

    #[test]
    fn test_no_mehd_requires_fragmented() {
        let c = case(
            FragMode::NonFragmented,
            SchedMode::Pull,
            EditListShape::BasicZeroDurNoMehd,
        );
        assert_eq!(
            unsupported(&c),
            Some(Unsupported::NoDurationBoxOutsideFragmented)
        );

        let c = case(
            FragMode::Fragmented,
            SchedMode::Pull,
            EditListShape::BasicZeroDurNoMehd,
        );
        assert!(is_supported(&c));
        assert_eq!(currently_broken(&c), None);
    }

    #[test]
    fn test_push_rejects_non_basic() {
        let c = case(FragMode::NonFragmented, SchedMode::Push, EditListShape::Reorder);
        assert_eq!(unsupported(&c), Some(Unsupported::PushRequiresBasicEdits));

        let c = case(
            FragMode::Fragmented,
            SchedMode::PushNoSeek,
            EditListShape::EmptyEditMiddle,
        );
        assert_eq!(unsupported(&c), Some(Unsupported::PushRequiresBasicEdits));
    }

    #[test]
    fn test_push_accepts_basic_family() {
        for edits in [
            EditListShape::NoEdts,
            EditListShape::Basic,
            EditListShape::BasicZeroDur,
            EditListShape::BasicEmptyEditStart,
        ] {
            assert!(is_supported(&case(FragMode::NonFragmented, SchedMode::Push, edits)));
        }
    }

    #[test]
    fn test_rule_unreliable_push_duration() {
        let c = case(FragMode::Fragmented, SchedMode::Push, EditListShape::NoEdts);
        assert!(is_supported(&c));
        assert_eq!(currently_broken(&c), Some(Defect::UnreliablePushDuration));

        let c = case(FragMode::NonFragmented, SchedMode::Pull, EditListShape::NoEdts);
        assert_eq!(currently_broken(&c), None);
    }

    #[test]
    fn test_rule_fragmented_skip_leak() {
        let c = case(FragMode::Fragmented, SchedMode::Pull, EditListShape::SkippingNonRap);
        assert_eq!(currently_broken(&c), Some(Defect::FragmentedSkipLeak));

        let c = case(FragMode::NonFragmented, SchedMode::Pull, EditListShape::Skipping);
        assert_eq!(currently_broken(&c), None);
    }

    #[test]
    fn test_rule_fragmented_empty_edit_ignored() {
        let c = case(
            FragMode::Fragmented,
            SchedMode::Pull,
            EditListShape::EmptyEditStartThenClip,
        );
        assert_eq!(currently_broken(&c), Some(Defect::FragmentedEmptyEditIgnored));

        let c = case(FragMode::Fragmented, SchedMode::Pull, EditListShape::EmptyEditMiddle);
        assert_eq!(currently_broken(&c), Some(Defect::FragmentedEmptyEditIgnored));

        for edits in [
            EditListShape::EmptyEditStartThenClip,
            EditListShape::EmptyEditMiddle,
        ] {
            let c = case(FragMode::NonFragmented, SchedMode::Pull, edits);
            assert_eq!(currently_broken(&c), None);
        }
    }

    #[test]
    fn test_rule_fragmented_reorder_unsupported() {
        let c = case(FragMode::Fragmented, SchedMode::Pull, EditListShape::Reorder);
        assert_eq!(currently_broken(&c), Some(Defect::FragmentedReorderUnsupported));

        let c = case(FragMode::Fragmented, SchedMode::Pull, EditListShape::Repeating);
        assert_eq!(currently_broken(&c), Some(Defect::FragmentedReorderUnsupported));

        for edits in [EditListShape::Reorder, EditListShape::Repeating] {
            let c = case(FragMode::NonFragmented, SchedMode::Pull, edits);
            assert_eq!(currently_broken(&c), None);
        }
    }

    #[test]
    fn test_unsupported_is_never_broken() {
        // matches the skip leak rule, but push cannot reach skipping edits
        let c = case(FragMode::Fragmented, SchedMode::Push, EditListShape::Skipping);
        assert!((BROKEN_RULES[1].matches)(&c));
        assert_eq!(currently_broken(&c), None);
    }

    #[test]
    fn test_rule_order() {
        let defects: Vec<_> = BROKEN_RULES.iter().map(|r| r.defect).collect();
        assert_eq!(
            defects,
            [
                Defect::UnreliablePushDuration,
                Defect::FragmentedSkipLeak,
                Defect::FragmentedEmptyEditIgnored,
                Defect::FragmentedReorderUnsupported,
            ]
        );
    }

    #[test]
    fn test_status() {
        let c = case(FragMode::NonFragmented, SchedMode::Pull, EditListShape::Basic);
        assert_eq!(status(&c), Status::Enabled);

        let c = case(FragMode::Fragmented, SchedMode::Pull, EditListShape::Repeating);
        assert_eq!(
            status(&c),
            Status::Broken(Defect::FragmentedReorderUnsupported)
        );

        let c = case(FragMode::NonFragmented, SchedMode::Push, EditListShape::Skipping);
        assert_eq!(
            status(&c).to_string(),
            "unsupported: push scheduling only supports basic edit lists"
        );
    }
}
