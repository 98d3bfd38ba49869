//! Classification laws checked over the whole test space.

use std::collections::HashSet;

use edit_list_testgen::case::enumerate;
use edit_list_testgen::classify::{currently_broken, is_supported};
use edit_list_testgen::{CaseSet, EditListShape, Emitter, FragMode, Naming, SchedMode, TestCase};
use proptest::prelude::*;
use proptest::sample::select;
use strum::IntoEnumIterator;

fn any_case() -> impl Strategy<Value = TestCase> {
    (
        select(FragMode::iter().collect::<Vec<_>>()),
        select(SchedMode::iter().collect::<Vec<_>>()),
        select(EditListShape::iter().collect::<Vec<_>>()),
    )
        .prop_map(|(frag, sched, edits)| TestCase { frag, sched, edits })
}

proptest! {
    #[test]
    fn prop_pull_supports_everything_with_a_duration_box(case in any_case()) {
        prop_assume!(case.sched == SchedMode::Pull);
        let needs_mehd = case.edits == EditListShape::BasicZeroDurNoMehd;
        prop_assert_eq!(is_supported(&case), case.frag.is_fragmented() || !needs_mehd);
    }

    #[test]
    fn prop_push_only_supports_basic_edits(case in any_case()) {
        prop_assume!(case.sched != SchedMode::Pull);
        prop_assume!(case.frag.is_fragmented() || case.edits != EditListShape::BasicZeroDurNoMehd);
        let expected = case.edits == EditListShape::NoEdts || case.edits.ident().starts_with("basic");
        prop_assert_eq!(is_supported(&case), expected);
    }

    #[test]
    fn prop_broken_implies_supported(case in any_case()) {
        if currently_broken(&case).is_some() {
            prop_assert!(is_supported(&case));
        }
    }

    #[test]
    fn prop_names_are_injective(a in any_case(), b in any_case()) {
        prop_assume!(a != b);
        prop_assert_ne!(a.to_string(), b.to_string());
    }
}

#[test]
fn test_cardinality() {
    let all = enumerate();
    assert_eq!(
        all.len(),
        FragMode::iter().count() * SchedMode::iter().count() * EditListShape::iter().count()
    );
    assert_eq!(all.iter().collect::<HashSet<_>>().len(), all.len());
    assert!(CaseSet::plan().len() < all.len());
}

#[test]
fn test_emitted_names_unique() {
    let views = Emitter::new(Naming::default())
        .unwrap()
        .views(&CaseSet::plan())
        .unwrap();
    let names: HashSet<_> = views.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names.len(), views.len());
}
