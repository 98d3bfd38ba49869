use std::fmt;

use itertools::iproduct;
use strum::IntoEnumIterator;

use crate::classify::{self, Defect};
use crate::dimension::{EditListShape, FragMode, SchedMode};

/// One point of the test space. The triple is its identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TestCase {
    pub frag: FragMode,
    pub sched: SchedMode,
    pub edits: EditListShape,
}

impl fmt::Display for TestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}_{}_{}",
            self.frag.ident(),
            self.sched.ident(),
            self.edits.ident()
        )
    }
}

/// The full cross-product, fragmentation varying slowest and edit list
/// shape fastest.
pub fn enumerate() -> Vec<TestCase> {
    iproduct!(FragMode::iter(), SchedMode::iter(), EditListShape::iter())
        .map(|(frag, sched, edits)| TestCase { frag, sched, edits })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannedCase {
    pub case: TestCase,
    pub defect: Option<Defect>,
}

impl PlannedCase {
    pub fn is_broken(&self) -> bool {
        self.defect.is_some()
    }
}

/// The supported cases in enumeration order, each tagged with its known
/// defect.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaseSet {
    cases: Vec<PlannedCase>,
}

impl CaseSet {
    pub fn plan() -> Self {
        Self::from_cases(enumerate())
    }

    /// Filters and classifies `cases`, keeping their order.
    pub fn from_cases(cases: impl IntoIterator<Item = TestCase>) -> Self {
        let cases = cases
            .into_iter()
            .filter(classify::is_supported)
            .map(|case| {
                let defect = classify::currently_broken(&case);
                tracing::debug!(%case, ?defect, "planned case");
                PlannedCase { case, defect }
            })
            .collect();
        CaseSet { cases }
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlannedCase> + '_ {
        self.cases.iter()
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    pub fn enabled(&self) -> impl Iterator<Item = &PlannedCase> + '_ {
        self.cases.iter().filter(|c| !c.is_broken())
    }

    pub fn broken(&self) -> impl Iterator<Item = &PlannedCase> + '_ {
        self.cases.iter().filter(|c| c.is_broken())
    }
}

impl<'a> IntoIterator for &'a CaseSet {
    type Item = &'a PlannedCase;
    type IntoIter = std::slice::Iter<'a, PlannedCase>;

    fn into_iter(self) -> Self::IntoIter {
        self.cases.iter()
    }
}
