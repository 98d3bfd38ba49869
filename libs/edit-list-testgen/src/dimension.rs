//! The three orthogonal axes of the edit list test space.
//!
//! Variant declaration order is enumeration order, and the strum
//! serializations are the identifiers the downstream C fixtures and check
//! routines are named after (`ibpibp_non_frag_template`,
//! `test_qtdemux_edit_lists_basic_zero_dur`, ...). Renaming one is a breaking
//! change for the generated suite.

use strum::{EnumIter, EnumString, IntoStaticStr, VariantNames};

/// How the sample tables are laid out in the input movie.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    EnumIter,
    EnumString,
    IntoStaticStr,
    VariantNames,
)]
pub enum FragMode {
    /// A single upfront sample table in `moov`.
    #[strum(serialize = "non_frag")]
    NonFragmented,
    /// Sample tables split across `moof` fragments.
    #[strum(serialize = "frag")]
    Fragmented,
}

impl FragMode {
    pub fn is_fragmented(self) -> bool {
        matches!(self, FragMode::Fragmented)
    }

    pub fn ident(self) -> &'static str {
        self.into()
    }
}

/// The data delivery discipline driving the demuxer.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    EnumIter,
    EnumString,
    IntoStaticStr,
    VariantNames,
)]
#[strum(serialize_all = "snake_case")]
pub enum SchedMode {
    /// The demuxer requests data on demand and may seek.
    Pull,
    /// Data arrives unsolicited; seeks are forwarded upstream.
    Push,
    /// Data arrives unsolicited and upstream refuses seeks.
    PushNoSeek,
}

impl SchedMode {
    pub fn is_pull(self) -> bool {
        matches!(self, SchedMode::Pull)
    }

    pub fn ident(self) -> &'static str {
        self.into()
    }
}

/// The shape of the `elst` box written into the test movie.
///
/// Each variant has a matching `test_qtdemux_edit_lists_<ident>` check
/// routine on the C side.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    EnumIter,
    EnumString,
    IntoStaticStr,
    VariantNames,
)]
#[strum(serialize_all = "snake_case")]
pub enum EditListShape {
    /// No `edts` box at all.
    NoEdts,
    /// A single edit clipping the start of the media.
    Basic,
    /// As [`EditListShape::Basic`] with a zero segment duration.
    BasicZeroDur,
    /// As [`EditListShape::BasicZeroDur`] with the `mehd` box removed.
    BasicZeroDurNoMehd,
    /// An empty edit followed by a single clipping edit.
    BasicEmptyEditStart,
    /// Two edits skipping a span of frames.
    Skipping,
    /// As [`EditListShape::Skipping`], resuming on a non random access point.
    SkippingNonRap,
    /// An empty edit at the start, then a clipping edit.
    EmptyEditStartThenClip,
    /// An empty edit between two media edits.
    EmptyEditMiddle,
    /// Two edits presenting later media before earlier media.
    Reorder,
    /// Two edits presenting the same media twice.
    Repeating,
}

impl EditListShape {
    pub fn ident(self) -> &'static str {
        self.into()
    }

    /// Membership in the basic family, the only shapes push scheduling can
    /// reach.
    pub fn basic_family(self) -> Option<BasicFamily> {
        match self {
            EditListShape::Basic => Some(BasicFamily::Basic),
            EditListShape::BasicZeroDur => Some(BasicFamily::ZeroDur),
            EditListShape::BasicZeroDurNoMehd => Some(BasicFamily::ZeroDurNoMehd),
            EditListShape::BasicEmptyEditStart => Some(BasicFamily::EmptyEditStart),
            EditListShape::NoEdts
            | EditListShape::Skipping
            | EditListShape::SkippingNonRap
            | EditListShape::EmptyEditStartThenClip
            | EditListShape::EmptyEditMiddle
            | EditListShape::Reorder
            | EditListShape::Repeating => None,
        }
    }

    pub fn is_basic(self) -> bool {
        self.basic_family().is_some()
    }
}

/// The single-segment edit lists, optionally preceded by an empty edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum BasicFamily {
    Basic,
    ZeroDur,
    ZeroDurNoMehd,
    EmptyEditStart,
}

impl From<BasicFamily> for EditListShape {
    fn from(family: BasicFamily) -> Self {
        match family {
            BasicFamily::Basic => EditListShape::Basic,
            BasicFamily::ZeroDur => EditListShape::BasicZeroDur,
            BasicFamily::ZeroDurNoMehd => EditListShape::BasicZeroDurNoMehd,
            BasicFamily::EmptyEditStart => EditListShape::BasicEmptyEditStart,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_idents_match_fixture_names() {
        assert_eq!(FragMode::NonFragmented.ident(), "non_frag");
        assert_eq!(FragMode::Fragmented.ident(), "frag");
        assert_eq!(SchedMode::PushNoSeek.ident(), "push_no_seek");
        assert_eq!(EditListShape::NoEdts.ident(), "no_edts");
        assert_eq!(
            EditListShape::BasicZeroDurNoMehd.ident(),
            "basic_zero_dur_no_mehd"
        );
        assert_eq!(EditListShape::SkippingNonRap.ident(), "skipping_non_rap");
        assert_eq!(
            EditListShape::EmptyEditStartThenClip.ident(),
            "empty_edit_start_then_clip"
        );
    }

    #[test]
    fn test_axis_sizes() {
        assert_eq!(FragMode::iter().count(), 2);
        assert_eq!(SchedMode::iter().count(), 3);
        assert_eq!(EditListShape::iter().count(), 11);
        assert_eq!(EditListShape::VARIANTS.len(), 11);
    }

    #[test]
    fn test_ident_parses_back() {
        for shape in EditListShape::iter() {
            assert_eq!(EditListShape::from_str(shape.ident()), Ok(shape));
        }
        assert_eq!(SchedMode::from_str("push_no_seek"), Ok(SchedMode::PushNoSeek));
        assert!(FragMode::from_str("fragmented").is_err());
    }

    #[test]
    fn test_basic_family_round_trips() {
        for family in BasicFamily::iter() {
            let shape = EditListShape::from(family);
            assert_eq!(shape.basic_family(), Some(family));
        }
        let basic = EditListShape::iter().filter(|s| s.is_basic()).count();
        assert_eq!(basic, BasicFamily::iter().count());
    }

    #[test]
    fn test_basic_family_agrees_with_ident_prefix() {
        for shape in EditListShape::iter() {
            assert_eq!(shape.is_basic(), shape.ident().starts_with("basic"));
        }
    }
}
