//! Generates the qtdemux edit list test suite.
//!
//! The suite is the cross-product of fragmentation mode, scheduling mode and
//! edit list shape, narrowed to the combinations qtdemux is designed to
//! handle. Each surviving case becomes a `GST_START_TEST` block in
//! `implementations.gen.cpp` and a registration line in `calls.gen.cpp`;
//! cases with a known defect are registered with `tcase_skip_failing_test`
//! so they stay in the suite without failing it.

use std::path::Path;

pub mod case;
pub mod classify;
pub mod dimension;
pub mod emit;
pub mod error;
pub mod naming;
pub mod sink;

pub use case::{CaseSet, PlannedCase, TestCase};
pub use classify::{Defect, Status, Unsupported};
pub use dimension::{BasicFamily, EditListShape, FragMode, SchedMode};
pub use emit::{Artifacts, CaseView, Emitter, Summary};
pub use error::Error;
pub use naming::Naming;
pub use sink::{CheckSink, DirSink, MemorySink, OutputSink, ReportSink, StdoutReport};

/// Renders both artifacts and writes them to `out`, implementations first.
pub fn write_artifacts(naming: Naming, out: &mut dyn OutputSink) -> Result<Summary, Error> {
    let cases = CaseSet::plan();
    let emitter = Emitter::new(naming)?;
    let artifacts = emitter.render(&cases)?;
    let naming = emitter.naming();
    out.write(&naming.implementations_file, &artifacts.implementations)?;
    out.write(&naming.calls_file, &artifacts.calls)?;
    Ok(artifacts.summary)
}

/// Writes both artifacts, then reports the enabled tests once.
///
/// A failed write aborts the run before anything is reported.
pub fn generate(
    naming: Naming,
    out: &mut dyn OutputSink,
    report: &mut dyn ReportSink,
) -> Result<Summary, Error> {
    let summary = write_artifacts(naming, out)?;
    report.report(&summary.to_string());
    Ok(summary)
}

/// Verifies the artifacts under `root` match what [`generate`] would write.
pub fn check(naming: Naming, root: &Path) -> Result<Summary, Error> {
    let mut sink = CheckSink::new(root);
    let summary = write_artifacts(naming, &mut sink)?;
    sink.finish()?;
    Ok(summary)
}

/// Every case of the full cross-product with its classification.
pub fn matrix() -> Vec<(TestCase, Status)> {
    case::enumerate()
        .into_iter()
        .map(|case| (case, classify::status(&case)))
        .collect()
}
