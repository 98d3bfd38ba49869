use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    #[error("io error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),
    #[error("toml parsing failed")]
    Config(#[from] toml::de::Error),
    #[error("{field} rendered to {value:?}, which is not a C identifier")]
    #[diagnostic(help("check the `{field}` entry of the naming config"))]
    InvalidIdentifier { field: &'static str, value: String },
    #[error("test name {0} is generated more than once")]
    #[diagnostic(help("test_name must include frag, sched and edits"))]
    DuplicateName(String),
    #[error("{field} is {value:?}, which is not a plain relative file name")]
    #[diagnostic(help("artifact files are written below --out-dir and may not leave it"))]
    InvalidArtifactPath { field: &'static str, value: String },
    #[error("implementations_file and calls_file are both {0:?}")]
    #[diagnostic(help("the two artifacts need distinct file names"))]
    SameArtifactFile(String),
    #[error("generated files are out of date: {}", display_paths(.0))]
    #[diagnostic(help("re-run edit-list-testgen to regenerate them"))]
    Stale(Vec<PathBuf>),
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
