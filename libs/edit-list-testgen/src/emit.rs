use std::collections::HashSet;
use std::fmt;
use std::path::{Component, Path};

use convert_case::{Case, Casing};
use minijinja::{Environment, context};
use serde::Serialize;

use crate::case::{CaseSet, PlannedCase};
use crate::naming::Naming;
use crate::Error;

static IMPLEMENTATIONS_TMPL: &str = include_str!("./implementations.cpp.jinja");
static CALLS_TMPL: &str = include_str!("./calls.cpp.jinja");

/// Everything the templates need to know about one case.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct CaseView {
    pub name: String,
    pub fixture: String,
    pub check_routine: String,
    pub scheduling: String,
    pub register: String,
    pub group: String,
    pub broken: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifacts {
    pub implementations: String,
    pub calls: String,
    pub summary: Summary,
}

/// The enabled/total report printed after a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub enabled: Vec<String>,
}

impl Summary {
    pub fn from_views(views: &[CaseView]) -> Self {
        Summary {
            total: views.len(),
            enabled: views
                .iter()
                .filter(|v| !v.broken)
                .map(|v| v.name.clone())
                .collect(),
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Enabled {}/{} tests:\n{}",
            self.enabled.len(),
            self.total,
            self.enabled.join("\n")
        )
    }
}

pub struct Emitter {
    env: Environment<'static>,
    naming: Naming,
}

impl Emitter {
    pub fn new(naming: Naming) -> Result<Self, Error> {
        artifact_path("implementations_file", &naming.implementations_file)?;
        artifact_path("calls_file", &naming.calls_file)?;
        if naming.implementations_file == naming.calls_file {
            return Err(Error::SameArtifactFile(naming.calls_file));
        }
        let mut env = Environment::new();
        env.add_template("implementations", IMPLEMENTATIONS_TMPL)?;
        env.add_template("calls", CALLS_TMPL)?;
        env.add_filter("upper_snake", |value: &str| value.to_case(Case::UpperSnake));
        Ok(Emitter { env, naming })
    }

    pub fn naming(&self) -> &Naming {
        &self.naming
    }

    pub fn view(&self, planned: &PlannedCase) -> Result<CaseView, Error> {
        let case = planned.case;
        let ctx = context! {
            frag => case.frag.ident(),
            sched => case.sched.ident(),
            edits => case.edits.ident(),
        };
        let register = if planned.is_broken() {
            &self.naming.register_failing
        } else {
            &self.naming.register
        };
        Ok(CaseView {
            name: identifier("test_name", self.env.render_str(&self.naming.test_name, &ctx)?)?,
            fixture: identifier("fixture", self.env.render_str(&self.naming.fixture, &ctx)?)?,
            check_routine: identifier(
                "check_routine",
                self.env.render_str(&self.naming.check_routine, &ctx)?,
            )?,
            scheduling: identifier(
                "scheduling",
                self.env.render_str(&self.naming.scheduling, &ctx)?,
            )?,
            register: identifier("register", register.clone())?,
            group: identifier("test_group", self.naming.test_group.clone())?,
            broken: planned.is_broken(),
        })
    }

    /// Renders one view per case, rejecting duplicate test names.
    pub fn views(&self, cases: &CaseSet) -> Result<Vec<CaseView>, Error> {
        let mut seen = HashSet::new();
        cases
            .iter()
            .map(|planned| {
                let view = self.view(planned)?;
                if !seen.insert(view.name.clone()) {
                    return Err(Error::DuplicateName(view.name));
                }
                Ok(view)
            })
            .collect()
    }

    pub fn render(&self, cases: &CaseSet) -> Result<Artifacts, Error> {
        let views = self.views(cases)?;
        let ctx = context! {
            generator => &self.naming.generator,
            cases => &views,
        };
        let implementations = self.env.get_template("implementations")?.render(&ctx)?;
        let calls = self.env.get_template("calls")?.render(&ctx)?;
        Ok(Artifacts {
            implementations,
            calls,
            summary: Summary::from_views(&views),
        })
    }
}

fn identifier(field: &'static str, value: String) -> Result<String, Error> {
    let mut chars = value.chars();
    let valid = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(value)
    } else {
        Err(Error::InvalidIdentifier { field, value })
    }
}

/// Artifact names must stay below the sink root.
fn artifact_path(field: &'static str, value: &str) -> Result<(), Error> {
    let mut components = Path::new(value).components().peekable();
    let valid = components.peek().is_some()
        && components.all(|c| matches!(c, Component::Normal(_)));
    if valid {
        Ok(())
    } else {
        Err(Error::InvalidArtifactPath {
            field,
            value: value.to_string(),
        })
    }
}
