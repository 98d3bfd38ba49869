//! The naming contract shared with the C test harness.
//!
//! Identifier fields are minijinja snippets rendered with `frag`, `sched` and
//! `edits` in scope (each the dimension ident), plus the `upper_snake`
//! filter. The defaults match the fixtures, check routines and `tc_chain`
//! group declared in `qtdemux.c`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::Error;

pub const CONFIG_ENV: &str = "EDIT_LIST_TESTGEN_CONFIG";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Naming {
    pub test_name: String,
    pub fixture: String,
    pub check_routine: String,
    pub scheduling: String,
    pub test_group: String,
    pub register: String,
    pub register_failing: String,
    /// Command named in the banners as the way to regenerate.
    pub generator: String,
    pub implementations_file: String,
    pub calls_file: String,
}

impl Default for Naming {
    fn default() -> Self {
        Naming {
            test_name: "test_qtdemux_edit_lists_{{ frag }}_{{ sched }}_{{ edits }}".to_string(),
            fixture: "ibpibp_{{ frag }}_template".to_string(),
            check_routine: "test_qtdemux_edit_lists_{{ edits }}".to_string(),
            scheduling: "TEST_SCHEDULING_{{ sched | upper_snake }}".to_string(),
            test_group: "tc_chain".to_string(),
            register: "tcase_add_test".to_string(),
            register_failing: "tcase_skip_failing_test".to_string(),
            generator: "edit-list-testgen".to_string(),
            implementations_file: "implementations.gen.cpp".to_string(),
            calls_file: "calls.gen.cpp".to_string(),
        }
    }
}

impl Naming {
    pub fn from_toml(src: &str) -> Result<Self, Error> {
        Ok(toml::from_str(src)?)
    }

    pub fn load(path: &Path) -> Result<Self, Error> {
        let src = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&src)
    }

    /// Loads `path` if given, then the file named by [`CONFIG_ENV`], falling
    /// back to the defaults when neither is set.
    pub fn resolve(path: Option<&Path>) -> Result<Self, Error> {
        if let Some(path) = path {
            return Self::load(path);
        }
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::load(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }
}
