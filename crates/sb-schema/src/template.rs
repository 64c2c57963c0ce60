//! `$id` template resolution
//!
//! Placeholders are literal substrings replaced by plain text substitution,
//! so substituted values need no escaping. The placeholder strings are
//! disjoint, which makes the substitution order irrelevant.

use crate::header::ID_KEY;
use regex::Regex;
use serde_yaml::{Mapping, Value};
use std::sync::LazyLock;

pub const SCHEMA_PLACEHOLDER: &str = "__schema__";
pub const PROJECT_PLACEHOLDER: &str = "__project__";
pub const SCHEMA_VERSION_PLACEHOLDER: &str = "__schemaversion__";
pub const VERSION_PLACEHOLDER: &str = "__version__";

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"__[a-z]+__").expect("placeholder pattern is valid"));

/// Values substituted into a template for one schema
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateContext<'a> {
    pub schema: &'a str,
    pub project: &'a str,
    /// `info.version` of the source document; version placeholders stay
    /// unresolved when this is `None`
    pub version: Option<&'a str>,
}

impl<'a> TemplateContext<'a> {
    pub fn new(schema: &'a str, project: &'a str, version: Option<&'a str>) -> Self {
        Self {
            schema,
            project,
            version,
        }
    }

    /// Substitute every known placeholder in `template`
    pub fn render(&self, template: &str) -> String {
        let mut rendered = template
            .replace(SCHEMA_PLACEHOLDER, self.schema)
            .replace(PROJECT_PLACEHOLDER, self.project);

        if let Some(version) = self.version {
            rendered = rendered
                .replace(SCHEMA_VERSION_PLACEHOLDER, version)
                .replace(VERSION_PLACEHOLDER, version);
        }

        rendered
    }

    /// Resolve the `$id` field of `schema` in place.
    ///
    /// Returns `false` without touching anything when `$id` is absent or not
    /// a string.
    pub fn resolve_id(&self, schema: &mut Mapping) -> bool {
        let Some(slot) = schema.get_mut(ID_KEY) else {
            return false;
        };
        let Some(template) = slot.as_str() else {
            return false;
        };

        let resolved = self.render(template);
        *slot = Value::String(resolved);
        true
    }
}

/// Placeholder-shaped tokens still present in `text`
pub fn unresolved_placeholders(text: &str) -> Vec<String> {
    PLACEHOLDER
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}
