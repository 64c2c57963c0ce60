//! Internal `$ref` rewriting
//!
//! References of the form `#/components/schemas/<Name>` point into the source
//! OpenAPI document. Once every schema lives in its own file they have to
//! address the sibling file instead. [`rewrite_ref`] is the only place that
//! knows the reference pattern and the target convention; the tree walk in
//! [`rewrite_refs`] only decides *where* to look.
//!
//! Scanned locations:
//! - each entry of `properties`, or each top-level entry when the schema has
//!   no `properties` mapping
//! - the `items` mapping of each scanned entry
//! - each alternative of a top-level `oneOf` sequence

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use std::fmt;
use std::str::FromStr;

pub const COMPONENTS_SCHEMAS_PREFIX: &str = "#/components/schemas/";
pub const REF_KEY: &str = "$ref";
pub const PROPERTIES_KEY: &str = "properties";
pub const ITEMS_KEY: &str = "items";
pub const ONE_OF_KEY: &str = "oneOf";

/// Addressing convention for rewritten references
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RefStyle {
    /// `Name.yaml#/`
    #[default]
    YamlFragment,
    /// `./Name`
    Relative,
}

impl RefStyle {
    /// Reference to the file extracted for `schema_name`
    pub fn target(self, schema_name: &str) -> String {
        match self {
            RefStyle::YamlFragment => format!("{schema_name}.yaml#/"),
            RefStyle::Relative => format!("./{schema_name}"),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RefStyle::YamlFragment => "yaml-fragment",
            RefStyle::Relative => "relative",
        }
    }
}

impl fmt::Display for RefStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RefStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "yaml-fragment" => Ok(RefStyle::YamlFragment),
            "relative" => Ok(RefStyle::Relative),
            other => Err(format!(
                "unknown reference style '{other}', expected 'yaml-fragment' or 'relative'"
            )),
        }
    }
}

/// Rewrite a single reference value.
///
/// Only `#/components/schemas/<Name>` with a plain, non-empty name matches.
/// Anything else (external files, deeper JSON pointers, already rewritten
/// values) yields `None` and must be left untouched.
pub fn rewrite_ref(value: &str, style: RefStyle) -> Option<String> {
    let name = value.strip_prefix(COMPONENTS_SCHEMAS_PREFIX)?;
    if name.is_empty() || name.contains('/') {
        return None;
    }
    Some(style.target(name))
}

/// Rewrite every internal reference of `schema` in place.
///
/// Returns the number of references rewritten.
pub fn rewrite_refs(schema: &mut Mapping, style: RefStyle) -> usize {
    let mut rewritten = 0;

    match schema.get_mut(PROPERTIES_KEY).and_then(Value::as_mapping_mut) {
        Some(properties) => {
            for (_, entry) in properties.iter_mut() {
                rewritten += rewrite_entry(entry, style);
            }
        }
        None => {
            for (_, entry) in schema.iter_mut() {
                rewritten += rewrite_entry(entry, style);
            }
        }
    }

    if let Some(alternatives) = schema.get_mut(ONE_OF_KEY).and_then(Value::as_sequence_mut) {
        for alternative in alternatives.iter_mut() {
            if let Some(alternative) = alternative.as_mapping_mut() {
                rewritten += usize::from(rewrite_ref_field(alternative, style));
            }
        }
    }

    rewritten
}

fn rewrite_entry(entry: &mut Value, style: RefStyle) -> usize {
    let Some(entry) = entry.as_mapping_mut() else {
        return 0;
    };

    let mut rewritten = usize::from(rewrite_ref_field(entry, style));
    if let Some(items) = entry.get_mut(ITEMS_KEY).and_then(Value::as_mapping_mut) {
        rewritten += usize::from(rewrite_ref_field(items, style));
    }
    rewritten
}

fn rewrite_ref_field(node: &mut Mapping, style: RefStyle) -> bool {
    let Some(slot) = node.get_mut(REF_KEY) else {
        return false;
    };
    let Some(target) = slot.as_str().and_then(|value| rewrite_ref(value, style)) else {
        return false;
    };

    *slot = Value::String(target);
    true
}
