//! Per-schema transformation
//!
//! Each schema goes through three steps, in this order: header merge,
//! `$id` template resolution and reference rewriting. Templating has to run
//! after the merge because it works on the `$id` the header just inserted.

use crate::header::{Header, ID_KEY};
use crate::model::{OpenApiDocument, value_kind};
use crate::refs::{RefStyle, rewrite_refs};
use crate::template::{TemplateContext, unresolved_placeholders};
use serde_yaml::{Mapping, Value};
use tracing::{debug, warn};

/// A schema ready to be written as a standalone document
#[derive(Debug, Clone, PartialEq)]
pub struct TransformedSchema {
    /// Name of the schema in `components.schemas`
    pub name: String,
    /// The standalone document
    pub document: Mapping,
    /// Number of `$ref` values rewritten
    pub rewritten_refs: usize,
}

impl TransformedSchema {
    /// Output file name, `<name>.yaml`
    pub fn file_name(&self) -> String {
        format!("{}.yaml", self.name)
    }
}

/// Applies header, templating and reference rewriting to schemas of one document
#[derive(Debug, Clone)]
pub struct SchemaTransformer {
    header: Header,
    project: String,
    version: Option<String>,
    ref_style: RefStyle,
}

impl SchemaTransformer {
    pub fn new(
        header: Header,
        project: impl Into<String>,
        version: Option<String>,
        ref_style: RefStyle,
    ) -> Self {
        Self {
            header,
            project: project.into(),
            version,
            ref_style,
        }
    }

    /// Transformer using the `info.version` of `document`
    pub fn for_document(
        header: Header,
        project: impl Into<String>,
        document: &OpenApiDocument,
        ref_style: RefStyle,
    ) -> Self {
        Self::new(header, project, document.version(), ref_style)
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn ref_style(&self) -> RefStyle {
        self.ref_style
    }

    /// Turn one `components.schemas` entry into a standalone document
    pub fn transform(&self, name: &str, schema: Value) -> TransformedSchema {
        let schema = match schema {
            Value::Mapping(schema) => schema,
            other => {
                warn!(
                    "Schema '{}' is a {}, not a mapping; extracting metadata only",
                    name,
                    value_kind(&other)
                );
                Mapping::new()
            }
        };

        let mut document = self.header.merge_into(schema, name, self.version());

        let context = TemplateContext::new(name, &self.project, self.version());
        if context.resolve_id(&mut document) {
            if let Some(id) = document.get(ID_KEY).and_then(Value::as_str) {
                let leftover = unresolved_placeholders(id);
                if !leftover.is_empty() {
                    debug!("Unresolved placeholders in $id of '{}': {:?}", name, leftover);
                }
            }
        }

        let rewritten_refs = rewrite_refs(&mut document, self.ref_style);
        debug!("Schema '{}': {} reference(s) rewritten", name, rewritten_refs);

        TransformedSchema {
            name: name.to_string(),
            document,
            rewritten_refs,
        }
    }

    /// Transform every schema of `document`, in document order
    pub fn transform_all(&self, document: &OpenApiDocument) -> crate::Result<Vec<TransformedSchema>> {
        Ok(document
            .schema_entries()?
            .into_iter()
            .map(|(name, schema)| self.transform(&name, schema))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::DocumentLoader;

    const DOCUMENT: &str = r##"
openapi: 3.0.2
info:
  title: Widget API
  version: "1.0"
components:
  schemas:
    Widget:
      type: object
      properties:
        a:
          type: string
        b:
          $ref: "#/components/schemas/Part"
        c:
          type: array
          items:
            $ref: "#/components/schemas/Part"
    Part:
      type: string
    Shape:
      oneOf:
        - $ref: "#/components/schemas/Widget"
        - type: "null"
"##;

    fn header() -> Header {
        DocumentLoader::new()
            .load_header_from_yaml(
                "\"$schema\": https://json-schema.org/draft/2020-12/schema\n\"$id\": https://x/__project__/__schema__/__schemaversion__\n",
            )
            .unwrap()
    }

    fn keys(mapping: &Mapping) -> Vec<&str> {
        mapping.keys().filter_map(Value::as_str).collect()
    }

    fn transform_all(source: &str, ref_style: RefStyle) -> Vec<TransformedSchema> {
        let document = DocumentLoader::new().load_from_yaml(source).unwrap();
        SchemaTransformer::for_document(header(), "demo", &document, ref_style)
            .transform_all(&document)
            .unwrap()
    }

    #[test]
    fn test_full_transformation() {
        let schemas = transform_all(DOCUMENT, RefStyle::YamlFragment);
        assert_eq!(schemas.len(), 3);

        let widget = &schemas[0];
        assert_eq!(widget.name, "Widget");
        assert_eq!(widget.file_name(), "Widget.yaml");
        assert_eq!(widget.rewritten_refs, 2);
        assert_eq!(
            keys(&widget.document),
            vec!["$schema", "$id", "version", "title", "type", "properties"]
        );
        assert_eq!(
            widget.document.get("$id").and_then(Value::as_str),
            Some("https://x/demo/Widget/1.0")
        );

        let properties = widget
            .document
            .get("properties")
            .and_then(Value::as_mapping)
            .unwrap();
        assert_eq!(keys(properties), vec!["a", "b", "c"]);
        assert_eq!(
            properties["b"].get("$ref").and_then(Value::as_str),
            Some("Part.yaml#/")
        );
        assert_eq!(
            properties["c"]["items"].get("$ref").and_then(Value::as_str),
            Some("Part.yaml#/")
        );
    }

    #[test]
    fn test_one_of_schema_uses_relative_style() {
        let schemas = transform_all(DOCUMENT, RefStyle::Relative);
        let shape = &schemas[2];

        assert_eq!(shape.rewritten_refs, 1);
        let alternatives = shape
            .document
            .get("oneOf")
            .and_then(Value::as_sequence)
            .unwrap();
        assert_eq!(
            alternatives[0].get("$ref").and_then(Value::as_str),
            Some("./Widget")
        );
        assert_eq!(alternatives[1].get("type").and_then(Value::as_str), Some("null"));
    }

    #[test]
    fn test_unresolved_version_stays_literal() {
        let source = DOCUMENT.replace("  version: \"1.0\"\n", "");
        let schemas = transform_all(&source, RefStyle::YamlFragment);

        let part = &schemas[1];
        assert_eq!(
            part.document.get("$id").and_then(Value::as_str),
            Some("https://x/demo/Part/__schemaversion__")
        );
        assert!(part.document.get("version").is_none());
    }

    #[test]
    fn test_plain_schema_only_gains_metadata() {
        let schemas = transform_all(DOCUMENT, RefStyle::YamlFragment);
        let part = &schemas[1];

        assert_eq!(part.rewritten_refs, 0);
        assert_eq!(
            keys(&part.document),
            vec!["$schema", "$id", "version", "title", "type"]
        );
        assert_eq!(part.document.get("type").and_then(Value::as_str), Some("string"));
    }

    #[test]
    fn test_non_mapping_schema_still_yields_document() {
        let transformer =
            SchemaTransformer::new(Header::default(), "demo", None, RefStyle::YamlFragment);
        let transformed = transformer.transform("Anything", Value::Bool(true));

        assert_eq!(keys(&transformed.document), vec!["title"]);
        assert_eq!(transformed.rewritten_refs, 0);
    }

    #[test]
    fn test_missing_id_is_not_an_error() {
        let transformer =
            SchemaTransformer::new(Header::default(), "demo", Some("1.0".into()), RefStyle::YamlFragment);
        let schema: Value = serde_yaml::from_str("type: integer\n").unwrap();
        let transformed = transformer.transform("Count", schema);

        assert!(transformed.document.get("$id").is_none());
        assert_eq!(keys(&transformed.document), vec!["version", "title", "type"]);
    }
}
