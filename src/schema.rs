//! Expansion of type definitions into OpenAPI schema documents.

use std::collections::BTreeMap;

use regex::Regex;
use serde_yaml::{Mapping, Value};

use crate::{
    catalog::ZID_PATTERN, Body, Error, Form, Fragment, KeyDefinition, Link, Record, Result,
    TypeDefinition,
};

const DEFINITIONS_PATH: [&str; 2] = ["definitions", "objects"];

/// A generated schema, ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaDocument {
    pub zid: String,
    /// The `$id` of the document.
    pub id: String,
    pub comment: Option<String>,
    pub value: Value,
}

impl SchemaDocument {
    /// Renders the document as YAML, preceded by its comment line.
    ///
    /// Mapping keys are sorted so that the output is stable.
    pub fn to_yaml(&self) -> Result<String> {
        let mut contents = String::new();
        if let Some(comment) = &self.comment {
            contents.push_str("# ");
            contents.push_str(comment);
            contents.push('\n');
        }
        contents.push_str(&serde_yaml::to_string(&sorted(self.value.clone()))?);
        Ok(contents)
    }
}

/// Builds schema documents for one form, namespacing identifiers with a tag.
#[derive(Debug, Clone, Copy)]
pub struct SchemaBuilder<'a> {
    form: Form,
    tag: Option<&'a str>,
}

impl<'a> SchemaBuilder<'a> {
    pub fn new(form: Form, tag: Option<&'a str>) -> Self {
        Self { form, tag }
    }

    /// The `$id` of the document generated for the given ZID.
    pub fn document_id(&self, zid: &str) -> String {
        match self.tag {
            Some(tag) => format!("{}/{}", tag, zid),
            None => zid.to_string(),
        }
    }

    fn reference_for(name: &str) -> String {
        let mut path = vec!["#"];
        path.extend(DEFINITIONS_PATH);
        path.push(name);
        path.join("/")
    }

    fn ref_mapping(reference: String) -> Mapping {
        let mut mapping = Mapping::new();
        mapping.insert("$ref".into(), reference.into());
        mapping
    }

    fn ref_value(reference: String) -> Value {
        Value::Mapping(Self::ref_mapping(reference))
    }

    fn link(&self, link: &Link) -> Value {
        match link {
            Link::Internal(name) => Self::ref_value(Self::reference_for(name)),
            Link::External { zid, id } => Self::ref_value(format!(
                "{}{}",
                self.document_id(id.as_deref().unwrap_or(zid)),
                Self::reference_for(zid)
            )),
        }
    }

    fn fragment(&self, fragment: &Fragment) -> Value {
        match fragment {
            Fragment::Link(link) => self.link(link),
            Fragment::Map(entries) => Value::Mapping(
                entries
                    .iter()
                    .map(|(key, value)| (Value::from(key.as_str()), self.fragment(value)))
                    .collect(),
            ),
            Fragment::List(items) => {
                Value::Sequence(items.iter().map(|item| self.fragment(item)).collect())
            }
            Fragment::String(value) => Value::from(value.as_str()),
            Fragment::Bool(value) => Value::Bool(*value),
        }
    }

    /// The `Z1K1` of a record: a reference to the record's own type.
    fn special_z1k1(&self, zid: &str) -> Value {
        let normal = self.fragment(&Fragment::map([
            ("type", Fragment::string("object")),
            ("required", Fragment::strings(["Z1K1", "Z9K1"])),
            (
                "properties",
                Fragment::map([
                    (
                        "Z1K1",
                        Fragment::map([
                            ("type", Fragment::string("string")),
                            ("enum", Fragment::strings(["Z9"])),
                        ]),
                    ),
                    (
                        "Z9K1",
                        Fragment::map([
                            ("type", Fragment::string("string")),
                            ("enum", Fragment::strings([zid])),
                        ]),
                    ),
                ]),
            ),
            ("additionalProperties", Fragment::Bool(false)),
        ]));
        match self.form {
            Form::Normal => normal,
            Form::Canonical => {
                let bare = self.fragment(&Fragment::map([
                    ("type", Fragment::string("string")),
                    ("enum", Fragment::strings([zid])),
                ]));
                let mut mapping = Mapping::new();
                mapping.insert("oneOf".into(), Value::Sequence(vec![bare, normal]));
                Value::Mapping(mapping)
            }
        }
    }

    fn record(
        &self,
        key_pattern: &Regex,
        name: &str,
        zid: &str,
        record: &Record,
    ) -> Result<Mapping> {
        let mut schema = Mapping::new();

        let mut properties = Mapping::new();
        for (key, definition) in &record.keys {
            if !key_pattern.is_match(key) {
                return Err(Error::InvalidDefinition {
                    name: name.into(),
                    reason: format!("'{}' is not a ZID key", key),
                });
            }
            let value = match definition {
                KeyDefinition::Link(link) => self.link(link),
                KeyDefinition::Special => {
                    let mut all_of = Mapping::new();
                    all_of.insert(
                        "allOf".into(),
                        Value::Sequence(vec![
                            self.link(&Link::external("Z9")),
                            self.special_z1k1(zid),
                        ]),
                    );
                    Value::Mapping(all_of)
                }
            };
            properties.insert(key.as_str().into(), value);
        }

        let mut required: Vec<&str> = record
            .keys
            .iter()
            .map(|(key, _)| key.as_str())
            .filter(|key| {
                !record
                    .optional
                    .iter()
                    .any(|optional| optional.as_str() == *key)
            })
            .collect();
        required.sort();
        required.dedup();

        if !properties.is_empty() {
            schema.insert("properties".into(), Value::Mapping(properties));
        }
        if !required.is_empty() {
            schema.insert(
                "required".into(),
                Value::Sequence(required.into_iter().map(Value::from).collect()),
            );
        }
        if let Some(pattern_properties) = &record.pattern_properties {
            schema.insert("patternProperties".into(), self.fragment(pattern_properties));
        }
        schema.insert(
            "additionalProperties".into(),
            Value::Bool(record.additional_properties),
        );
        schema.insert("type".into(), "object".into());
        Ok(schema)
    }

    /// Builds the document for `zid` from its definition.
    ///
    /// The root definition is stored as `<zid>_literal`, and every auxiliary
    /// reference is expanded into its own entry of `definitions/objects`.
    pub fn build(&self, zid: &str, definition: &TypeDefinition) -> Result<SchemaDocument> {
        let key_pattern = Regex::new(ZID_PATTERN)?;
        let literal_name = format!("{}_literal", zid);

        let mut objects: BTreeMap<String, Mapping> = BTreeMap::new();
        objects.insert(
            zid.into(),
            Self::ref_mapping(Self::reference_for(&literal_name)),
        );

        let mut to_update: Vec<(String, &TypeDefinition)> = vec![(literal_name, definition)];
        while let Some((name, definition)) = to_update.pop() {
            tracing::debug!(%name, zid, "Expanding definition");
            for (reference, referenced) in &definition.references {
                to_update.push((reference.clone(), referenced));
            }

            let content = match &definition.body {
                Body::Literal(fragment) => match self.fragment(fragment) {
                    Value::Mapping(mapping) => mapping,
                    _ => {
                        return Err(Error::InvalidDefinition {
                            name,
                            reason: "a literal definition must be a mapping".into(),
                        })
                    }
                },
                Body::Record(record) => self.record(&key_pattern, &name, zid, record)?,
            };
            objects.entry(name).or_default().extend(content);
        }

        let id = self.document_id(zid);
        let objects: Mapping = objects
            .into_iter()
            .map(|(name, schema)| (Value::from(name), Value::Mapping(schema)))
            .collect();
        let [definitions_key, objects_key] = DEFINITIONS_PATH;
        let mut definitions = Mapping::new();
        definitions.insert(objects_key.into(), Value::Mapping(objects));

        let mut value = Mapping::new();
        value.insert("$id".into(), id.as_str().into());
        value.insert("$ref".into(), Self::reference_for(zid).into());
        value.insert(definitions_key.into(), Value::Mapping(definitions));

        Ok(SchemaDocument {
            zid: zid.into(),
            id,
            comment: definition.comment.clone(),
            value: Value::Mapping(value),
        })
    }
}

/// Recursively sorts the keys of every mapping.
fn sorted(value: Value) -> Value {
    match value {
        Value::Mapping(mapping) => {
            let mut entries: Vec<(Value, Value)> = mapping
                .into_iter()
                .map(|(key, value)| (key, sorted(value)))
                .collect();
            entries.sort_by(|(a, _), (b, _)| key_order(a).cmp(&key_order(b)));
            Value::Mapping(entries.into_iter().collect())
        }
        Value::Sequence(items) => Value::Sequence(items.into_iter().map(sorted).collect()),
        other => other,
    }
}

fn key_order(key: &Value) -> String {
    match key {
        Value::String(key) => key.clone(),
        other => serde_yaml::to_string(other).unwrap_or_default(),
    }
}
