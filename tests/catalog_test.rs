use regex::Regex;
use serde_yaml::Value;
use zschema_lib::*;

const DEFINITIONS_PREFIX: &str = "#/definitions/objects/";

fn collect_refs(value: &Value, refs: &mut Vec<String>) {
    match value {
        Value::Mapping(mapping) => {
            for (key, value) in mapping {
                if key.as_str() == Some("$ref") {
                    refs.push(value.as_str().unwrap().to_string());
                } else {
                    collect_refs(value, refs);
                }
            }
        }
        Value::Sequence(items) => items.iter().for_each(|item| collect_refs(item, refs)),
        _ => {}
    }
}

fn parse(document: &SchemaDocument) -> Value {
    serde_yaml::from_str(&document.to_yaml().unwrap()).unwrap()
}

#[test]
fn every_builtin_type_generates() {
    for form in Form::ALL {
        let generator = SchemaGenerator::new(form);
        for zid in generator.list() {
            println!("Processing {} in the {} form", zid, form);
            let document = parse(&generator.schema(&zid, Some("mytag")).unwrap());

            assert_eq!(document["$id"], Value::from(format!("mytag/{}", zid)));
            assert!(document["definitions"]["objects"]
                .get(format!("{}_literal", zid))
                .is_some());
        }
    }
}

#[test]
fn every_reference_resolves() {
    for form in Form::ALL {
        let generator = SchemaGenerator::new(form);
        let zids = generator.list();
        for zid in &zids {
            let document = parse(&generator.schema(zid, Some("mytag")).unwrap());
            let mut refs = vec![];
            collect_refs(&document, &mut refs);

            for reference in refs {
                let (document_id, name) = reference
                    .split_once(DEFINITIONS_PREFIX)
                    .unwrap_or_else(|| panic!("{}: malformed reference {}", zid, reference));
                let target = if document_id.is_empty() {
                    document.clone()
                } else {
                    let target_zid = document_id
                        .strip_prefix("mytag/")
                        .unwrap_or_else(|| panic!("{}: untagged reference {}", zid, reference));
                    assert!(
                        zids.contains(&target_zid.to_string()),
                        "{}: reference to unknown type {}",
                        zid,
                        reference
                    );
                    parse(&generator.schema(target_zid, Some("mytag")).unwrap())
                };
                assert!(
                    target["definitions"]["objects"].get(name).is_some(),
                    "{}: dangling reference {}",
                    zid,
                    reference
                );
            }
        }
    }
}

#[test]
fn generation_is_deterministic() {
    for form in Form::ALL {
        let generator = SchemaGenerator::new(form);
        for zid in generator.list() {
            let first = generator.schema(&zid, Some("t")).unwrap().to_yaml().unwrap();
            let second = generator.schema(&zid, Some("t")).unwrap().to_yaml().unwrap();
            assert_eq!(first, second);
        }
    }
}

#[test]
fn tag_scenario() {
    let temp = tempfile::tempdir().unwrap();
    let root = temp.path().join("out");

    generate(&root, "mytag", "Z1", false, Form::Normal).unwrap();
    let content = std::fs::read_to_string(root.join("Z1.yaml")).unwrap();
    let document: Value = serde_yaml::from_str(&content).unwrap();
    assert_eq!(document["$id"], Value::from("mytag/Z1"));

    let error = generate(&root, "mytag", "Z9999", false, Form::Normal).unwrap_err();
    assert!(matches!(error, Error::NotFound { .. }));
    assert!(!root.join("Z9999.yaml").exists());
}

/// Whether a bare string is valid against a schema, following its references.
fn accepts_string(
    generator: &SchemaGenerator,
    document: &Value,
    schema: &Value,
    value: &str,
) -> bool {
    if let Some(reference) = schema.get("$ref").and_then(Value::as_str) {
        let (document_id, name) = reference.split_once(DEFINITIONS_PREFIX).unwrap();
        let target = match document_id.strip_prefix("t/") {
            Some(zid) => parse(&generator.schema(zid, Some("t")).unwrap()),
            None => document.clone(),
        };
        let resolved = target["definitions"]["objects"][name].clone();
        assert!(!resolved.is_null(), "dangling reference {}", reference);
        return accepts_string(generator, &target, &resolved, value);
    }
    if let Some(kind) = schema.get("type").and_then(Value::as_str) {
        if kind != "string" {
            return false;
        }
    }
    if let Some(pattern) = schema.get("pattern").and_then(Value::as_str) {
        if !Regex::new(pattern).unwrap().is_match(value) {
            return false;
        }
    }
    if let Some(values) = schema.get("enum").and_then(Value::as_sequence) {
        if !values.contains(&Value::from(value)) {
            return false;
        }
    }
    if let Some(not) = schema.get("not") {
        if accepts_string(generator, document, not, value) {
            return false;
        }
    }
    if let Some(all_of) = schema.get("allOf").and_then(Value::as_sequence) {
        if !all_of
            .iter()
            .all(|branch| accepts_string(generator, document, branch, value))
        {
            return false;
        }
    }
    if let Some(one_of) = schema.get("oneOf").and_then(Value::as_sequence) {
        let matching = one_of
            .iter()
            .filter(|branch| accepts_string(generator, document, branch, value))
            .count();
        if matching != 1 {
            return false;
        }
    }
    true
}

fn entry_accepts(form: Form, zid: &str, entry: &str, value: &str) -> bool {
    let generator = SchemaGenerator::new(form);
    let document = parse(&generator.schema(zid, Some("t")).unwrap());
    let schema = document["definitions"]["objects"][entry].clone();
    accepts_string(&generator, &document, &schema, value)
}

#[test]
fn canonical_accepts_bare_strings() {
    assert!(entry_accepts(Form::Canonical, "Z6", "Z6_literal", "hello"));
    assert!(!entry_accepts(Form::Canonical, "Z6", "Z6_literal", "Z41"));
    assert!(entry_accepts(Form::Canonical, "Z9", "Z9_literal", "Z41"));
    assert!(!entry_accepts(Form::Canonical, "Z9", "Z9_literal", "hello"));

    assert!(entry_accepts(Form::Canonical, "Z86", "Z6_length_1", "a"));
    assert!(!entry_accepts(Form::Canonical, "Z86", "Z6_length_1", "ab"));
    assert!(entry_accepts(Form::Canonical, "Z40", "Z9_for_Z40", "Z41"));
    assert!(!entry_accepts(Form::Canonical, "Z40", "Z9_for_Z40", "Z43"));
}

#[test]
fn normal_rejects_bare_strings() {
    assert!(!entry_accepts(Form::Normal, "Z6", "Z6_literal", "hello"));
    assert!(!entry_accepts(Form::Normal, "Z9", "Z9_literal", "Z41"));
    assert!(!entry_accepts(Form::Normal, "Z86", "Z6_length_1", "a"));
    assert!(!entry_accepts(Form::Normal, "Z40", "Z9_for_Z40", "Z41"));
}
