//! The types a schema can be generated for.

use crate::{Form, Fragment, KeyDefinition, Link, Record, TypeDefinition};

/// Matches ZIDs (`Z4`) and ZID keys (`Z4K1`).
pub const ZID_PATTERN: &str = r"^Z[1-9]\d*(K[1-9]\d*)?$";

/// Supplies the ZIDs a schema can be generated for and their definitions.
pub trait TypeCatalog {
    /// The eligible ZIDs for the form, in a stable order.
    fn zids(&self, form: Form) -> Vec<String>;

    fn definition(&self, form: Form, zid: &str) -> Option<&TypeDefinition>;
}

/// The built-in Wikifunctions types.
#[derive(Debug, Clone)]
pub struct BuiltinCatalog {
    normal: Vec<(String, TypeDefinition)>,
    canonical: Vec<(String, TypeDefinition)>,
}

impl BuiltinCatalog {
    pub fn new() -> Self {
        let normal = normal_types();
        let canonical = normal
            .iter()
            .map(|(zid, definition)| {
                let mut definition = match zid.as_str() {
                    "Z6" => canonical_z6(),
                    "Z9" => canonical_z9(),
                    _ => definition.clone(),
                };
                for (name, reference) in definition.references.iter_mut() {
                    if let Some(canonical) = canonical_reference(name) {
                        *reference = canonical;
                    }
                }
                (zid.clone(), definition)
            })
            .collect();
        Self { normal, canonical }
    }

    fn table(&self, form: Form) -> &[(String, TypeDefinition)] {
        match form {
            Form::Normal => &self.normal,
            Form::Canonical => &self.canonical,
        }
    }
}

impl Default for BuiltinCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeCatalog for BuiltinCatalog {
    fn zids(&self, form: Form) -> Vec<String> {
        self.table(form).iter().map(|(zid, _)| zid.clone()).collect()
    }

    fn definition(&self, form: Form, zid: &str) -> Option<&TypeDefinition> {
        self.table(form)
            .iter()
            .find(|(candidate, _)| candidate == zid)
            .map(|(_, definition)| definition)
    }
}

/// Name of the typed list definition of the given ZID.
pub fn typed_list_name(zid: &str) -> String {
    format!("Z10_of_{}", zid)
}

/// A `Z10` list whose elements are all of the given type.
fn typed_list(zid: &str) -> TypeDefinition {
    TypeDefinition::literal(Fragment::map([(
        "allOf",
        Fragment::list([
            Fragment::external("Z10"),
            Fragment::map([(
                "oneOf",
                Fragment::list([
                    Fragment::Link(Link::external_in("Z10_empty", "Z10")),
                    Fragment::map([
                        ("type", Fragment::string("object")),
                        (
                            "properties",
                            Fragment::map([
                                ("Z10K1", Fragment::external(zid)),
                                ("Z10K2", Fragment::internal(typed_list_name(zid))),
                            ]),
                        ),
                        ("required", Fragment::strings(["Z10K1", "Z10K2"])),
                    ]),
                ]),
            )]),
        ]),
    )]))
}

fn with_typed_list(definition: TypeDefinition, zid: &str) -> TypeDefinition {
    definition.with_reference(typed_list_name(zid), typed_list(zid))
}

/// A record of `Z1K1` and keys pointing to other types' documents.
fn tagged<const N: usize>(keys: [(&str, &str); N]) -> Record {
    Record::tagged(keys.map(|(key, zid)| (key, Link::external(zid))))
}

/// A string-valued object whose `Z1K1` is fixed to the given ZID.
fn string_object(zid: &str, key: &str, value: Fragment) -> Fragment {
    Fragment::map([
        ("required", Fragment::strings(["Z1K1", key])),
        (
            "properties",
            Fragment::map([
                (
                    "Z1K1",
                    Fragment::map([
                        ("type", Fragment::string("string")),
                        ("enum", Fragment::strings([zid])),
                    ]),
                ),
                (key, value),
            ]),
        ),
        ("type", Fragment::string("object")),
        ("additionalProperties", Fragment::Bool(false)),
    ])
}

fn z6_object() -> Fragment {
    string_object(
        "Z6",
        "Z6K1",
        Fragment::map([("type", Fragment::string("string"))]),
    )
}

fn z9_object() -> Fragment {
    string_object(
        "Z9",
        "Z9K1",
        Fragment::map([
            ("type", Fragment::string("string")),
            ("pattern", Fragment::string(ZID_PATTERN)),
        ]),
    )
}

/// Narrows the type at `zid` by constraining some of its properties.
fn narrowed(zid: &str, properties: Fragment) -> Fragment {
    Fragment::map([(
        "allOf",
        Fragment::list([
            Fragment::external(zid),
            Fragment::map([
                ("type", Fragment::string("object")),
                ("properties", properties),
            ]),
        ]),
    )])
}

fn character_constraint() -> Fragment {
    Fragment::map([
        ("type", Fragment::string("string")),
        ("pattern", Fragment::string("^.$")),
    ])
}

fn boolean_constraint() -> Fragment {
    Fragment::map([
        ("type", Fragment::string("string")),
        ("enum", Fragment::strings(["Z41", "Z42"])),
    ])
}

/// A single character `Z6`.
fn character() -> Fragment {
    narrowed("Z6", Fragment::map([("Z6K1", character_constraint())]))
}

/// A `Z9` referencing one of the two booleans.
fn boolean_reference() -> Fragment {
    narrowed("Z9", Fragment::map([("Z9K1", boolean_constraint())]))
}

/// Auxiliary definitions whose narrowed objects also have a bare string shorthand.
fn canonical_reference(name: &str) -> Option<TypeDefinition> {
    let (bare, object) = match name {
        "Z6_length_1" => (character_constraint(), character()),
        "Z9_for_Z40" => (boolean_constraint(), boolean_reference()),
        _ => return None,
    };
    Some(TypeDefinition::literal(Fragment::map([(
        "oneOf",
        Fragment::list([bare, object]),
    )])))
}

fn canonical_z6() -> TypeDefinition {
    // Strings looking like references must be spelled out as Z6 objects
    let bare = Fragment::map([
        ("type", Fragment::string("string")),
        (
            "not",
            Fragment::map([("pattern", Fragment::string(ZID_PATTERN))]),
        ),
    ]);
    TypeDefinition::literal(Fragment::map([(
        "oneOf",
        Fragment::list([bare, z6_object()]),
    )]))
    .with_comment("Z6/String (Z4/Type)")
}

fn canonical_z9() -> TypeDefinition {
    let bare = Fragment::map([
        ("type", Fragment::string("string")),
        ("pattern", Fragment::string(ZID_PATTERN)),
    ]);
    TypeDefinition::literal(Fragment::map([(
        "oneOf",
        Fragment::list([bare, z9_object()]),
    )]))
    .with_comment("Z9/Reference (Z4/Type)")
}

fn normal_types() -> Vec<(String, TypeDefinition)> {
    let z1 = TypeDefinition::literal(Fragment::map([(
        "oneOf",
        Fragment::list([
            Fragment::internal("Z1_generic"),
            Fragment::internal("Z1_nongeneric"),
        ]),
    )]))
    .with_comment("Z1/Object (Z4/Type)")
    .with_reference(
        "Z1_terminal",
        TypeDefinition::literal(Fragment::map([(
            "oneOf",
            Fragment::list([Fragment::external("Z6"), Fragment::external("Z9")]),
        )])),
    )
    .with_reference(
        "Z1_nonterminal",
        TypeDefinition::record(Record::default().with_pattern_properties(Fragment::map([(
            ZID_PATTERN,
            Fragment::internal("Z1_generic"),
        )]))),
    )
    .with_reference(
        "Z1_generic",
        TypeDefinition::literal(Fragment::map([(
            "oneOf",
            Fragment::list([
                Fragment::internal("Z1_terminal"),
                Fragment::internal("Z1_nonterminal"),
            ]),
        )])),
    )
    .with_reference(
        "Z1_nongeneric",
        TypeDefinition::record(Record {
            keys: vec![(
                "Z1K1".into(),
                KeyDefinition::Link(Link::external("Z4")),
            )],
            ..Default::default()
        }),
    );

    let z4 = with_typed_list(
        TypeDefinition::record(Record::tagged([
            ("Z4K1", Link::internal("Z4")),
            ("Z4K2", Link::internal(typed_list_name("Z3"))),
            ("Z4K3", Link::external("Z8")),
        ])),
        "Z3",
    )
    .with_comment("Z4/Type (Z4/Type)");

    let z7 = TypeDefinition::record(
        tagged([("Z7K1", "Z4")])
            .with_pattern_properties(Fragment::map([(ZID_PATTERN, Fragment::external("Z1"))])),
    )
    .with_comment("Z7/Function call (Z4/Type)");

    let mut z8 = TypeDefinition::record(
        Record::tagged([
            ("Z8K1", Link::internal(typed_list_name("Z17"))),
            ("Z8K2", Link::external("Z4")),
            ("Z8K3", Link::internal(typed_list_name("Z20"))),
            ("Z8K4", Link::internal(typed_list_name("Z14"))),
            ("Z8K5", Link::internal("Z8")),
        ])
        .with_optional("Z8K4"),
    )
    .with_comment("Z8/Function (Z4/Type)");
    for zid in ["Z17", "Z20", "Z14"] {
        z8 = with_typed_list(z8, zid);
    }

    let z10 = TypeDefinition::literal(Fragment::map([(
        "oneOf",
        Fragment::list([
            Fragment::internal("Z10_empty"),
            Fragment::internal("Z10_full"),
        ]),
    )]))
    .with_comment("Z10/List (Z4/Type)")
    .with_reference("Z10_empty", TypeDefinition::record(tagged([])))
    .with_reference(
        "Z10_full",
        TypeDefinition::record(Record::tagged([
            ("Z10K1", Link::external("Z1")),
            ("Z10K2", Link::internal("Z10")),
        ])),
    );

    let z12 = with_typed_list(
        TypeDefinition::record(Record::tagged([(
            "Z12K1",
            Link::internal(typed_list_name("Z11")),
        )])),
        "Z11",
    )
    .with_comment("Z12/Multilingual text (Z4/Type)");

    let z40 = TypeDefinition::record(Record::tagged([("Z40K1", Link::internal("Z40"))]))
        .with_comment("Z40/Boolean (Z4/Type)")
        .with_reference("Z9_for_Z40", TypeDefinition::literal(boolean_reference()));

    let z50 = with_typed_list(
        TypeDefinition::record(Record::tagged([(
            "Z50K1",
            Link::internal(typed_list_name("Z3")),
        )])),
        "Z3",
    )
    .with_comment("Z50/Error type (Z4/Type)");

    let z86 = TypeDefinition::record(Record::tagged([(
        "Z86K1",
        Link::internal("Z6_length_1"),
    )]))
    .with_comment("Z86/Character (Z4/Type)")
    .with_reference("Z6_length_1", TypeDefinition::literal(character()));

    let record =
        |record: Record, comment: &str| TypeDefinition::record(record).with_comment(comment);

    vec![
        ("Z1", z1),
        (
            "Z2",
            record(
                tagged([("Z2K1", "Z6"), ("Z2K2", "Z1"), ("Z2K3", "Z12")]),
                "Z2/Persistent object (Z4/Type)",
            ),
        ),
        (
            "Z3",
            record(
                tagged([("Z3K1", "Z4"), ("Z3K2", "Z6"), ("Z3K3", "Z12")]),
                "Z3/Key (Z4/Type)",
            ),
        ),
        ("Z4", z4),
        (
            "Z5",
            record(tagged([("Z5K1", "Z50"), ("Z5K2", "Z1")]), "Z5/Error (Z4/Type)"),
        ),
        (
            "Z6",
            TypeDefinition::literal(z6_object()).with_comment("Z6/String (Z4/Type)"),
        ),
        ("Z7", z7),
        ("Z8", z8),
        (
            "Z9",
            TypeDefinition::literal(z9_object()).with_comment("Z9/Reference (Z4/Type)"),
        ),
        ("Z10", z10),
        (
            "Z11",
            record(
                tagged([("Z11K1", "Z60"), ("Z11K2", "Z6")]),
                "Z11/Monolingual text (Z4/Type)",
            ),
        ),
        ("Z12", z12),
        (
            "Z14",
            record(
                tagged([
                    ("Z14K1", "Z8"),
                    ("Z14K2", "Z7"),
                    ("Z14K3", "Z16"),
                    ("Z14K4", "Z6"),
                ]),
                "Z14/Implementation (Z4/Type)",
            ),
        ),
        (
            "Z16",
            record(
                tagged([("Z16K1", "Z61"), ("Z16K2", "Z6")]),
                "Z16/Code (Z4/Type)",
            ),
        ),
        (
            "Z17",
            record(
                tagged([("Z17K1", "Z4"), ("Z17K2", "Z6"), ("Z17K3", "Z12")]),
                "Z17/Argument declaration (Z4/Type)",
            ),
        ),
        (
            "Z18",
            record(
                tagged([("Z18K1", "Z6")]),
                "Z18/Argument reference (Z4/Type)",
            ),
        ),
        (
            "Z20",
            record(
                tagged([("Z20K1", "Z7"), ("Z20K2", "Z8")]),
                "Z20/Tester (Z4/Type)",
            ),
        ),
        ("Z21", record(tagged([]), "Z21/Unit (Z4/Type)")),
        (
            "Z22",
            record(
                tagged([("Z22K1", "Z1"), ("Z22K2", "Z1")]),
                "Z22/Pair (Z4/Type)",
            ),
        ),
        ("Z23", record(tagged([]), "Z23/Nothing (Z4/Type)")),
        (
            "Z39",
            record(
                tagged([("Z39K1", "Z6"), ("Z39K2", "Z1")]).with_optional("Z39K2"),
                "Z39/Key reference (Z4/Type)",
            ),
        ),
        ("Z40", z40),
        ("Z50", z50),
        (
            "Z60",
            record(tagged([("Z60K1", "Z6")]), "Z60/Language (Z4/Type)"),
        ),
        (
            "Z61",
            record(
                tagged([("Z61K1", "Z6")]),
                "Z61/Programming language (Z4/Type)",
            ),
        ),
        ("Z80", record(tagged([("Z80K1", "Z6")]), "Z80/Byte (Z4/Type)")),
        ("Z86", z86),
        ("Z99", record(tagged([("Z99K1", "Z1")]), "Z99/Quote (Z4/Type)")),
    ]
    .into_iter()
    .map(|(zid, definition)| (zid.to_string(), definition))
    .collect()
}
