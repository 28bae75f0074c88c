//! Declarative descriptions of the types a schema is generated for.

/// A pointer from one schema fragment to a definition.
#[derive(Debug, Clone, PartialEq)]
pub enum Link {
    /// A definition of the document being generated.
    Internal(String),
    /// The root definition of another type's document.
    ///
    /// `id` names the document holding the definition when it differs from `zid`.
    External { zid: String, id: Option<String> },
}

/// A JSON schema fragment, possibly containing links.
#[derive(Debug, Clone, PartialEq)]
pub enum Fragment {
    Link(Link),
    Map(Vec<(String, Fragment)>),
    List(Vec<Fragment>),
    String(String),
    Bool(bool),
}

/// How a key of a record is constrained.
#[derive(Debug, Clone, PartialEq)]
pub enum KeyDefinition {
    /// The `Z1K1` type tag, which must reference the type being defined.
    Special,
    Link(Link),
}

/// An object whose keys are ZIDs or ZID keys (`Z3K1`).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    pub keys: Vec<(String, KeyDefinition)>,
    /// Keys that may be absent. Every other key is required.
    pub optional: Vec<String>,
    pub pattern_properties: Option<Fragment>,
    pub additional_properties: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// Used verbatim as the definition.
    Literal(Fragment),
    Record(Record),
}

/// The description of a type, or of one of the auxiliary definitions it uses.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDefinition {
    pub comment: Option<String>,
    /// Auxiliary definitions added to the document along with this one.
    pub references: Vec<(String, TypeDefinition)>,
    pub body: Body,
}

impl TypeDefinition {
    pub fn literal(fragment: Fragment) -> Self {
        Self {
            comment: None,
            references: vec![],
            body: Body::Literal(fragment),
        }
    }

    pub fn record(record: Record) -> Self {
        Self {
            comment: None,
            references: vec![],
            body: Body::Record(record),
        }
    }

    pub fn with_comment<S: Into<String>>(mut self, comment: S) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn with_reference<S: Into<String>>(mut self, name: S, definition: TypeDefinition) -> Self {
        self.references.push((name.into(), definition));
        self
    }
}

impl Record {
    /// A record tagged with its special `Z1K1` and the given keys.
    pub fn tagged<K, I>(keys: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Link)>,
    {
        let mut record = Self {
            keys: vec![("Z1K1".into(), KeyDefinition::Special)],
            ..Default::default()
        };
        record.keys.extend(
            keys.into_iter()
                .map(|(key, link)| (key.into(), KeyDefinition::Link(link))),
        );
        record
    }

    pub fn with_optional<S: Into<String>>(mut self, key: S) -> Self {
        self.optional.push(key.into());
        self
    }

    pub fn with_pattern_properties(mut self, fragment: Fragment) -> Self {
        self.pattern_properties = Some(fragment);
        self
    }
}

impl Link {
    pub fn internal<S: Into<String>>(name: S) -> Self {
        Link::Internal(name.into())
    }

    pub fn external<S: Into<String>>(zid: S) -> Self {
        Link::External {
            zid: zid.into(),
            id: None,
        }
    }

    pub fn external_in<S: Into<String>, I: Into<String>>(zid: S, id: I) -> Self {
        Link::External {
            zid: zid.into(),
            id: Some(id.into()),
        }
    }
}

impl Fragment {
    pub fn map<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Fragment)>,
    {
        Fragment::Map(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value))
                .collect(),
        )
    }

    pub fn list<I: IntoIterator<Item = Fragment>>(items: I) -> Self {
        Fragment::List(items.into_iter().collect())
    }

    pub fn string<S: Into<String>>(value: S) -> Self {
        Fragment::String(value.into())
    }

    /// A list of plain strings, as used by `enum` and `required`.
    pub fn strings<S: Into<String>, I: IntoIterator<Item = S>>(values: I) -> Self {
        Fragment::List(values.into_iter().map(Fragment::string).collect())
    }

    pub fn internal<S: Into<String>>(name: S) -> Self {
        Fragment::Link(Link::internal(name))
    }

    pub fn external<S: Into<String>>(zid: S) -> Self {
        Fragment::Link(Link::external(zid))
    }
}
