//! Data model for doclets — the records JSDoc emits for every documented entity.
//!
//! Only the attributes the relation fixer reads or writes are modelled as
//! fields. Everything else (descriptions, params, meta, …) rides along in
//! [`Doclet::extra`] so a doclet dump round-trips without loss.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// `kind` of a doclet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Kind {
    Class,
    Interface,
    Mixin,
    Typedef,
    Function,
    Member,
    Event,
    /// Any kind the fixer has no special handling for (module, namespace, …).
    Other(String),
}

impl Kind {
    pub fn as_str(&self) -> &str {
        match self {
            Kind::Class => "class",
            Kind::Interface => "interface",
            Kind::Mixin => "mixin",
            Kind::Typedef => "typedef",
            Kind::Function => "function",
            Kind::Member => "member",
            Kind::Event => "event",
            Kind::Other(other) => other,
        }
    }

    /// Entities that get `*Nested` and `descendants` arrays.
    pub fn is_relation_subject(&self) -> bool {
        matches!(
            self,
            Kind::Class | Kind::Interface | Kind::Mixin | Kind::Typedef
        )
    }

    /// Entities that receive synthesized members.
    pub fn receives_members(&self) -> bool {
        matches!(self, Kind::Class | Kind::Interface | Kind::Mixin)
    }
}

impl From<String> for Kind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "class" => Kind::Class,
            "interface" => Kind::Interface,
            "mixin" => Kind::Mixin,
            "typedef" => Kind::Typedef,
            "function" => Kind::Function,
            "member" => Kind::Member,
            "event" => Kind::Event,
            _ => Kind::Other(value),
        }
    }
}

impl From<&str> for Kind {
    fn from(value: &str) -> Self {
        Kind::from(value.to_string())
    }
}

impl From<Kind> for String {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Other(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

/// `scope` of a doclet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Scope {
    Static,
    Instance,
    Inner,
    Global,
    Other(String),
}

impl Scope {
    pub fn as_str(&self) -> &str {
        match self {
            Scope::Static => "static",
            Scope::Instance => "instance",
            Scope::Inner => "inner",
            Scope::Global => "global",
            Scope::Other(other) => other,
        }
    }

    /// Longname separator between owner and member name.
    pub fn separator(&self) -> char {
        match self {
            Scope::Static => '.',
            Scope::Inner => '~',
            _ => '#',
        }
    }
}

impl From<String> for Scope {
    fn from(value: String) -> Self {
        match value.as_str() {
            "static" => Scope::Static,
            "instance" => Scope::Instance,
            "inner" => Scope::Inner,
            "global" => Scope::Global,
            _ => Scope::Other(value),
        }
    }
}

impl From<Scope> for String {
    fn from(scope: Scope) -> Self {
        match scope {
            Scope::Other(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

/// One of the three relations an entity can declare towards its ancestors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    /// `@extends` / `@augments`
    Augments,
    /// `@implements`
    Implements,
    /// `@mixes`
    Mixes,
}

impl Relation {
    pub const ALL: [Relation; 3] = [Relation::Augments, Relation::Implements, Relation::Mixes];

    /// Direct targets, as declared in source.
    pub fn direct(self, doclet: &Doclet) -> &[String] {
        let list = match self {
            Relation::Augments => &doclet.augments,
            Relation::Implements => &doclet.implements,
            Relation::Mixes => &doclet.mixes,
        };
        list.as_deref().unwrap_or_default()
    }

    /// Transitive targets, as computed by the relation builder.
    pub fn nested(self, doclet: &Doclet) -> &[String] {
        let list = match self {
            Relation::Augments => &doclet.augments_nested,
            Relation::Implements => &doclet.implements_nested,
            Relation::Mixes => &doclet.mixes_nested,
        };
        list.as_deref().unwrap_or_default()
    }

    /// JSON name of the nested array.
    pub fn nested_name(self) -> &'static str {
        match self {
            Relation::Augments => "augmentsNested",
            Relation::Implements => "implementsNested",
            Relation::Mixes => "mixesNested",
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.nested_name())
    }
}

/// A documented API entity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doclet {
    #[serde(default)]
    pub longname: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<Kind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memberof: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<Scope>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub augments: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub implements: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mixes: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub augments_nested: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub implements_nested: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mixes_nested: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descendants: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inherited: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mixed: Option<bool>,
    /// Presence marker; JSDoc stores `@inheritdoc` as an empty string.
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub inheritdoc: Option<Value>,
    /// Presence marker for `@override`.
    #[serde(
        default,
        rename = "override",
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub overrides: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub undocumented: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Vec<Property>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Doclet {
    pub fn new(longname: impl Into<String>, kind: impl Into<Kind>) -> Self {
        Doclet {
            longname: longname.into(),
            kind: Some(kind.into()),
            ..Default::default()
        }
    }

    pub fn is_kind(&self, kind: &Kind) -> bool {
        self.kind.as_ref() == Some(kind)
    }

    pub fn is_relation_subject(&self) -> bool {
        self.kind.as_ref().is_some_and(Kind::is_relation_subject)
    }

    pub fn receives_members(&self) -> bool {
        self.kind.as_ref().is_some_and(Kind::receives_members)
    }

    pub fn is_ignored(&self) -> bool {
        self.ignore == Some(true)
    }

    pub fn is_undocumented(&self) -> bool {
        self.undocumented == Some(true)
    }

    /// Whether the doclet carries `@inheritdoc` or `@override`.
    pub fn explicitly_inherits(&self) -> bool {
        self.inheritdoc.is_some() || self.overrides.is_some()
    }

    pub fn has_descendant(&self, longname: &str) -> bool {
        self.descendants
            .as_deref()
            .is_some_and(|d| d.iter().any(|l| l == longname))
    }
}

/// A typedef property descriptor (`@property`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Property {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inherited: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Property {
    pub fn named(name: impl Into<String>) -> Self {
        Property {
            name: Some(name.into()),
            ..Default::default()
        }
    }
}

/// A marker key that is present counts even when its value is `null`.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}
