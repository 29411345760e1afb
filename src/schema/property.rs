//! Property definitions.
//!
//! A `PropertyDef` names a field in the raw card JSON and declares how that
//! field is shaped. The engine never interprets the field's meaning; the kind
//! only selects an extraction strategy.

use serde::{Deserialize, Serialize};

/// Shape of a card property in the source JSON.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PropertyKind {
    /// Plain scalar.
    #[default]
    String,
    /// Scalar with backslashes stripped.
    EscapedString,
    /// Integer scalar, parsed on demand.
    Integer,
    /// Numeric scalar.
    Number,
    /// Boolean scalar.
    Boolean,
    /// Scalar holding an enum value id.
    StringEnum,
    /// List of enum value ids.
    StringEnumList,
    /// List of scalars.
    StringList,
    /// Nested object, stored as its JSON text.
    Object,
    /// Nested object whose `id` is an enum value id.
    ObjectEnum,
    /// List of nested objects, each stored as JSON text.
    ObjectList,
    /// List of nested objects, each contributing its `id`.
    ObjectEnumList,
}

impl PropertyKind {
    /// All kinds, in declaration order.
    pub const ALL: [PropertyKind; 12] = [
        PropertyKind::String,
        PropertyKind::EscapedString,
        PropertyKind::Integer,
        PropertyKind::Number,
        PropertyKind::Boolean,
        PropertyKind::StringEnum,
        PropertyKind::StringEnumList,
        PropertyKind::StringList,
        PropertyKind::Object,
        PropertyKind::ObjectEnum,
        PropertyKind::ObjectList,
        PropertyKind::ObjectEnumList,
    ];

    /// Canonical name, as written in game definitions.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            PropertyKind::String => "String",
            PropertyKind::EscapedString => "EscapedString",
            PropertyKind::Integer => "Integer",
            PropertyKind::Number => "Number",
            PropertyKind::Boolean => "Boolean",
            PropertyKind::StringEnum => "StringEnum",
            PropertyKind::StringEnumList => "StringEnumList",
            PropertyKind::StringList => "StringList",
            PropertyKind::Object => "Object",
            PropertyKind::ObjectEnum => "ObjectEnum",
            PropertyKind::ObjectList => "ObjectList",
            PropertyKind::ObjectEnumList => "ObjectEnumList",
        }
    }

    /// Whether values of this kind are enum value ids.
    #[must_use]
    pub const fn is_enum(self) -> bool {
        matches!(
            self,
            PropertyKind::StringEnum
                | PropertyKind::StringEnumList
                | PropertyKind::ObjectEnum
                | PropertyKind::ObjectEnumList
        )
    }

    /// Whether the stored value is a delimited list.
    #[must_use]
    pub const fn is_list(self) -> bool {
        matches!(
            self,
            PropertyKind::StringList
                | PropertyKind::StringEnumList
                | PropertyKind::ObjectList
                | PropertyKind::ObjectEnumList
        )
    }
}

impl std::fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// Unknown names fall back to `String`, matching how untyped fields are read.
impl From<String> for PropertyKind {
    fn from(s: String) -> Self {
        PropertyKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(&s))
            .unwrap_or_default()
    }
}

impl From<PropertyKind> for String {
    fn from(kind: PropertyKind) -> Self {
        kind.as_str().to_string()
    }
}

/// One entry of a game's property schema.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropertyDef {
    /// Key into the raw card JSON and into extracted property maps.
    pub name: String,

    /// How the raw field is shaped.
    #[serde(rename = "type")]
    pub kind: PropertyKind,

    /// Human-readable label.
    pub display: String,

    /// Sentinel string meaning "no value".
    pub empty: String,
}

impl PropertyDef {
    /// Create a property definition.
    pub fn new(name: impl Into<String>, kind: PropertyKind) -> Self {
        Self {
            name: name.into(),
            kind,
            display: String::new(),
            empty: String::new(),
        }
    }

    /// Set the display label.
    #[must_use]
    pub fn with_display(mut self, display: impl Into<String>) -> Self {
        self.display = display.into();
        self
    }

    /// Set the empty sentinel.
    #[must_use]
    pub fn with_empty(mut self, empty: impl Into<String>) -> Self {
        self.empty = empty.into();
        self
    }

    /// Display label, falling back to the name.
    #[must_use]
    pub fn label(&self) -> &str {
        if self.display.is_empty() {
            &self.name
        } else {
            &self.display
        }
    }
}
