//! Declarative record → RDF mapping
//!
//! A `MappingDeclaration` is the static configuration attached to an
//! entity type: namespace prefixes, the entity's `rdf:type`, an optional
//! fragment appended to resource URIs, an optional `owl:sameAs` rule and a
//! field table of `field → (predicate, term kind)`.
//!
//! Registering a declaration compiles it into a `ResourceMapping` whose
//! field table dispatches directly to a conversion function per field.
//!
//! ```yaml
//! prefixes:
//!   dcterms: "http://purl.org/dc/terms/"
//!   sioc: "http://rdfs.org/sioc/ns#"
//! type: "sioc:Post"
//! fragment: "#post"
//! same_as: { path: "/posts/%s", source_field: slug }
//! fields:
//!   title: ["dcterms:title", Literal]
//!   user: ["sioc:has_creator", URIRef]
//! ```

use super::namespace::PredicateName;
use super::projection::{literal_objects, reference_objects, Converter};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Mapping errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MappingError {
    /// Term kind other than Literal / Reference
    #[error("Unknown term kind '{kind}' for field '{field}'")]
    UnknownTermKind { field: String, kind: String },

    /// Same-as path template lacks a `%s` placeholder
    #[error("Same-as path template '{0}' has no %s placeholder")]
    InvalidSameAsTemplate(String),

    /// A resource with this name is already registered
    #[error("Resource already registered: {0}")]
    DuplicateResource(String),
}

pub type MappingResult<T> = Result<T, MappingError>;

/// Kind of RDF term a field value becomes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TermKind {
    /// Literal wrapping the value
    Literal,
    /// IRI reference to another resource
    Reference,
}

impl TermKind {
    /// Conversion function for this kind
    fn converter(self) -> Converter {
        match self {
            TermKind::Literal => literal_objects,
            TermKind::Reference => reference_objects,
        }
    }
}

impl FromStr for TermKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Literal" | "literal" => Ok(TermKind::Literal),
            "Reference" | "reference" | "URIRef" | "uriref" => Ok(TermKind::Reference),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for TermKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TermKind::Literal => write!(f, "Literal"),
            TermKind::Reference => write!(f, "Reference"),
        }
    }
}

/// `owl:sameAs` rule: format `path` with the value of `source_field`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SameAsRule {
    pub path: String,
    pub source_field: String,
}

impl SameAsRule {
    pub fn new(path: impl Into<String>, source_field: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            source_field: source_field.into(),
        }
    }

    /// Substitute the first `%s` with `value`
    pub fn format(&self, value: &str) -> String {
        self.path.replacen("%s", value, 1)
    }
}

/// One entry of the field table. Serialized as a `[predicate, kind]` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(String, String)", into = "(String, String)")]
pub struct FieldDeclaration {
    /// Qualified predicate name, optionally with a `#fragment` suffix
    pub predicate: String,
    /// Term kind as declared; validated at registration
    pub kind: String,
}

impl From<(String, String)> for FieldDeclaration {
    fn from((predicate, kind): (String, String)) -> Self {
        Self { predicate, kind }
    }
}

impl From<FieldDeclaration> for (String, String) {
    fn from(decl: FieldDeclaration) -> Self {
        (decl.predicate, decl.kind)
    }
}

/// Static RDF mapping for one entity type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingDeclaration {
    /// Short name → namespace IRI
    #[serde(default)]
    pub prefixes: IndexMap<String, String>,
    /// Qualified name of the entity's `rdf:type`
    #[serde(rename = "type")]
    pub rdf_type: String,
    /// Appended to every resource URI, e.g. `#post`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fragment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub same_as: Option<SameAsRule>,
    #[serde(default)]
    pub fields: IndexMap<String, FieldDeclaration>,
}

impl MappingDeclaration {
    pub fn new(rdf_type: impl Into<String>) -> Self {
        Self {
            prefixes: IndexMap::new(),
            rdf_type: rdf_type.into(),
            fragment: None,
            same_as: None,
            fields: IndexMap::new(),
        }
    }

    pub fn prefix(mut self, prefix: impl Into<String>, iri: impl Into<String>) -> Self {
        self.prefixes.insert(prefix.into(), iri.into());
        self
    }

    pub fn fragment(mut self, fragment: impl Into<String>) -> Self {
        self.fragment = Some(fragment.into());
        self
    }

    pub fn same_as(mut self, path: impl Into<String>, source_field: impl Into<String>) -> Self {
        self.same_as = Some(SameAsRule::new(path, source_field));
        self
    }

    pub fn field(
        mut self,
        name: impl Into<String>,
        predicate: impl Into<String>,
        kind: impl Into<String>,
    ) -> Self {
        self.fields.insert(
            name.into(),
            FieldDeclaration {
                predicate: predicate.into(),
                kind: kind.into(),
            },
        );
        self
    }
}

/// Compiled field entry: predicate plus the conversion to apply
#[derive(Clone)]
pub struct FieldMapping {
    pub predicate: PredicateName,
    pub kind: TermKind,
    pub(crate) convert: Converter,
}

impl fmt::Debug for FieldMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldMapping")
            .field("predicate", &self.predicate)
            .field("kind", &self.kind)
            .finish()
    }
}

/// A registered mapping, ready for projection
#[derive(Debug, Clone)]
pub struct ResourceMapping {
    name: String,
    prefixes: IndexMap<String, String>,
    rdf_type: String,
    fragment: String,
    same_as: Option<SameAsRule>,
    fields: IndexMap<String, FieldMapping>,
    skipped: Vec<MappingError>,
}

impl ResourceMapping {
    /// Compile a declaration.
    ///
    /// Fields with an unknown term kind are dropped with a warning and
    /// reported by `skipped_fields`; they do not fail registration.
    pub fn register(name: impl Into<String>, decl: MappingDeclaration) -> MappingResult<Self> {
        let name = name.into();

        if let Some(rule) = &decl.same_as {
            if !rule.path.contains("%s") {
                return Err(MappingError::InvalidSameAsTemplate(rule.path.clone()));
            }
        }

        let mut fields = IndexMap::new();
        let mut skipped = Vec::new();
        for (field, FieldDeclaration { predicate, kind }) in decl.fields {
            match kind.parse::<TermKind>() {
                Ok(kind) => {
                    debug!("{}: mapping field '{}' to {} as {}", name, field, predicate, kind);
                    fields.insert(
                        field,
                        FieldMapping {
                            predicate: PredicateName::parse(&predicate),
                            kind,
                            convert: kind.converter(),
                        },
                    );
                }
                Err(kind) => {
                    warn!("{}: unknown term kind '{}' for field '{}', skipping", name, kind, field);
                    skipped.push(MappingError::UnknownTermKind { field, kind });
                }
            }
        }

        Ok(Self {
            name,
            prefixes: decl.prefixes,
            rdf_type: decl.rdf_type,
            fragment: decl.fragment.unwrap_or_default(),
            same_as: decl.same_as,
            fields,
            skipped,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn prefixes(&self) -> &IndexMap<String, String> {
        &self.prefixes
    }

    /// Qualified name of the entity type
    pub fn rdf_type(&self) -> &str {
        &self.rdf_type
    }

    /// Resource fragment, empty when none was declared
    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    pub fn same_as(&self) -> Option<&SameAsRule> {
        self.same_as.as_ref()
    }

    pub fn field(&self, name: &str) -> Option<&FieldMapping> {
        self.fields.get(name)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldMapping)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Fields dropped at registration
    pub fn skipped_fields(&self) -> &[MappingError] {
        &self.skipped
    }
}

/// Named set of registered mappings, one per exposed resource
#[derive(Debug, Default)]
pub struct MappingRegistry {
    mappings: IndexMap<String, ResourceMapping>,
}

impl MappingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile and register a declaration under a resource name
    pub fn register(
        &mut self,
        name: impl Into<String>,
        decl: MappingDeclaration,
    ) -> MappingResult<&ResourceMapping> {
        let name = name.into();
        if self.mappings.contains_key(&name) {
            return Err(MappingError::DuplicateResource(name));
        }
        let mapping = ResourceMapping::register(name.clone(), decl)?;
        info!(
            "Registered RDF mapping for '{}' ({} fields)",
            name,
            mapping.fields.len()
        );
        let mapping: &ResourceMapping = self.mappings.entry(name).or_insert(mapping);
        Ok(mapping)
    }

    pub fn get(&self, name: &str) -> Option<&ResourceMapping> {
        self.mappings.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.mappings.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}
