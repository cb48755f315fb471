//! RDF namespace and prefix management
//!
//! Resolves `prefix:suffix` qualified names against a prefix table. A
//! `NamespaceManager` is built per projection from a mapping's declared
//! prefixes; nothing here is shared between projections.

use indexmap::IndexMap;
use thiserror::Error;

pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
pub const OWL: &str = "http://www.w3.org/2002/07/owl#";
pub const DCTERMS: &str = "http://purl.org/dc/terms/";
pub const LDP: &str = "http://www.w3.org/ns/ldp#";
pub const SIOC: &str = "http://rdfs.org/sioc/ns#";

/// Prefix errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PrefixError {
    /// Unknown prefix
    #[error("Unknown prefix '{prefix}' in qualified name '{qname}'")]
    UnknownPrefix { prefix: String, qname: String },

    /// Not of the form `prefix:suffix`
    #[error("Invalid qualified name: {0}")]
    InvalidQualifiedName(String),
}

pub type PrefixResult<T> = Result<T, PrefixError>;

/// Namespace (prefix → IRI mapping)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    /// Prefix
    pub prefix: String,
    /// IRI
    pub iri: String,
}

impl Namespace {
    /// Create a new namespace
    pub fn new(prefix: impl Into<String>, iri: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            iri: iri.into(),
        }
    }
}

/// A predicate qualified name with its optional `#fragment` suffix split off.
///
/// `sioc:has_creator#person` becomes `qname = "sioc:has_creator"` and
/// `fragment = "#person"`. The fragment is not part of the predicate IRI; it
/// is appended to the object built for the statement. Only the segment up
/// to a second `#` is kept: `sioc:has_creator#a#b` yields `#a`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredicateName {
    pub qname: String,
    pub fragment: String,
}

impl PredicateName {
    pub fn parse(name: &str) -> Self {
        let mut parts = name.split('#');
        let qname = parts.next().unwrap_or_default();
        match parts.next() {
            Some(fragment) => Self {
                qname: qname.to_string(),
                fragment: format!("#{}", fragment),
            },
            None => Self {
                qname: name.to_string(),
                fragment: String::new(),
            },
        }
    }
}

/// Resolved predicate: full IRI plus the object fragment carried over from
/// the declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPredicate {
    pub iri: String,
    pub fragment: String,
}

/// Prefix table for one projection
#[derive(Debug, Clone, Default)]
pub struct NamespaceManager {
    /// Prefix → IRI mappings, in declaration order
    prefixes: IndexMap<String, String>,
}

impl NamespaceManager {
    /// Create an empty namespace manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a manager from a declared prefix table
    pub fn from_prefixes<'a>(prefixes: impl IntoIterator<Item = (&'a String, &'a String)>) -> Self {
        let mut mgr = Self::new();
        for (prefix, iri) in prefixes {
            mgr.add_prefix(prefix.clone(), iri.clone());
        }
        mgr
    }

    /// Add a prefix
    pub fn add_prefix(&mut self, prefix: impl Into<String>, iri: impl Into<String>) {
        self.prefixes.insert(prefix.into(), iri.into());
    }

    /// Get IRI for a prefix
    pub fn get_iri(&self, prefix: &str) -> Option<&str> {
        self.prefixes.get(prefix).map(|s| s.as_str())
    }

    /// Expand a qualified name (prefix:local) to a full IRI
    pub fn expand(&self, qname: &str) -> PrefixResult<String> {
        let (prefix, local) = qname
            .split_once(':')
            .ok_or_else(|| PrefixError::InvalidQualifiedName(qname.to_string()))?;
        let iri = self.get_iri(prefix).ok_or_else(|| PrefixError::UnknownPrefix {
            prefix: prefix.to_string(),
            qname: qname.to_string(),
        })?;
        Ok(format!("{}{}", iri, local))
    }

    /// Split off a `#fragment` suffix, then expand the remaining qualified name
    pub fn resolve_predicate(&self, name: &str) -> PrefixResult<ResolvedPredicate> {
        let PredicateName { qname, fragment } = PredicateName::parse(name);
        Ok(ResolvedPredicate {
            iri: self.expand(&qname)?,
            fragment,
        })
    }

    /// Get all registered prefixes in declaration order
    pub fn prefixes(&self) -> Vec<Namespace> {
        self.prefixes
            .iter()
            .map(|(prefix, iri)| Namespace::new(prefix.clone(), iri.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sioc_only() -> NamespaceManager {
        let mut mgr = NamespaceManager::new();
        mgr.add_prefix("sioc", SIOC);
        mgr
    }

    #[test]
    fn test_expand() {
        let mgr = sioc_only();
        assert_eq!(mgr.expand("sioc:Post").unwrap(), "http://rdfs.org/sioc/ns#Post");
    }

    #[test]
    fn test_unknown_prefix() {
        let mgr = sioc_only();
        let err = mgr.expand("dcterms:title").unwrap_err();
        assert_eq!(
            err,
            PrefixError::UnknownPrefix {
                prefix: "dcterms".to_string(),
                qname: "dcterms:title".to_string(),
            }
        );
    }

    #[test]
    fn test_missing_colon() {
        let mgr = sioc_only();
        assert!(matches!(
            mgr.expand("Post"),
            Err(PrefixError::InvalidQualifiedName(_))
        ));
    }

    #[test]
    fn test_predicate_fragment_split() {
        let name = PredicateName::parse("sioc:has_creator#person");
        assert_eq!(name.qname, "sioc:has_creator");
        assert_eq!(name.fragment, "#person");

        let resolved = sioc_only().resolve_predicate("sioc:has_creator#person").unwrap();
        assert_eq!(resolved.iri, "http://rdfs.org/sioc/ns#has_creator");
        assert_eq!(resolved.fragment, "#person");

        let plain = sioc_only().resolve_predicate("sioc:content").unwrap();
        assert!(plain.fragment.is_empty());
    }

    #[test]
    fn test_predicate_fragment_stops_at_second_hash() {
        let name = PredicateName::parse("sioc:has_creator#a#b");
        assert_eq!(name.qname, "sioc:has_creator");
        assert_eq!(name.fragment, "#a");
    }

    #[test]
    fn test_declaration_order_kept() {
        let mut mgr = NamespaceManager::new();
        mgr.add_prefix("sioc", SIOC);
        mgr.add_prefix("dcterms", DCTERMS);
        let names: Vec<_> = mgr.prefixes().into_iter().map(|ns| ns.prefix).collect();
        assert_eq!(names, vec!["sioc", "dcterms"]);
    }
}
