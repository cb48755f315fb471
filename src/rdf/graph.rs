//! In-memory RDF graph built during a single projection
//!
//! Append-only: statements and prefix bindings are added while a record or
//! collection is projected, then the graph is serialized and dropped.

use super::namespace::Namespace;
use super::types::{NamedNode, RdfObject, RdfPredicate, Triple};
use indexmap::{IndexMap, IndexSet};

/// Set of triples plus the prefixes bound for serialization.
///
/// Insertion order is kept so serialized output is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RdfGraph {
    triples: IndexSet<Triple>,
    prefixes: IndexMap<String, String>,
}

impl RdfGraph {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a prefix for serialization. Rebinding a prefix replaces its IRI.
    pub fn bind(&mut self, prefix: impl Into<String>, iri: impl Into<String>) {
        self.prefixes.insert(prefix.into(), iri.into());
    }

    /// Bound prefixes in binding order
    pub fn prefixes(&self) -> Vec<Namespace> {
        self.prefixes
            .iter()
            .map(|(p, iri)| Namespace::new(p.clone(), iri.clone()))
            .collect()
    }

    /// Add a statement. Returns false if it was already present.
    pub fn insert(&mut self, triple: Triple) -> bool {
        self.triples.insert(triple)
    }

    /// Add a statement from its parts
    pub fn add(
        &mut self,
        subject: NamedNode,
        predicate: RdfPredicate,
        object: impl Into<RdfObject>,
    ) -> bool {
        self.insert(Triple::new(subject, predicate, object.into()))
    }

    /// Check if a triple exists in the graph
    pub fn contains(&self, triple: &Triple) -> bool {
        self.triples.contains(triple)
    }

    /// Get the total number of triples
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    /// Check if the graph is empty
    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Get an iterator over all triples
    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }

    /// Get triples with a specific predicate
    pub fn triples_with_predicate(
        &self,
        predicate: &RdfPredicate,
    ) -> impl Iterator<Item = &Triple> + '_ {
        let predicate = predicate.clone();
        self.triples.iter().filter(move |t| t.predicate == predicate)
    }

    /// Subjects of every `(s, predicate, object)` statement
    pub fn subjects(&self, predicate: &RdfPredicate, object: &RdfObject) -> Vec<&NamedNode> {
        let mut seen = IndexSet::new();
        for triple in &self.triples {
            if &triple.predicate == predicate && &triple.object == object {
                seen.insert(&triple.subject);
            }
        }
        seen.into_iter().collect()
    }

    /// Subjects typed with `rdf:type rdf_type`
    pub fn typed_subjects(&self, rdf_type: &NamedNode) -> Vec<&NamedNode> {
        self.subjects(
            &RdfPredicate::from(NamedNode::rdf_type()),
            &RdfObject::NamedNode(rdf_type.clone()),
        )
    }

    /// Add every statement and prefix binding from another graph
    pub fn extend(&mut self, other: &RdfGraph) {
        for (prefix, iri) in &other.prefixes {
            self.prefixes
                .entry(prefix.clone())
                .or_insert_with(|| iri.clone());
        }
        self.triples.extend(other.triples.iter().cloned());
    }
}
