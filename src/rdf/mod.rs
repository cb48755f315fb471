//! RDF views of REST resources
//!
//! This module projects serialized records into RDF graphs, driven by a
//! static mapping declared per entity type:
//! - Mapping declarations and their compiled dispatch tables
//! - Qualified-name resolution against declared prefixes
//! - Single record projection (type, field statements, `owl:sameAs`)
//! - Collection projection (`dcterms:hasPart`, LDP paging)
//! - Serialization formats (Turtle, N-Triples, RDF/XML, JSON-LD)
//!
//! # Example
//!
//! ```rust
//! use rdfmodel::rdf::{MappingDeclaration, Projector, ResourceMapping, SerializedRecord};
//!
//! let decl = MappingDeclaration::new("sioc:Post")
//!     .prefix("sioc", "http://rdfs.org/sioc/ns#")
//!     .prefix("dcterms", "http://purl.org/dc/terms/")
//!     .field("title", "dcterms:title", "Literal");
//! let mapping = ResourceMapping::register("entry", decl).unwrap();
//!
//! let record = SerializedRecord::new("/api/v1/entry/1/").with_field("title", "Hello");
//! let projected = Projector::default().project(&mapping, &record).unwrap();
//!
//! // One rdf:type statement plus one title statement
//! assert_eq!(projected.graph.len(), 2);
//! ```

mod collection;
mod graph;
mod mapping;
mod namespace;
mod projection;
mod record;
mod serialization;
mod types;

pub use types::{Literal, NamedNode, RdfError, RdfObject, RdfPredicate, RdfResult, Triple};

pub use graph::RdfGraph;

pub use namespace::{
    Namespace, NamespaceManager, PredicateName, PrefixError, PrefixResult, ResolvedPredicate,
    DCTERMS, LDP, OWL, RDF, SIOC,
};

pub use mapping::{
    FieldDeclaration, FieldMapping, MappingDeclaration, MappingError, MappingRegistry,
    MappingResult, ResourceMapping, SameAsRule, TermKind,
};

pub use record::SerializedRecord;

pub use projection::{
    ProjectedRecord, ProjectionContext, ProjectionError, ProjectionResult, Projector,
};

pub use collection::{CollectionEnvelope, CollectionProjection, CollectionRequest, PageMeta};

pub use serialization::{
    JsonLdSerializerWrapper, NTriplesSerializerWrapper, Payload, RdfFormat, RdfSerializer,
    RdfXmlSerializerWrapper, Rendered, SerializeError, SerializeResult, TurtleSerializerWrapper,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rdf_module_exports() {
        let _graph = RdfGraph::new();
        let _registry = MappingRegistry::new();
        let _ns_mgr = NamespaceManager::new();
        let _projector = Projector::default();
    }
}
