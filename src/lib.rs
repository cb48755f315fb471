//! rdfmodel
//!
//! RDF views for REST resources. Each exposed entity type declares a static
//! mapping from its serialized fields to RDF predicates; records and list
//! responses are projected through that mapping into graphs annotated with
//! SIOC/DCTERMS vocabularies and served as Turtle or another RDF syntax.
//!
//! HTTP routing, authorization, database access and pagination stay with
//! the host framework: this crate starts from already serialized records.
//!
//! ## Example Usage
//!
//! ```rust
//! use rdfmodel::entry::entry_mapping;
//! use rdfmodel::rdf::{MappingRegistry, Projector, RdfFormat, RdfSerializer, SerializedRecord};
//!
//! let mut registry = MappingRegistry::new();
//! registry.register("entry", entry_mapping()).unwrap();
//! let mapping = registry.get("entry").unwrap();
//!
//! let record = SerializedRecord::new("/api/v1/entry/1/")
//!     .with_field("title", "Hello world")
//!     .with_field("slug", "hello-world")
//!     .with_field("user", "/api/v1/user/1/");
//!
//! let projected = Projector::default().project(mapping, &record).unwrap();
//! let turtle = RdfSerializer::serialize(&projected.graph, RdfFormat::Turtle).unwrap();
//! assert!(turtle.contains("http://localhost/posts/hello-world#post"));
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod entry;
pub mod rdf;

pub use config::{ConfigError, ConfigResult, RdfConfig};

pub use rdf::{
    CollectionEnvelope, CollectionProjection, CollectionRequest, MappingDeclaration,
    MappingError, MappingRegistry, PageMeta, Payload, ProjectedRecord, ProjectionError,
    Projector, RdfFormat, RdfGraph, RdfSerializer, ResourceMapping, SerializedRecord,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn version() -> &'static str {
    VERSION
}
