//! Blog entry resource
//!
//! The mapping exposed for `Entry` records (`/api/v1/entry/`): posts are
//! `sioc:Post`s created by a user account, and every entry is also
//! reachable under its slug at `/posts/<slug>`.

use crate::rdf::{MappingDeclaration, DCTERMS, SIOC};

pub const RESOURCE_NAME: &str = "entry";

/// RDF mapping for blog entries
pub fn entry_mapping() -> MappingDeclaration {
    MappingDeclaration::new("sioc:Post")
        .prefix("dcterms", DCTERMS)
        .prefix("sioc", SIOC)
        .fragment("#post")
        .same_as("/posts/%s", "slug")
        .field("title", "dcterms:title", "Literal")
        .field("user", "sioc:has_creator", "URIRef")
        .field("pub_date", "dcterms:created", "Literal")
        .field("body", "sioc:content", "Literal")
}
